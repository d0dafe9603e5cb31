//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT call sleep methods. Completions arrive
//! over channels; nothing polls on a timer.
//! **Exception**: Frame rate limiting in the TUI run loop.

use std::path::Path;

use architectural_enforcement::{code_part, production_lines, rust_sources};

#[test]
fn test_no_sleep_in_production_code() {
    let mut violations = Vec::new();
    check_directory("pet/core/src", false, &mut violations);
    check_directory("tui/src", true, &mut violations);

    if !violations.is_empty() {
        eprintln!("\n❌ Sleep calls found in production code!\n");
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        panic!("Found {} sleep violation(s)", violations.len());
    }
}

fn check_directory(dir: &str, allow_frame_limiting: bool, violations: &mut Vec<String>) {
    for (path, content) in rust_sources(dir) {
        let lines = production_lines(&content);
        for (idx, line) in lines.iter().enumerate() {
            let code = code_part(line);
            if !(code.contains("::sleep(") || code.contains(".sleep(")) {
                continue;
            }
            if allow_frame_limiting && is_frame_limiting(&path, &lines, idx) {
                continue;
            }
            violations.push(format!("{}:{} - {}", path.display(), idx + 1, line.trim()));
        }
    }
}

/// Sleep in the app run loop next to a frame duration
fn is_frame_limiting(path: &Path, lines: &[&str], idx: usize) -> bool {
    if !path.ends_with("app.rs") {
        return false;
    }
    let range = idx.saturating_sub(30)..(idx + 5).min(lines.len());
    lines[range].iter().any(|l| l.to_lowercase().contains("frame"))
}

#[test]
fn test_frame_limiting_detection() {
    let code = [
        "let frame_duration = Duration::from_millis(33);",
        "loop {",
        "    _ = tokio::time::sleep(frame_duration) => {}",
        "}",
    ];
    assert!(is_frame_limiting(Path::new("tui/src/app.rs"), &code, 2));
    assert!(!is_frame_limiting(Path::new("tui/src/display.rs"), &code, 2));
}
