//! Integration Test: Headless Core
//!
//! **Policy**: `pet-core` holds the dialog state machine and never renders.
//! Terminal crates belong to the surface crates only, and the core must not
//! reach back into them.

use architectural_enforcement::{code_part, production_lines, rust_sources, workspace_root};

const SURFACE_CRATES: [&str; 4] = ["ratatui", "crossterm", "pet_tui", "tracing_subscriber"];

#[test]
fn test_core_sources_do_not_use_surface_crates() {
    let mut violations = Vec::new();

    for (path, content) in rust_sources("pet/core/src") {
        for (idx, line) in content.lines().enumerate() {
            let code = code_part(line);
            for krate in SURFACE_CRATES {
                if code.contains(&format!("{krate}::")) {
                    violations.push(format!("{}:{} - {}", path.display(), idx + 1, line.trim()));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "pet-core uses surface crates:\n{}",
        violations.join("\n")
    );
}

#[test]
fn test_core_manifest_has_no_terminal_dependencies() {
    let manifest = std::fs::read_to_string(workspace_root().join("pet/core/Cargo.toml"))
        .expect("pet/core/Cargo.toml should be readable");

    for krate in ["ratatui", "crossterm"] {
        assert!(
            !manifest.contains(krate),
            "pet-core must not depend on {krate}"
        );
    }
}

#[test]
fn test_core_production_code_does_not_block_on_stdin() {
    for (path, content) in rust_sources("pet/core/src") {
        for line in production_lines(&content) {
            assert!(
                !code_part(line).contains("stdin()"),
                "{} reads stdin",
                path.display()
            );
        }
    }
}
