//! Moyu Pet TUI Entry Point
//!
//! Opens the pet dialog in a full-screen terminal.
//!
//! Usage:
//!   pet-tui [OPTIONS]
//!
//! Options:
//!   --config <PATH>            Config file (default: ~/.config/moyu-pet/pet.toml)
//!   --base-url <URL>           Pet service base URL
//!   --token <TOKEN>            Bearer token for the pet service
//!   --other-user-id <ID>       View another account's pet instead of your own
//!   --other-user-name <NAME>   Display name of that account
//!   --log-file <PATH>          Write logs here (the terminal is taken by the UI)

use std::fs::File;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pet_core::config::load_config_from_path;
use pet_core::{load_config, ConfigOverrides, HttpPetBackend, ViewSubject};
use pet_tui::App;

/// Moyu Pet - terminal pet dialog
#[derive(Parser, Debug)]
#[command(name = "pet-tui")]
#[command(about = "View and care for your Moyu pet", long_about = None)]
struct Args {
    /// Config file path
    #[arg(short, long, env = "MOYU_PET_CONFIG")]
    config: Option<PathBuf>,

    /// Pet service base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token for the pet service
    #[arg(long)]
    token: Option<String>,

    /// View this account's pet instead of your own
    #[arg(long, env = "MOYU_PET_OTHER_USER_ID")]
    other_user_id: Option<String>,

    /// Display name of the other account
    #[arg(long, env = "MOYU_PET_OTHER_USER_NAME")]
    other_user_name: Option<String>,

    /// Log file
    #[arg(long, env = "MOYU_PET_LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Set up logging; stdout belongs to the UI, so logs only go to a file
    let file_layer = match args.log_file {
        Some(ref path) => Some(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(File::create(path)?)),
        ),
        None => None,
    };
    tracing_subscriber::registry()
        .with(file_layer)
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let mut config = match args.config {
        Some(ref path) => load_config_from_path(Some(path.clone()))?,
        None => load_config()?,
    };
    let mut overrides = ConfigOverrides::new();
    if let Some(url) = args.base_url {
        overrides = overrides.with_base_url(url);
    }
    if let Some(token) = args.token {
        overrides = overrides.with_token(token);
    }
    overrides.apply(&mut config);
    config.validate()?;

    tracing::info!(
        base_url = %config.base_url,
        source = %config.source(),
        "Configuration loaded"
    );

    let backend = HttpPetBackend::from_config(&config)?;
    let subject = ViewSubject::from_host(
        args.other_user_id.as_deref(),
        args.other_user_name.as_deref(),
    );

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("❌ Error: pet-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means stdin or stdout is piped, or SSH ran without -t.");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    // Run the app
    let mut app = App::new(backend, config.dialog(), subject);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}
