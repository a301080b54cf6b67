use anyhow::{anyhow, Context, Result};
use clap::Parser;
use ratatui::{backend::TermionBackend, Terminal};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use termion::input::TermRead;
use termion::raw::IntoRawMode;
use termion::screen::IntoAlternateScreen;
use tracing_subscriber::EnvFilter;

use modalkeys::config::Config;
use modalkeys::input::key_token;
use modalkeys::mode::KeyOutcome;
use modalkeys::theme::get_builtin_theme;
use modalkeys::ui::message_area::{Message, MessageLevel};
use modalkeys::ui::status_line::StatusLine;
use modalkeys::ui::transcript::Transcript;
use modalkeys::ui::{Session, UI};

/// modalkeys - An incremental vim-style key sequence interpreter
#[derive(Parser)]
#[command(name = "modalkeys")]
#[command(version)]
#[command(about = "Resolves vim-style key sequences into editing operations", long_about = None)]
struct Cli {
    /// Whitespace-separated keys to feed one by one (e.g. "d a w"); prints each
    /// executed queue as a JSON line instead of starting the interactive screen
    #[arg(short, long)]
    keys: Option<String>,

    /// Config file to use instead of ~/.config/modalkeys/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Theme name (overrides the config theme)
    #[arg(short, long)]
    theme: Option<String>,

    /// Write logs to this file (interactive mode logs nowhere without it)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write the effective config (to --config, or the default location) and exit
    #[arg(long)]
    write_config: bool,
}

/// Set up a panic hook that restores the terminal before displaying panic information.
fn setup_panic_hook() {
    use std::panic;

    let default_panic = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = write!(io::stderr(), "{}", termion::screen::ToMainScreen);
        let _ = write!(io::stderr(), "{}", termion::cursor::Show);
        let _ = io::stderr().flush();

        tracing::error!(%panic_info, "panic");
        default_panic(panic_info);
    }));
}

/// Installs the tracing subscriber. `RUST_LOG` takes precedence over `level`.
fn init_logging(level: &str, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(io::stderr).try_init(),
    }
    .map_err(|e| anyhow!("Failed to install logger: {}", e))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    if cli.write_config {
        match &cli.config {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
        return Ok(());
    }

    if cli.keys.is_some() || cli.log_file.is_some() {
        init_logging(&config.log_level, cli.log_file.as_deref())?;
    }

    let mut session = Session::new(&config, Transcript::default(), StatusLine::default())
        .context("Failed to set up key dispatcher")?;

    if let Some(keys) = &cli.keys {
        return run_script(&mut session, keys);
    }

    let theme_name = cli.theme.as_deref().unwrap_or(&config.theme);
    let theme = get_builtin_theme(theme_name)
        .ok_or_else(|| anyhow!("Theme '{}' not found", theme_name))?;

    setup_panic_hook();
    run_interactive(&mut session, &UI::new(theme))
}

/// Feeds each key as its own event and prints every executed queue as JSON.
fn run_script(session: &mut Session, keys: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for key in keys.split_whitespace() {
        let before = session.executor().executed();
        let outcome = session.handle_key_event(key)?;

        if let KeyOutcome::Rejected(errors) = &outcome {
            for error in errors {
                eprintln!("{}: {}", key, error);
            }
        }

        let new = session.executor().executed() - before;
        let recorded = session.executor().len();
        for queue in session.executor().entries().skip(recorded.saturating_sub(new)) {
            writeln!(out, "{}", serde_json::to_string(queue)?)?;
        }
    }

    if !session.pending_keys().is_empty() {
        eprintln!(
            "incomplete sequence: {}",
            session.pending_keys().join(" ")
        );
    }

    Ok(())
}

fn run_interactive(session: &mut Session, ui: &UI) -> Result<()> {
    let stdout = io::stdout()
        .into_raw_mode()
        .context("Failed to enable raw mode")?;
    let stdout = stdout
        .into_alternate_screen()
        .context("Failed to enter alternate screen")?;

    let backend = TermionBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut message: Option<Message> = None;
    let mut events = io::stdin().events();

    loop {
        ui.render(&mut terminal, session, message.as_ref())?;

        let Some(event) = events.next() else {
            break;
        };
        let Some(key) = key_token(&event?) else {
            continue;
        };
        if key == "ctrl+c" {
            break;
        }

        message = match session.handle_key_event(&key) {
            Ok(KeyOutcome::Rejected(errors)) => Some(Message::from_errors(&errors)),
            Ok(_) => None,
            Err(e) => Some(Message::new(format!("{:#}", e), MessageLevel::Warning)),
        };
    }

    write!(terminal.backend_mut(), "{}", termion::cursor::Show)?;
    terminal.backend_mut().flush()?;

    Ok(())
}
