use anyhow::{Context, Result};
use clap::Parser;
use rivena::{FileThemeStore, Theme, ThemeProvider};
use rivena_chat::{App, AppConfig, AuthState, Command, MemoryAuthBackend, Outcome};
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::Arc,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Terminal shell for the Rivena chat assistant.
#[derive(Parser, Debug)]
#[command(name = "rivena-chat", about, version)]
struct Cli {
    /// Path to the config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// The route to open, like /chat, /chat/42 or /login.
    #[arg(short, long)]
    route: Option<String>,

    /// Render width in columns. Defaults to the terminal width.
    #[arg(short, long)]
    width: Option<usize>,

    /// The theme to use when none has been saved.
    #[arg(long)]
    theme: Option<Theme>,

    /// Render a single frame and exit.
    #[arg(long)]
    once: bool,

    /// Print frames without colors.
    #[arg(long)]
    plain: bool,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(route) = &self.route {
            config.route = route.clone();
        }
        if let Some(width) = self.width {
            config.width = Some(width);
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
    }
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn draw(app: &App, plain: bool) -> Result<()> {
    let tree = app.render()?;
    let mut stdout = io::stdout().lock();
    if plain {
        tree.write(&mut stdout)?;
    } else {
        tree.write_ansi(&mut stdout)?;
    }
    stdout.flush()?;
    Ok(())
}

fn prompt() -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "> ")?;
    stdout.flush()
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load config")?;
    cli.apply(&mut config);
    init_logging(&config.log_filter);

    if config.width.is_none() {
        config.width = crossterm::terminal::size()
            .ok()
            .map(|(width, _)| width as usize);
    }
    debug!(?config, "loaded config");

    let theme = ThemeProvider::new(Arc::new(FileThemeStore::new(config.theme_dir())))
        .default_theme(config.theme)
        .storage_key(config.storage_key.clone())
        .load();

    let mut auth = AuthState::new(Arc::new(MemoryAuthBackend::new()));
    auth.restore().context("failed to restore session")?;

    let mut app = App::new(&config, auth, theme);
    info!(route = %app.state().route, theme = %app.theme().theme(), "starting");
    draw(&app, cli.plain)?;
    if cli.once {
        return Ok(());
    }

    prompt()?;
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            prompt()?;
            continue;
        }
        match line.parse::<Command>().and_then(|command| command.run(&mut app)) {
            Ok(Outcome::Redraw) => draw(&app, cli.plain)?,
            Ok(Outcome::Notice(notice)) => println!("{}", notice),
            Ok(Outcome::Quit) => break,
            Err(e) => eprintln!("error: {}", e),
        }
        prompt()?;
    }
    Ok(())
}

fn main() -> Result<()> {
    run(Cli::parse())
}
