use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing::info;

use sprint::{
    app::App,
    app_dirs::AppDirs,
    challenge::Challenge,
    config::{Config, ConfigStore, FileConfigStore, Theme},
    console::{Console, OfflineAssistant},
    logging,
    profile::Profile,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    words::{PromptSet, WordBank},
};

/// portfolio typing challenge and console in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Beat the typing challenge: live and final wpm, best score across resets and no pasting the answer. Tab over to the console for the portfolio commands."
)]
pub struct Cli {
    /// number of words in each prompt
    #[clap(short = 'w', long)]
    number_of_words: Option<usize>,

    /// layout to start in
    #[clap(short = 't', long, value_enum)]
    theme: Option<Theme>,

    /// how often time-based readouts refresh, in milliseconds
    #[clap(long)]
    tick_rate_ms: Option<u64>,

    /// custom phrase for the first attempt; resets draw from the word bank
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// where to write logs (filter with SPRINT_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// persist the merged settings to the config file
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Command line values win over the config file
    fn merge_into(&self, cfg: Config) -> Config {
        Config {
            number_of_words: self.number_of_words.unwrap_or(cfg.number_of_words),
            theme: self.theme.unwrap_or(cfg.theme),
            tick_rate_ms: self.tick_rate_ms.unwrap_or(cfg.tick_rate_ms),
        }
    }
}

fn build_app(cli: &Cli, cfg: &Config) -> Result<App, Box<dyn Error>> {
    let mut challenge = Challenge::new(WordBank::portfolio()?, cfg.number_of_words);
    if let Some(ref phrase) = cli.prompt {
        challenge = challenge.with_prompt(PromptSet::from_phrase(phrase));
    }
    let console = Console::new(Profile::embedded()?, OfflineAssistant);

    Ok(App::new(challenge, console, cfg.theme))
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let log_path = cli.log_file.clone().unwrap_or_else(AppDirs::log_path);
    logging::init(&log_path)?;

    let store = FileConfigStore::new();
    let cfg = cli.merge_into(store.load());
    if cli.save_config {
        store.save(&cfg)?;
        info!(path = %store.path().display(), "saved config");
    }

    let mut app = build_app(&cli, &cfg)?;
    info!(words = cfg.number_of_words, theme = %cfg.theme, "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(cfg.tick_rate_ms)),
    );
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Some(best) = app.challenge.best_wpm() {
        info!(best, "session best");
    }

    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<CrosstermEventSource, FixedTicker>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    while !app.should_quit {
        if app.handle_event(runner.step()) && !app.should_quit {
            terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        }
    }

    Ok(())
}
