use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
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
    time::Instant,
};

use sortviz::{
    app::App,
    config::{ConfigStore, FileConfigStore, VisualizerConfig},
    logging,
    runtime::{AppEvent, CrosstermEventSource, Runner, RunnerError},
    ui, Algorithm,
};

/// step-by-step sorting algorithm visualizer
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Animates bubble, insertion, and selection sort one pseudocode line at a time, with pause/resume and adjustable speed."
)]
pub struct Cli {
    /// algorithm to visualize
    #[clap(short = 'a', long, value_enum)]
    algorithm: Option<Algorithm>,

    /// number of bars to sort
    #[clap(short = 'n', long = "bars")]
    bar_count: Option<usize>,

    /// smallest possible bar value
    #[clap(long)]
    min_height: Option<i32>,

    /// largest possible bar value
    #[clap(long)]
    max_height: Option<i32>,

    /// delay between steps in milliseconds
    #[clap(short = 'd', long)]
    delay_ms: Option<u64>,

    /// append logs to this file (also settable via SORTVIZ_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// do not remember the settings for the next launch
    #[clap(long)]
    no_save: bool,
}

impl Cli {
    /// Overlay the flags that were given on top of the stored settings
    fn apply(&self, mut config: VisualizerConfig) -> VisualizerConfig {
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(bar_count) = self.bar_count {
            config.bar_count = bar_count;
        }
        if let Some(min_height) = self.min_height {
            config.min_height = min_height;
        }
        if let Some(max_height) = self.max_height {
            config.max_height = max_height;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = logging::log_path(cli.log_file.as_deref()) {
        logging::init_logging(&path)?;
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(e) => Cli::command()
            .error(ErrorKind::ValueValidation, e.to_string())
            .exit(),
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    if !cli.no_save {
        if let Err(e) = store.save(app.engine.config()) {
            tracing::warn!(error = %e, path = %store.path().display(), "could not save settings");
        }
    }

    res
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new());
    terminal.draw(|f| ui::draw(app, f))?;

    while !app.should_quit {
        let timeout = app.next_timeout(Instant::now());
        let redraw = match runner.step(timeout) {
            Ok(AppEvent::Tick) => app.on_tick(Instant::now()),
            Ok(AppEvent::Resize) => true,
            Ok(AppEvent::Key(key)) => app.handle_key(key),
            Err(RunnerError::Disconnected) => break,
        };

        if redraw {
            terminal.draw(|f| ui::draw(app, f))?;
        }
    }

    Ok(())
}
