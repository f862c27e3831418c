mod animation;
mod app;
mod config;
mod error;
mod input;
mod logging;
mod spawn;
mod types;
mod ui;

use app::App;
use clap::Parser;
use config::Config;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use error::AppError;
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use tokio::time::MissedTickBehavior;
use ui::starfield::StarField;

#[derive(Debug, Parser)]
#[command(name = "starshapes", version, about = "Spawn animated shapes over a twinkling starfield")]
struct Cli {
    /// Config file (defaults to <config dir>/starshapes/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of background stars
    #[arg(long)]
    stars: Option<usize>,

    /// Seed for a reproducible starfield
    #[arg(long)]
    seed: Option<u64>,

    /// Frames per second for animations
    #[arg(long)]
    fps: Option<u32>,

    /// Start with the mouse trail disabled
    #[arg(long)]
    no_trail: bool,

    /// Evict the oldest shapes beyond this many
    #[arg(long)]
    max_shapes: Option<usize>,

    /// Log file (defaults to <cache dir>/starshapes/starshapes.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,

    /// Write the effective config to the config path and exit
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    /// Layer CLI flags over the file config.
    fn apply(&self, config: &mut Config) {
        if let Some(stars) = self.stars {
            config.star_count = stars;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if self.no_trail {
            config.trail = false;
        }
        if self.max_shapes.is_some() {
            config.max_shapes = self.max_shapes;
        }
    }
}

/// Raw mode, alternate screen and mouse capture for as long as this lives.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn start() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        terminal.clear()?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    if !logging::init(&log_path, cli.log_level) {
        eprintln!("Logging disabled: cannot open {}", log_path.display());
    }

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let mut cfg = match config::load_config(&config_path) {
        Ok(c) => {
            tracing::info!(path = %config_path.display(), "config loaded");
            c
        }
        Err(e) => {
            tracing::warn!(error = %e, "falling back to default config");
            Config::default()
        }
    };
    cli.apply(&mut cfg);
    cfg.validate().map_err(AppError::from)?;

    if cli.write_config {
        config::save_config(&cfg, &config_path).map_err(AppError::from)?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    let starfield = match cli.seed {
        Some(seed) => StarField::seeded(cfg.star_count, seed),
        None => StarField::new(cfg.star_count),
    };
    let app = App::new(&cfg, starfield);

    let result = {
        let mut session = TerminalSession::start()?;
        run_app(&mut session.terminal, app).await
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "exited with error");
        eprintln!("Error: {}", e);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: App,
) -> Result<(), AppError> {
    let size = terminal.size()?;
    app.on_resize(size.width, size.height);

    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(app.tick_rate());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(
        stars = app.starfield.len(),
        tick_ms = app.tick_rate().as_millis() as u64,
        "session started"
    );

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => app.on_tick(),
            event = events.next() => match event {
                Some(Ok(event)) => input::handle_event(&mut app, event),
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        }

        if app.should_quit {
            break;
        }
    }

    tracing::info!(shapes = app.shapes.len(), "session ended");
    Ok(())
}
