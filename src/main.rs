//! APOGEA Planner - Entry Point
//!
//! Initializes the terminal, loads the trait data and runs the main loop.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use apogea::data::{export_default_data, DataManager, DEFAULT_DATA_DIR};
use apogea::game::{Planner, StartOptions};
use apogea::progression::ClassKind;
use apogea::save::preferences_path;
use apogea::ui::App;

/// Target frames per second for the main loop
const TARGET_FPS: u64 = 60;
const FRAME_TIME: Duration = Duration::from_millis(1000 / TARGET_FPS);

/// Character planner for APOGEA
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Class to open the stat sheet with (squire, knight, mage, rogue)
    #[arg(long)]
    class: Option<ClassKind>,

    /// Trait tree to open directly (e.g. axe)
    #[arg(long = "trait", value_name = "TREE")]
    trait_key: Option<String>,

    /// Character level, 1 to 100
    #[arg(long)]
    level: Option<i32>,

    /// Directory holding trees.ron and planner.ron
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Write the built-in data files to the data directory and exit
    #[arg(long)]
    export_data: bool,
}

fn init_logging() {
    // Log to a file so output does not interfere with the TUI
    let target: Box<dyn io::Write + Send> = match OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("apogea.log")
    {
        Ok(file) => Box::new(file),
        Err(_) => Box::new(io::sink()),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(target))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    log::info!("Starting APOGEA Planner v{}", env!("CARGO_PKG_VERSION"));

    if args.export_data {
        let written = export_default_data(&args.data_dir)
            .with_context(|| format!("exporting data to {}", args.data_dir.display()))?;
        for path in written {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let data = DataManager::load_from(&args.data_dir);
    let mut planner = Planner::new(
        &data,
        StartOptions {
            class: args.class,
            trait_key: args.trait_key,
            level: args.level,
            prefs_path: Some(preferences_path()),
        },
    )
    .context("starting the planner")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let result = run_loop(&mut terminal, &mut app, &mut planner);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Planner exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("APOGEA Planner shut down cleanly");
    result
}

/// Main loop
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    planner: &mut Planner,
) -> Result<()> {
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        let delta = frame_start.duration_since(last_frame);
        last_frame = frame_start;

        if event::poll(Duration::from_millis(0))? {
            let outcome = match event::read()? {
                // Only handle key press events, not releases
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_input(key, planner),
                Event::Mouse(mouse) => app.handle_mouse(mouse, planner),
                _ => Ok(false),
            };
            match outcome {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) => log::warn!("Input handling error: {}", e),
            }
        }

        planner.tick(delta);

        terminal.draw(|frame| {
            app.render(frame, planner);
        })?;

        if planner.should_quit() {
            break;
        }

        // Frame rate limiting
        let frame_time = frame_start.elapsed();
        if frame_time < FRAME_TIME {
            std::thread::sleep(FRAME_TIME - frame_time);
        }
    }

    Ok(())
}
