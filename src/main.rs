use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use bibtui::app::App;
use bibtui::config::Config;
use bibtui::external;
use bibtui::repository::LibraryRepository;
use bibtui::terminal::{setup_panic_hook, TerminalSession};
use bibtui::ui;

use color_eyre::eyre::{eyre, Result, WrapErr};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "\
Usage: bibtui [OPTIONS]

Options:
  --library <DIR>   bibliography library directory
  --config <FILE>   configuration file
  --version         print version and exit
  -h, --help        print this help and exit";

/// Parsed command line.
struct Args {
    library: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = std::env::args().skip(1);
    let mut parsed = Args {
        library: None,
        config: None,
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" => {
                println!("bibtui {}", VERSION);
                return Ok(None);
            }
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(None);
            }
            "--library" => {
                let value = args.next().ok_or_else(|| eyre!("--library needs a value"))?;
                parsed.library = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = args.next().ok_or_else(|| eyre!("--config needs a value"))?;
                parsed.config = Some(PathBuf::from(value));
            }
            other => return Err(eyre!("unknown argument '{}'\n\n{}", other, USAGE)),
        }
    }
    Ok(Some(parsed))
}

/// Log to a file; a TUI cannot share stdout with its own frames.
fn init_logging() {
    let Some(dir) = dirs::state_dir().or_else(dirs::data_dir) else {
        return;
    };
    let dir = dir.join("bibtui");
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = fs::File::options()
        .create(true)
        .append(true)
        .open(dir.join("bibtui.log"))
    else {
        return;
    };
    let filter = tracing_subscriber::EnvFilter::try_from_env("BIBTUI_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
}

/// Resolve the library directory: explicit flag, or the default location
/// (created on first run).
fn open_library(args: &Args) -> Result<(LibraryRepository, PathBuf)> {
    let dir = match &args.library {
        Some(dir) => dir.clone(),
        None => {
            let dir = dirs::data_dir()
                .ok_or_else(|| eyre!("no data directory; pass --library"))?
                .join("bibtui")
                .join("library");
            fs::create_dir_all(&dir)
                .wrap_err_with(|| format!("creating library {}", dir.display()))?;
            dir
        }
    };
    let repo = LibraryRepository::open(&dir)
        .wrap_err_with(|| format!("opening library {}", dir.display()))?;
    Ok((repo, dir))
}

fn run(app: &mut App, session: &mut TerminalSession) -> Result<()> {
    while !app.should_quit {
        if app.take_redraw() {
            session.terminal().draw(|frame| ui::render(frame, app))?;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Event::Resize(_, height) => app.handle_resize(height),
            _ => {}
        }
        if let Some(path) = app.pending_edit.take() {
            let result = session.suspend(|| external::edit_file(&path))?;
            app.finish_edit(result);
        }
    }
    Ok(())
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let Some(args) = parse_args()? else {
        return Ok(ExitCode::SUCCESS);
    };
    init_logging();
    info!(version = VERSION, "starting");

    let config = Config::load(args.config.as_deref())?;
    let (repo, library_dir) = open_library(&args)?;

    setup_panic_hook();
    let mut session = TerminalSession::new()?;
    let height = session.terminal().size()?.height;
    let mut app = App::new(config, Box::new(repo), Some(library_dir), height)?;

    let result = run(&mut app, &mut session);
    session.restore();
    result.map(|_| ExitCode::SUCCESS)
}
