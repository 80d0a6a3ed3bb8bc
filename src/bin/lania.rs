use anyhow::{Context, Result};
use lania::cli::{self, CliArgs};
use lania::config::Config;
use lania::console;
use lania::context::{AppContext, StandardContext};
use lania::controller::Session;
use lania::storage::LocalStorage;
use log::LevelFilter;
use simplelog::WriteLogger;
use std::env;
use std::fs::OpenOptions;
use std::io;

/// Installs the file logger. Returns a warning when logging could not be
/// started; the assistant works without it.
fn init_logging(ctx: &dyn AppContext, level: LevelFilter) -> Option<String> {
    if level == LevelFilter::Off {
        return None;
    }
    let path = ctx.get_log_path()?;
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, simplelog::Config::default(), file) {
                return Some(format!("Could not start logging to '{}': {}", path.display(), e));
            }
            None
        }
        Err(e) => Some(format!("Could not open log file '{}': {}", path.display(), e)),
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let CliArgs { root, help } = match cli::parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e);
            cli::print_help("lania");
            std::process::exit(2);
        }
    };
    if help {
        cli::print_help("lania");
        return Ok(());
    }

    let ctx = StandardContext::new(root);
    let (config, config_warning) = Config::load_or_init(&ctx);
    if let Some(warning) = init_logging(&ctx, config.log_level_filter()) {
        eprintln!("{}", warning);
    }

    let mut notices = Vec::new();
    if let Some(warning) = config_warning {
        log::warn!("{}", warning);
        notices.push(warning);
    }

    let data_path = config
        .data_file_path(&ctx)
        .context("Could not determine where to keep the task file")?;
    log::info!("Using task file {}", data_path.display());

    let storage = LocalStorage::new(data_path);
    let (mut session, load_notices) = Session::open(Box::new(storage), config.on_corrupt_record);
    notices.extend(load_notices);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    console::run(&mut session, &notices, stdin.lock(), &mut stdout)?;
    Ok(())
}
