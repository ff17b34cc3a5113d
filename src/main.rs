use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::ExitCode;

use passvault::shell::highlighter::OutputHighlighter;
use passvault::shell::history::HistoryConfig;
use passvault::shell::{Shell, ShellConfig};
use passvault::{AppConfig, LoadStatus, LogConfig, Manager, init_logging};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Fatal: {:#}", e);
            eprintln!("{}", OutputHighlighter::error(&format!("Error: {:#}", e)));
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<()> {
    let mut config = AppConfig::from_home()?;
    if let Some(path) = std::env::args_os().nth(1) {
        config = config.with_db_path(PathBuf::from(path));
    }

    config
        .ensure_data_dir()
        .with_context(|| format!("Failed to create {}", config.data_dir.display()))?;
    init_logging(&LogConfig::new(config.log_path.clone()))?;

    println!("Welcome to passvault!");

    let mut manager = Manager::open(&config.db_path)
        .with_context(|| format!("Failed to open store {}", config.db_path.display()))?;

    match manager.load_status() {
        LoadStatus::Missing => println!(
            "{}",
            OutputHighlighter::info(&format!(
                "No store found at {}; it will be created on the first change.",
                config.db_path.display()
            ))
        ),
        LoadStatus::Loaded {
            entries,
            discarded_bytes,
        } => {
            println!("Loaded {} entries.", entries);
            if discarded_bytes > 0 {
                println!(
                    "{}",
                    OutputHighlighter::warning(&format!(
                        "Ignored {} trailing bytes that did not form a whole record.",
                        discarded_bytes
                    ))
                );
            }
        }
    }

    let shell = Shell::with_config(ShellConfig {
        history: HistoryConfig::new(config.history_path.clone()),
        ..Default::default()
    });
    shell.run(&mut manager)
}
