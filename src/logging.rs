//! Log dispatch setup. The TUI owns the terminal, so interactive runs log to
//! a daily file under `~/.folio/logs` instead of stderr.

use crate::config;
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum LoggingMode {
    File,
    Stderr,
}

pub fn init_logging(mode: LoggingMode, debug: bool) -> Result<()> {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let mut dispatch = fern::Dispatch::new()
        .level(level)
        .format(|out, message, record| {
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let module = record.module_path().unwrap_or(record.target());
            let line = record
                .line()
                .map(|line| line.to_string())
                .unwrap_or_else(|| "?".to_owned());
            out.finish(format_args!(
                "[{}] [{}] [{}:{}] {}",
                record.level(),
                timestamp,
                module,
                line,
                message
            ))
        });

    match mode {
        LoggingMode::Stderr => {
            dispatch = dispatch.chain(io::stderr());
        }
        LoggingMode::File => match create_log_file() {
            Ok(log_file) => {
                dispatch = dispatch.chain(log_file);
            }
            Err(err) => {
                eprintln!("failed to open log file: {err:#}");
                let sink: Box<dyn Write + Send> = Box::new(io::sink());
                dispatch = dispatch.chain(sink);
            }
        },
    }

    dispatch.apply().context("failed to install logger")?;
    Ok(())
}

fn create_log_file() -> Result<File> {
    let log_dir = config::app_dir()?.join("logs");
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    let log_path = log_dir.join(format!("{date}.log"));

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))
}
