//! Interactive reminder tracker.
//!
//! # Responsibility
//! - Resolve configuration from an optional JSON file and CLI flags.
//! - Load the three reminder tables and run the text command loop.

mod command;
mod session;

use clap::Parser;
use command::parse_command;
use log::{info, warn};
use remindlog_core::{init_logging, AppConfig, MemoryReminderRepository, ReminderService};
use session::{Flow, Session};
use std::error::Error;
use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Event-sourced personal reminder tracker")]
struct Args {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Reminder catalog table.
    #[arg(long)]
    reminders: Option<PathBuf>,
    /// Activation log table.
    #[arg(long)]
    active: Option<PathBuf>,
    /// Dismissal log table.
    #[arg(long)]
    dismissed: Option<PathBuf>,
    /// Pin the current instant, e.g. `2025-04-07 10:00:00`.
    #[arg(long)]
    now: Option<String>,
    #[arg(long)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files.
    #[arg(long)]
    log_dir: Option<String>,
}

impl Args {
    fn resolve_config(self) -> Result<AppConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        if let Some(path) = self.reminders {
            config.tables.reminders = path;
        }
        if let Some(path) = self.active {
            config.tables.activations = path;
        }
        if let Some(path) = self.dismissed {
            config.tables.dismissals = path;
        }
        config.now = self.now.or(config.now);
        config.log_level = self.log_level.or(config.log_level);
        config.log_dir = self.log_dir.or(config.log_dir);
        Ok(config)
    }
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = args.resolve_config()?;
    if let Err(err) = init_logging(config.log_level(), config.log_dir()) {
        eprintln!("warning: file logging disabled: {err}");
    }
    let clock = config.clock()?;

    let mut service = ReminderService::new(MemoryReminderRepository::new());
    service.reload(&config.tables)?;
    info!(
        "event=session_start module=cli status=ok fixed_clock={}",
        config.now.is_some()
    );

    let stdout = std::io::stdout();
    let mut session = Session::new(service, clock, stdout.lock());
    session.show_active()?;

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        session.prompt()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if session.execute(parse_command(&line))? == Flow::Quit {
            info!("event=session_end module=cli status=ok");
            return Ok(());
        }
    }

    warn!("event=session_end module=cli status=eof");
    Ok(())
}
