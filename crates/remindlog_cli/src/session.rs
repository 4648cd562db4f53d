//! Interactive session: executes parsed commands against the core service.
//!
//! # Invariants
//! - Core errors are reported to the output and never end the session.
//! - Menu numbers are resolved against the lists last displayed, which are
//!   rebuilt on every listing and after every mutation.

use crate::command::{Command, MenuIndex};
use log::warn;
use remindlog_core::{
    Clock, MemoryReminderRepository, ReminderMenu, ReminderService, ReminderServiceError,
};
use std::io::{self, Write};

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<W: Write> {
    service: ReminderService<MemoryReminderRepository>,
    clock: Clock,
    menu: ReminderMenu,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(service: ReminderService<MemoryReminderRepository>, clock: Clock, out: W) -> Self {
        let menu = ReminderMenu::build(&service, clock.now());
        Self {
            service,
            clock,
            menu,
            out,
        }
    }

    #[cfg(test)]
    pub fn service(&self) -> &ReminderService<MemoryReminderRepository> {
        &self.service
    }

    #[cfg(test)]
    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Executes one command, printing user-facing failures.
    pub fn execute(&mut self, command: Command) -> io::Result<Flow> {
        match self.apply(command) {
            Ok(flow) => Ok(flow),
            Err(SessionError::Io(err)) => Err(err),
            Err(SessionError::Core(err)) => {
                warn!("event=command_failed module=cli status=error error={err}");
                writeln!(self.out, "{err}")?;
                Ok(Flow::Continue)
            }
            Err(SessionError::NotANumber(raw)) => {
                writeln!(self.out, "{raw} is not a valid item from the menu.")?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()
    }

    pub fn show_active(&mut self) -> io::Result<()> {
        self.refresh_menu();
        writeln!(self.out, "ACTIVE REMINDERS")?;
        for (number, reminder) in self.menu.active.iter().enumerate() {
            writeln!(self.out, "{}. {}", number + 1, reminder.reminder_text)?;
        }
        Ok(())
    }

    fn show_future(&mut self) -> io::Result<()> {
        self.refresh_menu();
        writeln!(self.out, "FUTURE REMINDERS")?;
        let start = self.menu.future_start_index();
        for (offset, reminder) in self.menu.future.iter().enumerate() {
            writeln!(
                self.out,
                "{}. {}",
                start + offset as i64,
                reminder.reminder_text
            )?;
        }
        Ok(())
    }

    fn show_past(&mut self) -> io::Result<()> {
        self.refresh_menu();
        writeln!(self.out, "PAST REMINDERS")?;
        for (number, reminder) in self.menu.past.iter().enumerate() {
            writeln!(self.out, "-{}. {}", number + 1, reminder.reminder_text)?;
        }
        Ok(())
    }

    fn refresh_menu(&mut self) {
        self.menu = ReminderMenu::build(&self.service, self.clock.now());
    }

    fn apply(&mut self, command: Command) -> Result<Flow, SessionError> {
        match command {
            Command::Quit => {
                writeln!(self.out, "goodbye")?;
                return Ok(Flow::Quit);
            }
            Command::ShowActive => self.show_active()?,
            Command::ShowFuture => self.show_future()?,
            Command::ShowPast => self.show_past()?,
            Command::Dismiss(index) => {
                let reminder_id = self.menu.dismiss_target(menu_number(index)?)?;
                self.service.dismiss(reminder_id, self.clock.now())?;
                self.show_active()?;
            }
            Command::Renew { index, at } => {
                let reminder_id = self.menu.renew_target(menu_number(index)?)?;
                self.service.renew(reminder_id, &at)?;
                self.show_active()?;
            }
            Command::RemindNow { text } => {
                if !text.is_empty() {
                    let now = self.clock.now();
                    self.service.schedule_reminder(text, now)?;
                    self.show_active()?;
                }
            }
            Command::RemindAt { at, text } => {
                if !text.is_empty() {
                    self.service.create_reminder(text, &at)?;
                    self.show_active()?;
                }
            }
            Command::Dump { file } => {
                self.service.export_snapshot(&file, self.clock.now())?;
                writeln!(self.out, "{file} has been written")?;
            }
            Command::Ignored => {}
        }
        Ok(Flow::Continue)
    }
}

fn menu_number(index: MenuIndex) -> Result<i64, SessionError> {
    match index {
        MenuIndex::Number(value) => Ok(value),
        MenuIndex::Raw(raw) => Err(SessionError::NotANumber(raw)),
    }
}

enum SessionError {
    Io(io::Error),
    Core(ReminderServiceError),
    NotANumber(String),
}

impl From<io::Error> for SessionError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ReminderServiceError> for SessionError {
    fn from(value: ReminderServiceError) -> Self {
        Self::Core(value)
    }
}
