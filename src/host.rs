use std::cell::RefCell;
use std::process::Command;

use anyhow::{bail, Context, Result};

/// Side effects menu actions ask the surrounding application for.
pub trait Host {
    /// Shows a message to the user.
    fn notify(&self, message: &str) -> Result<()>;
    /// Runs an external command and waits for it.
    fn run(&self, command: &[String]) -> Result<()>;
}

/// Prints to stdout and spawns real processes with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl Host for SystemHost {
    fn notify(&self, message: &str) -> Result<()> {
        println!("{message}");
        Ok(())
    }

    fn run(&self, command: &[String]) -> Result<()> {
        let Some((program, args)) = command.split_first() else {
            bail!("empty command");
        };
        tracing::info!(command = %command.join(" "), "run");
        let status = Command::new(program)
            .args(args)
            .status()
            .with_context(|| format!("running {}", command.join(" ")))?;
        if !status.success() {
            bail!("`{}` failed (exit={status})", command.join(" "));
        }
        Ok(())
    }
}

/// Records everything instead of doing it. Useful for headless runs and tests.
#[derive(Debug, Default)]
pub struct RecordingHost {
    messages: RefCell<Vec<String>>,
    commands: RefCell<Vec<Vec<String>>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn commands(&self) -> Vec<Vec<String>> {
        self.commands.borrow().clone()
    }
}

impl Host for RecordingHost {
    fn notify(&self, message: &str) -> Result<()> {
        self.messages.borrow_mut().push(message.to_string());
        Ok(())
    }

    fn run(&self, command: &[String]) -> Result<()> {
        self.commands.borrow_mut().push(command.to_vec());
        Ok(())
    }
}
