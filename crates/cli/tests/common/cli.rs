//! Helpers for driving the `tailwatch` binary
//!
//! `TailCommand` runs the binary to completion (for startup failures);
//! `TailProcess` keeps it running and collects stdout lines as they arrive.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

/// Path of the binary built for this test run
pub fn tailwatch_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tailwatch"))
}

/// Command builder for short-lived invocations
pub struct TailCommand {
    args: Vec<String>,
    env: Vec<(String, String)>,
    current_dir: Option<PathBuf>,
}

impl TailCommand {
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            env: Vec::new(),
            current_dir: None,
        }
    }

    /// Add command arguments
    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    /// Run from `dir` instead of the test's working directory
    pub fn current_dir(&mut self, dir: &Path) -> &mut Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    fn command(&self) -> Command {
        let mut command = Command::new(tailwatch_binary());
        command
            .args(&self.args)
            .envs(self.env.iter().cloned())
            .stdin(Stdio::null());
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        command
    }

    /// Run to completion
    pub fn execute(&self) -> CommandResult {
        let output = self
            .command()
            .output()
            .expect("Failed to execute tailwatch");

        CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        }
    }

    /// Spawn and keep running
    pub fn spawn(&self) -> TailProcess {
        let mut child = self
            .command()
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("Failed to spawn tailwatch");

        let stdout = child.stdout.take().expect("stdout is piped");
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            return;
                        }
                    }
                    Err(_) => return,
                }
            }
        });

        TailProcess { child, lines: rx }
    }
}

/// Completed command output
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }
}

/// A running tailwatch process. Killed on drop.
pub struct TailProcess {
    child: Child,
    lines: Receiver<String>,
}

impl TailProcess {
    /// Collect `count` stdout lines, or fewer if the timeout expires first
    pub fn read_lines(&self, count: usize, timeout: Duration) -> Vec<String> {
        let deadline = Instant::now() + timeout;
        let mut lines = Vec::new();
        while lines.len() < count {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.lines.recv_timeout(remaining) {
                Ok(line) => lines.push(line),
                Err(_) => break,
            }
        }
        lines
    }

    /// Lines that arrive within `wait`
    pub fn drain(&self, wait: Duration) -> Vec<String> {
        self.read_lines(usize::MAX, wait)
    }

    /// Whether the process is still running
    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }
}

impl Drop for TailProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Macro for convenient command construction
///
/// Usage:
/// ```ignore
/// tailwatch!("-dir", dir).spawn();
/// ```
#[macro_export]
macro_rules! tailwatch {
    ($($arg:expr),*) => {{
        let mut cmd = $crate::common::cli::TailCommand::new();
        cmd.args(&[$($arg),*]);
        cmd
    }};
}
