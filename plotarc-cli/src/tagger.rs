//! External sentiment tagger boundary
//!
//! Some corpora are scored by a third-party tagging process (for example a
//! sentence-level neural sentiment pipeline run as a subprocess). The core
//! never assumes such a tool exists: this module defines the contract and a
//! subprocess implementation, and every way the tool can be missing or
//! misbehave is reported as a `TaggerError`. Nothing is ever substituted.
//!
//! # Protocol
//!
//! 1. One text per line is written to the tool's stdin
//! 2. The tool prints one label per input line on stdout
//! 3. Labels map to values:
//!    very positive -> 1, positive -> 0.5, neutral -> 0,
//!    negative -> -0.5, very negative -> -1

use std::io::{Read, Write};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// Default timeout for one tagging run
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Error)]
pub enum TaggerError {
    #[error("no external tagger configured (set [tagger].command in the user config or PLOTARC_TAGGER_CMD)")]
    NotConfigured,

    #[error("{0} not found. Please install it first.")]
    NotFound(String),

    #[error("failed to run {tool}: {message}")]
    Io { tool: String, message: String },

    #[error("{tool} timed out after {secs}s")]
    Timeout { tool: String, secs: u64 },

    #[error("{tool} exited with code {code:?}: {stderr}")]
    Failed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{tool} produced unrecognized label '{label}' on output line {line}")]
    UnknownLabel {
        tool: String,
        label: String,
        line: usize,
    },

    #[error("{tool} returned {got} labels for {expected} texts")]
    CountMismatch {
        tool: String,
        expected: usize,
        got: usize,
    },
}

/// Anything that can turn texts into one sentiment value each.
pub trait ExternalTagger: Send + Sync {
    fn name(&self) -> &str;

    fn sentiment(&self, texts: &[String]) -> Result<Vec<f64>, TaggerError>;
}

/// Value of a tagger label, or `None` if unrecognized.
pub fn label_value(label: &str) -> Option<f64> {
    let normalized = label.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    match normalized.as_str() {
        "very positive" => Some(1.0),
        "positive" => Some(0.5),
        "neutral" => Some(0.0),
        "negative" => Some(-0.5),
        "very negative" => Some(-1.0),
        _ => None,
    }
}

/// Subprocess tagger speaking the line protocol above.
#[derive(Debug, Clone)]
pub struct CommandTagger {
    command: Vec<String>,
    timeout_secs: u64,
}

impl CommandTagger {
    /// `command[0]` is the program, the rest are arguments.
    /// `timeout_secs == 0` disables the timeout.
    pub fn new(command: Vec<String>, timeout_secs: u64) -> Result<Self, TaggerError> {
        if command.is_empty() || command[0].trim().is_empty() {
            return Err(TaggerError::NotConfigured);
        }
        Ok(Self {
            command,
            timeout_secs,
        })
    }

    pub fn program(&self) -> &str {
        &self.command[0]
    }

    fn parse_labels(&self, stdout: &str, expected: usize) -> Result<Vec<f64>, TaggerError> {
        let mut values = Vec::with_capacity(expected);
        for (i, line) in stdout.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let value = label_value(line).ok_or_else(|| TaggerError::UnknownLabel {
                tool: self.program().to_string(),
                label: line.trim().to_string(),
                line: i + 1,
            })?;
            values.push(value);
        }

        if values.len() != expected {
            return Err(TaggerError::CountMismatch {
                tool: self.program().to_string(),
                expected,
                got: values.len(),
            });
        }
        Ok(values)
    }
}

impl ExternalTagger for CommandTagger {
    fn name(&self) -> &str {
        self.program()
    }

    fn sentiment(&self, texts: &[String]) -> Result<Vec<f64>, TaggerError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        // One text per line: embedded newlines would shift every later label
        let input: String = texts
            .iter()
            .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join("\n")
            + "\n";

        let output = run_tool(&self.command, &input, self.timeout_secs)?;
        if output.code != Some(0) {
            return Err(TaggerError::Failed {
                tool: self.program().to_string(),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            });
        }

        self.parse_labels(&output.stdout, texts.len())
    }
}

/// Captured output of a finished process
#[derive(Debug, Clone)]
struct ToolOutput {
    stdout: String,
    stderr: String,
    code: Option<i32>,
}

/// Run `cmd`, feed `stdin`, and collect output with an optional timeout.
///
/// Pipes are drained on their own threads so a chatty tool cannot block on a
/// full pipe while we wait for it to exit.
fn run_tool(cmd: &[String], stdin: &str, timeout_secs: u64) -> Result<ToolOutput, TaggerError> {
    let tool = cmd[0].clone();
    debug!("Running {} {:?}", tool, &cmd[1..]);

    let mut child = Command::new(&cmd[0])
        .args(&cmd[1..])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TaggerError::NotFound(tool.clone())
            } else {
                TaggerError::Io {
                    tool: tool.clone(),
                    message: e.to_string(),
                }
            }
        })?;

    let writer = child.stdin.take().map(|mut pipe| {
        let input = stdin.to_string();
        thread::spawn(move || {
            // A tool that exits early closes its stdin; that shows up as a
            // non-zero exit or a label count mismatch instead
            let _ = pipe.write_all(input.as_bytes());
        })
    });
    let stdout_reader = child.stdout.take().map(spawn_drain);
    let stderr_reader = child.stderr.take().map(spawn_drain);

    let code = wait_for(&mut child, &tool, timeout_secs)?;

    if let Some(handle) = writer {
        let _ = handle.join();
    }
    let stdout = stdout_reader.map(join_drain).unwrap_or_default();
    let stderr = stderr_reader.map(join_drain).unwrap_or_default();

    Ok(ToolOutput {
        stdout,
        stderr,
        code,
    })
}

fn spawn_drain<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_drain(handle: thread::JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}

/// Poll for completion, killing the process when the timeout passes.
fn wait_for(child: &mut Child, tool: &str, timeout_secs: u64) -> Result<Option<i32>, TaggerError> {
    if timeout_secs == 0 {
        return child
            .wait()
            .map(|status| status.code())
            .map_err(|e| TaggerError::Io {
                tool: tool.to_string(),
                message: e.to_string(),
            });
    }

    let start = Instant::now();
    let timeout = Duration::from_secs(timeout_secs);
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status.code()),
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    warn!("{} timed out after {}s", tool, timeout_secs);
                    return Err(TaggerError::Timeout {
                        tool: tool.to_string(),
                        secs: timeout_secs,
                    });
                }
                thread::sleep(Duration::from_millis(50));
            }
            Err(e) => {
                return Err(TaggerError::Io {
                    tool: tool.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }
}
