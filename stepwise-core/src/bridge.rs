//! A [`Solver`] that runs an external program.
//!
//! The program is invoked as `<program> <script> <mode> <text>`, where `mode` is `equation` or
//! `expression`. On success, it prints a single JSON document to stdout:
//!
//! ```json
//! { "steps": [ { "changeType": "…", "oldState": "…", "newState": "…", "substeps": [] } ] }
//! ```
//!
//! It reports failure by exiting with a non-zero status (with the error message on stderr), or by
//! printing `{ "error": "…" }`.

use crate::{
    kind::InputKind,
    solver::{RawStep, Solver, SolverError},
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    io::Read,
    path::PathBuf,
    process::{Child, Command, Stdio},
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

/// How often the child process is polled for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Configuration of the external solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// The program to run.
    pub program: String,

    /// The script passed to the program as its first argument.
    pub script: PathBuf,

    /// How long to wait for the program before killing it, in seconds.
    pub timeout_secs: u64,

    /// Whether to retry a failed request once with whitespace removed.
    pub retry: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            program: "node".to_string(),
            script: PathBuf::from("scripts/mathsteps_bridge.js"),
            timeout_secs: 10,
            retry: true,
        }
    }
}

impl SolverConfig {
    /// The timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// The document printed by the solver program.
#[derive(Debug, Deserialize)]
struct BridgeOutput {
    #[serde(default)]
    steps: Vec<RawStep>,

    #[serde(default)]
    error: Option<String>,
}

/// The result of running the solver program to completion.
struct Finished {
    success: bool,
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

/// Reads the given pipe to the end on a separate thread, sending the contents when done.
fn drain(mut pipe: impl Read + Send + 'static) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });
    rx
}

/// Runs the external solver program for each request.
#[derive(Debug, Clone, Default)]
pub struct SubprocessSolver {
    config: SolverConfig,
}

/// Kills the child process and reaps it.
fn terminate(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

impl SubprocessSolver {
    /// Creates a solver that runs the program described by the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The configuration of this solver.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Runs the program and waits for it to finish, killing it if it exceeds the timeout.
    fn execute(&self, mode: &str, text: &str) -> Result<Finished, SolverError> {
        debug!("running {} {} {} {:?}", self.config.program, self.config.script.display(), mode, text);

        let mut child = Command::new(&self.config.program)
            .arg(&self.config.script)
            .arg(mode)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| SolverError::Spawn {
                program: self.config.program.clone(),
                reason: err.to_string(),
            })?;

        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let timeout = self.config.timeout();
        let start = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if start.elapsed() >= timeout => {
                    terminate(&mut child);
                    return Err(SolverError::Timeout(timeout));
                },
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(err) => {
                    terminate(&mut child);
                    return Err(SolverError::Wait(err.to_string()));
                },
            }
        };

        let collect = |rx: Option<mpsc::Receiver<String>>| {
            rx.and_then(|rx| rx.recv().ok()).unwrap_or_default()
        };
        Ok(Finished {
            success: status.success(),
            code: status.code(),
            stdout: collect(stdout),
            stderr: collect(stderr),
        })
    }

    /// Runs the program in the given mode and interprets its output.
    fn request(&self, kind: InputKind, text: &str) -> Result<Vec<RawStep>, SolverError> {
        let finished = self.execute(kind.mode(), text)?;

        if !finished.success {
            let stderr = finished.stderr.trim();
            return Err(SolverError::Rejected(if stderr.is_empty() {
                match finished.code {
                    Some(code) => format!("unknown error from solver (exit status {})", code),
                    None => "solver was terminated by a signal".to_string(),
                }
            } else {
                stderr.to_string()
            }));
        }

        let output: BridgeOutput = serde_json::from_str(finished.stdout.trim())
            .map_err(|err| SolverError::Malformed(err.to_string()))?;
        match output.error {
            Some(error) => Err(SolverError::Rejected(error)),
            None => Ok(output.steps),
        }
    }
}

impl Solver for SubprocessSolver {
    fn solve_equation(&self, text: &str) -> Result<Vec<RawStep>, SolverError> {
        self.request(InputKind::Equation, text)
    }

    fn simplify_expression(&self, text: &str) -> Result<Vec<RawStep>, SolverError> {
        self.request(InputKind::Expression, text)
    }
}
