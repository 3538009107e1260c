//! Scripted compiler double
//!
//! Implements [`Compiler`] without spawning anything. Tests pick a
//! behavior; every request is recorded so assertions can inspect what the
//! pipeline actually asked the backend to do.

use std::fs;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use typc_compiler::{CompileRequest, Compiler, Error, Result};

/// What the fake backend does with each request.
#[derive(Debug, Clone)]
pub enum FakeBehavior {
    /// Return these bytes unchanged.
    Emit(Vec<u8>),
    /// Return the entry document's own bytes, so tests can observe the
    /// exact source text handed to the backend.
    EchoEntry,
    /// Fail with the given status and diagnostics.
    Fail { status: i32, stderr: String },
    /// Report a timeout, as the real backend does when its budget expires.
    Timeout { budget: Duration },
}

/// A [`Compiler`] driven by a [`FakeBehavior`] script.
#[derive(Debug)]
pub struct FakeCompiler {
    behavior: FakeBehavior,
    calls: Mutex<Vec<CompileRequest>>,
}

impl FakeCompiler {
    pub fn emitting(bytes: impl Into<Vec<u8>>) -> Self {
        Self::with_behavior(FakeBehavior::Emit(bytes.into()))
    }

    pub fn echoing_entry() -> Self {
        Self::with_behavior(FakeBehavior::EchoEntry)
    }

    pub fn failing(status: i32, stderr: impl Into<String>) -> Self {
        Self::with_behavior(FakeBehavior::Fail {
            status,
            stderr: stderr.into(),
        })
    }

    pub fn timing_out(budget: Duration) -> Self {
        Self::with_behavior(FakeBehavior::Timeout { budget })
    }

    pub fn with_behavior(behavior: FakeBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Requests seen so far, in order.
    pub fn calls(&self) -> Vec<CompileRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Compiler for FakeCompiler {
    async fn compile(&self, request: &CompileRequest) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push(request.clone());
        match &self.behavior {
            FakeBehavior::Emit(bytes) => Ok(bytes.clone()),
            FakeBehavior::EchoEntry => {
                fs::read(&request.entry).map_err(|e| Error::CompileFailed {
                    status: 1,
                    stderr: format!("cannot read entry {}: {e}", request.entry.display()),
                })
            }
            FakeBehavior::Fail { status, stderr } => Err(Error::CompileFailed {
                status: *status,
                stderr: stderr.clone(),
            }),
            FakeBehavior::Timeout { budget } => Err(Error::Timeout { budget: *budget }),
        }
    }
}
