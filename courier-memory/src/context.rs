//! Per-manager serialized execution contexts.
//!
//! Each registered manager runs inside its own tokio task which owns the
//! manager value outright. A command channel serializes every operation
//! against that manager (two operations on one manager never interleave)
//! while different managers run fully in parallel. Once a command is
//! queued it runs to completion; there is no mid-flight cancellation.

use crate::ManagedDomain;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

const COMMAND_QUEUE_DEPTH: usize = 32;

enum DomainCommand {
    Report {
        full: bool,
        reply: oneshot::Sender<Value>,
    },
    Release {
        full: bool,
        reply: oneshot::Sender<()>,
    },
    Shutdown,
}

/// Handle to one manager's serialized execution context.
///
/// Cloning the handle shares the same underlying context; requests from
/// all clones are serialized through the same queue.
#[derive(Debug, Clone)]
pub struct DomainHandle {
    name: String,
    commands: mpsc::Sender<DomainCommand>,
}

impl DomainHandle {
    /// Spawns a serialized execution context owning `domain`.
    #[must_use]
    pub fn spawn(domain: impl ManagedDomain + 'static) -> Self {
        let name = domain.name().to_string();
        let (commands, rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        tokio::spawn(run_context(domain, rx));
        debug!(domain = %name, "domain context started");
        Self { name, commands }
    }

    /// The manager's registered name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Asks the manager for its memory statistics.
    ///
    /// The diagnostic path always succeeds: a context that is already
    /// torn down contributes an empty section rather than an error.
    pub async fn report(&self, full: bool) -> Value {
        let (reply, rx) = oneshot::channel();
        let sent = self
            .commands
            .send(DomainCommand::Report { full, reply })
            .await;
        if sent.is_err() {
            warn!(domain = %self.name, "report request to stopped context");
            return Value::Object(serde_json::Map::new());
        }
        rx.await.unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
    }

    /// Asks the manager to drop re-derivable cached state.
    ///
    /// Resolves once the manager's cleanup has run. Cleanup in a stopped
    /// context is a no-op; the call still resolves.
    pub async fn release(&self, full: bool) {
        let (reply, rx) = oneshot::channel();
        let sent = self
            .commands
            .send(DomainCommand::Release { full, reply })
            .await;
        if sent.is_err() {
            warn!(domain = %self.name, "release request to stopped context");
            return;
        }
        let _ = rx.await;
    }

    /// Requests context teardown. Queued commands still run first.
    pub async fn shutdown(&self) {
        let _ = self.commands.send(DomainCommand::Shutdown).await;
    }
}

async fn run_context(mut domain: impl ManagedDomain, mut rx: mpsc::Receiver<DomainCommand>) {
    while let Some(command) = rx.recv().await {
        match command {
            DomainCommand::Report { full, reply } => {
                let _ = reply.send(domain.report_memory(full));
            }
            DomainCommand::Release { full, reply } => {
                domain.release_memory(full);
                let _ = reply.send(());
            }
            DomainCommand::Shutdown => break,
        }
    }
    debug!(domain = %domain.name(), "domain context stopped");
}
