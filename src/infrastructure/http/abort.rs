//! Abort handles for in-flight requests
//!
//! A controller owns an optional timer task; the signal it hands out is cheap to clone
//! and can be awaited. The reason an abort happened is recorded exactly once so a
//! timeout can be told apart from a user cancel.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Why a signal fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// Explicit `cancel()` by the caller
    Cancelled,
    /// The controller's timer elapsed
    TimedOut,
}

#[derive(Debug)]
struct AbortState {
    token: CancellationToken,
    reason: OnceLock<AbortReason>,
    parent: Option<AbortSignal>,
}

/// Observer side of an [`AbortController`]
#[derive(Debug, Clone)]
pub struct AbortSignal {
    state: Arc<AbortState>,
}

impl AbortSignal {
    fn root() -> Self {
        Self {
            state: Arc::new(AbortState {
                token: CancellationToken::new(),
                reason: OnceLock::new(),
                parent: None,
            }),
        }
    }

    fn child(parent: &AbortSignal) -> Self {
        Self {
            state: Arc::new(AbortState {
                token: parent.state.token.child_token(),
                reason: OnceLock::new(),
                parent: Some(parent.clone()),
            }),
        }
    }

    /// A signal nobody can fire
    pub fn never() -> Self {
        Self::root()
    }

    pub fn is_aborted(&self) -> bool {
        self.reason().is_some()
    }

    /// The recorded reason, inherited from the parent when the parent fired first
    pub fn reason(&self) -> Option<AbortReason> {
        self.state
            .reason
            .get()
            .copied()
            .or_else(|| self.state.parent.as_ref().and_then(AbortSignal::reason))
    }

    /// Resolves once the signal fires
    pub async fn aborted(&self) -> AbortReason {
        self.state.token.cancelled().await;
        self.reason().unwrap_or(AbortReason::Cancelled)
    }

    fn abort(&self, reason: AbortReason) -> bool {
        if self.is_aborted() {
            return false;
        }
        if self.state.reason.set(reason).is_err() {
            return false;
        }
        self.state.token.cancel();
        true
    }
}

/// Owner side: fires the signal on `cancel()` or when its timer elapses
#[derive(Debug)]
pub struct AbortController {
    signal: AbortSignal,
    timer: Option<JoinHandle<()>>,
}

impl AbortController {
    /// Create a controller, optionally aborting with [`AbortReason::TimedOut`] after `timeout`
    ///
    /// Arming a timer spawns a tokio task, so a timeout requires a running runtime.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self::with_signal(AbortSignal::root(), timeout)
    }

    /// Create a controller that also fires, with the parent's reason, when `parent` fires
    pub fn child_of(parent: &AbortSignal, timeout: Option<Duration>) -> Self {
        Self::with_signal(AbortSignal::child(parent), timeout)
    }

    fn with_signal(signal: AbortSignal, timeout: Option<Duration>) -> Self {
        let timer = timeout.map(|timeout| {
            let target = signal.clone();
            tokio::spawn(async move {
                tokio::select! {
                    _ = tokio::time::sleep(timeout) => {
                        target.abort(AbortReason::TimedOut);
                    }
                    _ = target.state.token.cancelled() => {}
                }
            })
        });

        Self { signal, timer }
    }

    pub fn signal(&self) -> AbortSignal {
        self.signal.clone()
    }

    /// Abort with [`AbortReason::Cancelled`]; returns `false` if already aborted
    pub fn cancel(&self) -> bool {
        self.signal.abort(AbortReason::Cancelled)
    }

    pub fn is_aborted(&self) -> bool {
        self.signal.is_aborted()
    }

    /// Disarm the timer once the guarded operation has finished
    pub fn settle(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for AbortController {
    fn drop(&mut self) {
        self.settle();
    }
}

/// Create an abort controller with an optional timeout
pub fn create_abort_controller(timeout: Option<Duration>) -> AbortController {
    AbortController::new(timeout)
}
