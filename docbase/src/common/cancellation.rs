use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cooperative cancellation signal for long-running reads.
///
/// Read paths that stream many documents check the token between items and
/// stop with `OperationCancelled` once it is set. Cancellation never rolls
/// anything back; it only stops further work.
///
/// Tokens are cheaply cloneable; all clones observe the same signal.
///
/// # Examples
///
/// ```rust,ignore
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// // elsewhere: handle.cancel();
/// if token.is_cancelled() { /* stop */ }
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        CancellationToken {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Signals cancellation to every clone of this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
