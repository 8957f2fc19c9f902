//! Cooperative cancellation for generation passes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shared flag the host raises to stop a running pass.
///
/// The generator only looks at it between settings documents; a pass that
/// has moved past merging always runs to completion.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
