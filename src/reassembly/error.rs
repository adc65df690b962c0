//! Error type emitted by the reassembly buffer.

use thiserror::Error;

/// Errors produced while accumulating or reading out a message.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReassemblyError {
    /// Accepting the fragment would push the buffered length past the
    /// target size.
    #[error("fragment overflows target size: attempted {attempted} bytes, target {target_size}")]
    FragmentOverflow {
        /// Buffered length the fragment would have produced.
        attempted: usize,
        /// Target size in force when the fragment arrived.
        target_size: usize,
    },
    /// The payload was requested before a message completed.
    #[error("no completed message available")]
    NoCompletedMessage,
    /// A thread panicked while holding the shared buffer lock.
    #[error("reassembly buffer lock poisoned")]
    Poisoned,
}
