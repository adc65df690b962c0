//! Thread-safe handle around a [`ReassemblyBuffer`].
//!
//! The accumulate, check and drain steps of a reassembly cycle are three
//! separate calls on the bare buffer. [`SharedReassemblyBuffer`] holds the
//! buffer behind one mutex so each of its operations, in particular
//! [`push`](SharedReassemblyBuffer::push), runs the whole sequence inside a
//! single critical section.

use std::fmt;
#[cfg(not(loom))]
use std::sync::{Arc, Mutex, MutexGuard};

#[cfg(loom)]
use loom::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

use super::{AssembledPayload, Fragment, ReassemblyBuffer, ReassemblyConfig, ReassemblyError};

/// Cloneable handle sharing one [`ReassemblyBuffer`] between threads.
#[derive(Clone)]
pub struct SharedReassemblyBuffer {
    inner: Arc<Mutex<ReassemblyBuffer>>,
}

impl SharedReassemblyBuffer {
    /// Share a buffer expecting `target_size` bytes.
    #[must_use]
    pub fn new(target_size: usize) -> Self { Self::from(ReassemblyBuffer::new(target_size)) }

    /// Share a buffer built from `config`.
    #[must_use]
    pub fn with_config(config: ReassemblyConfig) -> Self {
        Self::from(ReassemblyBuffer::with_config(config))
    }

    /// Append a fragment and, if it completed the message, read the payload
    /// out before releasing the lock.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::Poisoned`] if another holder panicked, or
    /// any error raised by [`ReassemblyBuffer::add_fragment`].
    pub fn push(
        &self,
        fragment: impl Into<Fragment>,
    ) -> Result<Option<AssembledPayload>, ReassemblyError> {
        self.lock()?.push(fragment)
    }

    /// Read out a payload completed by an earlier
    /// [`add_fragment`](Self::add_fragment).
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::NoCompletedMessage`] when nothing is
    /// waiting, or [`ReassemblyError::Poisoned`].
    pub fn take_payload(&self) -> Result<AssembledPayload, ReassemblyError> {
        self.lock()?.take_payload()
    }

    /// Append a fragment without reading the payload out.
    ///
    /// # Errors
    ///
    /// See [`ReassemblyBuffer::add_fragment`]; additionally
    /// [`ReassemblyError::Poisoned`].
    pub fn add_fragment(&self, fragment: impl Into<Fragment>) -> Result<bool, ReassemblyError> {
        self.lock()?.add_fragment(fragment)
    }

    /// Change the target size of the shared buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::Poisoned`] if another holder panicked.
    pub fn set_target_size(&self, target_size: usize) -> Result<(), ReassemblyError> {
        self.lock()?.set_target_size(target_size);
        Ok(())
    }

    /// Current target size.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::Poisoned`] if another holder panicked.
    pub fn target_size(&self) -> Result<usize, ReassemblyError> { Ok(self.lock()?.target_size()) }

    /// Combined length of the buffered fragments.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::Poisoned`] if another holder panicked.
    pub fn current_size(&self) -> Result<usize, ReassemblyError> {
        Ok(self.lock()?.current_size())
    }

    /// Whether a completed payload is waiting to be read.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::Poisoned`] if another holder panicked.
    pub fn is_complete(&self) -> Result<bool, ReassemblyError> { Ok(self.lock()?.is_complete()) }

    /// Abandon the message in progress.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::Poisoned`] if another holder panicked.
    pub fn reset(&self) -> Result<(), ReassemblyError> {
        self.lock()?.reset();
        Ok(())
    }

    /// Run `f` with exclusive access to the underlying buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::Poisoned`] if another holder panicked.
    pub fn with_buffer<R>(
        &self,
        f: impl FnOnce(&mut ReassemblyBuffer) -> R,
    ) -> Result<R, ReassemblyError> {
        let mut guard = self.lock()?;
        Ok(f(&mut *guard))
    }

    fn lock(&self) -> Result<MutexGuard<'_, ReassemblyBuffer>, ReassemblyError> {
        self.inner.lock().map_err(|_| {
            warn!("reassembly buffer lock poisoned");
            ReassemblyError::Poisoned
        })
    }
}

impl From<ReassemblyBuffer> for SharedReassemblyBuffer {
    fn from(buffer: ReassemblyBuffer) -> Self {
        Self {
            inner: Arc::new(Mutex::new(buffer)),
        }
    }
}

impl fmt::Debug for SharedReassemblyBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedReassemblyBuffer")
            .finish_non_exhaustive()
    }
}
