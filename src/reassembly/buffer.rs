//! Length-driven reassembly of one message at a time.
//!
//! [`ReassemblyBuffer`] collects fragments in arrival order and folds them
//! into a single [`AssembledPayload`] once their combined length matches the
//! target size exactly. The target normally comes from a header the
//! transport reader parsed earlier; nothing inside the fragments is
//! inspected. The buffer is reused across messages: reading the payload out
//! readies it for the next one without reconstruction.

use bytes::BytesMut;
use log::{debug, warn};

use super::{AssembledPayload, Fragment, OversizePolicy, ReassemblyConfig, ReassemblyError};
use crate::metrics;

/// Accumulates fragments until their total length reaches the target size.
///
/// The buffer performs no synchronisation. Wrap it in
/// [`SharedReassemblyBuffer`](super::SharedReassemblyBuffer) when producers
/// and consumers live on different threads.
///
/// # Examples
///
/// ```
/// use fragment_merge::ReassemblyBuffer;
///
/// let mut buffer = ReassemblyBuffer::new(10);
/// assert!(!buffer.add_fragment(vec![0_u8; 4]).expect("fragment fits"));
/// assert_eq!(buffer.current_size(), 4);
/// assert!(buffer.add_fragment(vec![1_u8; 6]).expect("fragment fits"));
///
/// let payload = buffer.take_payload().expect("message complete");
/// assert_eq!(payload.len(), 10);
/// assert!(!buffer.is_complete());
/// ```
#[derive(Debug)]
pub struct ReassemblyBuffer {
    target_size: usize,
    oversize_policy: OversizePolicy,
    pending: Vec<Fragment>,
    assembled: Option<AssembledPayload>,
}

impl ReassemblyBuffer {
    /// Create an empty buffer expecting `target_size` bytes, rejecting
    /// oversized fragments.
    #[must_use]
    pub fn new(target_size: usize) -> Self { Self::with_config(ReassemblyConfig::new(target_size)) }

    /// Create an empty buffer from `config`.
    #[must_use]
    pub fn with_config(config: ReassemblyConfig) -> Self {
        Self {
            target_size: config.target_size,
            oversize_policy: config.oversize_policy,
            pending: Vec::new(),
            assembled: None,
        }
    }

    /// Expected total length of the message in progress.
    #[must_use]
    pub const fn target_size(&self) -> usize { self.target_size }

    /// Change the expected total length.
    ///
    /// Buffered fragments are not re-validated and no completion check runs
    /// here; the new target applies from the next [`add_fragment`] call.
    ///
    /// [`add_fragment`]: Self::add_fragment
    pub fn set_target_size(&mut self, target_size: usize) { self.target_size = target_size; }

    /// Policy applied to fragments that overshoot the target.
    #[must_use]
    pub const fn oversize_policy(&self) -> OversizePolicy { self.oversize_policy }

    /// Replace the policy applied to fragments that overshoot the target.
    pub fn set_oversize_policy(&mut self, policy: OversizePolicy) { self.oversize_policy = policy; }

    /// Whether no fragments are currently buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.pending.is_empty() }

    /// Whether a completed payload is waiting to be read.
    #[must_use]
    pub const fn is_complete(&self) -> bool { self.assembled.is_some() }

    /// Number of fragments buffered for the message in progress.
    #[must_use]
    pub fn fragment_count(&self) -> usize { self.pending.len() }

    /// Combined length of the buffered fragments.
    ///
    /// Recomputed on every call by walking the buffered fragments.
    #[must_use]
    pub fn current_size(&self) -> usize { self.pending.iter().map(Fragment::len).sum() }

    /// Bytes still missing before the message completes.
    #[must_use]
    pub fn remaining(&self) -> usize { self.target_size.saturating_sub(self.current_size()) }

    /// Append a fragment and report whether it completed the message.
    ///
    /// An unread payload left over from the previous message is dropped
    /// once the fragment has been accepted. When the buffered length
    /// matches the target exactly, the fragments are concatenated in arrival
    /// order and the buffer is drained; read the result with
    /// [`take_payload`](Self::take_payload).
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::FragmentOverflow`] when the fragment would
    /// overshoot the target under [`OversizePolicy::Reject`], or under
    /// [`OversizePolicy::Truncate`] once the buffered bytes already exceed a
    /// lowered target. The buffer is left unchanged in that case.
    pub fn add_fragment(&mut self, fragment: impl Into<Fragment>) -> Result<bool, ReassemblyError> {
        let fragment = fragment.into();
        let current = self.current_size();
        let fragment = self.fit_to_target(fragment, current)?;

        if let Some(unread) = self.assembled.take() {
            warn!(
                "discarding unread reassembled payload: len={}",
                unread.len()
            );
            metrics::inc_discarded();
        }

        let accumulated = current.saturating_add(fragment.len());
        self.pending.push(fragment);
        metrics::inc_fragments();

        if accumulated == self.target_size {
            self.assembled = Some(self.drain());
            metrics::inc_messages();
            debug!("message reassembled: len={accumulated}");
        }
        Ok(self.is_complete())
    }

    /// Read out the completed payload, clearing the complete flag.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::NoCompletedMessage`] when no message has
    /// completed since the last read.
    pub fn take_payload(&mut self) -> Result<AssembledPayload, ReassemblyError> {
        self.assembled
            .take()
            .ok_or(ReassemblyError::NoCompletedMessage)
    }

    /// Append a fragment and read out the payload if it completed the
    /// message.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`add_fragment`](Self::add_fragment).
    pub fn push(
        &mut self,
        fragment: impl Into<Fragment>,
    ) -> Result<Option<AssembledPayload>, ReassemblyError> {
        if self.add_fragment(fragment)? {
            self.take_payload().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Abandon the message in progress along with any unread payload.
    pub fn reset(&mut self) {
        if !self.pending.is_empty() {
            debug!(
                "abandoning partial message: fragments={}, len={}",
                self.pending.len(),
                self.current_size()
            );
        }
        self.pending.clear();
        self.assembled = None;
    }

    fn fit_to_target(
        &self,
        fragment: Fragment,
        current: usize,
    ) -> Result<Fragment, ReassemblyError> {
        let attempted = current.saturating_add(fragment.len());
        if attempted <= self.target_size {
            return Ok(fragment);
        }

        match self.oversize_policy {
            OversizePolicy::Reject => Err(self.overflow(attempted)),
            OversizePolicy::Truncate if current > self.target_size => {
                Err(self.overflow(attempted))
            }
            OversizePolicy::Truncate => {
                let missing = self.target_size.saturating_sub(current);
                let (head, surplus) = fragment.split_at(missing);
                debug!(
                    "truncating oversized fragment: kept={}, dropped={}",
                    head.len(),
                    surplus.len()
                );
                metrics::add_truncated_bytes(surplus.len());
                Ok(head)
            }
            OversizePolicy::Retain => {
                debug!(
                    "buffering fragment past target size: attempted={attempted}, target_size={}",
                    self.target_size
                );
                Ok(fragment)
            }
        }
    }

    fn overflow(&self, attempted: usize) -> ReassemblyError {
        warn!(
            "rejecting oversized fragment: attempted={attempted}, target_size={}",
            self.target_size
        );
        metrics::inc_rejected();
        ReassemblyError::FragmentOverflow {
            attempted,
            target_size: self.target_size,
        }
    }

    fn drain(&mut self) -> AssembledPayload {
        if self.pending.len() == 1
            && let Some(only) = self.pending.pop()
        {
            return AssembledPayload::new(only.into_bytes());
        }

        let mut bytes = BytesMut::with_capacity(self.target_size);
        for fragment in self.pending.drain(..) {
            bytes.extend_from_slice(fragment.as_slice());
        }
        AssembledPayload::new(bytes.freeze())
    }
}

impl Default for ReassemblyBuffer {
    fn default() -> Self { Self::with_config(ReassemblyConfig::default()) }
}
