//! Settings that govern how a reassembly buffer treats its target size.

use serde::{Deserialize, Serialize};

/// Behaviour when a fragment would carry the buffered length past the
/// target size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OversizePolicy {
    /// Refuse the fragment and return
    /// [`ReassemblyError::FragmentOverflow`](super::ReassemblyError::FragmentOverflow).
    /// Fragments buffered earlier are kept.
    #[default]
    Reject,
    /// Keep only the bytes still missing, complete the message and drop the
    /// surplus. If the target was lowered beneath the bytes already buffered
    /// nothing is missing to keep, so the fragment is refused as under
    /// [`Reject`](Self::Reject).
    Truncate,
    /// Buffer the whole fragment. The message can no longer complete until
    /// the target size changes or the buffer is reset.
    Retain,
}

/// Construction parameters for [`ReassemblyBuffer`](super::ReassemblyBuffer).
///
/// The target size is normally taken from a header the transport reader
/// parsed before the body fragments arrive.
///
/// ```
/// use fragment_merge::{OversizePolicy, ReassemblyBuffer, ReassemblyConfig};
///
/// let config = ReassemblyConfig::new(10).with_oversize_policy(OversizePolicy::Truncate);
/// let buffer = ReassemblyBuffer::with_config(config);
/// assert_eq!(buffer.target_size(), 10);
/// assert_eq!(buffer.oversize_policy(), OversizePolicy::Truncate);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassemblyConfig {
    /// Total byte length a message must reach to complete.
    pub target_size: usize,
    /// Handling of fragments that overshoot `target_size`.
    #[serde(default)]
    pub oversize_policy: OversizePolicy,
}

impl ReassemblyConfig {
    /// Configuration with the given target size and the default policy.
    #[must_use]
    pub const fn new(target_size: usize) -> Self {
        Self {
            target_size,
            oversize_policy: OversizePolicy::Reject,
        }
    }

    /// Replace the oversize policy.
    #[must_use]
    pub const fn with_oversize_policy(mut self, policy: OversizePolicy) -> Self {
        self.oversize_policy = policy;
        self
    }
}
