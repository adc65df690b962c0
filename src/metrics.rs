//! Metric helpers for `fragment_merge`.
//!
//! This module defines metric names and thin helpers wrapping the
//! [`metrics`](https://docs.rs/metrics) crate. With the `metrics` feature
//! disabled the helpers compile to nothing.

#[cfg(feature = "metrics")]
use metrics::counter;

/// Name of the counter tracking fragments accepted into a buffer.
pub const FRAGMENTS_TOTAL: &str = "fragment_merge_fragments_total";
/// Name of the counter tracking completed messages.
pub const MESSAGES_ASSEMBLED: &str = "fragment_merge_messages_assembled_total";
/// Name of the counter tracking fragments refused for overshooting the target.
pub const FRAGMENTS_REJECTED: &str = "fragment_merge_fragments_rejected_total";
/// Name of the counter tracking surplus bytes dropped by truncation.
pub const TRUNCATED_BYTES: &str = "fragment_merge_truncated_bytes_total";
/// Name of the counter tracking completed payloads dropped before being read.
pub const PAYLOADS_DISCARDED: &str = "fragment_merge_payloads_discarded_total";

/// Record an accepted fragment.
pub fn inc_fragments() {
    #[cfg(feature = "metrics")]
    counter!(FRAGMENTS_TOTAL).increment(1);
}

/// Record a completed message.
pub fn inc_messages() {
    #[cfg(feature = "metrics")]
    counter!(MESSAGES_ASSEMBLED).increment(1);
}

/// Record a rejected fragment.
pub fn inc_rejected() {
    #[cfg(feature = "metrics")]
    counter!(FRAGMENTS_REJECTED).increment(1);
}

/// Record `bytes` of surplus dropped by truncation.
#[cfg_attr(not(feature = "metrics"), allow(unused_variables))]
pub fn add_truncated_bytes(bytes: usize) {
    #[cfg(feature = "metrics")]
    counter!(TRUNCATED_BYTES).increment(u64::try_from(bytes).unwrap_or(u64::MAX));
}

/// Record a completed payload that was dropped unread.
pub fn inc_discarded() {
    #[cfg(feature = "metrics")]
    counter!(PAYLOADS_DISCARDED).increment(1);
}
