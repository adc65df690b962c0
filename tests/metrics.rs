#![cfg(all(feature = "metrics", not(loom)))]
//! Tests for `fragment_merge` metrics.
//!
//! These tests verify that counters update as expected using
//! `metrics_util::debugging::DebuggingRecorder`.
use std::collections::HashMap;

use fragment_merge::{OversizePolicy, ReassemblyBuffer, ReassemblyConfig, metrics};
use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};

/// Creates a debugging recorder and snapshotter for metrics testing.
fn debugging_recorder_setup() -> (Snapshotter, DebuggingRecorder) {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    (snapshotter, recorder)
}

/// Takes a single snapshot and collects every counter by name.
///
/// Snapshots drain the recorder, so each test reads its counters from one
/// snapshot only.
fn counter_values(snapshotter: &Snapshotter) -> HashMap<String, u64> {
    snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .filter_map(|(k, _, _, v)| match v {
            DebugValue::Counter(c) => Some((k.key().name().to_owned(), c)),
            _ => None,
        })
        .collect()
}

fn counter(counters: &HashMap<String, u64>, name: &str) -> u64 {
    counters.get(name).copied().unwrap_or(0)
}

#[test]
fn completed_message_records_fragments_and_message() {
    let (snapshotter, recorder) = debugging_recorder_setup();
    ::metrics::with_local_recorder(&recorder, || {
        let mut buffer = ReassemblyBuffer::new(4);
        buffer.add_fragment([0_u8; 2]).expect("fragment fits");
        buffer.push([0_u8; 2]).expect("fragment fits");
    });

    let counters = counter_values(&snapshotter);
    assert_eq!(counter(&counters, metrics::FRAGMENTS_TOTAL), 2);
    assert_eq!(counter(&counters, metrics::MESSAGES_ASSEMBLED), 1);
}

#[test]
fn rejected_fragment_increments_counter() {
    let (snapshotter, recorder) = debugging_recorder_setup();
    ::metrics::with_local_recorder(&recorder, || {
        let mut buffer = ReassemblyBuffer::new(1);
        buffer
            .add_fragment([0_u8; 2])
            .expect_err("oversized fragment must be rejected");
    });

    let counters = counter_values(&snapshotter);
    assert_eq!(counter(&counters, metrics::FRAGMENTS_REJECTED), 1);
    assert_eq!(counter(&counters, metrics::FRAGMENTS_TOTAL), 0);
}

#[test]
fn truncation_counts_dropped_bytes() {
    let (snapshotter, recorder) = debugging_recorder_setup();
    ::metrics::with_local_recorder(&recorder, || {
        let mut buffer = ReassemblyBuffer::with_config(
            ReassemblyConfig::new(3).with_oversize_policy(OversizePolicy::Truncate),
        );
        buffer.push([0_u8; 7]).expect("truncated to fit");
    });

    let counters = counter_values(&snapshotter);
    assert_eq!(counter(&counters, metrics::TRUNCATED_BYTES), 4);
}

#[test]
fn unread_payload_discard_is_counted() {
    let (snapshotter, recorder) = debugging_recorder_setup();
    ::metrics::with_local_recorder(&recorder, || {
        let mut buffer = ReassemblyBuffer::new(1);
        buffer.add_fragment([1_u8]).expect("fragment fits");
        buffer.add_fragment([2_u8]).expect("fragment fits");
    });

    let counters = counter_values(&snapshotter);
    assert_eq!(counter(&counters, metrics::PAYLOADS_DISCARDED), 1);
}

#[test]
fn truncate_refusal_counts_as_rejection() {
    let (snapshotter, recorder) = debugging_recorder_setup();
    ::metrics::with_local_recorder(&recorder, || {
        let mut buffer = ReassemblyBuffer::with_config(
            ReassemblyConfig::new(8).with_oversize_policy(OversizePolicy::Truncate),
        );
        buffer.add_fragment([0_u8; 4]).expect("fragment fits");
        buffer.set_target_size(2);
        buffer
            .add_fragment([0_u8; 1])
            .expect_err("nothing left to keep");
    });

    let counters = counter_values(&snapshotter);
    assert_eq!(counter(&counters, metrics::FRAGMENTS_TOTAL), 1);
    assert_eq!(counter(&counters, metrics::FRAGMENTS_REJECTED), 1);
    assert_eq!(counter(&counters, metrics::TRUNCATED_BYTES), 0);
}
