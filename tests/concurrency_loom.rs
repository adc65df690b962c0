#![cfg(loom)]
//! Concurrency tests for the shared reassembly handle using loom.
//!
//! `loom` explores the interleavings of concurrent producers to check that
//! the accumulate, check and drain steps of each push stay atomic.

use fragment_merge::SharedReassemblyBuffer;
use loom::{model, thread};

#[test]
fn concurrent_pushes_complete_exactly_one_message() {
    model(|| {
        let shared = SharedReassemblyBuffer::new(2);
        let first = shared.clone();
        let second = shared.clone();

        let t1 = thread::spawn(move || first.push([1_u8]).expect("fragment fits"));
        let t2 = thread::spawn(move || second.push([2_u8]).expect("fragment fits"));

        let results = [
            t1.join().expect("first producer panicked"),
            t2.join().expect("second producer panicked"),
        ];
        let completed: Vec<_> = results.into_iter().flatten().collect();
        assert_eq!(completed.len(), 1, "exactly one push completes the message");

        let mut bytes = completed[0].payload().to_vec();
        bytes.sort_unstable();
        assert_eq!(bytes, vec![1, 2]);
        assert!(!shared.is_complete().expect("lock healthy"));
    });
}

#[test]
fn payload_is_taken_by_one_reader_only() {
    model(|| {
        let shared = SharedReassemblyBuffer::new(1);
        assert!(shared.add_fragment([7_u8]).expect("fragment fits"));

        let readers: Vec<_> = (0..2)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || shared.take_payload().is_ok())
            })
            .collect();

        let taken = readers
            .into_iter()
            .map(|reader| reader.join().expect("reader panicked"))
            .filter(|taken| *taken)
            .count();
        assert_eq!(taken, 1);
    });
}
