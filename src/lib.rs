#![doc(html_root_url = "https://docs.rs/fragment_merge/latest")]
//! Public API for the `fragment_merge` library.
//!
//! This crate reassembles messages that a byte-oriented transport delivers
//! in several fragments. The caller supplies the expected total length and
//! pushes fragments in arrival order; the buffer hands back the concatenated
//! payload once that length is reached exactly.

pub mod metrics;
pub mod reassembly;

pub use reassembly::{
    AssembledPayload,
    Fragment,
    OversizePolicy,
    ReassemblyBuffer,
    ReassemblyConfig,
    ReassemblyError,
    SharedReassemblyBuffer,
};
