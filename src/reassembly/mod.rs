//! Streaming reassembly of length-delimited messages.
//!
//! A transport reader pushes the fragments of one message into a
//! [`ReassemblyBuffer`] as they arrive. Once their combined length equals the
//! target size the buffer concatenates them into an [`AssembledPayload`] for a
//! downstream decoder. Each sub-module covers one concept so the pieces stay
//! small and easy to audit.

pub mod buffer;
pub mod config;
pub mod error;
pub mod fragment;
pub mod payload;
pub mod shared;

pub use buffer::ReassemblyBuffer;
pub use config::{OversizePolicy, ReassemblyConfig};
pub use error::ReassemblyError;
pub use fragment::Fragment;
pub use payload::AssembledPayload;
pub use shared::SharedReassemblyBuffer;
