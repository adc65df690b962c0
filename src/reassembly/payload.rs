//! Container for a fully reassembled message.

use bytes::Bytes;

/// Concatenation of every fragment of one message, in arrival order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssembledPayload {
    bytes: Bytes,
}

impl AssembledPayload {
    pub(crate) fn new(bytes: Bytes) -> Self { Self { bytes } }

    /// Length of the payload in bytes.
    #[must_use]
    pub fn len(&self) -> usize { self.bytes.len() }

    /// Whether the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }

    /// Borrow the reassembled bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] { &self.bytes }

    /// Consume the payload, returning the owned bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes { self.bytes }
}

impl AsRef<[u8]> for AssembledPayload {
    fn as_ref(&self) -> &[u8] { self.payload() }
}
