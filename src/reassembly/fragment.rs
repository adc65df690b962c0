//! Immutable byte fragments handed to the reassembly buffer.

use bytes::Bytes;

/// One arrived chunk of a larger message.
///
/// The bytes are reference counted, so cloning a fragment or handing it to
/// [`ReassemblyBuffer`](super::ReassemblyBuffer) shares the allocation instead
/// of copying it. A fragment is never mutated once constructed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fragment {
    bytes: Bytes,
}

impl Fragment {
    /// Wrap `bytes` as a fragment.
    #[must_use]
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Copy `bytes` into a new fragment.
    #[must_use]
    pub fn copy_from_slice(bytes: &[u8]) -> Self { Self::new(Bytes::copy_from_slice(bytes)) }

    /// Length of the fragment in bytes.
    #[must_use]
    pub fn len(&self) -> usize { self.bytes.len() }

    /// Whether the fragment carries no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }

    /// Borrow the raw fragment content.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] { &self.bytes }

    /// Consume the fragment, returning the shared bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes { self.bytes }

    /// Split off the first `len` bytes, returning `(head, surplus)`.
    ///
    /// Both halves share the original allocation.
    pub(crate) fn split_at(mut self, len: usize) -> (Self, Self) {
        let surplus = self.bytes.split_off(len.min(self.bytes.len()));
        (self, Self { bytes: surplus })
    }
}

impl AsRef<[u8]> for Fragment {
    fn as_ref(&self) -> &[u8] { self.as_slice() }
}

impl From<Bytes> for Fragment {
    fn from(bytes: Bytes) -> Self { Self::new(bytes) }
}

impl From<Vec<u8>> for Fragment {
    fn from(bytes: Vec<u8>) -> Self { Self::new(bytes) }
}

impl From<&'static [u8]> for Fragment {
    fn from(bytes: &'static [u8]) -> Self { Self::new(Bytes::from_static(bytes)) }
}

impl<const N: usize> From<[u8; N]> for Fragment {
    fn from(bytes: [u8; N]) -> Self { Self::new(bytes.to_vec()) }
}
