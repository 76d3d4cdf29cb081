use crate::consts::{BYTES_PER_FIELD_ELEMENT, BYTES_PER_G1_POINT};
use crate::enums::KzgError;
use crate::hex_to_bytes;

use alloc::format;

macro_rules! define_bytes_type {
    ($name:ident, $size:expr) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name([u8; $size]);

        impl $name {
            pub const fn new(bytes: [u8; $size]) -> Self {
                $name(bytes)
            }

            pub fn from_slice(slice: &[u8]) -> Result<Self, KzgError> {
                if slice.len() != $size {
                    return Err(KzgError::InvalidBytesLength(format!(
                        "expected {} bytes, got {}",
                        $size,
                        slice.len()
                    )));
                }
                let mut bytes = [0u8; $size];
                bytes.copy_from_slice(slice);
                Ok($name(bytes))
            }

            pub fn from_hex(hex_str: &str) -> Result<Self, KzgError> {
                Self::from_slice(&hex_to_bytes(hex_str)?)
            }

            pub const fn as_bytes(&self) -> &[u8; $size] {
                &self.0
            }
        }

        impl From<[u8; $size]> for $name {
            fn from(bytes: [u8; $size]) -> Self {
                $name(bytes)
            }
        }

        impl From<$name> for [u8; $size] {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

define_bytes_type!(Bytes32, 32);
define_bytes_type!(Bytes48, 48);

/// A compressed G1 commitment to a polynomial.
pub type KzgCommitment = Bytes48;

/// A compressed G1 opening proof.
pub type KzgProofBytes = Bytes48;

/// Read-only view over the raw bytes of a blob: `len()` field elements of 32 bytes each.
pub trait Blob {
    fn len(&self) -> usize;

    fn at(&self, index: usize) -> [u8; BYTES_PER_FIELD_ELEMENT];

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-only view over a sequence of compressed commitments.
pub trait CommitmentSequence {
    fn len(&self) -> usize;

    fn at(&self, index: usize) -> [u8; BYTES_PER_G1_POINT];

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Blob for [[u8; BYTES_PER_FIELD_ELEMENT]] {
    fn len(&self) -> usize {
        <[_]>::len(self)
    }

    fn at(&self, index: usize) -> [u8; BYTES_PER_FIELD_ELEMENT] {
        self[index]
    }
}

impl Blob for [Bytes32] {
    fn len(&self) -> usize {
        <[_]>::len(self)
    }

    fn at(&self, index: usize) -> [u8; BYTES_PER_FIELD_ELEMENT] {
        self[index].0
    }
}

impl CommitmentSequence for [[u8; BYTES_PER_G1_POINT]] {
    fn len(&self) -> usize {
        <[_]>::len(self)
    }

    fn at(&self, index: usize) -> [u8; BYTES_PER_G1_POINT] {
        self[index]
    }
}

impl CommitmentSequence for [Bytes48] {
    fn len(&self) -> usize {
        <[_]>::len(self)
    }

    fn at(&self, index: usize) -> [u8; BYTES_PER_G1_POINT] {
        self[index].0
    }
}
