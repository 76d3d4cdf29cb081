/// The number of bytes needed to represent a field element.
pub const BYTES_PER_FIELD_ELEMENT: usize = 32;

/// The number of field elements in a mainnet blob.
pub const FIELD_ELEMENTS_PER_BLOB: usize = 4096;

/// The number of bytes in a mainnet blob.
pub const BYTES_PER_BLOB: usize = FIELD_ELEMENTS_PER_BLOB * BYTES_PER_FIELD_ELEMENT;

/// Compressed G1 point size. Commitments and proofs are both G1 points.
pub const BYTES_PER_G1_POINT: usize = 48;

/// Compressed G2 point size.
pub const BYTES_PER_G2_POINT: usize = 96;

pub const BYTES_PER_COMMITMENT: usize = BYTES_PER_G1_POINT;
pub const BYTES_PER_PROOF: usize = BYTES_PER_G1_POINT;

/// Domain separator that opens every Fiat-Shamir transcript.
pub const FIAT_SHAMIR_PROTOCOL_DOMAIN: &[u8; 16] = b"FSBLOBVERIFY_V1_";

/// Largest supported domain is bounded by the 2-adicity of the scalar field.
pub const MAX_LOG2_DOMAIN_SIZE: u32 = 32;
