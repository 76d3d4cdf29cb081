use alloc::string::String;
use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KzgError {
    /// The supplied data is invalid in some way.
    BadArgs(String),
    /// The provided bytes are of incorrect length.
    InvalidBytesLength(String),
    /// Error when converting from hex to bytes.
    InvalidHexFormat(String),
    /// The provided trusted setup params are invalid.
    InvalidTrustedSetup(String),
    /// The 32 bytes are not the canonical encoding of a field element.
    InvalidScalar,
    /// The bytes do not decode to a G1 point in the prime order subgroup.
    InvalidG1Point(String),
    /// The bytes do not decode to a G2 point in the prime order subgroup.
    InvalidG2Point(String),
    /// A polynomial does not have one evaluation per domain point.
    PolynomialLengthMismatch { expected: usize, got: usize },
    /// Aggregation was requested over zero polynomials.
    EmptyBatch,
    /// The number of polynomials and commitments differ.
    BatchLengthMismatch {
        polynomials: usize,
        commitments: usize,
    },
    /// The opening point coincides with a domain point, so the quotient is undefined.
    InvalidChallenge,
}

impl fmt::Display for KzgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadArgs(msg) => write!(f, "bad arguments: {msg}"),
            Self::InvalidBytesLength(msg) => write!(f, "invalid bytes length: {msg}"),
            Self::InvalidHexFormat(msg) => write!(f, "invalid hex: {msg}"),
            Self::InvalidTrustedSetup(msg) => write!(f, "invalid trusted setup: {msg}"),
            Self::InvalidScalar => f.write_str("bytes are not a canonical field element"),
            Self::InvalidG1Point(msg) => write!(f, "invalid G1 point: {msg}"),
            Self::InvalidG2Point(msg) => write!(f, "invalid G2 point: {msg}"),
            Self::PolynomialLengthMismatch { expected, got } => write!(
                f,
                "polynomial has {got} evaluations, domain has {expected} points"
            ),
            Self::EmptyBatch => f.write_str("batch must contain at least one polynomial"),
            Self::BatchLengthMismatch {
                polynomials,
                commitments,
            } => write!(
                f,
                "{polynomials} polynomials but {commitments} commitments"
            ),
            Self::InvalidChallenge => f.write_str("invalid z challenge: point is in the domain"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for KzgError {}
