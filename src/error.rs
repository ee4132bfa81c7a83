use crate::algorithms::primitives::Primitive;

/// TimeTravel10 hashing errors
#[derive(Debug, thiserror::Error)]
pub enum TimeTravelError {
    #[error("Malformed ntime {input:?}: {reason}")]
    MalformedNtime { input: String, reason: String },

    #[error("Invalid algorithm code character: {0:?}")]
    InvalidCode(char),

    #[error("Algorithm order must have 10 entries, got {0}")]
    InvalidOrderLength(usize),

    #[error("Primitive {0} appears more than once in the order")]
    DuplicatePrimitive(Primitive),

    #[error("No implementation registered for primitive {0}")]
    MissingPrimitive(Primitive),

    #[error("Primitive {primitive} produces {size}-byte digests, expected 64")]
    DigestSize { primitive: Primitive, size: usize },

    #[error("Malformed target: {0}")]
    MalformedTarget(String),

    #[error("Hex decoding error: {0}")]
    Hex(#[from] hex::FromHexError),
}

pub type Result<T> = std::result::Result<T, TimeTravelError>;
