//! Crate custom errors.

use cryptraits_macros::Error;

use crate::digest::CryptoAlg;

/// HMAC context errors.
///
/// Every error is fatal to the MAC computation in progress. None of them is
/// retried by the context.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HmacError {
    /// `reset`, `update`, `finalize` or `size` called on an uninitialized context.
    UseBeforeInit,

    /// The engine could not be keyed for the requested algorithm.
    PrimitiveInit,

    /// The engine failed to restart the accumulator.
    PrimitiveReset,

    /// The engine failed to absorb input.
    PrimitiveUpdate,

    /// The engine failed to produce the tag.
    PrimitiveFinalize,

    /// The digest resolver has no engine for this algorithm.
    UnsupportedAlgorithm(CryptoAlg),

    /// Key rejected by the engine.
    InvalidLength,

    /// Output buffer is shorter than the tag.
    OutputTooShort,

    /// Tag verification failed.
    MacError,
}
