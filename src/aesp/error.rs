use thiserror::Error;
use rand::rand_core;

/// AES Result type.
pub type Result<T> = std::result::Result<T, Error>;

/// AES Error type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Attempted to instantiate an AES key with an input size that is not 128, 192, or 256 bits.
    #[error("invalid key length: {len} bytes (expected 16, 24, or 32)")]
    InvalidKeyLength { len: usize },

    /// Expanded key was not 176, 208, or 240 bytes (11, 13, or 15 round keys).
    #[error("invalid expanded key length: {len} bytes (expected 176, 208, or 240)")]
    InvalidExpandedKeyLength { len: usize },

    /// IV passed to a mode of operation was not exactly one block long.
    /// The mode's IV and feedback register are left unchanged.
    #[error("invalid IV length: {len} bytes (expected 16)")]
    InvalidIvLength { len: usize },

    /// Block input longer than 16 bytes. Shorter input is zero-filled instead.
    #[error("invalid block length: {len} bytes (expected at most 16)")]
    InvalidBlockLength { len: usize },

    /// Provided ciphertext that did not match the expected format of the mode of operation.
    #[error("invalid ciphertext length: {len} bytes ({context})")]
    InvalidCiphertext { len: usize, context: &'static str },

    /// OS RNG failed during random key or IV generation.
    #[error("OS RNG failed in random key generation")]
    Rng(#[from] rand_core::OsError),
}
