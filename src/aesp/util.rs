use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::aesp::error::*;

/// Generates a random 16-byte initialisation vector from the OS RNG.
pub fn random_iv() -> Result<[u8; 16]> {
    let mut iv = [0u8; 16];
    OsRng.try_fill_bytes(&mut iv)?;
    Ok(iv)
}

#[inline(always)]
pub(crate) fn xor_words(a: &[u8; 4], b: &[u8; 4]) -> [u8; 4] {
    [a[0] ^ b[0], a[1] ^ b[1], a[2] ^ b[2], a[3] ^ b[3]]
}

#[inline(always)]
pub(crate) fn xor_blocks(a: &[u8; 16], b: &[u8; 16]) -> [u8; 16] {
    let mut out = *a;
    for i in 0..16 {
        out[i] ^= b[i];
    }
    out
}

/// Copies up to 16 bytes of input into a block, right-filling with zero bytes.
/// Input longer than one block is rejected.
pub(crate) fn fill_block(input: &[u8]) -> Result<[u8; 16]> {
    if input.len() > 16 {
        return Err(Error::InvalidBlockLength { len: input.len() });
    }
    let mut block = [0u8; 16];
    block[..input.len()].copy_from_slice(input);
    Ok(block)
}
