use rayon::prelude::*;

use crate::aesp::cipher::{BLOCK_SIZE, Block};
use crate::aesp::core::{decrypt_block, encrypt_block};
use crate::aesp::error::*;
use crate::aesp::key::ExpandedKey;
use crate::aesp::modes::Mode;
use crate::aesp::util::xor_blocks;

pub const PARALLEL_THRESHOLD: usize = 4 * 1024; // decrypt in parallel if input size gt 4 KiB

/// Encrypts `plaintext` block by block through `mode`, starting from its current register.
/// The final partial block is zero-filled, so the output is `ceil(len / 16) * 16` bytes.
pub fn stream_encrypt<M: Mode + ?Sized>(mode: &mut M, plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut ciphertext = Vec::with_capacity(plaintext.len().div_ceil(BLOCK_SIZE) * BLOCK_SIZE);
    for chunk in plaintext.chunks(BLOCK_SIZE) {
        ciphertext.extend_from_slice(&mode.encrypt_block(chunk)?);
    }
    Ok(ciphertext)
}

/// Decrypts `ciphertext` block by block through `mode`. No fill bytes are removed.
pub fn stream_decrypt<M: Mode + ?Sized>(mode: &mut M, ciphertext: &[u8]) -> Result<Vec<u8>> {
    check_multiple(ciphertext)?;

    let mut plaintext = Vec::with_capacity(ciphertext.len());
    for chunk in ciphertext.chunks_exact(BLOCK_SIZE) {
        plaintext.extend_from_slice(&mode.decrypt_block(chunk)?);
    }
    Ok(plaintext)
}

/// CBC decryption with every block handled independently: `P[i] = D(C[i]) ⊕ C[i - 1]`.
pub fn cbc_decrypt_parallel(
    ciphertext: &[u8],
    expanded_key: &ExpandedKey,
    iv: &Block,
) -> Result<Vec<u8>> {
    check_multiple(ciphertext)?;
    let round_keys = expanded_key.round_keys();

    let mut plaintext = vec![0u8; ciphertext.len()];
    plaintext
        .par_chunks_exact_mut(BLOCK_SIZE)
        .zip(ciphertext.par_chunks_exact(BLOCK_SIZE))
        .enumerate()
        .for_each(|(i, (pt, ct))| {
            let decrypted = decrypt_block(&to_block(ct), round_keys);
            pt.copy_from_slice(&xor_blocks(&decrypted, &previous(ciphertext, iv, i)));
        });

    Ok(plaintext)
}

/// CFB decryption with every block handled independently: `P[i] = C[i] ⊕ E(C[i - 1])`.
pub fn cfb_decrypt_parallel(
    ciphertext: &[u8],
    expanded_key: &ExpandedKey,
    iv: &Block,
) -> Result<Vec<u8>> {
    check_multiple(ciphertext)?;
    let round_keys = expanded_key.round_keys();

    let mut plaintext = vec![0u8; ciphertext.len()];
    plaintext
        .par_chunks_exact_mut(BLOCK_SIZE)
        .zip(ciphertext.par_chunks_exact(BLOCK_SIZE))
        .enumerate()
        .for_each(|(i, (pt, ct))| {
            let keystream = encrypt_block(&previous(ciphertext, iv, i), round_keys);
            pt.copy_from_slice(&xor_blocks(&to_block(ct), &keystream));
        });

    Ok(plaintext)
}

fn check_multiple(ciphertext: &[u8]) -> Result<()> {
    if ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(Error::InvalidCiphertext {
            len: ciphertext.len(),
            context: "ciphertext not a multiple of 16 bytes",
        });
    }
    Ok(())
}

// ciphertext block i - 1, or the IV for block 0
#[inline(always)]
fn previous(ciphertext: &[u8], iv: &Block, i: usize) -> Block {
    if i == 0 {
        *iv
    } else {
        to_block(&ciphertext[(i - 1) * BLOCK_SIZE..i * BLOCK_SIZE])
    }
}

#[inline(always)]
fn to_block(chunk: &[u8]) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(chunk);
    block
}
