//! AES (FIPS-197) block cipher with the CBC, CFB, and OFB chaining modes (NIST SP 800-38A).
//!
//! - [Key] and [expand_key] turn a 128, 192, or 256-bit key into an [ExpandedKey].
//! - [Cipher] performs single block encryption and decryption with an expanded key.
//! - [Cbc], [Cfb], and [Ofb] implement [Mode], holding the feedback register between blocks.
//!
//! No padding scheme or authentication is provided: a short final block is zero-filled, and the
//! fill is returned as-is on decryption.
//!
//! ## Examples
//! ```
//! # fn main() -> aeschain::Result<()> {
//! use aeschain::{Cbc, Cipher, Key, KeySize, Mode, random_iv};
//!
//! let cipher = Cipher::new(&Key::random(KeySize::Bits128)?);
//! let iv = random_iv()?;
//!
//! let mut enc = Cbc::with_iv(&cipher, &iv)?;
//! let c0 = enc.encrypt_block(b"sixteen byte msg")?;
//! let c1 = enc.encrypt_block(b"and a tail")?;
//!
//! let mut dec = Cbc::with_iv(&cipher, &iv)?;
//! assert_eq!(&dec.decrypt_block(&c0)?, b"sixteen byte msg");
//! assert_eq!(&dec.decrypt_block(&c1)?[..10], b"and a tail");
//! # Ok(())
//! # }
//! ```

mod aesp;

pub use aesp::{
    BLOCK_SIZE, Block, Cbc, Cfb, Cipher, Error, ExpandedKey, Key, KeySize, Mode, ModeKind, Ofb,
    PARALLEL_THRESHOLD, RCON, Result, SBOX, SBOX_INV, cbc_decrypt_parallel, cfb_decrypt_parallel,
    expand_key, random_iv, stream_decrypt, stream_encrypt,
};
