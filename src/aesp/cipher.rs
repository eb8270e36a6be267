use crate::aesp::core::{decrypt_block, encrypt_block};
use crate::aesp::error::{Error, Result};
use crate::aesp::key::{ExpandedKey, Key, expand_key};
use crate::aesp::modes::{
    ModeKind, PARALLEL_THRESHOLD, cbc_decrypt_parallel, cfb_decrypt_parallel, stream_decrypt,
    stream_encrypt,
};
use crate::aesp::util::{fill_block, random_iv};

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// One 128-bit AES state, stored column-major (byte `r + 4c` is row `r`, column `c`).
pub type Block = [u8; BLOCK_SIZE];

/// The AES block transform bound to one expanded key.
///
/// Holds no mutable state, so a single instance can serve any number of
/// [modes](crate::Mode) and threads at once. Chaining state lives in the mode objects.
///
/// ## Examples
/// ```
/// # fn main() -> aeschain::Result<()> {
/// use aeschain::{Cipher, Key, ModeKind};
///
/// let cipher = Cipher::new(&Key::try_from_slice(&[0x11; 32])?);
///
/// // single block, short input is zero-filled to 16 bytes
/// let block = cipher.cipher_block(b"hello")?;
/// let mut expected = [0u8; 16];
/// expected[..5].copy_from_slice(b"hello");
/// assert_eq!(cipher.decipher_block(&block)?, expected);
///
/// // whole message, random IV prepended to the output
/// let ciphertext = cipher.encrypt(ModeKind::Cbc, b"attack at dawn")?;
/// assert_eq!(ciphertext.len(), 16 + 16);
/// let plaintext = cipher.decrypt(ModeKind::Cbc, &ciphertext)?;
/// assert_eq!(&plaintext[..14], b"attack at dawn");
/// # Ok(())
/// # }
/// ```
pub struct Cipher {
    expanded_key: ExpandedKey,
}

impl Cipher {
    /// Runs the key schedule on `key` and stores the result in the returned instance.
    pub fn new(key: &Key) -> Self {
        Self {
            expanded_key: expand_key(key),
        }
    }

    /// Uses an already expanded key.
    pub fn from_expanded_key(expanded_key: ExpandedKey) -> Self {
        Self { expanded_key }
    }

    pub fn expanded_key(&self) -> &ExpandedKey {
        &self.expanded_key
    }

    /// Getter for internal round keys. Returned as a slice of 16-byte arrays.
    pub fn get_round_keys(&self) -> &[[u8; 16]] {
        self.expanded_key.round_keys()
    }

    /// Number of rounds, Nr.
    pub fn rounds(&self) -> usize {
        self.expanded_key.rounds()
    }

    /// Forward transform of one full block.
    #[inline]
    pub fn encrypt_block(&self, block: &Block) -> Block {
        encrypt_block(block, self.expanded_key.round_keys())
    }

    /// Inverse transform of one full block.
    #[inline]
    pub fn decrypt_block(&self, block: &Block) -> Block {
        decrypt_block(block, self.expanded_key.round_keys())
    }

    /// Forward transform of up to 16 bytes. Shorter input is right-filled with zero bytes;
    /// this is not a padding scheme and nothing strips the fill on the way back.
    /// Longer input returns an InvalidBlockLength error.
    pub fn cipher_block(&self, input: &[u8]) -> Result<Block> {
        Ok(self.encrypt_block(&fill_block(input)?))
    }

    /// Inverse transform of up to 16 bytes, zero-filled like [cipher_block](Cipher::cipher_block).
    pub fn decipher_block(&self, input: &[u8]) -> Result<Block> {
        Ok(self.decrypt_block(&fill_block(input)?))
    }

    /// Encrypts a whole message under a freshly generated random IV.
    ///
    /// Output is formatted as `IV (16 bytes) || Ciphertext`, and the ciphertext is
    /// `ceil(len / 16) * 16` bytes: the final partial block is zero-filled.
    pub fn encrypt(&self, kind: ModeKind, plaintext: &[u8]) -> Result<Vec<u8>> {
        let iv = random_iv()?;
        let mut out: Vec<u8> = iv.to_vec();
        out.append(&mut self.encrypt_with_iv(kind, &iv, plaintext)?);
        Ok(out)
    }

    /// Decrypts output of [encrypt](Cipher::encrypt): `IV (16 bytes) || Ciphertext`.
    /// Trailing zero fill in the final block is returned as-is.
    pub fn decrypt(&self, kind: ModeKind, data: &[u8]) -> Result<Vec<u8>> {
        if data.len() < BLOCK_SIZE {
            return Err(Error::InvalidCiphertext {
                len: data.len(),
                context: "missing 16-byte IV",
            });
        }
        let (iv, ciphertext) = data.split_at(BLOCK_SIZE);
        self.decrypt_with_iv(kind, iv, ciphertext)
    }

    /// Encrypts a whole message with a caller-supplied IV. No IV is prepended.
    pub fn encrypt_with_iv(&self, kind: ModeKind, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut mode = kind.bind(self);
        mode.set_iv(iv)?;
        stream_encrypt(mode.as_mut(), plaintext)
    }

    /// Decrypts a whole message with a caller-supplied IV. Ciphertext must be a multiple of
    /// 16 bytes. CBC and CFB inputs larger than 4 KiB are decrypted in parallel.
    pub fn decrypt_with_iv(&self, kind: ModeKind, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        let iv: Block = iv
            .try_into()
            .map_err(|_| Error::InvalidIvLength { len: iv.len() })?;

        if ciphertext.len() > PARALLEL_THRESHOLD {
            match kind {
                ModeKind::Cbc => return cbc_decrypt_parallel(ciphertext, &self.expanded_key, &iv),
                ModeKind::Cfb => return cfb_decrypt_parallel(ciphertext, &self.expanded_key, &iv),
                // every OFB keystream block depends on the previous one
                ModeKind::Ofb => {}
            }
        }

        let mut mode = kind.bind(self);
        mode.set_iv(&iv)?;
        stream_decrypt(mode.as_mut(), ciphertext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aesp::key::KeySize;
    use crate::aesp::modes::util::test_util::{IV, KEY_128, PLAINTEXT, hex_to_bytes};

    #[test]
    fn cipher_block_fills_short_input() -> Result<()> {
        let cipher = Cipher::new(&Key::try_from_slice(&KEY_128)?);

        let short = cipher.cipher_block(&[0xaa, 0xbb])?;
        let mut filled = [0u8; 16];
        filled[..2].copy_from_slice(&[0xaa, 0xbb]);

        assert_eq!(short, cipher.encrypt_block(&filled));
        assert_eq!(cipher.decipher_block(&short)?, filled);
        assert_eq!(cipher.cipher_block(&[])?, cipher.encrypt_block(&[0u8; 16]));
        Ok(())
    }

    #[test]
    fn cipher_block_rejects_oversized_input() -> Result<()> {
        let cipher = Cipher::new(&Key::try_from_slice(&KEY_128)?);
        assert!(matches!(
            cipher.cipher_block(&[0u8; 17]),
            Err(Error::InvalidBlockLength { len: 17 })
        ));
        assert!(matches!(
            cipher.decipher_block(&[0u8; 32]),
            Err(Error::InvalidBlockLength { len: 32 })
        ));
        Ok(())
    }

    #[test]
    fn rounds_follow_key_size() -> Result<()> {
        for (size, nr) in [
            (KeySize::Bits128, 10),
            (KeySize::Bits192, 12),
            (KeySize::Bits256, 14),
        ] {
            let cipher = Cipher::new(&Key::random(size)?);
            assert_eq!(cipher.rounds(), nr);
            assert_eq!(cipher.get_round_keys().len(), nr + 1);
        }
        Ok(())
    }

    #[test]
    fn from_expanded_key_matches_new() -> Result<()> {
        let key = Key::try_from_slice(&KEY_128)?;
        let a = Cipher::new(&key);
        let b = Cipher::from_expanded_key(ExpandedKey::try_from_bytes(&a.expanded_key().to_bytes())?);
        let block = [0x5au8; 16];
        assert_eq!(a.encrypt_block(&block), b.encrypt_block(&block));
        Ok(())
    }

    #[test]
    fn encrypt_with_iv_cbc_128() -> Result<()> {
        // NIST SP 800-38A F.2.1
        let expected = hex_to_bytes(
            "
    7649abac8119b246cee98e9b12e9197d\
    5086cb9b507219ee95db113a917678b2\
    73bed6b8e3c1743b7116e69e22229516\
    3ff1caa1681fac09120eca307586e1a7",
        );

        let cipher = Cipher::new(&Key::try_from_slice(&KEY_128)?);
        let encrypted = cipher.encrypt_with_iv(ModeKind::Cbc, &IV, &PLAINTEXT)?;
        assert_eq!(expected, encrypted, "encrypted result does not match expected");

        let decrypted = cipher.decrypt_with_iv(ModeKind::Cbc, &IV, &encrypted)?;
        assert_eq!(PLAINTEXT.to_vec(), decrypted, "decrypted result does not match expected");
        Ok(())
    }

    #[test]
    fn encrypt_decrypt_all_modes() -> Result<()> {
        let cipher = Cipher::new(&Key::random(KeySize::Bits256)?);
        let plaintext = b"The quick brown fox jumps over the lazy dog";

        for kind in [ModeKind::Cbc, ModeKind::Cfb, ModeKind::Ofb] {
            let ciphertext = cipher.encrypt(kind, plaintext)?;
            // IV + three full blocks
            assert_eq!(ciphertext.len(), 16 + 48, "{kind:?}");

            let decrypted = cipher.decrypt(kind, &ciphertext)?;
            assert_eq!(&decrypted[..plaintext.len()], plaintext, "{kind:?}");
            assert!(decrypted[plaintext.len()..].iter().all(|&b| b == 0), "{kind:?}");
        }
        Ok(())
    }

    #[test]
    fn parallel_and_sequential_decryption_agree() -> Result<()> {
        let cipher = Cipher::new(&Key::random(KeySize::Bits128)?);
        let iv = random_iv()?;
        let plaintext: Vec<u8> = (0..PARALLEL_THRESHOLD * 2 + 48)
            .map(|i| (i * 7 % 251) as u8)
            .collect();

        for kind in [ModeKind::Cbc, ModeKind::Cfb, ModeKind::Ofb] {
            let ciphertext = cipher.encrypt_with_iv(kind, &iv, &plaintext)?;
            assert!(ciphertext.len() > PARALLEL_THRESHOLD);

            let decrypted = cipher.decrypt_with_iv(kind, &iv, &ciphertext)?;
            assert_eq!(decrypted, plaintext, "{kind:?}");
        }
        Ok(())
    }

    #[test]
    fn decrypt_rejects_malformed_input() -> Result<()> {
        let cipher = Cipher::new(&Key::try_from_slice(&KEY_128)?);

        assert!(matches!(
            cipher.decrypt(ModeKind::Ofb, &[0u8; 15]),
            Err(Error::InvalidCiphertext { len: 15, .. })
        ));
        assert!(matches!(
            cipher.decrypt_with_iv(ModeKind::Cbc, &IV, &[0u8; 20]),
            Err(Error::InvalidCiphertext { len: 20, .. })
        ));
        assert!(matches!(
            cipher.decrypt_with_iv(ModeKind::Cfb, &IV[..8], &[0u8; 16]),
            Err(Error::InvalidIvLength { len: 8 })
        ));
        assert!(matches!(
            cipher.encrypt_with_iv(ModeKind::Cfb, &[0u8; 17], &[0u8; 16]),
            Err(Error::InvalidIvLength { len: 17 })
        ));
        // an IV with no ciphertext decrypts to nothing
        assert!(cipher.decrypt(ModeKind::Cbc, &IV)?.is_empty());
        Ok(())
    }
}
