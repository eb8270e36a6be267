use crate::aesp::cipher::{Block, Cipher};
use crate::aesp::error::Result;
use crate::aesp::modes::{Feedback, Mode};
use crate::aesp::util::{fill_block, xor_blocks};

/// **Output feedback** mode.
///
/// The register is repeatedly encrypted to produce the keystream, and each keystream block
/// becomes the next register value. The keystream depends only on the key and IV, never on the
/// data, so encryption and decryption are the same operation.
pub struct Ofb<'a> {
    cipher: &'a Cipher,
    feedback: Feedback,
}

impl<'a> Ofb<'a> {
    pub fn new(cipher: &'a Cipher) -> Self {
        Self {
            cipher,
            feedback: Feedback::default(),
        }
    }

    pub fn with_iv(cipher: &'a Cipher, iv: &[u8]) -> Result<Self> {
        let mut mode = Self::new(cipher);
        mode.set_iv(iv)?;
        Ok(mode)
    }

    /// `K = E(R)`, then `R = K`; returns `input ⊕ K`.
    fn apply(&mut self, input: &[u8]) -> Result<Block> {
        let input = fill_block(input)?;
        let keystream = self.cipher.encrypt_block(self.feedback.register());
        self.feedback.advance(keystream);
        Ok(xor_blocks(&input, &keystream))
    }
}

impl Mode for Ofb<'_> {
    fn set_iv(&mut self, iv: &[u8]) -> Result<()> {
        self.feedback.set_iv(iv)
    }

    fn clear(&mut self) {
        self.feedback.clear();
    }

    fn encrypt_block(&mut self, plaintext: &[u8]) -> Result<Block> {
        self.apply(plaintext)
    }

    fn decrypt_block(&mut self, ciphertext: &[u8]) -> Result<Block> {
        self.apply(ciphertext)
    }

    fn iv(&self) -> &Block {
        self.feedback.iv()
    }

    fn register(&self) -> &Block {
        self.feedback.register()
    }
}
