use crate::aesp::cipher::{Block, Cipher};
use crate::aesp::error::Result;
use crate::aesp::modes::{Feedback, Mode};
use crate::aesp::util::{fill_block, xor_blocks};

/// **Cipher block chaining** mode.
///
/// Each plaintext block is `XOR`'d with the previous ciphertext block (the IV for the first block)
/// before encryption. The register always holds the last ciphertext block, whether it was
/// produced by encryption or consumed by decryption.
pub struct Cbc<'a> {
    cipher: &'a Cipher,
    feedback: Feedback,
}

impl<'a> Cbc<'a> {
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
}

impl Mode for Cbc<'_> {
    fn set_iv(&mut self, iv: &[u8]) -> Result<()> {
        self.feedback.set_iv(iv)
    }

    fn clear(&mut self) {
        self.feedback.clear();
    }

    /// `C = E(P ⊕ R)`, then `R = C`.
    fn encrypt_block(&mut self, plaintext: &[u8]) -> Result<Block> {
        let plaintext = fill_block(plaintext)?;
        let ciphertext = self
            .cipher
            .encrypt_block(&xor_blocks(&plaintext, self.feedback.register()));
        self.feedback.advance(ciphertext);
        Ok(ciphertext)
    }

    /// `P = D(C) ⊕ R`, then `R = C`.
    fn decrypt_block(&mut self, ciphertext: &[u8]) -> Result<Block> {
        let ciphertext = fill_block(ciphertext)?;
        let plaintext = xor_blocks(&self.cipher.decrypt_block(&ciphertext), self.feedback.register());
        self.feedback.advance(ciphertext);
        Ok(plaintext)
    }

    fn iv(&self) -> &Block {
        self.feedback.iv()
    }

    fn register(&self) -> &Block {
        self.feedback.register()
    }
}
