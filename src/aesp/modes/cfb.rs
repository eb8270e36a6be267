use crate::aesp::cipher::{Block, Cipher};
use crate::aesp::error::Result;
use crate::aesp::modes::{Feedback, Mode};
use crate::aesp::util::{fill_block, xor_blocks};

/// **Cipher feedback** mode (CFB128).
///
/// The register is encrypted to produce a keystream block, which is `XOR`'d with the input.
/// The register then takes the ciphertext block. Decryption also uses the forward cipher.
pub struct Cfb<'a> {
    cipher: &'a Cipher,
    feedback: Feedback,
}

impl<'a> Cfb<'a> {
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

    fn keystream(&self) -> Block {
        self.cipher.encrypt_block(self.feedback.register())
    }
}

impl Mode for Cfb<'_> {
    fn set_iv(&mut self, iv: &[u8]) -> Result<()> {
        self.feedback.set_iv(iv)
    }

    fn clear(&mut self) {
        self.feedback.clear();
    }

    /// `C = P ⊕ E(R)`, then `R = C`.
    fn encrypt_block(&mut self, plaintext: &[u8]) -> Result<Block> {
        let plaintext = fill_block(plaintext)?;
        let ciphertext = xor_blocks(&plaintext, &self.keystream());
        self.feedback.advance(ciphertext);
        Ok(ciphertext)
    }

    /// `P = C ⊕ E(R)`, then `R = C`.
    fn decrypt_block(&mut self, ciphertext: &[u8]) -> Result<Block> {
        let ciphertext = fill_block(ciphertext)?;
        let plaintext = xor_blocks(&ciphertext, &self.keystream());
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
