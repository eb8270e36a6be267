//! Chaining modes of operation. Each mode wraps a shared [Cipher](crate::Cipher) and owns a
//! feedback register that carries state from one block to the next.

mod cbc;
mod cfb;
mod ofb;
mod stream;

pub use cbc::Cbc;
pub use cfb::Cfb;
pub use ofb::Ofb;
pub use stream::{
    PARALLEL_THRESHOLD, cbc_decrypt_parallel, cfb_decrypt_parallel, stream_decrypt,
    stream_encrypt,
};

use crate::aesp::cipher::{BLOCK_SIZE, Block, Cipher};
use crate::aesp::error::{Error, Result};

/// Capabilities shared by every chaining mode.
///
/// A mode starts with an all-zero IV and register. [set_iv](Mode::set_iv) stores the IV and
/// resets the register to it; each block operation then advances the register. A mode instance
/// belongs to one stream: interleaving two messages through the same instance corrupts both.
///
/// Block inputs shorter than 16 bytes are zero-filled before use; longer inputs are rejected.
pub trait Mode {
    /// Stores `iv` and resets the feedback register to it. Anything other than exactly
    /// 16 bytes returns an InvalidIvLength error and leaves the IV and register untouched.
    fn set_iv(&mut self, iv: &[u8]) -> Result<()>;

    /// Resets the feedback register to the stored IV, ready for a new message.
    fn clear(&mut self);

    fn encrypt_block(&mut self, plaintext: &[u8]) -> Result<Block>;

    fn decrypt_block(&mut self, ciphertext: &[u8]) -> Result<Block>;

    fn iv(&self) -> &Block;

    /// Current feedback register contents.
    fn register(&self) -> &Block;

    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }
}

/// Selects a chaining mode at runtime.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ModeKind {
    Cbc,
    Cfb,
    Ofb,
}

impl ModeKind {
    /// Creates a fresh mode of this kind over `cipher`, with a zero IV.
    pub fn bind<'a>(self, cipher: &'a Cipher) -> Box<dyn Mode + 'a> {
        match self {
            ModeKind::Cbc => Box::new(Cbc::new(cipher)),
            ModeKind::Cfb => Box::new(Cfb::new(cipher)),
            ModeKind::Ofb => Box::new(Ofb::new(cipher)),
        }
    }
}

/// IV plus feedback register, shared by all modes.
#[derive(Clone, Debug, Default)]
pub(crate) struct Feedback {
    iv: Block,
    register: Block,
}

impl Feedback {
    pub(crate) fn set_iv(&mut self, iv: &[u8]) -> Result<()> {
        self.iv = iv
            .try_into()
            .map_err(|_| Error::InvalidIvLength { len: iv.len() })?;
        self.clear();
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.register = self.iv;
    }

    pub(crate) fn iv(&self) -> &Block {
        &self.iv
    }

    pub(crate) fn register(&self) -> &Block {
        &self.register
    }

    pub(crate) fn advance(&mut self, next: Block) {
        self.register = next;
    }
}
