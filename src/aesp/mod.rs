mod cipher;
mod core;
mod error;
mod key;
mod modes;
mod util;

pub use cipher::{BLOCK_SIZE, Block, Cipher};
pub use self::core::tables::{RCON, SBOX, SBOX_INV};
pub use error::{Error, Result};
pub use key::{ExpandedKey, Key, KeySize, expand_key};
pub use modes::{
    Cbc, Cfb, Mode, ModeKind, Ofb, PARALLEL_THRESHOLD, cbc_decrypt_parallel, cfb_decrypt_parallel,
    stream_decrypt, stream_encrypt,
};
pub use util::random_iv;
