//! Defines the [`Key`] struct, which holds a valid AES key of 128, 192, or 256 bits, and the
//! [`ExpandedKey`] produced from it by the key schedule.

use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::aesp::core::tables::{RCON, SBOX};
use crate::aesp::error::{Error, Result};
use crate::aesp::util::xor_words;

/// AES key size. Determines the number of rounds.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum KeySize {
    Bits128,
    Bits192,
    Bits256,
}

impl KeySize {
    /// Key length in bytes (16, 24, or 32).
    pub const fn byte_len(self) -> usize {
        match self {
            KeySize::Bits128 => 16,
            KeySize::Bits192 => 24,
            KeySize::Bits256 => 32,
        }
    }

    /// Number of rounds, Nr (10, 12, or 14).
    pub const fn rounds(self) -> usize {
        self.byte_len() / 4 + 6
    }

    fn from_rounds(nr: usize) -> Option<Self> {
        match nr {
            10 => Some(KeySize::Bits128),
            12 => Some(KeySize::Bits192),
            14 => Some(KeySize::Bits256),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum KeyBytes {
    K128([u8; 16]),
    K192([u8; 24]),
    K256([u8; 32]),
}

/// Contains a valid AES key. Can be instantiated with a random key, or built from a slice
/// of bytes that is 16, 24, or 32 bytes long.
/// A `key` object is required to instantiate a [Cipher](crate::Cipher).
///
/// ## Examples
/// ```
/// # fn main() -> aeschain::Result<()> {
/// use aeschain::{Key, KeySize};
///
/// // Instantiate a random key:
/// let rk_256 = Key::random(KeySize::Bits256)?;
/// assert_eq!(rk_256.size(), KeySize::Bits256);
///
/// // Instantiate keys from slice:
/// let key_bytes: [u8; 32] = [0xBA, 0x32, 0x82, 0x9A, 0x43, 0x8A, 0x48, 0xED,
///                            0xC2, 0xEA, 0x10, 0x73, 0x26, 0xF8, 0xA9, 0x62,
///                            0xDE, 0x82, 0x06, 0xBA, 0x53, 0xC2, 0xC7, 0x55,
///                            0x2C, 0x72, 0xC5, 0x37, 0xBF, 0xD4, 0xDB, 0x5E];
/// let my_key_128 = Key::try_from_slice(&key_bytes[..16])?;
/// let my_key_192 = Key::try_from_slice(&key_bytes[..24])?;
/// assert_eq!(my_key_128.as_bytes(), &key_bytes[..16]);
/// assert_eq!(my_key_192.size(), KeySize::Bits192);
///
/// // Any other length returns an InvalidKeyLength error:
/// assert!(Key::try_from_slice(&key_bytes[..20]).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Key {
    bytes: KeyBytes,
}

impl Key {
    /// Generate a random key of the given size. Returns Error if OsRng fails.
    pub fn random(size: KeySize) -> Result<Self> {
        let bytes = match size {
            KeySize::Bits128 => {
                let mut k = [0u8; 16];
                OsRng.try_fill_bytes(&mut k)?;
                KeyBytes::K128(k)
            }
            KeySize::Bits192 => {
                let mut k = [0u8; 24];
                OsRng.try_fill_bytes(&mut k)?;
                KeyBytes::K192(k)
            }
            KeySize::Bits256 => {
                let mut k = [0u8; 32];
                OsRng.try_fill_bytes(&mut k)?;
                KeyBytes::K256(k)
            }
        };
        Ok(Self { bytes })
    }

    /// Attempts to build a key from a slice of bytes. Will return an InvalidKeyLength error
    /// if the input slice is anything other than 16, 24, or 32 bytes long.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let invalid = || Error::InvalidKeyLength { len: bytes.len() };
        let bytes = match bytes.len() {
            16 => KeyBytes::K128(bytes.try_into().map_err(|_| invalid())?),
            24 => KeyBytes::K192(bytes.try_into().map_err(|_| invalid())?),
            32 => KeyBytes::K256(bytes.try_into().map_err(|_| invalid())?),
            _ => return Err(invalid()),
        };
        Ok(Self { bytes })
    }

    /// Returns a reference to the internal key as an array of bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.bytes {
            KeyBytes::K128(k) => k,
            KeyBytes::K192(k) => k,
            KeyBytes::K256(k) => k,
        }
    }

    pub fn size(&self) -> KeySize {
        match self.bytes {
            KeyBytes::K128(_) => KeySize::Bits128,
            KeyBytes::K192(_) => KeySize::Bits192,
            KeyBytes::K256(_) => KeySize::Bits256,
        }
    }
}

/// Output of the key schedule: Nr + 1 round keys of 16 bytes each, where Nr is 10, 12, or 14.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ExpandedKey {
    round_keys: Vec<[u8; 16]>,
}

impl ExpandedKey {
    /// Rebuilds an expanded key from its flat byte form. The length must be `16 * (Nr + 1)`
    /// for Nr in {10, 12, 14}, otherwise an InvalidExpandedKeyLength error is returned.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self> {
        let invalid = Error::InvalidExpandedKeyLength { len: bytes.len() };
        if bytes.len() % 16 != 0 || bytes.len() < 16 {
            return Err(invalid);
        }
        if KeySize::from_rounds(bytes.len() / 16 - 1).is_none() {
            return Err(invalid);
        }

        let round_keys = bytes
            .chunks_exact(16)
            .map(|chunk| {
                let mut rk = [0u8; 16];
                rk.copy_from_slice(chunk);
                rk
            })
            .collect();
        Ok(Self { round_keys })
    }

    /// Number of rounds, Nr.
    pub fn rounds(&self) -> usize {
        self.round_keys.len() - 1
    }

    /// Key size this schedule was expanded from.
    pub fn key_size(&self) -> Option<KeySize> {
        KeySize::from_rounds(self.rounds())
    }

    /// Round key `round`, or `None` if `round` is past Nr.
    pub fn round_key(&self, round: usize) -> Option<&[u8; 16]> {
        self.round_keys.get(round)
    }

    /// All round keys in the order the cipher consumes them.
    pub fn round_keys(&self) -> &[[u8; 16]] {
        &self.round_keys
    }

    /// Flat byte form, `16 * (Nr + 1)` bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.round_keys.iter().flatten().copied().collect()
    }
}

/// AES key schedule. Returns 11, 13, or 15 round keys, corresponding with AES-128, AES-192,
/// and AES-256, respectively. The extra round key is the initial round key, which is not counted in most
/// documentation as it is simply the original key.
pub fn expand_key(key: &Key) -> ExpandedKey {
    let key = key.as_bytes();

    // Variable names match FIPS-197, NIST specification: https://doi.org/10.6028/NIST.FIPS.197-upd1
    // Nk   The number of 32-bit words comprising the key
    // Nr   The number of rounds. 10, 12, and 14 for AES-128, AES-192, and AES-256, respectively
    // w    The result of the key schedule, an array of words that form round keys
    // Nw   The total number of words generated by the key schedule (including initial key)
    let nk = key.len() / 4;
    let nr = nk + 6;
    let nw = (nr + 1) * 4;

    let mut w: Vec<[u8; 4]> = vec![[0u8; 4]; nw];

    // first nk words of w are filled with the initial key
    for (i, byte) in key.iter().enumerate() {
        w[i / 4][i % 4] = *byte;
    }

    let mut temp = w[nk - 1];
    for i in nk..nw {
        if i % nk == 0 {
            // rot_word, sub_word, and rcon on temp
            temp = [
                SBOX[temp[1] as usize] ^ RCON[i / nk],
                SBOX[temp[2] as usize],
                SBOX[temp[3] as usize],
                SBOX[temp[0] as usize],
            ];
        } else if nk == 8 && i % nk == 4 {
            // additional substitution on temp for AES-256 only
            temp = temp.map(|b| SBOX[b as usize]);
        }

        // w[i] = temp ⊕ w[i − Nk]
        w[i] = xor_words(&temp, &w[i - nk]);
        temp = w[i];
    }

    // words are column-major, so consecutive groups of four form a round key
    let round_keys = w
        .chunks_exact(4)
        .map(|words| {
            let mut rk = [0u8; 16];
            for (col, word) in words.iter().enumerate() {
                rk[col * 4..col * 4 + 4].copy_from_slice(word);
            }
            rk
        })
        .collect();

    ExpandedKey { round_keys }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_schedule_128() -> Result<()> {
        // run key schedule on 128 bit sample key from FIPS-197 Appendix A.1
        let key_128: [u8; 16] = [
            0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf,
            0x4f, 0x3c,
        ];

        let expanded = expand_key(&Key::try_from_slice(&key_128)?);
        assert_eq!(expanded.rounds(), 10);
        assert_eq!(expanded.to_bytes().len(), 176);
        assert_eq!(expanded.round_key(0), Some(&key_128));

        // w[4..8] from A.1
        let expected_1: [u8; 16] = [
            0xa0, 0xfa, 0xfe, 0x17, 0x88, 0x54, 0x2c, 0xb1, 0x23, 0xa3, 0x39, 0x39, 0x2a, 0x6c,
            0x76, 0x05,
        ];
        assert_eq!(expanded.round_key(1), Some(&expected_1));

        // compare with last round key of sample schedule in A.1
        let expected: [u8; 16] = [
            0xd0, 0x14, 0xf9, 0xa8, 0xc9, 0xee, 0x25, 0x89, 0xe1, 0x3f, 0x0c, 0xc8, 0xb6, 0x63,
            0x0c, 0xa6,
        ];
        assert_eq!(expanded.round_key(10), Some(&expected));
        assert_eq!(expanded.round_key(11), None);
        assert_eq!(expanded.round_key(usize::MAX), None);

        Ok(())
    }

    #[test]
    fn key_schedule_192() -> Result<()> {
        // run key schedule on 192 bit sample key from FIPS-197 Appendix A.2
        let key_192: [u8; 24] = [
            0x8e, 0x73, 0xb0, 0xf7, 0xda, 0x0e, 0x64, 0x52, 0xc8, 0x10, 0xf3, 0x2b, 0x80, 0x90,
            0x79, 0xe5, 0x62, 0xf8, 0xea, 0xd2, 0x52, 0x2c, 0x6b, 0x7b,
        ];

        let expanded = expand_key(&Key::try_from_slice(&key_192)?);
        assert_eq!(expanded.rounds(), 12);
        assert_eq!(expanded.key_size(), Some(KeySize::Bits192));

        // compare with last round key of sample schedule in A.2
        let expected: [u8; 16] = [
            0xe9, 0x8b, 0xa0, 0x6f, 0x44, 0x8c, 0x77, 0x3c, 0x8e, 0xcc, 0x72, 0x04, 0x01, 0x00,
            0x22, 0x02,
        ];
        assert_eq!(expanded.round_key(12), Some(&expected));

        Ok(())
    }

    #[test]
    fn key_schedule_256() -> Result<()> {
        // run key schedule on 256 bit sample key from FIPS-197 Appendix A.3
        let key_256: [u8; 32] = [
            0x60, 0x3d, 0xeb, 0x10, 0x15, 0xca, 0x71, 0xbe, 0x2b, 0x73, 0xae, 0xf0, 0x85, 0x7d,
            0x77, 0x81, 0x1f, 0x35, 0x2c, 0x07, 0x3b, 0x61, 0x08, 0xd7, 0x2d, 0x98, 0x10, 0xa3,
            0x09, 0x14, 0xdf, 0xf4,
        ];

        let expanded = expand_key(&Key::try_from_slice(&key_256)?);
        assert_eq!(expanded.rounds(), 14);
        assert_eq!(expanded.to_bytes().len(), 240);

        // compare with last round key of sample schedule in A.3
        let expected: [u8; 16] = [
            0xfe, 0x48, 0x90, 0xd1, 0xe6, 0x18, 0x8d, 0x0b, 0x04, 0x6d, 0xf3, 0x44, 0x70, 0x6c,
            0x63, 0x1e,
        ];
        assert_eq!(expanded.round_key(14), Some(&expected));

        Ok(())
    }

    #[test]
    fn key_schedule_is_deterministic() -> Result<()> {
        let key = Key::random(KeySize::Bits192)?;
        assert_eq!(expand_key(&key), expand_key(&key));
        Ok(())
    }

    #[test]
    fn invalid_key_lengths() {
        for len in [0, 1, 15, 17, 20, 23, 25, 31, 33, 64] {
            let bytes = vec![0u8; len];
            assert!(
                matches!(Key::try_from_slice(&bytes), Err(Error::InvalidKeyLength { len: l }) if l == len),
                "{len}-byte key should be rejected"
            );
        }
    }

    #[test]
    fn random_keys_have_requested_size() -> Result<()> {
        for size in [KeySize::Bits128, KeySize::Bits192, KeySize::Bits256] {
            let key = Key::random(size)?;
            assert_eq!(key.size(), size);
            assert_eq!(key.as_bytes().len(), size.byte_len());
        }
        Ok(())
    }

    #[test]
    fn expanded_key_bytes_round_trip() -> Result<()> {
        let expanded = expand_key(&Key::try_from_slice(&[0x42u8; 24])?);
        let rebuilt = ExpandedKey::try_from_bytes(&expanded.to_bytes())?;
        assert_eq!(rebuilt, expanded);
        Ok(())
    }

    #[test]
    fn invalid_expanded_key_lengths() {
        // 16 * 11 = 176, 16 * 13 = 208, 16 * 15 = 240 are the only valid sizes
        for len in [0, 16, 160, 175, 177, 192, 224, 256] {
            let bytes = vec![0u8; len];
            assert!(
                matches!(
                    ExpandedKey::try_from_bytes(&bytes),
                    Err(Error::InvalidExpandedKeyLength { .. })
                ),
                "{len}-byte expanded key should be rejected"
            );
        }
        for len in [176, 208, 240] {
            assert!(ExpandedKey::try_from_bytes(&vec![0u8; len]).is_ok());
        }
    }
}
