//! Precomputed GF(2^8) tables: forward and inverse S-boxes, key schedule round constants,
//! and the multiplication tables used by MixColumns and InvMixColumns.
//!
//! Every table is evaluated at compile time and lives in read-only memory, so lookups are
//! safe to share across threads without synchronisation.

/// Reduction term for the AES polynomial x^8 + x^4 + x^3 + x + 1 (0x11B).
const REDUCTION: u8 = 0x1B;

/// Multiply two elements of GF(2^8) (shift-and-add, reduced by the AES polynomial).
pub(crate) const fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        let carry = a & 0x80;
        a <<= 1;
        if carry != 0 {
            a ^= REDUCTION;
        }
        b >>= 1;
    }
    product
}

/// Multiplicative inverse, computed as a^254. Zero maps to zero.
const fn gf_inv(a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    let a2 = gf_mul(a, a);
    let a4 = gf_mul(a2, a2);
    let a8 = gf_mul(a4, a4);
    let a16 = gf_mul(a8, a8);
    let a32 = gf_mul(a16, a16);
    let a64 = gf_mul(a32, a32);
    let a128 = gf_mul(a64, a64);
    // 254 = 128 + 64 + 32 + 16 + 8 + 4 + 2
    let t = gf_mul(a128, a64);
    let t = gf_mul(t, a32);
    let t = gf_mul(t, a16);
    let t = gf_mul(t, a8);
    let t = gf_mul(t, a4);
    gf_mul(t, a2)
}

const fn build_sbox() -> [u8; 256] {
    let mut sbox = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        let b = gf_inv(i as u8);
        // affine transform over GF(2)
        sbox[i] = b
            ^ b.rotate_left(1)
            ^ b.rotate_left(2)
            ^ b.rotate_left(3)
            ^ b.rotate_left(4)
            ^ 0x63;
        i += 1;
    }
    sbox
}

const fn invert(table: &[u8; 256]) -> [u8; 256] {
    let mut inv = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        inv[table[i] as usize] = i as u8;
        i += 1;
    }
    inv
}

// index 0 is never read by the key schedule
const fn build_rcon() -> [u8; 11] {
    let mut rcon = [0u8; 11];
    let mut x = 1u8;
    let mut i = 1;
    while i < 11 {
        rcon[i] = x;
        x = gf_mul(x, 2);
        i += 1;
    }
    rcon
}

const fn build_mul(multiplier: u8) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = gf_mul(i as u8, multiplier);
        i += 1;
    }
    table
}

/// Forward substitution box.
pub const SBOX: [u8; 256] = build_sbox();

/// Inverse substitution box. `SBOX_INV[SBOX[x]] == x` for every byte.
pub const SBOX_INV: [u8; 256] = invert(&SBOX);

/// Key schedule round constants, `RCON[i] = x^(i-1)` in GF(2^8).
pub const RCON: [u8; 11] = build_rcon();

pub(crate) static MUL_1: [u8; 256] = build_mul(1);
pub(crate) static MUL_2: [u8; 256] = build_mul(2);
pub(crate) static MUL_3: [u8; 256] = build_mul(3);
pub(crate) static MUL_9: [u8; 256] = build_mul(9);
pub(crate) static MUL_11: [u8; 256] = build_mul(11);
pub(crate) static MUL_13: [u8; 256] = build_mul(13);
pub(crate) static MUL_14: [u8; 256] = build_mul(14);

/// Multiplier row for MixColumns: {2, 3, 1, 1}.
pub(crate) static MIX: [&[u8; 256]; 4] = [&MUL_2, &MUL_3, &MUL_1, &MUL_1];

/// Multiplier row for InvMixColumns: {14, 11, 13, 9}.
pub(crate) static MIX_INV: [&[u8; 256]; 4] = [&MUL_14, &MUL_11, &MUL_13, &MUL_9];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sbox_known_entries() {
        // FIPS-197 Figure 7
        assert_eq!(SBOX[0x00], 0x63);
        assert_eq!(SBOX[0x01], 0x7c);
        assert_eq!(SBOX[0x53], 0xed);
        assert_eq!(SBOX[0xff], 0x16);
        // FIPS-197 Figure 14
        assert_eq!(SBOX_INV[0x00], 0x52);
        assert_eq!(SBOX_INV[0x63], 0x00);
    }

    #[test]
    fn sbox_inverse_is_exact() {
        for x in 0..=255u8 {
            assert_eq!(SBOX_INV[SBOX[x as usize] as usize], x, "inverse sbox mismatch at {x:#04x}");
        }
    }

    #[test]
    fn round_constants() {
        assert_eq!(
            RCON[1..],
            [0x01u8, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36]
        );
    }

    #[test]
    fn multiplication_tables() {
        // FIPS-197 section 4.2 worked example: {57} * {13} = {fe}
        assert_eq!(gf_mul(0x57, 0x13), 0xfe);
        assert_eq!(MUL_2[0x57], 0xae);
        assert_eq!(MUL_2[0xae], 0x47);
        assert_eq!(MUL_3[0x57], 0xae ^ 0x57);
        for x in 0..=255u8 {
            assert_eq!(MUL_1[x as usize], x);
            // {9}, {11}, {13}, {14} decompose into doublings of x
            let x2 = MUL_2[x as usize];
            let x4 = MUL_2[x2 as usize];
            let x8 = MUL_2[x4 as usize];
            assert_eq!(MUL_9[x as usize], x8 ^ x);
            assert_eq!(MUL_11[x as usize], x8 ^ x2 ^ x);
            assert_eq!(MUL_13[x as usize], x8 ^ x4 ^ x);
            assert_eq!(MUL_14[x as usize], x8 ^ x4 ^ x2);
        }
    }
}
