use super::tables::{MIX, MIX_INV};

// used for both encryption and decryption
#[inline(always)]
pub(crate) fn add_round_key(state: &mut [u8; 16], round_key: &[u8; 16]) {
    for i in 0..16 {
        state[i] ^= round_key[i];
    }
}

/// Multiplies every column of the state by the circulant matrix whose first row is `row`.
/// Output byte `r` of a column is the XOR over `c` of `row[(c - r) mod 4][column[c]]`.
#[inline(always)]
fn mix_with(state: &mut [u8; 16], row: &[&[u8; 256]; 4]) {
    for col in 0..4 {
        let i = col * 4;
        let column = [state[i], state[i + 1], state[i + 2], state[i + 3]];
        for r in 0..4 {
            state[i + r] = row[(4 - r) & 3][column[0] as usize]
                ^ row[(5 - r) & 3][column[1] as usize]
                ^ row[(6 - r) & 3][column[2] as usize]
                ^ row[(7 - r) & 3][column[3] as usize];
        }
    }
}

#[inline(always)]
pub(crate) fn mix_columns(state: &mut [u8; 16]) {
    mix_with(state, &MIX);
}

#[inline(always)]
pub(crate) fn mix_columns_inv(state: &mut [u8; 16]) {
    mix_with(state, &MIX_INV);
}
