use super::tables::SBOX;
use super::util::{add_round_key, mix_columns};

/// Core AES encryption function. Encrypts 16 byte block using provided round keys.
/// `round_keys` holds Nr + 1 keys, consumed in order 0..=Nr.
#[inline(always)]
pub fn encrypt_block(plaintext: &[u8; 16], round_keys: &[[u8; 16]]) -> [u8; 16] {
    let mut state = *plaintext;
    let last_key_idx = round_keys.len() - 1;

    // add first round key to state
    add_round_key(&mut state, &round_keys[0]);

    // perform all rounds except for the last
    for round_key in &round_keys[1..last_key_idx] {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, round_key);
    }

    // last round skips mixcolumns step
    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, &round_keys[last_key_idx]);

    state
}

/// SubBytes step. Each byte is substituted using the SBOX.
#[inline(always)]
pub(crate) fn sub_bytes(state: &mut [u8; 16]) {
    for byte in state {
        *byte = SBOX[*byte as usize];
    }
}

/// ShiftRows step. Row `r` (bytes `r, r + 4, r + 8, r + 12`) rotates left by `r` positions.
#[inline(always)]
pub(crate) fn shift_rows(state: &mut [u8; 16]) {
    let s = *state;
    for row in 1..4 {
        for col in 0..4 {
            state[col * 4 + row] = s[((col + row) & 3) * 4 + row];
        }
    }
}
