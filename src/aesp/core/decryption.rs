use super::tables::SBOX_INV;
use super::util::{add_round_key, mix_columns_inv};

/// Core AES decryption function. Decrypts 16 byte block using provided round keys.
/// Round keys are consumed in reverse order, Nr down to 0.
#[inline(always)]
pub fn decrypt_block(ciphertext: &[u8; 16], round_keys: &[[u8; 16]]) -> [u8; 16] {
    let mut state = *ciphertext;
    let last_key_idx = round_keys.len() - 1;

    add_round_key(&mut state, &round_keys[last_key_idx]);

    for round_key in round_keys[1..last_key_idx].iter().rev() {
        shift_rows_inv(&mut state);
        sub_bytes_inv(&mut state);
        add_round_key(&mut state, round_key);
        mix_columns_inv(&mut state);
    }

    shift_rows_inv(&mut state);
    sub_bytes_inv(&mut state);
    add_round_key(&mut state, &round_keys[0]);

    state
}

/// Inverse SubBytes step. Each byte is substituted using the inverse SBOX.
#[inline(always)]
pub(crate) fn sub_bytes_inv(state: &mut [u8; 16]) {
    for byte in state {
        *byte = SBOX_INV[*byte as usize];
    }
}

/// Inverse ShiftRows step. Row `r` rotates right by `r` positions.
#[inline(always)]
pub(crate) fn shift_rows_inv(state: &mut [u8; 16]) {
    let s = *state;
    for row in 1..4 {
        for col in 0..4 {
            state[col * 4 + row] = s[((col + 4 - row) & 3) * 4 + row];
        }
    }
}
