//! AES-128 key schedule and single-block encryption/decryption.

use crate::block::{Block, BLOCK_LEN};
use crate::key::{Aes128Key, RoundKeys};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::sbox;

const RCON: [u8; 10] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

/// Expands a 128-bit key into 11 round keys.
pub fn expand_key(key: &Aes128Key) -> RoundKeys {
    // 44 four-byte words, kept as bytes so round keys fall out by slicing.
    let mut w = [[0u8; 4]; 44];
    for (word, chunk) in w.iter_mut().zip(key.as_bytes().chunks_exact(4)) {
        word.copy_from_slice(chunk);
    }

    for i in 4..44 {
        let mut temp = w[i - 1];
        if i % 4 == 0 {
            temp.rotate_left(1);
            temp.iter_mut().for_each(|b| *b = sbox(*b));
            temp[0] ^= RCON[i / 4 - 1];
        }
        for (t, prev) in temp.iter_mut().zip(w[i - 4].iter()) {
            *t ^= *prev;
        }
        w[i] = temp;
    }

    let mut round_keys = [[0u8; BLOCK_LEN]; 11];
    for (round, rk) in round_keys.iter_mut().enumerate() {
        for (col, word) in w[round * 4..round * 4 + 4].iter().enumerate() {
            rk[col * 4..col * 4 + 4].copy_from_slice(word);
        }
    }
    RoundKeys(round_keys)
}

/// Encrypts one block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let mut state = *block;
    add_round_key(&mut state, round_keys.get(0));
    for round in 1..10 {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, round_keys.get(round));
    }
    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, round_keys.get(10));
    state
}

/// Decrypts one block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let mut state = *block;
    add_round_key(&mut state, round_keys.get(10));
    for round in (1..10).rev() {
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, round_keys.get(round));
        inv_mix_columns(&mut state);
    }
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);
    add_round_key(&mut state, round_keys.get(0));
    state
}

/// AES-128 with its key schedule expanded once.
#[derive(Clone, Debug)]
pub struct Aes128 {
    round_keys: RoundKeys,
}

impl Aes128 {
    /// Expands `key` and keeps the schedule for repeated use.
    pub fn new(key: &Aes128Key) -> Self {
        Self {
            round_keys: expand_key(key),
        }
    }

    /// Encrypts one block.
    #[inline]
    pub fn encrypt(&self, block: &Block) -> Block {
        encrypt_block(block, &self.round_keys)
    }

    /// Decrypts one block.
    #[inline]
    pub fn decrypt(&self, block: &Block) -> Block {
        decrypt_block(block, &self.round_keys)
    }
}
