//! RIPEMD-160
//!
//! Two parallel lines of 80 steps each process every block; their results are
//! combined into the chaining state at the end of the block. Words and the
//! length suffix are little-endian.

use crate::crypto::hash::{md_pad, LengthOrder};

const INITIAL: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

const K_LEFT: [u32; 5] = [0x00000000, 0x5a827999, 0x6ed9eba1, 0x8f1bbcdc, 0xa953fd4e];
const K_RIGHT: [u32; 5] = [0x50a28be6, 0x5c4dd124, 0x6d703ef3, 0x7a6d76e9, 0x00000000];

const WORD_LEFT: [usize; 80] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,
    7, 4, 13, 1, 10, 6, 15, 3, 12, 0, 9, 5, 2, 14, 11, 8,
    3, 10, 14, 4, 9, 15, 8, 1, 2, 7, 0, 6, 13, 11, 5, 12,
    1, 9, 11, 10, 0, 8, 12, 4, 13, 3, 7, 15, 14, 5, 6, 2,
    4, 0, 5, 9, 7, 12, 2, 10, 14, 1, 3, 8, 11, 6, 15, 13,
];

const WORD_RIGHT: [usize; 80] = [
    5, 14, 7, 0, 9, 2, 11, 4, 13, 6, 15, 8, 1, 10, 3, 12,
    6, 11, 3, 7, 0, 13, 5, 10, 14, 15, 8, 12, 4, 9, 1, 2,
    15, 5, 1, 3, 7, 14, 6, 9, 11, 8, 12, 2, 10, 0, 4, 13,
    8, 6, 4, 1, 3, 11, 15, 0, 5, 12, 2, 13, 9, 7, 10, 14,
    12, 15, 10, 4, 1, 5, 8, 7, 6, 2, 13, 14, 0, 3, 9, 11,
];

const SHIFT_LEFT: [u32; 80] = [
    11, 14, 15, 12, 5, 8, 7, 9, 11, 13, 14, 15, 6, 7, 9, 8,
    7, 6, 8, 13, 11, 9, 7, 15, 7, 12, 15, 9, 11, 7, 13, 12,
    11, 13, 6, 7, 14, 9, 13, 15, 14, 8, 13, 6, 5, 12, 7, 5,
    11, 12, 14, 15, 14, 15, 9, 8, 9, 14, 5, 6, 8, 6, 5, 12,
    9, 15, 5, 11, 6, 8, 13, 12, 5, 12, 13, 14, 11, 8, 5, 6,
];

const SHIFT_RIGHT: [u32; 80] = [
    8, 9, 9, 11, 13, 15, 15, 5, 7, 7, 8, 11, 14, 14, 12, 6,
    9, 13, 15, 7, 12, 8, 9, 11, 7, 7, 12, 7, 6, 15, 13, 11,
    9, 7, 15, 11, 8, 6, 6, 14, 12, 13, 5, 14, 13, 13, 7, 5,
    15, 5, 8, 11, 14, 14, 6, 14, 6, 9, 12, 9, 12, 5, 15, 8,
    8, 5, 12, 9, 12, 5, 14, 6, 8, 13, 6, 5, 15, 13, 11, 11,
];

/// Boolean function for one of the five 16-step rounds
fn round_fn(round: usize, x: u32, y: u32, z: u32) -> u32 {
    match round {
        0 => x ^ y ^ z,
        1 => (x & y) | (!x & z),
        2 => (x | !y) ^ z,
        3 => (x & z) | (y & !z),
        _ => x ^ (y | !z),
    }
}

/// Working registers of one line
#[derive(Clone, Copy)]
struct Line {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
    e: u32,
}

impl Line {
    fn from_state(state: &[u32; 5]) -> Self {
        Self {
            a: state[0],
            b: state[1],
            c: state[2],
            d: state[3],
            e: state[4],
        }
    }

    fn step(&mut self, f: u32, word: u32, k: u32, shift: u32) {
        let t = self
            .a
            .wrapping_add(f)
            .wrapping_add(word)
            .wrapping_add(k)
            .rotate_left(shift)
            .wrapping_add(self.e);
        self.a = self.e;
        self.e = self.d;
        self.d = self.c.rotate_left(10);
        self.c = self.b;
        self.b = t;
    }
}

fn compress(state: &mut [u32; 5], block: &[u8]) {
    let mut x = [0u32; 16];
    for (i, word) in block.chunks_exact(4).enumerate() {
        x[i] = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
    }

    let mut left = Line::from_state(state);
    let mut right = Line::from_state(state);

    for j in 0..80 {
        let round = j / 16;

        let f = round_fn(round, left.b, left.c, left.d);
        left.step(f, x[WORD_LEFT[j]], K_LEFT[round], SHIFT_LEFT[j]);

        // The right line runs the boolean functions in reverse order
        let f = round_fn(4 - round, right.b, right.c, right.d);
        right.step(f, x[WORD_RIGHT[j]], K_RIGHT[round], SHIFT_RIGHT[j]);
    }

    let t = state[1].wrapping_add(left.c).wrapping_add(right.d);
    state[1] = state[2].wrapping_add(left.d).wrapping_add(right.e);
    state[2] = state[3].wrapping_add(left.e).wrapping_add(right.a);
    state[3] = state[4].wrapping_add(left.a).wrapping_add(right.b);
    state[4] = state[0].wrapping_add(left.b).wrapping_add(right.c);
    state[0] = t;
}

/// Compute RIPEMD-160 hash of data
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut state = INITIAL;
    for block in md_pad(data, LengthOrder::LittleEndian).chunks_exact(64) {
        compress(&mut state, block);
    }

    let mut hash = [0u8; 20];
    for (out, word) in hash.chunks_exact_mut(4).zip(state.iter()) {
        out.copy_from_slice(&word.to_le_bytes());
    }
    hash
}
