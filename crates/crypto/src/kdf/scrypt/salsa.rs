//! Salsa20/8 core (RFC 7914 §3).
//!
//! Salsa20/8 is the Salsa20 core reduced to 8 rounds. scrypt only uses it as a
//! mixing function from 64 bytes to 64 bytes, never as a stream cipher.

/// Number of 32-bit words in a block.
pub const BLOCK_WORDS: usize = 16;

/// Number of bytes in a block.
pub const BLOCK_BYTES: usize = BLOCK_WORDS * 4;

/// A 64 byte block as sixteen words. Byte order is little-endian, see
/// [`super::words`] for the conversion from and to bytes.
pub type Block = [u32; BLOCK_WORDS];

const DOUBLE_ROUNDS: usize = 4;

/// Returns the Salsa20/8 core of `input`.
pub fn salsa20_8(input: &Block) -> Block {
    let mut output = *input;
    salsa20_8_in_place(&mut output);
    output
}

/// Replaces `block` with its Salsa20/8 core.
pub fn salsa20_8_in_place(block: &mut Block) {
    let mut x = *block;
    for _ in 0..DOUBLE_ROUNDS {
        // columns
        quarter_round(&mut x, 0, 4, 8, 12);
        quarter_round(&mut x, 5, 9, 13, 1);
        quarter_round(&mut x, 10, 14, 2, 6);
        quarter_round(&mut x, 15, 3, 7, 11);
        // rows
        quarter_round(&mut x, 0, 1, 2, 3);
        quarter_round(&mut x, 5, 6, 7, 4);
        quarter_round(&mut x, 10, 11, 8, 9);
        quarter_round(&mut x, 15, 12, 13, 14);
    }
    block
        .iter_mut()
        .zip(x.iter())
        .for_each(|(b, x)| *b = b.wrapping_add(*x));
}

#[inline(always)]
fn quarter_round(x: &mut Block, a: usize, b: usize, c: usize, d: usize) {
    x[b] ^= x[a].wrapping_add(x[d]).rotate_left(7);
    x[c] ^= x[b].wrapping_add(x[a]).rotate_left(9);
    x[d] ^= x[c].wrapping_add(x[b]).rotate_left(13);
    x[a] ^= x[d].wrapping_add(x[c]).rotate_left(18);
}
