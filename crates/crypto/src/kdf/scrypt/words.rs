//! Conversion between byte buffers and [`Block`]s.
//!
//! scrypt packs bytes into 32-bit words in little-endian order regardless of
//! the host's endianness. All reinterpretation between the PBKDF2 byte
//! output and the word-oriented mixing functions goes through here.

use super::salsa::{BLOCK_BYTES, BLOCK_WORDS, Block};

/// Reads one block from 64 little-endian bytes.
pub fn block_from_le_bytes(bytes: &[u8; BLOCK_BYTES]) -> Block {
    let mut block = [0; BLOCK_WORDS];
    read_block(bytes, &mut block);
    block
}

/// Writes one block as 64 little-endian bytes.
pub fn block_to_le_bytes(block: &Block) -> [u8; BLOCK_BYTES] {
    let mut bytes = [0; BLOCK_BYTES];
    write_block(block, &mut bytes);
    bytes
}

/// Reads `blocks.len()` consecutive blocks from `bytes`.
///
/// `bytes` must hold exactly `64 * blocks.len()` bytes.
pub(super) fn read_blocks(bytes: &[u8], blocks: &mut [Block]) {
    assert_eq!(
        bytes.len(),
        blocks.len() * BLOCK_BYTES,
        "Byte buffer doesn't match the number of blocks"
    );
    for (block, chunk) in blocks.iter_mut().zip(bytes.chunks_exact(BLOCK_BYTES)) {
        read_block(chunk, block);
    }
}

/// Writes `blocks` into `bytes`, which must hold exactly `64 * blocks.len()` bytes.
pub(super) fn write_blocks(blocks: &[Block], bytes: &mut [u8]) {
    assert_eq!(
        bytes.len(),
        blocks.len() * BLOCK_BYTES,
        "Byte buffer doesn't match the number of blocks"
    );
    for (block, chunk) in blocks.iter().zip(bytes.chunks_exact_mut(BLOCK_BYTES)) {
        write_block(block, chunk);
    }
}

fn read_block(bytes: &[u8], block: &mut Block) {
    for (word, chunk) in block.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
}

fn write_block(block: &Block, bytes: &mut [u8]) {
    for (word, chunk) in block.iter().zip(bytes.chunks_exact_mut(4)) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
}
