//! BlockMix (RFC 7914 §4) and the [`BlockGroup`] it operates on.

use zeroize::Zeroize;

use super::error::ParameterError;
use super::salsa::{BLOCK_BYTES, BLOCK_WORDS, Block, salsa20_8_in_place};
use super::words;

/// `2r` consecutive 64 byte blocks, i.e. the `B` that BlockMix and ROMix work on.
///
/// The contents are intermediate key material and are zeroed on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct BlockGroup {
    blocks: Box<[Block]>,
}

impl BlockGroup {
    /// A group of `2r` zero blocks.
    ///
    /// Panics if `r` is 0.
    pub fn zeroed(r: usize) -> Self {
        assert!(r > 0, "Block size factor r must be positive");
        Self {
            blocks: vec![[0; BLOCK_WORDS]; 2 * r].into_boxed_slice(),
        }
    }

    /// Builds a group from blocks. The number of blocks must be positive and even.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self, ParameterError> {
        if blocks.is_empty() || blocks.len() % 2 != 0 {
            return Err(ParameterError::MalformedBlockGroup {
                bytes: blocks.len() * BLOCK_BYTES,
            });
        }
        Ok(Self {
            blocks: blocks.into_boxed_slice(),
        })
    }

    /// Reads a group from little-endian bytes. The length must be a positive multiple of 128.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, ParameterError> {
        if bytes.is_empty() || bytes.len() % (2 * BLOCK_BYTES) != 0 {
            return Err(ParameterError::MalformedBlockGroup { bytes: bytes.len() });
        }
        let mut group = Self::zeroed(bytes.len() / (2 * BLOCK_BYTES));
        words::read_blocks(bytes, &mut group.blocks);
        Ok(group)
    }

    /// Writes the group as little-endian bytes into `bytes`, which must be exactly `128 * r` long.
    pub fn write_le_bytes(&self, bytes: &mut [u8]) {
        words::write_blocks(&self.blocks, bytes);
    }

    /// The group as `128 * r` little-endian bytes.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0; self.blocks.len() * BLOCK_BYTES];
        self.write_le_bytes(&mut bytes);
        bytes
    }

    /// The block size factor `r`, i.e. half the number of blocks.
    pub fn r(&self) -> usize {
        self.blocks.len() / 2
    }

    /// The `2r` blocks of the group.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// XORs `other` word-wise into this group. `other` must have the same number of blocks.
    pub fn xor_assign(&mut self, other: &[Block]) {
        assert_eq!(self.blocks.len(), other.len(), "Block groups differ in size");
        for (block, other) in self.blocks.iter_mut().zip(other) {
            xor_block(block, other);
        }
    }

    /// Integerify(B) from RFC 7914 §5: the last block read as a little-endian integer.
    ///
    /// ROMix only needs this modulo `N <= 2^64`, so only the low 64 bits are returned.
    pub fn integerify(&self) -> u64 {
        let last = &self.blocks[self.blocks.len() - 1];
        u64::from(last[0]) | (u64::from(last[1]) << 32)
    }
}

impl std::fmt::Debug for BlockGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BlockGroup(r={})", self.r())
    }
}

impl Drop for BlockGroup {
    fn drop(&mut self) {
        self.blocks.iter_mut().for_each(Zeroize::zeroize);
    }
}

/// BlockMix_{Salsa20/8, r}(`input`), returned as a new group.
pub fn block_mix(input: &BlockGroup) -> BlockGroup {
    let mut output = BlockGroup::zeroed(input.r());
    block_mix_into(input, &mut output);
    output
}

/// BlockMix_{Salsa20/8, r}(`input`), written into `output`.
///
/// Even-indexed intermediate blocks go to the first half of `output`,
/// odd-indexed ones to the second half:
/// `B' = (Y_0, Y_2, ..., Y_{2r-2}, Y_1, Y_3, ..., Y_{2r-1})`.
pub fn block_mix_into(input: &BlockGroup, output: &mut BlockGroup) {
    assert_eq!(input.r(), output.r(), "Block groups differ in size");
    let r = input.r();
    let mut x = input.blocks[2 * r - 1];
    for (i, block) in input.blocks.iter().enumerate() {
        xor_block(&mut x, block);
        salsa20_8_in_place(&mut x);
        let target = if i % 2 == 0 { i / 2 } else { r + (i - 1) / 2 };
        output.blocks[target] = x;
    }
    x.zeroize();
}

#[inline(always)]
fn xor_block(block: &mut Block, other: &Block) {
    block.iter_mut().zip(other).for_each(|(a, b)| *a ^= b);
}
