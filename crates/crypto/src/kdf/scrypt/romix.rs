//! ROMix (RFC 7914 §5), the memory-hard part of scrypt.

use std::mem;
use zeroize::Zeroize;

use super::block_mix::{BlockGroup, block_mix_into};
use super::error::{ParameterError, ScryptError};
use super::salsa::{BLOCK_BYTES, Block};

/// Checks that `n` is a valid ROMix cost factor, i.e. a power of two larger than 1.
pub fn validate_cost(n: u64) -> Result<(), ParameterError> {
    if n <= 1 {
        return Err(ParameterError::CostTooSmall { n });
    }
    if !n.is_power_of_two() {
        return Err(ParameterError::CostNotPowerOfTwo { n });
    }
    Ok(())
}

/// Replaces `group` with ROMix_{BlockMix, N}(`group`).
///
/// The memory table of `N` block groups lives only for the duration of this call
/// and is zeroed before it's freed. If it can't be allocated, this fails with
/// [`ScryptError::ResourceExhaustion`] and `group` is left unchanged.
pub fn romix(group: &mut BlockGroup, n: u64) -> Result<(), ScryptError> {
    validate_cost(n)?;
    let mut table = MemoryTable::allocate(n, group.r())?;
    let mut scratch = BlockGroup::zeroed(group.r());

    for _ in 0..n {
        table.push(group);
        block_mix_into(group, &mut scratch);
        mem::swap(group, &mut scratch);
    }

    let mask = n - 1;
    for _ in 0..n {
        let j = group.integerify() & mask;
        group.xor_assign(table.get(j));
        block_mix_into(group, &mut scratch);
        mem::swap(group, &mut scratch);
    }

    Ok(())
}

/// The `V` array of ROMix: `N` block groups stored back to back.
struct MemoryTable {
    blocks: Vec<Block>,
    blocks_per_group: usize,
}

impl MemoryTable {
    fn allocate(n: u64, r: usize) -> Result<Self, ScryptError> {
        let blocks_per_group = 2 * r;
        let num_blocks = usize::try_from(n)
            .ok()
            .and_then(|n| n.checked_mul(blocks_per_group))
            .ok_or(ScryptError::ResourceExhaustion {
                bytes: u128::from(n) * (blocks_per_group * BLOCK_BYTES) as u128,
            })?;
        Ok(Self {
            blocks: try_with_capacity(num_blocks)?,
            blocks_per_group,
        })
    }

    fn push(&mut self, group: &BlockGroup) {
        debug_assert!(self.blocks.len() + self.blocks_per_group <= self.blocks.capacity());
        self.blocks.extend_from_slice(group.blocks());
    }

    fn get(&self, index: u64) -> &[Block] {
        // index < N and allocate() checked that N * 2r fits into usize
        let start = index as usize * self.blocks_per_group;
        &self.blocks[start..start + self.blocks_per_group]
    }
}

impl Drop for MemoryTable {
    fn drop(&mut self) {
        self.blocks.zeroize();
    }
}

/// Creates an empty vector with room for exactly `len` elements, reporting
/// allocation failure as [`ScryptError::ResourceExhaustion`] instead of aborting.
pub(super) fn try_with_capacity<T>(len: usize) -> Result<Vec<T>, ScryptError> {
    let mut vec = Vec::new();
    vec.try_reserve_exact(len)
        .map_err(|_| ScryptError::ResourceExhaustion {
            bytes: len as u128 * size_of::<T>() as u128,
        })?;
    Ok(vec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    // RFC 7914 §10, r = 1, N = 16
    const RFC_INPUT: &str = concat!(
        "f7ce0b653d2d72a4108cf5abe912ffdd777616dbbb27a70e8204f3ae2d0f6fad",
        "89f68f4811d1e87bcc3bd7400a9ffd29094f0184639574f39ae5a1315217bcd7",
        "894991447213bb226c25b54da86370fbcd984380374666bb8ffcb5bf40c254b0",
        "67d27c51ce4ad5fed829c90b505a571b7f4d1cad6a523cda770e67bceaaf7e89",
    );
    const RFC_OUTPUT: &str = concat!(
        "79ccc193629debca047f0b70604bf6b62ce3dd4a9626e355fafc6198e6ea2b46",
        "d58413673b99b029d665c357601fb426a0b2f4bba200ee9f0a43d19b571a9c71",
        "ef1142e65d5a266fddca832ce59faa7cac0b9cf1be2bffca300d01ee387619c4",
        "ae12fd4438f203a0e4e1c47ec314861f4e9087cb33396a6873e8f9d2539a4b8e",
    );

    fn rfc_input() -> BlockGroup {
        BlockGroup::from_le_bytes(&hex::decode(RFC_INPUT).unwrap()).unwrap()
    }

    #[test]
    fn rfc7914_test_vector() {
        let mut group = rfc_input();
        romix(&mut group, 16).unwrap();
        assert_eq!(RFC_OUTPUT, hex::encode(group.to_le_bytes()));
    }

    #[test]
    fn is_deterministic() {
        let mut a = rfc_input();
        let mut b = rfc_input();
        romix(&mut a, 32).unwrap();
        romix(&mut b, 32).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn cost_changes_output() {
        let mut a = rfc_input();
        let mut b = rfc_input();
        romix(&mut a, 16).unwrap();
        romix(&mut b, 32).unwrap();
        assert_ne!(a, b);
    }

    #[rstest]
    #[case(0, ParameterError::CostTooSmall { n: 0 })]
    #[case(1, ParameterError::CostTooSmall { n: 1 })]
    #[case(3, ParameterError::CostNotPowerOfTwo { n: 3 })]
    #[case(100, ParameterError::CostNotPowerOfTwo { n: 100 })]
    #[case(u64::MAX, ParameterError::CostNotPowerOfTwo { n: u64::MAX })]
    fn rejects_invalid_cost(#[case] n: u64, #[case] expected: ParameterError) {
        assert_eq!(Err(expected.clone()), validate_cost(n));

        let mut group = rfc_input();
        let Err(ScryptError::InvalidParameter(err)) = romix(&mut group, n) else {
            panic!("romix must reject N={n}");
        };
        assert_eq!(expected, err);
        // Rejected before any work is done
        assert_eq!(rfc_input(), group);
    }

    #[rstest]
    fn accepts_powers_of_two(#[values(2, 4, 1024, 1 << 40, 1 << 63)] n: u64) {
        assert_eq!(Ok(()), validate_cost(n));
    }

    #[test]
    fn unallocatable_table_is_reported() {
        let mut group = rfc_input();
        let Err(ScryptError::ResourceExhaustion { bytes }) = romix(&mut group, 1 << 62) else {
            panic!("allocating 2^69 bytes must fail");
        };
        assert_eq!(128 << 62, bytes);
        assert_eq!(rfc_input(), group);
    }
}
