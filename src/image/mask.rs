//! The block mask table: per-block file offsets, where
//! `PAD_SENTINEL` marks a block that was never written and reads back as
//! the subheader's pad pixel value.

use std::io::Read;

use crate::error::{nitf_err, NitfErrorKind};
use crate::Result;

pub const PAD_SENTINEL: u32 = 0xFFFF_FFFF;

#[derive(Debug, Clone)]
pub struct BlockMask {
    offsets: Vec<u32>,
}

impl BlockMask {
    /// A mask with every block present, in block order, contiguous from
    /// offset zero — the implicit table for uncompressed, unmasked
    /// imagery (`IC` of `NC`).
    pub fn all_present(block_count: u64, block_size: u64) -> Self {
        let offsets = (0..block_count)
            .map(|i| (i * block_size) as u32)
            .collect();
        Self { offsets }
    }

    /// Reads the on-the-wire mask table (`IC` of `NM`/`M1`.. or any masked
    /// compression scheme): one big-endian `u32` offset per block, per
    /// band when the scheme is band-sequential.
    pub fn read<R: Read>(r: &mut R, block_count: u64, nbands: u32) -> Result<Self> {
        let entries = block_count * u64::from(nbands.max(1));
        let mut offsets = Vec::with_capacity(entries as usize);
        for _ in 0..entries {
            let mut buf = [0u8; 4];
            r.read_exact(&mut buf)
                .map_err(|e| nitf_err(NitfErrorKind::ReadingFromFile, e.to_string()))?;
            offsets.push(u32::from_be_bytes(buf));
        }
        Ok(Self { offsets })
    }

    pub fn offset(&self, index: u64) -> Option<u32> {
        match self.offsets.get(index as usize) {
            Some(&PAD_SENTINEL) | None => None,
            Some(&off) => Some(off),
        }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_present_has_no_pad_blocks() {
        let mask = BlockMask::all_present(4, 64);
        assert_eq!(mask.offset(0), Some(0));
        assert_eq!(mask.offset(3), Some(192));
    }

    #[test]
    fn sentinel_reads_back_as_absent() {
        let bytes = [0xFFu8, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x40];
        let mask = BlockMask::read(&mut bytes.as_slice(), 2, 1).unwrap();
        assert_eq!(mask.offset(0), None);
        assert_eq!(mask.offset(1), Some(0x40));
    }
}
