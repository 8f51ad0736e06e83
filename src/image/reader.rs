//! Block-indexed pixel reads: blocks are fetched by
//! grid coordinate through the mask table, and a `SubWindow` read
//! reassembles whichever blocks it overlaps, substituting the pad pixel
//! for any block the mask marks absent.

use crate::error::{nitf_err, NitfErrorKind};
use crate::image::{BlockMask, BlockingInfo, SubWindow};
use crate::primitives::{ByteChannel, Whence};
use crate::Result;

pub struct ImageReader<'a> {
    channel: &'a mut dyn ByteChannel,
    blocking: BlockingInfo,
    mask: BlockMask,
    data_offset: u64,
    pad_pixel: Vec<u8>,
}

impl<'a> ImageReader<'a> {
    pub fn new(
        channel: &'a mut dyn ByteChannel,
        blocking: BlockingInfo,
        mask: BlockMask,
        data_offset: u64,
        pad_pixel: Vec<u8>,
    ) -> Self {
        Self {
            channel,
            blocking,
            mask,
            data_offset,
            pad_pixel,
        }
    }

    fn pad_block(&self) -> Vec<u8> {
        let size = self.blocking.block_size_bytes() as usize;
        if self.pad_pixel.is_empty() {
            return vec![0u8; size];
        }
        self.pad_pixel.iter().copied().cycle().take(size).collect()
    }

    /// Reads one block verbatim; pad blocks return synthesized pad bytes
    /// rather than touching the channel.
    pub fn read_block(&mut self, block_row: u32, block_col: u32) -> Result<Vec<u8>> {
        if block_row >= self.blocking.nbpc || block_col >= self.blocking.nbpr {
            return Err(nitf_err(
                NitfErrorKind::OutOfRange,
                format!("block ({block_row}, {block_col}) outside the block grid"),
            ));
        }
        let index = self.blocking.block_index(block_row, block_col);
        match self.mask.offset(index) {
            None => Ok(self.pad_block()),
            Some(offset) => {
                self.channel
                    .seek((self.data_offset + u64::from(offset)) as i64, Whence::Start)?;
                let size = self.blocking.block_size_bytes() as usize;
                let mut buf = vec![0u8; size];
                self.channel.read_exact(&mut buf)?;
                Ok(buf)
            }
        }
    }

    /// Reassembles a sub-window by reading every block it overlaps and
    /// copying the overlapping pixel rows out of each.
    pub fn read(&mut self, window: &SubWindow) -> Result<Vec<u8>> {
        let bpp = self.blocking.bytes_per_pixel as u64;
        let row_bytes = window.num_cols * bpp;
        let mut out = vec![0u8; (window.num_rows * row_bytes) as usize];

        let first_block_row = window.start_row / u64::from(self.blocking.nppbv);
        let last_block_row = (window.end_row() - 1) / u64::from(self.blocking.nppbv);
        let first_block_col = window.start_col / u64::from(self.blocking.nppbh);
        let last_block_col = (window.end_col() - 1) / u64::from(self.blocking.nppbh);

        for block_row in first_block_row..=last_block_row {
            for block_col in first_block_col..=last_block_col {
                let block = self.read_block(block_row as u32, block_col as u32)?;
                let block_row_origin = block_row * u64::from(self.blocking.nppbv);
                let block_col_origin = block_col * u64::from(self.blocking.nppbh);
                let block_row_bytes = u64::from(self.blocking.nppbh) * bpp;

                for local_row in 0..u64::from(self.blocking.nppbv) {
                    let abs_row = block_row_origin + local_row;
                    if abs_row < window.start_row || abs_row >= window.end_row() {
                        continue;
                    }
                    for local_col in 0..u64::from(self.blocking.nppbh) {
                        let abs_col = block_col_origin + local_col;
                        if abs_col < window.start_col || abs_col >= window.end_col() {
                            continue;
                        }
                        let src = (local_row * block_row_bytes + local_col * bpp) as usize;
                        let dst_row = abs_row - window.start_row;
                        let dst_col = abs_col - window.start_col;
                        let dst = (dst_row * row_bytes + dst_col * bpp) as usize;
                        out[dst..dst + bpp as usize]
                            .copy_from_slice(&block[src..src + bpp as usize]);
                    }
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::MemoryChannel;

    fn blocking() -> BlockingInfo {
        BlockingInfo {
            nbpr: 2,
            nbpc: 2,
            nppbh: 2,
            nppbv: 2,
            nbands: 1,
            bytes_per_pixel: 1,
        }
    }

    #[test]
    fn masked_block_reads_back_as_pad() {
        let info = blocking();
        let mask = crate::image::mask::BlockMask::read(
            &mut [0xFFu8, 0xFF, 0xFF, 0xFF, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 8].as_slice(),
            4,
            1,
        )
        .unwrap();
        let mut data = vec![0u8; 64];
        for (i, b) in data.iter_mut().enumerate() {
            *b = i as u8;
        }
        let mut channel = MemoryChannel::new(data);
        let mut reader = ImageReader::new(&mut channel, info, mask, 0, vec![0x99]);
        let block = reader.read_block(0, 0).unwrap();
        assert_eq!(block, vec![0x99, 0x99, 0x99, 0x99]);
    }
}
