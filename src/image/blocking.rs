//! Block-grid geometry derived from an image subheader.

use crate::error::{nitf_err, NitfErrorKind};
use crate::record::ImageSubheader;
use crate::Result;

#[derive(Debug, Clone, Copy)]
pub struct BlockingInfo {
    pub nbpr: u32,
    pub nbpc: u32,
    pub nppbh: u32,
    pub nppbv: u32,
    pub nbands: u32,
    pub bytes_per_pixel: u32,
}

impl BlockingInfo {
    pub fn from_subheader(sub: &ImageSubheader) -> Result<Self> {
        let nbpr = sub.nbpr.as_uint()? as u32;
        let nbpc = sub.nbpc.as_uint()? as u32;
        let nppbh = sub.nppbh.as_uint()? as u32;
        let nppbv = sub.nppbv.as_uint()? as u32;
        let nbands = sub.nbands.as_uint()? as u32;
        let nbpp = sub.bits_per_pixel()? as u32;
        if nbpr == 0 || nbpc == 0 || nppbh == 0 || nppbv == 0 {
            return Err(nitf_err(
                NitfErrorKind::InvalidObject,
                "blocking fields must all be non-zero",
            ));
        }
        Ok(Self {
            nbpr,
            nbpc,
            nppbh,
            nppbv,
            nbands,
            bytes_per_pixel: nbpp.div_ceil(8).max(1),
        })
    }

    pub fn block_count(&self) -> u64 {
        u64::from(self.nbpr) * u64::from(self.nbpc)
    }

    pub fn block_index(&self, block_row: u32, block_col: u32) -> u64 {
        u64::from(block_row) * u64::from(self.nbpr) + u64::from(block_col)
    }

    pub fn block_size_bytes(&self) -> u64 {
        u64::from(self.nppbh) * u64::from(self.nppbv) * u64::from(self.bytes_per_pixel)
    }

    pub fn image_rows(&self) -> u64 {
        u64::from(self.nbpc) * u64::from(self.nppbv)
    }

    pub fn image_cols(&self) -> u64 {
        u64::from(self.nbpr) * u64::from(self.nppbh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_index_is_row_major() {
        let info = BlockingInfo {
            nbpr: 4,
            nbpc: 3,
            nppbh: 8,
            nppbv: 8,
            nbands: 1,
            bytes_per_pixel: 1,
        };
        assert_eq!(info.block_index(0, 0), 0);
        assert_eq!(info.block_index(1, 0), 4);
        assert_eq!(info.block_index(2, 3), 11);
    }
}
