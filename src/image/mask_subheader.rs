//! The on-wire mask subheader that precedes pixel data when `IC` names a
//! masked scheme (`NM`, `M1`..`M5`, `I1`): `IMDATOFF` (distance from the
//! end of this subheader to the first pixel byte), `BMRLNTH`/`TMRLNTH`/
//! `TPXCDLNTH`, the optional pad-pixel-value record, and the block mask
//! table itself. The transparent-output-pixel-row mask (`TMR`) is skipped
//! rather than interpreted — this crate only needs per-block pad
//! detection, which the block mask record (`BMR`) already gives it via
//! the `0xFFFFFFFF` sentinel.

use std::io::Read;

use crate::error::{nitf_err, NitfErrorKind};
use crate::image::mask::BlockMask;
use crate::Result;

pub struct MaskSubheader {
    pub data_offset: u32,
    pub mask: BlockMask,
    /// `TPXCD`: the declared pad-pixel value, one byte (or multi-byte
    /// per-band value) as it appears on the wire. Empty if `TPXCDLNTH` was
    /// zero (no pad value declared).
    pub pad_pixel: Vec<u8>,
}

fn read_u32_be<R: Read>(r: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)
        .map_err(|e| nitf_err(NitfErrorKind::ReadingFromFile, e.to_string()))?;
    Ok(u32::from_be_bytes(buf))
}

fn read_u16_be<R: Read>(r: &mut R) -> Result<u16> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)
        .map_err(|e| nitf_err(NitfErrorKind::ReadingFromFile, e.to_string()))?;
    Ok(u16::from_be_bytes(buf))
}

impl MaskSubheader {
    pub fn read<R: Read>(r: &mut R, block_count: u64) -> Result<Self> {
        let data_offset = read_u32_be(r)?;
        let bmrlnth = read_u16_be(r)?;
        let tmrlnth = read_u16_be(r)?;
        let tpxcdlnth = read_u16_be(r)?;

        let mut pad_pixel = Vec::new();
        if tpxcdlnth > 0 {
            let pad_bytes = (tpxcdlnth as usize).div_ceil(8);
            pad_pixel = vec![0u8; pad_bytes];
            r.read_exact(&mut pad_pixel)
                .map_err(|e| nitf_err(NitfErrorKind::ReadingFromFile, e.to_string()))?;
        }

        if bmrlnth != 4 {
            return Err(nitf_err(
                NitfErrorKind::Parsing,
                format!("unsupported BMRLNTH {bmrlnth}, expected 4"),
            ));
        }
        let mask = BlockMask::read(r, block_count, 1)?;

        if tmrlnth > 0 {
            let skip = block_count as usize * tmrlnth as usize;
            let mut discard = vec![0u8; skip];
            r.read_exact(&mut discard)
                .map_err(|e| nitf_err(NitfErrorKind::ReadingFromFile, e.to_string()))?;
        }

        Ok(Self { data_offset, mask, pad_pixel })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_shared_block_mask_table() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&20u32.to_be_bytes()); // IMDATOFF
        bytes.extend_from_slice(&4u16.to_be_bytes()); // BMRLNTH
        bytes.extend_from_slice(&0u16.to_be_bytes()); // TMRLNTH
        bytes.extend_from_slice(&0u16.to_be_bytes()); // TPXCDLNTH
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes.extend_from_slice(&0xFFFF_FFFFu32.to_be_bytes());

        let header = MaskSubheader::read(&mut bytes.as_slice(), 2).unwrap();
        assert_eq!(header.data_offset, 20);
        assert_eq!(header.mask.offset(0), Some(0));
        assert_eq!(header.mask.offset(1), None);
        assert!(header.pad_pixel.is_empty());
    }

    #[test]
    fn reads_declared_pad_pixel_value() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&20u32.to_be_bytes()); // IMDATOFF
        bytes.extend_from_slice(&4u16.to_be_bytes()); // BMRLNTH
        bytes.extend_from_slice(&0u16.to_be_bytes()); // TMRLNTH
        bytes.extend_from_slice(&8u16.to_be_bytes()); // TPXCDLNTH (1 byte)
        bytes.push(0xAB); // TPXCD
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes.extend_from_slice(&0xFFFF_FFFFu32.to_be_bytes());

        let header = MaskSubheader::read(&mut bytes.as_slice(), 2).unwrap();
        assert_eq!(header.pad_pixel, vec![0xAB]);
    }
}
