//! Blank-row stripping: drops every row of an image segment whose bytes
//! are all equal to a caller-supplied pad value, then rewrites the segment
//! with `NROWS` shrunk to match. Operates on the whole-segment buffer, so
//! it only applies to single-block, pixel-interleaved segments — the same
//! simplification the writer/reader already make for uncompressed imagery.

use std::path::Path;

use clap::Args;
use nitro_rs::error::{nitf_err, NitfErrorKind};
use nitro_rs::image::BlockingInfo;
use nitro_rs::Result;

use crate::common;

#[derive(Debug, Args)]
pub struct StripBlankRowsArgs {
    /// Index of the image segment to strip rows from.
    #[arg(long, default_value_t = 0)]
    pub index: usize,

    /// Byte value that marks a row as blank (every byte in the row must
    /// equal this value for the row to be dropped).
    #[arg(long, default_value_t = 0)]
    pub pad_byte: u8,
}

pub fn run(input: &Path, output: &Path, args: &StripBlankRowsArgs) -> Result<()> {
    let (mut record, mut data) = common::load(input)?;

    let sub = record
        .images
        .get_mut(args.index)
        .ok_or_else(|| nitf_err(NitfErrorKind::OutOfRange, format!("no image segment {}", args.index)))?;
    let blocking = BlockingInfo::from_subheader(sub)?;
    let ncols = sub.cols()? as usize;
    let nbands = sub.nbands.as_uint()? as usize;
    let row_bytes = ncols * blocking.bytes_per_pixel as usize * nbands.max(1);
    if row_bytes == 0 {
        return Err(nitf_err(NitfErrorKind::InvalidObject, "image segment has zero row width"));
    }

    let pixels = data
        .image_data
        .get_mut(args.index)
        .ok_or_else(|| nitf_err(NitfErrorKind::OutOfRange, format!("no image segment {}", args.index)))?;

    let (kept, rows_kept) = strip_rows(pixels, row_bytes, args.pad_byte);
    *pixels = kept;
    sub.nrows.set_uint(rows_kept)?;

    common::save(output, &record, &data)
}

fn strip_rows(pixels: &[u8], row_bytes: usize, pad_byte: u8) -> (Vec<u8>, u64) {
    let mut kept = Vec::with_capacity(pixels.len());
    let mut rows_kept = 0u64;
    for row in pixels.chunks(row_bytes) {
        if row.iter().all(|&b| b == pad_byte) {
            continue;
        }
        kept.extend_from_slice(row);
        rows_kept += 1;
    }
    (kept, rows_kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_rows_that_are_entirely_pad_bytes() {
        let pixels = [0u8, 0, 0, 0, 7, 7, 7, 7, 0, 0, 0, 0];
        let (kept, rows_kept) = strip_rows(&pixels, 4, 0);
        assert_eq!(rows_kept, 1);
        assert_eq!(kept, vec![7, 7, 7, 7]);
    }

    #[test]
    fn keeps_every_row_when_none_are_blank() {
        let pixels = [1u8, 2, 3, 4];
        let (kept, rows_kept) = strip_rows(&pixels, 4, 0);
        assert_eq!(rows_kept, 1);
        assert_eq!(kept, pixels);
    }
}
