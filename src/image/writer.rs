//! Image segment writing: the segment computer splits
//! an oversized image across multiple stacked segments before any bytes
//! are written, and a `WriteHandler` streams each segment's pixel data.

use crate::error::{nitf_err, NitfErrorKind};
use crate::image::BlockingInfo;
use crate::primitives::ByteChannel;
use crate::Result;
use crate::{ILOC_MAX, IS_SIZE_MAX};

/// One row-range of an oversized image that must become its own stacked
/// image segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentPlan {
    pub row_offset: u64,
    pub num_rows: u64,
}

/// Partitions `total_rows` rows of `bytes_per_row` each into segments that
/// respect both `IS_SIZE_MAX` and `ILOC_MAX`.
pub fn compute_segments(total_rows: u64, bytes_per_row: u64) -> Vec<SegmentPlan> {
    if total_rows == 0 {
        return Vec::new();
    }
    let rows_by_size = if bytes_per_row == 0 {
        u64::MAX
    } else {
        (IS_SIZE_MAX / bytes_per_row).max(1)
    };
    let rows_per_segment = rows_by_size.min(u64::from(ILOC_MAX)).max(1);

    let mut plans = Vec::new();
    let mut offset = 0;
    while offset < total_rows {
        let rows = rows_per_segment.min(total_rows - offset);
        plans.push(SegmentPlan {
            row_offset: offset,
            num_rows: rows,
        });
        offset += rows;
    }
    plans
}

/// A source of one band's pixel rows, used by `PixelSourceHandler` so the
/// writer never needs the whole image resident in memory at once.
pub trait BandSource {
    fn read_row(&mut self, row: u64, band: u32, buf: &mut [u8]) -> Result<()>;
}

/// Writes one image segment's pixel data to a channel.
pub trait WriteHandler {
    fn write_segment(
        &mut self,
        channel: &mut dyn ByteChannel,
        blocking: &BlockingInfo,
        plan: &SegmentPlan,
    ) -> Result<()>;
}

/// Copies already-blocked bytes through unchanged — used when the caller
/// already has the segment's on-the-wire bytes (e.g. re-packaging an
/// existing NITF without touching pixels).
pub struct StreamCopyHandler<'a> {
    pub bytes: &'a [u8],
}

impl WriteHandler for StreamCopyHandler<'_> {
    fn write_segment(
        &mut self,
        channel: &mut dyn ByteChannel,
        _blocking: &BlockingInfo,
        _plan: &SegmentPlan,
    ) -> Result<()> {
        channel.write_all(self.bytes)
    }
}

/// Streams pixel rows out of a `BandSource`, blocking them on the fly
/// band-sequential (IMODE `B`/`S`-style), row-major within each block.
pub struct PixelSourceHandler<B: BandSource> {
    pub source: B,
}

impl<B: BandSource> WriteHandler for PixelSourceHandler<B> {
    fn write_segment(
        &mut self,
        channel: &mut dyn ByteChannel,
        blocking: &BlockingInfo,
        plan: &SegmentPlan,
    ) -> Result<()> {
        let row_bytes = u64::from(blocking.nppbh) * u64::from(blocking.bytes_per_pixel);
        let mut row_buf = vec![0u8; row_bytes as usize];
        for band in 0..blocking.nbands.max(1) {
            for r in 0..plan.num_rows {
                self.source
                    .read_row(plan.row_offset + r, band, &mut row_buf)?;
                channel.write_all(&row_buf)?;
            }
        }
        Ok(())
    }
}

pub fn validate_segment_count(count: usize) -> Result<()> {
    if count as u32 >= crate::SEGMENT_COUNT_MAX {
        return Err(nitf_err(
            NitfErrorKind::OutOfRange,
            format!("image segment count would exceed {}", crate::SEGMENT_COUNT_MAX),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_image_fits_one_segment() {
        let plans = compute_segments(1000, 100);
        assert_eq!(plans, vec![SegmentPlan { row_offset: 0, num_rows: 1000 }]);
    }

    #[test]
    fn oversized_image_splits_on_iloc_max() {
        let plans = compute_segments(200_000, 1);
        assert!(plans.len() >= 2);
        assert!(plans.iter().all(|p| p.num_rows <= u64::from(ILOC_MAX)));
        let total: u64 = plans.iter().map(|p| p.num_rows).sum();
        assert_eq!(total, 200_000);
    }

    #[test]
    fn huge_rows_split_on_is_size_max() {
        let bytes_per_row = 2_000_000u64;
        let plans = compute_segments(10_000, bytes_per_row);
        for p in &plans {
            assert!(p.num_rows * bytes_per_row <= IS_SIZE_MAX);
        }
    }
}
