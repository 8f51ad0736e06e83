//! C5: block-indexed image I/O — blocking geometry,
//! the block mask table, sub-window reads, and segment-computed writes.

pub mod blocking;
pub mod mask;
pub mod mask_subheader;
pub mod reader;
pub mod subwindow;
pub mod writer;

pub use blocking::BlockingInfo;
pub use mask::BlockMask;
pub use mask_subheader::MaskSubheader;
pub use reader::ImageReader;
pub use subwindow::SubWindow;
pub use writer::{compute_segments, BandSource, PixelSourceHandler, SegmentPlan, StreamCopyHandler, WriteHandler};
