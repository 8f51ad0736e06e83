// `forbid` everywhere except the one opt-in feature whose whole job is an
// unsafe FFI boundary (`dynamic_plugins`'s `libloading` calls, isolated in
// `primitives::plugin_loader`) — `forbid` can't be locally overridden, so a
// plain crate-wide `forbid` would make that feature uncompilable.
#![cfg_attr(not(feature = "dynamic-plugins"), forbid(unsafe_code))]
#![cfg_attr(feature = "dynamic-plugins", deny(unsafe_code))]
//! NITF 2.1 container engine, TRE mini-compiler, block-indexed image I/O,
//! and SICD/SIDD/CPHD metadata transcoding.
//!
//! The crate is organized in six layers: C1 primitives, C2 the field
//! layer, C3 the record model, C4 the TRE engine, C5 image I/O, C6 the
//! product layer. Read flows bytes -> primitives -> record (subheaders
//! parsed via fields) -> TRE decode per extension block -> the
//! product-level `NitfReader` exposes the record and per-segment
//! accessors -> `image::ImageReader` streams pixel blocks on demand. Write
//! reverses this.

pub mod compression;
pub mod error;
pub mod field;
pub mod image;
pub mod logging;
pub mod primitives;
pub mod product;
pub mod reader;
pub mod record;
pub mod tre;
pub mod writer;

pub use error::{NitfError, NitfErrorKind};
pub use reader::NitfReader;
pub use writer::NitfWriter;

/// The crate-wide fallible return type; every public API returns this.
pub type Result<T> = anyhow::Result<T>;

/// NITF segment-size ceiling: a single image segment may not exceed this
/// many bytes.
pub const IS_SIZE_MAX: u64 = 10_737_418_240 - 1;

/// NITF row-offset ceiling for a stacked image segment's ILOC field.
pub const ILOC_MAX: u32 = 99_999;

/// Hard cap on the number of segments of any one kind.
pub const SEGMENT_COUNT_MAX: u32 = 99_999;

#[cfg(test)]
mod tests {
    #[test]
    fn constants_match_spec() {
        assert_eq!(super::ILOC_MAX, 99_999);
        assert_eq!(super::SEGMENT_COUNT_MAX, 99_999);
    }
}
