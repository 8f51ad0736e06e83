//! Image extraction: dumps one image segment's raw pixel bytes to a file,
//! bypassing any further product-layer interpretation.

use std::path::Path;

use clap::Args;
use nitro_rs::error::{nitf_err, NitfErrorKind};
use nitro_rs::Result;

use crate::common;

#[derive(Debug, Args)]
pub struct ExtractImageArgs {
    /// Index of the image segment to extract (0-based, file order).
    #[arg(long, default_value_t = 0)]
    pub index: usize,
}

pub fn run(input: &Path, output: &Path, args: &ExtractImageArgs) -> Result<()> {
    let (_record, data) = common::load(input)?;
    let bytes = data.image_data.get(args.index).ok_or_else(|| {
        nitf_err(
            NitfErrorKind::OutOfRange,
            format!("no image segment {}", args.index),
        )
    })?;
    std::fs::write(output, bytes)?;
    Ok(())
}
