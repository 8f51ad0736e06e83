//! File-header editing: sets one named scalar field on the file header
//! (the handful BCS-A callers actually need to patch out-of-band) and
//! rewrites the file.

use std::path::Path;

use clap::Args;
use nitro_rs::error::{nitf_err, NitfErrorKind};
use nitro_rs::Result;

use crate::common;

#[derive(Debug, Args)]
pub struct EditHeaderArgs {
    /// File header field to set: one of `ftitle`, `ostaid`, `fsclas`.
    #[arg(long)]
    pub field: String,

    /// New value for the field.
    #[arg(long)]
    pub value: String,
}

pub fn run(input: &Path, output: &Path, args: &EditHeaderArgs) -> Result<()> {
    let (mut record, data) = common::load(input)?;

    match args.field.as_str() {
        "ftitle" => record.file_header.set_file_title(&args.value)?,
        "ostaid" => record.file_header.ostaid.set_string(&args.value)?,
        "fsclas" => record.file_header.fsclas.set_string(&args.value)?,
        other => {
            return Err(nitf_err(
                NitfErrorKind::InvalidObject,
                format!("unknown file header field `{other}`; expected ftitle, ostaid or fsclas"),
            ))
        }
    }

    common::save(output, &record, &data)
}
