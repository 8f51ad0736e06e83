//! TRE modification: replaces (or appends) one tagged extension entry in
//! the file header's `UDHD` block with caller-supplied raw bytes. The TRE
//! engine is decode-only (see DESIGN.md); authoring a TRE means writing
//! its wire bytes directly rather than re-encoding a decoded tree.

use std::path::Path;

use clap::Args;
use nitro_rs::error::{nitf_err, NitfErrorKind};
use nitro_rs::record::Extensions;
use nitro_rs::Result;

use crate::common;

#[derive(Debug, Args)]
pub struct ModifyTreArgs {
    /// Six-byte (or shorter) CETAG to replace or insert.
    #[arg(long)]
    pub tag: String,

    /// Replacement payload, hex-encoded (e.g. `0102ff`).
    #[arg(long)]
    pub hex_data: String,
}

fn decode_hex(s: &str) -> Result<Vec<u8>> {
    if s.len() % 2 != 0 {
        return Err(nitf_err(NitfErrorKind::Parsing, "hex data must have an even length"));
    }
    (0..s.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&s[i..i + 2], 16)
                .map_err(|e| nitf_err(NitfErrorKind::Parsing, format!("invalid hex byte: {e}")))
        })
        .collect()
}

pub fn run(input: &Path, output: &Path, args: &ModifyTreArgs) -> Result<()> {
    let (mut record, data) = common::load(input)?;
    let new_data = decode_hex(&args.hex_data)?;

    let mut rebuilt = Extensions::new();
    let mut replaced = false;
    for entry in record.file_header.extensions.iter() {
        if entry.tag == args.tag {
            rebuilt.push(entry.tag.clone(), new_data.clone())?;
            replaced = true;
        } else {
            rebuilt.push(entry.tag.clone(), entry.data.clone())?;
        }
    }
    if !replaced {
        rebuilt.push(args.tag.clone(), new_data)?;
    }
    record.file_header.extensions = rebuilt;

    common::save(output, &record, &data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_hex_pairs() {
        assert_eq!(decode_hex("0102ff").unwrap(), vec![0x01, 0x02, 0xff]);
    }

    #[test]
    fn rejects_odd_length_hex() {
        assert!(decode_hex("abc").is_err());
    }
}
