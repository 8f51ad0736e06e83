//! `nitro-tools`: a small CLI for working on a NITF file in place —
//! extracting an image segment, patching a TRE, editing a file-header
//! field, and stripping blank pixel rows. Exit code 0 on success, 1 on
//! any error.

mod common;
mod edit_header;
mod extract_image;
mod modify_tre;
mod strip_blank_rows;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "nitro-tools", about = "Maintenance operations on NITF 2.1 files")]
struct Cli {
    /// Input NITF file.
    input: PathBuf,

    /// Output NITF file.
    output: PathBuf,

    #[command(subcommand)]
    operation: Operation,
}

#[derive(Debug, Subcommand)]
enum Operation {
    /// Dump one image segment's raw pixel bytes to the output file.
    ExtractImage(extract_image::ExtractImageArgs),
    /// Replace or insert a TRE entry in the file header's UDHD block.
    ModifyTre(modify_tre::ModifyTreArgs),
    /// Set a scalar file-header field.
    EditHeader(edit_header::EditHeaderArgs),
    /// Drop blank pixel rows from an image segment.
    StripBlankRows(strip_blank_rows::StripBlankRowsArgs),
}

fn run(cli: &Cli) -> nitro_rs::Result<()> {
    match &cli.operation {
        Operation::ExtractImage(args) => extract_image::run(&cli.input, &cli.output, args),
        Operation::ModifyTre(args) => modify_tre::run(&cli.input, &cli.output, args),
        Operation::EditHeader(args) => edit_header::run(&cli.input, &cli.output, args),
        Operation::StripBlankRows(args) => strip_blank_rows::run(&cli.input, &cli.output, args),
    }
}

fn main() -> ExitCode {
    nitro_rs::logging::init_cli_logging();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
