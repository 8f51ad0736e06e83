//! Shared load/save helpers for the `nitro-tools` subcommands: pull a whole
//! file into a `Record` plus its raw segment payloads, and serialize the
//! pair back out — load the whole file into memory, mutate, re-save.

use std::path::Path;

use nitro_rs::primitives::MemoryChannel;
use nitro_rs::reader::NitfReader;
use nitro_rs::record::Record;
use nitro_rs::writer::{NitfWriter, SegmentData};
use nitro_rs::Result;

pub fn load(path: &Path) -> Result<(Record, SegmentData)> {
    let bytes = std::fs::read(path)?;
    let mut channel = MemoryChannel::new(bytes);
    let mut reader = NitfReader::open(&mut channel)?;

    let mut data = SegmentData::default();
    for i in 0..reader.record.images.len() {
        data.image_data.push(reader.image_segment_bytes(i)?);
    }
    for i in 0..reader.record.graphics.len() {
        data.graphic_data.push(reader.graphic_segment_bytes(i)?);
    }
    for i in 0..reader.record.texts.len() {
        data.text_data.push(reader.text_segment_bytes(i)?);
    }
    for i in 0..reader.record.des.len() {
        data.des_data.push(reader.des_payload_bytes(i)?);
    }
    for i in 0..reader.record.res.len() {
        data.res_data.push(reader.res_segment_bytes(i)?);
    }

    let record = reader.record.clone();
    Ok((record, data))
}

pub fn save(path: &Path, record: &Record, data: &SegmentData) -> Result<()> {
    let mut channel = MemoryChannel::new(Vec::new());
    NitfWriter::write(&mut channel, record, data)?;
    std::fs::write(path, channel.into_inner())?;
    Ok(())
}
