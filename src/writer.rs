//! The top-level `NitfWriter` façade:
//! the mirror image of [`crate::reader::NitfReader`]. Serializes the file
//! header, rederives every length-table field from `Record`'s segment
//! `Vec`s and the caller-supplied segment payloads, then writes each
//! subheader followed by its data in file order. Only the implicit
//! all-present blocking is emitted — producing a masked image segment is a
//! read-side capability this crate ingests but does not author.

use crate::error::nitf_err;
use crate::field::{Field, FieldKind};
use crate::primitives::{ByteChannel, ChannelIo};
use crate::record::{Extensions, NitfWrite, Record};
use crate::Result;

fn write_count(channel: &mut dyn ByteChannel, value: u64, width: usize) -> Result<()> {
    let mut field = Field::new(FieldKind::BcsN, width);
    field.set_uint(value)?;
    let mut io = ChannelIo::new(channel);
    io.write_field(&field)
}

fn write_extension_block(channel: &mut dyn ByteChannel, extensions: &Extensions) -> Result<()> {
    if extensions.is_empty() {
        write_count(channel, 0, 5)?;
        return Ok(());
    }
    let body = extensions.encode();
    write_count(channel, 3 + body.len() as u64, 5)?;
    write_count(channel, 0, 3)?;
    channel.write_all(&body)
}

/// The raw per-segment payloads a [`Record`] doesn't itself carry: pixel
/// streams, CGM graphic data, free text, DES data, and RES data, aligned
/// index-for-index with `record.images`/`record.graphics`/etc.
#[derive(Debug, Clone, Default)]
pub struct SegmentData {
    pub image_data: Vec<Vec<u8>>,
    pub graphic_data: Vec<Vec<u8>>,
    pub text_data: Vec<Vec<u8>>,
    pub des_data: Vec<Vec<u8>>,
    pub res_data: Vec<Vec<u8>>,
}

fn check_lengths(label: &str, segments: usize, payloads: usize) -> Result<()> {
    if segments != payloads {
        return Err(nitf_err(
            crate::NitfErrorKind::InvalidObject,
            format!("{label}: {segments} subheaders but {payloads} payloads"),
        ));
    }
    Ok(())
}

pub struct NitfWriter;

impl NitfWriter {
    pub fn write(channel: &mut dyn ByteChannel, record: &Record, data: &SegmentData) -> Result<()> {
        check_lengths("images", record.images.len(), data.image_data.len())?;
        check_lengths("graphics", record.graphics.len(), data.graphic_data.len())?;
        check_lengths("texts", record.texts.len(), data.text_data.len())?;
        check_lengths("des", record.des.len(), data.des_data.len())?;
        check_lengths("res", record.res.len(), data.res_data.len())?;
        crate::image::writer::validate_segment_count(record.images.len())?;

        {
            let mut io = ChannelIo::new(channel);
            record.file_header.write(&mut io)?;
        }

        write_count(channel, record.images.len() as u64, 3)?;
        for (subheader, payload) in record.images.iter().zip(&data.image_data) {
            let subheader_len = subheader_wire_len(|io| subheader.write(io))?;
            write_count(channel, subheader_len as u64, 6)?;
            write_count(channel, payload.len() as u64, 10)?;
        }

        write_count(channel, record.graphics.len() as u64, 3)?;
        for (subheader, payload) in record.graphics.iter().zip(&data.graphic_data) {
            let subheader_len = subheader_wire_len(|io| subheader.write(io))?;
            write_count(channel, subheader_len as u64, 4)?;
            write_count(channel, payload.len() as u64, 6)?;
        }

        write_count(channel, 0, 3)?; // NUMX, always zero

        write_count(channel, record.texts.len() as u64, 3)?;
        for (subheader, payload) in record.texts.iter().zip(&data.text_data) {
            let subheader_len = subheader_wire_len(|io| subheader.write(io))?;
            write_count(channel, subheader_len as u64, 4)?;
            write_count(channel, payload.len() as u64, 5)?;
        }

        write_count(channel, record.des.len() as u64, 3)?;
        for (subheader, payload) in record.des.iter().zip(&data.des_data) {
            let subheader_len = subheader_wire_len(|io| subheader.write(io))?;
            write_count(channel, subheader_len as u64, 4)?;
            write_count(channel, payload.len() as u64, 9)?;
        }

        write_count(channel, record.res.len() as u64, 3)?;
        for (subheader, payload) in record.res.iter().zip(&data.res_data) {
            let subheader_len = subheader_wire_len(|io| subheader.write(io))?;
            write_count(channel, subheader_len as u64, 4)?;
            write_count(channel, payload.len() as u64, 7)?;
        }

        write_extension_block(channel, &record.file_header.extensions)?;
        write_extension_block(channel, &Extensions::new())?;

        for (subheader, payload) in record.images.iter().zip(&data.image_data) {
            let mut io = ChannelIo::new(channel);
            subheader.write(&mut io)?;
            drop(io);
            channel.write_all(payload)?;
        }
        for (subheader, payload) in record.graphics.iter().zip(&data.graphic_data) {
            let mut io = ChannelIo::new(channel);
            subheader.write(&mut io)?;
            drop(io);
            channel.write_all(payload)?;
        }
        for (subheader, payload) in record.texts.iter().zip(&data.text_data) {
            let mut io = ChannelIo::new(channel);
            subheader.write(&mut io)?;
            drop(io);
            channel.write_all(payload)?;
        }
        for (subheader, payload) in record.des.iter().zip(&data.des_data) {
            let mut io = ChannelIo::new(channel);
            subheader.write(&mut io)?;
            drop(io);
            channel.write_all(payload)?;
        }
        for (subheader, payload) in record.res.iter().zip(&data.res_data) {
            let mut io = ChannelIo::new(channel);
            subheader.write(&mut io)?;
            drop(io);
            channel.write_all(payload)?;
        }

        Ok(())
    }
}

/// Serializes a subheader into an in-memory buffer purely to measure its
/// wire length, the same trick `Extensions::total_len` uses for `UDHDL`.
fn subheader_wire_len(write: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> Result<usize> {
    let mut buf = Vec::new();
    write(&mut buf)?;
    Ok(buf.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::MemoryChannel;
    use crate::record::{FileHeader, ImageSubheader};
    use crate::reader::NitfReader;

    #[test]
    fn round_trips_a_single_image_segment() {
        let mut record = Record::new(FileHeader::default());
        let mut sub = ImageSubheader::default();
        sub.nrows.set_uint(4).unwrap();
        sub.ncols.set_uint(4).unwrap();
        sub.nbpr.set_uint(1).unwrap();
        sub.nbpc.set_uint(1).unwrap();
        sub.nppbh.set_uint(4).unwrap();
        sub.nppbv.set_uint(4).unwrap();
        sub.nbpp.set_uint(8).unwrap();
        sub.nbands.set_uint(1).unwrap();
        sub.ic.set_string("NC").unwrap();
        record.new_image_segment(sub).unwrap();

        let mut data = SegmentData::default();
        data.image_data.push(vec![7u8; 16]);

        let mut channel = MemoryChannel::new(Vec::new());
        NitfWriter::write(&mut channel, &record, &data).unwrap();
        let bytes = channel.into_inner();

        let mut channel = MemoryChannel::new(bytes);
        let mut reader = NitfReader::open(&mut channel).unwrap();
        assert_eq!(reader.image_count(), 1);
        let raw = reader.image_segment_bytes(0).unwrap();
        assert_eq!(raw, vec![7u8; 16]);
    }

    #[test]
    fn mismatched_payload_count_is_rejected() {
        let record = Record::new(FileHeader::default());
        let mut data = SegmentData::default();
        data.image_data.push(vec![0u8; 4]);
        let mut channel = MemoryChannel::new(Vec::new());
        assert!(NitfWriter::write(&mut channel, &record, &data).is_err());
    }
}
