//! The top-level `NitfReader` façade:
//! parses the file header, the six length tables between it and the first
//! subheader, then every per-kind subheader in file order, and exposes
//! per-segment pixel/TRE/product accessors. The per-segment length arrays
//! (`LISH`/`LI`, `LSSH`/`LS`, `LTSH`/`LT`, `LDSH`/`LD`, `LRESH`/`LRE`) are
//! consumed here rather than modeled on `FileHeader` itself — `Record`'s
//! segment `Vec`s are the single source of truth for segment count and
//! the wire lengths are rederived from them on write.

use crate::compression::CompressionRegistry;
use crate::error::{nitf_err, NitfErrorKind};
use crate::image::{BlockMask, BlockingInfo, ImageReader, MaskSubheader};
use crate::primitives::{ByteChannel, ChannelIo, Whence};
use crate::product::{self, Product};
use crate::record::{
    DESubheader, Extensions, FileHeader, GraphicSubheader, ImageSubheader, NitfRead, RESubheader,
    Record, TextSubheader, TreEntry,
};
use crate::tre::registry::{DecodedOrOpaque, Registry as TreRegistry};
use crate::Result;

#[derive(Debug, Clone, Copy, Default)]
struct Span {
    offset: u64,
    len: u64,
}

fn read_count(channel: &mut dyn ByteChannel, len: usize) -> Result<u64> {
    let mut io = ChannelIo::new(channel);
    io.read_uint(len)
}

fn span_at(spans: &[Span], index: usize) -> Result<&Span> {
    spans
        .get(index)
        .ok_or_else(|| nitf_err(NitfErrorKind::OutOfRange, format!("no segment {index}")))
}

fn read_extension_block(channel: &mut dyn ByteChannel) -> Result<Extensions> {
    let total_len = read_count(channel, 5)?;
    if total_len == 0 {
        return Ok(Extensions::new());
    }
    let _overflow = read_count(channel, 3)?;
    let body_len = total_len
        .checked_sub(3)
        .ok_or_else(|| nitf_err(NitfErrorKind::Parsing, "extension block length shorter than its own overflow field"))?;
    let mut buf = vec![0u8; body_len as usize];
    channel.read_exact(&mut buf)?;
    Extensions::decode(&buf)
}

/// Parses and opens a NITF file over any `ByteChannel`, exposing the
/// cooked `Record` plus lazy per-segment data access.
pub struct NitfReader<'a> {
    channel: &'a mut dyn ByteChannel,
    pub record: Record,
    tre_registry: TreRegistry,
    compression_registry: CompressionRegistry,
    image_spans: Vec<Span>,
    graphic_spans: Vec<Span>,
    text_spans: Vec<Span>,
    des_spans: Vec<Span>,
    res_spans: Vec<Span>,
}

impl<'a> NitfReader<'a> {
    pub fn open(channel: &'a mut dyn ByteChannel) -> Result<Self> {
        let mut file_header = {
            let mut io = ChannelIo::new(channel);
            FileHeader::read(&mut io)?
        };

        let num_images = read_count(channel, 3)?;
        let mut image_lengths = Vec::with_capacity(num_images as usize);
        for _ in 0..num_images {
            read_count(channel, 6)?;
            image_lengths.push(read_count(channel, 10)?);
        }

        let num_graphics = read_count(channel, 3)?;
        let mut graphic_lengths = Vec::with_capacity(num_graphics as usize);
        for _ in 0..num_graphics {
            read_count(channel, 4)?;
            graphic_lengths.push(read_count(channel, 6)?);
        }

        let num_reserved = read_count(channel, 3)?;
        if num_reserved != 0 {
            return Err(nitf_err(
                NitfErrorKind::Parsing,
                "NUMX must be zero; reserved graphics are not a NITF 2.1 feature",
            ));
        }

        let num_texts = read_count(channel, 3)?;
        let mut text_lengths = Vec::with_capacity(num_texts as usize);
        for _ in 0..num_texts {
            read_count(channel, 4)?;
            text_lengths.push(read_count(channel, 5)?);
        }

        let num_des = read_count(channel, 3)?;
        let mut des_lengths = Vec::with_capacity(num_des as usize);
        for _ in 0..num_des {
            read_count(channel, 4)?;
            des_lengths.push(read_count(channel, 9)?);
        }

        let num_res = read_count(channel, 3)?;
        let mut res_lengths = Vec::with_capacity(num_res as usize);
        for _ in 0..num_res {
            read_count(channel, 4)?;
            res_lengths.push(read_count(channel, 7)?);
        }

        let mut udhd = read_extension_block(channel)?;
        let xhd = read_extension_block(channel)?;
        udhd.extend(xhd);
        file_header.extensions = udhd;

        let mut record = Record::new(file_header);
        let mut image_spans = Vec::with_capacity(image_lengths.len());
        for data_len in image_lengths {
            let subheader = {
                let mut io = ChannelIo::new(channel);
                ImageSubheader::read(&mut io)?
            };
            record.new_image_segment(subheader)?;
            let offset = channel.tell()?;
            channel.seek(data_len as i64, Whence::Current)?;
            image_spans.push(Span { offset, len: data_len });
        }

        let mut graphic_spans = Vec::with_capacity(graphic_lengths.len());
        for data_len in graphic_lengths {
            let subheader = {
                let mut io = ChannelIo::new(channel);
                GraphicSubheader::read(&mut io)?
            };
            record.new_graphic_segment(subheader)?;
            let offset = channel.tell()?;
            channel.seek(data_len as i64, Whence::Current)?;
            graphic_spans.push(Span { offset, len: data_len });
        }

        let mut text_spans = Vec::with_capacity(text_lengths.len());
        for data_len in text_lengths {
            let subheader = {
                let mut io = ChannelIo::new(channel);
                TextSubheader::read(&mut io)?
            };
            record.new_text_segment(subheader)?;
            let offset = channel.tell()?;
            channel.seek(data_len as i64, Whence::Current)?;
            text_spans.push(Span { offset, len: data_len });
        }

        let mut des_spans = Vec::with_capacity(des_lengths.len());
        for data_len in des_lengths {
            let subheader = {
                let mut io = ChannelIo::new(channel);
                DESubheader::read(&mut io)?
            };
            record.new_des_segment(subheader)?;
            let offset = channel.tell()?;
            channel.seek(data_len as i64, Whence::Current)?;
            des_spans.push(Span { offset, len: data_len });
        }

        let mut res_spans = Vec::with_capacity(res_lengths.len());
        for data_len in res_lengths {
            let subheader = {
                let mut io = ChannelIo::new(channel);
                RESubheader::read(&mut io)?
            };
            record.new_res_segment(subheader)?;
            let offset = channel.tell()?;
            channel.seek(data_len as i64, Whence::Current)?;
            res_spans.push(Span { offset, len: data_len });
        }

        Ok(Self {
            channel,
            record,
            tre_registry: TreRegistry::builtin(),
            compression_registry: CompressionRegistry::builtin(),
            image_spans,
            graphic_spans,
            text_spans,
            des_spans,
            res_spans,
        })
    }

    pub fn image_count(&self) -> usize {
        self.record.images.len()
    }

    /// A block-level reader for an uncompressed (`NC`/`NM`) image segment.
    /// Block-level codecs (JPEG 2000 and friends) are out of scope — use
    /// [`Self::image_segment_bytes`] for a whole-segment codec instead.
    pub fn image_reader(&mut self, index: usize) -> Result<ImageReader<'_>> {
        let sub = self
            .record
            .images
            .get(index)
            .ok_or_else(|| nitf_err(NitfErrorKind::OutOfRange, format!("no image segment {index}")))?;
        let ic = sub.compression_code()?;
        if ic != "NC" && ic != "NM" {
            return Err(nitf_err(
                NitfErrorKind::Decompression,
                format!(
                    "ImageReader only streams uncompressed blocks (NC/NM); `{ic}` needs a whole-segment codec via `image_segment_bytes`"
                ),
            ));
        }
        let blocking = BlockingInfo::from_subheader(sub)?;
        let masked = sub.is_masked()?;
        let span = self.image_spans[index];

        self.channel.seek(span.offset as i64, Whence::Start)?;
        let (mask, data_offset, pad_pixel) = if masked {
            let header = {
                let mut io = ChannelIo::new(self.channel);
                MaskSubheader::read(&mut io, blocking.block_count())?
            };
            let data_offset = span.offset + u64::from(header.data_offset);
            (header.mask, data_offset, header.pad_pixel)
        } else {
            (
                BlockMask::all_present(blocking.block_count(), blocking.block_size_bytes()),
                span.offset,
                Vec::new(),
            )
        };
        Ok(ImageReader::new(self.channel, blocking, mask, data_offset, pad_pixel))
    }

    /// Reads a whole image segment's bytes and decompresses them as a unit
    /// through the compression registry — the only path available for any
    /// `IC` beyond `NC`/`NM`.
    pub fn image_segment_bytes(&mut self, index: usize) -> Result<Vec<u8>> {
        let sub = self
            .record
            .images
            .get(index)
            .ok_or_else(|| nitf_err(NitfErrorKind::OutOfRange, format!("no image segment {index}")))?;
        let ic = sub.compression_code()?;
        let blocking = BlockingInfo::from_subheader(sub)?;
        let span = self.image_spans[index];
        self.channel.seek(span.offset as i64, Whence::Start)?;
        let mut buf = vec![0u8; span.len as usize];
        self.channel.read_exact(&mut buf)?;
        self.compression_registry.decompress(&ic, &blocking, &buf)
    }

    pub fn graphic_segment_bytes(&mut self, index: usize) -> Result<Vec<u8>> {
        let span = *span_at(&self.graphic_spans, index)?;
        self.read_span(span)
    }

    pub fn text_segment_bytes(&mut self, index: usize) -> Result<Vec<u8>> {
        let span = *span_at(&self.text_spans, index)?;
        self.read_span(span)
    }

    pub fn res_segment_bytes(&mut self, index: usize) -> Result<Vec<u8>> {
        let span = *span_at(&self.res_spans, index)?;
        self.read_span(span)
    }

    pub fn des_payload_bytes(&mut self, index: usize) -> Result<Vec<u8>> {
        let span = *span_at(&self.des_spans, index)?;
        self.read_span(span)
    }

    fn read_span(&mut self, span: Span) -> Result<Vec<u8>> {
        self.channel.seek(span.offset as i64, Whence::Start)?;
        let mut buf = vec![0u8; span.len as usize];
        self.channel.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Parses a DES's payload as SICD/SIDD/CPHD product metadata, provided
    /// the DES carries `XML_DATA_CONTENT`.
    pub fn des_product(&mut self, index: usize) -> Result<Product> {
        let is_xml = self
            .record
            .des
            .get(index)
            .ok_or_else(|| nitf_err(NitfErrorKind::OutOfRange, format!("no DES segment {index}")))?
            .is_xml_data_content()?;
        if !is_xml {
            return Err(nitf_err(NitfErrorKind::InvalidObject, "DES is not XML_DATA_CONTENT"));
        }
        let payload = self.des_payload_bytes(index)?;
        let xml = String::from_utf8(payload)
            .map_err(|e| nitf_err(NitfErrorKind::InvalidXml, e.to_string()))?;
        product::parse_product_xml(&xml)
    }

    /// Decodes one TRE entry, falling back to its opaque bytes on any
    /// lookup or layout mismatch.
    pub fn decode_tre(&self, entry: &TreEntry) -> DecodedOrOpaque {
        self.tre_registry.decode_or_opaque(&entry.tag, &entry.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::MemoryChannel;
    use crate::writer::{NitfWriter, SegmentData};

    #[test]
    fn open_reads_back_an_empty_file() {
        let record = Record::new(FileHeader::default());
        let data = SegmentData::default();
        let mut scratch = MemoryChannel::new(Vec::new());
        NitfWriter::write(&mut scratch, &record, &data).unwrap();
        let mut channel = MemoryChannel::new(scratch.into_inner());
        let reader = NitfReader::open(&mut channel).unwrap();
        assert_eq!(reader.image_count(), 0);
        assert_eq!(reader.record.file_header.fhdr.as_string().unwrap(), "NITF");
    }
}
