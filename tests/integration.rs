//! End-to-end coverage over the public façade: `NitfReader`/`NitfWriter`
//! round-tripping a multi-segment `Record`, TRE descriptor selection, and
//! DES payload handling.

use nitro_rs::image::BlockingInfo;
use nitro_rs::primitives::MemoryChannel;
use nitro_rs::reader::NitfReader;
use nitro_rs::record::{
    DESubheader, FileHeader, GraphicSubheader, ImageSubheader, Record, TextSubheader,
};
use nitro_rs::tre::registry::{DecodedOrOpaque, Registry};
use nitro_rs::writer::{NitfWriter, SegmentData};

fn sample_image_subheader(nrows: u64, ncols: u64) -> ImageSubheader {
    let mut sub = ImageSubheader::default();
    sub.nrows.set_uint(nrows).unwrap();
    sub.ncols.set_uint(ncols).unwrap();
    sub.nbpr.set_uint(1).unwrap();
    sub.nbpc.set_uint(1).unwrap();
    sub.nppbh.set_uint(ncols).unwrap();
    sub.nppbv.set_uint(nrows).unwrap();
    sub.nbpp.set_uint(8).unwrap();
    sub.nbands.set_uint(1).unwrap();
    sub.ic.set_string("NC").unwrap();
    sub
}

/// A file carrying one image segment, one text segment, one graphic
/// segment, and a generic (`TEST_DES`-style) DES all survives a write
/// then a read with every field and payload intact.
#[test]
fn multi_segment_record_round_trips_through_reader_and_writer() {
    let mut record = Record::new(FileHeader::default());
    record.file_header.set_file_title("ROUND TRIP").unwrap();

    record
        .new_image_segment(sample_image_subheader(2, 3))
        .unwrap();
    record
        .new_text_segment(TextSubheader::default())
        .unwrap();
    record
        .new_graphic_segment(GraphicSubheader::default())
        .unwrap();
    record
        .new_des_segment(DESubheader::new("TEST_DES", b"TEST DES payload".to_vec()).unwrap())
        .unwrap();

    let mut data = SegmentData::default();
    data.image_data.push(vec![9u8; 6]);
    data.text_data.push(b"hello operator".to_vec());
    data.graphic_data.push(b"CGM BYTES".to_vec());
    data.des_data.push(b"123456789ABCDEF0".to_vec());

    let mut channel = MemoryChannel::new(Vec::new());
    NitfWriter::write(&mut channel, &record, &data).unwrap();
    let bytes = channel.into_inner();

    let mut channel = MemoryChannel::new(bytes);
    let mut reader = NitfReader::open(&mut channel).unwrap();

    assert_eq!(
        reader.record.file_header.file_title().unwrap().trim(),
        "ROUND TRIP"
    );
    assert_eq!(reader.image_count(), 1);
    assert_eq!(reader.image_segment_bytes(0).unwrap(), vec![9u8; 6]);
    assert_eq!(reader.text_segment_bytes(0).unwrap(), b"hello operator");
    assert_eq!(reader.graphic_segment_bytes(0).unwrap(), b"CGM BYTES");
    assert_eq!(reader.des_payload_bytes(0).unwrap(), b"123456789ABCDEF0");
    assert!(!reader.record.des[0].is_xml_data_content().unwrap());
    assert_eq!(reader.record.des[0].desid.as_string().unwrap().trim(), "TEST_DES");
}

/// A mismatched payload/subheader count is rejected before any bytes are
/// written, rather than silently truncating the segment list.
#[test]
fn writer_rejects_payload_count_mismatch() {
    let mut record = Record::new(FileHeader::default());
    record
        .new_image_segment(sample_image_subheader(1, 1))
        .unwrap();
    let data = SegmentData::default(); // no image payload supplied
    let mut channel = MemoryChannel::new(Vec::new());
    assert!(NitfWriter::write(&mut channel, &record, &data).is_err());
}

/// A file with no image segments at all still round-trips cleanly; the
/// length tables all read back as zero.
#[test]
fn empty_record_round_trips() {
    let record = Record::new(FileHeader::default());
    let data = SegmentData::default();
    let mut channel = MemoryChannel::new(Vec::new());
    NitfWriter::write(&mut channel, &record, &data).unwrap();
    let bytes = channel.into_inner();

    let mut channel = MemoryChannel::new(bytes);
    let reader = NitfReader::open(&mut channel).unwrap();
    assert_eq!(reader.image_count(), 0);
    assert!(reader.record.texts.is_empty());
    assert!(reader.record.graphics.is_empty());
    assert!(reader.record.des.is_empty());
}

/// The 91-byte `IOMAPA` variant decodes its trailing reserved field under
/// the name the wire format actually uses.
#[test]
fn iomapa_91_byte_variant_exposes_no_of_segments() {
    let registry = Registry::builtin();
    let data = vec![b'0'; 91];
    let decoded = registry.decode("IOMAPA", &data).unwrap();
    assert!(decoded.field("NO_OF_SEGMENTS").is_some());
}

/// An unrecognized TRE tag degrades to an opaque blob rather than
/// aborting the whole read, so a file carrying a plugin-only or unknown
/// TRE still parses.
#[test]
fn unregistered_tre_degrades_to_opaque_on_a_real_record() {
    let mut record = Record::new(FileHeader::default());
    record
        .file_header
        .extensions
        .push("RPFHDR", vec![0u8; 10])
        .unwrap();

    let data = SegmentData::default();
    let mut channel = MemoryChannel::new(Vec::new());
    NitfWriter::write(&mut channel, &record, &data).unwrap();
    let bytes = channel.into_inner();

    let mut channel = MemoryChannel::new(bytes);
    let reader = NitfReader::open(&mut channel).unwrap();
    let entry = reader.record.file_header.extensions.get("RPFHDR").unwrap();
    match reader.decode_tre(entry) {
        DecodedOrOpaque::Opaque(bytes) => assert_eq!(bytes, vec![0u8; 10]),
        DecodedOrOpaque::Decoded(_) => panic!("RPFHDR should have no registered descriptor"),
    }
}

/// A masked (`IC="NM"`) image segment's declared pad-pixel value survives
/// end-to-end: a block the mask marks absent reads back as the file's own
/// declared pad byte, not a synthesized zero, when opened through
/// `NitfReader::image_reader` itself rather than by constructing
/// `ImageReader` directly.
#[test]
fn masked_image_segment_reads_declared_pad_pixel_through_nitf_reader() {
    let mut sub = sample_image_subheader(2, 2);
    sub.nbpr.set_uint(2).unwrap();
    sub.nbpc.set_uint(2).unwrap();
    sub.nppbh.set_uint(1).unwrap();
    sub.nppbv.set_uint(1).unwrap();
    sub.ic.set_string("NM").unwrap();

    // Hand-built mask subheader + BMR table + pixel data: four one-byte
    // blocks in a 2x2 grid, block index 2 (row 1, col 0) marked absent
    // with the 0xFFFFFFFF sentinel, declared pad-pixel value 0x55.
    let mut payload = Vec::new();
    payload.extend_from_slice(&27u32.to_be_bytes()); // IMDATOFF
    payload.extend_from_slice(&4u16.to_be_bytes()); // BMRLNTH
    payload.extend_from_slice(&0u16.to_be_bytes()); // TMRLNTH
    payload.extend_from_slice(&8u16.to_be_bytes()); // TPXCDLNTH (1 byte)
    payload.push(0x55); // TPXCD
    payload.extend_from_slice(&0u32.to_be_bytes()); // block 0 offset
    payload.extend_from_slice(&1u32.to_be_bytes()); // block 1 offset
    payload.extend_from_slice(&0xFFFF_FFFFu32.to_be_bytes()); // block 2: absent
    payload.extend_from_slice(&2u32.to_be_bytes()); // block 3 offset
    payload.extend_from_slice(&[0x11, 0x22, 0x33]); // pixel data for blocks 0, 1, 3

    let mut record = Record::new(FileHeader::default());
    record.new_image_segment(sub).unwrap();
    let mut data = SegmentData::default();
    data.image_data.push(payload);

    let mut channel = MemoryChannel::new(Vec::new());
    NitfWriter::write(&mut channel, &record, &data).unwrap();
    let bytes = channel.into_inner();

    let mut channel = MemoryChannel::new(bytes);
    let mut reader = NitfReader::open(&mut channel).unwrap();
    let mut image_reader = reader.image_reader(0).unwrap();

    assert_eq!(image_reader.read_block(0, 0).unwrap(), vec![0x11]);
    assert_eq!(image_reader.read_block(0, 1).unwrap(), vec![0x22]);
    assert_eq!(image_reader.read_block(1, 0).unwrap(), vec![0x55]);
    assert_eq!(image_reader.read_block(1, 1).unwrap(), vec![0x33]);
}

/// `BlockingInfo` rejects a subheader whose blocking geometry would divide
/// by zero rather than letting later block-index math panic.
#[test]
fn blocking_info_rejects_zero_block_dimensions() {
    let mut sub = sample_image_subheader(4, 4);
    sub.nbpr.set_uint(0).unwrap();
    assert!(BlockingInfo::from_subheader(&sub).is_err());
}
