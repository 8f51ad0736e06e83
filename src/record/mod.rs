//! C3: the record model — the file header plus one subheader per segment
//! kind, the cooked object graph a `NitfReader` exposes and a `NitfWriter`
//! serializes back to wire format.

mod des_subheader;
mod extensions;
mod file_header;
mod graphic_subheader;
mod image_subheader;
mod re_subheader;
mod text_subheader;

pub use des_subheader::DESubheader;
pub use extensions::{Extensions, TreEntry};
pub use file_header::FileHeader;
pub use graphic_subheader::GraphicSubheader;
pub use image_subheader::ImageSubheader;
pub use re_subheader::RESubheader;
pub use text_subheader::TextSubheader;

use std::io::{Read, Write};

use crate::error::{nitf_err, NitfErrorKind};
use crate::field::{Field, FieldKind};
use crate::Result;
use crate::SEGMENT_COUNT_MAX;

/// Reads fixed-width NITF fields off any `Read`, layering `unpack_*`-style
/// helpers over the stream the way a binary-format reader typically does.
pub trait NitfRead: Read {
    fn read_field(&mut self, kind: FieldKind, len: usize) -> Result<Field> {
        let mut buf = vec![0u8; len];
        self.read_exact(&mut buf)
            .map_err(|e| nitf_err(NitfErrorKind::ReadingFromFile, e.to_string()))?;
        let mut field = Field::new(kind, len);
        field.set_raw(&buf)?;
        Ok(field)
    }

    fn read_text(&mut self, len: usize) -> Result<String> {
        self.read_field(FieldKind::BcsA, len)?.as_string()
    }

    fn read_uint(&mut self, len: usize) -> Result<u64> {
        self.read_field(FieldKind::BcsN, len)?.as_uint()
    }
}

impl<R: Read> NitfRead for R {}

/// Writes fixed-width NITF fields to any `Write`.
pub trait NitfWrite: Write {
    fn write_field(&mut self, field: &Field) -> Result<()> {
        self.write_all(field.as_bytes())
            .map_err(|e| nitf_err(NitfErrorKind::WritingToFile, e.to_string()))
    }
}

impl<W: Write> NitfWrite for W {}

/// The full parsed object graph of a single NITF file: one file header and
/// the per-kind segment lists. Ordering within
/// each `Vec` is file order; index is used as the segment's identity for
/// `remove_*_segment`.
#[derive(Debug, Clone)]
pub struct Record {
    pub file_header: FileHeader,
    pub images: Vec<ImageSubheader>,
    pub graphics: Vec<GraphicSubheader>,
    pub texts: Vec<TextSubheader>,
    pub des: Vec<DESubheader>,
    pub res: Vec<RESubheader>,
}

impl Record {
    pub fn new(file_header: FileHeader) -> Self {
        Self {
            file_header,
            images: Vec::new(),
            graphics: Vec::new(),
            texts: Vec::new(),
            des: Vec::new(),
            res: Vec::new(),
        }
    }

    pub fn new_image_segment(&mut self, subheader: ImageSubheader) -> Result<usize> {
        push_segment(&mut self.images, subheader)
    }

    pub fn remove_image_segment(&mut self, index: usize) -> Result<ImageSubheader> {
        remove_segment(&mut self.images, index)
    }

    pub fn new_graphic_segment(&mut self, subheader: GraphicSubheader) -> Result<usize> {
        push_segment(&mut self.graphics, subheader)
    }

    pub fn remove_graphic_segment(&mut self, index: usize) -> Result<GraphicSubheader> {
        remove_segment(&mut self.graphics, index)
    }

    pub fn new_text_segment(&mut self, subheader: TextSubheader) -> Result<usize> {
        push_segment(&mut self.texts, subheader)
    }

    pub fn remove_text_segment(&mut self, index: usize) -> Result<TextSubheader> {
        remove_segment(&mut self.texts, index)
    }

    pub fn new_des_segment(&mut self, subheader: DESubheader) -> Result<usize> {
        push_segment(&mut self.des, subheader)
    }

    pub fn remove_des_segment(&mut self, index: usize) -> Result<DESubheader> {
        remove_segment(&mut self.des, index)
    }

    pub fn new_res_segment(&mut self, subheader: RESubheader) -> Result<usize> {
        push_segment(&mut self.res, subheader)
    }

    pub fn remove_res_segment(&mut self, index: usize) -> Result<RESubheader> {
        remove_segment(&mut self.res, index)
    }
}

fn push_segment<T>(segments: &mut Vec<T>, value: T) -> Result<usize> {
    if segments.len() as u32 >= SEGMENT_COUNT_MAX {
        return Err(nitf_err(
            NitfErrorKind::OutOfRange,
            format!("segment count would exceed {SEGMENT_COUNT_MAX}"),
        ));
    }
    segments.push(value);
    Ok(segments.len() - 1)
}

fn remove_segment<T>(segments: &mut Vec<T>, index: usize) -> Result<T> {
    if index >= segments.len() {
        return Err(nitf_err(
            NitfErrorKind::OutOfRange,
            format!("segment index {index} out of range"),
        ));
    }
    Ok(segments.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_mutators_track_count() {
        let mut record = Record::new(FileHeader::default());
        let idx = record
            .new_image_segment(ImageSubheader::default())
            .unwrap();
        assert_eq!(idx, 0);
        assert_eq!(record.images.len(), 1);
        record.remove_image_segment(0).unwrap();
        assert!(record.images.is_empty());
        assert!(record.remove_image_segment(0).is_err());
    }
}
