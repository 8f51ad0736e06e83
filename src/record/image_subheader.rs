//! The image segment subheader: pixel geometry,
//! compression code, blocking layout and segment-stacking placement.

use crate::error::{nitf_err, NitfErrorKind};
use crate::field::{Field, FieldKind};
use crate::record::{Extensions, NitfRead, NitfWrite};
use crate::Result;

#[derive(Debug, Clone)]
pub struct ImageSubheader {
    pub im: Field,
    pub iid1: Field,
    pub idatim: Field,
    pub tgtid: Field,
    pub iid2: Field,
    pub isclas: Field,
    pub isorce: Field,
    pub nrows: Field,
    pub ncols: Field,
    pub pvtype: Field,
    pub irep: Field,
    pub icat: Field,
    pub abpp: Field,
    pub pjust: Field,
    pub icords: Field,
    pub ic: Field,
    pub nbands: Field,
    pub isync: Field,
    pub imode: Field,
    pub nbpr: Field,
    pub nbpc: Field,
    pub nppbh: Field,
    pub nppbv: Field,
    pub nbpp: Field,
    pub idlvl: Field,
    pub ialvl: Field,
    pub iloc_row: Field,
    pub iloc_col: Field,
    pub imag: Field,
    pub extensions: Extensions,
}

impl Default for ImageSubheader {
    fn default() -> Self {
        let mut im = Field::new(FieldKind::BcsA, 2);
        im.set_string("IM").unwrap();
        let mut imag = Field::new(FieldKind::BcsA, 4);
        imag.set_string("1.0 ").unwrap();
        Self {
            im,
            iid1: Field::new(FieldKind::BcsA, 10),
            idatim: Field::new(FieldKind::BcsN, 14),
            tgtid: Field::new(FieldKind::BcsA, 17),
            iid2: Field::new(FieldKind::BcsA, 80),
            isclas: Field::new(FieldKind::BcsA, 1),
            isorce: Field::new(FieldKind::BcsA, 42),
            nrows: Field::new(FieldKind::BcsN, 8),
            ncols: Field::new(FieldKind::BcsN, 8),
            pvtype: Field::new(FieldKind::BcsA, 3),
            irep: Field::new(FieldKind::BcsA, 8),
            icat: Field::new(FieldKind::BcsA, 8),
            abpp: Field::new(FieldKind::BcsN, 2),
            pjust: Field::new(FieldKind::BcsA, 1),
            icords: Field::new(FieldKind::BcsA, 1),
            ic: Field::new(FieldKind::BcsA, 2),
            nbands: Field::new(FieldKind::BcsN, 1),
            isync: Field::new(FieldKind::BcsN, 1),
            imode: Field::new(FieldKind::BcsA, 1),
            nbpr: Field::new(FieldKind::BcsN, 4),
            nbpc: Field::new(FieldKind::BcsN, 4),
            nppbh: Field::new(FieldKind::BcsN, 4),
            nppbv: Field::new(FieldKind::BcsN, 4),
            nbpp: Field::new(FieldKind::BcsN, 2),
            idlvl: Field::new(FieldKind::BcsN, 3),
            ialvl: Field::new(FieldKind::BcsN, 3),
            iloc_row: Field::new(FieldKind::BcsN, 5),
            iloc_col: Field::new(FieldKind::BcsN, 5),
            imag,
            extensions: Extensions::new(),
        }
    }
}

impl ImageSubheader {
    pub fn read<R: NitfRead>(r: &mut R) -> Result<Self> {
        let im = r.read_field(FieldKind::BcsA, 2)?;
        if im.as_string()? != "IM" {
            return Err(nitf_err(NitfErrorKind::Parsing, "IM does not read `IM`"));
        }
        Ok(Self {
            im,
            iid1: r.read_field(FieldKind::BcsA, 10)?,
            idatim: r.read_field(FieldKind::BcsN, 14)?,
            tgtid: r.read_field(FieldKind::BcsA, 17)?,
            iid2: r.read_field(FieldKind::BcsA, 80)?,
            isclas: r.read_field(FieldKind::BcsA, 1)?,
            isorce: r.read_field(FieldKind::BcsA, 42)?,
            nrows: r.read_field(FieldKind::BcsN, 8)?,
            ncols: r.read_field(FieldKind::BcsN, 8)?,
            pvtype: r.read_field(FieldKind::BcsA, 3)?,
            irep: r.read_field(FieldKind::BcsA, 8)?,
            icat: r.read_field(FieldKind::BcsA, 8)?,
            abpp: r.read_field(FieldKind::BcsN, 2)?,
            pjust: r.read_field(FieldKind::BcsA, 1)?,
            icords: r.read_field(FieldKind::BcsA, 1)?,
            ic: r.read_field(FieldKind::BcsA, 2)?,
            nbands: r.read_field(FieldKind::BcsN, 1)?,
            isync: r.read_field(FieldKind::BcsN, 1)?,
            imode: r.read_field(FieldKind::BcsA, 1)?,
            nbpr: r.read_field(FieldKind::BcsN, 4)?,
            nbpc: r.read_field(FieldKind::BcsN, 4)?,
            nppbh: r.read_field(FieldKind::BcsN, 4)?,
            nppbv: r.read_field(FieldKind::BcsN, 4)?,
            nbpp: r.read_field(FieldKind::BcsN, 2)?,
            idlvl: r.read_field(FieldKind::BcsN, 3)?,
            ialvl: r.read_field(FieldKind::BcsN, 3)?,
            iloc_row: r.read_field(FieldKind::BcsN, 5)?,
            iloc_col: r.read_field(FieldKind::BcsN, 5)?,
            imag: r.read_field(FieldKind::BcsA, 4)?,
            extensions: Extensions::new(),
        })
    }

    pub fn write<W: NitfWrite>(&self, w: &mut W) -> Result<()> {
        for field in [
            &self.im,
            &self.iid1,
            &self.idatim,
            &self.tgtid,
            &self.iid2,
            &self.isclas,
            &self.isorce,
            &self.nrows,
            &self.ncols,
            &self.pvtype,
            &self.irep,
            &self.icat,
            &self.abpp,
            &self.pjust,
            &self.icords,
            &self.ic,
            &self.nbands,
            &self.isync,
            &self.imode,
            &self.nbpr,
            &self.nbpc,
            &self.nppbh,
            &self.nppbv,
            &self.nbpp,
            &self.idlvl,
            &self.ialvl,
            &self.iloc_row,
            &self.iloc_col,
            &self.imag,
        ] {
            w.write_field(field)?;
        }
        Ok(())
    }

    pub fn rows(&self) -> Result<u64> {
        self.nrows.as_uint()
    }

    pub fn cols(&self) -> Result<u64> {
        self.ncols.as_uint()
    }

    pub fn bits_per_pixel(&self) -> Result<u64> {
        self.nbpp.as_uint()
    }

    pub fn compression_code(&self) -> Result<String> {
        self.ic.as_string()
    }

    pub fn is_masked(&self) -> Result<bool> {
        Ok(matches!(self.compression_code()?.as_str(), "NM" | "M1" | "M3" | "M4" | "M5" | "I1"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_subheader_round_trips() {
        let sub = ImageSubheader::default();
        let mut buf = Vec::new();
        sub.write(&mut buf).unwrap();
        let parsed = ImageSubheader::read(&mut buf.as_slice()).unwrap();
        assert_eq!(parsed.im.as_string().unwrap(), "IM");
    }
}
