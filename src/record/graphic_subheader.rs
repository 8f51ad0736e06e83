//! The graphic (CGM) segment subheader. The graphic
//! data itself is the out-of-scope CGM payload; this crate only carries it
//! opaquely.

use crate::error::{nitf_err, NitfErrorKind};
use crate::field::{Field, FieldKind};
use crate::record::{Extensions, NitfRead, NitfWrite};
use crate::Result;

#[derive(Debug, Clone)]
pub struct GraphicSubheader {
    pub sy: Field,
    pub sid1: Field,
    pub sname: Field,
    pub ssclas: Field,
    pub sfmt: Field,
    pub sstruct: Field,
    pub sdlvl: Field,
    pub salvl: Field,
    pub sloc_row: Field,
    pub sloc_col: Field,
    pub sbnd1_row: Field,
    pub sbnd1_col: Field,
    pub scolor: Field,
    pub sbnd2_row: Field,
    pub sbnd2_col: Field,
    pub sres: Field,
    pub extensions: Extensions,
}

impl Default for GraphicSubheader {
    fn default() -> Self {
        let mut sy = Field::new(FieldKind::BcsA, 2);
        sy.set_string("SY").unwrap();
        let mut sfmt = Field::new(FieldKind::BcsA, 1);
        sfmt.set_string("C").unwrap();
        Self {
            sy,
            sid1: Field::new(FieldKind::BcsA, 10),
            sname: Field::new(FieldKind::BcsA, 20),
            ssclas: Field::new(FieldKind::BcsA, 1),
            sfmt,
            sstruct: Field::new(FieldKind::Binary, 13),
            sdlvl: Field::new(FieldKind::BcsN, 3),
            salvl: Field::new(FieldKind::BcsN, 3),
            sloc_row: Field::new(FieldKind::BcsN, 5),
            sloc_col: Field::new(FieldKind::BcsN, 5),
            sbnd1_row: Field::new(FieldKind::BcsN, 5),
            sbnd1_col: Field::new(FieldKind::BcsN, 5),
            scolor: Field::new(FieldKind::BcsA, 1),
            sbnd2_row: Field::new(FieldKind::BcsN, 5),
            sbnd2_col: Field::new(FieldKind::BcsN, 5),
            sres: Field::new(FieldKind::BcsN, 2),
            extensions: Extensions::new(),
        }
    }
}

impl GraphicSubheader {
    pub fn read<R: NitfRead>(r: &mut R) -> Result<Self> {
        let sy = r.read_field(FieldKind::BcsA, 2)?;
        if sy.as_string()? != "SY" {
            return Err(nitf_err(NitfErrorKind::Parsing, "SY does not read `SY`"));
        }
        Ok(Self {
            sy,
            sid1: r.read_field(FieldKind::BcsA, 10)?,
            sname: r.read_field(FieldKind::BcsA, 20)?,
            ssclas: r.read_field(FieldKind::BcsA, 1)?,
            sfmt: r.read_field(FieldKind::BcsA, 1)?,
            sstruct: r.read_field(FieldKind::Binary, 13)?,
            sdlvl: r.read_field(FieldKind::BcsN, 3)?,
            salvl: r.read_field(FieldKind::BcsN, 3)?,
            sloc_row: r.read_field(FieldKind::BcsN, 5)?,
            sloc_col: r.read_field(FieldKind::BcsN, 5)?,
            sbnd1_row: r.read_field(FieldKind::BcsN, 5)?,
            sbnd1_col: r.read_field(FieldKind::BcsN, 5)?,
            scolor: r.read_field(FieldKind::BcsA, 1)?,
            sbnd2_row: r.read_field(FieldKind::BcsN, 5)?,
            sbnd2_col: r.read_field(FieldKind::BcsN, 5)?,
            sres: r.read_field(FieldKind::BcsN, 2)?,
            extensions: Extensions::new(),
        })
    }

    pub fn write<W: NitfWrite>(&self, w: &mut W) -> Result<()> {
        for field in [
            &self.sy,
            &self.sid1,
            &self.sname,
            &self.ssclas,
            &self.sfmt,
            &self.sstruct,
            &self.sdlvl,
            &self.salvl,
            &self.sloc_row,
            &self.sloc_col,
            &self.sbnd1_row,
            &self.sbnd1_col,
            &self.scolor,
            &self.sbnd2_row,
            &self.sbnd2_col,
            &self.sres,
        ] {
            w.write_field(field)?;
        }
        Ok(())
    }
}
