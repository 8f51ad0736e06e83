//! The text segment subheader: free-text annotation
//! segments, most often used for CPHD/SICD companion notes.

use crate::error::{nitf_err, NitfErrorKind};
use crate::field::{Field, FieldKind};
use crate::record::{Extensions, NitfRead, NitfWrite};
use crate::Result;

#[derive(Debug, Clone)]
pub struct TextSubheader {
    pub te: Field,
    pub textid: Field,
    pub txtalvl: Field,
    pub txtdt: Field,
    pub txtitl: Field,
    pub tsclas: Field,
    pub txtfmt: Field,
    pub extensions: Extensions,
}

impl Default for TextSubheader {
    fn default() -> Self {
        let mut te = Field::new(FieldKind::BcsA, 2);
        te.set_string("TE").unwrap();
        let mut txtfmt = Field::new(FieldKind::BcsA, 3);
        txtfmt.set_string("STA").unwrap();
        Self {
            te,
            textid: Field::new(FieldKind::BcsA, 7),
            txtalvl: Field::new(FieldKind::BcsN, 3),
            txtdt: Field::new(FieldKind::BcsN, 14),
            txtitl: Field::new(FieldKind::BcsA, 80),
            tsclas: Field::new(FieldKind::BcsA, 1),
            txtfmt,
            extensions: Extensions::new(),
        }
    }
}

impl TextSubheader {
    pub fn read<R: NitfRead>(r: &mut R) -> Result<Self> {
        let te = r.read_field(FieldKind::BcsA, 2)?;
        if te.as_string()? != "TE" {
            return Err(nitf_err(NitfErrorKind::Parsing, "TE does not read `TE`"));
        }
        Ok(Self {
            te,
            textid: r.read_field(FieldKind::BcsA, 7)?,
            txtalvl: r.read_field(FieldKind::BcsN, 3)?,
            txtdt: r.read_field(FieldKind::BcsN, 14)?,
            txtitl: r.read_field(FieldKind::BcsA, 80)?,
            tsclas: r.read_field(FieldKind::BcsA, 1)?,
            txtfmt: r.read_field(FieldKind::BcsA, 3)?,
            extensions: Extensions::new(),
        })
    }

    pub fn write<W: NitfWrite>(&self, w: &mut W) -> Result<()> {
        for field in [
            &self.te,
            &self.textid,
            &self.txtalvl,
            &self.txtdt,
            &self.txtitl,
            &self.tsclas,
            &self.txtfmt,
        ] {
            w.write_field(field)?;
        }
        Ok(())
    }
}
