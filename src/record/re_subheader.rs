//! The reserved-extension-segment subheader: structurally
//! identical in shape to a DES subheader but never interpreted by this
//! crate beyond carrying its bytes.

use crate::error::{nitf_err, NitfErrorKind};
use crate::field::{Field, FieldKind};
use crate::record::{NitfRead, NitfWrite};
use crate::Result;

#[derive(Debug, Clone)]
pub struct RESubheader {
    pub re: Field,
    pub resid: Field,
    pub resver: Field,
    pub resclas: Field,
    pub resshl: Field,
    pub user_defined_subheader: Vec<u8>,
}

impl Default for RESubheader {
    fn default() -> Self {
        let mut re = Field::new(FieldKind::BcsA, 2);
        re.set_string("RE").unwrap();
        let mut resver = Field::new(FieldKind::BcsN, 2);
        resver.set_uint(1).unwrap();
        Self {
            re,
            resid: Field::new(FieldKind::BcsA, 25),
            resver,
            resclas: Field::new(FieldKind::BcsA, 1),
            resshl: Field::new(FieldKind::BcsN, 4),
            user_defined_subheader: Vec::new(),
        }
    }
}

impl RESubheader {
    pub fn read<R: NitfRead>(r: &mut R) -> Result<Self> {
        let re = r.read_field(FieldKind::BcsA, 2)?;
        if re.as_string()? != "RE" {
            return Err(nitf_err(NitfErrorKind::Parsing, "RE does not read `RE`"));
        }
        let resid = r.read_field(FieldKind::BcsA, 25)?;
        let resver = r.read_field(FieldKind::BcsN, 2)?;
        let resclas = r.read_field(FieldKind::BcsA, 1)?;
        let resshl = r.read_field(FieldKind::BcsN, 4)?;
        let len = resshl.as_uint()? as usize;
        let mut user_defined_subheader = vec![0u8; len];
        std::io::Read::read_exact(r, &mut user_defined_subheader)
            .map_err(|e| nitf_err(NitfErrorKind::ReadingFromFile, e.to_string()))?;
        Ok(Self {
            re,
            resid,
            resver,
            resclas,
            resshl,
            user_defined_subheader,
        })
    }

    pub fn write<W: NitfWrite>(&self, w: &mut W) -> Result<()> {
        for field in [
            &self.re,
            &self.resid,
            &self.resver,
            &self.resclas,
            &self.resshl,
        ] {
            w.write_field(field)?;
        }
        std::io::Write::write_all(w, &self.user_defined_subheader)
            .map_err(|e| nitf_err(NitfErrorKind::WritingToFile, e.to_string()))
    }
}
