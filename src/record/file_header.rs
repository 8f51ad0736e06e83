//! The NITF file header: the fixed fields every file
//! carries once, ahead of the per-segment subheaders.

use crate::error::{nitf_err, NitfErrorKind};
use crate::field::{Field, FieldKind};
use crate::record::{Extensions, NitfRead, NitfWrite};
use crate::Result;

#[derive(Debug, Clone)]
pub struct FileHeader {
    pub fhdr: Field,
    pub fver: Field,
    pub clevel: Field,
    pub stype: Field,
    pub ostaid: Field,
    pub fdt: Field,
    pub ftitle: Field,
    /// `FSCLAS` through `FSCTLN`: the 167-byte security block proper.
    pub fsclas: Field,
    pub fsclsy: Field,
    pub fscode: Field,
    pub fsctlh: Field,
    pub fsrel: Field,
    pub fsdctp: Field,
    pub fsdcdt: Field,
    pub fsdcxm: Field,
    pub fsdg: Field,
    pub fsdgdt: Field,
    pub fscltx: Field,
    pub fscatp: Field,
    pub fscaut: Field,
    pub fscrsn: Field,
    pub fssrdt: Field,
    pub fsctln: Field,
    pub fscop: Field,
    pub fscpys: Field,
    pub encryp: Field,
    pub fbkgc: Field,
    pub oname: Field,
    pub ophone: Field,
    pub fl: Field,
    pub hl: Field,
    pub extensions: Extensions,
}

impl Default for FileHeader {
    fn default() -> Self {
        let mut fhdr = Field::new(FieldKind::BcsA, 4);
        fhdr.set_string("NITF").unwrap();
        let mut fver = Field::new(FieldKind::BcsN, 5);
        fver.set_string("02.10").unwrap();
        let mut clevel = Field::new(FieldKind::BcsN, 2);
        clevel.set_uint(3).unwrap();
        let mut stype = Field::new(FieldKind::BcsA, 4);
        stype.set_string("BF01").unwrap();
        Self {
            fhdr,
            fver,
            clevel,
            stype,
            ostaid: Field::new(FieldKind::BcsA, 10),
            fdt: Field::new(FieldKind::BcsN, 14),
            ftitle: Field::new(FieldKind::BcsA, 80),
            fsclas: Field::new(FieldKind::BcsA, 1),
            fsclsy: Field::new(FieldKind::BcsA, 2),
            fscode: Field::new(FieldKind::BcsA, 11),
            fsctlh: Field::new(FieldKind::BcsA, 2),
            fsrel: Field::new(FieldKind::BcsA, 20),
            fsdctp: Field::new(FieldKind::BcsA, 2),
            fsdcdt: Field::new(FieldKind::BcsA, 8),
            fsdcxm: Field::new(FieldKind::BcsA, 4),
            fsdg: Field::new(FieldKind::BcsA, 1),
            fsdgdt: Field::new(FieldKind::BcsA, 8),
            fscltx: Field::new(FieldKind::BcsA, 43),
            fscatp: Field::new(FieldKind::BcsA, 1),
            fscaut: Field::new(FieldKind::BcsA, 40),
            fscrsn: Field::new(FieldKind::BcsA, 1),
            fssrdt: Field::new(FieldKind::BcsA, 8),
            fsctln: Field::new(FieldKind::BcsA, 15),
            fscop: Field::new(FieldKind::BcsN, 5),
            fscpys: Field::new(FieldKind::BcsN, 5),
            encryp: Field::new(FieldKind::BcsN, 1),
            fbkgc: Field::new(FieldKind::Binary, 3),
            oname: Field::new(FieldKind::BcsA, 24),
            ophone: Field::new(FieldKind::BcsA, 18),
            fl: Field::new(FieldKind::BcsN, 12),
            hl: Field::new(FieldKind::BcsN, 6),
            extensions: Extensions::new(),
        }
    }
}

impl FileHeader {
    pub fn read<R: NitfRead>(r: &mut R) -> Result<Self> {
        let fhdr = r.read_field(FieldKind::BcsA, 4)?;
        if fhdr.as_string()? != "NITF" {
            return Err(nitf_err(
                NitfErrorKind::Parsing,
                "FHDR does not read `NITF`",
            ));
        }
        let fver = r.read_field(FieldKind::BcsN, 5)?;
        let clevel = r.read_field(FieldKind::BcsN, 2)?;
        let stype = r.read_field(FieldKind::BcsA, 4)?;
        let ostaid = r.read_field(FieldKind::BcsA, 10)?;
        let fdt = r.read_field(FieldKind::BcsN, 14)?;
        let ftitle = r.read_field(FieldKind::BcsA, 80)?;
        let fsclas = r.read_field(FieldKind::BcsA, 1)?;
        let fsclsy = r.read_field(FieldKind::BcsA, 2)?;
        let fscode = r.read_field(FieldKind::BcsA, 11)?;
        let fsctlh = r.read_field(FieldKind::BcsA, 2)?;
        let fsrel = r.read_field(FieldKind::BcsA, 20)?;
        let fsdctp = r.read_field(FieldKind::BcsA, 2)?;
        let fsdcdt = r.read_field(FieldKind::BcsA, 8)?;
        let fsdcxm = r.read_field(FieldKind::BcsA, 4)?;
        let fsdg = r.read_field(FieldKind::BcsA, 1)?;
        let fsdgdt = r.read_field(FieldKind::BcsA, 8)?;
        let fscltx = r.read_field(FieldKind::BcsA, 43)?;
        let fscatp = r.read_field(FieldKind::BcsA, 1)?;
        let fscaut = r.read_field(FieldKind::BcsA, 40)?;
        let fscrsn = r.read_field(FieldKind::BcsA, 1)?;
        let fssrdt = r.read_field(FieldKind::BcsA, 8)?;
        let fsctln = r.read_field(FieldKind::BcsA, 15)?;
        let fscop = r.read_field(FieldKind::BcsN, 5)?;
        let fscpys = r.read_field(FieldKind::BcsN, 5)?;
        let encryp = r.read_field(FieldKind::BcsN, 1)?;
        let fbkgc = r.read_field(FieldKind::Binary, 3)?;
        let oname = r.read_field(FieldKind::BcsA, 24)?;
        let ophone = r.read_field(FieldKind::BcsA, 18)?;
        let fl = r.read_field(FieldKind::BcsN, 12)?;
        let hl = r.read_field(FieldKind::BcsN, 6)?;
        Ok(Self {
            fhdr,
            fver,
            clevel,
            stype,
            ostaid,
            fdt,
            ftitle,
            fsclas,
            fsclsy,
            fscode,
            fsctlh,
            fsrel,
            fsdctp,
            fsdcdt,
            fsdcxm,
            fsdg,
            fsdgdt,
            fscltx,
            fscatp,
            fscaut,
            fscrsn,
            fssrdt,
            fsctln,
            fscop,
            fscpys,
            encryp,
            fbkgc,
            oname,
            ophone,
            fl,
            hl,
            extensions: Extensions::new(),
        })
    }

    pub fn write<W: NitfWrite>(&self, w: &mut W) -> Result<()> {
        for field in [
            &self.fhdr,
            &self.fver,
            &self.clevel,
            &self.stype,
            &self.ostaid,
            &self.fdt,
            &self.ftitle,
            &self.fsclas,
            &self.fsclsy,
            &self.fscode,
            &self.fsctlh,
            &self.fsrel,
            &self.fsdctp,
            &self.fsdcdt,
            &self.fsdcxm,
            &self.fsdg,
            &self.fsdgdt,
            &self.fscltx,
            &self.fscatp,
            &self.fscaut,
            &self.fscrsn,
            &self.fssrdt,
            &self.fsctln,
            &self.fscop,
            &self.fscpys,
            &self.encryp,
            &self.fbkgc,
            &self.oname,
            &self.ophone,
            &self.fl,
            &self.hl,
        ] {
            w.write_field(field)?;
        }
        Ok(())
    }

    pub fn file_title(&self) -> Result<String> {
        self.ftitle.as_string()
    }

    pub fn set_file_title(&mut self, title: &str) -> Result<()> {
        self.ftitle.set_string(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_header_round_trips_through_bytes() {
        let header = FileHeader::default();
        let mut buf = Vec::new();
        header.write(&mut buf).unwrap();
        let parsed = FileHeader::read(&mut buf.as_slice()).unwrap();
        assert_eq!(parsed.fhdr.as_string().unwrap(), "NITF");
        assert_eq!(parsed.fver.as_string().unwrap(), "02.10");
    }

    #[test]
    fn bad_magic_fails_parsing() {
        let mut bytes = Vec::new();
        FileHeader::default().write(&mut bytes).unwrap();
        bytes[0] = b'X';
        let err = FileHeader::read(&mut bytes.as_slice()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<crate::NitfError>().unwrap().kind,
            NitfErrorKind::Parsing
        );
    }
}
