//! The data-extension-segment subheader: carries the
//! `XML_DATA_CONTENT` user-defined subheader that every SICD/SIDD/CPHD DES
//! binds through. `DESVER` (the wire-level DES subheader version, always
//! `"01"`) and `DESSHSV` (the schema version inside the user-defined
//! subheader, e.g. `"4"` for the current SICD schema) are deliberately
//! different numbers tracking different things; neither is derived from
//! the other.

use crate::error::{nitf_err, NitfErrorKind};
use crate::field::{Field, FieldKind};
use crate::record::{NitfRead, NitfWrite};
use crate::Result;

/// Wire length of the `XML_DATA_CONTENT` user-defined subheader.
pub const XML_DATA_CONTENT_SUBHEADER_LEN: usize = 773;

#[derive(Debug, Clone)]
pub struct DESubheader {
    pub de: Field,
    pub desid: Field,
    pub desver: Field,
    pub desclas: Field,
    pub desoflw: Field,
    pub desitem: Field,
    pub desshl: Field,
    /// `DESSHF`: opaque to the record layer. For `XML_DATA_CONTENT` this is
    /// always `XML_DATA_CONTENT_SUBHEADER_LEN` bytes and the product layer
    /// parses `DESSHSI`/`DESSHSV`/`DESSHSD`/`DESSHTN` etc. out of it.
    pub user_defined_subheader: Vec<u8>,
}

impl Default for DESubheader {
    fn default() -> Self {
        let mut de = Field::new(FieldKind::BcsA, 2);
        de.set_string("DE").unwrap();
        let mut desver = Field::new(FieldKind::BcsN, 2);
        desver.set_uint(1).unwrap();
        Self {
            de,
            desid: Field::new(FieldKind::BcsA, 25),
            desver,
            desclas: Field::new(FieldKind::BcsA, 1),
            desoflw: Field::new(FieldKind::BcsA, 6),
            desitem: Field::new(FieldKind::BcsN, 3),
            desshl: Field::new(FieldKind::BcsN, 4),
            user_defined_subheader: Vec::new(),
        }
    }
}

impl DESubheader {
    /// Builds a DES subheader for any `DESID`, carrying an arbitrary
    /// user-defined subheader verbatim. `XML_DATA_CONTENT` has its own
    /// fixed-layout constructor below; this is for everything else (a
    /// user-TRE subheader such as `TEST_DES`, or no user-defined subheader
    /// at all).
    pub fn new(desid: &str, user_defined_subheader: Vec<u8>) -> Result<Self> {
        let mut header = Self::default();
        header.desid.set_string(desid)?;
        header
            .desshl
            .set_uint(user_defined_subheader.len() as u64)?;
        header.user_defined_subheader = user_defined_subheader;
        Ok(header)
    }

    pub fn new_xml_data_content(user_defined_subheader: Vec<u8>) -> Result<Self> {
        if user_defined_subheader.len() != XML_DATA_CONTENT_SUBHEADER_LEN {
            return Err(nitf_err(
                NitfErrorKind::InvalidObject,
                format!(
                    "XML_DATA_CONTENT subheader must be {XML_DATA_CONTENT_SUBHEADER_LEN} bytes, got {}",
                    user_defined_subheader.len()
                ),
            ));
        }
        let mut header = Self::default();
        header.desid.set_string("XML_DATA_CONTENT")?;
        header
            .desshl
            .set_uint(user_defined_subheader.len() as u64)?;
        header.user_defined_subheader = user_defined_subheader;
        Ok(header)
    }

    pub fn is_xml_data_content(&self) -> Result<bool> {
        Ok(self.desid.as_string()?.trim() == "XML_DATA_CONTENT")
    }

    pub fn read<R: NitfRead>(r: &mut R) -> Result<Self> {
        let de = r.read_field(FieldKind::BcsA, 2)?;
        if de.as_string()? != "DE" {
            return Err(nitf_err(NitfErrorKind::Parsing, "DE does not read `DE`"));
        }
        let desid = r.read_field(FieldKind::BcsA, 25)?;
        let desver = r.read_field(FieldKind::BcsN, 2)?;
        let desclas = r.read_field(FieldKind::BcsA, 1)?;
        let desoflw = r.read_field(FieldKind::BcsA, 6)?;
        let desitem = r.read_field(FieldKind::BcsN, 3)?;
        let desshl = r.read_field(FieldKind::BcsN, 4)?;
        let len = desshl.as_uint()? as usize;
        let mut user_defined_subheader = vec![0u8; len];
        std::io::Read::read_exact(r, &mut user_defined_subheader)
            .map_err(|e| nitf_err(NitfErrorKind::ReadingFromFile, e.to_string()))?;
        Ok(Self {
            de,
            desid,
            desver,
            desclas,
            desoflw,
            desitem,
            desshl,
            user_defined_subheader,
        })
    }

    pub fn write<W: NitfWrite>(&self, w: &mut W) -> Result<()> {
        for field in [
            &self.de,
            &self.desid,
            &self.desver,
            &self.desclas,
            &self.desoflw,
            &self.desitem,
            &self.desshl,
        ] {
            w.write_field(field)?;
        }
        std::io::Write::write_all(w, &self.user_defined_subheader)
            .map_err(|e| nitf_err(NitfErrorKind::WritingToFile, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_data_content_rejects_wrong_subheader_length() {
        assert!(DESubheader::new_xml_data_content(vec![0u8; 100]).is_err());
    }

    #[test]
    fn generic_des_round_trips_an_arbitrary_user_subheader() {
        let header = DESubheader::new("TEST_DES", b"TEST DESTEST_DES_COUNT=16".to_vec()).unwrap();
        let mut buf = Vec::new();
        header.write(&mut buf).unwrap();
        let parsed = DESubheader::read(&mut buf.as_slice()).unwrap();
        assert_eq!(parsed.desid.as_string().unwrap().trim(), "TEST_DES");
        assert!(!parsed.is_xml_data_content().unwrap());
        assert_eq!(parsed.user_defined_subheader, b"TEST DESTEST_DES_COUNT=16");
    }

    #[test]
    fn xml_data_content_round_trips() {
        let header =
            DESubheader::new_xml_data_content(vec![0x20u8; XML_DATA_CONTENT_SUBHEADER_LEN])
                .unwrap();
        let mut buf = Vec::new();
        header.write(&mut buf).unwrap();
        let parsed = DESubheader::read(&mut buf.as_slice()).unwrap();
        assert!(parsed.is_xml_data_content().unwrap());
        assert_eq!(
            parsed.user_defined_subheader.len(),
            XML_DATA_CONTENT_SUBHEADER_LEN
        );
        assert_eq!(parsed.desver.as_string().unwrap(), "01");
    }
}
