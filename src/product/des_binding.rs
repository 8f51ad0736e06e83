//! Binds an XML product (SICD/SIDD/CPHD-adjacent metadata, or any other
//! registered XML payload) to the `XML_DATA_CONTENT` DES user-defined
//! subheader. The 13 fixed-width fields below sum to
//! exactly [`XML_DATA_CONTENT_SUBHEADER_LEN`](crate::record::des_subheader).

use crate::error::{nitf_err, NitfErrorKind};
use crate::field::{Field, FieldKind};
use crate::record::{DESubheader, NitfRead, NitfWrite};
use crate::Result;

#[derive(Debug, Clone)]
pub struct XmlDataContentSubheader {
    pub descrc: Field,
    pub desshft: Field,
    pub desshdt: Field,
    pub desshrp: Field,
    pub desshsi: Field,
    pub desshsv: Field,
    pub desshsd: Field,
    pub desshtn: Field,
    pub desshlpg: Field,
    pub desshlpt: Field,
    pub desshli: Field,
    pub desshlin: Field,
    pub desshabs: Field,
}

impl Default for XmlDataContentSubheader {
    fn default() -> Self {
        let mut desshft = Field::new(FieldKind::BcsA, 8);
        desshft.set_string("XML").unwrap();
        Self {
            descrc: Field::new(FieldKind::BcsN, 5),
            desshft,
            desshdt: Field::new(FieldKind::BcsN, 20),
            desshrp: Field::new(FieldKind::BcsA, 40),
            desshsi: Field::new(FieldKind::BcsA, 60),
            desshsv: Field::new(FieldKind::BcsA, 10),
            desshsd: Field::new(FieldKind::BcsN, 20),
            desshtn: Field::new(FieldKind::BcsA, 120),
            desshlpg: Field::new(FieldKind::BcsA, 125),
            desshlpt: Field::new(FieldKind::BcsA, 25),
            desshli: Field::new(FieldKind::BcsA, 20),
            desshlin: Field::new(FieldKind::BcsA, 120),
            desshabs: Field::new(FieldKind::BcsA, 200),
        }
    }
}

impl XmlDataContentSubheader {
    /// `DESSHSV`: the XML schema version string (e.g. `"1.3.0"` for SICD).
    /// Distinct from `DESVER` on the DES subheader itself, which always
    /// reads `"01"` regardless of which schema version this field names.
    pub fn set_schema_version(&mut self, version: &str) -> Result<()> {
        self.desshsv.set_string(version)
    }

    pub fn schema_version(&self) -> Result<String> {
        self.desshsv.as_string()
    }

    pub fn set_type_namespace(&mut self, namespace_uri: &str) -> Result<()> {
        self.desshtn.set_string(namespace_uri)
    }

    pub fn type_namespace(&self) -> Result<String> {
        self.desshtn.as_string()
    }

    pub fn read<R: NitfRead>(r: &mut R) -> Result<Self> {
        Ok(Self {
            descrc: r.read_field(FieldKind::BcsN, 5)?,
            desshft: r.read_field(FieldKind::BcsA, 8)?,
            desshdt: r.read_field(FieldKind::BcsN, 20)?,
            desshrp: r.read_field(FieldKind::BcsA, 40)?,
            desshsi: r.read_field(FieldKind::BcsA, 60)?,
            desshsv: r.read_field(FieldKind::BcsA, 10)?,
            desshsd: r.read_field(FieldKind::BcsN, 20)?,
            desshtn: r.read_field(FieldKind::BcsA, 120)?,
            desshlpg: r.read_field(FieldKind::BcsA, 125)?,
            desshlpt: r.read_field(FieldKind::BcsA, 25)?,
            desshli: r.read_field(FieldKind::BcsA, 20)?,
            desshlin: r.read_field(FieldKind::BcsA, 120)?,
            desshabs: r.read_field(FieldKind::BcsA, 200)?,
        })
    }

    pub fn write<W: NitfWrite>(&self, w: &mut W) -> Result<()> {
        for field in [
            &self.descrc,
            &self.desshft,
            &self.desshdt,
            &self.desshrp,
            &self.desshsi,
            &self.desshsv,
            &self.desshsd,
            &self.desshtn,
            &self.desshlpg,
            &self.desshlpt,
            &self.desshli,
            &self.desshlin,
            &self.desshabs,
        ] {
            w.write_field(field)?;
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write(&mut buf)?;
        Ok(buf)
    }
}

/// Packages an XML payload and its `XML_DATA_CONTENT` subheader fields
/// into a DES subheader, ready to append to a `Record`.
pub fn bind_xml_des(
    content: &XmlDataContentSubheader,
    namespace_uri: &str,
    schema_version: &str,
) -> Result<DESubheader> {
    let mut content = content.clone();
    content.set_type_namespace(namespace_uri)?;
    content.set_schema_version(schema_version)?;
    let bytes = content.to_bytes()?;
    DESubheader::new_xml_data_content(bytes)
}

/// Recovers the `XML_DATA_CONTENT` fields from a DES subheader already
/// identified as carrying one (`DESubheader::is_xml_data_content`).
pub fn unbind_xml_des(des: &DESubheader) -> Result<XmlDataContentSubheader> {
    if !des.is_xml_data_content()? {
        return Err(nitf_err(
            NitfErrorKind::InvalidObject,
            "DES subheader is not XML_DATA_CONTENT",
        ));
    }
    XmlDataContentSubheader::read(&mut des.user_defined_subheader.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_data_content_subheader_is_exactly_773_bytes() {
        let content = XmlDataContentSubheader::default();
        assert_eq!(content.to_bytes().unwrap().len(), 773);
    }

    #[test]
    fn bind_unbind_round_trips_schema_version() {
        let content = XmlDataContentSubheader::default();
        let des = bind_xml_des(&content, "urn:SICD:1.3.0", "1.3.0").unwrap();
        assert!(des.is_xml_data_content().unwrap());
        assert_eq!(des.desver.as_string().unwrap(), "01");
        let recovered = unbind_xml_des(&des).unwrap();
        assert_eq!(recovered.schema_version().unwrap(), "1.3.0");
        assert_eq!(recovered.type_namespace().unwrap(), "urn:SICD:1.3.0");
    }
}
