//! XML transcoding plumbing shared by SICD/SIDD/CPHD:
//! every product's root element carries its schema as an `xmlns`
//! attribute, so dispatch is a matter of sniffing that URI before handing
//! the document to `quick_xml::de`.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{nitf_err, NitfErrorKind};
use crate::Result;

/// Reads just far enough into the document to recover the root element's
/// `xmlns` attribute, without materializing the whole tree.
pub fn sniff_namespace(xml: &[u8]) -> Result<String> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    loop {
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| nitf_err(NitfErrorKind::InvalidXml, e.to_string()))?
        {
            Event::Start(e) | Event::Empty(e) => {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"xmlns" {
                        let value = attr
                            .unescape_value()
                            .map_err(|err| nitf_err(NitfErrorKind::InvalidXml, err.to_string()))?;
                        return Ok(value.into_owned());
                    }
                }
                return Err(nitf_err(
                    NitfErrorKind::InvalidXml,
                    "root element carries no xmlns attribute",
                ));
            }
            Event::Eof => {
                return Err(nitf_err(
                    NitfErrorKind::InvalidXml,
                    "document has no root element",
                ))
            }
            _ => {}
        }
        buf.clear();
    }
}

pub fn deserialize<T: serde::de::DeserializeOwned>(xml: &str) -> Result<T> {
    quick_xml::de::from_str(xml).map_err(|e| nitf_err(NitfErrorKind::InvalidXml, e.to_string()))
}

pub fn serialize<T: serde::Serialize>(value: &T) -> Result<String> {
    quick_xml::se::to_string(value).map_err(|e| nitf_err(NitfErrorKind::InvalidXml, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniff_namespace_reads_root_xmlns() {
        let xml = br#"<SICD xmlns="urn:SICD:1.3.0"><CollectionInfo/></SICD>"#;
        assert_eq!(sniff_namespace(xml).unwrap(), "urn:SICD:1.3.0");
    }

    #[test]
    fn sniff_namespace_fails_without_xmlns() {
        let xml = br#"<SICD><CollectionInfo/></SICD>"#;
        assert!(sniff_namespace(xml).is_err());
    }
}
