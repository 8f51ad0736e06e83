//! C6: the product layer — SICD/SIDD/CPHD metadata object
//! models, namespace-dispatched XML transcoding, schema-version migration,
//! and the DES binding that ties an XML payload to a NITF record.

pub mod cphd;
pub mod des_binding;
pub mod sicd;
pub mod sidd;
pub mod version;
pub mod xml;

pub use cphd::{CphdFileHeader, CphdMetadata, CphdVersion};
pub use des_binding::{bind_xml_des, unbind_xml_des, XmlDataContentSubheader};
pub use sicd::{SicdMetadata, SicdVersion};
pub use sidd::{SiddMetadata, SiddVersion};
pub use version::{SchemaVersion, VersionUpdater};

use crate::error::{nitf_err, NitfErrorKind};
use crate::Result;

/// Which product family a DES's XML payload belongs to, resolved purely
/// from the root element's namespace-URI.
#[derive(Debug, Clone)]
pub enum Product {
    Sicd(Box<SicdMetadata>),
    Sidd(Box<SiddMetadata>),
    Cphd(Box<CphdMetadata>),
}

/// Dispatches on the sniffed `xmlns` prefix (`urn:SICD:`, `urn:SIDD:`,
/// `urn:CPHD:`) and parses into the matching object model.
pub fn parse_product_xml(payload: &str) -> Result<Product> {
    let namespace = xml::sniff_namespace(payload.as_bytes())?;
    if namespace.starts_with("urn:SICD:") {
        Ok(Product::Sicd(Box::new(SicdMetadata::parse(payload)?)))
    } else if namespace.starts_with("urn:SIDD:") {
        Ok(Product::Sidd(Box::new(SiddMetadata::parse(payload)?)))
    } else if namespace.starts_with("urn:CPHD:") {
        Ok(Product::Cphd(Box::new(CphdMetadata::parse(payload)?)))
    } else {
        Err(nitf_err(
            NitfErrorKind::UnknownVersion,
            format!("unrecognized product namespace `{namespace}`"),
        ))
    }
}
