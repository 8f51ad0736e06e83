//! CPHD (Compensated Phase History Data): a side-car
//! file family of its own, framed by an ASCII `KEY := VALUE` header rather
//! than NITF segments. The wideband signal block is passed through
//! untouched — this crate locates it by offset/size but never interprets
//! phase-history samples.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::{nitf_err, NitfErrorKind};
use crate::product::version::{SchemaVersion, VersionUpdater};
use crate::product::xml;
use crate::Result;

/// The header is terminated by a form-feed then newline, never embedded
/// in a `KEY := VALUE` line.
const HEADER_TERMINATOR: &[u8] = b"\x0c\n";

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord)]
pub enum CphdVersion {
    V1_0,
    V1_1,
}

impl SchemaVersion for CphdVersion {
    fn namespace_uri(&self) -> &'static str {
        match self {
            CphdVersion::V1_0 => "urn:CPHD:1.0.1",
            CphdVersion::V1_1 => "urn:CPHD:1.1.0",
        }
    }

    fn latest() -> Self {
        CphdVersion::V1_1
    }
}

impl CphdVersion {
    pub fn from_namespace(uri: &str) -> Result<Self> {
        match uri {
            "urn:CPHD:1.0.1" => Ok(CphdVersion::V1_0),
            "urn:CPHD:1.1.0" => Ok(CphdVersion::V1_1),
            other => Err(nitf_err(
                NitfErrorKind::UnknownVersion,
                format!("unrecognized CPHD schema `{other}`"),
            )),
        }
    }
}

/// The ASCII key/value file header: `XML_DATA_SIZE`, `XML_BYTE_OFFSET`,
/// `VB_DATA_SIZE`, `VB_BYTE_OFFSET`, `CPHD_DATA_SIZE`, `CPHD_BYTE_OFFSET`,
/// and the classification markings `CLASSIFICATION`/`RELEASE_INFO`.
/// The first line of the header, conventionally `"CPHD/0.3"` or
/// `"CPHD/1.0"`, carried verbatim rather than parsed into an enum.
#[derive(Debug, Clone, Default)]
pub struct CphdFileHeader {
    pub version_line: String,
    fields: BTreeMap<String, String>,
}

impl CphdFileHeader {
    pub fn read<R: Read>(r: &mut R) -> Result<(Self, u64)> {
        let mut raw = Vec::new();
        let mut byte = [0u8; 1];
        let mut consumed = 0u64;
        loop {
            let n = r
                .read(&mut byte)
                .map_err(|e| nitf_err(NitfErrorKind::ReadingFromFile, e.to_string()))?;
            if n == 0 {
                return Err(nitf_err(
                    NitfErrorKind::Parsing,
                    "CPHD header never found its form-feed terminator",
                ));
            }
            raw.push(byte[0]);
            consumed += 1;
            if raw.ends_with(HEADER_TERMINATOR) {
                break;
            }
        }
        raw.truncate(raw.len() - HEADER_TERMINATOR.len());
        let text = String::from_utf8(raw)
            .map_err(|e| nitf_err(NitfErrorKind::Parsing, e.to_string()))?;

        let mut lines = text.lines();
        let version_line = lines
            .next()
            .ok_or_else(|| nitf_err(NitfErrorKind::Parsing, "empty CPHD header"))?
            .to_string();

        let mut fields = BTreeMap::new();
        for line in lines {
            let (key, value) = line.split_once(":=").ok_or_else(|| {
                nitf_err(NitfErrorKind::Parsing, format!("malformed CPHD header line `{line}`"))
            })?;
            fields.insert(key.trim().to_string(), value.trim().to_string());
        }
        Ok((Self { version_line, fields }, consumed))
    }

    pub fn write<W: Write>(&self, w: &mut W) -> Result<()> {
        let mut out = String::new();
        out.push_str(&self.version_line);
        out.push('\n');
        for (key, value) in &self.fields {
            out.push_str(&format!("{key} := {value}\n"));
        }
        w.write_all(out.as_bytes())
            .and_then(|_| w.write_all(HEADER_TERMINATOR))
            .map_err(|e| nitf_err(NitfErrorKind::WritingToFile, e.to_string()))
    }

    pub fn set(&mut self, key: &str, value: impl ToString) {
        self.fields.insert(key.to_string(), value.to_string());
    }

    fn get_u64(&self, key: &str) -> Result<u64> {
        self.fields
            .get(key)
            .ok_or_else(|| nitf_err(NitfErrorKind::MissingRequired, format!("CPHD header missing `{key}`")))?
            .parse()
            .map_err(|_| nitf_err(NitfErrorKind::Parsing, format!("CPHD header `{key}` is not numeric")))
    }

    pub fn xml_block(&self) -> Result<(u64, u64)> {
        Ok((self.get_u64("XML_BYTE_OFFSET")?, self.get_u64("XML_DATA_SIZE")?))
    }

    pub fn vb_block(&self) -> Result<(u64, u64)> {
        Ok((self.get_u64("VB_BYTE_OFFSET")?, self.get_u64("VB_DATA_SIZE")?))
    }

    pub fn cphd_block(&self) -> Result<(u64, u64)> {
        Ok((self.get_u64("CPHD_BYTE_OFFSET")?, self.get_u64("CPHD_DATA_SIZE")?))
    }

    pub fn classification(&self) -> Option<&str> {
        self.fields.get("CLASSIFICATION").map(String::as_str)
    }

    pub fn release_info(&self) -> Option<&str> {
        self.fields.get("RELEASE_INFO").map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionId {
    #[serde(rename = "CollectorName")]
    pub collector_name: String,
    #[serde(rename = "CollectType", skip_serializing_if = "Option::is_none")]
    pub collect_type: Option<String>,
    #[serde(rename = "RadarMode")]
    pub radar_mode: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Global {
    #[serde(rename = "DomainType")]
    pub domain_type: String,
    #[serde(rename = "PhaseSGN")]
    pub phase_sgn: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Data {
    #[serde(rename = "SignalArrayFormat")]
    pub signal_array_format: String,
    #[serde(rename = "NumBytesPVP")]
    pub num_bytes_pvp: u64,
    #[serde(rename = "NumCPHDChannels")]
    pub num_channels: u32,
}

/// `SceneCoordinates`/`Channel`/`PVP`/`SupportArray`/`Dwell`/`ReferenceGeometry`/
/// `Antenna`/`TxRcv`/`ErrorParameters`/`ProductInfo` round-trip as opaque XML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CphdMetadata {
    #[serde(rename = "@xmlns")]
    pub xmlns: String,
    #[serde(rename = "CollectionID")]
    pub collection_id: CollectionId,
    #[serde(rename = "Global")]
    pub global: Global,
    #[serde(rename = "Data")]
    pub data: Data,
    #[serde(rename = "$text", skip_serializing_if = "Option::is_none")]
    pub trailing_sections: Option<String>,
    /// Migration diary; not part of the XML payload.
    #[serde(skip, default)]
    pub processing_log: Vec<String>,
}

impl CphdMetadata {
    pub fn parse(xml: &str) -> Result<Self> {
        xml::deserialize(xml)
    }

    pub fn to_xml(&self) -> Result<String> {
        xml::serialize(self)
    }

    pub fn version(&self) -> Result<CphdVersion> {
        CphdVersion::from_namespace(&self.xmlns)
    }
}

impl VersionUpdater for CphdMetadata {
    type Version = CphdVersion;

    fn version(&self) -> CphdVersion {
        CphdVersion::from_namespace(&self.xmlns).unwrap_or(CphdVersion::V1_0)
    }

    fn migrate_one_step(mut self, from: CphdVersion) -> Result<Self> {
        self.xmlns = match from {
            CphdVersion::V1_0 => CphdVersion::V1_1.namespace_uri().to_string(),
            CphdVersion::V1_1 => CphdVersion::V1_1.namespace_uri().to_string(),
        };
        Ok(self)
    }

    fn processing_log_mut(&mut self) -> &mut Vec<String> {
        &mut self.processing_log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_round_trips() {
        let mut header = CphdFileHeader {
            version_line: "CPHD/1.0".to_string(),
            fields: BTreeMap::new(),
        };
        header.set("XML_BYTE_OFFSET", 128);
        header.set("XML_DATA_SIZE", 4096);
        header.set("VB_BYTE_OFFSET", 4224);
        header.set("VB_DATA_SIZE", 2048);
        header.set("CPHD_BYTE_OFFSET", 6272);
        header.set("CPHD_DATA_SIZE", 1_000_000);
        header.set("CLASSIFICATION", "UNCLASSIFIED");
        header.set("RELEASE_INFO", "NONE");

        let mut buf = Vec::new();
        header.write(&mut buf).unwrap();
        let (parsed, consumed) = CphdFileHeader::read(&mut buf.as_slice()).unwrap();
        assert_eq!(consumed, buf.len() as u64);
        assert_eq!(parsed.xml_block().unwrap(), (128, 4096));
        assert_eq!(parsed.cphd_block().unwrap(), (6272, 1_000_000));
        assert_eq!(parsed.classification(), Some("UNCLASSIFIED"));
        assert_eq!(parsed.release_info(), Some("NONE"));
    }
}
