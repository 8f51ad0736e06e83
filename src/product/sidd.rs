//! SIDD (Sensor Independent Derived Data) metadata: the
//! XML companion describing a derived (detected, ortho-rectified, or
//! otherwise processed) image NITF product.

use serde::{Deserialize, Serialize};

use crate::product::version::{SchemaVersion, VersionUpdater};
use crate::product::xml;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord)]
pub enum SiddVersion {
    V2_0,
    V3_0,
}

impl SchemaVersion for SiddVersion {
    fn namespace_uri(&self) -> &'static str {
        match self {
            SiddVersion::V2_0 => "urn:SIDD:2.0.0",
            SiddVersion::V3_0 => "urn:SIDD:3.0.0",
        }
    }

    fn latest() -> Self {
        SiddVersion::V3_0
    }
}

impl SiddVersion {
    pub fn from_namespace(uri: &str) -> Result<Self> {
        match uri {
            "urn:SIDD:2.0.0" => Ok(SiddVersion::V2_0),
            "urn:SIDD:3.0.0" => Ok(SiddVersion::V3_0),
            other => Err(crate::error::nitf_err(
                crate::NitfErrorKind::UnknownVersion,
                format!("unrecognized SIDD schema `{other}`"),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreation {
    #[serde(rename = "ProcessorInformation")]
    pub processor_information: String,
    #[serde(rename = "Classification")]
    pub classification: String,
    #[serde(rename = "ProductName")]
    pub product_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Display {
    #[serde(rename = "PixelType")]
    pub pixel_type: String,
    #[serde(rename = "NumBands")]
    pub num_bands: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(rename = "PixelFootprint")]
    pub pixel_footprint_rows: u64,
    #[serde(rename = "ValidData", skip_serializing_if = "Option::is_none")]
    pub valid_data: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExploitationFeatures {
    #[serde(rename = "Collection")]
    pub collection: String,
}

/// `Georeferencing`/`RadiometricInformation`/`Compression`/`DED`/`Annotations`
/// are carried opaquely, same rationale as SICD's trailing sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiddMetadata {
    #[serde(rename = "@xmlns")]
    pub xmlns: String,
    #[serde(rename = "ProductCreation")]
    pub product_creation: ProductCreation,
    #[serde(rename = "Display")]
    pub display: Display,
    #[serde(rename = "Measurement")]
    pub measurement: Measurement,
    #[serde(rename = "ExploitationFeatures")]
    pub exploitation_features: ExploitationFeatures,
    #[serde(rename = "$text", skip_serializing_if = "Option::is_none")]
    pub trailing_sections: Option<String>,
    /// Migration diary; not part of the XML payload.
    #[serde(skip, default)]
    pub processing_log: Vec<String>,
}

impl SiddMetadata {
    pub fn parse(xml: &str) -> Result<Self> {
        xml::deserialize(xml)
    }

    pub fn to_xml(&self) -> Result<String> {
        xml::serialize(self)
    }

    pub fn version(&self) -> Result<SiddVersion> {
        SiddVersion::from_namespace(&self.xmlns)
    }
}

impl VersionUpdater for SiddMetadata {
    type Version = SiddVersion;

    fn version(&self) -> SiddVersion {
        SiddVersion::from_namespace(&self.xmlns).unwrap_or(SiddVersion::V2_0)
    }

    fn migrate_one_step(mut self, from: SiddVersion) -> Result<Self> {
        self.xmlns = match from {
            SiddVersion::V2_0 => SiddVersion::V3_0.namespace_uri().to_string(),
            SiddVersion::V3_0 => SiddVersion::V3_0.namespace_uri().to_string(),
        };
        Ok(self)
    }

    fn processing_log_mut(&mut self) -> &mut Vec<String> {
        &mut self.processing_log
    }
}
