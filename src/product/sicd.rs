//! SICD (Sensor Independent Complex Data) metadata: the
//! XML companion describing a complex-image NITF product. Models the
//! sections every SICD carries (`CollectionInfo`, `ImageData`, `GeoData`,
//! `Grid`, `Timeline`, `Position`, `RadarCollection`, `ImageFormation`,
//! `SCPCOA`) plus the optional trailing sections as opaque passthrough XML,
//! since a reader only ever needs to round-trip those, not interpret them.

use serde::{Deserialize, Serialize};

use crate::product::version::{SchemaVersion, VersionUpdater};
use crate::product::xml;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord)]
pub enum SicdVersion {
    V1_1,
    V1_2,
    V1_3,
}

impl SchemaVersion for SicdVersion {
    fn namespace_uri(&self) -> &'static str {
        match self {
            SicdVersion::V1_1 => "urn:SICD:1.1.0",
            SicdVersion::V1_2 => "urn:SICD:1.2.1",
            SicdVersion::V1_3 => "urn:SICD:1.3.0",
        }
    }

    fn latest() -> Self {
        SicdVersion::V1_3
    }
}

impl SicdVersion {
    pub fn from_namespace(uri: &str) -> Result<Self> {
        match uri {
            "urn:SICD:1.1.0" => Ok(SicdVersion::V1_1),
            "urn:SICD:1.2.1" => Ok(SicdVersion::V1_2),
            "urn:SICD:1.3.0" => Ok(SicdVersion::V1_3),
            other => Err(crate::error::nitf_err(
                crate::NitfErrorKind::UnknownVersion,
                format!("unrecognized SICD schema `{other}`"),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarModeType {
    #[serde(rename = "ModeType")]
    pub mode_type: String,
    #[serde(rename = "ModeId", skip_serializing_if = "Option::is_none")]
    pub mode_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInfo {
    #[serde(rename = "CollectorName")]
    pub collector_name: String,
    #[serde(rename = "CoreName")]
    pub core_name: String,
    #[serde(rename = "CollectType", skip_serializing_if = "Option::is_none")]
    pub collect_type: Option<String>,
    #[serde(rename = "RadarMode")]
    pub radar_mode: RadarModeType,
    #[serde(rename = "Classification")]
    pub classification: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowCol {
    #[serde(rename = "Row")]
    pub row: i64,
    #[serde(rename = "Col")]
    pub col: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(rename = "PixelType")]
    pub pixel_type: String,
    #[serde(rename = "NumRows")]
    pub num_rows: u64,
    #[serde(rename = "NumCols")]
    pub num_cols: u64,
    #[serde(rename = "FirstRow")]
    pub first_row: u64,
    #[serde(rename = "FirstCol")]
    pub first_col: u64,
    #[serde(rename = "FullImage")]
    pub full_image: RowCol,
    #[serde(rename = "SCPPixel")]
    pub scp_pixel: RowCol,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatLonAlt {
    #[serde(rename = "Lat")]
    pub lat: f64,
    #[serde(rename = "Lon")]
    pub lon: f64,
    #[serde(rename = "HAE")]
    pub hae: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scp {
    #[serde(rename = "ECF")]
    pub ecf: Xyz,
    #[serde(rename = "LLH")]
    pub llh: LatLonAlt,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xyz {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "Z")]
    pub z: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoData {
    #[serde(rename = "EarthModel")]
    pub earth_model: String,
    #[serde(rename = "SCP")]
    pub scp: Scp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(rename = "CollectStart")]
    pub collect_start: String,
    #[serde(rename = "CollectDuration")]
    pub collect_duration: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarCollection {
    #[serde(rename = "TxFrequencyMin")]
    pub tx_frequency_min: f64,
    #[serde(rename = "TxFrequencyMax")]
    pub tx_frequency_max: f64,
    #[serde(rename = "TxPolarization")]
    pub tx_polarization: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageFormation {
    #[serde(rename = "RcvChanProc")]
    pub rcv_chan_proc: String,
    #[serde(rename = "ImageFormAlgo")]
    pub image_form_algo: String,
    #[serde(rename = "TStartProc")]
    pub t_start_proc: f64,
    #[serde(rename = "TEndProc")]
    pub t_end_proc: f64,
}

/// A minimal, SICD-1.3-current grammar. Fields this crate never has a
/// reason to interpret (`Antenna`, `ErrorStatistics`, `MatchInfo`, the
/// `RgAzComp`/`PFA`/`RMA` image-formation choice, `Radiometric`) are kept
/// as opaque XML so a round-trip never loses them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SicdMetadata {
    #[serde(rename = "@xmlns")]
    pub xmlns: String,
    #[serde(rename = "CollectionInfo")]
    pub collection_info: CollectionInfo,
    #[serde(rename = "ImageData")]
    pub image_data: ImageData,
    #[serde(rename = "GeoData")]
    pub geo_data: GeoData,
    #[serde(rename = "Timeline")]
    pub timeline: Timeline,
    #[serde(rename = "RadarCollection")]
    pub radar_collection: RadarCollection,
    #[serde(rename = "ImageFormation")]
    pub image_formation: ImageFormation,
    #[serde(rename = "$text", skip_serializing_if = "Option::is_none")]
    pub trailing_sections: Option<String>,
    /// Migration diary; not part of the XML payload.
    #[serde(skip, default)]
    pub processing_log: Vec<String>,
}

impl SicdMetadata {
    pub fn parse(xml: &str) -> Result<Self> {
        xml::deserialize(xml)
    }

    pub fn to_xml(&self) -> Result<String> {
        xml::serialize(self)
    }

    pub fn version(&self) -> Result<SicdVersion> {
        SicdVersion::from_namespace(&self.xmlns)
    }
}

impl VersionUpdater for SicdMetadata {
    type Version = SicdVersion;

    fn version(&self) -> SicdVersion {
        SicdVersion::from_namespace(&self.xmlns).unwrap_or(SicdVersion::V1_1)
    }

    fn migrate_one_step(mut self, from: SicdVersion) -> Result<Self> {
        self.xmlns = match from {
            SicdVersion::V1_1 => SicdVersion::V1_2.namespace_uri().to_string(),
            SicdVersion::V1_2 => SicdVersion::V1_3.namespace_uri().to_string(),
            SicdVersion::V1_3 => SicdVersion::V1_3.namespace_uri().to_string(),
        };
        Ok(self)
    }

    fn processing_log_mut(&mut self) -> &mut Vec<String> {
        &mut self.processing_log
    }
}
