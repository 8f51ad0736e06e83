//! Error-kind taxonomy composed into [`anyhow::Error`] at
//! call sites, wrapping `io::Error` and friends into `anyhow::Result`
//! rather than inventing a dedicated error type per module.

use thiserror::Error;

/// I/O and structural error kinds, surfaced up to the caller of the
/// Reader/Writer. Plugin-load failure is the only kind that is ever
/// recovered locally (it degrades to opaque-blob TRE handling).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NitfErrorKind {
    Memory,
    InvalidObject,
    ReadingFromFile,
    WritingToFile,
    Seeking,
    Parsing,
    Compression,
    Decompression,
    LoadingDll,
    UnloadingDll,
    RetrievingDllHook,
    UninitializedDllRead,
    IntegerOverflow,
    InvalidXml,
    SchemaValidation,
    UnknownVersion,
    MissingRequired,
    OutOfRange,
}

impl std::fmt::Display for NitfErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Memory => "Memory",
            Self::InvalidObject => "InvalidObject",
            Self::ReadingFromFile => "ReadingFromFile",
            Self::WritingToFile => "WritingToFile",
            Self::Seeking => "Seeking",
            Self::Parsing => "Parsing",
            Self::Compression => "Compression",
            Self::Decompression => "Decompression",
            Self::LoadingDll => "LoadingDll",
            Self::UnloadingDll => "UnloadingDll",
            Self::RetrievingDllHook => "RetrievingDllHook",
            Self::UninitializedDllRead => "UninitializedDllRead",
            Self::IntegerOverflow => "IntegerOverflow",
            Self::InvalidXml => "InvalidXml",
            Self::SchemaValidation => "SchemaValidation",
            Self::UnknownVersion => "UnknownVersion",
            Self::MissingRequired => "MissingRequired",
            Self::OutOfRange => "OutOfRange",
        };
        f.write_str(name)
    }
}

/// A classified error carrying its kind and, for product-level validation
/// errors, the XPath of the offending element.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct NitfError {
    pub kind: NitfErrorKind,
    pub message: String,
    pub xpath: Option<String>,
}

impl NitfError {
    pub fn new(kind: NitfErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            xpath: None,
        }
    }

    pub fn with_xpath(mut self, xpath: impl Into<String>) -> Self {
        self.xpath = Some(xpath.into());
        self
    }
}

/// Convenience constructor used throughout the crate, mirroring the
/// teacher's `anyhow!(...)` call sites.
pub fn nitf_err(kind: NitfErrorKind, message: impl Into<String>) -> anyhow::Error {
    anyhow::Error::new(NitfError::new(kind, message))
}
