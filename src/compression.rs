//! The compression plugin interface:
//! decoding pixel blocks is delegated to whatever handles the subheader's
//! `IC` code. `JasPer`/`OpenJPEG`-backed JPEG 2000 (`C8`/`M8`) and the CGM
//! graphic reader are treated as an external collaborator and out of scope
//! here — this module only has to make the interface real, not every codec
//! behind it.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::rc::Rc;

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::{nitf_err, NitfErrorKind};
use crate::image::BlockingInfo;
use crate::Result;

/// A codec bound to one or more `IC` values.
pub trait CompressionPlugin {
    fn codes(&self) -> &[&'static str];
    fn decompress(&self, blocking: &BlockingInfo, compressed: &[u8]) -> Result<Vec<u8>>;
    fn compress(&self, blocking: &BlockingInfo, raw: &[u8]) -> Result<Vec<u8>>;
}

/// `NC`/`NM`: no compression, blocks are stored and read back verbatim.
pub struct Uncompressed;

impl CompressionPlugin for Uncompressed {
    fn codes(&self) -> &[&'static str] {
        &["NC", "NM"]
    }

    fn decompress(&self, _blocking: &BlockingInfo, compressed: &[u8]) -> Result<Vec<u8>> {
        Ok(compressed.to_vec())
    }

    fn compress(&self, _blocking: &BlockingInfo, raw: &[u8]) -> Result<Vec<u8>> {
        Ok(raw.to_vec())
    }
}

/// An illustrative `flate2`-backed plugin registered under the vendor
/// range (`ZZ`), demonstrating the interface's shape for a real lossless
/// codec without claiming to be a standard NITF `IC` value.
pub struct DeflateDemo;

impl CompressionPlugin for DeflateDemo {
    fn codes(&self) -> &[&'static str] {
        &["ZZ"]
    }

    fn decompress(&self, _blocking: &BlockingInfo, compressed: &[u8]) -> Result<Vec<u8>> {
        let mut decoder = ZlibDecoder::new(compressed);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .map_err(|e| nitf_err(NitfErrorKind::Decompression, e.to_string()))?;
        Ok(out)
    }

    fn compress(&self, _blocking: &BlockingInfo, raw: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(raw)
            .map_err(|e| nitf_err(NitfErrorKind::Compression, e.to_string()))?;
        encoder
            .finish()
            .map_err(|e| nitf_err(NitfErrorKind::Compression, e.to_string()))
    }
}

/// Maps an `IC` value to the plugin handling it. `C8`/`M8` (JPEG 2000) and
/// `C1`/`C3`..`C5`/`C7` (the other out-of-scope still-image codecs) are
/// deliberately unregistered; callers see `Decompression`/`Compression`
/// rather than a silent no-op.
#[derive(Default)]
pub struct CompressionRegistry {
    plugins: HashMap<&'static str, Rc<dyn CompressionPlugin>>,
}

impl CompressionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Rc::new(Uncompressed));
        registry.register(Rc::new(DeflateDemo));
        registry
    }

    /// A plugin may register under several `IC` codes at once (`Uncompressed`
    /// covers both `NC` and `NM`); the `Rc` is shared rather than cloned per
    /// code.
    pub fn register(&mut self, plugin: Rc<dyn CompressionPlugin>) {
        for &code in plugin.codes() {
            self.plugins.insert(code, Rc::clone(&plugin));
        }
    }

    pub fn get(&self, code: &str) -> Option<&dyn CompressionPlugin> {
        self.plugins.get(code).map(|b| b.as_ref())
    }

    pub fn decompress(&self, code: &str, blocking: &BlockingInfo, data: &[u8]) -> Result<Vec<u8>> {
        self.get(code)
            .ok_or_else(|| {
                nitf_err(
                    NitfErrorKind::Decompression,
                    format!("no compression plugin registered for IC `{code}`"),
                )
            })?
            .decompress(blocking, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncompressed_round_trips() {
        let registry = CompressionRegistry::builtin();
        let blocking = BlockingInfo {
            nbpr: 1,
            nbpc: 1,
            nppbh: 2,
            nppbv: 2,
            nbands: 1,
            bytes_per_pixel: 1,
        };
        let data = vec![1, 2, 3, 4];
        let out = registry.decompress("NC", &blocking, &data).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn deflate_demo_round_trips() {
        let plugin = DeflateDemo;
        let blocking = BlockingInfo {
            nbpr: 1,
            nbpc: 1,
            nppbh: 2,
            nppbv: 2,
            nbands: 1,
            bytes_per_pixel: 1,
        };
        let raw = b"hello hello hello".to_vec();
        let compressed = plugin.compress(&blocking, &raw).unwrap();
        let decompressed = plugin.decompress(&blocking, &compressed).unwrap();
        assert_eq!(decompressed, raw);
    }

    #[test]
    fn unknown_code_fails_decompression() {
        let registry = CompressionRegistry::builtin();
        let blocking = BlockingInfo {
            nbpr: 1,
            nbpc: 1,
            nppbh: 2,
            nppbv: 2,
            nbands: 1,
            bytes_per_pixel: 1,
        };
        assert!(registry.decompress("C8", &blocking, &[]).is_err());
    }
}
