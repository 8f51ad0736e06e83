//! The tag-keyed TRE descriptor table. Lookup resolves
//! a tag to its registered variants, picks the one matching the wire
//! length (the `NO_LENGTH` wildcard, if registered, is only ever the last
//! resort), and hands the payload to the engine. A tag with no registered
//! descriptor — whether truly unknown or backed only by a plugin this
//! build can't load — degrades to an opaque blob rather than failing the
//! whole read.

use std::collections::HashMap;

use crate::error::{nitf_err, NitfErrorKind};
use crate::tre::descriptor::TreDescriptor;
use crate::tre::descriptors::{ichipb, iomapa, patcha};
use crate::tre::engine::{self, Decoded};
use crate::Result;

pub enum DecodedOrOpaque {
    Decoded(Decoded),
    Opaque(Vec<u8>),
}

#[derive(Default)]
pub struct Registry {
    descriptors: HashMap<&'static str, Vec<TreDescriptor>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The statically compiled-in descriptor set.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(ichipb::descriptor());
        registry.register(patcha::descriptor_74());
        registry.register(patcha::descriptor_115());
        registry.register(patcha::descriptor_with_patch_table());
        registry.register(iomapa::descriptor_6());
        registry.register(iomapa::descriptor_16());
        registry.register(iomapa::descriptor_91());
        registry.register(iomapa::descriptor_8202());
        registry.register(iomapa::descriptor_wildcard());
        registry
    }

    pub fn register(&mut self, descriptor: TreDescriptor) {
        self.descriptors.entry(descriptor.tag).or_default().push(descriptor);
    }

    fn select<'a>(&'a self, tag: &str, len: usize) -> Option<&'a TreDescriptor> {
        let variants = self.descriptors.get(tag)?;
        variants
            .iter()
            .find(|d| d.wire_len == Some(len))
            .or_else(|| variants.iter().find(|d| d.wire_len.is_none()))
    }

    pub fn decode(&self, tag: &str, data: &[u8]) -> Result<Decoded> {
        let descriptor = self.select(tag, data.len()).ok_or_else(|| {
            nitf_err(
                NitfErrorKind::Parsing,
                format!("no registered descriptor for TRE `{tag}` ({} bytes)", data.len()),
            )
        })?;
        engine::decode(descriptor, data)
    }

    /// Like `decode`, but never fails: an unknown tag or a descriptor
    /// mismatch degrades to carrying the raw bytes untouched.
    pub fn decode_or_opaque(&self, tag: &str, data: &[u8]) -> DecodedOrOpaque {
        match self.decode(tag, data) {
            Ok(decoded) => DecodedOrOpaque::Decoded(decoded),
            Err(e) => {
                log::debug!("TRE `{tag}` fell back to opaque storage: {e}");
                DecodedOrOpaque::Opaque(data.to_vec())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ichipb_decodes_at_exact_length() {
        let registry = Registry::builtin();
        let data = vec![b'0'; 74];
        let decoded = registry.decode("ICHIPB", &data).unwrap();
        assert!(decoded.field("XFRM_FLAG").is_some());
    }

    #[test]
    fn patcha_selects_variant_by_length() {
        let registry = Registry::builtin();
        let short = registry.decode("PATCHA", &vec![b'0'; 74]).unwrap();
        assert!(short.field("CPROJ").is_none() || short.field("SENSOR_ID").is_none());
        let long = registry.decode("PATCHA", &vec![b'0'; 115]).unwrap();
        assert!(long.field("SENSOR_ID").is_some());
    }

    #[test]
    fn patcha_wildcard_decodes_conditional_patch_table() {
        let registry = Registry::builtin();
        let decoded = registry.decode("PATCHA", b"0001Y0100010002").unwrap();
        let entries = decoded.repeated("NPATCH_M1").unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn iomapa_wildcard_only_used_as_last_resort() {
        let registry = Registry::builtin();
        let exact = registry.decode("IOMAPA", &vec![b'0'; 16]).unwrap();
        assert!(exact.field("RESERVED").is_some());
        let odd = registry.decode("IOMAPA", &vec![b'0'; 4000]).unwrap();
        assert!(odd.field("MAP_DATA").is_some());
    }

    #[test]
    fn unknown_tag_falls_back_to_opaque() {
        let registry = Registry::builtin();
        match registry.decode_or_opaque("ZZZZZZ", &[1, 2, 3]) {
            DecodedOrOpaque::Opaque(bytes) => assert_eq!(bytes, vec![1, 2, 3]),
            DecodedOrOpaque::Decoded(_) => panic!("unexpected descriptor match"),
        }
    }
}
