//! User-defined and extended header TRE blocks (`UDHD`/`XHD` and their
//! per-segment equivalents), a flat ordered list keyed by 6-byte tag rather
//! than a map, since the same tag may legally repeat within one block
//!.

use crate::error::{nitf_err, NitfErrorKind};
use crate::Result;

/// One `CETAG`/`CEL`/data triple as it appears on the wire, undecoded.
#[derive(Debug, Clone)]
pub struct TreEntry {
    pub tag: String,
    pub data: Vec<u8>,
}

impl TreEntry {
    /// `CETAG` (6) + `CEL` (5) + the raw TRE payload.
    pub fn wire_len(&self) -> usize {
        6 + 5 + self.data.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Extensions {
    entries: Vec<TreEntry>,
}

impl Extensions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tag: impl Into<String>, data: Vec<u8>) -> Result<()> {
        let tag = tag.into();
        if tag.len() > 6 {
            return Err(nitf_err(
                NitfErrorKind::Parsing,
                format!("TRE tag `{tag}` longer than 6 bytes"),
            ));
        }
        if data.len() > 99_999 {
            return Err(nitf_err(
                NitfErrorKind::OutOfRange,
                format!("TRE `{tag}` payload of {} bytes exceeds CEL width", data.len()),
            ));
        }
        self.entries.push(TreEntry { tag, data });
        Ok(())
    }

    pub fn get(&self, tag: &str) -> Option<&TreEntry> {
        self.entries.iter().find(|e| e.tag == tag)
    }

    pub fn get_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TreEntry> {
        self.entries.iter().filter(move |e| e.tag == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TreEntry> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total serialized size of every entry, used to fill in `UDHDL`/`XHDL`
    /// (or their per-segment equivalents) before the block is written.
    pub fn total_len(&self) -> usize {
        self.entries.iter().map(TreEntry::wire_len).sum()
    }

    /// Serializes every entry as `CETAG(6) CEL(5) data`, back to back, the
    /// wire format of a `UDHD`/`XHD` block once its length and overflow
    /// fields have already been written.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.total_len());
        for entry in &self.entries {
            out.extend_from_slice(format!("{:<6}", entry.tag).as_bytes());
            out.extend_from_slice(format!("{:05}", entry.data.len()).as_bytes());
            out.extend_from_slice(&entry.data);
        }
        out
    }

    /// Merges another block's entries onto the end of this one, used to
    /// combine a segment's `UDHD` and `XHD` blocks into one field on read.
    pub fn extend(&mut self, other: Extensions) {
        self.entries.extend(other.entries);
    }

    /// Parses a `UDHD`/`XHD` block back into its `CETAG`/`CEL`/data entries.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut entries = Vec::new();
        let mut cursor = bytes;
        while !cursor.is_empty() {
            if cursor.len() < 11 {
                return Err(nitf_err(
                    NitfErrorKind::Parsing,
                    "truncated CETAG/CEL pair at end of extensions block",
                ));
            }
            let tag = String::from_utf8_lossy(&cursor[0..6]).trim().to_string();
            let len: usize = std::str::from_utf8(&cursor[6..11])
                .ok()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| nitf_err(NitfErrorKind::Parsing, format!("malformed CEL for TRE `{tag}`")))?;
            cursor = &cursor[11..];
            if cursor.len() < len {
                return Err(nitf_err(
                    NitfErrorKind::Parsing,
                    format!("TRE `{tag}` declares {len} bytes but only {} remain", cursor.len()),
                ));
            }
            entries.push(TreEntry {
                tag,
                data: cursor[..len].to_vec(),
            });
            cursor = &cursor[len..];
        }
        Ok(Self { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_rejects_overlong_tag() {
        let mut ext = Extensions::new();
        assert!(ext.push("TOOLONGTAG", vec![]).is_err());
    }

    #[test]
    fn total_len_sums_wire_lengths() {
        let mut ext = Extensions::new();
        ext.push("ICHIPB", vec![0u8; 74]).unwrap();
        ext.push("PATCHA", vec![0u8; 115]).unwrap();
        assert_eq!(ext.total_len(), (6 + 5 + 74) + (6 + 5 + 115));
    }

    #[test]
    fn encode_decode_round_trips() {
        let mut ext = Extensions::new();
        ext.push("ICHIPB", vec![b'9'; 74]).unwrap();
        ext.push("IOMAPA", vec![b'7'; 16]).unwrap();
        let encoded = ext.encode();
        assert_eq!(encoded.len(), ext.total_len());
        let decoded = Extensions::decode(&encoded).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded.get("ICHIPB").unwrap().data.len(), 74);
        assert_eq!(decoded.get("IOMAPA").unwrap().data.len(), 16);
    }

    #[test]
    fn extend_appends_entries_in_order() {
        let mut udhd = Extensions::new();
        udhd.push("ICHIPB", vec![0u8; 74]).unwrap();
        let mut xhd = Extensions::new();
        xhd.push("IOMAPA", vec![0u8; 16]).unwrap();
        udhd.extend(xhd);
        assert_eq!(udhd.len(), 2);
        assert_eq!(udhd.iter().map(|e| e.tag.as_str()).collect::<Vec<_>>(), ["ICHIPB", "IOMAPA"]);
    }
}
