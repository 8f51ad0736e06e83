//! `IOMAPA`: I/O mapping auxiliary TRE with four registered variants — 6,
//! 16 and 91-byte fixed layouts plus an 8202-byte layout, and a
//! `NO_LENGTH` wildcard that accepts any remaining size and is always
//! registered last.

use crate::field::FieldKind;
use crate::tre::descriptor::{Element, Length, TreDescriptor};

pub fn descriptor_6() -> TreDescriptor {
    TreDescriptor {
        tag: "IOMAPA",
        wire_len: Some(6),
        elements: vec![Element::field("FLAG", FieldKind::BcsN, Length::Fixed(6))],
    }
}

pub fn descriptor_16() -> TreDescriptor {
    TreDescriptor {
        tag: "IOMAPA",
        wire_len: Some(16),
        elements: vec![
            Element::field("FLAG", FieldKind::BcsN, Length::Fixed(6)),
            Element::field("RESERVED", FieldKind::Binary, Length::Fixed(10)),
        ],
    }
}

pub fn descriptor_91() -> TreDescriptor {
    TreDescriptor {
        tag: "IOMAPA",
        wire_len: Some(91),
        elements: vec![
            Element::field("FLAG", FieldKind::BcsN, Length::Fixed(6)),
            Element::field("RESERVED", FieldKind::Binary, Length::Fixed(10)),
            Element::field("NO_OF_SEGMENTS", FieldKind::Binary, Length::Fixed(75)),
        ],
    }
}

pub fn descriptor_8202() -> TreDescriptor {
    TreDescriptor {
        tag: "IOMAPA",
        wire_len: Some(8202),
        elements: vec![
            Element::field("FLAG", FieldKind::BcsN, Length::Fixed(6)),
            Element::field("RESERVED", FieldKind::Binary, Length::Fixed(10)),
            Element::field("NO_OF_SEGMENTS", FieldKind::Binary, Length::Fixed(75)),
            Element::field("MAP_DATA", FieldKind::Binary, Length::Fixed(8111)),
        ],
    }
}

/// The `NO_LENGTH` wildcard: matches any size not claimed by a fixed
/// variant above. Must be registered last so fixed-length variants always
/// get first refusal.
pub fn descriptor_wildcard() -> TreDescriptor {
    TreDescriptor {
        tag: "IOMAPA",
        wire_len: None,
        elements: vec![
            Element::field("FLAG", FieldKind::BcsN, Length::Fixed(6)),
            Element::field("MAP_DATA", FieldKind::Binary, Length::Remaining),
        ],
    }
}
