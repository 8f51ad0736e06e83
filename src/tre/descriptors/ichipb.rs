//! `ICHIPB`: image chip geometry, a single fixed-length variant (spec
//! section 4.4 bundled-descriptor example).

use crate::field::FieldKind;
use crate::tre::descriptor::{Element, Length, TreDescriptor};

pub fn descriptor() -> TreDescriptor {
    TreDescriptor {
        tag: "ICHIPB",
        wire_len: Some(74),
        elements: vec![
            Element::field("XFRM_FLAG", FieldKind::BcsN, Length::Fixed(2)),
            Element::field("SCALE_FACTOR", FieldKind::BcsN, Length::Fixed(10)),
            Element::field("ANAMRPH_CORR", FieldKind::BcsN, Length::Fixed(1)),
            Element::field("SCANBLK_NUM", FieldKind::BcsN, Length::Fixed(2)),
            Element::field("OP_ROW_11", FieldKind::BcsN, Length::Fixed(12)),
            Element::field("OP_COL_11", FieldKind::BcsN, Length::Fixed(12)),
            Element::field("OP_ROW_12", FieldKind::BcsN, Length::Fixed(12)),
            Element::field("OP_COL_12", FieldKind::BcsN, Length::Fixed(12)),
            Element::field("FULL_IMAGE_ROWS", FieldKind::BcsN, Length::Fixed(6)),
            Element::field("FULL_IMAGE_COLS", FieldKind::BcsN, Length::Fixed(5)),
        ],
    }
}
