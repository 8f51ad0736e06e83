//! `PATCHA`: SAR patch-geometry auxiliary TRE with two fixed-width
//! registered variants — a 74-byte base layout and a 115-byte layout
//! carrying additional sensor/calibration fields — plus a `NO_LENGTH`
//! variant for files that append a conditional per-patch identifier table.

use crate::field::FieldKind;
use crate::tre::descriptor::{ArithOp, CountOperand, CountSpec, Element, Length, Relation, TreDescriptor};

fn base_fields() -> Vec<Element> {
    vec![
        Element::field("PAT_NO", FieldKind::BcsN, Length::Fixed(4)),
        Element::field("LAST_PAT_FLAG", FieldKind::BcsA, Length::Fixed(1)),
        Element::field("LNSTRT", FieldKind::BcsN, Length::Fixed(7)),
        Element::field("LNSTOP", FieldKind::BcsN, Length::Fixed(7)),
        Element::field("AZL", FieldKind::BcsN, Length::Fixed(5)),
        Element::field("NVL", FieldKind::BcsN, Length::Fixed(5)),
        Element::field("FVL", FieldKind::BcsN, Length::Fixed(5)),
        Element::field("NPIXEL", FieldKind::BcsN, Length::Fixed(5)),
        Element::field("FVPIX", FieldKind::BcsN, Length::Fixed(5)),
        Element::field("FRAME", FieldKind::BcsN, Length::Fixed(3)),
        Element::field("CDPDATETIME", FieldKind::BcsN, Length::Fixed(14)),
        Element::field("UTC", FieldKind::BcsN, Length::Fixed(8)),
        Element::field("CPROJ", FieldKind::BcsA, Length::Fixed(5)),
    ]
}

pub fn descriptor_74() -> TreDescriptor {
    TreDescriptor {
        tag: "PATCHA",
        wire_len: Some(74),
        elements: base_fields(),
    }
}

pub fn descriptor_115() -> TreDescriptor {
    let mut elements = base_fields();
    elements.extend([
        Element::field("SENSOR_ID", FieldKind::BcsA, Length::Fixed(6)),
        Element::field("PLAT_ID", FieldKind::BcsA, Length::Fixed(6)),
        Element::field("OP_MODE", FieldKind::BcsA, Length::Fixed(3)),
        Element::field("CAL_DATE", FieldKind::BcsN, Length::Fixed(8)),
        Element::field("GRAZING_ANG", FieldKind::BcsN, Length::Fixed(5)),
        Element::field("SQUINT_ANG", FieldKind::BcsN, Length::Fixed(5)),
        Element::field("AZ_RES", FieldKind::BcsN, Length::Fixed(4)),
        Element::field("RG_RES", FieldKind::BcsN, Length::Fixed(4)),
    ]);
    TreDescriptor {
        tag: "PATCHA",
        wire_len: Some(115),
        elements,
    }
}

/// A base patch record followed by an optional per-patch identifier table:
/// present only when `LAST_PAT_FLAG` reads `Y` (case-insensitive), with
/// `NPATCH_M1` + 1 entries (the field stores a zero-based count). Must be
/// registered after the fixed-width variants so they get first refusal.
pub fn descriptor_with_patch_table() -> TreDescriptor {
    TreDescriptor {
        tag: "PATCHA",
        wire_len: None,
        elements: vec![
            Element::field("PAT_NO", FieldKind::BcsN, Length::Fixed(4)),
            Element::field("LAST_PAT_FLAG", FieldKind::BcsA, Length::Fixed(1)),
            Element::Conditional {
                field: "LAST_PAT_FLAG",
                relation: Relation::EqIgnoreCase,
                value: "y",
                body: vec![
                    Element::field("NPATCH_M1", FieldKind::BcsN, Length::Fixed(2)),
                    Element::Loop {
                        count: CountSpec::Function {
                            field: "NPATCH_M1",
                            op: ArithOp::Add,
                            operand: CountOperand::Const(1),
                        },
                        body: vec![Element::field("PATCH_ID", FieldKind::BcsN, Length::Fixed(4))],
                    },
                ],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tre::engine::decode;

    #[test]
    fn patch_table_present_when_last_pat_flag_is_y() {
        let descriptor = descriptor_with_patch_table();
        let data = b"0001Y0100010002";
        let decoded = decode(&descriptor, data).unwrap();
        assert_eq!(decoded.field("PAT_NO").unwrap().as_string().unwrap(), "0001");
        let entries = decoded.repeated("NPATCH_M1").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].field("PATCH_ID").unwrap().as_string().unwrap(), "0001");
        assert_eq!(entries[1].field("PATCH_ID").unwrap().as_string().unwrap(), "0002");
    }

    #[test]
    fn patch_table_absent_when_last_pat_flag_is_n() {
        let descriptor = descriptor_with_patch_table();
        let decoded = decode(&descriptor, b"0001N").unwrap();
        assert!(decoded.repeated("NPATCH_M1").is_none());
    }
}
