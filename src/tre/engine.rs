//! The TRE mini-compiler's execution engine. Decoding
//! walks the descriptor tree over a stack of frames rather than giving
//! each nested scope a pointer back to its parent: a loop iteration pushes
//! a fresh frame, decodes its body into it, and pops it onto the parent's
//! result list. Field lookups (for a later field's length or a
//! conditional's test) walk the stack from the top down.

use std::collections::HashMap;

use crate::error::{nitf_err, NitfErrorKind};
use crate::field::Field;
use crate::tre::descriptor::{ArithOp, CountOperand, CountSpec, Element, Length, Relation, TreDescriptor};
use crate::Result;

/// A decoded field, or a decoded loop body (one entry per iteration).
#[derive(Debug, Clone)]
pub enum Value {
    Field(Field),
    Repeated(Vec<Decoded>),
}

/// The decoded form of a TRE (or of one loop iteration within it): an
/// ordered list of named values, preserving descriptor order.
#[derive(Debug, Clone, Default)]
pub struct Decoded {
    pub values: Vec<(String, Value)>,
}

impl Decoded {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.values.iter().find_map(|(n, v)| match v {
            Value::Field(f) if n == name => Some(f),
            _ => None,
        })
    }

    pub fn repeated(&self, name: &str) -> Option<&[Decoded]> {
        self.values.iter().find_map(|(n, v)| match v {
            Value::Repeated(r) if n == name => Some(r.as_slice()),
            _ => None,
        })
    }

    /// Every field in descriptor order, named by its dotted path
    /// (`OUTER[2].INNER[5].NAME` for fields nested under loop iterations).
    pub fn fields(&self) -> impl Iterator<Item = (String, &Field)> + '_ {
        fn walk<'a>(decoded: &'a Decoded, prefix: &str, out: &mut Vec<(String, &'a Field)>) {
            for (name, value) in &decoded.values {
                let dotted = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                match value {
                    Value::Field(f) => out.push((dotted, f)),
                    Value::Repeated(items) => {
                        for (i, item) in items.iter().enumerate() {
                            walk(item, &format!("{dotted}[{i}]"), out);
                        }
                    }
                }
            }
        }
        let mut out = Vec::new();
        walk(self, "", &mut out);
        out.into_iter()
    }

    /// Looks up a field by its dotted path (see `fields`).
    pub fn get_field(&self, dotted_name: &str) -> Result<&Field> {
        self.fields()
            .find(|(n, _)| n == dotted_name)
            .map(|(_, f)| f)
            .ok_or_else(|| {
                nitf_err(
                    NitfErrorKind::InvalidObject,
                    format!("no TRE field named `{dotted_name}`"),
                )
            })
    }

    /// Mutable counterpart of `get_field`.
    pub fn get_field_mut(&mut self, dotted_name: &str) -> Result<&mut Field> {
        fn walk_mut<'a>(decoded: &'a mut Decoded, prefix: &str, target: &str) -> Option<&'a mut Field> {
            for (name, value) in decoded.values.iter_mut() {
                let dotted = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                match value {
                    Value::Field(f) => {
                        if dotted == target {
                            return Some(f);
                        }
                    }
                    Value::Repeated(items) => {
                        for (i, item) in items.iter_mut().enumerate() {
                            if let Some(f) = walk_mut(item, &format!("{dotted}[{i}]"), target) {
                                return Some(f);
                            }
                        }
                    }
                }
            }
            None
        }
        walk_mut(self, "", dotted_name).ok_or_else(|| {
            nitf_err(
                NitfErrorKind::InvalidObject,
                format!("no TRE field named `{dotted_name}`"),
            )
        })
    }
}

struct Frame {
    values: HashMap<String, Field>,
}

struct Engine<'a> {
    stack: Vec<Frame>,
    cursor: &'a [u8],
}

impl<'a> Engine<'a> {
    fn lookup(&self, name: &str) -> Result<&Field> {
        self.stack
            .iter()
            .rev()
            .find_map(|f| f.values.get(name))
            .ok_or_else(|| {
                nitf_err(
                    NitfErrorKind::Parsing,
                    format!("TRE field `{name}` referenced before it was decoded"),
                )
            })
    }

    fn resolve_length(&self, length: &Length) -> Result<usize> {
        match length {
            Length::Fixed(n) => Ok(*n),
            Length::FromField(name) => Ok(self.lookup(name)?.as_uint()? as usize),
            Length::Remaining => Ok(self.cursor.len()),
        }
    }

    fn resolve_count(&self, count: &CountSpec) -> Result<usize> {
        match count {
            CountSpec::Fixed(n) => Ok(*n),
            CountSpec::FromField(name) => Ok(self.lookup(name)?.as_uint()? as usize),
            CountSpec::Function { field, op, operand } => {
                let lhs = self.lookup(field)?.as_uint()?;
                let rhs = match operand {
                    CountOperand::Const(n) => *n,
                    CountOperand::Field(name) => self.lookup(name)?.as_uint()?,
                };
                let result = match op {
                    ArithOp::Add => lhs.saturating_add(rhs),
                    ArithOp::Mul => lhs.saturating_mul(rhs),
                };
                Ok(result as usize)
            }
        }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.cursor.len() < len {
            return Err(nitf_err(
                NitfErrorKind::Parsing,
                format!(
                    "TRE ran out of bytes: needed {len}, had {}",
                    self.cursor.len()
                ),
            ));
        }
        let (head, tail) = self.cursor.split_at(len);
        self.cursor = tail;
        Ok(head)
    }

    fn decode_elements(&mut self, elements: &[Element]) -> Result<Vec<(String, Value)>> {
        self.stack.push(Frame {
            values: HashMap::new(),
        });
        let mut out = Vec::new();
        for element in elements {
            match element {
                Element::Field(fd) => {
                    let len = self.resolve_length(&fd.length)?;
                    let bytes = self.take(len)?;
                    let mut field = Field::new(fd.kind, len);
                    field.set_raw(bytes)?;
                    self.stack
                        .last_mut()
                        .unwrap()
                        .values
                        .insert(fd.name.to_string(), field.clone());
                    out.push((fd.name.to_string(), Value::Field(field)));
                }
                Element::Loop { count, body } => {
                    let n = self.resolve_count(count)?;
                    let mut iterations = Vec::with_capacity(n);
                    for _ in 0..n {
                        let values = self.decode_elements(body)?;
                        iterations.push(Decoded { values });
                    }
                    // Loop bodies are named by the field ref used for their
                    // count when it is symbolic; otherwise by position.
                    let name = match count {
                        CountSpec::FromField(f) => f.to_string(),
                        CountSpec::Function { field, .. } => field.to_string(),
                        CountSpec::Fixed(n) => format!("loop_{n}"),
                    };
                    out.push((name, Value::Repeated(iterations)));
                }
                Element::Conditional {
                    field,
                    relation,
                    value,
                    body,
                } => {
                    let actual = self.lookup(field)?.as_string()?;
                    let trimmed = actual.trim();
                    let matches = match relation {
                        Relation::Eq => trimmed == *value,
                        Relation::Ne => trimmed != *value,
                        Relation::EqIgnoreCase => trimmed.eq_ignore_ascii_case(value),
                        Relation::Lt | Relation::Gt | Relation::Mask => {
                            let actual_n: i64 = trimmed.parse().map_err(|_| {
                                nitf_err(
                                    NitfErrorKind::Parsing,
                                    format!("TRE field `{field}` is not numeric for a {relation:?} comparison"),
                                )
                            })?;
                            let bound: i64 = value.parse().map_err(|_| {
                                nitf_err(
                                    NitfErrorKind::Parsing,
                                    format!("conditional comparison value `{value}` is not numeric"),
                                )
                            })?;
                            match relation {
                                Relation::Lt => actual_n < bound,
                                Relation::Gt => actual_n > bound,
                                Relation::Mask => actual_n & bound != 0,
                                _ => unreachable!(),
                            }
                        }
                    };
                    if matches {
                        let mut nested = self.decode_elements(body)?;
                        out.append(&mut nested);
                    }
                }
            }
        }
        self.stack.pop();
        Ok(out)
    }
}

pub fn decode(descriptor: &TreDescriptor, data: &[u8]) -> Result<Decoded> {
    if let Some(expected) = descriptor.wire_len {
        if expected != data.len() {
            return Err(nitf_err(
                NitfErrorKind::Parsing,
                format!(
                    "TRE `{}` variant expects {expected} bytes, got {}",
                    descriptor.tag,
                    data.len()
                ),
            ));
        }
    }
    let mut engine = Engine {
        stack: Vec::new(),
        cursor: data,
    };
    let values = engine.decode_elements(&descriptor.elements)?;
    if !engine.cursor.is_empty() {
        return Err(nitf_err(
            NitfErrorKind::Parsing,
            format!(
                "TRE `{}` left {} undecoded trailing bytes",
                descriptor.tag,
                engine.cursor.len()
            ),
        ));
    }
    Ok(Decoded { values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    #[test]
    fn conditional_gates_on_eq_ignore_case() {
        let descriptor = TreDescriptor {
            tag: "TEST",
            wire_len: None,
            elements: vec![
                Element::field("FLAG", FieldKind::BcsA, Length::Fixed(1)),
                Element::Conditional {
                    field: "FLAG",
                    relation: Relation::EqIgnoreCase,
                    value: "y",
                    body: vec![Element::field("EXTRA", FieldKind::BcsN, Length::Fixed(2))],
                },
            ],
        };
        let decoded = decode(&descriptor, b"Y42").unwrap();
        assert_eq!(decoded.field("EXTRA").unwrap().as_string().unwrap(), "42");

        let decoded = decode(&descriptor, b"N").unwrap();
        assert!(decoded.field("EXTRA").is_none());
    }

    #[test]
    fn conditional_gt_and_mask_relations() {
        let gt_descriptor = TreDescriptor {
            tag: "TEST",
            wire_len: None,
            elements: vec![
                Element::field("N", FieldKind::BcsN, Length::Fixed(2)),
                Element::Conditional {
                    field: "N",
                    relation: Relation::Gt,
                    value: "5",
                    body: vec![Element::field("BIG", FieldKind::BcsA, Length::Fixed(1))],
                },
            ],
        };
        assert!(decode(&gt_descriptor, b"09B").unwrap().field("BIG").is_some());
        assert!(decode(&gt_descriptor, b"03").unwrap().field("BIG").is_none());

        let mask_descriptor = TreDescriptor {
            tag: "TEST",
            wire_len: None,
            elements: vec![
                Element::field("FLAGS", FieldKind::BcsN, Length::Fixed(2)),
                Element::Conditional {
                    field: "FLAGS",
                    relation: Relation::Mask,
                    value: "2",
                    body: vec![Element::field("BIT1", FieldKind::BcsA, Length::Fixed(1))],
                },
            ],
        };
        assert!(decode(&mask_descriptor, b"02X").unwrap().field("BIT1").is_some());
        assert!(decode(&mask_descriptor, b"01").unwrap().field("BIT1").is_none());
    }

    #[test]
    fn loop_count_from_function_adds_constant() {
        let descriptor = TreDescriptor {
            tag: "TEST",
            wire_len: None,
            elements: vec![
                Element::field("COUNT_M1", FieldKind::BcsN, Length::Fixed(1)),
                Element::Loop {
                    count: CountSpec::Function {
                        field: "COUNT_M1",
                        op: ArithOp::Add,
                        operand: CountOperand::Const(1),
                    },
                    body: vec![Element::field("ITEM", FieldKind::BcsN, Length::Fixed(2))],
                },
            ],
        };
        let decoded = decode(&descriptor, b"2102030").unwrap();
        let items = decoded.repeated("COUNT_M1").unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].field("ITEM").unwrap().as_string().unwrap(), "10");
        assert_eq!(items[2].field("ITEM").unwrap().as_string().unwrap(), "30");
    }

    #[test]
    fn fields_enumerates_dotted_names_through_a_loop() {
        let descriptor = TreDescriptor {
            tag: "TEST",
            wire_len: None,
            elements: vec![
                Element::field("COUNT_M1", FieldKind::BcsN, Length::Fixed(1)),
                Element::Loop {
                    count: CountSpec::Function {
                        field: "COUNT_M1",
                        op: ArithOp::Add,
                        operand: CountOperand::Const(1),
                    },
                    body: vec![Element::field("ITEM", FieldKind::BcsN, Length::Fixed(2))],
                },
            ],
        };
        let decoded = decode(&descriptor, b"2102030").unwrap();
        let names: Vec<String> = decoded.fields().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec!["COUNT_M1", "COUNT_M1[0].ITEM", "COUNT_M1[1].ITEM", "COUNT_M1[2].ITEM"]
        );
        assert_eq!(
            decoded.get_field("COUNT_M1[1].ITEM").unwrap().as_string().unwrap(),
            "20"
        );
        assert!(decoded.get_field("COUNT_M1[3].ITEM").is_err());
    }

    #[test]
    fn get_field_mut_edits_a_nested_field() {
        let descriptor = TreDescriptor {
            tag: "TEST",
            wire_len: None,
            elements: vec![
                Element::field("COUNT_M1", FieldKind::BcsN, Length::Fixed(1)),
                Element::Loop {
                    count: CountSpec::Function {
                        field: "COUNT_M1",
                        op: ArithOp::Add,
                        operand: CountOperand::Const(1),
                    },
                    body: vec![Element::field("ITEM", FieldKind::BcsN, Length::Fixed(2))],
                },
            ],
        };
        let mut decoded = decode(&descriptor, b"2102030").unwrap();
        decoded
            .get_field_mut("COUNT_M1[0].ITEM")
            .unwrap()
            .set_string("99")
            .unwrap();
        assert_eq!(
            decoded.get_field("COUNT_M1[0].ITEM").unwrap().as_string().unwrap(),
            "99"
        );
    }
}
