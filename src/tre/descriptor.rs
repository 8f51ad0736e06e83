//! The descriptor model the TRE engine interprets: a
//! small tree of fields, loops and conditionals, driven entirely by data
//! already parsed earlier in the same TRE (lengths and repeat counts are
//! never hardcoded beyond the field that states them).

use crate::field::FieldKind;

/// How a field's on-the-wire length is determined.
#[derive(Debug, Clone)]
pub enum Length {
    /// A constant width known at descriptor-authoring time.
    Fixed(usize),
    /// The width is the numeric value of a field already decoded earlier
    /// in the same frame (or an enclosing one).
    FromField(&'static str),
    /// Consume whatever bytes remain. Only valid as the last element of a
    /// `NO_LENGTH` wildcard variant.
    Remaining,
}

/// The arithmetic a `CountSpec::Function` applies to a decoded field before
/// using it as a repeat count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Mul,
}

/// The right-hand operand of a `CountSpec::Function`: either a literal or
/// another already-decoded field.
#[derive(Debug, Clone)]
pub enum CountOperand {
    Const(u64),
    Field(&'static str),
}

/// How many times a `Loop` body repeats.
#[derive(Debug, Clone)]
pub enum CountSpec {
    Fixed(usize),
    FromField(&'static str),
    /// `<field> + <int>` or `<field> * <field>`: a count derived from a
    /// decoded field by one arithmetic step, for formats that store an
    /// adjusted count (e.g. count-minus-one) rather than the literal
    /// repeat count.
    Function {
        field: &'static str,
        op: ArithOp,
        operand: CountOperand,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Ne,
    Lt,
    Gt,
    /// True when `field & value` is nonzero.
    Mask,
    EqIgnoreCase,
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub length: Length,
}

#[derive(Debug, Clone)]
pub enum Element {
    Field(FieldDescriptor),
    Loop {
        count: CountSpec,
        body: Vec<Element>,
    },
    Conditional {
        field: &'static str,
        relation: Relation,
        value: &'static str,
        body: Vec<Element>,
    },
}

impl Element {
    pub fn field(name: &'static str, kind: FieldKind, length: Length) -> Self {
        Element::Field(FieldDescriptor { name, kind, length })
    }
}

/// One length-variant of a TRE's layout. A tag may register several of
/// these; at most
/// one per tag may have `wire_len: None` (the `NO_LENGTH` wildcard), and it
/// must be tried last.
#[derive(Debug, Clone)]
pub struct TreDescriptor {
    pub tag: &'static str,
    pub wire_len: Option<usize>,
    pub elements: Vec<Element>,
}
