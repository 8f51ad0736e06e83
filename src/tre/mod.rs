//! C4: the TRE mini-compiler — a descriptor model
//! (`descriptor`), a frame-stack execution engine (`engine`), a tag-keyed
//! registry of bundled descriptors (`registry`), and the bundled
//! descriptors themselves (`descriptors`).

pub mod descriptor;
pub mod descriptors;
pub mod engine;
pub mod registry;

pub use descriptor::{CountSpec, Element, FieldDescriptor, Length, Relation, TreDescriptor};
pub use engine::{Decoded, Value};
pub use registry::{DecodedOrOpaque, Registry};
