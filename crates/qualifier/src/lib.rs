//! `qualia-qualifier`: marker types, qualifier values and their equality contract.
//!
//! Pure, deterministic value code (no IO). A qualifier value is equal to another
//! iff both have the same marker type and the same binding attribute values;
//! this is what makes independently built values usable as lookup keys.

pub mod builtin;
pub mod hash;
pub mod marker;
pub mod qualifier;
pub mod set;
pub mod value;

pub use marker::{AttributeDescriptor, AttributeKind, MarkerKind, MarkerType, MarkerTypeBuilder};
pub use qualifier::{QualifierLiteral, QualifierValue};
pub use set::QualifierSet;
pub use value::AttributeValue;
