//! `qualia-core`: shared building blocks for the qualifier model.
//!
//! This crate contains **pure** primitives (no IO, no logging setup): the error
//! model, strongly-typed identifiers and the value/entity traits the other
//! crates implement.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{ModelError, ModelResult};
pub use id::{ConfiguratorId, ElementId};
pub use value_object::ValueObject;
