//! `qualia-configurator`: staged editing of the markers on declared elements.
//!
//! An [`ElementConfigurator`] is opened against an immutable [`DeclaredElement`]
//! snapshot, accumulates add/remove edits, and is committed exactly once into a
//! new snapshot. [`ElementRegistry`] owns the current snapshots and performs
//! commits on behalf of the resolution engine.

pub mod configurator;
pub mod element;
pub mod registry;

pub use configurator::{ConfiguratorState, ElementConfigurator};
pub use element::{DeclaredElement, ElementKind};
pub use registry::ElementRegistry;
