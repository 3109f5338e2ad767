//! Element configurator: staged edits to one element's marker set.
//!
//! State machine: **Open** (any number of add/remove/remove_all calls, in any
//! order) → **Committed** (terminal). Mutating or committing a committed
//! configurator is a lifecycle violation and fails loudly.

use std::sync::{Arc, Weak};

use qualia_core::{ConfiguratorId, Entity, ModelError, ModelResult};
use qualia_qualifier::{MarkerType, QualifierValue};

use crate::element::DeclaredElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfiguratorState {
    Open,
    Committed,
}

/// Mutable view over the markers of one declared element.
///
/// The pending set starts as a copy of the snapshot's markers. The snapshot
/// itself is never touched; [`commit`](Self::commit) materializes a new one.
///
/// Dropping or committing a configurator ends its session: a registry that
/// handed it out no longer counts it as live.
#[derive(Debug)]
pub struct ElementConfigurator {
    id: ConfiguratorId,
    original: Arc<DeclaredElement>,
    pending: Vec<QualifierValue>,
    state: ConfiguratorState,
    lease: Arc<()>,
}

impl ElementConfigurator {
    pub fn open(element: Arc<DeclaredElement>) -> Self {
        let id = ConfiguratorId::new();
        tracing::debug!(
            configurator_id = %id,
            element_id = %element.id(),
            element = %element,
            "configurator opened"
        );
        Self {
            id,
            pending: element.markers().to_vec(),
            original: element,
            state: ConfiguratorState::Open,
            lease: Arc::new(()),
        }
    }

    pub fn id(&self) -> ConfiguratorId {
        self.id
    }

    /// The snapshot this configurator was opened against. Never reflects
    /// pending edits.
    pub fn annotated(&self) -> &DeclaredElement {
        &self.original
    }

    pub fn pending(&self) -> &[QualifierValue] {
        &self.pending
    }

    pub fn state(&self) -> ConfiguratorState {
        self.state
    }

    pub fn is_committed(&self) -> bool {
        self.state == ConfiguratorState::Committed
    }

    /// Append `marker`, even if an equal marker is already pending.
    pub fn add(&mut self, marker: QualifierValue) -> ModelResult<&mut Self> {
        self.ensure_open("add")?;
        tracing::debug!(configurator_id = %self.id, marker = %marker, "marker added");
        self.pending.push(marker);
        Ok(self)
    }

    /// Remove every pending marker equal to `marker`: same type and equal
    /// binding attributes. Non-binding attributes do not take part.
    pub fn remove(&mut self, marker: &QualifierValue) -> ModelResult<&mut Self> {
        self.ensure_open("remove")?;
        let removed = self.retain_pending(|m| m != marker);
        tracing::debug!(configurator_id = %self.id, marker = %marker, removed, "markers removed");
        Ok(self)
    }

    /// Remove every pending marker of `marker_type`, whatever its attributes.
    pub fn remove_type(&mut self, marker_type: &MarkerType) -> ModelResult<&mut Self> {
        self.ensure_open("remove_type")?;
        let removed = self.retain_pending(|m| !m.is_of(marker_type));
        tracing::debug!(
            configurator_id = %self.id,
            marker_type = %marker_type,
            removed,
            "markers of type removed"
        );
        Ok(self)
    }

    pub fn remove_all(&mut self) -> ModelResult<&mut Self> {
        self.ensure_open("remove_all")?;
        let removed = self.pending.len();
        self.pending.clear();
        tracing::debug!(configurator_id = %self.id, removed, "all markers removed");
        Ok(self)
    }

    /// Freeze the pending set into a new snapshot and close the configurator.
    ///
    /// The returned element keeps the original id with `revision + 1`.
    pub fn commit(&mut self) -> ModelResult<DeclaredElement> {
        self.ensure_open("commit")?;
        self.state = ConfiguratorState::Committed;
        self.lease = Arc::new(());
        let committed = self.original.with_markers(self.pending.clone());
        tracing::info!(
            configurator_id = %self.id,
            element_id = %committed.id(),
            revision = committed.revision(),
            markers = committed.markers().len(),
            "configurator committed"
        );
        Ok(committed)
    }

    /// Weak handle that dies once this configurator is dropped or committed.
    pub(crate) fn lease(&self) -> Weak<()> {
        Arc::downgrade(&self.lease)
    }

    fn retain_pending(&mut self, keep: impl FnMut(&QualifierValue) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(keep);
        before - self.pending.len()
    }

    fn ensure_open(&self, operation: &str) -> ModelResult<()> {
        match self.state {
            ConfiguratorState::Open => Ok(()),
            ConfiguratorState::Committed => {
                tracing::warn!(
                    configurator_id = %self.id,
                    element_id = %self.original.id(),
                    operation,
                    "configurator used after commit"
                );
                Err(ModelError::lifecycle(format!(
                    "cannot {operation}: configurator {} for {} is already committed",
                    self.id, self.original
                )))
            }
        }
    }
}
