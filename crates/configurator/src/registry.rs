//! In-memory registry of declared elements (single-threaded commit service).
//!
//! The registry owns the current snapshot of every element, hands out at most
//! one live configurator per element, and swaps in the committed snapshot.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use qualia_core::{ConfiguratorId, ElementId, Entity, ModelError, ModelResult};
use qualia_qualifier::QualifierSet;

use crate::configurator::ElementConfigurator;
use crate::element::DeclaredElement;

/// A configurator handed out by the registry. Stale once the configurator
/// has been dropped or has committed.
#[derive(Debug)]
struct Session {
    configurator: ConfiguratorId,
    lease: Weak<()>,
}

impl Session {
    fn is_live(&self) -> bool {
        self.lease.strong_count() > 0
    }
}

#[derive(Debug, Default)]
pub struct ElementRegistry {
    elements: HashMap<ElementId, Arc<DeclaredElement>>,
    /// Element → the configurator session opened for it.
    open: HashMap<ElementId, Session>,
    /// Qualifier set → elements carrying exactly that set.
    index: HashMap<QualifierSet, Vec<ElementId>>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly introspected element.
    pub fn register(&mut self, element: DeclaredElement) -> ModelResult<Arc<DeclaredElement>> {
        let id = *element.id();
        if self.elements.contains_key(&id) {
            return Err(ModelError::conflict(format!(
                "element {id} is already registered"
            )));
        }
        let element = Arc::new(element);
        self.index_element(&element);
        self.elements.insert(id, element.clone());
        tracing::info!(element_id = %id, element = %element, "element registered");
        Ok(element)
    }

    pub fn get(&self, id: &ElementId) -> Option<Arc<DeclaredElement>> {
        self.elements.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether a configurator for `id` is still alive and uncommitted.
    pub fn is_open(&self, id: &ElementId) -> bool {
        self.open.get(id).is_some_and(Session::is_live)
    }

    /// Open the live configurator for `id`.
    pub fn configure(&mut self, id: &ElementId) -> ModelResult<ElementConfigurator> {
        let element = self
            .elements
            .get(id)
            .cloned()
            .ok_or_else(|| ModelError::not_found(format!("element {id}")))?;
        self.release_stale();
        if let Some(session) = self.open.get(id) {
            let live = session.configurator;
            tracing::warn!(element_id = %id, configurator_id = %live, "element already being configured");
            return Err(ModelError::lifecycle(format!(
                "{element} already has a live configurator ({live})"
            )));
        }
        let configurator = ElementConfigurator::open(element);
        self.open.insert(
            *id,
            Session {
                configurator: configurator.id(),
                lease: configurator.lease(),
            },
        );
        Ok(configurator)
    }

    /// Commit `configurator` and make its result the current snapshot.
    pub fn commit(
        &mut self,
        configurator: &mut ElementConfigurator,
    ) -> ModelResult<Arc<DeclaredElement>> {
        let id = *configurator.annotated().id();
        self.ensure_live(&id, configurator)?;

        let committed = Arc::new(configurator.commit()?);
        self.open.remove(&id);
        if let Some(previous) = self.elements.insert(id, committed.clone()) {
            self.unindex_element(&previous);
        }
        self.index_element(&committed);
        Ok(committed)
    }

    /// Release the element without committing. Returns `false` if
    /// `configurator` was not the live one.
    ///
    /// Dropping the configurator has the same effect; this form reports
    /// whether it was live.
    pub fn discard(&mut self, configurator: ElementConfigurator) -> bool {
        let id = *configurator.annotated().id();
        if !self.is_session(&id, &configurator) {
            return false;
        }
        self.open.remove(&id);
        tracing::debug!(element_id = %id, configurator_id = %configurator.id(), "configurator discarded");
        true
    }

    /// Elements whose qualifier set equals `qualifiers`.
    pub fn find_by_qualifiers(&self, qualifiers: &QualifierSet) -> Vec<Arc<DeclaredElement>> {
        self.index
            .get(qualifiers)
            .into_iter()
            .flatten()
            .filter_map(|id| self.elements.get(id).cloned())
            .collect()
    }

    /// Forget sessions whose configurator was dropped or committed on its own.
    fn release_stale(&mut self) {
        self.open.retain(|id, session| {
            let live = session.is_live();
            if !live {
                tracing::debug!(
                    element_id = %id,
                    configurator_id = %session.configurator,
                    "stale configurator released"
                );
            }
            live
        });
    }

    fn is_session(&self, id: &ElementId, configurator: &ElementConfigurator) -> bool {
        self.open
            .get(id)
            .is_some_and(|session| session.configurator == configurator.id())
    }

    fn ensure_live(&self, id: &ElementId, configurator: &ElementConfigurator) -> ModelResult<()> {
        if self.is_session(id, configurator) {
            return Ok(());
        }
        tracing::warn!(
            element_id = %id,
            configurator_id = %configurator.id(),
            "commit of a configurator that is not live"
        );
        Err(ModelError::lifecycle(format!(
            "configurator {} is not the live configurator of element {id}",
            configurator.id()
        )))
    }

    fn index_element(&mut self, element: &DeclaredElement) {
        self.index
            .entry(element.qualifiers())
            .or_default()
            .push(*element.id());
    }

    fn unindex_element(&mut self, element: &DeclaredElement) {
        let key = element.qualifiers();
        if let Some(ids) = self.index.get_mut(&key) {
            ids.retain(|id| id != element.id());
            if ids.is_empty() {
                self.index.remove(&key);
            }
        }
    }
}
