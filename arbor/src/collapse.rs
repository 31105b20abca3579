use std::collections::HashSet;

use crate::arena::{Arena, Handle};
use crate::entity::{has_children, Entity};

/// The set of handles whose children are hidden from the flattened
/// projection.
#[derive(Debug, Clone, Default)]
pub struct Collapser {
    collapsed: HashSet<Handle>,
}

impl Collapser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `handle` collapsed. Collapsing a dead or childless node is a
    /// no-op; there is nothing to hide.
    pub fn collapse(&mut self, handle: Handle, entities: &Arena<Entity>) {
        if has_children(handle, entities) {
            self.collapsed.insert(handle);
        }
    }

    /// Unmark `handle`. A no-op when it was not collapsed.
    pub fn expand(&mut self, handle: Handle) {
        self.collapsed.remove(&handle);
    }

    pub fn collapsed(&self, handle: Handle) -> bool {
        self.collapsed.contains(&handle)
    }

    pub fn expanded(&self, handle: Handle) -> bool {
        !self.collapsed(handle)
    }

    /// Drop entries for handles that no longer exist, typically after a
    /// subtree removal. Stale entries are harmless but pile up otherwise.
    pub fn prune(&mut self, removed: &[Handle]) {
        for handle in removed {
            self.collapsed.remove(handle);
        }
    }
}
