use crate::arena::{Arena, Handle};

/// A named node in the forest.
///
/// Identity is the node's [`Handle`]; the node itself only carries its name
/// and the parent/children relationship. Child order is meaningful: it is
/// the top-to-bottom display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entity {
    pub name: String,
    pub children: Vec<Handle>,
    pub parent: Handle,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            parent: Handle::NONE,
        }
    }
}

/// Append `children` to `parent`'s child list, in order, and point each
/// child's parent back at `parent`. Children must not already have a parent.
pub fn add_children(parent: Handle, children: &[Handle], entities: &mut Arena<Entity>) {
    for &child in children {
        let Some(entity) = entities.get_mut(child) else {
            continue;
        };
        debug_assert!(entity.parent.is_none());
        entity.parent = parent;
        if let Some(entity) = entities.get_mut(parent) {
            entity.children.push(child);
        }
    }
}

/// The sibling list `handle` belongs to: its parent's children, or the
/// forest roots when it has no parent.
pub fn siblings(handle: Handle, entities: &Arena<Entity>, roots: &[Handle]) -> Vec<Handle> {
    entities
        .get(handle)
        .and_then(|entity| entities.get(entity.parent))
        .map(|parent| parent.children.clone())
        .unwrap_or_else(|| roots.to_vec())
}

pub fn has_children(handle: Handle, entities: &Arena<Entity>) -> bool {
    entities
        .get(handle)
        .map(|entity| !entity.children.is_empty())
        .unwrap_or(false)
}

/// Walk the parent chain from `handle` to its root. Returns the root handle
/// and how many steps up it took to get there.
pub fn root_of(handle: Handle, entities: &Arena<Entity>) -> (Handle, usize) {
    let mut current = handle;
    let mut depth = 0;
    while let Some(entity) = entities.get(current) {
        if entity.parent.is_none() {
            break;
        }
        current = entity.parent;
        depth += 1;
    }
    (current, depth)
}
