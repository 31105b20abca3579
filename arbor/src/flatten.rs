use crate::arena::{Arena, Handle};
use crate::collapse::Collapser;
use crate::entity::Entity;

/// One row of the display model: a visible node and its indent level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenedHandle {
    pub handle: Handle,
    pub indent: u16,
}

/// Pre-order flatten of the subtree rooted at `handle`, skipping the
/// children of every collapsed node. The root of the subtree is always the
/// first entry, at `base_indent`.
pub fn flatten_entity(
    handle: Handle,
    base_indent: u16,
    entities: &Arena<Entity>,
    collapser: &Collapser,
) -> Vec<FlattenedHandle> {
    let mut out = Vec::new();
    let mut stack = vec![(handle, base_indent)];
    while let Some((handle, indent)) = stack.pop() {
        out.push(FlattenedHandle { handle, indent });
        if collapser.collapsed(handle) {
            continue;
        }
        if let Some(entity) = entities.get(handle) {
            for &child in entity.children.iter().rev() {
                stack.push((child, indent + 1));
            }
        }
    }
    out
}

/// Flatten the whole forest: each root's subtree in root order, roots at
/// indent zero.
pub fn flatten_entities(
    entities: &Arena<Entity>,
    collapser: &Collapser,
    roots: &[Handle],
) -> Vec<FlattenedHandle> {
    let mut out = Vec::new();
    for &root in roots {
        out.extend(flatten_entity(root, 0, entities, collapser));
    }
    out
}

/// Number of entries `handle` contributes to the flattened sequence: itself
/// plus every descendant not hidden beneath a collapsed node. Returns 1 for
/// a collapsed node.
pub fn visible_subtree_size(
    handle: Handle,
    entities: &Arena<Entity>,
    collapser: &Collapser,
) -> usize {
    let mut count = 0;
    let mut stack = vec![handle];
    while let Some(handle) = stack.pop() {
        count += 1;
        if collapser.collapsed(handle) {
            continue;
        }
        if let Some(entity) = entities.get(handle) {
            stack.extend(entity.children.iter().copied());
        }
    }
    count
}
