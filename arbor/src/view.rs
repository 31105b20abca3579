use log::{debug, trace};

use crate::arena::{Arena, Handle};
use crate::collapse::Collapser;
use crate::command::Command;
use crate::entity::{add_children, has_children, siblings, Entity};
use crate::flatten::{flatten_entity, visible_subtree_size, FlattenedHandle};

/// The display model plus cursor and viewport state.
///
/// Owns the flattened projection of the forest and keeps it consistent with
/// the forest and collapse set across every mutation, by splicing and
/// erasing ranges sized with [`visible_subtree_size`] instead of
/// re-flattening.
#[derive(Debug, Clone)]
pub struct View {
    flattened: Vec<FlattenedHandle>,
    offset: usize,
    selected: usize,
    count: usize,
    recorded: Handle,
}

impl View {
    /// Build a view over an already-flattened forest. `count` is the
    /// viewport height in rows and stays fixed for the view's lifetime.
    pub fn new(flattened: Vec<FlattenedHandle>, offset: usize, count: usize) -> Self {
        debug_assert!(count > 0);
        let mut view = Self {
            flattened,
            offset,
            selected: 0,
            count,
            recorded: Handle::NONE,
        };
        view.clamp_offset();
        view
    }

    pub fn flattened(&self) -> &[FlattenedHandle] {
        &self.flattened
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Index of the selected row, or `None` when the view is empty.
    pub fn selection(&self) -> Option<usize> {
        if self.flattened.is_empty() {
            None
        } else {
            Some(self.selected)
        }
    }

    pub fn selected_handle(&self) -> Option<Handle> {
        self.selection().map(|index| self.flattened[index].handle)
    }

    pub fn recorded(&self) -> Handle {
        self.recorded
    }

    /// Number of rows the current window actually shows.
    pub fn visible(&self) -> usize {
        self.flattened.len().saturating_sub(self.offset).min(self.count)
    }

    pub fn move_up(&mut self) {
        if self.selection().is_none() || self.selected == 0 {
            return;
        }
        self.selected -= 1;
        if self.selected < self.offset {
            self.offset -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selection().is_none() || self.selected + 1 >= self.flattened.len() {
            return;
        }
        self.selected += 1;
        if self.selected >= self.offset + self.count {
            self.offset = (self.offset + 1).min(self.max_offset());
        }
    }

    /// Collapse the selected node, erasing its visible descendants from the
    /// flattened sequence. No-op when the selection is empty, childless or
    /// already collapsed.
    pub fn collapse(&mut self, entities: &Arena<Entity>, collapser: &mut Collapser) {
        let Some(handle) = self.selected_handle() else {
            return;
        };
        if collapser.collapsed(handle) || !has_children(handle, entities) {
            return;
        }
        let size = visible_subtree_size(handle, entities, collapser);
        collapser.collapse(handle, entities);
        self.flattened.drain(self.selected + 1..self.selected + size);
        self.clamp_offset();
    }

    /// Expand the selected node, splicing its freshly flattened subtree back
    /// in. No-op when the selection is empty or not collapsed.
    pub fn expand(&mut self, entities: &Arena<Entity>, collapser: &mut Collapser) {
        let Some(handle) = self.selected_handle() else {
            return;
        };
        if !collapser.collapsed(handle) {
            return;
        }
        self.expand_at(self.selected, entities, collapser);
    }

    /// Append a new node to the selected node's children and insert it into
    /// the flattened sequence below the selected node's visible subtree.
    /// Fails on an empty selection or a collapsed selected node.
    pub fn add_child(
        &mut self,
        entities: &mut Arena<Entity>,
        collapser: &Collapser,
    ) -> Option<Handle> {
        let handle = self.selected_handle()?;
        if collapser.collapsed(handle) {
            return None;
        }
        let size = visible_subtree_size(handle, entities, collapser);
        let child = new_entity(entities);
        add_children(handle, &[child], entities);
        let position = (self.selected + size).min(self.flattened.len());
        let indent = self.flattened[self.selected].indent + 1;
        self.flattened.insert(
            position,
            FlattenedHandle {
                handle: child,
                indent,
            },
        );
        Some(child)
    }

    /// Append a new node to the selected node's sibling list (or to the
    /// roots when the selected node is a root, or the view is empty) and
    /// insert it into the flattened sequence below the visible extent of
    /// the selected node and all of its later siblings.
    pub fn add_sibling(
        &mut self,
        entities: &mut Arena<Entity>,
        collapser: &Collapser,
        roots: &mut Vec<Handle>,
    ) -> Option<(FlattenedHandle, usize)> {
        let Some(selected) = self.selection().map(|index| self.flattened[index]) else {
            let sibling = new_entity(entities);
            roots.push(sibling);
            let entry = FlattenedHandle {
                handle: sibling,
                indent: 0,
            };
            self.flattened.push(entry);
            self.selected = 0;
            self.offset = 0;
            return Some((entry, 0));
        };

        let parent = entities.get(selected.handle)?.parent;
        let chain = siblings(selected.handle, entities, roots);
        let start = chain.iter().position(|&s| s == selected.handle)?;
        let mut position = self.selected;
        for &later in &chain[start..] {
            position += visible_subtree_size(later, entities, collapser);
        }

        let sibling = new_entity(entities);
        if parent.is_none() {
            roots.push(sibling);
        } else {
            add_children(parent, &[sibling], entities);
        }
        let entry = FlattenedHandle {
            handle: sibling,
            indent: selected.indent,
        };
        self.flattened.insert(position, entry);
        Some((entry, position))
    }

    /// Delete the selected subtree: detach it from its parent (or the
    /// roots), free every node in it, and erase its visible rows. The
    /// cursor and viewport are re-clamped; removing the last entry leaves
    /// the view with no selection.
    pub fn remove(
        &mut self,
        entities: &mut Arena<Entity>,
        collapser: &mut Collapser,
        roots: &mut Vec<Handle>,
    ) {
        let Some(handle) = self.selected_handle() else {
            return;
        };

        // Full subtree, ignoring collapse: hidden descendants die too.
        let mut doomed = Vec::new();
        let mut stack = vec![handle];
        while let Some(current) = stack.pop() {
            doomed.push(current);
            if let Some(entity) = entities.get(current) {
                stack.extend(entity.children.iter().copied());
            }
        }

        let parent = entities.get(handle).map(|entity| entity.parent);
        match parent {
            Some(parent) if parent.is_some() => {
                if let Some(entity) = entities.get_mut(parent) {
                    entity.children.retain(|&child| child != handle);
                }
            }
            _ => roots.retain(|&root| root != handle),
        }

        let size = visible_subtree_size(handle, entities, collapser);
        for &dead in &doomed {
            entities.remove(dead);
        }
        collapser.prune(&doomed);
        if doomed.contains(&self.recorded) {
            self.recorded = Handle::NONE;
        }
        debug!(
            "removed {} node(s) under handle {}, {} visible row(s)",
            doomed.len(),
            handle.index(),
            size
        );

        self.flattened.drain(self.selected..self.selected + size);
        if self.flattened.is_empty() {
            self.selected = 0;
            self.offset = 0;
        } else {
            self.selected = self.selected.min(self.flattened.len() - 1);
            self.clamp_offset();
        }
    }

    /// Remember the selected handle as the jump target for
    /// [`goto_recorded`](View::goto_recorded).
    pub fn record_handle(&mut self) {
        if let Some(handle) = self.selected_handle() {
            self.recorded = handle;
        }
    }

    /// Jump to the recorded handle, expanding any collapsed ancestors that
    /// hide it (topmost first). Lands with the target both selected and at
    /// the top of the window. No-op when the recorded handle is stale.
    pub fn goto_recorded(&mut self, entities: &Arena<Entity>, collapser: &mut Collapser) {
        if entities.get(self.recorded).is_none() {
            return;
        }
        loop {
            if let Some(index) = self
                .flattened
                .iter()
                .position(|entry| entry.handle == self.recorded)
            {
                self.selected = index;
                self.offset = index;
                return;
            }

            // Hidden, so some ancestor is collapsed. The topmost collapsed
            // ancestor is itself visible; expand it and look again.
            let mut topmost = Handle::NONE;
            let mut ancestor = match entities.get(self.recorded) {
                Some(entity) => entity.parent,
                None => return,
            };
            while let Some(entity) = entities.get(ancestor) {
                if collapser.collapsed(ancestor) {
                    topmost = ancestor;
                }
                ancestor = entity.parent;
            }
            let Some(index) = self
                .flattened
                .iter()
                .position(|entry| entry.handle == topmost)
            else {
                return;
            };
            trace!("expanding handle {} to reveal jump target", topmost.index());
            self.expand_at(index, entities, collapser);
        }
    }

    /// Route one input command to the matching mutation.
    pub fn apply(
        &mut self,
        command: Command,
        entities: &mut Arena<Entity>,
        collapser: &mut Collapser,
        roots: &mut Vec<Handle>,
    ) {
        match command {
            Command::MoveUp => self.move_up(),
            Command::MoveDown => self.move_down(),
            Command::Collapse => self.collapse(entities, collapser),
            Command::Expand => self.expand(entities, collapser),
            Command::AddChild => {
                self.add_child(entities, collapser);
            }
            Command::AddSibling => {
                self.add_sibling(entities, collapser, roots);
            }
            Command::Remove => self.remove(entities, collapser, roots),
            Command::RecordHandle => self.record_handle(),
            Command::GotoRecorded => self.goto_recorded(entities, collapser),
        }
    }

    /// Expand the node at `index` and splice its subtree back into the
    /// flattened sequence. The entry at `index` stays; its freshly visible
    /// descendants follow it.
    fn expand_at(&mut self, index: usize, entities: &Arena<Entity>, collapser: &mut Collapser) {
        let entry = self.flattened[index];
        collapser.expand(entry.handle);
        let subtree = flatten_entity(entry.handle, entry.indent, entities, collapser);
        self.flattened
            .splice(index + 1..index + 1, subtree.into_iter().skip(1));
    }

    fn max_offset(&self) -> usize {
        self.flattened.len().saturating_sub(self.count)
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}

/// Allocate a node named after its own handle index.
fn new_entity(entities: &mut Arena<Entity>) -> Handle {
    let handle = entities.add();
    if let Some(entity) = entities.get_mut(handle) {
        entity.name = format!("entity_{}", handle.index());
    }
    handle
}
