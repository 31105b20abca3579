use crate::arena::{Arena, Handle};
use crate::entity::{siblings, Entity};
use crate::flatten::FlattenedHandle;

/// The branch glyph a row carries at its own indent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// The row has a later sibling (visible or not): `├── `.
    Mid,
    /// The row is the last of its siblings: `└── `.
    End,
}

/// Everything the renderer needs to paint the branch artwork for one
/// window: the per-row branch glyph, the `(row, indent)` cells carrying a
/// vertical connector, and the ancestor columns that run the full height of
/// the window because the entire window sits inside an off-screen
/// ancestor's subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectorPlan {
    pub branches: Vec<Branch>,
    pub verticals: Vec<(usize, u16)>,
    pub columns: Vec<u16>,
}

/// Compute the connector geometry for the window
/// `flattened[offset..offset + min(len - offset, count)]`.
///
/// Sibling links are resolved against the whole flattened sequence, so a
/// sibling above or below the window still produces the continuation lines
/// that run through it; emitted cells are always clipped to the window.
pub fn connector_plan(
    flattened: &[FlattenedHandle],
    offset: usize,
    count: usize,
    entities: &Arena<Entity>,
    roots: &[Handle],
) -> ConnectorPlan {
    let mut plan = ConnectorPlan::default();
    let visible = flattened.len().saturating_sub(offset).min(count);
    if visible == 0 {
        return plan;
    }
    let window = &flattened[offset..offset + visible];

    for (row, entry) in window.iter().enumerate() {
        // Forward: the next entry at this indent, unless the walk leaves
        // the parent subtree first.
        let mut next_sibling = None;
        for (index, later) in flattened.iter().enumerate().skip(offset + row + 1) {
            if later.indent < entry.indent {
                break;
            }
            if later.indent == entry.indent {
                next_sibling = Some(index);
                break;
            }
        }
        match next_sibling {
            Some(index) => {
                plan.branches.push(Branch::Mid);
                let last = (index - offset).min(visible);
                for between in row + 1..last {
                    plan.verticals.push((between, entry.indent));
                }
            }
            None => plan.branches.push(Branch::End),
        }

        // Backward: a sibling that scrolled off above the window still
        // drops a line through the rows above this one. A sibling that is
        // on screen was already handled by its own forward pass.
        let mut continues_above = false;
        for index in (0..offset + row).rev() {
            let earlier = flattened[index];
            if earlier.indent < entry.indent {
                break;
            }
            if earlier.indent == entry.indent {
                continues_above = index < offset;
                break;
            }
        }
        if continues_above {
            for above in 0..row {
                plan.verticals.push((above, entry.indent));
            }
        }
    }

    // Columns left of the shallowest visible indent belong to ancestors
    // that never enter the window. Every window row shares those ancestors,
    // so each column is either painted on every row or on none: painted
    // exactly when the ancestor at that indent has a later sibling.
    let Some(shallowest) = window.iter().min_by_key(|entry| entry.indent) else {
        return plan;
    };
    let mut handle = shallowest.handle;
    let mut indent = shallowest.indent;
    while indent > 0 && handle.is_some() {
        let Some(parent) = entities.get(handle).map(|entity| entity.parent) else {
            break;
        };
        indent -= 1;
        handle = parent;
        let chain = siblings(handle, entities, roots);
        if let Some(position) = chain.iter().position(|&s| s == handle) {
            if position + 1 < chain.len() {
                plan.columns.push(indent);
            }
        }
    }
    plan.columns.sort_unstable();

    plan
}
