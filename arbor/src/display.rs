use crate::arena::{Arena, Handle};
use crate::collapse::Collapser;
use crate::connector::{connector_plan, Branch};
use crate::entity::Entity;
use crate::view::View;

/// Capability the renderer draws through. The terminal driver implements
/// this over the real screen; [`Buffer`](crate::Buffer) implements it over
/// an in-memory grid.
pub trait DrawSurface {
    /// Toggle the bold attribute for subsequent text.
    fn set_bold(&mut self, on: bool);
    /// Toggle the inverse attribute for subsequent text.
    fn set_invert(&mut self, on: bool);
    /// Write `text` at the current cursor, advancing it by the text's
    /// display width.
    fn draw(&mut self, text: &str);
    /// Write `text` starting at column `x`, row `y`, leaving the cursor
    /// just past it.
    fn draw_at(&mut self, x: u16, y: u16, text: &str);
}

/// Per-frame display configuration: the three connector glyphs and how many
/// columns one indent level occupies.
#[derive(Debug, Clone)]
pub struct DisplayOps {
    pub connection: String,
    pub mid: String,
    pub end: String,
    pub indent_width: u16,
}

impl Default for DisplayOps {
    fn default() -> Self {
        Self {
            connection: "│".to_string(),
            mid: "├── ".to_string(),
            end: "└── ".to_string(),
            indent_width: 4,
        }
    }
}

/// Paint one frame of the view: ancestor columns first, then in-window
/// vertical connectors, then each row's branch glyph and name. Collapsed
/// nodes are bold, the selected row is inverted.
pub fn display_hierarchy(
    entities: &Arena<Entity>,
    roots: &[Handle],
    view: &View,
    collapser: &Collapser,
    ops: &DisplayOps,
    surface: &mut impl DrawSurface,
) {
    let visible = view.visible();
    if visible == 0 {
        return;
    }
    let plan = connector_plan(view.flattened(), view.offset(), view.count(), entities, roots);

    for &column in &plan.columns {
        for row in 0..visible {
            surface.draw_at(column * ops.indent_width, row as u16, &ops.connection);
        }
    }
    for &(row, indent) in &plan.verticals {
        surface.draw_at(indent * ops.indent_width, row as u16, &ops.connection);
    }

    for row in 0..visible {
        let entry = view.flattened()[view.offset() + row];
        let glyph = match plan.branches[row] {
            Branch::Mid => &ops.mid,
            Branch::End => &ops.end,
        };
        surface.draw_at(entry.indent * ops.indent_width, row as u16, glyph);

        let Some(entity) = entities.get(entry.handle) else {
            continue;
        };
        let collapsed = collapser.collapsed(entry.handle) && !entity.children.is_empty();
        let selected = view.selection() == Some(view.offset() + row);
        if collapsed {
            surface.set_bold(true);
        }
        if selected {
            surface.set_invert(true);
        }
        surface.draw(&entity.name);
        if selected {
            surface.set_invert(false);
        }
        if collapsed {
            surface.set_bold(false);
        }
    }
}
