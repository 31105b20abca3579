pub mod arena;
pub mod buffer;
pub mod collapse;
pub mod command;
pub mod connector;
pub mod display;
pub mod entity;
pub mod flatten;
pub mod view;

pub use arena::{Arena, Handle};
pub use buffer::{Buffer, Cell};
pub use collapse::Collapser;
pub use command::Command;
pub use connector::{connector_plan, Branch, ConnectorPlan};
pub use display::{display_hierarchy, DisplayOps, DrawSurface};
pub use entity::{add_children, has_children, root_of, siblings, Entity};
pub use flatten::{flatten_entities, flatten_entity, visible_subtree_size, FlattenedHandle};
pub use view::View;
