use arbor::{add_children, Arena, Entity, Handle};

/// The demo forest: twelve entities named after their handle index,
/// arranged under three roots.
pub fn create_sample_entities(entities: &mut Arena<Entity>) -> Vec<Handle> {
    let handles: Vec<Handle> = (0..12)
        .map(|i| entities.add_with(Entity::new(format!("entity_{i}"))))
        .collect();

    add_children(handles[0], &[handles[1], handles[2]], entities);
    add_children(handles[6], &[handles[10]], entities);
    add_children(handles[7], &[handles[3], handles[4]], entities);
    add_children(handles[2], &[handles[5], handles[6], handles[11]], entities);
    add_children(handles[8], &[handles[9]], entities);

    vec![handles[0], handles[7], handles[8]]
}
