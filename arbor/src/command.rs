/// Input commands consumed by [`View::apply`](crate::View::apply). The
/// input loop owns the keymap; the view only sees these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveUp,
    MoveDown,
    Collapse,
    Expand,
    AddChild,
    AddSibling,
    Remove,
    RecordHandle,
    GotoRecorded,
}
