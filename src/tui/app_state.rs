use crate::tree::NodeId;

/// One line of the checkbox tree as currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct VisibleRow {
    pub node: NodeId,
    pub depth: usize,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(super) enum AppMode {
    Browsing,
    EditingRoot,
}
