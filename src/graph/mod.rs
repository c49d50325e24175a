pub mod cycle;
pub mod forest;

pub use cycle::{can_assign_parent, check_parent};
pub use forest::{
    build_forest, children_index, descendants, flatten, has_open_descendant, ChildrenIndex,
    TreeNode, TreeRow,
};
