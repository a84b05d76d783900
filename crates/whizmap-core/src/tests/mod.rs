
use crate::TreeNode;

/// Root with two children, the first of which carries body text and a
/// grandchild. Shared by the ingestion and toggle suites.
pub(crate) fn sample_tree() -> TreeNode {
    TreeNode::new("Root").with_children(vec![
        TreeNode::new("A")
            .with_content("hello")
            .with_children(vec![TreeNode::new("A1")]),
        TreeNode::new("B"),
    ])
}
