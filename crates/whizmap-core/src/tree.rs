use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;

/// Input node shape: `{ "name": string, "content"?: string, "children"?: [...] }`.
///
/// This mirrors the JSON the surrounding application hands over verbatim, so
/// deserialization is lenient: unknown fields are ignored and both `content`
/// and `children` may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: None,
            children: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Parses a JSON value into a tree root.
    ///
    /// `null` means "nothing to show": the caller gets `Ok(None)` and is
    /// expected to stay idle rather than treat it as a failure.
    pub fn from_json(value: &Value) -> Result<Option<Self>> {
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value.clone())?))
    }

    /// Total node count of this subtree, root included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }
}
