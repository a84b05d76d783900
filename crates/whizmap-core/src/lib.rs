#![forbid(unsafe_code)]

//! Mindmap tree model + expand/collapse state machine (headless).
//!
//! Design goals:
//! - deterministic, testable state: same input tree → same arena, same ids
//! - no I/O and no drawing; layout and interaction live in the crates above
//! - identities stable across layout passes so animations can correlate nodes

pub mod config;
pub mod error;
pub mod geom;
pub mod state;
pub mod tree;
pub mod viewport;

pub use config::{
    AnimationConfig, HoverConfig, LayoutConfig, MindmapConfig, MinimapConfig, Orientation,
    SizingConfig, ZoomConfig,
};
pub use error::{Error, Result};
pub use state::{DisplayState, MapNode, MindmapState, NodeId, ToggleOutcome};
pub use tree::TreeNode;
pub use viewport::ZoomTransform;

#[cfg(test)]
mod tests;
