use whizmap_core::{MapNode, SizingConfig};

use crate::text::TextMeasurer;

/// Box size for one node, derived from its label text.
///
/// Deterministic and side-effect-free: the same node text, config, and
/// measurer always produce the same box, so a layout pass is reproducible.
///
/// Roots keep a fixed compact size. Other nodes take their width from the
/// longer of name/content (clamped to the configured range) and their height
/// from the estimated wrapped line count of each text block.
pub fn node_size(node: &MapNode, config: &SizingConfig, measurer: &dyn TextMeasurer) -> (f64, f64) {
    if node.is_root() {
        return (config.root_width, config.root_height);
    }

    let name_advance = measurer.advance(&node.name);
    let content_advance = node
        .content
        .as_deref()
        .map(|c| measurer.advance(c))
        .unwrap_or(0.0);

    let width = (name_advance.max(content_advance) + config.width_pad)
        .clamp(config.min_width, config.max_width);

    // Everything wraps inside the inner width; text wider than the clamped
    // box folds into more lines rather than overflowing.
    let wrap_width = (width - config.inner_pad).max(1.0);

    let name_lines = wrapped_lines(name_advance, wrap_width);
    let mut height = name_lines as f64 * config.name_line_height + config.name_block_pad;

    if content_advance > 0.0 {
        let content_lines = wrapped_lines(content_advance, wrap_width);
        height += content_lines as f64 * config.content_line_height + config.content_block_pad;
    }

    (width, height)
}

fn wrapped_lines(advance: f64, wrap_width: f64) -> usize {
    ((advance / wrap_width).ceil() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use whizmap_core::{MindmapState, TreeNode};

    use super::*;
    use crate::text::CharCellMeasurer;

    fn sized(tree: &TreeNode) -> Vec<(f64, f64)> {
        let state = MindmapState::new(tree);
        let config = SizingConfig::default();
        let measurer = CharCellMeasurer::default();
        state
            .iter()
            .map(|n| node_size(n, &config, &measurer))
            .collect()
    }

    #[test]
    fn root_is_fixed_size() {
        let sizes = sized(&TreeNode::new(
            "a very very very long root label that would otherwise be wide",
        ));
        assert_eq!(sizes[0], (160.0, 48.0));
    }

    #[test]
    fn short_labels_clamp_to_min_width() {
        let tree = TreeNode::new("Root").with_children(vec![TreeNode::new("a")]);
        let sizes = sized(&tree);
        assert_eq!(sizes[1].0, 120.0);
        // One name line, no content block.
        assert_eq!(sizes[1].1, 18.0 + 18.0);
    }

    #[test]
    fn long_labels_clamp_to_max_width_and_wrap() {
        let long = "x".repeat(200);
        let tree = TreeNode::new("Root").with_children(vec![TreeNode::new(long)]);
        let sizes = sized(&tree);
        assert_eq!(sizes[1].0, 250.0);
        // 200 cells * 6 px = 1200 px of text folded into 230 px lines.
        let lines = (1200.0_f64 / 230.0).ceil();
        assert_eq!(sizes[1].1, lines * 18.0 + 18.0);
    }

    #[test]
    fn content_adds_a_second_block() {
        let tree = TreeNode::new("Root").with_children(vec![
            TreeNode::new("A").with_content("hello"),
            TreeNode::new("B"),
        ]);
        let sizes = sized(&tree);
        let (a, b) = (sizes[1], sizes[2]);
        assert!(a.1 > b.1, "content-bearing box must be taller");
        assert_eq!(a.1 - b.1, 12.0 + 12.0);
    }

    #[test]
    fn sizing_is_deterministic() {
        let tree = TreeNode::new("Root")
            .with_children(vec![TreeNode::new("A").with_content("hello world, longer body")]);
        assert_eq!(sized(&tree), sized(&tree));
    }
}
