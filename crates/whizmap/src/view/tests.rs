use std::time::Duration;

use serde_json::json;
use whizmap_core::geom;
use whizmap_core::{MindmapConfig, NodeId, Orientation, ToggleOutcome, TreeNode, ZoomTransform};

use super::scene::{NodePhase, Overlay, Scene};
use super::{MindmapView, ViewEvent};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// The Root/A/B tree from the behavior contract: A carries body text.
fn sample_tree() -> TreeNode {
    TreeNode::new("Root").with_children(vec![
        TreeNode::new("A").with_content("hello"),
        TreeNode::new("B"),
    ])
}

fn sample_view() -> MindmapView {
    MindmapView::new(
        &sample_tree(),
        geom::size(1280.0, 720.0),
        MindmapConfig::default(),
    )
}

fn settled(view: &mut MindmapView, now: Duration) -> Scene {
    view.advance(now);
    view.scene(now)
}

#[test]
fn initial_scene_shows_root_and_both_children() {
    let mut view = sample_view();
    let scene = settled(&mut view, ms(1000));

    assert_eq!(scene.nodes.len(), 3);
    assert_eq!(scene.edges.len(), 2);
    assert!(!scene.animating);

    let a = scene.node(NodeId(1)).unwrap();
    let b = scene.node(NodeId(2)).unwrap();
    assert!(a.height > b.height, "content-bearing box must be taller");

    let (top, bottom) = if a.y < b.y { (a, b) } else { (b, a) };
    assert!(
        top.y + top.height / 2.0 + 20.0 <= bottom.y - bottom.height / 2.0 + 1e-9,
        "sibling boxes must not overlap"
    );
}

#[test]
fn collapse_hides_children_and_expand_restores_the_layout() {
    let mut view = sample_view();
    let before = settled(&mut view, ms(1000));

    view.toggle_node(NodeId(0), ms(1000)).unwrap();
    let collapsed = settled(&mut view, ms(2000));
    assert_eq!(collapsed.nodes.len(), 1);
    assert!(collapsed.edges.is_empty());

    view.toggle_node(NodeId(0), ms(2000)).unwrap();
    let after = settled(&mut view, ms(3000));
    assert_eq!(after.nodes.len(), before.nodes.len());
    for node in &before.nodes {
        let restored = after.node(node.id).unwrap();
        assert_eq!((node.x, node.y), (restored.x, restored.y));
        assert_eq!((node.width, node.height), (restored.width, restored.height));
    }

    let events = view.drain_events();
    assert_eq!(
        events,
        vec![
            ViewEvent::NodeToggled {
                id: NodeId(0),
                outcome: ToggleOutcome::Collapsed
            },
            ViewEvent::NodeToggled {
                id: NodeId(0),
                outcome: ToggleOutcome::Expanded
            },
        ]
    );
}

#[test]
fn zoom_out_twice_then_reset_lands_on_identity() {
    let mut view = sample_view();
    view.zoom_out(ms(0));
    view.advance(ms(300));
    view.zoom_out(ms(300));
    view.advance(ms(600));
    assert!(view.transform_at(ms(600)).k < 1.0);

    view.reset_zoom(ms(600));
    view.advance(ms(1100));
    assert_eq!(view.transform_at(ms(1100)), ZoomTransform::IDENTITY);
    assert_eq!(view.scene(ms(1100)).transform, ZoomTransform::IDENTITY);
}

#[test]
fn zoom_step_scales_about_the_surface_center() {
    let mut view = sample_view();
    view.zoom_in(ms(0));
    view.advance(ms(300));

    let t = view.transform_at(ms(300));
    assert!((t.k - 1.2).abs() < 1e-12);

    let center = geom::point(640.0, 360.0);
    let before = ZoomTransform::IDENTITY.invert(center);
    let after = t.invert(center);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);
}

#[test]
fn wheel_zooms_about_the_cursor() {
    let mut view = sample_view();
    let pos = geom::point(200.0, 100.0);
    let world_before = view.transform_at(ms(10)).invert(pos);

    view.wheel(-120.0, pos, ms(10));
    let t = view.transform_at(ms(10));
    assert!(t.k > 1.0);
    let world_after = t.invert(pos);
    assert!((world_before.x - world_after.x).abs() < 1e-9);
    assert!((world_before.y - world_after.y).abs() < 1e-9);
}

#[test]
fn card_overlay_captures_wheel_input() {
    let mut view = sample_view();
    let scene = settled(&mut view, ms(1000));
    let a = scene.node(NodeId(1)).unwrap();

    view.pointer_moved(geom::point(a.x, a.y), ms(1000));
    let Overlay::Card(card) = view.scene(ms(1000)).overlay else {
        panic!("hovering a content node must show the card");
    };

    let inside = geom::point(card.x + 5.0, card.y + 5.0);
    view.pointer_moved(inside, ms(1010));

    let before = view.transform_at(ms(1020));
    view.wheel(-120.0, inside, ms(1020));
    assert_eq!(view.transform_at(ms(1030)), before);

    // Leaving the card hides the overlay only after the grace period.
    view.pointer_moved(geom::point(1000.0, 700.0), ms(1100));
    view.advance(ms(1500));
    assert!(!view.scene(ms(1500)).overlay.is_none());
    view.advance(ms(1700));
    assert!(view.scene(ms(1700)).overlay.is_none());
}

#[test]
fn tooltip_shows_depth_and_child_count_and_debounces() {
    let mut view = sample_view();
    let scene = settled(&mut view, ms(1000));
    let b = scene.node(NodeId(2)).unwrap();
    let pos = geom::point(b.x, b.y);

    view.pointer_moved(pos, ms(1000));
    let Overlay::Tooltip(tip) = view.scene(ms(1000)).overlay else {
        panic!("hovering a plain node must show the tooltip");
    };
    assert_eq!(tip.name, "B");
    assert_eq!(tip.depth, 1);
    assert_eq!(tip.child_count, 0);

    // Leave: the tooltip survives until the node grace period elapses.
    view.pointer_moved(geom::point(1000.0, 700.0), ms(1100));
    view.advance(ms(3900));
    assert!(!view.scene(ms(3900)).overlay.is_none());
    view.advance(ms(4200));
    assert!(view.scene(ms(4200)).overlay.is_none());
}

#[test]
fn reentering_the_node_cancels_the_pending_hide() {
    let mut view = sample_view();
    let scene = settled(&mut view, ms(1000));
    let b = scene.node(NodeId(2)).unwrap();
    let pos = geom::point(b.x, b.y);

    view.pointer_moved(pos, ms(1000));
    view.pointer_moved(geom::point(1000.0, 700.0), ms(1100));
    view.pointer_moved(pos, ms(2000));

    view.advance(ms(60_000));
    assert!(!view.scene(ms(60_000)).overlay.is_none());
}

#[test]
fn rapid_toggle_preempts_the_running_transition() {
    let tree = TreeNode::new("Root").with_children(vec![
        TreeNode::new("A").with_children(vec![TreeNode::new("a1"), TreeNode::new("a2")]),
        TreeNode::new("B"),
    ]);
    let mut view = MindmapView::new(&tree, geom::size(1280.0, 720.0), MindmapConfig::default());
    view.advance(ms(1000));

    view.toggle_node(NodeId(1), ms(1000)).unwrap();
    view.toggle_node(NodeId(1), ms(1100)).unwrap();

    // The state machine reflects the latest toggle immediately.
    assert_eq!(
        view.state().visible_ids(),
        [NodeId(0), NodeId(1), NodeId(4)]
    );

    // The just-revealed children are already animating back out.
    let scene = view.scene(ms(1150));
    assert!(scene.nodes.iter().any(|n| n.phase == NodePhase::Exiting));

    let done = settled(&mut view, ms(2500));
    assert_eq!(done.nodes.len(), 3);
    assert!(!done.animating);
}

#[test]
fn click_toggles_but_a_drag_pans() {
    let mut view = sample_view();
    view.advance(ms(1000));
    let scene = view.scene(ms(1000));
    let root = scene.node(NodeId(0)).unwrap();
    let on_root = geom::point(root.x, root.y);

    view.pointer_pressed(on_root, ms(1000));
    view.pointer_released(on_root, ms(1010));
    assert_eq!(
        view.drain_events(),
        vec![ViewEvent::NodeToggled {
            id: NodeId(0),
            outcome: ToggleOutcome::Collapsed
        }]
    );

    view.pointer_pressed(geom::point(900.0, 600.0), ms(1100));
    view.pointer_moved(geom::point(950.0, 620.0), ms(1110));
    view.pointer_released(geom::point(950.0, 620.0), ms(1120));

    let t = view.transform_at(ms(1130));
    assert_eq!((t.x, t.y), (50.0, 20.0));
    assert!(view.drain_events().is_empty());
}

#[test]
fn leaf_clicks_are_no_ops() {
    let mut view = sample_view();
    view.advance(ms(1000));
    let scene = view.scene(ms(1000));
    let b = scene.node(NodeId(2)).unwrap();

    view.pointer_pressed(geom::point(b.x, b.y), ms(1000));
    view.pointer_released(geom::point(b.x, b.y), ms(1010));

    assert!(view.drain_events().is_empty());
    assert_eq!(view.scene(ms(1010)).nodes.len(), 3);
}

#[test]
fn minimap_viewport_tracks_the_transform() {
    let mut view = sample_view();
    view.advance(ms(1000));
    view.zoom_in(ms(1000));
    view.advance(ms(1300));

    let scene = view.scene(ms(1300));
    let minimap = scene.minimap.unwrap();

    let bounds = view.layout().bounds.unwrap();
    let scale = whizmap_render::fit_scale(&bounds, &view.config().minimap);
    let expected = whizmap_render::viewport_rect(
        &view.transform_at(ms(1300)),
        view.surface(),
        &bounds,
        scale,
    );
    assert!((minimap.viewport.x - expected.x).abs() < 1e-9);
    assert!((minimap.viewport.y - expected.y).abs() < 1e-9);
    assert!((minimap.viewport.width - expected.width).abs() < 1e-9);
    assert!((minimap.viewport.height - expected.height).abs() < 1e-9);
}

#[test]
fn minimap_drag_pans_the_canvas() {
    let mut view = sample_view();
    view.advance(ms(1000));
    view.zoom_in(ms(1000));
    view.advance(ms(1300));
    let k = view.transform_at(ms(1300)).k;

    view.minimap_drag(30.0, 20.0, ms(1300));
    view.advance(ms(1600));

    let scene = view.scene(ms(1600));
    assert_eq!(scene.transform.k, k);
    let viewport = scene.minimap.unwrap().viewport;
    assert!((viewport.x - 30.0).abs() < 1e-9);
    assert!((viewport.y - 20.0).abs() < 1e-9);
}

#[test]
fn close_request_emits_dismissed_and_tears_down() {
    let mut view = sample_view();
    view.advance(ms(1000));

    view.request_close();
    assert!(view.is_torn_down());
    assert_eq!(view.drain_events(), vec![ViewEvent::Dismissed]);

    assert!(view.scene(ms(2000)).nodes.is_empty());
    let before = view.transform_at(ms(2000));
    view.wheel(-120.0, geom::point(0.0, 0.0), ms(2000));
    assert_eq!(view.transform_at(ms(2100)), before);
    assert_eq!(
        view.toggle_node(NodeId(0), ms(2100)).unwrap(),
        ToggleOutcome::Leaf
    );

    // Idempotent.
    view.request_close();
    assert!(view.drain_events().is_empty());
}

#[test]
fn from_json_null_stays_idle() {
    let idle = MindmapView::from_json(
        &json!(null),
        geom::size(800.0, 600.0),
        MindmapConfig::default(),
    )
    .unwrap();
    assert!(idle.is_none());
}

#[test]
fn from_json_builds_a_live_view() {
    let value = json!({
        "name": "Root",
        "children": [{ "name": "A", "content": "hello" }, { "name": "B" }]
    });
    let mut view = MindmapView::from_json(&value, geom::size(800.0, 600.0), MindmapConfig::default())
        .unwrap()
        .unwrap();
    assert_eq!(settled(&mut view, ms(1000)).nodes.len(), 3);
}

#[test]
fn reingesting_discards_identities_and_transform() {
    let mut view = sample_view();
    view.advance(ms(1000));
    view.zoom_in(ms(1000));
    view.advance(ms(1300));

    let other = TreeNode::new("Other").with_children(vec![TreeNode::new("X")]);
    view.ingest(&other, ms(1300));

    assert_eq!(view.state().len(), 2);
    assert_eq!(view.state().node(NodeId(0)).unwrap().name, "Other");
    assert_eq!(view.transform_at(ms(1300)), ZoomTransform::IDENTITY);
}

#[test]
fn surface_resize_relayouts_without_losing_nodes() {
    let mut view = sample_view();
    view.advance(ms(1000));
    view.set_surface_size(geom::size(640.0, 480.0), ms(1000));
    let scene = settled(&mut view, ms(2000));
    assert_eq!(scene.nodes.len(), 3);
    assert_eq!(view.surface().width, 640.0);
}

#[test]
fn top_down_orientation_layers_along_y() {
    let mut config = MindmapConfig::default();
    config.layout.orientation = Orientation::TopDown;
    let mut view = MindmapView::new(&sample_tree(), geom::size(1280.0, 720.0), config);
    let scene = settled(&mut view, ms(1000));

    for node in &scene.nodes {
        assert_eq!(node.y, f64::from(node.depth) * 280.0);
    }
}
