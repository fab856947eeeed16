//! Property-based tests for the 2D scroller and its scroll bars.
//!
//! Black-box: drives `ViewportScroller` and `ScrollBarState` through their
//! public API only.

use proptest::prelude::*;
use vport::model::ComponentId;
use vport::state::{GrabInfo, PointerGrab};
use vport::view_state::{Axis, ScrollBarPolicy, ScrollBarState, ViewportScroller};

// ===== Arbitrary Strategies =====

fn arb_policy() -> impl Strategy<Value = ScrollBarPolicy> {
    prop_oneof![
        Just(ScrollBarPolicy::Auto),
        Just(ScrollBarPolicy::Always),
        Just(ScrollBarPolicy::Never),
    ]
}

/// A laid-out scroller: viewport, content extent and bar policy.
fn arb_scroller() -> impl Strategy<Value = ViewportScroller> {
    (1u16..80, 1u16..40, 0usize..500, 0usize..2_000, arb_policy()).prop_map(
        |(width, height, content_width, content_height, policy)| {
            let mut scroller = ViewportScroller::new().with_policy(policy);
            scroller.set_viewport_size(width, height);
            scroller.set_content_extent(content_width, content_height);
            scroller
        },
    )
}

/// Bar inputs with an unclamped thumb: `content <= track * track`.
fn arb_bar_with_offset() -> impl Strategy<Value = (ScrollBarState, usize)> {
    (1usize..60)
        .prop_flat_map(|track| (Just(track), track..=track * track))
        .prop_flat_map(|(track, content)| (Just(track), Just(content), 0..=content - track))
        .prop_map(|(track, content, offset)| {
            (
                ScrollBarState::with(Axis::Vertical, offset, content, track, true),
                offset,
            )
        })
}

fn assert_in_bounds(scroller: &ViewportScroller) {
    let offset = scroller.offset();
    assert!(
        offset.x <= scroller.max_offset(Axis::Horizontal),
        "x {} past max {}",
        offset.x,
        scroller.max_offset(Axis::Horizontal)
    );
    assert!(
        offset.y <= scroller.max_offset(Axis::Vertical),
        "y {} past max {}",
        offset.y,
        scroller.max_offset(Axis::Vertical)
    );
}

// ===== Property 1: Offsets stay clamped =====

proptest! {
    /// Any sequence of deltas leaves the offset inside
    /// `[0, max(0, extent - content_area)]` on both axes.
    #[test]
    fn scroll_by_keeps_offset_in_bounds(
        mut scroller in arb_scroller(),
        deltas in prop::collection::vec((-1_000isize..1_000, -1_000isize..1_000), 1..30),
    ) {
        for (dx, dy) in deltas {
            scroller.scroll_by(dx, dy);
            assert_in_bounds(&scroller);
        }
    }

    /// Shrinking the content pulls an out-of-range offset back.
    #[test]
    fn content_shrink_reclamps_offset(
        mut scroller in arb_scroller(),
        new_width in 0usize..500,
        new_height in 0usize..2_000,
    ) {
        scroller.to_bottom();
        scroller.to_right_edge();
        scroller.set_content_extent(new_width, new_height);
        assert_in_bounds(&scroller);
    }

    /// scroll_by reports movement iff the offset changed.
    #[test]
    fn scroll_by_reports_movement(
        mut scroller in arb_scroller(),
        dx in -50isize..50,
        dy in -50isize..50,
    ) {
        let before = scroller.offset();
        let moved = scroller.scroll_by(dx, dy);
        prop_assert_eq!(moved, scroller.offset() != before);
    }
}

// ===== Property 2: Thumb round trip =====

proptest! {
    /// Mapping an offset to a thumb location and back lands within one
    /// content unit, as long as the thumb is at its natural size.
    #[test]
    fn thumb_location_round_trips((bar, offset) in arb_bar_with_offset()) {
        let location = bar.thumb_location_for(offset).unwrap();
        let back = bar.offset_for_location(location).unwrap();
        prop_assert!(
            back.abs_diff(offset) <= 1,
            "offset {} -> location {} -> offset {}",
            offset,
            location,
            back
        );
    }

    /// The thumb always fits the track.
    #[test]
    fn thumb_stays_inside_track(
        track in 1usize..100,
        content in 1usize..10_000,
        position in 0usize..10_000,
    ) {
        let bar = ScrollBarState::with(Axis::Vertical, position, content, track, true);
        let size = bar.thumb_size().unwrap();
        let location = bar.thumb_location().unwrap();
        prop_assert!(size >= 1.0 && size <= track as f64);
        prop_assert!(location >= 0.0);
        prop_assert!(location + size <= track as f64 + 1e-9);

        let cells = bar.thumb_cells().unwrap();
        prop_assert!(!cells.is_empty());
        prop_assert!(cells.end <= track);
    }
}

// ===== Property 10: Scroll clamps at the bottom =====

#[test]
fn scroll_past_end_clamps_to_last_page() {
    let mut scroller = ViewportScroller::new();
    scroller.set_viewport_size(20, 10);
    scroller.set_content_extent(1, 100);

    assert!(scroller.scroll_by(0, 200));
    assert_eq!(scroller.offset().y, 90);
    assert!(!scroller.scroll_by(0, 1), "already at the bottom");
}

// ===== Bar auto-hide =====

#[test]
fn auto_bars_hide_when_content_fits() {
    let mut scroller = ViewportScroller::new();
    scroller.set_viewport_size(20, 10);
    scroller.set_content_extent(20, 10);

    assert!(!scroller.bar(Axis::Vertical).is_visible());
    assert!(!scroller.bar(Axis::Horizontal).is_visible());
    assert_eq!(scroller.max_offset(Axis::Vertical), 0);
    assert!(!scroller.scroll_by(5, 5));
}

#[test]
fn vertical_bar_can_force_horizontal_bar() {
    let mut scroller = ViewportScroller::new();
    scroller.set_viewport_size(20, 10);
    // Fits horizontally only until the vertical bar takes a column.
    scroller.set_content_extent(20, 50);

    assert!(scroller.bar(Axis::Vertical).is_visible());
    assert!(scroller.bar(Axis::Horizontal).is_visible());
    assert!(scroller.has_corner());
    assert_eq!(scroller.content_area().width, 19);
    assert_eq!(scroller.content_area().height, 9);
    assert_eq!(scroller.max_offset(Axis::Horizontal), 1);
    assert_eq!(scroller.max_offset(Axis::Vertical), 41);
}

#[test]
fn never_policy_keeps_full_area() {
    let mut scroller = ViewportScroller::new().with_policy(ScrollBarPolicy::Never);
    scroller.set_viewport_size(20, 10);
    scroller.set_content_extent(100, 100);

    assert!(!scroller.bar(Axis::Vertical).is_visible());
    assert_eq!(scroller.content_area().width, 20);
    assert_eq!(scroller.max_offset(Axis::Vertical), 90);
}

// ===== Pointer grab exclusivity =====

#[test]
fn second_component_cannot_take_the_grab() {
    let first = ComponentId::new(1);
    let second = ComponentId::new(2);
    let mut grab = PointerGrab::new();

    assert!(grab.grab(GrabInfo {
        owner: first,
        axis: Axis::Vertical,
        anchor: 3,
    }));
    assert!(!grab.grab(GrabInfo {
        owner: second,
        axis: Axis::Horizontal,
        anchor: 0,
    }));
    assert_eq!(grab.owner(), Some(first));

    assert_eq!(grab.release(second), None, "only the owner releases");
    assert_eq!(grab.release(first).map(|info| info.anchor), Some(3));
    assert!(grab.is_free());
}
