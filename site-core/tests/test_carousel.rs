use site_core::carousel::{Carousel, CarouselMode, StaticLayoutPolicy, Transform};
use site_core::config::CarouselTuning;
use site_core::gesture::PointerSource;
use site_core::metrics::LayoutSnapshot;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn offset_of(transform: Transform) -> f64 {
    transform.offset().expect("carousel should be translated")
}

/// Six 300px fund cards in a 1000px container: three fit, max index 3.
fn funds_layout() -> LayoutSnapshot {
    LayoutSnapshot::uniform(6, 300.0, "32px", 1000.0, 1280.0)
}

fn team_layout() -> LayoutSnapshot {
    LayoutSnapshot::uniform(5, 200.0, "32px", 800.0, 1280.0)
}

fn bind(layout: &LayoutSnapshot, mode: CarouselMode) -> Carousel {
    Carousel::bind(layout, mode, layout.item_widths.len(), &CarouselTuning::default())
}

#[test]
fn centered_offset_matches_formula() {
    let layout = team_layout();
    let mut carousel = bind(&layout, CarouselMode::Centered);
    let frame = carousel.go_to(&layout, 2).unwrap();
    // -2 * 232 + (800 - 200) / 2
    assert!(approx_eq(offset_of(frame.transform), -164.0));
    assert_eq!(frame.active_item, Some(2));
    assert_eq!(frame.transform.css(), "translateX(-164px)");
}

#[test]
fn paged_offset_matches_formula() {
    let layout = funds_layout();
    let mut carousel = bind(&layout, CarouselMode::Paged);
    let frame = carousel.go_to(&layout, 1).unwrap();
    assert!(approx_eq(offset_of(frame.transform), -332.0));
    assert_eq!(frame.active_item, None);
    assert_eq!(frame.metrics.visible_count, 3);
    assert_eq!(frame.metrics.max_index, 3);
}

#[test]
fn first_render_is_at_origin() {
    let layout = funds_layout();
    let mut carousel = bind(&layout, CarouselMode::Paged);
    let frame = carousel.render(&layout);
    assert_eq!(frame.current_index, 0);
    assert!(frame.prev_disabled);
    assert!(!frame.next_disabled);
    assert_eq!(frame.transform.css(), "translateX(0px)");
}

#[test]
fn go_to_clamps_into_range() {
    let layout = funds_layout();
    let mut carousel = bind(&layout, CarouselMode::Paged);
    let frame = carousel.go_to(&layout, 42).unwrap();
    assert_eq!(frame.current_index, 3);
    assert!(frame.next_disabled);
    assert!(!frame.prev_disabled);
}

#[test]
fn next_is_idempotent_at_upper_bound() {
    let layout = funds_layout();
    let mut carousel = bind(&layout, CarouselMode::Paged);
    carousel.go_to(&layout, 3);
    assert!(carousel.next(&layout).is_none());
    assert_eq!(carousel.current_index(), 3);
}

#[test]
fn previous_is_idempotent_at_zero() {
    let layout = team_layout();
    let mut carousel = bind(&layout, CarouselMode::Centered);
    assert!(carousel.previous(&layout).is_none());
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn index_stays_in_bounds_through_navigation() {
    let layout = funds_layout();
    let mut carousel = bind(&layout, CarouselMode::Paged);
    let max_index = carousel.metrics(&layout).max_index;

    for step in 0..40 {
        match step % 5 {
            0 | 1 | 2 => {
                carousel.next(&layout);
            }
            3 => {
                carousel.previous(&layout);
            }
            _ => {
                carousel.go_to(&layout, step);
            }
        }
        assert!(carousel.current_index() <= max_index);
    }
}

#[test]
fn exactly_one_dot_is_active() {
    let layout = team_layout();
    let mut carousel = bind(&layout, CarouselMode::Centered);
    for target in [0, 3, 1, 4, 9] {
        let frame = carousel.go_to(&layout, target).unwrap();
        let active: Vec<usize> = (0..5).filter(|i| frame.is_dot_active(*i)).collect();
        assert_eq!(active, vec![frame.current_index]);
        let items: Vec<usize> = (0..5).filter(|i| frame.is_item_active(*i)).collect();
        assert_eq!(items, vec![frame.current_index]);
    }
}

#[test]
fn centered_next_disabled_on_last_member() {
    let layout = team_layout();
    let mut carousel = bind(&layout, CarouselMode::Centered);
    let frame = carousel.go_to(&layout, 4).unwrap();
    assert!(frame.next_disabled);
    assert_eq!(frame.metrics.max_index, 4);
    assert_eq!(frame.metrics.visible_count, 1);
}

#[test]
fn short_swipe_is_a_tap() {
    let layout = funds_layout();
    let mut carousel = bind(&layout, CarouselMode::Paged);
    carousel.pointer_down(200.0, PointerSource::Touch);
    assert!(carousel.pointer_up(&layout, 160.0, PointerSource::Touch).is_none());
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn long_swipe_steps_once() {
    let layout = funds_layout();
    let mut carousel = bind(&layout, CarouselMode::Paged);

    carousel.pointer_down(200.0, PointerSource::Mouse);
    let frame = carousel.pointer_up(&layout, 140.0, PointerSource::Mouse).unwrap();
    assert_eq!(frame.current_index, 1);

    carousel.pointer_down(100.0, PointerSource::Touch);
    let frame = carousel.pointer_up(&layout, 160.0, PointerSource::Touch).unwrap();
    assert_eq!(frame.current_index, 0);
}

#[test]
fn backwards_swipe_is_clamped_at_zero() {
    let layout = funds_layout();
    let mut carousel = bind(&layout, CarouselMode::Paged);
    carousel.pointer_down(100.0, PointerSource::Touch);
    assert!(carousel.pointer_up(&layout, 160.0, PointerSource::Touch).is_none());
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn static_layout_disables_everything() {
    // Three cards on a desktop viewport
    let layout = LayoutSnapshot::uniform(3, 300.0, "32px", 1200.0, 1440.0);
    let mut carousel = bind(&layout, CarouselMode::Paged);
    assert!(carousel.is_static());

    assert!(carousel.next(&layout).is_none());
    assert!(carousel.previous(&layout).is_none());
    assert!(carousel.go_to(&layout, 2).is_none());

    carousel.pointer_down(300.0, PointerSource::Touch);
    assert!(!carousel.is_dragging());
    assert!(carousel.pointer_up(&layout, 0.0, PointerSource::Touch).is_none());

    let frame = carousel.render(&layout);
    assert_eq!(frame.transform, Transform::None);
    assert_eq!(frame.transform.css(), "none");
    assert!(frame.prev_disabled && frame.next_disabled);
    assert_eq!(frame.active_dot, Some(0));
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn static_layout_requires_paged_desktop_and_few_items() {
    let mobile = LayoutSnapshot::uniform(3, 300.0, "32px", 360.0, 390.0);
    assert!(!bind(&mobile, CarouselMode::Paged).is_static());

    let many = LayoutSnapshot::uniform(4, 300.0, "32px", 1200.0, 1440.0);
    assert!(!bind(&many, CarouselMode::Paged).is_static());

    let team = LayoutSnapshot::uniform(2, 300.0, "32px", 1200.0, 1440.0);
    assert!(!bind(&team, CarouselMode::Centered).is_static());

    let breakpoint = LayoutSnapshot::uniform(3, 300.0, "32px", 1000.0, 1024.0);
    assert!(bind(&breakpoint, CarouselMode::Paged).is_static());
}

#[test]
fn static_decision_is_fixed_at_bind_by_default() {
    let desktop = LayoutSnapshot::uniform(3, 300.0, "32px", 1200.0, 1440.0);
    let mut carousel = bind(&desktop, CarouselMode::Paged);
    assert!(carousel.is_static());

    let mobile = LayoutSnapshot::uniform(3, 300.0, "32px", 600.0, 640.0);
    let frame = carousel.resize(&mobile);
    assert!(frame.is_static);
    assert!(carousel.next(&mobile).is_none());
}

#[test]
fn static_decision_can_follow_resizes() {
    let tuning = CarouselTuning {
        static_policy: StaticLayoutPolicy::RecomputeOnResize,
        ..CarouselTuning::default()
    };
    let desktop = LayoutSnapshot::uniform(3, 300.0, "32px", 1200.0, 1440.0);
    let mut carousel = Carousel::bind(&desktop, CarouselMode::Paged, 3, &tuning);
    assert!(carousel.is_static());

    // 600px container fits one 300px card: max index 2
    let mobile = LayoutSnapshot::uniform(3, 300.0, "32px", 600.0, 640.0);
    let frame = carousel.resize(&mobile);
    assert!(!frame.is_static);
    assert_eq!(frame.metrics.max_index, 2);
    assert_eq!(carousel.next(&mobile).unwrap().current_index, 1);

    let frame = carousel.resize(&desktop);
    assert!(frame.is_static);
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn resize_reclamps_position() {
    let layout = funds_layout();
    let mut carousel = bind(&layout, CarouselMode::Paged);
    carousel.go_to(&layout, 3);

    // Everything fits once the container widens
    let wide = LayoutSnapshot::uniform(6, 300.0, "32px", 2000.0, 2100.0);
    let frame = carousel.resize(&wide);
    assert_eq!(frame.metrics.visible_count, 6);
    assert_eq!(frame.current_index, 0);
    assert!(frame.next_disabled);
}

#[test]
fn width_follows_the_item_on_screen() {
    let layout = LayoutSnapshot {
        item_widths: vec![300.0, 200.0, 200.0, 200.0, 200.0],
        gap: Some("20px".into()),
        container_width: Some(800.0),
        viewport_width: 1280.0,
    };
    let mut carousel = bind(&layout, CarouselMode::Centered);
    let frame = carousel.go_to(&layout, 1).unwrap();
    assert!(approx_eq(frame.metrics.item_width, 200.0));
    // -1 * 220 + (800 - 200) / 2
    assert!(approx_eq(offset_of(frame.transform), 80.0));
}

#[test]
fn click_selects_only_in_center_mode() {
    let team = team_layout();
    let mut carousel = bind(&team, CarouselMode::Centered);
    assert!(carousel.select(&team, 0).is_none());
    assert_eq!(carousel.select(&team, 3).unwrap().current_index, 3);

    let funds = funds_layout();
    let mut carousel = bind(&funds, CarouselMode::Paged);
    assert!(carousel.select(&funds, 2).is_none());
}

#[test]
fn empty_carousel_degrades() {
    let layout = LayoutSnapshot::uniform(0, 0.0, "32px", 800.0, 390.0);
    let mut carousel = bind(&layout, CarouselMode::Centered);
    let frame = carousel.render(&layout);
    assert_eq!(frame.active_dot, None);
    assert_eq!(frame.active_item, None);
    assert!(frame.prev_disabled && frame.next_disabled);
    assert!(carousel.next(&layout).is_none());
}

#[test]
fn go_to_clamps_against_metrics_of_current_item() {
    // The narrow last card would report max index 0 if it were measured.
    let layout = LayoutSnapshot {
        item_widths: vec![300.0, 300.0, 300.0, 300.0, 300.0, 100.0],
        gap: Some("32px".into()),
        container_width: Some(1000.0),
        viewport_width: 1280.0,
    };
    let mut carousel = bind(&layout, CarouselMode::Paged);
    let frame = carousel.go_to(&layout, 5).unwrap();
    assert_eq!(frame.current_index, 3);
    assert!(approx_eq(frame.metrics.item_width, 300.0));
    assert!(approx_eq(offset_of(frame.transform), -996.0));
    assert!(frame.next_disabled);
}

#[test]
fn click_ending_a_mouse_swipe_does_not_select() {
    let layout = LayoutSnapshot::uniform(5, 300.0, "32px", 800.0, 1280.0);
    let mut carousel = bind(&layout, CarouselMode::Centered);
    carousel.go_to(&layout, 1).unwrap();

    carousel.pointer_down(500.0, PointerSource::Mouse);
    let frame = carousel.pointer_up(&layout, 420.0, PointerSource::Mouse).unwrap();
    assert_eq!(frame.current_index, 2);

    // mouseup over item 1 is followed by its click.
    assert!(carousel.select(&layout, 1).is_none());
    assert_eq!(carousel.current_index(), 2);

    // A later genuine click still selects.
    assert_eq!(carousel.select(&layout, 1).unwrap().current_index, 1);
}
