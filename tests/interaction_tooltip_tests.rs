use indicator_charts::core::{Color, GeometryItem, ItemMeta};
use indicator_charts::interaction::{TooltipConfig, TooltipOverlay, TooltipState, hit_test, hover};

fn point_at(x: f64, y: f64, country: &str) -> GeometryItem {
    GeometryItem::Point {
        x,
        y,
        radius: 5.0,
        color: Color::STEEL_BLUE,
        meta: ItemMeta::new("Country", country).with_field("Startups", 120.0, ""),
    }
}

#[test]
fn pointer_inside_radius_shows_tooltip() {
    let items = vec![point_at(50.0, 50.0, "China")];
    let state = hover(52.0, 51.0, &items, TooltipConfig::default());

    assert!(state.visible);
    assert_eq!(state.x, 62.0);
    assert_eq!(state.y, 41.0);
    assert_eq!(
        state.html,
        "<strong>Startups:</strong> 120.00<br><strong>Country:</strong> China"
    );
}

#[test]
fn pointer_outside_every_item_hides_tooltip() {
    let items = vec![point_at(50.0, 50.0, "China")];
    let state = hover(80.0, 80.0, &items, TooltipConfig::default());
    assert_eq!(state, TooltipState::hidden());
}

#[test]
fn later_items_win_overlapping_hits() {
    let items = vec![point_at(50.0, 50.0, "China"), point_at(53.0, 50.0, "Japan")];
    let hit = hit_test(51.0, 50.0, &items).expect("hit");
    assert_eq!(hit.meta().map(|meta| meta.category.as_str()), Some("Japan"));
}

#[test]
fn zero_area_rect_is_never_hit() {
    let items = vec![GeometryItem::Rect {
        x0: 10.0,
        y0: 10.0,
        x1: 10.0,
        y1: 40.0,
        color: Color::GREEN,
        meta: ItemMeta::new("Sector", "AI"),
    }];
    assert!(hit_test(10.0, 20.0, &items).is_none());
}

#[test]
fn overlay_translates_viewport_pointer_into_plot_space() {
    let items = vec![point_at(50.0, 50.0, "China")];
    let mut overlay = TooltipOverlay::new(TooltipConfig::default());
    overlay.set_origin(60.0, 30.0);

    let state = overlay.on_pointer_move(112.0, 81.0, &items).clone();
    assert!(state.visible);
    assert_eq!((state.x, state.y), (122.0, 71.0));

    let hidden = overlay.on_pointer_leave();
    assert!(!hidden.visible);
    assert!(hidden.html.is_empty());
}

#[test]
fn tooltip_escapes_category_markup() {
    let items = vec![point_at(0.0, 0.0, "<b>Korea</b>")];
    let state = hover(0.0, 0.0, &items, TooltipConfig::default());
    assert!(state.html.ends_with("&lt;b&gt;Korea&lt;/b&gt;"));
}
