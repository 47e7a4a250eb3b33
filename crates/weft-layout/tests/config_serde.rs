//! Loading panel configuration and attached properties from JSON.

use weft_core::geometry::{Orientation, Rect, Size};
use weft_layout::{
    CanvasOffsets, ConfiguredPanel, Dock, Element, LayoutError, Leaf, Panel, PanelConfig,
};

#[test]
fn wrap_config_loads_with_defaults() {
    let config: PanelConfig = serde_json::from_str(r#"{ "kind": "wrap", "item_width": 30.0 }"#).unwrap();
    assert_eq!(
        config,
        PanelConfig::Wrap {
            orientation: Orientation::Horizontal,
            item_width: Some(30.0),
            item_height: None,
        }
    );

    let ConfiguredPanel::Wrap(mut panel) = config.build().unwrap() else {
        panic!("expected a wrap panel");
    };
    for _ in 0..5 {
        panel.add_child(Leaf::new().height(10.0));
    }
    panel.measure(Size::new(100.0, 100.0)).unwrap();
    panel.arrange(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
    let ys: Vec<f64> = (0..5)
        .map(|i| panel.child(i).unwrap().layout_rect().unwrap().y)
        .collect();
    assert_eq!(ys, vec![0.0, 0.0, 0.0, 10.0, 10.0]);
}

#[test]
fn dock_config_defaults_to_fill() {
    let config: PanelConfig = serde_json::from_str(r#"{ "kind": "dock" }"#).unwrap();
    assert_eq!(
        config,
        PanelConfig::Dock {
            last_child_fill: true
        }
    );
}

#[test]
fn negative_item_size_is_rejected_on_build() {
    let config: PanelConfig =
        serde_json::from_str(r#"{ "kind": "wrap", "orientation": "vertical", "item_height": -5.0 }"#)
            .unwrap();
    assert!(matches!(
        config.validate(),
        Err(LayoutError::InvalidItemSize {
            property: "item_height",
            ..
        })
    ));
}

#[test]
fn unknown_kind_fails_to_parse() {
    let result: Result<PanelConfig, _> = serde_json::from_str(r#"{ "kind": "grid" }"#);
    assert!(result.is_err());
}

#[test]
fn config_round_trips_through_json() {
    let config = PanelConfig::Wrap {
        orientation: Orientation::Vertical,
        item_width: None,
        item_height: Some(12.5),
    };
    let json = serde_json::to_string(&config).unwrap();
    assert!(!json.contains("item_width"));
    let back: PanelConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn attached_properties_load() {
    let offsets: CanvasOffsets = serde_json::from_str(r#"{ "left": 4.0, "bottom": 2.0 }"#).unwrap();
    assert_eq!(offsets, CanvasOffsets::new().left(4.0).bottom(2.0));

    let docks: Vec<Dock> = serde_json::from_str(r#"["left", "top", "right", "bottom"]"#).unwrap();
    assert_eq!(docks, vec![Dock::Left, Dock::Top, Dock::Right, Dock::Bottom]);
}
