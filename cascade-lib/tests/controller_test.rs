//! Integration tests for the cascading selection controller.

use std::sync::Arc;

use cascade_lib::config::lexical_comparator;
use cascade_lib::error::SelectError;
use cascade_lib::model::HierarchyDataset;
use cascade_lib::{CascadeConfig, CascadeController, CascadeEvent, CascadeState, Level};
use serde_json::json;

fn thailand() -> serde_json::Value {
    json!([
        {
            "name_th": "กรุงเทพมหานคร",
            "name_en": "Bangkok",
            "lv4": [
                {
                    "name_th": "ปทุมวัน",
                    "name_en": "Pathum Wan",
                    "lv5": [
                        { "name_th": "ลุมพินี", "name_en": "Lumphini", "zip_code": "10330" },
                        { "name_th": "รองเมือง", "name_en": "Rong Mueang", "zip_code": "10330" }
                    ]
                },
                {
                    "name_th": "บางรัก",
                    "name_en": "Bang Rak",
                    "lv5": [
                        { "name_th": "สีลม", "name_en": "Si Lom", "zip_code": "10500" }
                    ]
                }
            ]
        },
        {
            "name_th": "เชียงใหม่",
            "name_en": "Chiang Mai",
            "lv4": [
                {
                    "name_th": "เมืองเชียงใหม่",
                    "name_en": "Mueang Chiang Mai",
                    "lv5": [
                        { "name_th": "ศรีภูมิ", "name_en": "Si Phum", "zip_code": "50200" }
                    ]
                }
            ]
        }
    ])
}

fn dataset() -> HierarchyDataset {
    let raw = serde_json::from_value(thailand()).unwrap();
    HierarchyDataset::from_raw(raw, "en", &lexical_comparator()).unwrap()
}

fn english_controller() -> CascadeController {
    let mut controller = CascadeController::new(&CascadeConfig::new("thailand").with_language("en"));
    controller.initialize(dataset());
    controller
}

#[test]
fn test_region_options_are_sorted_region_names() {
    let controller = english_controller();
    assert_eq!(
        controller.available_options(Level::Region),
        ["Bangkok", "Chiang Mai"]
    );
}

#[test]
fn test_sort_order_follows_comparator() {
    let raw = serde_json::from_value(json!([
        { "name_en": "Chonburi", "lv4": [] },
        { "name_en": "Ayutthaya", "lv4": [] },
        { "name_en": "Bangkok", "lv4": [] }
    ]))
    .unwrap();
    let dataset = HierarchyDataset::from_raw(raw, "en", &lexical_comparator()).unwrap();

    let mut controller = CascadeController::default();
    controller.initialize(dataset);
    assert_eq!(
        controller.available_options(Level::Region),
        ["Ayutthaya", "Bangkok", "Chonburi"]
    );
}

#[test]
fn test_custom_comparator_applies_at_every_level() {
    let reverse: cascade_lib::Comparator = Arc::new(|a: &str, b: &str| b.cmp(a));
    let config = CascadeConfig::new("thailand")
        .with_language("en")
        .with_comparator(reverse);

    let mut controller = CascadeController::new(&config);
    controller.initialize(dataset());
    assert_eq!(
        controller.available_options(Level::Region),
        ["Chiang Mai", "Bangkok"]
    );

    controller.select_region("Bangkok").unwrap();
    assert_eq!(
        controller.available_options(Level::SubRegion),
        ["Pathum Wan", "Bang Rak"]
    );

    controller.select_sub_region("Pathum Wan").unwrap();
    assert_eq!(
        controller.available_options(Level::Locality),
        ["Rong Mueang", "Lumphini"]
    );
}

#[test]
fn test_select_region_populates_children_and_clears_lower_levels() {
    let mut controller = english_controller();
    controller.select_region("Bangkok").unwrap();

    assert_eq!(
        controller.available_options(Level::SubRegion),
        ["Bang Rak", "Pathum Wan"]
    );
    assert_eq!(controller.selected_sub_region(), None);
    assert_eq!(controller.selected_locality(), None);
    assert!(controller.available_options(Level::Locality).is_empty());
}

#[test]
fn test_select_region_is_idempotent() {
    let mut controller = english_controller();
    controller.select_region("Bangkok").unwrap();
    let first_options = controller.available_options(Level::SubRegion);

    controller.select_region("Bangkok").unwrap();
    assert_eq!(controller.selected_region(), Some("Bangkok"));
    assert_eq!(controller.available_options(Level::SubRegion), first_options);
    assert_eq!(controller.state(), CascadeState::RegionSelected);
}

#[test]
fn test_reselecting_higher_level_invalidates_lower_levels() {
    let mut controller = english_controller();
    controller.select_region("Bangkok").unwrap();
    controller.select_sub_region("Pathum Wan").unwrap();
    controller.select_locality("Lumphini").unwrap();
    assert_eq!(controller.resolved_postal_code(), Some("10330"));

    controller.select_region("Chiang Mai").unwrap();
    assert_eq!(controller.selected_sub_region(), None);
    assert_eq!(controller.selected_locality(), None);
    assert_eq!(controller.resolved_postal_code(), None);
    assert_eq!(
        controller.available_options(Level::SubRegion),
        ["Mueang Chiang Mai"]
    );
}

#[test]
fn test_reselecting_sub_region_clears_locality_only() {
    let mut controller = english_controller();
    controller.select_region("Bangkok").unwrap();
    controller.select_sub_region("Pathum Wan").unwrap();
    controller.select_locality("Lumphini").unwrap();

    controller.select_sub_region("Bang Rak").unwrap();
    assert_eq!(controller.selected_region(), Some("Bangkok"));
    assert_eq!(controller.selected_locality(), None);
    assert_eq!(controller.resolved_postal_code(), None);
    assert_eq!(controller.available_options(Level::Locality), ["Si Lom"]);
}

#[test]
fn test_unknown_option_rejected_without_state_change() {
    let mut controller = english_controller();
    controller.select_region("Bangkok").unwrap();

    let err = controller.select_sub_region("Nonexistent").unwrap_err();
    assert_eq!(
        err,
        SelectError::unknown_option(Level::SubRegion, "Nonexistent")
    );
    assert_eq!(controller.selected_region(), Some("Bangkok"));
    assert_eq!(controller.selected_sub_region(), None);

    // A locality of a *different* sub-region is just as unknown.
    controller.select_sub_region("Pathum Wan").unwrap();
    let err = controller.select_locality("Si Lom").unwrap_err();
    assert_eq!(err, SelectError::unknown_option(Level::Locality, "Si Lom"));
    assert_eq!(controller.resolved_postal_code(), None);
}

#[test]
fn test_operations_before_initialize_are_rejected() {
    let mut controller = CascadeController::default();

    assert!(matches!(
        controller.select_region("Bangkok").unwrap_err(),
        SelectError::NotInitialized { .. }
    ));
    assert!(matches!(
        controller.select_sub_region("Pathum Wan").unwrap_err(),
        SelectError::NotInitialized { .. }
    ));
    assert!(matches!(
        controller.select_locality("Lumphini").unwrap_err(),
        SelectError::NotInitialized { .. }
    ));
    assert!(controller.available_options(Level::Region).is_empty());
}

#[test]
fn test_skipping_a_level_is_rejected() {
    let mut controller = english_controller();

    // No region selected yet, so sub-region and locality are off limits.
    assert!(matches!(
        controller.select_sub_region("Pathum Wan").unwrap_err(),
        SelectError::NotInitialized { .. }
    ));

    controller.select_region("Bangkok").unwrap();
    assert!(matches!(
        controller.select_locality("Lumphini").unwrap_err(),
        SelectError::NotInitialized { .. }
    ));
}

#[test]
fn test_end_to_end_resolves_postal_code_with_ordered_events() {
    let mut controller = english_controller();
    let mut events = controller.subscribe();

    controller.select_region("Bangkok").unwrap();
    controller.select_sub_region("Pathum Wan").unwrap();
    controller.select_locality("Lumphini").unwrap();
    assert_eq!(controller.resolved_postal_code(), Some("10330"));

    assert_eq!(
        events.try_recv().unwrap(),
        CascadeEvent::LevelChanged {
            level: Level::Region,
            name: "Bangkok".into(),
            postal_code: None,
        }
    );
    assert_eq!(
        events.try_recv().unwrap(),
        CascadeEvent::LevelChanged {
            level: Level::SubRegion,
            name: "Pathum Wan".into(),
            postal_code: None,
        }
    );
    assert_eq!(
        events.try_recv().unwrap(),
        CascadeEvent::LevelChanged {
            level: Level::Locality,
            name: "Lumphini".into(),
            postal_code: Some("10330".into()),
        }
    );
    assert!(events.try_recv().is_err());
}

#[test]
fn test_initialize_and_reset_emit_events() {
    let mut controller = CascadeController::new(&CascadeConfig::new("thailand").with_language("en"));
    let mut events = controller.subscribe();

    controller.initialize(dataset());
    assert_eq!(events.try_recv().unwrap(), CascadeEvent::Initialized);

    controller.select_region("Bangkok").unwrap();
    let _ = events.try_recv().unwrap();

    controller.reset();
    assert_eq!(events.try_recv().unwrap(), CascadeEvent::Reset);
    assert_eq!(controller.state(), CascadeState::NoneSelected);
    assert_eq!(
        controller.available_options(Level::Region),
        ["Bangkok", "Chiang Mai"]
    );
    assert!(controller.available_options(Level::SubRegion).is_empty());
}

#[test]
fn test_multiple_subscribers_each_receive_events() {
    let mut controller = english_controller();
    let mut first = controller.subscribe();
    let mut second = controller.subscribe();

    controller.select_region("Bangkok").unwrap();

    assert_eq!(first.try_recv().unwrap().level(), Some(Level::Region));
    assert_eq!(second.try_recv().unwrap().level(), Some(Level::Region));
}

#[test]
fn test_reinitialize_replaces_dataset_wholesale() {
    let mut controller = english_controller();
    controller.select_region("Bangkok").unwrap();

    let raw = serde_json::from_value(json!([{ "name_en": "Phuket", "lv4": [] }])).unwrap();
    let replacement = HierarchyDataset::from_raw(raw, "en", &lexical_comparator()).unwrap();
    controller.initialize(replacement);

    assert_eq!(controller.selected_region(), None);
    assert_eq!(controller.available_options(Level::Region), ["Phuket"]);
}

#[test]
fn test_independent_controllers_share_nothing() {
    let mut first = english_controller();
    let mut second = english_controller();

    first.select_region("Bangkok").unwrap();
    second.select_region("Chiang Mai").unwrap();

    assert_eq!(first.selected_region(), Some("Bangkok"));
    assert_eq!(second.selected_region(), Some("Chiang Mai"));
}
