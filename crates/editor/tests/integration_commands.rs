//! Integration tests for the EditorCommand JSON protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use gallery_editor_lib::command::{execute_json, execute_json_batch};
use gallery_editor_lib::fixtures::saveable_template;
use gallery_editor_lib::TemplateSession;

#[test]
fn test_command_patch_name() {
    let mut s = TemplateSession::default();

    let json = r#"{"command": "patch", "patch": {"name": "North Gallery"}}"#;
    let resp = execute_json(&mut s, json).unwrap();

    assert!(resp.success);
    assert_eq!(s.template().name, "North Gallery");
    assert!(s.is_dirty());
}

#[test]
fn test_command_patch_dimensions_regenerates() {
    let mut s = TemplateSession::default();
    execute_json(&mut s, r#"{"command": "set_wall_config", "wall": "front", "count": 2}"#).unwrap();

    let json = r#"{"command": "patch", "patch": {"dimensions": {"xAxis": 12, "yAxis": 10, "zAxis": 40}}}"#;
    assert!(execute_json(&mut s, json).unwrap().success);

    let xs: Vec<f64> = s.template().placements.iter().map(|p| p.position[0]).collect();
    assert_eq!(xs, vec![-2.0, 2.0]);
}

#[test]
fn test_command_inspect() {
    let mut s = TemplateSession::new(saveable_template());
    s.add_default_collider(shared::ColliderShape::Box);
    s.set_wall_count(shared::WallId::Left, 2).unwrap();
    s.add_placement();

    let resp = execute_json(&mut s, r#"{"command": "inspect"}"#).unwrap();
    assert!(resp.success);
    let data = resp.data.unwrap();
    assert_eq!(data["name"], "Main Hall");
    assert_eq!(data["collider_count"], 1);
    assert_eq!(data["placement_count"], 3);
    assert_eq!(data["walls"]["left"]["count"], 2);
    assert_eq!(data["colliders"][0]["shape"], "box");
    assert_eq!(data["colliders"][0]["name"], "Box Collider");

    let placements = data["placements"].as_array().unwrap();
    assert_eq!(placements[0]["origin"], "generated");
    assert_eq!(placements[0]["wall"], "left");
    assert_eq!(placements[2]["origin"], "custom");
}

#[test]
fn test_command_add_collider_uses_session_default_shape() {
    let mut s = TemplateSession::default();
    s.set_default_collider_shape(shared::ColliderShape::Curved);

    let json = r#"[
        {"command": "add_collider"},
        {"command": "add_collider", "shape": "box"},
        {"command": "inspect"}
    ]"#;
    let responses = execute_json_batch(&mut s, json).unwrap();
    assert!(responses.iter().all(|r| r.success));

    assert_eq!(s.colliders().get(0).unwrap().shape(), shared::ColliderShape::Curved);
    assert_eq!(s.colliders().get(1).unwrap().shape(), shared::ColliderShape::Box);
    let data = responses[2].data.as_ref().unwrap();
    assert_eq!(data["colliders"][0]["name"], "Curved Collider");
}

#[test]
fn test_command_update_collider_by_index() {
    let mut s = TemplateSession::default();
    let json = r#"[
        {"command": "add_collider", "shape": "curved"},
        {"command": "update_collider", "index": 0, "patch": {"radius": 4.5, "segments": 1, "arc": 9.0}}
    ]"#;

    let responses = execute_json_batch(&mut s, json).unwrap();
    assert!(responses.iter().all(|r| r.success));

    match &s.template().colliders[0] {
        shared::Collider::Curved {
            radius,
            segments,
            arc,
            ..
        } => {
            assert_eq!(*radius, 4.5);
            assert_eq!(*segments, 3);
            assert_eq!(*arc, std::f64::consts::TAU);
        }
        other => panic!("expected curved collider, got {other:?}"),
    }
}

#[test]
fn test_command_missing_target() {
    let mut s = TemplateSession::default();
    let resp = execute_json(&mut s, r#"{"command": "remove_collider"}"#).unwrap();
    assert!(!resp.success);
    assert!(resp.error.unwrap().contains("index or id"));
}

#[test]
fn test_command_placement_workflow_via_json_batch() {
    let mut s = TemplateSession::default();

    let json = r#"[
        {"command": "set_wall_config", "wall": "back", "count": 1, "height_position": 2.0},
        {"command": "add_placement"},
        {"command": "add_placement", "placement": {"position": [3, 1, 3], "rotation": [0, 1.57, 0]}},
        {"command": "update_placement", "index": 0, "patch": {"position": [1, 2, 1]}},
        {"command": "remove_placement", "index": 1}
    ]"#;

    let responses = execute_json_batch(&mut s, json).unwrap();
    assert_eq!(responses.len(), 5);
    assert!(responses.iter().all(|r| r.success));

    let t = s.template();
    assert_eq!(t.placements.len(), 2);
    assert_eq!(t.placements[0].position, [0.0, 2.0, -20.0 + 0.15]);
    assert_eq!(t.placements[1].position, [1.0, 2.0, 1.0]);
}

#[test]
fn test_command_batch_continues_after_failure() {
    let mut s = TemplateSession::default();
    let json = r#"[
        {"command": "remove_collider", "index": 4},
        {"command": "add_collider"}
    ]"#;

    let responses = execute_json_batch(&mut s, json).unwrap();
    assert!(!responses[0].success);
    assert!(responses[1].success);
    assert_eq!(s.colliders().len(), 1);
}

#[test]
fn test_command_export_roundtrip() {
    let mut s = TemplateSession::new(saveable_template());
    s.set_wall_count(shared::WallId::Right, 3).unwrap();

    let resp = execute_json(&mut s, r#"{"command": "export_template"}"#).unwrap();
    let doc = resp.data.unwrap()["template"].clone();
    let reloaded = shared::GalleryTemplate::from_document(doc).unwrap();
    assert_eq!(&reloaded, s.template());
}

#[test]
fn test_command_unknown() {
    let mut s = TemplateSession::default();
    assert!(execute_json(&mut s, r#"{"command": "explode"}"#).is_err());
}
