//! Longer action sequences, dispatched the way a consumer would
//!
//! This tests:
//! - Palette drops into nested columns
//! - Interleaved selection, edits and deletes
//! - JSON dispatch payloads
//! - Tree integrity after every step

use pagebuilder_editor::{render_outline, validate, Action, EditError, Editor, EditorState};
use pagebuilder_model::{Element, ElementKind, Record, ROOT_ID};

fn assert_integrity(editor: &Editor) {
    let violations = validate(editor.tree());
    assert!(violations.is_empty(), "invalid tree: {:?}", violations);

    let selected = editor.selected_element();
    if !selected.is_empty_sentinel() {
        assert!(editor.tree().contains(selected.id.as_str()));
    }
}

#[test]
fn test_build_page_from_palette() {
    let mut editor = Editor::new("landing");

    for component_type in ["section", "3Col", "form", "text"] {
        assert!(editor.insert_kind(ROOT_ID, component_type).is_applied());
        assert_integrity(&editor);
    }

    let columns = editor.tree().children().unwrap()[1].clone();
    assert_eq!(columns.kind, ElementKind::ThreeColumn);
    let column_ids: Vec<_> = columns
        .children()
        .unwrap()
        .iter()
        .map(|c| c.id.clone())
        .collect();
    assert_eq!(column_ids.len(), 3);

    for (column_id, component_type) in column_ids.iter().zip(["image", "button", "list"]) {
        assert!(editor.insert_kind(column_id.clone(), component_type).is_applied());
        assert_integrity(&editor);
    }

    // root + section + 3col + 3 columns + form + text + 3 leaves
    assert_eq!(editor.tree().descendant_count(), 10);
    assert_eq!(editor.version(), 7);

    let outline = render_outline(editor.tree(), editor.registry());
    assert_eq!(outline.lines().count(), 11);
    assert!(outline.contains("Three Columns <3Col>"));
}

#[test]
fn test_edit_delete_chain_keeps_selection_valid() {
    let mut editor = Editor::new("landing");
    editor.insert_kind(ROOT_ID, "2Col");
    let columns = editor.tree().children().unwrap()[0].clone();
    let left = columns.children().unwrap()[0].id.clone();
    let right = columns.children().unwrap()[1].id.clone();

    editor.add_element(
        left.clone(),
        Element::leaf("headline", "Headline", Record::Text { inner_text: "Hello".to_string() }),
    );
    editor.add_element(
        right.clone(),
        Element::leaf("cta", "CTA", Record::Button { inner_text: "Buy".to_string(), href: None }),
    );

    editor.select("cta");
    for i in 1..=3 {
        let mut cta = editor.selected_element().clone();
        cta.content = Record::Button {
            inner_text: format!("Buy {}", i),
            href: Some("/checkout".to_string()),
        }
        .into();
        assert!(editor.update_element(cta).is_applied());
        assert_integrity(&editor);
    }
    assert_eq!(
        editor.selected_element().record().and_then(Record::inner_text),
        Some("Buy 3")
    );

    // Deleting the other column keeps the selection
    assert!(editor.delete_element(left).is_applied());
    assert_eq!(editor.selected_element().id, "cta");
    assert!(editor.tree().find("headline").is_none());

    // Deleting the selection's grandparent clears it
    assert!(editor.delete_element(columns.id.clone()).is_applied());
    assert!(editor.selected_element().is_empty_sentinel());
    assert_integrity(&editor);

    // Stale references from before the delete are harmless no-ops
    assert!(!editor.select("cta").is_applied());
    assert!(!editor.delete_element(right).is_applied());
    assert_eq!(editor.tree().descendant_count(), 0);
}

#[test]
fn test_json_script_matches_direct_calls() {
    let script = r#"[
        { "type": "ADD_ELEMENT", "payload": { "containerId": "__body", "elementDetails": {
            "id": "box", "type": "container", "name": "Container", "styles": {}, "content": [] } } },
        { "type": "ADD_ELEMENT", "payload": { "containerId": "box", "elementDetails": {
            "id": "a", "type": "text", "name": "Text", "styles": { "fontSize": 18 },
            "content": { "innerText": "hi" } } } },
        { "type": "CHANGE_CLICKED_ELEMENT", "payload": { "elementDetails": { "id": "a" } } },
        { "type": "TOGGLE_LIVE_MODE" }
    ]"#;

    let actions: Vec<Action> = serde_json::from_str(script).unwrap();
    let mut from_script = Editor::new("landing");
    for action in actions {
        assert!(from_script.dispatch(action).is_applied());
    }

    let mut direct = Editor::new("landing");
    direct.add_element(ROOT_ID, Element::container("box", ElementKind::Container, "Container"));
    direct.add_element(
        "box",
        Element::leaf("a", "Text", Record::Text { inner_text: "hi".to_string() }).with_style("fontSize", 18),
    );
    direct.select("a");
    direct.toggle_live_mode();

    assert_eq!(from_script.state(), direct.state());
    assert_eq!(from_script.version(), direct.version());
}

#[test]
fn test_json_add_select_update_delete() {
    let mut editor = Editor::new("landing");

    let add = r#"{ "type": "ADD_ELEMENT", "payload": { "containerId": "__body", "elementDetails": {
        "id": "a", "type": "text", "name": "Text", "styles": { "fontSize": 16 },
        "content": { "innerText": "hi" } } } }"#;
    assert!(editor.dispatch_json(add).unwrap().is_applied());

    let select = r#"{ "type": "CHANGE_CLICKED_ELEMENT", "payload": { "elementDetails": {
        "id": "a", "type": "text", "name": "Text", "styles": {}, "content": { "innerText": "hi" } } } }"#;
    assert!(editor.dispatch_json(select).unwrap().is_applied());

    let update = r#"{ "type": "UPDATE_ELEMENT", "payload": { "elementDetails": {
        "id": "a", "type": "text", "name": "Text", "styles": { "fontSize": 16 },
        "content": { "innerText": "bye" } } } }"#;
    assert!(editor.dispatch_json(update).unwrap().is_applied());

    let selected = serde_json::to_value(editor.selected_element()).unwrap();
    assert_eq!(
        selected,
        serde_json::json!({
            "id": "a",
            "type": "text",
            "name": "Text",
            "styles": { "fontSize": 16 },
            "content": { "innerText": "bye" }
        })
    );

    let delete = r#"{ "type": "DELETE_ELEMENT", "payload": { "elementDetails": { "id": "a" } } }"#;
    assert!(editor.dispatch_json(delete).unwrap().is_applied());
    assert!(editor.selected_element().is_empty_sentinel());
    assert_eq!(editor.tree().descendant_count(), 0);
}

#[test]
fn test_partial_json_update_keeps_other_fields() {
    let mut editor = Editor::new("landing");
    let cta = Element::leaf(
        "cta",
        "CTA",
        Record::Button { inner_text: "Go".to_string(), href: Some("/buy".to_string()) },
    )
    .with_style("color", "white");
    assert!(editor.add_element(ROOT_ID, cta).is_applied());

    let update = r#"{ "type": "UPDATE_ELEMENT", "payload": { "elementDetails": {
        "id": "cta", "type": "button", "content": { "innerText": "Buy" } } } }"#;
    assert!(editor.dispatch_json(update).unwrap().is_applied());

    let cta = editor.tree().find("cta").unwrap();
    assert_eq!(cta.name, "CTA");
    assert_eq!(cta.styles["color"].to_string(), "white");
    assert_eq!(
        cta.record(),
        Some(&Record::Button { inner_text: "Buy".to_string(), href: Some("/buy".to_string()) })
    );
}

#[test]
fn test_json_rejects_empty_and_reused_ids() {
    let mut editor = Editor::new("landing");
    let add = |id: &str| {
        format!(
            r#"{{ "type": "ADD_ELEMENT", "payload": {{ "containerId": "__body", "elementDetails": {{
                "id": "{}", "type": "text", "name": "Text", "content": {{ "innerText": "hi" }} }} }} }}"#,
            id
        )
    };

    let result = editor.dispatch_json(&add("")).unwrap();
    assert_eq!(result.reason(), Some(&EditError::EmptyId(ElementKind::Text)));

    assert!(editor.dispatch_json(&add("a")).unwrap().is_applied());
    assert!(editor.delete_element("a").is_applied());

    let result = editor.dispatch_json(&add("a")).unwrap();
    assert_eq!(result.reason(), Some(&EditError::DuplicateId("a".into())));
    assert_eq!(editor.tree().descendant_count(), 0);
}

#[test]
fn test_json_content_must_match_type() {
    let mut editor = Editor::new("landing");
    let add = r#"{ "type": "ADD_ELEMENT", "payload": { "containerId": "__body", "elementDetails": {
        "id": "a", "type": "section", "name": "Section", "content": { "innerText": "hi" } } } }"#;

    let err = editor.dispatch_json(add).unwrap_err();
    assert!(err.to_string().contains("must be a list"));
    assert_eq!(editor.version(), 0);
}

#[test]
fn test_state_snapshot_serializes() {
    let mut editor = Editor::new("landing");
    editor.add_element(ROOT_ID, Element::leaf("a", "Text", Record::Text { inner_text: "hi".to_string() }));
    editor.select("a");

    let json = serde_json::to_value(editor.state()).unwrap();
    assert_eq!(json["selected"], "a");
    assert_eq!(json["liveMode"], false);
    assert_eq!(json["tree"]["content"][0]["content"]["innerText"], "hi");

    let restored: EditorState = serde_json::from_value(json).unwrap();
    assert_eq!(&restored, editor.state());
}
