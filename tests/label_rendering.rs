//! # Label Rendering Tests
//!
//! End-to-end checks from a designed layout to the HTML handed to the printer.

use gafete::label::{
    Configuration, EditorSession, ElementId, LabelFields, Point, TextCase, render_label,
};
use pretty_assertions::assert_eq;

/// Virtual px as the renderer prints them in millimeters.
fn mm(px: f32) -> String {
    let s = format!("{:.2}", px / 4.0);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() { "0".to_string() } else { s.to_string() }
}

#[test]
fn test_fallback_badge_for_ana() {
    let label = render_label(None, &LabelFields::new("Ana Gómez", 42));

    assert!(label.html.contains("Ana Gómez"));
    assert!(label.html.contains("42"));
    assert!(!label.html.contains("location"));
    assert_eq!((label.width_mm, label.height_mm), (55.0, 44.0));
}

#[test]
fn test_designed_layout_prints_live_values() {
    let mut session = EditorSession::new("Congreso", "Nombre Apellido", "Empresa", 1);
    session.upsert_text(ElementId::Location, "Ciudad");
    let mut styles = session.styles().clone();
    styles.name.text_case = TextCase::Uppercase;
    session.apply_styles(styles);
    let config = session.to_configuration(1_700_000_000_000, true);

    let fields = LabelFields::new("juan pérez", 7)
        .company("Acme & Co")
        .location("Quito");
    let label = render_label(Some(&config), &fields);

    assert!(label.html.contains("JUAN PÉREZ"));
    assert!(label.html.contains("Acme &amp; Co"));
    assert!(label.html.contains("Quito"));
    assert!(!label.html.contains("Nombre Apellido"));
    assert!(!label.html.contains("Empresa<"));
}

#[test]
fn test_missing_value_omits_block() {
    let mut session = EditorSession::default();
    session.upsert_text(ElementId::Location, "Ciudad");
    let config = session.to_configuration(1, false);

    let label = render_label(Some(&config), &LabelFields::new("Ana", 3));
    assert!(!label.html.contains(r#"class="location""#));
    assert!(!label.html.contains(r#"class="company""#));
    assert!(label.html.contains(r#"class="name""#));
}

#[test]
fn test_dragged_position_reaches_markup() {
    let mut session = EditorSession::default();
    let name = session.element(ElementId::Name).unwrap().clone();

    assert!(session.pointer_down(ElementId::Name, Point::new(name.x, name.y)));
    session.pointer_move(Point::new(41.0, 81.0));
    session.pointer_up();

    let moved = session.element(ElementId::Name).unwrap();
    let config = session.to_configuration(1, false);
    let label = render_label(Some(&config), &LabelFields::new("Ana", 1));

    let left = format!("left:{}mm", mm(moved.x));
    assert!(label.html.contains(&left), "missing {left}");
}

#[test]
fn test_saved_document_renders_after_reload() {
    let session = EditorSession::default();
    let config = session.to_configuration(5, false);
    let json = serde_json::to_string(&config).unwrap();
    let reloaded: Configuration = serde_json::from_str(&json).unwrap();

    let fields = LabelFields::new("Ana", 9).company("Acme");
    assert_eq!(
        render_label(Some(&reloaded), &fields),
        render_label(Some(&config), &fields)
    );
}
