//! # Label HTML Renderer
//!
//! Turns a [`Configuration`] and live attendee values into a print-ready HTML
//! document sized in millimeters.
//!
//! ## Layouts
//!
//! - **Positioned**: a configuration with elements places each one absolutely,
//!   converting virtual px to mm (÷ 4).
//! - **Stacked**: name, company and location flow from the top, the ticket
//!   number sits bottom-right. Used with the built-in 55 × 44 mm defaults
//!   when no configuration exists, and with the configuration's own styles
//!   when it has no elements.
//!
//! A field without a runtime value is left out entirely. The ticket number is
//! printed as-is, never case-transformed.


use super::case::apply_text_case;
use super::types::{
    Configuration, ElementId, ElementKind, FieldStyle, LayoutElement, PrintStyles, px_to_mm,
};

/// Live values substituted into a label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelFields {
    pub name: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub ticket_no: u32,
}

impl LabelFields {
    pub fn new(name: impl Into<String>, ticket_no: u32) -> Self {
        Self {
            name: name.into(),
            ticket_no,
            ..Default::default()
        }
    }

    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Display value for a text field, `None` when blank.
    fn value(&self, id: ElementId) -> Option<String> {
        let raw = match id {
            ElementId::Name => Some(self.name.clone()),
            ElementId::Company => self.company.clone(),
            ElementId::Location => self.location.clone(),
            ElementId::Ticket => Some(self.ticket_no.to_string()),
            ElementId::Logo => None,
        };
        raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
    }

    /// Escaped, case-transformed markup text for a field.
    fn display(&self, id: ElementId, style: &FieldStyle) -> Option<String> {
        let value = self.value(id)?;
        Some(match id {
            ElementId::Ticket => value,
            _ => escape_html(&apply_text_case(&value, style.text_case)),
        })
    }
}

/// A rendered label and the page it is laid out for.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLabel {
    pub html: String,
    pub width_mm: f32,
    pub height_mm: f32,
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Format a millimeter value with at most two decimals.
fn fmt_mm(value: f32) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Render a label. `None` uses the built-in layout so printing never blocks
/// on a missing configuration.
pub fn render_label(config: Option<&Configuration>, fields: &LabelFields) -> RenderedLabel {
    match config {
        Some(config) if !config.elements.is_empty() => render_positioned(config, fields),
        Some(config) => render_stacked(&config.styles, fields),
        None => render_fallback(fields),
    }
}

/// The built-in 55 × 44 mm layout.
pub fn render_fallback(fields: &LabelFields) -> RenderedLabel {
    render_stacked(&PrintStyles::default(), fields)
}

fn document(styles: &PrintStyles, body: &str) -> String {
    let font = escape_html(&styles.font_family);
    let width = fmt_mm(styles.page_width);
    let height = fmt_mm(styles.page_height);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>
    @page {{ size: {width}mm {height}mm; margin: {margin}mm; }}
    * {{ box-sizing: border-box; margin: 0; padding: 0; }}
    body {{ width: {width}mm; height: {height}mm; position: relative; font-family: {font}; overflow: hidden; }}
    .label {{ width: 100%; height: 100%; position: relative; }}
  </style>
</head>
<body>
  <div class="label">
{body}  </div>
</body>
</html>"#,
        margin = fmt_mm(styles.page_margin),
    )
}

/// Shared CSS for a piece of text.
fn text_css(style: &FieldStyle, page_font: &str) -> String {
    let font = style.font_family.as_deref().unwrap_or(page_font);
    format!(
        "font-size:{}pt;font-weight:{};color:{};font-family:{};font-style:{};text-decoration:{};text-align:{};overflow-wrap:anywhere;",
        fmt_mm(style.font_size),
        style.font_weight,
        escape_html(&style.color),
        escape_html(font),
        style.font_style.css(),
        style.text_decoration.css(),
        style.text_align.css(),
    )
}

/// Element style as stored on the canvas, with the kind's case transform.
fn element_style(el: &LayoutElement, styles: &PrintStyles) -> FieldStyle {
    let text_case = styles
        .field(el.id)
        .map(|s| s.text_case)
        .unwrap_or_default();
    FieldStyle {
        font_size: el.font_size,
        font_weight: el.font_weight,
        color: el.color.clone(),
        text_case,
        font_family: el.font_family.clone(),
        font_style: el.font_style,
        text_decoration: el.text_decoration,
        text_align: el.text_align,
    }
}

fn render_positioned(config: &Configuration, fields: &LabelFields) -> RenderedLabel {
    let styles = &config.styles;
    let mut body = String::new();

    for el in &config.elements {
        let geometry = format!(
            "position:absolute;left:{}mm;top:{}mm;width:{}mm;min-height:{}mm;z-index:{};",
            fmt_mm(px_to_mm(el.x)),
            fmt_mm(px_to_mm(el.y)),
            fmt_mm(px_to_mm(el.width)),
            fmt_mm(px_to_mm(el.height)),
            el.z_index,
        );

        match el.kind() {
            ElementKind::Image => {
                let src = Some(el.content.as_str())
                    .filter(|s| !s.is_empty())
                    .or(config.logo_data_url.as_deref());
                let Some(src) = src else {
                    continue;
                };
                body.push_str(&format!(
                    r#"    <img class="{}" src="{}" style="{}height:{}mm;object-fit:contain;" />"#,
                    el.id.as_str(),
                    escape_html(src),
                    geometry,
                    fmt_mm(px_to_mm(el.height)),
                ));
                body.push('\n');
            }
            ElementKind::TextField => {
                let style = element_style(el, styles);
                let Some(text) = fields.display(el.id, &style) else {
                    continue;
                };
                body.push_str(&format!(
                    r#"    <div class="{}" style="{}display:flex;align-items:center;justify-content:{};{}">{}</div>"#,
                    el.id.as_str(),
                    geometry,
                    el.text_align.justify(),
                    text_css(&style, &styles.font_family),
                    text,
                ));
                body.push('\n');
            }
        }
    }

    RenderedLabel {
        html: document(styles, &body),
        width_mm: styles.page_width,
        height_mm: styles.page_height,
    }
}

fn render_stacked(styles: &PrintStyles, fields: &LabelFields) -> RenderedLabel {
    let padding = fmt_mm(styles.container_padding);
    let mut body = String::new();

    body.push_str(&format!(
        r#"    <div class="stack" style="position:absolute;left:{padding}mm;top:{padding}mm;right:{padding}mm;">"#
    ));
    body.push('\n');
    for id in [ElementId::Name, ElementId::Company, ElementId::Location] {
        let Some(style) = styles.field(id) else {
            continue;
        };
        let Some(text) = fields.display(id, style) else {
            continue;
        };
        body.push_str(&format!(
            r#"      <div class="{}" style="{}">{}</div>"#,
            id.as_str(),
            text_css(style, &styles.font_family),
            text,
        ));
        body.push('\n');
    }
    body.push_str("    </div>\n");

    if let Some(text) = fields.display(ElementId::Ticket, &styles.ticket) {
        body.push_str(&format!(
            r#"    <div class="ticket" style="position:absolute;right:{padding}mm;bottom:{padding}mm;{}">{}</div>"#,
            text_css(&styles.ticket, &styles.font_family),
            text,
        ));
        body.push('\n');
    }

    RenderedLabel {
        html: document(styles, &body),
        width_mm: styles.page_width,
        height_mm: styles.page_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::case::TextCase;
    use crate::label::types::TextAlign;

    fn configured() -> Configuration {
        let mut config = Configuration::new("Evento");
        config.styles.name.text_case = TextCase::Uppercase;
        let mut name = LayoutElement::text(ElementId::Name, "Sample", &config.styles.name);
        name.x = 40.0;
        name.y = 10.0;
        name.width = 120.0;
        name.height = 18.0;
        let mut location = LayoutElement::text(ElementId::Location, "Sala", &config.styles.location);
        location.width = 60.0;
        location.height = 14.0;
        let mut ticket = LayoutElement::text(ElementId::Ticket, "1", &config.styles.ticket);
        ticket.x = 150.0;
        ticket.y = 150.0;
        ticket.width = 60.0;
        ticket.height = 22.0;
        config.elements = vec![name, location, ticket];
        config
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#039;Jerry&#039;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_fmt_mm() {
        assert_eq!(fmt_mm(55.0), "55");
        assert_eq!(fmt_mm(2.5), "2.5");
        assert_eq!(fmt_mm(37.5), "37.5");
        assert_eq!(fmt_mm(0.0), "0");
        assert_eq!(fmt_mm(1.0 / 3.0), "0.33");
    }

    #[test]
    fn test_fallback_page_size() {
        let label = render_label(None, &LabelFields::new("Ana", 1));
        assert_eq!((label.width_mm, label.height_mm), (55.0, 44.0));
        assert!(label.html.contains("size: 55mm 44mm"));
    }

    #[test]
    fn test_positioned_converts_to_mm() {
        let label = render_label(Some(&configured()), &LabelFields::new("Ana", 9));
        assert!(label.html.contains("left:10mm;top:2.5mm;width:30mm;min-height:4.5mm;"));
        assert!(label.html.contains("left:37.5mm;top:37.5mm;"));
    }

    #[test]
    fn test_positioned_uses_live_values_and_case() {
        let label = render_label(Some(&configured()), &LabelFields::new("ana gómez", 42));
        assert!(label.html.contains(">ANA GÓMEZ</div>"));
        assert!(label.html.contains(">42</div>"));
        assert!(!label.html.contains("Sample"));
    }

    #[test]
    fn test_missing_value_omits_block() {
        let label = render_label(Some(&configured()), &LabelFields::new("Ana", 3));
        assert!(!label.html.contains(r#"class="location""#));

        let label = render_label(
            Some(&configured()),
            &LabelFields::new("Ana", 3).location("  "),
        );
        assert!(!label.html.contains(r#"class="location""#));

        let label = render_label(
            Some(&configured()),
            &LabelFields::new("Ana", 3).location("Sala B"),
        );
        assert!(label.html.contains(r#"class="location""#));
        assert!(label.html.contains(">Sala B</div>"));
    }

    #[test]
    fn test_ticket_ignores_case_transform() {
        let mut config = configured();
        config.styles.ticket.text_case = TextCase::Lowercase;
        let label = render_label(Some(&config), &LabelFields::new("Ana", 1234));
        assert!(label.html.contains(">1234</div>"));
    }

    #[test]
    fn test_content_is_escaped() {
        let label = render_label(
            None,
            &LabelFields::new("<script>alert(1)</script>", 1).company("Smith & Sons"),
        );
        assert!(!label.html.contains("<script>"));
        assert!(label.html.contains("&lt;script&gt;"));
        assert!(label.html.contains("Smith &amp; Sons"));
    }

    #[test]
    fn test_logo_falls_back_to_configuration_image() {
        let mut config = configured();
        config.logo_data_url = Some("data:image/png;base64,QUJD".into());
        config
            .elements
            .push(LayoutElement::logo("", &config.styles.logo));
        let label = render_label(Some(&config), &LabelFields::new("Ana", 1));
        assert!(label.html.contains(r#"src="data:image/png;base64,QUJD""#));
    }

    #[test]
    fn test_logo_without_image_is_omitted() {
        let mut config = configured();
        config
            .elements
            .push(LayoutElement::logo("", &config.styles.logo));
        let label = render_label(Some(&config), &LabelFields::new("Ana", 1));
        assert!(!label.html.contains("<img"));
    }

    #[test]
    fn test_centered_element_justifies_center() {
        let label = render_label(Some(&configured()), &LabelFields::new("Ana", 5));
        let ticket_line = label
            .html
            .lines()
            .find(|l| l.contains(r#"class="ticket""#))
            .unwrap();
        assert_eq!(configured().element(ElementId::Ticket).unwrap().text_align, TextAlign::Center);
        assert!(ticket_line.contains("justify-content:center;"));
    }

    #[test]
    fn test_stored_element_with_bad_style_stays_positioned() {
        let config: Configuration = serde_json::from_value(serde_json::json!({
            "elements": [
                { "id": "name", "x": 40, "y": 10, "width": 120, "height": 18, "fontWeight": null },
                { "id": "ticket", "x": 150, "y": 150, "textAlign": "right" }
            ]
        }))
        .unwrap();
        let label = render_label(Some(&config), &LabelFields::new("Ana", 8));
        assert!(label.html.contains("left:10mm;top:2.5mm;"));
        assert!(label.html.contains("left:37.5mm;top:37.5mm;"));
        assert!(!label.html.contains(r#"class="stack""#));
    }

    #[test]
    fn test_configuration_without_elements_uses_its_page() {
        let mut config = Configuration::new("Grande");
        config.styles.page_width = 90.0;
        config.styles.page_height = 50.0;
        let label = render_label(Some(&config), &LabelFields::new("Ana", 1));
        assert_eq!(label.width_mm, 90.0);
        assert!(label.html.contains("size: 90mm 50mm"));
    }
}
