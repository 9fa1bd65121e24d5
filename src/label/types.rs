//! Label layout types.
//!
//! All types derive `Serialize + Deserialize` so the same values travel
//! between the editor, the configuration store and the renderer.
//!
//! Stored configurations outlive schema changes, so deserialization never
//! fails on a missing or unreadable style value: every field is read through
//! a lenient deserializer and merged against the per-kind default table in
//! [`FieldStyle::default_for`]. Version 1 documents kept per-kind styles as
//! flat keys (`nameFontSize`, `ticketTextAlign`, ...); those are read too
//! and the result is always [`CONFIG_VERSION`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use super::case::TextCase;

/// Virtual canvas pixels per physical millimeter.
pub const PX_PER_MM: f32 = 4.0;

/// Current configuration schema version.
pub const CONFIG_VERSION: u32 = 2;

/// Font weights the editor offers.
pub const FONT_WEIGHTS: [u16; 5] = [400, 500, 600, 700, 800];

/// Convert virtual canvas pixels to millimeters.
#[inline]
pub fn px_to_mm(px: f32) -> f32 {
    px / PX_PER_MM
}

/// Convert millimeters to virtual canvas pixels.
#[inline]
pub fn mm_to_px(mm: f32) -> f32 {
    mm * PX_PER_MM
}

/// Snap an arbitrary weight to the closest offered weight.
pub fn normalize_font_weight(weight: u16) -> u16 {
    FONT_WEIGHTS
        .iter()
        .copied()
        .min_by_key(|w| w.abs_diff(weight))
        .unwrap_or(400)
}

/// Read a value if it parses, otherwise treat it as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

// ============================================================================
// ELEMENT VOCABULARY
// ============================================================================

/// Identity of a placed element. At most one element per id lives on a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementId {
    Name,
    Company,
    Location,
    Ticket,
    Logo,
}

/// What an element draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    TextField,
    Image,
}

impl ElementId {
    /// Text fields in their default stacking order.
    pub const TEXT_FIELDS: [ElementId; 4] = [
        ElementId::Name,
        ElementId::Company,
        ElementId::Location,
        ElementId::Ticket,
    ];

    pub fn kind(self) -> ElementKind {
        match self {
            Self::Logo => ElementKind::Image,
            _ => ElementKind::TextField,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Company => "company",
            Self::Location => "location",
            Self::Ticket => "ticket",
            Self::Logo => "logo",
        }
    }

    /// Where the editor drops a fresh element (virtual px).
    pub fn default_position(self) -> (f32, f32) {
        match self {
            Self::Name => (10.0, 10.0),
            Self::Company => (10.0, 35.0),
            Self::Location => (10.0, 55.0),
            Self::Ticket => (150.0, 120.0),
            Self::Logo => (10.0, 10.0),
        }
    }

    /// Paint order: the logo sits under text.
    pub fn default_z_index(self) -> i32 {
        match self {
            Self::Logo => 0,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    pub fn css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    LineThrough,
}

impl TextDecoration {
    pub fn css(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Underline => "underline",
            Self::LineThrough => "line-through",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

impl TextAlign {
    pub fn css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
        }
    }

    /// Flex `justify-content` value matching this alignment.
    pub fn justify(self) -> &'static str {
        match self {
            Self::Left => "flex-start",
            Self::Center => "center",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogoPosition {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

// ============================================================================
// STYLES
// ============================================================================

/// Default styling for one text field kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStyle {
    /// Font size in points.
    pub font_size: f32,
    pub font_weight: u16,
    pub color: String,
    pub text_case: TextCase,
    /// Overrides the page font when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    pub font_style: FontStyle,
    pub text_decoration: TextDecoration,
    pub text_align: TextAlign,
}

impl FieldStyle {
    /// Fallback table used whenever a stored style omits a value.
    pub fn default_for(id: ElementId) -> Self {
        let (font_size, font_weight, color, text_align) = match id {
            ElementId::Name => (14.0, 600, "#000000", TextAlign::Left),
            ElementId::Company => (12.0, 400, "#666666", TextAlign::Left),
            ElementId::Location => (10.0, 400, "#333333", TextAlign::Left),
            ElementId::Ticket | ElementId::Logo => (18.0, 700, "#000000", TextAlign::Center),
        };
        Self {
            font_size,
            font_weight,
            color: color.to_string(),
            text_case: TextCase::None,
            font_family: None,
            font_style: FontStyle::Normal,
            text_decoration: TextDecoration::None,
            text_align,
        }
    }

    fn merge(&mut self, raw: RawFieldStyle) {
        if let Some(v) = raw.font_size {
            self.font_size = v.max(0.0);
        }
        if let Some(v) = raw.font_weight {
            self.font_weight = normalize_font_weight(v);
        }
        if let Some(v) = raw.color {
            self.color = v;
        }
        if let Some(v) = raw.text_case {
            self.text_case = v;
        }
        if let Some(v) = raw.font_family.filter(|f| !f.trim().is_empty()) {
            self.font_family = Some(v);
        }
        if let Some(v) = raw.font_style {
            self.font_style = v;
        }
        if let Some(v) = raw.text_decoration {
            self.text_decoration = v;
        }
        if let Some(v) = raw.text_align {
            self.text_align = v;
        }
    }
}

/// Logo placement. Sizes in millimeters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoStyle {
    pub size: f32,
    pub position: LogoPosition,
    pub margin: f32,
}

impl Default for LogoStyle {
    fn default() -> Self {
        Self {
            size: 8.0,
            position: LogoPosition::TopLeft,
            margin: 2.0,
        }
    }
}

/// Page geometry plus per-kind defaults. Page values in millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawPrintStyles")]
pub struct PrintStyles {
    pub page_width: f32,
    pub page_height: f32,
    pub page_margin: f32,
    pub container_padding: f32,
    pub font_family: String,
    pub name: FieldStyle,
    pub company: FieldStyle,
    pub location: FieldStyle,
    pub ticket: FieldStyle,
    pub logo: LogoStyle,
}

impl Default for PrintStyles {
    fn default() -> Self {
        Self {
            page_width: 55.0,
            page_height: 44.0,
            page_margin: 0.0,
            container_padding: 2.0,
            font_family: "Arial".to_string(),
            name: FieldStyle::default_for(ElementId::Name),
            company: FieldStyle::default_for(ElementId::Company),
            location: FieldStyle::default_for(ElementId::Location),
            ticket: FieldStyle::default_for(ElementId::Ticket),
            logo: LogoStyle::default(),
        }
    }
}

impl PrintStyles {
    /// Style for a text field; `None` for the logo.
    pub fn field(&self, id: ElementId) -> Option<&FieldStyle> {
        match id {
            ElementId::Name => Some(&self.name),
            ElementId::Company => Some(&self.company),
            ElementId::Location => Some(&self.location),
            ElementId::Ticket => Some(&self.ticket),
            ElementId::Logo => None,
        }
    }

    pub fn field_mut(&mut self, id: ElementId) -> Option<&mut FieldStyle> {
        match id {
            ElementId::Name => Some(&mut self.name),
            ElementId::Company => Some(&mut self.company),
            ElementId::Location => Some(&mut self.location),
            ElementId::Ticket => Some(&mut self.ticket),
            ElementId::Logo => None,
        }
    }

    /// Canvas width in virtual px.
    pub fn canvas_width(&self) -> f32 {
        mm_to_px(self.page_width)
    }

    /// Canvas height in virtual px.
    pub fn canvas_height(&self) -> f32 {
        mm_to_px(self.page_height)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFieldStyle {
    #[serde(default, deserialize_with = "lenient")]
    font_size: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    font_weight: Option<u16>,
    #[serde(default, deserialize_with = "lenient")]
    color: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    text_case: Option<TextCase>,
    #[serde(default, deserialize_with = "lenient")]
    font_family: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    font_style: Option<FontStyle>,
    #[serde(default, deserialize_with = "lenient")]
    text_decoration: Option<TextDecoration>,
    #[serde(default, deserialize_with = "lenient")]
    text_align: Option<TextAlign>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLogoStyle {
    #[serde(default, deserialize_with = "lenient")]
    size: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    position: Option<LogoPosition>,
    #[serde(default, deserialize_with = "lenient")]
    margin: Option<f32>,
}

/// Wire shape of [`PrintStyles`]: current nested keys plus version 1 flat keys.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPrintStyles {
    #[serde(default, deserialize_with = "lenient")]
    page_width: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    page_height: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    page_margin: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    container_padding: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    font_family: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    name: Option<RawFieldStyle>,
    #[serde(default, deserialize_with = "lenient")]
    company: Option<RawFieldStyle>,
    #[serde(default, deserialize_with = "lenient")]
    location: Option<RawFieldStyle>,
    #[serde(default, deserialize_with = "lenient")]
    ticket: Option<RawFieldStyle>,
    #[serde(default, deserialize_with = "lenient")]
    logo: Option<RawLogoStyle>,

    // Version 1 flat keys
    #[serde(default, deserialize_with = "lenient")]
    name_font_size: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    name_font_weight: Option<u16>,
    #[serde(default, deserialize_with = "lenient")]
    name_color: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    name_text_align: Option<TextAlign>,
    #[serde(default, deserialize_with = "lenient")]
    company_font_size: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    company_font_weight: Option<u16>,
    #[serde(default, deserialize_with = "lenient")]
    company_color: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    company_text_align: Option<TextAlign>,
    #[serde(default, deserialize_with = "lenient")]
    ticket_font_size: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    ticket_font_weight: Option<u16>,
    #[serde(default, deserialize_with = "lenient")]
    ticket_color: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    ticket_text_align: Option<TextAlign>,
    #[serde(default, deserialize_with = "lenient")]
    logo_size: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    logo_position: Option<LogoPosition>,
    #[serde(default, deserialize_with = "lenient")]
    logo_margin: Option<f32>,
}

impl From<RawPrintStyles> for PrintStyles {
    fn from(raw: RawPrintStyles) -> Self {
        let mut styles = PrintStyles::default();

        if let Some(v) = raw.page_width {
            styles.page_width = v.max(0.0);
        }
        if let Some(v) = raw.page_height {
            styles.page_height = v.max(0.0);
        }
        if let Some(v) = raw.page_margin {
            styles.page_margin = v.max(0.0);
        }
        if let Some(v) = raw.container_padding {
            styles.container_padding = v.max(0.0);
        }
        if let Some(v) = raw.font_family.filter(|f| !f.trim().is_empty()) {
            styles.font_family = v;
        }

        // Flat keys first so nested values win.
        styles.name.merge(RawFieldStyle {
            font_size: raw.name_font_size,
            font_weight: raw.name_font_weight,
            color: raw.name_color,
            text_align: raw.name_text_align,
            ..Default::default()
        });
        styles.company.merge(RawFieldStyle {
            font_size: raw.company_font_size,
            font_weight: raw.company_font_weight,
            color: raw.company_color,
            text_align: raw.company_text_align,
            ..Default::default()
        });
        styles.ticket.merge(RawFieldStyle {
            font_size: raw.ticket_font_size,
            font_weight: raw.ticket_font_weight,
            color: raw.ticket_color,
            text_align: raw.ticket_text_align,
            ..Default::default()
        });

        for (id, nested) in [
            (ElementId::Name, raw.name),
            (ElementId::Company, raw.company),
            (ElementId::Location, raw.location),
            (ElementId::Ticket, raw.ticket),
        ] {
            if let (Some(nested), Some(style)) = (nested, styles.field_mut(id)) {
                style.merge(nested);
            }
        }

        let logo = raw.logo.unwrap_or_default();
        if let Some(v) = logo.size.or(raw.logo_size) {
            styles.logo.size = v.max(0.0);
        }
        if let Some(v) = logo.position.or(raw.logo_position) {
            styles.logo.position = v;
        }
        if let Some(v) = logo.margin.or(raw.logo_margin) {
            styles.logo.margin = v.max(0.0);
        }

        styles
    }
}

// ============================================================================
// ELEMENTS
// ============================================================================

fn default_font_size() -> f32 {
    12.0
}

fn default_font_weight() -> u16 {
    400
}

fn default_color() -> String {
    "#000000".to_string()
}

/// One placed item on the label canvas. Geometry in virtual px.
///
/// Only the id is required on load; any other missing or unreadable value
/// takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawLayoutElement")]
pub struct LayoutElement {
    pub id: ElementId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Text value, or an image data URL for the logo.
    pub content: String,
    /// Font size in points.
    pub font_size: f32,
    pub font_weight: u16,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    pub font_style: FontStyle,
    pub text_decoration: TextDecoration,
    pub text_align: TextAlign,
    pub z_index: i32,
    /// Editor-only selection flag.
    #[serde(skip)]
    pub selected: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLayoutElement {
    #[serde(default, deserialize_with = "lenient")]
    id: Option<ElementId>,
    #[serde(default, deserialize_with = "lenient")]
    x: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    y: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    width: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    height: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    content: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    font_size: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    font_weight: Option<u16>,
    #[serde(default, deserialize_with = "lenient")]
    color: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    font_family: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    font_style: Option<FontStyle>,
    #[serde(default, deserialize_with = "lenient")]
    text_decoration: Option<TextDecoration>,
    #[serde(default, deserialize_with = "lenient")]
    text_align: Option<TextAlign>,
    #[serde(default, deserialize_with = "lenient")]
    z_index: Option<i32>,
}

impl TryFrom<RawLayoutElement> for LayoutElement {
    type Error = String;

    fn try_from(raw: RawLayoutElement) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .ok_or_else(|| "element id is missing or unknown".to_string())?;
        Ok(Self {
            id,
            x: raw.x.unwrap_or(0.0),
            y: raw.y.unwrap_or(0.0),
            width: raw.width.unwrap_or(0.0),
            height: raw.height.unwrap_or(0.0),
            content: raw.content.unwrap_or_default(),
            font_size: raw.font_size.unwrap_or_else(default_font_size),
            font_weight: raw.font_weight.unwrap_or_else(default_font_weight),
            color: raw
                .color
                .filter(|c| !c.is_empty())
                .unwrap_or_else(default_color),
            font_family: raw.font_family.filter(|f| !f.is_empty()),
            font_style: raw.font_style.unwrap_or_default(),
            text_decoration: raw.text_decoration.unwrap_or_default(),
            text_align: raw.text_align.unwrap_or_default(),
            z_index: raw.z_index.unwrap_or_else(|| id.default_z_index()),
            selected: false,
        })
    }
}

impl LayoutElement {
    /// A text field at its default position, styled from `style`.
    pub fn text(id: ElementId, content: impl Into<String>, style: &FieldStyle) -> Self {
        let (x, y) = id.default_position();
        let mut element = Self {
            id,
            x,
            y,
            width: 0.0,
            height: 0.0,
            content: content.into(),
            font_size: default_font_size(),
            font_weight: default_font_weight(),
            color: default_color(),
            font_family: None,
            font_style: FontStyle::Normal,
            text_decoration: TextDecoration::None,
            text_align: TextAlign::Left,
            z_index: id.default_z_index(),
            selected: false,
        };
        element.apply_style(style);
        element
    }

    /// The logo image, sized from `style`.
    pub fn logo(data_url: impl Into<String>, style: &LogoStyle) -> Self {
        let (x, y) = ElementId::Logo.default_position();
        Self {
            id: ElementId::Logo,
            x,
            y,
            width: mm_to_px(style.size),
            height: mm_to_px(style.size),
            content: data_url.into(),
            font_size: default_font_size(),
            font_weight: default_font_weight(),
            color: default_color(),
            font_family: None,
            font_style: FontStyle::Normal,
            text_decoration: TextDecoration::None,
            text_align: TextAlign::Left,
            z_index: ElementId::Logo.default_z_index(),
            selected: false,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.id.kind()
    }

    /// Copy a kind's style onto this element. Size is left to the caller.
    pub fn apply_style(&mut self, style: &FieldStyle) {
        self.font_size = style.font_size;
        self.font_weight = style.font_weight;
        self.color = style.color.clone();
        self.font_family = style.font_family.clone();
        self.font_style = style.font_style;
        self.text_decoration = style.text_decoration;
        self.text_align = style.text_align;
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Clamp geometry to non-negative values and snap the weight.
    fn normalize(&mut self) {
        self.x = self.x.max(0.0);
        self.y = self.y.max(0.0);
        self.width = self.width.max(0.0);
        self.height = self.height.max(0.0);
        self.font_size = self.font_size.max(0.0);
        self.font_weight = normalize_font_weight(self.font_weight);
        self.selected = false;
    }
}

/// Read an element list, dropping entries without a known id and keeping the
/// first element for each id.
fn deserialize_elements<'de, D>(deserializer: D) -> Result<Vec<LayoutElement>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<serde_json::Value>> = lenient(deserializer)?;
    let mut elements: Vec<LayoutElement> = Vec::new();
    for value in values.unwrap_or_default() {
        match LayoutElement::deserialize(value) {
            Ok(mut element) => {
                if elements.iter().any(|e| e.id == element.id) {
                    tracing::warn!(id = element.id.as_str(), "dropping duplicate label element");
                    continue;
                }
                element.normalize();
                elements.push(element);
            }
            Err(e) => tracing::warn!(error = %e, "skipping label element"),
        }
    }
    Ok(elements)
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// The persisted label design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawConfiguration")]
pub struct Configuration {
    pub version: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub styles: PrintStyles,
    pub elements: Vec<LayoutElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_data_url: Option<String>,
    /// Milliseconds since the Unix epoch of the last save.
    pub timestamp: i64,
    pub is_default: bool,
}

impl Configuration {
    /// An empty configuration with default styles.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: CONFIG_VERSION,
            name: name.into(),
            description: None,
            styles: PrintStyles::default(),
            elements: Vec::new(),
            logo_data_url: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
            is_default: false,
        }
    }

    pub fn element(&self, id: ElementId) -> Option<&LayoutElement> {
        self.elements.iter().find(|e| e.id == id)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfiguration {
    #[serde(default, deserialize_with = "lenient")]
    version: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    styles: Option<PrintStyles>,
    #[serde(default, deserialize_with = "deserialize_elements")]
    elements: Vec<LayoutElement>,
    #[serde(default, deserialize_with = "lenient")]
    logo_data_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    timestamp: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    is_default: Option<bool>,
}

impl From<RawConfiguration> for Configuration {
    fn from(raw: RawConfiguration) -> Self {
        let version = raw.version.unwrap_or(1);
        if version < CONFIG_VERSION {
            tracing::debug!(from = version, to = CONFIG_VERSION, "migrating label configuration");
        }
        Self {
            version: CONFIG_VERSION,
            name: raw.name.unwrap_or_default(),
            description: raw.description.filter(|d| !d.is_empty()),
            styles: raw.styles.unwrap_or_default(),
            elements: raw.elements,
            logo_data_url: raw.logo_data_url.filter(|d| !d.is_empty()),
            timestamp: raw.timestamp.unwrap_or(0),
            is_default: raw.is_default.unwrap_or(false),
        }
    }
}
