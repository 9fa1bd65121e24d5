//! Editor session for the label canvas.
//!
//! An [`EditorSession`] owns everything the layout editor mutates: styles,
//! elements, the logo and the drag gesture. Geometry is in virtual px and the
//! canvas spans the whole page (`page_width × 4` by `page_height × 4`).
//!
//! ## Drag gesture
//!
//! ```text
//! Idle ──pointer_down──▶ Dragging ──pointer_up / pointer_leave──▶ Idle
//!                          │  ▲
//!                          └──┘ pointer_move: candidate → snap → clamp
//! ```
//!
//! Snapping works per axis. The dragged element's start edge, center and end
//! edge are compared with the canvas center, then with every other element's
//! start edge, center and end edge in element order. A match within
//! [`SNAP_TOLERANCE`] moves the candidate onto the target and records a guide
//! line there; later matches override earlier ones.

use serde::Serialize;

use super::measure::{self, TextBox};
use super::types::{
    Configuration, ElementId, ElementKind, LayoutElement, PrintStyles, mm_to_px, CONFIG_VERSION,
};

/// Snap distance in virtual px (inclusive).
pub const SNAP_TOLERANCE: f32 = 8.0;

/// A pointer location in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Which way a guide line runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideOrientation {
    /// Constant x, drawn top to bottom.
    Vertical,
    /// Constant y, drawn left to right.
    Horizontal,
}

/// Alignment feedback shown while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Guide {
    pub orientation: GuideOrientation,
    pub position: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Dragging { id: ElementId, offset: Point },
}

/// Mutable state of one layout editing session.
#[derive(Debug, Clone)]
pub struct EditorSession {
    pub name: String,
    pub description: Option<String>,
    styles: PrintStyles,
    elements: Vec<LayoutElement>,
    logo_data_url: Option<String>,
    drag: DragState,
    guides: Vec<Guide>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new("Default", "Juan Pérez", "Empresa ABC", 123)
    }
}

impl EditorSession {
    /// Fresh session with sample content in the name, company and ticket fields.
    pub fn new(
        name: impl Into<String>,
        sample_name: &str,
        sample_company: &str,
        sample_ticket: u32,
    ) -> Self {
        let mut session = Self {
            name: name.into(),
            description: None,
            styles: PrintStyles::default(),
            elements: Vec::new(),
            logo_data_url: None,
            drag: DragState::Idle,
            guides: Vec::new(),
        };
        let ticket = sample_ticket.to_string();
        for (id, content) in [
            (ElementId::Name, sample_name),
            (ElementId::Company, sample_company),
            (ElementId::Ticket, ticket.as_str()),
        ] {
            session.upsert_text(id, content);
        }
        session
    }

    /// Rebuild a session from a stored configuration. Nothing starts selected.
    pub fn from_configuration(config: &Configuration) -> Self {
        let mut elements = config.elements.clone();
        for el in &mut elements {
            el.selected = false;
        }
        Self {
            name: config.name.clone(),
            description: config.description.clone(),
            styles: config.styles.clone(),
            elements,
            logo_data_url: config.logo_data_url.clone(),
            drag: DragState::Idle,
            guides: Vec::new(),
        }
    }

    /// Snapshot the session as a configuration stamped with `timestamp` (ms).
    pub fn to_configuration(&self, timestamp: i64, is_default: bool) -> Configuration {
        Configuration {
            version: CONFIG_VERSION,
            name: self.name.clone(),
            description: self.description.clone(),
            styles: self.styles.clone(),
            elements: self.elements.clone(),
            logo_data_url: self.logo_data_url.clone(),
            timestamp,
            is_default,
        }
    }

    pub fn styles(&self) -> &PrintStyles {
        &self.styles
    }

    pub fn elements(&self) -> &[LayoutElement] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&LayoutElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn selected(&self) -> Option<&LayoutElement> {
        self.elements.iter().find(|e| e.selected)
    }

    /// Guide lines for the current drag; empty when idle.
    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn canvas_size(&self) -> (f32, f32) {
        (self.styles.canvas_width(), self.styles.canvas_height())
    }

    /// Width budget a text field may use before it wraps.
    fn text_budget(&self) -> f32 {
        self.styles.canvas_width() - 2.0 * mm_to_px(self.styles.container_padding)
    }

    fn estimate(&self, el: &LayoutElement) -> TextBox {
        measure::estimate(&el.content, el.font_size, el.text_align, self.text_budget())
    }

    fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Insert or replace the text field `id`, styled from the current styles.
    pub fn upsert_text(&mut self, id: ElementId, content: &str) {
        let Some(style) = self.styles.field(id) else {
            return;
        };
        match self.index_of(id) {
            Some(i) => {
                self.elements[i].content = content.to_string();
                self.resize(i);
            }
            None => {
                let el = LayoutElement::text(id, content, style);
                self.elements.push(el);
                let i = self.elements.len() - 1;
                self.resize(i);
            }
        }
    }

    /// Remove an element. Returns whether it existed.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != id);
        if id == ElementId::Logo {
            self.logo_data_url = None;
        }
        self.elements.len() != before
    }

    fn resize(&mut self, i: usize) {
        if self.elements[i].kind() != ElementKind::TextField {
            return;
        }
        let size = self.estimate(&self.elements[i]);
        let el = &mut self.elements[i];
        el.width = size.width;
        el.height = size.height;
    }

    /// Change a text field's content and re-estimate its box.
    pub fn set_content(&mut self, id: ElementId, content: &str) -> bool {
        match self.index_of(id) {
            Some(i) if self.elements[i].kind() == ElementKind::TextField => {
                self.elements[i].content = content.to_string();
                self.resize(i);
                true
            }
            _ => false,
        }
    }

    /// Move an element directly (properties panel). Negative values clamp to 0.
    pub fn set_position(&mut self, id: ElementId, x: f32, y: f32) -> bool {
        match self.index_of(id) {
            Some(i) => {
                self.elements[i].x = x.max(0.0);
                self.elements[i].y = y.max(0.0);
                true
            }
            None => false,
        }
    }

    /// Manual size override; kept until the content or style changes.
    pub fn set_size(&mut self, id: ElementId, width: f32, height: f32) -> bool {
        match self.index_of(id) {
            Some(i) => {
                self.elements[i].width = width.max(0.0);
                self.elements[i].height = height.max(0.0);
                true
            }
            None => false,
        }
    }

    /// Replace the styles and push them into every element.
    pub fn apply_styles(&mut self, styles: PrintStyles) {
        self.styles = styles;
        for i in 0..self.elements.len() {
            let id = self.elements[i].id;
            match self.styles.field(id).cloned() {
                Some(style) => {
                    self.elements[i].apply_style(&style);
                    self.resize(i);
                }
                None => {
                    let side = mm_to_px(self.styles.logo.size);
                    self.elements[i].width = side;
                    self.elements[i].height = side;
                }
            }
        }
    }

    /// Set or replace the logo image.
    pub fn set_logo(&mut self, data_url: impl Into<String>) {
        let data_url = data_url.into();
        self.elements.retain(|e| e.id != ElementId::Logo);
        self.elements
            .push(LayoutElement::logo(data_url.clone(), &self.styles.logo));
        self.logo_data_url = Some(data_url);
    }

    pub fn remove_logo(&mut self) {
        self.remove(ElementId::Logo);
    }

    /// Mark one element selected and clear the rest.
    pub fn select(&mut self, id: ElementId) {
        for el in &mut self.elements {
            el.selected = el.id == id;
        }
    }

    // ------------------------------------------------------------------
    // Drag gesture
    // ------------------------------------------------------------------

    /// Start dragging `id` from `pointer`. Ignored while another drag runs
    /// or when the element does not exist.
    pub fn pointer_down(&mut self, id: ElementId, pointer: Point) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(el) = self.element(id) else {
            return false;
        };
        let offset = Point::new(pointer.x - el.x, pointer.y - el.y);
        self.drag = DragState::Dragging { id, offset };
        self.select(id);
        true
    }

    /// Move the dragged element under the pointer, snapping and clamping.
    /// Returns the element's new position, or `None` when idle.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<Point> {
        let DragState::Dragging { id, offset } = self.drag else {
            return None;
        };
        let i = self.index_of(id)?;
        let (canvas_w, canvas_h) = self.canvas_size();
        let (w, h) = (self.elements[i].width, self.elements[i].height);

        let others: Vec<(f32, f32, f32, f32)> = self
            .elements
            .iter()
            .filter(|e| e.id != id)
            .map(|e| (e.x, e.y, e.width, e.height))
            .collect();

        let x_targets = std::iter::once(canvas_w / 2.0).chain(
            others
                .iter()
                .flat_map(|&(x, _, ow, _)| [x, x + ow / 2.0, x + ow]),
        );
        let y_targets = std::iter::once(canvas_h / 2.0).chain(
            others
                .iter()
                .flat_map(|&(_, y, _, oh)| [y, y + oh / 2.0, y + oh]),
        );

        let (x, x_guide) = snap_axis(pointer.x - offset.x, w, x_targets);
        let (y, y_guide) = snap_axis(pointer.y - offset.y, h, y_targets);

        self.guides.clear();
        if let Some(position) = x_guide {
            self.guides.push(Guide {
                orientation: GuideOrientation::Vertical,
                position,
            });
        }
        if let Some(position) = y_guide {
            self.guides.push(Guide {
                orientation: GuideOrientation::Horizontal,
                position,
            });
        }

        let x = clamp_span(x, w, canvas_w);
        let y = clamp_span(y, h, canvas_h);
        let el = &mut self.elements[i];
        el.x = x;
        el.y = y;
        Some(Point::new(x, y))
    }

    /// End the drag.
    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
        self.guides.clear();
    }

    /// Pointer left the canvas; same as releasing.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }
}

/// Snap a span `[start, start + size]` against `targets`. Last match wins.
fn snap_axis(start: f32, size: f32, targets: impl Iterator<Item = f32>) -> (f32, Option<f32>) {
    let mut snapped = start;
    let mut guide = None;
    for target in targets {
        for anchor in [0.0, size / 2.0, size] {
            if (start + anchor - target).abs() <= SNAP_TOLERANCE {
                snapped = target - anchor;
                guide = Some(target);
            }
        }
    }
    (snapped, guide)
}

/// Keep `[start, start + size]` inside `[0, limit]`; oversize spans pin to 0.
fn clamp_span(start: f32, size: f32, limit: f32) -> f32 {
    start.min(limit - size).max(0.0)
}
