//! # Label Layout
//!
//! The badge label model and its rendering pipeline.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`case`] | Display-case transforms |
//! | [`measure`] | Text box estimation for the canvas |
//! | [`types`] | Elements, styles and configurations |
//! | [`canvas`] | Editor session, drag and snap |
//! | [`render`] | Print-ready HTML |

pub mod canvas;
pub mod case;
pub mod measure;
pub mod render;
pub mod types;

pub use canvas::{EditorSession, Guide, GuideOrientation, Point};
pub use case::{TextCase, apply_text_case};
pub use measure::{TextBox, estimate};
pub use render::{LabelFields, RenderedLabel, escape_html, render_fallback, render_label};
pub use types::{
    Configuration, ElementId, ElementKind, FieldStyle, LayoutElement, LogoPosition, LogoStyle,
    PrintStyles,
};
