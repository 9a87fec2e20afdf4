//! Typed models for the GitHub-flavored blocks a README carries beyond plain Markdown
//!
//! Each model knows its Markdown idiom; the renderer and the serializer use them to recognize
//! and re-emit the same shapes.

pub mod alert;
pub mod badge;
pub mod collapsible;
pub mod diagram;

pub use alert::{Alert, AlertKind};
pub use badge::Badge;
pub use collapsible::Collapsible;
pub use diagram::Diagram;
