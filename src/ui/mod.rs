//! Terminal UI components
//!
//! Built with ratatui. `page` turns state into a render tree, `render`
//! draws it; the two never mix.

pub mod page;
pub mod render;
pub mod sprite;
pub mod theme;

pub use page::{project, Page, ViewInputs};
pub use sprite::SpriteThumb;
pub use theme::{Theme, ThemeMode};
