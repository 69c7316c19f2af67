//! Root document element
//!
//! A tiny attribute store standing in for the page's root element. UI flags
//! that styling depends on (currently just the theme) are mirrored here and
//! the renderer reads them back.

use std::collections::BTreeMap;

/// Attribute carrying the active theme
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    root: BTreeMap<String, String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute on the root element, replacing any previous value
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.root.insert(name.into(), value.into());
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.root.get(name).map(String::as_str)
    }
}
