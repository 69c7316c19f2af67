//! Page projection
//!
//! Maps UI state to a render tree. `project` is pure: same inputs, same
//! `Page`, no I/O. The renderer only draws what it is handed.

use crate::app::Section;
use crate::models::PokemonView;
use crate::ui::theme::ThemeMode;

pub const BRAND: &str = "POKÉDEX";
pub const SEARCH_TITLE: &str = "Welcome to the Pokédex";
pub const SEARCH_INTRO: &str = "Use the search bar below to look up any Pokémon!";
pub const INPUT_PLACEHOLDER: &str = "e.g. pikachu";
pub const BUTTON_IDLE: &str = "Search";
pub const BUTTON_LOADING: &str = "Searching...";
pub const RESULT_PLACEHOLDER: &str = "Search for a Pokémon to see its card here.";
pub const NO_IMAGE: &str = "No image";
pub const FOOTER_CREDIT: &str = "Data from PokéAPI · built with ratatui";

const ABOUT_LINES: [&str; 2] = [
    "A terminal Pokédex written in Rust that talks to the public PokéAPI.",
    "Look up any Pokémon by name to see its height, weight, types and sprite.",
];

const TIPS_LINES: [&str; 3] = [
    "Names are case-insensitive; surrounding spaces are ignored.",
    "Forms use dashes, e.g. deoxys-attack or mr-mime.",
    "Press t to switch between light and dark themes.",
];

/// Everything the projection reads
#[derive(Debug, Clone, Copy)]
pub struct ViewInputs<'a> {
    pub pokemon: Option<&'a PokemonView>,
    pub error: Option<&'a str>,
    pub loading: bool,
    pub dark: bool,
    pub menu_open: bool,
    /// Search box text before the cursor
    pub query_before: &'a str,
    /// Search box text after the cursor
    pub query_after: &'a str,
    pub editing: bool,
    pub active_section: Section,
    pub menu_selected: usize,
}

// =============================================================================
// Render Tree
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub header: Header,
    /// Present only while the nav menu is open
    pub menu: Option<NavMenu>,
    pub search: SearchCard,
    pub result: ResultCard,
    pub about: Panel,
    pub tips: Panel,
    pub footer: Footer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub brand: &'static str,
    pub links: Vec<NavLink>,
    pub theme: ThemeMode,
    pub theme_icon: &'static str,
    pub menu_open: bool,
    /// Hamburger when closed, cross when open
    pub menu_icon: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub section: Section,
    pub label: &'static str,
    /// Section currently active
    pub active: bool,
    /// Keyboard selection inside the open menu
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavMenu {
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCard {
    pub title: &'static str,
    pub intro: &'static str,
    pub input: SearchInput,
    pub button: &'static str,
    pub busy: bool,
    pub error: Option<String>,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchInput {
    Placeholder(&'static str),
    Text {
        before: String,
        after: String,
        editing: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultCard {
    Placeholder(&'static str),
    Pokemon(PokemonCard),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonCard {
    /// Upper-cased name
    pub title: String,
    pub height: u32,
    pub weight: u32,
    pub sprite: SpriteSlot,
    /// `None` hides the types row entirely
    pub types: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpriteSlot {
    Url(String),
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub title: &'static str,
    pub lines: Vec<&'static str>,
    pub bulleted: bool,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub credit: &'static str,
    /// (key, action) pairs
    pub hints: Vec<(&'static str, &'static str)>,
}

// =============================================================================
// Projection
// =============================================================================

/// Build the render tree for the given state
pub fn project(inputs: &ViewInputs<'_>) -> Page {
    let theme = ThemeMode::from_dark(inputs.dark);

    Page {
        header: Header {
            brand: BRAND,
            links: nav_links(inputs, false),
            theme,
            theme_icon: theme.toggle_icon(),
            menu_open: inputs.menu_open,
            menu_icon: if inputs.menu_open { "✕" } else { "≡" },
        },
        menu: inputs.menu_open.then(|| NavMenu {
            links: nav_links(inputs, true),
        }),
        search: search_card(inputs),
        result: result_card(inputs.pokemon),
        about: Panel {
            title: "About",
            lines: ABOUT_LINES.to_vec(),
            bulleted: false,
            focused: inputs.active_section == Section::About,
        },
        tips: Panel {
            title: "Tips",
            lines: TIPS_LINES.to_vec(),
            bulleted: true,
            focused: inputs.active_section == Section::Tips,
        },
        footer: Footer {
            credit: FOOTER_CREDIT,
            hints: hints(inputs),
        },
    }
}

fn nav_links(inputs: &ViewInputs<'_>, in_menu: bool) -> Vec<NavLink> {
    Section::ALL
        .iter()
        .map(|&section| NavLink {
            section,
            label: section.label(),
            active: section == inputs.active_section,
            selected: in_menu && section.index() == inputs.menu_selected,
        })
        .collect()
}

fn search_card(inputs: &ViewInputs<'_>) -> SearchCard {
    let empty = inputs.query_before.is_empty() && inputs.query_after.is_empty();
    let input = if empty && !inputs.editing {
        SearchInput::Placeholder(INPUT_PLACEHOLDER)
    } else {
        SearchInput::Text {
            before: inputs.query_before.to_string(),
            after: inputs.query_after.to_string(),
            editing: inputs.editing,
        }
    };

    SearchCard {
        title: SEARCH_TITLE,
        intro: SEARCH_INTRO,
        input,
        button: if inputs.loading {
            BUTTON_LOADING
        } else {
            BUTTON_IDLE
        },
        busy: inputs.loading,
        error: inputs.error.filter(|e| !e.is_empty()).map(str::to_string),
        focused: inputs.active_section == Section::Home || inputs.editing,
    }
}

fn result_card(pokemon: Option<&PokemonView>) -> ResultCard {
    match pokemon {
        None => ResultCard::Placeholder(RESULT_PLACEHOLDER),
        Some(p) => ResultCard::Pokemon(PokemonCard {
            title: p.title(),
            height: p.height,
            weight: p.weight,
            sprite: match &p.sprite {
                Some(url) => SpriteSlot::Url(url.clone()),
                None => SpriteSlot::Missing(NO_IMAGE),
            },
            types: p.types.clone(),
        }),
    }
}

fn hints(inputs: &ViewInputs<'_>) -> Vec<(&'static str, &'static str)> {
    if inputs.editing {
        vec![("↵", "search"), ("esc", "done")]
    } else if inputs.menu_open {
        vec![("↑↓", "move"), ("↵", "open"), ("1-3", "jump"), ("esc", "close")]
    } else {
        vec![
            ("/", "search"),
            ("t", "theme"),
            ("m", "menu"),
            ("q", "quit"),
        ]
    }
}
