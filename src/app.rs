//! App state and core application logic
//!
//! Owns every piece of UI state and exposes one transition function per
//! event (submit, lookup finished, theme toggle, menu toggle, nav link).
//! Side effects leave the App only as `AppCommand`s on a channel; results
//! come back as `AppMessage`s.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::PokeApiError;
use crate::document::{Document, THEME_ATTRIBUTE};
use crate::models::{
    normalize_query, PokemonView, SearchPhase, EMPTY_QUERY_MESSAGE, NOT_FOUND_MESSAGE,
    SEARCH_FAILED_MESSAGE,
};
use crate::ui::page::{self, Page, ViewInputs};
use crate::ui::sprite::SpriteThumb;
use crate::ui::theme::{Theme, ThemeMode};

// =============================================================================
// Commands & Messages
// =============================================================================

/// Side effects requested by the App, executed by the worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Look up a Pokémon by normalized name
    Lookup { generation: u64, name: String },
    /// Download and decode the front sprite for the current card
    FetchSprite { generation: u64, url: String },
}

/// Results delivered back to the App
#[derive(Debug)]
pub enum AppMessage {
    LookupFinished {
        generation: u64,
        result: Result<PokemonView, PokeApiError>,
    },
    SpriteLoaded {
        generation: u64,
        sprite: Option<SpriteThumb>,
    },
}

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

// =============================================================================
// Sections
// =============================================================================

/// Page sections reachable from the nav menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Home,
    About,
    Tips,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Home, Section::About, Section::Tips];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::About => "About",
            Section::Tips => "Tips",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Section::Home => 0,
            Section::About => 1,
            Section::Tips => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Section> {
        Self::ALL.get(i).copied()
    }
}

// =============================================================================
// Selection State
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    /// Move selection up
    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Move selection down
    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    /// Jump to first item
    pub fn first(&mut self) {
        self.selected = 0;
    }

    /// Jump to last item
    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Select an index, clamped to the list
    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.len.saturating_sub(1));
    }
}

// =============================================================================
// Search Input State
// =============================================================================

/// Search box contents. `cursor` counts characters, not bytes.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Raw query as typed
    pub query: String,
    /// Cursor position in query
    pub cursor: usize,
    /// Where the search flow is
    pub phase: SearchPhase,
}

impl SearchState {
    fn byte_offset(&self, char_idx: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.query.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.query.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset(self.cursor);
            self.query.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    /// Replace the query and move the cursor to its end
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.cursor_end();
    }

    /// Query split at the cursor, for drawing the caret
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.query.split_at(self.byte_offset(self.cursor))
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    pub search: SearchState,

    /// Card currently shown
    pub pokemon: Option<PokemonView>,
    /// Decoded sprite for `pokemon`, once downloaded
    pub sprite: Option<SpriteThumb>,
    /// Error currently shown
    pub error: Option<String>,
    /// A lookup for the current generation is in flight
    pub loading: bool,

    pub dark: bool,
    pub menu_open: bool,
    /// Selection inside the open nav menu
    pub menu: ListState,
    /// Section last activated from the nav
    pub active_section: Section,
    pub document: Document,

    /// Bumped on every submit; results tagged with an older value are stale
    generation: u64,
    cmd_tx: Option<mpsc::UnboundedSender<AppCommand>>,
}

impl Default for App {
    fn default() -> Self {
        Self::with_theme(false)
    }
}

impl App {
    /// Create a new App instance (light theme, no command channel)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an App starting in the given theme
    pub fn with_theme(dark: bool) -> Self {
        let mut document = Document::new();
        document.set_attribute(THEME_ATTRIBUTE, ThemeMode::from_dark(dark).as_attr());

        Self {
            running: true,
            input_mode: InputMode::Normal,
            search: SearchState::default(),
            pokemon: None,
            sprite: None,
            error: None,
            loading: false,
            dark,
            menu_open: false,
            menu: ListState::new(Section::ALL.len()),
            active_section: Section::Home,
            document,
            generation: 0,
            cmd_tx: None,
        }
    }

    /// Create an App wired to a command channel
    pub fn with_channels() -> (Self, mpsc::UnboundedReceiver<AppCommand>) {
        Self::new().connect()
    }

    /// Attach a fresh command channel, returning the receiving end
    pub fn connect(mut self) -> (Self, mpsc::UnboundedReceiver<AppCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        self.cmd_tx = Some(tx);
        (self, rx)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    fn send(&self, cmd: AppCommand) {
        match &self.cmd_tx {
            Some(tx) => {
                if tx.send(cmd).is_err() {
                    warn!("command channel closed, dropping command");
                }
            }
            None => debug!(?cmd, "no command channel attached"),
        }
    }

    // -------------------------------------------------------------------------
    // Search Flow
    // -------------------------------------------------------------------------

    /// Submit the current search box contents
    pub fn submit_search(&mut self) {
        self.generation += 1;

        let Some(name) = normalize_query(&self.search.query) else {
            info!("empty query rejected");
            self.error = Some(EMPTY_QUERY_MESSAGE.to_string());
            self.pokemon = None;
            self.sprite = None;
            self.loading = false;
            self.search.phase = SearchPhase::NotFound;
            return;
        };

        info!(generation = self.generation, %name, "lookup dispatched");
        self.loading = true;
        self.error = None;
        self.search.phase = SearchPhase::Loading;
        self.send(AppCommand::Lookup {
            generation: self.generation,
            name,
        });
    }

    /// Apply a result delivered by the worker
    pub fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::LookupFinished { generation, result } => {
                if generation != self.generation {
                    debug!(generation, current = self.generation, "stale lookup discarded");
                    return;
                }
                self.finish_lookup(result);
            }
            AppMessage::SpriteLoaded { generation, sprite } => {
                if generation == self.generation && self.pokemon.is_some() {
                    self.sprite = sprite;
                }
            }
        }
    }

    fn finish_lookup(&mut self, result: Result<PokemonView, PokeApiError>) {
        self.loading = false;
        self.sprite = None;

        match result {
            Ok(view) => {
                info!(name = %view.name, "lookup succeeded");
                if let Some(url) = &view.sprite {
                    self.send(AppCommand::FetchSprite {
                        generation: self.generation,
                        url: url.clone(),
                    });
                }
                self.pokemon = Some(view);
                self.error = None;
                self.search.phase = SearchPhase::Success;
            }
            Err(e) if e.is_not_found() => {
                info!(error = %e, "lookup not found");
                self.pokemon = None;
                self.error = Some(NOT_FOUND_MESSAGE.to_string());
                self.search.phase = SearchPhase::NotFound;
            }
            Err(e) => {
                warn!(error = %e, "lookup failed");
                self.pokemon = None;
                self.error = Some(SEARCH_FAILED_MESSAGE.to_string());
                self.search.phase = SearchPhase::Failed;
            }
        }
    }

    // -------------------------------------------------------------------------
    // Theme
    // -------------------------------------------------------------------------

    /// Flip dark mode and mirror it onto the document root
    pub fn toggle_theme(&mut self) {
        self.dark = !self.dark;
        let mode = ThemeMode::from_dark(self.dark);
        self.document.set_attribute(THEME_ATTRIBUTE, mode.as_attr());
        debug!(theme = mode.as_attr(), "theme toggled");
    }

    /// Palette the renderer should use
    pub fn theme(&self) -> Theme {
        Theme::from_document(&self.document)
    }

    // -------------------------------------------------------------------------
    // Navigation Menu
    // -------------------------------------------------------------------------

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
        if self.menu_open {
            self.menu.select(self.active_section.index());
        }
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Follow a nav link: mark the section active and close the menu
    pub fn activate_nav_link(&mut self, section: Section) {
        self.active_section = section;
        self.menu_open = false;
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Everything the page projection reads
    pub fn view_inputs(&self) -> ViewInputs<'_> {
        let (query_before, query_after) = self.search.split_at_cursor();
        ViewInputs {
            pokemon: self.pokemon.as_ref(),
            error: self.error.as_deref(),
            loading: self.loading,
            dark: self.dark,
            menu_open: self.menu_open,
            query_before,
            query_after,
            editing: self.input_mode == InputMode::Editing,
            active_section: self.active_section,
            menu_selected: self.menu.selected,
        }
    }

    pub fn page(&self) -> Page {
        page::project(&self.view_inputs())
    }

    /// Focus search input
    pub fn focus_search(&mut self) {
        self.close_menu();
        self.active_section = Section::Home;
        self.input_mode = InputMode::Editing;
        self.search.cursor_end();
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else if self.menu_open {
            self.handle_menu_key(key)
        } else {
            self.handle_normal_key(key)
        }
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                true
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.submit_search();
                true
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.search.insert(c);
                true
            }
            KeyCode::Backspace => {
                self.search.backspace();
                true
            }
            KeyCode::Delete => {
                self.search.delete();
                true
            }
            KeyCode::Left => {
                self.search.cursor_left();
                true
            }
            KeyCode::Right => {
                self.search.cursor_right();
                true
            }
            KeyCode::Home => {
                self.search.cursor_home();
                true
            }
            KeyCode::End => {
                self.search.cursor_end();
                true
            }
            _ => false,
        }
    }

    /// Handle keys while the nav menu is open
    fn handle_menu_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('m') => {
                self.close_menu();
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.menu.down();
                true
            }
            KeyCode::Home => {
                self.menu.first();
                true
            }
            KeyCode::End => {
                self.menu.last();
                true
            }
            KeyCode::Enter => {
                if let Some(section) = Section::from_index(self.menu.selected) {
                    self.activate_nav_link(section);
                }
                true
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = (c as usize) - ('1' as usize);
                if let Some(section) = Section::from_index(idx) {
                    self.activate_nav_link(section);
                }
                true
            }
            KeyCode::Char('q') => {
                self.quit();
                true
            }
            KeyCode::Char('t') => {
                self.toggle_theme();
                true
            }
            _ => false,
        }
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                true
            }
            KeyCode::Char('/') | KeyCode::Char('s') | KeyCode::Char('i') => {
                self.focus_search();
                true
            }
            KeyCode::Enter => {
                self.submit_search();
                true
            }
            KeyCode::Char('t') => {
                self.toggle_theme();
                true
            }
            KeyCode::Char('m') => {
                self.toggle_menu();
                true
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = (c as usize) - ('1' as usize);
                if let Some(section) = Section::from_index(idx) {
                    self.activate_nav_link(section);
                }
                true
            }
            _ => false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
