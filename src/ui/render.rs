//! Draws a projected `Page` into a ratatui frame
//!
//! Layout, top to bottom: header with brand, nav links and toggles; search
//! card; result card; about and tips side by side; one-line footer. The nav
//! menu opens as an overlay under the header's right edge.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::page::{
    Footer, Header, NavMenu, Page, Panel, PokemonCard, ResultCard, SearchCard, SearchInput,
    SpriteSlot,
};
use crate::ui::sprite::{SpriteThumb, SpriteView};
use crate::ui::theme::Theme;

/// Below this width the inline nav links are hidden and only the menu remains
pub const INLINE_NAV_MIN_WIDTH: u16 = 72;

/// Render the whole app
pub fn draw(frame: &mut Frame, app: &App) {
    let theme = app.theme();
    let page = app.page();
    render_page(frame, &page, &theme, app.sprite.as_ref());
}

/// Render a page with an explicit palette and optional decoded sprite
pub fn render_page(frame: &mut Frame, page: &Page, theme: &Theme, sprite: Option<&SpriteThumb>) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(theme.text()), area);

    // Main layout: header, content, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, chunks[0], &page.header, theme);
    render_content(frame, chunks[1], page, theme, sprite);
    render_footer(frame, chunks[2], &page.footer, theme);

    if let Some(menu) = &page.menu {
        render_menu(frame, chunks[0], menu, theme);
    }
}

fn card_block<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme.border_focused()
        } else {
            theme.border()
        })
        .title(Span::styled(format!(" {} ", title), theme.title()))
        .style(theme.card())
}

// =============================================================================
// Header
// =============================================================================

fn render_header(frame: &mut Frame, area: Rect, header: &Header, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border())
        .style(theme.card());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12), // Brand
            Constraint::Min(1),     // Inline nav
            Constraint::Length(9),  // Theme + menu toggles
        ])
        .split(inner);

    let brand = Paragraph::new(Line::from(vec![
        Span::styled("◓ ", theme.accent()),
        Span::styled(header.brand, theme.brand()),
    ]));
    frame.render_widget(brand, chunks[0]);

    if area.width >= INLINE_NAV_MIN_WIDTH {
        let mut spans = Vec::new();
        for link in &header.links {
            let style = if link.active {
                theme.border_focused()
            } else {
                theme.dimmed()
            };
            spans.push(Span::styled(format!(" {} ", link.label), style));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            chunks[1],
        );
    }

    let menu_style = if header.menu_open {
        theme.border_focused()
    } else {
        theme.text()
    };
    let controls = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", header.theme_icon), theme.accent()),
        Span::raw(" "),
        Span::styled(format!(" {} ", header.menu_icon), menu_style),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(controls, chunks[2]);
}

/// Dropdown nav menu anchored under the header's right edge
fn render_menu(frame: &mut Frame, header_area: Rect, menu: &NavMenu, theme: &Theme) {
    let screen = frame.area();
    let width = 18.min(screen.width);
    let height = (menu.links.len() as u16 + 2).min(screen.height.saturating_sub(header_area.bottom()));
    if height < 3 {
        return;
    }

    let popup = Rect {
        x: screen.right().saturating_sub(width),
        y: header_area.bottom(),
        width,
        height,
    };
    frame.render_widget(Clear, popup);

    let lines: Vec<Line> = menu
        .links
        .iter()
        .enumerate()
        .map(|(i, link)| {
            let marker = if link.selected { "▸ " } else { "  " };
            let style = if link.selected {
                theme.highlighted()
            } else if link.active {
                theme.title()
            } else {
                theme.text()
            };
            Line::from(vec![
                Span::styled(marker, theme.accent()),
                Span::styled(format!("{} {}", i + 1, link.label), style),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_focused())
        .title(Span::styled(" MENU ", theme.title()))
        .style(theme.card());
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

// =============================================================================
// Content
// =============================================================================

fn render_content(
    frame: &mut Frame,
    area: Rect,
    page: &Page,
    theme: &Theme,
    sprite: Option<&SpriteThumb>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Search card
            Constraint::Min(6),    // Result card
            Constraint::Length(6), // About + tips
        ])
        .split(area);

    render_search(frame, chunks[0], &page.search, theme);
    render_result(frame, chunks[1], &page.result, theme, sprite);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    render_panel(frame, panels[0], &page.about, theme);
    render_panel(frame, panels[1], &page.tips, theme);
}

fn render_search(frame: &mut Frame, area: Rect, card: &SearchCard, theme: &Theme) {
    let block = card_block("Home", card.focused, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title + intro
            Constraint::Length(1), // Input + button
            Constraint::Length(1), // Error
            Constraint::Min(0),
        ])
        .split(inner);

    let heading = Paragraph::new(Line::from(vec![
        Span::styled(card.title, theme.title()),
        Span::raw("  "),
        Span::styled(card.intro, theme.dimmed()),
    ]));
    frame.render_widget(heading, rows[0]);

    let button_width = card.button.chars().count() as u16 + 4;
    let input_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(8), Constraint::Length(button_width)])
        .split(rows[1]);

    let input_line = match &card.input {
        SearchInput::Placeholder(text) => Line::from(vec![
            Span::styled("⌕ ", theme.dimmed()),
            Span::styled(*text, theme.dimmed()),
        ]),
        SearchInput::Text {
            before,
            after,
            editing,
        } => {
            let mut spans = vec![
                Span::styled("⌕ ", theme.accent()),
                Span::styled(before.clone(), theme.input()),
            ];
            if *editing {
                spans.push(Span::styled("│", theme.border_focused()));
            }
            spans.push(Span::styled(after.clone(), theme.input()));
            Line::from(spans)
        }
    };
    frame.render_widget(Paragraph::new(input_line).style(theme.input()), input_row[0]);

    let button = Paragraph::new(format!(" {} ", card.button))
        .style(theme.button(card.busy))
        .alignment(Alignment::Center);
    frame.render_widget(button, input_row[1]);

    if let Some(error) = &card.error {
        let line = Line::from(vec![
            Span::styled("✗ ", theme.error()),
            Span::styled(error.as_str(), theme.error()),
        ]);
        frame.render_widget(Paragraph::new(line), rows[2]);
    }
}

fn render_result(
    frame: &mut Frame,
    area: Rect,
    result: &ResultCard,
    theme: &Theme,
    sprite: Option<&SpriteThumb>,
) {
    match result {
        ResultCard::Placeholder(text) => {
            let block = card_block("Result", false, theme);
            let inner = block.inner(area);
            frame.render_widget(block, area);

            let v_pad = inner.height.saturating_sub(1) / 2;
            let lines: Vec<Line> = std::iter::repeat(Line::from(""))
                .take(v_pad as usize)
                .chain(std::iter::once(Line::from(Span::styled(*text, theme.dimmed()))))
                .collect();
            frame.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                inner,
            );
        }
        ResultCard::Pokemon(card) => render_pokemon(frame, area, card, theme, sprite),
    }
}

fn render_pokemon(
    frame: &mut Frame,
    area: Rect,
    card: &PokemonCard,
    theme: &Theme,
    sprite: Option<&SpriteThumb>,
) {
    let block = card_block(&card.title, true, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let sprite_width = (inner.width / 2).min(34);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sprite_width), Constraint::Min(10)])
        .split(inner);

    match (&card.sprite, sprite) {
        (SpriteSlot::Url(_), Some(thumb)) => {
            frame.render_widget(SpriteView::new(thumb, theme.surface), chunks[0]);
        }
        (SpriteSlot::Url(url), None) => {
            frame.render_widget(
                Paragraph::new(Span::styled(url.as_str(), theme.dimmed()))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                chunks[0],
            );
        }
        (SpriteSlot::Missing(text), _) => {
            frame.render_widget(
                Paragraph::new(Span::styled(*text, theme.dimmed())).alignment(Alignment::Center),
                chunks[0],
            );
        }
    }

    let mut lines = vec![
        Line::from(vec![
            Span::styled("✓ ", theme.success()),
            Span::styled(card.title.clone(), theme.success()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Height: ", theme.label()),
            Span::styled(card.height.to_string(), theme.card()),
        ]),
        Line::from(vec![
            Span::styled("Weight: ", theme.label()),
            Span::styled(card.weight.to_string(), theme.card()),
        ]),
    ];

    if let Some(types) = &card.types {
        let mut spans = Vec::with_capacity(types.len() * 2);
        for name in types {
            spans.push(Span::styled(format!(" {} ", name), theme.type_badge(name)));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).style(theme.card()), chunks[1]);
}

fn render_panel(frame: &mut Frame, area: Rect, panel: &Panel, theme: &Theme) {
    let block = card_block(panel.title, panel.focused, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = panel
        .lines
        .iter()
        .map(|text| {
            if panel.bulleted {
                Line::from(vec![
                    Span::styled("• ", theme.accent()),
                    Span::styled(*text, theme.card()),
                ])
            } else {
                Line::from(Span::styled(*text, theme.card()))
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

// =============================================================================
// Footer
// =============================================================================

fn render_footer(frame: &mut Frame, area: Rect, footer: &Footer, theme: &Theme) {
    let mut spans = Vec::new();
    for (key, action) in &footer.hints {
        spans.push(Span::styled(format!(" {} ", key), theme.keybind()));
        spans.push(Span::styled(format!("{} ", action), theme.dimmed()));
    }
    spans.push(Span::styled(" │ ", theme.dimmed()));
    spans.push(Span::styled(footer.credit, Style::default().fg(theme.dim)));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(theme.status_bar()),
        area,
    );
}
