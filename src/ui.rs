//! Terminal rendering - a pure function of `RenderState`

use ratatui::{prelude::*, widgets::*};

use crate::app::screens::{CollectionScreen, ModalPhase, ProductDetail, Remote};
use crate::error::FetchError;
use crate::messages::ui_events::AppTab;
use crate::messages::RenderState;
use crate::models::{Character, CharacterStatus, Product};

const ACCENT_GREEN: Color = Color::Rgb(0x62, 0xCF, 0x9B);
const ACCENT_BLUE: Color = Color::Rgb(0x71, 0xAC, 0xF5);

/// Draw the whole screen
pub fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let selected = match state.active_tab {
        AppTab::Characters => 0,
        AppTab::Store => 1,
    };
    f.render_widget(render_tabs(&[" 1:Characters ", " 2:Store "], selected), main_chunks[0]);

    match state.active_tab {
        AppTab::Characters => draw_characters_tab(f, state, main_chunks[1]),
        AppTab::Store => match &state.product_detail {
            Some(detail) => draw_product_detail(f, detail, main_chunks[1]),
            None => draw_products(f, &state.products, main_chunks[1]),
        },
    }

    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Black).bg(ACCENT_GREEN).bold())
        .divider("|")
}

/// Dot colour for a character's life status
pub fn status_color(status: CharacterStatus) -> Color {
    match status {
        CharacterStatus::Alive => Color::Rgb(0x55, 0xCC, 0x44),
        CharacterStatus::Dead => Color::Rgb(0xD6, 0x3D, 0x2E),
        CharacterStatus::Unknown => Color::Rgb(0x9E, 0x9E, 0x9E),
    }
}

/// Placeholder body for loading, failed and empty states.
///
/// Returns `None` when the collection has items to show.
fn placeholder<'a, T>(remote: &Remote<Vec<T>>, what: &str) -> Option<Paragraph<'a>> {
    let lines = match remote {
        Remote::Idle | Remote::Loading => vec![Line::from(Span::styled(
            format!("Loading {}...", what),
            Style::default().fg(Color::DarkGray),
        ))],
        Remote::Failed(e) => error_lines(e),
        Remote::Ready(items) if items.is_empty() => vec![Line::from(Span::styled(
            format!("No {} found.", what),
            Style::default().fg(Color::DarkGray),
        ))],
        Remote::Ready(_) => return None,
    };
    Some(Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true }))
}

fn error_lines<'a>(error: &FetchError) -> Vec<Line<'a>> {
    vec![
        Line::from(Span::styled(
            error.kind().as_str().to_string(),
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(error.message().to_string()),
        Line::from(""),
        Line::from(Span::styled("Press 'r' to retry", Style::default().fg(Color::Yellow))),
    ]
}

// ============================================================================
// Characters tab
// ============================================================================

fn draw_characters_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let screen = &state.characters;
    let title = match screen.total {
        Some(total) => format!(" Rick and Morty - Character Explorer ({} total) ", total),
        None => String::from(" Rick and Morty - Character Explorer "),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT_GREEN))
        .title(title);

    if let Some(paragraph) = placeholder(&screen.items, "characters") {
        f.render_widget(paragraph.block(block), area);
    } else {
        draw_character_list(f, screen, block, area);
    }

    match state.character_modal.phase() {
        ModalPhase::Loading => draw_modal_loading(f, area),
        ModalPhase::Open => {
            if let Some(character) = state.character_modal.selected() {
                draw_character_modal(f, character, state.character_modal.scroll, area);
            }
        }
        ModalPhase::Closed => {}
    }
}

fn draw_character_list(f: &mut Frame, screen: &CollectionScreen<Character>, block: Block, area: Rect) {
    let characters = screen.items.ready().map(Vec::as_slice).unwrap_or(&[]);

    let items: Vec<ListItem> = characters
        .iter()
        .map(|c| {
            let name = Line::from(Span::styled(c.name.clone(), Style::default().fg(Color::White).bold()));
            let status = Line::from(vec![
                Span::styled("● ", Style::default().fg(status_color(c.status))),
                Span::styled(
                    format!("{} - {}", c.status.as_str(), c.species),
                    Style::default().fg(Color::Gray),
                ),
            ]);
            ListItem::new(vec![name, status])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(0x1E, 0x1E, 0x1E)).fg(ACCENT_GREEN))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(screen.selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_modal_loading(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(50, 20, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT_GREEN))
        .style(Style::default().bg(Color::Black));
    let text = Paragraph::new("Loading character details...")
        .alignment(Alignment::Center)
        .block(block);

    f.render_widget(Clear, popup_area);
    f.render_widget(text, popup_area);
}

fn detail_section<'a>(lines: &mut Vec<Line<'a>>, title: &str, value: String) {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(ACCENT_GREEN).bold(),
    )));
    lines.push(Line::from(value));
}

/// Lines of the character detail overlay
pub fn character_detail_lines(character: &Character) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(character.name.clone(), Style::default().fg(Color::White).bold())),
        Line::from(vec![
            Span::styled("● ", Style::default().fg(status_color(character.status))),
            Span::raw(format!("{} - {}", character.status.as_str(), character.species)),
        ]),
    ];

    detail_section(&mut lines, "Origin", character.origin.name.clone());
    detail_section(&mut lines, "Last known location", character.location.name.clone());
    if let Some(kind) = character.kind_label() {
        detail_section(&mut lines, "Type", kind.to_string());
    }
    detail_section(&mut lines, "Gender", character.gender.clone());
    detail_section(&mut lines, "Created", character.created.format("%b %-d, %Y").to_string());
    detail_section(
        &mut lines,
        "Appears in",
        format!("{} episodes", character.episode_count()),
    );
    detail_section(&mut lines, "Image", character.image.clone());
    lines
}

fn draw_character_modal(f: &mut Frame, character: &Character, scroll: u16, area: Rect) {
    let popup_area = centered_rect(90, 80, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT_GREEN))
        .title(format!(" #{} ", character.id))
        .title_bottom(Line::from(" Esc: close ").right_aligned())
        .style(Style::default().bg(Color::Black));

    let body = Paragraph::new(character_detail_lines(character))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    f.render_widget(Clear, popup_area);
    f.render_widget(body, popup_area);
}

// ============================================================================
// Store tab
// ============================================================================

fn draw_products(f: &mut Frame, screen: &CollectionScreen<Product>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT_BLUE))
        .title(" Store ");

    if let Some(paragraph) = placeholder(&screen.items, "products") {
        f.render_widget(paragraph.block(block), area);
        return;
    }

    let products = screen.items.ready().map(Vec::as_slice).unwrap_or(&[]);
    let items: Vec<ListItem> = products
        .iter()
        .map(|p| {
            ListItem::new(vec![
                Line::from(Span::styled(p.title.clone(), Style::default().fg(Color::White).bold())),
                Line::from(Span::styled(p.category.to_uppercase(), Style::default().fg(Color::Gray))),
                Line::from(vec![
                    Span::styled("★ ", Style::default().fg(ACCENT_BLUE)),
                    Span::raw(format!("{}", p.rating.rate)),
                    Span::raw("   "),
                    Span::styled(p.price_label(), Style::default().fg(ACCENT_BLUE).bold()),
                ]),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(ACCENT_BLUE))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(screen.selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

/// Lines of the product detail screen
pub fn product_detail_lines(product: &Product) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(product.title.clone(), Style::default().fg(Color::White).bold())),
        Line::from(Span::styled(product.category.to_uppercase(), Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(Span::styled(product.image.clone(), Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(product.description.clone()),
        Line::from(""),
        Line::from(vec![
            Span::styled("★ ", Style::default().fg(ACCENT_BLUE)),
            Span::raw(format!("{} ({} ratings)", product.rating.rate, product.rating.count)),
        ]),
        Line::from(Span::styled(product.price_label(), Style::default().fg(ACCENT_BLUE).bold())),
    ]
}

fn draw_product_detail(f: &mut Frame, detail: &ProductDetail, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT_BLUE))
        .title(format!(" Product #{} ", detail.product_id))
        .title_bottom(Line::from(" Esc: back ").right_aligned());

    let paragraph = match &detail.item {
        Remote::Idle | Remote::Loading => Paragraph::new(Span::styled(
            "Loading product...",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
        Remote::Failed(e) => Paragraph::new(error_lines(e)).alignment(Alignment::Center),
        Remote::Ready(product) => Paragraph::new(product_detail_lines(product))
            .alignment(Alignment::Center)
            .scroll((detail.scroll, 0)),
    };

    f.render_widget(paragraph.block(block).wrap(Wrap { trim: false }), area);
}

// ============================================================================
// Status bar / popups
// ============================================================================

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let (text, style) = match (state.active_tab, state.character_modal.detail.error()) {
        (AppTab::Characters, Some(e)) => (
            format!(" Could not load character: {} | r:retry Esc:dismiss ", e),
            Style::default().fg(Color::Red),
        ),
        _ => {
            let hints = match state.active_tab {
                AppTab::Characters if state.character_modal.phase() == ModalPhase::Open => {
                    " ↑/↓:scroll | Esc:close | q:quit "
                }
                AppTab::Store if state.product_detail.is_some() => {
                    " ↑/↓:scroll | Esc:back | r:retry | q:quit "
                }
                _ => " 1/2:tab | ↑/↓:move | Enter:open | r:retry | ?:help | q:quit ",
            };
            (hints.to_string(), Style::default().fg(Color::DarkGray))
        }
    };

    f.render_widget(Paragraph::new(text).style(style), area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 LOOKOUT - Keyboard Shortcuts

 NAVIGATION
   1 / 2              Characters / Store
   ↑ / ↓  (k / j)     Move cursor or scroll details
   Enter              Open selected record
   Esc / Backspace    Close details / go back

 ERRORS
   r                  Retry the failed request

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text).block(block).wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppState;
    use crate::messages::network::Payload;
    use crate::messages::{NetworkCommand, NetworkResponse};
    use crate::models::fixtures::{character, product};
    use crate::models::Listing;
    use ratatui::backend::TestBackend;

    fn render(state: &RenderState) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn request_id(cmd: Option<NetworkCommand>) -> u64 {
        match cmd {
            Some(NetworkCommand::Execute { id, .. }) => id,
            other => panic!("expected an execute command, got {:?}", other),
        }
    }

    #[test]
    fn test_loading_state_is_shown() {
        let mut state = AppState::default();
        state.mount_active_tab();
        assert!(render(&state.to_render_state()).contains("Loading characters..."));
    }

    #[test]
    fn test_empty_collection_renders_empty_state() {
        let mut state = AppState::default();
        let id = request_id(state.mount_active_tab());
        state.handle_response(NetworkResponse::Success {
            id,
            payload: Payload::Characters(Listing { items: vec![], total: Some(0) }),
            time_ms: 1,
        });
        assert!(render(&state.to_render_state()).contains("No characters found."));
    }

    #[test]
    fn test_failed_list_offers_retry() {
        let mut state = AppState::default();
        let id = request_id(state.switch_tab(AppTab::Store));
        state.handle_response(NetworkResponse::Failure {
            id,
            error: FetchError::Network("Connection failed".into()),
            time_ms: 1,
        });
        let screen = render(&state.to_render_state());
        assert!(screen.contains("Network error"));
        assert!(screen.contains("Press 'r' to retry"));
    }

    #[test]
    fn test_open_modal_shows_details() {
        let mut state = AppState::default();
        let id = request_id(state.mount_active_tab());
        state.handle_response(NetworkResponse::Success {
            id,
            payload: Payload::Characters(Listing { items: vec![character(1, "Rick Sanchez")], total: Some(826) }),
            time_ms: 1,
        });
        let id = request_id(state.open_selected());
        assert!(render(&state.to_render_state()).contains("Loading character details..."));

        state.handle_response(NetworkResponse::Success {
            id,
            payload: Payload::Character(character(1, "Rick Sanchez")),
            time_ms: 1,
        });
        let screen = render(&state.to_render_state());
        assert!(screen.contains("826 total"));
        assert!(screen.contains("Last known location"));
        assert!(screen.contains("2 episodes"));
        assert!(!screen.contains("Type"));
    }

    #[test]
    fn test_product_detail_shows_price() {
        let mut state = AppState::default();
        let id = request_id(state.switch_tab(AppTab::Store));
        state.handle_response(NetworkResponse::Success {
            id,
            payload: Payload::Products(Listing { items: vec![product(1, "Backpack", 109.95)], total: None }),
            time_ms: 1,
        });
        assert!(render(&state.to_render_state()).contains("MEN'S CLOTHING"));

        let id = request_id(state.open_selected());
        assert!(render(&state.to_render_state()).contains("Loading product..."));

        state.handle_response(NetworkResponse::Success {
            id,
            payload: Payload::Product(product(1, "Backpack", 109.95)),
            time_ms: 1,
        });
        assert!(render(&state.to_render_state()).contains("$109.95"));
    }

    #[test]
    fn test_failed_product_detail_offers_retry() {
        let mut state = AppState::default();
        let id = request_id(state.switch_tab(AppTab::Store));
        state.handle_response(NetworkResponse::Success {
            id,
            payload: Payload::Products(Listing { items: vec![product(5, "Ring", 9.99)], total: None }),
            time_ms: 1,
        });
        let id = request_id(state.open_selected());
        state.handle_response(NetworkResponse::Failure {
            id,
            error: FetchError::NotFound("No product with id 5".into()),
            time_ms: 1,
        });

        let screen = render(&state.to_render_state());
        assert!(screen.contains("Not found"));
        assert!(screen.contains("Press 'r' to retry"));
    }

    #[test]
    fn test_character_type_shown_when_present() {
        let mut c = character(2, "Morty");
        c.kind = "Parasite".to_string();
        let text: String = character_detail_lines(&c)
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(text.contains("Type"));
        assert!(text.contains("Parasite"));
        assert!(text.contains("Nov 4, 2017"));
    }
}
