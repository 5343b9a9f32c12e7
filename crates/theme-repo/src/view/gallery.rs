//! The card grid.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use theme_repo_core::gallery::{ListStatus, ThemeList};

use super::card::{render_card, CardLayout, CARD_HEIGHT, CARD_WIDTH};

/// Blank columns between cards
const CARD_GAP: u16 = 1;

#[derive(Debug, Clone, Default)]
pub struct GalleryLayout {
    /// Cards per grid row at the current width
    pub columns: usize,
    /// Drawn cards as (index into the list, layout)
    pub cards: Vec<(usize, CardLayout)>,
}

/// Number of card columns that fit in `width`.
pub fn columns_for_width(width: u16) -> usize {
    (((width + CARD_GAP) / (CARD_WIDTH + CARD_GAP)) as usize).max(1)
}

/// Draw the header, then the grid of cards scrolled so the selection is
/// visible.
pub fn render_gallery(frame: &mut Frame, area: Rect, list: &ThemeList) -> GalleryLayout {
    let columns = columns_for_width(area.width);
    let mut layout = GalleryLayout {
        columns,
        cards: Vec::new(),
    };
    if area.height == 0 {
        return layout;
    }

    let header = match list.status() {
        ListStatus::Loaded => format!("Themes ({})", list.len()),
        _ => "Themes".to_string(),
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            header,
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        Rect::new(area.x, area.y, area.width, 1),
    );

    let body = Rect::new(
        area.x,
        area.y + 1,
        area.width,
        area.height.saturating_sub(1),
    );

    let placeholder = match list.status() {
        ListStatus::Idle | ListStatus::Loading => Some("Loading themes..."),
        ListStatus::Failed => Some("Could not load themes. Press r to retry."),
        ListStatus::Loaded if list.is_empty() => Some("No themes available."),
        ListStatus::Loaded => None,
    };
    if let Some(text) = placeholder {
        if body.height > 0 {
            let y = body.y + body.height / 2;
            frame.render_widget(
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Gray)),
                Rect::new(body.x, y, body.width, 1),
            );
        }
        return layout;
    }

    let visible_rows = (body.height / CARD_HEIGHT).max(1) as usize;
    let selected_row = list.selected_index() / columns;
    let first_row = (selected_row + 1).saturating_sub(visible_rows);

    for (index, theme) in list.themes().iter().enumerate() {
        let row = index / columns;
        if row < first_row {
            continue;
        }
        if row >= first_row + visible_rows {
            break;
        }
        let col = (index % columns) as u16;
        let x = body.x + col * (CARD_WIDTH + CARD_GAP);
        let y = body.y + (row - first_row) as u16 * CARD_HEIGHT;
        let card_area = Rect::new(x, y, CARD_WIDTH, CARD_HEIGHT).intersection(body);
        if card_area.is_empty() {
            continue;
        }
        let card = render_card(frame, card_area, theme, index == list.selected_index());
        layout.cards.push((index, card));
    }

    layout
}
