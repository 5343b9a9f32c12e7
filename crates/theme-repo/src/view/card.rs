//! Theme card: a label in the theme's own colors over two rows of eight
//! accent swatches.
//!
//! ```text
//! ┌────────────────────────┐
//! │ dracula                │
//! │████████████████████████│  color0..color7
//! │████████████████████████│  color8..color15
//! └────────────────────────┘
//! ```

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;
use theme_repo_core::theme::{ThemeSummary, SWATCHES_PER_ROW};

use super::color::{color_or_default, contrasting_text, parse_color};

/// Columns per swatch
pub const SWATCH_WIDTH: u16 = 3;
/// Outer card width, borders included
pub const CARD_WIDTH: u16 = SWATCH_WIDTH * SWATCHES_PER_ROW as u16 + 2;
/// Outer card height: borders, label row, two swatch rows
pub const CARD_HEIGHT: u16 = 5;

/// Where each palette entry of a card was drawn, indexed by palette index
#[derive(Debug, Clone, Default)]
pub struct CardLayout {
    pub area: Rect,
    pub swatches: Vec<Rect>,
}

/// Draw `theme` into `area` (normally `CARD_WIDTH` x `CARD_HEIGHT`).
pub fn render_card(frame: &mut Frame, area: Rect, theme: &ThemeSummary, selected: bool) -> CardLayout {
    let border_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Thick
        } else {
            BorderType::Plain
        })
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut layout = CardLayout {
        area,
        swatches: Vec::with_capacity(theme.palette().len()),
    };
    if inner.height == 0 || inner.width == 0 {
        return layout;
    }

    let background = color_or_default(&theme.background);
    let foreground = parse_color(&theme.foreground).unwrap_or_else(|| contrasting_text(background));
    let label_area = Rect::new(inner.x, inner.y, inner.width, 1);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {}", theme.name),
            Style::default()
                .fg(foreground)
                .bg(background)
                .add_modifier(Modifier::BOLD),
        )))
        .style(Style::default().bg(background)),
        label_area,
    );

    for (row_index, row) in theme.swatch_rows().iter().enumerate() {
        let y = inner.y + 1 + row_index as u16;
        if y >= inner.bottom() {
            break;
        }
        for (col, value) in row.iter().enumerate() {
            let x = inner.x + col as u16 * SWATCH_WIDTH;
            if x >= inner.right() {
                break;
            }
            let width = SWATCH_WIDTH.min(inner.right() - x);
            let swatch = Rect::new(x, y, width, 1);
            frame
                .buffer_mut()
                .set_style(swatch, Style::default().bg(color_or_default(value)));
            layout.swatches.push(swatch);
        }
    }

    layout
}
