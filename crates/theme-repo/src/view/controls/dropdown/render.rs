//! Dropdown rendering

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use super::{DropdownColors, DropdownLayout, DropdownState, FocusState};

/// Widest option we pad to; longer names are cut.
const MAX_OPTION_WIDTH: usize = 24;

/// Render the dropdown button on the first row of `area` and, while open,
/// the option list on the rows below it.
///
/// The number of option rows that fit is written back to
/// `state.max_visible` and the scroll offset is adjusted so the selected
/// option is always drawn.
pub fn render_dropdown(
    frame: &mut Frame,
    area: Rect,
    state: &mut DropdownState,
    colors: &DropdownColors,
) -> DropdownLayout {
    if area.height == 0 || area.width < 10 {
        return DropdownLayout::default();
    }

    let (label_color, selected_color, border_color, arrow_color) = match state.focus {
        FocusState::Normal => (colors.label, colors.selected, colors.border, colors.arrow),
        FocusState::Focused => (
            colors.focused_fg,
            colors.focused_fg,
            colors.focused_fg,
            colors.focused_fg,
        ),
    };

    let selected_text = state.selected_option().unwrap_or("");
    let display_width = state
        .options
        .iter()
        .map(|s| s.width())
        .max()
        .unwrap_or(0)
        .max(selected_text.width())
        .clamp(4, MAX_OPTION_WIDTH);

    let arrow = if state.open { "▲" } else { "▼" };

    let line = Line::from(vec![
        Span::styled(state.label.as_str(), Style::default().fg(label_color)),
        Span::styled(": ", Style::default().fg(label_color)),
        Span::styled("[", Style::default().fg(border_color)),
        Span::styled(
            pad(selected_text, display_width),
            Style::default().fg(selected_color),
        ),
        Span::raw(" "),
        Span::styled(arrow, Style::default().fg(arrow_color)),
        Span::styled("]", Style::default().fg(border_color)),
    ]);
    let button_area = Rect::new(area.x, area.y, area.width, 1);
    frame.render_widget(Paragraph::new(line), button_area);

    let button_start = area.x + state.label.width() as u16 + 2;
    let option_width = (display_width as u16 + 2).min(area.right().saturating_sub(button_start));

    let mut layout = DropdownLayout {
        button_area,
        ..Default::default()
    };
    if !state.open || area.height < 2 {
        return layout;
    }

    let available = area.height as usize - 1;
    let visible = state.options.len().min(available);
    state.max_visible = available;
    state.ensure_visible();
    let scroll_offset = state
        .scroll_offset
        .min(state.options.len().saturating_sub(visible));
    state.scroll_offset = scroll_offset;
    layout.scroll_offset = scroll_offset;

    for (i, option) in state
        .options
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible)
    {
        let row = area.y + 1 + (i - scroll_offset) as u16;
        let option_area = Rect::new(button_start, row, option_width, 1);

        let (fg, bg) = if i == state.selected {
            (colors.selected, colors.highlight_bg)
        } else {
            (colors.option, Color::Reset)
        };
        frame.render_widget(Clear, option_area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {}", pad(option, display_width)),
                Style::default().fg(fg).bg(bg),
            )),
            option_area,
        );
        layout.option_areas.push(option_area);
    }

    layout
}

fn pad(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}
