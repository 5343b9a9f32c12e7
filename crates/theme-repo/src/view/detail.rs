//! Detail modal: template selector on top, rendered text below.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use theme_repo_core::detail::ThemeDetail;

use super::color::{color_or_default, contrasting_text, parse_color};
use super::controls::dropdown::{render_dropdown, DropdownColors, DropdownState};

const HINT: &str = " Esc close  t template  c copy  ↑↓ scroll ";

#[derive(Debug, Clone, Default)]
pub struct DetailLayout {
    pub modal: Rect,
    /// Area the rendered text is drawn in
    pub text_area: Rect,
}

/// The modal rectangle: most of `area`, centered.
pub fn modal_area(area: Rect) -> Rect {
    let width = area.width.saturating_sub(4).max(area.width.min(20));
    let height = area.height.saturating_sub(2).max(area.height.min(8));
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Draw the detail view of `detail` over `area`.
///
/// `picker` is the template dropdown while the user is choosing; otherwise
/// a closed selector showing the current template is drawn.
pub fn render_detail(
    frame: &mut Frame,
    area: Rect,
    detail: &ThemeDetail,
    picker: Option<&mut DropdownState>,
    scroll: u16,
) -> DetailLayout {
    let Some(theme) = detail.theme() else {
        return DetailLayout::default();
    };

    let modal = modal_area(area);
    frame.render_widget(Clear, modal);

    let background = color_or_default(&theme.background);
    let foreground = parse_color(&theme.foreground).unwrap_or_else(|| contrasting_text(background));
    let mut title = vec![Span::styled(
        format!(" {} ", theme.name),
        Style::default()
            .fg(foreground)
            .bg(background)
            .add_modifier(Modifier::BOLD),
    )];
    if detail.is_pending() {
        title.push(Span::styled(
            " rendering... ",
            Style::default().fg(Color::Yellow),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(title))
        .title_bottom(Line::from(HINT).right_aligned())
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    if inner.height < 2 {
        return DetailLayout {
            modal,
            text_area: Rect::default(),
        };
    }

    let text_area = Rect::new(inner.x, inner.y + 2, inner.width, inner.height.saturating_sub(2));
    match detail.rendered() {
        Some(rendered) => {
            let lines: Vec<Line> = rendered.lines().map(Line::raw).collect();
            frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), text_area);
        }
        None => {
            let placeholder = if detail.is_pending() {
                "Loading..."
            } else {
                "Nothing rendered."
            };
            frame.render_widget(
                Paragraph::new(placeholder).style(Style::default().fg(Color::Gray)),
                text_area,
            );
        }
    }

    // Drawn last so an open option list overlays the text
    let selector_area = Rect::new(inner.x, inner.y, inner.width, inner.height);
    let mut closed;
    let picker = match picker {
        Some(picker) => picker,
        None => {
            closed = DropdownState::new(vec![detail.template().to_string()], "Template");
            &mut closed
        }
    };
    render_dropdown(frame, selector_area, picker, &DropdownColors::default());

    DetailLayout { modal, text_area }
}
