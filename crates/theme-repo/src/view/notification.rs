//! Bottom line: the current notification, or key hints when there is none.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use theme_repo_core::{Notification, Severity};

const GALLERY_HINT: &str = "←↑↓→ move  Enter open  r reload  q quit";

pub fn render_status_line(frame: &mut Frame, area: Rect, notification: Option<&Notification>) {
    let line = match notification {
        Some(n) => {
            let (label, bg) = match n.severity {
                Severity::Error => (" ERROR ", Color::Red),
                Severity::Success => (" OK ", Color::Green),
            };
            Line::from(vec![
                Span::styled(
                    label,
                    Style::default()
                        .fg(Color::Black)
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(n.message.as_str(), Style::default().fg(bg)),
                Span::styled("  (d to dismiss)", Style::default().fg(Color::DarkGray)),
            ])
        }
        None => Line::from(Span::styled(
            GALLERY_HINT,
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}
