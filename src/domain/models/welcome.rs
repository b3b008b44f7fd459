use ratatui::prelude::Alignment;
use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Empty state shown while there are no messages and no attached files.
#[derive(Default)]
pub struct Welcome {}

impl Welcome {
    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect) {
        let mut lines: Vec<Line> = vec![];
        let top_padding = rect.height.saturating_sub(6) / 2;
        for _ in 0..top_padding {
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "Upload documents and start asking questions",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(
            "Supports PDF, Word, Excel, PowerPoint, images, and text files.",
        ));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Use /attach PATH to add a file, or /help for all commands.",
            Style::default().add_modifier(Modifier::DIM),
        )));

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
    }
}
