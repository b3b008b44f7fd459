#[cfg(test)]
#[path = "file_list_test.rs"]
mod tests;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::domain::models::format_file_size;
use crate::domain::models::FileRecord;
use crate::domain::models::FileStatus;

// Caps how much chat area a large batch of attachments can take over.
const MAX_PANEL_HEIGHT: u16 = 10;

pub struct FileList {}

impl FileList {
    pub fn height(files: &[FileRecord]) -> u16 {
        if files.is_empty() {
            return 0;
        }

        let height = files.len() as u16 + 2;
        return height.min(MAX_PANEL_HEIGHT);
    }

    pub fn as_lines(files: &[FileRecord]) -> Vec<Line<'static>> {
        return files
            .iter()
            .enumerate()
            .map(|(idx, file)| {
                let n = idx + 1;
                let status_style = match file.status {
                    FileStatus::Uploading => Style {
                        fg: Some(Color::DarkGray),
                        ..Style::default()
                    },
                    FileStatus::Processing => Style {
                        fg: Some(Color::Yellow),
                        ..Style::default()
                    },
                    FileStatus::Complete => Style {
                        fg: Some(Color::Green),
                        ..Style::default()
                    },
                    FileStatus::Error => Style {
                        fg: Some(Color::Red),
                        ..Style::default()
                    },
                };

                return Line::from(vec![
                    Span::from(format!(
                        "({n}) [{kind}] {name} ({size}) ",
                        kind = file.kind.label(),
                        name = file.name,
                        size = format_file_size(file.size)
                    )),
                    Span::styled(file.status.label(), status_style),
                ]);
            })
            .collect();
    }

    pub fn render<B: Backend>(frame: &mut Frame<B>, rect: Rect, files: &[FileRecord]) {
        frame.render_widget(
            Paragraph::new(FileList::as_lines(files)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title("Attached files")
                    .padding(Padding::new(1, 1, 0, 0)),
            ),
            rect,
        );
    }
}
