#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
}

pub struct BubbleConfig {
    pub bubble_padding: usize,
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

fn repeat_from_subtractions(text: &str, subtractions: Vec<usize>) -> String {
    let count = subtractions
        .into_iter()
        .map(|e| {
            return i32::try_from(e).unwrap();
        })
        .reduce(|a, b| {
            return a - b;
        })
        .unwrap();

    if count <= 0 {
        return "".to_string();
    }

    return [text].repeat(count.try_into().unwrap()).join("");
}

impl<'a> Bubble<'a> {
    pub fn new(message: &'a Message, alignment: BubbleAlignment, window_max_width: usize) -> Bubble<'a> {
        return Bubble {
            alignment,
            message,
            window_max_width,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // Unicode character border + padding.
            bubble_padding: 8,
            // left border + left padding + (text, not counted) + right padding + right border +
            // scrollbar.
            border_elements_length: 5,
            outer_padding_percentage: 0.04,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let max_line_length = self.get_max_line_length();

        let lines = self
            .message
            .as_string_lines(max_line_length)
            .iter()
            .map(|line| {
                return self.format_line(line.to_string(), max_line_length);
            })
            .collect::<Vec<Line<'static>>>();

        return self.wrap_lines_in_bubble(lines, max_line_length);
    }

    fn format_line(&self, text: String, max_line_length: usize) -> Line<'static> {
        let fill = repeat_from_subtractions(" ", vec![max_line_length, text.len()]);
        let formatted_line_length = text.len() + fill.len() + Bubble::style_config().bubble_padding;

        let mut spans = vec![
            self.highlight_span("│ ".to_string()),
            Span::from(text),
            self.highlight_span(format!("{fill} │")),
        ];

        let outer_bubble_padding =
            repeat_from_subtractions(" ", vec![self.window_max_width, formatted_line_length]);

        if self.alignment == BubbleAlignment::Left {
            spans.push(Span::from(outer_bubble_padding));
            return Line::from(spans);
        }

        let mut line_spans = vec![Span::from(outer_bubble_padding)];
        line_spans.extend(spans);

        return Line::from(line_spans);
    }

    fn title(&self) -> String {
        return format!(
            "{} @ {}",
            self.message.author.to_string(),
            self.message.time_label()
        );
    }

    fn get_max_line_length(&self) -> usize {
        let style_config = Bubble::style_config();
        // Add a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        // Border elements + minimum bubble padding.
        let line_border_width = style_config.border_elements_length + min_bubble_padding_length;

        let mut max_line_length = self
            .message
            .text()
            .lines()
            .map(|line| {
                return line.len();
            })
            .max()
            .unwrap_or(1);

        if max_line_length > self.window_max_width.saturating_sub(line_border_width) {
            max_line_length = self.window_max_width.saturating_sub(line_border_width);
        }

        let title = self.title();
        if max_line_length < title.len() {
            max_line_length = title.len();
        }

        return max_line_length;
    }

    fn wrap_lines_in_bubble(
        &self,
        lines: Vec<Line<'static>>,
        max_line_length: usize,
    ) -> Vec<Line<'static>> {
        // Add 2 for the vertical bars.
        let inner_bar = ["─"].repeat(max_line_length + 2).join("");
        let top_left_border = "╭";
        let mut top_bar = format!("{top_left_border}{inner_bar}╮");
        let bottom_bar = format!("╰{inner_bar}╯");
        let bar_bubble_padding = repeat_from_subtractions(
            " ",
            vec![
                self.window_max_width,
                max_line_length,
                Bubble::style_config().bubble_padding,
            ],
        );

        let title = self.title();
        let top_replace = ["─"].repeat(title.len()).join("");
        top_bar = top_bar.replace(
            format!("{top_left_border}{top_replace}").as_str(),
            format!("{top_left_border}{title}").as_str(),
        );

        if self.alignment == BubbleAlignment::Left {
            let mut res = vec![self.highlight_line(format!("{top_bar}{bar_bubble_padding}"))];
            res.extend(lines);
            res.push(self.highlight_line(format!("{bottom_bar}{bar_bubble_padding}")));
            return res;
        }

        let mut res = vec![self.highlight_line(format!("{bar_bubble_padding}{top_bar}"))];
        res.extend(lines);
        res.push(self.highlight_line(format!("{bar_bubble_padding}{bottom_bar}")));
        return res;
    }

    fn highlight_span(&self, text: String) -> Span<'static> {
        if self.message.message_type() == MessageType::Error {
            return Span::styled(
                text,
                Style {
                    fg: Some(Color::Red),
                    ..Style::default()
                },
            );
        }

        if self.message.author == Author::App {
            return Span::styled(
                text,
                Style {
                    fg: Some(Color::Blue),
                    ..Style::default()
                },
            );
        }

        return Span::from(text);
    }

    fn highlight_line(&self, text: String) -> Line<'static> {
        return Line::from(self.highlight_span(text));
    }
}
