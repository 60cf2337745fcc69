//! Transcript layout: messages become rows of wrapped text followed by
//! optional chart blocks, laid out for a given width so the total height is
//! known before anything is drawn.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::core::message::{Message, Role};
use crate::core::text_wrapping::{TextWrapper, WrapConfig};
use crate::ui::charts::{self, ChartView};
use crate::ui::theme::Theme;

pub const USER_PREFIX: &str = "You: ";

#[derive(Debug, Clone, Copy)]
pub struct TranscriptOptions {
    pub charts_enabled: bool,
    pub chart_height: u16,
}

enum Row {
    Text(Line<'static>),
    Chart { view: ChartView, height: u16 },
}

impl Row {
    fn height(&self) -> usize {
        match self {
            Row::Text(_) => 1,
            Row::Chart { height, .. } => usize::from(*height),
        }
    }
}

pub struct Transcript {
    rows: Vec<Row>,
    width: u16,
}

impl Transcript {
    pub fn build<'a>(
        messages: impl IntoIterator<Item = &'a Message>,
        theme: &Theme,
        width: u16,
        options: TranscriptOptions,
    ) -> Self {
        let mut rows = Vec::new();
        for message in messages {
            push_message(&mut rows, message, theme, width, options);
        }
        Self { rows, width }
    }

    pub fn height(&self) -> usize {
        self.rows.iter().map(Row::height).sum()
    }

    /// Largest scroll offset that still fills a viewport of `viewport_height`.
    pub fn max_scroll(&self, viewport_height: u16) -> usize {
        self.height().saturating_sub(usize::from(viewport_height))
    }

    /// Draw the rows starting `scroll` rows from the top into `area`.
    pub fn render(&self, area: Rect, buf: &mut Buffer, scroll: usize) {
        let top = scroll;
        let bottom = top + usize::from(area.height);
        let mut y = 0usize;

        for row in &self.rows {
            let height = row.height();
            let (start, end) = (y, y + height);
            y = end;
            if end <= top {
                continue;
            }
            if start >= bottom {
                break;
            }

            match row {
                Row::Text(line) => {
                    let screen_y = area.y + (start - top) as u16;
                    buf.set_line(area.x, screen_y, line, area.width);
                }
                Row::Chart { view, height } => {
                    blit_chart(view, *height, self.width.min(area.width), area, buf, start, top, bottom);
                }
            }
        }
    }
}

/// Render a chart off-screen and copy the rows inside the viewport.
#[allow(clippy::too_many_arguments)]
fn blit_chart(
    view: &ChartView,
    height: u16,
    width: u16,
    area: Rect,
    buf: &mut Buffer,
    start: usize,
    top: usize,
    bottom: usize,
) {
    let scratch_area = Rect::new(0, 0, width, height);
    let mut scratch = Buffer::empty(scratch_area);
    view.render(scratch_area, &mut scratch);

    for offset in 0..usize::from(height) {
        let row = start + offset;
        if row < top || row >= bottom {
            continue;
        }
        let screen_y = area.y + (row - top) as u16;
        for x in 0..width {
            let (Some(src), Some(dst)) = (
                scratch.cell((x, offset as u16)).cloned(),
                buf.cell_mut((area.x + x, screen_y)),
            ) else {
                continue;
            };
            *dst = src;
        }
    }
}

fn push_message(
    rows: &mut Vec<Row>,
    message: &Message,
    theme: &Theme,
    width: u16,
    options: TranscriptOptions,
) {
    let config = WrapConfig::new(usize::from(width));
    match message.role() {
        Role::User => {
            let text = format!("{USER_PREFIX}{}", message.text());
            for (index, line) in TextWrapper::wrap_lines(&text, &config).into_iter().enumerate() {
                let styled = match line.strip_prefix(USER_PREFIX) {
                    Some(rest) if index == 0 => Line::from(vec![
                        Span::styled(USER_PREFIX, theme.user_prefix_style),
                        Span::styled(rest.to_string(), theme.user_text_style),
                    ]),
                    _ => Line::from(Span::styled(line, theme.user_text_style)),
                };
                rows.push(Row::Text(styled));
            }
        }
        Role::Bot => {
            let prose = message.text().trim_end_matches(['\n', '\r']);
            if !prose.is_empty() {
                for line in TextWrapper::wrap_lines(prose, &config) {
                    rows.push(Row::Text(Line::from(Span::styled(line, theme.bot_text_style))));
                }
            }
            if let Some(request) = message.chart() {
                if options.charts_enabled {
                    if let Some(view) = charts::render(request, &theme.chart) {
                        let height = view.preferred_height(options.chart_height);
                        rows.push(Row::Chart { view, height });
                    }
                } else if request.kind.is_recognized() {
                    rows.push(Row::Text(Line::from(Span::styled(
                        format!("[chart: {}]", request.summary()),
                        theme.placeholder_style,
                    ))));
                }
            }
        }
        Role::Error => {
            for line in TextWrapper::wrap_lines(message.text(), &config) {
                rows.push(Row::Text(Line::from(Span::styled(line, theme.error_text_style))));
            }
        }
    }
    rows.push(Row::Text(Line::from("")));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::build_bot_message;

    const BAR_ANSWER: &str = "Sales are up.\n\nChart Data:{\"type\":\"bar\",\"data\":[{\"name\":\"Q1\",\"value\":10},{\"name\":\"Q2\",\"value\":20}]}";

    fn options(charts_enabled: bool) -> TranscriptOptions {
        TranscriptOptions {
            charts_enabled,
            chart_height: 12,
        }
    }

    fn screen(transcript: &Transcript, width: u16, height: u16, scroll: usize) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        transcript.render(area, &mut buf, scroll);
        (0..height)
            .map(|y| {
                (0..width)
                    .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn user_and_bot_text_rows() {
        let messages = [Message::user("hello"), build_bot_message("Hi there.")];
        let transcript = Transcript::build(&messages, &Theme::dark_default(), 40, options(true));
        assert_eq!(transcript.height(), 4);
        assert_eq!(screen(&transcript, 40, 4, 0), vec!["You: hello", "", "Hi there.", ""]);
    }

    #[test]
    fn chart_rows_follow_bot_prose() {
        let messages = [build_bot_message(BAR_ANSWER)];
        let transcript = Transcript::build(&messages, &Theme::dark_default(), 50, options(true));
        // prose, chart, spacer
        assert_eq!(transcript.height(), 1 + 12 + 1);

        let rows = screen(&transcript, 50, 14, 0);
        assert_eq!(rows[0], "Sales are up.");
        assert!(rows[1].starts_with('┌'));
        assert!(rows[1].contains("bar chart"));
    }

    #[test]
    fn disabled_charts_show_placeholder() {
        let messages = [build_bot_message(BAR_ANSWER)];
        let transcript = Transcript::build(&messages, &Theme::dark_default(), 50, options(false));
        assert_eq!(transcript.height(), 3);
        assert_eq!(screen(&transcript, 50, 3, 0)[1], "[chart: bar (2 points)]");
    }

    #[test]
    fn unrecognized_kind_renders_nothing_extra() {
        let raw = "Chart Data:{\"type\":\"scatter\",\"data\":[]}";
        let messages = [build_bot_message(raw)];
        let transcript = Transcript::build(&messages, &Theme::dark_default(), 40, options(true));
        assert_eq!(transcript.height(), 1);
    }

    #[test]
    fn scrolling_clips_partially_visible_charts() {
        let messages = [build_bot_message(BAR_ANSWER)];
        let transcript = Transcript::build(&messages, &Theme::dark_default(), 50, options(true));
        assert_eq!(transcript.max_scroll(5), 9);

        let rows = screen(&transcript, 50, 5, 9);
        // the last chart rows and the spacer
        assert!(rows[3].starts_with('└'));
        assert_eq!(rows[4], "");
    }

    #[test]
    fn scroll_range_is_not_capped_by_screen_coordinates() {
        let messages: Vec<Message> = (0..40_000).map(|i| Message::user(format!("q{i}"))).collect();
        let transcript = Transcript::build(&messages, &Theme::dark_default(), 40, options(true));
        assert_eq!(transcript.height(), 80_000);
        assert_eq!(transcript.max_scroll(10), 79_990);

        let rows = screen(&transcript, 40, 10, transcript.max_scroll(10));
        assert_eq!(rows[8], "You: q39999");
        assert_eq!(rows[9], "");
    }

    #[test]
    fn long_user_text_wraps() {
        let messages = [Message::user("one two three four")];
        let transcript = Transcript::build(&messages, &Theme::dark_default(), 10, options(true));
        assert_eq!(
            screen(&transcript, 10, 4, 0),
            vec!["You: one", "two three", "four", ""]
        );
    }
}
