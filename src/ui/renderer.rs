use std::time::Instant;

use crate::core::app::App;
use crate::ui::transcript::{Transcript, TranscriptOptions};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const INPUT_HEIGHT: u16 = 3;

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background_color)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(INPUT_HEIGHT),
        ])
        .split(area);

    render_title(f, app, chunks[0]);
    render_transcript(f, app, chunks[1]);
    render_input(f, app, chunks[2]);
}

fn render_title(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(
            "chartchat v{} - {} • Logging: {}",
            env!("CARGO_PKG_VERSION"),
            app.api_url,
            app.get_logging_status()
        ),
        app.theme.title_style,
    )];
    if let Some(notice) = app.active_notice(Instant::now()) {
        spans.push(Span::styled(" • ", app.theme.title_style));
        spans.push(Span::styled(notice.to_string(), app.theme.notice_style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_transcript(f: &mut Frame, app: &mut App, area: Rect) {
    let transcript = Transcript::build(
        &app.messages,
        &app.theme,
        area.width,
        TranscriptOptions {
            charts_enabled: app.charts_enabled,
            chart_height: app.chart_height,
        },
    );

    app.viewport_height = area.height;
    app.max_scroll = transcript.max_scroll(area.height);
    let scroll = app.scroll_position(app.max_scroll);

    transcript.render(area, f.buffer_mut(), scroll);
}

fn render_input(f: &mut Frame, app: &mut App, area: Rect) {
    let title = if app.is_loading {
        "Waiting for answer (Esc to cancel, Ctrl+C to quit)"
    } else {
        "Ask a question (Enter to send, Ctrl+C to quit)"
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.input_border_style)
        .title(Span::styled(title, app.theme.input_title_style));

    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(app.input(), inner);

    if app.is_loading && inner.width > 2 {
        let indicator = Rect::new(inner.right().saturating_sub(2), inner.y, 1, 1);
        f.render_widget(
            Paragraph::new(Span::styled(
                pulse_symbol(app.pulse_start),
                app.theme.loading_indicator_style,
            )),
            indicator,
        );
    }
}

/// Pulsing loading indicator, two cycles per second.
fn pulse_symbol(start: Instant) -> &'static str {
    let elapsed = start.elapsed().as_millis() as f32 / 1000.0;
    let pulse_phase = (elapsed * 2.0) % 2.0;
    let pulse_intensity = if pulse_phase < 1.0 {
        pulse_phase
    } else {
        2.0 - pulse_phase
    };

    if pulse_intensity < 0.33 {
        "○"
    } else if pulse_intensity < 0.66 {
        "◐"
    } else {
        "●"
    }
}
