//! TUI-less "ask" command

use std::error::Error;
use std::sync::Arc;

use ratatui::crossterm::terminal;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::core::answer_service::{
    new_conversation_id, AnswerEvent, AnswerService, RequestDispatcher, RequestParams,
};
use crate::core::config::Config;
use crate::core::message::{build_bot_message, Message, REQUEST_FAILED_TEXT};
use crate::ui::charts::{self, ChartStyle};
use crate::utils::logging::LoggingState;

const MAX_CHART_WIDTH: u16 = 100;
const FALLBACK_WIDTH: u16 = 80;

pub async fn run_ask(
    question: String,
    config: &Config,
    service: Arc<dyn AnswerService>,
    log_file: Option<String>,
) -> Result<(), Box<dyn Error>> {
    if question.trim().is_empty() {
        eprintln!("Usage: chartchat ask <question>");
        std::process::exit(1);
    }

    let logging = LoggingState::new(log_file)?;
    log_or_warn(&logging, &Message::user(question.clone()));

    let (dispatcher, mut rx) = RequestDispatcher::new();
    dispatcher.spawn_request(RequestParams {
        service,
        question,
        conversation_id: new_conversation_id(),
        cancel_token: CancellationToken::new(),
        request_id: 1,
    });

    match rx.recv().await {
        Some((AnswerEvent::Answer(raw), _)) => {
            let message = build_bot_message(&raw);
            log_or_warn(&logging, &message);

            let width = terminal::size()
                .map(|(w, _)| w)
                .unwrap_or(FALLBACK_WIDTH)
                .min(MAX_CHART_WIDTH);
            for line in format_answer(&message, config, width) {
                println!("{line}");
            }
            Ok(())
        }
        Some((AnswerEvent::Failed(err), _)) => {
            eprintln!("❌ {REQUEST_FAILED_TEXT}");
            eprintln!("   {err}");
            std::process::exit(1);
        }
        None => Ok(()),
    }
}

/// Plain-text rendering of a bot message: prose, then the chart drawn at
/// `width` columns.
pub fn format_answer(message: &Message, config: &Config, width: u16) -> Vec<String> {
    let mut lines: Vec<String> = message
        .text()
        .trim_end()
        .lines()
        .map(str::to_string)
        .collect();

    let Some(request) = message.chart() else {
        return lines;
    };
    if !config.charts_enabled() {
        if request.kind.is_recognized() {
            lines.push(format!("[chart: {}]", request.summary()));
        }
        return lines;
    }
    if let Some(view) = charts::render(request, &ChartStyle::default()) {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        let height = view.preferred_height(config.chart_height());
        lines.extend(charts::render_to_lines(&view, width, height));
    }
    lines
}

fn log_or_warn(logging: &LoggingState, message: &Message) {
    if let Err(err) = logging.log_chat_message(message) {
        warn!(error = %err, "failed to write transcript log");
    }
}
