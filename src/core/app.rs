//! Interactive session state.
//!
//! [`App`] owns the conversation, the input box, the in-flight request and
//! the transient UI state (notice, scroll position). It is driven by the
//! chat loop but contains no terminal I/O, so its transitions are tested
//! directly.

use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::style::Style;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use tui_textarea::TextArea;

use crate::core::answer_service::{new_conversation_id, AnswerEvent, AnswerService, RequestParams};
use crate::core::conversation::MessageLog;
use crate::core::message::{build_bot_message, Message};
use crate::ui::theme::Theme;
use crate::utils::logging::LoggingState;

/// Notice shown when the answering service cannot be reached.
pub const REQUEST_FAILED_NOTICE: &str = "Failed to get response from the server";
pub const NOTICE_DURATION: Duration = Duration::from_secs(5);

const INPUT_PLACEHOLDER: &str = "Ask a question about your data...";

pub struct AppConfig {
    pub api_url: String,
    pub theme: Theme,
    pub charts_enabled: bool,
    pub chart_height: u16,
    pub log_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub expires_at: Instant,
}

pub struct App {
    pub messages: MessageLog,
    pub theme: Theme,
    pub api_url: String,
    pub charts_enabled: bool,
    pub chart_height: u16,
    pub is_loading: bool,
    pub pulse_start: Instant,
    pub exit_requested: bool,
    /// Rows the transcript can scroll through, as of the last draw.
    pub max_scroll: usize,
    /// Transcript viewport height, as of the last draw.
    pub viewport_height: u16,
    input: TextArea<'static>,
    service: Arc<dyn AnswerService>,
    current_request_id: u64,
    cancel_token: Option<CancellationToken>,
    notice: Option<Notice>,
    scroll_offset: usize,
    auto_scroll: bool,
    logging: LoggingState,
}

impl App {
    pub fn new(
        service: Arc<dyn AnswerService>,
        config: AppConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let logging = LoggingState::new(config.log_file)?;
        let input = new_input(&config.theme);

        Ok(App {
            messages: MessageLog::new(),
            theme: config.theme,
            api_url: config.api_url,
            charts_enabled: config.charts_enabled,
            chart_height: config.chart_height,
            is_loading: false,
            pulse_start: Instant::now(),
            exit_requested: false,
            max_scroll: 0,
            viewport_height: 0,
            input,
            service,
            current_request_id: 0,
            cancel_token: None,
            notice: None,
            scroll_offset: 0,
            auto_scroll: true,
            logging,
        })
    }

    pub fn input(&self) -> &TextArea<'static> {
        &self.input
    }

    pub fn apply_input_edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut TextArea<'static>),
    {
        f(&mut self.input);
    }

    pub fn input_text(&self) -> String {
        self.input.lines().join("\n")
    }

    pub fn clear_input(&mut self) {
        self.input = new_input(&self.theme);
    }

    /// Submit the current input as a question.
    ///
    /// Returns the parameters for the request to dispatch, or `None` when the
    /// input is blank or a request is already in flight.
    pub fn submit_input(&mut self) -> Option<RequestParams> {
        if self.is_loading {
            return None;
        }
        let question = self.input_text();
        if question.trim().is_empty() {
            return None;
        }
        self.clear_input();
        Some(self.begin_request(question))
    }

    fn begin_request(&mut self, question: String) -> RequestParams {
        let message = Message::user(question.clone());
        self.record(message);

        self.current_request_id = self.current_request_id.wrapping_add(1);
        let cancel_token = CancellationToken::new();
        self.cancel_token = Some(cancel_token.clone());
        self.is_loading = true;
        self.pulse_start = Instant::now();
        self.auto_scroll = true;

        RequestParams {
            service: Arc::clone(&self.service),
            question,
            conversation_id: new_conversation_id(),
            cancel_token,
            request_id: self.current_request_id,
        }
    }

    /// Apply a dispatcher event. Events for superseded or cancelled requests
    /// are dropped; returns whether the event was applied.
    pub fn handle_answer_event(&mut self, event: AnswerEvent, request_id: u64) -> bool {
        if !self.is_loading || request_id != self.current_request_id {
            debug!(request_id, "ignoring stale answer event");
            return false;
        }
        self.is_loading = false;
        self.cancel_token = None;

        match event {
            AnswerEvent::Answer(raw) => {
                let message = build_bot_message(&raw);
                self.record(message);
            }
            AnswerEvent::Failed(_) => {
                self.record(Message::request_failed());
                self.show_notice(REQUEST_FAILED_NOTICE, Instant::now());
            }
        }
        true
    }

    /// Cancel the in-flight request, if any. No partial message is kept.
    pub fn cancel_request(&mut self) -> bool {
        let Some(token) = self.cancel_token.take() else {
            return false;
        };
        token.cancel();
        self.is_loading = false;
        self.current_request_id = self.current_request_id.wrapping_add(1);
        true
    }

    fn record(&mut self, message: Message) {
        if let Err(err) = self.logging.log_chat_message(&message) {
            warn!(error = %err, "failed to write transcript log");
        }
        self.messages.push(message);
    }

    pub fn show_notice(&mut self, text: &str, now: Instant) {
        self.notice = Some(Notice {
            text: text.to_string(),
            expires_at: now + NOTICE_DURATION,
        });
    }

    pub fn active_notice(&self, now: Instant) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|notice| now < notice.expires_at)
            .map(|notice| notice.text.as_str())
    }

    /// Drop an expired notice; returns true when the screen needs a redraw.
    pub fn expire_notice(&mut self, now: Instant) -> bool {
        match &self.notice {
            Some(notice) if now >= notice.expires_at => {
                self.notice = None;
                true
            }
            _ => false,
        }
    }

    pub fn get_logging_status(&self) -> String {
        self.logging.get_status_string()
    }

    /// Top row of the transcript viewport for the given scroll range.
    pub fn scroll_position(&self, max_scroll: usize) -> usize {
        if self.auto_scroll {
            max_scroll
        } else {
            self.scroll_offset.min(max_scroll)
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        let current = self.scroll_position(self.max_scroll);
        self.scroll_offset = current.saturating_sub(usize::from(lines));
        self.auto_scroll = false;
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let current = self.scroll_position(self.max_scroll);
        self.scroll_offset = current
            .saturating_add(usize::from(lines))
            .min(self.max_scroll);
        // Back at the bottom: follow new messages again
        if self.scroll_offset >= self.max_scroll {
            self.auto_scroll = true;
        }
    }

    pub fn is_following(&self) -> bool {
        self.auto_scroll
    }

    pub fn page_height(&self) -> u16 {
        self.viewport_height.saturating_sub(1).max(1)
    }
}

fn new_input(theme: &Theme) -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_placeholder_text(INPUT_PLACEHOLDER);
    input.set_placeholder_style(theme.placeholder_style);
    input.set_style(theme.input_text_style);
    input.set_cursor_line_style(Style::default());
    input
}
