use chrono::{DateTime, Local};
use tracing::debug;

use crate::core::chart::{self, ChartRequest};

/// Text shown in the transcript when a question could not be answered.
pub const REQUEST_FAILED_TEXT: &str = "Sorry, there was an error processing your request.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Bot,
    Error,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bot => "bot",
            Role::Error => "error",
        }
    }

    pub fn is_user(self) -> bool {
        self == Role::User
    }

    pub fn is_bot(self) -> bool {
        self == Role::Bot
    }

    pub fn is_error(self) -> bool {
        self == Role::Error
    }
}

/// A display unit in the transcript. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    role: Role,
    text: String,
    chart: Option<ChartRequest>,
    created_at: DateTime<Local>,
}

impl Message {
    fn new(role: Role, text: impl Into<String>, chart: Option<ChartRequest>) -> Self {
        Self {
            role,
            text: text.into(),
            chart,
            created_at: Local::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text, None)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Role::Error, text, None)
    }

    pub fn request_failed() -> Self {
        Self::error(REQUEST_FAILED_TEXT)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn chart(&self) -> Option<&ChartRequest> {
        self.chart.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn is_user(&self) -> bool {
        self.role.is_user()
    }

    pub fn is_bot(&self) -> bool {
        self.role.is_bot()
    }

    pub fn is_error(&self) -> bool {
        self.role.is_error()
    }
}

/// Build the bot message for a raw answer.
///
/// Never fails: a missing or broken descriptor only means the message has
/// no chart. When a descriptor was found, the text is the prose before the
/// sentinel regardless of whether the descriptor parsed.
pub fn build_bot_message(raw: &str) -> Message {
    let extraction = chart::extract(raw);
    let Some(block) = extraction.block else {
        return Message::new(Role::Bot, raw, None);
    };

    let chart = match chart::parse(&block) {
        Ok(request) => {
            debug!(kind = request.kind.as_str(), points = request.len(), "chart descriptor parsed");
            Some(request)
        }
        Err(err) => {
            debug!(error = %err, "dropping chart descriptor");
            None
        }
    };

    Message::new(Role::Bot, extraction.prose, chart)
}
