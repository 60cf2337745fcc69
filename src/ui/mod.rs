//! Terminal UI layer for interactive chat sessions.
//!
//! - [`chat_loop`]: the interaction loop feeding terminal input into
//!   [`crate::core::app::App`] and dispatching questions.
//! - [`renderer`] and [`transcript`]: frame composition and message layout.
//! - [`charts`]: the chart dispatcher and its widgets.
//! - [`theme`]: color and style policy.

pub mod charts;
pub mod chat_loop;
pub mod renderer;
pub mod theme;
pub mod transcript;
