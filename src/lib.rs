//! chartchat is a terminal client for a question-answering service whose
//! answers may carry an embedded chart.
//!
//! - [`core`] owns the answer pipeline: [`core::chart`] extracts and parses
//!   the `Chart Data:` descriptor, [`core::message`] turns a raw answer into
//!   a message record, and [`core::answer_service`] talks to the service.
//! - [`ui`] renders the transcript, dispatches chart requests to widgets and
//!   runs the interactive loop.
//! - [`api`] defines the wire payloads of the answering service.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
