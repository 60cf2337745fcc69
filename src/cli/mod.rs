//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod ask;
pub mod settings;

use std::error::Error;
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};
use tracing::info;

use crate::cli::ask::run_ask;
use crate::cli::settings::{run_set, run_unset};
use crate::core::answer_service::HttpAnswerService;
use crate::core::app::AppConfig;
use crate::core::config::Config;
use crate::ui::chat_loop::run_chat;
use crate::ui::theme::Theme;
use crate::utils::diagnostics;
use crate::utils::url::validate_api_url;

#[derive(Parser)]
#[command(name = "chartchat")]
#[command(version)]
#[command(about = "A terminal chat client that draws the charts embedded in answers")]
#[command(
    long_about = "chartchat is a full-screen terminal client for a question-answering service. \
Answers that end with a 'Chart Data:' descriptor are shown with a line, bar or pie chart \
beneath the prose.\n\n\
Environment Variables:\n\
  CHARTCHAT_API_URL Base URL of the answering service (overrides the config file)\n\
  RUST_LOG          Diagnostic log filter (overrides -v)\n\n\
Controls:\n\
  Type              Enter your question in the input field\n\
  Enter             Send the question\n\
  Alt+Enter         Insert a newline\n\
  Esc               Cancel the question in flight\n\
  Up/Down/Mouse     Scroll through the conversation\n\
  PgUp/PgDn         Scroll a page at a time\n\
  Ctrl+C            Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the answering service
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Append the conversation to the specified file
    #[arg(short = 'l', long, global = true)]
    pub log: Option<String>,

    /// Increase diagnostic verbosity (-v, -vv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Ask a single question and print the answer without the TUI
    Ask {
        /// The question to ask (can be multiple words)
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        question: Vec<String>,
    },
    /// Set configuration values, or print them when no value is given
    Set {
        /// Configuration key to set
        key: Option<String>,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    tokio::runtime::Runtime::new()?.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let log_path = diagnostics::setup_logging_for_terminal_ui(args.verbose);
            let config = load_config();
            let (api_url, service) = connect(&config, args.api_url.as_deref());
            if let Some(path) = log_path {
                info!(path = %path.display(), "diagnostics enabled");
            }

            let app_config = AppConfig {
                api_url,
                theme: Theme::from_name(config.theme_name()),
                charts_enabled: config.charts_enabled(),
                chart_height: config.chart_height(),
                log_file: args.log,
            };
            run_chat(Arc::new(service), app_config).await
        }
        Commands::Ask { question } => {
            diagnostics::setup_logging_to_stderr(args.verbose);
            let config = load_config();
            let (_, service) = connect(&config, args.api_url.as_deref());
            run_ask(question.join(" "), &config, Arc::new(service), args.log).await
        }
        Commands::Set { key, value } => {
            if let Err(err) = run_set(key, value) {
                err.print();
                std::process::exit(err.exit_code());
            }
            Ok(())
        }
        Commands::Unset { key } => {
            if let Err(err) = run_unset(key) {
                err.print();
                std::process::exit(err.exit_code());
            }
            Ok(())
        }
    }
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    }
}

/// Resolve the service URL and build the HTTP client, exiting on bad input.
fn connect(config: &Config, api_url_override: Option<&str>) -> (String, HttpAnswerService) {
    let api_url = match validate_api_url(&config.resolve_api_url(api_url_override)) {
        Ok(url) => url,
        Err(reason) => {
            eprintln!("❌ {reason}");
            std::process::exit(1);
        }
    };

    match HttpAnswerService::new(&api_url, config.request_timeout()) {
        Ok(service) => (api_url, service),
        Err(err) => {
            eprintln!("❌ Failed to initialize HTTP client: {err}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_chat() {
        let args = Args::try_parse_from(["chartchat"]).expect("parse");
        assert!(args.command.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn ask_collects_words_and_global_flags() {
        let args = Args::try_parse_from([
            "chartchat",
            "--api-url",
            "http://example.com",
            "-vv",
            "ask",
            "how",
            "are",
            "sales?",
        ])
        .expect("parse");

        assert_eq!(args.api_url.as_deref(), Some("http://example.com"));
        assert_eq!(args.verbose, 2);
        match args.command {
            Some(Commands::Ask { question }) => assert_eq!(question.join(" "), "how are sales?"),
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn ask_requires_a_question() {
        assert!(Args::try_parse_from(["chartchat", "ask"]).is_err());
    }

    #[test]
    fn set_without_key_is_allowed() {
        let args = Args::try_parse_from(["chartchat", "set"]).expect("parse");
        assert!(matches!(args.command, Some(Commands::Set { key: None, .. })));

        let args = Args::try_parse_from(["chartchat", "-l", "chat.log", "set", "charts", "off"])
            .expect("parse");
        assert_eq!(args.log.as_deref(), Some("chat.log"));
        match args.command {
            Some(Commands::Set { key, value }) => {
                assert_eq!(key.as_deref(), Some("charts"));
                assert_eq!(value, vec!["off".to_string()]);
            }
            _ => panic!("expected set"),
        }
    }
}
