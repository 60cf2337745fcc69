//! Interactive chat loop: draws the UI, routes terminal input into [`App`]
//! and applies answers arriving from the request dispatcher.

pub mod lifecycle;

use std::error::Error;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tui_textarea::Input as TAInput;

use crate::core::answer_service::{AnswerEvent, AnswerService, RequestDispatcher, RequestParams};
use crate::core::app::{App, AppConfig};
use crate::ui::renderer::ui;
use lifecycle::{restore_terminal, setup_terminal, ChatTerminal};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const MOUSE_SCROLL_LINES: u16 = 3;

/// What the loop should do after a terminal event.
pub enum LoopAction {
    Continue,
    Quit,
    Send(RequestParams),
}

pub async fn run_chat(
    service: Arc<dyn AnswerService>,
    config: AppConfig,
) -> Result<(), Box<dyn Error>> {
    let mut app = App::new(service, config)?;
    let (dispatcher, mut rx) = RequestDispatcher::new();

    info!(api_url = %app.api_url, "starting chat session");
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, &dispatcher, &mut rx).await;

    app.cancel_request();
    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    terminal: &mut ChatTerminal,
    app: &mut App,
    dispatcher: &RequestDispatcher,
    rx: &mut mpsc::UnboundedReceiver<(AnswerEvent, u64)>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            match handle_terminal_event(app, event::read()?) {
                LoopAction::Quit => break,
                LoopAction::Send(params) => {
                    debug!(request_id = params.request_id, "dispatching question");
                    dispatcher.spawn_request(params);
                }
                LoopAction::Continue => {}
            }
        }

        while let Ok((answer, request_id)) = rx.try_recv() {
            app.handle_answer_event(answer, request_id);
        }
        app.expire_notice(Instant::now());

        if app.exit_requested {
            break;
        }
    }
    Ok(())
}

pub fn handle_terminal_event(app: &mut App, event: Event) -> LoopAction {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) => {
            match mouse.kind {
                MouseEventKind::ScrollUp => app.scroll_up(MOUSE_SCROLL_LINES),
                MouseEventKind::ScrollDown => app.scroll_down(MOUSE_SCROLL_LINES),
                _ => {}
            }
            LoopAction::Continue
        }
        Event::Paste(text) => {
            app.apply_input_edit(|ta| {
                ta.insert_str(text);
            });
            LoopAction::Continue
        }
        _ => LoopAction::Continue,
    }
}

fn handle_key(app: &mut App, key: KeyEvent) -> LoopAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.exit_requested = true;
            LoopAction::Quit
        }
        KeyCode::Esc => {
            if app.cancel_request() {
                debug!("request cancelled by user");
            }
            LoopAction::Continue
        }
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
            app.apply_input_edit(|ta| ta.insert_newline());
            LoopAction::Continue
        }
        KeyCode::Enter => match app.submit_input() {
            Some(params) => LoopAction::Send(params),
            None => LoopAction::Continue,
        },
        KeyCode::Up => {
            app.scroll_up(1);
            LoopAction::Continue
        }
        KeyCode::Down => {
            app.scroll_down(1);
            LoopAction::Continue
        }
        KeyCode::PageUp => {
            app.scroll_up(app.page_height());
            LoopAction::Continue
        }
        KeyCode::PageDown => {
            app.scroll_down(app.page_height());
            LoopAction::Continue
        }
        _ => {
            app.apply_input_edit(|ta| {
                ta.input(TAInput::from(key));
            });
            LoopAction::Continue
        }
    }
}
