//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Busy** (a request in flight): draws every ~80ms so the spinner and
//!   streaming text stay smooth.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.

pub mod component;
pub mod components;
mod event;
pub mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Panel};
use crate::inference::{ChatRequest, ChatTransport, MistralProvider, StreamChunk};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub input_buffer: String,
    pub chat_scroll: tui_scrollview::ScrollViewState,
    pub explorer_scroll: tui_scrollview::ScrollViewState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            input_buffer: String::new(),
            chat_scroll: tui_scrollview::ScrollViewState::default(),
            explorer_scroll: tui_scrollview::ScrollViewState::default(),
        }
    }

    fn scroll_for(&mut self, panel: Panel) -> &mut tui_scrollview::ScrollViewState {
        match panel {
            Panel::Chat => &mut self.chat_scroll,
            Panel::Explorer => &mut self.explorer_scroll,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Build the Mistral transport from a resolved config.
/// Fails when no API key is available from any source.
pub fn build_transport(config: &ResolvedConfig) -> Result<Arc<dyn ChatTransport>, String> {
    let api_key = config.mistral_api_key.clone().ok_or_else(|| {
        "Mistral API key must be set (MISTRAL_API_KEY env var or ~/.astro/config.toml)".to_string()
    })?;
    Ok(Arc::new(
        MistralProvider::new(api_key, Some(config.mistral_base_url.clone()))
            .with_persona(config.persona.clone()),
    ))
}

pub fn run(
    transport: Arc<dyn ChatTransport>,
    config: ResolvedConfig,
    initial_panel: Panel,
) -> std::io::Result<()> {
    let mut app = App::new(transport, &config);
    app.active_panel = initial_panel;
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let busy = app.chat.is_loading || app.explorer.is_loading;
        if busy {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when busy (~12fps), long when idle
        let timeout = if busy {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                // Resize just needs a redraw (already flagged above)
                TuiEvent::Resize => {}

                TuiEvent::Quit => {
                    if update(&mut app, Action::Quit) == Effect::Quit {
                        should_quit = true;
                    }
                }

                TuiEvent::SwitchPanel => {
                    update(&mut app, Action::SwitchPanel);
                }

                TuiEvent::InputChar(c) => tui.input_buffer.push(c),
                TuiEvent::Paste(data) => tui.input_buffer.push_str(&data),
                TuiEvent::Backspace => {
                    tui.input_buffer.pop();
                }

                TuiEvent::Submit => {
                    // The reducer re-checks is_loading; the buffer is only
                    // consumed when the submission is accepted.
                    if !app.active().is_loading {
                        let text = std::mem::take(&mut tui.input_buffer);
                        match update(&mut app, Action::Submit(text)) {
                            Effect::SpawnChat => spawn_chat(&app, tx.clone()),
                            Effect::SpawnGenerate => spawn_generate(&app, tx.clone()),
                            _ => {}
                        }
                    }
                }

                TuiEvent::ScrollUp => tui.scroll_for(app.active_panel).scroll_up(),
                TuiEvent::ScrollDown => tui.scroll_for(app.active_panel).scroll_down(),
                TuiEvent::ScrollPageUp => tui.scroll_for(app.active_panel).scroll_page_up(),
                TuiEvent::ScrollPageDown => tui.scroll_for(app.active_panel).scroll_page_down(),
                TuiEvent::ScrollToBottom => tui.scroll_for(app.active_panel).scroll_to_bottom(),
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (streamed chunks, finished rounds)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(&mut app, action) == Effect::Quit {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Spawns the streaming chat round trip: one provider task feeding a chunk
/// channel, one forwarding task translating chunks into actions.
fn spawn_chat(app: &App, tx: mpsc::Sender<Action>) {
    info!("Spawning chat request");

    // Clone what we need for the async tasks
    let transport = app.transport.clone();
    let context = app.chat.context.clone();
    let model = app.chat_model.clone();

    // Async channel for streaming chunks
    let (chunk_tx, mut chunk_rx) = tokio::sync::mpsc::channel::<StreamChunk>(100);

    let tx_stream = tx.clone();
    tokio::spawn(async move {
        let request = ChatRequest {
            context: &context,
            model: &model,
        };
        if let Err(e) = transport.stream_chat(request, chunk_tx).await {
            info!("Chat stream error: {}", e);
            if tx_stream.send(Action::ChatFailed(e.to_string())).is_err() {
                warn!("Failed to send ChatFailed action: receiver dropped");
            }
        }
    });

    // Forward chunks to the action channel
    tokio::spawn(async move {
        let mut forwarded = 0usize;
        while let Some(chunk) = chunk_rx.recv().await {
            match chunk {
                StreamChunk::Content(text) => {
                    forwarded += 1;
                    if tx.send(Action::ResponseChunk(text)).is_err() {
                        warn!("Failed to forward ResponseChunk: receiver dropped");
                        return;
                    }
                }
                StreamChunk::Completed => {
                    info!("Chat stream complete: {} chunks forwarded", forwarded);
                    if tx.send(Action::ResponseDone).is_err() {
                        warn!("Failed to send ResponseDone: receiver dropped");
                    }
                    return;
                }
            }
        }

        // Fallback: channel closed without a Completed marker
        info!("Chat stream channel closed: {} chunks forwarded", forwarded);
        if tx.send(Action::ResponseDone).is_err() {
            warn!("Failed to send ResponseDone: receiver dropped");
        }
    });
}

/// Spawns the generate-ui round trip: a single task, a single terminal
/// action either way.
fn spawn_generate(app: &App, tx: mpsc::Sender<Action>) {
    info!("Spawning generate-ui request");

    let transport = app.transport.clone();
    let context = app.explorer.context.clone();
    let model = app.ui_model.clone();

    tokio::spawn(async move {
        let request = ChatRequest {
            context: &context,
            model: &model,
        };
        let action = match transport.generate_ui(request).await {
            Ok(raw) => Action::GenerateDone(raw),
            Err(e) => Action::GenerateFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to send generate action: receiver dropped");
        }
    });
}
