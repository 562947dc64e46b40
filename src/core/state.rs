//! # Application State
//!
//! Core business state for Astro. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── transport: Arc<dyn ChatTransport>   // LLM transport
//! ├── chat: PanelState                    // "Ask Astro" panel
//! ├── explorer: PanelState                // "Visual Explorer" panel
//! ├── active_panel: Panel                 // which panel has the input
//! ├── display: RenderPayload              // the single display slot
//! ├── status_message: String              // status bar text
//! └── chat_model / ui_model: String       // per-panel model names
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::core::config::ResolvedConfig;
use crate::core::payload::RenderPayload;
use crate::core::prompt::{CHAT_WELCOME, EXPLORER_WELCOME};
use crate::inference::{ChatTransport, Context};

/// The two chat panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Chat,
    Explorer,
}

impl Panel {
    pub fn other(self) -> Panel {
        match self {
            Panel::Chat => Panel::Explorer,
            Panel::Explorer => Panel::Chat,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Panel::Chat => "Ask Astro",
            Panel::Explorer => "Visual Explorer",
        }
    }
}

/// Per-panel conversation state. At most one request is in flight per panel;
/// submission is disabled while `is_loading` holds.
pub struct PanelState {
    pub context: Context,
    pub is_loading: bool,
}

impl PanelState {
    fn with_welcome(welcome: &str) -> Self {
        PanelState {
            context: Context::with_welcome(welcome),
            is_loading: false,
        }
    }
}

pub struct App {
    pub transport: Arc<dyn ChatTransport>,
    pub chat: PanelState,
    pub explorer: PanelState,
    pub active_panel: Panel,
    /// The one display slot. Overwritten whole on every completed
    /// generate round trip. Last write wins, no merging.
    pub display: RenderPayload,
    pub status_message: String,
    pub chat_model: String,
    pub ui_model: String,
}

impl App {
    pub fn new(transport: Arc<dyn ChatTransport>, config: &ResolvedConfig) -> Self {
        Self {
            transport,
            chat: PanelState::with_welcome(CHAT_WELCOME),
            explorer: PanelState::with_welcome(EXPLORER_WELCOME),
            active_panel: Panel::default(),
            display: RenderPayload::default(),
            status_message: String::from("Welcome, space explorer! Tab switches panels."),
            chat_model: config.chat_model.clone(),
            ui_model: config.ui_model.clone(),
        }
    }

    pub fn panel(&self, panel: Panel) -> &PanelState {
        match panel {
            Panel::Chat => &self.chat,
            Panel::Explorer => &self.explorer,
        }
    }

    pub fn panel_mut(&mut self, panel: Panel) -> &mut PanelState {
        match panel {
            Panel::Chat => &mut self.chat,
            Panel::Explorer => &mut self.explorer,
        }
    }

    /// The panel currently receiving input.
    pub fn active(&self) -> &PanelState {
        self.panel(self.active_panel)
    }
}
