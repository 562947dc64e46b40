//! # Actions
//!
//! Everything that can happen in Astro becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! A generate-ui round trip lands? That's `Action::GenerateDone(raw)`.
//!
//! The `update()` function takes the current state and an action and
//! mutates the state, returning an `Effect` for the I/O the caller must
//! perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  State' + Effect
//! ```
//!
//! This makes everything testable: feed actions, assert on state.

use log::{debug, warn};

use crate::core::directive::{Reply, parse_reply};
use crate::core::payload::{FactPayload, RenderPayload};
use crate::core::prompt::{CHAT_TRANSPORT_APOLOGY, GENERATION_ERROR_APOLOGY};
use crate::core::selector::select;
use crate::core::state::{App, Panel};
use crate::inference::{ContextSegment, Source};

#[derive(Debug)]
pub enum Action {
    /// User submitted the input line to the active panel.
    Submit(String),
    /// User toggled between the two panels.
    SwitchPanel,
    /// A streamed chat content fragment arrived.
    ResponseChunk(String),
    /// The chat stream finished.
    ResponseDone,
    /// The chat transport failed; payload is the technical detail.
    ChatFailed(String),
    /// A generate-ui round trip finished; payload is the raw envelope text.
    GenerateDone(String),
    /// The generate-ui transport failed; payload is the technical detail.
    GenerateFailed(String),
    Quit,
}

/// I/O the caller must perform after an update.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Spawn a streaming chat request for the chat panel's context.
    SpawnChat,
    /// Spawn a generate-ui request for the explorer panel's context.
    SpawnGenerate,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            let text = text.trim().to_string();
            if text.is_empty() {
                return Effect::None;
            }
            let panel = app.active_panel;
            if app.panel(panel).is_loading {
                debug!("Submit ignored: {panel:?} request already in flight");
                return Effect::None;
            }
            let state = app.panel_mut(panel);
            state.context.add_user_message(text);
            state.is_loading = true;
            match panel {
                Panel::Chat => {
                    app.status_message = String::from("Astro is thinking...");
                    Effect::SpawnChat
                }
                Panel::Explorer => {
                    app.status_message = String::from("Drawing up something cool...");
                    Effect::SpawnGenerate
                }
            }
        }

        Action::SwitchPanel => {
            app.active_panel = app.active_panel.other();
            app.status_message = format!("Switched to {}", app.active_panel.title());
            Effect::None
        }

        Action::ResponseChunk(text) => {
            app.chat.context.append_to_last_model_message(&text);
            Effect::None
        }

        Action::ResponseDone => {
            app.chat.is_loading = false;
            app.status_message = String::from("Ask me more!");
            Effect::None
        }

        Action::ChatFailed(detail) => {
            warn!("Chat transport failed: {detail}");
            app.chat.is_loading = false;
            // Never show the technical text; stay in character.
            app.chat.context.add(ContextSegment {
                source: Source::Model,
                content: CHAT_TRANSPORT_APOLOGY.to_string(),
            });
            app.status_message = String::from("Ask me more!");
            Effect::None
        }

        Action::GenerateDone(raw) => {
            app.explorer.is_loading = false;
            app.status_message = String::from("Here's what I found!");
            // Last write wins: a stale response still overwrites the slot.
            app.display = match parse_reply(&raw) {
                Reply::Directive(directive) => {
                    debug!("Parsed directive: {:?}", directive.component_type);
                    select(directive)
                }
                Reply::Fallback(message) => RenderPayload::Fact(FactPayload::with_text(message)),
            };
            Effect::None
        }

        Action::GenerateFailed(detail) => {
            warn!("Generate transport failed: {detail}");
            app.explorer.is_loading = false;
            app.display = RenderPayload::Fact(FactPayload::with_text(GENERATION_ERROR_APOLOGY));
            app.status_message = String::from("Let's try that again!");
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::selector::LEARNING_PLACEHOLDER;
    use crate::test_support::test_app;

    #[test]
    fn test_submit_on_chat_panel_spawns_chat() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit("Tell me about Mars".to_string()));
        assert_eq!(effect, Effect::SpawnChat);
        assert!(app.chat.is_loading);
        assert_eq!(app.chat.context.items.len(), 2);
        assert_eq!(app.chat.context.items[1].content, "Tell me about Mars");
    }

    #[test]
    fn test_submit_on_explorer_panel_spawns_generate() {
        let mut app = test_app();
        update(&mut app, Action::SwitchPanel);
        let effect = update(&mut app, Action::Submit("Show me Mars".to_string()));
        assert_eq!(effect, Effect::SpawnGenerate);
        assert!(app.explorer.is_loading);
        assert!(!app.chat.is_loading);
    }

    #[test]
    fn test_empty_submit_is_ignored() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit("   ".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.chat.context.items.len(), 1);
    }

    #[test]
    fn test_submit_while_loading_is_ignored() {
        let mut app = test_app();
        update(&mut app, Action::Submit("first".to_string()));
        let effect = update(&mut app, Action::Submit("second".to_string()));
        assert_eq!(effect, Effect::None);
        // Only the welcome + first question
        assert_eq!(app.chat.context.items.len(), 2);
    }

    #[test]
    fn test_switch_panel_toggles() {
        let mut app = test_app();
        assert_eq!(app.active_panel, crate::core::state::Panel::Chat);
        update(&mut app, Action::SwitchPanel);
        assert_eq!(app.active_panel, crate::core::state::Panel::Explorer);
        update(&mut app, Action::SwitchPanel);
        assert_eq!(app.active_panel, crate::core::state::Panel::Chat);
    }

    #[test]
    fn test_response_chunks_accumulate() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hi".to_string()));
        update(&mut app, Action::ResponseChunk("Hello ".to_string()));
        update(&mut app, Action::ResponseChunk("explorer!".to_string()));
        let last = app.chat.context.items.last().unwrap();
        assert_eq!(last.content, "Hello explorer!");
        update(&mut app, Action::ResponseDone);
        assert!(!app.chat.is_loading);
    }

    #[test]
    fn test_chat_failure_stays_in_character() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hi".to_string()));
        update(&mut app, Action::ChatFailed("connection refused".to_string()));
        assert!(!app.chat.is_loading);
        let last = app.chat.context.items.last().unwrap();
        assert_eq!(last.content, CHAT_TRANSPORT_APOLOGY);
        assert!(!last.content.contains("connection refused"));
    }

    #[test]
    fn test_generate_done_with_directive_updates_display() {
        let mut app = test_app();
        update(&mut app, Action::SwitchPanel);
        update(&mut app, Action::Submit("show mars".to_string()));
        let raw = r#"{"role":"assistant","content":"{\"componentType\":\"PlanetCard\",\"props\":{\"name\":\"Mars\"}}"}"#;
        update(&mut app, Action::GenerateDone(raw.to_string()));
        assert!(!app.explorer.is_loading);
        match &app.display {
            RenderPayload::Planet(card) => assert_eq!(card.name, "Mars"),
            other => panic!("expected planet card, got {:?}", other),
        }
    }

    #[test]
    fn test_generate_done_with_prose_shows_fallback_fact() {
        let mut app = test_app();
        update(
            &mut app,
            Action::GenerateDone("Mars is red because of iron oxide.".to_string()),
        );
        match &app.display {
            RenderPayload::Fact(fact) => {
                assert_eq!(fact.fact, "Mars is red because of iron oxide.")
            }
            other => panic!("expected fact, got {:?}", other),
        }
    }

    #[test]
    fn test_generate_done_overwrites_previous_display() {
        let mut app = test_app();
        let planet = r#"{"role":"assistant","content":"{\"componentType\":\"PlanetCard\",\"props\":{\"name\":\"Mars\"}}"}"#;
        update(&mut app, Action::GenerateDone(planet.to_string()));
        let unknown = r#"{"role":"assistant","content":"{\"componentType\":\"Nebula\",\"props\":{\"x\":1}}"}"#;
        update(&mut app, Action::GenerateDone(unknown.to_string()));
        match &app.display {
            RenderPayload::Fact(fact) => assert_eq!(fact.fact, LEARNING_PLACEHOLDER),
            other => panic!("expected fact, got {:?}", other),
        }
    }

    #[test]
    fn test_generate_failure_shows_error_fact() {
        let mut app = test_app();
        update(&mut app, Action::GenerateFailed("timeout".to_string()));
        match &app.display {
            RenderPayload::Fact(fact) => {
                assert_eq!(fact.fact, GENERATION_ERROR_APOLOGY);
                assert!(!fact.fact.contains("timeout"));
            }
            other => panic!("expected fact, got {:?}", other),
        }
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
