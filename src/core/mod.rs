//! # Core Application Logic
//!
//! This module contains Astro's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • directive → payload  │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │ inference  │      │   config   │
//!     │  Adapter   │      │ (Mistral)  │      │  (~/.astro)│
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and reducer, everything that can happen
//! - [`directive`]: Parses a model response into a render instruction
//! - [`selector`]: Maps a directive onto one of the six render payloads
//! - [`payload`]: The typed payloads and their component defaults
//! - [`skymap`]: RA/Dec → plot-position math for the constellation map
//! - [`prompt`]: System prompts and canned in-character sentences
//! - [`config`]: TOML config loading and resolution

pub mod action;
pub mod config;
pub mod directive;
pub mod payload;
pub mod prompt;
pub mod selector;
pub mod skymap;
pub mod state;
