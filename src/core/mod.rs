//! # Core Application Logic
//!
//! Business state and transitions, with no knowledge of any UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                        ┌────────────┐
//!                        │    TUI     │
//!                        │  Adapter   │
//!                        │ (ratatui)  │
//!                        └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum — everything that can happen in the app
//! - [`config`]: File/env/CLI configuration with a clear override hierarchy

pub mod action;
pub mod config;
pub mod state;
