//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Two patterns, as in the rest of the codebase:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive everything as props and render it:
//! - `NavBar`: the navigation shell row (frame-level `Component`)
//! - `Hero`, `ScannerPanel`, `AssistantPanel`, `ChatBubble`: page sections
//!   rendered inside the scroll view, so they implement `Widget`
//!
//! ### Stateful Components (Event-Driven)
//!
//! Own local presentation state and emit events:
//! - `InputBox`: single-line chat input, emits `InputEvent`
//! - `DashboardState`: the animated counters behind `DashboardPanel`
//!
//! Data flows in as props; nothing here reaches into global state. The chat
//! log, prediction set, and scan counter all arrive from `App` by reference.

pub mod assistant;
pub mod dashboard;
pub mod hero;
pub mod input_box;
pub mod message;
pub mod nav_bar;
pub mod scanner;

pub use assistant::AssistantPanel;
pub use dashboard::{DashboardPanel, DashboardState};
pub use hero::Hero;
pub use input_box::{InputBox, InputEvent};
pub use nav_bar::{NavBar, SectionBounds, SectionId};
