//! # Core Application Logic
//!
//! This module contains Campus's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (session)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • project() (view)     │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │  ViewDescriptor
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │    Web     │      │    API     │
//!     │  Adapter   │      │  Adapter   │      │  (future)  │
//!     │ (ratatui)  │      │  (future)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`matcher`]: compares one answer with its canonical answer
//! - [`grader`]: grades a whole exercise set
//! - [`navigation`]: the course / level / section state machine
//! - [`content`]: course data and the resolver over an injected repository
//! - [`view`]: projects state + content + grading into a `ViewDescriptor`
//! - [`state`]: the `App` struct that owns the session
//! - [`action`]: the `Action` enum and `update()`
//! - [`config`]: settings file, env, and CLI resolution

pub mod action;
pub mod config;
pub mod content;
pub mod grader;
pub mod matcher;
pub mod navigation;
pub mod state;
pub mod view;
