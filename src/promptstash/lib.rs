//! # PromptStash Architecture
//!
//! PromptStash is a small library for keeping reusable text prompts: store
//! them, tag them, search and sort them, and edit them with validation and
//! autosave. The `promptstash` binary is one client of it; nothing below the
//! manager knows about terminals.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Parses arguments, formats output, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Manager (manager.rs, autosave.rs)                          │
//! │  - Holds AppState, dispatches actions through the reducer   │
//! │  - REQUEST → SUCCESS | FAILURE around every async call      │
//! │  - Drops superseded completions, debounces autosave         │
//! └─────────────────────────────────────────────────────────────┘
//!            │                                   │
//!            ▼                                   ▼
//! ┌───────────────────────────┐   ┌─────────────────────────────┐
//! │  State (state/)           │   │  Service (service.rs)       │
//! │  - Pure reducer           │   │  - Simulated latency        │
//! │  - Editor sub-machine     │   │  - ApiResponse envelopes    │
//! └───────────────────────────┘   └─────────────────────────────┘
//!                                                │
//!                                                ▼
//!                                 ┌─────────────────────────────┐
//!                                 │  Storage (store/)           │
//!                                 │  - RecordStore over a       │
//!                                 │    KvBackend (fs or memory) │
//!                                 └─────────────────────────────┘
//! ```
//!
//! The [`catalog`] sits beside the state: it turns the stored list plus a
//! [`catalog::BrowseState`] into the filtered, sorted list a view shows.
//!
//! ## Failure Handling
//!
//! Storage errors stop at the service, which answers with a
//! `success: false` envelope. The manager turns every failed envelope into
//! a FAILURE action, so failures end up as strings in [`state::AppState`]
//! instead of unwinding through callers.
//!
//! ## Module Overview
//!
//! - [`manager`]: The entry point for UIs
//! - [`state`]: `AppState`, actions and the reducer
//! - [`catalog`]: Search, tag filter and sort pipeline
//! - [`service`]: Async record service with response envelopes
//! - [`store`]: Record store and key-value backends
//! - [`model`]: `Prompt` and `PromptDraft`
//! - [`config`]: `config.json` handling
//! - [`autosave`]: Debounce timer used by the manager
//! - [`error`]: Error types

pub mod autosave;
pub mod catalog;
pub mod config;
pub mod error;
pub mod manager;
pub mod model;
pub mod service;
pub mod state;
pub mod store;
