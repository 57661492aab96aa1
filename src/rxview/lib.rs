//! # Rxview Architecture
//!
//! Rxview is a **UI-agnostic record view library** for regulatory-tracking
//! dashboards: OTC product registrations, the FDA verification portal and
//! workflow task queues. Every one of those pages shows the same thing, a
//! page of fetched records narrowed by a tab, a few single-select facets and a
//! search box, sorted by one column. This crate computes that view once, from
//! declarative configuration, instead of once per page.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (cli/, wired by main.rs)                               │
//! │  - Parses arguments, renders tables, owns stdout/stderr     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Holds the compiled definition and the current page       │
//! │  - Checks ids, dispatches to the engine                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (engine/)                                           │
//! │  - Pure functions of (records, FilterState, EngineConfig)   │
//! │  - No I/O, no clock, never fails                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Record Source (source/)                                    │
//! │  - RecordSource trait: JsonFileSource, InMemorySource       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Evaluation Is Pure
//!
//! Given the same records, state and config, the engine returns the same
//! view. Date-based tab rules compare against a reference time fixed when the
//! [`definition::ViewDefinition`] is compiled, not against a clock read
//! during evaluation. Misconfiguration is rejected at compile time; at
//! evaluation time malformed values simply don't match.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade over a record source
//! - [`engine`]: View computation, facet summaries, tab counts, pagination
//! - [`state`]: `FilterState` snapshots and the search debounce helper
//! - [`fields`]: Field, facet and tab specifications plus value coercion
//! - [`definition`]: Serializable view definitions and their validation
//! - [`presets`]: Built-in definitions for the dashboard pages
//! - [`model`]: Records, scalar values and the status taxonomy
//! - [`source`]: Record source abstraction and implementations
//! - [`config`], [`workspace`], [`commands`]: Settings and where they live
//! - [`error`]: Error types
//! - `cli`: Argument parsing and terminal rendering for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod definition;
pub mod engine;
pub mod error;
pub mod fields;
pub mod model;
pub mod presets;
pub mod source;
pub mod state;
pub mod workspace;
