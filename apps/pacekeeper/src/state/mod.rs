//! # State Module
//!
//! Runtime state for the study timer.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  global::controller() ──► Arc<ConfigController>  (one per process)     │
//! │                                  │                                      │
//! │          ┌───────────────────────┼──────────────────────┐               │
//! │          ▼                       ▼                      ▼               │
//! │  ┌───────────────┐   ┌─────────────────────┐   ┌────────────────┐      │
//! │  │ RuntimeState  │   │   SettingsStore     │   │   Database     │      │
//! │  │ Mutex<…>      │   │   Mutex<…>          │   │   (pool)       │      │
//! │  │ status        │   │   config.json       │   │ pacekeeper.db  │      │
//! │  │ is_running    │   │                     │   │                │      │
//! │  │ current_cycle │   │                     │   │                │      │
//! │  └───────────────┘   └─────────────────────┘   └────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod controller;
pub mod global;
mod settings;

pub use controller::{ConfigController, RuntimeState};
pub use settings::SettingsStore;
