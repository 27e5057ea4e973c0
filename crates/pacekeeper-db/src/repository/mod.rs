//! # Repository Module
//!
//! Database repository implementations for PaceKeeper.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command layer                                                          │
//! │       │                                                                 │
//! │       │  db.sessions().record(AppStatus::Study, start, end, cycles)     │
//! │       ▼                                                                 │
//! │  SessionRepository                                                      │
//! │  ├── record(&self, status, started_at, ended_at, cycles)               │
//! │  ├── get_by_id(&self, id)                                               │
//! │  ├── recent(&self, limit)                                               │
//! │  ├── count(&self)                                                       │
//! │  └── total_duration_secs(&self, status)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SessionRepository`](session::SessionRepository) - Finished session records

pub mod session;
