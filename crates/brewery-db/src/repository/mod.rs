//! # Repository Module
//!
//! SQLite adapters for the store ports.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  BeerService                                                           │
//! │       │                                                                 │
//! │       │  store.scan(&criteria, offset, limit)                          │
//! │       ▼                                                                 │
//! │  BeerStore (port, store.rs)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BeerRepository                                                        │
//! │  ├── find_by_id / find_by_upc                                          │
//! │  ├── scan / count                                                      │
//! │  └── insert / replace / delete                                         │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`beer::BeerRepository`] - Beer catalog reads and writes

pub mod beer;
