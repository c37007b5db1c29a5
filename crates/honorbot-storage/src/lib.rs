// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite document store for Honorbot.
//!
//! Two collections, `users` and `chats`, live in one WAL-mode SQLite file
//! with embedded migrations. Every statement runs on the single background
//! thread owned by `tokio-rusqlite`.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
