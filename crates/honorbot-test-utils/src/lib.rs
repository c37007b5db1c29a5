// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Honorbot integration tests.
//!
//! Provides mock adapters and helpers for fast, deterministic,
//! CI-runnable tests without a Telegram connection.
//!
//! # Components
//!
//! - [`MockChannel`] - Mock transport with event injection, send capture and
//!   scripted member statuses
//! - [`ManualClock`] - Clock that only moves when told to
//! - [`TempStore`] - SQLite store in a temporary directory

pub mod clock;
pub mod harness;
pub mod mock_channel;

pub use clock::ManualClock;
pub use harness::{TempStore, sample_event, sample_profile};
pub use mock_channel::{MockChannel, SentMessage};
