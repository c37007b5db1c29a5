// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules for each collection.

pub mod chats;
pub mod users;
