// SPDX-FileCopyrightText: 2026 Honorbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait shared by the transport and the store.

use async_trait::async_trait;

use crate::error::HonorError;
use crate::types::HealthStatus;

/// Health reporting for every adapter.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, HonorError>;
}
