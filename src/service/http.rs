//! HTTP client construction.

use anyhow::{Context, Result};
use rquest::Client;
use rquest_util::Emulation;
use std::time::Duration;

/// Detail fetches block on this; a hung fetch must not stall the whole run.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy)]
pub enum ClientType {
    Standard,
    HeavyEmulation,
}

/// Factory for creating an HTTP client based on the desired level of
/// stealth/performance. Listing sites block plain clients quickly, so the
/// pipeline defaults to heavy emulation.
pub fn create_client(client_type: ClientType) -> Result<Client> {
    let builder = Client::builder().timeout(FETCH_TIMEOUT);

    match client_type {
        ClientType::HeavyEmulation => builder
            .emulation(Emulation::Firefox136)
            .build()
            .context("Failed to build heavy impersonated rquest client"),
        ClientType::Standard => builder
            .build()
            .context("Failed to build standard rquest client"),
    }
}
