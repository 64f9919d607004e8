//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_api;

use std::time::Duration;

use stoqr_core::{ApiClient, ClientConfig, Item, ItemId, NewItem, WithdrawMethod};

/// Build a client pointed at `base` with a short timeout
pub fn client(base: &str) -> ApiClient {
    client_with(base, |_| {})
}

/// Build a client after tweaking the default test config
pub fn client_with(base: &str, tweak: impl FnOnce(&mut ClientConfig)) -> ApiClient {
    let mut config = ClientConfig {
        api_url: base.to_string(),
        timeout: Duration::from_millis(500),
        withdraw_method: WithdrawMethod::Get,
        ..Default::default()
    };
    tweak(&mut config);
    let config = config.validate().expect("invalid test config");
    ApiClient::new(&config).expect("failed to build client")
}

pub fn item(id: i64, name: &str, desired: u32, actual: u32) -> Item {
    NewItem::new(name, desired, actual).with_id(ItemId(id))
}
