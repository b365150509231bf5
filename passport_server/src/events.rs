//! Forwards registration events to the message broker bridge.
//!
//! The bridge is any HTTP endpoint that accepts `{"topic", "key", "value"}` records. Delivery is best-effort:
//! failures are logged and never reach the registering client.
use std::{future::Future, pin::Pin};

use log::*;
use msg_engine::events::{EventHooks, UserRegisteredEvent};
use serde::Serialize;

use crate::config::EventsConfig;

#[derive(Debug, Serialize)]
pub struct BrokerRecord<'a> {
    pub topic: &'a str,
    pub key: &'a str,
    pub value: &'a UserRegisteredEvent,
}

pub fn registration_hooks(config: &EventsConfig) -> EventHooks {
    let mut hooks = EventHooks::default();
    let client = reqwest::Client::new();
    let url = config.url.clone();
    let topic = config.topic.clone();
    hooks.on_user_registered(move |ev| {
        let client = client.clone();
        let url = url.clone();
        let topic = topic.clone();
        Box::pin(async move {
            match url {
                Some(url) => publish(&client, &url, &topic, &ev).await,
                None => info!("📬️ [{topic}] {} registered as {}", ev.login, ev.user_id),
            }
        }) as Pin<Box<dyn Future<Output = ()> + Send>>
    });
    hooks
}

async fn publish(client: &reqwest::Client, url: &str, topic: &str, ev: &UserRegisteredEvent) {
    let record = BrokerRecord { topic, key: &ev.user_id, value: ev };
    match client.post(url).json(&record).send().await.and_then(|r| r.error_for_status()) {
        Ok(_) => debug!("📬️ Registration of {} published to {topic}", ev.user_id),
        Err(e) => warn!("📬️ Could not publish registration of {} to {topic}. {e}", ev.user_id),
    }
}
