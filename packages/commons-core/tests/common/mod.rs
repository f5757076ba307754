//! Shared fixtures for the scenario tests.

#![allow(dead_code)]

use async_trait::async_trait;
use commons_core::{ClientConfig, CommunityView, RawResponse, Result, Transport};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub const BASE: &str = "http://backend.test";

/// Scripted backend. Each URL serves its queued responses in order after
/// the scripted delay; the last one repeats.
#[derive(Default)]
pub struct ScriptedBackend {
    routes: Mutex<HashMap<String, Vec<(Duration, u16, String)>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, url: impl Into<String>, delay_ms: u64, body: Value) {
        self.push(url.into(), delay_ms, 200, body.to_string());
    }

    pub fn reply_status(&self, url: impl Into<String>, delay_ms: u64, status: u16) {
        self.push(url.into(), delay_ms, status, String::new());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls().iter().filter(|call| call.as_str() == url).count()
    }

    fn push(&self, url: String, delay_ms: u64, status: u16, body: String) {
        self.routes
            .lock()
            .entry(url)
            .or_default()
            .push((Duration::from_millis(delay_ms), status, body));
    }

    fn next(&self, url: &str) -> Option<(Duration, u16, String)> {
        let mut routes = self.routes.lock();
        let queue = routes.get_mut(url)?;
        if queue.len() > 1 {
            Some(queue.remove(0))
        } else {
            queue.first().cloned()
        }
    }
}

#[async_trait]
impl Transport for ScriptedBackend {
    async fn get(&self, url: &str) -> Result<RawResponse> {
        self.calls.lock().push(url.to_string());
        let Some((delay, status, body)) = self.next(url) else {
            return Ok(RawResponse {
                status: 404,
                body: String::new(),
            });
        };
        tokio::time::sleep(delay).await;
        Ok(RawResponse { status, body })
    }
}

pub fn view(backend: &Arc<ScriptedBackend>) -> CommunityView {
    let config = ClientConfig::new(BASE).unwrap();
    CommunityView::new(&config, backend.clone())
}

pub fn members_url(id: &str) -> String {
    format!("{BASE}/api/community-members/{id}/")
}

pub fn discussions_url(id: &str) -> String {
    format!("{BASE}/api/discussions/?communaute_id={id}")
}

pub fn admins_url(id: &str) -> String {
    format!("{BASE}/api/community-admins/{id}/")
}

pub fn activity_url(id: &str) -> String {
    format!("{BASE}/api/recent-activities/?community_id={id}")
}

pub fn envelope(count: u64, next: Option<&str>, previous: Option<&str>, results: Vec<Value>) -> Value {
    json!({ "count": count, "next": next, "previous": previous, "results": results })
}

pub fn membership(pk: &str) -> Value {
    json!({
        "user": { "pkId": pk, "full_name": format!("Member {pk}") },
        "date_joined": "2024-03-01T09:00:00Z"
    })
}

pub fn discussion(pk: &str) -> Value {
    json!({
        "pkId": pk,
        "titre": format!("Discussion {pk}"),
        "date_creation": "2024-03-01T09:00:00Z",
        "commentCount": 3
    })
}

/// Serve healthy side channels for `id`.
pub fn script_side_channels(backend: &ScriptedBackend, id: &str) {
    backend.reply(
        admins_url(id),
        0,
        envelope(
            1,
            None,
            None,
            vec![json!({ "user": { "pkId": "admin-1", "full_name": "Awa Diallo" }, "role": "admin" })],
        ),
    );
    backend.reply(
        activity_url(id),
        0,
        json!([{ "user": "Awa Diallo", "action": "a publié", "discussion": "Bienvenue" }]),
    );
}
