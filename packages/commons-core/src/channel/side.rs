//! # Side Channels
//!
//! Channels keyed by community identity alone: the administrators roster
//! and the recent-activity feed. They never look at the selected tab.
//!
//! Loading the same community twice is a no-op; loading a different one
//! clears the previous result immediately and fetches again. An explicit
//! [`refresh`](SideChannel::refresh) re-fetches the current community.

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::Completion;
use crate::config::{ClientConfig, Endpoints};
use crate::envelope::{decode_list, PaginationEnvelope};
use crate::error::{Error, Result};
use crate::fetch::{FetchState, FetchStatus};
use crate::generation::{Generation, GenerationClock};
use crate::model::{Activity, CommunityRef, Member};
use crate::transport::Transport;

/// A resource served by a side channel.
pub trait SideResource: Send + Sync + 'static {
    /// Decoded item type.
    type Item: DeserializeOwned + Serialize + Clone + PartialEq + fmt::Debug + Send + Sync;

    /// Channel name used in logs.
    const NAME: &'static str;

    /// URL to fetch for `community`.
    fn url(endpoints: &Endpoints, community: &CommunityRef) -> String;

    /// Decode a successful response body.
    fn decode(body: &str) -> Result<Vec<Self::Item>>;
}

/// Administrators and moderators of the community (first envelope page).
#[derive(Debug, Clone, Copy, Default)]
pub struct Admins;

impl SideResource for Admins {
    type Item = Member;
    const NAME: &'static str = "admins";

    fn url(endpoints: &Endpoints, community: &CommunityRef) -> String {
        endpoints.admins(community)
    }

    fn decode(body: &str) -> Result<Vec<Member>> {
        PaginationEnvelope::<Member>::decode_str(body).map(|page| page.results)
    }
}

/// Recent activity in the community (plain array, no envelope).
#[derive(Debug, Clone, Copy, Default)]
pub struct RecentActivity;

impl SideResource for RecentActivity {
    type Item = Activity;
    const NAME: &'static str = "activity";

    fn url(endpoints: &Endpoints, community: &CommunityRef) -> String {
        endpoints.recent_activity(community)
    }

    fn decode(body: &str) -> Result<Vec<Activity>> {
        decode_list(body)
    }
}

struct SideInner<T> {
    community: Option<CommunityRef>,
    fetch: FetchState<Vec<T>>,
}

/// Immutable copy of a side channel's state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideSnapshot<T> {
    /// Community the data belongs to
    pub community: Option<CommunityRef>,
    /// Lifecycle
    pub fetch: FetchState<Vec<T>>,
    /// Latest generation
    pub generation: Generation,
}

/// Identity-keyed channel for one [`SideResource`].
pub struct SideChannel<R: SideResource> {
    endpoints: Endpoints,
    transport: Arc<dyn Transport>,
    clock: GenerationClock,
    state: RwLock<SideInner<R::Item>>,
    _resource: PhantomData<R>,
}

impl<R: SideResource> SideChannel<R> {
    /// Create an idle channel.
    pub fn new(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            endpoints: config.endpoints(),
            transport,
            clock: GenerationClock::new(),
            state: RwLock::new(SideInner {
                community: None,
                fetch: FetchState::idle(),
            }),
            _resource: PhantomData,
        }
    }

    /// Load data for `community`.
    ///
    /// Returns [`Completion::Unchanged`] without a request when the channel
    /// is already keyed to that community and is loading or loaded. A
    /// channel whose last request for that community failed retries,
    /// keeping whatever data it still holds.
    pub async fn load(&self, community: &CommunityRef) -> Completion {
        let (issued, url) = {
            let mut inner = self.state.write();
            let issued = if inner.community.as_ref() == Some(community) {
                if !inner.fetch.is_error() {
                    tracing::trace!(channel = R::NAME, community = %community, "already loaded");
                    return Completion::Unchanged;
                }

                tracing::info!(channel = R::NAME, community = %community, "retrying after failure");
                let issued = self.clock.advance();
                let previous = std::mem::take(&mut inner.fetch).into_data();
                inner.fetch = FetchState::reloading(previous);
                issued
            } else {
                tracing::info!(
                    channel = R::NAME,
                    from = ?inner.community.as_ref().map(CommunityRef::as_str),
                    to = %community,
                    "switching community"
                );
                let issued = self.clock.advance();
                inner.community = Some(community.clone());
                inner.fetch = FetchState::loading();
                issued
            };
            (issued, R::url(&self.endpoints, community))
        };

        self.run(issued, url).await
    }

    /// Re-fetch the current community, keeping the current data visible
    /// until the response lands.
    pub async fn refresh(&self) -> Result<Completion> {
        let (issued, url) = {
            let mut inner = self.state.write();
            let community = inner.community.clone().ok_or(Error::NoCommunity)?;
            let issued = self.clock.advance();
            let current = std::mem::take(&mut inner.fetch).into_data();
            inner.fetch = FetchState::reloading(current);
            (issued, R::url(&self.endpoints, &community))
        };

        Ok(self.run(issued, url).await)
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SideSnapshot<R::Item> {
        let inner = self.state.read();
        SideSnapshot {
            community: inner.community.clone(),
            fetch: inner.fetch.clone(),
            generation: self.clock.current(),
        }
    }

    /// Current lifecycle status.
    pub fn status(&self) -> FetchStatus {
        self.state.read().fetch.status()
    }

    async fn run(&self, issued: Generation, url: String) -> Completion {
        tracing::debug!(channel = R::NAME, generation = %issued, url = %url, "issuing request");
        let outcome = self.fetch(&url).await;

        let mut inner = self.state.write();
        if !self.clock.is_current(issued) {
            tracing::debug!(
                channel = R::NAME,
                issued = %issued,
                current = %self.clock.current(),
                "discarding stale response"
            );
            return Completion::Stale;
        }

        match outcome {
            Ok(items) => {
                inner.fetch = FetchState::success(items);
            }
            Err(error) => {
                tracing::warn!(channel = R::NAME, generation = %issued, error = %error, "request failed");
                let previous = std::mem::take(&mut inner.fetch).into_data();
                inner.fetch = FetchState::failed_with(previous, error);
            }
        }
        Completion::Applied
    }

    async fn fetch(&self, url: &str) -> Result<Vec<R::Item>> {
        let body = self.transport.get(url).await?.into_success_body(url)?;
        R::decode(&body)
    }
}
