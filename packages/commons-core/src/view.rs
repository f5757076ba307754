//! # Community View
//!
//! Combines the tab channel and both side channels into one render-ready
//! [`CommunityViewModel`] and exposes the navigation actions.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          COMMUNITY VIEW                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │   open(community, tab) ─┬──► TabChannel.select(tab, community)          │
//! │                         ├──► SideChannel<Admins>.load(id)               │
//! │                         └──► SideChannel<RecentActivity>.load(id)       │
//! │                                                                         │
//! │   select_tab(raw) ──► parse ──► TabChannel.select / reject_selection    │
//! │   go_next / go_previous ──► TabChannel.navigate                         │
//! │                                                                         │
//! │   snapshot() ──► { about, tab, tab_state, admins_state, activity_state }│
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The view holds nothing but its three channels. It never tracks
//! generations itself; every ordering decision is made by the channel the
//! request belongs to.

use serde::Serialize;
use std::sync::Arc;

use crate::channel::{
    Admins, Completion, RecentActivity, SideChannel, SideSnapshot, TabChannel, TabPage,
};
use crate::config::ClientConfig;
use crate::envelope::PageDirection;
use crate::error::{ChannelError, Error, Result};
use crate::fetch::{FetchState, FetchStatus};
use crate::model::{Activity, AdminRole, CommunityContext, CommunityRef, Member};
use crate::tab::TabIdentifier;
use crate::transport::{HttpTransport, Transport};

/// Render-ready snapshot of the whole view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityViewModel {
    /// Community the tab content belongs to
    pub community: Option<CommunityRef>,
    /// Description shown on the about tab
    pub about_text: Option<String>,
    /// Selected tab
    pub tab: Option<TabIdentifier>,
    /// Tab content
    pub tab_state: FetchState<TabPage>,
    /// Administrators roster
    pub admins_state: FetchState<Vec<Member>>,
    /// Recent activity feed
    pub activity_state: FetchState<Vec<Activity>>,
}

impl CommunityViewModel {
    /// Whether any channel has a request in flight.
    pub fn is_any_loading(&self) -> bool {
        self.tab_state.is_loading()
            || self.admins_state.is_loading()
            || self.activity_state.is_loading()
    }

    /// First error scanning tab, then admins, then activity.
    ///
    /// Display priority only: every channel keeps its own error.
    pub fn first_error(&self) -> Option<&ChannelError> {
        self.tab_state
            .error()
            .or_else(|| self.admins_state.error())
            .or_else(|| self.activity_state.error())
    }

    /// Whether the roster lists `user_pk_id` as a full administrator.
    pub fn is_admin(&self, user_pk_id: &str) -> bool {
        self.admins_state.data().is_some_and(|roster| {
            roster
                .iter()
                .any(|member| member.user.pk_id == user_pk_id && member.role == AdminRole::Admin)
        })
    }

    /// Whether [`CommunityView::go_next`] has a landed page to follow.
    pub fn can_go_next(&self) -> bool {
        self.can_navigate(PageDirection::Next)
    }

    /// Whether [`CommunityView::go_previous`] has a landed page to follow.
    pub fn can_go_previous(&self) -> bool {
        self.can_navigate(PageDirection::Previous)
    }

    fn can_navigate(&self, direction: PageDirection) -> bool {
        self.tab_state.status() == FetchStatus::Success
            && self
                .tab_state
                .data()
                .is_some_and(|page| page.cursor(direction).is_some())
    }
}

/// The aggregator: one tab channel, one admins channel, one activity channel.
pub struct CommunityView {
    tab: TabChannel,
    admins: SideChannel<Admins>,
    activity: SideChannel<RecentActivity>,
}

impl CommunityView {
    /// Build a view whose channels share `transport`.
    pub fn new(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            tab: TabChannel::new(config, transport.clone()),
            admins: SideChannel::new(config, transport.clone()),
            activity: SideChannel::new(config, transport),
        }
    }

    /// Build a view backed by [`HttpTransport`].
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    /// Open `community` on the tab named `tab`.
    ///
    /// Drives the tab channel and both side channels concurrently. Side
    /// channels already holding this community are left alone unless their
    /// last request failed. An invalid tab is recorded in the tab channel
    /// under this community and returned; the side channels still load.
    pub async fn open(&self, community: CommunityContext, tab: &str) -> Result<()> {
        let id = community.id.clone();
        let (selected, _, _) = tokio::join!(
            self.select_for(tab, community),
            self.admins.load(&id),
            self.activity.load(&id),
        );
        selected.map(|_| ())
    }

    /// Switch tab within the current community.
    pub async fn select_tab(&self, tab: &str) -> Result<Completion> {
        let community = self.tab.community().ok_or(Error::NoCommunity)?;
        self.select_for(tab, community).await
    }

    /// Follow the `next` cursor of the current tab.
    pub async fn go_next(&self) -> Result<Completion> {
        self.tab.go_next().await
    }

    /// Follow the `previous` cursor of the current tab.
    pub async fn go_previous(&self) -> Result<Completion> {
        self.tab.go_previous().await
    }

    /// Re-fetch admins and activity for the current community.
    pub async fn refresh_side_channels(&self) -> Result<()> {
        let (admins, activity) = tokio::join!(self.admins.refresh(), self.activity.refresh());
        admins?;
        activity?;
        Ok(())
    }

    /// Compose the current state of all three channels.
    pub fn snapshot(&self) -> CommunityViewModel {
        let tab = self.tab.snapshot();
        let SideSnapshot { fetch: admins_state, .. } = self.admins.snapshot();
        let SideSnapshot { fetch: activity_state, .. } = self.activity.snapshot();

        CommunityViewModel {
            community: tab.community,
            about_text: tab.about_text,
            tab: tab.tab,
            tab_state: tab.fetch,
            admins_state,
            activity_state,
        }
    }

    /// Whether any channel has a request in flight.
    pub fn is_any_loading(&self) -> bool {
        [self.tab.status(), self.admins.status(), self.activity.status()]
            .contains(&FetchStatus::Loading)
    }

    /// First error scanning tab, then admins, then activity.
    pub fn first_error(&self) -> Option<ChannelError> {
        self.snapshot().first_error().cloned()
    }

    /// The tab channel.
    pub fn tab_channel(&self) -> &TabChannel {
        &self.tab
    }

    /// The administrators channel.
    pub fn admins_channel(&self) -> &SideChannel<Admins> {
        &self.admins
    }

    /// The recent-activity channel.
    pub fn activity_channel(&self) -> &SideChannel<RecentActivity> {
        &self.activity
    }

    async fn select_for(&self, raw: &str, community: CommunityContext) -> Result<Completion> {
        match raw.parse::<TabIdentifier>() {
            Ok(tab) => Ok(self.tab.select(tab, community).await),
            Err(error) => {
                self.tab.reject_selection(community, error.clone());
                Err(error)
            }
        }
    }
}
