//! # Tab Channel
//!
//! Owns the content of the selected tab: fetch on selection, cursor
//! navigation, and the loading/error/success lifecycle.
//!
//! Two clocks drive it. The *selection* clock advances on every
//! [`select`](TabChannel::select); the *request* clock advances on every
//! request, navigation included. Completions are checked against the
//! request clock, so a navigation supersedes an earlier navigation and a
//! selection supersedes both.

use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

use super::Completion;
use crate::config::{ClientConfig, Endpoints};
use crate::envelope::{PageDirection, PaginationEnvelope};
use crate::error::{Error, Result};
use crate::fetch::{FetchState, FetchStatus};
use crate::generation::{Generation, GenerationClock};
use crate::model::{CommunityContext, CommunityRef, Discussion, Membership, SharedFile};
use crate::tab::TabIdentifier;
use crate::transport::Transport;

/// Decoded content of one tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tab", content = "page", rename_all = "lowercase")]
pub enum TabPage {
    /// Community description
    About(String),
    /// One page of members
    Members(PaginationEnvelope<Membership>),
    /// One page of discussions
    Discussions(PaginationEnvelope<Discussion>),
    /// One page of shared files
    Resources(PaginationEnvelope<SharedFile>),
}

impl TabPage {
    /// Decode a response body as the page type of `tab`.
    pub fn decode(tab: TabIdentifier, body: &str) -> Result<Self> {
        Ok(match tab {
            TabIdentifier::About => TabPage::About(body.to_string()),
            TabIdentifier::Members => TabPage::Members(PaginationEnvelope::decode_str(body)?),
            TabIdentifier::Discussions => {
                TabPage::Discussions(PaginationEnvelope::decode_str(body)?)
            }
            TabIdentifier::Resources => TabPage::Resources(PaginationEnvelope::decode_str(body)?),
        })
    }

    /// The tab this page belongs to.
    pub fn tab(&self) -> TabIdentifier {
        match self {
            TabPage::About(_) => TabIdentifier::About,
            TabPage::Members(_) => TabIdentifier::Members,
            TabPage::Discussions(_) => TabIdentifier::Discussions,
            TabPage::Resources(_) => TabIdentifier::Resources,
        }
    }

    /// Cursor in `direction`; always `None` for the about tab.
    pub fn cursor(&self, direction: PageDirection) -> Option<&str> {
        match self {
            TabPage::About(_) => None,
            TabPage::Members(page) => page.cursor(direction),
            TabPage::Discussions(page) => page.cursor(direction),
            TabPage::Resources(page) => page.cursor(direction),
        }
    }

    /// Total item count across pages; `None` for the about tab.
    pub fn count(&self) -> Option<u64> {
        match self {
            TabPage::About(_) => None,
            TabPage::Members(page) => Some(page.count),
            TabPage::Discussions(page) => Some(page.count),
            TabPage::Resources(page) => Some(page.count),
        }
    }

    /// Number of items on this page; `None` for the about tab.
    pub fn len(&self) -> Option<usize> {
        match self {
            TabPage::About(_) => None,
            TabPage::Members(page) => Some(page.len()),
            TabPage::Discussions(page) => Some(page.len()),
            TabPage::Resources(page) => Some(page.len()),
        }
    }

    /// The description, for the about tab.
    pub fn about_text(&self) -> Option<&str> {
        match self {
            TabPage::About(text) => Some(text),
            _ => None,
        }
    }
}

/// Which kind of request the latest generation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Selection,
    Navigation,
}

#[derive(Debug, Default)]
struct TabInner {
    community: Option<CommunityContext>,
    tab: Option<TabIdentifier>,
    fetch: FetchState<TabPage>,
    pending: Option<Pending>,
}

impl TabInner {
    /// The page navigation may start from: a landed page, or the page kept
    /// visible while an earlier navigation is still in flight.
    fn navigable_page(&self) -> Option<&TabPage> {
        match (self.fetch.status(), self.pending) {
            (FetchStatus::Success, _) => self.fetch.data(),
            (FetchStatus::Loading, Some(Pending::Navigation)) => self.fetch.data(),
            _ => None,
        }
    }
}

/// Immutable copy of a tab channel's state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabSnapshot {
    /// Community the content belongs to
    pub community: Option<CommunityRef>,
    /// Description of that community
    pub about_text: Option<String>,
    /// Selected tab
    pub tab: Option<TabIdentifier>,
    /// Content lifecycle
    pub fetch: FetchState<TabPage>,
    /// Latest selection generation
    pub selection: Generation,
    /// Latest request generation
    pub request: Generation,
}

/// The selected tab's content.
pub struct TabChannel {
    endpoints: Endpoints,
    transport: Arc<dyn Transport>,
    selections: GenerationClock,
    requests: GenerationClock,
    state: RwLock<TabInner>,
}

impl TabChannel {
    /// Create an idle channel.
    pub fn new(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            endpoints: config.endpoints(),
            transport,
            selections: GenerationClock::new(),
            requests: GenerationClock::new(),
            state: RwLock::new(TabInner::default()),
        }
    }

    /// Select `tab` for `community` and fetch its first page.
    ///
    /// The about tab is resolved synchronously from the community
    /// description without a request. Selecting the already-selected tab
    /// fetches page one again. Decoding and transport failures land in the
    /// channel state.
    pub async fn select(&self, tab: TabIdentifier, community: CommunityContext) -> Completion {
        let (issued, url) = {
            let mut inner = self.state.write();
            self.selections.advance();
            let issued = self.requests.advance();
            let url = self.tab_url(tab, &community.id);

            inner.tab = Some(tab);
            let Some(url) = url else {
                let text = community.description.clone().unwrap_or_default();
                inner.community = Some(community);
                inner.fetch = FetchState::success(TabPage::About(text));
                inner.pending = None;
                return Completion::Applied;
            };

            inner.community = Some(community);
            inner.fetch = FetchState::loading();
            inner.pending = Some(Pending::Selection);
            (issued, url)
        };

        tracing::debug!(channel = "tab", tab = %tab, generation = %issued, url = %url, "issuing request");
        let outcome = self.fetch_page(tab, &url).await;
        self.complete(issued, outcome)
    }

    /// Record a selection for `community` that failed validation at the
    /// boundary.
    ///
    /// Supersedes any in-flight request and puts the channel in `error`.
    /// For the community already shown, the current tab and data are kept.
    /// For a different community, the channel switches to it with no tab
    /// and no data, so nothing of the previous community remains.
    pub fn reject_selection(&self, community: CommunityContext, error: Error) {
        let mut inner = self.state.write();
        self.selections.advance();
        self.requests.advance();

        let same_community = inner.community.as_ref().map(|c| &c.id) == Some(&community.id);
        tracing::warn!(
            channel = "tab",
            community = %community.id,
            error = %error,
            "selection rejected"
        );
        if same_community {
            let previous = std::mem::take(&mut inner.fetch).into_data();
            inner.fetch = FetchState::failed_with(previous, error);
        } else {
            inner.tab = None;
            inner.fetch = FetchState::failed(error);
        }
        inner.community = Some(community);
        inner.pending = None;
    }

    /// Follow the `next` cursor.
    pub async fn go_next(&self) -> Result<Completion> {
        self.navigate(PageDirection::Next).await
    }

    /// Follow the `previous` cursor.
    pub async fn go_previous(&self) -> Result<Completion> {
        self.navigate(PageDirection::Previous).await
    }

    /// Follow a cursor of the current page.
    ///
    /// Returns [`Error::NoSuchPage`] without touching state when there is no
    /// landed page or it has no cursor that way. The tab is preserved; only
    /// the request generation advances, so repeated clicks resolve to the
    /// last one.
    pub async fn navigate(&self, direction: PageDirection) -> Result<Completion> {
        let (issued, tab, url) = {
            let mut inner = self.state.write();
            let target = inner
                .navigable_page()
                .and_then(|page| page.cursor(direction).map(|url| (page.tab(), url.to_string())));
            let Some((tab, url)) = target else {
                tracing::debug!(channel = "tab", direction = %direction, "no page to navigate to");
                return Err(Error::NoSuchPage(direction));
            };

            let issued = self.requests.advance();
            let current = std::mem::take(&mut inner.fetch).into_data();
            inner.fetch = FetchState::reloading(current);
            inner.pending = Some(Pending::Navigation);
            (issued, tab, url)
        };

        tracing::debug!(channel = "tab", direction = %direction, generation = %issued, url = %url, "issuing request");
        let outcome = self.fetch_page(tab, &url).await;
        Ok(self.complete(issued, outcome))
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> TabSnapshot {
        let inner = self.state.read();
        TabSnapshot {
            community: inner.community.as_ref().map(|c| c.id.clone()),
            about_text: inner.community.as_ref().and_then(|c| c.description.clone()),
            tab: inner.tab,
            fetch: inner.fetch.clone(),
            selection: self.selections.current(),
            request: self.requests.current(),
        }
    }

    /// Community of the latest selection.
    pub fn community(&self) -> Option<CommunityContext> {
        self.state.read().community.clone()
    }

    /// Latest selected tab.
    pub fn tab(&self) -> Option<TabIdentifier> {
        self.state.read().tab
    }

    /// Current lifecycle status.
    pub fn status(&self) -> FetchStatus {
        self.state.read().fetch.status()
    }

    /// Initial URL of a remote tab; `None` for the about tab.
    fn tab_url(&self, tab: TabIdentifier, community: &CommunityRef) -> Option<String> {
        match tab {
            TabIdentifier::About => None,
            TabIdentifier::Members => Some(self.endpoints.members(community)),
            TabIdentifier::Discussions => Some(self.endpoints.discussions(community)),
            TabIdentifier::Resources => Some(self.endpoints.resources(community)),
        }
    }

    async fn fetch_page(&self, tab: TabIdentifier, url: &str) -> Result<TabPage> {
        let body = self.transport.get(url).await?.into_success_body(url)?;
        TabPage::decode(tab, &body)
    }

    fn complete(&self, issued: Generation, outcome: Result<TabPage>) -> Completion {
        let mut inner = self.state.write();
        if !self.requests.is_current(issued) {
            tracing::debug!(
                channel = "tab",
                issued = %issued,
                current = %self.requests.current(),
                "discarding stale response"
            );
            return Completion::Stale;
        }

        inner.pending = None;
        match outcome {
            Ok(page) => {
                inner.fetch = FetchState::success(page);
            }
            Err(error) => {
                tracing::warn!(channel = "tab", generation = %issued, error = %error, "request failed");
                let previous = std::mem::take(&mut inner.fetch).into_data();
                inner.fetch = FetchState::failed_with(previous, error);
            }
        }
        Completion::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::fake::FakeTransport;
    use crate::error::ErrorKind;
    use serde_json::{json, Value};

    const BASE: &str = "http://api.test";

    fn members_url(id: &str) -> String {
        format!("{BASE}/api/community-members/{id}/")
    }

    fn discussions_url(id: &str) -> String {
        format!("{BASE}/api/discussions/?communaute_id={id}")
    }

    fn member(pk: &str) -> Value {
        json!({ "user": { "pkId": pk, "full_name": format!("User {pk}") }, "date_joined": "2024-01-01T00:00:00Z" })
    }

    fn discussion(pk: &str) -> Value {
        json!({ "pkId": pk, "titre": format!("Discussion {pk}"), "date_creation": "2024-01-01T00:00:00Z" })
    }

    fn envelope(count: u64, next: Option<&str>, previous: Option<&str>, results: Vec<Value>) -> Value {
        json!({ "count": count, "next": next, "previous": previous, "results": results })
    }

    fn channel(transport: &Arc<FakeTransport>) -> TabChannel {
        let config = ClientConfig::new(BASE).unwrap();
        TabChannel::new(&config, transport.clone())
    }

    fn community(id: &str) -> CommunityContext {
        CommunityContext::new(id, "Une communauté de praticiens")
    }

    #[tokio::test]
    async fn test_about_tab_issues_no_request() {
        let transport = Arc::new(FakeTransport::default());
        let tabs = channel(&transport);

        let completion = tabs.select(TabIdentifier::About, community("42")).await;

        assert_eq!(completion, Completion::Applied);
        assert!(transport.calls().is_empty());
        let snapshot = tabs.snapshot();
        assert!(snapshot.fetch.is_success());
        assert_eq!(
            snapshot.fetch.data().and_then(TabPage::about_text),
            Some("Une communauté de praticiens")
        );
    }

    #[tokio::test]
    async fn test_about_tab_without_description() {
        let transport = Arc::new(FakeTransport::default());
        let tabs = channel(&transport);

        tabs.select(TabIdentifier::About, CommunityContext::without_description("42"))
            .await;

        assert_eq!(tabs.snapshot().fetch.data(), Some(&TabPage::About(String::new())));
    }

    #[tokio::test]
    async fn test_select_fetches_first_page() {
        let transport = Arc::new(FakeTransport::default());
        transport.json(
            &members_url("42"),
            5,
            envelope(2, None, None, vec![member("a"), member("b")]),
        );
        let tabs = channel(&transport);

        let completion = tabs.select(TabIdentifier::Members, community("42")).await;

        assert!(completion.is_applied());
        let snapshot = tabs.snapshot();
        assert_eq!(snapshot.tab, Some(TabIdentifier::Members));
        assert_eq!(snapshot.fetch.data().and_then(TabPage::len), Some(2));
        assert_eq!(transport.calls(), vec![members_url("42")]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_while_in_flight() {
        let transport = Arc::new(FakeTransport::default());
        transport.json(&members_url("42"), 50, envelope(0, None, None, vec![]));
        let tabs = Arc::new(channel(&transport));

        let task = {
            let tabs = tabs.clone();
            tokio::spawn(async move { tabs.select(TabIdentifier::Members, community("42")).await })
        };
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        assert_eq!(tabs.status(), FetchStatus::Loading);
        assert!(tabs.snapshot().fetch.data().is_none());
        task.await.unwrap();
        assert_eq!(tabs.status(), FetchStatus::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_selection_is_discarded() {
        let transport = Arc::new(FakeTransport::default());
        transport.json(&members_url("42"), 50, envelope(1, None, None, vec![member("a")]));
        transport.json(
            &discussions_url("42"),
            20,
            envelope(1, None, None, vec![discussion("d")]),
        );
        let tabs = channel(&transport);

        let (first, second) = tokio::join!(
            tabs.select(TabIdentifier::Members, community("42")),
            tabs.select(TabIdentifier::Discussions, community("42")),
        );

        assert_eq!(first, Completion::Stale);
        assert_eq!(second, Completion::Applied);
        let snapshot = tabs.snapshot();
        assert_eq!(snapshot.tab, Some(TabIdentifier::Discussions));
        assert!(matches!(snapshot.fetch.data(), Some(TabPage::Discussions(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_timeout_of_superseded_selection_is_discarded() {
        let transport = Arc::new(FakeTransport::default());
        transport.fail(&members_url("42"), 50, Error::Timeout(members_url("42")));
        transport.json(
            &discussions_url("42"),
            10,
            envelope(1, None, None, vec![discussion("d")]),
        );
        let tabs = channel(&transport);

        let (first, second) = tokio::join!(
            tabs.select(TabIdentifier::Members, community("42")),
            async {
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
                tabs.select(TabIdentifier::Discussions, community("42")).await
            },
        );

        assert_eq!(first, Completion::Stale);
        assert_eq!(second, Completion::Applied);
        let snapshot = tabs.snapshot();
        assert!(snapshot.fetch.is_success());
        assert!(snapshot.fetch.error().is_none());
        assert_eq!(snapshot.tab, Some(TabIdentifier::Discussions));
    }

    #[tokio::test(start_paused = true)]
    async fn test_about_supersedes_in_flight_fetch() {
        let transport = Arc::new(FakeTransport::default());
        transport.json(&members_url("42"), 30, envelope(1, None, None, vec![member("a")]));
        let tabs = channel(&transport);

        let (first, second) = tokio::join!(
            tabs.select(TabIdentifier::Members, community("42")),
            tabs.select(TabIdentifier::About, community("42")),
        );

        assert_eq!(first, Completion::Stale);
        assert_eq!(second, Completion::Applied);
        assert_eq!(tabs.tab(), Some(TabIdentifier::About));
    }

    #[tokio::test]
    async fn test_http_error_lands_in_state() {
        let transport = Arc::new(FakeTransport::default());
        transport.status(&members_url("42"), 0, 500);
        let tabs = channel(&transport);

        tabs.select(TabIdentifier::Members, community("42")).await;

        let snapshot = tabs.snapshot();
        assert!(snapshot.fetch.is_error());
        assert!(snapshot.fetch.data().is_none());
        let error = snapshot.fetch.error().unwrap();
        assert_eq!(error.kind, ErrorKind::NetworkFailure);
        assert!(error.message.contains("500"));
    }

    #[tokio::test]
    async fn test_malformed_body_lands_in_state() {
        let transport = Arc::new(FakeTransport::default());
        transport.json(&members_url("42"), 0, json!({ "results": [] }));
        let tabs = channel(&transport);

        tabs.select(TabIdentifier::Members, community("42")).await;

        let error = tabs.snapshot().fetch.error().cloned().unwrap();
        assert_eq!(error.kind, ErrorKind::MalformedEnvelope);
    }

    #[tokio::test]
    async fn test_reselecting_same_tab_restarts_at_first_page() {
        let page2 = format!("{BASE}/api/community-members/42/?page=2");
        let transport = Arc::new(FakeTransport::default());
        transport.json(
            &members_url("42"),
            0,
            envelope(2, Some(&page2), None, vec![member("a")]),
        );
        transport.json(
            &page2,
            0,
            envelope(2, None, Some(&members_url("42")), vec![member("b")]),
        );
        let tabs = channel(&transport);

        tabs.select(TabIdentifier::Members, community("42")).await;
        tabs.go_next().await.unwrap();
        assert!(tabs.snapshot().fetch.data().unwrap().cursor(PageDirection::Next).is_none());

        tabs.select(TabIdentifier::Members, community("42")).await;

        let snapshot = tabs.snapshot();
        assert_eq!(
            snapshot.fetch.data().unwrap().cursor(PageDirection::Next),
            Some(page2.as_str())
        );
        assert_eq!(snapshot.selection.get(), 2);
        assert_eq!(
            transport.calls(),
            vec![members_url("42"), page2.clone(), members_url("42")]
        );
    }

    #[tokio::test]
    async fn test_navigation_preserves_tab_and_selection_generation() {
        let page2 = format!("{BASE}/api/discussions/?communaute_id=42&page=2");
        let transport = Arc::new(FakeTransport::default());
        transport.json(
            &discussions_url("42"),
            0,
            envelope(2, Some(&page2), None, vec![discussion("1")]),
        );
        transport.json(
            &page2,
            0,
            envelope(2, None, Some(&discussions_url("42")), vec![discussion("2")]),
        );
        let tabs = channel(&transport);

        tabs.select(TabIdentifier::Discussions, community("42")).await;
        let before = tabs.snapshot();
        tabs.go_next().await.unwrap();
        let after = tabs.snapshot();

        assert_eq!(after.tab, Some(TabIdentifier::Discussions));
        assert_eq!(after.selection, before.selection);
        assert!(after.request > before.request);
        assert!(after.fetch.data().unwrap().cursor(PageDirection::Previous).is_some());
    }

    #[tokio::test]
    async fn test_navigation_without_cursor_is_noop() {
        let transport = Arc::new(FakeTransport::default());
        transport.json(&members_url("42"), 0, envelope(1, None, None, vec![member("a")]));
        let tabs = channel(&transport);

        assert_eq!(
            tabs.go_next().await.unwrap_err(),
            Error::NoSuchPage(PageDirection::Next)
        );

        tabs.select(TabIdentifier::Members, community("42")).await;
        let before = tabs.snapshot();

        assert_eq!(
            tabs.go_previous().await.unwrap_err(),
            Error::NoSuchPage(PageDirection::Previous)
        );
        assert_eq!(tabs.snapshot(), before);
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_about_tab_has_no_pages() {
        let transport = Arc::new(FakeTransport::default());
        let tabs = channel(&transport);
        tabs.select(TabIdentifier::About, community("42")).await;

        assert!(tabs.go_next().await.is_err());
        assert!(tabs.snapshot().fetch.is_success());
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_click_next_lands_last() {
        let page2 = format!("{BASE}/api/community-members/42/?page=2");
        let transport = Arc::new(FakeTransport::default());
        transport.json(
            &members_url("42"),
            0,
            envelope(3, Some(&page2), None, vec![member("a")]),
        );
        // First click answers slowly with an outdated page, second answers fast.
        transport.json(&page2, 40, envelope(3, None, None, vec![member("stale")]));
        transport.json(
            &page2,
            10,
            envelope(3, None, Some(&members_url("42")), vec![member("b")]),
        );
        let tabs = channel(&transport);
        tabs.select(TabIdentifier::Members, community("42")).await;

        let (first, second) = tokio::join!(tabs.go_next(), tabs.go_next());

        assert_eq!(first.unwrap(), Completion::Stale);
        assert_eq!(second.unwrap(), Completion::Applied);
        match tabs.snapshot().fetch.data() {
            Some(TabPage::Members(page)) => assert_eq!(page.results[0].user.pk_id, "b"),
            other => panic!("unexpected page: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_supersedes_navigation() {
        let page2 = format!("{BASE}/api/community-members/42/?page=2");
        let transport = Arc::new(FakeTransport::default());
        transport.json(
            &members_url("42"),
            0,
            envelope(2, Some(&page2), None, vec![member("a")]),
        );
        transport.json(&page2, 50, envelope(2, None, None, vec![member("b")]));
        transport.json(&discussions_url("42"), 10, envelope(0, None, None, vec![]));
        let tabs = channel(&transport);
        tabs.select(TabIdentifier::Members, community("42")).await;

        let (navigation, selection) = tokio::join!(
            tabs.go_next(),
            tabs.select(TabIdentifier::Discussions, community("42")),
        );

        assert_eq!(navigation.unwrap(), Completion::Stale);
        assert_eq!(selection, Completion::Applied);
        assert_eq!(tabs.tab(), Some(TabIdentifier::Discussions));
    }

    #[tokio::test]
    async fn test_failed_navigation_keeps_page() {
        let page2 = format!("{BASE}/api/community-members/42/?page=2");
        let transport = Arc::new(FakeTransport::default());
        transport.json(
            &members_url("42"),
            0,
            envelope(2, Some(&page2), None, vec![member("a")]),
        );
        transport.fail(&page2, 0, Error::Timeout(page2.clone()));
        let tabs = channel(&transport);
        tabs.select(TabIdentifier::Members, community("42")).await;

        tabs.go_next().await.unwrap();

        let snapshot = tabs.snapshot();
        assert!(snapshot.fetch.is_error());
        assert_eq!(snapshot.fetch.data().and_then(TabPage::len), Some(1));
        assert!(tabs.go_next().await.is_err());
    }

    #[tokio::test]
    async fn test_rejected_selection_keeps_data() {
        let transport = Arc::new(FakeTransport::default());
        transport.json(&members_url("42"), 0, envelope(1, None, None, vec![member("a")]));
        let tabs = channel(&transport);
        tabs.select(TabIdentifier::Members, community("42")).await;
        let before = tabs.snapshot();

        tabs.reject_selection(community("42"), Error::UnknownTab("invalid-tab".into()));

        let after = tabs.snapshot();
        assert!(after.fetch.is_error());
        assert_eq!(after.fetch.error().unwrap().kind, ErrorKind::UnknownTab);
        assert_eq!(after.fetch.data(), before.fetch.data());
        assert_eq!(after.tab, before.tab);
    }

    #[tokio::test]
    async fn test_rejected_selection_for_new_community_drops_old_page() {
        let transport = Arc::new(FakeTransport::default());
        transport.json(&members_url("A"), 0, envelope(1, None, None, vec![member("a")]));
        transport.json(&members_url("B"), 0, envelope(1, None, None, vec![member("b")]));
        let tabs = channel(&transport);
        tabs.select(TabIdentifier::Members, CommunityContext::new("A", "about A"))
            .await;

        tabs.reject_selection(
            CommunityContext::new("B", "about B"),
            Error::UnknownTab("invalid-tab".into()),
        );

        let after = tabs.snapshot();
        assert_eq!(after.community, Some(CommunityRef::new("B")));
        assert_eq!(after.about_text.as_deref(), Some("about B"));
        assert_eq!(after.tab, None);
        assert!(after.fetch.is_error());
        assert!(after.fetch.data().is_none());
        assert_eq!(tabs.community().map(|c| c.id), Some(CommunityRef::new("B")));
    }
}
