//! # Channels
//!
//! Independently-lifecycled asynchronous data sources feeding the view.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            CHANNEL MODEL                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  trigger ──► advance generation ──► state = loading ──► GET url         │
//! │                    (under lock)                            │            │
//! │                                                            ▼            │
//! │  completion ──► generation still current? ──no──► drop (Stale)          │
//! │                         │ yes                                           │
//! │                         ▼                                               │
//! │               state = success | error  (Applied)                        │
//! │                                                                         │
//! │  TabChannel    triggers: select(tab, community), go_next, go_previous   │
//! │  SideChannel   triggers: load(community) on identity change, refresh    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each channel owns its state and its clock; nothing else writes to them.
//! Locks are never held across an `.await`.

mod side;
mod tab;

pub use side::{Admins, RecentActivity, SideChannel, SideResource, SideSnapshot};
pub use tab::{TabChannel, TabPage, TabSnapshot};

/// What happened to the request a trigger issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Completion {
    /// The result was written to the channel state.
    Applied,
    /// A newer trigger superseded the request; its result was dropped.
    Stale,
    /// Nothing was issued because the channel was already satisfied.
    Unchanged,
}

impl Completion {
    /// Whether the trigger's result is what the channel now shows.
    pub fn is_applied(&self) -> bool {
        matches!(self, Completion::Applied)
    }
}
