//! # Commons Core
//!
//! Data orchestration for the community detail view: one tab channel for the
//! paginated tab content and two side channels (administrators, recent
//! activity), combined into a single render-ready view model.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         COMMONS CORE MODULES                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │                    ┌───────────────────────────┐                        │
//! │                    │      CommunityView        │──► CommunityViewModel  │
//! │                    └─────┬─────────┬─────────┬─┘                        │
//! │                          │         │         │                          │
//! │               ┌──────────▼──┐ ┌────▼──────┐ ┌▼────────────────┐         │
//! │               │ TabChannel  │ │SideChannel│ │  SideChannel    │         │
//! │               │             │ │ <Admins>  │ │<RecentActivity> │         │
//! │               │ - select    │ │ - load    │ │ - load          │         │
//! │               │ - go_next   │ │ - refresh │ │ - refresh       │         │
//! │               │ - go_prev   │ └────┬──────┘ └┬────────────────┘         │
//! │               └──────┬──────┘      │         │                          │
//! │                      │             │         │                          │
//! │  ┌─────────────┐  ┌──▼─────────────▼─────────▼──┐  ┌─────────────────┐  │
//! │  │ Generation  │  │         Transport           │  │    Envelope     │  │
//! │  │   Clock     │  │  (reqwest / scripted fake)  │  │ count/next/prev │  │
//! │  └─────────────┘  └─────────────────────────────┘  └─────────────────┘  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types and the coarse kinds shown to renderers
//! - [`config`] - Backend location, request deadline, endpoint URLs
//! - [`model`] - Resource shapes returned by the backend
//! - [`envelope`] - Paginated list codec
//! - [`generation`] - Monotonic request generations
//! - [`fetch`] - Per-channel lifecycle state
//! - [`tab`] - Tab identifiers
//! - [`transport`] - The HTTP seam
//! - [`channel`] - Tab and side channels
//! - [`view`] - The aggregator
//!
//! ## Ordering Model
//!
//! Every trigger advances its channel's generation before issuing a
//! request. A completion is applied only if its generation is still the
//! channel's current one; anything else is dropped. Requests are never
//! cancelled, and the last trigger always wins regardless of which response
//! arrives first.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod channel;
pub mod config;
pub mod envelope;
pub mod error;
pub mod fetch;
pub mod generation;
pub mod model;
pub mod tab;
pub mod transport;
pub mod view;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use channel::{Completion, SideChannel, TabChannel, TabPage};
pub use config::{ClientConfig, Endpoints};
pub use envelope::{PageDirection, PaginationEnvelope};
pub use error::{ChannelError, Error, ErrorKind, Result};
pub use fetch::{FetchState, FetchStatus};
pub use generation::{Generation, GenerationClock};
pub use model::{
    Activity, AdminRole, CommunityContext, CommunityRef, Discussion, Member, Membership,
    SharedFile, UserSummary,
};
pub use tab::TabIdentifier;
pub use transport::{HttpTransport, RawResponse, Transport};
pub use view::{CommunityView, CommunityViewModel};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
