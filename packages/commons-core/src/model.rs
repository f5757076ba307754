//! Resource types decoded from the backend.
//!
//! Field names follow the wire format (`pkId`, `headlineDescription`, ...)
//! through serde renames; Rust-side names are snake_case.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity the view is scoped to. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommunityRef(String);

impl CommunityRef {
    /// Wrap a community identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommunityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommunityRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// What the external collaborator knows about the community when it opens
/// the view: its identity and the description shown on the about tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityContext {
    /// Community identity
    pub id: CommunityRef,
    /// Description text, rendered as-is on the about tab
    pub description: Option<String>,
}

impl CommunityContext {
    /// Context with a description.
    pub fn new(id: impl Into<CommunityRef>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: Some(description.into()),
        }
    }

    /// Context without a known description.
    pub fn without_description(id: impl Into<CommunityRef>) -> Self {
        Self {
            id: id.into(),
            description: None,
        }
    }
}

// ============================================================================
// USERS
// ============================================================================

/// Public profile attached to a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Avatar path, relative to the backend origin
    #[serde(default)]
    pub image_url: Option<String>,
    /// Job title
    #[serde(default)]
    pub poste: Option<String>,
    /// Organisation name
    #[serde(default)]
    pub organisation: Option<String>,
}

/// The user fields every member-shaped resource embeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User primary key
    #[serde(rename = "pkId")]
    pub pk_id: String,
    /// Display name
    pub full_name: String,
    /// Country name
    #[serde(default)]
    pub country: Option<String>,
    /// Public profile
    #[serde(default)]
    pub profile: Option<Profile>,
}

impl UserSummary {
    /// Two-letter uppercase initials used when no avatar is available.
    pub fn initials(&self) -> String {
        self.full_name.chars().take(2).collect::<String>().to_uppercase()
    }
}

/// One entry of the members tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// The member
    pub user: UserSummary,
    /// ISO-8601 join timestamp
    pub date_joined: String,
}

impl Membership {
    /// Parsed join timestamp, if the server sent a valid RFC 3339 value.
    pub fn joined_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(&self.date_joined)
    }
}

/// Role held by an entry of the administrators roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    /// Full administrator
    Admin,
    /// Moderator
    Moderator,
}

impl AdminRole {
    /// Short badge label.
    pub fn badge(&self) -> &'static str {
        match self {
            AdminRole::Admin => "ADMIN",
            AdminRole::Moderator => "MOD",
        }
    }
}

/// One entry of the administrators side channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// The administrator or moderator
    pub user: UserSummary,
    /// Their role
    pub role: AdminRole,
}

// ============================================================================
// DISCUSSIONS & FILES
// ============================================================================

/// Author reference embedded in discussions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// User primary key
    #[serde(rename = "pkId")]
    pub pk_id: String,
    /// Given name
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name
    #[serde(default)]
    pub last_name: Option<String>,
}

/// One entry of the discussions tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discussion {
    /// Discussion primary key
    #[serde(rename = "pkId")]
    pub pk_id: String,
    /// Title
    pub titre: String,
    /// Author, absent for deleted accounts
    #[serde(default)]
    pub auteur: Option<Author>,
    /// ISO-8601 creation timestamp
    pub date_creation: String,
    /// Whether the discussion is visible
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Whether deletion has been requested
    #[serde(default)]
    pub deletion_requested: bool,
    /// Opening excerpt (HTML, rendered by the collaborator)
    #[serde(rename = "headlineDescription", default)]
    pub headline_description: String,
    /// Number of comments
    #[serde(rename = "commentCount", default)]
    pub comment_count: u32,
}

impl Discussion {
    /// Author name as shown in listings.
    pub fn author_display(&self) -> String {
        let Some(author) = &self.auteur else {
            return "Anonymous".to_string();
        };
        let first = author.first_name.as_deref().filter(|s| !s.is_empty());
        let last = author.last_name.as_deref().filter(|s| !s.is_empty());
        match (first, last) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.to_string(),
            (None, None) => "Anonymous".to_string(),
        }
    }

    /// Parsed creation timestamp.
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(&self.date_creation)
    }
}

fn default_true() -> bool {
    true
}

/// One entry of the resources tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedFile {
    /// File primary key
    #[serde(rename = "pkId")]
    pub pk_id: String,
    /// File name
    pub nom: String,
    /// Download URL
    pub fichier_url: String,
    /// Uploader display name
    #[serde(default)]
    pub auteur: Option<String>,
    /// ISO-8601 upload timestamp
    pub date_creation: String,
    /// Owning community, when attached directly
    #[serde(default)]
    pub community: Option<String>,
    /// Owning discussion, when attached to one
    #[serde(default)]
    pub discussion: Option<String>,
}

impl SharedFile {
    /// Parsed upload timestamp.
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(&self.date_creation)
    }
}

// ============================================================================
// ACTIVITY
// ============================================================================

/// Who performed an activity. The backend sends either a bare name or an
/// embedded user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivityActor {
    /// Display name only
    Name(String),
    /// Full user summary
    User(UserSummary),
}

impl ActivityActor {
    /// Display name of the actor.
    pub fn display_name(&self) -> &str {
        match self {
            ActivityActor::Name(name) => name,
            ActivityActor::User(user) => &user.full_name,
        }
    }
}

/// One entry of the recent-activity side channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Actor
    pub user: ActivityActor,
    /// Verb phrase ("a publié", "a partagé", ...)
    pub action: String,
    /// Discussion title the activity refers to
    #[serde(default)]
    pub discussion: Option<String>,
    /// File name the activity refers to
    #[serde(default)]
    pub fichier: Option<String>,
    /// Community name
    #[serde(default)]
    pub community: Option<String>,
}

impl Activity {
    /// The object of the activity: discussion title, else file name.
    pub fn subject(&self) -> Option<&str> {
        self.discussion.as_deref().or(self.fichier.as_deref())
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok()
}
