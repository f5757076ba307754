//! Selectable sections of the community view.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// One of the four sections of the community view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabIdentifier {
    /// Community description; never fetched
    About,
    /// `community-members` envelope
    Members,
    /// `discussions` envelope
    Discussions,
    /// `fichiers` envelope
    Resources,
}

impl TabIdentifier {
    /// Every tab, in menu order.
    pub const ALL: [TabIdentifier; 4] = [
        TabIdentifier::About,
        TabIdentifier::Members,
        TabIdentifier::Discussions,
        TabIdentifier::Resources,
    ];

    /// Canonical value.
    pub fn as_str(&self) -> &'static str {
        match self {
            TabIdentifier::About => "about",
            TabIdentifier::Members => "members",
            TabIdentifier::Discussions => "discussions",
            TabIdentifier::Resources => "resources",
        }
    }

    /// Route segment used by the tab view (`/communities/{id}/{slug}`).
    pub fn route_slug(&self) -> &'static str {
        match self {
            TabIdentifier::About => "a-propos",
            TabIdentifier::Members => "membres",
            TabIdentifier::Discussions => "discussions",
            TabIdentifier::Resources => "ressources",
        }
    }

    /// Menu label.
    pub fn label(&self) -> &'static str {
        match self {
            TabIdentifier::About => "À Propos",
            TabIdentifier::Members => "Membres",
            TabIdentifier::Discussions => "Discussions",
            TabIdentifier::Resources => "Ressources",
        }
    }
}

impl fmt::Display for TabIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TabIdentifier {
    type Err = Error;

    /// Accepts canonical values, route slugs and menu labels
    /// (case-insensitive).
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "about" | "a-propos" | "à propos" | "a propos" => Ok(TabIdentifier::About),
            "members" | "membres" => Ok(TabIdentifier::Members),
            "discussions" => Ok(TabIdentifier::Discussions),
            "resources" | "ressources" => Ok(TabIdentifier::Resources),
            _ => Err(Error::UnknownTab(raw.to_string())),
        }
    }
}
