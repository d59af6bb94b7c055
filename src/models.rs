//! Request and response models for the API.
//!
//! All models use serde for serialization/deserialization.

use crate::auth::session::SessionStatus;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

// ============================================================================
// Auth Models
// ============================================================================

/// Login form submission.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: Zeroizing<String>,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Response from the session check endpoint.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub status: SessionStatus,
}

/// Security overview shown in the admin console status bar.
#[derive(Debug, Serialize)]
pub struct SecurityStatus {
    pub environment: &'static str,
    pub https: bool,
    pub security_headers: bool,
    pub session_valid: bool,
}

// ============================================================================
// Admin Console Models
// ============================================================================

/// The fixed set of admin console sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Dashboard,
    Specification,
    MvpDocs,
    PatternAnalysis,
    Database,
    Gallery,
}

impl Section {
    /// Menu order.
    pub const ALL: [Section; 6] = [
        Section::Dashboard,
        Section::Specification,
        Section::MvpDocs,
        Section::PatternAnalysis,
        Section::Database,
        Section::Gallery,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Specification => "specification",
            Section::MvpDocs => "mvp-docs",
            Section::PatternAnalysis => "pattern-analysis",
            Section::Database => "database",
            Section::Gallery => "gallery",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Specification => "Specification",
            Section::MvpDocs => "MVP Docs",
            Section::PatternAnalysis => "Pattern Analysis",
            Section::Database => "Database Admin",
            Section::Gallery => "Gallery",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Section::Dashboard => "📊",
            Section::Specification => "📋",
            Section::MvpDocs => "🚀",
            Section::PatternAnalysis => "🔍",
            Section::Database => "🗄️",
            Section::Gallery => "🎨",
        }
    }
}

/// One entry of the admin navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub section: Section,
    pub id: &'static str,
    pub label: &'static str,
    pub href: String,
    pub icon: &'static str,
}

/// Admin navigation menu, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Navigation {
    items: Vec<NavItem>,
}

impl Navigation {
    /// Menu with every section mounted under `prefix`. The dashboard entry
    /// links to `dashboard_path`, wherever that is configured.
    pub fn new(prefix: &str, dashboard_path: &str) -> Self {
        let prefix = prefix.trim_end_matches('/');
        let items = Section::ALL
            .iter()
            .map(|&section| NavItem {
                section,
                id: section.id(),
                label: section.label(),
                href: match section {
                    Section::Dashboard => dashboard_path.to_string(),
                    _ => format!("{}/{}", prefix, section.id()),
                },
                icon: section.icon(),
            })
            .collect();
        Navigation { items }
    }
}

/// Response for the dashboard entry route.
#[derive(Debug, Serialize)]
pub struct DashboardResponse<'a> {
    pub title: &'static str,
    pub environment: &'static str,
    pub navigation: &'a Navigation,
}
