//! Route table, view selection and bottom navigation items.
//!
//! Paths map onto exactly one [`Route`]; anything unrecognised resolves to
//! [`Route::Entry`]. Views follow a linear order (onboarding, purpose test,
//! missions, feed) but reaching a later view is never blocked here.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

/// One of the application's known paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Entry,
    Onboarding,
    PurposeTest,
    Missions,
    Feed,
    Profile,
}

/// Every route, in path-table order.
pub const ALL_ROUTES: &[Route] = &[
    Route::Entry,
    Route::Onboarding,
    Route::PurposeTest,
    Route::Missions,
    Route::Feed,
    Route::Profile,
];

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Entry => "/",
            Self::Onboarding => "/onboarding",
            Self::PurposeTest => "/purpose-test",
            Self::Missions => "/missions",
            Self::Feed => "/feed",
            Self::Profile => "/profile",
        }
    }

    /// Match a path exactly, ignoring a trailing slash, query and fragment.
    pub fn parse(path: &str) -> Option<Self> {
        let normalized = normalize_path(path);
        ALL_ROUTES.iter().copied().find(|r| r.path() == normalized)
    }

    /// Match a path, redirecting unknown paths to the entry route.
    pub fn resolve(path: &str) -> Self {
        Self::parse(path).unwrap_or(Self::Entry)
    }

    pub fn view(self) -> View {
        match self {
            Self::Entry | Self::Onboarding => View::Onboarding,
            Self::PurposeTest => View::PurposeTest,
            Self::Missions => View::Missions,
            Self::Feed => View::Feed,
            Self::Profile => View::Profile,
        }
    }
}

/// Strip query string, fragment and trailing slashes. The root stays `/`.
fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// A full-screen view selected by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Onboarding,
    PurposeTest,
    Missions,
    Feed,
    Profile,
}

impl View {
    /// Canonical route for this view.
    pub fn route(self) -> Route {
        match self {
            Self::Onboarding => Route::Onboarding,
            Self::PurposeTest => Route::PurposeTest,
            Self::Missions => Route::Missions,
            Self::Feed => Route::Feed,
            Self::Profile => Route::Profile,
        }
    }

    /// The view reached by this view's primary action, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Onboarding => Some(Self::PurposeTest),
            Self::PurposeTest => Some(Self::Missions),
            Self::Missions => Some(Self::Feed),
            Self::Feed | Self::Profile => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Onboarding => "Onboarding",
            Self::PurposeTest => "Purpose Test",
            Self::Missions => "Missions",
            Self::Feed => "Feed",
            Self::Profile => "Profile",
        }
    }
}

// ---------------------------------------------------------------------------
// Bottom navigation
// ---------------------------------------------------------------------------

/// A link in the bottom navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub route: Route,
    pub label: &'static str,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        route: Route::Feed,
        label: "Home",
    },
    NavItem {
        route: Route::Missions,
        label: "Missions",
    },
    NavItem {
        route: Route::Profile,
        label: "Profile",
    },
];

/// A nav item is active on its own path and on any nested path below it.
pub fn is_nav_active(item: &NavItem, current_path: &str) -> bool {
    let current = normalize_path(current_path);
    let target = item.route.path();
    current == target
        || current
            .strip_prefix(target)
            .is_some_and(|rest| rest.starts_with('/'))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
