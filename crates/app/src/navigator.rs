//! Path-based navigation with route-change auditing.

use std::sync::Arc;

use applica_core::audit::{event_names, fields};
use applica_core::route::{Route, View};
use applica_events::AuditSink;

/// Tracks the current route.
///
/// Navigation never checks prerequisites: any known path can be reached at
/// any time, and unknown paths land on the entry route.
pub struct Navigator {
    current: Route,
    audit: Arc<dyn AuditSink>,
}

impl Navigator {
    /// Start on the entry route.
    pub fn new(audit: Arc<dyn AuditSink>) -> Self {
        Self {
            current: Route::Entry,
            audit,
        }
    }

    /// Go to `path`, returning the view it selects.
    pub fn navigate(&mut self, path: &str) -> View {
        let route = Route::resolve(path);
        if Route::parse(path).is_none() {
            tracing::debug!(path, "Unknown path, redirecting to entry");
        }
        self.go(route)
    }

    /// Go to a known route.
    pub fn go(&mut self, route: Route) -> View {
        self.current = route;

        let view = route.view();
        tracing::info!(path = route.path(), view = view.label(), "Navigated");
        self.audit.record_event(
            event_names::ROUTE_CHANGE,
            serde_json::json!({
                (fields::PATH): route.path(),
                (fields::SCREEN): view.label(),
            }),
        );
        view
    }

    pub fn current_route(&self) -> Route {
        self.current
    }

    pub fn current_view(&self) -> View {
        self.current.view()
    }
}
