use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use clap::ValueEnum;

use crate::state::AppState;
use crate::views::{self, ContentRegion};

/// The four entries of the navigation bar
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum NavKey {
    Profile,
    Releases,
    Admin,
    Help,
}

impl NavKey {
    pub const ALL: [NavKey; 4] = [NavKey::Profile, NavKey::Releases, NavKey::Admin, NavKey::Help];

    pub fn label(self) -> &'static str {
        match self {
            NavKey::Profile => "Profile",
            NavKey::Releases => "Releases",
            NavKey::Admin => "Admin Panel",
            NavKey::Help => "Help",
        }
    }
}

pub type ViewFuture<'a> = Pin<Box<dyn Future<Output = ()> + 'a>>;

/// A view's render entry point
pub type ViewHandler = for<'a> fn(&'a AppState, &'a mut dyn ContentRegion) -> ViewFuture<'a>;

/// Dispatch table from navigation keys to views
pub struct Router {
    routes: HashMap<NavKey, ViewHandler>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Router with every navigation key wired to its view
    pub fn new() -> Self {
        let mut router = Self {
            routes: HashMap::new(),
        };
        router.register(NavKey::Profile, profile_view);
        router.register(NavKey::Releases, releases_view);
        router.register(NavKey::Admin, admin_view);
        router.register(NavKey::Help, help_view);
        router
    }

    /// Wire a key to a handler, replacing any previous one
    pub fn register(&mut self, key: NavKey, handler: ViewHandler) {
        self.routes.insert(key, handler);
    }

    /// Render the view for `key` into `region`
    pub async fn dispatch(&self, key: NavKey, state: &AppState, region: &mut dyn ContentRegion) {
        tracing::debug!(view = ?key, "Navigating");
        match self.routes.get(&key) {
            Some(handler) => handler(state, region).await,
            None => tracing::warn!(view = ?key, "No view registered"),
        }
    }
}

fn profile_view<'a>(state: &'a AppState, region: &'a mut dyn ContentRegion) -> ViewFuture<'a> {
    Box::pin(views::profile::load(state, region))
}

fn releases_view<'a>(state: &'a AppState, region: &'a mut dyn ContentRegion) -> ViewFuture<'a> {
    Box::pin(views::releases::load(state, region))
}

fn admin_view<'a>(state: &'a AppState, region: &'a mut dyn ContentRegion) -> ViewFuture<'a> {
    Box::pin(views::admin::load(state, region))
}

fn help_view<'a>(_state: &'a AppState, region: &'a mut dyn ContentRegion) -> ViewFuture<'a> {
    Box::pin(async move { views::help::show(region) })
}
