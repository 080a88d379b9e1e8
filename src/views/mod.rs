//! Screen models for the four Dishcovery screens and the path router that
//! selects between them. Screens never talk to storage or the network
//! directly; everything goes through an [`AppContext`].

pub mod catalog;
pub mod detail;
pub mod favorites;
pub mod preferences;
pub mod render;

use std::fmt;

use tracing::{debug, warn};

use crate::api_connection::BackendApi;
use crate::favorites::FavoritesStore;
use crate::preferences::PreferenceStore;
use crate::storage::SharedStore;

pub use catalog::CatalogView;
pub use detail::DetailView;
pub use favorites::FavoritesView;
pub use preferences::PreferencesView;

const DETAIL_PREFIX: &str = "/recipe/";
// Only detail screens redirect, and only to the catalog.
const MAX_REDIRECTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Catalog,
    Detail(String),
    Favorites,
    Preferences,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no screen is registered for path '{0}'")]
pub struct UnknownRoute(pub String);

impl Route {
    pub fn parse(path: &str) -> Result<Self, UnknownRoute> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        match normalized {
            "" | "/" => Ok(Route::Catalog),
            "/favorites" => Ok(Route::Favorites),
            "/preferences" => Ok(Route::Preferences),
            other => match other.strip_prefix(DETAIL_PREFIX) {
                Some(id) if !id.is_empty() && !id.contains('/') => Ok(Route::Detail(id.to_string())),
                _ => Err(UnknownRoute(path.to_string())),
            },
        }
    }

    /// Like [`Route::parse`], but unknown paths land on the catalog.
    pub fn resolve(path: &str) -> Self {
        Self::parse(path).unwrap_or_else(|e| {
            warn!(error = %e, "falling back to the catalog screen");
            Route::Catalog
        })
    }

    pub fn path(&self) -> String {
        match self {
            Route::Catalog => "/".to_string(),
            Route::Detail(id) => format!("{}{}", DETAIL_PREFIX, id),
            Route::Favorites => "/favorites".to_string(),
            Route::Preferences => "/preferences".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A transient message for the user, the terminal stand-in for a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// What a screen action produced besides its own state change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOutcome {
    pub notifications: Vec<Notification>,
    pub redirect: Option<Route>,
}

impl ViewOutcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn notify(notification: Notification) -> Self {
        Self {
            notifications: vec![notification],
            redirect: None,
        }
    }

    pub fn redirect_to(mut self, route: Route) -> Self {
        self.redirect = Some(route);
        self
    }

    pub fn has_error(&self) -> bool {
        self.notifications
            .iter()
            .any(|n| n.level == NotificationLevel::Error)
    }
}

/// Everything a screen may depend on, injected once at startup.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub api: BackendApi,
    pub preferences: PreferenceStore,
    pub favorites: FavoritesStore,
}

impl AppContext {
    pub fn new(api: BackendApi, store: SharedStore) -> Self {
        Self {
            api,
            preferences: PreferenceStore::new(store.clone()),
            favorites: FavoritesStore::new(store),
        }
    }

    /// Opens the screen for `route`, following any redirect the screen
    /// issues while loading. Notifications from every hop are kept in order.
    pub async fn open(&self, route: Route) -> (Screen, Vec<Notification>) {
        let mut notifications = Vec::new();
        let mut route = route;

        for _ in 0..MAX_REDIRECTS {
            debug!(%route, "opening screen");
            let (screen, outcome) = self.open_once(&route).await;
            notifications.extend(outcome.notifications);
            match outcome.redirect {
                Some(next) => route = next,
                None => return (screen, notifications),
            }
        }

        warn!(%route, "too many redirects, showing the catalog");
        (Screen::Catalog(CatalogView::load(self).await), notifications)
    }

    async fn open_once(&self, route: &Route) -> (Screen, ViewOutcome) {
        match route {
            Route::Catalog => (Screen::Catalog(CatalogView::load(self).await), ViewOutcome::none()),
            Route::Detail(id) => {
                let (view, outcome) = DetailView::load(self, id).await;
                (Screen::Detail(view), outcome)
            }
            Route::Favorites => (
                Screen::Favorites(FavoritesView::load(self).await),
                ViewOutcome::none(),
            ),
            Route::Preferences => (
                Screen::Preferences(PreferencesView::load(self)),
                ViewOutcome::none(),
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Screen {
    Catalog(CatalogView),
    Detail(DetailView),
    Favorites(FavoritesView),
    Preferences(PreferencesView),
}

impl Screen {
    pub fn route(&self) -> Route {
        match self {
            Screen::Catalog(_) => Route::Catalog,
            Screen::Detail(view) => Route::Detail(view.id.clone()),
            Screen::Favorites(_) => Route::Favorites,
            Screen::Preferences(_) => Route::Preferences,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Catalog(view) => fmt::Display::fmt(view, f),
            Screen::Detail(view) => fmt::Display::fmt(view, f),
            Screen::Favorites(view) => fmt::Display::fmt(view, f),
            Screen::Preferences(view) => fmt::Display::fmt(view, f),
        }
    }
}
