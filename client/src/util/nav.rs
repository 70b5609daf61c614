//! Sidebar routes and full-page browser navigation.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

/// A sidebar entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavRoute {
    pub label: &'static str,
    pub href: &'static str,
    /// Only subscribers may follow this route.
    pub pro: bool,
}

pub static ROUTES: [NavRoute; 3] = [
    NavRoute { label: "Home", href: "/", pro: false },
    NavRoute { label: "Create", href: "/companion/new", pro: true },
    NavRoute { label: "Settings", href: "/settings", pro: false },
];

/// What choosing a sidebar entry does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    Navigate(&'static str),
    OpenProModal,
}

pub fn route_action(route: &NavRoute, is_pro: bool) -> NavAction {
    if route.pro && !is_pro {
        NavAction::OpenProModal
    } else {
        NavAction::Navigate(route.href)
    }
}

/// Whether `pathname` belongs to the route at `href`.
pub fn is_active(href: &str, pathname: &str) -> bool {
    if href == "/" {
        pathname == "/"
    } else {
        pathname == href || pathname.starts_with(&format!("{href}/"))
    }
}

/// Navigate whenever `target` is set, then clear it. Handlers write the
/// target instead of holding the router's navigate function.
pub fn install_navigation<F>(target: RwSignal<Option<String>>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    Effect::new(move || {
        if let Some(href) = target.get() {
            target.set(None);
            navigate(&href, NavigateOptions::default());
        }
    });
}

/// Leave the app for `url` (Stripe checkout, OAuth).
pub fn redirect(url: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(url);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
    }
}

/// Browser history back.
pub fn go_back() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let _ = history.back();
        }
    }
}

/// Milliseconds since the Unix epoch. Zero on the server.
pub fn now_ms() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let now = js_sys::Date::now() as i64;
        now
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0
    }
}
