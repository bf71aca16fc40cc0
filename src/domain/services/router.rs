#[cfg(test)]
#[path = "router_test.rs"]
mod tests;

use super::SessionStore;
use crate::domain::models::Route;
use crate::domain::models::RouteAccess;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(Route),
}

impl Resolution {
    pub fn route(&self) -> Route {
        match self {
            Resolution::Render(route) | Resolution::Redirect(route) => return *route,
        }
    }
}

pub struct Router {}

impl Router {
    /// Pure and synchronous. A route whose session condition is unmet
    /// redirects instead of rendering: protected routes fall back to the
    /// public landing page, guest-only routes fall through to home.
    pub fn resolve(target: Route, store: &SessionStore) -> Resolution {
        match target.access() {
            RouteAccess::Public => return Resolution::Render(target),
            RouteAccess::RequiresSession => {
                if !store.is_authenticated() {
                    return Resolution::Redirect(Route::Landing);
                }

                return Resolution::Render(target);
            }
            RouteAccess::RequiresGuest => {
                if store.is_authenticated() {
                    return Resolution::Redirect(Route::Home);
                }

                return Resolution::Render(target);
            }
        }
    }
}
