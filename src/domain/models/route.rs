/// Pages of the client. Which one renders is decided by the router against
/// the current session, never by the page itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    SignUp,
    Home,
    Chat,
    Upload,
    Report,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    RequiresSession,
    RequiresGuest,
}

impl Route {
    pub fn access(&self) -> RouteAccess {
        match self {
            Route::Landing => return RouteAccess::Public,
            Route::Login | Route::SignUp => return RouteAccess::RequiresGuest,
            Route::Home | Route::Chat | Route::Upload | Route::Report => {
                return RouteAccess::RequiresSession
            }
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Landing => return "HomeWorth",
            Route::Login => return "Login",
            Route::SignUp => return "Sign up",
            Route::Home => return "Home",
            Route::Chat => return "Chat",
            Route::Upload => return "Upload",
            Route::Report => return "Report",
        }
    }
}
