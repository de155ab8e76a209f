// ── Route table and navigation guard ──
//
// Every consumer entry point is a route. Before a route is entered the
// guard checks the session: protected routes need a token, and the login
// route bounces signed-in users to the dashboard.

use std::fmt;

use crate::error::CoreError;
use crate::store::AuthStore;

/// A resolved route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Addresses,
    Trucks,
    Orders,
    CreateOrder,
    EditOrder(String),
    OrderDetails(String),
    Trips,
}

/// Static description of one entry in the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRecord {
    pub path: &'static str,
    pub name: &'static str,
    pub requires_auth: bool,
}

pub const ROUTES: &[RouteRecord] = &[
    RouteRecord {
        path: "/login",
        name: "login",
        requires_auth: false,
    },
    RouteRecord {
        path: "/",
        name: "dashboard",
        requires_auth: true,
    },
    RouteRecord {
        path: "/addresses",
        name: "addresses",
        requires_auth: true,
    },
    RouteRecord {
        path: "/trucks",
        name: "trucks",
        requires_auth: true,
    },
    RouteRecord {
        path: "/orders",
        name: "orders",
        requires_auth: true,
    },
    RouteRecord {
        path: "/orders/create",
        name: "create-order",
        requires_auth: true,
    },
    RouteRecord {
        path: "/orders/edit/:id",
        name: "edit-order",
        requires_auth: true,
    },
    RouteRecord {
        path: "/orders/:id",
        name: "order-details",
        requires_auth: true,
    },
    RouteRecord {
        path: "/trips",
        name: "trips",
        requires_auth: true,
    },
];

impl Route {
    /// Match a path against the route table. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let route = match segments.as_slice() {
            [] => Self::Dashboard,
            ["login"] => Self::Login,
            ["addresses"] => Self::Addresses,
            ["trucks"] => Self::Trucks,
            ["orders"] => Self::Orders,
            ["orders", "create"] => Self::CreateOrder,
            ["orders", "edit", id] => Self::EditOrder((*id).to_owned()),
            ["orders", id] => Self::OrderDetails((*id).to_owned()),
            ["trips"] => Self::Trips,
            _ => return None,
        };
        Some(route)
    }

    pub fn record(&self) -> &'static RouteRecord {
        let index = match self {
            Self::Login => 0,
            Self::Dashboard => 1,
            Self::Addresses => 2,
            Self::Trucks => 3,
            Self::Orders => 4,
            Self::CreateOrder => 5,
            Self::EditOrder(_) => 6,
            Self::OrderDetails(_) => 7,
            Self::Trips => 8,
        };
        &ROUTES[index]
    }

    pub fn name(&self) -> &'static str {
        self.record().name
    }

    pub fn requires_auth(&self) -> bool {
        self.record().requires_auth
    }

    /// Concrete path with parameters filled in.
    pub fn path(&self) -> String {
        match self {
            Self::EditOrder(id) => format!("/orders/edit/{id}"),
            Self::OrderDetails(id) => format!("/orders/{id}"),
            other => other.record().path.to_owned(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl std::str::FromStr for Route {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::UnknownRoute { path: s.to_owned() })
    }
}

/// Outcome of the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed(Route),
    Redirect(Route),
}

impl Navigation {
    /// Where navigation ends up either way.
    pub fn target(&self) -> &Route {
        match self {
            Self::Proceed(route) | Self::Redirect(route) => route,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}

/// Decide whether `to` may be entered.
///
/// Without a token held in memory the persisted session is restored first,
/// and the decision waits for it.
pub async fn before_each(auth: &AuthStore, to: Route) -> Navigation {
    if !auth.is_authenticated() {
        auth.initialize().await;
    }
    decide(auth.is_authenticated(), to)
}

fn decide(authenticated: bool, to: Route) -> Navigation {
    if to.requires_auth() && !authenticated {
        Navigation::Redirect(Route::Login)
    } else if to == Route::Login && authenticated {
        Navigation::Redirect(Route::Dashboard)
    } else {
        Navigation::Proceed(to)
    }
}
