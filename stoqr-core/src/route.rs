//! Client routes and path parsing

use std::fmt;
use std::str::FromStr;

use crate::item::ItemId;

/// A screen the client can show
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/items` - list and search
    #[default]
    Items,
    /// `/items/create`
    Create,
    /// `/items/qr/:id`
    Qr(ItemId),
    /// `/items/report`
    Report,
    /// `/items/withdraw/:id`
    Withdraw(ItemId),
}

impl Route {
    /// Canonical path for this route
    pub fn path(&self) -> String {
        match self {
            Route::Items => "/items".into(),
            Route::Create => "/items/create".into(),
            Route::Qr(id) => format!("/items/qr/{}", id),
            Route::Report => "/items/report".into(),
            Route::Withdraw(id) => format!("/items/withdraw/{}", id),
        }
    }

    /// Short title for the menu bar
    pub fn title(&self) -> &'static str {
        match self {
            Route::Items => "Items",
            Route::Create => "Create item",
            Route::Qr(_) => "QR code",
            Route::Report => "Report",
            Route::Withdraw(_) => "Withdraw",
        }
    }

    /// Whether requests issued for this screen are scoped to its lifetime
    pub fn owns_lookup(&self) -> bool {
        matches!(self, Route::Qr(_) | Route::Withdraw(_))
    }

    /// Parse a path or a full URL (as encoded in a QR code).
    ///
    /// `/` redirects to `/items`. Query strings and fragments are ignored.
    pub fn parse(input: &str) -> Option<Route> {
        let path = strip_origin(input.trim());
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        // Most specific patterns first
        match segments.as_slice() {
            [] => Some(Route::Items),
            ["items", "qr", id] => parse_id(id).map(Route::Qr),
            ["items", "withdraw", id] => parse_id(id).map(Route::Withdraw),
            ["items", "create"] => Some(Route::Create),
            ["items", "report"] => Some(Route::Report),
            ["items"] => Some(Route::Items),
            _ => None,
        }
    }
}

fn strip_origin(input: &str) -> &str {
    match input.find("://") {
        Some(scheme_end) => {
            let rest = &input[scheme_end + 3..];
            rest.find('/').map(|i| &rest[i..]).unwrap_or("/")
        }
        None => input,
    }
}

fn parse_id(raw: &str) -> Option<ItemId> {
    raw.parse::<i64>().ok().map(ItemId)
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Unknown path error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRoute(pub String);

impl fmt::Display for UnknownRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no screen matches '{}'", self.0)
    }
}

impl std::error::Error for UnknownRoute {}

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s).ok_or_else(|| UnknownRoute(s.to_string()))
    }
}
