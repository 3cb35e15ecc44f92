//! Navigable paths.

/// The two views of the storefront. No query parameters, no route state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Catalog,
    Cart,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Catalog => "/",
            Route::Cart => "/cart",
        }
    }

    /// Resolve a path; a single trailing slash is tolerated.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim();
        let path = if path.len() > 1 {
            path.strip_suffix('/').unwrap_or(path)
        } else {
            path
        };

        match path {
            "/" => Some(Route::Catalog),
            "/cart" => Some(Route::Cart),
            _ => None,
        }
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_both_paths() {
        assert_eq!(Route::from_path("/"), Some(Route::Catalog));
        assert_eq!(Route::from_path("/cart"), Some(Route::Cart));
        assert_eq!(Route::from_path("/cart/"), Some(Route::Cart));
    }

    #[test]
    fn unknown_paths_have_no_route() {
        assert_eq!(Route::from_path("/checkout"), None);
        assert_eq!(Route::from_path("cart"), None);
        assert_eq!(Route::from_path("/cart?x=1"), None);
        assert_eq!(Route::from_path(""), None);
    }

    #[test]
    fn path_round_trips() {
        for route in [Route::Catalog, Route::Cart] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }
}
