//! Hash-based routing.

/// Application routes for hash-based navigation.
/// URL format: `#/listings`, `#/property/4`, `#/dashboard`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppRoute {
    /// Landing page with featured listings: #/ or empty hash
    Home,
    Listings,
    /// Single property: #/property/{id}
    Property(u32),
    Favorites,
    /// Wallet-gated area: #/dashboard
    Dashboard,
    NotFound,
}

impl AppRoute {
    /// Parse URL hash into a route
    pub fn from_hash(hash: &str) -> Self {
        let path = hash
            .trim_start_matches('#')
            .trim_start_matches('/')
            .trim_end_matches('/');

        let mut segments = path.split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(""), None, None) => Self::Home,
            (Some("listings"), None, None) => Self::Listings,
            (Some("favorites"), None, None) => Self::Favorites,
            (Some("dashboard"), None, None) => Self::Dashboard,
            (Some("property"), Some(id), None) => {
                id.parse().map(Self::Property).unwrap_or(Self::NotFound)
            }
            _ => Self::NotFound,
        }
    }

    /// Convert route to URL hash
    pub fn to_hash(&self) -> String {
        match self {
            Self::Home | Self::NotFound => "#/".to_string(),
            Self::Listings => "#/listings".to_string(),
            Self::Property(id) => format!("#/property/{}", id),
            Self::Favorites => "#/favorites".to_string(),
            Self::Dashboard => "#/dashboard".to_string(),
        }
    }

    /// Get current route from browser URL
    pub fn current() -> Self {
        Self::from_hash(&crate::utils::dom::get_hash())
    }

    /// Navigate to this route (adds to browser history).
    ///
    /// Sets `location.hash`, so the browser fires `hashchange` itself and the
    /// router listener picks the route up; no manual dispatch is needed.
    pub fn push(&self) {
        crate::utils::dom::set_hash(&self.to_hash());
    }

    /// Whether a navbar link for `self` should render as active.
    ///
    /// A property page highlights the Listings link.
    pub fn highlights(&self, link: AppRoute) -> bool {
        match (self, link) {
            (Self::Property(_), AppRoute::Listings) => true,
            _ => *self == link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parsing() {
        assert_eq!(AppRoute::from_hash(""), AppRoute::Home);
        assert_eq!(AppRoute::from_hash("#"), AppRoute::Home);
        assert_eq!(AppRoute::from_hash("#/"), AppRoute::Home);
        assert_eq!(AppRoute::from_hash("#/listings"), AppRoute::Listings);
        assert_eq!(AppRoute::from_hash("#/listings/"), AppRoute::Listings);
        assert_eq!(AppRoute::from_hash("#/favorites"), AppRoute::Favorites);
        assert_eq!(AppRoute::from_hash("#/dashboard"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_hash("#/property/4"), AppRoute::Property(4));
    }

    #[test]
    fn test_unknown_routes() {
        assert_eq!(AppRoute::from_hash("#/property/abc"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_hash("#/property"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_hash("#/property/1/extra"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_hash("#/admin"), AppRoute::NotFound);
    }

    #[test]
    fn test_route_to_hash() {
        assert_eq!(AppRoute::Home.to_hash(), "#/");
        assert_eq!(AppRoute::Property(12).to_hash(), "#/property/12");
        for route in [
            AppRoute::Listings,
            AppRoute::Favorites,
            AppRoute::Dashboard,
            AppRoute::Property(3),
        ] {
            assert_eq!(AppRoute::from_hash(&route.to_hash()), route);
        }
    }

    #[test]
    fn test_highlights() {
        assert!(AppRoute::Property(2).highlights(AppRoute::Listings));
        assert!(AppRoute::Dashboard.highlights(AppRoute::Dashboard));
        assert!(!AppRoute::Home.highlights(AppRoute::Listings));
    }
}
