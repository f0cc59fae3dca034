//! Hash-based routing between the dashboard pages

/// Application pages, addressed by URL hash (e.g., `#/calendar`).
///
/// Unknown or empty hashes land on the gallery.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Route {
    /// AI detections: #/ai
    Detections,
    /// Clip calendar: #/calendar
    Calendar,
    /// Clip gallery: #/gallery
    #[default]
    Gallery,
    /// Activity feed: #/feed
    Feed,
}

impl Route {
    /// All pages in navigation order.
    pub const ALL: [Route; 4] = [Self::Detections, Self::Calendar, Self::Gallery, Self::Feed];

    /// Parse URL hash into Route
    pub fn from_hash(hash: &str) -> Self {
        let path = hash.trim_start_matches('#').trim_start_matches('/');
        let page = path.split(['/', '?']).next().unwrap_or_default();

        match page {
            "ai" => Self::Detections,
            "calendar" => Self::Calendar,
            "feed" => Self::Feed,
            _ => Self::Gallery,
        }
    }

    /// Convert Route to URL hash
    pub fn to_hash(self) -> &'static str {
        match self {
            Self::Detections => "#/ai",
            Self::Calendar => "#/calendar",
            Self::Gallery => "#/gallery",
            Self::Feed => "#/feed",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Detections => "AI Detections",
            Self::Calendar => "Calendar",
            Self::Gallery => "Gallery",
            Self::Feed => "Activity",
        }
    }

    /// Get current route from browser URL
    pub fn current() -> Self {
        Self::from_hash(&crate::utils::dom::get_hash())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parsing() {
        assert_eq!(Route::from_hash(""), Route::Gallery);
        assert_eq!(Route::from_hash("#"), Route::Gallery);
        assert_eq!(Route::from_hash("#/"), Route::Gallery);
        assert_eq!(Route::from_hash("#/ai"), Route::Detections);
        assert_eq!(Route::from_hash("#/calendar"), Route::Calendar);
        assert_eq!(Route::from_hash("#/calendar/2024-05"), Route::Calendar);
        assert_eq!(Route::from_hash("#/feed?filter=auth"), Route::Feed);
        assert_eq!(Route::from_hash("#/gallery"), Route::Gallery);
        assert_eq!(Route::from_hash("#/unknown"), Route::Gallery);
    }

    #[test]
    fn test_route_to_hash() {
        for route in Route::ALL {
            assert_eq!(Route::from_hash(route.to_hash()), route);
        }
        assert_eq!(Route::Detections.to_hash(), "#/ai");
    }
}
