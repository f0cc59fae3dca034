//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application,
//! including the fixed set of store resources.

use crate::core::store::descriptor::{array_field, identity};
use crate::core::store::{DescriptorRegistry, ResourceDescriptor};

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the navigation bar.
pub const APP_NAME: &str = "Orbsurv";

// =============================================================================
// Storage Configuration
// =============================================================================

/// Prefix applied to every localStorage key written by the app.
pub const STORAGE_NAMESPACE: &str = "orbsurv:";

/// Preference keys (namespaced by [`STORAGE_NAMESPACE`] on write).
pub mod pref_keys {
    pub const AI_FILTERS: &str = "ai:filters";
    pub const AI_MEMORY_COLLAPSED: &str = "ai:memoryCollapsed";
    pub const CALENDAR_VIEW: &str = "calendar:view";
    pub const CALENDAR_SELECTED: &str = "calendar:selected";
    pub const CALENDAR_DRAWER_COLLAPSED: &str = "calendar:drawerCollapsed";
    pub const GALLERY_FILTER: &str = "gallery:filter";
    pub const GALLERY_VIEW: &str = "gallery:view";
}

// =============================================================================
// Network Configuration
// =============================================================================

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 10000;

/// Store resource names.
pub mod resources {
    pub const DETECTIONS: &str = "detections";
    pub const CLIPS: &str = "clips";
    pub const RAIL: &str = "rail";
    pub const ACTIVITY: &str = "activity";
}

fn unwrap_detections(raw: &serde_json::Value) -> serde_json::Value {
    array_field(raw, "detections")
}

fn unwrap_days(raw: &serde_json::Value) -> serde_json::Value {
    array_field(raw, "days")
}

fn unwrap_recent_logs(raw: &serde_json::Value) -> serde_json::Value {
    array_field(raw, "recent_logs")
}

/// The fixed set of resources the store can serve.
pub fn resource_registry() -> DescriptorRegistry {
    DescriptorRegistry::new([
        ResourceDescriptor::new(resources::DETECTIONS, "data/detections.json", unwrap_detections),
        ResourceDescriptor::new(resources::CLIPS, "data/clips.json", unwrap_days),
        ResourceDescriptor::new(resources::RAIL, "data/rail.json", identity),
        ResourceDescriptor::new(
            resources::ACTIVITY,
            "/api/v1/app/dashboard/summary",
            unwrap_recent_logs,
        ),
    ])
}

// =============================================================================
// Page Defaults
// =============================================================================

/// Initial AI detection filters.
pub mod detection_defaults {
    pub const LABEL: &str = "all";
    pub const CONFIDENCE: f64 = 0.6;
    pub const RANGE_HOURS: u32 = 24;
}

/// Gallery cards revealed per "load more".
pub const GALLERY_CHUNK: usize = 9;

/// Thumbnail used when a clip has none.
pub const PLACEHOLDER_THUMBNAIL: &str = "img/placeholders/clip-01.svg";

/// Viewport observer tuning.
pub mod lazy_load {
    /// Images start loading this far outside the viewport.
    pub const IMAGE_ROOT_MARGIN: &str = "24px";
    pub const IMAGE_THRESHOLD: f64 = 0.2;
    /// Gallery "load more" sentinel margin.
    pub const SENTINEL_ROOT_MARGIN: &str = "48px";
    pub const SENTINEL_THRESHOLD: f64 = 0.0;
}

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
/// Change this value to switch icon styles globally.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_has_every_resource() {
        let registry = resource_registry();
        for name in [
            resources::DETECTIONS,
            resources::CLIPS,
            resources::RAIL,
            resources::ACTIVITY,
        ] {
            assert!(registry.get(name).is_ok(), "missing {}", name);
        }
        assert!(registry.get("users").is_err());
    }

    #[test]
    fn test_unwraps_tolerate_empty_documents() {
        let registry = resource_registry();
        let empty = json!({});
        assert_eq!(registry.get(resources::DETECTIONS).unwrap().hydrate(&empty), json!([]));
        assert_eq!(registry.get(resources::CLIPS).unwrap().hydrate(&empty), json!([]));
        assert_eq!(registry.get(resources::ACTIVITY).unwrap().hydrate(&empty), json!([]));
        assert_eq!(registry.get(resources::RAIL).unwrap().hydrate(&empty), json!({}));
    }

    #[test]
    fn test_activity_unwraps_recent_logs() {
        let registry = resource_registry();
        let raw = json!({ "recent_logs": [{ "id": 1, "action": "auth.login" }], "stats": {} });
        assert_eq!(
            registry.get(resources::ACTIVITY).unwrap().hydrate(&raw),
            json!([{ "id": 1, "action": "auth.login" }])
        );
    }
}
