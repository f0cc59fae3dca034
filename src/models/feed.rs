//! Activity feed items derived from audit log entries.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::lenient;
use crate::utils::format::{format_relative, parse_timestamp};

/// One entry of the dashboard summary's `recent_logs`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ActivityLog {
    pub id: Value,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub action: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub created_at: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeedCategory {
    Auth,
    Profile,
    Camera,
    System,
}

impl FeedCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Profile => "profile",
            Self::Camera => "camera",
            Self::System => "system",
        }
    }

    pub fn categorize(action: Option<&str>) -> Self {
        let Some(action) = action else {
            return Self::System;
        };
        let has = |needle: &str| action.contains(needle);
        if has("auth.") || has("login") || has("register") {
            Self::Auth
        } else if has("profile") || has("account.") {
            Self::Profile
        } else if has("camera") || has("feed") {
            Self::Camera
        } else {
            Self::System
        }
    }
}

/// Filter buttons above the feed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeedFilter {
    #[default]
    All,
    Only(FeedCategory),
}

impl FeedFilter {
    pub const ALL: [FeedFilter; 5] = [
        Self::All,
        Self::Only(FeedCategory::Auth),
        Self::Only(FeedCategory::Profile),
        Self::Only(FeedCategory::Camera),
        Self::Only(FeedCategory::System),
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(FeedCategory::Auth) => "Sign-ins",
            Self::Only(FeedCategory::Profile) => "Profile",
            Self::Only(FeedCategory::Camera) => "Cameras",
            Self::Only(FeedCategory::System) => "System",
        }
    }

    pub fn matches(self, item: &FeedItem) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => item.category == category,
        }
    }
}

/// Glyph shown next to a feed item; mapped to an icon in the view layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityIcon {
    SignIn,
    SignOut,
    User,
    Lock,
    Video,
    Gear,
    Info,
    Dot,
}

impl ActivityIcon {
    pub fn for_action(action: Option<&str>) -> Self {
        let Some(action) = action else {
            return Self::Dot;
        };
        let has = |needle: &str| action.contains(needle);
        if has("login") || has("register") {
            Self::SignIn
        } else if has("logout") {
            Self::SignOut
        } else if has("profile") || has("account") {
            Self::User
        } else if has("password") {
            Self::Lock
        } else if has("camera") {
            Self::Video
        } else if has("settings") {
            Self::Gear
        } else {
            Self::Info
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeedItem {
    pub id: String,
    pub category: FeedCategory,
    pub title: String,
    pub description: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub icon: ActivityIcon,
}

impl FeedItem {
    pub fn from_log(log: &ActivityLog) -> Self {
        let action = log.action.as_deref();
        Self {
            id: match &log.id {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
            category: FeedCategory::categorize(action),
            title: action_title(action),
            description: log
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| action_description(action)),
            timestamp: log.created_at.as_deref().and_then(parse_timestamp),
            icon: ActivityIcon::for_action(action),
        }
    }

    /// Relative time label; empty when the entry has no timestamp.
    pub fn when(&self, now: DateTime<Utc>) -> String {
        self.timestamp
            .map(|t| format_relative(t, now))
            .unwrap_or_default()
    }
}

/// Last dotted segment in Title Case ("account.password_reset" → "Password Reset").
pub fn action_title(action: Option<&str>) -> String {
    let Some(action) = action else {
        return "Activity".to_string();
    };
    let last = action.rsplit('.').next().unwrap_or(action);
    last.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn action_description(action: Option<&str>) -> String {
    let Some(action) = action else {
        return "Activity occurred".to_string();
    };
    let known = match action {
        "auth.login" => "You logged into your account",
        "auth.register" => "You created a new account",
        "auth.logout" => "You logged out",
        "account.profile.update" => "You updated your profile information",
        "account.password.update" => "You changed your password",
        "account.organization.update" => "You updated your organization details",
        "settings.notifications.update" => "You updated notification preferences",
        "settings.automation.update" => "You updated automation settings",
        other => return format!("Action: {}", other),
    };
    known.to_string()
}

pub fn feed_items(logs: &[ActivityLog]) -> Vec<FeedItem> {
    logs.iter().map(FeedItem::from_log).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_categorize() {
        assert_eq!(FeedCategory::categorize(Some("auth.login")), FeedCategory::Auth);
        assert_eq!(FeedCategory::categorize(Some("user.register")), FeedCategory::Auth);
        assert_eq!(FeedCategory::categorize(Some("account.profile.update")), FeedCategory::Profile);
        assert_eq!(FeedCategory::categorize(Some("camera.added")), FeedCategory::Camera);
        assert_eq!(FeedCategory::categorize(Some("live_feed.opened")), FeedCategory::Camera);
        assert_eq!(FeedCategory::categorize(Some("settings.automation.update")), FeedCategory::System);
        assert_eq!(FeedCategory::categorize(None), FeedCategory::System);
    }

    #[test]
    fn test_title() {
        assert_eq!(action_title(Some("auth.login")), "Login");
        assert_eq!(action_title(Some("account.password_reset")), "Password Reset");
        assert_eq!(action_title(Some("heartbeat")), "Heartbeat");
        assert_eq!(action_title(None), "Activity");
    }

    #[test]
    fn test_description() {
        assert_eq!(action_description(Some("auth.logout")), "You logged out");
        assert_eq!(
            action_description(Some("settings.notifications.update")),
            "You updated notification preferences"
        );
        assert_eq!(action_description(Some("camera.added")), "Action: camera.added");
        assert_eq!(action_description(None), "Activity occurred");
    }

    #[test]
    fn test_icon_precedence() {
        assert_eq!(ActivityIcon::for_action(Some("auth.login")), ActivityIcon::SignIn);
        assert_eq!(ActivityIcon::for_action(Some("auth.logout")), ActivityIcon::SignOut);
        assert_eq!(ActivityIcon::for_action(Some("account.password.update")), ActivityIcon::User);
        assert_eq!(ActivityIcon::for_action(Some("user.password.reset")), ActivityIcon::Lock);
        assert_eq!(ActivityIcon::for_action(Some("camera.added")), ActivityIcon::Video);
        assert_eq!(ActivityIcon::for_action(Some("settings.automation.update")), ActivityIcon::Gear);
        assert_eq!(ActivityIcon::for_action(Some("export.done")), ActivityIcon::Info);
        assert_eq!(ActivityIcon::for_action(None), ActivityIcon::Dot);
    }

    #[test]
    fn test_items_and_filter() {
        let logs: Vec<ActivityLog> = serde_json::from_value(json!([
            { "id": 1, "action": "auth.login", "created_at": "2024-05-10T11:55:00Z" },
            { "id": 2, "action": "camera.added", "description": "Dock camera online" },
            { "id": 3, "action": "account.profile.update", "description": "" }
        ]))
        .unwrap();
        let items = feed_items(&logs);

        assert_eq!(items[0].id, "1");
        assert_eq!(items[0].description, "You logged into your account");
        assert_eq!(items[1].description, "Dock camera online");
        assert_eq!(items[2].description, "You updated your profile information");

        let now = parse_timestamp("2024-05-10T12:00:00Z").unwrap();
        assert_eq!(items[0].when(now), "5 minutes ago");
        assert_eq!(items[1].when(now), "");

        let camera = FeedFilter::Only(FeedCategory::Camera);
        let shown: Vec<_> = items.iter().filter(|i| camera.matches(i)).collect();
        assert_eq!(shown.len(), 1);
        assert!(items.iter().all(|i| FeedFilter::All.matches(i)));
    }
}
