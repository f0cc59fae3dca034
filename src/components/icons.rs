//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;
use crate::models::ActivityIcon;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuActivity as Activity, LuBookmark as Bookmark, LuCalendar as Calendar,
        LuChevronDown as ChevronDown, LuChevronLeft as ChevronLeft,
        LuChevronRight as ChevronRight, LuChevronUp as ChevronUp, LuCircle as Dot,
        LuCirclePlay as Play, LuCpu as Detections, LuDownload as Download, LuImages as Gallery,
        LuInfo as Info, LuLayoutGrid as Grid, LuList as List, LuLock as Lock, LuLogIn as SignIn,
        LuLogOut as SignOut, LuRefreshCw as Refresh, LuSettings as Gear, LuUser as User,
        LuVideo as Video, LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsActivity as Activity, BsArrowClockwise as Refresh, BsBookmark as Bookmark,
        BsBoxArrowInRight as SignIn, BsBoxArrowRight as SignOut, BsCalendar3 as Calendar,
        BsCameraVideo as Video, BsChevronDown as ChevronDown, BsChevronLeft as ChevronLeft,
        BsChevronRight as ChevronRight, BsChevronUp as ChevronUp, BsCircle as Dot,
        BsCpu as Detections, BsDownload as Download, BsGear as Gear, BsGrid as Grid,
        BsImages as Gallery, BsInfoCircle as Info, BsListUl as List, BsLockFill as Lock,
        BsPerson as User, BsPlayCircle as Play, BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

// Navigation
themed_icon!(DETECTIONS, Detections);
themed_icon!(CALENDAR, Calendar);
themed_icon!(GALLERY, Gallery);
themed_icon!(ACTIVITY, Activity);

// Controls
themed_icon!(CHEVRON_LEFT, ChevronLeft);
themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(CHEVRON_UP, ChevronUp);
themed_icon!(CHEVRON_DOWN, ChevronDown);
themed_icon!(GRID, Grid);
themed_icon!(LIST, List);
themed_icon!(CLOSE, Close);
themed_icon!(REFRESH, Refresh);

// Clip actions
themed_icon!(PLAY, Play);
themed_icon!(DOWNLOAD, Download);
themed_icon!(BOOKMARK, Bookmark);

// Activity feed
themed_icon!(SIGN_IN, SignIn);
themed_icon!(SIGN_OUT, SignOut);
themed_icon!(USER, User);
themed_icon!(LOCK, Lock);
themed_icon!(VIDEO, Video);
themed_icon!(GEAR, Gear);
themed_icon!(INFO, Info);
themed_icon!(DOT, Dot);

/// Icon for an activity feed entry.
pub fn activity(icon: ActivityIcon) -> Icon {
    match icon {
        ActivityIcon::SignIn => SIGN_IN,
        ActivityIcon::SignOut => SIGN_OUT,
        ActivityIcon::User => USER,
        ActivityIcon::Lock => LOCK,
        ActivityIcon::Video => VIDEO,
        ActivityIcon::Gear => GEAR,
        ActivityIcon::Info => INFO,
        ActivityIcon::Dot => DOT,
    }
}
