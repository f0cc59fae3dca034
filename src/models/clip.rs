//! Recorded clip data and the gallery card projection.
//!
//! `data/clips.json` carries `days` (each with its clips) and `weeks` (the
//! same days grouped for the week view).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;
use crate::config::{GALLERY_CHUNK, PLACEHOLDER_THUMBNAIL};
use crate::utils::format::{
    format_clock, format_long_date, format_short_date, parse_date, parse_timestamp, percent,
};

// ============================================================================
// Document
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClipsDoc {
    #[serde(deserialize_with = "lenient::list")]
    pub days: Vec<Day>,
    #[serde(deserialize_with = "lenient::list")]
    pub weeks: Vec<Week>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Day {
    /// ISO date (YYYY-MM-DD).
    #[serde(deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(deserialize_with = "lenient::count")]
    pub clip_count: u32,
    /// Label name to count.
    #[serde(deserialize_with = "lenient::object")]
    pub detected_labels: Map<String, Value>,
    #[serde(deserialize_with = "lenient::list")]
    pub clips: Vec<Clip>,
}

impl Day {
    pub fn naive_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Drawer subtitle: "3 clip(s) • Person, Vehicle".
    pub fn meta(&self) -> String {
        let labels = self
            .detected_labels
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let labels = if labels.is_empty() { "No labels" } else { labels.as_str() };
        format!("{} clip(s) • {}", self.clip_count, labels)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Week {
    /// ISO date of the week's first day.
    #[serde(deserialize_with = "lenient::string")]
    pub week_of: String,
    #[serde(deserialize_with = "lenient::list")]
    pub days: Vec<Day>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Clip {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient::opt_number")]
    pub confidence: Option<f64>,
    /// Seconds.
    #[serde(deserialize_with = "lenient::opt_number")]
    pub duration: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub thumbnail: Option<String>,
    /// RFC 3339 start time.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub start: Option<String>,
}

impl Clip {
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.start.as_deref().and_then(parse_timestamp)
    }

    pub fn confidence_percent(&self) -> i64 {
        percent(self.confidence.unwrap_or(0.0))
    }

    /// Start time as "HH:MM", empty when unknown.
    pub fn clock(&self) -> String {
        self.started_at().map(|t| format_clock(&t)).unwrap_or_default()
    }
}

// ============================================================================
// Gallery Cards
// ============================================================================

/// One flattened clip as shown in the gallery.
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryCard {
    pub id: String,
    pub label: String,
    pub confidence: i64,
    pub duration: f64,
    pub thumbnail: String,
    pub summary: String,
    /// "May 1"
    pub date: String,
    /// "HH:MM"
    pub time: String,
    started_at: Option<DateTime<Utc>>,
    day: Option<NaiveDate>,
}

impl GalleryCard {
    fn from_clip(clip: &Clip, day: &Day) -> Self {
        let naive = day.naive_date();
        Self {
            id: clip.id.clone(),
            label: clip.label.clone().unwrap_or_else(|| "Custom".to_string()),
            confidence: clip.confidence_percent(),
            duration: clip.duration.unwrap_or(0.0),
            thumbnail: clip
                .thumbnail
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_THUMBNAIL.to_string()),
            summary: clip_summary(clip, naive),
            date: naive.map(format_short_date).unwrap_or_else(|| day.date.clone()),
            time: clip.clock(),
            started_at: clip.started_at(),
            day: naive,
        }
    }
}

/// "Person captured May 1 • 12s", or "Event captured May 1 • moment".
fn clip_summary(clip: &Clip, date: Option<NaiveDate>) -> String {
    let base = clip.label.as_deref().unwrap_or("Event");
    let duration = match clip.duration {
        Some(d) if d != 0.0 => format!("{}s", d),
        _ => "moment".to_string(),
    };
    let date = date.map(format_long_date).unwrap_or_default();
    format!("{} captured {} • {}", base, date, duration)
}

/// Flatten every day's clips into cards, newest first.
///
/// Ordered by day, then by clip start time; clips without a start keep
/// document order within their day.
pub fn flatten_clips(days: &[Day]) -> Vec<GalleryCard> {
    let mut cards: Vec<GalleryCard> = days
        .iter()
        .flat_map(|day| day.clips.iter().map(move |clip| GalleryCard::from_clip(clip, day)))
        .collect();
    cards.sort_by(|a, b| (b.day, b.started_at).cmp(&(a.day, a.started_at)));
    cards
}

/// Filter chip value: `"all"` or an exact label.
pub fn filter_cards<'a>(cards: &'a [GalleryCard], filter: &str) -> Vec<&'a GalleryCard> {
    cards
        .iter()
        .filter(|card| filter == "all" || card.label == filter)
        .collect()
}

/// Grid or list layout of the gallery.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryView {
    #[default]
    Grid,
    List,
}

impl GalleryView {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

/// Incremental reveal of a filtered card list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    pub cursor: usize,
    pub chunk: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            cursor: 0,
            chunk: GALLERY_CHUNK,
        }
    }
}

impl Pager {
    /// Reveal the first chunk of `total` items.
    pub fn reset(&mut self, total: usize) {
        self.cursor = 0;
        self.load_more(total);
    }

    /// Reveal the next chunk. Returns false when everything is shown.
    pub fn load_more(&mut self, total: usize) -> bool {
        if self.cursor >= total {
            return false;
        }
        self.cursor = (self.cursor + self.chunk).min(total);
        true
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.cursor < total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn days() -> Vec<Day> {
        serde_json::from_value(json!([
            {
                "date": "2024-05-01",
                "clipCount": 2,
                "detectedLabels": { "Person": 1, "Vehicle": 1 },
                "clips": [
                    { "id": "c1", "label": "Person", "confidence": 0.91, "duration": 12,
                      "thumbnail": "img/c1.jpg", "start": "2024-05-01T08:15:00Z" },
                    { "id": "c2", "confidence": 0.5, "start": "2024-05-01T17:40:00Z" }
                ]
            },
            {
                "date": "2024-05-02",
                "clipCount": 1,
                "clips": [
                    { "id": "c3", "label": "Vehicle", "duration": 4, "start": "2024-05-02T06:00:00Z" }
                ]
            }
        ]))
        .unwrap()
    }

    #[test]
    fn test_flatten_defaults_and_order() {
        let cards = flatten_clips(&days());
        let ids: Vec<_> = cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c3", "c2", "c1"]);

        let custom = &cards[1];
        assert_eq!(custom.label, "Custom");
        assert_eq!(custom.thumbnail, "img/placeholders/clip-01.svg");
        assert_eq!(custom.duration, 0.0);
        assert_eq!(custom.confidence, 50);
        assert_eq!(custom.summary, "Event captured May 1 • moment");
        assert_eq!(custom.time, "17:40");
        assert_eq!(custom.date, "May 1");

        assert_eq!(cards[2].summary, "Person captured May 1 • 12s");
        assert_eq!(cards[0].confidence, 0);
    }

    #[test]
    fn test_numeric_and_null_fields_still_produce_cards() {
        let days: Vec<Day> = serde_json::from_value(json!([
            {
                "date": "2024-05-01",
                "clipCount": null,
                "detectedLabels": [],
                "clips": [
                    { "id": "a", "label": "Person", "start": "2024-05-01T08:00:00Z" },
                    { "id": 7, "label": null, "duration": "5", "start": "2024-05-01T09:00:00Z" }
                ]
            }
        ]))
        .unwrap();

        assert_eq!(days[0].clip_count, 0);
        assert!(days[0].detected_labels.is_empty());

        let cards = flatten_clips(&days);
        let ids: Vec<_> = cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["7", "a"]);
        assert_eq!(cards[0].label, "Custom");
        assert_eq!(cards[0].duration, 5.0);
    }

    #[test]
    fn test_filter_cards() {
        let cards = flatten_clips(&days());
        assert_eq!(filter_cards(&cards, "all").len(), 3);
        let custom = filter_cards(&cards, "Custom");
        assert_eq!(custom.len(), 1);
        assert_eq!(custom[0].id, "c2");
        assert!(filter_cards(&cards, "Animal").is_empty());
    }

    #[test]
    fn test_day_meta() {
        let days = days();
        assert_eq!(days[0].meta(), "2 clip(s) • Person, Vehicle");
        assert_eq!(days[1].meta(), "1 clip(s) • No labels");

        let day: Day = serde_json::from_value(json!({
            "clipCount": 3,
            "detectedLabels": { "Vehicle": 2, "Animal": 1 }
        }))
        .unwrap();
        assert_eq!(day.meta(), "3 clip(s) • Vehicle, Animal");
    }

    #[test]
    fn test_pager() {
        let mut pager = Pager::default();
        pager.reset(20);
        assert_eq!(pager.cursor, 9);
        assert!(pager.load_more(20));
        assert_eq!(pager.cursor, 18);
        assert!(pager.load_more(20));
        assert_eq!(pager.cursor, 20);
        assert!(!pager.has_more(20));
        assert!(!pager.load_more(20));

        pager.reset(0);
        assert_eq!(pager.cursor, 0);
    }

    #[test]
    fn test_gallery_view_serde() {
        assert_eq!(serde_json::to_value(GalleryView::List).unwrap(), json!("list"));
        let view: GalleryView = serde_json::from_value(json!("grid")).unwrap();
        assert_eq!(view, GalleryView::Grid);
    }
}
