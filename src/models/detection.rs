//! AI detection page data types.
//!
//! Mirrors `data/detections.json`. Every field is optional in the document,
//! so a degraded (empty) resource decodes to an empty [`DetectionsDoc`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;
use crate::config::detection_defaults;
use crate::utils::format::{parse_timestamp, percent};

// ============================================================================
// Document
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetectionsDoc {
    /// When the document was generated; anchors the time-range filter.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub updated: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub detections: Vec<Detection>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub events_per_hour: Vec<f64>,
    #[serde(deserialize_with = "lenient::list")]
    pub zones: Vec<Zone>,
    #[serde(deserialize_with = "lenient::list")]
    pub alerts: Vec<Alert>,
    #[serde(deserialize_with = "lenient::list")]
    pub memory: Vec<MemoryEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Detection {
    pub id: Value,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient::opt_number")]
    pub confidence: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub time: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub zone: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub thumbnail: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub summary: Option<String>,
}

impl Detection {
    /// Stable key for list rendering.
    pub fn key(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    pub fn confidence(&self) -> f64 {
        self.confidence.unwrap_or(0.0)
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.time.as_deref().and_then(parse_timestamp)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Zone {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub schedule: String,
    #[serde(deserialize_with = "lenient::string")]
    pub state: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Alert {
    #[serde(deserialize_with = "lenient::string")]
    pub rule: String,
    #[serde(deserialize_with = "lenient::string")]
    pub message: String,
    #[serde(deserialize_with = "lenient::string")]
    pub severity: String,
    #[serde(deserialize_with = "lenient::string")]
    pub state: String,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub triggered_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MemoryEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub summary: String,
    #[serde(deserialize_with = "lenient::string")]
    pub detail: String,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub time: Option<String>,
}

impl DetectionsDoc {
    /// Distinct labels present in the feed, sorted.
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .detections
            .iter()
            .filter_map(|d| d.label.clone())
            .collect();
        labels.sort();
        labels.dedup();
        labels
    }

    /// Reference time for range filtering: `updated`, else `now`.
    pub fn updated_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.updated
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now)
    }
}

// ============================================================================
// Filters
// ============================================================================

/// Persisted filter state for the detection grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionFilters {
    /// "all" or a specific label.
    pub label: String,
    /// Minimum confidence, 0..1.
    pub confidence: f64,
    /// Time window in hours before the document's `updated` time.
    pub range: u32,
}

impl Default for DetectionFilters {
    fn default() -> Self {
        Self {
            label: detection_defaults::LABEL.to_string(),
            confidence: detection_defaults::CONFIDENCE,
            range: detection_defaults::RANGE_HOURS,
        }
    }
}

impl DetectionFilters {
    pub fn matches(&self, detection: &Detection, updated_at: DateTime<Utc>) -> bool {
        if self.label != "all" && detection.label.as_deref() != Some(self.label.as_str()) {
            return false;
        }
        if detection.confidence() < self.confidence {
            return false;
        }
        self.within_range(detection, updated_at)
    }

    /// Detections without a time always pass; unparseable times never do.
    fn within_range(&self, detection: &Detection, updated_at: DateTime<Utc>) -> bool {
        let Some(time) = detection.time.as_deref() else {
            return true;
        };
        let Some(event_time) = parse_timestamp(time) else {
            return false;
        };
        let delta_hours = (updated_at - event_time).num_seconds() as f64 / 3600.0;
        delta_hours <= f64::from(self.range)
    }

    /// Human-readable filter summary ("All labels • ≥ 60% • 24h window").
    pub fn summary(&self) -> String {
        let label = if self.label == "all" {
            "All labels".to_string()
        } else {
            self.label.clone()
        };
        format!(
            "{} • ≥ {}% • {}h window",
            label,
            percent(self.confidence),
            self.range
        )
    }
}

/// Detections passing `filters`, newest first.
pub fn visible_detections(
    doc: &DetectionsDoc,
    filters: &DetectionFilters,
    now: DateTime<Utc>,
) -> Vec<Detection> {
    let updated_at = doc.updated_at(now);
    let mut visible: Vec<Detection> = doc
        .detections
        .iter()
        .filter(|d| filters.matches(d, updated_at))
        .cloned()
        .collect();
    // Undated detections sort last.
    visible.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
    visible
}

// ============================================================================
// Summary Widgets
// ============================================================================

/// Headline numbers shown above the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionStats {
    pub detections: usize,
    pub rules: usize,
    /// Median confidence as a whole percentage.
    pub median_confidence: i64,
}

impl DetectionStats {
    pub fn from_doc(doc: &DetectionsDoc) -> Self {
        let mut confidences: Vec<f64> = doc.detections.iter().map(Detection::confidence).collect();
        confidences.sort_by(|a, b| a.total_cmp(b));
        let median_confidence = confidences
            .get(confidences.len() / 2)
            .map_or(0, |c| percent(*c));

        Self {
            detections: doc.detections.len(),
            rules: doc.alerts.len(),
            median_confidence,
        }
    }
}

/// SVG polyline for events-per-hour, in a 100x100 viewBox.
#[derive(Clone, Debug, PartialEq)]
pub struct Sparkline {
    pub points: String,
    pub summary: String,
}

impl Sparkline {
    /// `None` when there are no events to plot.
    pub fn from_events(events: &[f64]) -> Option<Self> {
        if events.is_empty() {
            return None;
        }

        let peak = events.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let max = peak.max(1.0);
        let steps = (events.len().saturating_sub(1)).max(1) as f64;

        let points = events
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let x = i as f64 / steps * 100.0;
                let y = 100.0 - value / max * 100.0;
                format!("{},{}", x, y)
            })
            .collect::<Vec<_>>()
            .join(" ");

        let avg = (events.iter().sum::<f64>() / events.len() as f64).round();
        Some(Self {
            points,
            summary: format!("Peak {} • Avg {}", peak, avg),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> DetectionsDoc {
        serde_json::from_value(json!({
            "updated": "2024-05-02T12:00:00Z",
            "detections": [
                { "id": "d1", "label": "Person", "confidence": 0.9, "time": "2024-05-02T11:00:00Z" },
                { "id": "d2", "label": "Vehicle", "confidence": 0.7, "time": "2024-05-02T10:00:00Z" },
                { "id": "d3", "label": "Person", "confidence": 0.5, "time": "2024-05-02T09:00:00Z" },
                { "id": "d4", "label": "Person", "confidence": 0.95, "time": "2024-04-29T09:00:00Z" },
                { "id": 5, "label": "Animal", "confidence": 0.8 }
            ],
            "eventsPerHour": [2, 4, 1],
            "alerts": [{ "rule": "Dock after hours", "message": "Motion", "severity": "high", "state": "open" }]
        }))
        .unwrap()
    }

    fn now() -> DateTime<Utc> {
        parse_timestamp("2024-06-01T00:00:00Z").unwrap()
    }

    #[test]
    fn test_empty_document_decodes() {
        let doc: DetectionsDoc = serde_json::from_value(json!({})).unwrap();
        assert_eq!(doc, DetectionsDoc::default());
    }

    #[test]
    fn test_malformed_leaves_keep_the_document() {
        let doc: DetectionsDoc = serde_json::from_value(json!({
            "detections": [
                { "id": "d1", "label": "Person", "confidence": "0.9", "zone": 12 },
                "garbage"
            ],
            "eventsPerHour": [1, null, 3],
            "zones": [{ "name": null, "schedule": "Always" }],
            "alerts": [{ "rule": 4, "triggeredAt": false }],
            "memory": null
        }))
        .unwrap();

        assert_eq!(doc.detections.len(), 1);
        assert_eq!(doc.detections[0].confidence, Some(0.9));
        assert_eq!(doc.detections[0].zone.as_deref(), Some("12"));
        assert_eq!(doc.events_per_hour, vec![1.0, 3.0]);
        assert_eq!(doc.zones[0].name, "");
        assert_eq!(doc.zones[0].schedule, "Always");
        assert_eq!(doc.alerts[0].rule, "4");
        assert_eq!(doc.alerts[0].triggered_at.as_deref(), Some("false"));
        assert!(doc.memory.is_empty());
    }

    #[test]
    fn test_default_filters() {
        let filters = DetectionFilters::default();
        let visible = visible_detections(&doc(), &filters, now());
        let keys: Vec<_> = visible.iter().map(Detection::key).collect();
        // d3 below confidence, d4 outside 24h window, undated last
        assert_eq!(keys, vec!["d1", "d2", "5"]);
    }

    #[test]
    fn test_label_and_range_filters() {
        let filters = DetectionFilters {
            label: "Person".to_string(),
            confidence: 0.0,
            range: 168,
        };
        let visible = visible_detections(&doc(), &filters, now());
        let keys: Vec<_> = visible.iter().map(Detection::key).collect();
        assert_eq!(keys, vec!["d1", "d3", "d4"]);
    }

    #[test]
    fn test_range_anchored_on_now_without_updated() {
        let mut doc = doc();
        doc.updated = None;
        let anchor = parse_timestamp("2024-05-02T12:30:00Z").unwrap();
        let filters = DetectionFilters {
            label: "all".to_string(),
            confidence: 0.0,
            range: 2,
        };
        let keys: Vec<_> = visible_detections(&doc, &filters, anchor)
            .iter()
            .map(Detection::key)
            .collect();
        assert_eq!(keys, vec!["d1", "5"]);
    }

    #[test]
    fn test_unparseable_time_is_excluded() {
        let detection = Detection {
            time: Some("not a time".to_string()),
            confidence: Some(1.0),
            ..Default::default()
        };
        assert!(!DetectionFilters::default().matches(&detection, now()));
    }

    #[test]
    fn test_labels() {
        assert_eq!(doc().labels(), vec!["Animal", "Person", "Vehicle"]);
    }

    #[test]
    fn test_filter_summary() {
        assert_eq!(
            DetectionFilters::default().summary(),
            "All labels • ≥ 60% • 24h window"
        );
        let filters = DetectionFilters {
            label: "Vehicle".to_string(),
            confidence: 0.85,
            range: 72,
        };
        assert_eq!(filters.summary(), "Vehicle • ≥ 85% • 72h window");
    }

    #[test]
    fn test_filters_decode_partial_preferences() {
        let filters: DetectionFilters = serde_json::from_value(json!({ "label": "Person" })).unwrap();
        assert_eq!(filters.label, "Person");
        assert_eq!(filters.range, 24);
    }

    #[test]
    fn test_stats() {
        let stats = DetectionStats::from_doc(&doc());
        assert_eq!(stats.detections, 5);
        assert_eq!(stats.rules, 1);
        // sorted: 0.5 0.7 0.8 0.9 0.95 -> index 2
        assert_eq!(stats.median_confidence, 80);

        let empty = DetectionStats::from_doc(&DetectionsDoc::default());
        assert_eq!(empty.median_confidence, 0);
    }

    #[test]
    fn test_sparkline() {
        let spark = Sparkline::from_events(&[2.0, 4.0, 1.0]).unwrap();
        assert_eq!(spark.points, "0,50 50,0 100,75");
        assert_eq!(spark.summary, "Peak 4 • Avg 2");

        let single = Sparkline::from_events(&[0.0]).unwrap();
        assert_eq!(single.points, "0,100");
        assert_eq!(single.summary, "Peak 0 • Avg 0");

        assert!(Sparkline::from_events(&[]).is_none());
    }
}
