//! Earthquake marker styling.
//!
//! The [`FeatureStylist`] turns one [`EarthquakeRecord`] into the visual style
//! of its marker and the content of its popup. It is a pure function of the
//! record and its own settings.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::feed::EarthquakeRecord;
use crate::magnitude::{MagnitudeClassifier, RadiusScale};

/// Border color used in [`BorderMode::Black`].
pub const BLACK: &str = "#000000";

/// Default marker fill opacity.
pub const DEFAULT_FILL_OPACITY: f64 = 0.75;

/// Default marker outline weight in pixels.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Timestamp format for popups, close to a browser's `Date.toString()`.
const POPUP_TIME_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// How the marker outline is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Outline uses the fill color
    #[default]
    SameAsFill,
    /// Outline is always black
    Black,
}

impl BorderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BorderMode::SameAsFill => "fill",
            BorderMode::Black => "black",
        }
    }
}

impl fmt::Display for BorderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BorderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fill" | "same" => Ok(BorderMode::SameAsFill),
            "black" => Ok(BorderMode::Black),
            other => Err(format!("unknown border mode '{}'", other)),
        }
    }
}

/// Visual style of one earthquake marker.
///
/// Field names serialize to Leaflet path option names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDescriptor {
    pub fill_color: &'static str,
    pub color: &'static str,
    pub radius: f64,
    pub fill_opacity: f64,
    pub weight: f64,
    pub stroke: bool,
}

/// Popup content for one earthquake marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub place: String,
    pub time: String,
    pub magnitude: Option<f64>,
    pub depth_km: Option<f64>,
}

impl Popup {
    /// Renders the popup as an HTML fragment with all text escaped.
    pub fn to_html(&self) -> String {
        let magnitude = match self.magnitude {
            Some(m) => m.to_string(),
            None => "n/a".to_string(),
        };
        let mut html = format!(
            "<h3>{}</h3><hr><p>{}</p><p>Magnitude: {}</p>",
            escape_html(&self.place),
            escape_html(&self.time),
            magnitude
        );
        if let Some(depth) = self.depth_km {
            html.push_str(&format!("<p>Depth: {:.1} km</p>", depth));
        }
        html
    }
}

/// Builds marker styles and popups from earthquake records.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureStylist {
    classifier: MagnitudeClassifier,
    border: BorderMode,
    fill_opacity: f64,
    weight: f64,
}

impl Default for FeatureStylist {
    fn default() -> Self {
        Self::new(MagnitudeClassifier::default())
    }
}

impl FeatureStylist {
    pub fn new(classifier: MagnitudeClassifier) -> Self {
        Self {
            classifier,
            border: BorderMode::default(),
            fill_opacity: DEFAULT_FILL_OPACITY,
            weight: DEFAULT_WEIGHT,
        }
    }

    pub fn with_border(mut self, border: BorderMode) -> Self {
        self.border = border;
        self
    }

    /// Sets the fill opacity, clamped to `0.0..=1.0`.
    pub fn with_fill_opacity(mut self, fill_opacity: f64) -> Self {
        self.fill_opacity = fill_opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight.max(0.0);
        self
    }

    /// Radius scale used for every marker this stylist produces.
    pub fn radius_scale(&self) -> RadiusScale {
        self.classifier.scale()
    }

    /// Style for the record's marker.
    pub fn style(&self, record: &EarthquakeRecord) -> StyleDescriptor {
        let fill_color = self.classifier.color(record.magnitude);
        let color = match self.border {
            BorderMode::SameAsFill => fill_color,
            BorderMode::Black => BLACK,
        };

        StyleDescriptor {
            fill_color,
            color,
            radius: self.classifier.radius(record.magnitude),
            fill_opacity: self.fill_opacity,
            weight: self.weight,
            stroke: true,
        }
    }

    /// Popup for the record, with the time in the local time zone.
    pub fn popup(&self, record: &EarthquakeRecord) -> Popup {
        self.popup_in(record, &Local)
    }

    /// Popup for the record, with the time in `tz`.
    pub fn popup_in<Tz>(&self, record: &EarthquakeRecord, tz: &Tz) -> Popup
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Popup {
            place: record
                .place
                .clone()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| "Unknown location".to_string()),
            time: record
                .time_ms
                .and_then(|ms| format_timestamp(ms, tz))
                .unwrap_or_else(|| "Unknown time".to_string()),
            magnitude: crate::magnitude::sanitize(record.magnitude),
            depth_km: record.depth_km.filter(|d| d.is_finite()),
        }
    }
}

/// Formats epoch milliseconds as a human-readable time in `tz`.
///
/// Returns `None` for timestamps chrono cannot represent.
pub fn format_timestamp<Tz>(epoch_ms: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    tz.timestamp_millis_opt(epoch_ms)
        .single()
        .map(|dt| dt.format(POPUP_TIME_FORMAT).to_string())
}

/// Escapes text for inclusion in HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::LonLat;
    use chrono::{FixedOffset, Utc};

    fn record(magnitude: Option<f64>) -> EarthquakeRecord {
        EarthquakeRecord {
            magnitude,
            location: LonLat {
                lon: -122.4,
                lat: 37.8,
            },
            depth_km: Some(10.0),
            place: Some("5 km N of Berkeley, CA".to_string()),
            time_ms: Some(0),
        }
    }

    #[test]
    fn test_style_uses_classifier() {
        let stylist = FeatureStylist::default();
        let style = stylist.style(&record(Some(4.5)));

        assert_eq!(style.fill_color, "#FFA500");
        assert_eq!(style.color, "#FFA500");
        assert_eq!(style.radius, 135_000.0);
        assert_eq!(style.fill_opacity, 0.75);
        assert_eq!(style.weight, 1.0);
        assert!(style.stroke);
    }

    #[test]
    fn test_style_black_border() {
        let stylist = FeatureStylist::default().with_border(BorderMode::Black);
        let style = stylist.style(&record(Some(1.5)));

        assert_eq!(style.fill_color, "#9ACD32");
        assert_eq!(style.color, BLACK);
    }

    #[test]
    fn test_style_null_magnitude_falls_back() {
        let stylist = FeatureStylist::new(MagnitudeClassifier::new(RadiusScale::Pixels));
        let style = stylist.style(&record(None));

        assert_eq!(style.fill_color, "#ADFF2F");
        assert_eq!(style.radius, 1.0);
    }

    #[test]
    fn test_style_nan_magnitude_falls_back() {
        let style = FeatureStylist::default().style(&record(Some(f64::NAN)));
        assert_eq!(style.fill_color, "#ADFF2F");
        assert_eq!(style.radius, 1.0);
    }

    #[test]
    fn test_builder_clamps_values() {
        let stylist = FeatureStylist::default()
            .with_fill_opacity(1.7)
            .with_weight(-2.0);
        let style = stylist.style(&record(Some(2.0)));

        assert_eq!(style.fill_opacity, 1.0);
        assert_eq!(style.weight, 0.0);
    }

    #[test]
    fn test_style_serializes_leaflet_names() {
        let style = FeatureStylist::default().style(&record(Some(0.5)));
        let json = serde_json::to_value(&style).unwrap();

        assert_eq!(json["fillColor"], "#ADFF2F");
        assert_eq!(json["fillOpacity"], 0.75);
        assert_eq!(json["stroke"], true);
    }

    #[test]
    fn test_popup_in_utc() {
        let popup = FeatureStylist::default().popup_in(&record(Some(6.2)), &Utc);

        assert_eq!(popup.place, "5 km N of Berkeley, CA");
        assert_eq!(popup.time, "Thu Jan 01 1970 00:00:00 GMT+0000");
        assert_eq!(popup.magnitude, Some(6.2));
        assert_eq!(popup.depth_km, Some(10.0));
        assert!(popup.to_html().ends_with("<p>Magnitude: 6.2</p><p>Depth: 10.0 km</p>"));
    }

    #[test]
    fn test_popup_respects_offset() {
        let tz = FixedOffset::west_opt(7 * 3600).unwrap();
        let time = format_timestamp(1_700_000_000_000, &tz).unwrap();
        assert_eq!(time, "Tue Nov 14 2023 15:13:20 GMT-0700");
    }

    #[test]
    fn test_popup_missing_fields() {
        let mut r = record(None);
        r.place = None;
        r.time_ms = None;
        r.depth_km = None;

        let popup = FeatureStylist::default().popup_in(&r, &Utc);
        assert_eq!(popup.place, "Unknown location");
        assert_eq!(popup.time, "Unknown time");
        assert_eq!(popup.magnitude, None);
        let html = popup.to_html();
        assert!(html.contains("Magnitude: n/a"));
        assert!(!html.contains("Depth"));
    }

    #[test]
    fn test_popup_html_is_escaped() {
        let popup = Popup {
            place: "<script>alert('x')</script>".to_string(),
            time: "now".to_string(),
            magnitude: Some(2.5),
            depth_km: None,
        };

        let html = popup.to_html();
        assert!(html.starts_with("<h3>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;</h3><hr>"));
        assert!(html.ends_with("<p>now</p><p>Magnitude: 2.5</p>"));
    }

    #[test]
    fn test_border_mode_parse() {
        assert_eq!("fill".parse(), Ok(BorderMode::SameAsFill));
        assert_eq!("BLACK".parse(), Ok(BorderMode::Black));
        assert!("blue".parse::<BorderMode>().is_err());
    }
}
