//! Magnitude legend rows.
//!
//! The legend pairs each magnitude range with the marker color used for it.
//! Building it is side-effect free; the page renderer decides where and how
//! the rows are drawn.

use serde::Serialize;

use crate::magnitude;

/// Lower edges of the legend ranges, one row per edge.
pub const LEGEND_EDGES: [u32; 6] = [0, 1, 2, 3, 4, 5];

/// Title shown above the legend rows.
pub const LEGEND_TITLE: &str = "Magnitude";

/// One legend row: a color swatch and its range label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendRow {
    /// Swatch color (`#RRGGBB`)
    pub color: &'static str,
    /// Range label such as `"2–3"` or `"5+"`
    pub label: String,
}

/// Builds one row per edge.
///
/// Labels read `"{edge}–{next}"` except the last, which reads `"{edge}+"`.
/// Each row is colored with the classification of `edge + 1`, i.e. the bucket
/// whose inclusive upper bound is `next`, so the swatch matches the markers
/// drawn for magnitudes inside the labelled range.
pub fn build_legend(edges: &[u32]) -> Vec<LegendRow> {
    edges
        .iter()
        .enumerate()
        .map(|(i, &edge)| {
            let label = match edges.get(i + 1) {
                Some(next) => format!("{}\u{2013}{}", edge, next),
                None => format!("{}+", edge),
            };
            LegendRow {
                color: magnitude::color(Some(f64::from(edge) + 1.0)),
                label,
            }
        })
        .collect()
}

/// Legend for the standard magnitude edges.
pub fn default_legend() -> Vec<LegendRow> {
    build_legend(&LEGEND_EDGES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_legend_has_six_rows() {
        assert_eq!(default_legend().len(), 6);
    }

    #[test]
    fn test_default_legend_labels() {
        let labels: Vec<String> = default_legend().into_iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["0–1", "1–2", "2–3", "3–4", "4–5", "5+"]);
    }

    #[test]
    fn test_row_colors_use_next_edge() {
        for (row, edge) in default_legend().iter().zip(LEGEND_EDGES) {
            assert_eq!(row.color, magnitude::color(Some(f64::from(edge) + 1.0)));
        }
    }

    #[test]
    fn test_row_colors_match_markers_inside_range() {
        // A marker at 2.5 sits in the "2–3" row and must share its swatch
        let legend = default_legend();
        assert_eq!(legend[2].color, magnitude::color(Some(2.5)));
        assert_eq!(legend[0].color, "#ADFF2F");
        assert_eq!(legend[5].color, "#FF0000");
    }

    #[test]
    fn test_custom_edges() {
        let legend = build_legend(&[2, 4]);
        assert_eq!(legend.len(), 2);
        assert_eq!(legend[0].label, "2–4");
        assert_eq!(legend[1].label, "4+");
        assert_eq!(legend[1].color, magnitude::color(Some(5.0)));
    }

    #[test]
    fn test_empty_edges() {
        assert!(build_legend(&[]).is_empty());
    }
}
