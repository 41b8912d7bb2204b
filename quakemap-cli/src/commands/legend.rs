//! Legend command - print the magnitude color scale.

use quakemap::legend::{default_legend, LegendRow, LEGEND_TITLE};
use quakemap::magnitude::{MagnitudeBucket, RadiusScale};

use crate::error::CliError;

/// Run the legend command.
pub fn run() -> Result<(), CliError> {
    print!("{}", format_legend(&default_legend()));
    Ok(())
}

fn format_legend(rows: &[LegendRow]) -> String {
    let mut out = format!("{}\n", LEGEND_TITLE);
    out.push_str(&"=".repeat(LEGEND_TITLE.len()));
    out.push('\n');
    for row in rows {
        out.push_str(&format!("  {}  {}\n", row.color, row.label));
    }

    out.push_str("\nBuckets\n");
    for bucket in MagnitudeBucket::all() {
        out.push_str(&format!("  {:<10} {}\n", bucket.to_string(), bucket.color()));
    }

    out.push_str(&format!(
        "\nMarker radius: magnitude x {} (pixels) or x {} (meters)\n",
        RadiusScale::Pixels.factor(),
        RadiusScale::Meters.factor()
    ));
    out
}
