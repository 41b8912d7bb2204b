//! Render command - fetch both feeds and write the map page.

use std::path::PathBuf;

use quakemap::basemap::mapbox_base_layers;
use quakemap::feed::{AsyncReqwestClient, FeedLoader};
use quakemap::layer::{
    FeedOutcome, LayerComposer, LoadSummary, MapContext, EARTHQUAKES_OVERLAY, PLATES_OVERLAY,
};
use quakemap::legend::default_legend;
use quakemap::render::render_page;
use tracing::{info, warn};

use super::common::{
    map_view, resolve_access_token, resolve_base, resolve_feed_urls, stylist, BaseStyle,
};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the render command.
pub struct RenderArgs {
    pub output: Option<PathBuf>,
    pub access_token: Option<String>,
    pub base: Option<BaseStyle>,
    pub earthquakes_url: Option<String>,
    pub plates_url: Option<String>,
    pub title: Option<String>,
    pub debug: bool,
}

/// Run the render command.
pub fn run(args: RenderArgs) -> Result<(), CliError> {
    let runner = CliRunner::with_debug(args.debug)?;
    runner.log_startup("render");
    let config = runner.config();

    // Resolve settings from CLI and config
    let token = resolve_access_token(args.access_token, config)?;
    let default_base = resolve_base(args.base, config);
    let urls = resolve_feed_urls(args.earthquakes_url, args.plates_url, config);
    let output = args.output.unwrap_or_else(|| config.map.output.clone());
    let title = args.title.unwrap_or_else(|| config.map.title.clone());

    let mut ctx = MapContext::new(map_view(config));
    let composer = LayerComposer::new(stylist(config));
    composer.initialize(&mut ctx, mapbox_base_layers(&token)?, default_base)?;

    let client = AsyncReqwestClient::with_timeout(config.download.timeout).map_err(CliError::Http)?;
    let loader = FeedLoader::new(client, urls);

    println!("Fetching feeds:");
    println!("  Earthquakes: {}", loader.urls().earthquakes);
    println!("  Plate boundaries: {}", loader.urls().plate_boundaries);
    println!();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    let start = std::time::Instant::now();
    let summary = runtime.block_on(async {
        let events = loader.spawn();
        composer.consume(&mut ctx, events).await
    });
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "Feeds processed");

    report(&summary);

    let html = render_page(&ctx, &default_legend(), &title)?;
    runner.save_page(&output, &html)?;
    println!("  Base layer: {}", default_base.display_name());

    Ok(())
}

/// Print one line per overlay, flagging those left empty.
fn report(summary: &LoadSummary) {
    for (overlay, outcome) in [
        (EARTHQUAKES_OVERLAY, &summary.earthquakes),
        (PLATES_OVERLAY, &summary.plate_boundaries),
    ] {
        match outcome {
            FeedOutcome::Loaded { added, skipped: 0 } => {
                println!("✓ {}: {} features", overlay, added);
            }
            FeedOutcome::Loaded { added, skipped } => {
                println!(
                    "✓ {}: {} features ({} malformed skipped)",
                    overlay, added, skipped
                );
            }
            FeedOutcome::Failed(reason) => {
                warn!(overlay, error = %reason, "Overlay will be empty");
                eprintln!("⚠ {}: feed failed, overlay is empty ({})", overlay, reason);
            }
            FeedOutcome::Pending => {
                warn!(overlay, "Feed never completed");
                eprintln!("⚠ {}: feed did not complete, overlay is empty", overlay);
            }
        }
    }
}
