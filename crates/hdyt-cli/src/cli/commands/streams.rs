//! `hdyt streams <url>`: show what the catalog reports and what would be picked.

use anyhow::{Context, Result};
use hdyt_core::catalog::{Catalog, YtDlpCatalog};
use hdyt_core::config::HdytConfig;
use hdyt_core::source::SourceRef;
use hdyt_core::stream::select_streams;

use super::get::print_streams;

pub fn run_streams(cfg: &HdytConfig, url: &str) -> Result<()> {
    let source = SourceRef::parse(url)?;
    let catalog = YtDlpCatalog::new(cfg.tools().ytdlp);
    let info = catalog
        .lookup(&source)
        .with_context(|| format!("look up {}", source))?;

    println!("Title: {}", info.title);
    print_streams(&info.streams);
    match select_streams(&info.streams, &cfg.container) {
        Ok(pair) => {
            println!("Selected video: {}", pair.video);
            println!("Selected audio: {}", pair.audio);
        }
        Err(missing) => println!("Selection: {} (container {})", missing, cfg.container),
    }
    Ok(())
}
