//! Artgrid - Paginated Artwork Gallery Engine
//!
//! Entry point for the gallery demo driver: points the engine at an
//! endpoint, loads every page, and prints what the grid ends up holding.

use artgrid::{Gallery, GalleryConfig, LoadOutcome, NAME, VERSION};
use std::env;

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some(endpoint) = args.get(1).cloned() else {
        eprintln!("Usage: artgrid <endpoint-url> [config.json]");
        eprintln!("  Loads every gallery page from <endpoint-url> and prints a summary.");
        std::process::exit(2);
    };

    let mut config = match args.get(2) {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("failed to read config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => GalleryConfig::default(),
    };
    config.endpoint = endpoint;

    println!("{} v{} - loading gallery from {}", NAME, VERSION, config.endpoint);

    let mut gallery = match Gallery::new(config) {
        Ok(gallery) => gallery,
        Err(e) => {
            eprintln!("failed to start gallery: {}", e);
            std::process::exit(1);
        }
    };

    match gallery.initialize_empty().await {
        LoadOutcome::Appended { page, new_items } => {
            println!("page {}: {} items", page, new_items);
        }
        LoadOutcome::NoContent { message, .. } => {
            println!("gallery is empty: {}", message);
            return;
        }
        LoadOutcome::Failed { reason, .. } => {
            eprintln!("first page failed: {}", reason);
            std::process::exit(1);
        }
        LoadOutcome::Skipped => return,
    }

    loop {
        match gallery.load_more().await {
            LoadOutcome::Appended { page, new_items } => {
                println!("page {}: {} items", page, new_items);
            }
            LoadOutcome::NoContent { page, message } => {
                println!("page {}: no content ({})", page, message);
                break;
            }
            LoadOutcome::Failed { page, reason } => {
                eprintln!("page {} failed: {}", page, reason);
                break;
            }
            LoadOutcome::Skipped => break,
        }
    }

    let state = gallery.state();
    println!(
        "done: {} items across {} of {} pages, grid height {:.0}px",
        gallery.items().len(),
        state.loaded_pages().count(),
        state.total_pages(),
        gallery.renderer().content_height(),
    );
}

fn load_config(path: &str) -> Result<GalleryConfig, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
