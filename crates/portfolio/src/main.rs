//! Mosaic - lay out a portfolio scene and print the result.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use portfolio::images::{ImageGate, ImageWaitOutcome, FALLBACK_DELAY};
use portfolio::scene::ImageStatus;
use portfolio::{DocumentHost, FilterBar, LayoutReport, Masonry, MasonryConfig, Scene};

/// Mosaic - masonry layout and filtering for portfolio grids
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene file (JSON). The built-in demo scene is used when omitted.
    scene: Option<PathBuf>,

    /// Engine configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the container width from the scene
    #[arg(long)]
    width: Option<f32>,

    /// Filter to apply once the initial layout settles, e.g. ".web" or "*"
    #[arg(short, long)]
    filter: Option<String>,

    /// Resize the container to this width after filtering
    #[arg(long)]
    resize: Option<f32>,

    /// Wait on the wall clock instead of the virtual one
    #[arg(long)]
    realtime: bool,

    /// Print column assignments instead of the full report
    #[arg(long)]
    summary: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the report.
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Mosaic v{}", portfolio::VERSION);

    let mut scene = match &args.scene {
        Some(path) => {
            Scene::load(path).with_context(|| format!("loading scene {}", path.display()))?
        }
        None => Scene::demo(),
    };
    if let Some(width) = args.width {
        scene.container_width = width;
    }

    let config = match &args.config {
        Some(path) => MasonryConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MasonryConfig::portfolio(),
    };

    // Images settle before the engine exists; the engine's clock starts after.
    let images = wait_for_images(&scene, config.image_timeout, args.realtime).await;
    let config = match images {
        ImageWaitOutcome::Failed { failed } => {
            warn!(failed, "initializing with default configuration");
            pause(FALLBACK_DELAY, args.realtime).await;
            MasonryConfig::default()
        }
        _ => config,
    };

    let doc = scene.build();
    let bar = FilterBar::discover(&doc.tree, doc.tree.root());
    let host = DocumentHost::new(doc.tree, Some(doc.container));
    let mut engine = Masonry::new(host, config)?;
    settle(&mut engine, args.realtime).await;

    if let Some(value) = &args.filter {
        let filter = bar.select(engine.host_mut().tree_mut(), value);
        info!(%filter, "applying filter");
        engine.arrange(filter);
        settle(&mut engine, args.realtime).await;
    }

    if let Some(width) = args.resize {
        info!(width, "resizing container");
        engine.host_mut().set_container_width(width);
        engine.notify_resize();
        settle(&mut engine, args.realtime).await;
    }

    let report = LayoutReport::capture(&engine, images);
    let output = if args.summary {
        serde_json::to_string_pretty(&report.columns_summary())?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{}", output);

    engine.destroy();
    Ok(())
}

/// Replay the scene's image events through the gate.
async fn wait_for_images(scene: &Scene, timeout: Duration, realtime: bool) -> ImageWaitOutcome {
    let mut gate = ImageGate::new(scene.image_count(), timeout);
    for status in scene.image_statuses() {
        match status {
            ImageStatus::Loaded => {
                gate.on_load();
            }
            ImageStatus::Failed => {
                gate.on_error();
            }
            ImageStatus::Pending => {}
        }
    }
    if let Some(outcome) = gate.outcome() {
        debug!(?outcome, "images settled");
        return outcome;
    }
    pause(timeout, realtime).await;
    gate.poll(timeout)
        .unwrap_or(ImageWaitOutcome::TimedOut {
            settled: gate.settled(),
            total: gate.total(),
        })
}

async fn pause(duration: Duration, realtime: bool) {
    if realtime {
        tokio::time::sleep(duration).await;
    }
}

/// Drive the engine until nothing is scheduled.
async fn settle(engine: &mut Masonry<DocumentHost>, realtime: bool) {
    if !realtime {
        let elapsed = engine.run_until_idle();
        debug!(elapsed_ms = elapsed.as_millis() as u64, "settled");
        return;
    }
    while let Some(deadline) = engine.next_deadline() {
        let wait = deadline.saturating_sub(engine.now());
        tokio::time::sleep(wait).await;
        engine.advance(wait);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default() {
        let args = Args::parse_from(["mosaic"]);
        assert!(args.scene.is_none());
        assert!(args.filter.is_none());
        assert!(!args.realtime);
    }

    #[test]
    fn test_args_filter_and_resize() {
        let args = Args::parse_from([
            "mosaic",
            "scene.json",
            "--filter",
            ".web",
            "--resize",
            "700",
        ]);
        assert_eq!(args.scene, Some(PathBuf::from("scene.json")));
        assert_eq!(args.filter.as_deref(), Some(".web"));
        assert_eq!(args.resize, Some(700.0));
    }

    #[test]
    fn test_wait_for_images_outcomes() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let timeout = Duration::from_millis(5000);

        let demo = Scene::demo();
        assert_eq!(rt.block_on(wait_for_images(&demo, timeout, false)), ImageWaitOutcome::Ready);

        let mut failing = Scene::demo();
        failing.items[2].images = vec![ImageStatus::Failed];
        assert_eq!(
            rt.block_on(wait_for_images(&failing, timeout, false)),
            ImageWaitOutcome::Failed { failed: 1 }
        );

        let mut stuck = Scene::demo();
        stuck.items[0].images.push(ImageStatus::Pending);
        assert_eq!(
            rt.block_on(wait_for_images(&stuck, timeout, false)),
            ImageWaitOutcome::TimedOut { settled: 7, total: 8 }
        );
    }
}
