//! Demo binary running the full assessment pass
//!
//! Writes the reference additive artifacts into a scratch source
//! directory, loads them through the artifact store (second runs hit
//! the cache), and assesses the example submission, printing the
//! per-lobe probabilities, top attributions and diagram plan.

use anyhow::{Context, Result};
use log::info;

use sepera::artifacts::{ArtifactStore, ArtifactStoreConfig, LocalDirSource, demo};
use sepera::models::BiopsySubmission;
use sepera::scoring::AdditiveEngine;
use sepera::{LobeSide, assess_submission, load_model_context};

fn main() -> Result<()> {
    env_logger::init();

    let scratch = std::env::temp_dir().join("sepera-demo");
    let source_dir = scratch.join("source");
    let cache_dir = scratch.join("cache");

    demo::write_demo_artifacts(&source_dir).context("writing demo artifacts")?;
    let store = ArtifactStore::new(
        ArtifactStoreConfig::new(&cache_dir),
        LocalDirSource::new(&source_dir),
    )
    .context("opening artifact cache")?;

    let context = load_model_context(&store, &AdditiveEngine).context("loading model context")?;
    info!("model context ready");

    let submission = BiopsySubmission::example();
    let report = assess_submission(&context, &submission).context("assessing submission")?;

    for side in LobeSide::ALL {
        let lobe = report.lobe(side);
        println!(
            "{side} lobe: {:.1}% probability of ssEPE",
            lobe.probability * 100.0
        );
        let mut attributions = lobe.named_attributions();
        attributions.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
        for (name, value) in attributions.iter().take(5) {
            println!("  {name:<28} {value:+.4}");
        }
    }

    println!("\ndiagram: base asset '{}'", report.diagram.base_asset);
    for annotation in &report.diagram.annotations {
        match &annotation.overlay {
            Some(overlay) => println!(
                "  {} {}: {} at {:?} ({:?})",
                annotation.side,
                annotation.position,
                overlay.asset_id,
                overlay.paste_at,
                overlay.orientation
            ),
            None => println!(
                "  {} {}: no overlay (benign)",
                annotation.side, annotation.position
            ),
        }
    }

    Ok(())
}
