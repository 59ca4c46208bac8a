//! Demo artifact set for the reference additive engine
//!
//! Writes a complete, loadable artifact triple into a directory so the
//! demo binary and integration tests can exercise the store and the
//! full pipeline without the production model.

use std::fs;
use std::path::Path;

use crate::artifacts::names;
use crate::error::{Result, util};
use crate::models::features::FEATURE_COUNT;
use crate::schema::FeatureSchema;
use crate::scoring::AdditiveModelSpec;

/// A small background sample spanning typical form inputs, in schema
/// order: age, worst grade, PSA density, PNI, % positive cores,
/// % pattern 4/5, max % involvement, base finding, base/mid/apex
/// % involvement.
#[must_use]
pub fn demo_background() -> Vec<[f64; FEATURE_COUNT]> {
    vec![
        [55.0, 1.0, 0.10, 0.0, 20.0, 0.0, 10.0, 1.0, 10.0, 5.0, 0.0],
        [62.0, 2.0, 0.15, 0.0, 33.0, 10.0, 20.0, 2.0, 20.0, 10.0, 5.0],
        [66.0, 3.0, 0.18, 1.0, 50.0, 25.0, 40.0, 3.0, 40.0, 25.0, 15.0],
        [70.0, 4.0, 0.25, 1.0, 66.0, 50.0, 60.0, 4.0, 60.0, 45.0, 30.0],
        [74.0, 5.0, 0.40, 1.0, 80.0, 75.0, 80.0, 5.0, 80.0, 60.0, 50.0],
    ]
}

fn write_json<T: serde::Serialize>(dir: &Path, name: &str, value: &T) -> Result<()> {
    let path = dir.join(name);
    let content = serde_json::to_string_pretty(value)
        .map_err(|e| util::artifact_unavailable(name, e))?;
    fs::write(&path, content).map_err(|e| util::artifact_io_error(name, &path, &e))
}

/// Write the model, schema and background artifacts into `dir`.
pub fn write_demo_artifacts(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| util::artifact_io_error("demo artifacts", dir, &e))?;
    write_json(dir, names::MODEL, &AdditiveModelSpec::demo())?;
    write_json(dir, names::SCHEMA, &FeatureSchema::sepera_v1())?;
    write_json(dir, names::BACKGROUND, &demo_background())?;
    Ok(())
}
