//! Startup loading of the model context from cached artifacts.

use log::info;

use crate::artifacts::{ArtifactSource, ArtifactStore, names};
use crate::error::Result;
use crate::models::features::FEATURE_COUNT;
use crate::schema::FeatureSchema;
use crate::scoring::{ModelContext, ModelEngine};

/// Obtain all three artifacts and build the immutable `ModelContext`.
///
/// This is the one startup entry point: it runs the idempotent fetches,
/// parses schema and background, hands the raw model bytes to the
/// engine, and validates the resulting schema layout. Any failure is
/// fatal; callers must not serve without a context.
pub fn load_model_context<S: ArtifactSource, E: ModelEngine>(
    store: &ArtifactStore<S>,
    engine: &E,
) -> Result<ModelContext> {
    let mut schema: FeatureSchema = store.load_json(names::SCHEMA)?;
    schema.reindex();
    let background: Vec<[f64; FEATURE_COUNT]> = store.load_json(names::BACKGROUND)?;
    let model_bytes = store.load_bytes(names::MODEL)?;

    let model = engine.load(&model_bytes, &schema, &background)?;
    let context = ModelContext::new(model, schema)?;
    info!(
        "model context loaded (schema {}, {} background samples)",
        context.schema().version,
        background.len()
    );
    Ok(context)
}
