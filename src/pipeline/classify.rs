use crate::error::AppError;
use crate::model::{Classification, FEATURE_COUNT, RiskModel};

#[tracing::instrument(
    name = "pipeline_stage classify",
    skip(model, features),
    fields(
        pipeline.stage = "classify",
        classification.label,
        classification.probability,
    )
)]
pub fn classify(
    model: &RiskModel,
    features: &[f64; FEATURE_COUNT],
) -> Result<Classification, AppError> {
    let label = model.predict(features);
    let probability = model.predict_proba(features)[1] * 100.0;

    let span = tracing::Span::current();
    span.record("classification.label", label.as_str());
    span.record("classification.probability", probability);

    Ok(Classification { label, probability })
}
