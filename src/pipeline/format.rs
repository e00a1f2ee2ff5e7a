use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::model::{Classification, RiskLabel};

use super::chart::ChartSpec;

/// The finished response for one submission: classification, report text,
/// and the chart description, plus generation metadata.
#[derive(Debug, Clone, Serialize)]
pub struct RiskReport {
    pub id: Uuid,
    pub label: RiskLabel,
    pub probability: f64,
    pub report: String,
    pub chart: ChartSpec,
    pub generated_at: DateTime<Utc>,
    pub generation_duration_ms: u64,
    pub trace_id: String,
}

pub struct FormatParams {
    pub classification: Classification,
    pub report_text: String,
    pub chart: ChartSpec,
    pub duration: Duration,
    pub trace_id: String,
}

#[tracing::instrument(
    name = "pipeline_stage format",
    skip(params),
    fields(
        pipeline.stage = "format",
        report.label,
        report.probability,
    )
)]
pub fn format_report(params: FormatParams) -> Result<RiskReport, AppError> {
    let span = tracing::Span::current();
    span.record("report.label", params.classification.label.as_str());
    span.record("report.probability", params.classification.probability);

    Ok(RiskReport {
        id: Uuid::new_v4(),
        label: params.classification.label,
        probability: params.classification.probability,
        report: params.report_text,
        chart: params.chart,
        generated_at: Utc::now(),
        generation_duration_ms: params.duration.as_millis() as u64,
        trace_id: params.trace_id,
    })
}
