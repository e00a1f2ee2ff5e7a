use opentelemetry::KeyValue;

use crate::error::AppError;
use crate::model::RiskModel;
use crate::telemetry::current_trace_id;
use crate::telemetry::metrics::{PREDICTIONS_TOTAL, REPORT_GENERATION_DURATION, REPORT_WARNINGS};

use super::assemble::PatientRecord;
use super::format::{self, FormatParams, RiskReport};
use super::{assemble, chart, classify, report};

#[tracing::instrument(
    name = "pipeline report",
    skip(model, record),
    fields(
        report.id,
        report.label,
        report.duration_ms,
    )
)]
pub fn generate_report(model: &RiskModel, record: &PatientRecord) -> Result<RiskReport, AppError> {
    let start = std::time::Instant::now();
    let trace_id = current_trace_id().unwrap_or_default();

    // Stage 1: validate ranges and assemble the feature vector
    let features = assemble::assemble(record)?;

    // Stage 2: classify against the loaded model
    let classification = classify::classify(model, &features)?;

    // Stage 3: compose the report text
    let report_text = report::compose(record, &classification);

    // Stage 4: derive the indicator chart
    let chart = chart::risk_chart(record);

    // Stage 5: assemble the final response
    let duration = start.elapsed();
    let risk_report = format::format_report(FormatParams {
        classification,
        report_text,
        chart,
        duration,
        trace_id,
    })?;

    // Record domain metrics
    REPORT_GENERATION_DURATION.record(duration.as_secs_f64(), &[]);
    REPORT_WARNINGS.record(report::warning_count(record) as f64, &[]);
    PREDICTIONS_TOTAL.add(
        1,
        &[KeyValue::new("prediction.label", risk_report.label.as_str())],
    );

    let span = tracing::Span::current();
    span.record("report.id", risk_report.id.to_string());
    span.record("report.label", risk_report.label.as_str());
    span.record("report.duration_ms", risk_report.generation_duration_ms);

    Ok(risk_report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelArtifact, RiskLabel};
    use crate::pipeline::assemble::tests::verification_record;

    fn test_model() -> RiskModel {
        let artifact: ModelArtifact = serde_json::from_str(
            r#"{
                "feature_names": ["age","sex","cp","trestbps","chol","fbs","restecg","thalach","exang","oldpeak","slope","ca","thal"],
                "coefficients": [-0.004, -1.86, 0.86, -0.019, -0.0046, 0.035, 0.47, 0.023, -0.98, -0.54, 0.44, -0.78, -0.9],
                "intercept": 3.95
            }"#,
        )
        .unwrap();
        RiskModel::from_artifact(artifact).unwrap()
    }

    #[test]
    fn test_generate_report_end_to_end() {
        let model = test_model();
        let record = verification_record();
        let report = generate_report(&model, &record).unwrap();

        assert_eq!(report.label, RiskLabel::Low);
        assert!(report.report.contains("No Heart Disease Detected"));
        assert!(report.report.contains("Probability of Heart Disease: 85.99%"));
        assert_eq!(report.chart.bars.len(), 6);
    }

    #[test]
    fn test_generate_report_rejects_invalid_record() {
        let model = test_model();
        let mut record = verification_record();
        record.chol = 700;
        let err = generate_report(&model, &record).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_report_text_is_pure_over_inputs() {
        let model = test_model();
        let record = verification_record();
        let a = generate_report(&model, &record).unwrap();
        let b = generate_report(&model, &record).unwrap();
        assert_eq!(a.report, b.report);
        assert_eq!(a.chart, b.chart);
        assert_ne!(a.id, b.id);
    }
}
