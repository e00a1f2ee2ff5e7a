use serde::Serialize;

use super::assemble::PatientRecord;

pub const OVER_THRESHOLD_COLOR: &str = "red";
pub const UNDER_THRESHOLD_COLOR: &str = "green";

const CHART_TITLE: &str = "Heart Risk Indicators";
const X_AXIS_TITLE: &str = "Medical Parameters";
const Y_AXIS_TITLE: &str = "Value (scaled where needed)";
const CHART_HEIGHT: u32 = 400;

/// One bar of the indicator chart: a scaled value against its fixed cutoff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: &'static str,
    pub value: f64,
    pub text: String,
    pub threshold: f64,
    pub color: &'static str,
}

/// Renderable description of the six-bar risk chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: &'static str,
    pub x_axis_title: &'static str,
    pub y_axis_title: &'static str,
    pub height: u32,
    pub bars: Vec<ChartBar>,
}

/// The fixed scaling applied to the six charted indicators. The scale
/// factors exist only to put the values on one visual axis; each threshold
/// is compared against the scaled value, not the raw measurement.
const INDICATORS: [(&str, fn(&PatientRecord) -> f64, f64); 6] = [
    ("Age", |r| f64::from(r.age), 50.0),
    ("Resting BP", |r| f64::from(r.trestbps), 130.0),
    ("Cholesterol", |r| f64::from(r.chol), 240.0),
    ("Fasting Sugar", |r| f64::from(r.fbs) * 200.0, 120.0),
    ("Max HR", |r| f64::from(r.thalach), 120.0),
    ("ST Depression", |r| r.oldpeak * 50.0, 2.0),
];

#[tracing::instrument(
    name = "pipeline_stage chart",
    skip(record),
    fields(
        pipeline.stage = "chart",
        chart.bars_over_threshold,
    )
)]
pub fn risk_chart(record: &PatientRecord) -> ChartSpec {
    let bars: Vec<ChartBar> = INDICATORS
        .into_iter()
        .map(|(label, scale, threshold)| {
            let value = scale(record);
            ChartBar {
                label,
                value,
                text: format!("{value}"),
                threshold,
                color: if value > threshold {
                    OVER_THRESHOLD_COLOR
                } else {
                    UNDER_THRESHOLD_COLOR
                },
            }
        })
        .collect();

    let span = tracing::Span::current();
    span.record(
        "chart.bars_over_threshold",
        bars.iter()
            .filter(|b| b.color == OVER_THRESHOLD_COLOR)
            .count(),
    );

    ChartSpec {
        title: CHART_TITLE,
        x_axis_title: X_AXIS_TITLE,
        y_axis_title: Y_AXIS_TITLE,
        height: CHART_HEIGHT,
        bars,
    }
}
