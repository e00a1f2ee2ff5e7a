use axum::{
    Json,
    extract::State,
    http::header,
    response::IntoResponse,
};

use crate::AppState;
use crate::error::AppResult;
use crate::pipeline::pdf::{self, REPORT_CONTENT_DISPOSITION, REPORT_MIME};
use crate::pipeline::{PatientRecord, RiskReport, generate_report};

pub async fn create_report(
    State(state): State<AppState>,
    Json(record): Json<PatientRecord>,
) -> AppResult<Json<RiskReport>> {
    let report = generate_report(&state.model, &record)?;
    Ok(Json(report))
}

pub async fn download_pdf(
    State(state): State<AppState>,
    Json(record): Json<PatientRecord>,
) -> AppResult<impl IntoResponse> {
    let report = generate_report(&state.model, &record)?;
    let bytes = pdf::render_pdf(&report.report)?;

    Ok((
        [
            (header::CONTENT_TYPE, REPORT_MIME),
            (header::CONTENT_DISPOSITION, REPORT_CONTENT_DISPOSITION),
        ],
        bytes,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_body_deserialize() {
        let record: PatientRecord = serde_json::from_str(
            r#"{"age": 62, "sex": 0, "cp": 0, "trestbps": 140, "chol": 268, "fbs": 0,
                "restecg": 0, "thalach": 160, "exang": 0, "oldpeak": 3.6, "slope": 0,
                "ca": 2, "thal": 2}"#,
        )
        .unwrap();
        assert_eq!(record.age, 62);
        assert_eq!(record.oldpeak, 3.6);
    }

    #[test]
    fn test_record_body_rejects_missing_field() {
        let result: Result<PatientRecord, _> = serde_json::from_str(r#"{"age": 62}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_download_filename_is_fixed() {
        assert_eq!(REPORT_MIME, "application/pdf");
        assert!(REPORT_CONTENT_DISPOSITION.contains(pdf::REPORT_FILENAME));
    }
}
