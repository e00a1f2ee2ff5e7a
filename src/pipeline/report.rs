use crate::model::{Classification, FEATURE_COUNT};

use super::assemble::{Field, PatientRecord};

/// One per-field warning: the marker is appended to the field's report line
/// whenever the predicate holds.
pub struct WarningRule {
    pub field: Field,
    pub marker: &'static str,
    pub triggered: fn(&PatientRecord) -> bool,
}

/// The clinical warning thresholds, one rule per field.
pub const WARNING_RULES: [WarningRule; FEATURE_COUNT] = [
    WarningRule {
        field: Field::Age,
        marker: "(! High)",
        triggered: |r| r.age > 50,
    },
    WarningRule {
        field: Field::Sex,
        marker: "(! Higher Risk)",
        triggered: |r| r.sex == 1,
    },
    WarningRule {
        field: Field::ChestPain,
        marker: "(! Atypical/Asymptomatic)",
        triggered: |r| r.cp >= 2,
    },
    WarningRule {
        field: Field::RestingBp,
        marker: "(! High)",
        triggered: |r| r.trestbps > 130,
    },
    WarningRule {
        field: Field::Cholesterol,
        marker: "(! High)",
        triggered: |r| r.chol > 240,
    },
    WarningRule {
        field: Field::FastingBloodSugar,
        marker: "(! High)",
        triggered: |r| r.fbs == 1,
    },
    WarningRule {
        field: Field::RestingEcg,
        marker: "(! Abnormal)",
        triggered: |r| r.restecg > 0,
    },
    WarningRule {
        field: Field::MaxHeartRate,
        marker: "(! Low)",
        triggered: |r| r.thalach < 120,
    },
    WarningRule {
        field: Field::ExerciseAngina,
        marker: "(!)",
        triggered: |r| r.exang == 1,
    },
    WarningRule {
        field: Field::StDepression,
        marker: "(! High)",
        triggered: |r| r.oldpeak > 2.0,
    },
    WarningRule {
        field: Field::StSlope,
        marker: "(! Flat/Down)",
        triggered: |r| r.slope > 0,
    },
    WarningRule {
        field: Field::MajorVessels,
        marker: "(! Blocked)",
        triggered: |r| r.ca > 0,
    },
    WarningRule {
        field: Field::Thalassemia,
        marker: "(! Defect)",
        triggered: |r| r.thal > 1,
    },
];

/// Number of warning rules the record trips.
pub fn warning_count(record: &PatientRecord) -> usize {
    WARNING_RULES
        .iter()
        .filter(|rule| (rule.triggered)(record))
        .count()
}

fn marker_for(record: &PatientRecord, field: Field) -> &'static str {
    WARNING_RULES
        .iter()
        .find(|rule| rule.field == field)
        .filter(|rule| (rule.triggered)(record))
        .map(|rule| rule.marker)
        .unwrap_or("")
}

fn yes_no(flag: u8) -> &'static str {
    if flag == 1 { "Yes" } else { "No" }
}

#[tracing::instrument(
    name = "pipeline_stage report",
    skip(record, classification),
    fields(
        pipeline.stage = "report",
        report.warnings,
    )
)]
pub fn compose(record: &PatientRecord, classification: &Classification) -> String {
    let span = tracing::Span::current();
    span.record("report.warnings", warning_count(record));

    if classification.label.is_high() {
        risk_report(record, classification)
    } else {
        reassurance_summary(classification)
    }
}

fn risk_report(record: &PatientRecord, classification: &Classification) -> String {
    let mut out = String::new();

    out.push_str("Prediction: High Risk of Heart Disease Detected\n\n");
    out.push_str("Test Report:\n");
    out.push_str(&format!(
        "Probability of Heart Disease: {:.2}%\n\n",
        classification.probability
    ));

    out.push_str("Key Input Values:\n");
    push_line(&mut out, record, Field::Age, format!("- Age: {}", record.age));
    push_line(
        &mut out,
        record,
        Field::Sex,
        format!(
            "- Sex: {}",
            if record.sex == 1 { "Male" } else { "Female" }
        ),
    );
    push_line(
        &mut out,
        record,
        Field::ChestPain,
        format!("- Chest Pain Type (cp): {}", record.cp),
    );
    push_line(
        &mut out,
        record,
        Field::RestingBp,
        format!("- Resting BP (trestbps): {} mm Hg", record.trestbps),
    );
    push_line(
        &mut out,
        record,
        Field::Cholesterol,
        format!("- Cholesterol (chol): {} mg/dL", record.chol),
    );
    push_line(
        &mut out,
        record,
        Field::FastingBloodSugar,
        format!("- Fasting Blood Sugar >120 (fbs): {}", yes_no(record.fbs)),
    );
    push_line(
        &mut out,
        record,
        Field::RestingEcg,
        format!("- Resting ECG (restecg): {}", record.restecg),
    );
    push_line(
        &mut out,
        record,
        Field::MaxHeartRate,
        format!("- Max Heart Rate (thalach): {}", record.thalach),
    );
    push_line(
        &mut out,
        record,
        Field::ExerciseAngina,
        format!(
            "- Exercise Induced Angina (exang): {}",
            yes_no(record.exang)
        ),
    );
    push_line(
        &mut out,
        record,
        Field::StDepression,
        format!("- ST Depression (oldpeak): {}", record.oldpeak),
    );
    push_line(
        &mut out,
        record,
        Field::StSlope,
        format!("- Slope of ST (slope): {}", record.slope),
    );
    push_line(
        &mut out,
        record,
        Field::MajorVessels,
        format!("- Major Vessels (ca): {}", record.ca),
    );
    push_line(
        &mut out,
        record,
        Field::Thalassemia,
        format!("- Thalassemia (thal): {}", record.thal),
    );

    out.push_str("\nRecommendations:\n");
    out.push_str("- Consult a cardiologist for ECG, echo, or stress testing.\n");
    out.push_str("- Adopt a heart-healthy diet: low salt, low fat.\n");
    out.push_str("- Exercise moderately five days a week.\n");
    out.push_str("- Avoid smoking, alcohol, and stress.\n");
    out.push_str("- Monitor blood pressure, cholesterol, and sugar regularly.\n\n");
    out.push_str(
        "Disclaimer: This result is based on a machine learning model and is not a medical \
         diagnosis. Always consult a licensed doctor.\n",
    );

    out
}

fn reassurance_summary(classification: &Classification) -> String {
    let mut out = String::new();

    out.push_str("Prediction: No Heart Disease Detected\n\n");
    out.push_str("Test Summary:\n");
    out.push_str(&format!(
        "Probability of Heart Disease: {:.2}%\n\n",
        100.0 - classification.probability
    ));
    out.push_str("Keep maintaining your healthy lifestyle:\n");
    out.push_str("- Balanced diet\n");
    out.push_str("- Regular exercise\n");
    out.push_str("- Stress management\n");
    out.push_str("- Routine checkups\n\n");
    out.push_str("This tool provides a preliminary analysis based on the provided inputs.\n");

    out
}

fn push_line(out: &mut String, record: &PatientRecord, field: Field, text: String) {
    out.push_str(&text);
    let marker = marker_for(record, field);
    if !marker.is_empty() {
        out.push(' ');
        out.push_str(marker);
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RiskLabel;
    use crate::pipeline::assemble::tests::verification_record;

    fn high(probability: f64) -> Classification {
        Classification {
            label: RiskLabel::High,
            probability,
        }
    }

    fn low(probability: f64) -> Classification {
        Classification {
            label: RiskLabel::Low,
            probability,
        }
    }

    #[test]
    fn test_compose_is_deterministic() {
        let record = verification_record();
        let classification = high(97.32);
        assert_eq!(
            compose(&record, &classification),
            compose(&record, &classification)
        );
    }

    #[test]
    fn test_templates_are_mutually_exclusive() {
        let record = verification_record();

        let positive = compose(&record, &high(88.0));
        assert!(positive.contains("High Risk of Heart Disease Detected"));
        assert!(!positive.contains("No Heart Disease Detected"));
        assert!(positive.contains("Recommendations:"));

        let negative = compose(&record, &low(12.0));
        assert!(negative.contains("No Heart Disease Detected"));
        assert!(!negative.contains("High Risk of Heart Disease Detected"));
        assert!(!negative.contains("Recommendations:"));
    }

    #[test]
    fn test_positive_report_shows_positive_probability() {
        let report = compose(&verification_record(), &high(97.3195));
        assert!(report.contains("Probability of Heart Disease: 97.32%"));
    }

    #[test]
    fn test_negative_report_shows_complement_probability() {
        let report = compose(&verification_record(), &low(14.0059));
        assert!(report.contains("Probability of Heart Disease: 85.99%"));
    }

    #[test]
    fn test_age_marker_boundary() {
        let mut record = verification_record();

        record.age = 50;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Age: 50\n"));

        record.age = 51;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Age: 51 (! High)\n"));
    }

    #[test]
    fn test_sex_marker() {
        let mut record = verification_record();

        record.sex = 0;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Sex: Female\n"));

        record.sex = 1;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Sex: Male (! Higher Risk)\n"));
    }

    #[test]
    fn test_chest_pain_marker_boundary() {
        let mut record = verification_record();

        record.cp = 1;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Chest Pain Type (cp): 1\n"));

        record.cp = 2;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Chest Pain Type (cp): 2 (! Atypical/Asymptomatic)\n"));
    }

    #[test]
    fn test_resting_bp_marker_boundary() {
        let mut record = verification_record();

        record.trestbps = 130;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Resting BP (trestbps): 130 mm Hg\n"));

        record.trestbps = 131;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Resting BP (trestbps): 131 mm Hg (! High)\n"));
    }

    #[test]
    fn test_cholesterol_marker_boundary() {
        let mut record = verification_record();

        record.chol = 240;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Cholesterol (chol): 240 mg/dL\n"));

        record.chol = 241;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Cholesterol (chol): 241 mg/dL (! High)\n"));
    }

    #[test]
    fn test_fasting_blood_sugar_marker() {
        let mut record = verification_record();

        record.fbs = 0;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Fasting Blood Sugar >120 (fbs): No\n"));

        record.fbs = 1;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Fasting Blood Sugar >120 (fbs): Yes (! High)\n"));
    }

    #[test]
    fn test_resting_ecg_marker_boundary() {
        let mut record = verification_record();

        record.restecg = 0;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Resting ECG (restecg): 0\n"));

        record.restecg = 1;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Resting ECG (restecg): 1 (! Abnormal)\n"));
    }

    #[test]
    fn test_max_heart_rate_marker_boundary() {
        let mut record = verification_record();

        record.thalach = 120;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Max Heart Rate (thalach): 120\n"));

        record.thalach = 119;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Max Heart Rate (thalach): 119 (! Low)\n"));
    }

    #[test]
    fn test_exercise_angina_marker() {
        let mut record = verification_record();

        record.exang = 0;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Exercise Induced Angina (exang): No\n"));

        record.exang = 1;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Exercise Induced Angina (exang): Yes (!)\n"));
    }

    #[test]
    fn test_st_depression_marker_boundary() {
        let mut record = verification_record();

        record.oldpeak = 2.0;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- ST Depression (oldpeak): 2\n"));

        record.oldpeak = 2.1;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- ST Depression (oldpeak): 2.1 (! High)\n"));
    }

    #[test]
    fn test_st_slope_marker_boundary() {
        let mut record = verification_record();

        record.slope = 0;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Slope of ST (slope): 0\n"));

        record.slope = 1;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Slope of ST (slope): 1 (! Flat/Down)\n"));
    }

    #[test]
    fn test_major_vessels_marker_boundary() {
        let mut record = verification_record();

        record.ca = 0;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Major Vessels (ca): 0\n"));

        record.ca = 1;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Major Vessels (ca): 1 (! Blocked)\n"));
    }

    #[test]
    fn test_thalassemia_marker_boundary() {
        let mut record = verification_record();

        record.thal = 1;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Thalassemia (thal): 1\n"));

        record.thal = 2;
        let report = compose(&record, &high(90.0));
        assert!(report.contains("- Thalassemia (thal): 2 (! Defect)\n"));
    }

    #[test]
    fn test_warning_count_for_verification_record() {
        // age 62, trestbps 140, chol 268, oldpeak 3.6, ca 2, thal 2.
        assert_eq!(warning_count(&verification_record()), 6);
    }

    #[test]
    fn test_all_rules_can_fire_together() {
        let record = crate::pipeline::assemble::PatientRecord {
            age: 62,
            sex: 1,
            cp: 3,
            trestbps: 150,
            chol: 280,
            fbs: 1,
            restecg: 2,
            thalach: 100,
            exang: 1,
            oldpeak: 3.0,
            slope: 2,
            ca: 3,
            thal: 3,
        };
        assert_eq!(warning_count(&record), WARNING_RULES.len());
    }
}
