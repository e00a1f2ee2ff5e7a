use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::model::FEATURE_COUNT;

/// One patient record as submitted by the form: thirteen clinical
/// measurements in the classifier's feature order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub age: u32,
    pub sex: u8,
    pub cp: u8,
    pub trestbps: u32,
    pub chol: u32,
    pub fbs: u8,
    pub restecg: u8,
    pub thalach: u32,
    pub exang: u8,
    pub oldpeak: f64,
    pub slope: u8,
    pub ca: u8,
    pub thal: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Age,
    Sex,
    ChestPain,
    RestingBp,
    Cholesterol,
    FastingBloodSugar,
    RestingEcg,
    MaxHeartRate,
    ExerciseAngina,
    StDepression,
    StSlope,
    MajorVessels,
    Thalassemia,
}

impl PatientRecord {
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Age => f64::from(self.age),
            Field::Sex => f64::from(self.sex),
            Field::ChestPain => f64::from(self.cp),
            Field::RestingBp => f64::from(self.trestbps),
            Field::Cholesterol => f64::from(self.chol),
            Field::FastingBloodSugar => f64::from(self.fbs),
            Field::RestingEcg => f64::from(self.restecg),
            Field::MaxHeartRate => f64::from(self.thalach),
            Field::ExerciseAngina => f64::from(self.exang),
            Field::StDepression => self.oldpeak,
            Field::StSlope => f64::from(self.slope),
            Field::MajorVessels => f64::from(self.ca),
            Field::Thalassemia => f64::from(self.thal),
        }
    }

    /// The record as the classifier's fixed-size feature vector. The array
    /// size makes a call-time shape mismatch unrepresentable.
    pub fn as_features(&self) -> [f64; FEATURE_COUNT] {
        let mut features = [0.0; FEATURE_COUNT];
        for (slot, spec) in features.iter_mut().zip(FIELDS.iter()) {
            *slot = self.value(spec.field);
        }
        features
    }
}

/// Descriptor of one form input: wire name, human label, and the closed
/// numeric range enforced at input time.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    #[serde(skip)]
    pub field: Field,
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// The thirteen inputs in classifier feature order, with the closed ranges
/// enforced at submission time.
pub const FIELDS: [FieldSpec; FEATURE_COUNT] = [
    FieldSpec {
        field: Field::Age,
        name: "age",
        label: "Age (years)",
        min: 1.0,
        max: 120.0,
        step: 1.0,
    },
    FieldSpec {
        field: Field::Sex,
        name: "sex",
        label: "Sex (1 = male, 0 = female)",
        min: 0.0,
        max: 1.0,
        step: 1.0,
    },
    FieldSpec {
        field: Field::ChestPain,
        name: "cp",
        label: "Chest pain type (0 = typical angina, 1 = atypical angina, 2 = non-anginal pain, 3 = asymptomatic)",
        min: 0.0,
        max: 3.0,
        step: 1.0,
    },
    FieldSpec {
        field: Field::RestingBp,
        name: "trestbps",
        label: "Resting blood pressure (mm Hg)",
        min: 50.0,
        max: 250.0,
        step: 1.0,
    },
    FieldSpec {
        field: Field::Cholesterol,
        name: "chol",
        label: "Serum cholesterol (mg/dL)",
        min: 100.0,
        max: 600.0,
        step: 1.0,
    },
    FieldSpec {
        field: Field::FastingBloodSugar,
        name: "fbs",
        label: "Fasting blood sugar > 120 mg/dL (1 = yes, 0 = no)",
        min: 0.0,
        max: 1.0,
        step: 1.0,
    },
    FieldSpec {
        field: Field::RestingEcg,
        name: "restecg",
        label: "Resting ECG (0 = normal, 1 = ST-T abnormality, 2 = LV hypertrophy)",
        min: 0.0,
        max: 2.0,
        step: 1.0,
    },
    FieldSpec {
        field: Field::MaxHeartRate,
        name: "thalach",
        label: "Maximum heart rate achieved",
        min: 60.0,
        max: 250.0,
        step: 1.0,
    },
    FieldSpec {
        field: Field::ExerciseAngina,
        name: "exang",
        label: "Exercise induced angina (1 = yes, 0 = no)",
        min: 0.0,
        max: 1.0,
        step: 1.0,
    },
    FieldSpec {
        field: Field::StDepression,
        name: "oldpeak",
        label: "ST depression (oldpeak value)",
        min: 0.0,
        max: 10.0,
        step: 0.1,
    },
    FieldSpec {
        field: Field::StSlope,
        name: "slope",
        label: "Slope of ST segment (0 = up, 1 = flat, 2 = down)",
        min: 0.0,
        max: 2.0,
        step: 1.0,
    },
    FieldSpec {
        field: Field::MajorVessels,
        name: "ca",
        label: "Number of major vessels (0-3)",
        min: 0.0,
        max: 3.0,
        step: 1.0,
    },
    FieldSpec {
        field: Field::Thalassemia,
        name: "thal",
        label: "Thalassemia (1 = normal, 2 = fixed defect, 3 = reversible defect)",
        min: 1.0,
        max: 3.0,
        step: 1.0,
    },
];

#[tracing::instrument(
    name = "pipeline_stage assemble",
    skip(record),
    fields(pipeline.stage = "assemble")
)]
pub fn assemble(record: &PatientRecord) -> Result<[f64; FEATURE_COUNT], AppError> {
    for spec in &FIELDS {
        let value = record.value(spec.field);
        if value < spec.min || value > spec.max {
            return Err(AppError::Validation(format!(
                "{} must be between {} and {}",
                spec.name, spec.min, spec.max
            )));
        }
    }

    Ok(record.as_features())
}
