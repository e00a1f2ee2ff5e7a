//! Manual verification harness: classifies one hard-coded record with the
//! same artifact the server loads and prints the outcome.

use heart_report_generator::config::Config;
use heart_report_generator::model::RiskModel;
use heart_report_generator::pipeline::PatientRecord;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    let model = RiskModel::load(&config.model_path)?;

    let record = PatientRecord {
        age: 62,
        sex: 0,
        cp: 0,
        trestbps: 140,
        chol: 268,
        fbs: 0,
        restecg: 0,
        thalach: 160,
        exang: 0,
        oldpeak: 3.6,
        slope: 0,
        ca: 2,
        thal: 2,
    };

    if model.predict(&record.as_features()).is_high() {
        println!("The person has heart disease.");
    } else {
        println!("The person does not have heart disease.");
    }

    Ok(())
}
