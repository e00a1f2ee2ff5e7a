use axum::Json;

use crate::pipeline::assemble::{FIELDS, FieldSpec};

/// The thirteen form inputs with their labels and closed ranges, so the
/// form renders from the same table the validator enforces.
pub async fn list_fields() -> Json<Vec<FieldSpec>> {
    Json(FIELDS.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_all_thirteen_fields() {
        let Json(fields) = tokio_test::block_on(list_fields());
        assert_eq!(fields.len(), 13);
        assert_eq!(fields[0].name, "age");
        assert_eq!(fields[12].name, "thal");
    }

    #[test]
    fn test_field_spec_serialization_skips_enum_tag() {
        let json = serde_json::to_value(FIELDS[0]).unwrap();
        assert_eq!(json["name"], "age");
        assert_eq!(json["min"], 1.0);
        assert_eq!(json["max"], 120.0);
        assert!(json.get("field").is_none());
    }
}
