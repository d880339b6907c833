use crate::model::SalesReport;

/// Pretty-printed JSON with the stable camelCase field names.
pub fn to_json(report: &SalesReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::KeyValue;

    #[test]
    fn top_lists_serialize_as_key_value_objects() {
        let report = SalesReport {
            top_customers: vec![KeyValue { key: "Acme".into(), value: 487.0 }],
            exec_summary: Some("All good.".into()),
            ..SalesReport::default()
        };
        let parsed: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();
        assert_eq!(parsed["topCustomers"][0]["key"], "Acme");
        assert_eq!(parsed["topCustomers"][0]["value"], 487.0);
        assert_eq!(parsed["execSummary"], "All good.");
    }
}
