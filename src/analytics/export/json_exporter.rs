use super::{ExportConfig, ExportError, FormatHandler, ReportData};

/// JSON形式エクスポーター
pub struct JsonExporter {
    pretty_print: bool,
}

impl JsonExporter {
    pub fn new() -> Self {
        Self { pretty_print: true }
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// レポートをJSON値に変換（空の配列もキーとして残す）
    fn to_json_value(
        &self,
        data: &ReportData,
        config: &ExportConfig,
    ) -> Result<serde_json::Value, ExportError> {
        let mut json =
            serde_json::to_value(data).map_err(|e| ExportError::Serialization(e.to_string()))?;

        if let serde_json::Value::Object(ref mut map) = json {
            if !config.include_metadata {
                map.remove("metadata");
            }
        }

        Ok(json)
    }
}

impl FormatHandler for JsonExporter {
    fn export(&self, data: &ReportData, config: &ExportConfig) -> Result<Vec<u8>, ExportError> {
        let mut cloned_data = data.clone();

        cloned_data.sort_interactions(config.sort_order);
        cloned_data.apply_filters(config);

        if config.include_metadata {
            cloned_data.record_filters(config);
        }

        let json_value = self.to_json_value(&cloned_data, config)?;

        let json_bytes = if self.pretty_print {
            serde_json::to_vec_pretty(&json_value)
        } else {
            serde_json::to_vec(&json_value)
        }
        .map_err(|e| ExportError::Serialization(e.to_string()))?;

        Ok(json_bytes)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::CoachingThresholds;
    use crate::data::SampleDataGenerator;

    fn create_test_report() -> ReportData {
        let dataset = SampleDataGenerator::with_seed(8).generate();
        ReportData::from_dataset(&dataset, &CoachingThresholds::default(), 5)
    }

    #[test]
    fn test_json_export() {
        let exporter = JsonExporter::new();
        let json_bytes = exporter.export(&create_test_report(), &ExportConfig::default()).unwrap();

        let json_value: serde_json::Value = serde_json::from_slice(&json_bytes).unwrap();
        assert_eq!(json_value["metadata"]["agent_count"], 5);
        assert_eq!(json_value["interactions"].as_array().unwrap().len(), 50);
        assert_eq!(json_value["summary"]["total_agents"], 5);
        assert!(json_value["metadata"]["filters_applied"][0]
            .as_str()
            .unwrap()
            .starts_with("sort_order"));
    }

    #[test]
    fn test_json_export_without_metadata() {
        let exporter = JsonExporter::new().with_pretty_print(false);
        let config = ExportConfig {
            include_metadata: false,
            ..Default::default()
        };

        let json_bytes = exporter.export(&create_test_report(), &config).unwrap();
        let json_value: serde_json::Value = serde_json::from_slice(&json_bytes).unwrap();
        assert!(json_value.get("metadata").is_none());
        assert!(json_value.get("summary").is_some());
    }

    #[test]
    fn test_json_export_with_max_records() {
        let exporter = JsonExporter::new();
        let config = ExportConfig {
            max_records: Some(2),
            ..Default::default()
        };

        let json_bytes = exporter.export(&create_test_report(), &config).unwrap();
        let json_value: serde_json::Value = serde_json::from_slice(&json_bytes).unwrap();
        assert_eq!(json_value["interactions"].as_array().unwrap().len(), 2);
        assert_eq!(json_value["metadata"]["interaction_count"], 2);
    }

    #[test]
    fn test_json_export_keeps_empty_arrays() {
        let mut report = create_test_report();
        report.coaching_candidates.clear();
        let config = ExportConfig {
            sentiment: Some(crate::data::Sentiment::Negative),
            ..Default::default()
        };
        report
            .interactions
            .retain(|i| i.sentiment != crate::data::Sentiment::Negative);

        let json_bytes = JsonExporter::new().export(&report, &config).unwrap();
        let json_value: serde_json::Value = serde_json::from_slice(&json_bytes).unwrap();

        // 該当なしでもキーは残り、空配列になる
        assert_eq!(json_value["coaching_candidates"], serde_json::json!([]));
        assert_eq!(json_value["interactions"], serde_json::json!([]));
        assert_eq!(json_value["metadata"]["interaction_count"], 0);
    }
}
