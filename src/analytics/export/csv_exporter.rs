use super::{ExportConfig, ExportError, ExportableInteraction, FormatHandler, ReportData};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// CSV形式エクスポーター
pub struct CsvExporter {
    delimiter: char,
    include_headers: bool,
}

impl CsvExporter {
    pub fn new() -> Self {
        Self {
            delimiter: ',',
            include_headers: true,
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_headers(mut self, include_headers: bool) -> Self {
        self.include_headers = include_headers;
        self
    }

    /// CSVフィールドをエスケープ
    fn escape_csv_field(&self, field: &str) -> String {
        if field.contains(self.delimiter)
            || field.contains('"')
            || field.contains('\n')
            || field.contains('\r')
        {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// CSVヘッダーを生成
    fn generate_headers(&self) -> String {
        let headers = [
            "id",
            "timestamp",
            "agent_id",
            "agent_name",
            "team",
            "channel",
            "duration_secs",
            "sentiment",
            "resolution",
            "topic",
        ];

        headers.join(&self.delimiter.to_string())
    }

    /// 対応記録をCSV行に変換
    fn interaction_to_csv_row(&self, interaction: &ExportableInteraction) -> String {
        let fields = [
            interaction.id.to_string(),
            interaction.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            interaction.agent_id.to_string(),
            self.escape_csv_field(&interaction.agent_name),
            self.escape_csv_field(&interaction.team.to_string()),
            interaction.channel.to_string(),
            interaction
                .duration_secs
                .map_or(String::new(), |d| d.to_string()),
            interaction.sentiment.to_string(),
            interaction.resolution.to_string(),
            self.escape_csv_field(&interaction.topic.to_string()),
        ];

        fields.join(&self.delimiter.to_string())
    }

    /// メタデータセクションを生成
    fn generate_metadata_section(&self, data: &ReportData) -> String {
        let d = self.delimiter;
        let mut lines = vec![
            "# Metadata".to_string(),
            format!("# Generated At{}{}", d, data.metadata.generated_at.format(TIMESTAMP_FORMAT)),
            format!("# Total Agents{}{}", d, data.metadata.agent_count),
            format!("# Total Interactions{}{}", d, data.metadata.interaction_count),
            format!("# Resolution Rate{}{}", d, data.summary.resolution_rate),
            format!("# Negative Sentiment{}{}", d, data.summary.negative_rate),
            format!("# Coaching Candidates{}{}", d, data.coaching_candidates.len()),
            format!("# Export Time{}{}", d, data.metadata.export_time.format(TIMESTAMP_FORMAT)),
        ];
        for filter in &data.metadata.filters_applied {
            lines.push(format!("# Filter{}{}", d, self.escape_csv_field(filter)));
        }
        lines.push(String::new());
        lines.push(String::new());

        lines.join("\n")
    }
}

impl FormatHandler for CsvExporter {
    fn export(&self, data: &ReportData, config: &ExportConfig) -> Result<Vec<u8>, ExportError> {
        let mut cloned_data = data.clone();

        cloned_data.sort_interactions(config.sort_order);
        cloned_data.apply_filters(config);

        let mut csv_content = Vec::new();

        if config.include_metadata {
            cloned_data.record_filters(config);
            let metadata_section = self.generate_metadata_section(&cloned_data);
            csv_content.extend_from_slice(metadata_section.as_bytes());
        }

        if self.include_headers {
            csv_content.extend_from_slice(self.generate_headers().as_bytes());
            csv_content.push(b'\n');
        }

        for interaction in &cloned_data.interactions {
            csv_content.extend_from_slice(self.interaction_to_csv_row(interaction).as_bytes());
            csv_content.push(b'\n');
        }

        Ok(csv_content)
    }

    fn file_extension(&self) -> &str {
        "csv"
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::export::SortOrder;
    use crate::analytics::CoachingThresholds;
    use crate::data::{SampleDataGenerator, Sentiment};

    fn create_test_report() -> ReportData {
        let dataset = SampleDataGenerator::with_seed(5).generate();
        ReportData::from_dataset(&dataset, &CoachingThresholds::default(), 5)
    }

    #[test]
    fn test_csv_export() {
        let exporter = CsvExporter::new();
        let config = ExportConfig::default();

        let csv_bytes = exporter.export(&create_test_report(), &config).unwrap();
        let csv_str = String::from_utf8(csv_bytes).unwrap();

        assert!(csv_str.starts_with("# Metadata\n"));
        assert!(csv_str.contains("# Total Interactions,50"));
        assert!(csv_str.contains("id,timestamp,agent_id,agent_name,team"));
    }

    #[test]
    fn test_csv_export_without_metadata_or_headers() {
        let exporter = CsvExporter::new().with_headers(false);
        let config = ExportConfig {
            include_metadata: false,
            max_records: Some(3),
            ..Default::default()
        };

        let csv_str = String::from_utf8(exporter.export(&create_test_report(), &config).unwrap()).unwrap();
        assert!(!csv_str.contains("# Metadata"));
        assert!(!csv_str.contains("agent_name"));
        assert_eq!(csv_str.lines().count(), 3);
    }

    #[test]
    fn test_sentiment_filter_and_sort() {
        let exporter = CsvExporter::new().with_delimiter(';');
        let config = ExportConfig {
            include_metadata: false,
            sentiment: Some(Sentiment::Positive),
            sort_order: SortOrder::ReverseChronological,
            ..Default::default()
        };

        let csv_str = String::from_utf8(exporter.export(&create_test_report(), &config).unwrap()).unwrap();
        for row in csv_str.lines().skip(1) {
            let columns: Vec<&str> = row.split(';').collect();
            assert_eq!(columns[7], "Positive");
        }
    }

    #[test]
    fn test_metadata_counts_filtered_rows() {
        let config = ExportConfig {
            sentiment: Some(Sentiment::Negative),
            max_records: Some(3),
            ..Default::default()
        };
        let report = create_test_report();
        let expected = report
            .interactions
            .iter()
            .filter(|i| i.sentiment == Sentiment::Negative)
            .count()
            .min(3);

        let csv_str = String::from_utf8(CsvExporter::new().export(&report, &config).unwrap()).unwrap();
        assert!(csv_str.contains(&format!("# Total Interactions,{}\n", expected)));
        assert!(!csv_str.contains("# Total Interactions,50"));
        assert!(csv_str.contains("# Filter,sentiment: Negative"));
    }

    #[test]
    fn test_escape_csv_field() {
        let exporter = CsvExporter::new();
        assert_eq!(exporter.escape_csv_field("plain"), "plain");
        assert_eq!(exporter.escape_csv_field("a,b"), "\"a,b\"");
        assert_eq!(exporter.escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
