use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

use crate::data::Sentiment;

pub mod csv_exporter;
pub mod json_exporter;
pub mod report_data;

pub use csv_exporter::CsvExporter;
pub use json_exporter::JsonExporter;
pub use report_data::{ExportableInteraction, ReportData, ReportMetadata};

/// エクスポート形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// エクスポートエラー
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unsupported format: {format:?}")]
    UnsupportedFormat { format: ExportFormat },

    #[error("Invalid data: {message}")]
    InvalidData { message: String },
}

/// エクスポート設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub format: ExportFormat,
    pub include_metadata: bool,
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    /// 指定した感情の対応記録のみ出力
    pub sentiment: Option<Sentiment>,
    pub max_records: Option<usize>,
    pub sort_order: SortOrder,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Json,
            include_metadata: true,
            date_range: None,
            sentiment: None,
            max_records: None,
            sort_order: SortOrder::Chronological,
        }
    }
}

/// ソート順序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Chronological,
    ReverseChronological,
    ByAgent,
    ByDuration,
}

/// フォーマットハンドラートレイト
pub trait FormatHandler: Send + Sync {
    fn export(&self, data: &ReportData, config: &ExportConfig) -> Result<Vec<u8>, ExportError>;
    fn file_extension(&self) -> &str;
}

/// エクスポートマネージャー
pub struct ExportManager {
    format_handlers: HashMap<ExportFormat, Box<dyn FormatHandler>>,
}

impl ExportManager {
    /// 新しいエクスポートマネージャーを作成
    pub fn new() -> Self {
        let mut manager = Self {
            format_handlers: HashMap::new(),
        };

        manager.register_handler(ExportFormat::Csv, Box::new(CsvExporter::new()));
        manager.register_handler(ExportFormat::Json, Box::new(JsonExporter::new()));

        manager
    }

    /// フォーマットハンドラーを登録
    pub fn register_handler(&mut self, format: ExportFormat, handler: Box<dyn FormatHandler>) {
        self.format_handlers.insert(format, handler);
    }

    /// データをエクスポート
    pub fn export(&self, data: &ReportData, config: &ExportConfig) -> Result<Vec<u8>, ExportError> {
        self.validate_config(config)?;

        let handler = self
            .format_handlers
            .get(&config.format)
            .ok_or(ExportError::UnsupportedFormat {
                format: config.format,
            })?;

        data.validate()
            .map_err(|message| ExportError::InvalidData { message })?;

        let bytes = handler.export(data, config)?;
        tracing::info!(
            format = ?config.format,
            bytes = bytes.len(),
            "📤 Report exported"
        );
        Ok(bytes)
    }

    /// 登録済みハンドラーの拡張子
    pub fn file_extension(&self, format: ExportFormat) -> Result<&str, ExportError> {
        self.format_handlers
            .get(&format)
            .map(|handler| handler.file_extension())
            .ok_or(ExportError::UnsupportedFormat { format })
    }

    /// 出力先に拡張子がなければ形式の拡張子を付ける
    pub fn output_path(&self, path: impl Into<PathBuf>, format: ExportFormat) -> Result<PathBuf, ExportError> {
        let mut path = path.into();
        if path.extension().is_none() {
            path.set_extension(self.file_extension(format)?);
        }
        Ok(path)
    }

    /// サポートされている形式を取得
    pub fn supported_formats(&self) -> Vec<ExportFormat> {
        self.format_handlers.keys().copied().collect()
    }

    /// 設定の妥当性を検証
    pub fn validate_config(&self, config: &ExportConfig) -> Result<(), ExportError> {
        if !self.format_handlers.contains_key(&config.format) {
            return Err(ExportError::UnsupportedFormat {
                format: config.format,
            });
        }

        if let Some(max_records) = config.max_records {
            if max_records == 0 {
                return Err(ExportError::InvalidData {
                    message: "max_records must be greater than 0".to_string(),
                });
            }
        }

        if let Some((start, end)) = config.date_range {
            if start >= end {
                return Err(ExportError::InvalidData {
                    message: "date range start must be before end".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Default for ExportManager {
    fn default() -> Self {
        Self::new()
    }
}
