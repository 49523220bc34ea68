//! クレート全体のエラー型

use thiserror::Error;

use crate::analytics::export::ExportError;
use crate::data::DatasetError;
use crate::io::NdjsonError;

/// callcoachの統合エラー型
#[derive(Error, Debug)]
pub enum CoachError {
    #[error("データセットエラー: {0}")]
    Dataset(#[from] DatasetError),

    #[error("NDJSONエラー: {0}")]
    Ndjson(#[from] NdjsonError),

    #[error("エクスポートエラー: {0}")]
    Export(#[from] ExportError),

    #[error("Agent not found: {name}")]
    AgentNotFound { name: String },

    #[error(transparent)]
    General(#[from] anyhow::Error),
}

pub type CoachResult<T> = Result<T, CoachError>;
