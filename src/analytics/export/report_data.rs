use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{ExportConfig, SortOrder};
use crate::analytics::{find_coaching_candidates, CoachingCandidate, CoachingThresholds, DashboardSummary};
use crate::data::{Channel, Dataset, ResolutionStatus, Sentiment, Team, Topic};

/// エクスポート用の対応記録（オペレーター情報を結合済み）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportableInteraction {
    pub id: u32,
    pub timestamp: DateTime<Utc>,
    pub agent_id: u32,
    pub agent_name: String,
    pub team: Team,
    pub channel: Channel,
    pub duration_secs: Option<u32>,
    pub sentiment: Sentiment,
    pub resolution: ResolutionStatus,
    pub topic: Topic,
}

/// レポートメタデータ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub export_time: DateTime<Utc>,
    pub export_version: String,
    pub callcoach_version: String,
    pub agent_count: usize,
    /// 出力する対応記録の件数（フィルター適用後）
    pub interaction_count: usize,
    pub filters_applied: Vec<String>,
}

/// エクスポート用レポートデータ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    pub metadata: ReportMetadata,
    pub summary: DashboardSummary,
    pub coaching_candidates: Vec<CoachingCandidate>,
    pub interactions: Vec<ExportableInteraction>,
}

impl ReportData {
    /// データセットからレポートを作成
    pub fn from_dataset(dataset: &Dataset, thresholds: &CoachingThresholds, top_n: usize) -> Self {
        let now = Utc::now();
        let interactions = dataset
            .interactions()
            .iter()
            .filter_map(|interaction| {
                dataset.agent(interaction.agent_id).map(|agent| ExportableInteraction {
                    id: interaction.id,
                    timestamp: interaction.timestamp,
                    agent_id: agent.id,
                    agent_name: agent.name.clone(),
                    team: agent.team,
                    channel: interaction.channel,
                    duration_secs: interaction.duration_secs,
                    sentiment: interaction.sentiment,
                    resolution: interaction.resolution,
                    topic: interaction.topic,
                })
            })
            .collect::<Vec<_>>();

        Self {
            metadata: ReportMetadata {
                generated_at: now,
                export_time: now,
                export_version: "1.0.0".to_string(),
                callcoach_version: env!("CARGO_PKG_VERSION").to_string(),
                agent_count: dataset.agents().len(),
                interaction_count: interactions.len(),
                filters_applied: Vec::new(),
            },
            summary: DashboardSummary::compute(dataset.agents(), dataset.interactions(), top_n),
            coaching_candidates: find_coaching_candidates(dataset.agents(), dataset.interactions(), thresholds),
            interactions,
        }
    }

    /// フィルタリング適用
    pub(crate) fn apply_filters(&mut self, config: &ExportConfig) {
        if let Some((start, end)) = config.date_range {
            self.interactions
                .retain(|i| i.timestamp >= start && i.timestamp <= end);
        }

        if let Some(sentiment) = config.sentiment {
            self.interactions.retain(|i| i.sentiment == sentiment);
        }

        if let Some(max_records) = config.max_records {
            self.interactions.truncate(max_records);
        }
    }

    /// データをソート
    pub(crate) fn sort_interactions(&mut self, sort_order: SortOrder) {
        match sort_order {
            SortOrder::Chronological => {
                self.interactions.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
            }
            SortOrder::ReverseChronological => {
                self.interactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            }
            SortOrder::ByAgent => {
                self.interactions
                    .sort_by(|a, b| a.agent_name.cmp(&b.agent_name).then(a.id.cmp(&b.id)));
            }
            SortOrder::ByDuration => {
                // 対応時間の長い順、記録なしは末尾
                self.interactions
                    .sort_by(|a, b| b.duration_secs.cmp(&a.duration_secs));
            }
        }
    }

    /// フィルター情報と出力件数を記録
    pub(crate) fn record_filters(&mut self, config: &ExportConfig) {
        self.metadata.export_time = Utc::now();
        self.metadata.interaction_count = self.interactions.len();
        self.metadata.filters_applied = vec![format!("sort_order: {:?}", config.sort_order)];

        if let Some((start, end)) = config.date_range {
            self.metadata.filters_applied.push(format!(
                "date_range: {} to {}",
                start.format("%Y-%m-%d %H:%M:%S"),
                end.format("%Y-%m-%d %H:%M:%S")
            ));
        }
        if let Some(sentiment) = config.sentiment {
            self.metadata
                .filters_applied
                .push(format!("sentiment: {}", sentiment));
        }
        if let Some(max_records) = config.max_records {
            self.metadata
                .filters_applied
                .push(format!("max_records: {}", max_records));
        }
    }

    /// データの整合性を検証
    pub fn validate(&self) -> Result<(), String> {
        let mut ids = HashSet::new();
        for interaction in &self.interactions {
            if !ids.insert(interaction.id) {
                return Err(format!("Duplicate interaction ID: {}", interaction.id));
            }
        }
        Ok(())
    }
}
