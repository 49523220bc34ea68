//! デモ用データセット
//!
//! オペレーター名簿と対応記録をひとまとまりで扱い、プロセス内で一度だけ生成して使い回す。

pub mod generator;
pub mod models;

pub use generator::*;
pub use models::*;

use serde::Serialize;
use std::collections::HashSet;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::info;

/// データセットの整合性エラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    #[error("Interaction {interaction_id} references unknown agent {agent_id}")]
    UnknownAgent { interaction_id: u32, agent_id: u32 },

    #[error("Duplicate agent id: {0}")]
    DuplicateAgentId(u32),

    #[error("Duplicate interaction id: {0}")]
    DuplicateInteractionId(u32),

    #[error("Agent {agent_id} has rating {rating} outside 0.0..=5.0")]
    RatingOutOfRange { agent_id: u32, rating: f64 },
}

/// オペレーターと対応記録のセット
///
/// すべての対応記録は同じセット内のオペレーターを参照する。生成後は変更しない。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    agents: Vec<Agent>,
    interactions: Vec<Interaction>,
}

impl Dataset {
    /// 参照整合性を検証してデータセットを作成
    pub fn from_parts(agents: Vec<Agent>, interactions: Vec<Interaction>) -> Result<Self, DatasetError> {
        let mut agent_ids = HashSet::new();
        for agent in &agents {
            if !agent_ids.insert(agent.id) {
                return Err(DatasetError::DuplicateAgentId(agent.id));
            }
            // NaNもここで弾かれる
            if !(MIN_RATING..=MAX_RATING).contains(&agent.avg_rating) {
                return Err(DatasetError::RatingOutOfRange {
                    agent_id: agent.id,
                    rating: agent.avg_rating,
                });
            }
        }

        let mut interaction_ids = HashSet::new();
        for interaction in &interactions {
            if !interaction_ids.insert(interaction.id) {
                return Err(DatasetError::DuplicateInteractionId(interaction.id));
            }
            if !agent_ids.contains(&interaction.agent_id) {
                return Err(DatasetError::UnknownAgent {
                    interaction_id: interaction.id,
                    agent_id: interaction.agent_id,
                });
            }
        }

        Ok(Self {
            agents,
            interactions,
        })
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    pub fn agent(&self, id: u32) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// 名前でオペレーターを検索（大文字小文字は区別しない）
    pub fn agent_by_name(&self, name: &str) -> Option<&Agent> {
        let needle = name.trim().to_lowercase();
        self.agents.iter().find(|a| a.name.to_lowercase() == needle)
    }

    pub fn agent_name(&self, id: u32) -> Option<&str> {
        self.agent(id).map(|a| a.name.as_str())
    }

    /// 指定オペレーターの対応記録
    pub fn interactions_for(&self, agent_id: u32) -> impl Iterator<Item = &Interaction> {
        self.interactions.iter().filter(move |i| i.agent_id == agent_id)
    }
}

static SAMPLE_DATASET: OnceLock<Dataset> = OnceLock::new();

/// キャッシュ済みのサンプルデータセットを取得（初回アクセス時に生成）
pub fn sample_dataset() -> &'static Dataset {
    sample_dataset_or_init(|| SampleDataGenerator::from_entropy().generate())
}

/// キャッシュが空なら`init`で初期化し、キャッシュ済みデータセットを返す
///
/// 既に初期化済みの場合`init`は呼ばれない。
pub fn sample_dataset_or_init(init: impl FnOnce() -> Dataset) -> &'static Dataset {
    SAMPLE_DATASET.get_or_init(|| {
        let dataset = init();
        info!(
            agents = dataset.agents().len(),
            interactions = dataset.interactions().len(),
            "📦 Sample dataset cached"
        );
        dataset
    })
}
