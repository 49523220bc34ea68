//! チーム全体のダッシュボード集計

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use super::{CountDistribution, Ratio};
use crate::data::{Agent, Channel, Interaction, Sentiment, Team};

/// ダッシュボードで表示する上位オペレーター数の既定値
pub const DEFAULT_TOP_AGENTS: usize = 5;

/// ダッシュボード集計結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// オペレーター数
    pub total_agents: usize,
    /// 平均評価（オペレーターがいなければNone）
    pub average_rating: Option<f64>,
    /// 解決率
    pub resolution_rate: Ratio,
    /// ネガティブ感情率
    pub negative_rate: Ratio,
    /// 感情分布
    pub sentiment_distribution: CountDistribution<Sentiment>,
    /// チャネル別件数
    pub channel_distribution: CountDistribution<Channel>,
    /// チーム×感情のクロス集計
    pub team_sentiment: BTreeMap<Team, CountDistribution<Sentiment>>,
    /// 評価上位のオペレーター
    pub top_agents: Vec<Agent>,
}

impl DashboardSummary {
    pub fn compute(agents: &[Agent], interactions: &[Interaction], top_n: usize) -> Self {
        let summary = Self {
            total_agents: agents.len(),
            average_rating: average_rating(agents),
            resolution_rate: resolution_rate(interactions),
            negative_rate: negative_rate(interactions),
            sentiment_distribution: interactions.iter().map(|i| i.sentiment).collect(),
            channel_distribution: interactions.iter().map(|i| i.channel).collect(),
            team_sentiment: team_sentiment(agents, interactions),
            top_agents: top_agents_by_rating(agents, top_n),
        };

        debug!(
            agents = summary.total_agents,
            interactions = interactions.len(),
            resolution_rate = %summary.resolution_rate,
            negative_rate = %summary.negative_rate,
            "📊 Dashboard summary computed"
        );

        summary
    }
}

/// 平均評価
pub fn average_rating(agents: &[Agent]) -> Option<f64> {
    if agents.is_empty() {
        return None;
    }
    Some(agents.iter().map(|a| a.avg_rating).sum::<f64>() / agents.len() as f64)
}

/// 解決済みの割合
pub fn resolution_rate(interactions: &[Interaction]) -> Ratio {
    Ratio::of(interactions, |i| i.is_resolved())
}

/// ネガティブ感情の割合
pub fn negative_rate(interactions: &[Interaction]) -> Ratio {
    Ratio::of(interactions, |i| i.is_negative())
}

/// チームごとの感情クロス集計
///
/// 名簿にないオペレーターの対応は集計から除外する。
pub fn team_sentiment(
    agents: &[Agent],
    interactions: &[Interaction],
) -> BTreeMap<Team, CountDistribution<Sentiment>> {
    let teams: HashMap<u32, Team> = agents.iter().map(|a| (a.id, a.team)).collect();

    let mut table: BTreeMap<Team, CountDistribution<Sentiment>> = BTreeMap::new();
    for interaction in interactions {
        if let Some(team) = teams.get(&interaction.agent_id) {
            table.entry(*team).or_default().add(interaction.sentiment);
        }
    }
    table
}

/// 評価の高い順に上位n人
pub fn top_agents_by_rating(agents: &[Agent], n: usize) -> Vec<Agent> {
    let mut sorted = agents.to_vec();
    sorted.sort_by(|a, b| {
        b.avg_rating
            .partial_cmp(&a.avg_rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(n);
    sorted
}
