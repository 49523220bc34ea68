use serde::{Deserialize, Serialize};

use super::{CountDistribution, Ratio};
use crate::data::{Agent, Dataset, Interaction, ResolutionStatus, Sentiment};
use crate::error::{CoachError, CoachResult};

/// 直近の対応として表示する件数の既定値
pub const DEFAULT_RECENT_INTERACTIONS: usize = 10;

/// オペレーター個別の成績
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPerformance {
    pub agent: Agent,
    pub interaction_count: usize,
    pub resolution_rate: Ratio,
    pub negative_rate: Ratio,
    pub sentiment_distribution: CountDistribution<Sentiment>,
    pub resolution_distribution: CountDistribution<ResolutionStatus>,
    /// 新しい順
    pub recent_interactions: Vec<Interaction>,
}

impl AgentPerformance {
    /// `interactions`のうち`agent`の担当分だけを集計する
    pub fn compute(agent: &Agent, interactions: &[Interaction], recent_limit: usize) -> Self {
        let own: Vec<&Interaction> = interactions.iter().filter(|i| i.agent_id == agent.id).collect();

        let mut recent: Vec<Interaction> = own.iter().map(|i| (*i).clone()).collect();
        recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        recent.truncate(recent_limit);

        Self {
            agent: agent.clone(),
            interaction_count: own.len(),
            resolution_rate: Ratio::of(own.iter(), |i| i.is_resolved()),
            negative_rate: Ratio::of(own.iter(), |i| i.is_negative()),
            sentiment_distribution: own.iter().map(|i| i.sentiment).collect(),
            resolution_distribution: own.iter().map(|i| i.resolution).collect(),
            recent_interactions: recent,
        }
    }

    pub fn has_interactions(&self) -> bool {
        self.interaction_count > 0
    }
}

/// 名前を指定してオペレーターの成績を取得
pub fn agent_performance_by_name(
    dataset: &Dataset,
    name: &str,
    recent_limit: usize,
) -> CoachResult<AgentPerformance> {
    let agent = dataset
        .agent_by_name(name)
        .ok_or_else(|| CoachError::AgentNotFound {
            name: name.trim().to_string(),
        })?;
    Ok(AgentPerformance::compute(agent, dataset.interactions(), recent_limit))
}

/// 全オペレーターの成績（名簿順）
pub fn all_agent_performance(agents: &[Agent], interactions: &[Interaction], recent_limit: usize) -> Vec<AgentPerformance> {
    agents
        .iter()
        .map(|agent| AgentPerformance::compute(agent, interactions, recent_limit))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{default_roster, Channel, Topic};
    use chrono::{Duration, Utc};

    fn interaction(id: u32, agent_id: u32, days_ago: i64, sentiment: Sentiment, resolution: ResolutionStatus) -> Interaction {
        Interaction {
            id,
            agent_id,
            channel: Channel::Email,
            timestamp: Utc::now() - Duration::days(days_ago),
            duration_secs: None,
            sentiment,
            resolution,
            topic: Topic::Billing,
        }
    }

    #[test]
    fn test_agent_rates_and_distributions() {
        let roster = default_roster();
        let interactions = vec![
            interaction(1000, 2, 3, Sentiment::Negative, ResolutionStatus::Escalated),
            interaction(1001, 2, 1, Sentiment::Positive, ResolutionStatus::Resolved),
            interaction(1002, 1, 0, Sentiment::Positive, ResolutionStatus::Resolved),
            interaction(1003, 2, 7, Sentiment::Positive, ResolutionStatus::Resolved),
        ];

        let performance = AgentPerformance::compute(&roster[1], &interactions, DEFAULT_RECENT_INTERACTIONS);

        assert_eq!(performance.interaction_count, 3);
        assert_eq!(performance.resolution_rate, Ratio::new(2, 3));
        assert_eq!(performance.negative_rate, Ratio::new(1, 3));
        assert_eq!(performance.sentiment_distribution.get(Sentiment::Positive), 2);
        assert_eq!(performance.resolution_distribution.get(ResolutionStatus::Escalated), 1);

        let recent_ids: Vec<u32> = performance.recent_interactions.iter().map(|i| i.id).collect();
        assert_eq!(recent_ids, vec![1001, 1000, 1003]);
    }

    #[test]
    fn test_recent_limit() {
        let roster = default_roster();
        let interactions: Vec<Interaction> = (0..15)
            .map(|n| interaction(1000 + n, 3, n as i64, Sentiment::Neutral, ResolutionStatus::Pending))
            .collect();

        let performance = AgentPerformance::compute(&roster[2], &interactions, DEFAULT_RECENT_INTERACTIONS);
        assert_eq!(performance.interaction_count, 15);
        assert_eq!(performance.recent_interactions.len(), 10);
        assert_eq!(performance.recent_interactions[0].id, 1000);
    }

    #[test]
    fn test_agent_without_interactions_is_not_applicable() {
        let roster = default_roster();
        let performance = AgentPerformance::compute(&roster[4], &[], DEFAULT_RECENT_INTERACTIONS);

        assert!(!performance.has_interactions());
        assert_eq!(performance.resolution_rate.value(), None);
        assert_eq!(performance.negative_rate.to_string(), "N/A");
        assert!(performance.sentiment_distribution.is_empty());
    }

    #[test]
    fn test_lookup_by_name() {
        let dataset = Dataset::from_parts(
            default_roster(),
            vec![interaction(1000, 4, 0, Sentiment::Neutral, ResolutionStatus::Resolved)],
        )
        .unwrap();

        let performance = agent_performance_by_name(&dataset, "david smith", 5).unwrap();
        assert_eq!(performance.agent.id, 4);
        assert_eq!(performance.interaction_count, 1);
        assert!(matches!(
            agent_performance_by_name(&dataset, " Unknown ", 5),
            Err(CoachError::AgentNotFound { name }) if name == "Unknown"
        ));
        assert_eq!(all_agent_performance(dataset.agents(), dataset.interactions(), 5).len(), 5);
    }
}
