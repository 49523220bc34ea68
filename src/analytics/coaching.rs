//! コーチング対象者の抽出

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::Ratio;
use crate::data::{Agent, Interaction};

/// コーチング優先度（High が先に並ぶ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
pub enum CoachingPriority {
    High,
    Medium,
}

/// 判定しきい値
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachingThresholds {
    /// これを超えるネガティブ率で対象
    pub negative_rate: f64,
    /// これを下回る解決率で対象
    pub resolution_rate: f64,
    /// これを超えるネガティブ率で優先度High
    pub high_priority_negative_rate: f64,
}

impl Default for CoachingThresholds {
    fn default() -> Self {
        Self {
            negative_rate: 0.20,
            resolution_rate: 0.60,
            high_priority_negative_rate: 0.30,
        }
    }
}

impl CoachingThresholds {
    /// 対象ならその優先度を返す
    pub fn assess(&self, negative_rate: f64, resolution_rate: f64) -> Option<CoachingPriority> {
        if negative_rate > self.negative_rate || resolution_rate < self.resolution_rate {
            if negative_rate > self.high_priority_negative_rate {
                Some(CoachingPriority::High)
            } else {
                Some(CoachingPriority::Medium)
            }
        } else {
            None
        }
    }
}

/// コーチング対象者
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachingCandidate {
    pub agent_id: u32,
    pub agent_name: String,
    pub interaction_count: usize,
    pub negative_rate: Ratio,
    pub resolution_rate: Ratio,
    pub priority: CoachingPriority,
}

/// コーチング対象者を抽出（優先度順、同順位は名簿順）
///
/// 対応記録のないオペレーターは率を計算できないため対象外。
pub fn find_coaching_candidates(
    agents: &[Agent],
    interactions: &[Interaction],
    thresholds: &CoachingThresholds,
) -> Vec<CoachingCandidate> {
    let mut candidates: Vec<CoachingCandidate> = agents
        .iter()
        .filter_map(|agent| {
            let own: Vec<&Interaction> = interactions.iter().filter(|i| i.agent_id == agent.id).collect();
            let negative_rate = Ratio::of(own.iter(), |i| i.is_negative());
            let resolution_rate = Ratio::of(own.iter(), |i| i.is_resolved());

            let (Some(negative), Some(resolution)) = (negative_rate.value(), resolution_rate.value()) else {
                debug!(agent = %agent.name, "Skipping agent without interactions");
                return None;
            };

            thresholds
                .assess(negative, resolution)
                .map(|priority| CoachingCandidate {
                    agent_id: agent.id,
                    agent_name: agent.name.clone(),
                    interaction_count: own.len(),
                    negative_rate,
                    resolution_rate,
                    priority,
                })
        })
        .collect();

    candidates.sort_by_key(|c| c.priority);

    info!(candidates = candidates.len(), "🎓 Coaching candidates identified");
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{default_roster, Channel, ResolutionStatus, Sentiment, Topic};
    use chrono::Utc;

    #[test]
    fn test_assess_thresholds() {
        let thresholds = CoachingThresholds::default();
        assert_eq!(thresholds.assess(0.35, 0.9), Some(CoachingPriority::High));
        assert_eq!(thresholds.assess(0.25, 0.9), Some(CoachingPriority::Medium));
        assert_eq!(thresholds.assess(0.10, 0.80), None);
        assert_eq!(thresholds.assess(0.10, 0.50), Some(CoachingPriority::Medium));
        // 境界値はちょうど超えない限り対象外
        assert_eq!(thresholds.assess(0.20, 0.60), None);
    }

    fn interactions_for(agent_id: u32, first_id: u32, pattern: &[(Sentiment, ResolutionStatus)]) -> Vec<Interaction> {
        pattern
            .iter()
            .enumerate()
            .map(|(n, (sentiment, resolution))| Interaction {
                id: first_id + n as u32,
                agent_id,
                channel: Channel::Call,
                timestamp: Utc::now(),
                duration_secs: Some(300),
                sentiment: *sentiment,
                resolution: *resolution,
                topic: Topic::Complaint,
            })
            .collect()
    }

    #[test]
    fn test_find_candidates() {
        use ResolutionStatus::*;
        use Sentiment::*;

        let agents = default_roster();
        let mut interactions = Vec::new();
        // Sarah: 2/5 ネガティブ (0.4) → High
        interactions.extend(interactions_for(
            1,
            1000,
            &[
                (Negative, Resolved),
                (Negative, Resolved),
                (Positive, Resolved),
                (Positive, Resolved),
                (Positive, Resolved),
            ],
        ));
        // Michael: ネガティブ0、解決率 1/4 → Medium
        interactions.extend(interactions_for(
            2,
            1100,
            &[
                (Positive, Resolved),
                (Neutral, Pending),
                (Neutral, Escalated),
                (Positive, Pending),
            ],
        ));
        // Jessica: 問題なし
        interactions.extend(interactions_for(3, 1200, &[(Positive, Resolved), (Neutral, Resolved)]));
        // David, Emily: 対応記録なし

        let candidates = find_coaching_candidates(&agents, &interactions, &CoachingThresholds::default());

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].agent_name, "Sarah Johnson");
        assert_eq!(candidates[0].priority, CoachingPriority::High);
        assert_eq!(candidates[0].negative_rate.to_string(), "40.0%");
        assert_eq!(candidates[1].agent_name, "Michael Chen");
        assert_eq!(candidates[1].priority, CoachingPriority::Medium);
        assert_eq!(candidates[1].resolution_rate, Ratio::new(1, 4));
    }

    #[test]
    fn test_priority_sorting_puts_high_first() {
        use ResolutionStatus::*;
        use Sentiment::*;

        let agents = default_roster();
        let mut interactions = interactions_for(1, 1000, &[(Positive, Pending)]);
        interactions.extend(interactions_for(5, 1100, &[(Negative, Resolved)]));

        let candidates = find_coaching_candidates(&agents, &interactions, &CoachingThresholds::default());
        let priorities: Vec<CoachingPriority> = candidates.iter().map(|c| c.priority).collect();
        assert_eq!(priorities, vec![CoachingPriority::High, CoachingPriority::Medium]);
        assert_eq!(candidates[0].agent_id, 5);
    }

    #[test]
    fn test_no_interactions_no_candidates() {
        let candidates = find_coaching_candidates(&default_roster(), &[], &CoachingThresholds::default());
        assert!(candidates.is_empty());
    }
}
