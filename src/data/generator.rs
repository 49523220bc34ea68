//! サンプルデータ生成

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::models::*;
use super::Dataset;

/// 1回の生成で作成する対応記録の件数
pub const INTERACTION_COUNT: usize = 50;
/// 対応記録IDの開始値
pub const FIRST_INTERACTION_ID: u32 = 1000;
/// タイムスタンプの遡り範囲（日）
pub const LOOKBACK_DAYS: i64 = 30;
/// 対応時間が記録されている確率
pub const DURATION_PRESENT_PROBABILITY: f64 = 0.7;
/// 対応時間の範囲（秒、上限は含まない）
pub const DURATION_RANGE_SECS: std::ops::Range<u32> = 60..600;

const SENTIMENT_WEIGHTS: [(Sentiment, f64); 3] = [
    (Sentiment::Positive, 0.6),
    (Sentiment::Neutral, 0.25),
    (Sentiment::Negative, 0.15),
];

const RESOLUTION_WEIGHTS: [(ResolutionStatus, f64); 3] = [
    (ResolutionStatus::Resolved, 0.7),
    (ResolutionStatus::Escalated, 0.1),
    (ResolutionStatus::Pending, 0.2),
];

/// デモ用データジェネレーター
pub struct SampleDataGenerator<R: Rng = StdRng> {
    rng: R,
}

impl SampleDataGenerator<StdRng> {
    /// OSの乱数源で初期化
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// シードを固定して初期化（再現可能な生成用）
    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SampleDataGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// 現在時刻を基準にデータセットを生成
    pub fn generate(&mut self) -> Dataset {
        self.generate_at(Utc::now())
    }

    /// 指定時刻を基準にデータセットを生成
    pub fn generate_at(&mut self, now: DateTime<Utc>) -> Dataset {
        let agents = default_roster();
        let interactions = (0..INTERACTION_COUNT as u32)
            .map(|offset| {
                let agent_id = agents[self.rng.gen_range(0..agents.len())].id;
                self.interaction(FIRST_INTERACTION_ID + offset, agent_id, now)
            })
            .collect::<Vec<_>>();

        debug!(
            agents = agents.len(),
            interactions = interactions.len(),
            "🎲 Sample data generated"
        );

        Dataset {
            agents,
            interactions,
        }
    }

    fn interaction(&mut self, id: u32, agent_id: u32, now: DateTime<Utc>) -> Interaction {
        let channel = Channel::ALL[self.rng.gen_range(0..Channel::ALL.len())];
        let days_ago = self.rng.gen_range(0..LOOKBACK_DAYS);
        let duration_secs = if self.rng.gen_bool(DURATION_PRESENT_PROBABILITY) {
            Some(self.rng.gen_range(DURATION_RANGE_SECS))
        } else {
            None
        };
        let sentiment = pick_weighted(&mut self.rng, &SENTIMENT_WEIGHTS);
        let resolution = pick_weighted(&mut self.rng, &RESOLUTION_WEIGHTS);
        let topic = Topic::ALL[self.rng.gen_range(0..Topic::ALL.len())];

        Interaction {
            id,
            agent_id,
            channel,
            timestamp: now - Duration::days(days_ago),
            duration_secs,
            sentiment,
            resolution,
            topic,
        }
    }
}

/// 重み付きで1つ選ぶ（重みが不正な場合は先頭を返す）
fn pick_weighted<T: Copy, R: Rng + ?Sized>(rng: &mut R, choices: &[(T, f64)]) -> T {
    choices
        .choose_weighted(rng, |(_, weight)| *weight)
        .map(|(value, _)| *value)
        .unwrap_or(choices[0].0)
}
