//! キーワードベースの対応分析
//!
//! 書き起こしを小文字化し、優先順位付きのルールを先頭から評価して最初に一致したものを採用する。

use tracing::debug;

use super::feedback::{FeedbackReport, FeedbackTemplate, NEGATIVE_TEMPLATE, NEUTRAL_TEMPLATE, POSITIVE_TEMPLATE};
use crate::data::Sentiment;

/// ネガティブ判定キーワード（部分一致）
pub const NEGATIVE_KEYWORDS: &[&str] = &["frustrat", "angry", "upset", "disappoint", "unfair", "complaint"];

/// ポジティブ判定キーワード（部分一致）
pub const POSITIVE_KEYWORDS: &[&str] = &["thank", "appreciate", "helpful", "great", "perfect", "awesome"];

/// 感情判定ルール
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentRule {
    Negative(&'static FeedbackTemplate),
    Positive(&'static FeedbackTemplate),
    Default(&'static FeedbackTemplate),
}

impl SentimentRule {
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            SentimentRule::Negative(_) => NEGATIVE_KEYWORDS,
            SentimentRule::Positive(_) => POSITIVE_KEYWORDS,
            SentimentRule::Default(_) => &[],
        }
    }

    /// 小文字化済みの書き起こしに一致するか
    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            SentimentRule::Default(_) => true,
            _ => self.keywords().iter().any(|keyword| lowered.contains(keyword)),
        }
    }

    pub fn sentiment(&self) -> Sentiment {
        match self {
            SentimentRule::Negative(_) => Sentiment::Negative,
            SentimentRule::Positive(_) => Sentiment::Positive,
            SentimentRule::Default(_) => Sentiment::Neutral,
        }
    }

    pub fn template(&self) -> &'static FeedbackTemplate {
        match *self {
            SentimentRule::Negative(t) | SentimentRule::Positive(t) | SentimentRule::Default(t) => t,
        }
    }
}

/// 評価順のルール一覧
pub const DEFAULT_RULES: &[SentimentRule] = &[
    SentimentRule::Negative(&NEGATIVE_TEMPLATE),
    SentimentRule::Positive(&POSITIVE_TEMPLATE),
    SentimentRule::Default(&NEUTRAL_TEMPLATE),
];

const FALLBACK_RULE: SentimentRule = SentimentRule::Default(&NEUTRAL_TEMPLATE);

/// 書き起こしアナライザー（擬似AI分析）
#[derive(Debug, Clone, Copy)]
pub struct TranscriptAnalyzer {
    rules: &'static [SentimentRule],
}

impl TranscriptAnalyzer {
    pub fn new() -> Self {
        Self {
            rules: DEFAULT_RULES,
        }
    }

    /// 最初に一致したルールを返す
    pub fn classify(&self, transcript: &str) -> SentimentRule {
        let lowered = transcript.to_lowercase();
        self.rules
            .iter()
            .copied()
            .find(|rule| rule.matches(&lowered))
            .unwrap_or(FALLBACK_RULE)
    }

    /// 書き起こしを分析してフィードバックを生成
    ///
    /// `interaction_type`と`agent_name`は判定には使わず結果にそのまま転記する。
    pub fn analyze(&self, transcript: &str, interaction_type: &str, agent_name: &str) -> FeedbackReport {
        let rule = self.classify(transcript);
        debug!(
            agent = agent_name,
            interaction_type,
            transcript_length = transcript.len(),
            sentiment = %rule.sentiment(),
            "🔍 Transcript analyzed"
        );
        FeedbackReport::from_template(rule.template(), rule.sentiment(), interaction_type, agent_name)
    }
}

impl Default for TranscriptAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// デフォルトルールで書き起こしを分析
pub fn simulate_analysis(transcript: &str, interaction_type: &str, agent_name: &str) -> FeedbackReport {
    TranscriptAnalyzer::new().analyze(transcript, interaction_type, agent_name)
}
