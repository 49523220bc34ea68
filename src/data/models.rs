use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// 所属チーム
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
pub enum Team {
    #[display("Customer Support")]
    CustomerSupport,
    #[display("Technical Support")]
    TechnicalSupport,
    #[display("Sales")]
    Sales,
}

/// 対応チャネル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
pub enum Channel {
    Call,
    Chat,
    Email,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Call, Channel::Chat, Channel::Email];
}

/// 顧客感情
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];
}

/// 解決状況
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
pub enum ResolutionStatus {
    Resolved,
    Escalated,
    Pending,
}

impl ResolutionStatus {
    pub const ALL: [ResolutionStatus; 3] = [
        ResolutionStatus::Resolved,
        ResolutionStatus::Escalated,
        ResolutionStatus::Pending,
    ];
}

/// 問い合わせトピック
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
pub enum Topic {
    #[display("Billing")]
    Billing,
    #[display("Technical Issue")]
    TechnicalIssue,
    #[display("Product Info")]
    ProductInfo,
    #[display("Account Management")]
    AccountManagement,
    #[display("Complaint")]
    Complaint,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Billing,
        Topic::TechnicalIssue,
        Topic::ProductInfo,
        Topic::AccountManagement,
        Topic::Complaint,
    ];
}

/// 平均評価の下限
pub const MIN_RATING: f64 = 0.0;
/// 平均評価の上限
pub const MAX_RATING: f64 = 5.0;

/// オペレーター
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: u32,
    pub name: String,
    pub team: Team,
    /// 在籍月数
    pub tenure_months: u32,
    /// 平均評価 (0.0〜5.0)
    pub avg_rating: f64,
}

impl Agent {
    pub fn new(id: u32, name: impl Into<String>, team: Team, tenure_months: u32, avg_rating: f64) -> Self {
        Self {
            id,
            name: name.into(),
            team,
            tenure_months,
            avg_rating,
        }
    }
}

/// 顧客対応1件分の記録
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: u32,
    pub agent_id: u32,
    pub channel: Channel,
    pub timestamp: DateTime<Utc>,
    /// 対応時間（秒）。記録がない対応はNone
    pub duration_secs: Option<u32>,
    pub sentiment: Sentiment,
    pub resolution: ResolutionStatus,
    pub topic: Topic,
}

impl Interaction {
    pub fn is_resolved(&self) -> bool {
        self.resolution == ResolutionStatus::Resolved
    }

    pub fn is_negative(&self) -> bool {
        self.sentiment == Sentiment::Negative
    }
}

/// デモ用の固定オペレーター名簿
pub fn default_roster() -> Vec<Agent> {
    vec![
        Agent::new(1, "Sarah Johnson", Team::CustomerSupport, 18, 4.2),
        Agent::new(2, "Michael Chen", Team::TechnicalSupport, 6, 3.8),
        Agent::new(3, "Jessica Williams", Team::Sales, 12, 4.5),
        Agent::new(4, "David Smith", Team::CustomerSupport, 24, 4.1),
        Agent::new(5, "Emily Rodriguez", Team::TechnicalSupport, 3, 3.5),
    ]
}
