//! 分析後の「次のアクション」
//!
//! いずれも確認メッセージを返してログに残すだけで、どこにも保存しない。

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum NextStep {
    #[display("Save Feedback")]
    SaveFeedback,
    #[display("Schedule Coaching Session")]
    ScheduleCoachingSession,
    #[display("Create Action Plan")]
    CreateActionPlan,
}

impl NextStep {
    pub const ALL: [NextStep; 3] = [
        NextStep::SaveFeedback,
        NextStep::ScheduleCoachingSession,
        NextStep::CreateActionPlan,
    ];

    /// アクションを受け付けて確認メッセージを返す
    pub fn acknowledge(&self, agent_name: &str) -> String {
        info!(action = %self, agent = agent_name, "📝 [ACTION] acknowledged (not persisted)");
        self.confirmation().to_string()
    }

    pub fn confirmation(&self) -> &'static str {
        match self {
            NextStep::SaveFeedback => "Feedback saved to agent profile!",
            NextStep::ScheduleCoachingSession => "Coaching session scheduled!",
            NextStep::CreateActionPlan => "Action plan created!",
        }
    }
}
