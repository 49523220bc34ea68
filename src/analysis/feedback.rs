use serde::{Deserialize, Serialize};

use crate::data::Sentiment;

/// 感情カテゴリごとの定型フィードバック
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackTemplate {
    pub strengths: &'static [&'static str],
    pub issues: &'static [&'static str],
    pub coaching_focus: &'static str,
    pub example_phrase: &'static str,
}

pub const NEGATIVE_TEMPLATE: FeedbackTemplate = FeedbackTemplate {
    strengths: &[
        "Professional tone maintained",
        "Accurate information provided",
        "Good product knowledge",
    ],
    issues: &[
        "Customer frustration not adequately addressed",
        "Empathy statements missing",
        "Opportunity to de-escalate was missed",
    ],
    coaching_focus: "Practice empathy statements and de-escalation techniques",
    example_phrase: "I understand why that would be frustrating. Let me see what I can do to help resolve this for you.",
};

pub const POSITIVE_TEMPLATE: FeedbackTemplate = FeedbackTemplate {
    strengths: &[
        "Excellent customer service",
        "Strong problem resolution",
        "Positive customer feedback received",
    ],
    issues: &[
        "Opportunity to upsell missed",
        "Could have asked for feedback or review",
    ],
    coaching_focus: "Upselling techniques and feedback collection",
    example_phrase: "I'm so glad I could help! Would you be interested in our premium plan that prevents this issue in the future?",
};

pub const NEUTRAL_TEMPLATE: FeedbackTemplate = FeedbackTemplate {
    strengths: &[
        "Efficient handling of inquiry",
        "All procedures followed correctly",
        "Good documentation of the issue",
    ],
    issues: &[
        "Conversation could have been more engaging",
        "Missing opportunity to build rapport",
        "Proactive support could be improved",
    ],
    coaching_focus: "Building customer rapport and proactive engagement",
    example_phrase: "Is there anything else I can help you with today? I'm here to assist!",
};

/// 対応記録の分析結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub agent_name: String,
    pub interaction_type: String,
    pub sentiment: Sentiment,
    pub strengths: Vec<String>,
    pub issues: Vec<String>,
    pub coaching_focus: String,
    pub example_phrase: String,
}

impl FeedbackReport {
    pub fn from_template(
        template: &FeedbackTemplate,
        sentiment: Sentiment,
        interaction_type: &str,
        agent_name: &str,
    ) -> Self {
        Self {
            agent_name: agent_name.to_string(),
            interaction_type: interaction_type.to_string(),
            sentiment,
            strengths: template.strengths.iter().map(|s| s.to_string()).collect(),
            issues: template.issues.iter().map(|s| s.to_string()).collect(),
            coaching_focus: template.coaching_focus.to_string(),
            example_phrase: template.example_phrase.to_string(),
        }
    }

    /// Markdown形式のフィードバック本文を生成
    pub fn to_markdown(&self) -> String {
        let strengths: String = self.strengths.iter().map(|s| format!("✅ {}\n", s)).collect();
        let issues: String = self.issues.iter().map(|i| format!("⚠️ {}\n", i)).collect();

        format!(
            "\n\
             **Agent:** {}\n\
             **Interaction Type:** {}\n\
             **Overall Sentiment:** {}\n\
             \n\
             ## 🎯 Strengths:\n\
             {}\n\
             ## 📋 Areas for Improvement:\n\
             {}\n\
             ## 🎓 Recommended Coaching Focus:\n\
             {}\n\
             \n\
             ## 💡 Example Phrasing:\n\
             \"{}\"\n",
            self.agent_name,
            self.interaction_type,
            self.sentiment,
            strengths,
            issues,
            self.coaching_focus,
            self.example_phrase,
        )
    }
}
