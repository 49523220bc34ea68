use serde::{Deserialize, Serialize};

/// 重点項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusArea {
    pub title: String,
    pub description: String,
}

/// オペレーター向けコーチングプラン（定型）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachingPlan {
    pub agent_name: String,
    pub focus_areas: Vec<FocusArea>,
    pub activities: Vec<String>,
    pub success_metrics: Vec<String>,
    pub next_steps: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl CoachingPlan {
    pub fn for_agent(agent_name: &str) -> Self {
        let focus_areas = [
            ("Customer Empathy", "Practice acknowledging customer feelings before problem-solving"),
            ("First Contact Resolution", "Work on resolving issues during the first interaction"),
            ("Proactive Communication", "Improve keeping customers informed throughout the interaction"),
        ]
        .iter()
        .map(|(title, description)| FocusArea {
            title: title.to_string(),
            description: description.to_string(),
        })
        .collect();

        Self {
            agent_name: agent_name.to_string(),
            focus_areas,
            activities: strings(&[
                "Role-playing exercises with difficult customer scenarios",
                "Review of 3 positive interaction examples from top performers",
                "Side-by-side coaching on next 3 customer interactions",
                "Training module on effective troubleshooting techniques",
            ]),
            success_metrics: strings(&[
                "Reduce negative sentiment by 25% within 30 days",
                "Improve resolution rate to 75% within 30 days",
                "Achieve customer satisfaction score of 4.0 or higher",
            ]),
            next_steps: strings(&[
                "Schedule weekly coaching sessions for the next month",
                "Review progress after 2 weeks",
                "Adjust plan based on results",
            ]),
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut out = format!("# Coaching Plan for {}\n\n## Focus Areas\n", self.agent_name);
        for (index, area) in self.focus_areas.iter().enumerate() {
            out.push_str(&format!("{}. **{}** - {}\n", index + 1, area.title, area.description));
        }

        for (heading, items) in [
            ("Recommended Activities", &self.activities),
            ("Success Metrics", &self.success_metrics),
            ("Next Steps", &self.next_steps),
        ] {
            out.push_str(&format!("\n## {}\n", heading));
            for item in items {
                out.push_str(&format!("- {}\n", item));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_markdown() {
        let plan = CoachingPlan::for_agent("Emily Rodriguez");
        let markdown = plan.to_markdown();

        assert!(markdown.starts_with("# Coaching Plan for Emily Rodriguez"));
        assert!(markdown.contains("1. **Customer Empathy**"));
        assert!(markdown.contains("3. **Proactive Communication**"));
        assert!(markdown.contains("## Success Metrics\n- Reduce negative sentiment by 25% within 30 days"));
        assert!(markdown.ends_with("- Adjust plan based on results\n"));
    }
}
