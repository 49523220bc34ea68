pub mod analysis;
pub mod analytics;
pub mod config_manager;
pub mod data;
pub mod error;
pub mod io;
pub mod utils;

// Re-export the main error types for convenience
pub use error::{CoachError, CoachResult};

// Re-export the dataset API
pub use data::{sample_dataset, Agent, Dataset, Interaction, SampleDataGenerator};

// Re-export the analysis API
pub use analysis::{simulate_analysis, FeedbackReport, TranscriptAnalyzer};

// Re-export analytics modules
pub use analytics::{
    find_coaching_candidates, AgentPerformance, CoachingCandidate, CoachingPriority, CoachingThresholds,
    DashboardSummary, Ratio,
};
