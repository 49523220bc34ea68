pub mod agent_performance;
pub mod coaching;
pub mod dashboard;
pub mod distribution;
pub mod export;
pub mod ratio;

pub use agent_performance::*;
pub use coaching::*;
pub use dashboard::*;
pub use distribution::*;
pub use export::*;
pub use ratio::*;
