pub mod actions;
pub mod classifier;
pub mod coaching_plan;
pub mod feedback;
pub mod samples;

pub use actions::*;
pub use classifier::*;
pub use coaching_plan::*;
pub use feedback::*;
pub use samples::*;
