pub mod feedback;
pub mod health;
pub mod plan;
pub mod stats;
