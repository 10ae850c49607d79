pub mod context;
pub mod load;
pub mod rank;
pub mod stats;

pub use context::generate_context;
pub use load::{load_dataset, load_records};
pub use rank::find_similar;
pub use stats::compute_statistics;
