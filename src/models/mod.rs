pub mod submission;
pub mod summary;
pub mod team;

pub use submission::{FormData, Submission};
pub use summary::SummaryEntry;
pub use team::Team;
