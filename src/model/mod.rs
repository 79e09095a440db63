pub use self::project::{Project, ProjectId};
pub use self::votes::{VoteOutcome, Votes};

mod project;
mod votes;
