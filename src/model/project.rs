use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Eq, Ord, PartialEq, PartialOrd, Hash, Serialize)]
pub struct ProjectId(pub i64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub vote_count: i64,
}

impl Project {
    pub fn new(id: ProjectId, name: &str) -> Project {
        Project {
            id,
            name: name.to_owned(),
            vote_count: 0,
        }
    }

    /// Add a (possibly negative) number of votes, saturating at the `i64` bounds.
    pub fn add_votes(&mut self, votes: i64) {
        self.vote_count = self.vote_count.saturating_add(votes);
    }
}

#[test]
fn test_add_votes() {
    let mut p = Project::new(ProjectId(1), "Apollo");
    p.add_votes(3);
    p.add_votes(0);
    assert_eq!(p.vote_count, 3);
    p.add_votes(-5);
    assert_eq!(p.vote_count, -2);
    let mut p = Project {
        vote_count: i64::MAX - 1,
        ..p
    };
    p.add_votes(10);
    assert_eq!(p.vote_count, i64::MAX);
}

#[test]
fn test_serialized_fields() {
    let p = Project::new(ProjectId(7), "Aurora");
    assert_eq!(
        serde_json::to_value(&p).unwrap(),
        serde_json::json!({"id": 7, "name": "Aurora", "voteCount": 0})
    );
}
