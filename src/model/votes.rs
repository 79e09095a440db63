use super::ProjectId;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A batch of vote increments, indexed by project.
///
/// The wire form is a JSON object whose keys are project identifiers,
/// e.g. `{"3": 2, "7": 1}`.
#[derive(Debug, Deserialize)]
#[serde(from = "BTreeMap<i64, i64>")]
pub struct Votes(BTreeMap<ProjectId, i64>);

impl From<BTreeMap<i64, i64>> for Votes {
    fn from(raw: BTreeMap<i64, i64>) -> Votes {
        Votes(raw.into_iter().map(|(id, n)| (ProjectId(id), n)).collect())
    }
}

impl FromIterator<(ProjectId, i64)> for Votes {
    fn from_iter<I: IntoIterator<Item = (ProjectId, i64)>>(iter: I) -> Votes {
        Votes(iter.into_iter().collect())
    }
}

impl Votes {
    pub fn iter(&self) -> impl Iterator<Item = (ProjectId, i64)> + '_ {
        self.0.iter().map(|(&p, &n)| (p, n))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of applying a vote batch. Entries for unknown projects are
/// skipped and reported here, the others are applied regardless.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct VoteOutcome {
    pub applied: usize,
    pub unknown: Vec<ProjectId>,
}

impl VoteOutcome {
    pub fn is_complete(&self) -> bool {
        self.unknown.is_empty()
    }
}
