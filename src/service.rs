use crate::model::{Project, ProjectId, VoteOutcome, Votes};
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

pub const PROJECT_NAMES: [&str; 12] = [
    "Apollo", "Zephyr", "Orion", "Luna", "Nova", "Pegasus", "Aurora", "Vega", "Atlas", "Sirius",
    "Phoenix", "Titan",
];

pub const DEFAULT_AUTHORIZED_TAGS: [&str; 1] = ["39:68:B3:B9:5B"];

#[derive(Debug, PartialEq, Eq)]
pub enum Authorization {
    Granted,
    Denied,
}

/// The set of projects open to voting and the tags allowed to vote.
///
/// Projects are numbered from 1 in the order of [`PROJECT_NAMES`] and
/// live as long as the service. Vote batches are applied under a single
/// write lock, so two batches never interleave.
#[derive(Debug)]
pub struct VotingService {
    projects: RwLock<Vec<Project>>,
    authorized_tags: Vec<String>,
}

impl VotingService {
    pub fn new<I, S>(authorized_tags: I) -> VotingService
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let projects = PROJECT_NAMES
            .iter()
            .zip(1..)
            .map(|(name, id)| Project::new(ProjectId(id), name))
            .collect();
        VotingService {
            projects: RwLock::new(projects),
            authorized_tags: authorized_tags.into_iter().map(Into::into).collect(),
        }
    }

    pub async fn projects(&self) -> Vec<Project> {
        self.projects.read().await.clone()
    }

    #[instrument(skip_all, fields(entries = votes.len()))]
    pub async fn apply_votes(&self, votes: &Votes) -> VoteOutcome {
        let mut projects = self.projects.write().await;
        let mut outcome = VoteOutcome::default();
        for (id, n) in votes.iter() {
            if let Some(project) = projects.iter_mut().find(|p| p.id == id) {
                project.add_votes(n);
                trace!(project = %project.name, votes = n, total = project.vote_count, "votes added");
                outcome.applied += 1;
            } else {
                debug!(project = %id, "vote for unknown project");
                outcome.unknown.push(id);
            }
        }
        outcome
    }

    pub fn authorize(&self, tag: &str) -> Authorization {
        if self.authorized_tags.iter().any(|t| t == tag) {
            Authorization::Granted
        } else {
            Authorization::Denied
        }
    }
}
