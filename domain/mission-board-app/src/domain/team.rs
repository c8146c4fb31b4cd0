use crate::domain::{RepoError, TeamId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Team {
    pub team_id: TeamId,
    pub name: String,
    pub total_score: i64,
    pub member_count: i64,
}

/// Delta applied to a team's denormalized aggregates.
///
/// Team scores and member counts are never derived from the player table.
/// Every change goes through a contribution, and contributions are only
/// produced by player signup and achievement grants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeamContribution {
    pub members: i64,
    pub points: i64,
}

impl TeamContribution {
    pub fn signup(points: i64) -> Self {
        Self { members: 1, points }
    }

    pub fn points(points: i64) -> Self {
        Self { members: 0, points }
    }

    /// Whether a team that does not exist yet should be founded by this
    /// contribution. Point grants never create teams.
    pub fn founds_team(&self) -> bool {
        self.members > 0
    }
}

impl Team {
    pub fn apply(&mut self, contribution: TeamContribution) {
        self.member_count += contribution.members;
        self.total_score += contribution.points;
    }
}

#[async_trait::async_trait]
pub trait TeamRepository {
    /// All teams in creation order.
    async fn list_teams(&self) -> Result<Vec<Team>, RepoError>;
}
