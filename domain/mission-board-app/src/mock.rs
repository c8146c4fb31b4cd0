use std::sync::{Mutex, MutexGuard};

use crate::domain::{
    AchievementId, AdminId, MessageId, MissionId, NpcId, PlayerId, RepoCreateError, RepoError,
    RepoUpdateError, TeamId, Timestamp,
    achievement::{Achievement, AchievementGrant, AchievementRepository},
    admin::{Admin, AdminPatch, AdminRepository, NewAdmin},
    message::{Message, MessagePatch, MessageRepository, NewMessage},
    mission::{Mission, MissionPatch, MissionRepository, NewMission},
    npc::{NewNpc, Npc, NpcPatch, NpcRepository},
    player::{Player, PlayerPatch, PlayerProfile, PlayerRegistration, PlayerRepository},
    team::{Team, TeamContribution, TeamRepository},
};

/// In-memory stand-in for every repository. Each call holds the lock for its
/// whole duration, which gives the same all-or-nothing behavior as a
/// database transaction.
#[derive(Default)]
pub struct MockStore {
    state: Mutex<MockState>,
}

#[derive(Default)]
struct MockState {
    next_id: i64,
    players: Vec<Player>,
    teams: Vec<Team>,
    achievements: Vec<Achievement>,
    missions: Vec<Mission>,
    messages: Vec<Message>,
    admins: Vec<Admin>,
    npcs: Vec<Npc>,
}

impl MockState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn contribute_to_team(&mut self, team_name: &str, contribution: TeamContribution) {
        if let Some(team) = self.teams.iter_mut().find(|t| t.name == team_name) {
            team.apply(contribution);
        } else if contribution.founds_team() {
            let team_id = TeamId(self.next_id());
            let mut team = Team {
                team_id,
                name: team_name.to_string(),
                total_score: 0,
                member_count: 0,
            };
            team.apply(contribution);
            self.teams.push(team);
        }
    }
}

impl MockStore {
    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    pub fn achievement_count(&self) -> usize {
        self.lock().achievements.len()
    }
}

#[async_trait::async_trait]
impl PlayerRepository for MockStore {
    async fn register_player(
        &self,
        registration: PlayerRegistration,
    ) -> Result<PlayerId, RepoCreateError> {
        let mut state = self.lock();
        if state.players.iter().any(|p| p.name == registration.name) {
            return Err(RepoCreateError::Conflict);
        }
        state.contribute_to_team(
            &registration.team_name,
            TeamContribution::signup(registration.starting_score),
        );
        let player_id = PlayerId(state.next_id());
        state.players.push(Player {
            player_id,
            name: registration.name,
            password: registration.password,
            team_name: registration.team_name,
            total_score: registration.starting_score,
            avatar_id: registration.avatar_id,
            last_login_date: None,
            profile: PlayerProfile::default(),
        });
        if let Some(welcome) = registration.welcome_achievement {
            let achievement_id = AchievementId(state.next_id());
            state.achievements.push(Achievement {
                achievement_id,
                player_id,
                mission_id: None,
                label: welcome.label,
                points: welcome.points,
                completed_at: Some(welcome.completed_at),
            });
        }
        Ok(player_id)
    }

    async fn get_player(&self, player_id: PlayerId) -> Result<Option<Player>, RepoError> {
        Ok(self
            .lock()
            .players
            .iter()
            .find(|p| p.player_id == player_id)
            .cloned())
    }

    async fn get_player_by_name(&self, name: &str) -> Result<Option<Player>, RepoError> {
        Ok(self.lock().players.iter().find(|p| p.name == name).cloned())
    }

    async fn list_players(&self) -> Result<Vec<Player>, RepoError> {
        Ok(self.lock().players.clone())
    }

    async fn update_player(
        &self,
        player_id: PlayerId,
        patch: PlayerPatch,
    ) -> Result<Option<Player>, RepoUpdateError> {
        let mut state = self.lock();
        if let Some(name) = &patch.name {
            if state
                .players
                .iter()
                .any(|p| &p.name == name && p.player_id != player_id)
            {
                return Err(RepoUpdateError::Conflict);
            }
        }
        let Some(player) = state.players.iter_mut().find(|p| p.player_id == player_id) else {
            return Ok(None);
        };
        patch.apply(player);
        Ok(Some(player.clone()))
    }

    async fn set_last_login(&self, player_id: PlayerId, at: Timestamp) -> Result<(), RepoError> {
        if let Some(player) = self
            .lock()
            .players
            .iter_mut()
            .find(|p| p.player_id == player_id)
        {
            player.last_login_date = Some(at);
        }
        Ok(())
    }

    async fn delete_player(&self, player_id: PlayerId) -> Result<bool, RepoError> {
        let mut state = self.lock();
        let before = state.players.len();
        state.players.retain(|p| p.player_id != player_id);
        Ok(state.players.len() != before)
    }
}

#[async_trait::async_trait]
impl TeamRepository for MockStore {
    async fn list_teams(&self) -> Result<Vec<Team>, RepoError> {
        Ok(self.lock().teams.clone())
    }
}

#[async_trait::async_trait]
impl AchievementRepository for MockStore {
    async fn grant_achievement(
        &self,
        grant: AchievementGrant,
    ) -> Result<AchievementId, RepoError> {
        let mut state = self.lock();
        let achievement_id = AchievementId(state.next_id());
        state.achievements.push(Achievement {
            achievement_id,
            player_id: grant.player_id,
            mission_id: grant.mission_id,
            label: grant.label,
            points: grant.points,
            completed_at: Some(grant.completed_at),
        });
        let team_name = match state
            .players
            .iter_mut()
            .find(|p| p.player_id == grant.player_id)
        {
            Some(player) => {
                player.total_score += grant.points;
                player.team_name.clone()
            }
            None => return Ok(achievement_id),
        };
        state.contribute_to_team(&team_name, TeamContribution::points(grant.points));
        Ok(achievement_id)
    }

    async fn list_player_achievements(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<Achievement>, RepoError> {
        Ok(self
            .lock()
            .achievements
            .iter()
            .filter(|a| a.player_id == player_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl MissionRepository for MockStore {
    async fn list_missions(&self) -> Result<Vec<Mission>, RepoError> {
        Ok(self.lock().missions.clone())
    }

    async fn get_mission(&self, mission_id: MissionId) -> Result<Option<Mission>, RepoError> {
        Ok(self
            .lock()
            .missions
            .iter()
            .find(|m| m.mission_id == mission_id)
            .cloned())
    }

    async fn create_mission(&self, mission: NewMission) -> Result<MissionId, RepoError> {
        let mut state = self.lock();
        let mission_id = MissionId(state.next_id());
        state.missions.push(Mission {
            mission_id,
            name: mission.name,
            description: mission.description,
            points: mission.points,
            is_active: mission.is_active,
        });
        Ok(mission_id)
    }

    async fn update_mission(
        &self,
        mission_id: MissionId,
        patch: MissionPatch,
    ) -> Result<Option<Mission>, RepoError> {
        let mut state = self.lock();
        let Some(mission) = state.missions.iter_mut().find(|m| m.mission_id == mission_id) else {
            return Ok(None);
        };
        patch.apply(mission);
        Ok(Some(mission.clone()))
    }

    async fn insert_missions_if_empty(
        &self,
        missions: Vec<NewMission>,
    ) -> Result<usize, RepoError> {
        if !self.lock().missions.is_empty() {
            return Ok(0);
        }
        let count = missions.len();
        for mission in missions {
            self.create_mission(mission).await?;
        }
        Ok(count)
    }

    async fn insert_missing_missions(
        &self,
        missions: Vec<NewMission>,
    ) -> Result<usize, RepoError> {
        let mut inserted = 0;
        for mission in missions {
            let exists = self.lock().missions.iter().any(|m| m.name == mission.name);
            if !exists {
                self.create_mission(mission).await?;
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

#[async_trait::async_trait]
impl MessageRepository for MockStore {
    async fn list_messages(&self) -> Result<Vec<Message>, RepoError> {
        let mut messages = self.lock().messages.clone();
        messages.reverse();
        Ok(messages)
    }

    async fn list_messages_for(&self, to: &str) -> Result<Vec<Message>, RepoError> {
        let mut messages: Vec<Message> = self
            .lock()
            .messages
            .iter()
            .filter(|m| m.to == to)
            .cloned()
            .collect();
        messages.sort_by(|a, b| {
            b.send_date
                .cmp(&a.send_date)
                .then(b.message_id.cmp(&a.message_id))
        });
        Ok(messages)
    }

    async fn get_message(&self, message_id: MessageId) -> Result<Option<Message>, RepoError> {
        Ok(self
            .lock()
            .messages
            .iter()
            .find(|m| m.message_id == message_id)
            .cloned())
    }

    async fn create_message(&self, message: NewMessage) -> Result<MessageId, RepoError> {
        let mut state = self.lock();
        let message_id = MessageId(state.next_id());
        state.messages.push(Message {
            message_id,
            to: message.to,
            from: message.from,
            subject: message.subject,
            body: message.body,
            send_date: message.send_date,
            priority: message.priority,
            message_read: message.message_read,
            read_date: None,
        });
        Ok(message_id)
    }

    async fn update_message(
        &self,
        message_id: MessageId,
        patch: MessagePatch,
    ) -> Result<Option<Message>, RepoError> {
        let mut state = self.lock();
        let Some(message) = state.messages.iter_mut().find(|m| m.message_id == message_id) else {
            return Ok(None);
        };
        patch.apply(message);
        Ok(Some(message.clone()))
    }

    async fn delete_message(&self, message_id: MessageId) -> Result<bool, RepoError> {
        let mut state = self.lock();
        let before = state.messages.len();
        state.messages.retain(|m| m.message_id != message_id);
        Ok(state.messages.len() != before)
    }

    async fn mark_read(&self, message_id: MessageId, at: Timestamp) -> Result<bool, RepoError> {
        let mut state = self.lock();
        match state
            .messages
            .iter_mut()
            .find(|m| m.message_id == message_id && !m.message_read)
        {
            Some(message) => {
                message.message_read = true;
                message.read_date = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_messages_if_empty(
        &self,
        messages: Vec<NewMessage>,
    ) -> Result<usize, RepoError> {
        if !self.lock().messages.is_empty() {
            return Ok(0);
        }
        let count = messages.len();
        for message in messages {
            self.create_message(message).await?;
        }
        Ok(count)
    }
}

#[async_trait::async_trait]
impl AdminRepository for MockStore {
    async fn get_admin(&self, admin_id: AdminId) -> Result<Option<Admin>, RepoError> {
        Ok(self
            .lock()
            .admins
            .iter()
            .find(|a| a.admin_id == admin_id)
            .cloned())
    }

    async fn get_admin_by_username(&self, username: &str) -> Result<Option<Admin>, RepoError> {
        Ok(self
            .lock()
            .admins
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn list_admins(&self) -> Result<Vec<Admin>, RepoError> {
        Ok(self.lock().admins.clone())
    }

    async fn create_admin(&self, admin: NewAdmin) -> Result<AdminId, RepoCreateError> {
        let mut state = self.lock();
        if state.admins.iter().any(|a| a.username == admin.username) {
            return Err(RepoCreateError::Conflict);
        }
        let admin_id = AdminId(state.next_id());
        state.admins.push(Admin {
            admin_id,
            username: admin.username,
            password: admin.password,
            avatar_id: admin.avatar_id,
            last_login_date: admin.last_login_date,
        });
        Ok(admin_id)
    }

    async fn update_admin(
        &self,
        admin_id: AdminId,
        patch: AdminPatch,
    ) -> Result<Option<Admin>, RepoUpdateError> {
        let mut state = self.lock();
        if let Some(username) = &patch.username {
            if state
                .admins
                .iter()
                .any(|a| &a.username == username && a.admin_id != admin_id)
            {
                return Err(RepoUpdateError::Conflict);
            }
        }
        let Some(admin) = state.admins.iter_mut().find(|a| a.admin_id == admin_id) else {
            return Ok(None);
        };
        patch.apply(admin);
        Ok(Some(admin.clone()))
    }

    async fn set_last_login(&self, admin_id: AdminId, at: Timestamp) -> Result<(), RepoError> {
        if let Some(admin) = self
            .lock()
            .admins
            .iter_mut()
            .find(|a| a.admin_id == admin_id)
        {
            admin.last_login_date = at;
        }
        Ok(())
    }

    async fn delete_admin(&self, admin_id: AdminId) -> Result<bool, RepoError> {
        let mut state = self.lock();
        let before = state.admins.len();
        state.admins.retain(|a| a.admin_id != admin_id);
        Ok(state.admins.len() != before)
    }

    async fn insert_admin_if_empty(&self, admin: NewAdmin) -> Result<bool, RepoError> {
        if !self.lock().admins.is_empty() {
            return Ok(false);
        }
        self.create_admin(admin)
            .await
            .map(|_| true)
            .map_err(|e| RepoError::StorageError(e.to_string()))
    }
}

#[async_trait::async_trait]
impl NpcRepository for MockStore {
    async fn list_npcs(&self) -> Result<Vec<Npc>, RepoError> {
        Ok(self.lock().npcs.clone())
    }

    async fn get_npc(&self, npc_id: NpcId) -> Result<Option<Npc>, RepoError> {
        Ok(self.lock().npcs.iter().find(|n| n.npc_id == npc_id).cloned())
    }

    async fn create_npc(&self, npc: NewNpc) -> Result<NpcId, RepoError> {
        let mut state = self.lock();
        let npc_id = NpcId(state.next_id());
        state.npcs.push(Npc {
            npc_id,
            name: npc.name,
            real_name: npc.real_name,
            details: npc.details,
        });
        Ok(npc_id)
    }

    async fn update_npc(&self, npc_id: NpcId, patch: NpcPatch) -> Result<Option<Npc>, RepoError> {
        let mut state = self.lock();
        let Some(npc) = state.npcs.iter_mut().find(|n| n.npc_id == npc_id) else {
            return Ok(None);
        };
        patch.apply(npc);
        Ok(Some(npc.clone()))
    }

    async fn delete_npc(&self, npc_id: NpcId) -> Result<bool, RepoError> {
        let mut state = self.lock();
        let before = state.npcs.len();
        state.npcs.retain(|n| n.npc_id != npc_id);
        Ok(state.npcs.len() != before)
    }
}
