/// Points granted to a new player (and its team) when signup bonuses are on.
pub const SIGNUP_BONUS_POINTS: i64 = 10;
pub const SIGNUP_BONUS_LABEL: &str = "Welcome Bonus";

/// Per-deployment behavior variant. Pick one at startup and keep it: mixing
/// signup variants within one database breaks the team score invariant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Signup grants the bonus to the player and its team and records a
    /// welcome achievement.
    pub award_signup_bonus: bool,
    /// Players carry the extended profile fields.
    pub extended_profile_fields: bool,
    /// Player logins stamp `last_login_date`.
    pub record_player_logins: bool,
    /// `initialize_admins` may seed the default admin account.
    pub seed_default_admin: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            award_signup_bonus: true,
            extended_profile_fields: true,
            record_player_logins: false,
            seed_default_admin: false,
        }
    }
}
