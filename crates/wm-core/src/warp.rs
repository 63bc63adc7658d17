use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::location::WarpLocation;

/// Unique identifier of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Generate a new random player ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Who may see and use a warp without an explicit invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Usable by every player.
    Public,
    /// Usable only by the creator and invited players or groups.
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Private => write!(f, "private"),
        }
    }
}

/// A named, persisted location a player can teleport to.
///
/// Warps are owned by the [`WarpDirectory`](crate::directory::WarpDirectory)
/// and mutated only through the setters below, so every change maps to a
/// store write at the persistence boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warp {
    /// The warp's name, unique within a directory ignoring case.
    pub name: String,
    /// The player who created (and currently owns) the warp.
    creator: PlayerId,
    /// Where the warp leads.
    location: WarpLocation,
    /// Who may see and use the warp.
    visibility: Visibility,
    /// How often the warp has been visited.
    visits: u32,
    /// When the warp was created.
    pub created_at: DateTime<Utc>,
    /// Message shown to a player arriving at the warp.
    welcome_message: Option<String>,
    /// Players explicitly invited to a private warp.
    invited_players: HashSet<PlayerId>,
    /// Permission groups explicitly invited to a private warp.
    invited_groups: HashSet<String>,
}

impl Warp {
    /// Create a new public warp with no visits and no invitations.
    pub fn new(name: impl Into<String>, creator: PlayerId, location: WarpLocation) -> Self {
        Self {
            name: name.into(),
            creator,
            location,
            visibility: Visibility::Public,
            visits: 0,
            created_at: Utc::now(),
            welcome_message: None,
            invited_players: HashSet::new(),
            invited_groups: HashSet::new(),
        }
    }

    /// The player who created the warp.
    pub fn creator(&self) -> PlayerId {
        self.creator
    }

    /// Whether the given player is the warp's creator.
    pub fn is_creator(&self, player: PlayerId) -> bool {
        self.creator == player
    }

    /// Transfer ownership to another player.
    pub fn set_creator(&mut self, player: PlayerId) {
        self.creator = player;
    }

    /// Where the warp leads.
    pub fn location(&self) -> WarpLocation {
        self.location
    }

    /// Move the warp to a new destination.
    pub fn set_location(&mut self, location: WarpLocation) {
        self.location = location;
    }

    /// Who may see and use the warp.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Change the warp's visibility.
    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    /// How often the warp has been visited.
    pub fn visits(&self) -> u32 {
        self.visits
    }

    /// Count one visit. Saturates at `u32::MAX`.
    pub fn record_visit(&mut self) {
        self.visits = self.visits.saturating_add(1);
    }

    /// Reset the visit counter to zero.
    pub fn reset_visits(&mut self) {
        self.visits = 0;
    }

    /// The message shown to a player arriving at the warp, if any.
    pub fn welcome_message(&self) -> Option<&str> {
        self.welcome_message.as_deref()
    }

    /// Set or clear the welcome message.
    pub fn set_welcome_message(&mut self, message: Option<String>) {
        self.welcome_message = message;
    }

    /// Invite a player. Returns `false` if the player was already invited.
    pub fn invite_player(&mut self, player: PlayerId) -> bool {
        self.invited_players.insert(player)
    }

    /// Withdraw a player's invitation. Returns `false` if not invited.
    pub fn uninvite_player(&mut self, player: PlayerId) -> bool {
        self.invited_players.remove(&player)
    }

    /// Whether the player holds an explicit invitation.
    pub fn is_player_invited(&self, player: PlayerId) -> bool {
        self.invited_players.contains(&player)
    }

    /// Invite a permission group. Returns `false` if already invited.
    pub fn invite_group(&mut self, group: impl Into<String>) -> bool {
        self.invited_groups.insert(group.into())
    }

    /// Withdraw a group's invitation. Returns `false` if not invited.
    pub fn uninvite_group(&mut self, group: &str) -> bool {
        self.invited_groups.remove(group)
    }

    /// Whether the group holds an explicit invitation.
    pub fn is_group_invited(&self, group: &str) -> bool {
        self.invited_groups.contains(group)
    }

    /// All explicitly invited players, in arbitrary order.
    pub fn invited_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.invited_players.iter().copied()
    }

    /// All explicitly invited groups, in arbitrary order.
    pub fn invited_groups(&self) -> impl Iterator<Item = &str> {
        self.invited_groups.iter().map(String::as_str)
    }

    /// Whether the warp's name starts with an uppercase character.
    ///
    /// Warps with lowercase-initial names are considered unfinished or
    /// internal and are excluded from random-mode resolution.
    pub fn has_uppercase_initial(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{Position, Rotation, WorldId};

    fn test_warp(name: &str) -> Warp {
        Warp::new(
            name,
            PlayerId::new(),
            WarpLocation::new(
                WorldId::new(),
                Position::new(0.0, 64.0, 0.0),
                Rotation::default(),
            ),
        )
    }

    #[test]
    fn new_warp_is_public_with_zero_visits() {
        let warp = test_warp("Harbor");
        assert_eq!(warp.visibility(), Visibility::Public);
        assert_eq!(warp.visits(), 0);
        assert!(warp.welcome_message().is_none());
    }

    #[test]
    fn visits_accumulate_and_reset() {
        let mut warp = test_warp("Harbor");
        warp.record_visit();
        warp.record_visit();
        assert_eq!(warp.visits(), 2);
        warp.reset_visits();
        assert_eq!(warp.visits(), 0);
    }

    #[test]
    fn visits_saturate_at_max() {
        let mut warp = test_warp("Harbor");
        warp.visits = u32::MAX;
        warp.record_visit();
        assert_eq!(warp.visits(), u32::MAX);
    }

    #[test]
    fn player_invitations() {
        let mut warp = test_warp("Harbor");
        let guest = PlayerId::new();
        assert!(!warp.is_player_invited(guest));
        assert!(warp.invite_player(guest));
        assert!(!warp.invite_player(guest));
        assert!(warp.is_player_invited(guest));
        assert!(warp.uninvite_player(guest));
        assert!(!warp.is_player_invited(guest));
    }

    #[test]
    fn group_invitations() {
        let mut warp = test_warp("Harbor");
        assert!(warp.invite_group("builders"));
        assert!(warp.is_group_invited("builders"));
        assert!(!warp.is_group_invited("admins"));
        assert!(warp.uninvite_group("builders"));
        assert!(!warp.is_group_invited("builders"));
    }

    #[test]
    fn creator_transfer() {
        let mut warp = test_warp("Harbor");
        let original = warp.creator();
        let heir = PlayerId::new();
        assert!(warp.is_creator(original));
        warp.set_creator(heir);
        assert!(warp.is_creator(heir));
        assert!(!warp.is_creator(original));
    }

    #[test]
    fn uppercase_initial_detection() {
        assert!(test_warp("Moria").has_uppercase_initial());
        assert!(!test_warp("moria").has_uppercase_initial());
        assert!(!test_warp("").has_uppercase_initial());
    }
}
