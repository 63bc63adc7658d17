use std::collections::HashSet;

use crate::warp::{PlayerId, Visibility, Warp};

/// What an actor wants to do with a warp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// See the warp and teleport to it.
    View,
    /// Change or delete the warp.
    Modify,
}

/// The player (or system surrogate) issuing a resolution or teleport request.
#[derive(Debug, Clone)]
pub struct Actor {
    /// The actor's player identity.
    pub id: PlayerId,
    /// Permission groups the actor belongs to.
    pub groups: HashSet<String>,
}

impl Actor {
    /// Create an actor with no group memberships.
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            groups: HashSet::new(),
        }
    }

    /// Add a group membership.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.insert(group.into());
        self
    }
}

/// Decides which warps an actor may see or change.
///
/// Implemented by the host game's permission layer and injected wherever
/// warps are filtered. Resolution only ever sees warps the resolver accepts,
/// so a hidden warp is indistinguishable from a nonexistent one.
pub trait AuthorizationResolver {
    /// Whether the actor may see and use the warp.
    fn is_viewable(&self, actor: &Actor, warp: &Warp) -> bool;

    /// Whether the actor may change or delete the warp.
    fn is_modifiable(&self, actor: &Actor, warp: &Warp) -> bool;

    /// Dispatch on intent.
    fn permits(&self, actor: &Actor, intent: Intent, warp: &Warp) -> bool {
        match intent {
            Intent::View => self.is_viewable(actor, warp),
            Intent::Modify => self.is_modifiable(actor, warp),
        }
    }
}

/// The default invitation-based rules.
///
/// Public warps are viewable by everyone. Private warps are viewable by
/// their creator and by explicitly invited players and groups. Only the
/// creator may modify a warp.
#[derive(Debug, Clone, Copy, Default)]
pub struct InviteAuthorizer;

impl AuthorizationResolver for InviteAuthorizer {
    fn is_viewable(&self, actor: &Actor, warp: &Warp) -> bool {
        match warp.visibility() {
            Visibility::Public => true,
            Visibility::Private => {
                warp.is_creator(actor.id)
                    || warp.is_player_invited(actor.id)
                    || actor.groups.iter().any(|g| warp.is_group_invited(g))
            }
        }
    }

    fn is_modifiable(&self, actor: &Actor, warp: &Warp) -> bool {
        warp.is_creator(actor.id)
    }
}
