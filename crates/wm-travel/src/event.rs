use wm_core::{BlockPos, WorldId};

use crate::teleport::EntityId;

/// What happened during a teleport invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TravelEventKind {
    /// A tamed mount was captured for co-teleportation.
    VehicleCaptured {
        /// The riding entity.
        rider: EntityId,
        /// The captured mount.
        vehicle: EntityId,
    },
    /// A leashed companion was captured for co-teleportation.
    CompanionCaptured {
        /// The leash holder.
        holder: EntityId,
        /// The captured companion.
        companion: EntityId,
    },
    /// The departure effect was played at an entity's origin.
    EffectPlayed {
        /// The departing entity.
        entity: EntityId,
    },
    /// The destination region was loaded before arrival.
    RegionLoaded {
        /// The destination world.
        world: WorldId,
        /// The destination voxel.
        pos: BlockPos,
    },
    /// An entity arrived at a destination voxel.
    Moved {
        /// The moved entity.
        entity: EntityId,
        /// The voxel it arrived in.
        to: BlockPos,
    },
    /// A captured mount was re-mounted by its rider.
    VehicleRemounted {
        /// The rider.
        rider: EntityId,
        /// The mount.
        vehicle: EntityId,
    },
    /// A captured companion was leashed back to its holder.
    CompanionReleashed {
        /// The leash holder.
        holder: EntityId,
        /// The companion.
        companion: EntityId,
    },
    /// The teleport was abandoned because no safe destination exists.
    Aborted {
        /// The entity that stayed put.
        entity: EntityId,
    },
}

impl TravelEventKind {
    /// Check whether a given entity is involved in this event.
    pub fn involves(&self, id: EntityId) -> bool {
        match self {
            Self::VehicleCaptured { rider, vehicle } | Self::VehicleRemounted { rider, vehicle } => {
                *rider == id || *vehicle == id
            }
            Self::CompanionCaptured { holder, companion }
            | Self::CompanionReleashed { holder, companion } => {
                *holder == id || *companion == id
            }
            Self::EffectPlayed { entity } | Self::Moved { entity, .. } | Self::Aborted { entity } => {
                *entity == id
            }
            Self::RegionLoaded { .. } => false,
        }
    }
}

/// A record of something that happened while executing teleports.
#[derive(Debug, Clone)]
pub struct TravelEvent {
    /// Position of this event in the log, starting at 0.
    pub seq: u64,
    /// The specific kind of event that occurred.
    pub kind: TravelEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

/// Accumulates events across teleport invocations.
#[derive(Debug, Default)]
pub struct TravelLog {
    events: Vec<TravelEvent>,
    next_seq: u64,
    max_events: usize,
}

impl TravelLog {
    /// Create a log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            next_seq: 0,
            max_events,
        }
    }

    /// Append an event, dropping the oldest if the log exceeds its capacity.
    pub fn push(&mut self, kind: TravelEventKind, description: impl Into<String>) {
        self.events.push(TravelEvent {
            seq: self.next_seq,
            kind,
            description: description.into(),
        });
        self.next_seq += 1;
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// Return a slice of all recorded events.
    pub fn events(&self) -> &[TravelEvent] {
        &self.events
    }

    /// Return all events involving the given entity.
    pub fn events_for_entity(&self, id: EntityId) -> Vec<&TravelEvent> {
        self.events.iter().filter(|e| e.kind.involves(id)).collect()
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
