use std::collections::HashSet;
use std::fmt;

use uuid::Uuid;

use wm_core::{BlockPos, Position, WarpLocation, WorldId};

use crate::config::TravelConfig;
use crate::error::{TravelError, TravelResult};
use crate::event::{TravelEventKind, TravelLog};
use crate::search::{SafeSearch, VoxelWorld, find_safe};

/// Half-width of the axis-aligned box scanned for leashed companions, in
/// blocks, on the horizontal axes.
pub const LEASH_SCAN_HORIZONTAL: f64 = 10.0;

/// Half-height of the leashed-companion scan box, in blocks.
pub const LEASH_SCAN_VERTICAL: f64 = 7.0;

/// How often the departure effect is repeated at the origin.
pub const EFFECT_REPEATS: u32 = 3;

/// Unique identifier of an entity living in the host game's world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Generate a new random entity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Entity-level access to the host game's world, on top of [`VoxelWorld`].
///
/// Implemented by the host game and mutated only from the world-update
/// execution context. All movement, mount, and leash state lives behind
/// this trait; the executor never touches game state directly.
pub trait EntityWorld: VoxelWorld {
    /// The entity's current location, or `None` if it does not exist.
    fn location(&self, entity: EntityId) -> Option<WarpLocation>;

    /// The entity the given entity currently rides, if any.
    fn vehicle(&self, entity: EntityId) -> Option<EntityId>;

    /// Whether the entity is a tamed, rideable creature eligible for
    /// co-teleportation.
    fn is_tamed_vehicle(&self, entity: EntityId) -> bool;

    /// Detach the rider from its current mount.
    fn dismount(&mut self, rider: EntityId);

    /// Seat the rider on the vehicle.
    fn mount(&mut self, rider: EntityId, vehicle: EntityId);

    /// All entities within an axis-aligned box around `center`: `horizontal`
    /// blocks on x/z, `vertical` blocks on y. Order must be deterministic.
    fn entities_near(
        &self,
        world: WorldId,
        center: Position,
        horizontal: f64,
        vertical: f64,
    ) -> Vec<EntityId>;

    /// The entity holding this entity's leash, if any.
    fn leash_holder(&self, entity: EntityId) -> Option<EntityId>;

    /// Attach the companion's leash to the holder.
    fn leash(&mut self, companion: EntityId, holder: EntityId);

    /// Move the entity to the given location.
    fn move_entity(&mut self, entity: EntityId, to: WarpLocation);

    /// Play the departure effect once at the given position.
    fn play_effect(&mut self, world: WorldId, at: Position);

    /// Whether the region containing `pos` is currently loaded.
    fn is_region_loaded(&self, world: WorldId, pos: BlockPos) -> bool;

    /// Load (or refresh) the region containing `pos`.
    fn load_region(&mut self, world: WorldId, pos: BlockPos);
}

/// How a completed teleport invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeleportStatus {
    /// Nothing was moved; no safe destination exists within the radius.
    None,
    /// The entity arrived at the destination as stored.
    Original,
    /// The entity arrived at a corrected safe location nearby.
    Safe,
}

impl fmt::Display for TeleportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Original => write!(f, "original"),
            Self::Safe => write!(f, "safe"),
        }
    }
}

/// Executes teleports as a single-pass ordered protocol.
///
/// Per invocation: capture dependents (tamed mount, leashed companions),
/// play the departure effect, preload the destination region, resolve the
/// destination through safe-location search, move the primary, then move
/// each dependent to the *same* final coordinate and re-attach it. The
/// safety resolution is the only failure path; everything after it is
/// best-effort with no rollback.
///
/// A guard keyed by entity identity rejects overlapping invocations for the
/// same entity ([`TravelError::AlreadyInFlight`]).
#[derive(Debug, Default)]
pub struct Teleporter {
    config: TravelConfig,
    events: TravelLog,
    in_flight: HashSet<EntityId>,
}

impl Teleporter {
    /// Create an executor with the given configuration.
    pub fn new(config: TravelConfig) -> Self {
        Self {
            config,
            events: TravelLog::new(0),
            in_flight: HashSet::new(),
        }
    }

    /// The configuration this executor runs with.
    pub fn config(&self) -> &TravelConfig {
        &self.config
    }

    /// Events recorded by past invocations.
    pub fn events(&self) -> &TravelLog {
        &self.events
    }

    /// Drop all recorded events.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Teleport the entity (and its dependents) to the destination.
    ///
    /// Returns [`TeleportStatus::None`] — with nothing moved — when safety
    /// is enabled and no safe location exists within the search radius.
    /// With safety disabled the stored destination is used unmodified and
    /// the status is always [`TeleportStatus::Original`].
    pub fn teleport<W: EntityWorld>(
        &mut self,
        world: &mut W,
        entity: EntityId,
        destination: WarpLocation,
    ) -> TravelResult<TeleportStatus> {
        if !self.in_flight.insert(entity) {
            return Err(TravelError::AlreadyInFlight(entity));
        }
        let result = self.run(world, entity, destination, true, self.config.safety_enabled);
        self.in_flight.remove(&entity);
        result
    }

    /// One pass of the ordered protocol.
    ///
    /// Dependent moves re-enter here with `capture_dependents` and
    /// `resolve_safety` both false: the no-double-capture invariant is an
    /// explicit flag, not an artifact of recursion depth, and dependents are
    /// never independently safety-searched — they receive the primary's
    /// already-resolved coordinate.
    fn run<W: EntityWorld>(
        &mut self,
        world: &mut W,
        entity: EntityId,
        destination: WarpLocation,
        capture_dependents: bool,
        resolve_safety: bool,
    ) -> TravelResult<TeleportStatus> {
        let origin = world
            .location(entity)
            .ok_or(TravelError::UnknownEntity(entity))?;

        // 1. Capture the mount. The rider is detached from whatever it sits
        // on, captured or not, so the later move never drags a stale mount.
        let mut vehicle = None;
        if let Some(mount) = world.vehicle(entity) {
            if capture_dependents && self.config.teleport_vehicle && world.is_tamed_vehicle(mount) {
                vehicle = Some(mount);
                self.events.push(
                    TravelEventKind::VehicleCaptured {
                        rider: entity,
                        vehicle: mount,
                    },
                    format!("{entity} captured mount {mount}"),
                );
            }
            world.dismount(entity);
        }

        // 2. Capture leashed companions, in scan order.
        let mut companions = Vec::new();
        if capture_dependents && self.config.teleport_companions {
            for candidate in world.entities_near(
                origin.world,
                origin.position,
                LEASH_SCAN_HORIZONTAL,
                LEASH_SCAN_VERTICAL,
            ) {
                if candidate != entity && world.leash_holder(candidate) == Some(entity) {
                    companions.push(candidate);
                    self.events.push(
                        TravelEventKind::CompanionCaptured {
                            holder: entity,
                            companion: candidate,
                        },
                        format!("{entity} captured leashed companion {candidate}"),
                    );
                }
            }
        }

        // 3. Departure effect, before any movement.
        if self.config.show_effect {
            for _ in 0..EFFECT_REPEATS {
                world.play_effect(origin.world, origin.position);
            }
            self.events.push(
                TravelEventKind::EffectPlayed { entity },
                format!("departure effect played for {entity}"),
            );
        }

        // 4. Preload the destination region.
        let dest_block = destination.block();
        if self.config.preload_regions && !world.is_region_loaded(destination.world, dest_block) {
            world.load_region(destination.world, dest_block);
            self.events.push(
                TravelEventKind::RegionLoaded {
                    world: destination.world,
                    pos: dest_block,
                },
                format!("loaded destination region around {dest_block}"),
            );
        }

        // 5. Resolve the destination. The only failure path: on NONE the
        // whole operation is abandoned and nothing has moved.
        let (status, target) = if resolve_safety {
            match find_safe(world, destination.world, dest_block, self.config.search_radius) {
                SafeSearch::None => {
                    self.events.push(
                        TravelEventKind::Aborted { entity },
                        format!("no safe destination for {entity} within radius"),
                    );
                    return Ok(TeleportStatus::None);
                }
                SafeSearch::Original(pos) if pos == dest_block => {
                    (TeleportStatus::Original, destination)
                }
                SafeSearch::Original(pos) => {
                    (TeleportStatus::Original, destination.centered_on(pos))
                }
                SafeSearch::Safe(pos) => (TeleportStatus::Safe, destination.centered_on(pos)),
            }
        } else {
            (TeleportStatus::Original, destination)
        };

        // 6. Move the primary.
        world.move_entity(entity, target);
        self.events.push(
            TravelEventKind::Moved {
                entity,
                to: target.block(),
            },
            format!("{entity} moved to {}", target.block()),
        );

        // 7. Move the captured mount to the same final coordinate, then
        // remount. Best-effort: a vanished mount is skipped, not an error.
        if let Some(mount) = vehicle {
            let arrived = self.run(world, mount, target, false, false).is_ok();
            if arrived {
                world.mount(entity, mount);
                self.events.push(
                    TravelEventKind::VehicleRemounted {
                        rider: entity,
                        vehicle: mount,
                    },
                    format!("{entity} remounted {mount}"),
                );
            }
        }

        // 8. Move each captured companion (capture order), then re-leash.
        for companion in companions {
            if self.run(world, companion, target, false, false).is_ok() {
                world.leash(companion, entity);
                self.events.push(
                    TravelEventKind::CompanionReleashed {
                        holder: entity,
                        companion,
                    },
                    format!("{companion} re-leashed to {entity}"),
                );
            }
        }

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;

    use super::*;
    use crate::material::Material;

    /// An in-memory game world: flat entity state plus a voxel safety set.
    struct MockWorld {
        world: WorldId,
        positions: HashMap<EntityId, WarpLocation>,
        vehicles: HashMap<EntityId, EntityId>,
        tamed: HashSet<EntityId>,
        leashes: HashMap<EntityId, EntityId>,
        unsafe_blocks: HashSet<BlockPos>,
        everything_unsafe: bool,
        effects_played: usize,
        loaded_regions: HashSet<BlockPos>,
        moves: Vec<(EntityId, WarpLocation)>,
        safety_queries: Cell<usize>,
    }

    impl MockWorld {
        fn new(world: WorldId) -> Self {
            Self {
                world,
                positions: HashMap::new(),
                vehicles: HashMap::new(),
                tamed: HashSet::new(),
                leashes: HashMap::new(),
                unsafe_blocks: HashSet::new(),
                everything_unsafe: false,
                effects_played: 0,
                loaded_regions: HashSet::new(),
                moves: Vec::new(),
                safety_queries: Cell::new(0),
            }
        }

        fn spawn(&mut self, position: Position) -> EntityId {
            let entity = EntityId::new();
            self.positions.insert(
                entity,
                WarpLocation::new(self.world, position, wm_core::Rotation::default()),
            );
            entity
        }

        fn block_of(&self, entity: EntityId) -> BlockPos {
            self.positions[&entity].block()
        }
    }

    impl VoxelWorld for MockWorld {
        fn material(&self, _world: WorldId, _pos: BlockPos) -> Material {
            Material::Other
        }

        fn is_safe(&self, _world: WorldId, pos: BlockPos) -> bool {
            self.safety_queries.set(self.safety_queries.get() + 1);
            !self.everything_unsafe && !self.unsafe_blocks.contains(&pos)
        }
    }

    impl EntityWorld for MockWorld {
        fn location(&self, entity: EntityId) -> Option<WarpLocation> {
            self.positions.get(&entity).copied()
        }

        fn vehicle(&self, entity: EntityId) -> Option<EntityId> {
            self.vehicles.get(&entity).copied()
        }

        fn is_tamed_vehicle(&self, entity: EntityId) -> bool {
            self.tamed.contains(&entity)
        }

        fn dismount(&mut self, rider: EntityId) {
            self.vehicles.remove(&rider);
        }

        fn mount(&mut self, rider: EntityId, vehicle: EntityId) {
            self.vehicles.insert(rider, vehicle);
        }

        fn entities_near(
            &self,
            world: WorldId,
            center: Position,
            horizontal: f64,
            vertical: f64,
        ) -> Vec<EntityId> {
            let mut near: Vec<EntityId> = self
                .positions
                .iter()
                .filter(|(_, loc)| {
                    loc.world == world
                        && (loc.position.x - center.x).abs() <= horizontal
                        && (loc.position.z - center.z).abs() <= horizontal
                        && (loc.position.y - center.y).abs() <= vertical
                })
                .map(|(id, _)| *id)
                .collect();
            near.sort_by_key(|id| id.0);
            near
        }

        fn leash_holder(&self, entity: EntityId) -> Option<EntityId> {
            self.leashes.get(&entity).copied()
        }

        fn leash(&mut self, companion: EntityId, holder: EntityId) {
            self.leashes.insert(companion, holder);
        }

        fn move_entity(&mut self, entity: EntityId, to: WarpLocation) {
            self.positions.insert(entity, to);
            self.moves.push((entity, to));
        }

        fn play_effect(&mut self, _world: WorldId, _at: Position) {
            self.effects_played += 1;
        }

        fn is_region_loaded(&self, _world: WorldId, pos: BlockPos) -> bool {
            self.loaded_regions.contains(&pos)
        }

        fn load_region(&mut self, _world: WorldId, pos: BlockPos) {
            self.loaded_regions.insert(pos);
        }
    }

    fn destination(world: WorldId) -> WarpLocation {
        WarpLocation::new(
            world,
            Position::new(100.5, 70.0, -20.5),
            wm_core::Rotation::new(0.0, 180.0),
        )
    }

    #[test]
    fn safety_disabled_reports_original_without_searching() {
        let world_id = WorldId::new();
        let mut world = MockWorld::new(world_id);
        let player = world.spawn(Position::new(0.5, 64.0, 0.5));
        world.everything_unsafe = true; // would abort if safety ran

        let mut teleporter = Teleporter::new(TravelConfig::default().with_safety(false));
        let status = teleporter
            .teleport(&mut world, player, destination(world_id))
            .unwrap();

        assert_eq!(status, TeleportStatus::Original);
        assert_eq!(world.safety_queries.get(), 0);
        assert_eq!(world.moves.len(), 1);
        // Stored coordinate used unmodified.
        assert!((world.positions[&player].position.x - 100.5).abs() < f64::EPSILON);
    }

    #[test]
    fn unsafe_destination_aborts_moving_nothing() {
        let world_id = WorldId::new();
        let mut world = MockWorld::new(world_id);
        let player = world.spawn(Position::new(0.5, 64.0, 0.5));
        world.everything_unsafe = true;

        let mut teleporter = Teleporter::new(TravelConfig::default());
        let status = teleporter
            .teleport(&mut world, player, destination(world_id))
            .unwrap();

        assert_eq!(status, TeleportStatus::None);
        assert!(world.moves.is_empty());
        assert_eq!(world.block_of(player), BlockPos::new(0, 64, 0));
    }

    #[test]
    fn unsafe_block_is_corrected_to_a_nearby_safe_one() {
        let world_id = WorldId::new();
        let mut world = MockWorld::new(world_id);
        let player = world.spawn(Position::new(0.5, 64.0, 0.5));
        let dest = destination(world_id);
        world.unsafe_blocks.insert(dest.block());

        let mut teleporter = Teleporter::new(TravelConfig::default());
        let status = teleporter.teleport(&mut world, player, dest).unwrap();

        assert_eq!(status, TeleportStatus::Safe);
        let arrived = world.block_of(player);
        assert_ne!(arrived, dest.block());
        assert!(arrived.chebyshev_distance(dest.block()) <= 3);
        // Rotation survives the correction.
        assert!((world.positions[&player].rotation.yaw - 180.0).abs() < f32::EPSILON);
    }

    #[test]
    fn vehicle_and_companions_arrive_attached() {
        let world_id = WorldId::new();
        let mut world = MockWorld::new(world_id);
        let player = world.spawn(Position::new(0.5, 64.0, 0.5));
        let horse = world.spawn(Position::new(0.5, 64.0, 0.5));
        let wolf = world.spawn(Position::new(3.5, 64.0, 2.5));
        let parrot = world.spawn(Position::new(-2.5, 66.0, 1.5));
        world.tamed.insert(horse);
        world.vehicles.insert(player, horse);
        world.leashes.insert(wolf, player);
        world.leashes.insert(parrot, player);

        let dest = destination(world_id);
        let mut teleporter = Teleporter::new(TravelConfig::default());
        let status = teleporter.teleport(&mut world, player, dest).unwrap();

        assert_eq!(status, TeleportStatus::Original);
        for entity in [player, horse, wolf, parrot] {
            assert_eq!(world.block_of(entity), dest.block());
        }
        // Mount and both leashes intact.
        assert_eq!(world.vehicles.get(&player), Some(&horse));
        assert_eq!(world.leashes.get(&wolf), Some(&player));
        assert_eq!(world.leashes.get(&parrot), Some(&player));
        // Primary plus three dependents, one move each.
        assert_eq!(world.moves.len(), 4);
    }

    #[test]
    fn dependents_do_not_capture_their_own_dependents() {
        let world_id = WorldId::new();
        let mut world = MockWorld::new(world_id);
        let player = world.spawn(Position::new(0.5, 64.0, 0.5));
        let wolf = world.spawn(Position::new(2.5, 64.0, 0.5));
        let stray = world.spawn(Position::new(3.5, 64.0, 0.5));
        world.leashes.insert(wolf, player);
        // The stray is leashed to the wolf; the wolf's own move runs with
        // capture disabled, so the stray must stay put.
        world.leashes.insert(stray, wolf);

        let dest = destination(world_id);
        let mut teleporter = Teleporter::new(TravelConfig::default());
        teleporter.teleport(&mut world, player, dest).unwrap();

        assert_eq!(world.block_of(wolf), dest.block());
        assert_eq!(world.block_of(stray), BlockPos::new(3, 64, 0));
        assert_eq!(world.moves.len(), 2);
    }

    #[test]
    fn untamed_mount_is_left_behind_but_rider_is_detached() {
        let world_id = WorldId::new();
        let mut world = MockWorld::new(world_id);
        let player = world.spawn(Position::new(0.5, 64.0, 0.5));
        let boar = world.spawn(Position::new(0.5, 64.0, 0.5));
        world.vehicles.insert(player, boar);

        let dest = destination(world_id);
        let mut teleporter = Teleporter::new(TravelConfig::default());
        teleporter.teleport(&mut world, player, dest).unwrap();

        assert_eq!(world.block_of(player), dest.block());
        assert_eq!(world.block_of(boar), BlockPos::new(0, 64, 0));
        assert!(world.vehicles.is_empty());
    }

    #[test]
    fn companion_outside_scan_box_is_not_captured() {
        let world_id = WorldId::new();
        let mut world = MockWorld::new(world_id);
        let player = world.spawn(Position::new(0.5, 64.0, 0.5));
        let far_wolf = world.spawn(Position::new(12.5, 64.0, 0.5));
        let high_bat = world.spawn(Position::new(0.5, 72.0, 0.5));
        world.leashes.insert(far_wolf, player);
        world.leashes.insert(high_bat, player);

        let dest = destination(world_id);
        let mut teleporter = Teleporter::new(TravelConfig::default());
        teleporter.teleport(&mut world, player, dest).unwrap();

        assert_eq!(world.block_of(far_wolf), BlockPos::new(12, 64, 0));
        assert_eq!(world.block_of(high_bat), BlockPos::new(0, 72, 0));
        assert_eq!(world.moves.len(), 1);
    }

    #[test]
    fn dependent_capture_disabled_by_config() {
        let world_id = WorldId::new();
        let mut world = MockWorld::new(world_id);
        let player = world.spawn(Position::new(0.5, 64.0, 0.5));
        let horse = world.spawn(Position::new(0.5, 64.0, 0.5));
        let wolf = world.spawn(Position::new(2.5, 64.0, 0.5));
        world.tamed.insert(horse);
        world.vehicles.insert(player, horse);
        world.leashes.insert(wolf, player);

        let config = TravelConfig::default()
            .with_vehicle(false)
            .with_companions(false);
        let mut teleporter = Teleporter::new(config);
        teleporter
            .teleport(&mut world, player, destination(world_id))
            .unwrap();

        assert_eq!(world.moves.len(), 1);
        assert_eq!(world.block_of(horse), BlockPos::new(0, 64, 0));
        assert_eq!(world.block_of(wolf), BlockPos::new(2, 64, 0));
    }

    #[test]
    fn effect_plays_fixed_number_of_times() {
        let world_id = WorldId::new();
        let mut world = MockWorld::new(world_id);
        let player = world.spawn(Position::new(0.5, 64.0, 0.5));

        let mut teleporter = Teleporter::new(TravelConfig::default());
        teleporter
            .teleport(&mut world, player, destination(world_id))
            .unwrap();
        assert_eq!(world.effects_played, EFFECT_REPEATS as usize);

        world.effects_played = 0;
        let mut silent = Teleporter::new(TravelConfig::default().with_effect(false));
        silent
            .teleport(&mut world, player, destination(world_id))
            .unwrap();
        assert_eq!(world.effects_played, 0);
    }

    #[test]
    fn preload_loads_unloaded_destination_region() {
        let world_id = WorldId::new();
        let mut world = MockWorld::new(world_id);
        let player = world.spawn(Position::new(0.5, 64.0, 0.5));
        let dest = destination(world_id);

        let mut teleporter = Teleporter::new(TravelConfig::default().with_preload(true));
        teleporter.teleport(&mut world, player, dest).unwrap();
        assert!(world.loaded_regions.contains(&dest.block()));
    }

    #[test]
    fn unknown_entity_fails_and_releases_the_guard() {
        let world_id = WorldId::new();
        let mut world = MockWorld::new(world_id);
        let ghost = EntityId::new();

        let mut teleporter = Teleporter::new(TravelConfig::default());
        let err = teleporter
            .teleport(&mut world, ghost, destination(world_id))
            .unwrap_err();
        assert!(matches!(err, TravelError::UnknownEntity(_)));

        // The guard must not leak: a later valid teleport for a real entity
        // and a retry for the same id both proceed.
        let player = world.spawn(Position::new(0.5, 64.0, 0.5));
        assert!(
            teleporter
                .teleport(&mut world, player, destination(world_id))
                .is_ok()
        );
        assert!(matches!(
            teleporter.teleport(&mut world, ghost, destination(world_id)),
            Err(TravelError::UnknownEntity(_))
        ));
    }

    #[test]
    fn events_record_the_protocol_in_order() {
        let world_id = WorldId::new();
        let mut world = MockWorld::new(world_id);
        let player = world.spawn(Position::new(0.5, 64.0, 0.5));
        let horse = world.spawn(Position::new(0.5, 64.0, 0.5));
        world.tamed.insert(horse);
        world.vehicles.insert(player, horse);

        let mut teleporter = Teleporter::new(TravelConfig::default());
        teleporter
            .teleport(&mut world, player, destination(world_id))
            .unwrap();

        let kinds: Vec<&TravelEventKind> = teleporter
            .events()
            .events_for_entity(player)
            .into_iter()
            .map(|e| &e.kind)
            .collect();
        assert!(matches!(kinds[0], TravelEventKind::VehicleCaptured { .. }));
        assert!(matches!(kinds[1], TravelEventKind::EffectPlayed { .. }));
        assert!(matches!(kinds[2], TravelEventKind::Moved { .. }));
        assert!(matches!(
            kinds.last().unwrap(),
            TravelEventKind::VehicleRemounted { .. }
        ));
    }
}
