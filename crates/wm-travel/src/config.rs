/// Configuration for a teleport invocation.
///
/// Passed explicitly into the executor at call time; there is no global
/// settings object. Defaults mirror a conservative server setup: safety on
/// with a small radius, dependents carried, effect shown, no preloading.
#[derive(Debug, Clone)]
pub struct TravelConfig {
    /// Whether destinations are verified (and corrected) for safety.
    pub safety_enabled: bool,
    /// Chebyshev radius of the safe-location search, in blocks.
    pub search_radius: u32,
    /// Whether a tamed mount is carried along.
    pub teleport_vehicle: bool,
    /// Whether leashed companions are carried along.
    pub teleport_companions: bool,
    /// Whether a visual effect is played at the origin.
    pub show_effect: bool,
    /// Whether the destination region is loaded before arrival.
    pub preload_regions: bool,
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            safety_enabled: true,
            search_radius: 3,
            teleport_vehicle: true,
            teleport_companions: true,
            show_effect: true,
            preload_regions: false,
        }
    }
}

impl TravelConfig {
    /// Enable or disable destination safety verification.
    pub fn with_safety(mut self, enabled: bool) -> Self {
        self.safety_enabled = enabled;
        self
    }

    /// Set the safe-location search radius in blocks.
    pub fn with_search_radius(mut self, radius: u32) -> Self {
        self.search_radius = radius;
        self
    }

    /// Enable or disable carrying a tamed mount.
    pub fn with_vehicle(mut self, enabled: bool) -> Self {
        self.teleport_vehicle = enabled;
        self
    }

    /// Enable or disable carrying leashed companions.
    pub fn with_companions(mut self, enabled: bool) -> Self {
        self.teleport_companions = enabled;
        self
    }

    /// Enable or disable the origin visual effect.
    pub fn with_effect(mut self, enabled: bool) -> Self {
        self.show_effect = enabled;
        self
    }

    /// Enable or disable destination region preloading.
    pub fn with_preload(mut self, enabled: bool) -> Self {
        self.preload_regions = enabled;
        self
    }
}
