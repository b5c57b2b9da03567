use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::content::ContentRegistry;
use crate::domain::point::Point;
use crate::error::{SimError, SimResult};

use super::WorldCore;

/// Background color in ABGR format, RGB(10,10,10) opaque.
pub const DEFAULT_BACKGROUND: u32 = 0xFF0A0A0A;

/// Upper bound on cell count; keeps row-major indices and pixel math well inside i32.
const MAX_CELLS: i64 = 1 << 26;

/// Static configuration for a world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Grid width in cells.
    pub width: i32,
    /// Grid height in cells.
    pub height: i32,
    /// Pixel size of one cell, used only by grid/pixel conversions.
    pub cell_size: Point,
    /// Rendering concern only; never inspected by the simulation.
    pub background: u32,
    /// Optional RNG seed for reproducible visitation order.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            cell_size: Point::new(12, 12),
            background: DEFAULT_BACKGROUND,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_cell_size(mut self, w: i32, h: i32) -> Self {
        self.cell_size = Point::new(w, h);
        self
    }

    pub fn with_background(mut self, background: u32) -> Self {
        self.background = background;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the configuration, returning grid dimensions.
    pub fn validate(&self) -> SimResult<(u32, u32)> {
        if self.width <= 0 || self.height <= 0 {
            return Err(SimError::InvalidConfig(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.cell_size.x <= 0 || self.cell_size.y <= 0 {
            return Err(SimError::InvalidConfig(format!(
                "cell size must be positive, got {}x{}",
                self.cell_size.x, self.cell_size.y
            )));
        }
        if self.width as i64 * self.height as i64 > MAX_CELLS {
            return Err(SimError::InvalidConfig(format!(
                "grid of {}x{} cells exceeds {} cells",
                self.width, self.height, MAX_CELLS
            )));
        }
        if self.width.checked_mul(self.cell_size.x).is_none()
            || self.height.checked_mul(self.cell_size.y).is_none()
        {
            return Err(SimError::InvalidConfig(
                "pixel dimensions overflow i32".to_string(),
            ));
        }
        Ok((self.width as u32, self.height as u32))
    }

    /// Returns an RNG for the configured seed, drawing one from entropy if absent.
    pub(crate) fn seeded_rng(&self) -> SmallRng {
        let seed = match self.seed {
            Some(seed) => seed,
            None => {
                let seed: u64 = rand::random();
                debug!(seed, "no seed configured, drew one from entropy");
                seed
            }
        };
        SmallRng::seed_from_u64(seed)
    }
}

pub(super) fn reseed(world: &mut WorldCore, seed: u64) {
    world.config.seed = Some(seed);
    world.rng = SmallRng::seed_from_u64(seed);
}

pub(super) fn set_background(world: &mut WorldCore, background: u32) {
    world.config.background = background;
}

pub(super) fn load_content_bundle_json(world: &mut WorldCore, json: &str) -> SimResult<()> {
    let registry = ContentRegistry::from_bundle_json(json)?;
    world.content = Arc::new(registry);
    debug!(kinds = world.content.kind_count(), "content bundle loaded");
    Ok(())
}
