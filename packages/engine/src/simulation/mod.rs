//! World - grid simulation with sleeping particles
//!
//! The world owns the grid, the particle arena, the active set and the RNG, and drives one
//! step per `update()`:
//! - refresh the active set from every particle's `active` flag
//! - visit the active particles in a uniformly random order
//! - each particle runs its behavior chain once per frame; blocked moves may resolve the
//!   blocker first (see `systems/behaviors`)
//! - particles that could not move go to sleep watching their blockers and are woken when a
//!   blocker moves or is removed
//!
//! Single-threaded and synchronous: no partial move is ever observable between two calls.

use std::sync::Arc;

use rand::rngs::SmallRng;
use slotmap::SlotMap;

use crate::domain::content::ContentRegistry;
use crate::domain::particle::{KindId, Particle, ParticleId};
use crate::domain::point::Point;
use crate::error::SimResult;
use crate::grid::Grid;

#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/queue.rs"]
mod queue;
#[path = "step/update.rs"]
mod update;
#[path = "step/wake.rs"]
mod wake;
#[path = "step/moves.rs"]
mod moves;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::World;
pub use perf_stats::StepStats;
pub use settings::SimConfig;

use perf_stats::StepTimer;
use queue::UpdateQueue;

/// The simulation world
pub struct WorldCore {
    config: SimConfig,
    content: Arc<ContentRegistry>,
    grid: Grid,
    particles: SlotMap<ParticleId, Particle>,

    // Scheduling
    active: Vec<ParticleId>,
    queue: UpdateQueue,
    frame: u64,
    rng: SmallRng,

    stats: StepStats,
}

impl WorldCore {
    /// Create a world from a validated configuration with the built-in content.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        init::create_world_core(config, Arc::new(ContentRegistry::builtin()))
    }

    pub fn with_content(config: SimConfig, content: ContentRegistry) -> SimResult<Self> {
        init::create_world_core(config, Arc::new(content))
    }

    pub fn load_content_bundle_json(&mut self, json: &str) -> SimResult<()> {
        settings::load_content_bundle_json(self, json)
    }

    pub fn content(&self) -> &ContentRegistry {
        &self.content
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn width(&self) -> u32 { self.grid.width() }

    pub fn height(&self) -> u32 { self.grid.height() }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn particle_count(&self) -> usize { self.particles.len() }

    /// Particles whose `active` flag is currently set.
    pub fn active_count(&self) -> usize {
        self.particles.values().filter(|p| p.active).count()
    }

    /// Passed through untouched for renderers.
    pub fn background(&self) -> u32 { self.config.background }

    pub fn cell_size(&self) -> Point { self.config.cell_size }

    /// Reseed the visitation-order RNG (reproducible runs).
    pub fn reseed(&mut self, seed: u64) {
        settings::reseed(self, seed);
    }

    pub fn set_background(&mut self, background: u32) {
        settings::set_background(self, background);
    }

    /// Statistics of the last `update()`.
    pub fn step_stats(&self) -> &StepStats {
        &self.stats
    }

    // === Queries ===

    pub fn in_bounds(&self, pos: Point) -> bool {
        self.grid.in_bounds(pos)
    }

    pub fn get_cell(&self, pos: Point) -> (bool, Option<ParticleId>) {
        self.grid.get_cell(pos)
    }

    pub fn clamp_pos(&self, pos: Point) -> Point {
        self.grid.clamp(pos)
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id)
    }

    pub fn particle_pos(&self, id: ParticleId) -> Option<Point> {
        self.particles.get(id).map(|p| p.pos)
    }

    pub fn particles(&self) -> impl Iterator<Item = (ParticleId, &Particle)> + '_ {
        self.particles.iter()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    // === Mutation ===

    /// Attach a detached particle. Fails when `pos` is out of bounds or occupied.
    pub fn add_particle(&mut self, particle: Particle, pos: Point) -> bool {
        commands::insert_particle(self, particle, pos).is_some()
    }

    /// Like `add_particle`, returning the new handle.
    pub fn insert_particle(&mut self, particle: Particle, pos: Point) -> Option<ParticleId> {
        commands::insert_particle(self, particle, pos)
    }

    /// Spawn a particle of a content kind.
    pub fn spawn(&mut self, kind: KindId, pos: Point) -> Option<ParticleId> {
        commands::spawn(self, kind, pos)
    }

    /// Spawn `kind` in every free cell of a disc. Returns how many were added.
    pub fn add_particles_in_radius(&mut self, center: Point, radius: i32, kind: KindId) -> usize {
        commands::add_particles_in_radius(self, center, radius, kind)
    }

    /// Remove the occupant of `pos`, waking whatever was waiting on it.
    pub fn remove_particle(&mut self, pos: Point) -> bool {
        commands::remove_particle(self, pos)
    }

    pub fn remove_particles_in_radius(&mut self, center: Point, radius: i32) -> usize {
        commands::remove_particles_in_radius(self, center, radius)
    }

    /// Wake a sleeping particle and, transitively, its dependants.
    pub fn activate_particle(&mut self, id: ParticleId) -> bool {
        wake::activate(self, id)
    }

    /// Remove every particle and reset the frame counter.
    pub fn clear(&mut self) {
        commands::clear(self)
    }

    /// Advance the simulation by exactly one frame.
    pub fn update(&mut self) {
        step::update(self);
    }

    // === Rendering helpers ===

    pub fn grid_to_pixel(&self, pos: Point) -> Point {
        render_extract::grid_to_pixel(self, pos)
    }

    pub fn pixel_to_grid(&self, pixel: Point) -> Point {
        render_extract::pixel_to_grid(self, pixel)
    }

    /// One kind id per cell, row-major; 0 for empty cells.
    pub fn kind_buffer(&self) -> Vec<u8> {
        render_extract::kind_buffer(self)
    }

    pub fn fill_kind_buffer(&self, out: &mut [u8]) {
        render_extract::fill_kind_buffer(self, out)
    }
}

// Crate-internal hooks used by behaviors
impl WorldCore {
    /// Relocate a particle. Caller guarantees `dest` is in bounds and empty.
    pub(crate) fn move_particle(&mut self, id: ParticleId, dest: Point) {
        moves::move_particle(self, id, dest);
    }

    pub(crate) fn resolve_blocker(&mut self, blocker: ParticleId, frame: u64) {
        self.stats.recursive_resolutions += 1;
        update::update_particle(self, blocker, frame);
    }

    pub(crate) fn rng_mut(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
