//! Behaviors - per-particle movement rules
//!
//! A particle carries an ordered list of behaviors. The chain driver in
//! `simulation/step/update.rs` runs them in declared order and inspects each
//! `BehaviorOutcome`:
//! - `Moved`: the particle relocated, its turn is over
//! - `Blocked`: nothing moved but a neighbor that might still move is in the way
//! - `NoOp`: fall through to the next behavior
//!
//! New behaviors are added as a `ParticleBehavior` variant plus a `Behavior` impl.

mod common;
mod gravity;
mod heap;

pub use gravity::GravitySpec;
pub use heap::HeapSpec;

use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::particle::ParticleId;
use crate::domain::point::Point;
use crate::error::SimResult;
use crate::simulation::WorldCore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorOutcome {
    Moved,
    Blocked,
    NoOp,
}

/// Update context passed to behaviors: the world plus the particle being updated.
pub struct UpdateContext<'a> {
    world: &'a mut WorldCore,
    particle: ParticleId,
    pos: Point,
    frame: u64,
}

impl<'a> UpdateContext<'a> {
    pub(crate) fn new(world: &'a mut WorldCore, particle: ParticleId, pos: Point, frame: u64) -> Self {
        Self { world, particle, pos, frame }
    }

    #[inline]
    pub fn particle(&self) -> ParticleId { self.particle }

    #[inline]
    pub fn pos(&self) -> Point { self.pos }

    #[inline]
    pub fn frame(&self) -> u64 { self.frame }

    #[inline]
    pub fn cell(&self, pos: Point) -> (bool, Option<ParticleId>) {
        self.world.get_cell(pos)
    }

    #[inline]
    pub fn is_empty(&self, pos: Point) -> bool {
        matches!(self.world.get_cell(pos), (true, None))
    }

    /// Active and not yet processed this frame.
    #[inline]
    pub fn is_updateable(&self, id: ParticleId) -> bool {
        self.world.particle(id).is_some_and(|p| p.updateable(self.frame))
    }

    #[inline]
    pub fn is_active(&self, id: ParticleId) -> bool {
        self.world.particle(id).is_some_and(|p| p.is_active())
    }

    /// Run the blocker's own update right now, inside this frame.
    pub fn resolve_blocker(&mut self, blocker: ParticleId) {
        self.world.resolve_blocker(blocker, self.frame);
    }

    /// Relocate the particle. Caller checked that `dest` is in bounds and empty.
    pub fn move_to(&mut self, dest: Point) {
        self.world.move_particle(self.particle, dest);
        self.pos = dest;
    }

    /// Bernoulli trial with probability `prob` (validated to lie in [0, 1]).
    #[inline]
    pub fn roll(&mut self, prob: f64) -> bool {
        self.world.rng_mut().gen_bool(prob)
    }

    #[inline]
    pub fn rng(&mut self) -> &mut SmallRng {
        self.world.rng_mut()
    }
}

/// Behavior trait - each movement rule implements this
pub trait Behavior {
    fn apply(&mut self, ctx: &mut UpdateContext) -> BehaviorOutcome;

    /// Offsets a sleeping particle watches for reactivation.
    fn watched_offsets(&self) -> Vec<Point>;

    fn validate(&self) -> SimResult<()>;

    /// Called once the particle relocated this frame, whichever behavior moved it.
    fn on_moved(&mut self) {}
}

/// Closed set of behaviors a particle can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParticleBehavior {
    Gravity(GravitySpec),
    Heap(HeapSpec),
}

impl Behavior for ParticleBehavior {
    fn apply(&mut self, ctx: &mut UpdateContext) -> BehaviorOutcome {
        match self {
            ParticleBehavior::Gravity(gravity) => gravity.apply(ctx),
            ParticleBehavior::Heap(heap) => heap.apply(ctx),
        }
    }

    fn watched_offsets(&self) -> Vec<Point> {
        match self {
            ParticleBehavior::Gravity(gravity) => gravity.watched_offsets(),
            ParticleBehavior::Heap(heap) => heap.watched_offsets(),
        }
    }

    fn validate(&self) -> SimResult<()> {
        match self {
            ParticleBehavior::Gravity(gravity) => gravity.validate(),
            ParticleBehavior::Heap(heap) => heap.validate(),
        }
    }

    fn on_moved(&mut self) {
        match self {
            ParticleBehavior::Gravity(gravity) => gravity.on_moved(),
            ParticleBehavior::Heap(heap) => heap.on_moved(),
        }
    }
}
