//! Particle - one simulated grain and its activation bookkeeping
//!
//! Particles live in a generational arena owned by the world (`ParticleId` keys), so the
//! dependant lists below never hold dangling references: a removed particle simply stops
//! resolving.

use slotmap::new_key_type;

use crate::domain::point::Point;
use crate::error::SimResult;
use crate::systems::behaviors::{Behavior, ParticleBehavior};

new_key_type! {
    /// Stable handle for particles backed by a generational slot map.
    pub struct ParticleId;
}

/// Content kind of a particle (0 is reserved for "empty" in render buffers).
pub type KindId = u8;

pub const KIND_EMPTY: KindId = 0;

#[derive(Debug, Clone)]
pub struct Particle {
    pub(crate) kind: KindId,
    /// Mirrors the grid cell holding this particle. Only written by world mutations.
    pub(crate) pos: Point,
    pub(crate) active: bool,
    /// Frame of the last executed behavior chain (frames start at 1).
    pub(crate) last_frame: u64,
    pub(crate) behaviors: Vec<ParticleBehavior>,
    /// Particles sleeping until this one changes. Set semantics, no duplicates.
    pub(crate) dependants: Vec<ParticleId>,
    /// Offsets watched while asleep. Fixed at construction.
    pub(crate) depends_on: Vec<Point>,
    /// Whether the scheduler currently tracks this particle in its active set.
    pub(crate) tracked: bool,
}

impl Particle {
    /// Build a detached particle. Behaviors run in the given order every frame.
    pub fn new(kind: KindId, behaviors: Vec<ParticleBehavior>) -> SimResult<Self> {
        let mut depends_on: Vec<Point> = Vec::new();
        for behavior in &behaviors {
            behavior.validate()?;
            for offset in behavior.watched_offsets() {
                if !depends_on.contains(&offset) {
                    depends_on.push(offset);
                }
            }
        }

        Ok(Self {
            kind,
            pos: Point::ZERO,
            active: true,
            last_frame: 0,
            behaviors,
            dependants: Vec::new(),
            depends_on,
            tracked: false,
        })
    }

    // === Accessors ===
    #[inline]
    pub fn kind(&self) -> KindId { self.kind }

    #[inline]
    pub fn position(&self) -> Point { self.pos }

    #[inline]
    pub fn is_active(&self) -> bool { self.active }

    #[inline]
    pub fn last_frame(&self) -> u64 { self.last_frame }

    pub fn behaviors(&self) -> &[ParticleBehavior] {
        &self.behaviors
    }

    pub fn dependants(&self) -> &[ParticleId] {
        &self.dependants
    }

    pub fn depends_on(&self) -> &[Point] {
        &self.depends_on
    }

    /// Latched stuck flag of the first heap behavior, if the particle has one.
    pub fn heap_stuck(&self) -> Option<bool> {
        self.behaviors.iter().find_map(|b| match b {
            ParticleBehavior::Heap(heap) => Some(heap.stuck),
            _ => None,
        })
    }

    /// Active and not yet processed in `frame`.
    #[inline]
    pub fn updateable(&self, frame: u64) -> bool {
        self.active && self.last_frame < frame
    }

    pub(crate) fn add_dependant(&mut self, id: ParticleId) -> bool {
        if self.dependants.contains(&id) {
            return false;
        }
        self.dependants.push(id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::behaviors::{GravitySpec, HeapSpec};

    #[test]
    fn depends_on_collects_unique_offsets_in_order() {
        let p = Particle::new(
            1,
            vec![
                ParticleBehavior::Gravity(GravitySpec::default()),
                ParticleBehavior::Heap(HeapSpec::new(
                    vec![Point::new(1, 1), Point::new(-1, 1)],
                    0.5,
                    vec![Point::new(0, 1), Point::new(2, 1)],
                )),
            ],
        )
        .unwrap();

        assert_eq!(
            p.depends_on(),
            &[Point::new(0, 1), Point::new(1, 1), Point::new(-1, 1), Point::new(2, 1)]
        );
        assert!(p.is_active());
        assert_eq!(p.last_frame(), 0);
        assert_eq!(p.heap_stuck(), Some(false));
    }

    #[test]
    fn invalid_probability_is_rejected() {
        let err = Particle::new(
            1,
            vec![ParticleBehavior::Gravity(GravitySpec::new(Point::new(0, 1), 1.5))],
        );
        assert!(err.is_err());
    }

    #[test]
    fn zero_vector_is_rejected() {
        let err = Particle::new(
            1,
            vec![ParticleBehavior::Gravity(GravitySpec::new(Point::ZERO, 1.0))],
        );
        assert!(err.is_err());
    }
}
