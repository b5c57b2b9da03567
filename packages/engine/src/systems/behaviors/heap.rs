//! Heap - lateral/diagonal settling once falling is no longer possible
//!
//! Two sources of movement, checked in this order:
//! 1. `limits`: if the limit cell is empty the pile is unstable there, so the particle slides
//!    one step toward it regardless of friction or the stuck latch.
//! 2. `vecs`: free spreading, gated by `prob`. One failed roll latches `stuck` until the
//!    particle moves again.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::domain::point::Point;
use crate::error::SimResult;

use super::common::{check_offsets, check_probability, step_toward};
use super::{Behavior, BehaviorOutcome, UpdateContext};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeapSpec {
    pub vecs: Vec<Point>,
    #[serde(default = "default_heap_prob")]
    pub prob: f64,
    #[serde(default)]
    pub limits: Vec<Point>,
    #[serde(skip)]
    pub stuck: bool,
}

fn default_heap_prob() -> f64 {
    1.0
}

impl HeapSpec {
    pub fn new(vecs: Vec<Point>, prob: f64, limits: Vec<Point>) -> Self {
        Self {
            vecs,
            prob,
            limits,
            stuck: false,
        }
    }

    fn outcome(blocked: bool) -> BehaviorOutcome {
        if blocked {
            BehaviorOutcome::Blocked
        } else {
            BehaviorOutcome::NoOp
        }
    }
}

impl Behavior for HeapSpec {
    fn apply(&mut self, ctx: &mut UpdateContext) -> BehaviorOutcome {
        let mut blocked = false;

        // 1. Forced slides
        let mut limits = self.limits.clone();
        limits.shuffle(ctx.rng());
        for limit in limits {
            if !ctx.is_empty(ctx.pos() + limit) {
                continue;
            }
            let dest = ctx.pos() + limit.normalized();
            match step_toward(ctx, dest, 1.0) {
                BehaviorOutcome::Moved => {
                    self.stuck = false;
                    return BehaviorOutcome::Moved;
                }
                BehaviorOutcome::Blocked => blocked = true,
                BehaviorOutcome::NoOp => {}
            }
        }

        if self.stuck {
            return Self::outcome(blocked);
        }

        // 2. Free spreading
        let mut vecs = self.vecs.clone();
        vecs.shuffle(ctx.rng());
        for v in vecs {
            let dest = ctx.pos() + v;
            if !ctx.is_empty(dest) {
                continue;
            }
            if ctx.roll(self.prob) {
                ctx.move_to(dest);
                self.stuck = false;
                return BehaviorOutcome::Moved;
            }
            self.stuck = true;
            break;
        }

        Self::outcome(blocked)
    }

    fn watched_offsets(&self) -> Vec<Point> {
        self.vecs.iter().chain(self.limits.iter()).copied().collect()
    }

    fn validate(&self) -> SimResult<()> {
        check_offsets("heap", &self.vecs)?;
        check_offsets("heap limit", &self.limits)?;
        check_probability("heap", self.prob)
    }

    /// A relocation by any behavior releases the friction latch.
    fn on_moved(&mut self) {
        self.stuck = false;
    }
}
