//! Gravity - fall one cell along a fixed vector
//!
//! Out of bounds is a wall: the particle has nothing to watch there and stops asking to be
//! revisited. An occupied destination gets one chance to clear itself via `step_toward`.

use serde::{Deserialize, Serialize};

use crate::domain::point::Point;
use crate::error::SimResult;

use super::common::{check_offsets, check_probability, step_toward};
use super::{Behavior, BehaviorOutcome, UpdateContext};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravitySpec {
    pub vec: Point,
    pub prob: f64,
}

impl GravitySpec {
    pub fn new(vec: Point, prob: f64) -> Self {
        Self { vec, prob }
    }
}

impl Default for GravitySpec {
    fn default() -> Self {
        Self {
            vec: Point::new(0, 1),
            prob: 1.0,
        }
    }
}

impl Behavior for GravitySpec {
    fn apply(&mut self, ctx: &mut UpdateContext) -> BehaviorOutcome {
        let dest = ctx.pos() + self.vec;
        step_toward(ctx, dest, self.prob)
    }

    fn watched_offsets(&self) -> Vec<Point> {
        vec![self.vec]
    }

    fn validate(&self) -> SimResult<()> {
        check_offsets("gravity", std::slice::from_ref(&self.vec))?;
        check_probability("gravity", self.prob)
    }
}
