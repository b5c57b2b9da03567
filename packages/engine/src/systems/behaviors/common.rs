use crate::domain::point::Point;
use crate::error::{SimError, SimResult};

use super::{BehaviorOutcome, UpdateContext};

/// One step toward `dest` with bounded blocker resolution.
///
/// Attempt 1 looks at the destination; if an updateable particle sits there it gets its
/// turn right now. Attempt 2 re-checks exactly once. The blocker's frame stamp is set by its
/// own update, so a chain of blockers can resolve within one frame but never loops.
pub(super) fn step_toward(ctx: &mut UpdateContext, dest: Point, prob: f64) -> BehaviorOutcome {
    for attempt in 0..2 {
        let (in_bounds, occupant) = ctx.cell(dest);
        if !in_bounds {
            return BehaviorOutcome::NoOp;
        }

        match occupant {
            None => {
                if !ctx.roll(prob) {
                    return BehaviorOutcome::NoOp;
                }
                ctx.move_to(dest);
                return BehaviorOutcome::Moved;
            }
            Some(blocker) => {
                if attempt == 0 && ctx.is_updateable(blocker) {
                    ctx.resolve_blocker(blocker);
                } else if attempt == 1 && ctx.is_active(blocker) {
                    return BehaviorOutcome::Blocked;
                }
            }
        }
    }
    BehaviorOutcome::NoOp
}

pub(super) fn check_probability(what: &str, prob: f64) -> SimResult<()> {
    if !(0.0..=1.0).contains(&prob) {
        return Err(SimError::InvalidBehavior(format!(
            "{what} probability {prob} must be within [0, 1]"
        )));
    }
    Ok(())
}

/// Largest offset component a behavior may declare. Keeps `pos + offset` inside `i32` for
/// every in-bounds `pos`.
pub(super) const MAX_OFFSET: i32 = i16::MAX as i32;

pub(super) fn check_offsets(what: &str, offsets: &[Point]) -> SimResult<()> {
    if offsets.iter().any(|o| o.is_zero()) {
        return Err(SimError::InvalidBehavior(format!("{what} offsets must be non-zero")));
    }
    if let Some(o) = offsets
        .iter()
        .find(|o| o.x.unsigned_abs() > MAX_OFFSET as u32 || o.y.unsigned_abs() > MAX_OFFSET as u32)
    {
        return Err(SimError::InvalidBehavior(format!(
            "{what} offset ({}, {}) exceeds {MAX_OFFSET} cells",
            o.x, o.y
        )));
    }
    Ok(())
}
