use std::sync::Arc;

use slotmap::SlotMap;
use tracing::debug;

use crate::domain::content::ContentRegistry;
use crate::error::SimResult;
use crate::grid::Grid;

use super::perf_stats::StepStats;
use super::settings::SimConfig;
use super::{UpdateQueue, WorldCore};

pub(super) fn create_world_core(config: SimConfig, content: Arc<ContentRegistry>) -> SimResult<WorldCore> {
    let (width, height) = config.validate()?;
    let rng = config.seeded_rng();

    debug!(width, height, seed = ?config.seed, "creating world");

    Ok(WorldCore {
        content,
        grid: Grid::new(width, height),
        particles: SlotMap::with_key(),
        active: Vec::with_capacity(256),
        queue: UpdateQueue::new(),
        frame: 0,
        rng,
        stats: StepStats::default(),
        config,
    })
}
