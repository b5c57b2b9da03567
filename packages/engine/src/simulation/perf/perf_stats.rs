use wasm_bindgen::prelude::*;

/// Counters for the last `update()`.
///
/// `stale_skips` counts update calls that hit the once-per-frame guard; they are harmless
/// but a growing number points at runaway recursive resolution.
#[wasm_bindgen]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepStats {
    pub(super) frame: u64,
    pub(super) queued: u32,
    pub(super) processed: u32,
    pub(super) moved: u32,
    pub(super) blocked: u32,
    pub(super) stale_skips: u32,
    pub(super) recursive_resolutions: u32,
    pub(super) dependants_registered: u32,
    pub(super) woken: u32,
    pub(super) step_ms: f64,
}

#[wasm_bindgen]
impl StepStats {
    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.frame }
    /// Particles in the work queue when the frame started.
    #[wasm_bindgen(getter)]
    pub fn queued(&self) -> u32 { self.queued }
    /// Behavior chains executed (scheduler turns plus recursive resolutions).
    #[wasm_bindgen(getter)]
    pub fn processed(&self) -> u32 { self.processed }
    #[wasm_bindgen(getter)]
    pub fn moved(&self) -> u32 { self.moved }
    #[wasm_bindgen(getter)]
    pub fn blocked(&self) -> u32 { self.blocked }
    #[wasm_bindgen(getter)]
    pub fn stale_skips(&self) -> u32 { self.stale_skips }
    #[wasm_bindgen(getter)]
    pub fn recursive_resolutions(&self) -> u32 { self.recursive_resolutions }
    #[wasm_bindgen(getter)]
    pub fn dependants_registered(&self) -> u32 { self.dependants_registered }
    /// Sleeping particles woken by particles that stayed active this frame.
    /// Wakes caused by `remove_particle` or `activate_particle` between frames are not counted.
    #[wasm_bindgen(getter)]
    pub fn woken(&self) -> u32 { self.woken }
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
}

impl StepStats {
    pub(crate) fn reset(&mut self, frame: u64) {
        *self = StepStats {
            frame,
            ..StepStats::default()
        };
    }
}

#[derive(Clone, Copy)]
pub(crate) struct StepTimer {
    #[cfg(target_arch = "wasm32")]
    start_ms: f64,
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

impl StepTimer {
    pub(crate) fn start() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            StepTimer { start_ms: js_sys::Date::now() }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            StepTimer { start: std::time::Instant::now() }
        }
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            js_sys::Date::now() - self.start_ms
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.start.elapsed().as_secs_f64() * 1000.0
        }
    }
}
