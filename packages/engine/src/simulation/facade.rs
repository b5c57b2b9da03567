use wasm_bindgen::prelude::*;

use crate::domain::particle::KIND_EMPTY;
use crate::domain::point::Point;
use crate::error::{SimError, SimResult};

use super::perf_stats::StepStats;
use super::settings::SimConfig;
use super::WorldCore;

fn to_js(err: SimError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// JS-facing handle. Input and rendering code live on the JS side; this only forwards to the
/// core and flattens points into plain numbers.
#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    /// Create a world of `width` x `height` cells, each `cell_size` pixels square.
    #[wasm_bindgen(constructor)]
    pub fn new(width: i32, height: i32, cell_size: i32, background: u32) -> Result<World, JsValue> {
        let config = SimConfig::new(width, height)
            .with_cell_size(cell_size, cell_size)
            .with_background(background);
        Self::from_config(config).map_err(to_js)
    }

    #[wasm_bindgen(js_name = newWithSeed)]
    pub fn new_with_seed(width: i32, height: i32, cell_size: i32, background: u32, seed: u64) -> Result<World, JsValue> {
        let config = SimConfig::new(width, height)
            .with_cell_size(cell_size, cell_size)
            .with_background(background)
            .with_seed(seed);
        Self::from_config(config).map_err(to_js)
    }

    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: &str) -> Result<World, JsValue> {
        SimConfig::from_json(json)
            .and_then(Self::from_config)
            .map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.core.particle_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn active_count(&self) -> u32 { self.core.active_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn background(&self) -> u32 { self.core.background() }

    pub fn reseed(&mut self, seed: u64) {
        self.core.reseed(seed);
    }

    /// Add a particle of a content kind
    pub fn add_particle(&mut self, x: i32, y: i32, kind: u8) -> bool {
        self.core.spawn(kind, Point::new(x, y)).is_some()
    }

    /// Add particles in radius (brush)
    pub fn add_particles_in_radius(&mut self, cx: i32, cy: i32, radius: i32, kind: u8) -> u32 {
        self.core.add_particles_in_radius(Point::new(cx, cy), radius, kind) as u32
    }

    pub fn remove_particle(&mut self, x: i32, y: i32) -> bool {
        self.core.remove_particle(Point::new(x, y))
    }

    pub fn remove_particles_in_radius(&mut self, cx: i32, cy: i32, radius: i32) -> u32 {
        self.core.remove_particles_in_radius(Point::new(cx, cy), radius) as u32
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.core.in_bounds(Point::new(x, y))
    }

    /// Kind id at a cell; 0 when empty or out of bounds.
    pub fn cell_kind(&self, x: i32, y: i32) -> u8 {
        match self.core.get_cell(Point::new(x, y)) {
            (true, Some(id)) => self.core.particle(id).map_or(KIND_EMPTY, |p| p.kind()),
            _ => KIND_EMPTY,
        }
    }

    /// `[px, py]` of the cell's top-left corner.
    pub fn grid_to_pixel(&self, x: i32, y: i32) -> Vec<i32> {
        let p = self.core.grid_to_pixel(Point::new(x, y));
        vec![p.x, p.y]
    }

    /// `[x, y]` of the cell under a pixel.
    pub fn pixel_to_grid(&self, px: i32, py: i32) -> Vec<i32> {
        let p = self.core.pixel_to_grid(Point::new(px, py));
        vec![p.x, p.y]
    }

    /// Step the simulation forward one frame
    pub fn update(&mut self) {
        self.core.update();
    }

    /// Get last step stats snapshot
    pub fn step_stats(&self) -> StepStats {
        self.core.step_stats().clone()
    }

    pub fn load_content_bundle(&mut self, json: &str) -> Result<(), JsValue> {
        self.core.load_content_bundle_json(json).map_err(to_js)
    }

    pub fn get_content_manifest_json(&self) -> String {
        self.core.content().manifest_json()
    }

    /// One kind id per cell, row-major (for JS rendering)
    pub fn kind_buffer(&self) -> Vec<u8> {
        self.core.kind_buffer()
    }

    /// Color for a kind id (ABGR), falling back to the background
    pub fn kind_color(&self, kind: u8) -> u32 {
        self.core
            .content()
            .color(kind)
            .unwrap_or_else(|| self.core.background())
    }
}

impl World {
    /// Native constructor. Errors stay typed; only the wasm entry points turn them into `JsValue`.
    pub fn from_config(config: SimConfig) -> SimResult<World> {
        let core = WorldCore::new(config)?;
        Ok(Self { core })
    }

    pub fn core(&self) -> &WorldCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut WorldCore {
        &mut self.core
    }
}
