#![cfg(target_arch = "wasm32")]

use sandpile_engine::{World, KIND_SAND};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn facade_round_trip() {
    sandpile_engine::init();
    let mut world = World::new(32, 16, 8, 0xFF000000).unwrap();
    assert_eq!(world.width(), 32);
    assert_eq!(world.grid_to_pixel(3, 2), vec![24, 16]);
    assert_eq!(world.pixel_to_grid(25, 17), vec![3, 2]);

    assert!(world.add_particle(4, 0, KIND_SAND));
    assert!(!world.add_particle(4, 0, KIND_SAND));
    for _ in 0..20 {
        world.update();
    }
    assert_eq!(world.cell_kind(4, 15), KIND_SAND);
    assert!(world.step_stats().step_ms() >= 0.0);
}

#[wasm_bindgen_test]
fn invalid_inputs_surface_as_js_errors() {
    assert!(World::new(0, 16, 8, 0).is_err());
    assert!(World::from_config_json("{\"width\": -1}").is_err());

    let mut world = World::new(8, 8, 4, 0).unwrap();
    assert!(world.load_content_bundle("not json").is_err());
    assert!(world.get_content_manifest_json().contains("base:sand"));
}
