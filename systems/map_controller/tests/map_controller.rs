use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    },
};

use cellmaze_core::{CellCode, GridCoord, MapError, PathKind, PathSpec};
use cellmaze_grid::query;
use cellmaze_system_cell_builder::{BuilderTable, CellBuilder, Overlap, OverlapCallback};
use cellmaze_system_map_controller::{GeneratedMap, MapConfig, MapController};
use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn fingerprint(controller: &MapController, map: &GeneratedMap) -> u64 {
    let mut hasher = DefaultHasher::new();
    query::codes(controller.grid()).hash(&mut hasher);
    controller.grid().origins().hash(&mut hasher);
    map.report.transforms.hash(&mut hasher);
    map.spawn.x.to_bits().hash(&mut hasher);
    map.spawn.y.to_bits().hash(&mut hasher);
    hasher.finish()
}

fn cell_containing(controller: &MapController, point: Vec2) -> GridCoord {
    let dimensions = controller.dimensions();
    let width = dimensions.cell_width();
    GridCoord::new(
        ((point.x + dimensions.horizontal_offset()) / width).round() as i32,
        ((point.y + dimensions.vertical_offset()) / width).round() as i32,
    )
}

#[test]
fn wide_direct_map_spawns_inside_the_viewport() {
    let config = MapConfig {
        viewport_half_width: 8.0,
        viewport_half_height: 7.0,
        min_grid_size: 64,
        border_size: 2,
        ..MapConfig::default()
    };
    let schedule = |_: u32, _: u32| -> Result<PathSpec, MapError> {
        Ok(PathSpec::from_indices(PathKind::Direct, 0.5, 0, 2))
    };
    let mut controller =
        MapController::new(&config, schedule, ChaCha8Rng::seed_from_u64(0)).expect("valid config");

    let map = controller.generate(0, 0).expect("path fits");

    assert!(map.spawn.x.abs() < 8.0 && map.spawn.y.abs() < 7.0);
    assert!(query::connects(
        controller.grid(),
        &map.report.start_region(),
        &map.report.end_region()
    ));

    let spawn_cell = cell_containing(&controller, map.spawn);
    assert!(map.report.start_region().contains(spawn_cell));
    assert!(controller
        .grid()
        .get(spawn_cell)
        .map_or(false, CellCode::is_walkable));
}

#[test]
fn spawn_is_the_centre_of_the_start_chunk() {
    let mut controller =
        MapController::seeded(&MapConfig::default(), 5).expect("defaults are valid");
    let map = controller.generate(1, 1).expect("direct path fits");

    let first = controller
        .grid()
        .position_of(map.report.start)
        .expect("in bounds");
    let last = controller
        .grid()
        .position_of(map.report.start.translated(
            map.report.path_width - 1,
            map.report.path_width - 1,
        ))
        .expect("in bounds");

    assert!((map.spawn - (first + last) / 2.0).length() < 1e-4);
}

#[test]
fn default_configuration_carves_backtracks_at_both_widths() {
    for stage in 0..2 {
        let mut controller =
            MapController::seeded(&MapConfig::default(), 0xdead_beef + u64::from(stage))
                .expect("defaults are valid");

        let map = controller.generate(2, stage).expect("backtrack fits");

        assert_eq!(map.report.carved, PathKind::Backtrack);
        assert!(!map.report.fell_back());
        assert!(query::connects(
            controller.grid(),
            &map.report.start_region(),
            &map.report.end_region()
        ));
    }
}

#[test]
fn same_seed_replays_the_same_map() {
    let config = MapConfig::default();
    let random_anchors = |_: u32, _: u32| -> Result<PathSpec, MapError> {
        Ok(PathSpec::from_indices(PathKind::Direct, 0.12, -1, -1))
    };

    let mut first =
        MapController::new(&config, random_anchors, ChaCha8Rng::seed_from_u64(99)).expect("valid");
    let mut second =
        MapController::new(&config, random_anchors, ChaCha8Rng::seed_from_u64(99)).expect("valid");

    for stage in 0..4 {
        let left = first.generate(0, stage).expect("path fits");
        let right = second.generate(0, stage).expect("path fits");

        assert_eq!(left.report.start_anchor, right.report.start_anchor);
        assert_eq!(left.report.end_anchor, right.report.end_anchor);
        assert_eq!(fingerprint(&first, &left), fingerprint(&second, &right));
    }
}

#[test]
fn configured_seed_is_honoured() {
    let config = MapConfig {
        seed: Some(31),
        ..MapConfig::default()
    };

    let mut configured = MapController::from_config(&config).expect("valid");
    let mut seeded = MapController::seeded(&config, 31).expect("valid");

    let left = configured.generate(2, 0).expect("backtrack fits");
    let right = seeded.generate(2, 0).expect("backtrack fits");
    assert_eq!(fingerprint(&configured, &left), fingerprint(&seeded, &right));
}

#[test]
fn swapped_builder_table_is_used_for_the_next_map() {
    let finishes = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&finishes);
    let next_stage: OverlapCallback = Arc::new(move |_: &Overlap| {
        let _ = counter.fetch_add(1, Ordering::SeqCst);
        true
    });

    let mut controller =
        MapController::seeded(&MapConfig::default(), 8).expect("defaults are valid");
    controller.set_builder_table(BuilderTable::new(
        CellBuilder::decoration("Dirt"),
        CellBuilder::solid("Corn", None),
        CellBuilder::solid("Corn", None),
        CellBuilder::trigger("FinishCellLarge", Some(next_stage)),
    ));

    let map = controller.generate(1, 0).expect("direct path fits");

    let finish_cells: Vec<_> = map
        .entities
        .iter()
        .filter(|entity| entity.code == CellCode::Trigger)
        .collect();
    let width = usize::try_from(map.report.path_width).expect("positive width");
    assert_eq!(finish_cells.len(), width * width);
    assert!(finish_cells
        .iter()
        .all(|entity| entity.texture == "FinishCellLarge"));

    let entered = finish_cells[0].on_overlap_enter(&Overlap::new(0.0, map.spawn));
    assert_eq!(entered, Some(true));
    assert_eq!(finishes.load(Ordering::SeqCst), 1);

    assert!(map
        .entities
        .iter()
        .filter(|entity| entity.code == CellCode::Path)
        .all(|entity| entity.texture == "Dirt"));
}

#[test]
fn repeated_generation_starts_from_a_blank_grid() {
    let mut controller =
        MapController::seeded(&MapConfig::default(), 21).expect("defaults are valid");

    let _ = controller.generate(0, 0).expect("direct path fits");
    let map = controller.generate(1, 1).expect("direct path fits");

    assert_eq!(controller.grid().origins().first(), Some(&map.report.start));
    assert_eq!(
        query::count_code(controller.grid(), CellCode::Trigger),
        usize::try_from(map.report.path_width * map.report.path_width).expect("positive area")
    );
}
