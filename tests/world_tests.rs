use cgmath::{Point3, Vector3};
use voxel_world::engine_state::voxels::{
    block::{block_type::BlockType, Block},
    terrain::{TerrainGenerator, TerrainSource},
    world::World,
};

const ALLOWANCE: f32 = 0.1;

/// Grass at y = 0 over dirt at y = -1.
fn layered(position: Point3<f32>) -> BlockType {
    if position.y == 0.0 {
        BlockType::GRASS
    } else if position.y == -1.0 {
        BlockType::DIRT
    } else {
        BlockType::AIR
    }
}

/// `layered` plus grass blocks at the given cells.
fn layered_with(cells: Vec<[i32; 3]>) -> impl TerrainSource + 'static {
    move |position: Point3<f32>| {
        let is_extra = cells.iter().any(|[x, y, z]| {
            position.x == *x as f32 && position.y == *y as f32 && position.z == *z as f32
        });
        if is_extra {
            BlockType::GRASS
        } else {
            layered(position)
        }
    }
}

fn point(x: i32, y: i32, z: i32) -> Point3<f32> {
    Point3::new(x as f32, y as f32, z as f32)
}

fn sorted_blocks(world: &World) -> Vec<(i32, i32, i32, BlockType)> {
    let mut blocks: Vec<_> = world
        .blocks()
        .map(|block| {
            let center = block.center();
            (center.x, center.y, center.z, block.block_type())
        })
        .collect();
    blocks.sort_by_key(|&(x, y, z, block_type)| (x, y, z, block_type as u8));
    blocks
}

#[test]
fn starting_world_holds_two_layers_of_twelve_by_twelve() {
    let world = World::new(Box::new(layered), point(0, 0, 0), 2).unwrap();

    assert_eq!(world.loaded_chunks().count(), 27);
    assert_eq!(world.block_count(), 288);
    for block in world.blocks() {
        let center = block.center();
        assert!((-4..8).contains(&center.x));
        assert!((-4..8).contains(&center.z));
        match center.y {
            0 => assert_eq!(block.block_type(), BlockType::GRASS),
            -1 => assert_eq!(block.block_type(), BlockType::DIRT),
            other => panic!("unexpected block layer {other}"),
        }
    }
}

#[test]
fn zero_radius_is_rejected() {
    assert!(World::new(Box::new(layered), point(0, 0, 0), 0).is_err());
}

#[test]
fn movement_is_detected_at_chunk_boundaries() {
    let world = World::new(Box::new(layered), point(0, 0, 0), 2).unwrap();
    let origin_chunk = Point3::new(0, 0, 0);

    assert!(!world.has_moved_chunks(origin_chunk, Point3::new(3.9, 0.0, 3.9)));
    assert!(world.has_moved_chunks(origin_chunk, Point3::new(4.0, 0.0, 0.0)));
    assert!(world.has_moved_chunks(origin_chunk, Point3::new(-1.0, 0.0, 1.0)));
    assert_eq!(world.get_chunk(Point3::new(-1.0, 0.0, 1.0)), Point3::new(-1, 0, 0));
}

#[test]
fn deleting_with_nothing_targeted_changes_nothing() {
    let mut world = World::new(Box::new(layered), point(0, 0, 0), 2).unwrap();

    let removed =
        world.delete_in_direction_of(point(0, 1, 0), Vector3::new(0.0, 1.0, 0.0), ALLOWANCE);

    assert_eq!(removed, BlockType::AIR);
    assert_eq!(world.block_count(), 288);
    assert!(world.player_edits().is_empty());
}

#[test]
fn deleting_removes_the_closest_block_in_view() {
    let mut world = World::new(Box::new(layered), point(0, 0, 0), 2).unwrap();

    let removed = world.delete_in_direction_of(
        point(0, 1, 0),
        Vector3::new(0.707, -0.707, 0.0),
        ALLOWANCE,
    );

    assert_eq!(removed, BlockType::GRASS);
    assert_eq!(world.block_count(), 287);
    assert_eq!(world.get_block_at(point(1, 0, 0)), BlockType::AIR);
    assert_eq!(world.player_edits().len(), 1);
    assert_eq!(world.player_edits().get(&Point3::new(1, 0, 0)), Some(&BlockType::AIR));
    // The dirt further along the same line is untouched.
    assert_eq!(world.get_block_at(point(2, -1, 0)), BlockType::DIRT);
}

#[test]
fn creating_against_the_near_face() {
    let terrain = layered_with(vec![[7, 1, 0]]);
    let mut world = World::new(Box::new(terrain), point(4, 0, 0), 2).unwrap();
    assert_eq!(world.block_count(), 289);
    assert_eq!(
        world.outline_in_direction_of(point(4, 1, 0), Vector3::new(1.0, 0.0, 0.0), ALLOWANCE),
        Some(Point3::new(7, 1, 0))
    );

    let created = world.create_in_direction_of(
        point(4, 1, 0),
        Vector3::new(1.0, 0.0, 0.0),
        BlockType::DIRT,
        ALLOWANCE,
    );

    assert!(created);
    assert_eq!(world.block_count(), 290);
    assert_eq!(world.get_block_at(point(6, 1, 0)), BlockType::DIRT);
    assert_eq!(world.player_edits().get(&Point3::new(6, 1, 0)), Some(&BlockType::DIRT));
}

#[test]
fn creating_against_side_and_top_faces() {
    let terrain = layered_with(vec![[7, 1, 0]]);
    let mut world = World::new(Box::new(terrain), point(4, 0, 0), 2).unwrap();

    assert!(world.create_in_direction_of(
        point(7, 1, 3),
        Vector3::new(0.0, 0.0, -1.0),
        BlockType::STONE,
        ALLOWANCE,
    ));
    assert_eq!(world.get_block_at(point(7, 1, 1)), BlockType::STONE);

    assert!(world.create_in_direction_of(
        point(7, 4, 0),
        Vector3::new(0.0, -1.0, 0.0),
        BlockType::STONE,
        ALLOWANCE,
    ));
    assert_eq!(world.get_block_at(point(7, 2, 0)), BlockType::STONE);
    assert_eq!(world.block_count(), 291);
}

#[test]
fn creating_against_the_bottom_face() {
    let terrain = layered_with(vec![[7, 3, 0]]);
    let mut world = World::new(Box::new(terrain), point(4, 0, 0), 2).unwrap();

    assert!(world.create_in_direction_of(
        Point3::new(7.0, 1.5, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        BlockType::DIRT,
        ALLOWANCE,
    ));
    assert_eq!(world.get_block_at(point(7, 2, 0)), BlockType::DIRT);
}

#[test]
fn creating_past_the_resident_edge_loads_the_chunk() {
    let mut world = World::new(Box::new(layered), point(0, 0, 0), 2).unwrap();
    let outside = Point3::new(2, 0, 0);
    assert!(!world.is_chunk_loaded(outside));

    // (7, 0, 0) is on the +x face of the resident cube; its +x neighbour is not resident.
    let created = world.create_in_direction_of(
        Point3::new(9.5, 0.0, 0.0),
        Vector3::new(-1.0, 0.0, 0.0),
        BlockType::DIRT,
        ALLOWANCE,
    );

    assert!(created);
    assert!(world.is_chunk_loaded(outside));
    assert_eq!(world.get_block_at(point(8, 0, 0)), BlockType::DIRT);
    let placed = world
        .blocks()
        .filter(|block| block.center() == Point3::new(8, 0, 0))
        .count();
    assert_eq!(placed, 1);
    // The new chunk brings its own 4 x 4 grass layer, with dirt in one cell.
    assert_eq!(world.block_count(), 288 + 16);
}

#[test]
fn creating_into_an_occupied_cell_is_refused() {
    let terrain = layered_with(vec![[6, 1, 0], [7, 1, 0]]);
    let mut world = World::new(Box::new(terrain), point(4, 0, 0), 2).unwrap();
    let before = world.block_count();

    // Standing inside (6, 1, 0): the target is (7, 1, 0) and its near face leads back here.
    let created = world.create_in_direction_of(
        point(6, 1, 0),
        Vector3::new(1.0, 0.0, 0.0),
        BlockType::DIRT,
        ALLOWANCE,
    );

    assert!(!created);
    assert_eq!(world.block_count(), before);
    assert!(world.player_edits().is_empty());
}

#[test]
fn air_is_never_placed() {
    let mut world = World::new(Box::new(layered), point(0, 0, 0), 2).unwrap();

    assert!(!world.create_in_direction_of(
        point(3, 3, 0),
        Vector3::new(0.0, -1.0, 0.0),
        BlockType::AIR,
        ALLOWANCE,
    ));
    assert_eq!(world.block_count(), 288);
}

#[test]
fn edits_survive_chunk_churn() {
    let mut world = World::new(Box::new(layered), point(0, 0, 0), 2).unwrap();

    assert!(world.create_in_direction_of(
        point(1, 3, 0),
        Vector3::new(0.0, -1.0, 0.0),
        BlockType::DIRT,
        ALLOWANCE,
    ));
    assert_eq!(
        world.delete_in_direction_of(point(2, 3, 1), Vector3::new(0.0, -1.0, 0.0), ALLOWANCE),
        BlockType::GRASS
    );

    let path: Vec<Point3<i32>> = (0..=4)
        .chain((1..=3).rev())
        .map(|step| Point3::new(step, step, step))
        .collect();
    for pair in path.windows(2) {
        world.move_to_chunk(pair[0], pair[1]);
        if pair[1] == Point3::new(2, 2, 2) && pair[0] == Point3::new(1, 1, 1) {
            assert!(!world.is_chunk_loaded(Point3::new(0, 0, 0)));
            assert_eq!(world.get_block_at(point(1, 1, 0)), BlockType::AIR);
        }
    }

    assert!(world.is_chunk_loaded(Point3::new(0, 0, 0)));
    assert_eq!(world.get_block_at(point(1, 1, 0)), BlockType::DIRT);
    assert_eq!(world.get_block_at(point(2, 0, 1)), BlockType::AIR);
    assert_eq!(world.get_block_at(point(1, 0, 0)), BlockType::GRASS);
}

#[test]
fn same_inputs_give_the_same_world() {
    let first = World::new(Box::new(layered), point(5, 2, -3), 3).unwrap();
    let second = World::new(Box::new(layered), point(5, 2, -3), 3).unwrap();
    assert_eq!(sorted_blocks(&first), sorted_blocks(&second));

    let seeded = |seed| -> World {
        let terrain = TerrainGenerator::new(-4, 6, 2.0, seed).unwrap();
        World::new(Box::new(terrain), point(0, 0, 0), 2).unwrap()
    };
    assert_eq!(sorted_blocks(&seeded(42)), sorted_blocks(&seeded(42)));
}

#[test]
fn every_block_contains_its_own_center() {
    let terrain = TerrainGenerator::new(-4, 6, 2.0, 7).unwrap();
    let world = World::new(Box::new(terrain), point(0, 0, 0), 2).unwrap();

    for block in world.blocks() {
        let center = block.center_f32();
        assert_eq!(world.get_block_at(center), block.block_type());
        assert_eq!(
            world.get_block_at(center + Vector3::new(0.49, -0.49, 0.3)),
            block.block_type()
        );
    }
}

#[test]
fn generated_columns_are_grass_over_dirt() {
    let terrain = TerrainGenerator::new(-4, 6, 2.0, 11).unwrap();
    let height = terrain.generate(3, -2);
    let world = World::new(Box::new(terrain), point(0, 0, 0), 2).unwrap();

    assert_eq!(world.get_block_at(point(3, height, -2)), BlockType::GRASS);
    assert_eq!(world.get_block_at(point(3, height + 1, -2)), BlockType::AIR);
}

#[test]
fn equally_near_targets_resolve_the_same_way() {
    let pair = |position: Point3<f32>| {
        if position.y == 0.0 && position.z == 0.0 && position.x.abs() == 1.0 {
            BlockType::GRASS
        } else {
            BlockType::AIR
        }
    };
    let world = World::new(Box::new(pair), point(0, 0, 0), 2).unwrap();
    let origin = point(0, 3, 0);
    let down = Vector3::new(0.0, -1.0, 0.0);

    let first = world.find_block_in_direction_of(origin, down, 0.5);
    assert_eq!(first, Some(Block::new(BlockType::GRASS, Point3::new(-1, 0, 0))));
    for _ in 0..8 {
        assert_eq!(world.find_block_in_direction_of(origin, down, 0.5), first);
    }
}
