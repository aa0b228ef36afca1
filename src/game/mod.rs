//! Simulation core.
//!
//! This module defines the [`World`] aggregate and the [`GameLoop`] that advances it one visual
//! frame at a time. Each frame runs in a fixed order:
//!
//! 1. Apply look input to the player's yaw and pitch
//! 2. [`PlayerState::step`] movement, jumping and gravity
//! 3. [`pickup::update`] item collection and regeneration on full clearance
//! 4. [`items::animate`] spin and bob
//! 5. Build a [`Scene`] and hand it to the [`SceneSink`]
//!
//! Nothing in here touches the window or the GPU. The loop is single-threaded and every stage
//! completes within the frame.

pub mod collision;
pub mod input;
pub mod items;
pub mod pickup;
pub mod player;
pub mod scene;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use self::collision::CollisionOracle;
use self::input::InputIntent;
use self::items::Item;
use self::pickup::PickupReport;
use self::player::PlayerState;
use self::scene::{Scene, SceneSink};
use crate::benchmarks::{BenchmarkConfig, Profiler};
use crate::config::GameConfig;
use crate::maze::{Grid, generator};

/// The whole mutable game state.
#[derive(Debug, Clone)]
pub struct World {
    pub grid: Grid,
    pub items: Vec<Item>,
    pub player: PlayerState,
    /// Items collected in the current maze.
    pub collected: usize,
    /// Items placed in the current maze.
    pub total: usize,
    /// Mazes fully cleared this session.
    pub mazes_cleared: u32,
}

impl World {
    /// Generates a maze, scatters items and spawns the player at the start cell.
    pub fn generate<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let grid = generator::generate(config.maze_size, rng);
        let items = items::place(&grid, config.item_count, config, rng);
        let player = PlayerState::spawn(&grid, config);
        Self {
            total: items.len(),
            grid,
            items,
            player,
            collected: 0,
            mazes_cleared: 0,
        }
    }

    /// Replaces grid and items with fresh ones and re-homes the player.
    ///
    /// Look direction and the cleared-maze tally carry over.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, config: &GameConfig, rng: &mut R) {
        self.grid = generator::generate(config.maze_size, rng);
        self.items = items::place(&self.grid, config.item_count, config, rng);
        self.total = self.items.len();
        self.collected = 0;
        self.mazes_cleared += 1;
        self.player.rehome(&self.grid, config);
    }
}

/// Whether the loop should keep going after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// Owns the world and drives it frame by frame.
pub struct GameLoop {
    world: World,
    config: GameConfig,
    rng: StdRng,
    elapsed: f32,
    started: bool,
    last_pickup: PickupReport,
    profiler: Profiler,
}

impl GameLoop {
    /// Creates a loop with a freshly generated world.
    ///
    /// Seeded from `config.seed` when present, otherwise from OS entropy.
    pub fn new(config: GameConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let world = World::generate(&config, &mut rng);
        info!(
            size = config.maze_size,
            items = world.total,
            seed = ?config.seed,
            "world ready"
        );
        Self::with_world(config, world, rng)
    }

    /// Creates a loop around an existing world.
    pub fn with_world(config: GameConfig, world: World, rng: StdRng) -> Self {
        Self {
            world,
            config,
            rng,
            elapsed: 0.0,
            started: false,
            last_pickup: PickupReport::default(),
            profiler: Profiler::new(BenchmarkConfig::default()),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Leaves the start gate; later frames simulate the player.
    pub fn start(&mut self) {
        if !self.started {
            info!("game started");
            self.started = true;
        }
    }

    /// Pickup result of the most recent frame.
    pub fn last_pickup(&self) -> PickupReport {
        self.last_pickup
    }

    /// Runs one frame and hands the result to `sink`.
    ///
    /// Until the game has started, the player is frozen and a jump press only opens the gate.
    /// A quit request still completes this frame, render included, before reporting
    /// [`FrameOutcome::Quit`].
    ///
    /// # Arguments
    /// * `input` - Intent decoded for this frame
    /// * `dt` - Seconds since the previous frame, clamped to `config.max_frame_dt`
    /// * `sink` - Receives the finished [`Scene`]
    ///
    /// # Errors
    /// Whatever the sink reports; the world has already been advanced.
    pub fn frame<S: SceneSink + ?Sized>(
        &mut self,
        input: &InputIntent,
        dt: f32,
        sink: &mut S,
    ) -> Result<FrameOutcome, S::Error> {
        let dt = dt.clamp(0.0, self.config.max_frame_dt);
        self.elapsed += dt;
        self.last_pickup = PickupReport::default();

        if !self.started {
            if input.jump {
                self.start();
            }
        } else {
            self.profiler.start_section("physics");
            self.world
                .player
                .apply_look(input.look_delta, self.config.mouse_sensitivity);
            let oracle = CollisionOracle::new(&self.world.grid, &self.config);
            self.world.player.step(&oracle, input, &self.config, dt);
            self.profiler.end_section("physics");

            self.profiler.start_section("pickup");
            self.last_pickup = pickup::update(&mut self.world, &self.config, &mut self.rng);
            self.profiler.end_section("pickup");
        }

        self.profiler.start_section("animation");
        items::animate(&mut self.world.items, self.elapsed, dt);
        self.profiler.end_section("animation");

        self.profiler.start_section("render");
        let scene = Scene::from_world(
            &self.world,
            self.config.cell_size,
            self.elapsed,
            self.started,
        );
        let submitted = sink.submit(&scene);
        self.profiler.end_section("render");
        submitted?;

        if input.quit {
            Ok(FrameOutcome::Quit)
        } else {
            Ok(FrameOutcome::Continue)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Cell;
    use crate::math::Vec3;
    use std::convert::Infallible;

    /// Keeps every submitted scene.
    #[derive(Default)]
    struct RecordingSink {
        scenes: Vec<Scene>,
    }

    impl SceneSink for RecordingSink {
        type Error = Infallible;

        fn submit(&mut self, scene: &Scene) -> Result<(), Self::Error> {
            self.scenes.push(scene.clone());
            Ok(())
        }
    }

    struct FailingSink;

    impl SceneSink for FailingSink {
        type Error = &'static str;

        fn submit(&mut self, _scene: &Scene) -> Result<(), Self::Error> {
            Err("surface gone")
        }
    }

    const DT: f32 = 1.0 / 60.0;

    fn seeded(size: usize, items: usize, seed: u64) -> GameLoop {
        let config = GameConfig {
            seed: Some(seed),
            ..GameConfig::with_maze(size, items)
        };
        GameLoop::new(config)
    }

    fn press(forward: f32) -> InputIntent {
        InputIntent {
            forward,
            ..InputIntent::idle()
        }
    }

    /// The player does not move until jump opens the gate, but frames still render.
    #[test]
    fn test_start_gate() {
        let mut game = seeded(9, 3, 1);
        let mut sink = RecordingSink::default();
        let spawn = game.world().player.position;

        game.frame(&press(1.0), DT, &mut sink).unwrap();
        assert_eq!(game.world().player.position, spawn);
        assert!(!sink.scenes[0].started);

        let jump = InputIntent {
            jump: true,
            ..InputIntent::idle()
        };
        game.frame(&jump, DT, &mut sink).unwrap();
        assert!(game.is_started());
        // The opening press does not also jump.
        assert!(game.world().player.grounded);
        assert_eq!(sink.scenes.len(), 2);
        assert!(sink.scenes[1].started);
    }

    /// Quit is honoured only after the frame has been rendered.
    #[test]
    fn test_quit_completes_frame() {
        let mut game = seeded(9, 3, 2);
        let mut sink = RecordingSink::default();
        let quit = InputIntent {
            quit: true,
            ..InputIntent::idle()
        };
        let idle = InputIntent::idle();
        assert_eq!(game.frame(&idle, DT, &mut sink), Ok(FrameOutcome::Continue));
        assert_eq!(game.frame(&quit, DT, &mut sink), Ok(FrameOutcome::Quit));
        assert_eq!(sink.scenes.len(), 2);
    }

    #[test]
    fn test_sink_error_propagates() {
        let mut game = seeded(9, 3, 3);
        let outcome = game.frame(&InputIntent::idle(), DT, &mut FailingSink);
        assert_eq!(outcome, Err("surface gone"));
    }

    /// Long stalls are clamped so one frame cannot carry the player across a cell.
    #[test]
    fn test_large_dt_is_clamped() {
        let mut game = seeded(9, 0, 4);
        game.start();
        let mut sink = RecordingSink::default();
        game.world_mut().player.yaw = 180.0;
        let start = game.world().player.position;
        game.frame(&press(1.0), 5.0, &mut sink).unwrap();
        let moved = game.world().player.position.distance(&start);
        assert!(moved <= game.config().move_speed * game.config().max_frame_dt + 1e-4);
        assert_eq!(sink.scenes[0].elapsed, game.config().max_frame_dt);
    }

    /// Look delta turns the player before it moves.
    #[test]
    fn test_look_applies_before_movement() {
        let mut game = seeded(9, 0, 5);
        game.start();
        let mut sink = RecordingSink::default();
        let look = InputIntent {
            look_delta: [900.0, 0.0],
            ..InputIntent::idle()
        };
        game.frame(&look, DT, &mut sink).unwrap();
        assert!((game.world().player.yaw - 90.0).abs() < 1e-3);
        assert_eq!(sink.scenes[0].player_yaw, game.world().player.yaw);
    }

    /// The scene mirrors the world: every wall, every live item, and the camera.
    #[test]
    fn test_scene_reflects_world() {
        // Left at the start gate so no item is picked up behind our back.
        let mut game = seeded(11, 5, 6);
        let mut sink = RecordingSink::default();
        game.world_mut().items[0].collected = true;
        game.world_mut().collected = 1;
        game.frame(&InputIntent::idle(), DT, &mut sink).unwrap();

        let world = game.world();
        let scene = &sink.scenes[0];
        let walls = world.grid.size() * world.grid.size() - world.grid.open_count();
        assert_eq!(scene.walls.len(), walls);
        assert_eq!(scene.items.len(), world.total - 1);
        assert_eq!(scene.camera, world.player.camera());
        assert_eq!(scene.collected, 1);
        assert_eq!(scene.total, world.total);
    }

    /// Seeded 5×5 run: walk onto the only item, collect it, and get a fresh valid maze.
    #[test]
    fn test_smallest_maze_end_to_end() {
        let config = GameConfig {
            seed: Some(42),
            ..GameConfig::with_maze(5, 1)
        };
        let mut rng = StdRng::seed_from_u64(42);
        let mut world = World::generate(&config, &mut rng);

        let reachable = world.grid.reachable_from(world.grid.start());
        for room in [(1, 1), (1, 3), (3, 1), (3, 3)] {
            assert!(reachable.contains(&Cell::new(room.0, room.1)));
        }

        // One item in the far room.
        let far = Cell::new(3, 3);
        let at = world.grid.cell_center(far, config.cell_size, config.item_height);
        world.items = vec![Item::new(far, at, 0.0, 0.0)];
        world.total = 1;
        let first_grid = world.grid.clone();

        let mut game = GameLoop::with_world(config.clone(), world, rng);
        game.start();
        let mut sink = RecordingSink::default();

        // Step onto the item cell.
        game.world_mut().player.position = Vec3::new(at.x, config.ground_height, at.z);
        game.frame(&InputIntent::idle(), DT, &mut sink).unwrap();

        let report = game.last_pickup();
        assert_eq!(report.picked, 1);
        assert!(report.regenerated);

        let world = game.world();
        assert_eq!(world.collected, 0);
        assert_eq!(world.mazes_cleared, 1);
        assert_eq!(world.grid.size(), 5);
        assert_eq!(
            world.grid.reachable_from(world.grid.start()).len(),
            world.grid.open_count()
        );
        assert_eq!(world.grid.open_count(), first_grid.open_count());
        assert_eq!(world.total, 1);
        assert_eq!(sink.scenes[0].collected, 0);
    }

    /// Walking a real path through the maze collects an item placed along it.
    #[test]
    fn test_walk_collects_item() {
        let mut game = seeded(9, 0, 7);
        game.start();
        let config = game.config().clone();

        // Find an open neighbour of the start and put an item there plus one far away.
        let world = game.world_mut();
        let start = world.grid.start();
        let next = world
            .grid
            .open_neighbors(start)
            .find(|c| c.col > 0)
            .unwrap();
        let near = world.grid.cell_center(next, config.cell_size, config.item_height);
        let away = world.grid.cell_center(
            Cell::new(world.grid.size() - 2, world.grid.size() - 2),
            config.cell_size,
            config.item_height,
        );
        world.items = vec![
            Item::new(next, near, 0.0, 0.0),
            Item::new(Cell::new(7, 7), away, 0.0, 0.0),
        ];
        world.total = 2;

        // Face the neighbour: +X is yaw 90, +Z is yaw 180.
        world.player.yaw = if next.col > start.col { 90.0 } else { 180.0 };

        let mut sink = RecordingSink::default();
        for _ in 0..60 {
            game.frame(&press(1.0), DT, &mut sink).unwrap();
            if game.world().collected == 1 {
                break;
            }
        }
        assert_eq!(game.world().collected, 1);
        assert!(game.world().items[0].collected);
        assert!(!game.world().items[1].collected);
        assert_eq!(game.world().mazes_cleared, 0);
    }
}
