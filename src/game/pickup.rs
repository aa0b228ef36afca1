//! Item pickup and full-clearance regeneration.

use rand::Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::game::World;

/// What happened during one pickup pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PickupReport {
    /// Items collected this pass.
    pub picked: usize,
    /// The last item was taken and a fresh maze replaced the old one.
    pub regenerated: bool,
}

/// Collects every live item strictly inside the pickup radius of the player.
///
/// When the collected count reaches the total, the world is regenerated: new grid, new items,
/// counter back to zero and the player re-homed to the new start cell.
pub fn update<R: Rng + ?Sized>(world: &mut World, config: &GameConfig, rng: &mut R) -> PickupReport {
    let player = world.player.position;
    let mut report = PickupReport::default();

    for item in world.items.iter_mut().filter(|item| !item.collected) {
        if player.distance(&item.position) < config.pickup_radius {
            item.collected = true;
            report.picked += 1;
            debug!(row = item.cell.row, col = item.cell.col, "item collected");
        }
    }
    world.collected += report.picked;

    if report.picked > 0 && world.total > 0 && world.collected >= world.total {
        info!(
            total = world.total,
            cleared = world.mazes_cleared + 1,
            "all items collected, generating a new maze"
        );
        world.regenerate(config, rng);
        report.regenerated = true;
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::items::Item;
    use crate::maze::Cell;
    use crate::math::Vec3;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn world_with_items(offsets: &[f32]) -> (World, GameConfig, StdRng) {
        let config = GameConfig::with_maze(9, offsets.len());
        let mut rng = StdRng::seed_from_u64(17);
        let mut world = World::generate(&config, &mut rng);
        let p = world.player.position;
        world.items = offsets
            .iter()
            .map(|&dx| {
                let at = Vec3::new(p.x + dx, p.y, p.z);
                Item::new(Cell::new(1, 1), at, 0.0, 0.0)
            })
            .collect();
        world.total = world.items.len();
        world.collected = 0;
        (world, config, rng)
    }

    /// Only items strictly inside the radius are taken.
    #[test]
    fn test_pickup_radius_is_strict() {
        let (mut world, config, mut rng) = world_with_items(&[1.49, 1.51, 1.5]);
        let report = update(&mut world, &config, &mut rng);
        assert_eq!(report.picked, 1);
        assert!(!report.regenerated);
        assert_eq!(world.collected, 1);
        assert!(world.items[0].collected);
        assert!(!world.items[1].collected);
        assert!(!world.items[2].collected);
    }

    /// Collected items are not counted twice.
    #[test]
    fn test_collected_items_stay_collected() {
        let (mut world, config, mut rng) = world_with_items(&[0.0, 5.0]);
        update(&mut world, &config, &mut rng);
        let report = update(&mut world, &config, &mut rng);
        assert_eq!(report.picked, 0);
        assert_eq!(world.collected, 1);
    }

    /// Taking the last item swaps in a fresh maze and resets the counter.
    #[test]
    fn test_last_item_regenerates() {
        let (mut world, config, mut rng) = world_with_items(&[0.5]);
        let old_grid = world.grid.clone();
        world.player.position.x += 0.1;

        let report = update(&mut world, &config, &mut rng);

        assert_eq!(report.picked, 1);
        assert!(report.regenerated);
        assert_eq!(world.collected, 0);
        assert_eq!(world.mazes_cleared, 1);
        assert_eq!(world.total, world.items.len());
        assert!(world.items.iter().all(|i| !i.collected));
        assert_eq!(world.grid.size(), old_grid.size());
        assert_eq!(
            world.grid.reachable_from(world.grid.start()).len(),
            world.grid.open_count()
        );
        assert_eq!(
            world.player.position,
            world
                .grid
                .cell_center(world.grid.start(), config.cell_size, config.ground_height)
        );
    }

    /// An empty world never regenerates.
    #[test]
    fn test_no_items_no_regeneration() {
        let (mut world, config, mut rng) = world_with_items(&[]);
        let report = update(&mut world, &config, &mut rng);
        assert_eq!(report, PickupReport::default());
        assert_eq!(world.mazes_cleared, 0);
    }
}
