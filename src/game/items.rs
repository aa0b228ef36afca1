//! Collectible items: placement on open cells and their cosmetic animation.

use rand::Rng;
use tracing::{debug, warn};

use crate::config::{GameConfig, constants};
use crate::maze::{Cell, Grid};
use crate::math::Vec3;

/// A collectible floating above an open cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Cell the item was placed on.
    pub cell: Cell,
    /// Resting position at the cell centre.
    pub base: Vec3,
    /// Current animated position. Pickup distance is measured against this.
    pub position: Vec3,
    /// Spin about the vertical axis in degrees.
    pub spin: f32,
    /// Bob phase offset in radians.
    pub phase: f32,
    pub collected: bool,
}

impl Item {
    pub fn new(cell: Cell, base: Vec3, spin: f32, phase: f32) -> Self {
        Self {
            cell,
            base,
            position: base,
            spin,
            phase,
            collected: false,
        }
    }
}

/// Scatters up to `count` items over open cells of `grid`.
///
/// Each item samples uniformly random cells until it hits an open one, giving up after
/// `config.placement_retries` attempts. Items that give up are skipped, so the result may be
/// shorter than `count` on a sparse maze. Several items may share a cell.
///
/// # Arguments
/// * `grid` - Maze to place items on
/// * `count` - Number of items requested
/// * `config` - Cell size, item height and retry bound
/// * `rng` - Random source for cells and initial animation phase
pub fn place<R: Rng + ?Sized>(
    grid: &Grid,
    count: usize,
    config: &GameConfig,
    rng: &mut R,
) -> Vec<Item> {
    let size = grid.size();
    let mut items = Vec::with_capacity(count);

    for _ in 0..count {
        let found = (0..config.placement_retries)
            .map(|_| Cell::new(rng.gen_range(0..size), rng.gen_range(0..size)))
            .find(|&cell| grid.is_open(cell));

        if let Some(cell) = found {
            let base = grid.cell_center(cell, config.cell_size, config.item_height);
            let spin = rng.gen_range(0.0..360.0);
            let phase = rng.gen_range(0.0..std::f32::consts::TAU);
            items.push(Item::new(cell, base, spin, phase));
        }
    }

    if items.len() < count {
        warn!(
            placed = items.len(),
            requested = count,
            "ran out of placement attempts"
        );
    } else {
        debug!(placed = items.len(), "items placed");
    }
    items
}

/// Advances spin and bob for every live item.
///
/// # Arguments
/// * `items` - Items to animate; collected ones are left alone
/// * `elapsed` - Seconds since the session started, drives the bob
/// * `dt` - Frame time, drives the spin
pub fn animate(items: &mut [Item], elapsed: f32, dt: f32) {
    for item in items.iter_mut().filter(|item| !item.collected) {
        item.spin = (item.spin + constants::SPIN_RATE * dt) % 360.0;
        let bob =
            (elapsed * constants::BOB_FREQUENCY + item.phase).sin() * constants::BOB_AMPLITUDE;
        item.position = Vec3::new(item.base.x, item.base.y + bob, item.base.z);
    }
}
