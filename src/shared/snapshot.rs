//! Snapshot structures for front-end communication.
//!
//! These are lightweight copies of simulation state, built once per turn
//! for the presentation layer to render without touching the world.

use crate::critter::{CritterId, Kind};
use crate::world::World;

/// Lightweight view of one critter for rendering.
#[derive(Clone, Debug)]
pub struct CritterView {
    pub id: CritterId,
    pub x: usize,
    pub y: usize,
    pub kind: Kind,
    pub symbol: char,
    pub color: (u8, u8, u8),
    pub sleeping: bool,
    pub mating: bool,
}

/// Per-kind score line for a stats panel.
#[derive(Clone, Copy, Debug)]
pub struct KindScore {
    pub kind: Kind,
    pub name: &'static str,
    pub alive: usize,
    pub wins: usize,
    pub eaten: usize,
    /// Derived score: alive + wins + eaten.
    pub total: usize,
}

/// Complete world snapshot for rendering.
#[derive(Clone, Debug)]
pub struct WorldSnapshot {
    /// Current turn number
    pub turn: u64,
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Row-major food flags (`y * width + x`)
    pub food: Vec<bool>,
    /// All living critters
    pub critters: Vec<CritterView>,
    /// Per-kind score lines, in `Kind::ALL` order
    pub scores: Vec<KindScore>,
}

impl WorldSnapshot {
    /// Create a snapshot from the current world state.
    pub fn from_world(world: &World) -> Self {
        let width = world.width();
        let height = world.height();

        let mut food = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                food.push(world.food_at(x as i64, y as i64));
            }
        }

        let critters = world
            .placements()
            .map(|(critter, (x, y))| CritterView {
                id: critter.id,
                x,
                y,
                kind: critter.kind,
                symbol: critter.symbol(),
                color: critter.color(),
                sleeping: world.is_sleeping(critter.id),
                mating: world.is_mating(critter.id),
            })
            .collect();

        let scores = Kind::ALL
            .iter()
            .map(|&kind| {
                let stats = world.scores().get(kind);
                KindScore {
                    kind,
                    name: kind.name(),
                    alive: stats.alive,
                    wins: stats.wins,
                    eaten: stats.eaten,
                    total: stats.total(),
                }
            })
            .collect();

        Self {
            turn: world.turn(),
            width,
            height,
            food,
            critters,
            scores,
        }
    }

    /// Food flag at a (normalized) cell.
    pub fn food_at(&self, x: usize, y: usize) -> bool {
        self.food[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_snapshot_reflects_world() {
        let mut config = Config::default();
        config.world.width = 8;
        config.world.height = 6;
        config.world.food_probability = 0.0;
        config.population.grazers = 3;
        config.population.prowlers = 0;
        config.population.howlers = 0;
        config.population.sloths = 1;

        let world = World::new_with_seed(config, 11).unwrap();
        let snapshot = world.snapshot();

        assert_eq!(snapshot.turn, 0);
        assert_eq!(snapshot.width, 8);
        assert_eq!(snapshot.height, 6);
        assert_eq!(snapshot.food.len(), 48);
        assert_eq!(snapshot.critters.len(), 4);
        assert!(snapshot.food.iter().all(|&f| !f));

        let grazer_score = snapshot
            .scores
            .iter()
            .find(|s| s.kind == Kind::Grazer)
            .unwrap();
        assert_eq!(grazer_score.alive, 3);
        assert_eq!(grazer_score.total, 3);

        for view in &snapshot.critters {
            assert_eq!(world.occupant_at(view.x as i64, view.y as i64), Some(view.id));
            assert!(!view.sleeping);
            assert!(!view.mating);
        }
    }
}
