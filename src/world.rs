//! World state and the per-turn simulation engine.

use std::collections::{HashMap, HashSet};

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::battle::{self, Outcome};
use crate::config::Config;
use crate::critter::{Critter, CritterId, Direction, Kind, Neighbors};
use crate::error::WorldError;
use crate::grid::{FoodGrid, OccupancyGrid, Torus};
use crate::shared::snapshot::WorldSnapshot;
use crate::stats::{Scoreboard, StatsHistory};

/// The simulation world.
///
/// Single owner of all grid and bookkeeping state. Critter behaviors only
/// return decisions; every mutation flows through the methods here, driven
/// one synchronous turn at a time by [`World::step`].
pub struct World {
    torus: Torus,
    food: FoodGrid,
    occupancy: OccupancyGrid,

    /// Living critters, keyed by their world-assigned id.
    critters: HashMap<CritterId, Critter>,
    /// Insertion-ordered ids; fixes the per-turn resolution order.
    roster: Vec<CritterId>,
    /// Location per living critter, the inverse of the occupancy grid.
    /// Mutated only together with it.
    locations: HashMap<CritterId, (usize, usize)>,

    /// Turns of sleep left, present only while sleeping.
    sleep_remaining: HashMap<CritterId, u32>,
    /// Turns of gestation left, present only while mating.
    gestate_remaining: HashMap<CritterId, u32>,
    /// Mating critters that will produce offspring at term.
    pregnant: HashSet<CritterId>,
    /// Lifetime meals per living critter.
    eaten_count: HashMap<CritterId, u32>,

    scores: Scoreboard,
    history: StatsHistory,

    turn: u64,
    config: Config,
    next_critter_id: CritterId,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,
}

impl World {
    /// Create a new world with the given configuration.
    pub fn new(config: Config) -> Result<Self, WorldError> {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, seed)
    }

    /// Create a new world with a specific seed for reproducibility.
    ///
    /// Seeds the food map and places the configured initial population at
    /// random open cells.
    pub fn new_with_seed(config: Config, seed: u64) -> Result<Self, WorldError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let torus = Torus::new(config.world.width, config.world.height);

        let mut food = FoodGrid::new(torus);
        food.seed(config.world.food_probability, &mut rng);

        let mut world = Self {
            torus,
            food,
            occupancy: OccupancyGrid::new(torus),
            critters: HashMap::new(),
            roster: Vec::new(),
            locations: HashMap::new(),
            sleep_remaining: HashMap::new(),
            gestate_remaining: HashMap::new(),
            pregnant: HashSet::new(),
            eaten_count: HashMap::new(),
            scores: Scoreboard::new(),
            history: StatsHistory::new(config.logging.stats_interval),
            turn: 0,
            config,
            next_critter_id: 0,
            rng,
            seed,
        };

        for kind in Kind::ALL {
            for _ in 0..world.config.population.count_for(kind) {
                let spot = world.random_open_spot()?;
                world.add_critter(kind, spot)?;
            }
        }

        Ok(world)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn width(&self) -> usize {
        self.torus.width
    }

    pub fn height(&self) -> usize {
        self.torus.height
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    pub fn history(&self) -> &StatsHistory {
        &self.history
    }

    /// Seed used for this world's random source.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of living critters.
    pub fn population(&self) -> usize {
        self.roster.len()
    }

    pub fn is_extinct(&self) -> bool {
        self.roster.is_empty()
    }

    /// Number of cells with no critter.
    pub fn open_count(&self) -> usize {
        self.occupancy.open_count()
    }

    /// Whether there is food at the given (unnormalized) location.
    pub fn food_at(&self, x: i64, y: i64) -> bool {
        self.food.has(x, y)
    }

    /// Food units left in the world.
    pub fn food_remaining(&self) -> usize {
        self.food.remaining()
    }

    /// The critter occupying the given (unnormalized) location, if any.
    pub fn occupant_at(&self, x: i64, y: i64) -> Option<CritterId> {
        self.occupancy.occupant(x, y)
    }

    /// Location of a living critter.
    pub fn location_of(&self, id: CritterId) -> Result<(usize, usize), WorldError> {
        self.locations
            .get(&id)
            .copied()
            .ok_or(WorldError::UnknownCritter(id))
    }

    pub fn is_sleeping(&self, id: CritterId) -> bool {
        self.sleep_remaining.contains_key(&id)
    }

    pub fn is_mating(&self, id: CritterId) -> bool {
        self.gestate_remaining.contains_key(&id)
    }

    pub fn critter(&self, id: CritterId) -> Option<&Critter> {
        self.critters.get(&id)
    }

    /// Living critters with their locations, in insertion order.
    pub fn placements(&self) -> impl Iterator<Item = (&Critter, (usize, usize))> + '_ {
        self.roster.iter().filter_map(move |id| {
            let critter = self.critters.get(id)?;
            let location = self.locations.get(id)?;
            Some((critter, *location))
        })
    }

    /// Read-only view of the world, sufficient to render it.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::from_world(self)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Place a new critter of `kind` at `location`, which must be open.
    ///
    /// Registers occupancy, location, and eaten-count bookkeeping and
    /// counts the critter into its kind's `alive` statistic.
    pub fn add_critter(
        &mut self,
        kind: Kind,
        location: (usize, usize),
    ) -> Result<CritterId, WorldError> {
        let critter = Critter::new(self.next_critter_id, kind);
        let id = critter.id;
        self.register(critter, location)?;
        self.next_critter_id += 1;
        Ok(id)
    }

    /// Pick one open cell uniformly at random and reserve it.
    pub fn random_open_spot(&mut self) -> Result<(usize, usize), WorldError> {
        self.occupancy.reserve_random(&mut self.rng)
    }

    /// Feed the critter the food unit at the given location.
    ///
    /// Returns `true` if the meal pushed the critter into a food coma.
    /// Feeding where no food exists is a contract violation; callers must
    /// check [`World::food_at`] first.
    pub fn consume_food(&mut self, id: CritterId, x: i64, y: i64) -> Result<bool, WorldError> {
        let kind = self
            .critters
            .get(&id)
            .ok_or(WorldError::UnknownCritter(id))?
            .kind;
        self.food.take(x, y)?;

        let eaten = self.eaten_count.entry(id).or_insert(0);
        *eaten += 1;
        self.scores.record_meal(kind);

        if *eaten % self.config.rules.coma_threshold == 0 {
            self.sleep_remaining
                .insert(id, self.config.rules.sleep_duration);
            return Ok(true);
        }
        Ok(false)
    }

    /// Advance every sleeping critter by one rested turn.
    ///
    /// A counter at zero wakes the critter; the sleeper therefore acts
    /// again exactly one turn after its counter reaches zero.
    pub fn tick_sleepers(&mut self) {
        for id in self.roster.clone() {
            match self.sleep_remaining.get(&id).copied() {
                Some(0) => {
                    self.sleep_remaining.remove(&id);
                }
                Some(remaining) => {
                    self.sleep_remaining.insert(id, remaining - 1);
                }
                None => {}
            }
        }
    }

    /// Mark two critters as mating. The first becomes the carrying parent
    /// and will produce the offspring at term.
    pub fn begin_mating(&mut self, mother: CritterId, father: CritterId) -> Result<(), WorldError> {
        for id in [mother, father] {
            if self.gestate_remaining.contains_key(&id) {
                return Err(WorldError::AlreadyMating(id));
            }
        }
        let period = self.config.rules.gestation_period;
        self.gestate_remaining.insert(mother, period);
        self.gestate_remaining.insert(father, period);
        self.pregnant.insert(mother);
        Ok(())
    }

    /// Advance every mating critter by one gestated turn.
    ///
    /// A counter at zero ends the mating; if the critter was the carrying
    /// parent, a newborn of the same kind (fresh behavior state) appears at
    /// a random open cell. Returns the ids of critters born this tick.
    pub fn tick_gestation(&mut self) -> Result<Vec<CritterId>, WorldError> {
        let mut newborns = Vec::new();
        for id in self.roster.clone() {
            match self.gestate_remaining.get(&id).copied() {
                Some(0) => {
                    self.gestate_remaining.remove(&id);
                    if self.pregnant.remove(&id) {
                        let parent = self
                            .critters
                            .get(&id)
                            .ok_or(WorldError::UnknownCritter(id))?;
                        let baby = parent.offspring(self.next_critter_id);
                        let baby_id = baby.id;
                        let spot = self.random_open_spot()?;
                        self.register(baby, spot)?;
                        self.next_critter_id += 1;
                        newborns.push(baby_id);
                    }
                }
                Some(remaining) => {
                    self.gestate_remaining.insert(id, remaining - 1);
                }
                None => {}
            }
        }
        Ok(newborns)
    }

    /// Move a critter to the given (unnormalized) destination, which must
    /// be open. Occupancy grid, location index, and open-spot set update
    /// together for both the vacated and the entered cell.
    pub fn move_critter(&mut self, id: CritterId, x: i64, y: i64) -> Result<(), WorldError> {
        let (from_x, from_y) = self.location_of(id)?;
        let (to_x, to_y) = self.torus.normalize(x, y);
        if self.occupancy.occupant(to_x as i64, to_y as i64).is_some() {
            return Err(WorldError::InvalidPlacement { x: to_x, y: to_y });
        }
        self.occupancy.vacate(from_x, from_y);
        self.occupancy.place(id, to_x, to_y)?;
        self.locations.insert(id, (to_x, to_y));
        Ok(())
    }

    /// Free a critter's cell and drop its location record.
    ///
    /// The rest of its bookkeeping stays until [`World::bury_critter`];
    /// the turn engine clears fallen critters from the grid immediately so
    /// nothing else can interact with them mid-turn.
    pub fn remove_critter(&mut self, id: CritterId) -> Result<(), WorldError> {
        let (x, y) = self
            .locations
            .remove(&id)
            .ok_or(WorldError::UnknownCritter(id))?;
        self.occupancy.vacate(x, y);
        Ok(())
    }

    /// Remove all traces of a critter from the world in one step.
    ///
    /// Purges every per-critter map and decrements the kind's `alive`
    /// count. Earned `wins`/`eaten` statistics persist.
    pub fn bury_critter(&mut self, id: CritterId) -> Result<(), WorldError> {
        let critter = self
            .critters
            .remove(&id)
            .ok_or(WorldError::UnknownCritter(id))?;

        if let Some((x, y)) = self.locations.remove(&id) {
            self.occupancy.vacate(x, y);
        }
        self.roster.retain(|&other| other != id);
        self.sleep_remaining.remove(&id);
        self.gestate_remaining.remove(&id);
        self.pregnant.remove(&id);
        self.eaten_count.remove(&id);
        self.scores.record_death(critter.kind);
        Ok(())
    }

    fn register(&mut self, critter: Critter, location: (usize, usize)) -> Result<(), WorldError> {
        let id = critter.id;
        self.occupancy.place(id, location.0, location.1)?;
        self.locations.insert(id, location);
        self.eaten_count.insert(id, 0);
        self.scores.record_birth(critter.kind);
        self.roster.push(id);
        self.critters.insert(id, critter);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Turn engine
    // ------------------------------------------------------------------

    /// Advance the simulation by exactly one turn.
    ///
    /// Order: rest, gestate (newborns do not act this turn), then each
    /// living critter in insertion order eats or moves, with collisions
    /// resolved as battles (different kind) or mating (same kind). The
    /// fallen are buried after every critter has been processed.
    ///
    /// An error here is a contract violation in engine bookkeeping, not a
    /// runtime condition; the driver decides whether to halt.
    pub fn step(&mut self) -> Result<(), WorldError> {
        self.tick_sleepers();

        // Snapshot before the gestation tick: critters born this turn are
        // excluded from acting.
        let acting = self.roster.clone();
        self.tick_gestation()?;

        let mut fallen: HashSet<CritterId> = HashSet::new();
        let mut fall_order: Vec<CritterId> = Vec::new();

        for id in acting {
            if fallen.contains(&id) {
                continue;
            }
            if self.is_sleeping(id) || self.is_mating(id) {
                continue;
            }

            let (x, y) = self.location_of(id)?;

            // Feeding comes before movement; a fresh food coma ends the
            // critter's turn on the spot.
            if self.food_at(x as i64, y as i64) && self.wants_to_eat(id) {
                let fell_asleep = self.consume_food(id, x as i64, y as i64)?;
                if fell_asleep {
                    continue;
                }
            }

            let neighbors = self.observe_neighbors(x, y);
            let direction = {
                let critter = self
                    .critters
                    .get_mut(&id)
                    .ok_or(WorldError::UnknownCritter(id))?;
                critter.decide_move(&neighbors, &mut self.rng)
            };
            if direction == Direction::Stay {
                continue;
            }

            let (dx, dy) = direction.offset();
            let (dest_x, dest_y) = self.torus.normalize(x as i64 + dx, y as i64 + dy);

            match self.occupant_at(dest_x as i64, dest_y as i64) {
                None => {
                    self.move_critter(id, dest_x as i64, dest_y as i64)?;
                }
                Some(other) => {
                    let kind = self.kind_of(id)?;
                    let other_kind = self.kind_of(other)?;
                    if kind != other_kind {
                        let loser = self.fight(id, other)?;
                        // The fallen leave the grid immediately so nothing
                        // else can interact with them this turn; the winner
                        // holds its cell instead of advancing.
                        self.remove_critter(loser)?;
                        fallen.insert(loser);
                        fall_order.push(loser);
                    } else if !self.is_mating(other) && !self.is_sleeping(other) {
                        // The mover becomes the carrying parent. Neither
                        // partner moves this turn.
                        self.begin_mating(id, other)?;
                    }
                }
            }
        }

        for id in fall_order {
            self.bury_critter(id)?;
        }

        self.turn += 1;
        if self.turn % self.history.interval == 0 {
            self.history.record(self.turn, self.scores.clone());
        }
        Ok(())
    }

    /// Run the simulation for the given number of turns.
    pub fn run(&mut self, turns: u64) -> Result<(), WorldError> {
        for _ in 0..turns {
            self.step()?;
        }
        Ok(())
    }

    fn wants_to_eat(&self, id: CritterId) -> bool {
        self.critters.get(&id).is_some_and(|c| c.wants_to_eat())
    }

    fn kind_of(&self, id: CritterId) -> Result<Kind, WorldError> {
        self.critters
            .get(&id)
            .map(|c| c.kind)
            .ok_or(WorldError::UnknownCritter(id))
    }

    fn observe_neighbors(&self, x: usize, y: usize) -> Neighbors {
        let mut neighbors = Neighbors::default();
        for dir in Direction::CARDINALS {
            let (dx, dy) = dir.offset();
            let symbol = self
                .occupant_at(x as i64 + dx, y as i64 + dy)
                .and_then(|id| self.critters.get(&id))
                .map(|c| c.symbol());
            neighbors.set(dir, symbol);
        }
        neighbors
    }

    /// Resolve a collision battle, credit the winner's kind, and return
    /// the loser. A sleeping defender loses without a fight choice.
    fn fight(&mut self, attacker: CritterId, defender: CritterId) -> Result<CritterId, WorldError> {
        let (winner, loser) = if self.is_sleeping(defender) {
            (attacker, defender)
        } else {
            let attacker_critter = self
                .critters
                .get(&attacker)
                .ok_or(WorldError::UnknownCritter(attacker))?;
            let defender_critter = self
                .critters
                .get(&defender)
                .ok_or(WorldError::UnknownCritter(defender))?;

            let attack = attacker_critter.decide_fight(defender_critter.symbol(), &mut self.rng);
            let defense = defender_critter.decide_fight(attacker_critter.symbol(), &mut self.rng);

            match battle::resolve(attack, defense, &mut self.rng) {
                Outcome::AttackerWins => (attacker, defender),
                Outcome::DefenderWins => (defender, attacker),
            }
        };

        let winner_kind = self.kind_of(winner)?;
        self.scores.record_win(winner_kind);
        Ok(loser)
    }
}
