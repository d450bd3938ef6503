//! Critter kinds and the behavior contract.
//!
//! Behaviors are pure policy: a critter only returns decisions (where to
//! move, how to fight, whether to eat) and never touches world state. The
//! kind set is closed, so dispatch is a tagged enum with exhaustive matches
//! rather than open-ended trait objects.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Unique critter identifier, assigned by the world at creation.
pub type CritterId = u64;

/// A movement decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
    Stay,
}

impl Direction {
    /// The four cardinal directions, in observation/scan order.
    pub const CARDINALS: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Grid offset of one step in this direction. North is negative y.
    #[inline]
    pub fn offset(self) -> (i64, i64) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::Stay => (0, 0),
        }
    }
}

/// A fight choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attack {
    Roar,
    Pounce,
    Scratch,
    Forfeit,
}

/// Closed set of critter variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Grazer,
    Prowler,
    Howler,
    Sloth,
}

impl Kind {
    pub const ALL: [Kind; 4] = [Kind::Grazer, Kind::Prowler, Kind::Howler, Kind::Sloth];

    pub fn name(self) -> &'static str {
        match self {
            Kind::Grazer => "Grazer",
            Kind::Prowler => "Prowler",
            Kind::Howler => "Howler",
            Kind::Sloth => "Sloth",
        }
    }

    /// Single display character. Presentation only: engine-level "same
    /// species" decisions compare the kind tag, never this symbol.
    pub fn symbol(self) -> char {
        match self {
            Kind::Grazer => 'G',
            Kind::Prowler => 'P',
            Kind::Howler => 'H',
            Kind::Sloth => 'S',
        }
    }

    /// Display color as an RGB tuple, opaque to the engine.
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            Kind::Grazer => (139, 90, 43),   // Brown
            Kind::Prowler => (218, 130, 36), // Orange
            Kind::Howler => (178, 44, 44),   // Red
            Kind::Sloth => (120, 120, 120),  // Gray
        }
    }
}

/// What a critter can see around itself when deciding a move: for each
/// cardinal direction, the display symbol of the occupant there, if any.
/// Symbols are opaque identity tokens; full world state stays hidden.
#[derive(Debug, Clone, Copy, Default)]
pub struct Neighbors {
    pub north: Option<char>,
    pub east: Option<char>,
    pub south: Option<char>,
    pub west: Option<char>,
}

impl Neighbors {
    /// The occupant symbol one step in `dir`, if any. `Stay` sees nothing.
    pub fn get(&self, dir: Direction) -> Option<char> {
        match dir {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
            Direction::Stay => None,
        }
    }

    pub fn set(&mut self, dir: Direction, occupant: Option<char>) {
        match dir {
            Direction::North => self.north = occupant,
            Direction::East => self.east = occupant,
            Direction::South => self.south = occupant,
            Direction::West => self.west = occupant,
            Direction::Stay => {}
        }
    }
}

/// Grazer movement cycle, stepped once per decision.
const GRAZE_CYCLE: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

/// A living critter.
///
/// Identity and location are engine-owned; the only state here is the
/// behavior state private to the kind (currently just the move cursor).
#[derive(Debug, Clone)]
pub struct Critter {
    pub id: CritterId,
    pub kind: Kind,
    move_cursor: u32,
}

impl Critter {
    pub fn new(id: CritterId, kind: Kind) -> Self {
        Self {
            id,
            kind,
            move_cursor: 0,
        }
    }

    /// Create offspring of this critter: same kind, fresh behavior state.
    /// Engine-owned state (identity, location) is never copied from the
    /// parent.
    pub fn offspring(&self, id: CritterId) -> Self {
        Self::new(id, self.kind)
    }

    pub fn symbol(&self) -> char {
        self.kind.symbol()
    }

    pub fn color(&self) -> (u8, u8, u8) {
        self.kind.color()
    }

    /// Whether this critter eats food it stands on.
    pub fn wants_to_eat(&self) -> bool {
        match self.kind {
            Kind::Prowler | Kind::Howler => true,
            Kind::Grazer | Kind::Sloth => false,
        }
    }

    /// Decide the next move given the four neighbor observations.
    pub fn decide_move(&mut self, neighbors: &Neighbors, rng: &mut impl Rng) -> Direction {
        match self.kind {
            Kind::Grazer => {
                let dir = GRAZE_CYCLE[self.move_cursor as usize % GRAZE_CYCLE.len()];
                self.move_cursor += 1;
                dir
            }
            Kind::Prowler => Direction::CARDINALS[rng.gen_range(0..Direction::CARDINALS.len())],
            Kind::Howler => {
                // Head for the first neighboring cell holding a stranger;
                // otherwise keep drifting East.
                let own = self.symbol();
                for dir in Direction::CARDINALS {
                    if matches!(neighbors.get(dir), Some(symbol) if symbol != own) {
                        return dir;
                    }
                }
                Direction::East
            }
            Kind::Sloth => Direction::Stay,
        }
    }

    /// Decide a fight choice against the opponent with the given display
    /// symbol. The symbol is advisory; none of the current kinds use it.
    pub fn decide_fight(&self, _opponent: char, rng: &mut impl Rng) -> Attack {
        match self.kind {
            Kind::Grazer => {
                if rng.gen::<bool>() {
                    Attack::Pounce
                } else {
                    Attack::Scratch
                }
            }
            Kind::Prowler => Attack::Scratch,
            Kind::Howler => Attack::Roar,
            Kind::Sloth => Attack::Forfeit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_grazer_cycles_moves() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut grazer = Critter::new(1, Kind::Grazer);
        let empty = Neighbors::default();

        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(grazer.decide_move(&empty, &mut rng));
        }
        assert_eq!(
            seen,
            vec![
                Direction::North,
                Direction::South,
                Direction::East,
                Direction::West,
                Direction::North,
                Direction::South,
            ]
        );
    }

    #[test]
    fn test_grazer_fights_pounce_or_scratch() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let grazer = Critter::new(1, Kind::Grazer);

        for _ in 0..50 {
            let choice = grazer.decide_fight('H', &mut rng);
            assert!(matches!(choice, Attack::Pounce | Attack::Scratch));
        }
    }

    #[test]
    fn test_sloth_is_baseline() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut sloth = Critter::new(2, Kind::Sloth);
        let empty = Neighbors::default();

        assert_eq!(sloth.decide_move(&empty, &mut rng), Direction::Stay);
        assert_eq!(sloth.decide_fight('G', &mut rng), Attack::Forfeit);
        assert!(!sloth.wants_to_eat());
    }

    #[test]
    fn test_howler_heads_for_strangers() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut howler = Critter::new(3, Kind::Howler);

        let mut neighbors = Neighbors::default();
        neighbors.set(Direction::South, Some('G'));
        assert_eq!(howler.decide_move(&neighbors, &mut rng), Direction::South);

        // Same-symbol neighbors are not strangers.
        let mut packed = Neighbors::default();
        packed.set(Direction::North, Some('H'));
        assert_eq!(howler.decide_move(&packed, &mut rng), Direction::East);

        assert_eq!(
            howler.decide_move(&Neighbors::default(), &mut rng),
            Direction::East
        );
    }

    #[test]
    fn test_offspring_resets_behavior_state() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut parent = Critter::new(4, Kind::Grazer);
        let empty = Neighbors::default();

        parent.decide_move(&empty, &mut rng);
        parent.decide_move(&empty, &mut rng);

        let mut child = parent.offspring(9);
        assert_eq!(child.id, 9);
        assert_eq!(child.kind, Kind::Grazer);
        assert_eq!(child.decide_move(&empty, &mut rng), Direction::North);
    }

    #[test]
    fn test_symbols_are_distinct() {
        let mut symbols = std::collections::HashSet::new();
        for kind in Kind::ALL {
            assert!(symbols.insert(kind.symbol()));
        }
    }
}
