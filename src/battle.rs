//! Battle resolution between two colliding critters.

use rand::Rng;

use crate::critter::Attack;

/// Which side of a battle won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    AttackerWins,
    DefenderWins,
}

/// Resolve a battle given both sides' fight choices.
///
/// Equal choices flip a coin. Forfeit loses to anything else. Otherwise a
/// fixed cyclic table applies: Roar beats Scratch, Scratch beats Pounce,
/// Pounce beats Roar. Any pairing the attacker's choice does not dominate
/// goes to the defender.
///
/// A sleeping defender never gets this far: the turn engine hands it an
/// automatic loss without asking for a fight choice.
pub fn resolve(attacker: Attack, defender: Attack, rng: &mut impl Rng) -> Outcome {
    if attacker == defender {
        return if rng.gen::<bool>() {
            Outcome::AttackerWins
        } else {
            Outcome::DefenderWins
        };
    }

    match (attacker, defender) {
        (_, Attack::Forfeit)
        | (Attack::Roar, Attack::Scratch)
        | (Attack::Scratch, Attack::Pounce)
        | (Attack::Pounce, Attack::Roar) => Outcome::AttackerWins,
        _ => Outcome::DefenderWins,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(99)
    }

    #[test]
    fn test_dominance_table() {
        let mut rng = rng();
        assert_eq!(
            resolve(Attack::Roar, Attack::Scratch, &mut rng),
            Outcome::AttackerWins
        );
        assert_eq!(
            resolve(Attack::Scratch, Attack::Pounce, &mut rng),
            Outcome::AttackerWins
        );
        assert_eq!(
            resolve(Attack::Pounce, Attack::Roar, &mut rng),
            Outcome::AttackerWins
        );

        // The cycle runs the other way for the defender.
        assert_eq!(
            resolve(Attack::Scratch, Attack::Roar, &mut rng),
            Outcome::DefenderWins
        );
        assert_eq!(
            resolve(Attack::Pounce, Attack::Scratch, &mut rng),
            Outcome::DefenderWins
        );
        assert_eq!(
            resolve(Attack::Roar, Attack::Pounce, &mut rng),
            Outcome::DefenderWins
        );
    }

    #[test]
    fn test_forfeit_always_loses() {
        let mut rng = rng();
        for choice in [Attack::Roar, Attack::Pounce, Attack::Scratch] {
            assert_eq!(
                resolve(choice, Attack::Forfeit, &mut rng),
                Outcome::AttackerWins
            );
            assert_eq!(
                resolve(Attack::Forfeit, choice, &mut rng),
                Outcome::DefenderWins
            );
        }
    }

    #[test]
    fn test_equal_choices_flip_a_coin() {
        let mut rng = rng();
        let mut attacker_wins = 0;
        let mut defender_wins = 0;

        for _ in 0..200 {
            match resolve(Attack::Roar, Attack::Roar, &mut rng) {
                Outcome::AttackerWins => attacker_wins += 1,
                Outcome::DefenderWins => defender_wins += 1,
            }
        }

        assert!(attacker_wins > 0);
        assert!(defender_wins > 0);
    }
}
