//! Optotype test generation.

use rand::seq::SliceRandom;
use rand::Rng;

/// Symbols the optotype test draws from.
pub const OPTOTYPES: [&str; 7] = ["E", "F", "P", "T", "O", "Z", "L"];

/// Draw `count` distinct optotypes in random order.
///
/// `count` is clamped to the size of the alphabet.
pub fn draw_optotypes<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<String> {
    OPTOTYPES
        .choose_multiple(rng, count.min(OPTOTYPES.len()))
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_draw_is_distinct_and_from_alphabet() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let drawn = draw_optotypes(&mut rng, 5);
            assert_eq!(drawn.len(), 5);
            let unique: HashSet<&String> = drawn.iter().collect();
            assert_eq!(unique.len(), 5);
            assert!(drawn.iter().all(|s| OPTOTYPES.contains(&s.as_str())));
        }
    }

    #[test]
    fn test_draw_clamps_to_alphabet() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(draw_optotypes(&mut rng, 20).len(), OPTOTYPES.len());
        assert!(draw_optotypes(&mut rng, 0).is_empty());
    }
}
