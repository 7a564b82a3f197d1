use rand::Rng;
use rand::RngCore;

/// Uniform random source used for food and power-up placement.
///
/// Anything implementing [`rand::RngCore`] works out of the box, so a
/// `StdRng::seed_from_u64(..)` gives fully reproducible games.
pub trait RandomSource {
    /// Uniform index in `0..bound`. `bound` is never zero.
    fn index(&mut self, bound: usize) -> usize;

    /// Returns true with the given probability in `[0, 1]`
    fn chance(&mut self, probability: f64) -> bool;
}

impl<R: RngCore> RandomSource for R {
    fn index(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.gen_bool(probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);

        let xs: Vec<usize> = (0..32).map(|_| a.index(20)).collect();
        let ys: Vec<usize> = (0..32).map(|_| b.index(20)).collect();

        assert_eq!(xs, ys);
        assert!(xs.iter().all(|&x| x < 20));
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!((0..100).all(|_| rng.chance(1.0)));
        assert!((0..100).all(|_| !rng.chance(0.0)));
    }
}
