//! Sub-pixel sample placement for supersampling.

use lumen_math::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How sample positions are distributed inside a pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuperSamplePattern {
    /// Centered sqrt(N) x sqrt(N) lattice, no jitter
    #[default]
    Grid,
    /// N independent uniform positions
    Random,
    /// One jittered position per cell of a sqrt(N) x sqrt(N) lattice
    Stratified,
}

/// Side length of the sample lattice for `samples_per_pixel`.
pub fn grid_size(samples_per_pixel: u32) -> u32 {
    ((samples_per_pixel as f64).sqrt().floor() as u32).max(1)
}

/// Sample offsets within the unit pixel square, each in `[0, 1)^2`.
///
/// Grid and stratified patterns produce `grid_size(spp)^2` samples; random
/// produces `spp` (at least one).
pub fn sample_offsets<R: Rng + ?Sized>(
    pattern: SuperSamplePattern,
    samples_per_pixel: u32,
    rng: &mut R,
) -> Vec<Vec2> {
    match pattern {
        SuperSamplePattern::Grid => lattice(samples_per_pixel, |_| Vec2::splat(0.5)),
        SuperSamplePattern::Random => (0..samples_per_pixel.max(1))
            .map(|_| Vec2::new(rng.gen::<f32>(), rng.gen::<f32>()))
            .collect(),
        SuperSamplePattern::Stratified => lattice(samples_per_pixel, |_| {
            Vec2::new(rng.gen::<f32>(), rng.gen::<f32>())
        }),
    }
}

/// Place one sample per lattice cell at `(cell + offset(cell)) / n`.
fn lattice(samples_per_pixel: u32, mut offset: impl FnMut(Vec2) -> Vec2) -> Vec<Vec2> {
    let n = grid_size(samples_per_pixel);

    let mut samples = Vec::with_capacity((n * n) as usize);
    for row in 0..n {
        for col in 0..n {
            let corner = Vec2::new(col as f32, row as f32);
            samples.push((corner + offset(corner)) / n as f32);
        }
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_grid_size() {
        assert_eq!(grid_size(0), 1);
        assert_eq!(grid_size(1), 1);
        assert_eq!(grid_size(4), 2);
        assert_eq!(grid_size(8), 2);
        assert_eq!(grid_size(64), 8);
    }

    #[test]
    fn test_single_grid_sample_is_center() {
        let mut rng = StdRng::seed_from_u64(1);
        let samples = sample_offsets(SuperSamplePattern::Grid, 1, &mut rng);
        assert_eq!(samples, vec![Vec2::splat(0.5)]);
    }

    #[test]
    fn test_grid_is_centered_lattice() {
        let mut rng = StdRng::seed_from_u64(1);
        let samples = sample_offsets(SuperSamplePattern::Grid, 4, &mut rng);
        assert_eq!(
            samples,
            vec![
                Vec2::new(0.25, 0.25),
                Vec2::new(0.75, 0.25),
                Vec2::new(0.25, 0.75),
                Vec2::new(0.75, 0.75),
            ]
        );
    }

    #[test]
    fn test_stratified_one_sample_per_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples = sample_offsets(SuperSamplePattern::Stratified, 9, &mut rng);
        assert_eq!(samples.len(), 9);

        for (i, s) in samples.iter().enumerate() {
            let col = (i % 3) as f32;
            let row = (i / 3) as f32;
            assert!(s.x >= col / 3.0 && s.x < (col + 1.0) / 3.0);
            assert!(s.y >= row / 3.0 && s.y < (row + 1.0) / 3.0);
        }
    }

    #[test]
    fn test_random_count_and_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let samples = sample_offsets(SuperSamplePattern::Random, 5, &mut rng);
        assert_eq!(samples.len(), 5);
        assert!(samples.iter().all(|s| s.cmpge(Vec2::ZERO).all() && s.cmplt(Vec2::ONE).all()));
    }

    #[test]
    fn test_seeded_patterns_repeat() {
        let a = sample_offsets(SuperSamplePattern::Stratified, 16, &mut StdRng::seed_from_u64(11));
        let b = sample_offsets(SuperSamplePattern::Stratified, 16, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }
}
