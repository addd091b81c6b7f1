//! Population operators over genomes.
//!
//! These are the building blocks the planner combines into a generation:
//!
//! - **Initialization**: [`random`] draws every gene uniformly from `[0, 1)`
//! - **Greedy seeding**: [`smart_seed`] repeats a cheap greedy move across the horizon
//! - **Mutation**: [`mutate`] / [`mutated`] resample genes with a given probability
//! - **Warm start**: [`shift`] / [`shift_and_mutate`] advance last turn's plan by one move
//!
//! All operators take the random source explicitly, so a seeded generator
//! reproduces their output exactly.

use rand::Rng;

use crate::{
    candidates::{Candidates, first_max_by, first_min_by},
    genome::{Genome, selector_gene},
};

/// Offset added to seeded selector genes so they never sit on a bucket boundary.
pub const SEED_EPSILON: f32 = 1e-7;

/// Creates a genome of `len` uniformly random genes.
pub fn random<R>(rng: &mut R, len: usize) -> Genome
where
    R: Rng + ?Sized,
{
    Genome::from_genes((0..len).map(|_| rng.random::<f32>()).collect())
}

/// Creates a genome that repeats one greedy move across the whole horizon.
///
/// The move sends from the source with the most ships to the target with the
/// fewest ships. Every gene pair encodes that move, then the last third of the
/// flat gene array (from index `2 * len / 3`, regardless of pair alignment) is
/// overwritten with fresh random genes to keep some diversity.
pub fn smart_seed<R>(rng: &mut R, candidates: &Candidates<'_>, horizon: usize) -> Genome
where
    R: Rng + ?Sized,
{
    let sources = candidates.sources();
    let targets = candidates.targets();
    let source = first_max_by(0..sources.len(), |&i| sources[i].ships).unwrap_or(0);
    let target = first_min_by(0..targets.len(), |&i| targets[i].ships).unwrap_or(0);

    let source_gene = selector_gene(source, sources.len(), SEED_EPSILON);
    let target_gene = selector_gene(target, targets.len(), SEED_EPSILON);

    let len = horizon * 2;
    let mut genes = Vec::with_capacity(len);
    for _ in 0..horizon {
        genes.push(source_gene);
        genes.push(target_gene);
    }
    for gene in &mut genes[len * 2 / 3..] {
        *gene = rng.random();
    }
    Genome::from_genes(genes)
}

/// Resamples each gene in place with probability `rate`.
///
/// Rates at or below 0 (and NaN) leave the genome untouched; rates at or above
/// 1 resample every gene.
pub fn mutate<R>(genome: &mut Genome, rate: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for gene in genome.genes_mut() {
        if rng.random::<f64>() < rate {
            *gene = rng.random();
        }
    }
}

/// Returns a mutated copy of `genome`, leaving the original untouched.
pub fn mutated<R>(genome: &Genome, rate: f64, rng: &mut R) -> Genome
where
    R: Rng + ?Sized,
{
    let mut child = genome.clone();
    mutate(&mut child, rate, rng);
    child
}

/// Advances a plan by one move.
///
/// Every gene moves two positions towards the front, dropping the pair for the
/// move that was just played, and two fresh random genes fill the end.
pub fn shift<R>(previous: &Genome, rng: &mut R) -> Genome
where
    R: Rng + ?Sized,
{
    let genes = previous.genes();
    let kept = genes.len().saturating_sub(2);
    let mut shifted = Vec::with_capacity(genes.len());
    shifted.extend_from_slice(&genes[genes.len() - kept..]);
    while shifted.len() < genes.len() {
        shifted.push(rng.random());
    }
    Genome::from_genes(shifted)
}

/// Shift-buffer warm start: [`shift`] followed by [`mutate`] over the whole result.
pub fn shift_and_mutate<R>(previous: &Genome, rate: f64, rng: &mut R) -> Genome
where
    R: Rng + ?Sized,
{
    let mut shifted = shift(previous, rng);
    mutate(&mut shifted, rate, rng);
    shifted
}

#[cfg(test)]
mod tests {
    use planetwars_engine::{GameState, Planet, Player, Vec2};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;

    fn board() -> GameState {
        GameState::new(vec![
            Planet::new(0, Player::Player1, 12.0, 1.0, Vec2::default()),
            Planet::new(1, Player::Player1, 40.0, 1.0, Vec2::default()),
            Planet::new(2, Player::Player1, 40.0, 1.0, Vec2::default()),
            Planet::new(3, Player::Player2, 30.0, 1.0, Vec2::default()),
            Planet::new(4, Player::Neutral, 3.0, 1.0, Vec2::default()),
        ])
    }

    #[test]
    fn test_random_genes_in_unit_range() {
        let mut rng = Pcg32::seed_from_u64(1);
        let genome = random(&mut rng, 200);
        assert_eq!(genome.len(), 200);
        assert!(genome.genes().iter().all(|g| (0.0..1.0).contains(g)));
    }

    #[test]
    fn test_smart_seed_repeats_greedy_move() {
        let mut rng = Pcg32::seed_from_u64(2);
        let state = board();
        let candidates = Candidates::for_player(&state, Player::Player1).unwrap();
        let horizon = 6;
        let genome = smart_seed(&mut rng, &candidates, horizon);
        assert_eq!(genome.len(), 12);

        // first maximum among sources (#1), minimum target (#4, second in list)
        let seeded = &genome.genes()[..12 * 2 / 3];
        for pair in seeded.chunks_exact(2) {
            let decoded = Genome::from_genes(pair.to_vec()).decode(&candidates).unwrap();
            assert_eq!((decoded.0.id, decoded.1.id), (1, 4));
        }
    }

    #[test]
    fn test_smart_seed_random_tail_is_unaligned() {
        let mut rng = Pcg32::seed_from_u64(3);
        let state = board();
        let candidates = Candidates::for_player(&state, Player::Player1).unwrap();
        // 2 * 5 = 10 genes, tail starts at 6; genes 0..6 are seeded
        let genome = smart_seed(&mut rng, &candidates, 5);
        let source_gene = genome.genes()[0];
        assert!(genome.genes()[..6].iter().step_by(2).all(|&g| g == source_gene));
        let tail = &genome.genes()[6..];
        assert!(tail.iter().any(|&g| g != source_gene && g != genome.genes()[1]));
    }

    #[test]
    fn test_mutate_rate_extremes() {
        let mut rng = Pcg32::seed_from_u64(4);
        let original = Genome::from_genes(vec![2.0; 50]);
        assert_eq!(mutated(&original, 0.0, &mut rng), original);
        let all = mutated(&original, 1.0, &mut rng);
        assert!(all.genes().iter().all(|g| (0.0..1.0).contains(g)));
    }

    #[test]
    fn test_mutate_out_of_range_rates() {
        let mut rng = Pcg32::seed_from_u64(8);
        let original = Genome::from_genes(vec![2.0; 20]);
        assert_eq!(mutated(&original, f64::NAN, &mut rng), original);
        assert_eq!(mutated(&original, -0.5, &mut rng), original);
        let all = mutated(&original, 1.5, &mut rng);
        assert!(all.genes().iter().all(|g| (0.0..1.0).contains(g)));
    }

    #[test]
    fn test_shift_preserves_prefix() {
        let mut rng = Pcg32::seed_from_u64(5);
        let previous = Genome::from_genes((0..10u8).map(|i| f32::from(i) / 10.0).collect());
        let shifted = shift(&previous, &mut rng);
        assert_eq!(shifted.len(), previous.len());
        assert_eq!(&shifted.genes()[..8], &previous.genes()[2..]);
        assert!(shifted.genes()[8..].iter().all(|g| (0.0..1.0).contains(g)));
    }

    #[test]
    fn test_shift_single_pair_is_fresh() {
        let mut rng = Pcg32::seed_from_u64(6);
        let previous = Genome::from_genes(vec![5.0, 5.0]);
        let shifted = shift(&previous, &mut rng);
        assert_eq!(shifted.len(), 2);
        assert!(shifted.genes().iter().all(|g| (0.0..1.0).contains(g)));
    }

    #[test]
    fn test_shift_and_mutate_without_mutation_equals_shift() {
        let previous = Genome::from_genes((0..8u8).map(|i| f32::from(i) / 8.0).collect());
        let a = shift(&previous, &mut Pcg32::seed_from_u64(7));
        let b = shift_and_mutate(&previous, 0.0, &mut Pcg32::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
