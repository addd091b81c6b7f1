//! Genome representation and decoding.
//!
//! A [`Genome`] is a flat vector of genes in `[0, 1)`, read in pairs
//! `(source selector, target selector)`; a genome for horizon `h` holds `2h`
//! genes. Only the first pair is ever decoded into a move by the agent. The
//! rest of the sequence is the plan the forward model scores.
//!
//! # Decoding
//!
//! A selector maps onto a candidate list of length `n` as
//! `floor(gene * n)` clamped to `[0, n - 1]`. Clamping makes every gene value
//! decodable, including the boundary values `0.0` and `1.0`, negative values
//! and NaN (which maps to index 0).

pub use planetwars_engine::selector_index;
use planetwars_engine::Planet;

use crate::candidates::Candidates;

/// A fixed-length plan encoded as real-valued genes.
#[derive(Debug, Clone, PartialEq)]
pub struct Genome {
    genes: Vec<f32>,
}

impl Genome {
    #[must_use]
    pub fn from_genes(genes: Vec<f32>) -> Self {
        Self { genes }
    }

    #[must_use]
    pub fn genes(&self) -> &[f32] {
        &self.genes
    }

    pub fn genes_mut(&mut self) -> &mut [f32] {
        &mut self.genes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Number of genes strictly above the midpoint of the gene range.
    #[must_use]
    pub fn active_gene_count(&self) -> usize {
        self.genes.iter().filter(|&&g| g > 0.5).count()
    }

    /// Decodes the first gene pair into a `(source, target)` planet pair.
    ///
    /// Returns `None` if the genome holds fewer than two genes.
    #[must_use]
    pub fn decode<'a>(&self, candidates: &Candidates<'a>) -> Option<(&'a Planet, &'a Planet)> {
        let (source, target) =
            self.decode_indices(candidates.sources().len(), candidates.targets().len())?;
        Some((candidates.sources()[source], candidates.targets()[target]))
    }

    /// Decodes the first gene pair into indices for lists of the given lengths.
    ///
    /// Returns `None` if either list is empty or the genome is shorter than a pair.
    #[must_use]
    pub fn decode_indices(
        &self,
        source_count: usize,
        target_count: usize,
    ) -> Option<(usize, usize)> {
        let [source_gene, target_gene, ..] = self.genes[..] else {
            return None;
        };
        Some((
            selector_index(source_gene, source_count)?,
            selector_index(target_gene, target_count)?,
        ))
    }
}

/// Inverse of [`selector_index`]: a gene that decodes to `index`.
///
/// `epsilon` nudges the value off the exact bucket boundary.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn selector_gene(index: usize, len: usize, epsilon: f32) -> f32 {
    index as f32 / len as f32 + epsilon
}

#[cfg(test)]
mod tests {
    use planetwars_engine::{GameState, Player, Vec2};

    use super::*;

    #[test]
    fn test_boundary_genes_stay_in_range() {
        for len in 1..=7 {
            for gene in [0.0, 0.5, 0.999_999, 1.0, -0.25, 2.0, f32::NAN] {
                let index = selector_index(gene, len).unwrap();
                assert!(index < len, "gene {gene} len {len} -> {index}");
            }
        }
        assert_eq!(selector_index(0.3, 0), None);
    }

    #[test]
    fn test_decode_first_pair() {
        let genome = Genome::from_genes(vec![0.0, 0.999, 0.7, 0.2]);
        assert_eq!(genome.decode_indices(3, 2), Some((0, 1)));
        assert_eq!(genome.decode_indices(0, 2), None);
        assert_eq!(Genome::from_genes(vec![0.4]).decode_indices(3, 2), None);
    }

    #[test]
    fn test_selector_gene_roundtrips_every_index() {
        for len in 1..=12 {
            for index in 0..len {
                let gene = selector_gene(index, len, 1e-7);
                assert_eq!(selector_index(gene, len), Some(index));
            }
        }
    }

    #[test]
    fn test_decode_against_candidates() {
        let state = GameState::new(vec![
            Planet::new(0, Player::Player1, 5.0, 1.0, Vec2::default()),
            Planet::new(1, Player::Player1, 8.0, 1.0, Vec2::default()),
            Planet::new(2, Player::Neutral, 1.0, 1.0, Vec2::default()),
            Planet::new(3, Player::Player2, 9.0, 1.0, Vec2::default()),
        ]);
        let candidates = Candidates::for_player(&state, Player::Player1).unwrap();
        let genome = Genome::from_genes(vec![0.9, 0.1]);
        let (source, target) = genome.decode(&candidates).unwrap();
        assert_eq!((source.id, target.id), (1, 2));
    }

    #[test]
    fn test_active_gene_count() {
        let genome = Genome::from_genes(vec![0.5, 0.51, 0.0, 0.99]);
        assert_eq!(genome.active_gene_count(), 2);
    }
}
