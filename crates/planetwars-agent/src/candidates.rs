//! Candidate source and target lists for one decision.

use planetwars_engine::{GameState, Planet, Player};

/// Launchable sources and attackable targets for one player at one tick.
///
/// Both lists are non-empty by construction: [`Candidates::for_player`] returns
/// `None` when either would be empty, and the caller answers with a no-op
/// instead of searching.
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    sources: Vec<&'a Planet>,
    targets: Vec<&'a Planet>,
}

impl<'a> Candidates<'a> {
    /// Sources are owned idle planets holding ships; targets are all planets the
    /// player does not own, neutral included.
    #[must_use]
    pub fn for_player(state: &'a GameState, player: Player) -> Option<Self> {
        let sources: Vec<_> = state.launchable(player).collect();
        let targets: Vec<_> = state.targets(player).collect();
        if sources.is_empty() || targets.is_empty() {
            return None;
        }
        Some(Self { sources, targets })
    }

    #[must_use]
    pub fn sources(&self) -> &[&'a Planet] {
        &self.sources
    }

    #[must_use]
    pub fn targets(&self) -> &[&'a Planet] {
        &self.targets
    }
}

/// Returns the first item with the highest score.
///
/// Ties go to the earliest item, so results follow snapshot order.
pub fn first_max_by<I, T, F>(items: I, mut score: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> f64,
{
    let mut best: Option<(T, f64)> = None;
    for item in items {
        let value = score(&item);
        if best.as_ref().is_none_or(|(_, best_value)| value > *best_value) {
            best = Some((item, value));
        }
    }
    best.map(|(item, _)| item)
}

/// Returns the first item with the lowest score. Ties go to the earliest item.
pub fn first_min_by<I, T, F>(items: I, mut score: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> f64,
{
    first_max_by(items, |item| -score(item))
}
