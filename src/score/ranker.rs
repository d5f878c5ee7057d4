use crate::model::{RankedEntry, ResolvedScore, ScoringType};

/// Dense positions for a slice already sorted best-first by `key`.
///
/// Equal keys share a position and the next distinct key sits at one plus
/// the number of entries ahead of it, so `[0, 0, 1]` gives `[1, 1, 3]`.
pub fn dense_positions_by<T, K, F>(sorted: &[T], key: F) -> Vec<u32>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut positions = Vec::with_capacity(sorted.len());
    let mut previous: Option<(K, u32)> = None;

    for (idx, item) in sorted.iter().enumerate() {
        let k = key(item);
        let position = match &previous {
            Some((prev_key, prev_pos)) if *prev_key == k => *prev_pos,
            _ => u32::try_from(idx).unwrap_or(u32::MAX - 1) + 1,
        };
        positions.push(position);
        previous = Some((k, position));
    }

    positions
}

/// Rank one view (gross or net) of a competition.
///
/// Entries that are ineligible, or lack a net score in the net view, are left
/// out. Equal ranking scores share a position; the participant id only fixes
/// the output order inside a tie.
#[must_use]
pub fn rank(scores: &[(i64, ResolvedScore)], scoring_type: ScoringType) -> Vec<RankedEntry> {
    let mut candidates: Vec<(i64, i32, &ResolvedScore)> = scores
        .iter()
        .filter_map(|(participant_id, score)| {
            score
                .ranking_score(scoring_type)
                .map(|ranking_score| (*participant_id, ranking_score, score))
        })
        .collect();

    candidates.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

    let positions = dense_positions_by(&candidates, |c| c.1);

    candidates
        .into_iter()
        .zip(positions)
        .map(|((participant_id, ranking_score, score), position)| RankedEntry {
            participant_id,
            scoring_type,
            ranking_score,
            position,
            score: score.clone(),
        })
        .collect()
}
