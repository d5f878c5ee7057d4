use crate::error::ScoringError;
use crate::model::{
    CourseParProfile, HOLES_PER_NINE, HOLES_PER_ROUND, HoleScore, LineScore, ManualTotal,
    RawEntry, ResolvedScore, RoundCompletion, ScoreDisplay, ScoreSource,
};
use crate::score::points::round_half_up;

const FULL_ROUND: u32 = 18;

/// Highest stroke count a single hole may carry.
pub const MAX_HOLE_STROKES: u32 = 99;
/// Highest manual whole-round total.
pub const MAX_MANUAL_TOTAL: i32 = 18 * 99;
/// Handicap indices outside this range are rejected.
pub const MIN_HANDICAP_INDEX: f64 = -20.0;
pub const MAX_HANDICAP_INDEX: f64 = 60.0;

/// Turn one participant's raw entry into a canonical score.
///
/// A manual total replaces the hole-by-hole card entirely. On the card,
/// stroked holes feed the gross total and relative-to-par, gave-up holes only
/// count as played, unreported holes count for nothing.
///
/// # Errors
///
/// Will return `Err` if the card is neither empty nor 18 holes long, if a
/// hole or the manual total is out of range, or if the handicap index is not
/// a number between [`MIN_HANDICAP_INDEX`] and [`MAX_HANDICAP_INDEX`]
pub fn resolve(
    entry: &RawEntry,
    pars: &CourseParProfile,
    completion: &RoundCompletion,
) -> Result<ResolvedScore, ScoringError> {
    let handicap = rounded_handicap(entry.handicap_index)?;

    let mut resolved = match entry.manual_total {
        Some(manual) => resolve_manual(manual, pars)?,
        None => resolve_holes(&entry.hole_scores, pars)?,
    };

    resolved.net_total = handicap.map(|h| resolved.gross_total - h);
    resolved.net_relative_to_par = handicap.map(|h| resolved.relative_to_par - h);
    resolved.eligible = !entry.is_dq
        && resolved.holes_played == FULL_ROUND
        && completion.is_final(entry.is_locked);

    Ok(resolved)
}

fn rounded_handicap(handicap_index: Option<f64>) -> Result<Option<i32>, ScoringError> {
    match handicap_index {
        Some(h) if !h.is_finite() => Err(ScoringError::InvalidInput(format!(
            "handicap index {h} is not a number"
        ))),
        Some(h) if !(MIN_HANDICAP_INDEX..=MAX_HANDICAP_INDEX).contains(&h) => {
            Err(ScoringError::InvalidInput(format!(
                "handicap index {h} is outside {MIN_HANDICAP_INDEX}..={MAX_HANDICAP_INDEX}"
            )))
        }
        Some(h) => Ok(Some(round_half_up(h))),
        None => Ok(None),
    }
}

fn resolve_manual(
    manual: ManualTotal,
    pars: &CourseParProfile,
) -> Result<ResolvedScore, ScoringError> {
    if !(1..=MAX_MANUAL_TOTAL).contains(&manual.total) {
        return Err(ScoringError::InvalidInput(format!(
            "manual total {} must be between 1 and {MAX_MANUAL_TOTAL}",
            manual.total
        )));
    }

    Ok(ResolvedScore {
        source: ScoreSource::ManualTotal,
        holes_played: FULL_ROUND,
        gross_total: manual.total,
        relative_to_par: manual.total - pars.total(),
        front_nine: manual.out,
        back_nine: manual.in_,
        net_total: None,
        net_relative_to_par: None,
        eligible: false,
    })
}

fn resolve_holes(
    holes: &[HoleScore],
    pars: &CourseParProfile,
) -> Result<ResolvedScore, ScoringError> {
    if !holes.is_empty() && holes.len() != HOLES_PER_ROUND {
        return Err(ScoringError::InvalidInput(format!(
            "scorecard needs {HOLES_PER_ROUND} holes, got {}",
            holes.len()
        )));
    }

    let mut holes_played = 0;
    let mut gross_total = 0;
    let mut relative_to_par = 0;
    let mut nines = [0, 0];

    for (idx, (hole, par)) in holes.iter().zip(pars.pars()).enumerate() {
        match *hole {
            HoleScore::Unreported | HoleScore::Strokes(0) => {}
            HoleScore::GaveUp => holes_played += 1,
            HoleScore::Strokes(n) if n > MAX_HOLE_STROKES => {
                return Err(ScoringError::InvalidInput(format!(
                    "hole {} has {n} strokes, more than {MAX_HOLE_STROKES}",
                    idx + 1
                )));
            }
            HoleScore::Strokes(n) => {
                let strokes = i32::try_from(n).unwrap_or_default();
                holes_played += 1;
                gross_total += strokes;
                relative_to_par += strokes - par;
                nines[idx / HOLES_PER_NINE] += strokes;
            }
        }
    }

    let started = !holes.is_empty();
    Ok(ResolvedScore {
        source: ScoreSource::HoleByHole,
        holes_played,
        gross_total,
        relative_to_par,
        front_nine: started.then_some(nines[0]),
        back_nine: started.then_some(nines[1]),
        net_total: None,
        net_relative_to_par: None,
        eligible: false,
    })
}

/// Per-hole breakdown of a card against par. Only stroked holes appear;
/// a manual total has no holes to show.
#[must_use]
pub fn line_scores(entry: &RawEntry, pars: &CourseParProfile) -> Vec<LineScore> {
    if entry.manual_total.is_some() {
        return vec![];
    }

    entry
        .hole_scores
        .iter()
        .zip(pars.pars())
        .enumerate()
        .filter_map(|(idx, (hole, &par))| {
            let strokes = hole.strokes()?;
            Some(LineScore {
                hole: i32::try_from(idx).unwrap_or(0) + 1,
                strokes,
                par,
                score_display: ScoreDisplay::from(strokes - par),
            })
        })
        .collect()
}
