//! Quiz question selection: one uniformly-random question per call,
//! scoped to a category and excluding anything the player has seen.

use rand::Rng;

use crate::store::Question;

/// Category scope for a quiz round.
///
/// The shipped frontend sends `{"type": "click"}` (or a category id of 0)
/// when the player picks "All"; both map to `All` here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    ById(i64),
}

impl CategoryFilter {
    pub fn matches(&self, question: &Question) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::ById(id) => question.category == *id,
        }
    }
}

/// Pick the next quiz question, or `None` when the eligible set is
/// exhausted ("quiz complete", not an error).
///
/// The exclusion set is never mutated here; the caller appends the
/// returned id before asking again. The rng is injected so tests can
/// seed it.
pub fn next_question<R: Rng>(
    filter: CategoryFilter,
    previous_ids: &[i64],
    source: &[Question],
    rng: &mut R,
) -> Option<Question> {
    let eligible: Vec<&Question> = source
        .iter()
        .filter(|q| filter.matches(q) && !previous_ids.contains(&q.id))
        .collect();

    if eligible.is_empty() {
        return None;
    }

    let pick = rng.gen_range(0..eligible.len());
    Some(eligible[pick].clone())
}
