use crate::core::Character;
use crate::session::RatingStore;
use rand::seq::SliceRandom;
use rand::Rng;

/// Pool members with no rating entry. Skipped characters count as handled.
pub fn unrated_characters<'a>(pool: &[&'a Character], store: &RatingStore) -> Vec<&'a Character> {
    pool.iter()
        .copied()
        .filter(|character| store.get(character.id.as_str()).is_none())
        .collect()
}

/// Uniformly random unrated character, or `None` once the pool is exhausted.
pub fn pick_next<'a, R: Rng + ?Sized>(
    pool: &[&'a Character],
    store: &RatingStore,
    rng: &mut R,
) -> Option<&'a Character> {
    unrated_characters(pool, store).choose(rng).copied()
}
