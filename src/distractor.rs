//! Multiple choice option generation.
//!
//! The correct answer is always placed first by [`generate_options`]; callers
//! presenting the options must run them through [`shuffle_for_display`] so the
//! position of the right answer carries no information.

use itertools::Itertools;
use rand::{seq::SliceRandom, RngCore};

/// Build up to `count` options: the correct value plus randomly sampled
/// distinct values from `pool` that differ from it.
///
/// Values are compared exactly (case-sensitive). A pool with fewer distinct
/// incorrect values than `count - 1` yields a shorter list instead of failing.
pub fn generate_options<I, F>(
    correct: &str,
    pool: &[I],
    count: usize,
    value_of: F,
    rng: &mut dyn RngCore,
) -> Vec<String>
where
    F: Fn(&I) -> String,
{
    if count == 0 {
        return Vec::new();
    }

    let mut distractors: Vec<String> = pool
        .iter()
        .map(value_of)
        .filter(|value| value.as_str() != correct)
        .unique()
        .collect();

    // Fisher-Yates
    distractors.shuffle(rng);
    distractors.truncate(count - 1);

    let mut options = Vec::with_capacity(distractors.len() + 1);
    options.push(correct.to_string());
    options.extend(distractors);
    options
}

pub fn shuffle_for_display(options: &mut [String], rng: &mut dyn RngCore) {
    options.shuffle(rng);
}

/// Index of `correct` among `options`, used to highlight the right pick.
pub fn position_of(options: &[String], correct: &str) -> Option<usize> {
    options.iter().position(|option| option == correct)
}
