use rand::{seq::SliceRandom, RngCore};

/// Pick one item uniformly at random; `None` only for an empty pool.
pub fn pick_uniform<'a, I>(pool: &'a [I], rng: &mut dyn RngCore) -> Option<&'a I> {
    pool.choose(rng)
}
