// src/tokenizer/parallelism.rs

//! Switchable rayon parallelism for batch encoding.
//!
//! Parallelism is on by default and can be turned off with the
//! `SUBWORD_PREP_PARALLELISM` environment variable (`false`, `off`, `0`, ...)
//! or overridden in-process with [`set_parallelism`].

use rayon::iter::{IntoParallelIterator, ParallelIterator};
use rayon_cond::CondIterator;
use std::sync::atomic::{AtomicU8, Ordering};

pub const ENV_VARIABLE: &str = "SUBWORD_PREP_PARALLELISM";

// 0 = not overridden, 1 = forced on, 2 = forced off
static PARALLELISM: AtomicU8 = AtomicU8::new(0);

fn get_override_parallelism() -> Option<bool> {
    match PARALLELISM.load(Ordering::SeqCst) {
        1 => Some(true),
        2 => Some(false),
        _ => None,
    }
}

fn env_enables_parallelism(value: &str) -> bool {
    !matches!(
        value.to_ascii_lowercase().as_str(),
        "" | "off" | "false" | "f" | "no" | "n" | "0"
    )
}

pub fn get_parallelism() -> bool {
    if let Some(parallel) = get_override_parallelism() {
        return parallel;
    }
    match std::env::var(ENV_VARIABLE) {
        Ok(v) => env_enables_parallelism(&v),
        Err(_) => true,
    }
}

pub fn set_parallelism(val: bool) {
    PARALLELISM.store(if val { 1 } else { 2 }, Ordering::SeqCst);
}

/// Converts a collection into an iterator that is parallel or serial
/// depending on the current setting.
pub trait MaybeParallelIterator<P, S>
where
    P: ParallelIterator,
    S: Iterator<Item = P::Item>,
{
    fn into_maybe_par_iter(self) -> CondIterator<P, S>;
}

impl<P, S, I> MaybeParallelIterator<P, S> for I
where
    I: IntoParallelIterator<Iter = P, Item = P::Item> + IntoIterator<IntoIter = S, Item = S::Item>,
    P: ParallelIterator,
    S: Iterator<Item = P::Item>,
{
    fn into_maybe_par_iter(self) -> CondIterator<P, S> {
        CondIterator::new(self, get_parallelism())
    }
}

/// Borrowing counterpart of [`MaybeParallelIterator`].
pub trait MaybeParallelRefIterator<'data, P, S>
where
    P: ParallelIterator,
    S: Iterator<Item = P::Item>,
    P::Item: 'data,
{
    fn maybe_par_iter(&'data self) -> CondIterator<P, S>;
}

impl<'data, P, S, I: 'data + ?Sized> MaybeParallelRefIterator<'data, P, S> for I
where
    &'data I: MaybeParallelIterator<P, S>,
    P: ParallelIterator,
    S: Iterator<Item = P::Item>,
    P::Item: 'data,
{
    fn maybe_par_iter(&'data self) -> CondIterator<P, S> {
        self.into_maybe_par_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_values_that_disable_parallelism() {
        for value in ["", "off", "FALSE", "f", "No", "n", "0"] {
            assert!(!env_enables_parallelism(value), "{value:?} should disable");
        }
        for value in ["1", "true", "on", "yes"] {
            assert!(env_enables_parallelism(value), "{value:?} should enable");
        }
    }
}
