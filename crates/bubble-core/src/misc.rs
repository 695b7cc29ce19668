// File: crates/bubble-core/src/misc.rs
// Summary: Slice aggregate helpers (min/max/pluck/distinct/shuffle) and a v4 UUID generator.

use rand::seq::SliceRandom;
use rand::Rng;

/// Aggregate helpers over slices.
pub trait SliceExt<T> {
    /// Smallest element; on ties the later element wins. `None` when empty.
    fn min_value(&self) -> Option<&T>
    where
        T: PartialOrd;

    /// Largest element; on ties the later element wins. `None` when empty.
    fn max_value(&self) -> Option<&T>
    where
        T: PartialOrd;

    /// Project every element.
    fn pluck<U, F>(&self, f: F) -> Vec<U>
    where
        F: FnMut(&T) -> U;

    fn min_by_field<U, F>(&self, f: F) -> Option<U>
    where
        U: PartialOrd,
        F: FnMut(&T) -> U;

    fn max_by_field<U, F>(&self, f: F) -> Option<U>
    where
        U: PartialOrd,
        F: FnMut(&T) -> U;

    /// Elements without duplicates, keeping first occurrences in order.
    fn distinct(&self) -> Vec<T>
    where
        T: PartialEq + Clone;

    fn find_first<F>(&self, pred: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool;

    /// Uniform Fisher-Yates shuffle.
    fn shuffle_in_place<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized;
}

impl<T> SliceExt<T> for [T] {
    fn min_value(&self) -> Option<&T>
    where
        T: PartialOrd,
    {
        self.iter().reduce(|x, y| if x < y { x } else { y })
    }

    fn max_value(&self) -> Option<&T>
    where
        T: PartialOrd,
    {
        self.iter().reduce(|x, y| if x > y { x } else { y })
    }

    fn pluck<U, F>(&self, f: F) -> Vec<U>
    where
        F: FnMut(&T) -> U,
    {
        self.iter().map(f).collect()
    }

    fn min_by_field<U, F>(&self, f: F) -> Option<U>
    where
        U: PartialOrd,
        F: FnMut(&T) -> U,
    {
        self.iter().map(f).reduce(|x, y| if x < y { x } else { y })
    }

    fn max_by_field<U, F>(&self, f: F) -> Option<U>
    where
        U: PartialOrd,
        F: FnMut(&T) -> U,
    {
        self.iter().map(f).reduce(|x, y| if x > y { x } else { y })
    }

    fn distinct(&self) -> Vec<T>
    where
        T: PartialEq + Clone,
    {
        let mut out: Vec<T> = Vec::with_capacity(self.len());
        for v in self {
            if !out.contains(v) { out.push(v.clone()); }
        }
        out
    }

    fn find_first<F>(&self, mut pred: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().find(|&v| pred(v))
    }

    fn shuffle_in_place<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.shuffle(rng);
    }
}

/// Random version-4 UUID in hyphenated lowercase form.
pub fn uuid() -> String {
    ::uuid::Uuid::new_v4().to_string()
}
