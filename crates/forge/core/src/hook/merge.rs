//! Standard merge strategies for hooks with several contributors.
//!
//! A hook trait opts into merging by implementing itself for
//! [`AllMerger<dyn Trait>`] and registering a merger function that wraps the
//! ordered list. The helpers below cover the strategies definitions rely on:
//!
//! - **Sequence**: [`AllMerger::for_each`], [`AllMerger::until_handled`],
//!   [`AllMerger::concat`]
//! - **Numeric reduction**: [`AllMerger::max_by`], [`AllMerger::sum_by`]
//! - **Boolean union**: [`AllMerger::any`]
//!
//! Contributors are stored in `(priority, source order)`, so every helper
//! respects that order.

use std::fmt;
use std::sync::Arc;

/// Addition used by [`AllMerger::sum_by`]. Integers saturate at their bounds
/// so a merged query never panics or wraps.
pub trait MergeSum: Sized {
    fn merge_add(self, other: Self) -> Self;
}

macro_rules! saturating_merge_sum {
    ($($ty:ty),*) => {
        $(
            impl MergeSum for $ty {
                fn merge_add(self, other: Self) -> Self {
                    self.saturating_add(other)
                }
            }
        )*
    };
}

saturating_merge_sum!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl MergeSum for f32 {
    fn merge_add(self, other: Self) -> Self {
        self + other
    }
}

impl MergeSum for f64 {
    fn merge_add(self, other: Self) -> Self {
        self + other
    }
}

/// Ordered list of implementations of a single hook.
pub struct AllMerger<T: ?Sized> {
    hooks: Vec<Arc<T>>,
}

impl<T: ?Sized> AllMerger<T> {
    pub fn new(hooks: Vec<Arc<T>>) -> Self {
        Self { hooks }
    }

    /// The merged implementations, in invocation order.
    pub fn hooks(&self) -> &[Arc<T>] {
        &self.hooks
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Invokes every implementation in order.
    pub fn for_each(&self, mut f: impl FnMut(&T)) {
        for hook in &self.hooks {
            f(&**hook);
        }
    }

    /// Invokes implementations in order until one reports it handled the
    /// call. Returns true if any did.
    pub fn until_handled(&self, mut f: impl FnMut(&T) -> bool) -> bool {
        self.hooks.iter().any(|hook| f(&**hook))
    }

    /// Invokes implementations in order until one returns `Some`.
    pub fn first_some<R>(&self, mut f: impl FnMut(&T) -> Option<R>) -> Option<R> {
        self.hooks.iter().find_map(|hook| f(&**hook))
    }

    /// Invokes every implementation and concatenates the produced lists.
    pub fn concat<R>(&self, mut f: impl FnMut(&T) -> Vec<R>) -> Vec<R> {
        let mut out = Vec::new();
        for hook in &self.hooks {
            out.extend(f(&**hook));
        }
        out
    }

    /// Largest value across all implementations, starting from `floor`.
    pub fn max_by<R: PartialOrd>(&self, floor: R, mut f: impl FnMut(&T) -> R) -> R {
        self.hooks.iter().fold(floor, |best, hook| {
            let value = f(&**hook);
            if value > best { value } else { best }
        })
    }

    /// Sum of the values of all implementations, starting from `zero`.
    /// Integer sums saturate.
    pub fn sum_by<R: MergeSum>(&self, zero: R, mut f: impl FnMut(&T) -> R) -> R {
        self.hooks.iter().fold(zero, |acc, hook| acc.merge_add(f(&**hook)))
    }

    /// Boolean union; stops at the first `true`.
    pub fn any(&self, mut f: impl FnMut(&T) -> bool) -> bool {
        self.hooks.iter().any(|hook| f(&**hook))
    }
}

impl<T: ?Sized> fmt::Debug for AllMerger<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllMerger")
            .field("len", &self.hooks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    trait Source {
        fn value(&self) -> i32;
        fn handles(&self) -> bool;
    }

    struct Fixed(i32, bool);
    impl Source for Fixed {
        fn value(&self) -> i32 {
            self.0
        }
        fn handles(&self) -> bool {
            self.1
        }
    }

    fn merger(values: &[(i32, bool)]) -> AllMerger<dyn Source> {
        AllMerger::new(
            values
                .iter()
                .map(|&(v, h)| Arc::new(Fixed(v, h)) as Arc<dyn Source>)
                .collect(),
        )
    }

    #[test]
    fn until_handled_short_circuits() {
        let merged = merger(&[(1, false), (2, true), (3, true)]);
        let visited = RefCell::new(Vec::new());
        let handled = merged.until_handled(|s| {
            visited.borrow_mut().push(s.value());
            s.handles()
        });
        assert!(handled);
        assert_eq!(*visited.borrow(), vec![1, 2]);
    }

    #[test]
    fn concat_preserves_order() {
        let merged = merger(&[(1, false), (2, false)]);
        assert_eq!(merged.concat(|s| vec![s.value(), s.value() * 10]), vec![1, 10, 2, 20]);
    }

    #[test]
    fn numeric_reductions() {
        let merged = merger(&[(4, false), (9, false), (-2, false)]);
        assert_eq!(merged.max_by(0, |s| s.value()), 9);
        assert_eq!(merged.sum_by(0, |s| s.value()), 11);
        assert_eq!(merger(&[(-4, false)]).max_by(0, |s| s.value()), 0);
    }

    #[test]
    fn integer_sums_saturate() {
        let merged = merger(&[(i32::MAX, false), (1, false)]);
        assert_eq!(merged.sum_by(0, |s| s.value()), i32::MAX);
        let low = merger(&[(i32::MIN, false), (-1, false)]);
        assert_eq!(low.sum_by(0, |s| s.value()), i32::MIN);
        assert_eq!(merger(&[(1, false)]).sum_by(0.5_f64, |s| f64::from(s.value())), 1.5);
    }

    #[test]
    fn any_is_a_union() {
        assert!(merger(&[(0, false), (0, true)]).any(|s| s.handles()));
        assert!(!merger(&[(0, false)]).any(|s| s.handles()));
        assert!(!merger(&[]).any(|s| s.handles()));
    }

    #[test]
    fn first_some_stops_early() {
        let merged = merger(&[(0, false), (5, true), (7, true)]);
        assert_eq!(merged.first_some(|s| s.handles().then(|| s.value())), Some(5));
    }
}
