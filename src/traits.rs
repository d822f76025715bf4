use num_traits::Float;
use std::cmp::Ordering;

/// Total order over the elements of a tree
pub trait Comparator<T> {
    /// Compare `a` to `b`
    /// Ordering is a {ord} b
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Orders elements by their `Ord` implementation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T> Comparator<T> for NaturalOrder
where
    T: Ord,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Orders floating point elements
/// NaN compares equal to NaN and greater than every other value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FloatOrder;

impl<F> Comparator<F> for FloatOrder
where
    F: Float,
{
    #[inline]
    fn compare(&self, a: &F, b: &F) -> Ordering {
        match a.partial_cmp(b) {
            Some(ordering) => ordering,
            None => a.is_nan().cmp(&b.is_nan()),
        }
    }
}
