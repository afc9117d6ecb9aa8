//! Composable record filters. Every criterion is a [`Predicate`]; criteria
//! combine with `and` / `or` / `not`, and a [`Filter`] holds an all-of list
//! built up from optional query parameters.

pub mod criteria;
pub mod page;

pub trait Predicate<T: ?Sized>: Send + Sync {
    fn matches(&self, item: &T) -> bool;

    fn and<P>(self, other: P) -> And<Self, P>
    where
        Self: Sized,
        P: Predicate<T>,
    {
        And(self, other)
    }

    fn or<P>(self, other: P) -> Or<Self, P>
    where
        Self: Sized,
        P: Predicate<T>,
    {
        Or(self, other)
    }

    fn not(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not(self)
    }
}

impl<T: ?Sized, F> Predicate<T> for F
where
    F: Fn(&T) -> bool + Send + Sync,
{
    fn matches(&self, item: &T) -> bool {
        self(item)
    }
}

pub struct And<A, B>(A, B);

impl<T: ?Sized, A: Predicate<T>, B: Predicate<T>> Predicate<T> for And<A, B> {
    fn matches(&self, item: &T) -> bool {
        self.0.matches(item) && self.1.matches(item)
    }
}

pub struct Or<A, B>(A, B);

impl<T: ?Sized, A: Predicate<T>, B: Predicate<T>> Predicate<T> for Or<A, B> {
    fn matches(&self, item: &T) -> bool {
        self.0.matches(item) || self.1.matches(item)
    }
}

pub struct Not<A>(A);

impl<T: ?Sized, A: Predicate<T>> Predicate<T> for Not<A> {
    fn matches(&self, item: &T) -> bool {
        !self.0.matches(item)
    }
}

/// All-of filter. An empty filter matches everything.
pub struct Filter<T> {
    criteria: Vec<Box<dyn Predicate<T>>>,
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self {
            criteria: Vec::new(),
        }
    }
}

impl<T> Filter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<P>(mut self, criterion: P) -> Self
    where
        P: Predicate<T> + 'static,
    {
        self.criteria.push(Box::new(criterion));
        self
    }

    /// Adds the criterion only when the caller supplied one.
    pub fn with_opt<P>(self, criterion: Option<P>) -> Self
    where
        P: Predicate<T> + 'static,
    {
        match criterion {
            Some(criterion) => self.with(criterion),
            None => self,
        }
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn apply(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}

impl<T> Predicate<T> for Filter<T> {
    fn matches(&self, item: &T) -> bool {
        self.criteria.iter().all(|criterion| criterion.matches(item))
    }
}

#[cfg(test)]
mod tests {
    use super::{Filter, Predicate};

    fn even(n: &u32) -> bool {
        n % 2 == 0
    }

    fn above_ten(n: &u32) -> bool {
        *n > 10
    }

    #[test]
    fn combinators_follow_boolean_logic() {
        let both = even.and(above_ten);
        assert!(both.matches(&12));
        assert!(!both.matches(&8));
        assert!(!both.matches(&13));

        let either = even.or(above_ten);
        assert!(either.matches(&8));
        assert!(either.matches(&13));
        assert!(!either.matches(&7));

        let odd = even.not();
        assert!(odd.matches(&7));
        assert!(!odd.matches(&8));
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let filter: Filter<u32> = Filter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(vec![1, 2, 3]), vec![1, 2, 3]);
    }

    #[test]
    fn filter_requires_every_criterion_and_skips_missing_ones() {
        let threshold: Option<u32> = None;
        let filter = Filter::new()
            .with(even)
            .with(above_ten)
            .with_opt(threshold.map(|limit| move |n: &u32| *n < limit));

        assert_eq!(filter.len(), 2);
        assert_eq!(filter.apply(vec![4, 11, 12, 14, 15]), vec![12, 14]);

        let capped = Filter::new()
            .with(even)
            .with_opt(Some(13).map(|limit| move |n: &u32| *n < limit));
        assert_eq!(capped.apply(vec![4, 11, 12, 14]), vec![4, 12]);
    }
}
