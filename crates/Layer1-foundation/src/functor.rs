//! Functor trait
//!
//! `map` over a wrapped value, checked at compile time. Implementors must
//! satisfy the functor laws:
//!
//! - identity: `x.map(identity)` behaves like `x`
//! - composition: `x.map(f).map(g)` behaves like `x.map(|a| g(f(a)))`

/// Something whose contents can be transformed without changing its shape
pub trait Functor<B> {
    /// Type of the contained value
    type Unwrapped;

    /// Same wrapper holding `B`
    type To;

    /// Transform the contained value(s) with `f`
    ///
    /// `f` may be moved into deferred or shared structures, hence the
    /// `Send + Sync + 'static` bound.
    fn map<F>(self, f: F) -> Self::To
    where
        F: Fn(Self::Unwrapped) -> B + Send + Sync + 'static;
}

impl<A, B> Functor<B> for Vec<A> {
    type Unwrapped = A;
    type To = Vec<B>;

    fn map<F>(self, f: F) -> Vec<B>
    where
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        self.into_iter().map(f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::identity;

    #[test]
    fn test_vec_functor_identity() {
        let items = vec![1, 2, 3];
        assert_eq!(Functor::map(items.clone(), identity), items);
    }

    #[test]
    fn test_vec_functor_composition() {
        let f = |x: i32| x * 3;
        let g = |x: i32| x - 1;
        let items = vec![4, 5, 6];

        let stepwise = Functor::map(Functor::map(items.clone(), f), g);
        let fused = Functor::map(items, move |x| g(f(x)));
        assert_eq!(stepwise, fused);
    }

    #[test]
    fn test_vec_functor_preserves_order() {
        let words = vec!["b", "a", "c"];
        let upper = Functor::map(words, |w: &str| w.to_uppercase());
        assert_eq!(upper, vec!["B", "A", "C"]);
    }
}
