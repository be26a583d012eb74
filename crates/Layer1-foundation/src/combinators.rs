//! Leaf combinators
//!
//! Small stateless helpers that task pipelines pass around as plain
//! functions. None of them know anything about `Task`.

use crate::functor::Functor;

/// Boxed second stage of a curried two-argument function
pub type Curried<B, C> = Box<dyn Fn(B) -> C + Send + Sync>;

/// No-op sink, handy as an ignored `fork` callback
pub fn ignore<T>(_: T) {}

/// Returns its argument unchanged
pub fn identity<T>(x: T) -> T {
    x
}

/// Right-to-left composition: `compose(f, g)(x) == f(g(x))`
pub fn compose<A, B, C, F, G>(f: F, g: G) -> impl Fn(A) -> C
where
    F: Fn(B) -> C,
    G: Fn(A) -> B,
{
    move |x| f(g(x))
}

/// Turns `f(a, b)` into `f(a)(b)`
///
/// The first stage is `Clone` so it can be lifted with `Task::of` and forked
/// more than once; the captured first argument is cloned on every call of
/// the second stage.
pub fn curry2<A, B, C, F>(f: F) -> impl Fn(A) -> Curried<B, C> + Clone + Send + Sync + 'static
where
    F: Fn(A, B) -> C + Clone + Send + Sync + 'static,
    A: Clone + Send + Sync + 'static,
    B: 'static,
    C: 'static,
{
    move |a: A| {
        let f = f.clone();
        Box::new(move |b: B| f(a.clone(), b)) as Curried<B, C>
    }
}

/// Runs `f` for its side effect and passes the value through
pub fn tap<T, F>(f: F) -> impl Fn(T) -> T
where
    F: Fn(&T),
{
    move |x| {
        f(&x);
        x
    }
}

/// Lifts `f` over an ordered sequence
pub fn curried_map<A, B, F>(f: F) -> impl Fn(Vec<A>) -> Vec<B>
where
    F: Fn(A) -> B + Clone + Send + Sync + 'static,
{
    move |items: Vec<A>| <Vec<A> as Functor<B>>::map(items, f.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_identity() {
        assert_eq!(identity(1), 1);
        assert_eq!(identity("a"), "a");
    }

    #[test]
    fn test_ignore_as_callback() {
        let sink: fn(i32) = ignore;
        sink(3);
        ignore("anything");
    }

    #[test]
    fn test_compose_applies_right_first() {
        let h = compose(|x: i32| x + 1, |x: i32| 2 * x);
        assert_eq!(h(10), 21);
    }

    #[test]
    fn test_curry2() {
        let add = curry2(|x: i32, y: i32| x + y);
        assert_eq!(add(10)(20), 30);

        // the second stage can be reused
        let add_ten = add(10);
        assert_eq!(add_ten(1), 11);
        assert_eq!(add_ten(2), 12);
    }

    #[test]
    fn test_tap_passes_value_through() {
        let seen = AtomicUsize::new(0);
        let t = tap(|x: &usize| {
            seen.store(*x + 1, Ordering::SeqCst);
        });
        assert_eq!(t(5), 5);
        assert_eq!(seen.load(Ordering::SeqCst), 6);

        assert_eq!(tap(|_: &i32| ())(5), 5);
    }

    #[test]
    fn test_curried_map() {
        let inc = curried_map(|x: i32| x + 1);
        assert_eq!(inc(vec![1, 2, 3]), vec![2, 3, 4]);
        assert!(inc(Vec::new()).is_empty());
    }
}
