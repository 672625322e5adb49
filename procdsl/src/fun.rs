use std::fmt;
use std::rc::Rc;

/// A shared single-argument function that composes with `then`.
///
/// Cloning a `Fun` is cheap: clones share the same underlying closure.
pub struct Fun<A, B>(Rc<dyn Fn(A) -> B>);

impl<A, B> Clone for Fun<A, B> {
    fn clone(&self) -> Self {
        Fun(Rc::clone(&self.0))
    }
}

impl<A, B> fmt::Debug for Fun<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Fun(..)")
    }
}

impl<A: 'static, B: 'static> Fun<A, B> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(A) -> B + 'static,
    {
        Fun(Rc::new(f))
    }

    pub fn call(&self, arg: A) -> B {
        (self.0)(arg)
    }

    /// Compose with `next`: the result applies `self`, then `next`.
    pub fn then<C: 'static>(self, next: Fun<B, C>) -> Fun<A, C> {
        Fun::new(move |x| next.call(self.call(x)))
    }
}

/// Operations only available when input and output types coincide.
impl<A: 'static> Fun<A, A> {
    /// Apply `self` `times` times. Zero or negative counts yield the identity.
    pub fn repeat(self, times: i64) -> Fun<A, A> {
        Fun::new(move |x: A| {
            let mut current = x;
            for _ in 0..times.max(0) {
                current = self.call(current);
            }
            current
        })
    }

    /// Apply `self` until `condition` holds on the current value.
    ///
    /// The condition is checked before every application, so an input that
    /// already satisfies it comes back unchanged. Never returns if the
    /// condition never holds.
    pub fn repeat_until(self, condition: Fun<A, bool>) -> Fun<A, A>
    where
        A: Clone,
    {
        Fun::new(move |x: A| {
            let mut current = x;
            while !condition.call(current.clone()) {
                current = self.call(current);
            }
            current
        })
    }
}

pub fn id<A: 'static>() -> Fun<A, A> {
    Fun::new(|x| x)
}

/// A function that ignores its input and always returns `value`.
pub fn constant<A: 'static, B: Clone + 'static>(value: B) -> Fun<A, B> {
    Fun::new(move |_| value.clone())
}

pub fn equals<A: PartialEq + 'static>(expected: A) -> Fun<A, bool> {
    Fun::new(move |x| x == expected)
}

/// Route each input through `then_fn` or `else_fn` depending on `condition`.
pub fn if_then<A, B>(condition: Fun<A, bool>, then_fn: Fun<A, B>, else_fn: Fun<A, B>) -> Fun<A, B>
where
    A: Clone + 'static,
    B: 'static,
{
    Fun::new(move |x: A| {
        if condition.call(x.clone()) {
            then_fn.call(x)
        } else {
            else_fn.call(x)
        }
    })
}

/// Identity that reports every value passing through it.
pub fn log_object<A: fmt::Debug + 'static>(label: &str) -> Fun<A, A> {
    let label = label.to_string();
    Fun::new(move |x: A| {
        tracing::info!(label = %label, value = ?x, "observed value");
        x
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn incr() -> Fun<i64, i64> {
        Fun::new(|x| x + 1)
    }

    #[test_case(0, 1)]
    #[test_case(100, 101)]
    #[test_case(-1, 0)]
    fn wraps_a_function(input: i64, expected: i64) {
        assert_eq!(incr().call(input), expected);
    }

    #[test_case(0, 2)]
    #[test_case(100, 202)]
    #[test_case(-1, 0)]
    fn then_applies_left_to_right(input: i64, expected: i64) {
        let double = Fun::new(|x: i64| x * 2);
        assert_eq!(incr().then(double).call(input), expected);
    }

    #[test_case(3, 3)]
    #[test_case(0, 0)]
    #[test_case(-4, 0)]
    fn repeat_applies_n_times(times: i64, expected: i64) {
        assert_eq!(incr().repeat(times).call(0), expected);
    }

    #[test]
    fn repeat_until_stops_once_condition_holds() {
        let at_least_ten = incr().repeat_until(Fun::new(|x: i64| x >= 10));
        assert_eq!(at_least_ten.call(0), 10);
        assert_eq!(at_least_ten.call(15), 15);
    }

    #[test]
    fn id_returns_its_input() {
        assert_eq!(id().call(100), 100);
        assert_eq!(id().call("test"), "test");
    }

    #[test]
    fn equals_compares_against_expected() {
        assert!(equals(0).call(0));
        assert!(!equals(0).call(100));
        assert!(equals("a").call("a"));
        assert!(!equals("a").call("b"));
    }

    #[test]
    fn if_then_selects_branch() {
        let choose = if_then(
            equals("a"),
            constant("outputA"),
            constant("outputB"),
        );
        assert_eq!(choose.call("a"), "outputA");
        assert_eq!(choose.call("b"), "outputB");
    }

    #[test]
    fn log_object_passes_value_through() {
        let observed = incr().then(log_object("after incr")).then(incr());
        assert_eq!(observed.call(1), 3);
    }
}
