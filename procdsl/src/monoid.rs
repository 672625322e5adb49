//! Values with an identity element and an associative `plus`, exposed both as a
//! trait and as [`Fun`]s over [`Pair`]s.

use crate::collections::list::List;
use crate::fun::Fun;
use crate::pair::Pair;

pub trait Monoid {
    fn zero() -> Self;
    fn plus(self, other: Self) -> Self;
}

impl Monoid for String {
    fn zero() -> Self {
        String::new()
    }

    fn plus(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

impl<A> Monoid for List<A> {
    fn zero() -> Self {
        List::empty()
    }

    fn plus(self, other: Self) -> Self {
        List::plus(self, other)
    }
}

pub fn zero<M: Monoid + 'static>() -> Fun<(), M> {
    Fun::new(|()| M::zero())
}

pub fn plus<M: Monoid + 'static>() -> Fun<Pair<M, M>, M> {
    Fun::new(|p: Pair<M, M>| p.left.plus(p.right))
}

pub fn zero_str() -> Fun<(), String> {
    zero()
}

pub fn plus_str() -> Fun<Pair<String, String>, String> {
    plus()
}

pub fn zero_list<A: 'static>() -> Fun<(), List<A>> {
    zero()
}

pub fn plus_list<A: 'static>() -> Fun<Pair<List<A>, List<A>>, List<A>> {
    plus()
}

/// Combine every item with `plus`, starting from `zero`.
pub fn concat<M: Monoid>(items: impl IntoIterator<Item = M>) -> M {
    items.into_iter().fold(M::zero(), M::plus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn list(items: &[&'static str]) -> List<&'static str> {
        items.iter().copied().collect()
    }

    #[test_case("", "", ""; "both empty")]
    #[test_case("ab", "", "ab"; "right identity")]
    #[test_case("", "cd", "cd"; "left identity")]
    #[test_case("ab", "cd", "abcd"; "joined")]
    fn strings(left: &str, right: &str, expected: &str) {
        let joined = plus_str().call(Pair::new(left.to_string(), right.to_string()));
        assert_eq!(joined, expected);
    }

    #[test]
    fn string_zero_is_empty() {
        assert_eq!(zero_str().call(()), "");
    }

    #[test]
    fn lists_concatenate_in_order() {
        let joined = plus_list().call(Pair::new(list(&["a", "b", "c"]), list(&["x", "y", "z"])));
        assert_eq!(joined.to_string(), "a => b => c => x => y => z");
        assert_eq!(plus_list().call(Pair::new(zero_list().call(()), list(&["x"]))), list(&["x"]));
        assert_eq!(plus_list().call(Pair::new(list(&["a"]), List::empty())), list(&["a"]));
    }

    #[test]
    fn concat_folds_from_zero() {
        assert_eq!(concat(["a", "b", "c"].map(String::from)), "abc");
        assert_eq!(concat(Vec::<String>::new()), "");
        assert_eq!(concat([list(&["a"]), list(&[]), list(&["b", "c"])]), list(&["a", "b", "c"]));
    }
}
