use std::fmt;

use crate::fun::Fun;

/// Two values side by side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pair<A, B> {
    pub left: A,
    pub right: B,
}

impl<A, B> Pair<A, B> {
    pub fn new(left: A, right: B) -> Self {
        Pair { left, right }
    }
}

impl<A: fmt::Display, B: fmt::Display> fmt::Display for Pair<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.left, self.right)
    }
}

/// Apply `f` to the left component, leaving the right one alone.
pub fn map_pair_left<A1: 'static, A2: 'static, B: 'static>(
    f: Fun<A1, A2>,
) -> Fun<Pair<A1, B>, Pair<A2, B>> {
    Fun::new(move |p: Pair<A1, B>| Pair::new(f.call(p.left), p.right))
}

pub fn map_pair_right<A: 'static, B1: 'static, B2: 'static>(
    f: Fun<B1, B2>,
) -> Fun<Pair<A, B1>, Pair<A, B2>> {
    Fun::new(move |p: Pair<A, B1>| Pair::new(p.left, f.call(p.right)))
}

/// Map both components: `f` on the left, then `g` on the right.
pub fn map_pair<A1: 'static, A2: 'static, B1: 'static, B2: 'static>(
    f: Fun<A1, A2>,
    g: Fun<B1, B2>,
) -> Fun<Pair<A1, B1>, Pair<A2, B2>> {
    map_pair_left(f).then(map_pair_right(g))
}

/// [`map_pair`] taking its two functions as a pair.
pub fn map_pair_superior<A1: 'static, A2: 'static, B1: 'static, B2: 'static>(
    fs: Pair<Fun<A1, A2>, Fun<B1, B2>>,
) -> Fun<Pair<A1, B1>, Pair<A2, B2>> {
    map_pair(fs.left, fs.right)
}
