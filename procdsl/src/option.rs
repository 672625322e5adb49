//! `Option` as a monad, expressed as `Fun` combinators.

use crate::fun::Fun;

pub fn unit<A: 'static>() -> Fun<A, Option<A>> {
    Fun::new(Some)
}

pub fn none<A: 'static>() -> Fun<(), Option<A>> {
    Fun::new(|()| None)
}

/// Flatten one level: the outer `None` wins, otherwise the inner option is the result.
pub fn join<A: 'static>() -> Fun<Option<Option<A>>, Option<A>> {
    Fun::new(Option::flatten)
}

pub fn map<A: 'static, B: 'static>(f: Fun<A, B>) -> Fun<Option<A>, Option<B>> {
    Fun::new(move |x: Option<A>| match x {
        Some(value) => Some(f.call(value)),
        None => None,
    })
}

/// `map` followed by `join`.
pub fn bind<A: 'static, B: 'static>(f: Fun<A, Option<B>>) -> Fun<Option<A>, Option<B>> {
    map(f).then(join())
}
