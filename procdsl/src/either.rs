use crate::fun::{Fun, id};

/// A value that is exactly one of `Left` (conventionally an error) or `Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Either<E, A> {
    Left(E),
    Right(A),
}

/// An `Either` whose failure side is a message.
pub type Exception<A> = Either<String, A>;

impl<E, A> Either<E, A> {
    pub fn unit(value: A) -> Self {
        Either::Right(value)
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    pub fn left(self) -> Option<E> {
        match self {
            Either::Left(e) => Some(e),
            Either::Right(_) => None,
        }
    }

    pub fn right(self) -> Option<A> {
        match self {
            Either::Left(_) => None,
            Either::Right(a) => Some(a),
        }
    }

    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> Either<E, B> {
        match self {
            Either::Left(e) => Either::Left(e),
            Either::Right(a) => Either::Right(f(a)),
        }
    }

    pub fn map_left<F>(self, f: impl FnOnce(E) -> F) -> Either<F, A> {
        match self {
            Either::Left(e) => Either::Left(f(e)),
            Either::Right(a) => Either::Right(a),
        }
    }

    /// `map` followed by `join`.
    pub fn bind<B>(self, f: impl FnOnce(A) -> Either<E, B>) -> Either<E, B> {
        self.map(f).join()
    }

    pub fn fold<T>(self, on_left: impl FnOnce(E) -> T, on_right: impl FnOnce(A) -> T) -> T {
        match self {
            Either::Left(e) => on_left(e),
            Either::Right(a) => on_right(a),
        }
    }

    pub fn into_result(self) -> Result<A, E> {
        self.into()
    }
}

impl<E, A> Either<E, Either<E, A>> {
    /// Flatten one level. An outer `Left` wins over whatever is inside.
    pub fn join(self) -> Either<E, A> {
        match self {
            Either::Left(e) => Either::Left(e),
            Either::Right(inner) => inner,
        }
    }
}

impl<E, A> Either<Either<E, A>, A> {
    /// Flatten a nested left side, used when a failure is replaced by a retry.
    pub fn join_left(self) -> Either<E, A> {
        match self {
            Either::Left(inner) => inner,
            Either::Right(a) => Either::Right(a),
        }
    }
}

impl<E, A> From<Result<A, E>> for Either<E, A> {
    fn from(result: Result<A, E>) -> Self {
        match result {
            Ok(a) => Either::Right(a),
            Err(e) => Either::Left(e),
        }
    }
}

impl<E, A> From<Either<E, A>> for Result<A, E> {
    fn from(either: Either<E, A>) -> Self {
        match either {
            Either::Left(e) => Err(e),
            Either::Right(a) => Ok(a),
        }
    }
}

pub fn inl<E: 'static, A: 'static>() -> Fun<E, Either<E, A>> {
    Fun::new(Either::Left)
}

pub fn inr<E: 'static, A: 'static>() -> Fun<A, Either<E, A>> {
    Fun::new(Either::Right)
}

/// Map both sides: `f` over a left value, `g` over a right value.
pub fn map<E1, A1, E2, A2>(f: Fun<E1, E2>, g: Fun<A1, A2>) -> Fun<Either<E1, A1>, Either<E2, A2>>
where
    E1: 'static,
    A1: 'static,
    E2: 'static,
    A2: 'static,
{
    Fun::new(move |e: Either<E1, A1>| match e {
        Either::Left(l) => f.clone().then(inl()).call(l),
        Either::Right(r) => g.clone().then(inr()).call(r),
    })
}

pub fn map_right<E: 'static, A: 'static, B: 'static>(f: Fun<A, B>) -> Fun<Either<E, A>, Either<E, B>> {
    map(id(), f)
}

pub fn unit<E: 'static, A: 'static>() -> Fun<A, Either<E, A>> {
    inr()
}

pub fn join<E: 'static, A: 'static>() -> Fun<Either<E, Either<E, A>>, Either<E, A>> {
    Fun::new(Either::join)
}

pub fn join_left<E: 'static, A: 'static>() -> Fun<Either<Either<E, A>, A>, Either<E, A>> {
    Fun::new(Either::join_left)
}

pub fn bind<E: 'static, A: 'static, B: 'static>(
    f: Fun<A, Either<E, B>>,
) -> Fun<Either<E, A>, Either<E, B>> {
    map_right(f).then(join())
}

pub fn unit_exception<A: 'static>() -> Fun<A, Exception<A>> {
    unit()
}

pub fn create_exception<A: 'static>() -> Fun<String, Exception<A>> {
    inl()
}

pub fn bind_exception<A: 'static, B: 'static>(
    f: Fun<A, Exception<B>>,
) -> Fun<Exception<A>, Exception<B>> {
    bind(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqrt() -> Fun<f64, Exception<f64>> {
        Fun::new(|x: f64| {
            if x >= 0.0 {
                Either::Right(x.sqrt())
            } else {
                Either::Left("Cannot take square root of negative number".to_string())
            }
        })
    }

    #[test]
    fn map_transforms_each_side() {
        let both = map(Fun::new(|e: String| e.len()), Fun::new(|x: i32| x * 10));
        assert_eq!(both.call(Either::Left("four".to_string())), Either::Left(4));
        assert_eq!(both.call(Either::Right(2)), Either::Right(20));
    }

    #[test]
    fn join_outer_left_wins() {
        let outer: Either<&str, Either<&str, i32>> = Either::Left("outer");
        assert_eq!(outer.join(), Either::Left("outer"));

        let inner: Either<&str, Either<&str, i32>> = Either::Right(Either::Left("inner"));
        assert_eq!(inner.join(), Either::Left("inner"));

        let ok: Either<&str, Either<&str, i32>> = Either::Right(Either::Right(1));
        assert_eq!(ok.join(), Either::Right(1));
    }

    #[test]
    fn join_left_replaces_failure_with_inner() {
        let retried: Either<Either<&str, i32>, i32> = Either::Left(Either::Right(7));
        assert_eq!(retried.join_left(), Either::Right(7));

        let untouched: Either<Either<&str, i32>, i32> = Either::Right(3);
        assert_eq!(untouched.join_left(), Either::Right(3));
    }

    #[test]
    fn bind_short_circuits_on_left() {
        let fourth_root = sqrt().then(bind_exception(sqrt()));
        assert_eq!(fourth_root.call(16.0), Either::Right(2.0));
        assert_eq!(
            fourth_root.call(-16.0),
            Either::Left("Cannot take square root of negative number".to_string())
        );
    }

    #[test]
    fn converts_to_and_from_result() {
        let e: Either<String, i32> = Ok(5).into();
        assert_eq!(e, Either::Right(5));
        assert_eq!(Either::<&str, i32>::Left("no").into_result(), Err("no"));
    }

    #[test]
    fn fold_collapses_both_sides() {
        let describe = |e: Either<i32, &str>| e.fold(|n| format!("error {n}"), str::to_uppercase);
        assert_eq!(describe(Either::Left(3)), "error 3");
        assert_eq!(describe(Either::Right("ok")), "OK");
    }
}
