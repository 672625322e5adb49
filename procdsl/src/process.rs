use crate::either::Either;
use crate::fun::Fun;
use crate::state::{self, StateData, StatefulFun};

/// A state-threading computation that may stop with an error instead of a new state.
pub struct Process<S, E, A>(Fun<S, Result<StateData<S, A>, E>>);

impl<S, E, A> Clone for Process<S, E, A> {
    fn clone(&self) -> Self {
        Process(self.0.clone())
    }
}

impl<S: 'static, E: 'static, A: 'static> Process<S, E, A> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(S) -> Result<StateData<S, A>, E> + 'static,
    {
        Process(Fun::new(f))
    }

    pub fn run(&self, state: S) -> Result<StateData<S, A>, E> {
        self.0.call(state)
    }

    /// Succeed with `value` without touching the state.
    pub fn unit(value: A) -> Self
    where
        A: Clone,
    {
        Process::lift(StatefulFun::unit(value))
    }

    /// Always fail with `error`.
    pub fn fail(error: E) -> Self
    where
        E: Clone,
    {
        Process::new(move |_| Err(error.clone()))
    }

    /// Embed a step that cannot fail.
    pub fn lift(step: StatefulFun<S, A>) -> Self {
        Process(step.into_fun().then(Fun::new(Ok)))
    }

    pub fn map<B: 'static>(self, f: impl Fn(A) -> B + 'static) -> Process<S, E, B> {
        Process(self.0.then(Fun::new(
            move |outcome: Result<StateData<S, A>, E>| outcome.map(|data| data.map(&f)),
        )))
    }

    pub fn map_err<F: 'static>(self, f: impl Fn(E) -> F + 'static) -> Process<S, F, A> {
        Process(self.0.then(Fun::new(
            move |outcome: Result<StateData<S, A>, E>| outcome.map_err(&f),
        )))
    }

    /// Feed the produced value into `f` and run the process it returns on the new state.
    /// An error from `self` is returned as is and `f` is never called.
    pub fn bind<B: 'static>(
        self,
        f: impl Fn(A) -> Process<S, E, B> + 'static,
    ) -> Process<S, E, B> {
        self.map(f).join()
    }

    /// Run `next` after `self`, discarding the value of `self`.
    pub fn then_run<B: 'static>(self, next: Process<S, E, B>) -> Process<S, E, B> {
        self.bind(move |_| next.clone())
    }

    /// Run `attempt`; if it fails, run `recovery` against the state as it was
    /// before `attempt` started.
    pub fn try_catch(attempt: Self, recovery: Self) -> Self
    where
        S: Clone,
    {
        Process::new(move |snapshot: S| {
            let outcome: Either<E, StateData<S, A>> = attempt.run(snapshot.clone()).into();
            outcome
                .map_left(|_| {
                    tracing::debug!("attempt failed, running recovery on the prior state");
                    Either::from(recovery.run(snapshot))
                })
                .join_left()
                .into_result()
        })
    }
}

impl<S: 'static, E: 'static, A: 'static> Process<S, E, Process<S, E, A>> {
    pub fn join(self) -> Process<S, E, A> {
        Process::new(move |state| {
            let StateData { state, value: inner } = self.run(state)?;
            inner.run(state)
        })
    }
}

/// A process that exposes the current state as its value.
pub fn get_state<S: Clone + 'static, E: 'static>() -> Process<S, E, S> {
    Process::lift(state::get_state())
}

/// A process that replaces the state with `new_state`.
pub fn set_state<S: Clone + 'static, E: 'static>(new_state: S) -> Process<S, E, ()> {
    Process::lift(state::set_state(new_state))
}

#[cfg(test)]
mod tests {
    use super::*;

    type Counter<A> = Process<i32, String, A>;

    fn take(amount: i32) -> Counter<i32> {
        Process::new(move |n| {
            if n >= amount {
                Ok(StateData::new(n - amount, amount))
            } else {
                Err(format!("cannot take {amount} from {n}"))
            }
        })
    }

    #[test]
    fn unit_succeeds_without_state_change() {
        assert_eq!(Counter::unit("ok").run(4), Ok(StateData::new(4, "ok")));
    }

    #[test]
    fn map_transforms_success_only() {
        assert_eq!(take(2).map(|n| n * 100).run(5), Ok(StateData::new(3, 200)));
        assert_eq!(
            take(9).map(|n| n * 100).run(5),
            Err("cannot take 9 from 5".to_string())
        );
    }

    #[test]
    fn bind_threads_state_and_short_circuits() {
        let twice = take(2).bind(take);
        assert_eq!(twice.run(5), Ok(StateData::new(1, 2)));
        assert_eq!(twice.run(3), Err("cannot take 2 from 1".to_string()));
    }

    #[test]
    fn error_skips_later_steps() {
        let program = take(10).then_run(set_state(99));
        assert_eq!(program.run(1), Err("cannot take 10 from 1".to_string()));
    }

    #[test]
    fn join_runs_inner_process_on_new_state() {
        let nested = take(1).map(|_| take(3));
        assert_eq!(nested.join().run(4), Ok(StateData::new(0, 3)));
    }

    #[test]
    fn try_catch_recovers_from_prior_state() {
        // the attempt consumes state before failing; recovery must not see that
        let attempt = take(2).then_run(take(10));
        let recovery = get_state().map(|n: i32| -n);
        let program = Process::try_catch(attempt, recovery);
        assert_eq!(program.run(5), Ok(StateData::new(5, -5)));
    }

    #[test]
    fn try_catch_keeps_successful_attempt() {
        let program = Process::try_catch(take(2), Counter::fail("unused".to_string()));
        assert_eq!(program.run(5), Ok(StateData::new(3, 2)));
    }

    #[test]
    fn map_err_rewrites_failure() {
        let program = take(9).map_err(|e| e.len());
        assert_eq!(program.run(0), Err("cannot take 9 from 0".len()));
    }
}
