use crate::fun::Fun;

/// The outcome of one state transition: the new state and the value it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct StateData<S, A> {
    pub state: S,
    pub value: A,
}

impl<S, A> StateData<S, A> {
    pub fn new(state: S, value: A) -> Self {
        StateData { state, value }
    }

    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> StateData<S, B> {
        StateData {
            state: self.state,
            value: f(self.value),
        }
    }

    pub fn map_state(self, f: impl FnOnce(S) -> S) -> Self {
        StateData {
            state: f(self.state),
            value: self.value,
        }
    }

    pub fn into_pair(self) -> (S, A) {
        (self.state, self.value)
    }
}

impl<S, A> StateData<S, StateData<S, A>> {
    /// Keep the outer state and the inner value.
    pub fn join(self) -> StateData<S, A> {
        StateData {
            state: self.state,
            value: self.value.value,
        }
    }
}

/// A computation `S -> StateData<S, A>` that threads a state through.
pub struct StatefulFun<S, A>(Fun<S, StateData<S, A>>);

impl<S, A> Clone for StatefulFun<S, A> {
    fn clone(&self) -> Self {
        StatefulFun(self.0.clone())
    }
}

impl<S: 'static, A: 'static> StatefulFun<S, A> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(S) -> StateData<S, A> + 'static,
    {
        StatefulFun(Fun::new(f))
    }

    pub fn from_fun(f: Fun<S, StateData<S, A>>) -> Self {
        StatefulFun(f)
    }

    pub fn into_fun(self) -> Fun<S, StateData<S, A>> {
        self.0
    }

    pub fn run(&self, state: S) -> StateData<S, A> {
        self.0.call(state)
    }

    /// Return `value` and leave the state untouched.
    pub fn unit(value: A) -> Self
    where
        A: Clone,
    {
        StatefulFun::new(move |state| StateData::new(state, value.clone()))
    }

    pub fn map<B: 'static>(self, f: impl Fn(A) -> B + 'static) -> StatefulFun<S, B> {
        StatefulFun(self.0.then(Fun::new(move |data: StateData<S, A>| data.map(&f))))
    }

    /// Feed the produced value into `f` and run the step it returns on the new state.
    pub fn bind<B: 'static>(
        self,
        f: impl Fn(A) -> StatefulFun<S, B> + 'static,
    ) -> StatefulFun<S, B> {
        self.map(f).join()
    }

    /// Run `next` after `self`, discarding the value of `self`.
    pub fn then_run<B: 'static>(self, next: StatefulFun<S, B>) -> StatefulFun<S, B> {
        self.bind(move |_| next.clone())
    }
}

impl<S: 'static, A: 'static> StatefulFun<S, StatefulFun<S, A>> {
    pub fn join(self) -> StatefulFun<S, A> {
        StatefulFun::new(move |state| {
            let StateData { state, value: inner } = self.run(state);
            inner.run(state)
        })
    }
}

/// A step that exposes the current state as its value.
pub fn get_state<S: Clone + 'static>() -> StatefulFun<S, S> {
    StatefulFun::new(|state: S| StateData::new(state.clone(), state))
}

/// A step that discards the incoming state and installs `new_state`.
pub fn set_state<S: Clone + 'static>(new_state: S) -> StatefulFun<S, ()> {
    StatefulFun::new(move |_| StateData::new(new_state.clone(), ()))
}

pub fn modify_state<S: 'static>(f: impl Fn(S) -> S + 'static) -> StatefulFun<S, ()> {
    StatefulFun::new(move |state| StateData::new(f(state), ()))
}
