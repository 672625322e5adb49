//! Building blocks of the imperative language: each one is a [`Process`] over
//! [`Memory`] that either yields a value and a new memory, or fails.

use procdsl::process::{self, Process};
use procdsl::state::StateData;

use crate::error::InstructionError;
use crate::memory::Memory;

pub type Instruction<A> = Process<Memory, InstructionError, A>;

/// The current value of `name`. Fails if it was never set.
pub fn get_variable(name: impl Into<String>) -> Instruction<f64> {
    let name = name.into();
    Process::new(move |memory: Memory| match memory.get(&name) {
        Some(value) => Ok(StateData::new(memory, value)),
        None => Err(InstructionError::UndefinedVariable(name.clone())),
    })
}

pub fn set_variable(name: impl Into<String>, value: f64) -> Instruction<()> {
    let name = name.into();
    Process::new(move |mut memory: Memory| {
        tracing::trace!(variable = %name, value, "set");
        memory.set(name.as_str(), value);
        Ok(StateData::new(memory, ()))
    })
}

/// Add one to `name`. Fails if it was never set.
pub fn increment_variable(name: impl Into<String>) -> Instruction<()> {
    let name = name.into();
    get_variable(name.clone()).bind(move |value| set_variable(name.clone(), value + 1.0))
}

pub fn has_variable(name: impl Into<String>) -> Instruction<bool> {
    let name = name.into();
    get_memory().map(move |memory| memory.contains(&name))
}

pub fn get_memory() -> Instruction<Memory> {
    process::get_state()
}

pub fn set_memory(memory: Memory) -> Instruction<()> {
    process::set_state(memory)
}

pub fn skip() -> Instruction<()> {
    Process::unit(())
}

pub fn constant<A: Clone + 'static>(value: A) -> Instruction<A> {
    Process::unit(value)
}

/// Run `first`, drop its value, then run `second` on the memory it left.
pub fn seq<A: 'static, B: 'static>(first: Instruction<A>, second: Instruction<B>) -> Instruction<B> {
    first.then_run(second)
}

/// Run `steps` in order, each on the memory the previous one left, stopping at the first failure.
///
/// The steps are walked in a loop, so a long list does not deepen the call stack.
pub fn sequence<A: 'static>(steps: Vec<Instruction<A>>) -> Instruction<()> {
    Process::new(move |mut memory: Memory| {
        for step in &steps {
            memory = step.run(memory)?.state;
        }
        Ok(StateData::new(memory, ()))
    })
}

pub fn if_then_else<A: 'static>(
    condition: Instruction<bool>,
    then_branch: Instruction<A>,
    else_branch: Instruction<A>,
) -> Instruction<A> {
    condition.bind(move |holds| {
        if holds {
            then_branch.clone()
        } else {
            else_branch.clone()
        }
    })
}

/// Run `body` for as long as `condition` yields true.
///
/// Evaluated in a loop rather than by recursion, so the number of iterations
/// is bounded only by `condition`. A condition that never turns false never returns.
pub fn while_loop<A: 'static>(condition: Instruction<bool>, body: Instruction<A>) -> Instruction<()> {
    Process::new(move |mut memory: Memory| {
        let mut iterations: u64 = 0;
        loop {
            let StateData { state, value: holds } = condition.run(memory)?;
            if !holds {
                tracing::debug!(iterations, "loop finished");
                return Ok(StateData::new(state, ()));
            }
            memory = body.run(state)?.state;
            iterations += 1;
            tracing::trace!(iterations, "loop iteration");
        }
    })
}

/// Run `attempt`; on failure run `recovery` from the memory `attempt` started with.
pub fn try_catch<A: 'static>(attempt: Instruction<A>, recovery: Instruction<A>) -> Instruction<A> {
    Process::try_catch(attempt, recovery)
}

pub fn log_message(message: impl Into<String>) -> Instruction<()> {
    let message = message.into();
    Process::new(move |memory: Memory| {
        tracing::info!("{}", message);
        Ok(StateData::new(memory, ()))
    })
}

/// Log the whole memory under `label`.
pub fn log_memory(label: impl Into<String>) -> Instruction<()> {
    let label = label.into();
    Process::new(move |memory: Memory| {
        tracing::info!("{}: {}", label, memory);
        Ok(StateData::new(memory, ()))
    })
}
