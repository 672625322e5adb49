use proptest::prelude::*;

use procdsl::collections::{Dll, List, Set};
use procdsl::either::{self, Either};
use procdsl::{Fun, Process, StateData, StatefulFun, option};

fn halve() -> Fun<i32, Option<i32>> {
    Fun::new(|x: i32| if x % 2 == 0 { Some(x / 2) } else { None })
}

fn decrement_positive() -> Fun<i32, Option<i32>> {
    Fun::new(|x: i32| if x > 0 { Some(x - 1) } else { None })
}

fn third_of_natural() -> Fun<i32, Either<String, i32>> {
    Fun::new(|x: i32| {
        if x >= 0 {
            Either::Right(x / 3)
        } else {
            Either::Left(format!("negative: {x}"))
        }
    })
}

fn halve_even() -> Fun<i32, Either<String, i32>> {
    Fun::new(|x: i32| {
        if x % 2 == 0 {
            Either::Right(x / 2)
        } else {
            Either::Left(format!("odd: {x}"))
        }
    })
}

fn either_strategy() -> impl Strategy<Value = Either<String, i32>> {
    prop_oneof![
        any::<i32>().prop_map(Either::Right),
        "[a-z]{1,8}".prop_map(Either::Left),
    ]
}

fn step() -> StatefulFun<i32, i32> {
    StatefulFun::new(|s: i32| StateData::new(s.wrapping_add(1), s.wrapping_mul(2)))
}

fn stateful_f(a: i32) -> StatefulFun<i32, i32> {
    StatefulFun::new(move |s: i32| StateData::new(s ^ a, a.wrapping_sub(s)))
}

fn stateful_g(a: i32) -> StatefulFun<i32, i32> {
    StatefulFun::new(move |s: i32| StateData::new(s.wrapping_mul(3), a.wrapping_add(s)))
}

type Counter = Process<i32, String, i32>;

fn fallible() -> Counter {
    Process::new(|s: i32| {
        if s % 5 == 0 {
            Err(format!("multiple of five: {s}"))
        } else {
            Ok(StateData::new(s.wrapping_add(3), s % 7))
        }
    })
}

fn process_f(a: i32) -> Counter {
    Process::new(move |s: i32| {
        if (s ^ a) % 3 == 0 {
            Err("f rejected".to_string())
        } else {
            Ok(StateData::new(s.wrapping_mul(2), a.wrapping_add(s)))
        }
    })
}

fn process_g(a: i32) -> Counter {
    Process::new(move |s: i32| {
        if a < 0 {
            Err("g rejected".to_string())
        } else {
            Ok(StateData::new(s.wrapping_sub(a), s))
        }
    })
}

fn pair(x: i32) -> Vec<i32> {
    vec![x, x.wrapping_add(1)]
}

fn tens(x: i32) -> Vec<i32> {
    vec![x.wrapping_mul(10)]
}

proptest! {
    #[test]
    fn option_left_identity(x in any::<i32>()) {
        prop_assert_eq!(option::bind(halve()).call(option::unit().call(x)), halve().call(x));
    }

    #[test]
    fn option_right_identity(m in proptest::option::of(any::<i32>())) {
        prop_assert_eq!(option::bind(option::unit()).call(m), m);
    }

    #[test]
    fn option_associativity(m in proptest::option::of(any::<i32>())) {
        let lhs = option::bind(halve()).then(option::bind(decrement_positive())).call(m);
        let nested = Fun::new(|x: i32| option::bind(decrement_positive()).call(halve().call(x)));
        let rhs = option::bind(nested).call(m);
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn either_left_identity(x in any::<i32>()) {
        let lifted = either::unit::<String, i32>().call(x);
        prop_assert_eq!(either::bind(third_of_natural()).call(lifted), third_of_natural().call(x));
    }

    #[test]
    fn either_right_identity(m in either_strategy()) {
        prop_assert_eq!(either::bind(either::unit()).call(m.clone()), m);
    }

    #[test]
    fn either_associativity(m in either_strategy()) {
        let lhs = m.clone().bind(|x| third_of_natural().call(x)).bind(|y| halve_even().call(y));
        let rhs = m.bind(|x| third_of_natural().call(x).bind(|y| halve_even().call(y)));
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn stateful_left_identity(x in any::<i32>(), s in any::<i32>()) {
        prop_assert_eq!(StatefulFun::unit(x).bind(stateful_f).run(s), stateful_f(x).run(s));
    }

    #[test]
    fn stateful_right_identity(s in any::<i32>()) {
        prop_assert_eq!(step().bind(StatefulFun::unit).run(s), step().run(s));
    }

    #[test]
    fn stateful_associativity(s in any::<i32>()) {
        let lhs = step().bind(stateful_f).bind(stateful_g);
        let rhs = step().bind(|x| stateful_f(x).bind(stateful_g));
        prop_assert_eq!(lhs.run(s), rhs.run(s));
    }

    #[test]
    fn process_left_identity(x in any::<i32>(), s in any::<i32>()) {
        prop_assert_eq!(Counter::unit(x).bind(process_f).run(s), process_f(x).run(s));
    }

    #[test]
    fn process_right_identity(s in any::<i32>()) {
        prop_assert_eq!(fallible().bind(Counter::unit).run(s), fallible().run(s));
    }

    #[test]
    fn process_associativity(s in any::<i32>()) {
        let lhs = fallible().bind(process_f).bind(process_g);
        let rhs = fallible().bind(|x| process_f(x).bind(process_g));
        prop_assert_eq!(lhs.run(s), rhs.run(s));
    }

    #[test]
    fn then_run_stops_at_first_error(s in any::<i32>()) {
        let outcome = fallible().then_run(process_f(1)).run(s);
        match fallible().run(s) {
            Err(error) => {
                prop_assert_eq!(&error, &format!("multiple of five: {s}"));
                prop_assert_eq!(outcome, Err(error));
            }
            Ok(first) => prop_assert_eq!(outcome, process_f(1).run(first.state)),
        }
    }

    #[test]
    fn list_monad_laws(items in prop::collection::vec(any::<i32>(), 0..8), x in any::<i32>()) {
        let f = |v: i32| pair(v).into_iter().collect::<List<i32>>();
        let g = |v: i32| tens(v).into_iter().collect::<List<i32>>();
        let m: List<i32> = items.into_iter().collect();

        prop_assert_eq!(List::unit(x).bind(f), f(x));
        prop_assert_eq!(m.clone().bind(List::unit), m.clone());
        prop_assert_eq!(m.clone().bind(f).bind(g), m.bind(|v| f(v).bind(g)));
    }

    #[test]
    fn set_monad_laws(items in prop::collection::vec(-50i32..50, 0..8), x in -50i32..50) {
        let f = |v: i32| pair(v).into_iter().collect::<Set<i32>>();
        let g = |v: i32| tens(v).into_iter().collect::<Set<i32>>();
        let m: Set<i32> = items.into_iter().collect();

        prop_assert_eq!(Set::unit(x).bind(f), f(x));
        prop_assert_eq!(m.clone().bind(Set::unit), m.clone());
        prop_assert_eq!(m.clone().bind(f).bind(g), m.bind(|v| f(v).bind(g)));
    }

    #[test]
    fn dll_monad_laws_keep_links_consistent(items in prop::collection::vec(any::<i32>(), 0..8), x in any::<i32>()) {
        let f = |v: i32| pair(v).into_iter().collect::<Dll<i32>>();
        let m: Dll<i32> = items.into_iter().collect();

        let bound = m.clone().bind(f);
        prop_assert!(bound.validate().is_ok());
        prop_assert_eq!(Dll::unit(x).bind(f), f(x));
        prop_assert_eq!(m.clone().bind(Dll::unit), m);
    }

    #[test]
    fn repeat_counts_add(a in 0i64..20, b in 0i64..20, start in -1000i64..1000) {
        let incr = Fun::new(|x: i64| x + 1);
        let split = incr.clone().repeat(a).then(incr.clone().repeat(b));
        prop_assert_eq!(split.call(start), incr.repeat(a + b).call(start));
    }
}
