use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Variable storage for running instructions: name to number, ordered by name.
///
/// Clones share the underlying map. Writing through [`Memory::with`] or
/// [`Memory::set`] copies it first if another snapshot still holds it, so an
/// earlier snapshot never observes a later write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Memory {
    cells: Rc<BTreeMap<String, f64>>,
}

impl Memory {
    pub fn new() -> Self {
        Memory::default()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.cells.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cells.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, f64> {
        self.cells.iter()
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        Rc::make_mut(&mut self.cells).insert(name.into(), value);
    }

    /// A new snapshot with `name` bound to `value`.
    pub fn with(&self, name: impl Into<String>, value: f64) -> Memory {
        let mut next = self.clone();
        next.set(name, value);
        next
    }

    /// `self` with every binding of `overrides` written over it.
    pub fn layered(&self, overrides: &Memory) -> Memory {
        overrides
            .iter()
            .fold(self.clone(), |memory, (name, value)| memory.with(name.as_str(), *value))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Memory {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Memory {
            cells: Rc::new(iter.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }
}

impl<'a> IntoIterator for &'a Memory {
    type Item = (&'a String, &'a f64);
    type IntoIter = btree_map::Iter<'a, String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Integral values print without a fractional part.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n == n.floor() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, format_number(*value))?;
        }
        write!(f, "}}")
    }
}
