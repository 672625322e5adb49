use std::fmt;

use crate::collections::list::{self, List};

/// An insertion-ordered collection without duplicates, backed by a cons list.
#[derive(Debug, Clone)]
pub struct Set<A> {
    items: List<A>,
}

impl<A: PartialEq> Set<A> {
    pub fn empty() -> Self {
        Set { items: List::Empty }
    }

    /// Put `head` in front of `tail`, dropping any copy of `head` already in `tail`.
    pub fn cons(head: A, tail: Set<A>) -> Self {
        let rest: List<A> = tail.items.into_iter().filter(|item| *item != head).collect();
        Set {
            items: List::cons(head, rest),
        }
    }

    pub fn unit(value: A) -> Self {
        Set::cons(value, Set::empty())
    }

    pub fn contains(&self, value: &A) -> bool {
        self.items.iter().any(|item| item == value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> list::Iter<'_, A> {
        self.items.iter()
    }

    /// Images that collide are merged, keeping the first.
    pub fn map<B: PartialEq>(self, f: impl FnMut(A) -> B) -> Set<B> {
        self.items.into_iter().map(f).collect()
    }

    /// Union: the elements of `self` first, then those of `other` not yet present.
    pub fn plus(self, other: Set<A>) -> Set<A> {
        self.items.into_iter().chain(other.items).collect()
    }

    pub fn bind<B: PartialEq>(self, f: impl FnMut(A) -> Set<B>) -> Set<B> {
        self.map(f).join()
    }
}

impl<A: PartialEq> Set<Set<A>> {
    pub fn join(self) -> Set<A> {
        self.items
            .into_iter()
            .flat_map(|inner| inner.items)
            .collect()
    }
}

impl<A: PartialEq> FromIterator<A> for Set<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        let mut unique: Vec<A> = Vec::new();
        for item in iter {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Set {
            items: unique.into_iter().collect(),
        }
    }
}

impl<A> IntoIterator for Set<A> {
    type Item = A;
    type IntoIter = list::IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Order does not matter for equality.
impl<A: PartialEq> PartialEq for Set<A> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl<A: fmt::Display> fmt::Display for Set<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "}}")
    }
}
