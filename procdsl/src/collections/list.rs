use std::fmt;

/// A singly-linked cons list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum List<A> {
    Empty,
    Cons(A, Box<List<A>>),
}

impl<A> Default for List<A> {
    fn default() -> Self {
        List::Empty
    }
}

impl<A> List<A> {
    pub fn empty() -> Self {
        List::Empty
    }

    pub fn cons(head: A, tail: List<A>) -> Self {
        List::Cons(head, Box::new(tail))
    }

    pub fn unit(value: A) -> Self {
        List::cons(value, List::Empty)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, List::Empty)
    }

    pub fn head(&self) -> Option<&A> {
        match self {
            List::Empty => None,
            List::Cons(head, _) => Some(head),
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn iter(&self) -> Iter<'_, A> {
        Iter { current: self }
    }

    pub fn map<B>(self, f: impl FnMut(A) -> B) -> List<B> {
        self.into_iter().map(f).collect()
    }

    /// Concatenate: every element of `self`, then every element of `other`.
    pub fn plus(self, other: List<A>) -> List<A> {
        let front: Vec<A> = self.into_iter().collect();
        front
            .into_iter()
            .rev()
            .fold(other, |tail, head| List::cons(head, tail))
    }

    /// `map` followed by `join`.
    pub fn bind<B>(self, f: impl FnMut(A) -> List<B>) -> List<B> {
        self.map(f).join()
    }
}

impl<A> List<List<A>> {
    pub fn join(self) -> List<A> {
        let lists: Vec<List<A>> = self.into_iter().collect();
        lists
            .into_iter()
            .rev()
            .fold(List::Empty, |joined, list| list.plus(joined))
    }
}

impl<A> FromIterator<A> for List<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        let items: Vec<A> = iter.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(List::Empty, |tail, head| List::cons(head, tail))
    }
}

pub struct Iter<'a, A> {
    current: &'a List<A>,
}

impl<'a, A> Iterator for Iter<'a, A> {
    type Item = &'a A;

    fn next(&mut self) -> Option<Self::Item> {
        match self.current {
            List::Empty => None,
            List::Cons(head, tail) => {
                self.current = tail;
                Some(head)
            }
        }
    }
}

pub struct IntoIter<A> {
    current: List<A>,
}

impl<A> Iterator for IntoIter<A> {
    type Item = A;

    fn next(&mut self) -> Option<A> {
        match std::mem::take(&mut self.current) {
            List::Empty => None,
            List::Cons(head, tail) => {
                self.current = *tail;
                Some(head)
            }
        }
    }
}

impl<A> IntoIterator for List<A> {
    type Item = A;
    type IntoIter = IntoIter<A>;

    fn into_iter(self) -> IntoIter<A> {
        IntoIter { current: self }
    }
}

impl<'a, A> IntoIterator for &'a List<A> {
    type Item = &'a A;
    type IntoIter = Iter<'a, A>;

    fn into_iter(self) -> Iter<'a, A> {
        self.iter()
    }
}

impl<A: fmt::Display> fmt::Display for List<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "[EMPTY]");
        }
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " => ")?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}
