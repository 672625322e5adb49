use std::fmt;

/// Inconsistencies found by [`Dll::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DllError {
    #[error("node {node} links to node {target}, but the arena only holds {len} nodes")]
    DanglingLink { node: usize, target: usize, len: usize },
    #[error("node {node} links forward to node {next}, but node {next} links back to {back:?}")]
    BrokenBackLink {
        node: usize,
        next: usize,
        back: Option<usize>,
    },
    #[error("first node {node} still has a previous node {prev}")]
    HeadHasPrev { node: usize, prev: usize },
    #[error("walking forward ends at node {walked:?}, but the last node is recorded as {tail:?}")]
    TailMismatch {
        walked: Option<usize>,
        tail: Option<usize>,
    },
    #[error("node {node} is visited twice while walking forward")]
    Cycle { node: usize },
    #[error("only {reachable} of {len} nodes are reachable from the first node")]
    Unreachable { reachable: usize, len: usize },
}

#[derive(Debug, Clone)]
struct Node<A> {
    value: A,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A doubly-linked list whose nodes live in a single arena.
///
/// Neighbor links are indices into the arena, so there are no reference
/// cycles; [`Dll::validate`] checks that the links agree with each other.
#[derive(Debug, Clone)]
pub struct Dll<A> {
    nodes: Vec<Node<A>>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<A> Default for Dll<A> {
    fn default() -> Self {
        Dll::empty()
    }
}

impl<A> Dll<A> {
    pub fn empty() -> Self {
        Dll {
            nodes: Vec::new(),
            head: None,
            tail: None,
        }
    }

    pub fn unit(value: A) -> Self {
        let mut dll = Dll::empty();
        dll.push_back(value);
        dll
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append `value` after the last node and return its index.
    pub fn push_back(&mut self, value: A) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(last) => self.nodes[last].next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        index
    }

    pub fn get(&self, index: usize) -> Option<&A> {
        self.nodes.get(index).map(|node| &node.value)
    }

    /// Follow `prev` links from `from` back to the first node.
    ///
    /// Returns `None` when `from` is out of range or the links loop.
    pub fn seek_start(&self, from: usize) -> Option<usize> {
        let mut current = from;
        for _ in 0..self.nodes.len() {
            match self.nodes.get(current)?.prev {
                Some(prev) => current = prev,
                None => return Some(current),
            }
        }
        None
    }

    pub fn iter(&self) -> Iter<'_, A> {
        Iter {
            dll: self,
            cursor: self.head,
            remaining: self.nodes.len(),
            forward: true,
        }
    }

    pub fn iter_rev(&self) -> Iter<'_, A> {
        Iter {
            dll: self,
            cursor: self.tail,
            remaining: self.nodes.len(),
            forward: false,
        }
    }

    /// The node at `index` together with its direct neighbors.
    pub fn neighbors(&self, index: usize) -> Option<Neighbors<'_, A>> {
        let node = self.nodes.get(index)?;
        Some(Neighbors {
            prev: node.prev.and_then(|i| self.get(i)),
            value: &node.value,
            next: node.next.and_then(|i| self.get(i)),
        })
    }

    /// Transform every value. The link structure is kept as is.
    pub fn map<B>(self, mut f: impl FnMut(A) -> B) -> Dll<B> {
        Dll {
            nodes: self
                .nodes
                .into_iter()
                .map(|node| Node {
                    value: f(node.value),
                    prev: node.prev,
                    next: node.next,
                })
                .collect(),
            head: self.head,
            tail: self.tail,
        }
    }

    /// Concatenate: all nodes of `self` in order, then all nodes of `other`.
    pub fn plus(self, other: Dll<A>) -> Dll<A> {
        let mut joined: Dll<A> = self.into_iter().collect();
        for value in other {
            joined.push_back(value);
        }
        joined
    }

    pub fn bind<B>(self, f: impl FnMut(A) -> Dll<B>) -> Dll<B> {
        self.map(f).join()
    }

    /// Check that every link has a matching back link and that walking
    /// forward from the first node visits every node exactly once.
    pub fn validate(&self) -> Result<(), DllError> {
        let len = self.nodes.len();
        let in_arena = |node: usize, target: usize| {
            if target < len {
                Ok(target)
            } else {
                Err(DllError::DanglingLink { node, target, len })
            }
        };

        for (index, node) in self.nodes.iter().enumerate() {
            if let Some(prev) = node.prev {
                in_arena(index, prev)?;
            }
            if let Some(next) = node.next {
                let next = in_arena(index, next)?;
                let back = self.nodes[next].prev;
                if back != Some(index) {
                    return Err(DllError::BrokenBackLink {
                        node: index,
                        next,
                        back,
                    });
                }
            }
        }

        let Some(head) = self.head else {
            return if len == 0 && self.tail.is_none() {
                Ok(())
            } else {
                Err(DllError::Unreachable { reachable: 0, len })
            };
        };
        let head = in_arena(head, head)?;
        if let Some(prev) = self.nodes[head].prev {
            return Err(DllError::HeadHasPrev { node: head, prev });
        }

        let mut visited = vec![false; len];
        let mut reachable = 0;
        let mut last = None;
        let mut cursor = Some(head);
        while let Some(index) = cursor {
            if visited[index] {
                return Err(DllError::Cycle { node: index });
            }
            visited[index] = true;
            reachable += 1;
            last = Some(index);
            cursor = self.nodes[index].next;
        }

        if last != self.tail {
            return Err(DllError::TailMismatch {
                walked: last,
                tail: self.tail,
            });
        }
        if reachable != len {
            return Err(DllError::Unreachable { reachable, len });
        }
        Ok(())
    }
}

impl<A> Dll<Dll<A>> {
    pub fn join(self) -> Dll<A> {
        let mut joined = Dll::empty();
        for inner in self {
            for value in inner {
                joined.push_back(value);
            }
        }
        joined
    }
}

impl<A> FromIterator<A> for Dll<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        let mut dll = Dll::empty();
        for value in iter {
            dll.push_back(value);
        }
        dll
    }
}

impl<A> IntoIterator for Dll<A> {
    type Item = A;
    type IntoIter = std::vec::IntoIter<A>;

    /// Values in link order, starting from the first node.
    fn into_iter(self) -> Self::IntoIter {
        let order: Vec<usize> = {
            let mut order = Vec::with_capacity(self.nodes.len());
            let mut cursor = self.head;
            while let Some(index) = cursor {
                if order.len() == self.nodes.len() {
                    break;
                }
                order.push(index);
                cursor = self.nodes.get(index).and_then(|node| node.next);
            }
            order
        };
        let mut slots: Vec<Option<A>> = self.nodes.into_iter().map(|node| Some(node.value)).collect();
        order
            .into_iter()
            .filter_map(|index| slots.get_mut(index).and_then(Option::take))
            .collect::<Vec<_>>()
            .into_iter()
    }
}

pub struct Iter<'a, A> {
    dll: &'a Dll<A>,
    cursor: Option<usize>,
    remaining: usize,
    forward: bool,
}

impl<'a, A> Iterator for Iter<'a, A> {
    type Item = &'a A;

    fn next(&mut self) -> Option<&'a A> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.dll.nodes.get(self.cursor?)?;
        self.remaining -= 1;
        self.cursor = if self.forward { node.next } else { node.prev };
        Some(&node.value)
    }
}

impl<A: PartialEq> PartialEq for Dll<A> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<A: fmt::Display> fmt::Display for Dll<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "[EMPTY]");
        }
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " <> ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

/// A node seen together with its direct neighbors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbors<'a, A> {
    pub prev: Option<&'a A>,
    pub value: &'a A,
    pub next: Option<&'a A>,
}

impl<A: fmt::Display> fmt::Display for Neighbors<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prev {
            Some(prev) => write!(f, "({} < ", prev)?,
            None => write!(f, "(EMPTY < ")?,
        }
        write!(f, "{}", self.value)?;
        match self.next {
            Some(next) => write!(f, " > {})", next),
            None => write!(f, " > EMPTY)"),
        }
    }
}
