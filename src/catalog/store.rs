//! Ordered in-memory store for courses keyed by `CourseKey`.
//!
//! The store is an unbalanced binary search tree whose nodes live in a flat
//! arena and link to each other by index. Course catalogs arrive in roughly
//! shuffled key order, so the tree stays shallow enough without rebalancing.
//! Nodes are never removed individually; `clear` drops the whole arena.

use crate::catalog::identity::CourseKey;
use crate::catalog::model::Course;
use std::cmp::Ordering;

type NodeId = usize;

#[derive(Debug, Clone)]
struct Node {
    course: Course,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl Node {
    fn leaf(course: Course) -> Self {
        Node {
            course,
            left: None,
            right: None,
        }
    }
}

/// Outcome of `CourseStore::insert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The key was new; the store grew by one.
    Inserted,
    /// The key existed; its title and prerequisites were replaced.
    Updated,
}

impl Insertion {
    pub fn is_new(self) -> bool {
        matches!(self, Insertion::Inserted)
    }
}

#[derive(Debug, Clone, Default)]
/// Courses ordered by key, at most one per key.
pub struct CourseStore {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl CourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a course, or overwrite the title and prerequisites of the course
    /// already stored under the same key (last write wins).
    pub fn insert(&mut self, course: Course) -> Insertion {
        let Some(mut current) = self.root else {
            self.root = Some(self.nodes.len());
            self.nodes.push(Node::leaf(course));
            return Insertion::Inserted;
        };

        loop {
            let next_id = self.nodes.len();
            let node = &mut self.nodes[current];
            let slot = match course.key.cmp(&node.course.key) {
                Ordering::Equal => {
                    node.course.title = course.title;
                    node.course.prerequisites = course.prerequisites;
                    return Insertion::Updated;
                }
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
            };
            if let Some(child) = *slot {
                current = child;
                continue;
            }
            *slot = Some(next_id);
            self.nodes.push(Node::leaf(course));
            return Insertion::Inserted;
        }
    }

    /// Look up a course. The key is normalized again here, so raw user input
    /// and already-normalized keys both work.
    pub fn find(&self, key: &str) -> Option<&Course> {
        let key = CourseKey::new(key);
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match key.cmp(&node.course.key) {
                Ordering::Equal => return Some(&node.course),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Ascending traversal by key. Each call starts a fresh walk.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter {
            nodes: &self.nodes,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<'a> IntoIterator for &'a CourseStore {
    type Item = &'a Course;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy in-order iterator over a `CourseStore`.
///
/// Holds a shared borrow of the store, so the store cannot change mid-walk.
pub struct Iter<'a> {
    nodes: &'a [Node],
    stack: Vec<NodeId>,
}

impl<'a> Iter<'a> {
    fn push_left_spine(&mut self, mut next: Option<NodeId>) {
        while let Some(id) = next {
            self.stack.push(id);
            next = self.nodes[id].left;
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        let id = self.stack.pop()?;
        let node = &nodes[id];
        self.push_left_spine(node.right);
        Some(&node.course)
    }
}
