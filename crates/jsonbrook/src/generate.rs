//! Materializes a [`Value`] from the parse tree.
//!
//! The walk keeps its own stack of open containers instead of recursing, so
//! querying a deeply nested document uses heap rather than call stack.
use alloc::{string::String, vec::Vec};

use crate::{
    Array, LiteralMode, Map, Value,
    tree::{Literal, Node, NodeId, Tree},
};

/// A container whose children are being generated.
enum Frame<'t> {
    Array {
        children: &'t [NodeId],
        next: usize,
        items: Array,
    },
    Object {
        /// Property nodes.
        children: &'t [NodeId],
        next: usize,
        entries: Map,
        /// Key of the property whose value is being generated.
        key: Option<String>,
    },
}

impl<'t> Frame<'t> {
    /// The next child to generate. Properties without a value to show yet
    /// are skipped.
    fn next_child(&mut self, tree: &'t Tree) -> Option<NodeId> {
        match self {
            Frame::Array { children, next, .. } => {
                let child = children.get(*next).copied()?;
                *next += 1;
                Some(child)
            }
            Frame::Object {
                children, next, key, ..
            } => {
                while let Some(&property) = children.get(*next) {
                    *next += 1;
                    if let Some((name, value)) = entry(tree, property) {
                        *key = Some(name.clone());
                        return Some(value);
                    }
                }
                None
            }
        }
    }

    /// Takes the generated value of the child returned by the last
    /// [`next_child`](Frame::next_child) call.
    fn absorb(&mut self, value: Option<Value>) {
        match self {
            Frame::Array { items, .. } => items.extend(value),
            Frame::Object { entries, key, .. } => {
                if let (Some(key), Some(value)) = (key.take(), value) {
                    entries.insert(key, value);
                }
            }
        }
    }

    fn finish(self) -> Value {
        match self {
            Frame::Array { items, .. } => Value::Array(items),
            Frame::Object { entries, .. } => Value::Object(entries),
        }
    }
}

enum Visit {
    Done(Option<Value>),
    /// A container frame was pushed.
    Descended,
}

fn visit<'t>(tree: &'t Tree, id: NodeId, mode: LiteralMode, stack: &mut Vec<Frame<'t>>) -> Visit {
    match tree.get(id) {
        Node::Literal(literal) => Visit::Done(literal_value(literal, mode)),
        Node::Array(array) => {
            stack.push(Frame::Array {
                children: &array.children,
                next: 0,
                items: Array::with_capacity(array.children.len()),
            });
            Visit::Descended
        }
        Node::Object(object) => {
            stack.push(Frame::Object {
                children: &object.children,
                next: 0,
                entries: Map::with_capacity(object.children.len()),
                key: None,
            });
            Visit::Descended
        }
        Node::Root { .. } | Node::Property(_) | Node::Identifier(_) => Visit::Done(None),
    }
}

fn literal_value(literal: &Literal, mode: LiteralMode) -> Option<Value> {
    match (&literal.value, &literal.pending) {
        (Some(value), _) => Some(value.clone()),
        (None, Some(token)) if mode == LiteralMode::Provisional => token.provisional(),
        (None, _) => None,
    }
}

/// Key and value node of a property that has both.
fn entry(tree: &Tree, property: NodeId) -> Option<(&String, NodeId)> {
    let Node::Property(property) = tree.get(property) else {
        return None;
    };
    let value = property.value?;
    let Node::Identifier(key) = tree.get(property.key) else {
        return None;
    };
    Some((key.value.as_ref()?, value))
}

/// Generates the value of the whole document. `None` until the root has
/// something to show.
pub(crate) fn generate(tree: &Tree, mode: LiteralMode) -> Option<Value> {
    let Node::Root { value } = tree.get(NodeId::ROOT) else {
        return None;
    };
    let mut stack = Vec::new();
    if let Visit::Done(value) = visit(tree, (*value)?, mode, &mut stack) {
        return value;
    }

    // Value of the child just generated, to hand to the frame on top.
    let mut done: Option<Option<Value>> = None;
    while let Some(frame) = stack.last_mut() {
        if let Some(value) = done.take() {
            frame.absorb(value);
        }
        match frame.next_child(tree) {
            Some(child) => {
                if let Visit::Done(value) = visit(tree, child, mode, &mut stack) {
                    done = Some(value);
                }
            }
            None => {
                let finished = stack.pop().map(Frame::finish);
                if stack.is_empty() {
                    return finished;
                }
                done = Some(finished);
            }
        }
    }
    None
}
