//! The parse tree.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. Containers
//! own the ids of their children; every node except the root records the id
//! of its parent once, at creation. Nothing is ever removed, so ids stay
//! valid for the lifetime of the tree.
use alloc::{string::String, vec, vec::Vec};

use crate::{
    Value,
    tokenizer::{PartialToken, StringToken},
};

/// Index of a node in its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArrayState {
    Start,
    Value,
    Comma,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ObjectState {
    Start,
    Property,
    Comma,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PropertyState {
    /// The key's identifier is being lexed.
    Key,
    Colon,
    Value,
    End,
}

#[derive(Debug)]
pub(crate) struct Literal {
    /// Set once, when the token completes.
    pub value: Option<Value>,
    /// The token while it is incomplete.
    pub pending: Option<PartialToken>,
    pub parent: NodeId,
}

#[derive(Debug)]
pub(crate) struct Array {
    pub children: Vec<NodeId>,
    pub state: ArrayState,
    pub parent: NodeId,
}

#[derive(Debug)]
pub(crate) struct Object {
    /// Property nodes, in input order.
    pub children: Vec<NodeId>,
    pub state: ObjectState,
    pub parent: NodeId,
}

#[derive(Debug)]
pub(crate) struct Property {
    /// The Identifier node holding the key.
    pub key: NodeId,
    pub value: Option<NodeId>,
    pub state: PropertyState,
    /// Always an Object.
    pub parent: NodeId,
}

#[derive(Debug)]
pub(crate) struct Identifier {
    pub value: Option<String>,
    pub pending: Option<StringToken>,
    /// Always a Property.
    pub parent: NodeId,
}

#[derive(Debug)]
pub(crate) enum Node {
    Root { value: Option<NodeId> },
    Literal(Literal),
    Array(Array),
    Object(Object),
    Property(Property),
    Identifier(Identifier),
}

impl Node {
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Root { .. } => "root",
            Node::Literal(_) => "literal",
            Node::Array(_) => "array",
            Node::Object(_) => "object",
            Node::Property(_) => "property",
            Node::Identifier(_) => "identifier",
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Root { .. } => None,
            Node::Literal(Literal { parent, .. })
            | Node::Array(Array { parent, .. })
            | Node::Object(Object { parent, .. })
            | Node::Property(Property { parent, .. })
            | Node::Identifier(Identifier { parent, .. }) => Some(*parent),
        }
    }
}

/// A value-bearing node about to be attached to a parent.
#[derive(Debug)]
pub(crate) enum NewValue {
    Literal(PartialToken),
    Array,
    Object,
}

#[derive(Debug)]
pub(crate) struct Tree {
    nodes: Vec<Node>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::Root { value: None }],
        }
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Attaches the document's value to the root. Happens at most once.
    pub fn set_root(&mut self, child: NodeId) {
        if let Node::Root { value } = self.get_mut(NodeId::ROOT) {
            debug_assert!(value.is_none(), "root value set twice");
            *value = Some(child);
        }
    }

    pub fn literal_mut(&mut self, id: NodeId) -> &mut Literal {
        match self.get_mut(id) {
            Node::Literal(l) => l,
            other => unreachable!("expected literal, found {}", other.kind()),
        }
    }

    pub fn array_mut(&mut self, id: NodeId) -> &mut Array {
        match self.get_mut(id) {
            Node::Array(a) => a,
            other => unreachable!("expected array, found {}", other.kind()),
        }
    }

    pub fn object_mut(&mut self, id: NodeId) -> &mut Object {
        match self.get_mut(id) {
            Node::Object(o) => o,
            other => unreachable!("expected object, found {}", other.kind()),
        }
    }

    pub fn property_mut(&mut self, id: NodeId) -> &mut Property {
        match self.get_mut(id) {
            Node::Property(p) => p,
            other => unreachable!("expected property, found {}", other.kind()),
        }
    }

    pub fn identifier_mut(&mut self, id: NodeId) -> &mut Identifier {
        match self.get_mut(id) {
            Node::Identifier(i) => i,
            other => unreachable!("expected identifier, found {}", other.kind()),
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Allocates a value node under `parent` without linking it into the
    /// parent's children.
    pub fn alloc_value(&mut self, parent: NodeId, new: NewValue) -> NodeId {
        let node = match new {
            NewValue::Literal(token) => Node::Literal(Literal {
                value: None,
                pending: Some(token),
                parent,
            }),
            NewValue::Array => Node::Array(Array {
                children: Vec::new(),
                state: ArrayState::Start,
                parent,
            }),
            NewValue::Object => Node::Object(Object {
                children: Vec::new(),
                state: ObjectState::Start,
                parent,
            }),
        };
        self.push(node)
    }

    /// Allocates a Property under `object` together with the Identifier for
    /// its key, returning `(property, identifier)`.
    pub fn alloc_property(&mut self, object: NodeId, key: StringToken) -> (NodeId, NodeId) {
        // The property's id is known before it exists: it is pushed first.
        let property = NodeId(self.nodes.len());
        let identifier = NodeId(self.nodes.len() + 1);
        self.push(Node::Property(Property {
            key: identifier,
            value: None,
            state: PropertyState::Key,
            parent: object,
        }));
        self.push(Node::Identifier(Identifier {
            value: None,
            pending: Some(key),
            parent: property,
        }));
        (property, identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::{NewValue, Node, NodeId, PropertyState, Tree};
    use crate::tokenizer::StringToken;

    #[test]
    fn new_tree_has_only_root() {
        let tree = Tree::new();
        assert_eq!(tree.len(), 1);
        assert!(matches!(tree.get(NodeId::ROOT), Node::Root { value: None }));
        assert_eq!(tree.get(NodeId::ROOT).parent(), None);
    }

    #[test]
    fn property_links_identifier_both_ways() {
        let mut tree = Tree::new();
        let object = tree.alloc_value(NodeId::ROOT, NewValue::Object);
        let (property, identifier) = tree.alloc_property(object, StringToken::new());

        let Node::Property(p) = tree.get(property) else {
            panic!("expected property, got {}", tree.get(property).kind());
        };
        assert_eq!(p.key, identifier);
        assert_eq!(p.parent, object);
        assert_eq!(p.state, PropertyState::Key);
        assert_eq!(tree.get(identifier).parent(), Some(property));
    }
}
