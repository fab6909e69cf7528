//! The incremental parser.
//!
//! [`JsonBrook`] consumes one character at a time and grows a parse tree
//! whose shape matches exactly the input consumed so far. Lexing happens
//! inline: an incomplete keyword, string or number lives inside the tree
//! node it will become, so the tree alone is enough to report a value at
//! any point.
//!
//! # Examples
//!
//! ```rust
//! use jsonbrook::{JsonBrook, Value};
//!
//! let mut parser = JsonBrook::default();
//! parser.write_str(r#"{"a": [1, 2"#).unwrap();
//! assert_eq!(parser.current_value().unwrap().to_string(), r#"{"a":[1,2]}"#);
//!
//! parser.write_str("3]}").unwrap();
//! parser.end().unwrap();
//! assert_eq!(parser.current_value().unwrap().to_string(), r#"{"a":[1,23]}"#);
//! ```
use tracing::{debug, trace};

use crate::{
    ParserError, ParserOptions, SyntaxError, Value,
    error::Status,
    generate::generate,
    position::Position,
    tokenizer::{self, Lexeme, PartialToken, Resumed, Symbol},
    tree::{ArrayState, NewValue, Node, NodeId, ObjectState, PropertyState, Tree},
};

/// An incremental JSON parser.
///
/// Feed characters with [`write`](JsonBrook::write) (or chunks with
/// [`write_str`](JsonBrook::write_str)), query
/// [`current_value`](JsonBrook::current_value) whenever needed, and call
/// [`end`](JsonBrook::end) once the input is exhausted.
///
/// After any error the parser is poisoned: further `write` and `end` calls
/// return the same error. The last reported value stays available.
#[derive(Debug)]
pub struct JsonBrook {
    options: ParserOptions,
    tree: Tree,
    /// The node open for the next character.
    current: NodeId,
    position: Position,
    /// Arrays and objects currently open.
    depth: usize,
    status: Status,
}

impl Default for JsonBrook {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl JsonBrook {
    /// Creates a parser that has not seen any input.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            tree: Tree::new(),
            current: NodeId::ROOT,
            position: Position::default(),
            depth: 0,
            status: Status::Open,
        }
    }

    /// Feeds one character.
    ///
    /// # Errors
    ///
    /// Returns a [`ParserError`] positioned at `ch` if it violates the JSON
    /// grammar, or [`SyntaxError::WriteAfterEnd`] after [`end`](Self::end).
    pub fn write(&mut self, ch: char) -> Result<(), ParserError> {
        match &self.status {
            Status::Open => {}
            Status::Ended => return Err(self.position.error(SyntaxError::WriteAfterEnd)),
            Status::Failed(err) => return Err(err.clone()),
        }

        // A number is only known to be complete once a character that cannot
        // extend it arrives; that character is then offered again to the
        // node the number closed into.
        let mut next = Some(ch);
        while let Some(ch) = next {
            next = match self.step(ch) {
                Ok(rest) => rest,
                Err(source) => return Err(self.fail(source)),
            };
        }
        self.position.advance(ch);
        Ok(())
    }

    /// Feeds every character of `text`.
    ///
    /// # Errors
    ///
    /// Stops at the first character [`write`](Self::write) rejects.
    pub fn write_str(&mut self, text: &str) -> Result<(), ParserError> {
        text.chars().try_for_each(|ch| self.write(ch))
    }

    /// Signals end of input.
    ///
    /// A number at the very end is committed here, since nothing else can
    /// terminate it. Calling `end` again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::UnexpectedEndOfInput`] if a token or container
    /// is still open. Empty input is not an error; the value stays absent.
    pub fn end(&mut self) -> Result<(), ParserError> {
        match &self.status {
            Status::Open => {}
            Status::Ended => return Ok(()),
            Status::Failed(err) => return Err(err.clone()),
        }
        if let Err(source) = self.finish() {
            return Err(self.fail(source));
        }
        debug!(nodes = self.tree.len(), "end of input");
        self.status = Status::Ended;
        Ok(())
    }

    /// The best-effort value of the input consumed so far.
    ///
    /// Returns `None` while there is nothing to show yet (no input, only
    /// whitespace, or an incomplete root literal with no value to report),
    /// which is distinct from `Some(Value::Null)`.
    #[must_use]
    pub fn current_value(&self) -> Option<Value> {
        generate(&self.tree, self.options.literal_mode)
    }

    /// Whether the root value has been fully parsed.
    ///
    /// A root number only completes once a following character or
    /// [`end`](Self::end) terminates it.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !matches!(self.status, Status::Failed(_))
            && self.current == NodeId::ROOT
            && matches!(self.tree.get(NodeId::ROOT), Node::Root { value: Some(_) })
    }

    fn fail(&mut self, source: SyntaxError) -> ParserError {
        let err = self.position.error(source);
        debug!(%err, node = self.tree.get(self.current).kind(), "syntax error");
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(!self.options.panic_on_error, "Syntax error: {err}");
        self.status = Status::Failed(err.clone());
        err
    }

    /// Consumes `ch` at the current node. Returns a character that still
    /// needs to be consumed, if any.
    fn step(&mut self, ch: char) -> Result<Option<char>, SyntaxError> {
        let current = self.current;
        match self.tree.get(current) {
            Node::Root { value: None } => {
                if let Some(new) = self.lex_value(ch)? {
                    let child = self.alloc(current, new)?;
                    self.tree.set_root(child);
                    self.enter(child);
                }
                Ok(None)
            }
            Node::Root { value: Some(_) } => {
                if self.options.is_whitespace(ch) {
                    Ok(None)
                } else {
                    Err(SyntaxError::TrailingCharacter(ch))
                }
            }
            Node::Literal(_) => self.step_literal(current, ch),
            Node::Array(array) => {
                let state = array.state;
                self.step_array(current, state, ch).map(|()| None)
            }
            Node::Object(object) => {
                let state = object.state;
                self.step_object(current, state, ch).map(|()| None)
            }
            Node::Property(property) => {
                let state = property.state;
                self.step_property(current, state, ch).map(|()| None)
            }
            Node::Identifier(_) => self.step_identifier(current, ch).map(|()| None),
        }
    }

    /// Lexes `ch` where a value may start. `None` means whitespace.
    fn lex_value(&self, ch: char) -> Result<Option<NewValue>, SyntaxError> {
        match tokenizer::start(ch, &self.options)? {
            Lexeme::Whitespace => Ok(None),
            Lexeme::Symbol(Symbol::BeginArray) => Ok(Some(NewValue::Array)),
            Lexeme::Symbol(Symbol::BeginObject) => Ok(Some(NewValue::Object)),
            Lexeme::Symbol(_) => Err(SyntaxError::InvalidCharacter(ch)),
            Lexeme::Partial(token) => Ok(Some(NewValue::Literal(token))),
        }
    }

    /// Lexes `ch` where only a separator, a terminator or whitespace may
    /// appear. `None` means whitespace.
    fn lex_symbol(&self, ch: char) -> Result<Option<Symbol>, SyntaxError> {
        match tokenizer::start(ch, &self.options)? {
            Lexeme::Whitespace => Ok(None),
            Lexeme::Symbol(symbol) => Ok(Some(symbol)),
            Lexeme::Partial(_) => Err(SyntaxError::InvalidCharacter(ch)),
        }
    }

    /// Allocates a value node under `parent`, counting it against
    /// `max_depth` if it is a container.
    fn alloc(&mut self, parent: NodeId, new: NewValue) -> Result<NodeId, SyntaxError> {
        if matches!(new, NewValue::Array | NewValue::Object) {
            if self.depth >= self.options.max_depth {
                return Err(SyntaxError::DepthLimitExceeded(self.options.max_depth));
            }
            self.depth += 1;
        }
        Ok(self.tree.alloc_value(parent, new))
    }

    fn enter(&mut self, node: NodeId) {
        trace!(node = self.tree.get(node).kind(), "enter");
        self.current = node;
    }

    /// Hands control from a completed node back to its parent.
    fn close(&mut self, node: NodeId) {
        let Some(parent) = self.tree.get(node).parent() else {
            return;
        };
        trace!(
            node = self.tree.get(node).kind(),
            parent = self.tree.get(parent).kind(),
            "close"
        );
        if matches!(self.tree.get(node), Node::Array(_) | Node::Object(_)) {
            self.depth -= 1;
        }
        self.current = match self.tree.get_mut(parent) {
            // Arrays moved to `Value` when the child was attached.
            Node::Root { .. } | Node::Array(_) => parent,
            Node::Property(property) => {
                property.state = PropertyState::End;
                // Objects moved to `Property` when the property was attached.
                property.parent
            }
            other => unreachable!("{} cannot hold a value", other.kind()),
        };
    }

    fn step_literal(&mut self, id: NodeId, ch: char) -> Result<Option<char>, SyntaxError> {
        let literal = self.tree.literal_mut(id);
        let Some(token) = literal.pending.as_mut() else {
            return Err(SyntaxError::InvalidCharacter(ch));
        };
        let (value, rest) = match token.resume(ch)? {
            Resumed::Pending => return Ok(None),
            Resumed::Complete(value) => (value, None),
            Resumed::CompleteWithRest(value, rest) => (value, Some(rest)),
        };
        literal.value = Some(value);
        literal.pending = None;
        self.close(id);
        Ok(rest)
    }

    fn step_array(&mut self, id: NodeId, state: ArrayState, ch: char) -> Result<(), SyntaxError> {
        match state {
            ArrayState::Start | ArrayState::Comma => {
                if state == ArrayState::Start && ch == ']' {
                    self.tree.array_mut(id).state = ArrayState::End;
                    self.close(id);
                    return Ok(());
                }
                if let Some(new) = self.lex_value(ch)? {
                    let child = self.alloc(id, new)?;
                    let array = self.tree.array_mut(id);
                    array.children.push(child);
                    array.state = ArrayState::Value;
                    self.enter(child);
                }
                Ok(())
            }
            ArrayState::Value => match self.lex_symbol(ch)? {
                None => Ok(()),
                Some(Symbol::Comma) => {
                    self.tree.array_mut(id).state = ArrayState::Comma;
                    Ok(())
                }
                Some(Symbol::EndArray) => {
                    self.tree.array_mut(id).state = ArrayState::End;
                    self.close(id);
                    Ok(())
                }
                Some(_) => Err(SyntaxError::InvalidCharacter(ch)),
            },
            ArrayState::End => Err(SyntaxError::InvalidCharacter(ch)),
        }
    }

    fn step_object(&mut self, id: NodeId, state: ObjectState, ch: char) -> Result<(), SyntaxError> {
        match state {
            ObjectState::Start | ObjectState::Comma => match tokenizer::start(ch, &self.options)? {
                Lexeme::Whitespace => Ok(()),
                Lexeme::Symbol(Symbol::EndObject) if state == ObjectState::Start => {
                    self.tree.object_mut(id).state = ObjectState::End;
                    self.close(id);
                    Ok(())
                }
                Lexeme::Partial(PartialToken::String(key)) => {
                    let (property, identifier) = self.tree.alloc_property(id, key);
                    let object = self.tree.object_mut(id);
                    object.children.push(property);
                    object.state = ObjectState::Property;
                    self.enter(identifier);
                    Ok(())
                }
                Lexeme::Symbol(_) | Lexeme::Partial(_) => Err(SyntaxError::InvalidCharacter(ch)),
            },
            ObjectState::Property => match self.lex_symbol(ch)? {
                None => Ok(()),
                Some(Symbol::Comma) => {
                    self.tree.object_mut(id).state = ObjectState::Comma;
                    Ok(())
                }
                Some(Symbol::EndObject) => {
                    self.tree.object_mut(id).state = ObjectState::End;
                    self.close(id);
                    Ok(())
                }
                Some(_) => Err(SyntaxError::InvalidCharacter(ch)),
            },
            ObjectState::End => Err(SyntaxError::InvalidCharacter(ch)),
        }
    }

    fn step_property(&mut self, id: NodeId, state: PropertyState, ch: char) -> Result<(), SyntaxError> {
        match state {
            PropertyState::Colon => match self.lex_symbol(ch)? {
                None => Ok(()),
                Some(Symbol::Colon) => {
                    self.tree.property_mut(id).state = PropertyState::Value;
                    Ok(())
                }
                Some(_) => Err(SyntaxError::InvalidCharacter(ch)),
            },
            PropertyState::Value => {
                if let Some(new) = self.lex_value(ch)? {
                    let child = self.alloc(id, new)?;
                    self.tree.property_mut(id).value = Some(child);
                    self.enter(child);
                }
                Ok(())
            }
            // The key's identifier is current while in `Key`, and a finished
            // property hands control to its object.
            PropertyState::Key | PropertyState::End => Err(SyntaxError::InvalidCharacter(ch)),
        }
    }

    fn step_identifier(&mut self, id: NodeId, ch: char) -> Result<(), SyntaxError> {
        let identifier = self.tree.identifier_mut(id);
        let Some(token) = identifier.pending.as_mut() else {
            return Err(SyntaxError::InvalidCharacter(ch));
        };
        let Some(key) = token.step(ch)? else {
            return Ok(());
        };
        identifier.value = Some(key);
        identifier.pending = None;
        let property = identifier.parent;
        self.tree.property_mut(property).state = PropertyState::Colon;
        self.enter(property);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SyntaxError> {
        let current = self.current;
        if let Node::Literal(literal) = self.tree.get_mut(current) {
            if let Some(PartialToken::Number(number)) = &literal.pending {
                let value = number.finish()?;
                literal.value = Some(Value::Number(value));
                literal.pending = None;
                self.close(current);
            }
        }
        if self.current == NodeId::ROOT {
            Ok(())
        } else {
            Err(SyntaxError::UnexpectedEndOfInput)
        }
    }
}
