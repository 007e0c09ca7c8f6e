//! Document builder
//!
//!     Plays the parser's part of the protocol: it allocates nodes, links them
//!     into the tree and calls the validator hooks in the order a real mdoc
//!     parser does. It does not tokenize; callers hand it macros, arguments and
//!     words that are already split.
//!
//!     The builder keeps a stack of open nodes. New nodes become the last child
//!     of the innermost open node. `block` and `elem` open a node, `head`,
//!     `body` and `tail` open a part of the innermost block, `text` adds a word
//!     and completes it at once, `close` completes the innermost open node.
//!
//!     Once a validation step fails the builder refuses all further input: the
//!     partially normalized tree must not be rendered.

use super::ast::{Argument, Macro, Node, NodeFlags, NodeId, NodeKind, Position, Tree};
use super::diagnostics::{Diagnostic, DiagnosticSink};
use super::error::ValidationError;
use super::lookup::Resolver;
use super::meta::DocumentMeta;
use super::validate::{Validator, ValidatorOptions};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("validation already failed, refusing further input")]
    Aborted,
    #[error("{kind} outside of an open block")]
    NotInBlock { kind: NodeKind },
    #[error("no open node to close")]
    NothingOpen,
}

/// A validated tree together with the metadata gathered while building it.
#[derive(Debug, Clone)]
pub struct Document {
    pub tree: Tree,
    pub meta: DocumentMeta,
}

impl Document {
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }
}

pub struct DocumentBuilder<S: DiagnosticSink = Vec<Diagnostic>> {
    validator: Validator<S>,
    open: Vec<NodeId>,
    line: usize,
    column: usize,
    line_start: bool,
    failed: bool,
}

impl DocumentBuilder<Vec<Diagnostic>> {
    pub fn new() -> Self {
        Self::from_validator(Validator::collecting())
    }
}

impl Default for DocumentBuilder<Vec<Diagnostic>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DiagnosticSink> DocumentBuilder<S> {
    pub fn with_sink(sink: S) -> Self {
        Self::from_validator(Validator::new(Tree::new(), sink))
    }

    pub fn from_validator(validator: Validator<S>) -> Self {
        let root = validator.tree().root();
        Self {
            validator,
            open: vec![root],
            line: 0,
            column: 1,
            line_start: true,
            failed: false,
        }
    }

    pub fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.validator = self.validator.with_options(options);
        self
    }

    pub fn with_resolver(mut self, resolver: impl Resolver + 'static) -> Self {
        self.validator = self.validator.with_resolver(resolver);
        self
    }

    pub fn tree(&self) -> &Tree {
        self.validator.tree()
    }

    pub fn meta(&self) -> &DocumentMeta {
        self.validator.meta()
    }

    pub fn diagnostics(&self) -> &S {
        self.validator.sink()
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Innermost open node.
    pub fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or_else(|| self.tree().root())
    }

    /// Start a new input line. The next node allocated is marked as the
    /// first on its line.
    pub fn at_line(&mut self, line: usize) -> &mut Self {
        self.line = line;
        self.column = 1;
        self.line_start = true;
        self
    }

    pub fn next_line(&mut self) -> &mut Self {
        let line = self.line + 1;
        self.at_line(line)
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// Open a block macro such as `Bl` or `Sh`.
    pub fn block(&mut self, tok: Macro, args: Vec<Argument>) -> Result<NodeId, BuildError> {
        let parent = self.current();
        let id = self.alloc(NodeKind::Block, tok, args, None)?;
        self.link(parent, id)?;
        self.open.push(id);
        Ok(id)
    }

    /// Open the head of the innermost block.
    pub fn head(&mut self) -> Result<NodeId, BuildError> {
        self.open_part(NodeKind::Head)
    }

    /// Open the body of the innermost block.
    pub fn body(&mut self) -> Result<NodeId, BuildError> {
        self.open_part(NodeKind::Body)
    }

    /// Open the tail of the innermost block.
    pub fn tail(&mut self) -> Result<NodeId, BuildError> {
        self.open_part(NodeKind::Tail)
    }

    /// Complete the open body and its block early, leaving an end-of-block
    /// marker after the block. The marker points back at the block through
    /// `pending`.
    pub fn end_body(&mut self) -> Result<NodeId, BuildError> {
        self.ensure_usable()?;
        let body = self.current();
        let block = match self.tree().get(body) {
            Some(node) if node.kind == NodeKind::Body => node.parent(),
            _ => None,
        };
        let enclosing = self.open.len().checked_sub(2).map(|i| self.open[i]);
        let Some(block) = block.filter(|b| enclosing == Some(*b)) else {
            return Err(BuildError::NotInBlock {
                kind: NodeKind::Body,
            });
        };
        let tok = self.tree()[block].tok;
        self.close()?;
        self.open.pop();
        let Some(tok) = tok else {
            return Err(self.fail(ValidationError::invariant(format!(
                "block {block} without a macro"
            ))));
        };
        let marker = self.alloc(NodeKind::Body, tok, Vec::new(), Some(block))?;
        self.validator.tree_mut().insert_after(block, marker);
        self.check(|v| v.validate_pre(marker))?;
        self.check(|v| v.validate_post(marker))?;
        self.check(|v| v.validate_post(block))?;
        Ok(marker)
    }

    /// Open an in-line macro such as `Fl` or `Nm`.
    pub fn elem(&mut self, tok: Macro, args: Vec<Argument>) -> Result<NodeId, BuildError> {
        let parent = self.current();
        let id = self.alloc(NodeKind::Elem, tok, args, None)?;
        self.link(parent, id)?;
        self.open.push(id);
        Ok(id)
    }

    /// Add a word to the innermost open node. Words are complete at once.
    pub fn text(&mut self, word: impl Into<String>) -> Result<NodeId, BuildError> {
        self.ensure_usable()?;
        let word = word.into();
        let parent = self.current();
        let mut node = Node::text(word.as_str(), self.position());
        self.stamp(&mut node);
        self.column += word.len() + 1;
        let id = self.validator.tree_mut().alloc(node);
        self.link(parent, id)?;
        self.check(|v| v.validate_post(id))?;
        Ok(id)
    }

    pub fn words<I, W>(&mut self, words: I) -> Result<(), BuildError>
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        for word in words {
            self.text(word)?;
        }
        Ok(())
    }

    /// Complete the innermost open node.
    pub fn close(&mut self) -> Result<(), BuildError> {
        self.ensure_usable()?;
        if self.open.len() <= 1 {
            return Err(BuildError::NothingOpen);
        }
        let Some(id) = self.open.pop() else {
            return Err(BuildError::NothingOpen);
        };
        self.check(|v| v.validate_post(id))
    }

    /// Complete every open node and the root, handing out the document.
    pub fn finish(mut self) -> Result<(Document, S), BuildError> {
        while self.open.len() > 1 {
            self.close()?;
        }
        self.ensure_usable()?;
        let root = self.tree().root();
        self.check(|v| v.validate_post(root))?;
        let (tree, meta, sink) = self.validator.into_parts();
        debug!(nodes = tree.len(), "document finished");
        Ok((Document { tree, meta }, sink))
    }

    fn open_part(&mut self, kind: NodeKind) -> Result<NodeId, BuildError> {
        self.ensure_usable()?;
        let block = self.current();
        let tok = match self.tree().get(block) {
            Some(node) if node.kind == NodeKind::Block => node.tok,
            _ => None,
        };
        let Some(tok) = tok else {
            return Err(BuildError::NotInBlock { kind });
        };
        let id = self.alloc(kind, tok, Vec::new(), None)?;
        self.link(block, id)?;
        self.open.push(id);
        Ok(id)
    }

    fn alloc(
        &mut self,
        kind: NodeKind,
        tok: Macro,
        args: Vec<Argument>,
        pending: Option<NodeId>,
    ) -> Result<NodeId, BuildError> {
        self.ensure_usable()?;
        let pos = self.position();
        let mut node = Node::new(kind, Some(tok), pos);
        node.args = args;
        for arg in node.args.iter_mut().filter(|a| a.pos == Position::default()) {
            arg.pos = pos;
        }
        node.pending = pending;
        if matches!(kind, NodeKind::Block | NodeKind::Elem) {
            self.stamp(&mut node);
            self.column += tok.name().len() + 1;
        } else {
            let meta = self.validator.meta();
            node.sec = meta.last_section;
            node.flags.literal = meta.literal;
            node.flags.synopsis = meta.in_synopsis;
        }
        Ok(self.validator.tree_mut().alloc(node))
    }

    /// Copy the current mode into a node that came from the input.
    fn stamp(&mut self, node: &mut Node) {
        let meta = self.validator.meta();
        node.sec = meta.last_section;
        node.flags = NodeFlags {
            validated: false,
            line: self.line_start,
            literal: meta.literal,
            spacing_off: meta.spacing_suppressed,
            synopsis: meta.in_synopsis,
        };
        self.line_start = false;
    }

    fn link(&mut self, parent: NodeId, id: NodeId) -> Result<(), BuildError> {
        self.validator.tree_mut().append_child(parent, id);
        self.check(|v| v.validate_pre(id))
    }

    /// Where the next node will be placed.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn check(
        &mut self,
        step: impl FnOnce(&mut Validator<S>) -> Result<(), ValidationError>,
    ) -> Result<(), BuildError> {
        match step(&mut self.validator) {
            Ok(()) => Ok(()),
            Err(err) => Err(self.fail(err)),
        }
    }

    fn fail(&mut self, err: ValidationError) -> BuildError {
        self.failed = true;
        BuildError::Validation(err)
    }

    fn ensure_usable(&self) -> Result<(), BuildError> {
        if self.failed {
            Err(BuildError::Aborted)
        } else {
            Ok(())
        }
    }
}
