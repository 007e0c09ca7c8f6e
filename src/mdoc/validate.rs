//! Semantic validation and normalization
//!
//!     The parser calls [`Validator::validate_pre`] when it links a new node
//!     into the tree and [`Validator::validate_post`] when the node is
//!     complete. Each macro has a fixed list of pre and post steps (see
//!     [`registry`]); the steps live in the submodules, grouped by the part of
//!     the language they deal with.
//!
//!     Steps may emit diagnostics, fill in normalized data, rewrite the tree
//!     and update the [`DocumentMeta`]. A step that returns an error aborts
//!     the pass; the tree must not be rendered afterwards.
//!
//! Ordering
//!
//!     Pre steps see a node that is linked but has no children yet. Post
//!     steps run once all children are complete. A post step may delete the
//!     node it runs on; the remaining steps for that node are skipped.
//!     End-of-block markers only leave literal mode.

mod checks;
mod displays;
mod inline;
mod lists;
mod paragraphs;
mod prologue;
mod references;
pub mod registry;
mod sections;
mod text;

pub use checks::Comparison;
pub use lists::macro_width;
pub use text::substitute_hyphens;

use super::ast::{NodeId, NodeKind, Position, Tree};
use super::config::ValidationConfig;
use super::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use super::error::{ValidationError, ValidationResult};
use super::lookup::{Resolver, StandardResolver};
use super::meta::DocumentMeta;
use registry::{PostStep, PreStep};
use tracing::{debug, trace, warn};

/// Options that change validation behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Keep the `Dd` date verbatim.
    pub quick: bool,
    /// Operating system for an empty `Os`. When unset, the host system
    /// name from `std::env::consts::OS` is used, without a release.
    pub default_os: Option<String>,
}

impl From<&ValidationConfig> for ValidatorOptions {
    fn from(config: &ValidationConfig) -> Self {
        Self {
            quick: config.quick,
            default_os: config.default_os().map(str::to_string),
        }
    }
}

/// Owns the tree and the document state for one validation pass.
pub struct Validator<S: DiagnosticSink = Vec<Diagnostic>> {
    pub(crate) tree: Tree,
    pub(crate) meta: DocumentMeta,
    pub(crate) sink: S,
    resolver: Box<dyn Resolver>,
    options: ValidatorOptions,
}

impl Validator<Vec<Diagnostic>> {
    /// A validator over an empty tree that collects diagnostics in a vector.
    pub fn collecting() -> Self {
        Self::new(Tree::new(), Vec::new())
    }
}

impl<S: DiagnosticSink> Validator<S> {
    pub fn new(tree: Tree, sink: S) -> Self {
        Self {
            tree,
            meta: DocumentMeta::new(),
            sink,
            resolver: Box::new(StandardResolver),
            options: ValidatorOptions::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: impl Resolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.meta.quick = options.quick;
        self.options = options;
        self
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut DocumentMeta {
        &mut self.meta
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_parts(self) -> (Tree, DocumentMeta, S) {
        (self.tree, self.meta, self.sink)
    }

    /// Validate a node that was just linked into the tree.
    pub fn validate_pre(&mut self, id: NodeId) -> ValidationResult {
        let node = self.node(id)?;
        let (kind, tok, pos) = (node.kind, node.tok, node.pos);
        match kind {
            NodeKind::Text => {
                let word = node.string.clone().unwrap_or_default();
                self.check_text(pos, &word);
                return Ok(());
            }
            NodeKind::Tbl | NodeKind::Eqn | NodeKind::Root => return Ok(()),
            _ => {}
        }
        let Some(tok) = tok else {
            return Err(ValidationError::invariant(format!(
                "{kind} node {id} without a macro"
            )));
        };
        debug!(macro_name = tok.name(), %kind, %pos, "pre");
        self.check_args(id);
        for step in registry::lookup(tok).pre {
            trace!(?step, "pre step");
            self.run_pre(*step, id).inspect_err(|err| {
                warn!(macro_name = tok.name(), %pos, %err, "pre validation failed");
            })?;
        }
        Ok(())
    }

    /// Validate a completed node. Runs at most once per node.
    pub fn validate_post(&mut self, id: NodeId) -> ValidationResult {
        let node = self.node(id)?;
        if node.flags.validated {
            return Ok(());
        }
        let (kind, tok, pos) = (node.kind, node.tok, node.pos);
        let marker = node.pending.is_some();
        self.tree[id].flags.validated = true;
        if marker {
            trace!(%id, "end-of-block marker");
            let steps = tok.map_or(&[][..], |t| registry::lookup(t).post);
            for step in steps.iter().filter(|s| s.runs_on_end_marker()) {
                self.run_post(*step, id)?;
            }
            return Ok(());
        }
        match kind {
            NodeKind::Text | NodeKind::Tbl | NodeKind::Eqn => return Ok(()),
            NodeKind::Root => return self.post_root(id),
            _ => {}
        }
        let Some(tok) = tok else {
            return Err(ValidationError::invariant(format!(
                "{kind} node {id} without a macro"
            )));
        };
        debug!(macro_name = tok.name(), %kind, %pos, "post");
        for step in registry::lookup(tok).post {
            if !self.tree.contains(id) {
                trace!(macro_name = tok.name(), "node deleted, skipping remaining steps");
                break;
            }
            trace!(?step, "post step");
            self.run_post(*step, id).inspect_err(|err| {
                warn!(macro_name = tok.name(), %pos, %err, "post validation failed");
            })?;
        }
        Ok(())
    }

    fn run_pre(&mut self, step: PreStep, id: NodeId) -> ValidationResult {
        match step {
            PreStep::Parent { tok, kind } => self.check_parent(id, tok, kind),
            PreStep::DisplayNesting => self.pre_display(id),
            PreStep::ListArgs => self.pre_bl(id),
            PreStep::DisplayArgs => self.pre_bd(id),
            PreStep::Literal => self.pre_literal(id),
            PreStep::Paragraph => self.pre_par(id),
            PreStep::AuthorArgs => self.pre_an(id),
            PreStep::Std => self.pre_std(id),
            PreStep::Obsolete => self.pre_obsolete(id),
            PreStep::PrologueDd => self.pre_dd(id),
            PreStep::PrologueDt => self.pre_dt(id),
            PreStep::PrologueOs => self.pre_os(id),
        }
    }

    fn run_post(&mut self, step: PostStep, id: NodeId) -> ValidationResult {
        match step {
            PostStep::Count {
                kind,
                severity,
                cmp,
                val,
            } => {
                self.check_count(id, kind, severity, cmp, val);
                Ok(())
            }
            PostStep::Paragraph => self.post_par(id),
            PostStep::IgnorePar => self.post_ignpar(id),
            PostStep::Section => self.post_sh(id),
            PostStep::Hyphens => self.post_hyph(id),
            PostStep::LiteralClear => self.post_literal(id),
            PostStep::List => self.post_bl(id),
            PostStep::Entry => self.post_it(id),
            PostStep::Author => self.post_an(id),
            PostStep::Defaults => self.post_defaults(id),
            PostStep::Att => self.post_at(id),
            PostStep::Std => self.post_std(id),
            PostStep::Name => self.post_nm(id),
            PostStep::NoSpace => self.post_ns(id),
            PostStep::RememberEs => self.post_es(id),
            PostStep::LinkEs => self.post_en(id),
            PostStep::Standard => self.post_st(id),
            PostStep::VtBody => self.post_vt(id),
            PostStep::Font => self.post_bf(id),
            PostStep::Bx => self.post_bx(id),
            PostStep::Boolean => self.post_bool(id),
            PostStep::EndOfLine => self.post_eoln(id),
            PostStep::Library => self.post_lb(id),
            PostStep::References => self.post_rs(id),
            PostStep::Date => self.post_dd(id),
            PostStep::Title => self.post_dt(id),
            PostStep::Os => self.post_os(id),
            PostStep::PrologueDelete => self.post_prol(id),
        }
    }

    /// Live node or an invariant violation.
    pub(crate) fn node(&self, id: NodeId) -> Result<&super::ast::Node, ValidationError> {
        self.tree
            .get(id)
            .ok_or_else(|| ValidationError::invariant(format!("node {id} is not in the tree")))
    }

    pub(crate) fn emit(&mut self, code: DiagnosticCode, pos: Position, context: impl Into<String>) {
        self.emit_diagnostic(Diagnostic::new(code, pos, context));
    }

    /// Emit at the position of `id`.
    pub(crate) fn emit_at(&mut self, id: NodeId, code: DiagnosticCode, context: impl Into<String>) {
        let pos = self.tree.get(id).map(|n| n.pos).unwrap_or_default();
        self.emit(code, pos, context);
    }

    pub(crate) fn emit_diagnostic(&mut self, diagnostic: Diagnostic) {
        debug!(%diagnostic, "diagnostic");
        self.sink.emit(diagnostic);
    }

    pub(crate) fn resolver(&self) -> &dyn Resolver {
        self.resolver.as_ref()
    }

    pub(crate) fn options(&self) -> &ValidatorOptions {
        &self.options
    }
}
