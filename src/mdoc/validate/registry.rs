//! Per-macro validation steps
//!
//! Every macro maps to an ordered list of pre steps and post steps. Macros
//! not listed have no steps.

use super::checks::Comparison;
use crate::mdoc::ast::{Macro, NodeKind};
use crate::mdoc::diagnostics::DiagnosticSeverity;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Steps run when a node is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreStep {
    /// Parent must be of `kind` and, unless `tok` is `None` (root), of macro `tok`.
    Parent { tok: Option<Macro>, kind: NodeKind },
    DisplayNesting,
    ListArgs,
    DisplayArgs,
    Literal,
    Paragraph,
    AuthorArgs,
    Std,
    Obsolete,
    PrologueDd,
    PrologueDt,
    PrologueOs,
}

/// Steps run when a node is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStep {
    /// Child count check, applied only to nodes of `kind`.
    Count {
        kind: NodeKind,
        severity: DiagnosticSeverity,
        cmp: Comparison,
        val: usize,
    },
    Paragraph,
    IgnorePar,
    Section,
    Hyphens,
    LiteralClear,
    List,
    Entry,
    Author,
    Defaults,
    Att,
    Std,
    Name,
    NoSpace,
    RememberEs,
    LinkEs,
    Standard,
    VtBody,
    Font,
    Bx,
    Boolean,
    EndOfLine,
    Library,
    References,
    Date,
    Title,
    Os,
    PrologueDelete,
}

impl PostStep {
    /// Whether the step also runs on an end-of-block marker body.
    pub fn runs_on_end_marker(self) -> bool {
        matches!(self, PostStep::LiteralClear)
    }
}

/// Pre and post steps of one macro.
#[derive(Debug, Clone, Copy)]
pub struct Valids {
    pub pre: &'static [PreStep],
    pub post: &'static [PostStep],
}

const fn count(kind: NodeKind, severity: DiagnosticSeverity, cmp: Comparison, val: usize) -> PostStep {
    PostStep::Count {
        kind,
        severity,
        cmp,
        val,
    }
}

const BERR_GE1: PostStep = count(NodeKind::Body, DiagnosticSeverity::Error, Comparison::Gt, 0);
const BWARN_GE1: PostStep = count(NodeKind::Body, DiagnosticSeverity::Warning, Comparison::Gt, 0);
const EWARN_EQ0: PostStep = count(NodeKind::Elem, DiagnosticSeverity::Warning, Comparison::Eq, 0);
const EWARN_EQ1: PostStep = count(NodeKind::Elem, DiagnosticSeverity::Warning, Comparison::Eq, 1);
const EWARN_GE1: PostStep = count(NodeKind::Elem, DiagnosticSeverity::Warning, Comparison::Gt, 0);
const EWARN_LE1: PostStep = count(NodeKind::Elem, DiagnosticSeverity::Warning, Comparison::Lt, 2);
const HWARN_EQ0: PostStep = count(NodeKind::Head, DiagnosticSeverity::Warning, Comparison::Eq, 0);
const HWARN_EQ1: PostStep = count(NodeKind::Head, DiagnosticSeverity::Warning, Comparison::Eq, 1);
const HWARN_GE1: PostStep = count(NodeKind::Head, DiagnosticSeverity::Warning, Comparison::Gt, 0);

const PRES_BD: &[PreStep] = &[
    PreStep::DisplayNesting,
    PreStep::DisplayArgs,
    PreStep::Literal,
    PreStep::Paragraph,
];
const PRES_BL: &[PreStep] = &[PreStep::ListArgs, PreStep::Paragraph];
const PRES_D1: &[PreStep] = &[PreStep::DisplayNesting];
const PRES_DL: &[PreStep] = &[PreStep::Literal, PreStep::DisplayNesting];
const PRES_IT: &[PreStep] = &[
    PreStep::Parent {
        tok: Some(Macro::Bl),
        kind: NodeKind::Body,
    },
    PreStep::Paragraph,
];
const PRES_SH: &[PreStep] = &[PreStep::Parent {
    tok: None,
    kind: NodeKind::Root,
}];
const PRES_SS: &[PreStep] = &[PreStep::Parent {
    tok: Some(Macro::Sh),
    kind: NodeKind::Body,
}];
const PRES_PP: &[PreStep] = &[PreStep::Paragraph];
const PRES_AN: &[PreStep] = &[PreStep::AuthorArgs];
const PRES_STD: &[PreStep] = &[PreStep::Std];
const PRES_OBSOLETE: &[PreStep] = &[PreStep::Obsolete];
const PRES_DD: &[PreStep] = &[PreStep::PrologueDd];
const PRES_DT: &[PreStep] = &[PreStep::PrologueDt];
const PRES_OS: &[PreStep] = &[PreStep::PrologueOs];

const POSTS_AN: &[PostStep] = &[PostStep::Author];
const POSTS_AT: &[PostStep] = &[PostStep::Att, PostStep::Defaults];
const POSTS_BD: &[PostStep] = &[PostStep::LiteralClear, HWARN_EQ0, BWARN_GE1];
const POSTS_BF: &[PostStep] = &[PostStep::Font];
const POSTS_BK: &[PostStep] = &[HWARN_EQ0, BWARN_GE1];
const POSTS_BL: &[PostStep] = &[BWARN_GE1, PostStep::List];
const POSTS_BX: &[PostStep] = &[PostStep::Bx];
const POSTS_BOOL: &[PostStep] = &[PostStep::Boolean];
const POSTS_EOLN: &[PostStep] = &[PostStep::EndOfLine];
const POSTS_DEFAULTS: &[PostStep] = &[PostStep::Defaults];
const POSTS_D1: &[PostStep] = &[BWARN_GE1, PostStep::Hyphens];
const POSTS_DD: &[PostStep] = &[PostStep::Date, PostStep::PrologueDelete];
const POSTS_DL: &[PostStep] = &[PostStep::LiteralClear, BWARN_GE1];
const POSTS_DT: &[PostStep] = &[PostStep::Title, PostStep::PrologueDelete];
const POSTS_EN: &[PostStep] = &[PostStep::LinkEs];
const POSTS_ES: &[PostStep] = &[PostStep::RememberEs];
const POSTS_FO: &[PostStep] = &[HWARN_EQ1, BWARN_GE1];
const POSTS_HYPH: &[PostStep] = &[PostStep::Hyphens];
const POSTS_HYPHTEXT: &[PostStep] = &[EWARN_GE1, PostStep::Hyphens];
const POSTS_IT: &[PostStep] = &[PostStep::Entry];
const POSTS_LB: &[PostStep] = &[PostStep::Library];
const POSTS_ND: &[PostStep] = &[BERR_GE1, PostStep::Hyphens];
const POSTS_NM: &[PostStep] = &[PostStep::Name];
const POSTS_NOTEXT: &[PostStep] = &[EWARN_EQ0];
const POSTS_NS: &[PostStep] = &[PostStep::NoSpace];
const POSTS_OS: &[PostStep] = &[PostStep::Os, PostStep::PrologueDelete];
const POSTS_PP: &[PostStep] = &[PostStep::Paragraph, EWARN_EQ0];
const POSTS_RS: &[PostStep] = &[PostStep::References];
const POSTS_SH: &[PostStep] = &[
    PostStep::IgnorePar,
    HWARN_GE1,
    PostStep::Section,
    PostStep::Hyphens,
];
const POSTS_SP: &[PostStep] = &[PostStep::Paragraph, EWARN_LE1];
const POSTS_SS: &[PostStep] = &[PostStep::IgnorePar, HWARN_GE1, PostStep::Hyphens];
const POSTS_ST: &[PostStep] = &[PostStep::Standard];
const POSTS_STD: &[PostStep] = &[PostStep::Std];
const POSTS_TEXT: &[PostStep] = &[EWARN_GE1];
const POSTS_TEXT1: &[PostStep] = &[EWARN_EQ1];
const POSTS_VT: &[PostStep] = &[PostStep::VtBody];

const NONE: Valids = Valids {
    pre: &[],
    post: &[],
};

const fn v(pre: &'static [PreStep], post: &'static [PostStep]) -> Valids {
    Valids { pre, post }
}

static REGISTRY: Lazy<HashMap<Macro, Valids>> = Lazy::new(|| {
    use Macro::*;
    HashMap::from([
        (Dd, v(PRES_DD, POSTS_DD)),
        (Dt, v(PRES_DT, POSTS_DT)),
        (Os, v(PRES_OS, POSTS_OS)),
        (Sh, v(PRES_SH, POSTS_SH)),
        (Ss, v(PRES_SS, POSTS_SS)),
        (Pp, v(PRES_PP, POSTS_PP)),
        (D1, v(PRES_D1, POSTS_D1)),
        (Dl, v(PRES_DL, POSTS_DL)),
        (Bd, v(PRES_BD, POSTS_BD)),
        (Bl, v(PRES_BL, POSTS_BL)),
        (It, v(PRES_IT, POSTS_IT)),
        (An, v(PRES_AN, POSTS_AN)),
        (Ar, v(&[], POSTS_DEFAULTS)),
        (Ex, v(PRES_STD, POSTS_STD)),
        (Fd, v(&[], POSTS_TEXT)),
        (In, v(&[], POSTS_TEXT1)),
        (Li, v(&[], POSTS_DEFAULTS)),
        (Nd, v(&[], POSTS_ND)),
        (Nm, v(&[], POSTS_NM)),
        (Ot, v(PRES_OBSOLETE, &[])),
        (Pa, v(&[], POSTS_DEFAULTS)),
        (Rv, v(PRES_STD, POSTS_STD)),
        (St, v(&[], POSTS_ST)),
        (Vt, v(&[], POSTS_VT)),
        (Xr, v(&[], POSTS_TEXT)),
        (RefA, v(&[], POSTS_TEXT)),
        (RefB, v(&[], POSTS_HYPHTEXT)),
        (RefD, v(&[], POSTS_TEXT)),
        (RefI, v(&[], POSTS_TEXT)),
        (RefJ, v(&[], POSTS_TEXT)),
        (RefN, v(&[], POSTS_HYPHTEXT)),
        (RefO, v(&[], POSTS_HYPHTEXT)),
        (RefP, v(&[], POSTS_TEXT)),
        (RefR, v(&[], POSTS_HYPHTEXT)),
        (RefT, v(&[], POSTS_HYPHTEXT)),
        (RefV, v(&[], POSTS_TEXT)),
        (At, v(&[], POSTS_AT)),
        (Bf, v(&[], POSTS_BF)),
        (Bx, v(&[], POSTS_BX)),
        (Db, v(&[], POSTS_BOOL)),
        (No, v(&[], POSTS_NOTEXT)),
        (Ns, v(&[], POSTS_NS)),
        (Pf, v(&[], POSTS_TEXT1)),
        (Rs, v(&[], POSTS_RS)),
        (Sm, v(&[], POSTS_BOOL)),
        (Sx, v(&[], POSTS_HYPH)),
        (Bk, v(&[], POSTS_BK)),
        (Bt, v(&[], POSTS_EOLN)),
        (Fr, v(PRES_OBSOLETE, &[])),
        (Ud, v(&[], POSTS_EOLN)),
        (Lb, v(&[], POSTS_LB)),
        (Lp, v(PRES_PP, POSTS_PP)),
        (Mt, v(&[], POSTS_DEFAULTS)),
        (RefC, v(&[], POSTS_TEXT)),
        (Es, v(PRES_OBSOLETE, POSTS_ES)),
        (En, v(PRES_OBSOLETE, POSTS_EN)),
        (RefQ, v(&[], POSTS_TEXT)),
        (Br, v(&[], POSTS_PP)),
        (Sp, v(&[], POSTS_SP)),
        (RefU, v(&[], POSTS_TEXT1)),
        (Fo, v(&[], POSTS_FO)),
    ])
});

/// Steps for `tok`.
pub fn lookup(tok: Macro) -> &'static Valids {
    REGISTRY.get(&tok).unwrap_or(&NONE)
}
