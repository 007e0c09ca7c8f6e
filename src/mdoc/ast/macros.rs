//! Macro and argument identifiers
//!
//! The macro set is closed: every name the parser recognizes maps to one
//! [`Macro`] variant. Serialized forms use the macro name as written in the
//! manual page source (`Bl`, `%A`, `br`).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

macro_rules! macro_table {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// An mdoc macro.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum Macro {
            $(
                #[serde(rename = $name)]
                $variant,
            )*
        }

        impl Macro {
            /// Every macro, in table order.
            pub const ALL: &'static [Macro] = &[$(Macro::$variant),*];

            /// Name as written in the source.
            pub fn name(self) -> &'static str {
                match self {
                    $(Macro::$variant => $name,)*
                }
            }
        }
    };
}

macro_table! {
    Ap => "Ap", Dd => "Dd", Dt => "Dt", Os => "Os",
    Sh => "Sh", Ss => "Ss", Pp => "Pp", D1 => "D1",
    Dl => "Dl", Bd => "Bd", Ed => "Ed", Bl => "Bl",
    El => "El", It => "It", Ad => "Ad", An => "An",
    Ar => "Ar", Cd => "Cd", Cm => "Cm", Dv => "Dv",
    Er => "Er", Ev => "Ev", Ex => "Ex", Fa => "Fa",
    Fd => "Fd", Fl => "Fl", Fn => "Fn", Ft => "Ft",
    Ic => "Ic", In => "In", Li => "Li", Nd => "Nd",
    Nm => "Nm", Op => "Op", Ot => "Ot", Pa => "Pa",
    Rv => "Rv", St => "St", Va => "Va", Vt => "Vt",
    Xr => "Xr", RefA => "%A", RefB => "%B", RefD => "%D",
    RefI => "%I", RefJ => "%J", RefN => "%N", RefO => "%O",
    RefP => "%P", RefR => "%R", RefT => "%T", RefV => "%V",
    Ac => "Ac", Ao => "Ao", Aq => "Aq", At => "At",
    Bc => "Bc", Bf => "Bf", Bo => "Bo", Bq => "Bq",
    Bsx => "Bsx", Bx => "Bx", Db => "Db", Dc => "Dc",
    Do => "Do", Dq => "Dq", Ec => "Ec", Ef => "Ef",
    Em => "Em", Eo => "Eo", Fx => "Fx", Ms => "Ms",
    No => "No", Ns => "Ns", Nx => "Nx", Ox => "Ox",
    Pc => "Pc", Pf => "Pf", Po => "Po", Pq => "Pq",
    Qc => "Qc", Ql => "Ql", Qo => "Qo", Qq => "Qq",
    Re => "Re", Rs => "Rs", Sc => "Sc", So => "So",
    Sq => "Sq", Sm => "Sm", Sx => "Sx", Sy => "Sy",
    Tn => "Tn", Ux => "Ux", Xc => "Xc", Xo => "Xo",
    Fo => "Fo", Fc => "Fc", Oo => "Oo", Oc => "Oc",
    Bk => "Bk", Ek => "Ek", Bt => "Bt", Hf => "Hf",
    Fr => "Fr", Ud => "Ud", Lb => "Lb", Lp => "Lp",
    Lk => "Lk", Mt => "Mt", Brq => "Brq", Bro => "Bro",
    Brc => "Brc", RefC => "%C", Es => "Es", En => "En",
    Dx => "Dx", RefQ => "%Q", Br => "br", Sp => "sp",
    RefU => "%U", Ta => "Ta", Ll => "ll",
}

static BY_NAME: Lazy<HashMap<&'static str, Macro>> =
    Lazy::new(|| Macro::ALL.iter().map(|m| (m.name(), *m)).collect());

impl Macro {
    /// Look up a macro by its source name.
    pub fn from_name(name: &str) -> Option<Macro> {
        BY_NAME.get(name).copied()
    }

    /// Paragraph-like break macros that the paragraph normalizer collapses.
    pub fn is_break(self) -> bool {
        matches!(self, Macro::Pp | Macro::Lp | Macro::Br)
    }
}

impl fmt::Display for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Macro argument identifiers (the `-width` in `Bl -tag -width Ds`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgKind {
    Split,
    Nosplit,
    Ragged,
    Unfilled,
    Literal,
    File,
    Offset,
    Bullet,
    Dash,
    Hyphen,
    Item,
    Enum,
    Tag,
    Diag,
    Hang,
    Ohang,
    Inset,
    Column,
    Width,
    Compact,
    Std,
    Filled,
    Words,
    Emphasis,
    Symbolic,
    Nested,
    #[serde(rename = "centered")]
    Centred,
}

impl ArgKind {
    /// Name without the leading dash.
    pub fn name(self) -> &'static str {
        match self {
            ArgKind::Split => "split",
            ArgKind::Nosplit => "nosplit",
            ArgKind::Ragged => "ragged",
            ArgKind::Unfilled => "unfilled",
            ArgKind::Literal => "literal",
            ArgKind::File => "file",
            ArgKind::Offset => "offset",
            ArgKind::Bullet => "bullet",
            ArgKind::Dash => "dash",
            ArgKind::Hyphen => "hyphen",
            ArgKind::Item => "item",
            ArgKind::Enum => "enum",
            ArgKind::Tag => "tag",
            ArgKind::Diag => "diag",
            ArgKind::Hang => "hang",
            ArgKind::Ohang => "ohang",
            ArgKind::Inset => "inset",
            ArgKind::Column => "column",
            ArgKind::Width => "width",
            ArgKind::Compact => "compact",
            ArgKind::Std => "std",
            ArgKind::Filled => "filled",
            ArgKind::Words => "words",
            ArgKind::Emphasis => "emphasis",
            ArgKind::Symbolic => "symbolic",
            ArgKind::Nested => "nested",
            ArgKind::Centred => "centered",
        }
    }

    /// Parse a name, with or without the leading dash.
    pub fn from_name(name: &str) -> Option<ArgKind> {
        let name = name.strip_prefix('-').unwrap_or(name);
        let kind = match name {
            "split" => ArgKind::Split,
            "nosplit" => ArgKind::Nosplit,
            "ragged" => ArgKind::Ragged,
            "unfilled" => ArgKind::Unfilled,
            "literal" => ArgKind::Literal,
            "file" => ArgKind::File,
            "offset" => ArgKind::Offset,
            "bullet" => ArgKind::Bullet,
            "dash" => ArgKind::Dash,
            "hyphen" => ArgKind::Hyphen,
            "item" => ArgKind::Item,
            "enum" => ArgKind::Enum,
            "tag" => ArgKind::Tag,
            "diag" => ArgKind::Diag,
            "hang" => ArgKind::Hang,
            "ohang" => ArgKind::Ohang,
            "inset" => ArgKind::Inset,
            "column" => ArgKind::Column,
            "width" => ArgKind::Width,
            "compact" => ArgKind::Compact,
            "std" => ArgKind::Std,
            "filled" => ArgKind::Filled,
            "words" => ArgKind::Words,
            "emphasis" => ArgKind::Emphasis,
            "symbolic" => ArgKind::Symbolic,
            "nested" => ArgKind::Nested,
            "centered" => ArgKind::Centred,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{}", self.name())
    }
}
