//! List validation: types, widths, items, column lists and stray content

use mdoc_validate::mdoc::ast::{ArgKind, Argument, ListType, Macro, NodeId, NodeKind};
use mdoc_validate::mdoc::building::{BuildError, DocumentBuilder};
use mdoc_validate::mdoc::diagnostics::{DiagnosticCode, DiagnosticSeverity};
use mdoc_validate::mdoc::error::ValidationError;
use mdoc_validate::mdoc::testing::{arg, arg_with, close_block, codes, described, item, open_block, section};
use rstest::rstest;

fn list_with(args: Vec<Argument>, heads: &[&str]) -> (DocumentBuilder, NodeId) {
    let mut b = described();
    section(&mut b, "DESCRIPTION").unwrap();
    let bl = open_block(&mut b, Macro::Bl, args).unwrap();
    for head in heads {
        let words: Vec<&str> = if head.is_empty() { vec![] } else { vec![*head] };
        item(&mut b, &words, &["text"]).unwrap();
    }
    close_block(&mut b).unwrap();
    (b, bl)
}

#[rstest]
#[case(ArgKind::Bullet, "2n")]
#[case(ArgKind::Dash, "2n")]
#[case(ArgKind::Hyphen, "2n")]
#[case(ArgKind::Enum, "3n")]
fn default_widths(#[case] kind: ArgKind, #[case] width: &str) {
    let (b, bl) = list_with(vec![arg(kind)], &[""]);
    let list = b.tree()[bl].list().unwrap();
    assert_eq!(list.width.as_deref(), Some(width));
    assert!(b.diagnostics().is_empty(), "{:?}", b.diagnostics());
}

#[test]
fn tag_list_without_width_is_diagnosed_and_stays_tag() {
    let (b, bl) = list_with(vec![arg(ArgKind::Tag)], &["verylongflag"]);
    let list = b.tree()[bl].list().unwrap();
    assert_eq!(list.list_type, Some(ListType::Tag));
    assert_eq!(codes(b.diagnostics()), vec![DiagnosticCode::ListNoWidth]);
}

#[test]
fn tag_width_from_text_head() {
    let (b, bl) = list_with(vec![arg(ArgKind::Tag)], &["verylongflag"]);
    let node = &b.tree()[bl];
    assert_eq!(node.list().unwrap().width.as_deref(), Some("13n"));
    let width = node.arg(ArgKind::Width).unwrap();
    assert_eq!(width.values, vec!["13n"]);
}

#[test]
fn tag_width_from_macro_head() {
    let mut b = described();
    section(&mut b, "DESCRIPTION").unwrap();
    let bl = open_block(&mut b, Macro::Bl, vec![arg(ArgKind::Tag)]).unwrap();
    b.next_line();
    b.block(Macro::It, vec![]).unwrap();
    b.head().unwrap();
    b.elem(Macro::Ar, vec![]).unwrap();
    b.text("path").unwrap();
    b.close().unwrap();
    b.close().unwrap();
    b.body().unwrap();
    b.text("the path").unwrap();
    close_block(&mut b).unwrap();
    close_block(&mut b).unwrap();
    assert_eq!(b.tree()[bl].list().unwrap().width.as_deref(), Some("12n"));
}

#[test]
fn tag_width_without_items() {
    let (b, bl) = list_with(vec![arg(ArgKind::Tag)], &[]);
    assert_eq!(b.tree()[bl].list().unwrap().width.as_deref(), Some("10n"));
    // The empty body is reported as well.
    assert_eq!(
        codes(b.diagnostics()),
        vec![DiagnosticCode::ListNoWidth, DiagnosticCode::ArgCount]
    );
}

#[rstest]
#[case("Ds", "6n")]
#[case("Fl", "10n")]
#[case("Er", "17n")]
#[case("5n", "5n")]
#[case("indent", "indent")]
fn width_values_are_resolved(#[case] given: &str, #[case] expected: &str) {
    let (b, bl) = list_with(vec![arg(ArgKind::Tag), arg_with(ArgKind::Width, &[given])], &["x"]);
    let node = &b.tree()[bl];
    assert_eq!(node.list().unwrap().width.as_deref(), Some(expected));
    assert_eq!(node.arg(ArgKind::Width).unwrap().values, vec![expected]);
}

#[test]
fn missing_type_defaults_to_item() {
    let (b, bl) = list_with(vec![arg(ArgKind::Compact)], &[""]);
    assert_eq!(b.tree()[bl].list().unwrap().list_type, Some(ListType::Item));
    let diags = b.diagnostics();
    assert_eq!(codes(diags), vec![DiagnosticCode::ListNoType]);
    assert_eq!(diags[0].severity, DiagnosticSeverity::Error);
}

#[test]
fn repeated_and_late_types() {
    let (b, bl) = list_with(
        vec![arg(ArgKind::Compact), arg(ArgKind::Bullet), arg(ArgKind::Enum)],
        &[""],
    );
    assert_eq!(b.tree()[bl].list().unwrap().list_type, Some(ListType::Bullet));
    let diags = b.diagnostics();
    assert_eq!(
        codes(diags),
        vec![DiagnosticCode::ListTypeLate, DiagnosticCode::ListTypeRepeated]
    );
    assert_eq!(diags[0].context, "compact");
    assert_eq!(diags[1].context, "enum");
}

#[test]
fn width_ignored_for_item_lists() {
    let (b, _) = list_with(vec![arg(ArgKind::Item), arg_with(ArgKind::Width, &["4n"])], &[""]);
    let diags = b.diagnostics();
    assert_eq!(codes(diags), vec![DiagnosticCode::ArgIgnored]);
    assert_eq!(diags[0].context, "Bl -width");
}

#[test]
fn item_checks_by_list_type() {
    let mut b = described();
    section(&mut b, "DESCRIPTION").unwrap();
    open_block(&mut b, Macro::Bl, vec![arg(ArgKind::Bullet)]).unwrap();
    item(&mut b, &["word"], &[]).unwrap();
    close_block(&mut b).unwrap();
    open_block(&mut b, Macro::Bl, vec![arg(ArgKind::Inset)]).unwrap();
    item(&mut b, &[], &["body"]).unwrap();
    close_block(&mut b).unwrap();

    let diags = b.diagnostics();
    assert_eq!(
        codes(diags),
        vec![
            DiagnosticCode::ItemNoBody,
            DiagnosticCode::ArgSkip,
            DiagnosticCode::ItemNoHead
        ]
    );
    assert_eq!(diags[0].context, "bullet");
    assert_eq!(diags[1].context, "It word");
    assert_eq!(diags[2].context, "inset");
}

#[test]
fn stray_content_moves_in_front_of_the_list() {
    let mut b = described();
    let sh = section(&mut b, "DESCRIPTION").unwrap();
    let bl = open_block(&mut b, Macro::Bl, vec![arg(ArgKind::Bullet)]).unwrap();
    b.next_line();
    let stray = b.text("stray").unwrap();
    item(&mut b, &[], &["one"]).unwrap();
    close_block(&mut b).unwrap();

    let body = b.tree()[sh].body().unwrap();
    let children: Vec<NodeId> = b.tree().children(body).collect();
    assert_eq!(children, vec![stray, bl]);
    let diags = b.diagnostics();
    assert_eq!(codes(diags), vec![DiagnosticCode::ListContentMoved]);
    assert_eq!(diags[0].severity, DiagnosticSeverity::Error);
}

#[test]
fn trailing_breaks_in_items() {
    let mut b = described();
    let sh = section(&mut b, "DESCRIPTION").unwrap();
    let bl = open_block(&mut b, Macro::Bl, vec![arg(ArgKind::Bullet)]).unwrap();
    for word in ["one", "two"] {
        b.next_line();
        b.block(Macro::It, vec![]).unwrap();
        b.head().unwrap();
        b.close().unwrap();
        b.body().unwrap();
        b.text(word).unwrap();
        b.next_line();
        b.elem(Macro::Pp, vec![]).unwrap();
        b.close().unwrap();
        close_block(&mut b).unwrap();
    }
    close_block(&mut b).unwrap();

    let diags = b.diagnostics();
    assert_eq!(
        codes(diags),
        vec![DiagnosticCode::ParagraphSkipped, DiagnosticCode::ParagraphMoved]
    );
    assert_eq!(diags[0].context, "Pp before It");
    assert_eq!(diags[1].context, "Pp");

    let body = b.tree()[sh].body().unwrap();
    let toks: Vec<Option<Macro>> = b.tree().children(body).map(|c| b.tree()[c].tok).collect();
    assert_eq!(toks, vec![Some(Macro::Bl), Some(Macro::Pp)]);
    for it in b.tree().children(b.tree()[bl].body().unwrap()) {
        let item_body = b.tree()[it].body().unwrap();
        assert_eq!(b.tree().child_count(item_body), 1);
    }
}

fn column_list(columns: &[&str], head: &[&str], cells: usize) -> Result<(DocumentBuilder, NodeId), BuildError> {
    let mut b = described();
    section(&mut b, "DESCRIPTION")?;
    b.next_line();
    let bl = b.block(Macro::Bl, vec![arg_with(ArgKind::Column, columns)])?;
    b.head()?;
    b.words(head.iter().copied())?;
    b.close()?;
    b.body()?;
    b.next_line();
    b.block(Macro::It, vec![])?;
    b.head()?;
    b.close()?;
    for cell in 0..cells {
        b.body()?;
        b.text(format!("cell{cell}"))?;
        b.close()?;
    }
    b.close()?;
    close_block(&mut b)?;
    Ok((b, bl))
}

#[rstest]
#[case(2)]
#[case(3)]
fn column_cell_counts_in_range(#[case] cells: usize) {
    let (b, bl) = column_list(&["a", "b"], &[], cells).unwrap();
    assert!(b.diagnostics().is_empty(), "{:?}", b.diagnostics());
    assert_eq!(b.tree()[bl].list().unwrap().columns, vec!["a", "b"]);
}

#[test]
fn too_few_column_cells_warn() {
    let (b, _) = column_list(&["a", "b"], &[], 1).unwrap();
    let diags = b.diagnostics();
    assert_eq!(codes(diags), vec![DiagnosticCode::ArgCount]);
    assert_eq!(diags[0].context, "columns == 2 (have 1)");
}

#[test]
fn too_many_column_cells_fail() {
    let err = column_list(&["a", "b"], &[], 4).err().unwrap();
    match err {
        BuildError::Validation(ValidationError::Structural { code, context, .. }) => {
            assert_eq!(code, DiagnosticCode::CellCount);
            assert_eq!(context, "columns == 2 (have 4)");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn old_style_column_widths_move_into_the_argument() {
    let (b, bl) = column_list(&[], &["xxxx", "yy"], 2).unwrap();
    let node = &b.tree()[bl];
    assert_eq!(node.list().unwrap().columns, vec!["xxxx", "yy"]);
    assert_eq!(node.arg(ArgKind::Column).unwrap().values, vec!["xxxx", "yy"]);
    let head = node.head().unwrap();
    assert_eq!(b.tree().child_count(head), 0);
}

#[test]
fn column_widths_in_both_places_fail() {
    let err = column_list(&["a"], &["b"], 1).err().unwrap();
    assert!(matches!(
        err,
        BuildError::Validation(ValidationError::Structural {
            code: DiagnosticCode::ColumnSyntax,
            ..
        })
    ));
}

#[test]
fn item_outside_list_fails() {
    let mut b = described();
    section(&mut b, "DESCRIPTION").unwrap();
    b.next_line();
    let err = b.block(Macro::It, vec![]).unwrap_err();
    assert!(matches!(
        err,
        BuildError::Validation(ValidationError::Structural {
            code: DiagnosticCode::ParentMismatch,
            ..
        })
    ));
    assert_eq!(b.diagnostics()[0].context, "want parent Bl");
    assert_eq!(b.tree()[b.current()].kind, NodeKind::Body);
}
