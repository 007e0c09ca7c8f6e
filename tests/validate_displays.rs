//! Display blocks, literal mode and font blocks

use mdoc_validate::mdoc::ast::{ArgKind, Argument, DisplayType, Font, Macro, Node, NodeId, NodeKind, Position};
use mdoc_validate::mdoc::building::{BuildError, DocumentBuilder};
use mdoc_validate::mdoc::diagnostics::DiagnosticCode;
use mdoc_validate::mdoc::error::ValidationError;
use mdoc_validate::mdoc::testing::{arg, arg_with, close_block, codes, described, open_block, section};
use mdoc_validate::mdoc::validate::Validator;
use rstest::rstest;

fn display(args: Vec<Argument>) -> (DocumentBuilder, NodeId) {
    let mut b = described();
    section(&mut b, "DESCRIPTION").unwrap();
    let bd = open_block(&mut b, Macro::Bd, args).unwrap();
    b.next_line();
    b.text("shown").unwrap();
    close_block(&mut b).unwrap();
    (b, bd)
}

#[test]
fn display_type_and_options() {
    let (b, bd) = display(vec![
        arg(ArgKind::Unfilled),
        arg_with(ArgKind::Offset, &["indent"]),
        arg(ArgKind::Compact),
    ]);
    let norm = b.tree()[bd].display().unwrap();
    assert_eq!(norm.display_type, Some(DisplayType::Unfilled));
    assert_eq!(norm.offset.as_deref(), Some("indent"));
    assert!(norm.compact);
    assert!(b.diagnostics().is_empty(), "{:?}", b.diagnostics());
}

#[test]
fn missing_display_type_defaults_to_ragged() {
    let (b, bd) = display(vec![]);
    let norm = b.tree()[bd].display().unwrap();
    assert_eq!(norm.display_type, Some(DisplayType::Ragged));
    assert_eq!(codes(b.diagnostics()), vec![DiagnosticCode::DisplayNoType]);
}

#[test]
fn first_display_type_wins() {
    let (b, bd) = display(vec![arg(ArgKind::Literal), arg(ArgKind::Centred)]);
    assert_eq!(
        b.tree()[bd].display().unwrap().display_type,
        Some(DisplayType::Literal)
    );
    let diags = b.diagnostics();
    assert_eq!(codes(diags), vec![DiagnosticCode::DisplayTypeRepeated]);
    assert_eq!(diags[0].context, "centered");
}

#[test]
fn repeated_options_keep_the_last_offset() {
    let (b, bd) = display(vec![
        arg(ArgKind::Ragged),
        arg_with(ArgKind::Offset, &["left"]),
        arg_with(ArgKind::Offset, &["right"]),
        arg(ArgKind::Compact),
        arg(ArgKind::Compact),
    ]);
    assert_eq!(b.tree()[bd].display().unwrap().offset.as_deref(), Some("right"));
    let diags = b.diagnostics();
    assert_eq!(
        codes(diags),
        vec![DiagnosticCode::ArgRepeated, DiagnosticCode::ArgRepeated]
    );
    assert_eq!(diags[0].context, "Bd -offset right");
    assert_eq!(diags[1].context, "Bd -compact");
}

#[test]
fn file_displays_are_refused() {
    let mut b = described();
    section(&mut b, "DESCRIPTION").unwrap();
    let err = open_block(&mut b, Macro::Bd, vec![arg(ArgKind::File)]).unwrap_err();
    match err {
        BuildError::Validation(ValidationError::Structural { code, context, .. }) => {
            assert_eq!(code, DiagnosticCode::DisplayUnsupported);
            assert_eq!(context, "Bd -file");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(b.is_failed());
}

#[test]
fn nested_displays_are_kept() {
    let mut b = described();
    section(&mut b, "DESCRIPTION").unwrap();
    let outer = open_block(&mut b, Macro::Bd, vec![arg(ArgKind::Ragged)]).unwrap();
    let inner = open_block(&mut b, Macro::Bd, vec![arg(ArgKind::Ragged)]).unwrap();
    b.next_line();
    b.text("inner").unwrap();
    close_block(&mut b).unwrap();
    let quote = open_block(&mut b, Macro::D1, vec![]).unwrap();
    b.text("quoted").unwrap();
    close_block(&mut b).unwrap();
    close_block(&mut b).unwrap();

    let body = b.tree()[outer].body().unwrap();
    let children: Vec<NodeId> = b.tree().children(body).collect();
    assert_eq!(children, vec![inner, quote]);
    let diags = b.diagnostics();
    assert_eq!(
        codes(diags),
        vec![DiagnosticCode::DisplayNested, DiagnosticCode::DisplayNested]
    );
    assert_eq!(diags[0].context, "Bd in Bd");
    assert_eq!(diags[1].context, "D1 in Bd");
}

#[test]
fn literal_mode_covers_the_display_body() {
    let mut b = described();
    section(&mut b, "DESCRIPTION").unwrap();
    open_block(&mut b, Macro::Bd, vec![arg(ArgKind::Literal)]).unwrap();
    assert!(b.meta().literal);
    b.next_line();
    b.text("  indented").unwrap();
    close_block(&mut b).unwrap();
    assert!(!b.meta().literal);

    open_block(&mut b, Macro::Bd, vec![arg(ArgKind::Filled)]).unwrap();
    assert!(!b.meta().literal);
    b.text("filled").unwrap();
    close_block(&mut b).unwrap();

    open_block(&mut b, Macro::Dl, vec![]).unwrap();
    assert!(b.meta().literal);
    b.text("code").unwrap();
    close_block(&mut b).unwrap();
    assert!(!b.meta().literal);
}

/// A block of `tok` at the root followed by its end-of-block marker, with
/// literal mode on when the marker is validated.
#[rstest]
#[case(Macro::Bd, false)]
#[case(Macro::Dl, false)]
#[case(Macro::Bl, true)]
fn end_marker_leaves_literal_mode(#[case] tok: Macro, #[case] still_literal: bool) {
    let mut v = Validator::collecting();
    let root = v.tree().root();
    let block = v
        .tree_mut()
        .alloc(Node::new(NodeKind::Block, Some(tok), Position::new(5, 1)));
    v.tree_mut().append_child(root, block);
    let mut marker = Node::new(NodeKind::Body, Some(tok), Position::new(7, 1));
    marker.pending = Some(block);
    let marker = v.tree_mut().alloc(marker);
    v.tree_mut().insert_after(block, marker);

    v.meta_mut().literal = true;
    v.validate_post(marker).unwrap();
    assert_eq!(v.meta().literal, still_literal);
    assert!(v.sink().is_empty(), "{:?}", v.sink());
    assert!(v.tree()[marker].flags.validated);
}

fn font_block(args: Vec<Argument>, head: &[&str]) -> (DocumentBuilder, NodeId) {
    let mut b = described();
    section(&mut b, "DESCRIPTION").unwrap();
    b.next_line();
    let bf = b.block(Macro::Bf, args).unwrap();
    b.head().unwrap();
    b.words(head.iter().copied()).unwrap();
    b.close().unwrap();
    b.body().unwrap();
    b.next_line();
    b.text("styled").unwrap();
    close_block(&mut b).unwrap();
    (b, bf)
}

#[test]
fn font_from_the_argument() {
    let (b, bf) = font_block(vec![arg(ArgKind::Emphasis)], &[]);
    assert_eq!(b.tree()[bf].font().unwrap().font, Some(Font::Emphasis));
    assert!(b.diagnostics().is_empty(), "{:?}", b.diagnostics());
}

#[test]
fn font_from_the_head() {
    let (b, bf) = font_block(vec![], &["Sy"]);
    assert_eq!(b.tree()[bf].font().unwrap().font, Some(Font::Symbolic));
    assert!(b.diagnostics().is_empty(), "{:?}", b.diagnostics());
}

#[test]
fn font_problems() {
    let (b, bf) = font_block(vec![], &[]);
    assert!(b.tree()[bf].font().is_none());
    assert_eq!(codes(b.diagnostics()), vec![DiagnosticCode::FontMissing]);

    let (b, bf) = font_block(vec![], &["Xx"]);
    assert!(b.tree()[bf].font().is_none());
    assert_eq!(codes(b.diagnostics()), vec![DiagnosticCode::FontUnknown]);
    assert_eq!(b.diagnostics()[0].context, "Bf Xx");

    let (b, bf) = font_block(vec![arg(ArgKind::Literal)], &["extra"]);
    assert_eq!(b.tree()[bf].font().unwrap().font, Some(Font::Literal));
    assert_eq!(codes(b.diagnostics()), vec![DiagnosticCode::ArgExcess]);
    assert_eq!(b.diagnostics()[0].context, "Bf ... extra");
}
