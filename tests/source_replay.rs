//! Replaying a JSON document through the builder and rendering the result

use mdoc_validate::mdoc::ast::{Macro, NodeKind};
use mdoc_validate::mdoc::building::{Document, DocumentBuilder};
use mdoc_validate::mdoc::diagnostics::Diagnostic;
use mdoc_validate::mdoc::formats::{
    replay, to_json_value, to_treeviz_str, to_treeviz_str_with_linum, FormatRegistry, SourceDocument,
};

const DEMO: &str = include_str!("fixtures/demo.json");

fn build() -> (Document, Vec<Diagnostic>) {
    let source = SourceDocument::from_json(DEMO).unwrap();
    let mut builder = DocumentBuilder::new();
    replay(&mut builder, &source.nodes).unwrap();
    builder.finish().unwrap()
}

#[test]
fn fixture_validates_cleanly() {
    let (doc, diags) = build();
    assert!(diags.is_empty(), "{diags:?}");
    assert_eq!(doc.meta.date.as_deref(), Some("March 1, 2024"));
    assert_eq!(doc.meta.title.as_deref(), Some("DEMO"));
    assert_eq!(doc.meta.os.as_deref(), Some("Linux"));
    assert_eq!(doc.meta.name.as_deref(), Some("demo"));
    assert_eq!(doc.meta.vol.as_deref(), Some("General Commands Manual"));
}

#[test]
fn nodes_start_on_consecutive_lines() {
    let (doc, _) = build();
    let tree = &doc.tree;
    let sections: Vec<_> = tree.children(doc.root()).collect();
    assert_eq!(sections.len(), 2);
    assert_eq!(tree[sections[0]].pos.line, 4);
    assert_eq!(tree[sections[1]].pos.line, 7);

    let body = tree[sections[1]].body().unwrap();
    let bl = tree.first_child(body).unwrap();
    assert_eq!(tree[bl].tok, Some(Macro::Bl));
    assert_eq!(tree[bl].pos.line, 8);
    let item = tree.first_child(tree[bl].body().unwrap()).unwrap();
    assert_eq!(tree[item].pos.line, 9);
    assert!(tree[item].flags.line);

    // The flag in the item head shares the item's line.
    let fl = tree.first_child(tree[item].head().unwrap()).unwrap();
    assert_eq!(tree[fl].kind, NodeKind::Elem);
    assert_eq!(tree[fl].pos.line, 9);
    assert!(!tree[fl].flags.line);
}

#[test]
fn treeviz_rendering() {
    let (doc, _) = build();
    let expected = "\
⧉ root
├─ ▣ Sh
│ ├─ ⊤ Sh
│ │ └─ ◦ NAME
│ └─ ¶ Sh
│   ├─ ƒ Nm
│   │ └─ ◦ demo
│   └─ ▣ Nd
│     ├─ ⊤ Nd
│     └─ ¶ Nd
│       └─ ◦ demo tool
└─ ▣ Sh
  ├─ ⊤ Sh
  │ └─ ◦ DESCRIPTION
  └─ ¶ Sh
    └─ ▣ Bl -tag -width 6n
      ├─ ⊤ Bl
      └─ ¶ Bl
        └─ ▣ It
          ├─ ⊤ It
          │ └─ ƒ Fl
          │   └─ ◦ v
          └─ ¶ It
            └─ ◦ Print more.
";
    assert_eq!(to_treeviz_str(&doc), expected);
}

#[test]
fn treeviz_with_line_numbers() {
    let (doc, _) = build();
    insta::assert_snapshot!("demo_treeviz_linum", to_treeviz_str_with_linum(&doc));
}

#[test]
fn json_carries_normalized_data() {
    let (doc, _) = build();
    let json = to_json_value(&doc).unwrap();
    assert_eq!(json["meta"]["title"], "DEMO");
    assert_eq!(json["root"]["kind"], "root");

    let description = &json["root"]["children"][1];
    assert_eq!(description["macro"], "Sh");
    assert_eq!(description["sec"], "description");
    let bl = &description["children"][1]["children"][0];
    assert_eq!(bl["macro"], "Bl");
    assert_eq!(bl["norm"]["kind"], "list");
    assert_eq!(bl["norm"]["list_type"], "tag");
    assert_eq!(bl["norm"]["width"], "6n");
}

#[test]
fn registry_serializes_both_formats() {
    let (doc, _) = build();
    let registry = FormatRegistry::default();
    assert_eq!(registry.list_formats(), vec!["json", "treeviz"]);
    let tree = registry.serialize(&doc, "treeviz").unwrap();
    assert!(tree.starts_with("⧉ root\n"));
    let json = registry.serialize(&doc, "json").unwrap();
    assert!(json.contains("\"Nm\""));
    assert!(registry.serialize(&doc, "man").is_err());
}
