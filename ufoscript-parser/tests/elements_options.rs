//! Option containers and option entries, as written in the stock menus.

use ufoscript_parser::script::ast::{DiagnosticSeverity, Value};
use ufoscript_parser::script::formats::to_treeviz_str;
use ufoscript_parser::script::testing::{assert_tree, parse_with_defaults};

const VIDEO_OPTIONS: &str = r#"
// video settings
window options {
	size "1024 768"
	optionlist res {
		dataid OPTION_VIDEO
		option opt_800 {
			label "800x600"
			value 0
		}
	}
}
"#;

#[test]
fn test_optionlist_with_inline_options() {
    let output = parse_with_defaults(
        r#"
optionlist resolutions {
	size "200 80"
	cvar "*cvar:vid_mode"
	option opt_800 { label "800x600" value 0 }
	option opt_1024 { label "1024x768" value 1 }
	onChange { cmd "vid_restart;" }
}
"#,
    );

    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
    assert_tree(&output.root).child_count(1).child(0, |list| {
        list.kind("optionlist")
            .name("resolutions")
            .starts_at(1, 0)
            .attribute_str("size", "200 80")
            .attribute_str("cvar", "*cvar:vid_mode")
            .attribute_count(2)
            .child_count(3)
            .child(0, |opt| {
                opt.kind("option")
                    .name("opt_800")
                    .attribute_str("label", "800x600")
                    .attribute_number("value", 0.0);
            })
            .child(1, |opt| {
                opt.name("opt_1024").attribute_number("value", 1.0);
            })
            .child(2, |event| {
                event.kind("onChange").attribute_str("cmd", "vid_restart;");
            });
    });
}

#[test]
fn test_option_addressable_by_path() {
    let output = parse_with_defaults(VIDEO_OPTIONS);
    let option = output.root.find_by_path("options.res.opt_800").unwrap();
    assert_eq!(option.attribute("label"), Some(&Value::Str("800x600".into())));
    assert!(output.symbols.contains("options.res.opt_800"));
}

#[test]
fn test_selectbox_bound_through_dataid_is_not_empty() {
    let output = parse_with_defaults("selectbox lang { dataid OPTION_LANGUAGES }");
    assert!(output.diagnostics.is_empty());
}

#[test]
fn test_empty_tab_reports_info() {
    let output = parse_with_defaults("tab sections { size \"10 10\" }");
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].severity, DiagnosticSeverity::Info);
    assert_eq!(
        output.diagnostics[0].code.as_deref(),
        Some("empty-option-list")
    );
}

#[test]
fn test_option_without_label_or_value() {
    let output = parse_with_defaults("optiontree t { option o { } }");
    let codes: Vec<_> = output
        .diagnostics
        .iter()
        .filter_map(|d| d.code.as_deref())
        .collect();
    assert_eq!(codes, vec!["option-missing-label", "option-missing-value"]);
}

#[test]
fn test_extends_on_option_container() {
    let output = parse_with_defaults("optionlist mine extends base_list { dataid X }");
    assert_tree(&output.root).child(0, |list| {
        list.name("mine").extends("base_list");
    });
}

#[test]
fn test_video_options_treeviz() {
    let output = parse_with_defaults(VIDEO_OPTIONS);
    insta::assert_snapshot!(to_treeviz_str(&output.root), @r###"
⧉ document
└─ ▣ window options
  ├─ ≔ size "1024 768"
  └─ ☰ optionlist res
    ├─ ≔ dataid OPTION_VIDEO
    └─ • option opt_800
      ├─ ≔ label "800x600"
      └─ ≔ value 0
"###);
}
