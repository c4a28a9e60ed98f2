//! Several files parsed concurrently against one shared registry.

use std::thread;
use ufoscript_parser::script::parsing::{parse_script, SubParserRegistry};

fn sources() -> Vec<String> {
    (0..16)
        .map(|i| {
            format!(
                "window w{i} {{\n\tbutton b{i} {{ label \"{i}\" }}\n\toptionlist l{i} {{ option o {{ label \"x\" value {i} }} }}\n}}\n"
            )
        })
        .collect()
}

#[test]
fn test_parallel_results_match_sequential() {
    let registry = SubParserRegistry::with_defaults();
    let sources = sources();

    let sequential: Vec<_> = sources
        .iter()
        .enumerate()
        .map(|(i, s)| parse_script(s, &format!("f{i}.ufo"), &registry).unwrap())
        .collect();

    let parallel: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .enumerate()
            .map(|(i, source)| {
                let registry = &registry;
                scope.spawn(move || parse_script(source, &format!("f{i}.ufo"), registry).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (seq, par) in sequential.iter().zip(&parallel) {
        assert_eq!(seq.root, par.root);
        assert_eq!(seq.diagnostics, par.diagnostics);
        assert_eq!(seq.symbols, par.symbols);
    }
    assert_eq!(parallel[7].root.children[0].name.as_deref(), Some("w7"));
}
