//! Command-line interface for UFO:AI UI scripts
//! This binary parses `.ufo` files, reports diagnostics and prints the parsed tree in
//! different formats.
//!
//! Usage:
//!   ufoscript parse `<path>` [--format `<format>`] [--unknown-blocks skip|error] [--max-depth `<n>`]
//!   ufoscript check `<path>`...                  - Parse files in parallel, print diagnostics
//!   ufoscript tokens `<path>`                    - Dump the token stream as JSON
//!   ufoscript list-blocks                        - List registered block keywords
//!   ufoscript list-formats                       - List output formats
//!
//! Global options: `--config <file>` layers a TOML file over the built-in defaults, `-v`
//! raises log verbosity (RUST_LOG, when set, wins).

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::fs;
use std::process;
use std::thread;
use tracing_subscriber::EnvFilter;
use ufoscript_config::{Loader, UfoScriptConfig};
use ufoscript_parser::script::ast::{count_severity, format_source_context, Diagnostic, DiagnosticSeverity};
use ufoscript_parser::script::formats::FormatRegistry;
use ufoscript_parser::script::lexing::tokenize;
use ufoscript_parser::script::parsing::{
    ParseOptions, ScriptParser, SubParserRegistry, UnknownBlockPolicy,
};

/// Project-local configuration picked up when present
const LOCAL_CONFIG: &str = "ufoscript.toml";

fn cli() -> Command {
    let path_arg = || {
        Arg::new("path")
            .help("Path to the .ufo file")
            .required(true)
            .index(1)
    };

    Command::new("ufoscript")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing and inspecting UFO:AI UI scripts")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a file and print its tree")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (default from configuration, see list-formats)"),
                )
                .arg(
                    Arg::new("unknown-blocks")
                        .long("unknown-blocks")
                        .value_parser(["skip", "error"])
                        .help("What to do with blocks that have no registered sub-parser"),
                )
                .arg(
                    Arg::new("max-depth")
                        .long("max-depth")
                        .value_parser(value_parser!(usize))
                        .help("Deepest block nesting accepted (default from configuration)"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Parse files in parallel and report diagnostics")
                .arg(
                    Arg::new("paths")
                        .help("Files to check")
                        .required(true)
                        .num_args(1..)
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream of a file as JSON")
                .arg(path_arg()),
        )
        .subcommand(Command::new("list-blocks").about("List registered block keywords"))
        .subcommand(Command::new("list-formats").about("List available output formats"))
}

fn main() {
    let matches = cli().get_matches();

    let config = load_config(matches.get_one::<String>("config")).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        process::exit(2);
    });
    init_logging(matches.get_count("verbose"), &config.logging.level);

    let registry = SubParserRegistry::with_defaults();
    tracing::debug!(blocks = registry.len(), "registry ready");

    let code = match matches.subcommand() {
        Some(("parse", sub)) => handle_parse_command(sub, &config, &registry),
        Some(("check", sub)) => handle_check_command(sub, &config, &registry),
        Some(("tokens", sub)) => handle_tokens_command(sub),
        Some(("list-blocks", _)) => handle_list_blocks_command(&registry),
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => {
            let _ = cli().print_help();
            2
        }
    };
    process::exit(code);
}

fn load_config(path: Option<&String>) -> Result<UfoScriptConfig, ufoscript_config::ConfigError> {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    match path {
        Some(path) => loader.with_file(path).build(),
        None => loader.build(),
    }
}

/// Log to stderr. RUST_LOG takes precedence, then -v flags, then the configured level.
fn init_logging(verbosity: u8, configured: &str) {
    let fallback = match verbosity {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_source(path: &str) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic.to_compact_string());
    }
}

/// Handle the parse command
fn handle_parse_command(
    matches: &ArgMatches,
    config: &UfoScriptConfig,
    registry: &SubParserRegistry,
) -> i32 {
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or_default();
    let format = matches
        .get_one::<String>("format")
        .unwrap_or(&config.output.format);

    let mut options = config.parser.parse_options();
    if let Some(policy) = matches.get_one::<String>("unknown-blocks") {
        options.unknown_blocks = match policy.as_str() {
            "error" => UnknownBlockPolicy::Error,
            _ => UnknownBlockPolicy::Skip,
        };
    }
    if let Some(max_depth) = matches.get_one::<usize>("max-depth") {
        options.max_depth = *max_depth;
    }

    let source = match read_source(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return 1;
        }
    };

    let output = match ScriptParser::new(registry).with_options(options).parse(&source, path) {
        Ok(output) => output,
        Err(failure) => {
            print_diagnostics(&failure.diagnostics);
            eprintln!("\n{}", format_source_context(&source, failure.error.range()));
            return 1;
        }
    };
    print_diagnostics(&output.diagnostics);

    let rendered = FormatRegistry::with_defaults().render(
        &output.root,
        format,
        &config.output.render_options(),
    );
    match rendered {
        Ok(formatted) => print!("{}", formatted),
        Err(e) => {
            eprintln!("Error formatting output: {}", e);
            return 1;
        }
    }

    if output.has_errors() {
        1
    } else {
        0
    }
}

/// Outcome of checking one file
struct CheckResult {
    diagnostics: Vec<Diagnostic>,
    failed: bool,
}

fn check_file(path: &str, options: ParseOptions, registry: &SubParserRegistry) -> CheckResult {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return CheckResult {
                diagnostics: Vec::new(),
                failed: true,
            };
        }
    };

    match ScriptParser::new(registry).with_options(options).parse(&source, path) {
        Ok(output) => CheckResult {
            failed: output.has_errors(),
            diagnostics: output.diagnostics,
        },
        Err(failure) => CheckResult {
            diagnostics: failure.diagnostics,
            failed: true,
        },
    }
}

/// Handle the check command
fn handle_check_command(
    matches: &ArgMatches,
    config: &UfoScriptConfig,
    registry: &SubParserRegistry,
) -> i32 {
    let paths: Vec<&String> = matches
        .get_many::<String>("paths")
        .map(|values| values.collect())
        .unwrap_or_default();
    let options = config.parser.parse_options();

    let results: Vec<CheckResult> = thread::scope(|scope| {
        let handles: Vec<_> = paths
            .iter()
            .map(|path| scope.spawn(move || check_file(path, options, registry)))
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle.join().unwrap_or_else(|_| CheckResult {
                    diagnostics: Vec::new(),
                    failed: true,
                })
            })
            .collect()
    });

    let mut failed_files = 0;
    let mut all = Vec::new();
    for result in results {
        if result.failed {
            failed_files += 1;
        }
        all.extend(result.diagnostics);
    }

    for diagnostic in &all {
        println!("{}", diagnostic.to_compact_string());
    }
    eprintln!(
        "{} file(s) checked: {} error(s), {} warning(s), {} failed",
        paths.len(),
        count_severity(&all, DiagnosticSeverity::Error),
        count_severity(&all, DiagnosticSeverity::Warning),
        failed_files
    );

    if failed_files > 0 {
        1
    } else {
        0
    }
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches) -> i32 {
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or_default();
    let source = match read_source(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return 1;
        }
    };

    let lexed = tokenize(&source);
    print_diagnostics(&lexed.diagnostics);
    match serde_json::to_string_pretty(&lexed.tokens) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error formatting tokens: {}", e);
            1
        }
    }
}

/// Handle the list-blocks command
fn handle_list_blocks_command(registry: &SubParserRegistry) -> i32 {
    println!("Registered block keywords:\n");
    for keyword in registry.keywords() {
        let description = registry
            .lookup(&keyword)
            .map(|factory| factory.description())
            .unwrap_or_default();
        println!("  {:<14} {}", keyword, description);
    }
    0
}

/// Handle the list-formats command
fn handle_list_formats_command() -> i32 {
    println!("Available output formats:\n");
    for (name, description) in FormatRegistry::with_defaults().formats() {
        println!("  {:<8} {}", name, description);
    }
    0
}
