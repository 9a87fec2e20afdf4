// Command-line interface for readme-babel
//
// This binary exposes the README conversion pipeline: rendering Markdown to the sanitized HTML an
// editor loads, serializing editor HTML back to Markdown, and the routing decisions (import,
// paste) in between. Every command reads a file, or stdin when the path is `-`, and writes to
// stdout unless -o is given.
//
// Usage:
//  readme render <input> [-o <file>] [--strict]         - Markdown → sanitized HTML
//  readme serialize <input> [-o <file>]                 - HTML → Markdown
//  readme import <input> [-o <file>]                    - Unknown content → editor HTML
//  readme paste [--text <file>] [--html <file>]         - Clipboard flavors → HTML to insert
//  readme classify <input>                              - Prints "html" or "markdown"
//  readme sanitize <input> [--policy paste|rendered]    - Allow-list sanitization
//  readme check <input>                                 - Round-trip stability, exit 1 if unstable
//  readme inspect <input>                               - JSON report of README blocks
//
// Configuration:
//
// ./readme.toml is layered over the built-in defaults when present, then --config <path>.
// Single keys can be overridden with --set <key>=<value>, e.g. --set serialize.bullet_marker=*.
// Logging goes to stderr and is controlled with RUST_LOG (default: warn).

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use readme_babel::{Clipboard, PolicyKind, Pipeline};
use readme_config::{Loader, ReadmeConfig};
use std::fs;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

const STDIN: &str = "-";

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path, or - for stdin")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("readme")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert README content between Markdown and editor HTML")
        .long_about(
            "readme runs the readme-babel pipeline on the command line.\n\n\
            Markdown is rendered to sanitized HTML with GitHub README extras (badges,\n\
            alerts, collapsible sections, centered blocks, tables, task lists), and editor\n\
            HTML is serialized back to Markdown that survives further round trips.\n\n\
            Examples:\n  \
            readme render README.md -o readme.html   # Render to a file\n  \
            readme serialize editor.html             # HTML back to Markdown\n  \
            cat README.md | readme check -           # Round-trip stability of stdin\n  \
            readme inspect README.md                 # JSON report",
        )
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a readme.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .value_name("KEY=VALUE")
                .help("Override a single configuration key")
                .action(ArgAction::Append)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Render Markdown to sanitized HTML")
                .arg(input_arg())
                .arg(output_arg())
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Fail instead of falling back to the original Markdown")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("serialize")
                .about("Serialize HTML to Markdown")
                .arg(input_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("import")
                .about("Import content of unknown type as editor HTML")
                .long_about(
                    "Classifies the input first. Markdown is rendered; HTML is sanitized with\n\
                    the paste policy, unless its text is Markdown, in which case that text is\n\
                    rendered.",
                )
                .arg(input_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("paste")
                .about("Route clipboard content to the HTML to insert")
                .long_about(
                    "Simulates a paste with the given clipboard flavors. Plain text wins and is\n\
                    rendered as Markdown; HTML alone is sanitized with the paste policy.",
                )
                .arg(
                    Arg::new("text")
                        .long("text")
                        .value_name("FILE")
                        .help("File holding the text/plain flavor")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .value_name("FILE")
                        .help("File holding the text/html flavor")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("classify")
                .about("Print whether the input is html or markdown")
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("sanitize")
                .about("Sanitize HTML with an allow-list policy")
                .arg(input_arg())
                .arg(
                    Arg::new("policy")
                        .long("policy")
                        .help("Allow-list to apply")
                        .value_parser(["paste", "rendered"])
                        .default_value("rendered"),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("check")
                .about("Check that Markdown survives render / serialize round trips")
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print a JSON report of the README blocks in the input")
                .arg(input_arg()),
        )
}

fn main() {
    init_tracing();

    let matches = build_cli().get_matches();
    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        matches
            .get_many::<String>("set")
            .map(|values| values.map(String::as_str).collect())
            .unwrap_or_default(),
    );
    let pipeline = config.pipeline();

    match matches.subcommand() {
        Some(("render", sub)) => handle_render_command(&pipeline, sub),
        Some(("serialize", sub)) => {
            let source = read_input(required(sub, "input"));
            write_output(output(sub), &pipeline.serialize(&source));
        }
        Some(("import", sub)) => {
            let source = read_input(required(sub, "input"));
            write_output(output(sub), &pipeline.import(&source));
        }
        Some(("paste", sub)) => handle_paste_command(&pipeline, sub),
        Some(("classify", sub)) => {
            let source = read_input(required(sub, "input"));
            println!("{}", pipeline.classify(&source));
        }
        Some(("sanitize", sub)) => {
            let source = read_input(required(sub, "input"));
            let kind = match sub.get_one::<String>("policy").map(|s| s.as_str()) {
                Some("paste") => PolicyKind::Paste,
                _ => PolicyKind::Rendered,
            };
            write_output(output(sub), &pipeline.sanitize(&source, kind));
        }
        Some(("check", sub)) => handle_check_command(&pipeline, required(sub, "input")),
        Some(("inspect", sub)) => handle_inspect_command(&pipeline, required(sub, "input")),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .unwrap_or_else(|| {
            eprintln!("Missing required argument '{name}'");
            std::process::exit(1);
        })
}

fn output(matches: &ArgMatches) -> Option<&str> {
    matches.get_one::<String>("output").map(|s| s.as_str())
}

/// Handle the render command
fn handle_render_command(pipeline: &Pipeline, matches: &ArgMatches) {
    let source = read_input(required(matches, "input"));
    let html = if matches.get_flag("strict") {
        pipeline.render(&source).unwrap_or_else(|e| {
            tracing::error!(reason = %e.reason, "strict render failed");
            eprintln!("Render error: {e}");
            std::process::exit(1);
        })
    } else {
        pipeline.render_markdown(&source)
    };
    write_output(output(matches), &html);
}

/// Handle the paste command
fn handle_paste_command(pipeline: &Pipeline, matches: &ArgMatches) {
    let text = matches.get_one::<String>("text").map(|p| read_input(p));
    let html = matches.get_one::<String>("html").map(|p| read_input(p));
    if text.is_none() && html.is_none() {
        eprintln!("Error: paste needs --text, --html or both");
        std::process::exit(1);
    }
    let clipboard = Clipboard::new(text, html);
    write_output(output(matches), &pipeline.route_paste(&clipboard));
}

/// Handle the check command
fn handle_check_command(pipeline: &Pipeline, input: &str) {
    let source = read_input(input);
    let once = pipeline.normalize(&source);
    let twice = pipeline.normalize(&once);
    if once == twice {
        println!("stable");
        return;
    }

    println!("unstable");
    tracing::warn!(first = %once, second = %twice, "round trip is not stable");
    std::process::exit(1);
}

/// Handle the inspect command
fn handle_inspect_command(pipeline: &Pipeline, input: &str) {
    let source = read_input(input);
    let report = pipeline.inspect(&source);
    let json = serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        eprintln!("Error encoding report: {e}");
        std::process::exit(1);
    });
    println!("{json}");
}

fn read_input(path: &str) -> String {
    if path == STDIN {
        let mut source = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut source) {
            eprintln!("Error reading stdin: {e}");
            std::process::exit(1);
        }
        return source;
    }
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn write_output(path: Option<&str>, text: &str) {
    match path {
        Some(path) => {
            fs::write(path, with_newline(text)).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{}", with_newline(text)),
    }
}

fn with_newline(text: &str) -> String {
    if text.is_empty() || text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}

fn load_cli_config(explicit_path: Option<&str>, overrides: Vec<&str>) -> ReadmeConfig {
    tracing::debug!(
        path = explicit_path.unwrap_or("readme.toml"),
        overrides = overrides.len(),
        "loading configuration"
    );
    build_config(Loader::new().with_optional_file("readme.toml"), explicit_path, &overrides)
        .unwrap_or_else(|err| {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        })
}

fn build_config(
    loader: Loader,
    explicit_path: Option<&str>,
    overrides: &[&str],
) -> Result<ReadmeConfig, String> {
    let mut loader = match explicit_path {
        Some(path) => loader.with_file(path),
        None => loader,
    };
    for raw in overrides {
        let (key, value) = parse_set_arg(raw)?;
        loader = match value {
            OverrideValue::Bool(flag) => loader.set_override(key, flag),
            OverrideValue::Text(text) => loader.set_override(key, text),
        }
        .map_err(|e| e.to_string())?;
    }
    loader.build().map_err(|e| e.to_string())
}

#[derive(Debug, PartialEq)]
enum OverrideValue<'a> {
    Bool(bool),
    Text(&'a str),
}

/// Split a `--set key=value` argument. `true` / `false` become booleans.
fn parse_set_arg(raw: &str) -> Result<(&str, OverrideValue<'_>), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid --set '{raw}', expected KEY=VALUE"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid --set '{raw}', empty key"));
    }
    let value = match value.trim() {
        "true" => OverrideValue::Bool(true),
        "false" => OverrideValue::Bool(false),
        other => OverrideValue::Text(other),
    };
    Ok((key, value))
}
