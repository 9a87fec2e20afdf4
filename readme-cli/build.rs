use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the subcommands from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
const FILE_COMMANDS: &[(&str, &str)] = &[
    ("render", "Render Markdown to sanitized HTML"),
    ("serialize", "Serialize HTML to Markdown"),
    ("import", "Import content of unknown type as editor HTML"),
    ("classify", "Print whether the input is html or markdown"),
    ("check", "Check that Markdown survives render / serialize round trips"),
    ("inspect", "Print a JSON report of the README blocks in the input"),
];

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

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("readme")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert README content between Markdown and editor HTML")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .value_name("KEY=VALUE")
                .action(ArgAction::Append)
                .global(true),
        );

    for (name, about) in FILE_COMMANDS {
        let mut sub = Command::new(*name).about(*about).arg(input_arg());
        if matches!(*name, "render" | "serialize" | "import") {
            sub = sub.arg(output_arg());
        }
        cmd = cmd.subcommand(sub);
    }
    cmd = cmd
        .subcommand(
            Command::new("paste")
                .about("Route clipboard content to the HTML to insert")
                .arg(Arg::new("text").long("text").value_hint(ValueHint::FilePath))
                .arg(Arg::new("html").long("html").value_hint(ValueHint::FilePath))
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("sanitize")
                .about("Sanitize HTML with an allow-list policy")
                .arg(input_arg())
                .arg(
                    Arg::new("policy")
                        .long("policy")
                        .value_parser(["paste", "rendered"]),
                )
                .arg(output_arg()),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "readme", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "readme", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "readme", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
