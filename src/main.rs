//! dncl-bridge CLI entry point.

use std::fs;
use std::io::{self, Read, Write};
use std::process;

use clap::Parser;

use dncl_bridge::{
    FlowRenderer, MermaidRenderer, SourceLang, derive_flowchart, detect_lang, transpile,
};

/// Python / DNCL pseudocode converter with optional flowchart output.
#[derive(Parser, Debug)]
#[command(
    name = "dncl-bridge",
    about = "Convert between Python and DNCL (Common Test) pseudocode"
)]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<String>,

    /// Source language: python or dncl (auto-detected if not provided)
    #[arg(short = 'f', long = "from")]
    from: Option<String>,

    /// Emit a Mermaid flowchart of the input instead of converting it
    #[arg(long = "flowchart")]
    flowchart: bool,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    // Read input from file or stdin
    let text = if let Some(ref path) = cli.input {
        match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: cannot read '{}': {}", path, e);
                process::exit(1);
            }
        }
    } else {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            eprintln!("error: cannot read stdin: {}", e);
            process::exit(1);
        }
        buf
    };

    let lang = match cli.from.as_deref() {
        Some(tag) => match tag.parse::<SourceLang>() {
            Ok(lang) => lang,
            Err(e) => {
                eprintln!("error: {}", e);
                process::exit(1);
            }
        },
        None => detect_lang(&text),
    };

    let rendered = if cli.flowchart {
        let graph = derive_flowchart(&text, lang);
        match MermaidRenderer.render(&graph) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {}", e);
                process::exit(1);
            }
        }
    } else {
        transpile(&text, lang)
    };

    // Write output to file or stdout
    if let Some(ref path) = cli.output {
        match fs::write(path, rendered) {
            Ok(()) => {}
            Err(e) => {
                eprintln!("error: cannot write '{}': {}", path, e);
                process::exit(1);
            }
        }
    } else {
        print!("{}", rendered);
        if let Err(e) = io::stdout().flush() {
            eprintln!("error: cannot flush stdout: {}", e);
            process::exit(1);
        }
    }
}
