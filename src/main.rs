// noot: source file to Graphviz graph of its syntax tree

use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;

use noot::{graph, parse_tokens, token_table, tokenize, NootError};

/// Parse a noot source file and write its syntax tree as a Graphviz graph
#[derive(ClapParser, Debug)]
#[command(name = "noot", version, about, long_about = None)]
struct Args {
    /// Source file to parse
    input: PathBuf,

    /// Where to write the graph (default: the input path with a .dot extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print every token to stderr before parsing
    #[arg(short, long)]
    tokens: bool,

    /// Name of the root graph node (default: the input file stem)
    #[arg(short, long)]
    name: Option<String>,
}

impl Args {
    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("dot"))
    }

    fn root_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.input
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "input".to_string())
        })
    }
}

fn run(args: &Args) -> Result<(), NootError> {
    let file = File::open(&args.input)?;

    eprintln!("Parsing {}...", args.input.display());
    let tokens = tokenize(file)?;

    if args.tokens {
        eprint!("{}", token_table(&tokens));
    }

    let root = parse_tokens(&args.root_name(), tokens)?;
    eprintln!(
        "Parsed successfully. Found {} top-level declarations.",
        root.children.len()
    );

    let output = args.output_path();
    fs::write(&output, graph::render(&root))?;
    eprintln!("Wrote {}", output.display());

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
