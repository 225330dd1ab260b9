use clap::{Parser, ValueEnum};
use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    time::Instant,
};
use tableaux::{
    render::{self, Marks},
    Analytic, Buffered, Error, Formula, Notation, Semantic, Strategy, Tableau,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const PROMPT: &str = ">> ";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Type {
    Semantic,
    Analytic,
    Buffered,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Default,
    AsciiTree,
    AsciiTreeUnicode,
    TexForest,
    Assignments,
}

/// Builds a propositional tableau for a formula and prints it
#[derive(Debug, Parser)]
#[command(name = "tableaux", version)]
struct Args {
    /// How node formulas are stored
    #[arg(short, long = "type", value_enum, default_value = "semantic")]
    kind: Type,

    #[arg(short, long, value_enum, default_value = "default")]
    format: Format,

    /// Input file, read until the first empty line
    #[arg(short, long = "in", default_value = "stdin")]
    input: String,

    #[arg(short, long = "out", default_value = "stdout")]
    output: String,

    /// Log more; repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    // Only fails if a subscriber is already installed
    let _ = tracing::subscriber::set_global_default(subscriber);

    let source = read_formula(&args.input)?;
    let formula: Formula = source.parse()?;
    info!(%formula, "parsed");

    let start = Instant::now();
    let rendered = match args.kind {
        Type::Semantic => run::<Semantic>(formula, args.format),
        Type::Analytic => run::<Analytic>(formula, args.format),
        Type::Buffered => run::<Buffered>(formula, args.format),
    };
    info!("built and rendered in {}ms", start.elapsed().as_millis());

    let mut output: Box<dyn Write> = match args.output.as_str() {
        "stdout" => Box::new(io::stdout()),
        path => Box::new(File::create(path)?),
    };
    writeln!(output, "{}", rendered)?;
    output.flush()?;
    Ok(())
}

fn run<S: Strategy>(formula: Formula, format: Format) -> String {
    let tableau = Tableau::<S>::build(formula);
    let root = tableau.root();
    match format {
        Format::Default => render::nested(root),
        Format::AsciiTree => render::ascii_tree(root, Notation::Ascii, Marks::WORDS),
        Format::AsciiTreeUnicode => render::ascii_tree(root, Notation::Unicode, Marks::CIRCLES),
        Format::TexForest => render::tex_forest(root),
        Format::Assignments => {
            let assignments = tableau.evaluate();
            if assignments.is_empty() {
                return "unsatisfiable".into();
            }
            assignments
                .iter()
                .map(|assignment| assignment.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

/// Concatenates input lines up to the first empty one
fn read_formula(input: &str) -> Result<String, Error> {
    let interactive = input == "stdin";
    let reader: Box<dyn BufRead> = if interactive {
        eprintln!("Write a propositional formula, empty input to stop writing");
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(input)?))
    };

    let mut source = String::new();
    let mut lines = reader.lines();
    loop {
        if interactive {
            eprint!("{}", PROMPT);
        }
        match lines.next() {
            Some(line) => {
                let line = line?;
                if line.is_empty() {
                    break;
                }
                source.push_str(&line);
            }
            None => break,
        }
    }

    if source.trim().is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(source)
}
