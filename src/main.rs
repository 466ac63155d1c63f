use clap::Parser as ClapParser;
use sorrel::cli::{self, CliError, FindOptions, FindResult};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "sorrel")]
#[command(about = "Sorrel - A JSONPath query engine for locating, filtering, and sorting values in JSON")]
#[command(version)]
struct Cli {
    /// The path expression to evaluate
    expression: String,

    /// JSON input (reads from stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Pretty-print matched values
    #[arg(short, long)]
    pretty: bool,

    /// Print the path of each match instead of its value
    #[arg(long)]
    paths: bool,

    /// Treat NAME as the auto-id field during evaluation
    #[arg(long, value_name = "NAME")]
    auto_id: Option<String>,

    /// Only validate syntax, don't evaluate
    #[arg(long)]
    syntax_only: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_find(cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_find(cli: Cli) -> Result<(), CliError> {
    let input = match cli.input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = FindOptions {
        expression: cli.expression,
        input,
        auto_id_field: cli.auto_id,
        syntax_only: cli.syntax_only,
    };

    match cli::execute_find(&options)? {
        FindResult::SyntaxValid => println!("Syntax is valid"),
        FindResult::Matches(matches) => {
            for found in matches {
                if cli.paths {
                    println!("{}", found.path);
                    continue;
                }
                let json = if cli.pretty {
                    serde_json::to_string_pretty(&found.value)
                } else {
                    serde_json::to_string(&found.value)
                }
                .unwrap();
                println!("{}", json);
            }
        }
    }
    Ok(())
}
