use clap::{Parser as ClapParser, Subcommand};
use selectql::OutputFormat;
use selectql::cli::{self, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "selectql")]
#[command(about = "selectql - Parse select/from/where/order-by/limit statements into structured queries")]
#[command(version)]
struct Cli {
    /// How parsed queries are printed
    #[arg(short, long, global = true, value_enum, env = "SELECTQL_FORMAT", default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a statement given without its leading "select"
    Select {
        /// Statement words after "select" (reads stdin if none)
        #[arg(allow_negative_numbers = true)]
        words: Vec<String>,

        /// Only validate syntax, don't print the query
        #[arg(long)]
        syntax_only: bool,
    },

    /// Parse a complete statement
    Check {
        /// The statement (reads stdin if not provided)
        #[arg(allow_negative_numbers = true)]
        statement: Vec<String>,

        /// Only validate syntax, don't print the query
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the tokens of a statement
    Tokens {
        /// The statement (reads stdin if not provided)
        #[arg(allow_negative_numbers = true)]
        statement: Vec<String>,
    },

    /// Show the statement syntax reference
    Syntax,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Select { words, syntax_only } => {
            run_check(&words, Some("select"), syntax_only, cli.format)
        }
        Commands::Check {
            statement,
            syntax_only,
        } => run_check(&statement, None, syntax_only, cli.format),
        Commands::Tokens { statement } => read_statement(&statement, None)
            .and_then(|s| cli::execute_tokens(&s))
            .map(|listing| println!("{}", listing)),
        Commands::Syntax => {
            print!("{}", cli::get_syntax_doc());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Statement from the arguments, or from stdin when none were given and
/// stdin is not a terminal.
fn read_statement(words: &[String], prefix: Option<&str>) -> Result<String, CliError> {
    if let Some(statement) = cli::statement_from_words(words, prefix) {
        return Ok(statement);
    }
    if atty::is(atty::Stream::Stdin) {
        return Err(CliError::NoInput);
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    cli::statement_from_words(&[buffer.trim().to_string()], prefix).ok_or(CliError::NoInput)
}

fn run_check(
    words: &[String],
    prefix: Option<&str>,
    syntax_only: bool,
    format: OutputFormat,
) -> Result<(), CliError> {
    let options = CheckOptions {
        statement: read_statement(words, prefix)?,
        syntax_only,
        format,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Parsed { rendered, .. } => println!("{}", rendered),
    }
    Ok(())
}
