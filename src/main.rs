use clap::{Parser as ClapParser, Subcommand};
use filterql::cli::{self, CliError, CompileOptions, Emit};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "filterql")]
#[command(about = "filterql - Compile filter expressions into nested filter objects")]
#[command(version)]
struct Cli {
    /// Log pipeline stages (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query and print the result of a pipeline stage
    Compile {
        /// The query to compile (reads from stdin if not provided)
        query: Option<String>,

        /// Stage output: tokens, ast, filter or json
        #[arg(short, long, default_value = "filter", value_parser = parse_emit)]
        emit: Emit,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Validate a query without printing the filter
    Check {
        /// The query to validate (reads from stdin if not provided)
        query: Option<String>,
    },

    /// List the field paths a query references
    Fields {
        /// The query to inspect (reads from stdin if not provided)
        query: Option<String>,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'filterql docs' to list categories)
        category: String,
    },
}

fn parse_emit(s: &str) -> Result<Emit, String> {
    Emit::from_str(s).ok_or_else(|| CliError::UnknownEmit(s.to_string()).to_string())
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        Commands::Compile {
            query,
            emit,
            pretty,
        } => run_compile(query, emit, pretty),
        Commands::Check { query } => run_check(query),
        Commands::Fields { query } => run_fields(query),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => match cli::get_doc_category(&category) {
            Ok(content) => {
                print!("{}", content);
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_query(query: Option<String>) -> Result<String, CliError> {
    match query {
        Some(q) => Ok(q),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer.trim_end().to_string())
        }
        None => Err(CliError::NoInput),
    }
}

fn run_compile(query: Option<String>, emit: Emit, pretty: bool) -> Result<(), CliError> {
    let options = CompileOptions {
        query: read_query(query)?,
        emit,
        pretty,
    };
    println!("{}", cli::execute_compile(&options)?);
    Ok(())
}

fn run_check(query: Option<String>) -> Result<(), CliError> {
    cli::execute_check(&read_query(query)?)?;
    println!("Query is valid");
    Ok(())
}

fn run_fields(query: Option<String>) -> Result<(), CliError> {
    for field in cli::list_fields(&read_query(query)?)? {
        println!("{}", field);
    }
    Ok(())
}
