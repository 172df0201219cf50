use std::process::ExitCode;

use books::{
    CatalogEntry,
    Config,
    Query,
    browse,
    catalog,
    cli::{BrowseArgs, Cli, Command, ListArgs, OpenArgs, SearchArgs},
    error::{Error, Result},
    format,
    opener,
    resolve,
    select::{self, SelectPolicy, Selection},
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("BOOKS_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("books: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    if let Command::Completions(args) = &cli.command {
        args.generate();
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::resolve(cli.root.as_deref(), cli.viewer.as_deref())?;

    match cli.command {
        Command::Open(args) => cmd_open(&config, &args),
        Command::Search(args) => cmd_search(&config, &args),
        Command::List(args) => cmd_list(&config, &args),
        Command::Browse(args) => cmd_browse(&config, &args),
        Command::Completions(_) => Ok(ExitCode::SUCCESS),
    }
}

fn cmd_open(config: &Config, args: &OpenArgs) -> Result<ExitCode> {
    let catalog = catalog::build(config)?;
    let query = Query::new(&args.terms);
    let matches = resolve::resolve(&catalog, &query);
    if matches.is_empty() {
        return Err(Error::NoMatch {
            query: query.to_string(),
        });
    }

    let selection = select::select(
        args.select,
        &matches,
        std::io::stdin().lock(),
        std::io::stdout().lock(),
    )?;

    let entries = match selection {
        Selection::Open(entries) => entries,
        Selection::Cancelled if args.select == SelectPolicy::List => {
            return Ok(ExitCode::SUCCESS);
        }
        Selection::Cancelled => return Ok(ExitCode::FAILURE),
    };

    open_all(config, &entries)
}

fn open_all(config: &Config, entries: &[&CatalogEntry]) -> Result<ExitCode> {
    let opener = opener::opener_for(config);
    for entry in entries {
        opener.open(&entry.path)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_browse(config: &Config, args: &BrowseArgs) -> Result<ExitCode> {
    let catalog = catalog::build(config)?;
    let selection = browse::browse(
        &catalog,
        args.key.as_deref(),
        &mut std::io::stdin().lock(),
        &mut std::io::stdout().lock(),
    )?;

    match selection {
        Selection::Open(entries) => open_all(config, &entries),
        Selection::Cancelled => Ok(ExitCode::FAILURE),
    }
}

fn cmd_search(config: &Config, args: &SearchArgs) -> Result<ExitCode> {
    let catalog = catalog::build(config)?;
    let query = Query::new(&args.terms);
    let matches = resolve::resolve(&catalog, &query);
    if matches.is_empty() {
        return Err(Error::NoMatch {
            query: query.to_string(),
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else if args.files {
        for entry in &matches {
            println!("{}", entry.path.display());
        }
    } else {
        print!("{}", format::listing(&matches));
        println!("\n{} match(es)", matches.len());
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_list(config: &Config, args: &ListArgs) -> Result<ExitCode> {
    let catalog = catalog::build(config)?;
    let groups = catalog.groups();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
    } else if groups.is_empty() {
        println!("No subject folders found in {}.", config.root.display());
    } else {
        print!("{}", format::group_listing(&groups));
    }
    Ok(ExitCode::SUCCESS)
}
