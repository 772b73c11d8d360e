use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ariadne::{ColorGenerator, Config, IndexType, Label, Report, ReportKind, Source};
use clap::{ArgAction, Parser as ClapParser, Subcommand};
use log::{error, info, warn};
use seqcore::batch::grow_many;
use seqcore::prelude::*;
use seqcore::render::print_outline;
use seqcore::storage;

mod logger;

use logger::TermLogger;

#[derive(ClapParser)]
#[command(
    name = "seqtree",
    version,
    about = "Grow sequent-calculus proof trees",
    args_conflicts_with_subcommands = true
)]
pub struct Arguments {
    #[command(subcommand)]
    command: Option<Command>,

    /// Rule configuration file (defaults to $SEQTREE_RULES or the user config directory)
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Individual names available as quantifier witnesses
    #[arg(long, value_delimiter = ',', value_name = "NAME,...")]
    names: Vec<String>,

    /// Print every AND-only derivation instead of the tree of alternatives
    #[arg(long)]
    split: bool,

    /// Save the grown tree (`.toml` for text, anything else binary)
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Load a previously saved tree instead of growing one
    #[arg(long, value_name = "FILE")]
    load: Option<PathBuf>,

    /// Worker threads used when growing several sequents (0 picks one per core)
    #[arg(short, long, default_value_t = 0)]
    jobs: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Sequents written as `antecedent; consequent`
    sequents: Vec<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Write a rule configuration using one discipline everywhere
    InitRules {
        /// Destination (defaults to the user config directory)
        file: Option<PathBuf>,

        /// Use additive rules instead of multiplicative ones
        #[arg(long)]
        additive: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn report_parse_error(source_name: &str, err: &ParseError) {
    let mut colors = ColorGenerator::new();
    let color = colors.next();

    for diagnostic in &err.diagnostics {
        let span = (source_name.to_string(), diagnostic.span.clone());
        let printed = Report::build(ReportKind::Error, span.clone())
            .with_config(Config::default().with_index_type(IndexType::Byte))
            .with_message(&diagnostic.message)
            .with_label(
                Label::new(span)
                    .with_message("The error occurred here")
                    .with_color(color),
            )
            .finish()
            .eprint((source_name.to_string(), Source::from(err.input.clone())));

        if printed.is_err() {
            eprintln!("{}", err);
        }
    }
}

fn init_rules(file: Option<PathBuf>, additive: bool, force: bool) -> SeqResult<ExitCode> {
    let path = file.unwrap_or_else(RuleConfig::default_path);
    if path.exists() && !force {
        error!(
            "{} already exists, pass --force to overwrite it",
            path.display()
        );
        return Ok(ExitCode::FAILURE);
    }

    let discipline = if additive {
        Discipline::Additive
    } else {
        Discipline::Multiplicative
    };
    RuleConfig::uniform(discipline).save_to_toml(&path)?;
    println!("Wrote {} rule configuration to {}", discipline, path.display());
    Ok(ExitCode::SUCCESS)
}

fn load_rules(explicit: Option<&Path>) -> SeqResult<RuleConfig> {
    match explicit {
        Some(path) => RuleConfig::load_from_toml(path),
        None => {
            let path = RuleConfig::default_path();
            if path.exists() {
                RuleConfig::load_from_toml(&path)
            } else {
                warn!(
                    "No rule configuration at {}, using multiplicative rules (see `seqtree init-rules`)",
                    path.display()
                );
                Ok(RuleConfig::uniform(Discipline::Multiplicative))
            }
        }
    }
}

/// `tree.bin` for a single tree, `tree-1.bin`, `tree-2.bin`, ... for several.
fn save_path(base: &Path, index: usize, total: usize) -> PathBuf {
    if total <= 1 {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{}-{}.{}", stem, index + 1, ext.to_string_lossy()),
        None => format!("{}-{}", stem, index + 1),
    };
    base.with_file_name(name)
}

fn show(tree: &ProofTree, split: bool) -> SeqResult<()> {
    if split {
        let derivations = tree.split();
        let total = derivations.len();
        for (i, derivation) in derivations.iter().enumerate() {
            println!("derivation {}/{}", i + 1, total);
            print_outline(derivation)?;
        }
    } else {
        print_outline(tree)?;
    }

    println!(
        "{} ({} alternative derivation(s), depth {}, {} leaves)",
        if tree.is_closed() { "closed" } else { "open" },
        tree.alternatives(),
        tree.depth(),
        tree.leaf_count()
    );
    Ok(())
}

fn run(args: Arguments) -> SeqResult<ExitCode> {
    if let Some(Command::InitRules {
        file,
        additive,
        force,
    }) = args.command
    {
        return init_rules(file, additive, force);
    }

    let mut trees = Vec::new();

    if let Some(path) = &args.load {
        let tree = storage::load(path)?;
        info!("Loaded proof tree for `{}` from {}", tree.root(), path.display());
        trees.push(tree);
    }

    if !args.sequents.is_empty() {
        let mut sequents = Vec::with_capacity(args.sequents.len());
        let mut malformed = false;
        for (i, src) in args.sequents.iter().enumerate() {
            match parse_sequent(src) {
                Ok(sequent) => sequents.push(sequent),
                Err(err) => {
                    report_parse_error(&format!("<sequent {}>", i + 1), &err);
                    malformed = true;
                }
            }
        }
        if malformed {
            return Ok(ExitCode::FAILURE);
        }

        let decomposer = Decomposer::new(load_rules(args.rules.as_deref())?);
        let pool =
            WitnessPool::new(args.names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()))?;
        for result in grow_many(sequents, &decomposer, &pool, args.jobs)? {
            trees.push(result?);
        }
    }

    if trees.is_empty() {
        error!("Nothing to do: give at least one sequent or --load a tree");
        return Ok(ExitCode::FAILURE);
    }

    let total = trees.len();
    for (i, tree) in trees.iter().enumerate() {
        if i > 0 {
            println!();
        }
        show(tree, args.split)?;

        if let Some(base) = &args.save {
            let path = save_path(base, i, total);
            storage::save(tree, &path)?;
            info!("Saved proof tree for `{}` to {}", tree.root(), path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args = Arguments::parse();

    if let Err(err) = TermLogger::init(args.verbose) {
        eprintln!("Failed to install logger: {}", err);
    }

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
