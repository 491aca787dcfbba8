use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use parser_node_ext::config::{format_path, load_from_path, run_queries, select, QueryError};
use parser_node_ext::logging::init_tracing;
use parser_node_ext::{from_json_path, schema, Node, NodeRef, NodeType};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "node-ext")]
#[command(about = "Query Ruby parser syntax trees by field name", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a node and everything below it as named fields
    Dump {
        /// JSON tree produced by the parser
        tree: PathBuf,

        /// Ruby source the tree's ranges point into
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Child indices from the root, e.g. `0.2`
        #[arg(short, long, value_parser = parse_path, default_value = ".")]
        path: ChildPath,
    },

    /// Read one field of a node
    Get {
        /// JSON tree produced by the parser
        tree: PathBuf,

        /// Field name, or a hash lookup such as `foo_value`
        field: String,

        /// Ruby source the tree's ranges point into
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Child indices from the root, e.g. `0.2`
        #[arg(short, long, value_parser = parse_path, default_value = ".")]
        path: ChildPath,
    },

    /// Print the literal value of a node
    Value {
        /// JSON tree produced by the parser
        tree: PathBuf,

        /// Ruby source the tree's ranges point into
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Child indices from the root, e.g. `0.2`
        #[arg(short, long, value_parser = parse_path, default_value = ".")]
        path: ChildPath,
    },

    /// Run every query in a query file
    Run {
        /// TOML query file
        queries: PathBuf,

        /// JSON tree produced by the parser
        tree: PathBuf,

        /// Ruby source the tree's ranges point into
        #[arg(short, long)]
        source: Option<PathBuf>,
    },

    /// List node types and their fields
    Types {
        /// Also list types without a field schema
        #[arg(short, long)]
        all: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Dump { tree, source, path } => cmd_dump(&tree, source.as_deref(), &path.0),

        Commands::Get {
            tree,
            field,
            source,
            path,
        } => cmd_get(&tree, &field, source.as_deref(), &path.0),

        Commands::Value { tree, source, path } => cmd_value(&tree, source.as_deref(), &path.0),

        Commands::Run {
            queries,
            tree,
            source,
        } => cmd_run(&queries, &tree, source.as_deref()),

        Commands::Types { all } => cmd_types(all),
    }
}

/// Child indices from the root of a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ChildPath(Vec<usize>);

/// Parse `0.2.1` into child indices. `.` and the empty string select the root.
fn parse_path(input: &str) -> Result<ChildPath, String> {
    let input = input.trim();
    if input.is_empty() || input == "." {
        return Ok(ChildPath(Vec::new()));
    }
    input
        .split('.')
        .map(|part| {
            part.parse::<usize>()
                .map_err(|_| format!("`{part}` is not a child index"))
        })
        .collect::<Result<_, _>>()
        .map(ChildPath)
}

fn load_tree(tree: &Path, source: Option<&Path>) -> Result<NodeRef> {
    from_json_path(tree, source).with_context(|| format!("failed to load {}", tree.display()))
}

fn node_at<'a>(root: &'a Node, path: &[usize]) -> Result<&'a Node> {
    root.at_path(path)
        .with_context(|| format!("no node at path {}", format_path(path)))
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_dump(tree: &Path, source: Option<&Path>, path: &[usize]) -> Result<()> {
    let root = load_tree(tree, source)?;
    let node = node_at(&root, path)?;
    print_json(&node.to_hash()?)
}

fn cmd_get(tree: &Path, field: &str, source: Option<&Path>, path: &[usize]) -> Result<()> {
    let root = load_tree(tree, source)?;
    let node = node_at(&root, path)?;

    match select(node, field) {
        Ok(value) => print_json(&value),
        Err(QueryError::Node(err)) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

fn cmd_value(tree: &Path, source: Option<&Path>, path: &[usize]) -> Result<()> {
    let root = load_tree(tree, source)?;
    let node = node_at(&root, path)?;
    print_json(&node.to_value())
}

fn cmd_run(queries: &Path, tree: &Path, source: Option<&Path>) -> Result<()> {
    let config = load_from_path(queries)?;
    let root = load_tree(tree, source)?;

    if !config.meta.name.is_empty() {
        println!("{}", config.meta.name.bold());
    }

    let mut failed = 0;
    for (id, result) in run_queries(&config, &root) {
        match result {
            Ok(value) => println!("{} {}: {}", "✓".green(), id, value),
            Err(err) => {
                eprintln!("{} {}: {}", "✗".red(), id, err);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        eprintln!();
        eprintln!("  {} failed", format!("{}", failed).red());
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_types(all: bool) -> Result<()> {
    for node_type in NodeType::ALL {
        match schema::fields(*node_type) {
            Some([]) => println!("{}", node_type.as_str().bold()),
            Some(fields) => println!("{} {}", node_type.as_str().bold(), fields.join(", ")),
            None if all => println!("{} {}", node_type.as_str(), "(children)".dimmed()),
            None => {}
        }
    }
    Ok(())
}
