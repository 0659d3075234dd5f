use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use is_terminal::IsTerminal;
use minigit::areas::repository::Repository;
use minigit::artifacts::identity::clock::clock_from_env;
use minigit::commands::plumbing::cat_file::CatFileMode;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `MINIGIT_LOG=debug`
const LOG_FILTER_VAR: &str = "MINIGIT_LOG";

#[derive(Parser)]
#[command(
    name = "minigit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal git object database",
    long_about = "A small reimplementation of git's object database, index and checkout. \
    Repositories it creates can be inspected with git itself.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct CatFileFlags {
    #[arg(short = 'p', help = "Pretty-print the object's content")]
    pretty: bool,
    #[arg(short = 't', help = "Show the object's type")]
    show_type: bool,
    #[arg(short = 's', help = "Show the object's size")]
    size: bool,
}

impl CatFileFlags {
    fn mode(&self) -> CatFileMode {
        if self.show_type {
            CatFileMode::Type
        } else if self.size {
            CatFileMode::Size
        } else {
            CatFileMode::Pretty
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "hash-object",
        about = "Compute a blob digest and optionally write it to the object database"
    )]
    HashObject {
        #[arg(short, long, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(name = "cat-file", about = "Print the content, type or size of an object")]
    CatFile {
        #[command(flatten)]
        flags: CatFileFlags,
        #[arg(index = 1, help = "The object SHA")]
        object: String,
    },
    #[command(
        name = "ls-tree",
        about = "List the entries of a tree object",
        long_about = "This command lists the direct entries of a tree. A commit SHA lists the commit's tree."
    )]
    LsTree {
        #[arg(long, help = "List only entry names")]
        name_only: bool,
        #[arg(index = 1, help = "The tree or commit SHA")]
        object: String,
    },
    #[command(
        name = "write-tree",
        about = "Store the working directory as a tree and print its SHA"
    )]
    WriteTree,
    #[command(
        name = "commit-tree",
        about = "Create a commit object from a tree",
        long_about = "This command commits the given tree, optionally on top of a parent commit, \
        and moves the main branch to the new commit."
    )]
    CommitTree {
        #[arg(index = 1, help = "The tree SHA")]
        tree: String,
        #[arg(short, long, help = "The parent commit SHA")]
        parent: Option<String>,
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "add", about = "Stage files and directories into the index")]
    Add {
        #[arg(index = 1, required = true, help = "The paths to stage")]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "commit",
        about = "Record the staged files as a new commit",
        long_about = "This command creates a new commit from the index. Without a message, a default one is used."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: Option<String>,
    },
    #[command(name = "log", about = "Show the commit history of main, newest first")]
    Log,
    #[command(
        name = "checkout",
        about = "Replace the working directory with a commit's tree"
    )]
    Checkout {
        #[arg(index = 1, help = "The commit SHA")]
        commit: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn open_repository(path: &Path) -> Result<Repository> {
    Ok(Repository::new(path, Box::new(std::io::stdout()))?)
}

fn main() -> Result<()> {
    init_tracing();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();
    let pwd = std::env::current_dir()?;

    let repository = match &cli.command {
        Commands::Init { path } => {
            let repository = open_repository(path.as_deref().unwrap_or(&pwd))?;
            repository.init()?;
            repository
        }
        Commands::HashObject { write, file } => {
            let repository = open_repository(&pwd)?;
            repository.hash_object(file, *write)?;
            repository
        }
        Commands::CatFile { flags, object } => {
            let repository = open_repository(&pwd)?;
            repository.cat_file(object, flags.mode())?;
            repository
        }
        Commands::LsTree { name_only, object } => {
            let repository = open_repository(&pwd)?;
            repository.ls_tree(object, *name_only)?;
            repository
        }
        Commands::WriteTree => {
            let repository = open_repository(&pwd)?;
            repository.write_tree()?;
            repository
        }
        Commands::CommitTree {
            tree,
            parent,
            message,
        } => {
            let repository = open_repository(&pwd)?.with_clock(clock_from_env()?);
            repository.commit_tree(tree, parent.as_deref(), message)?;
            repository
        }
        Commands::Add { paths } => {
            let repository = open_repository(&pwd)?;
            repository.add(paths)?;
            repository
        }
        Commands::Commit { message } => {
            let repository = open_repository(&pwd)?.with_clock(clock_from_env()?);
            repository.commit(message.as_deref())?;
            repository
        }
        Commands::Log => {
            let repository = open_repository(&pwd)?;
            repository.log()?;
            repository
        }
        Commands::Checkout { commit } => {
            let repository = open_repository(&pwd)?;
            repository.checkout(commit)?;
            repository
        }
    };

    repository.writer().flush()?;

    Ok(())
}
