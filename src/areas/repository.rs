use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::identity::clock::{Clock, SystemClock};
use crate::artifacts::identity::identity_provider::{IdentityProvider, StandardIdentity};
use crate::errors::{IoContext, Result};
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Name of the repository metadata directory under the workspace root
pub const GIT_DIR: &str = ".git";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    identity: Box<dyn IdentityProvider>,
    clock: Box<dyn Clock>,
}

impl Repository {
    /// Open the repository rooted at `path`, writing command output to `writer`
    ///
    /// Identity and time default to the environment and the system clock.
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path).at_path("create directory", path)?;
        }
        let path = path.canonicalize().at_path("resolve", path)?;
        let git_path = path.join(GIT_DIR);

        let index = Index::new(git_path.join("index").into_boxed_path());
        let database = Database::new(git_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(git_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
            identity: Box::new(StandardIdentity::from_env()),
            clock: Box::new(SystemClock),
        })
    }

    pub fn with_identity(self, identity: Box<dyn IdentityProvider>) -> Self {
        Repository { identity, ..self }
    }

    pub fn with_clock(self, clock: Box<dyn Clock>) -> Self {
        Repository { clock, ..self }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_path(&self) -> std::path::PathBuf {
        self.path.join(GIT_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn identity(&self) -> &dyn IdentityProvider {
        self.identity.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}
