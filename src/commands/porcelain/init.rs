use crate::areas::repository::Repository;
use crate::errors::IoContext;

impl Repository {
    /// Create `.git/objects`, `.git/refs/heads` and `HEAD`; an existing repository is left as is
    pub fn init(&self) -> anyhow::Result<()> {
        let objects_path = self.database().objects_path();
        std::fs::create_dir_all(objects_path).at_path("create directory", objects_path)?;

        let heads_path = self.refs().heads_path();
        std::fs::create_dir_all(&heads_path).at_path("create directory", &heads_path)?;

        self.refs().init_head()?;

        writeln!(
            self.writer(),
            "Initialized empty Git repository in {}",
            self.git_path().display()
        )?;

        Ok(())
    }
}
