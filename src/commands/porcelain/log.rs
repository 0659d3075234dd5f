use crate::areas::repository::Repository;
use colored::Colorize;

impl Repository {
    /// Print the reflog as stored, newest first, highlighting each entry's commit line
    pub fn log(&self) -> anyhow::Result<()> {
        let reflog = self.refs().read_reflog()?;

        for line in reflog.lines() {
            if line.starts_with("commit ") {
                writeln!(self.writer(), "{}", line.yellow())?;
            } else {
                writeln!(self.writer(), "{}", line)?;
            }
        }

        Ok(())
    }
}
