use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// One ref advancement as recorded in the reflog
#[derive(Debug, Clone, new)]
pub struct ReflogEntry {
    pub oid: ObjectId,
    pub branch: String,
    pub author: Author,
    pub message: String,
}

impl ReflogEntry {
    /// Encode as reflog text
    ///
    /// ```text
    /// commit <hex> (HEAD -> main)
    /// Author: <name> <<email>>
    /// Date:   <epoch> <±HHMM>
    ///
    ///     <message line>
    ///
    /// ```
    pub fn to_text(&self) -> String {
        let message = self
            .message
            .lines()
            .map(|line| format!("    {}", line))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "commit {} (HEAD -> {})\nAuthor: {}\nDate:   {}\n\n{}\n\n",
            self.oid,
            self.branch,
            self.author.display_name(),
            self.author.display_timestamp(),
            message
        )
    }
}
