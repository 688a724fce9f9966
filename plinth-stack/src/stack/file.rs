use std::path::{Path, PathBuf};

use super::{Stack, parse::parse_stack};
use crate::Result;

/// Represents a stack.toml file with both raw content and parsed stack.
pub struct StackToml {
    path: PathBuf,
    content: String,
    stack: Stack,
}

impl StackToml {
    /// Open and parse a stack.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let stack = parse_stack(&content, &path.display().to_string())?;

        Ok(Self {
            path,
            content,
            stack,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed stack.
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Take the parsed stack, dropping the raw content.
    pub fn into_stack(self) -> Stack {
        self.stack
    }
}
