use std::path::Path;

use crate::domain::ports::CommandSpec;

/// Recursive rwx grant for one group, inherited by new files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclGrant {
    group: String,
}

impl AclGrant {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// `g:<group>:rwx,d:g:<group>:rwx`
    pub fn spec(&self) -> String {
        format!("g:{0}:rwx,d:g:{0}:rwx", self.group)
    }

    pub fn command(&self, path: &Path) -> CommandSpec {
        CommandSpec::new("setfacl")
            .arg("-Rm")
            .arg(self.spec())
            .arg(path.to_string_lossy())
    }
}

impl Default for AclGrant {
    fn default() -> Self {
        Self::new("www-data")
    }
}
