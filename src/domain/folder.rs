// src/domain/folder.rs
use serde::{Deserialize, Serialize};

pub type FolderId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    pub icon: Option<String>,
}

impl Folder {
    /// Name as shown in folder lists, prefixed with its icon.
    pub fn label(&self) -> String {
        format!("{} {}", self.icon.as_deref().unwrap_or("📁"), self.name)
    }
}
