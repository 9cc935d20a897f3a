//! Where the navigator's static tree comes from.
//!
//! * a JSON document of `{ name, type, children?, content?, language? }`
//!   entries,
//! * a directory on disk, walked with [`ignore`] so `.gitignore` rules apply,
//! * the built-in sample shipped in `assets/`.

use std::path::Path;

use ignore::WalkBuilder;
use serde::Deserialize;

use super::tree::{FileTree, NodeId, NodeKind};
use crate::error::SourceError;

const SAMPLE_TREE: &str = include_str!("../../assets/sample_tree.json");

// ───────────────────────────────────────── json ──────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EntryKind {
    File,
    Directory,
}

#[derive(Debug, Deserialize)]
struct NodeEntry {
    name: String,
    #[serde(rename = "type")]
    kind: EntryKind,
    #[serde(default)]
    children: Vec<NodeEntry>,
    content: Option<String>,
    language: Option<String>,
}

impl NodeEntry {
    fn into_kind(self) -> Result<(String, NodeKind, Vec<NodeEntry>), SourceError> {
        match self.kind {
            EntryKind::Directory => {
                if self.content.is_some() || self.language.is_some() {
                    return Err(SourceError::DirectoryWithPayload { name: self.name });
                }
                Ok((self.name, NodeKind::Directory, self.children))
            }
            EntryKind::File => {
                if !self.children.is_empty() {
                    return Err(SourceError::FileWithChildren { name: self.name });
                }
                let kind = NodeKind::file(self.content, self.language);
                Ok((self.name, kind, Vec::new()))
            }
        }
    }
}

/// Parse a JSON array of top-level nodes.
pub fn from_json_str(json: &str) -> Result<FileTree, SourceError> {
    let entries: Vec<NodeEntry> = serde_json::from_str(json)?;
    let mut tree = FileTree::new();
    for entry in entries {
        let (name, kind, children) = entry.into_kind()?;
        let id = tree.add_root(name, kind);
        insert_children(&mut tree, id, children)?;
    }
    Ok(tree)
}

fn insert_children(tree: &mut FileTree, parent: NodeId, children: Vec<NodeEntry>) -> Result<(), SourceError> {
    for entry in children {
        let (name, kind, grandchildren) = entry.into_kind()?;
        let id = tree.add_child(parent, name, kind)?;
        insert_children(tree, id, grandchildren)?;
    }
    Ok(())
}

pub fn load_json(path: &Path) -> Result<FileTree, SourceError> {
    let json = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_json_str(&json)
}

/// The example tree bundled with the binary.
pub fn sample_tree() -> Result<FileTree, SourceError> {
    from_json_str(SAMPLE_TREE)
}

// ───────────────────────────────────────── directory ─────────

/// Knobs for [`scan_dir`].
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory levels below the root to include.
    pub max_depth: usize,
    pub respect_gitignore: bool,
    pub show_hidden: bool,
    /// Larger files are listed without content.
    pub max_file_bytes: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            respect_gitignore: true,
            show_hidden: false,
            max_file_bytes: 64 * 1024,
        }
    }
}

/// Build a tree from the entries under `root` (the root itself is not a
/// node).  Directories come before files; each group is sorted
/// case-insensitively.
pub fn scan_dir(root: &Path, config: &ScanConfig) -> Result<FileTree, SourceError> {
    if !root.is_dir() {
        return Err(SourceError::NotADirectory(root.to_path_buf()));
    }
    let mut tree = FileTree::new();
    populate(&mut tree, None, root, config, 0)?;
    tracing::debug!(root = %root.display(), nodes = tree.len(), "directory scanned");
    Ok(tree)
}

fn populate(
    tree: &mut FileTree,
    parent: Option<NodeId>,
    dir: &Path,
    config: &ScanConfig,
    depth: usize,
) -> Result<(), SourceError> {
    let walker = WalkBuilder::new(dir)
        .max_depth(Some(1))
        .hidden(!config.show_hidden)
        .git_ignore(config.respect_gitignore)
        .build();

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in walker.flatten() {
        let path = entry.path();
        if path == dir {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
        if is_dir {
            dirs.push((name, path.to_path_buf()));
        } else {
            files.push((name, path.to_path_buf()));
        }
    }
    dirs.sort_by_key(|(name, _)| name.to_lowercase());
    files.sort_by_key(|(name, _)| name.to_lowercase());

    for (name, path) in dirs {
        let id = attach(tree, parent, name, NodeKind::Directory)?;
        if depth + 1 < config.max_depth {
            populate(tree, Some(id), &path, config, depth + 1)?;
        }
    }
    for (name, path) in files {
        let content = read_text(&path, config.max_file_bytes);
        let language = language_for(&name).map(str::to_string);
        attach(tree, parent, name, NodeKind::file(content, language))?;
    }
    Ok(())
}

fn attach(tree: &mut FileTree, parent: Option<NodeId>, name: String, kind: NodeKind) -> Result<NodeId, SourceError> {
    match parent {
        Some(p) => tree.add_child(p, name, kind),
        None => Ok(tree.add_root(name, kind)),
    }
}

/// Read `path` as UTF-8 text when it is small and not binary.
fn read_text(path: &Path, max_bytes: u64) -> Option<String> {
    let len = std::fs::metadata(path).ok()?.len();
    if len == 0 || len > max_bytes {
        return None;
    }
    // octet-stream is the sniffer's "don't know"; the UTF-8 check decides.
    if let Some(mime) = tree_magic_mini::from_filepath(path) {
        if mime != "application/octet-stream" && !is_textual(mime) {
            return None;
        }
    }
    let text = std::fs::read_to_string(path).ok()?;
    (!text.contains('\0')).then_some(text)
}

fn is_textual(mime: &str) -> bool {
    mime.starts_with("text/")
        || mime.ends_with("+xml")
        || matches!(
            mime,
            "application/json"
                | "application/javascript"
                | "application/x-shellscript"
                | "application/xml"
                | "application/toml"
                | "application/x-yaml"
        )
}

/// Highlighter hint for a file name, by extension.
pub fn language_for(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    let (_, ext) = lower.rsplit_once('.')?;
    let lang = match ext {
        "tf" | "hcl" => "hcl",
        "md" | "mdx" => "md",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "sh" | "bash" => "sh",
        "py" => "py",
        "js" | "jsx" => "js",
        "ts" | "tsx" => "ts",
        "css" | "scss" | "sass" => "css",
        "html" | "htm" => "html",
        "rs" => "rs",
        "go" => "go",
        "toml" => "toml",
        "xml" => "xml",
        "sql" => "sql",
        "rb" => "rb",
        "c" | "h" => "c",
        "cpp" | "hpp" | "cc" => "cpp",
        "java" => "java",
        "lua" => "lua",
        _ => return None,
    };
    Some(lang)
}
