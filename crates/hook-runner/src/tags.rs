//! File type tags for `types`, `types_or` and `exclude_types`

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes read when deciding between `text` and `binary`
const SNIFF_BYTES: usize = 8 * 1024;

/// The set of tags describing one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTags(BTreeSet<&'static str>);

impl FileTags {
    /// Tag the file at `root/rel`.
    ///
    /// Missing paths get no tags at all, so the default `types: [file]`
    /// keeps them away from hooks.
    pub fn identify(root: &Path, rel: &str) -> Self {
        let path = root.join(rel);
        let Ok(metadata) = std::fs::symlink_metadata(&path) else {
            return Self::default();
        };

        let mut tags = BTreeSet::new();
        if metadata.file_type().is_symlink() {
            tags.insert("symlink");
            return Self(tags);
        }
        if metadata.is_dir() {
            tags.insert("directory");
            return Self(tags);
        }

        tags.insert("file");
        tags.insert(if is_executable(&metadata) {
            "executable"
        } else {
            "non-executable"
        });

        let head = read_head(&path);
        tags.insert(if head.contains(&0) { "binary" } else { "text" });

        let name = rel.rsplit('/').next().unwrap_or(rel);
        let by_name = tags_for_name(name);
        if by_name.is_empty() {
            tags.extend(tags_for_shebang(&head));
        } else {
            tags.extend(by_name);
        }

        Self(tags)
    }

    /// Build a tag set directly
    pub fn from_tags<'a>(tags: impl IntoIterator<Item = &'a str>) -> Self {
        Self(tags.into_iter().filter_map(intern).collect())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }
}

fn read_head(path: &Path) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SNIFF_BYTES);
    if let Ok(file) = File::open(path) {
        let _ = file.take(SNIFF_BYTES as u64).read_to_end(&mut buf);
    }
    buf
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    false
}

fn tags_for_name(name: &str) -> Vec<&'static str> {
    match name {
        "Dockerfile" => return vec!["dockerfile"],
        "Makefile" | "makefile" | "GNUmakefile" => return vec!["makefile"],
        "setup.cfg" | "tox.ini" | ".flake8" => return vec!["ini"],
        _ => {}
    }

    let Some((_, ext)) = name.rsplit_once('.') else {
        return Vec::new();
    };
    match ext.to_ascii_lowercase().as_str() {
        "py" => vec!["python"],
        "pyi" => vec!["python", "pyi"],
        "ipynb" => vec!["jupyter", "json"],
        "rs" => vec!["rust"],
        "yaml" | "yml" => vec!["yaml"],
        "toml" => vec!["toml"],
        "json" => vec!["json"],
        "md" | "markdown" => vec!["markdown"],
        "sh" => vec!["shell", "sh"],
        "bash" => vec!["shell", "bash"],
        "js" | "mjs" | "cjs" => vec!["javascript"],
        "jsx" => vec!["javascript", "jsx"],
        "ts" => vec!["ts"],
        "tsx" => vec!["ts", "tsx"],
        "c" | "h" => vec!["c"],
        "cc" | "cpp" | "cxx" | "hpp" => vec!["c++"],
        "go" => vec!["go"],
        "html" | "htm" => vec!["html"],
        "css" => vec!["css"],
        "ini" => vec!["ini"],
        "cfg" => vec!["cfg"],
        "txt" => vec!["plain-text"],
        _ => Vec::new(),
    }
}

fn tags_for_shebang(head: &[u8]) -> Vec<&'static str> {
    let Some(rest) = head.strip_prefix(b"#!") else {
        return Vec::new();
    };
    let line = rest.split(|b| *b == b'\n').next().unwrap_or_default();
    let line = String::from_utf8_lossy(line);
    let mut words = line.split_whitespace();
    let mut interpreter = words.next().unwrap_or("").rsplit('/').next().unwrap_or("");
    if interpreter == "env" {
        interpreter = words.next().unwrap_or("");
    }

    if interpreter.starts_with("python") {
        vec!["python"]
    } else {
        match interpreter {
            "sh" | "dash" => vec!["shell", "sh"],
            "bash" => vec!["shell", "bash"],
            "node" => vec!["javascript"],
            _ => Vec::new(),
        }
    }
}

/// Map a tag name onto the static set used by [`FileTags`]
fn intern(tag: &str) -> Option<&'static str> {
    const KNOWN: &[&str] = &[
        "file", "directory", "symlink", "executable", "non-executable", "text", "binary",
        "dockerfile", "makefile", "python", "pyi", "jupyter", "rust", "yaml", "toml", "json",
        "markdown", "shell", "sh", "bash", "javascript", "jsx", "ts", "tsx", "c", "c++", "go",
        "html", "css", "ini", "cfg", "plain-text",
    ];
    KNOWN.iter().copied().find(|known| *known == tag)
}
