use super::error::{ProviderError, ProviderErrorCode, ProviderResult};
use super::{AttributeKind, AttributeValue, HierarchyProvider, Resolver};
use crate::name::{FileName, FileType};
use chrono::{DateTime, Utc};
use std::fmt;
use std::fs::{self, Metadata};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

const LOCAL_SCHEME: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalNode {
    path: PathBuf,
    name: FileName,
}

impl LocalNode {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Local disk in the `file` scheme. Symbolic links are reported as files and
/// never followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileProvider;

impl LocalFileProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn node_for_path(&self, path: &Path) -> ProviderResult<LocalNode> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|err| ProviderError::from_io(&err, "Failed to read current dir"))?
                .join(path)
        };
        let mut name = name_for_path(&absolute)?;
        if let Ok(meta) = fs::symlink_metadata(&absolute) {
            name = name.with_type(type_of(&meta.file_type()));
        }
        Ok(LocalNode {
            path: absolute,
            name,
        })
    }

    fn metadata(&self, node: &LocalNode) -> ProviderResult<Metadata> {
        fs::symlink_metadata(&node.path)
            .map_err(|err| ProviderError::from_io(&err, node.path.display()))
    }
}

fn non_utf8(what: impl fmt::Display) -> ProviderError {
    ProviderError::new(
        ProviderErrorCode::UnsupportedName,
        format!("'{what}' is not valid UTF-8"),
    )
}

fn name_for_path(path: &Path) -> ProviderResult<FileName> {
    let raw = path
        .to_str()
        .ok_or_else(|| non_utf8(path.display()))?
        .replace('\\', "/");
    let raw = if raw.starts_with('/') {
        raw
    } else {
        format!("/{raw}")
    };
    FileName::from_decoded_path(LOCAL_SCHEME, &raw)
        .map_err(|err| ProviderError::new(ProviderErrorCode::UnsupportedName, err.to_string()))
}

fn path_for_name(name: &FileName) -> PathBuf {
    let path = name.path();
    #[cfg(windows)]
    {
        let trimmed = path.trim_start_matches('/');
        if trimmed.as_bytes().get(1) == Some(&b':') {
            return PathBuf::from(trimmed.replace('/', "\\"));
        }
    }
    PathBuf::from(path)
}

fn type_of(kind: &fs::FileType) -> FileType {
    if kind.is_symlink() || kind.is_file() {
        FileType::File
    } else if kind.is_dir() {
        FileType::Folder
    } else {
        FileType::Unknown
    }
}

fn permission_flag(result: std::io::Result<()>, path: &Path) -> ProviderResult<AttributeValue> {
    match result {
        Ok(()) => Ok(AttributeValue::Flag(true)),
        Err(err) if err.kind() == ErrorKind::PermissionDenied => Ok(AttributeValue::Flag(false)),
        Err(err) => Err(ProviderError::from_io(&err, path.display())),
    }
}

impl HierarchyProvider for LocalFileProvider {
    type Node = LocalNode;

    fn name(&self, node: &LocalNode) -> FileName {
        node.name.clone()
    }

    fn file_type(&self, node: &LocalNode) -> FileType {
        match fs::symlink_metadata(&node.path) {
            Ok(meta) => type_of(&meta.file_type()),
            Err(err) => {
                debug!(path = %node.path.display(), error = %err, "stat failed");
                FileType::Unknown
            }
        }
    }

    fn list_children(&self, node: &LocalNode) -> ProviderResult<Vec<LocalNode>> {
        let iter = fs::read_dir(&node.path)
            .map_err(|err| ProviderError::from_io(&err, node.path.display()))?;
        let mut children = Vec::new();
        for entry in iter {
            let entry = entry.map_err(|err| ProviderError::from_io(&err, node.path.display()))?;
            let path = entry.path();
            let file_name = entry.file_name();
            let file_name = file_name.to_str().ok_or_else(|| non_utf8(path.display()))?;
            let file_type = entry
                .file_type()
                .map(|kind| type_of(&kind))
                .unwrap_or(FileType::Unknown);
            let name = node
                .name
                .child(file_name)
                .map_err(|err| {
                    ProviderError::new(ProviderErrorCode::UnsupportedName, err.to_string())
                })?
                .with_type(file_type);
            children.push(LocalNode { path, name });
        }
        children.sort_by(|a, b| a.name.base_name().cmp(b.name.base_name()));
        Ok(children)
    }

    fn attribute(&self, node: &LocalNode, kind: AttributeKind) -> ProviderResult<AttributeValue> {
        match kind {
            AttributeKind::Size => Ok(AttributeValue::Size(self.metadata(node)?.len())),
            AttributeKind::Empty => {
                let meta = self.metadata(node)?;
                if meta.is_dir() {
                    let mut iter = fs::read_dir(&node.path)
                        .map_err(|err| ProviderError::from_io(&err, node.path.display()))?;
                    Ok(AttributeValue::Flag(iter.next().is_none()))
                } else {
                    Ok(AttributeValue::Flag(meta.len() == 0))
                }
            }
            AttributeKind::LastModified => {
                let modified = self
                    .metadata(node)?
                    .modified()
                    .map_err(|err| ProviderError::from_io(&err, node.path.display()))?;
                Ok(AttributeValue::Timestamp(DateTime::<Utc>::from(modified)))
            }
            AttributeKind::Hidden => Ok(AttributeValue::Flag(
                node.name.base_name().starts_with('.'),
            )),
            AttributeKind::Readable => {
                let meta = self.metadata(node)?;
                let access = if meta.is_dir() {
                    fs::read_dir(&node.path).map(|_| ())
                } else {
                    fs::File::open(&node.path).map(|_| ())
                };
                permission_flag(access, &node.path)
            }
            AttributeKind::Writable => Ok(AttributeValue::Flag(
                !self.metadata(node)?.permissions().readonly(),
            )),
        }
    }
}

impl Resolver for LocalFileProvider {
    fn resolve(&self, name: &FileName) -> ProviderResult<LocalNode> {
        if name.scheme() != LOCAL_SCHEME || name.authority().is_some() {
            return Err(ProviderError::new(
                ProviderErrorCode::UnsupportedName,
                format!("'{name}' is not a local file name"),
            ));
        }
        let path = path_for_name(name);
        let meta = fs::symlink_metadata(&path).map_err(|err| ProviderError::from_io(&err, name))?;
        Ok(LocalNode {
            path,
            name: name.with_type(type_of(&meta.file_type())),
        })
    }
}
