/*!
# Source Emitters

Turn a declaration plus its package into a written Java source file.

- [`FileEmitter`] writes `<root>/<package as path>/<Name>.java`, creating
  directories as needed. Existing files are overwritten.
- [`MemoryEmitter`] keeps the rendered files keyed by relative path, for
  dry runs and tests.

Both render through [`render_file`], so the same declaration and package
always produce byte-identical text.
*/

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::decl::{render_file, Declaration};
use crate::request::is_package_name;

/// Maven-style source root used when none is configured
pub const DEFAULT_SOURCE_ROOT: &str = "./src/main/java";

/// Header comment placed at the top of every generated file
pub const DEFAULT_FILE_COMMENT: &str = "AUTO-GENERATED BY dpgen";

/// Emitter errors
#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    #[error("'{0}' is not a valid package name")]
    InvalidPackage(String),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Sink for generated declarations
pub trait SourceEmitter {
    /// Render and store `decl`; returns the path it was written to
    fn emit(&mut self, package: &str, decl: &Declaration) -> Result<PathBuf, WriteError>;
}

/// Path of a declaration's file relative to the source root
pub fn relative_source_path(package: &str, name: &str) -> Result<PathBuf, WriteError> {
    if !is_package_name(package) {
        return Err(WriteError::InvalidPackage(package.to_string()));
    }
    let mut path: PathBuf = package.split('.').collect();
    path.push(format!("{name}.java"));
    Ok(path)
}

/// File-system emitter
#[derive(Debug, Clone)]
pub struct FileEmitter {
    root: PathBuf,
    file_comment: Option<String>,
}

impl FileEmitter {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_SOURCE_ROOT),
            file_comment: Some(DEFAULT_FILE_COMMENT.to_string()),
        }
    }

    /// Set the source root directory
    pub fn root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.root = root.as_ref().to_path_buf();
        self
    }

    /// Set or clear the header comment
    pub fn file_comment(mut self, comment: Option<String>) -> Self {
        self.file_comment = comment;
        self
    }

    pub fn source_root(&self) -> &Path {
        &self.root
    }
}

impl Default for FileEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceEmitter for FileEmitter {
    fn emit(&mut self, package: &str, decl: &Declaration) -> Result<PathBuf, WriteError> {
        let path = self.root.join(relative_source_path(package, &decl.name)?);
        let content = render_file(package, decl, self.file_comment.as_deref());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| WriteError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, content).map_err(|source| WriteError::Io {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "Wrote {}", decl.name);
        Ok(path)
    }
}

/// In-memory emitter
#[derive(Debug, Clone, Default)]
pub struct MemoryEmitter {
    file_comment: Option<String>,
    files: BTreeMap<PathBuf, String>,
}

impl MemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_comment(comment: impl Into<String>) -> Self {
        Self {
            file_comment: Some(comment.into()),
            files: BTreeMap::new(),
        }
    }

    /// Rendered files keyed by path relative to the source root
    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }

    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl SourceEmitter for MemoryEmitter {
    fn emit(&mut self, package: &str, decl: &Declaration) -> Result<PathBuf, WriteError> {
        let path = relative_source_path(package, &decl.name)?;
        let content = render_file(package, decl, self.file_comment.as_deref());
        debug!(path = %path.display(), bytes = content.len(), "Rendered {}", decl.name);
        self.files.insert(path.clone(), content);
        Ok(path)
    }
}

impl<E: SourceEmitter + ?Sized> SourceEmitter for &mut E {
    fn emit(&mut self, package: &str, decl: &Declaration) -> Result<PathBuf, WriteError> {
        (**self).emit(package, decl)
    }
}
