//! File storage for a schema build.
//!
//! Every element tree that takes part in a build is registered once, keyed
//! by its canonical path, and addressed by a [`FileId`] afterwards.

use std::collections::HashMap;

use crate::element::{FileElement, NamespaceElement, file_prefix};

/// Lightweight handle to a file in a schema build.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct FileId(pub(crate) u32);

impl FileId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One registered file.
#[derive(Clone, Debug)]
pub struct SchemaFile {
    id: FileId,
    path: String,
    prefix: String,
    element: FileElement,
    /// Resolved includes, in declaration order, without duplicates.
    includes: Vec<FileId>,
}

impl SchemaFile {
    pub fn id(&self) -> FileId {
        self.id
    }

    /// Canonical path, as reported by the include resolver.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Prefix other files use to qualify names declared here.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn element(&self) -> &FileElement {
        &self.element
    }

    pub fn namespaces(&self) -> &[NamespaceElement] {
        &self.element.namespaces
    }

    pub fn includes(&self) -> &[FileId] {
        &self.includes
    }
}

/// Registry of all files in a build.
#[derive(Clone, Debug, Default)]
pub struct FileMap {
    files: Vec<SchemaFile>,
    by_path: HashMap<String, FileId>,
}

impl FileMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file. A path registered before keeps its first element.
    pub fn add(&mut self, path: &str, element: FileElement) -> FileId {
        if let Some(&id) = self.by_path.get(path) {
            return id;
        }

        let id = FileId(self.files.len() as u32);
        self.files.push(SchemaFile {
            id,
            path: path.to_owned(),
            prefix: file_prefix(path).to_owned(),
            element,
            includes: Vec::new(),
        });
        self.by_path.insert(path.to_owned(), id);
        id
    }

    pub(crate) fn add_include(&mut self, from: FileId, include: FileId) {
        let includes = &mut self.files[from.index()].includes;
        if !includes.contains(&include) {
            includes.push(include);
        }
    }

    pub fn lookup(&self, path: &str) -> Option<FileId> {
        self.by_path.get(path).copied()
    }

    pub fn get(&self, id: FileId) -> &SchemaFile {
        self.files.get(id.index()).expect("invalid FileId")
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaFile> {
        self.files.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = FileId> + use<> {
        (0..self.files.len() as u32).map(FileId)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
