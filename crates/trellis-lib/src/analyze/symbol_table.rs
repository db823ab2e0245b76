//! Per-file constant symbols.
//!
//! Type names live in the [`TypeGraph`](crate::types::TypeGraph); constants
//! are not types, so they get their own table keyed by declaring file.

use indexmap::IndexMap;

use crate::element::ConstElement;
use crate::schema::FileId;

/// Handle to a declared top-level constant.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ConstId(u32);

impl ConstId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ConstDecl<'f> {
    pub file: FileId,
    pub element: &'f ConstElement,
}

#[derive(Clone, Debug, Default)]
pub struct SymbolTable<'f> {
    /// Indexed by `FileId`.
    files: Vec<IndexMap<&'f str, ConstId>>,
    decls: Vec<ConstDecl<'f>>,
}

impl<'f> SymbolTable<'f> {
    pub fn new(file_count: usize) -> Self {
        Self {
            files: vec![IndexMap::new(); file_count],
            decls: Vec::new(),
        }
    }

    /// Register a constant.
    ///
    /// Returns the existing handle as the error if the file already declares
    /// a constant with the same name.
    pub fn declare(&mut self, file: FileId, element: &'f ConstElement) -> Result<ConstId, ConstId> {
        let scope = &mut self.files[file.index()];
        if let Some(&existing) = scope.get(element.meta.name.as_str()) {
            return Err(existing);
        }

        let id = ConstId(self.decls.len() as u32);
        scope.insert(element.meta.name.as_str(), id);
        self.decls.push(ConstDecl { file, element });
        Ok(id)
    }

    pub fn lookup(&self, file: FileId, name: &str) -> Option<ConstId> {
        self.files.get(file.index())?.get(name).copied()
    }

    pub fn get(&self, id: ConstId) -> ConstDecl<'f> {
        self.decls[id.index()]
    }

    /// Declared constants in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ConstId, ConstDecl<'f>)> + '_ {
        self.decls
            .iter()
            .enumerate()
            .map(|(i, decl)| (ConstId(i as u32), *decl))
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}
