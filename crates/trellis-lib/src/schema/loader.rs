//! File loading: roots plus everything they transitively include.

use std::collections::{HashMap, HashSet};

use super::files::{FileId, FileMap};
use super::resolver::{IncludeResolver, ResolvedInclude};
use crate::analyze::dependencies::strongly_connected;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::element::{FileElement, IncludeElement};

pub struct Loader<'a, 'r> {
    resolver: Option<&'a mut (dyn IncludeResolver + 'r)>,
    max_depth: u32,
    files: FileMap,
    visited: HashSet<FileId>,
    memo: HashMap<(FileId, String), Option<FileId>>,
    diagnostics: &'a mut Diagnostics,
}

impl<'a, 'r> Loader<'a, 'r> {
    pub fn new(
        resolver: Option<&'a mut (dyn IncludeResolver + 'r)>,
        max_depth: u32,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            resolver,
            max_depth,
            files: FileMap::new(),
            visited: HashSet::new(),
            memo: HashMap::new(),
            diagnostics,
        }
    }

    /// Register the roots, then follow includes depth-first.
    ///
    /// Roots are registered up front so includes can name one another by
    /// path without a resolver.
    pub fn load(mut self, roots: Vec<FileElement>) -> FileMap {
        let ids: Vec<FileId> = roots
            .into_iter()
            .map(|root| {
                let path = root.path().to_owned();
                self.files.add(&path, root)
            })
            .collect();

        for id in ids {
            self.visit(id, 0);
        }

        log::debug!("loaded {} files", self.files.len());
        self.files
    }

    fn visit(&mut self, file: FileId, depth: u32) {
        if !self.visited.insert(file) {
            return;
        }

        let includes = self.files.get(file).element().includes.clone();
        for include in &includes {
            if depth >= self.max_depth {
                self.diagnostics
                    .report(DiagnosticKind::IncludeDepthExceeded, &include.location)
                    .message(format!(
                        "`{}` is nested more than {} includes deep",
                        include.path, self.max_depth
                    ))
                    .emit();
                continue;
            }
            let Some(target) = self.resolve(file, include) else {
                continue;
            };
            self.files.add_include(file, target);
            self.visit(target, depth + 1);
        }
    }

    fn resolve(&mut self, from: FileId, include: &IncludeElement) -> Option<FileId> {
        let key = (from, include.path.clone());
        if let Some(&cached) = self.memo.get(&key) {
            return cached;
        }

        let from_path = self.files.get(from).path().to_owned();
        let resolved = self
            .resolver
            .as_mut()
            .and_then(|resolver| resolver.resolve(&from_path, &include.path));
        let id = match resolved {
            Some(ResolvedInclude { path, element }) => Some(self.files.add(&path, element)),
            None => self.files.lookup(&include.path),
        };

        match id {
            Some(id) => log::trace!(
                "include `{}` from `{}` resolved to `{}`",
                include.path,
                from_path,
                self.files.get(id).path()
            ),
            None => self
                .diagnostics
                .report(DiagnosticKind::UnresolvedInclude, &include.location)
                .message(include.path.as_str())
                .emit(),
        }

        self.memo.insert(key, id);
        id
    }
}

/// Files ordered so includes come before their includers. Files in an
/// include cycle keep registration order among themselves.
pub fn dependency_order(files: &FileMap) -> Vec<FileId> {
    let edges: Vec<Vec<usize>> = files
        .iter()
        .map(|file| file.includes().iter().map(|id| id.index()).collect())
        .collect();

    strongly_connected(&edges)
        .into_iter()
        .flatten()
        .map(|index| FileId(index as u32))
        .collect()
}
