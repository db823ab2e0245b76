//! Reads element trees from JSON files and resolves includes on disk.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use trellis_lib::element::FileElement;
use trellis_lib::schema::{IncludeResolver, ResolvedInclude};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no input files given")]
    NoInput,
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn read_element(path: &Path) -> Result<FileElement, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Root element trees plus a resolver that knows where each came from.
pub struct Inputs {
    pub roots: Vec<FileElement>,
    pub resolver: DiskResolver,
}

pub fn load_inputs(files: &[PathBuf], include_dirs: &[PathBuf]) -> Result<Inputs, LoadError> {
    if files.is_empty() {
        return Err(LoadError::NoInput);
    }

    let mut resolver = DiskResolver::new(include_dirs.to_vec());
    let mut roots = Vec::with_capacity(files.len());
    for path in files {
        let element = read_element(path)?;
        log::debug!("loaded `{}` from '{}'", element.path(), path.display());
        resolver.register(element.path(), path);
        roots.push(element);
    }

    Ok(Inputs { roots, resolver })
}

/// Looks for `<include>.json`, then `<include>`, next to the including
/// file and then in each include directory.
///
/// A JSON file reached again, as a root or through another include, keeps
/// the schema path it was first registered under.
pub struct DiskResolver {
    include_dirs: Vec<PathBuf>,
    /// Schema path of every loaded file, mapped to the JSON file it came from.
    origins: HashMap<String, PathBuf>,
    /// Normalized JSON path of every loaded file, mapped to its schema path.
    canonical: HashMap<PathBuf, String>,
}

impl DiskResolver {
    pub fn new(include_dirs: Vec<PathBuf>) -> Self {
        Self {
            include_dirs,
            origins: HashMap::new(),
            canonical: HashMap::new(),
        }
    }

    fn register(&mut self, schema_path: &str, origin: &Path) {
        self.origins
            .insert(schema_path.to_string(), origin.to_path_buf());
        self.canonical
            .entry(normalize(origin))
            .or_insert_with(|| schema_path.to_string());
    }

    fn candidates(&self, from: &str, include: &str) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        if let Some(dir) = self.origins.get(from).and_then(|origin| origin.parent()) {
            dirs.push(dir.to_path_buf());
        }
        dirs.extend(self.include_dirs.iter().cloned());

        dirs.iter()
            .flat_map(|dir| {
                let path = normalize(&dir.join(include));
                [with_json_suffix(&path), path]
            })
            .collect()
    }
}

impl IncludeResolver for DiskResolver {
    fn resolve(&mut self, from: &str, include: &str) -> Option<ResolvedInclude> {
        let candidates = self.candidates(from, include);
        let Some(path) = candidates.into_iter().find(|c| c.is_file()) else {
            log::debug!("no file found for include `{}` from `{}`", include, from);
            return None;
        };

        let element = match read_element(&path) {
            Ok(element) => element,
            Err(err) => {
                log::warn!("{}", err);
                return None;
            }
        };
        let canonical = match self.canonical.get(&path) {
            Some(known) => known.clone(),
            None => path.to_string_lossy().into_owned(),
        };
        log::trace!("include `{}` from `{}` is '{}'", include, from, canonical);
        self.register(&canonical, &path);
        Some(ResolvedInclude::new(canonical, element))
    }
}

fn with_json_suffix(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".json");
    PathBuf::from(name)
}

/// Drop `.` components and fold `dir/..` pairs, so one file reached two
/// ways gets one canonical path.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir
                if matches!(out.components().next_back(), Some(Component::Normal(_))) =>
            {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
