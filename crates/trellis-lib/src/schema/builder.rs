//! Schema assembly: load, link, validate, freeze.

use super::Schema;
use super::loader::{Loader, dependency_order};
use super::resolver::IncludeResolver;
use crate::analyze::{LinkOptions, link};
use crate::diagnostics::Diagnostics;
use crate::element::FileElement;
use crate::types::TypeGraph;
use crate::validate::validate;
use crate::{Error, Result};

const DEFAULT_MAX_INCLUDE_DEPTH: u32 = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchemaConfig {
    /// Warnings fail the build.
    pub strict: bool,
    pub deprecation_warnings: bool,
    pub max_include_depth: u32,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            strict: false,
            deprecation_warnings: true,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }
}

/// Collects root files and settings, then builds a [`Schema`].
///
/// Each build owns its own type graph; builders share no state.
pub struct SchemaBuilder<'r> {
    roots: Vec<FileElement>,
    resolver: Option<Box<dyn IncludeResolver + 'r>>,
    config: SchemaConfig,
}

impl Default for SchemaBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> SchemaBuilder<'r> {
    pub fn new() -> Self {
        Self {
            roots: Vec::new(),
            resolver: None,
            config: SchemaConfig::default(),
        }
    }

    /// Add a root file. Includes between root files resolve by path even
    /// without a resolver.
    pub fn file(mut self, file: FileElement) -> Self {
        self.roots.push(file);
        self
    }

    pub fn files(mut self, files: impl IntoIterator<Item = FileElement>) -> Self {
        self.roots.extend(files);
        self
    }

    pub fn include_resolver(mut self, resolver: impl IncludeResolver + 'r) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    pub fn with_deprecation_warnings(mut self, enabled: bool) -> Self {
        self.config.deprecation_warnings = enabled;
        self
    }

    pub fn with_max_include_depth(mut self, depth: u32) -> Self {
        self.config.max_include_depth = depth;
        self
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Link and validate.
    ///
    /// Fails with [`Error::InvalidSchema`] carrying every diagnostic, sorted
    /// by location, if any error was reported (or, in strict mode, any
    /// warning). On success the schema keeps the warnings.
    pub fn build(self) -> Result<Schema> {
        let strict = self.config.strict;
        let (schema, diagnostics) = self.link();
        let diagnostics = diagnostics.sorted();

        if diagnostics.has_errors() || (strict && diagnostics.has_warnings()) {
            log::debug!(
                "schema build failed: {} errors, {} warnings",
                diagnostics.error_count(),
                diagnostics.warning_count()
            );
            return Err(Error::InvalidSchema(diagnostics));
        }

        Ok(Schema {
            warnings: diagnostics,
            ..schema
        })
    }

    /// Run every phase and return the schema regardless of errors.
    ///
    /// Declarations with errors are still present, so internal callers can
    /// inspect what was recovered.
    pub(crate) fn link(mut self) -> (Schema, Diagnostics) {
        let mut diagnostics = Diagnostics::new();

        let resolver = self.resolver.as_deref_mut();
        let files = Loader::new(resolver, self.config.max_include_depth, &mut diagnostics)
            .load(std::mem::take(&mut self.roots));
        let order = dependency_order(&files);

        let mut graph = TypeGraph::new();
        let options = LinkOptions {
            deprecation_warnings: self.config.deprecation_warnings,
        };
        let output = link(&files, &order, &mut graph, options, &mut diagnostics);
        validate(&output, &graph, &mut diagnostics);

        let schema = Schema {
            files,
            graph,
            typedefs: output.typedefs,
            enums: output.enums,
            structs: output.structs,
            services: output.services,
            constants: output.constants,
            warnings: Diagnostics::new(),
        };
        (schema, diagnostics)
    }
}
