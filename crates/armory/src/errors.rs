use armory_build::{CodecError, ErrorKind};
use armory_catalog::{Catalog, CatalogError, HeroId};
use armory_library::LibraryError;
use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error("Catalog could not be loaded from {path}")]
    #[diagnostic(
        code(catalog::load_failed),
        help("Pass --catalog <path> or run 'armory config set-catalog <path>' to point at a valid catalog JSON file")
    )]
    CatalogLoad {
        path: Utf8PathBuf,
        #[source]
        source: CatalogError,
    },

    #[error("Hero {id} not found")]
    #[diagnostic(
        code(catalog::hero_not_found),
        help("Run 'armory heroes' to list the heroes in the catalog")
    )]
    HeroNotFound { id: HeroId },

    #[error("Build file could not be read: {path}")]
    #[diagnostic(
        code(build::invalid_file),
        help("A build file is JSON shaped like {{ \"hero\": 19, \"rounds\": [{{ \"power\": 101, \"items\": [201] }}, ...] }}")
    )]
    InvalidBuildFile {
        path: Utf8PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("This build token is malformed")]
    #[diagnostic(
        code(token::malformed),
        help("Make sure the whole token or share link was copied")
    )]
    MalformedToken {
        #[source]
        source: CodecError,
    },

    #[error("This build uses content not available in catalog {catalog_version}")]
    #[diagnostic(
        code(token::unknown_reference),
        help("The build was probably made for another season. Update the catalog or pick another build")
    )]
    UnknownReference {
        catalog_version: String,
        #[source]
        source: CodecError,
    },

    #[error("This build breaks the round rules")]
    #[diagnostic(
        code(token::rule_violation),
        help("Powers can only be picked on power rounds, and each round holds a limited number of items")
    )]
    RuleViolation {
        #[source]
        source: CodecError,
    },

    #[error("Build token could not be produced")]
    #[diagnostic(code(token::internal))]
    TokenInternal {
        #[source]
        source: CodecError,
    },

    #[error("Saved build not found: {id}")]
    #[diagnostic(
        code(library::not_found),
        help("Run 'armory library list' to see saved builds and their ids")
    )]
    SavedBuildNotFound { id: String },

    #[error("Saved build {id} has been submitted")]
    #[diagnostic(
        code(library::submitted),
        help("Submitted builds are read-only. Save a new build instead")
    )]
    SavedBuildSubmitted { id: String },

    #[error("Library operation failed")]
    #[diagnostic(code(library::failed))]
    Library {
        #[source]
        source: LibraryError,
    },

    #[error("No library directory available")]
    #[diagnostic(
        code(library::no_dir),
        help("Run 'armory config set-library-dir <path>' to choose where saved builds live")
    )]
    LibraryDirUnavailable,
}

impl CliError {
    pub fn catalog_load(path: Utf8PathBuf, source: CatalogError) -> Self {
        Self::CatalogLoad { path, source }
    }

    pub fn invalid_build_file(
        path: Utf8PathBuf,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::InvalidBuildFile {
            path,
            source: source.into(),
        }
    }

    /// Pick the diagnostic matching the kind of codec failure.
    pub fn codec(source: CodecError, catalog: &Catalog) -> Self {
        match source.kind() {
            ErrorKind::Malformed => Self::MalformedToken { source },
            ErrorKind::UnknownReference => Self::UnknownReference {
                catalog_version: catalog.version().to_string(),
                source,
            },
            ErrorKind::RuleViolation => Self::RuleViolation { source },
            ErrorKind::Internal => Self::TokenInternal { source },
        }
    }

    pub fn library(source: LibraryError) -> Self {
        match source {
            LibraryError::NotFound(id) => Self::SavedBuildNotFound { id },
            LibraryError::Submitted(id) => Self::SavedBuildSubmitted { id },
            source => Self::Library { source },
        }
    }
}
