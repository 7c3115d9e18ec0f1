//! Error type of the CLI, rendered through miette.

use std::io;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use netgraph::GraphError;

use crate::config::ConfigError;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("I/O error on {path}")]
    #[diagnostic(code(netgraph::io))]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid graph file: {message}")]
    #[diagnostic(code(netgraph::input))]
    Input {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
    },

    #[error("Failed to load graph: {0}")]
    #[diagnostic(code(netgraph::graph))]
    Graph(#[from] GraphError),

    #[error("Update #{index} refers to link {position}, which does not exist")]
    #[diagnostic(
        code(netgraph::update::link),
        help("`link` is an index into the input's [[links]], starting at 0")
    )]
    UnknownLink { index: usize, position: usize },

    #[error("Update #{index} (`{accessor}` on {target}) failed")]
    #[diagnostic(
        code(netgraph::update),
        help("reads take no arguments; `position` takes two, other writable accessors one")
    )]
    Update {
        index: usize,
        target: String,
        accessor: String,
        #[source]
        source: GraphError,
    },
}

impl CliError {
    pub(crate) fn io(path: &str, source: io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source,
        }
    }

    pub(crate) fn input(path: &str, src: String, err: &toml::de::Error) -> Self {
        Self::Input {
            message: err.message().to_string(),
            span: err.span().map(SourceSpan::from),
            src: NamedSource::new(path, src),
        }
    }
}
