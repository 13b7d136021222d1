use std::path::PathBuf;

/// Fatal failure to load one of the pipeline inputs. Nothing is rendered after this.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to load topology from {}", path.display())]
    Topology {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to load table from {}", path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to load config from {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl LoadError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Topology { path, .. }
            | LoadError::Table { path, .. }
            | LoadError::Config { path, .. } => path,
        }
    }
}
