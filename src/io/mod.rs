//! Input loading for the two pipeline resources.

mod csv;
mod topology;

use std::path::Path;

pub use csv::{read_rows, read_rows_str};
pub use topology::{read_features, read_features_str};

use crate::{config::MapConfig, error::LoadError, types::{Feature, Row}};

/// Both inputs, loaded. Only exists when every load succeeded.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub features: Vec<Feature>,
    pub rows: Vec<Row>,
}

/// Load the topology and the table. If either fails the pipeline must not run, so the
/// first failure is returned and nothing partial escapes.
pub fn load_inputs(topology: &Path, table: &Path, config: &MapConfig) -> Result<Inputs, LoadError> {
    let features = read_features(topology, &config.key_field, config.topology_object.as_deref())
        .map_err(|source| LoadError::Topology { path: topology.to_path_buf(), source })?;
    let rows = read_rows(table, &config.key_field)
        .map_err(|source| LoadError::Table { path: table.to_path_buf(), source })?;
    Ok(Inputs { features, rows })
}

#[cfg(test)]
mod tests {
    use super::load_inputs;
    use crate::{config::MapConfig, error::LoadError};

    #[test]
    fn either_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let topo = dir.path().join("states.json");
        let table = dir.path().join("data.csv");
        std::fs::write(&topo, r#"{"type": "FeatureCollection", "features": []}"#).unwrap();
        let config = MapConfig::default();

        let err = load_inputs(&topo, &table, &config).unwrap_err();
        assert!(matches!(err, LoadError::Table { .. }));
        assert_eq!(err.path(), table.as_path());

        std::fs::write(&table, "adm1_code,Heated\nA,1\n").unwrap();
        let inputs = load_inputs(&topo, &table, &config).unwrap();
        assert!(inputs.features.is_empty());
        assert_eq!(inputs.rows.len(), 1);

        let err = load_inputs(&dir.path().join("missing.json"), &table, &config).unwrap_err();
        assert!(matches!(err, LoadError::Topology { .. }));
        assert!(err.to_string().contains("missing.json"));
    }
}
