use crate::engines::generation::genome::Genome;
use crate::error::{PaperwingError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized population state: enough to resume evaluation of a generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    pub generation: usize,
    pub genomes: Vec<Genome>,
}

impl PopulationSnapshot {
    pub fn new(generation: usize, genomes: Vec<Genome>) -> Self {
        Self {
            generation,
            genomes,
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let snapshot: Self = serde_json::from_str(&contents)?;
        if snapshot.genomes.is_empty() {
            return Err(PaperwingError::Checkpoint(
                "Snapshot contains no genomes".to_string(),
            ));
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::genes::GeneSpec;
    use crate::engines::generation::operators::random_genome;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn snapshot_round_trip() {
        let spec = GeneSpec::default();
        let mut rng = StdRng::seed_from_u64(9);
        let genomes: Vec<Genome> = (0..4).map(|_| random_genome(&spec, &mut rng)).collect();
        let snapshot = PopulationSnapshot::new(7, genomes.clone());

        let path = std::env::temp_dir().join("paperwing_snapshot_roundtrip.json");
        snapshot.save(&path).unwrap();
        let loaded = PopulationSnapshot::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.generation, 7);
        assert_eq!(loaded.genomes, genomes);
    }

    #[test]
    fn empty_snapshot_is_rejected() {
        let path = std::env::temp_dir().join("paperwing_snapshot_empty.json");
        PopulationSnapshot::new(0, Vec::new()).save(&path).unwrap();
        let result = PopulationSnapshot::load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(PaperwingError::Checkpoint(_))));
    }
}
