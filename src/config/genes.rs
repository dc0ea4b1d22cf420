use super::traits::ConfigSection;
use crate::engines::generation::Genome;
use crate::error::PaperwingError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of hinge lines in the fixed fold topology, ordered root to tip.
pub const HINGE_COUNT: usize = 4;

/// Fixed genome layout. Every genome has exactly this many genes, in this
/// order; the decoder and the gene range table both rely on it.
pub const GENE_WING_SPAN: usize = 0;
pub const GENE_ROOT_CHORD: usize = 1;
pub const GENE_BODY_LENGTH: usize = 2;
pub const GENE_FOLD_BASE: usize = 3;
pub const GENE_NOSE_WEIGHT: usize = GENE_FOLD_BASE + HINGE_COUNT;
pub const GENE_DIHEDRAL: usize = GENE_NOSE_WEIGHT + 1;
pub const GENE_SWEEP: usize = GENE_DIHEDRAL + 1;
pub const GENE_COUNT: usize = GENE_SWEEP + 1;

/// Declared valid range for one gene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneRange {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

impl GeneRange {
    fn new(name: &str, min: f64, max: f64) -> Self {
        Self {
            name: name.to_string(),
            min,
            max,
        }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Per-gene range table for the fixed genome layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneSpec {
    pub ranges: Vec<GeneRange>,
}

impl Default for GeneSpec {
    fn default() -> Self {
        let mut ranges = vec![
            GeneRange::new("wing_span_cm", 8.0, 30.0),
            GeneRange::new("root_chord_cm", 0.0, 15.0),
            GeneRange::new("body_length_cm", 10.0, 30.0),
        ];
        for i in 0..HINGE_COUNT {
            ranges.push(GeneRange::new(&format!("fold_angle_{}_deg", i + 1), 0.0, 80.0));
        }
        ranges.push(GeneRange::new("nose_weight_fraction", 0.0, 0.4));
        ranges.push(GeneRange::new("dihedral_deg", -10.0, 20.0));
        ranges.push(GeneRange::new("sweep_deg", 10.0, 60.0));
        Self { ranges }
    }
}

impl GeneSpec {
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn range(&self, index: usize) -> &GeneRange {
        &self.ranges[index]
    }

    /// Draw a genome with every gene uniform within its declared range.
    pub fn sample_uniform<R: Rng>(&self, rng: &mut R) -> Genome {
        self.ranges
            .iter()
            .map(|r| rng.gen_range(r.min..=r.max))
            .collect()
    }

    /// Clamp every gene into its declared range, in place.
    pub fn clamp(&self, genome: &mut Genome) {
        for (gene, range) in genome.iter_mut().zip(&self.ranges) {
            *gene = range.clamp(*gene);
        }
    }

    pub fn contains(&self, genome: &Genome) -> bool {
        genome.len() == self.ranges.len()
            && genome
                .iter()
                .zip(&self.ranges)
                .all(|(g, r)| *g >= r.min && *g <= r.max)
    }
}

impl ConfigSection for GeneSpec {
    fn section_name() -> &'static str {
        "genes"
    }

    fn validate(&self) -> Result<(), PaperwingError> {
        if self.ranges.len() != GENE_COUNT {
            return Err(PaperwingError::Configuration(format!(
                "Gene table must declare {} ranges, got {}",
                GENE_COUNT,
                self.ranges.len()
            )));
        }
        for range in &self.ranges {
            if !range.min.is_finite() || !range.max.is_finite() || range.min >= range.max {
                return Err(PaperwingError::Configuration(format!(
                    "Invalid range [{}, {}] for gene '{}'",
                    range.min, range.max, range.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn default_table_is_valid() {
        let spec = GeneSpec::default();
        assert!(spec.validate().is_ok());
        assert_eq!(spec.len(), GENE_COUNT);
    }

    #[test]
    fn sampled_genomes_are_in_range() {
        let spec = GeneSpec::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let genome = spec.sample_uniform(&mut rng);
            assert!(spec.contains(&genome));
        }
    }

    #[test]
    fn clamp_pulls_genes_back_into_range() {
        let spec = GeneSpec::default();
        let mut genome: Genome = spec.ranges.iter().map(|r| r.max + 100.0).collect();
        spec.clamp(&mut genome);
        assert!(spec.contains(&genome));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut spec = GeneSpec::default();
        spec.ranges[0].min = spec.ranges[0].max + 1.0;
        assert!(matches!(
            spec.validate(),
            Err(PaperwingError::Configuration(_))
        ));
    }
}
