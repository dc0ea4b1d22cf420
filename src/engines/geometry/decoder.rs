use crate::config::genes::{
    GENE_BODY_LENGTH, GENE_COUNT, GENE_DIHEDRAL, GENE_FOLD_BASE, GENE_NOSE_WEIGHT,
    GENE_ROOT_CHORD, GENE_SWEEP, GENE_WING_SPAN, HINGE_COUNT,
};
use crate::engines::generation::Genome;
use crate::error::{PaperwingError, Result};
use serde::{Deserialize, Serialize};

/// Folds accumulating past a half turn plus this slack make panels overlap.
const FOLD_OVERLAP_TOLERANCE_DEG: f64 = 5.0;

/// Shapes with less projected area than this (1 cm^2) cannot fly.
const MIN_WING_AREA_M2: f64 = 1e-4;

const CM_PER_M: f64 = 100.0;

/// Physical properties derived from a genome. Read-only; recomputed on demand
/// by [`GeometryDecoder::decode`] and never mutated independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoldGeometry {
    /// Projected (top-down) wing area after folding, m^2.
    pub wing_area: f64,
    /// Projected span, m.
    pub span: f64,
    pub mean_chord: f64,
    pub aspect_ratio: f64,
    pub mass: f64,
    /// Center of mass, metres aft of the nose.
    pub com_offset: f64,
    /// Center of pressure, metres aft of the nose.
    pub cop_offset: f64,
    /// (cop - com) / chord; positive means the restoring moment opposes
    /// angle-of-attack excursions.
    pub static_margin: f64,
    /// Pitch moment of inertia, kg m^2.
    pub pitch_inertia: f64,
    pub dihedral_rad: f64,
}

/// Decodes genomes into fold geometries over a fixed hinge topology.
///
/// Decoding is deterministic and pure. Genes are expected to be within their
/// declared ranges (callers clamp first); shapes that are still physically
/// degenerate are rejected with [`PaperwingError::InvalidGeometry`] so the
/// evaluator can assign a penalty instead of crashing.
#[derive(Debug, Clone)]
pub struct GeometryDecoder {
    /// Sheet density, kg per m^2.
    sheet_density: f64,
}

impl GeometryDecoder {
    pub fn new(paper_density_gsm: f64) -> Self {
        Self {
            sheet_density: paper_density_gsm / 1000.0,
        }
    }

    pub fn decode(&self, genome: &Genome) -> Result<FoldGeometry> {
        if genome.len() != GENE_COUNT {
            return Err(PaperwingError::InvalidGeometry(format!(
                "Genome has {} genes, layout requires {}",
                genome.len(),
                GENE_COUNT
            )));
        }

        let span = genome[GENE_WING_SPAN] / CM_PER_M;
        let root_chord = genome[GENE_ROOT_CHORD] / CM_PER_M;
        let body_length = genome[GENE_BODY_LENGTH] / CM_PER_M;
        let nose_weight = genome[GENE_NOSE_WEIGHT];
        let dihedral_rad = genome[GENE_DIHEDRAL].to_radians();
        let sweep_deg = genome[GENE_SWEEP];

        // Panels hinge root to tip; each fold angle accumulates onto the
        // panels outboard of it, shrinking the projected span.
        let panel_width = span / 2.0 / HINGE_COUNT as f64;
        let mut cumulative_rad = 0.0;
        let mut projected_half_span = 0.0;
        for i in 0..HINGE_COUNT {
            cumulative_rad += genome[GENE_FOLD_BASE + i].to_radians();
            projected_half_span += panel_width * cumulative_rad.cos();
        }

        let overlap_limit = (180.0 + FOLD_OVERLAP_TOLERANCE_DEG).to_radians();
        if cumulative_rad > overlap_limit {
            return Err(PaperwingError::InvalidGeometry(format!(
                "Folds accumulate to {:.1} degrees and self-intersect",
                cumulative_rad.to_degrees()
            )));
        }

        let projected_span = 2.0 * projected_half_span;
        // Sweep tapers the chord towards the tip.
        let mean_chord = root_chord * (1.0 - 0.5 * sweep_deg / 90.0);
        let wing_area = projected_span * mean_chord;
        if wing_area < MIN_WING_AREA_M2 || projected_span <= 0.0 || mean_chord <= 0.0 {
            return Err(PaperwingError::InvalidGeometry(format!(
                "Non-positive wing area ({:.6} m^2)",
                wing_area
            )));
        }

        // Mass comes from the unfolded sheet; folding moves paper, not weight.
        let sheet_area = span * root_chord + 0.5 * body_length * root_chord;
        let mass = self.sheet_density * sheet_area;

        // Folding paper into the nose shifts the center of mass forward;
        // the center of pressure stays near the front third of the chord.
        let com_offset = mean_chord * (0.6 - nose_weight);
        let cop_offset = 0.30 * mean_chord;
        let static_margin = (cop_offset - com_offset) / mean_chord;

        let pitch_inertia = mass * (0.25 * body_length).powi(2);

        Ok(FoldGeometry {
            wing_area,
            span: projected_span,
            mean_chord,
            aspect_ratio: projected_span * projected_span / wing_area,
            mass,
            com_offset,
            cop_offset,
            static_margin,
            pitch_inertia,
            dihedral_rad,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::genes::GeneSpec;

    fn classic_genome() -> Genome {
        let mut genome = vec![0.0; GENE_COUNT];
        genome[GENE_WING_SPAN] = 20.0;
        genome[GENE_ROOT_CHORD] = 10.0;
        genome[GENE_BODY_LENGTH] = 20.0;
        genome[GENE_FOLD_BASE] = 30.0;
        genome[GENE_NOSE_WEIGHT] = 0.2;
        genome[GENE_DIHEDRAL] = 5.0;
        genome[GENE_SWEEP] = 30.0;
        genome
    }

    #[test]
    fn decode_is_deterministic() {
        let decoder = GeometryDecoder::new(80.0);
        let genome = classic_genome();
        let a = decoder.decode(&genome).unwrap();
        let b = decoder.decode(&genome).unwrap();
        assert_eq!(a.wing_area, b.wing_area);
        assert_eq!(a.static_margin, b.static_margin);
        assert_eq!(a.mass, b.mass);
    }

    #[test]
    fn classic_shape_has_sane_properties() {
        let decoder = GeometryDecoder::new(80.0);
        let geometry = decoder.decode(&classic_genome()).unwrap();
        assert!(geometry.wing_area > 0.0);
        assert!(geometry.aspect_ratio > 0.5);
        assert!(geometry.mass > 0.0);
        assert!(geometry.pitch_inertia > 0.0);
    }

    #[test]
    fn zero_chord_is_degenerate() {
        let decoder = GeometryDecoder::new(80.0);
        let mut genome = classic_genome();
        genome[GENE_ROOT_CHORD] = 0.0;
        assert!(matches!(
            decoder.decode(&genome),
            Err(PaperwingError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn overlapping_folds_are_degenerate() {
        let decoder = GeometryDecoder::new(80.0);
        let mut genome = classic_genome();
        for i in 0..HINGE_COUNT {
            genome[GENE_FOLD_BASE + i] = 80.0;
        }
        assert!(matches!(
            decoder.decode(&genome),
            Err(PaperwingError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn nose_weight_improves_static_margin() {
        let decoder = GeometryDecoder::new(80.0);
        let mut tail_heavy = classic_genome();
        tail_heavy[GENE_NOSE_WEIGHT] = 0.0;
        let mut nose_heavy = classic_genome();
        nose_heavy[GENE_NOSE_WEIGHT] = 0.4;

        let a = decoder.decode(&tail_heavy).unwrap();
        let b = decoder.decode(&nose_heavy).unwrap();
        assert!(b.static_margin > a.static_margin);
        assert!(b.com_offset < a.com_offset);
    }

    #[test]
    fn in_range_genomes_decode_or_report_degeneracy() {
        let decoder = GeometryDecoder::new(80.0);
        let spec = GeneSpec::default();
        let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(11);
        for _ in 0..200 {
            let genome = spec.sample_uniform(&mut rng);
            match decoder.decode(&genome) {
                Ok(g) => assert!(g.wing_area.is_finite() && g.mass > 0.0),
                Err(PaperwingError::InvalidGeometry(_)) => {}
                Err(e) => panic!("unexpected error: {}", e),
            }
        }
    }
}
