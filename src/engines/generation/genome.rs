/// Genome representation for the fold-design search
///
/// A genome is a fixed-length sequence of real-valued genes that
/// deterministically maps to a fold geometry. The layout is fixed by the
/// gene table (`config::genes`): span, chord and body length first, then one
/// fold angle per hinge line, then nose weight, dihedral and sweep.
///
/// # Why use a flat gene vector instead of a shape struct?
///
/// Genetic operators work best on simple, linear structures:
/// - **Crossover**: swapping or blending gene segments is trivial
/// - **Mutation**: perturbing one gene and clamping it is straightforward
/// - **No invalid layouts**: any in-range vector decodes, or is reported as
///   degenerate by the decoder and penalized
///
/// # Conversion
///
/// Use `GeometryDecoder::decode()` to convert Genome -> FoldGeometry
pub type Genome = Vec<f64>;
