pub mod decoder;

pub use decoder::{FoldGeometry, GeometryDecoder};
