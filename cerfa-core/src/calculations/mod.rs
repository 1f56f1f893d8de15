pub mod surfaces;

pub use surfaces::surface_totals;
