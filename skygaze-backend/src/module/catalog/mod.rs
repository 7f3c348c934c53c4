///! Body catalog
///!
///! Two position sources feed the engine: a fixed star catalog whose
///! coordinates never change on human timescales, and a date-ranged table of
///! interpolated planet positions bundled with the binary.

// ============ Catalog Types ============
mod types;
pub use types::{CatalogEntry, PositionSource, StarCatalog};

// ============ Planet Position Table ============
mod position_table;
pub use position_table::{PositionTable, TableError, interpolate_right_ascension};
