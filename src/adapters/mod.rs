// Adapters layer: concrete fact sources and storage backends behind the domain ports.

pub mod csv_source;
pub mod memory;
pub mod storage;
