pub mod capitec;
pub mod discovery;

pub use capitec::parse_capitec_csv;
pub use discovery::parse_discovery_csv;
