//! gearforge: decodes gearBuilder build codes and aggregates loadout stats
//! from the item catalog. The decoder and aggregator are pure and
//! catalog-injected; the server and CLI are thin shells over them.

pub mod build;
pub mod cli;
pub mod data;
pub mod server;
