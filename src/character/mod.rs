//! Character model: shared vitals/leveling plus Player and Enemy variants.

pub mod attributes;
pub mod base;
pub mod derived_stats;
pub mod enemy;
pub mod player;

pub use attributes::*;
pub use base::*;
pub use derived_stats::*;
pub use enemy::*;
pub use player::*;
