pub mod human;
pub mod replay;

pub use human::HumanMode;
pub use replay::{ReplayMode, ReplayReport, parse_moves};
