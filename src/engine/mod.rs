pub mod aggregate;
pub mod grouping;
pub mod lint;
pub mod ranking;

pub use aggregate::Placement;
pub use ranking::TiePolicy;
