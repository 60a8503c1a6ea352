mod backbone;
mod core;
mod sat;
mod utils;

pub use crate::core::Backbone;
pub use crate::core::Clause;
pub use crate::core::CnfFormula;
pub use crate::core::Literal;
pub use crate::core::LiteralVec;
pub use crate::core::VarId;

pub use backbone::BackboneComputation;
pub use backbone::BackboneDetector;
pub use backbone::BackboneSolver;

pub use sat::default_sat_solver;
pub use sat::CadicalSatSolver;
pub use sat::ConsistencyCheckResult;
pub use sat::SatSolver;
pub use sat::MAYBE_TIMEOUT_MSG;

pub use utils::MaybeTrivial;
