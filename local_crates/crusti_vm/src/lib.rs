mod analysis;
mod fm;
mod io;
mod utils;

pub use analysis::analyze;
pub use analysis::AnalysisSettings;
pub use analysis::ExcludesEdge;
pub use analysis::RequiresEdge;
pub use analysis::StrongGraphAnalysis;

pub use fm::FeatureTable;
pub use fm::VariabilityModel;

pub use io::DimacsReader;
pub use io::FeatureListWriter;
pub use io::PajekWriter;

pub use crusti_backbone::Backbone;
pub use crusti_backbone::BackboneDetector;
pub use crusti_backbone::Clause;
pub use crusti_backbone::CnfFormula;
pub use crusti_backbone::Literal;
pub use crusti_backbone::VarId;
