pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod group;
pub mod index;
pub mod intersect;
pub mod normalize;
pub mod select;
pub mod series;

pub use diagnostics::{edit_distance, near_matches, KeyNearMatch, NearMatch, NearMatchKind};
pub use engine::{build_catalog, diagnose, reconcile, ReconcileRequest, Reconciliation};
pub use error::ReconError;
pub use group::{choose_canonical, group_records, BrandCatalog, BrandGroup};
pub use index::CountryBrandIndex;
pub use intersect::{intersect, Intersection, IntersectionStatus, MatchMode};
pub use normalize::{compact_key, name_variations, NameMatcher, Normalizer, SpecialCaseTable};
pub use select::{best_record, best_records, coverage, record_key, BrandCoverage};
pub use series::{yearly_series, YearPoint};
