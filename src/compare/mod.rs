//! Vehicle comparison: align parameters across vehicles by signature, then
//! filter and sort the aligned set for display.

mod align;
mod filter;
mod session;

pub use align::{align, Alignment, CanonicalParameter, SignatureCollision};
pub use filter::{common_only, matches_query, sort_by_coverage, ParameterFilter};
pub use session::{
    format_vehicle_list, parse_vehicle_list, prepare_records, select_vehicles, ComparisonSession,
    MIN_VEHICLES,
};
