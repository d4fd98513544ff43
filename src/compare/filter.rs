//! Search, common-only filtering and coverage sort over aligned parameters.

use std::cmp::Ordering;

use super::align::CanonicalParameter;

/// Filter settings for the comparison view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterFilter {
    /// Case-insensitive substring matched against ids and names.
    pub query: Option<String>,
    /// Keep only parameters every vehicle has.
    pub common_only: bool,
}

impl ParameterFilter {
    /// Applies the text filter, then the common-only filter, then the
    /// default sort.
    #[must_use]
    pub fn apply<'a>(&self, params: &'a [CanonicalParameter]) -> Vec<&'a CanonicalParameter> {
        let query = self.query.as_deref().map(str::to_lowercase).filter(|q| !q.is_empty());

        let mut kept: Vec<&CanonicalParameter> = params
            .iter()
            .filter(|p| query.as_deref().is_none_or(|q| matches_query(p, q)))
            .filter(|p| !self.common_only || p.is_common())
            .collect();

        sort_by_coverage(&mut kept);
        kept
    }
}

/// Returns `true` if the lower-cased `query` appears in the representative
/// id or name, or in the id or name of any vehicle's record.
#[must_use]
pub fn matches_query(param: &CanonicalParameter, query: &str) -> bool {
    let hit = |text: &str| text.to_lowercase().contains(query);
    if hit(&param.id) || hit(&param.name) {
        return true;
    }
    param.vehicles.iter().flatten().any(|p| hit(&p.id) || hit(&p.name))
}

/// Keeps only parameters present on every vehicle.
#[must_use]
pub fn common_only<'a>(params: &[&'a CanonicalParameter]) -> Vec<&'a CanonicalParameter> {
    params.iter().copied().filter(|p| p.is_common()).collect()
}

/// Most-shared first, then by name.
pub fn sort_by_coverage(params: &mut [&CanonicalParameter]) {
    params.sort_by(|a, b| {
        b.present_count().cmp(&a.present_count()).then_with(|| compare_names(&a.name, &b.name))
    });
}

/// Case-insensitive name order with a case-sensitive tiebreak, close to a
/// locale collation for the ASCII names found in signal sets.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}
