//! Per-vehicle views: by ECU, by metric, and free-text filtering.

use std::collections::{BTreeMap, BTreeSet};

use super::OTHER_METRIC;
use crate::signal::ParameterRecord;

/// How parameters are assigned to an ECU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcuGrouping {
    /// By `hdr`.
    Header,
    /// By `eax`, falling back to `hdr` (vehicles using extended addressing).
    ExtendedAddress,
}

fn ecu_of(param: &ParameterRecord, grouping: EcuGrouping) -> String {
    let hdr = || param.hdr.clone().unwrap_or_default();
    match grouping {
        EcuGrouping::Header => hdr(),
        EcuGrouping::ExtendedAddress => param.extended_address().unwrap_or_else(hdr),
    }
}

/// Groups parameters by ECU, sorted by ECU id. Input order is kept inside
/// each group.
#[must_use]
pub fn group_by_ecu(
    params: &[ParameterRecord],
    grouping: EcuGrouping,
) -> Vec<(String, Vec<&ParameterRecord>)> {
    let mut groups: BTreeMap<String, Vec<&ParameterRecord>> = BTreeMap::new();
    for param in params {
        groups.entry(ecu_of(param, grouping)).or_default().push(param);
    }
    groups.into_iter().collect()
}

/// Groups parameters by suggested metric, sorted by name with the
/// [`OTHER_METRIC`] bucket last.
#[must_use]
pub fn group_by_metric(params: &[ParameterRecord]) -> Vec<(String, Vec<&ParameterRecord>)> {
    let mut groups: BTreeMap<String, Vec<&ParameterRecord>> = BTreeMap::new();
    let mut other = Vec::new();
    for param in params {
        match param.metric() {
            Some(metric) if metric != OTHER_METRIC => {
                groups.entry(metric.to_string()).or_default().push(param);
            }
            _ => other.push(param),
        }
    }
    let mut result: Vec<_> = groups.into_iter().collect();
    if !other.is_empty() {
        result.push((OTHER_METRIC.to_string(), other));
    }
    result
}

/// Filters one vehicle's parameters by a case-insensitive query over id,
/// name, command id, header, extended address, unit, metric and description.
#[must_use]
pub fn filter_vehicle_parameters<'a>(
    params: &'a [ParameterRecord],
    query: &str,
) -> Vec<&'a ParameterRecord> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return params.iter().collect();
    }
    let hit = |text: &str| text.to_lowercase().contains(&needle);

    params
        .iter()
        .filter(|p| {
            hit(&p.id)
                || hit(&p.name)
                || (p.cmd.is_some() && hit(&p.command_id()))
                || p.hdr.as_deref().is_some_and(hit)
                || p.extended_address().as_deref().is_some_and(hit)
                || p.unit.as_deref().is_some_and(hit)
                || p.metric().is_some_and(hit)
                || p.extra.get("description").and_then(|d| d.as_str()).is_some_and(hit)
        })
        .collect()
}

/// Distinct ECU ids of a parameter list.
#[must_use]
pub fn ecu_ids(params: &[ParameterRecord], grouping: EcuGrouping) -> BTreeSet<String> {
    params.iter().map(|p| ecu_of(p, grouping)).collect()
}
