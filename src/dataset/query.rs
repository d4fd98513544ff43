//! Filtered lookups over the dataset indexes.

use super::{CommandEntry, Dataset, ParameterEntry};
use crate::signal::VehicleRef;

/// Vehicle list filter.
#[derive(Debug, Clone, Default)]
pub struct VehicleFilter {
    /// Exact make.
    pub make: Option<String>,
    /// Case-insensitive substring of the model.
    pub model: Option<String>,
}

/// Command list filter.
#[derive(Debug, Clone, Default)]
pub struct CommandFilter {
    /// Exact ECU header.
    pub hdr: Option<String>,
    /// Vehicle key (`Make-Model`) that must use the command.
    pub vehicle: Option<String>,
    /// Case-insensitive substring of a parameter id decoded from the command.
    pub parameter: Option<String>,
}

/// Parameter search across all vehicles.
#[derive(Debug, Clone, Default)]
pub struct ParameterSearch {
    /// Case-insensitive substring of the id or name.
    pub query: Option<String>,
    /// Vehicle key that must define the parameter.
    pub vehicle: Option<String>,
    /// Exact suggested metric.
    pub metric: Option<String>,
}

impl Dataset {
    /// Vehicles matching `filter`.
    #[must_use]
    pub fn vehicles(&self, filter: &VehicleFilter) -> Vec<&VehicleRef> {
        let model = filter.model.as_deref().map(str::to_lowercase);
        self.all_vehicles()
            .iter()
            .filter(|v| filter.make.as_deref().is_none_or(|make| v.make == make))
            .filter(|v| model.as_deref().is_none_or(|m| v.model.to_lowercase().contains(m)))
            .collect()
    }

    /// Commands matching `filter`.
    #[must_use]
    pub fn commands(&self, filter: &CommandFilter) -> Vec<&CommandEntry> {
        let parameter = filter.parameter.as_deref().map(str::to_lowercase);
        self.all_commands()
            .iter()
            .filter(|c| filter.hdr.as_deref().is_none_or(|hdr| c.hdr == hdr))
            .filter(|c| filter.vehicle.as_ref().is_none_or(|key| c.vehicles.contains(key)))
            .filter(|c| {
                parameter.as_deref().is_none_or(|needle| {
                    c.parameters.iter().any(|p| p.record.id.to_lowercase().contains(needle))
                })
            })
            .collect()
    }

    /// Parameters matching `search`.
    #[must_use]
    pub fn search_parameters(&self, search: &ParameterSearch) -> Vec<&ParameterEntry> {
        let query = search.query.as_deref().map(str::to_lowercase).filter(|q| !q.is_empty());
        self.all_parameters()
            .iter()
            .filter(|p| {
                query.as_deref().is_none_or(|q| {
                    p.id.to_lowercase().contains(q) || p.name.to_lowercase().contains(q)
                })
            })
            .filter(|p| search.vehicle.as_ref().is_none_or(|key| p.vehicles.contains(key)))
            .filter(|p| {
                search
                    .metric
                    .as_deref()
                    .is_none_or(|metric| p.suggested_metric.as_deref() == Some(metric))
            })
            .collect()
    }
}
