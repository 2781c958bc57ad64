use crate::models::{DisasterRecord, NgoRecord, ResourceKind};
use std::collections::HashMap;

/// Aggregated NGO support for one region. `total_volunteers` is tracked
/// separately from any `Volunteers_Available` pledge total and is the
/// authoritative volunteer count downstream.
#[derive(Debug, Clone)]
pub struct RegionSupport {
    pub supporting_ngos: Vec<String>,
    pub totals: HashMap<ResourceKind, u64>,
    pub total_volunteers: u64,
}

impl RegionSupport {
    /// A resource kind nobody pledged is a valid 0-pledge state, not an error.
    pub fn available(&self, kind: ResourceKind) -> u64 {
        self.totals.get(&kind).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortfallRow {
    pub resource: ResourceKind,
    pub required: u64,
    pub available: u64,
    pub shortage: u64,
}

/// Sum the pledges of every NGO supporting `region`, in the order the NGOs
/// appear in the input. Unknown resource keys were rejected at load time and
/// are skipped here.
pub fn aggregate(region: &str, ngos: &[NgoRecord]) -> RegionSupport {
    let mut supporting_ngos = Vec::new();
    let mut totals: HashMap<ResourceKind, u64> = HashMap::new();
    let mut total_volunteers: u64 = 0;

    for ngo in ngos {
        if !ngo.supports(region) {
            continue;
        }
        supporting_ngos.push(ngo.name.clone());
        for (key, amount) in &ngo.resources {
            if let Some(kind) = ResourceKind::from_key(key) {
                *totals.entry(kind).or_insert(0) += amount;
            }
        }
        total_volunteers += ngo.volunteers_available;
    }

    RegionSupport {
        supporting_ngos,
        totals,
        total_volunteers,
    }
}

/// Compute the shortage table for one disaster: six rows in the fixed
/// requirement-table order. For `Volunteers_Available` the available figure is
/// always the aggregator's volunteer count, never the raw pledge total.
pub fn estimate(disaster: &DisasterRecord, support: &RegionSupport) -> Vec<ShortfallRow> {
    let people = disaster.people_affected;
    let days = disaster.duration_days;

    ResourceKind::ALL
        .into_iter()
        .map(|resource| {
            let required = resource.required(people, days);
            let available = if resource == ResourceKind::Volunteers {
                support.total_volunteers
            } else {
                support.available(resource)
            };
            ShortfallRow {
                resource,
                required,
                available,
                shortage: required.saturating_sub(available),
            }
        })
        .collect()
}
