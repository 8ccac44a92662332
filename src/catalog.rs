//! Built-in indicator catalog: the seed metric list and the default chart
//! thresholds of the composite indices.

use crate::core::{Category, CompositeKind, Metric, MetricSet, Result, Thresholds};

/// Stable metric identifiers
pub mod ids {
    pub const WATER_USE_EFFICIENCY: &str = "eua";
    pub const RENEWABLE_ENERGY: &str = "per";
    pub const WASTE_RECYCLING: &str = "irr";
    pub const CARBON_EMISSIONS: &str = "iic";
    pub const SOIL_HEALTH: &str = "ics";
    pub const AGROCHEMICAL_REDUCTION: &str = "ira";
    pub const LOCAL_FOOD_ACCESS: &str = "iaal";
    pub const COMMUNITY_PARTICIPATION: &str = "ipca";
    pub const FOOD_SAFETY: &str = "isac";
    pub const SMART_TECH_INVESTMENT: &str = "iitsf";
    pub const MONITORING_EFFICIENCY: &str = "esm";
    /// Not a measured metric yet; only appears as a fixed formula term
    pub const DATA_ANALYSIS_EFFICIENCY: &str = "ead";
}

struct Seed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    unit: &'static str,
    category: Category,
    value: f64,
    thresholds: Thresholds,
}

fn seeds() -> Vec<Seed> {
    use Category::*;

    vec![
        Seed {
            id: ids::WATER_USE_EFFICIENCY,
            name: "Water use efficiency",
            description: "Litres of water used per kilogram of produce.",
            unit: "l/kg",
            category: Environmental,
            value: 2.8,
            thresholds: Thresholds::lower_is_better(2.0, 3.0, 4.0),
        },
        Seed {
            id: ids::RENEWABLE_ENERGY,
            name: "Renewable energy share",
            description: "Share of consumed energy that comes from renewable sources.",
            unit: "%",
            category: Environmental,
            value: 85.0,
            thresholds: Thresholds::higher_is_better(95.0, 80.0, 60.0),
        },
        Seed {
            id: ids::WASTE_RECYCLING,
            name: "Waste recycling and recovery",
            description: "Share of generated waste that is recycled or recovered.",
            unit: "%",
            category: Environmental,
            value: 92.0,
            thresholds: Thresholds::higher_is_better(95.0, 85.0, 70.0),
        },
        Seed {
            id: ids::CARBON_EMISSIONS,
            name: "Carbon emissions",
            description: "CO2-equivalent emitted per kilogram of produce.",
            unit: "kgCO2eq/kg",
            category: Environmental,
            value: 0.8,
            thresholds: Thresholds::lower_is_better(0.5, 1.0, 1.5),
        },
        Seed {
            id: ids::SOIL_HEALTH,
            name: "Soil and substrate health",
            description: "Share of soil or substrate parameters inside their optimal range.",
            unit: "%",
            category: Environmental,
            value: 90.0,
            thresholds: Thresholds::higher_is_better(95.0, 85.0, 75.0),
        },
        Seed {
            id: ids::AGROCHEMICAL_REDUCTION,
            name: "Pesticide and fertilizer reduction",
            description: "Reduction in agrochemical use against a conventional baseline.",
            unit: "%",
            category: Environmental,
            value: 85.0,
            thresholds: Thresholds::higher_is_better(80.0, 60.0, 40.0),
        },
        Seed {
            id: ids::LOCAL_FOOD_ACCESS,
            name: "Local food access",
            description: "Coverage of the 50 target households within a 5 km radius.",
            unit: "% (50 households)",
            category: Social,
            value: 75.0,
            thresholds: Thresholds::higher_is_better(80.0, 60.0, 40.0),
        },
        Seed {
            id: ids::COMMUNITY_PARTICIPATION,
            name: "Community participation",
            description: "Occupancy of community activities against a capacity of 20 people.",
            unit: "% occupancy",
            category: Social,
            value: 80.0,
            thresholds: Thresholds::higher_is_better(90.0, 70.0, 50.0),
        },
        Seed {
            id: ids::FOOD_SAFETY,
            name: "Food safety compliance",
            description: "Share of produced lots that meet food safety standards.",
            unit: "% compliance",
            category: Social,
            value: 98.0,
            thresholds: Thresholds::percentage(100.0, 95.0, 90.0),
        },
        Seed {
            id: ids::SMART_TECH_INVESTMENT,
            name: "Smart farming investment",
            description: "Share of the annual operating budget invested in smart farming.",
            unit: "% yearly",
            category: Technological,
            value: 18.0,
            thresholds: Thresholds::higher_is_better(20.0, 15.0, 10.0),
        },
        Seed {
            id: ids::MONITORING_EFFICIENCY,
            name: "Monitoring system efficiency",
            description: "Uptime and accuracy of the monitoring system.",
            unit: "% uptime",
            category: Technological,
            value: 99.5,
            thresholds: Thresholds::higher_is_better(99.0, 95.0, 90.0),
        },
    ]
}

/// The initial metric list with current values and no history.
pub fn seed_metrics() -> Vec<Metric> {
    seeds()
        .into_iter()
        .map(|seed| Metric {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            unit: seed.unit.to_string(),
            category: seed.category,
            current_value: Some(seed.value),
            history: Vec::new(),
            thresholds: seed.thresholds,
        })
        .collect()
}

pub fn seed_metric_set() -> Result<MetricSet> {
    MetricSet::new(seed_metrics())
}

/// How a built-in metric is measured
pub fn measurement_formula(id: &str) -> Option<&'static str> {
    let formula = match id {
        ids::WATER_USE_EFFICIENCY => "EUA = total water used (l) / total produce (kg)",
        ids::RENEWABLE_ENERGY => "PER = renewable energy (kWh) / total energy consumed (kWh) * 100",
        ids::WASTE_RECYCLING => "IRR = recycled or recovered waste (kg) / total waste (kg) * 100",
        ids::CARBON_EMISSIONS => "IIC = total CO2eq emissions (kg) / total produce (kg)",
        ids::SOIL_HEALTH => "ICS = parameters in optimal range / parameters measured * 100",
        ids::AGROCHEMICAL_REDUCTION => {
            "IRA = (baseline use - current use) / baseline use * 100"
        }
        ids::LOCAL_FOOD_ACCESS => "IAAL = households served within 5 km / 50 * 100",
        ids::COMMUNITY_PARTICIPATION => "IPCA = activity attendance / (20 * activities) * 100",
        ids::FOOD_SAFETY => "ISAC = compliant lots / total lots * 100",
        ids::SMART_TECH_INVESTMENT => {
            "IITSF = smart farming investment / annual operating budget * 100"
        }
        ids::MONITORING_EFFICIENCY => "ESM = monitoring uptime (h) / scheduled time (h) * 100",
        _ => return None,
    };
    Some(formula)
}

/// Default chart thresholds of a composite index
pub fn default_composite_thresholds(kind: CompositeKind) -> Thresholds {
    match kind {
        CompositeKind::Environmental => Thresholds::higher_is_better(0.9, 0.75, 0.6),
        CompositeKind::Social | CompositeKind::Technological => {
            Thresholds::higher_is_better(0.85, 0.7, 0.5)
        }
        CompositeKind::Global => Thresholds::higher_is_better(0.80, 0.65, 0.50),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Interpretation;

    #[test]
    fn test_seed_set_is_valid() {
        let set = seed_metric_set().unwrap();
        assert_eq!(set.len(), 11);
        assert_eq!(
            set.get(ids::FOOD_SAFETY).unwrap().interpretation(),
            Interpretation::Percentage
        );
        assert!(set.iter().all(|m| m.history.is_empty()));
    }

    #[test]
    fn test_composite_thresholds_are_higher_is_better() {
        for kind in CompositeKind::ALL {
            assert_eq!(
                default_composite_thresholds(kind).interpretation(),
                Interpretation::HigherIsBetter
            );
        }
    }
}
