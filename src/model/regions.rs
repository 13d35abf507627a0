//! Cost-of-living adjustment by Australian state and territory
//!
//! Base per-session costs are quoted at the reference region (QLD = 1.00);
//! other regions scale the base cost by a fixed multiplier. Region-blind
//! costing is an explicit caller choice, never a fallback for an unknown
//! code.

use crate::error::{EngineError, EngineResult};

/// Fixed table of regional cost multipliers
#[derive(Debug, Clone)]
pub struct RegionalCostAdjuster {
    multipliers: Vec<(String, f64)>,
}

impl RegionalCostAdjuster {
    /// Build from an explicit (region, multiplier) list
    pub fn new(multipliers: Vec<(String, f64)>) -> EngineResult<Self> {
        for (region, mult) in &multipliers {
            if !mult.is_finite() || *mult < 1.0 {
                return Err(EngineError::configuration(format!(
                    "region '{}' multiplier {} must be finite and >= 1.0",
                    region, mult
                )));
            }
        }
        Ok(Self { multipliers })
    }

    /// Default Australian table (reference region QLD)
    pub fn default_australia() -> Self {
        let table = [
            ("NSW", 1.10),
            ("VIC", 1.05),
            ("QLD", 1.00),
            ("WA", 1.08),
            ("SA", 1.02),
            ("TAS", 1.03),
            ("ACT", 1.15),
            ("NT", 1.07),
        ];
        let entries = table.iter().map(|(r, m)| (r.to_string(), *m)).collect();
        Self::new(entries).expect("fitted default region table satisfies invariants")
    }

    /// Multiplier for a region code
    pub fn multiplier(&self, region: &str) -> EngineResult<f64> {
        self.multipliers
            .iter()
            .find(|(r, _)| r == region)
            .map(|(_, m)| *m)
            .ok_or_else(|| EngineError::UnknownRegion {
                region: region.to_string(),
            })
    }

    /// Scale a base cost by the region's multiplier
    pub fn adjust(&self, base_cost: f64, region: &str) -> EngineResult<f64> {
        Ok(base_cost * self.multiplier(region)?)
    }

    /// All (region, multiplier) entries in table order
    pub fn entries(&self) -> &[(String, f64)] {
        &self.multipliers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_region_is_identity() {
        let adjuster = RegionalCostAdjuster::default_australia();
        assert_eq!(adjuster.adjust(40.0, "QLD").unwrap(), 40.0);
    }

    #[test]
    fn test_adjustment_scales_cost() {
        let adjuster = RegionalCostAdjuster::default_australia();
        assert!((adjuster.adjust(40.0, "NSW").unwrap() - 44.0).abs() < 1e-12);
        assert!((adjuster.adjust(100.0, "ACT").unwrap() - 115.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_region_is_error() {
        let adjuster = RegionalCostAdjuster::default_australia();
        let err = adjuster.adjust(40.0, "NZ").unwrap_err();
        assert!(matches!(err, EngineError::UnknownRegion { .. }));
    }

    #[test]
    fn test_default_table_passes_validation() {
        let entries = RegionalCostAdjuster::default_australia().entries().to_vec();
        assert!(RegionalCostAdjuster::new(entries).is_ok());
    }

    #[test]
    fn test_sub_unit_multiplier_rejected() {
        let table = vec![("XX".to_string(), 0.90)];
        assert!(RegionalCostAdjuster::new(table).is_err());
    }
}
