//! CSV loading for recalibrated model data
//!
//! The fitted defaults are compiled in, but a new DCE wave can be supplied
//! as two CSV files without touching the evaluation code: an attribute
//! catalog (dimension,level,utility_coef,wtp_coef,baseline) and a region
//! multiplier table (region,multiplier).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::catalog::{AttributeCatalog, AttributeLevel, Dimension};
use super::regions::RegionalCostAdjuster;
use crate::error::{EngineError, EngineResult};

#[derive(Debug, Deserialize)]
struct CatalogRow {
    dimension: Dimension,
    level: String,
    utility_coef: f64,
    wtp_coef: f64,
    baseline: bool,
}

#[derive(Debug, Deserialize)]
struct RegionRow {
    region: String,
    multiplier: f64,
}

/// Load an attribute catalog from CSV
pub fn load_catalog_from_reader<R: Read>(reader: R) -> EngineResult<AttributeCatalog> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut levels = Vec::new();
    for row in csv_reader.deserialize() {
        let row: CatalogRow =
            row.map_err(|e| EngineError::configuration(format!("catalog csv: {}", e)))?;
        levels.push(AttributeLevel {
            dimension: row.dimension,
            level_key: row.level,
            utility_coef: row.utility_coef,
            wtp_coef: row.wtp_coef,
            baseline: row.baseline,
        });
    }
    AttributeCatalog::new(levels)
}

/// Load an attribute catalog from a CSV file on disk
pub fn load_catalog(path: &Path) -> EngineResult<AttributeCatalog> {
    let file = File::open(path)
        .map_err(|e| EngineError::configuration(format!("open {}: {}", path.display(), e)))?;
    load_catalog_from_reader(file)
}

/// Load a region multiplier table from CSV
pub fn load_regions_from_reader<R: Read>(reader: R) -> EngineResult<RegionalCostAdjuster> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut entries = Vec::new();
    for row in csv_reader.deserialize() {
        let row: RegionRow =
            row.map_err(|e| EngineError::configuration(format!("region csv: {}", e)))?;
        entries.push((row.region, row.multiplier));
    }
    RegionalCostAdjuster::new(entries)
}

/// Load a region multiplier table from a CSV file on disk
pub fn load_regions(path: &Path) -> EngineResult<RegionalCostAdjuster> {
    let file = File::open(path)
        .map_err(|e| EngineError::configuration(format!("open {}: {}", path.display(), e)))?;
    load_regions_from_reader(file)
}
