//! Static unit and structure capability table.
//!
//! Loaded once (builtin JSON or a caller-supplied file) and never mutated by
//! the simulation. Lookups that miss fall back to a conservative descriptor
//! instead of failing the tick.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::{ActorKind, Category, MunitionKind, TargetFilter};

pub const BUILTIN_UNIT_CATALOG: &str = include_str!("data/units.json");

/// Capability descriptor for one actor kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub kind: ActorKind,
    pub category: Category,
    #[serde(default)]
    pub cost: u32,
    #[serde(default)]
    pub build_cooldown_ticks: u64,
    /// Maximum live actors of this kind per side.
    #[serde(default)]
    pub stock_cap: u32,
    pub max_health: f64,
    #[serde(default)]
    pub damage: f64,
    #[serde(default)]
    pub range: f64,
    /// Ticks between shots (rate of fire).
    #[serde(default)]
    pub fire_interval_ticks: u32,
    /// Movement speed (units per tick).
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub munition: Option<MunitionKind>,
    #[serde(default)]
    pub targets: TargetFilter,
    /// Sharply reduces incoming direct-fire and flak hit chance.
    #[serde(default)]
    pub evasive: bool,
    /// Never takes damage.
    #[serde(default)]
    pub invulnerable: bool,
    /// Counts as a fortification for the opponent's counter logic.
    #[serde(default)]
    pub fortified: bool,
    /// Drones a carrier can hold.
    #[serde(default)]
    pub drone_capacity: u32,
}

impl UnitSpec {
    /// Weak, unarmed stand-in used when a kind has no table entry.
    pub fn fallback(kind: ActorKind) -> Self {
        let category = if kind.is_structure() {
            Category::Structure
        } else if kind.is_drone() {
            Category::Drone
        } else {
            Category::Infantry
        };
        Self {
            kind,
            category,
            cost: 100,
            build_cooldown_ticks: 300,
            stock_cap: 1,
            max_health: 50.0,
            damage: 0.0,
            range: 0.0,
            fire_interval_ticks: 0,
            speed: 0.5,
            munition: None,
            targets: TargetFilter::Ground,
            evasive: false,
            invulnerable: false,
            fortified: false,
            drone_capacity: 0,
        }
    }

    /// Whether this kind carries a weapon it can fire.
    pub fn is_armed(&self) -> bool {
        self.munition.is_some() && self.damage > 0.0 && self.range > 0.0
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    version: u32,
    units: Vec<UnitSpec>,
}

/// The capability table keyed by actor kind.
#[derive(Debug, Clone, Default)]
pub struct UnitCatalog {
    version: u32,
    specs: HashMap<ActorKind, UnitSpec>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse unit catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read unit catalog from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid catalog entry for {kind:?}: {reason}")]
    Invalid { kind: ActorKind, reason: String },
}

impl UnitCatalog {
    /// The table shipped with the crate. An unparseable builtin is logged and
    /// yields an empty catalog, so every lookup takes the fallback path.
    pub fn builtin() -> Self {
        match Self::from_json_str(BUILTIN_UNIT_CATALOG) {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::error!(%err, "builtin unit catalog failed to load");
                Self::default()
            }
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        let mut specs = HashMap::with_capacity(file.units.len());
        for spec in file.units {
            validate(&spec)?;
            if !seen.insert(spec.kind) {
                return Err(CatalogError::Invalid {
                    kind: spec.kind,
                    reason: "duplicate entry".to_string(),
                });
            }
            specs.insert(spec.kind, spec);
        }
        Ok(Self {
            version: file.version,
            specs,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn spec(&self, kind: ActorKind) -> Option<&UnitSpec> {
        self.specs.get(&kind)
    }

    /// Look up `kind`, logging and substituting `UnitSpec::fallback` on a miss.
    pub fn spec_or_fallback(&self, kind: ActorKind) -> UnitSpec {
        match self.specs.get(&kind) {
            Some(spec) => spec.clone(),
            None => {
                tracing::warn!(?kind, "no catalog entry, using fallback descriptor");
                UnitSpec::fallback(kind)
            }
        }
    }
}

fn validate(spec: &UnitSpec) -> Result<(), CatalogError> {
    let invalid = |reason: &str| CatalogError::Invalid {
        kind: spec.kind,
        reason: reason.to_string(),
    };
    let non_negative = |v: f64| v.is_finite() && v >= 0.0;
    if !non_negative(spec.max_health) || spec.max_health == 0.0 {
        return Err(invalid("max_health must be positive"));
    }
    if !non_negative(spec.damage) || !non_negative(spec.range) || !non_negative(spec.speed) {
        return Err(invalid("damage, range and speed must be non-negative"));
    }
    if spec.drone_capacity > 0 && spec.kind != ActorKind::DroneCarrier {
        return Err(invalid("only carriers hold drones"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_kind() {
        let catalog = UnitCatalog::builtin();
        assert_eq!(catalog.len(), 15);
        let carrier = catalog.spec(ActorKind::DroneCarrier).unwrap();
        assert_eq!(carrier.drone_capacity, 4);
        assert!(catalog.spec(ActorKind::Gunship).unwrap().evasive);
        assert!(catalog.spec(ActorKind::Bunker).unwrap().fortified);
    }

    #[test]
    fn missing_kind_falls_back() {
        let catalog = UnitCatalog::from_json_str(r#"{ "version": 2, "units": [] }"#).unwrap();
        assert_eq!(catalog.version(), 2);
        let spec = catalog.spec_or_fallback(ActorKind::Tank);
        assert_eq!(spec, UnitSpec::fallback(ActorKind::Tank));
        assert!(!spec.is_armed());
    }

    #[test]
    fn rejects_duplicates_and_bad_entries() {
        let dup = r#"{ "units": [
            { "kind": "tank", "category": "armor", "max_health": 10 },
            { "kind": "tank", "category": "armor", "max_health": 12 }
        ] }"#;
        assert!(matches!(
            UnitCatalog::from_json_str(dup),
            Err(CatalogError::Invalid { kind: ActorKind::Tank, .. })
        ));

        let zero_health = r#"{ "units": [ { "kind": "rifleman", "category": "infantry", "max_health": 0 } ] }"#;
        assert!(UnitCatalog::from_json_str(zero_health).is_err());

        let bad_capacity = r#"{ "units": [
            { "kind": "tank", "category": "armor", "max_health": 10, "drone_capacity": 2 }
        ] }"#;
        assert!(UnitCatalog::from_json_str(bad_capacity).is_err());

        assert!(matches!(
            UnitCatalog::from_json_str("not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = UnitCatalog::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("here.json"));
    }
}
