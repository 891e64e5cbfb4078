//! JSON persistence for domains and paths.
//!
//! Files are dispatched on their extension; `json` is the only supported format. Domains
//! are written as `{ "id", "vertices", "ingress", "egress" }` with an `"obstacles"` list only
//! when obstacles exist. Paths are written as a `"coord_list"` plus one array per attribute.
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::area::{AreaId, Domain, Obstacle, Region, DOMAIN_ID};
use crate::error::{Error, Result};
use crate::geometry::Polygon;
use crate::path::ConstrainedPath;

#[derive(Serialize, Deserialize)]
struct ObstacleRecord {
    id: AreaId,
    vertices: Vec<DVec2>,
}

#[derive(Serialize, Deserialize)]
struct DomainRecord {
    id: AreaId,
    vertices: Vec<DVec2>,
    ingress: Option<DVec2>,
    egress: Option<DVec2>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    obstacles: Vec<ObstacleRecord>,
}

#[derive(Serialize, Deserialize)]
struct PathRecord {
    coord_list: Vec<DVec2>,
    #[serde(flatten)]
    attributes: BTreeMap<String, Vec<Option<f64>>>,
}

fn check_extension(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    if extension == "json" {
        return Ok(());
    }
    warn!(
        "Unrecognized extension '{}' for {}, supported extension is json.",
        extension,
        path.display()
    );
    Err(Error::UnsupportedFormat {
        extension: extension.to_owned(),
    })
}

impl Domain {
    pub fn to_json_string(&self) -> Result<String> {
        let record = DomainRecord {
            id: DOMAIN_ID,
            vertices: self.vertices().to_vec(),
            ingress: self.ingress_point(),
            egress: self.egress_point(),
            obstacles: self
                .obstacles()
                .map(|o| ObstacleRecord {
                    id: o.id(),
                    vertices: o.vertices().to_vec(),
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&record)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let record: DomainRecord = serde_json::from_str(json)?;
        let mut domain = Domain::new(Polygon::new(record.vertices)?, record.ingress, record.egress);
        for o in record.obstacles {
            domain.add_obstacle(Obstacle::from_vertices(o.id, o.vertices)?)?;
        }
        Ok(domain)
    }

    /// Writes the domain to `path`. Only `.json` files are supported.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        check_extension(path)?;
        fs::write(path, self.to_json_string()?)?;
        info!(
            "Saved domain with {} obstacles to {}.",
            self.num_obstacles(),
            path.display()
        );
        Ok(())
    }

    /// Reads a domain from `path`. Only `.json` files are supported.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        check_extension(path)?;
        let domain = Self::from_json_str(&fs::read_to_string(path)?)?;
        info!(
            "Loaded domain with {} vertices from {}.",
            domain.vertices().len(),
            path.display()
        );
        Ok(domain)
    }
}

impl ConstrainedPath {
    pub fn to_json_string(&self) -> Result<String> {
        let record = PathRecord {
            coord_list: self.coords().to_vec(),
            attributes: self.attributes().clone(),
        };
        Ok(serde_json::to_string_pretty(&record)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let record: PathRecord = serde_json::from_str(json)?;
        let mut path = ConstrainedPath::new(record.coord_list);
        for (name, values) in record.attributes {
            path.set_attribute(name, values)?;
        }
        Ok(path)
    }

    /// Writes the path to `path`. Only `.json` files are supported.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        check_extension(path)?;
        fs::write(path, self.to_json_string()?)?;
        info!("Saved path with {} points to {}.", self.len(), path.display());
        Ok(())
    }

    /// Reads a path from `path`. Only `.json` files are supported.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        check_extension(path)?;
        let loaded = Self::from_json_str(&fs::read_to_string(path)?)?;
        info!("Loaded path with {} points from {}.", loaded.len(), path.display());
        Ok(loaded)
    }
}
