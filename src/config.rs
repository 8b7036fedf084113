use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{error::LoadError, retarget::RetargetRequest};

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Settings for a bake run. Every field may be left out of the JSON file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct BakeConfig {
    #[serde(flatten)]
    pub request: RetargetRequest,
    pub workers: usize,
}
impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            request: RetargetRequest::default(),
            workers: default_workers(),
        }
    }
}

impl BakeConfig {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Applies command line overrides on top of whatever was loaded.
    pub fn with_overrides(mut self, hip: Option<String>, root: Option<String>, workers: Option<usize>) -> Self {
        if let Some(hip) = hip {
            self.request.hip_bone_name = hip;
        }
        if let Some(root) = root {
            self.request.root_bone_name = root;
        }
        if let Some(workers) = workers {
            self.workers = workers;
        }
        self
    }
}
