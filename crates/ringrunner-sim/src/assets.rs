//! Model loading.
//!
//! Each model moves Pending → Loaded or Pending → Failed exactly once, before
//! the frame loop starts. A failed model is logged and never retried; the
//! entities that need it are simply not spawned.

use std::collections::BTreeMap;
use std::path::PathBuf;

use ringrunner_core::enums::ModelId;

/// File name of a model inside its directory.
pub const SCENE_FILE: &str = "scene.gltf";

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("model {model:?} not found at {}", .path.display())]
    Missing { model: ModelId, path: PathBuf },

    #[error("IO error loading {model:?}: {source}")]
    Io {
        model: ModelId,
        #[source]
        source: std::io::Error,
    },
}

/// A successfully loaded model. The simulation only needs to know it exists;
/// geometry stays with the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    pub id: ModelId,
    /// Source file, if the model came from disk.
    pub path: Option<PathBuf>,
    pub bytes: u64,
}

/// Where models come from.
pub trait AssetSource {
    fn load(&self, model: ModelId) -> Result<ModelInfo, AssetError>;
}

/// Built-in placeholder models. Always loads.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinAssets;

impl AssetSource for BuiltinAssets {
    fn load(&self, model: ModelId) -> Result<ModelInfo, AssetError> {
        Ok(ModelInfo {
            id: model,
            path: None,
            bytes: 0,
        })
    }
}

/// Models on disk, laid out as `<root>/<model dir>/scene.gltf`.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn model_path(&self, model: ModelId) -> PathBuf {
        self.root.join(model.dir_name()).join(SCENE_FILE)
    }
}

impl AssetSource for DirectoryAssets {
    fn load(&self, model: ModelId) -> Result<ModelInfo, AssetError> {
        let path = self.model_path(model);
        let meta = match std::fs::metadata(&path) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AssetError::Missing { model, path });
            }
            Err(source) => return Err(AssetError::Io { model, source }),
        };
        if !meta.is_file() {
            return Err(AssetError::Missing { model, path });
        }
        Ok(ModelInfo {
            id: model,
            bytes: meta.len(),
            path: Some(path),
        })
    }
}

/// Load status of one model.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetState {
    Pending,
    Loaded(ModelInfo),
    Failed(String),
}

/// Load status of every model the game uses.
#[derive(Debug, Clone)]
pub struct AssetManifest {
    entries: BTreeMap<ModelId, AssetState>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            entries: ModelId::ALL
                .iter()
                .map(|&id| (id, AssetState::Pending))
                .collect(),
        }
    }
}

impl AssetManifest {
    /// Load every model from `source`.
    pub fn resolve(source: &dyn AssetSource) -> Self {
        let mut manifest = Self::default();
        manifest.load_pending(source);
        manifest
    }

    /// A manifest with every model loaded from the built-in set.
    pub fn builtin() -> Self {
        Self::resolve(&BuiltinAssets)
    }

    /// Load all models still pending. Already settled entries are not retried.
    pub fn load_pending(&mut self, source: &dyn AssetSource) {
        for (id, state) in self.entries.iter_mut() {
            if *state != AssetState::Pending {
                continue;
            }
            *state = match source.load(*id) {
                Ok(info) => {
                    log::info!("Loaded model {:?} ({} bytes)", id, info.bytes);
                    AssetState::Loaded(info)
                }
                Err(e) => {
                    log::error!("An error occurred while loading the model: {e}");
                    AssetState::Failed(e.to_string())
                }
            };
        }
    }

    pub fn state(&self, model: ModelId) -> &AssetState {
        static PENDING: AssetState = AssetState::Pending;
        self.entries.get(&model).unwrap_or(&PENDING)
    }

    pub fn is_loaded(&self, model: ModelId) -> bool {
        matches!(self.state(model), AssetState::Loaded(_))
    }

    /// True once no entry is pending.
    pub fn is_settled(&self) -> bool {
        self.entries.values().all(|s| *s != AssetState::Pending)
    }

    /// Mark a model as failed. Used by tools and tests to disable a feature.
    pub fn mark_failed(&mut self, model: ModelId, reason: impl Into<String>) {
        self.entries.insert(model, AssetState::Failed(reason.into()));
    }
}
