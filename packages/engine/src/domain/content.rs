use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::particle::{KindId, Particle, KIND_EMPTY};
use crate::domain::point::Point;
use crate::error::{SimError, SimResult};
use crate::systems::behaviors::{Behavior, GravitySpec, HeapSpec, ParticleBehavior};

pub const KIND_SAND: KindId = 1;
pub const KIND_STONE: KindId = 2;
pub const KIND_GRAIN: KindId = 3;

/// Blueprint for spawning particles of one kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleTemplate {
    pub key: String,
    /// ABGR packed, for renderers only.
    #[serde(default)]
    pub color: u32,
    #[serde(default)]
    pub behaviors: Vec<ParticleBehavior>,
}

impl ParticleTemplate {
    pub fn instantiate(&self, kind: KindId) -> SimResult<Particle> {
        Particle::new(kind, self.behaviors.clone())
    }
}

/// Kind id -> template lookup. Id 0 is always "empty" and has no template.
#[derive(Debug, Clone)]
pub struct ContentRegistry {
    templates: Vec<Option<ParticleTemplate>>,
    key_to_id: HashMap<String, KindId>,
}

impl ContentRegistry {
    pub fn from_bundle_json(json: &str) -> SimResult<Self> {
        let bundle: BundleRoot = serde_json::from_str(json)?;
        Self::from_bundle(bundle)
    }

    /// Built-in kinds: falling and piling sand, immovable stone, and grain that only falls.
    pub fn builtin() -> Self {
        let sand = ParticleTemplate {
            key: "base:sand".to_string(),
            color: 0xFF80B2C2,
            behaviors: vec![
                ParticleBehavior::Gravity(GravitySpec::default()),
                ParticleBehavior::Heap(HeapSpec::new(
                    vec![Point::new(1, 1), Point::new(-1, 1)],
                    0.9,
                    Vec::new(),
                )),
            ],
        };
        let stone = ParticleTemplate {
            key: "base:stone".to_string(),
            color: 0xFF808080,
            behaviors: Vec::new(),
        };
        let grain = ParticleTemplate {
            key: "base:grain".to_string(),
            color: 0xFF87B8DE,
            behaviors: vec![ParticleBehavior::Gravity(GravitySpec::default())],
        };

        let mut key_to_id = HashMap::new();
        key_to_id.insert(sand.key.clone(), KIND_SAND);
        key_to_id.insert(stone.key.clone(), KIND_STONE);
        key_to_id.insert(grain.key.clone(), KIND_GRAIN);

        Self {
            templates: vec![None, Some(sand), Some(stone), Some(grain)],
            key_to_id,
        }
    }

    pub fn kind_count(&self) -> usize {
        self.templates.len()
    }

    pub fn is_valid_kind(&self, id: KindId) -> bool {
        self.template(id).is_some()
    }

    pub fn template(&self, id: KindId) -> Option<&ParticleTemplate> {
        self.templates.get(id as usize)?.as_ref()
    }

    pub fn id_by_key(&self, key: &str) -> Option<KindId> {
        self.key_to_id.get(key).copied()
    }

    pub fn color(&self, id: KindId) -> Option<u32> {
        self.template(id).map(|t| t.color)
    }

    /// Build a detached particle of the given kind.
    pub fn spawn(&self, id: KindId) -> SimResult<Particle> {
        self.template(id)
            .ok_or(SimError::UnknownKind(id))?
            .instantiate(id)
    }

    pub fn manifest_json(&self) -> String {
        let kinds: Vec<ManifestKind<'_>> = self
            .templates
            .iter()
            .enumerate()
            .filter_map(|(id, t)| {
                t.as_ref().map(|t| ManifestKind {
                    id: id as KindId,
                    key: &t.key,
                    color: t.color,
                })
            })
            .collect();
        let out = ContentManifest {
            format_version: 1,
            kinds,
        };
        serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
    }

    fn from_bundle(bundle: BundleRoot) -> SimResult<Self> {
        let max_id = bundle.kinds.iter().map(|k| k.id).max().unwrap_or(0);
        if max_id > u8::MAX as u16 {
            return Err(SimError::InvalidConfig(format!(
                "too many kinds for u8 ids: max_id={max_id}"
            )));
        }

        let mut templates: Vec<Option<ParticleTemplate>> = vec![None; max_id as usize + 1];
        let mut key_to_id = HashMap::new();

        for entry in bundle.kinds {
            let id = entry.id as KindId;
            if id == KIND_EMPTY {
                return Err(SimError::InvalidConfig(format!(
                    "kind id 0 is reserved for empty cells ({})",
                    entry.template.key
                )));
            }
            for behavior in &entry.template.behaviors {
                behavior.validate()?;
            }
            let slot = &mut templates[id as usize];
            if slot.is_some() {
                return Err(SimError::InvalidConfig(format!("duplicate kind id: {id}")));
            }
            if key_to_id.insert(entry.template.key.clone(), id).is_some() {
                return Err(SimError::InvalidConfig(format!(
                    "duplicate kind key: {}",
                    entry.template.key
                )));
            }
            *slot = Some(entry.template);
        }

        debug!(kinds = key_to_id.len(), "content registry built");
        Ok(Self { templates, key_to_id })
    }
}

impl Default for ContentRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Deserialize)]
struct BundleRoot {
    kinds: Vec<BundleKind>,
}

#[derive(Deserialize)]
struct BundleKind {
    id: u16,
    #[serde(flatten)]
    template: ParticleTemplate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentManifest<'a> {
    format_version: u32,
    kinds: Vec<ManifestKind<'a>>,
}

#[derive(Serialize)]
struct ManifestKind<'a> {
    id: KindId,
    key: &'a str,
    color: u32,
}
