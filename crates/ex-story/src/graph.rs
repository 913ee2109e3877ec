//! Scene storage and structural validation.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{StoryError, StoryResult};
use crate::scene::{Scene, SceneId};

/// A structural problem found by [`SceneGraph::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphDefect {
    /// The entry scene does not exist.
    MissingEntry(SceneId),
    /// A choice or trigger points at a scene that does not exist.
    DanglingTarget {
        /// The scene holding the reference.
        from: SceneId,
        /// The missing scene.
        to: SceneId,
    },
}

impl std::fmt::Display for GraphDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEntry(id) => write!(f, "entry scene {id} does not exist"),
            Self::DanglingTarget { from, to } => {
                write!(f, "scene {from} leads to missing scene {to}")
            }
        }
    }
}

/// Owns every scene of a story, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    scenes: BTreeMap<SceneId, Scene>,
}

impl SceneGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scene. Fails if the id is already taken.
    pub fn add_scene(&mut self, scene: Scene) -> StoryResult<()> {
        if self.scenes.contains_key(&scene.id) {
            tracing::warn!(id = %scene.id, "rejected duplicate scene");
            return Err(StoryError::DuplicateScene(scene.id));
        }
        self.scenes.insert(scene.id, scene);
        Ok(())
    }

    /// Insert a scene, overwriting any existing scene with the same id.
    ///
    /// Returns the scene that was replaced.
    pub fn replace_scene(&mut self, scene: Scene) -> Option<Scene> {
        self.scenes.insert(scene.id, scene)
    }

    /// Look up a scene.
    pub fn get(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.get(&id)
    }

    /// Returns true if the graph holds `id`.
    pub fn contains(&self, id: SceneId) -> bool {
        self.scenes.contains_key(&id)
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Returns true if the graph has no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// All scenes in id order.
    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.values()
    }

    /// Report every missing reference, starting from `entry`.
    pub fn validate(&self, entry: SceneId) -> Vec<GraphDefect> {
        let mut defects = Vec::new();
        if !self.contains(entry) {
            defects.push(GraphDefect::MissingEntry(entry));
        }
        for scene in self.scenes.values() {
            for to in scene.targets() {
                if !self.contains(to) {
                    defects.push(GraphDefect::DanglingTarget { from: scene.id, to });
                }
            }
        }
        defects
    }

    /// Scenes that can be reached from `entry`, entry included.
    pub fn reachable_from(&self, entry: SceneId) -> BTreeSet<SceneId> {
        let mut seen = BTreeSet::new();
        let mut stack = vec![entry];
        while let Some(id) = stack.pop() {
            let Some(scene) = self.scenes.get(&id) else {
                continue;
            };
            if seen.insert(id) {
                stack.extend(scene.targets());
            }
        }
        seen
    }

    /// Scenes no path from `entry` ever visits.
    pub fn unreachable_from(&self, entry: SceneId) -> Vec<SceneId> {
        let reachable = self.reachable_from(entry);
        self.scenes
            .keys()
            .filter(|id| !reachable.contains(id))
            .copied()
            .collect()
    }
}
