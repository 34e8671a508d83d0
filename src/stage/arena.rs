use crate::{
    foundation::error::{LimelightError, LimelightResult},
    stage::node::{Node, NodeState},
};

/// Opaque node identifier: arena index plus generation.
///
/// Ids are plain values, so parent back-references are non-owning by
/// construction: once a node is removed its slot generation is bumped and
/// every stale id held anywhere simply stops resolving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// Sentinel id that never resolves (detached parent link, tree root).
    pub const NIL: NodeId = NodeId {
        index: 0,
        generation: 0,
    };

    /// Whether this is the nil sentinel.
    pub fn is_nil(self) -> bool {
        self.index == 0
    }

    pub(crate) fn from_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub(crate) fn index(self) -> usize {
        self.index as usize
    }
}

#[derive(Debug)]
struct Slot {
    node: Option<Node>,
    generation: u32,
}

/// Generational arena owning every live node of the active-scene forest.
///
/// Index 0 is a reserved nil sentinel so the first real id is never nil.
/// Lifecycle driving (`init`/`play`/`update`/`finish`) lives in
/// [`crate::stage::lifecycle`]; this module is pure storage and tree links.
#[derive(Debug)]
pub struct Stage {
    slots: Vec<Slot>,
    free: Vec<usize>,
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage {
    /// Empty stage.
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                node: None,
                generation: 0,
            }],
            free: Vec::new(),
        }
    }

    /// Insert a detached node and return its id.
    pub fn insert(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free.pop() {
            let generation = self.slots[index].generation;
            self.slots[index].node = Some(node);
            return NodeId::from_parts(index as u32, generation);
        }
        let index = self.slots.len();
        self.slots.push(Slot {
            node: Some(node),
            generation: 0,
        });
        NodeId::from_parts(index as u32, 0)
    }

    /// Resolve an id, `None` for nil, stale or removed ids.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slot(id).and_then(|s| s.node.as_ref())
    }

    /// Mutable variant of [`Stage::get`].
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if self.slot(id).is_none() {
            return None;
        }
        self.slots[id.index()].node.as_mut()
    }

    /// Remove a node's slot, bumping the generation so `id` goes stale.
    ///
    /// This is storage-level removal only; use
    /// [`finish`](Stage::finish) for lifecycle teardown.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        self.slot(id)?;
        let index = id.index();
        self.slots[index].generation = self.slots[index].generation.wrapping_add(1);
        let removed = self.slots[index].node.take();
        if removed.is_some() {
            self.free.push(index);
        }
        removed
    }

    /// Whether `id` still resolves to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    /// Whether the stage holds no live nodes.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.node.is_none())
    }

    /// Attach `node` as the last child of `parent`.
    ///
    /// The child starts detached from the lifecycle (`New`); a parent that
    /// has already passed `init` picks it up during its next update pass.
    pub fn attach(&mut self, parent: NodeId, node: Node) -> LimelightResult<NodeId> {
        let parent_state = self
            .get(parent)
            .map(|p| p.state())
            .ok_or_else(|| LimelightError::stage("attach: parent does not resolve"))?;
        if parent_state == NodeState::Finished {
            return Err(LimelightError::stage("attach: parent is finished"));
        }
        let id = self.insert(node);
        if let Some(n) = self.get_mut(id) {
            n.parent = parent;
        }
        if let Some(p) = self.get_mut(parent) {
            p.children.push(id);
        }
        Ok(id)
    }

    /// Nearest node, starting at `id` and walking parent links, that
    /// composes a Transform. Behaviors use this to find their attachment
    /// point's spatial state without caring about the concrete node kind.
    pub fn transform_anchor(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = id;
        while let Some(node) = self.get(cur) {
            if node.transform.is_some() {
                return Some(cur);
            }
            cur = node.parent;
        }
        None
    }

    /// Nearest node, starting at `id` and walking parent links, that
    /// composes an audio capability.
    pub fn audio_anchor(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = id;
        while let Some(node) = self.get(cur) {
            if node.audio.is_some() {
                return Some(cur);
            }
            cur = node.parent;
        }
        None
    }

    fn slot(&self, id: NodeId) -> Option<&Slot> {
        if id.is_nil() || id.index() >= self.slots.len() {
            return None;
        }
        let slot = &self.slots[id.index()];
        if slot.generation != id.generation {
            return None;
        }
        Some(slot)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/arena.rs"]
mod tests;
