/// Poll result for one requested asset key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetPoll {
    /// Still loading.
    Pending,
    /// Loaded and drawable/playable.
    Ready,
    /// Load failed (404, decode error). The owning node degrades to a
    /// no-op instead of stalling its tree.
    Failed,
}

/// Host-implemented asset boundary.
///
/// The engine never decodes media and never owns a cache: it requests a
/// logical key during `init` and polls until the key settles. Cache
/// eviction is entirely the host's business.
pub trait AssetLoader {
    /// Begin loading `key`. Requesting an already-loading or settled key is
    /// a no-op.
    fn request(&mut self, key: &str);
    /// Current status of `key`. Unrequested keys report `Pending`.
    fn poll(&self, key: &str) -> AssetPoll;
}

/// Loader for asset-less hosts and tests: every key is instantly ready.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullLoader;

impl AssetLoader for NullLoader {
    fn request(&mut self, _key: &str) {}

    fn poll(&self, _key: &str) -> AssetPoll {
        AssetPoll::Ready
    }
}

/// Settled outcome of a node's asset request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetStatus {
    /// `init` has not run yet.
    Unrequested,
    /// Requested, not settled.
    Pending,
    /// Ready to draw/play.
    Ready,
    /// Dead asset; draw/play hooks are no-ops.
    Failed,
}

/// Per-node asset slot: the key plus its settled status.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetSlot {
    /// Logical asset key resolved by the host loader.
    pub key: String,
    /// Load status, advanced by the lifecycle poll.
    pub status: AssetStatus,
}

impl AssetSlot {
    /// Unrequested slot for `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            status: AssetStatus::Unrequested,
        }
    }

    /// Whether the slot has stopped loading (ready or failed).
    pub fn settled(&self) -> bool {
        matches!(self.status, AssetStatus::Ready | AssetStatus::Failed)
    }

    /// Whether the asset is usable for draw/play.
    pub fn usable(&self) -> bool {
        self.status == AssetStatus::Ready
    }
}
