//! Limelight drives short-lived, composable visual/audio effects ("scenes")
//! overlaid on a live video feed.
//!
//! Everything in the system is one generic tree of [`Node`]s: scenes,
//! visual elements, sounds, and the [`Behavior`]s that mutate them all share
//! a single state machine, timing model and composition protocol, walked
//! once per frame.
//!
//! # Engine overview
//!
//! 1. **Trigger**: an external event `(sceneType, payload)` reaches
//!    [`SceneManager::handle_event`], which reuses an active triggerable
//!    scene or builds a new one through a registered [`SceneFactory`].
//! 2. **Readiness**: `init` fans out through the tree; nodes with external
//!    assets poll the host [`AssetLoader`] until every load settles. A dead
//!    asset degrades its node instead of stalling the tree.
//! 3. **Frame loop**: the host calls [`SceneManager::tick`] once per frame;
//!    behaviors mutate their attachment point's [`Transform`]/audio state,
//!    expired nodes finish, and finished scenes are reaped.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single timeline**: all tree mutation happens synchronously inside a
//!   frame's call stack; there is no parallelism and no preemption.
//! - **No IO in the engine**: pixels, sounds and asset bytes live behind the
//!   host-implemented [`DrawSurface`], [`SoundHandle`] and [`AssetLoader`]
//!   traits.
//! - **Composition over inheritance**: node kinds differ only in which
//!   capability components they carry; effects are defined by attaching
//!   behaviors, never by subclassing.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod behavior;
mod capability;
mod foundation;
mod scene;
mod stage;

pub use animation::ease::{Ease, envelope};
pub use assets::loader::{AssetLoader, AssetPoll, AssetSlot, AssetStatus, NullLoader};
pub use behavior::core::{Behavior, BehaviorCtx, Tick};
pub use behavior::library::{
    Ballistic, BounceMotion, CueAt, FadeInOut, HueRotate, SlideInOut, SlideTo, SoundCue,
};
pub use capability::audio::{AudioBearing, SoundHandle};
pub use capability::render::{DrawCommand, DrawSurface, Renderable};
pub use capability::transform::Transform;
pub use foundation::error::{LimelightError, LimelightResult};
pub use scene::factory::{SceneFactory, SceneSpec, TriggerHandler};
pub use scene::manager::SceneManager;
pub use scene::settings::{Settings, SettingsChange, SettingsDelta};
pub use stage::arena::{NodeId, Stage};
pub use stage::node::{Lifespan, Node, NodeState};
