//! Cinescroll Scene
//!
//! Procedural content animated by the scroll pipeline:
//! - **City:** parallax skyline with flickering windows (Act I)
//! - **Web moment:** irregular web with a pulsing core (Act II)
//! - **Skill web:** hoverable skill graph (Act III)
//! - **Finale:** clarity shape and particle shell (Act V)
//! - **Overlay:** per-act copy fed by a mount's act changes
//!
//! Layout is generated once from the story seed with [`LayoutRng`]; per-frame
//! effects draw from a seeded `rand` generator owned by [`SceneGraph`].

pub mod city;
pub mod entity;
pub mod error;
pub mod finale;
pub mod graph;
pub mod overlay;
pub mod pointer;
pub mod rng;
pub mod skill_web;
pub mod web_moment;

pub use city::{Building, BuildingLayer, City, LayerKind, LayerSettings};
pub use entity::{Strand, Transform};
pub use error::SceneError;
pub use finale::Finale;
pub use graph::SceneGraph;
pub use overlay::{five_act_copy, ActCopy, CallToAction, MountedOverlay, Overlay, Placement};
pub use pointer::HoverState;
pub use rng::LayoutRng;
pub use skill_web::{Connection, Skill, SkillNode, SkillWeb};
pub use web_moment::{WebCore, WebMoment, WebShape};
