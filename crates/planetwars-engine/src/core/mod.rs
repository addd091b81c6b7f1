//! Snapshot value types shared by the engine and the agents.
//!
//! - [`Player`] - Owner of a planet or transporter
//! - [`Planet`] / [`Transporter`] - Board contents
//! - [`Action`] - What an agent submits for a tick
//! - [`Observation`] - A snapshot in which some ship counts are hidden

pub use self::{action::*, observation::*, planet::*, player::*};

mod action;
mod observation;
mod planet;
mod player;
