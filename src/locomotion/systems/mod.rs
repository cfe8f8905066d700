//! Locomotion domain: system modules for the character update.

pub(crate) mod input;
pub(crate) mod motor;
pub(crate) mod slide;
pub(crate) mod update;

pub(crate) use input::read_input;
pub(crate) use update::run_locomotion;
