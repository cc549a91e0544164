pub mod audio;
pub mod collision;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod game;
pub mod input;
pub mod kinematics;
pub mod score_store;
pub mod spawn;
pub mod sprites;
pub mod ui;
