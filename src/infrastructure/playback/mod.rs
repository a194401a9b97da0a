//! Sound playback adapters

pub mod rodio_player;

pub use rodio_player::RodioPlayer;
