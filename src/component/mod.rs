//! 功能元件模組

pub mod sprite_generator;

pub use sprite_generator::SpriteGenerator;
