pub mod load;
pub mod save;
pub mod types;

pub use save::save_settings;
pub use types::{SETTINGS_FILE, SpriteOptimizer, SpriteSettings};
