pub mod play;

pub use play::{DEFAULT_FPS, PlayMode};
