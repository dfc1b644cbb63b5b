pub mod handler;
pub mod sampler;

pub use handler::{InputHandler, KeyAction};
pub use sampler::{ButtonLevels, ButtonPad, PRIORITY, resolve_direction};
