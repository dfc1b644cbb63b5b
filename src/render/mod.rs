pub mod frame;
pub mod renderer;
pub mod scan;

pub use frame::Frame;
pub use renderer::Renderer;
pub use scan::MatrixScanner;
