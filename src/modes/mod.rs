pub mod headless;
pub mod simulate;

pub use headless::{HeadlessMode, HeadlessSummary, parse_script};
pub use simulate::SimulateMode;
