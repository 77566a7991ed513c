mod headless;

pub use headless::{run_headless, HeadlessOptions, HeadlessReport};
