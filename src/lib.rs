pub mod camera;
pub mod clock;
pub mod config;
pub mod digits;
pub mod error;
pub mod events;
pub mod grid;
pub mod resize;
pub mod rules;
pub mod session;
pub mod step;

pub use error::Error;
pub use error::Result;
pub use grid::Grid;
pub use session::Session;
