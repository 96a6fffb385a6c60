pub mod config;
pub mod fanout;
pub mod rng;

pub use config::*;
pub use fanout::*;
pub use rng::*;
