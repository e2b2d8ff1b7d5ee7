pub mod error;
pub mod geo;
pub mod track;
pub mod zone;
#[cfg(test)]
mod tests;

pub use error::*;
pub use geo::*;
pub use track::*;
pub use zone::*;
