pub mod course;
pub mod entry;
pub mod points;
pub mod score;
pub mod team;
pub mod tour;

pub use course::*;
pub use entry::*;
pub use points::*;
pub use score::*;
pub use team::*;
pub use tour::*;
