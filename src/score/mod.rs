pub mod finalize;
pub mod points;
pub mod ranker;
pub mod resolver;
pub mod standings;
pub mod team;

pub use finalize::*;
pub use points::*;
pub use ranker::*;
pub use resolver::*;
pub use standings::*;
pub use team::*;
