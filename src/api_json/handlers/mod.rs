pub mod courses;
pub mod docs;
pub mod selection;
pub mod sessions;

pub use courses::*;
pub use docs::*;
pub use selection::*;
pub use sessions::*;
