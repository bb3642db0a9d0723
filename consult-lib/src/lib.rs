pub mod draft;
mod error;
pub mod media;
pub mod record;
mod settings;
pub mod submit;
pub mod validate;

pub type Result<T> = std::result::Result<T, error::Error>;

pub use error::*;
pub use settings::*;
