mod draft_dto;
mod insert_dto;
mod media_dto;
mod record_dto;

pub use draft_dto::*;
pub use insert_dto::*;
pub use media_dto::*;
pub use record_dto::*;
