mod annotations;
mod form;
mod rules;

pub use annotations::*;
pub use form::*;
pub use rules::*;
