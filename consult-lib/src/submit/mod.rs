//! Two-phase submission: the form step validates and stages a draft, the
//! payment step turns the draft into a stored record.

use thiserror::Error;

mod form_step;
mod landing;
mod payment_step;
mod state;
mod view;

#[cfg(test)]
mod test_support;

pub use consult_proto::Page;
pub use form_step::*;
pub use landing::*;
pub use payment_step::*;
pub use state::*;
pub use view::*;

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("A submission is already in progress")]
    Busy,
}
