use std::fmt;

use consult_proto::{dto::MediaType, MAX_IMAGE_BYTES, MIN_NAME_CHARS};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::{Annotations, ConsultationForm, Field, FileInput};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile email pattern")
});

pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const IMAGE_TOO_LARGE: &str = "Image must be 2 MB or smaller";
pub const NOT_AN_IMAGE: &str = "Please upload an image file";
pub const MISSING_REQUIRED: &str = "Please fill in all required fields.";

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

pub type Check = Result<(), FieldError>;

/// Everything wrong with a submitted form, in the order it was checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationError {
    pub invalid: Vec<FieldError>,
    pub missing: Vec<Field>,
}

impl ValidationError {
    pub fn is_empty(&self) -> bool {
        self.invalid.is_empty() && self.missing.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.invalid.first() {
            Some(error) => f.write_str(&error.message),
            None => f.write_str(MISSING_REQUIRED),
        }
    }
}

impl std::error::Error for ValidationError {}

pub fn validate_name(name: &str) -> Check {
    if name.trim().chars().count() < MIN_NAME_CHARS {
        return Err(FieldError::new(Field::Name, NAME_TOO_SHORT));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Check {
    if !EMAIL_REGEX.is_match(email.trim()) {
        return Err(FieldError::new(Field::Email, INVALID_EMAIL));
    }
    Ok(())
}

/// While typing, an empty field is left alone.
pub fn live_name(name: &str) -> Check {
    if name.trim().is_empty() {
        return Ok(());
    }
    validate_name(name)
}

pub fn live_email(email: &str) -> Check {
    if email.trim().is_empty() {
        return Ok(());
    }
    validate_email(email)
}

/// Returns the empty required fields. The time of birth is only required
/// when it is not marked unknown.
pub fn validate_required(form: &ConsultationForm) -> Result<(), Vec<Field>> {
    let blank = |value: &str| value.trim().is_empty();

    let mut missing = vec![];
    if blank(&form.dob) {
        missing.push(Field::Dob);
    }
    if !form.tob_unknown && blank(&form.tob) {
        missing.push(Field::Tob);
    }
    if blank(&form.pob) {
        missing.push(Field::Pob);
    }
    if blank(&form.service) {
        missing.push(Field::Service);
    }
    if form.left_palm.is_empty() {
        missing.push(Field::LeftPalm);
    }
    if form.right_palm.is_empty() {
        missing.push(Field::RightPalm);
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}

/// Rejects oversized or non-image files and empties the input when it does.
/// An empty input passes; presence is `validate_required`'s job.
pub fn validate_image(field: Field, input: &mut FileInput) -> Check {
    let Some(file) = &input.file else {
        return Ok(());
    };

    let message = if file.size() > MAX_IMAGE_BYTES {
        IMAGE_TOO_LARGE
    } else if file.media_type() != MediaType::Image {
        NOT_AN_IMAGE
    } else {
        return Ok(());
    };

    log::debug!("rejected {} for {}: {}", file.name, field.id(), message);
    input.clear();
    Err(FieldError::new(field, message))
}

/// Runs every check, annotating each field it touches.
pub fn validate_form(
    form: &mut ConsultationForm,
    annotations: &mut Annotations,
) -> Result<(), ValidationError> {
    let mut error = ValidationError::default();
    let checks = [
        (Field::Name, validate_name(&form.name)),
        (Field::Email, validate_email(&form.email)),
        (
            Field::LeftPalm,
            validate_image(Field::LeftPalm, &mut form.left_palm),
        ),
        (
            Field::RightPalm,
            validate_image(Field::RightPalm, &mut form.right_palm),
        ),
    ];
    for (field, check) in checks {
        if !annotations.record(field, &check) {
            if let Err(e) = check {
                error.invalid.push(e);
            }
        }
    }

    if let Err(missing) = validate_required(form) {
        error.missing = missing;
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(error)
    }
}
