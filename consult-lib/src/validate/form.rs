use std::fmt;

use crate::media::MediaFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Dob,
    Tob,
    Pob,
    Service,
    Message,
    LeftPalm,
    RightPalm,
}

impl Field {
    pub fn id(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Dob => "dob",
            Field::Tob => "tob",
            Field::Pob => "pob",
            Field::Service => "service",
            Field::Message => "message",
            Field::LeftPalm => "left-palm",
            Field::RightPalm => "right-palm",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Dob => "Date of birth",
            Field::Tob => "Time of birth",
            Field::Pob => "Place of birth",
            Field::Service => "Service",
            Field::Message => "Message",
            Field::LeftPalm => "Left palm image",
            Field::RightPalm => "Right palm image",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A file picker slot. Rejected files are dropped from it.
#[derive(Debug, Clone, Default)]
pub struct FileInput {
    pub file: Option<MediaFile>,
}

impl FileInput {
    pub fn new(file: MediaFile) -> Self {
        Self { file: Some(file) }
    }

    pub fn clear(&mut self) {
        self.file = None;
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConsultationForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub dob: String,
    pub tob: String,
    /// Set through `set_time_unknown`, which also empties `tob`.
    pub tob_unknown: bool,
    pub pob: String,
    pub service: String,
    pub message: String,
    pub left_palm: FileInput,
    pub right_palm: FileInput,
}

impl ConsultationForm {
    /// Checking "time unknown" empties the time field and waives its
    /// requirement; unchecking makes it required again.
    pub fn set_time_unknown(&mut self, unknown: bool) {
        if unknown {
            self.tob.clear();
        }
        self.tob_unknown = unknown;
    }
}
