pub const DRAFT_KEY: &'static str = "pendingFormData";

pub const MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;
pub const MIN_NAME_CHARS: usize = 2;

pub const DEFAULT_MEDIA_BASE: &'static str = "https://api.cloudinary.com";
pub const DEFAULT_CLOUD_NAME: &'static str = "dhnqtrc6g";
pub const DEFAULT_UPLOAD_PRESET: &'static str = "astro-careers";
pub const DEFAULT_TABLE: &'static str = "AstroCareersDataTable";

pub const PAYMENT_QUERY_KEY: &'static str = "payment";
pub const PAYMENT_QUERY_SUCCESS: &'static str = "success";

pub const DEFAULT_PAYMENT_DELAY_MS: u64 = 1500;
