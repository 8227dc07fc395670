pub const DEFAULT_PORT: u16 = 3001;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Slack allowed on top of the upload ceiling for multipart boundaries and
/// part headers, so a file exactly at the ceiling is not refused by the
/// body limit.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub const DEFAULT_EMAIL_SUBJECT: &str = "Meeting Summary";

pub const WELCOME_TEXT: &str = "Welcome to the Recap meeting notes summarizer API";

/// Value written by `recap init` in place of a real provider key.
pub const API_KEY_PLACEHOLDER: &str = "your_groq_api_key_here";

pub const DOTENV_FILE: &str = ".env";
