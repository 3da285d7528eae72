//! User-facing text in the two languages the farm apps ship with.
//!
//! The language is chosen per request from the `Accept-Language` header; any
//! tag starting with `ur` selects Urdu and everything else falls back to English.
use actix_web::{dev, http::header::ACCEPT_LANGUAGE, Error, FromRequest, HttpRequest};
use futures::future::{ok, Ready};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Urdu,
}

impl Language {
    pub fn from_header(value: &str) -> Self {
        let preferred = value
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if preferred.starts_with("ur") {
            Language::Urdu
        } else {
            Language::English
        }
    }
}

impl FromRequest for Language {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut dev::Payload) -> Self::Future {
        let language = req
            .headers()
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(Language::from_header)
            .unwrap_or_default();

        ok(language)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    AccountCreated,
    AlreadyIrrigated { crop: String, soil: String },
    CropAdded(String),
    CropDeleted(i32),
    CropNotFound(i32),
    CropNotOwned(i32),
    CropUpdated(i32),
    CropsAdded(usize),
    CycleInProgress,
    InvalidCredentials,
    LoggedOut,
    LoginRequired,
    MoistureOutOfRange { min: i32, max: i32 },
    NoCropsForExport,
    NoCropsInBulkInput,
    PasswordNumeric,
    PasswordTooLong,
    PasswordTooShort,
    UsernameEmpty,
    UsernameNotAlphanumeric,
    UsernameTaken,
    YieldNotFinite,
}

impl Message {
    /// Maps a validator error code back to its message, for codes this crate defines.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "password_numeric" => Some(Message::PasswordNumeric),
            "password_too_long" => Some(Message::PasswordTooLong),
            "password_too_short" => Some(Message::PasswordTooShort),
            "username_empty" => Some(Message::UsernameEmpty),
            "username_not_alphanumeric" => Some(Message::UsernameNotAlphanumeric),
            "yield_not_finite" => Some(Message::YieldNotFinite),
            _ => None,
        }
    }

    pub fn text(&self, language: Language) -> String {
        match language {
            Language::English => self.english(),
            Language::Urdu => self.urdu(),
        }
    }

    fn english(&self) -> String {
        match self {
            Message::AccountCreated => "Account created successfully! Ready to login.".into(),
            Message::AlreadyIrrigated { crop, soil } => format!(
                "{} on {} soil was already irrigated this session. Reset it to irrigate again.",
                crop, soil
            ),
            Message::CropAdded(name) => format!("Crop '{}' added successfully", name),
            Message::CropDeleted(id) => format!("Crop with ID {} deleted successfully", id),
            Message::CropNotFound(id) => format!("Crop with ID {} does not exist", id),
            Message::CropNotOwned(id) => {
                format!("Crop with ID {} belongs to another farmer", id)
            }
            Message::CropUpdated(id) => {
                format!("Crop with ID {} has been successfully updated.", id)
            }
            Message::CropsAdded(count) => format!("{} crops added successfully", count),
            Message::CycleInProgress => {
                "An irrigation cycle is already running. Stop it before starting another.".into()
            }
            Message::InvalidCredentials => "Invalid username or password".into(),
            Message::LoggedOut => "Logged out.".into(),
            Message::LoginRequired => "Login required".into(),
            Message::MoistureOutOfRange { min, max } => format!(
                "Moisture level is outside the safe range for this crop and soil. Use range {}-{}.",
                min, max
            ),
            Message::NoCropsForExport => "No data available for export".into(),
            Message::NoCropsInBulkInput => {
                "No crops found. Use one crop per line: name, season, yield".into()
            }
            Message::PasswordNumeric => "Password cannot be entirely numeric".into(),
            Message::PasswordTooLong => "Password must be at most 72 characters".into(),
            Message::PasswordTooShort => "Password must be at least 6 characters".into(),
            Message::UsernameEmpty => "Username cannot be empty".into(),
            Message::UsernameNotAlphanumeric => {
                "Username must only contain letters and numbers".into()
            }
            Message::UsernameTaken => "Username already exists".into(),
            Message::YieldNotFinite => "Yield must be a number".into(),
        }
    }

    fn urdu(&self) -> String {
        match self {
            Message::AccountCreated => "کھاتہ کامیابی سے بن گیا ہے! لاگ ان کرنے کے لیے تیار ہے۔".into(),
            Message::AlreadyIrrigated { crop, soil } => format!(
                "{} ({} مٹی) کی آبپاشی اس سیشن میں ہو چکی ہے۔ دوبارہ آبپاشی کے لیے ری سیٹ کریں۔",
                crop, soil
            ),
            Message::CropAdded(name) => format!("فصل '{}' کامیابی سے شامل کر دی گئی", name),
            Message::CropDeleted(id) => format!("فصل شناخت {} کامیابی سے حذف ہو گئی", id),
            Message::CropNotFound(id) => format!("فصل شناخت {} کے ساتھ موجود نہیں ہے", id),
            Message::CropNotOwned(id) => format!("فصل شناخت {} کسی اور کسان کی ہے", id),
            Message::CropUpdated(id) => {
                format!("شناخت {} والی فصل کو کامیابی کے ساتھ تازہ کر دیا گیا۔", id)
            }
            Message::CropsAdded(count) => format!("{} فصلیں کامیابی سے شامل کر دی گئیں", count),
            Message::CycleInProgress => "آبپاشی پہلے سے جاری ہے۔ نئی شروع کرنے سے پہلے اسے روکیں۔".into(),
            Message::InvalidCredentials => "غلط صارف نام یا پاس ورڈ".into(),
            Message::LoggedOut => "لاگ آؤٹ ہو گئے۔".into(),
            Message::LoginRequired => "لاگ ان کرنے کی ضرورت ہے".into(),
            Message::MoistureOutOfRange { min, max } => {
                format!("نمی کی سطح محفوظ حد سے باہر ہے۔ {} سے {} کے درمیان رکھیں۔", min, max)
            }
            Message::NoCropsForExport => "برآمد کے لیے کوئی ڈیٹا دستیاب نہیں".into(),
            Message::NoCropsInBulkInput => {
                "کوئی فصل نہیں ملی۔ ہر سطر میں ایک فصل لکھیں: نام، موسم، پیداوار".into()
            }
            Message::PasswordNumeric => "پاس ورڈ صرف نمبرز پر مشتمل نہیں ہو سکتا".into(),
            Message::PasswordTooLong => "پاس ورڈ زیادہ سے زیادہ 72 حروف کا ہو سکتا ہے".into(),
            Message::PasswordTooShort => "پاس ورڈ کم از کم 6 حروف کا ہونا چاہیے".into(),
            Message::UsernameEmpty => "صارف کا نام خالی نہیں ہو سکتا".into(),
            Message::UsernameNotAlphanumeric => {
                "صارف کا نام صرف حروف اور نمبرز پر مشتمل ہونا چاہیے".into()
            }
            Message::UsernameTaken => "صارف کا نام پہلے سے موجود ہے".into(),
            Message::YieldNotFinite => "پیداوار ایک عدد ہونی چاہیے".into(),
        }
    }
}

/// Column headers for crop tables and exports.
pub fn crop_headers(language: Language) -> [&'static str; 4] {
    match language {
        Language::English => ["ID", "Name", "Season", "Yield (kg/acre)"],
        Language::Urdu => ["شناخت", "نام", "موسم", "پیداوار (کلوگرام/ایکڑ)"],
    }
}
