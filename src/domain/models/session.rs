use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

/// The signed-in user, handed explicitly to whatever needs identity, auth or
/// the user's local date.
#[derive(Debug, Clone)]
pub struct UserSession {
    pub user_id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub auth_token: Option<String>,
    pub timezone: Tz,
}

impl UserSession {
    pub fn new(user_id: String, display_name: String, timezone: Tz) -> Self {
        Self {
            user_id,
            display_name,
            email: None,
            phone: None,
            auth_token: None,
            timezone,
        }
    }

    pub fn anonymous(timezone: Tz) -> Self {
        Self::new(String::new(), String::new(), timezone)
    }

    pub fn with_contact(mut self, email: Option<String>, phone: Option<String>) -> Self {
        self.email = email;
        self.phone = phone;
        self
    }

    pub fn with_token(mut self, token: String) -> Self {
        self.auth_token = Some(token);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_token.is_some()
    }

    /// Today's date in the user's timezone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }
}
