//! User profile types
//!
//! Profile preferences are optional on the wire; a user who has never saved
//! anything reads back a default profile synthesized from their identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::Violation;

const THEMES: &[&str] = &["light", "dark", "system"];

/// A stored user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub preferred_currency: String,
    pub timezone: String,
    pub preferred_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_settings: Option<Value>,
    pub theme_preference: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Default profile for a user that has never saved preferences.
    pub fn defaults_for(id: Uuid, email: &str) -> Self {
        let now = Utc::now();
        Self {
            id,
            email: email.to_string(),
            full_name: None,
            preferred_currency: "USD".to_string(),
            timezone: "UTC".to_string(),
            preferred_language: "en".to_string(),
            notification_settings: None,
            theme_preference: "system".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a validated update, bumping `updated_at`.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(full_name) = update.full_name {
            self.full_name = Some(full_name);
        }
        if let Some(preferred_currency) = update.preferred_currency {
            self.preferred_currency = preferred_currency;
        }
        if let Some(timezone) = update.timezone {
            self.timezone = timezone;
        }
        if let Some(preferred_language) = update.preferred_language {
            self.preferred_language = preferred_language;
        }
        if let Some(notification_settings) = update.notification_settings {
            self.notification_settings = Some(notification_settings);
        }
        if let Some(theme_preference) = update.theme_preference {
            self.theme_preference = theme_preference;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial profile update for PUT requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub preferred_currency: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub preferred_language: Option<String>,
    #[serde(default)]
    pub notification_settings: Option<Value>,
    #[serde(default)]
    pub theme_preference: Option<String>,
}

impl ProfileUpdate {
    /// Validate whichever fields are present.
    pub fn validate(&self) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();

        if let Some(ref currency) = self.preferred_currency {
            if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
                violations.push(Violation::new(
                    "preferred_currency",
                    "Preferred currency must be a 3-letter code",
                ));
            }
        }
        if let Some(ref theme) = self.theme_preference {
            if !THEMES.contains(&theme.as_str()) {
                violations.push(Violation::new(
                    "theme_preference",
                    "Theme must be 'light', 'dark', or 'system'",
                ));
            }
        }
        if let Some(ref settings) = self.notification_settings {
            if !settings.is_object() {
                violations.push(Violation::new(
                    "notification_settings",
                    "Notification settings must be an object",
                ));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Body of an account-deletion request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteAccountRequest {
    #[serde(default)]
    pub confirm: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let id = Uuid::new_v4();
        let profile = UserProfile::defaults_for(id, "user@example.com");
        assert_eq!(profile.id, id);
        assert_eq!(profile.preferred_currency, "USD");
        assert_eq!(profile.theme_preference, "system");
        assert!(profile.full_name.is_none());
    }

    #[test]
    fn test_apply_update() {
        let mut profile = UserProfile::defaults_for(Uuid::new_v4(), "user@example.com");
        profile.apply(ProfileUpdate {
            preferred_currency: Some("EUR".to_string()),
            theme_preference: Some("dark".to_string()),
            ..ProfileUpdate::default()
        });
        assert_eq!(profile.preferred_currency, "EUR");
        assert_eq!(profile.theme_preference, "dark");
        // Untouched fields keep their defaults
        assert_eq!(profile.timezone, "UTC");
    }

    #[test]
    fn test_update_validation() {
        let update = ProfileUpdate {
            preferred_currency: Some("EURO".to_string()),
            theme_preference: Some("solarized".to_string()),
            notification_settings: Some(json!("yes")),
            ..ProfileUpdate::default()
        };
        let violations = update.validate().unwrap_err();
        let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
        assert_eq!(
            fields,
            vec!["preferred_currency", "theme_preference", "notification_settings"]
        );
    }

    #[test]
    fn test_valid_update() {
        let update = ProfileUpdate {
            preferred_currency: Some("GBP".to_string()),
            theme_preference: Some("light".to_string()),
            notification_settings: Some(json!({"budget_alerts": true})),
            ..ProfileUpdate::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_delete_request_defaults_to_unconfirmed() {
        let request: DeleteAccountRequest = serde_json::from_str("{}").unwrap();
        assert!(!request.confirm);
    }
}
