//! Account, profile and address types
//!
//! Server-owned records. The client treats them as value objects: an
//! account is replaced wholesale on profile update or session refresh.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::configuration::EnumAuthProvider;
use super::role::EnumRole;

/// Postal address
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Address unique key, assigned by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Uuid>,
    #[serde(default)]
    pub street_name: String,
    #[serde(default)]
    pub street_number: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub floor_apartment: String,
}

/// Address create/update command
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddressCommand {
    pub street_name: String,
    pub street_number: String,
    pub city: String,
    pub region: String,
    pub country: String,
    pub postal_code: String,
    pub floor_apartment: String,
}

/// Activation token command
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivationTokenCommand {
    /// Email address to verify
    pub email: String,
}

/// Fields shared by the profile record and the profile update command
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFields {
    /// Provider description
    #[serde(default)]
    pub additional_info: Option<String>,
    #[serde(default)]
    pub bank_account_currency: Option<String>,
    #[serde(default)]
    pub bank_account_holder_name: Option<String>,
    #[serde(default)]
    pub bank_account_iban: Option<String>,
    #[serde(default)]
    pub bank_account_swift: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub company_type: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_phone_code: Option<String>,
    /// Public provider email address. When browsing catalogue items, only
    /// verified email addresses are returned
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    /// Base64 encoded user image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_mime_type: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Base64 encoded company logo image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_image_mime_type: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub site_url: Option<String>,
    #[serde(default)]
    pub vat: Option<String>,
}

/// Account profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(flatten)]
    pub fields: ProfileFields,
    #[serde(default)]
    pub addresses: Vec<Address>,
    /// True if public email is verified
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub email_verified_at: Option<DateTime<FixedOffset>>,
    /// Date of provider (publisher) registration
    #[serde(default)]
    pub provider_verified_at: Option<DateTime<FixedOffset>>,
    /// Provider rating. `None` if there are no ratings
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub terms_accepted: bool,
    #[serde(default)]
    pub terms_accepted_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub created_on: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub modified_on: Option<DateTime<FixedOffset>>,
}

/// Profile update command
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCommand {
    #[serde(flatten)]
    pub fields: ProfileFields,
    #[serde(default)]
    pub addresses: Vec<Address>,
}

/// Account registration command
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountCommand {
    /// User email. Must be unique
    pub email: String,
    /// Locale. The server defaults to `en`
    pub locale: String,
    pub password: String,
    /// Must match `password`
    pub verify_password: String,
    pub profile: ProfileCommand,
}

impl AccountCommand {
    /// True if both password fields hold the same value
    pub fn passwords_match(&self) -> bool {
        self.password == self.verify_password
    }
}

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub email: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Activation occurs when the user verifies the email address
    #[serde(default)]
    pub activated_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub activation_status: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub email_verified_at: Option<DateTime<FixedOffset>>,
    /// IDP used for account registration
    #[serde(default)]
    pub idp_name: Option<EnumAuthProvider>,
    /// User name as retrieved by the IDP user info endpoint
    #[serde(default)]
    pub idp_user_alias: Option<String>,
    #[serde(default)]
    pub idp_user_image: Option<String>,
    #[serde(default)]
    pub registered_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub profile: Profile,
    /// Always equal to the user email
    pub username: String,
    /// Every authenticated user has at least `ROLE_USER`
    #[serde(default)]
    pub roles: Vec<EnumRole>,
}

fn default_locale() -> String {
    "en".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_deserialization() {
        let json = r#"{
            "email": "user@example.com",
            "locale": "el",
            "activatedAt": "2020-06-10T16:01:04.991+03:00",
            "emailVerified": true,
            "idpName": "Forms",
            "username": "user@example.com",
            "roles": ["ROLE_USER", "ROLE_PROVIDER"],
            "profile": {
                "firstName": "Jane",
                "company": "Acme",
                "addresses": [{"streetName": "Main", "city": "Athens"}],
                "rating": null
            }
        }"#;
        let account: Account = serde_json::from_str(json).unwrap();

        assert_eq!(account.locale, "el");
        assert_eq!(account.roles, vec![EnumRole::User, EnumRole::Provider]);
        assert_eq!(account.idp_name, Some(EnumAuthProvider::Forms));
        assert_eq!(account.profile.fields.first_name.as_deref(), Some("Jane"));
        assert_eq!(account.profile.addresses[0].city, "Athens");
        assert!(account.profile.rating.is_none());
        assert!(account.activated_at.is_some());
    }

    #[test]
    fn test_account_locale_defaults_to_en() {
        let json = r#"{"email":"a@b.c","username":"a@b.c"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.locale, "en");
        assert!(account.roles.is_empty());
    }

    #[test]
    fn test_profile_command_serializes_flat() {
        let command = ProfileCommand {
            fields: ProfileFields {
                first_name: Some("Jane".to_string()),
                ..Default::default()
            },
            addresses: Vec::new(),
        };
        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(value["firstName"], "Jane");
        assert!(value.get("fields").is_none());
        assert!(value.get("image").is_none());
    }

    #[test]
    fn test_passwords_match() {
        let mut command = AccountCommand {
            email: "a@b.c".to_string(),
            locale: "en".to_string(),
            password: "secret".to_string(),
            verify_password: "secret".to_string(),
            profile: ProfileCommand::default(),
        };
        assert!(command.passwords_match());
        command.verify_password = "other".to_string();
        assert!(!command.passwords_match());
    }
}
