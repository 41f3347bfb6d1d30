use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::envelope::response;

/// Profile fields returned by the `accounts/*` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub pk: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub gender: Option<i64>,
    #[serde(default)]
    pub is_private: Option<bool>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub has_anonymous_profile_picture: Option<bool>,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
    #[serde(default)]
    pub profile_pic_id: Option<String>,
}

response! {
    pub struct GenericResponse {}
}

response! {
    pub struct UserInfoResponse {
        pub user: Option<User>,
    }
}

response! {
    pub struct CheckUsernameResponse {
        pub username: Option<String>,
        pub available: Option<bool>,
        pub error: Option<String>,
        pub error_type: Option<String>,
    }
}

response! {
    pub struct CommentFilterResponse {
        pub config_value: Option<i64>,
    }
}

response! {
    pub struct CommentFilterSetResponse {}
}

response! {
    pub struct CommentCategoryFilterResponse {
        pub disabled: Option<i64>,
    }
}

response! {
    pub struct CommentFilterKeywordsResponse {
        pub keywords: Option<Value>,
    }
}

response! {
    pub struct ChangePasswordResponse {}
}

response! {
    /// Security overview, including the two-factor backup codes.
    pub struct AccountSecurityInfoResponse {
        pub backup_codes: Option<Vec<String>>,
        pub is_phone_confirmed: Option<bool>,
        pub country_code: Option<i64>,
        pub phone_number: Option<String>,
        pub is_two_factor_enabled: Option<bool>,
        pub national_number: Option<i64>,
    }
}

response! {
    pub struct SendTwoFactorEnableSmsResponse {
        pub phone_verification_settings: Option<Value>,
        pub obfuscated_phone_number: Option<String>,
    }
}

response! {
    pub struct EnableTwoFactorSmsResponse {
        pub backup_codes: Option<Vec<String>>,
    }
}

response! {
    pub struct DisableTwoFactorSmsResponse {}
}

response! {
    pub struct TwoFactorLoginSmsResponse {
        pub two_factor_required: Option<bool>,
        pub two_factor_info: Option<Value>,
    }
}

response! {
    pub struct PresenceStatusResponse {
        pub disabled: Option<bool>,
        pub thread_presence_disabled: Option<bool>,
    }
}

response! {
    pub struct SendConfirmEmailResponse {
        pub title: Option<String>,
        pub is_email_legit: Option<bool>,
        pub body: Option<String>,
    }
}

response! {
    pub struct SendSmsCodeResponse {
        pub phone_number_valid: Option<bool>,
        pub phone_verification_settings: Option<Value>,
    }
}

response! {
    pub struct VerifySmsCodeResponse {
        pub verified: Option<bool>,
        pub phone_number: Option<String>,
    }
}

response! {
    pub struct BadgeNotificationsResponse {
        pub badge_payload: Option<Value>,
    }
}
