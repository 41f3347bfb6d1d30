//! Account-related endpoints: profile editing, privacy and security.

use std::path::Path;

use crate::api::client::IgClient;
use crate::api::request::Request;
use crate::api::transport::Transport;
use crate::error::IgError;
use crate::types::{
    AccountSecurityInfoResponse, BadgeNotificationsResponse, ChangePasswordResponse,
    CheckUsernameResponse, CommentCategoryFilterResponse, CommentFilterKeywordsResponse,
    CommentFilterResponse, CommentFilterSetResponse, DisableTwoFactorSmsResponse,
    EnableTwoFactorSmsResponse, GenericResponse, PresenceStatusResponse,
    SendConfirmEmailResponse, SendSmsCodeResponse, SendTwoFactorEnableSmsResponse,
    TwoFactorLoginSmsResponse, UserInfoResponse, VerifySmsCodeResponse,
};

pub const MAX_BIOGRAPHY_CHARS: usize = 150;

/// Strip every non-digit and prefix `+`: `"+34 (123) 456-789"` becomes `"+34123456789"`.
pub fn normalize_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    format!("+{digits}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male = 1,
    Female = 2,
    Unknown = 3,
}

impl Gender {
    pub fn code(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPointUsage {
    Prefill,
    AutoConfirmation,
}

impl ContactPointUsage {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactPointUsage::Prefill => "prefill",
            ContactPointUsage::AutoConfirmation => "auto_confirmation",
        }
    }
}

/// Every value on the profile. `edit_profile` overwrites all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEdit {
    pub external_url: String,
    pub phone_number: String,
    pub full_name: String,
    pub biography: String,
    pub email: String,
    pub gender: Gender,
    /// Rename the account; check availability with `check_username` first.
    pub new_username: Option<String>,
}

pub struct Account<'c, T: Transport> {
    client: &'c IgClient<T>,
}

impl<'c, T: Transport> Account<'c, T> {
    pub fn new(client: &'c IgClient<T>) -> Self {
        Self { client }
    }

    /// Request carrying `_uuid`, `_uid` and `_csrftoken`.
    fn session_request(&self, path: &str) -> Request<'c, T> {
        let session = self.client.session();
        self.client
            .request(path)
            .add_post("_uuid", &session.uuid)
            .add_post("_uid", &session.user_id)
            .add_post("_csrftoken", &session.csrf_token)
    }

    /// Details about the logged in account.
    pub async fn get_current_user(&self) -> Result<UserInfoResponse, IgError> {
        self.session_request("accounts/current_user/")
            .add_param("edit", true)
            .get_response()
            .await
    }

    /// Replace the biography. Accepts 0 to 150 characters.
    pub async fn set_biography(&self, biography: &str) -> Result<UserInfoResponse, IgError> {
        if biography.chars().count() > MAX_BIOGRAPHY_CHARS {
            return Err(IgError::InvalidArgument(format!(
                "Please provide a 0 to {MAX_BIOGRAPHY_CHARS} character string as biography."
            )));
        }

        self.session_request("accounts/set_biography/")
            .add_post("raw_text", biography)
            .get_response()
            .await
    }

    /// Overwrite the whole profile.
    ///
    /// Fields are not merged with what the server holds; read the current
    /// values with [`Account::get_current_user`] and pass them back for
    /// anything that should stay as it is.
    pub async fn edit_profile(&self, profile: &ProfileEdit) -> Result<UserInfoResponse, IgError> {
        // The server refuses edits unless the profile was opened for editing first.
        self.client
            .request("accounts/current_user/")
            .add_param("edit", true)
            .get_response::<UserInfoResponse>()
            .await?;

        let username = profile
            .new_username
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(self.client.session().username.as_str());

        self.session_request("accounts/edit_profile/")
            .add_post("external_url", &profile.external_url)
            .add_post("phone_number", &profile.phone_number)
            .add_post("username", username)
            .add_post("first_name", &profile.full_name)
            .add_post("biography", &profile.biography)
            .add_post("email", &profile.email)
            .add_post("gender", profile.gender.code())
            .get_response()
            .await
    }

    pub async fn set_name_and_phone(
        &self,
        name: &str,
        phone: &str,
    ) -> Result<GenericResponse, IgError> {
        self.session_request("accounts/set_phone_and_name/")
            .add_post("first_name", name)
            .add_post("phone_number", phone)
            .get_response()
            .await
    }

    pub async fn change_profile_picture(
        &self,
        photo: impl AsRef<Path>,
    ) -> Result<UserInfoResponse, IgError> {
        self.session_request("accounts/change_profile_picture/")
            .add_file("profile_pic", photo.as_ref(), "profile_pic")
            .get_response()
            .await
    }

    pub async fn remove_profile_picture(&self) -> Result<UserInfoResponse, IgError> {
        self.session_request("accounts/remove_profile_picture/")
            .get_response()
            .await
    }

    pub async fn set_public(&self) -> Result<UserInfoResponse, IgError> {
        self.session_request("accounts/set_public/")
            .get_response()
            .await
    }

    pub async fn set_private(&self) -> Result<UserInfoResponse, IgError> {
        self.session_request("accounts/set_private/")
            .get_response()
            .await
    }

    /// Whether `username` is still free to register or rename to.
    pub async fn check_username(&self, username: &str) -> Result<CheckUsernameResponse, IgError> {
        self.session_request("users/check_username/")
            .add_post("username", username)
            .get_response()
            .await
    }

    pub async fn get_comment_filter(&self) -> Result<CommentFilterResponse, IgError> {
        self.client
            .request("accounts/get_comment_filter/")
            .get_response()
            .await
    }

    pub async fn set_comment_filter(
        &self,
        enabled: bool,
    ) -> Result<CommentFilterSetResponse, IgError> {
        self.session_request("accounts/set_comment_filter/")
            .add_post("config_value", u8::from(enabled))
            .get_response()
            .await
    }

    pub async fn get_comment_category_filter_disabled(
        &self,
    ) -> Result<CommentCategoryFilterResponse, IgError> {
        self.client
            .request("accounts/get_comment_category_filter_disabled/")
            .get_response()
            .await
    }

    pub async fn get_comment_filter_keywords(
        &self,
    ) -> Result<CommentFilterKeywordsResponse, IgError> {
        self.client
            .request("accounts/get_comment_filter_keywords/")
            .get_response()
            .await
    }

    /// `keywords` is a comma separated list of blocked words.
    pub async fn set_comment_filter_keywords(
        &self,
        keywords: &str,
    ) -> Result<CommentFilterSetResponse, IgError> {
        self.session_request("accounts/set_comment_filter_keywords/")
            .add_post("keywords", keywords)
            .get_response()
            .await
    }

    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<ChangePasswordResponse, IgError> {
        self.session_request("accounts/change_password/")
            .add_post("old_password", old_password)
            .add_post("new_password1", new_password)
            .add_post("new_password2", new_password)
            .get_response()
            .await
    }

    /// Security overview, including the two-factor backup codes.
    pub async fn get_security_info(&self) -> Result<AccountSecurityInfoResponse, IgError> {
        self.session_request("accounts/account_security_info/")
            .get_response()
            .await
    }

    /// Ask for the SMS carrying the code that `enable_two_factor_sms` needs.
    pub async fn send_two_factor_enable_sms(
        &self,
        phone_number: &str,
    ) -> Result<SendTwoFactorEnableSmsResponse, IgError> {
        self.session_request("accounts/send_two_factor_enable_sms/")
            .add_post("device_id", &self.client.session().device_id)
            .add_post("phone_number", normalize_phone_number(phone_number))
            .get_response()
            .await
    }

    /// Turn on SMS two-factor authentication.
    ///
    /// The reply of the enable call itself is dropped; what comes back is a
    /// fresh [`Account::get_security_info`], which holds the new backup codes.
    pub async fn enable_two_factor_sms(
        &self,
        phone_number: &str,
        verification_code: &str,
    ) -> Result<AccountSecurityInfoResponse, IgError> {
        self.session_request("accounts/enable_sms_two_factor/")
            .add_post("device_id", &self.client.session().device_id)
            .add_post("phone_number", normalize_phone_number(phone_number))
            .add_post("verification_code", verification_code)
            .get_response::<EnableTwoFactorSmsResponse>()
            .await?;

        self.get_security_info().await
    }

    pub async fn disable_two_factor_sms(&self) -> Result<DisableTwoFactorSmsResponse, IgError> {
        self.session_request("accounts/disable_sms_two_factor/")
            .get_response()
            .await
    }

    /// Ask for a new login code when the one sent by the login flow expired.
    pub async fn send_two_factor_login_sms(
        &self,
        username: &str,
        two_factor_identifier: &str,
    ) -> Result<TwoFactorLoginSmsResponse, IgError> {
        let session = self.client.session();
        self.client
            .request("accounts/send_two_factor_login_sms/")
            .add_post("two_factor_identifier", two_factor_identifier)
            .add_post("username", username)
            .add_post("device_id", &session.device_id)
            .add_post("guid", &session.uuid)
            .add_post("_csrftoken", &session.csrf_token)
            .get_response()
            .await
    }

    pub async fn get_presence_status(&self) -> Result<PresenceStatusResponse, IgError> {
        self.client
            .request("accounts/get_presence_disabled/")
            .set_signed_get(true)
            .get_response()
            .await
    }

    /// Let followed accounts and message partners see when you were last active.
    pub async fn enable_presence(&self) -> Result<GenericResponse, IgError> {
        self.set_presence_disabled(false).await
    }

    pub async fn disable_presence(&self) -> Result<GenericResponse, IgError> {
        self.set_presence_disabled(true).await
    }

    async fn set_presence_disabled(&self, disabled: bool) -> Result<GenericResponse, IgError> {
        self.session_request("accounts/set_presence_disabled/")
            .add_post("disabled", u8::from(disabled))
            .get_response()
            .await
    }

    pub async fn send_confirm_email(&self) -> Result<SendConfirmEmailResponse, IgError> {
        self.session_request("accounts/send_confirm_email/")
            .add_post("send_source", "edit_profile")
            .get_response()
            .await
    }

    pub async fn send_sms_code(&self, phone_number: &str) -> Result<SendSmsCodeResponse, IgError> {
        self.session_request("accounts/send_sms_code/")
            .add_post("phone_number", normalize_phone_number(phone_number))
            .get_response()
            .await
    }

    pub async fn verify_sms_code(
        &self,
        phone_number: &str,
        verification_code: &str,
    ) -> Result<VerifySmsCodeResponse, IgError> {
        self.session_request("accounts/verify_sms_code/")
            .add_post("phone_number", normalize_phone_number(phone_number))
            .add_post("verification_code", verification_code)
            .get_response()
            .await
    }

    /// Sent before login, so it carries no session auth.
    pub async fn set_contact_point_prefill(
        &self,
        usage: ContactPointUsage,
    ) -> Result<GenericResponse, IgError> {
        let session = self.client.session();
        self.client
            .request("accounts/contact_point_prefill/")
            .set_needs_auth(false)
            .add_post("phone_id", &session.phone_id)
            .add_post("usage", usage.as_str())
            .add_post("_csrftoken", &session.csrf_token)
            .get_response()
            .await
    }

    /// Badge counts shown in the "switch account" menu.
    pub async fn get_badge_notifications(&self) -> Result<BadgeNotificationsResponse, IgError> {
        let session = self.client.session();
        self.client
            .request("notifications/badge/")
            .add_post("_uuid", &session.uuid)
            .add_post("_csrftoken", &session.csrf_token)
            .add_post("users_ids", &session.user_id)
            .add_post("device_id", &session.device_id)
            .get_response()
            .await
    }
}
