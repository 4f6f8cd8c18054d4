//! Hosted user-profile row.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::onboarding::{DocumentType, OnboardingForm};
use crate::role::Role;
use crate::session::{Session, UserId};

/// Row of the hosted `users` table, keyed by the provider user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
}

impl UserProfile {
    pub fn from_onboarding(
        session: &Session,
        role: Role,
        form: &OnboardingForm,
        wallet_address: Option<Address>,
    ) -> Self {
        Self {
            id: session.user_id.clone(),
            role,
            wallet_address,
            email: session.email.clone(),
            legal_name: non_empty(&form.legal_name),
            country: non_empty(&form.country),
            phone: non_empty(&form.phone),
            document_type: form.document_type,
            document_number: non_empty(&form.document_number),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_form_fields_are_omitted_from_the_row() {
        let session = Session::new(UserId::from("u-1"));
        let form = OnboardingForm {
            legal_name: "  Ana Gómez ".into(),
            ..Default::default()
        };

        let profile = UserProfile::from_onboarding(&session, Role::Investor, &form, None);
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "id": "u-1", "role": "investor", "legal_name": "Ana Gómez" })
        );
    }
}
