//! Onboarding domain models
//!
//! The onboarding form is the multi-step field set a freshly authenticated
//! user fills in before reaching the dashboard. Only two things gate the
//! transition: a selected role and accepted terms. Identity and document
//! fields are optional, but a phone number that is present must look like one.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::role::Role;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("valid phone regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OnboardingStep {
    #[default]
    Role,
    Identity,
    Documents,
    Terms,
}

impl OnboardingStep {
    pub fn next(self) -> Self {
        match self {
            OnboardingStep::Role => OnboardingStep::Identity,
            OnboardingStep::Identity => OnboardingStep::Documents,
            OnboardingStep::Documents | OnboardingStep::Terms => OnboardingStep::Terms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    NationalId,
    Passport,
    ForeignerId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OnboardingForm {
    pub role: Option<Role>,
    pub legal_name: String,
    pub country: String,
    pub phone: String,
    pub document_type: Option<DocumentType>,
    pub document_number: String,
    pub accepted_terms: bool,
    pub step: OnboardingStep,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OnboardingError {
    #[error("select whether you join as an investor or an entrepreneur")]
    RoleNotSelected,
    #[error("you must accept the terms and conditions to continue")]
    TermsNotAccepted,
    #[error("phone number must contain 7 to 15 digits")]
    InvalidPhone,
}

impl OnboardingForm {
    /// Form prefilled with a role picked on the login screen.
    pub fn with_role(role: Option<Role>) -> Self {
        Self {
            role,
            ..Default::default()
        }
    }

    /// True when the form may move the user to the dashboard.
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    /// First step whose fields are still empty. Accepted terms jump to the
    /// last step since the identity and document fields are optional.
    pub fn reached_step(&self) -> OnboardingStep {
        if self.accepted_terms {
            return OnboardingStep::Terms;
        }
        let mut step = OnboardingStep::Role;
        while step != OnboardingStep::Terms && self.step_filled(step) {
            step = step.next();
        }
        step
    }

    fn step_filled(&self, step: OnboardingStep) -> bool {
        match step {
            OnboardingStep::Role => self.role.is_some(),
            OnboardingStep::Identity => {
                !self.legal_name.trim().is_empty() && !self.country.trim().is_empty()
            }
            OnboardingStep::Documents => {
                self.document_type.is_some() && !self.document_number.trim().is_empty()
            }
            OnboardingStep::Terms => self.accepted_terms,
        }
    }

    pub fn validate(&self) -> Result<Role, OnboardingError> {
        let role = self.role.ok_or(OnboardingError::RoleNotSelected)?;
        if !self.accepted_terms {
            return Err(OnboardingError::TermsNotAccepted);
        }
        let phone: String = self.phone.chars().filter(|c| !c.is_whitespace()).collect();
        if !phone.is_empty() && !PHONE_RE.is_match(&phone) {
            return Err(OnboardingError::InvalidPhone);
        }
        Ok(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_and_terms_are_enough() {
        let form = OnboardingForm {
            role: Some(Role::Investor),
            accepted_terms: true,
            ..Default::default()
        };
        assert!(form.is_complete());
        assert_eq!(form.validate(), Ok(Role::Investor));
    }

    #[test]
    fn terms_are_mandatory() {
        let form = OnboardingForm::with_role(Some(Role::Entrepreneur));
        assert!(!form.is_complete());
        assert_eq!(form.validate(), Err(OnboardingError::TermsNotAccepted));
    }

    #[test]
    fn missing_role_is_reported_first() {
        let form = OnboardingForm {
            accepted_terms: true,
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(OnboardingError::RoleNotSelected));
    }

    #[test]
    fn phone_is_checked_only_when_present() {
        let mut form = OnboardingForm {
            role: Some(Role::Investor),
            accepted_terms: true,
            phone: "+57 300 123 4567".into(),
            ..Default::default()
        };
        assert!(form.validate().is_ok());

        form.phone = "call me".into();
        assert_eq!(form.validate(), Err(OnboardingError::InvalidPhone));
        assert!(!form.is_complete());
    }

    #[test]
    fn reached_step_follows_filled_fields() {
        let mut form = OnboardingForm::default();
        assert_eq!(form.reached_step(), OnboardingStep::Role);

        form.role = Some(Role::Investor);
        assert_eq!(form.reached_step(), OnboardingStep::Identity);

        form.legal_name = "Ana Pérez".into();
        form.country = "CO".into();
        assert_eq!(form.reached_step(), OnboardingStep::Documents);

        form.document_type = Some(DocumentType::Passport);
        form.document_number = "AB123".into();
        assert_eq!(form.reached_step(), OnboardingStep::Terms);
    }

    #[test]
    fn accepted_terms_skip_optional_steps() {
        let form = OnboardingForm {
            role: Some(Role::Entrepreneur),
            accepted_terms: true,
            ..Default::default()
        };
        assert_eq!(form.reached_step(), OnboardingStep::Terms);
    }
}
