use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Identifying values extracted from a form submission
///
/// Length limits follow the Salesforce Contact field sizes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MatchCriteria {
    #[validate(length(max = 80))]
    #[serde(default)]
    pub first_name: Option<String>,
    #[validate(length(max = 80))]
    #[serde(default)]
    pub last_name: Option<String>,
    #[validate(length(max = 255))]
    #[serde(default)]
    pub email: Option<String>,
    #[validate(length(max = 255))]
    #[serde(default)]
    pub secondary_email: Option<String>,
    #[validate(length(max = 40))]
    #[serde(default)]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    #[serde(default)]
    pub street: Option<String>,
    #[validate(length(max = 40))]
    #[serde(default)]
    pub city: Option<String>,
    #[validate(length(max = 80))]
    #[serde(default)]
    pub state: Option<String>,
    #[validate(length(max = 20))]
    #[serde(default)]
    pub zip: Option<String>,
}

impl MatchCriteria {
    pub fn first_name(&self) -> Option<&str> {
        present(&self.first_name)
    }

    pub fn last_name(&self) -> Option<&str> {
        present(&self.last_name)
    }

    pub fn email(&self) -> Option<&str> {
        present(&self.email)
    }

    pub fn secondary_email(&self) -> Option<&str> {
        present(&self.secondary_email)
    }

    pub fn phone(&self) -> Option<&str> {
        present(&self.phone)
    }

    pub fn street(&self) -> Option<&str> {
        present(&self.street)
    }

    pub fn city(&self) -> Option<&str> {
        present(&self.city)
    }

    pub fn state(&self) -> Option<&str> {
        present(&self.state)
    }

    pub fn zip(&self) -> Option<&str> {
        present(&self.zip)
    }
}

/// Contact record fetched from the CRM
///
/// Field names follow the Salesforce Contact API names, with camelCase
/// accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CandidateContact {
    #[validate(length(min = 1, max = 18))]
    #[serde(rename = "Id", alias = "id")]
    pub id: String,
    #[validate(length(max = 80))]
    #[serde(rename = "FirstName", alias = "firstName", default)]
    pub first_name: Option<String>,
    #[validate(length(max = 80))]
    #[serde(rename = "LastName", alias = "lastName", default)]
    pub last_name: Option<String>,
    #[validate(length(max = 255))]
    #[serde(rename = "Email", alias = "email", default)]
    pub email: Option<String>,
    #[validate(length(max = 255))]
    #[serde(rename = "Secondary_Email__c", alias = "secondaryEmail", default)]
    pub secondary_email: Option<String>,
    #[validate(length(max = 40))]
    #[serde(rename = "Phone", alias = "phone", default)]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    #[serde(rename = "MailingStreet", alias = "mailingStreet", default)]
    pub mailing_street: Option<String>,
    #[validate(length(max = 40))]
    #[serde(rename = "MailingCity", alias = "mailingCity", default)]
    pub mailing_city: Option<String>,
    #[validate(length(max = 80))]
    #[serde(rename = "MailingState", alias = "mailingState", default)]
    pub mailing_state: Option<String>,
    #[validate(length(max = 20))]
    #[serde(rename = "MailingPostalCode", alias = "mailingPostalCode", default)]
    pub mailing_postal_code: Option<String>,
}

impl CandidateContact {
    /// Display name: trimmed first and last name joined by a space, or "Unknown"
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [present(&self.first_name), present(&self.last_name)]
            .into_iter()
            .flatten()
            .collect();

        if parts.is_empty() {
            "Unknown".to_string()
        } else {
            parts.join(" ")
        }
    }
}

/// Field tag recorded when a criterion matches a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchedField {
    Email,
    Phone,
    SecondaryEmail,
    FirstName,
    LastName,
    Street,
    City,
    State,
    Zip,
}

impl MatchedField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchedField::Email => "email",
            MatchedField::Phone => "phone",
            MatchedField::SecondaryEmail => "secondaryEmail",
            MatchedField::FirstName => "firstName",
            MatchedField::LastName => "lastName",
            MatchedField::Street => "street",
            MatchedField::City => "city",
            MatchedField::State => "state",
            MatchedField::Zip => "zip",
        }
    }

    pub fn is_identifying(&self) -> bool {
        matches!(
            self,
            MatchedField::Email | MatchedField::Phone | MatchedField::SecondaryEmail
        )
    }
}

/// Best-match decision for a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub contact_id: String,
    pub contact_name: String,
    pub confidence_score: u8,
    pub matched_fields: Vec<MatchedField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields_to_update: Option<BTreeMap<String, String>>,
}

/// Candidate paired with the fields it matched and its confidence score
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub contact: &'a CandidateContact,
    pub matched_fields: Vec<MatchedField>,
    pub score: u8,
}

/// Per-field weights summed into the confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchWeights {
    pub email: u8,
    pub phone: u8,
    pub secondary_email: u8,
    pub first_name: u8,
    pub last_name: u8,
    pub zip: u8,
    pub city: u8,
    pub state: u8,
    pub street: u8,
}

impl MatchWeights {
    pub fn weight(&self, field: MatchedField) -> u8 {
        match field {
            MatchedField::Email => self.email,
            MatchedField::Phone => self.phone,
            MatchedField::SecondaryEmail => self.secondary_email,
            MatchedField::FirstName => self.first_name,
            MatchedField::LastName => self.last_name,
            MatchedField::Street => self.street,
            MatchedField::City => self.city,
            MatchedField::State => self.state,
            MatchedField::Zip => self.zip,
        }
    }
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            email: 25,
            phone: 25,
            secondary_email: 20,
            first_name: 15,
            last_name: 15,
            zip: 12,
            city: 10,
            state: 8,
            street: 8,
        }
    }
}

/// Trimmed value, or None when absent or blank
#[inline]
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
