use crate::core::similarity::digits_only;
use crate::models::MatchCriteria;
use thiserror::Error;

/// Errors raised while preparing a contact search
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("Invalid criteria: {0}")]
    InvalidCriteria(String),
}

/// Default API name of the secondary email field on Contact
pub const DEFAULT_SECONDARY_EMAIL_FIELD: &str = "Secondary_Email__c";

/// Default number of candidate rows requested per search
pub const DEFAULT_QUERY_LIMIT: u32 = 50;

/// Escape a value for use inside a single-quoted SOQL string literal
pub fn escape_soql(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{0008}' => escaped.push_str("\\b"),
            '\u{000C}' => escaped.push_str("\\f"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// LIKE pattern matching any formatting of the phone's digits
///
/// `(555) 123-4567` becomes `%5%5%5%1%2%3%4%5%6%7%`. None when the value
/// has no digits.
pub fn phone_like_pattern(phone: &str) -> Option<String> {
    let digits = digits_only(phone);
    if digits.is_empty() {
        return None;
    }

    let mut pattern = String::with_capacity(digits.len() * 2 + 1);
    pattern.push('%');
    for digit in digits.chars() {
        pattern.push(digit);
        pattern.push('%');
    }
    Some(pattern)
}

/// Builds the SOQL used to fetch candidate contacts for a submission
///
/// The generated filter is a superset of what the matcher can score: every
/// supplied identifying or address field becomes an OR branch, and a full
/// first + last name pair adds one more branch.
#[derive(Debug, Clone)]
pub struct SearchQueryBuilder {
    contact_object: String,
    secondary_email_field: String,
    limit: u32,
}

impl SearchQueryBuilder {
    pub fn new(contact_object: impl Into<String>, secondary_email_field: impl Into<String>, limit: u32) -> Self {
        Self {
            contact_object: contact_object.into(),
            secondary_email_field: secondary_email_field.into(),
            limit,
        }
    }

    pub fn secondary_email_field(&self) -> &str {
        &self.secondary_email_field
    }

    /// SOQL `WHERE` expression for the criteria
    ///
    /// # Errors
    /// `MatchError::InvalidCriteria` when no searchable field is present.
    pub fn where_clause(&self, criteria: &MatchCriteria) -> Result<String, MatchError> {
        let secondary = &self.secondary_email_field;
        let mut conditions: Vec<String> = Vec::new();

        if let Some(email) = criteria.email() {
            let email = escape_soql(email);
            conditions.push(format!("(Email = '{email}' OR {secondary} = '{email}')"));
        }

        // Scoring compares digits only, so any punctuation may sit between them
        if let Some(pattern) = criteria.phone().and_then(phone_like_pattern) {
            conditions.push(format!("Phone LIKE '{pattern}'"));
        }

        if let Some(secondary_email) = criteria.secondary_email() {
            conditions.push(format!("{secondary} = '{}'", escape_soql(secondary_email)));
        }

        if let Some(city) = criteria.city() {
            conditions.push(format!("MailingCity = '{}'", escape_soql(city)));
        }

        if let Some(state) = criteria.state() {
            conditions.push(format!("MailingState = '{}'", escape_soql(state)));
        }

        if let Some(zip) = criteria.zip() {
            conditions.push(format!("MailingPostalCode = '{}'", escape_soql(zip)));
        }

        if let (Some(first), Some(last)) = (criteria.first_name(), criteria.last_name()) {
            conditions.push(format!(
                "(FirstName = '{}' AND LastName = '{}')",
                escape_soql(first),
                escape_soql(last)
            ));
        }

        if conditions.is_empty() {
            return Err(MatchError::InvalidCriteria(
                "at least one of email, phone, secondaryEmail, city, state, zip or firstName + lastName is required"
                    .to_string(),
            ));
        }

        tracing::debug!("Built contact search with {} conditions", conditions.len());

        Ok(conditions.join(" OR "))
    }

    /// Full SOQL statement selecting every field the matcher reads
    pub fn build_soql(&self, criteria: &MatchCriteria) -> Result<String, MatchError> {
        let where_clause = self.where_clause(criteria)?;

        Ok(format!(
            "SELECT Id, FirstName, LastName, Email, {}, Phone, MailingStreet, MailingCity, MailingState, MailingPostalCode FROM {} WHERE {} LIMIT {}",
            self.secondary_email_field, self.contact_object, where_clause, self.limit
        ))
    }
}

impl Default for SearchQueryBuilder {
    fn default() -> Self {
        Self::new("Contact", DEFAULT_SECONDARY_EMAIL_FIELD, DEFAULT_QUERY_LIMIT)
    }
}

/// SOQL `WHERE` expression using the default Contact field names
pub fn build_search_query(criteria: &MatchCriteria) -> Result<String, MatchError> {
    SearchQueryBuilder::default().where_clause(criteria)
}
