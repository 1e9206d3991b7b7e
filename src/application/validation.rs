//! New-contact form validation

use serde::{Deserialize, Serialize};

use crate::application::errors::ValidationError;
use crate::domain::entities::NewContact;

pub const MIN_NUMBER_DIGITS: usize = 8;
pub const MAX_NUMBER_DIGITS: usize = 11;

/// Raw text as typed into the new-contact form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub number: String,
    pub address: String,
}

impl ContactForm {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        number: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            number: number.into(),
            address: address.into(),
        }
    }

    /// Check the form and turn it into an insert payload.
    ///
    /// Fields are trimmed. The first failing check wins, in form order.
    pub fn validate(&self) -> Result<NewContact, ValidationError> {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        let number = self.number.trim();
        let address = self.address.trim();

        if first_name.is_empty() {
            return Err(ValidationError::MissingFirstName);
        }
        if last_name.is_empty() {
            return Err(ValidationError::MissingLastName);
        }
        if number.is_empty() {
            return Err(ValidationError::MissingNumber);
        }
        if !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::NonNumeric);
        }

        let digits = number.len();
        if !(MIN_NUMBER_DIGITS..=MAX_NUMBER_DIGITS).contains(&digits) {
            return Err(ValidationError::BadLength(digits));
        }

        let contact = NewContact::new(first_name, last_name, number);
        Ok(if address.is_empty() {
            contact
        } else {
            contact.with_address(address)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form() {
        let form = ContactForm::new("  John ", "Doe", " 09123456789 ", "Main St");
        let contact = form.validate().unwrap();
        assert_eq!(contact.first_name, "John");
        assert_eq!(contact.number, "09123456789");
        assert_eq!(contact.address.as_deref(), Some("Main St"));
    }

    #[test]
    fn test_empty_address_is_none() {
        let contact = ContactForm::new("Jane", "Roe", "55599990", " ").validate().unwrap();
        assert_eq!(contact.address, None);
    }

    #[test]
    fn test_checks_run_in_form_order() {
        assert_eq!(
            ContactForm::new("", "", "", "").validate(),
            Err(ValidationError::MissingFirstName)
        );
        assert_eq!(
            ContactForm::new("John", " ", "", "").validate(),
            Err(ValidationError::MissingLastName)
        );
        assert_eq!(
            ContactForm::new("John", "Doe", "", "").validate(),
            Err(ValidationError::MissingNumber)
        );
        assert_eq!(
            ContactForm::new("John", "Doe", "555-1234", "").validate(),
            Err(ValidationError::NonNumeric)
        );
    }

    #[test]
    fn test_number_length_bounds() {
        assert_eq!(
            ContactForm::new("John", "Doe", "5551234", "").validate(),
            Err(ValidationError::BadLength(7))
        );
        assert!(ContactForm::new("John", "Doe", "55512345", "").validate().is_ok());
        assert!(ContactForm::new("John", "Doe", "55512345678", "").validate().is_ok());
        assert_eq!(
            ContactForm::new("John", "Doe", "555123456789", "").validate(),
            Err(ValidationError::BadLength(12))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ValidationError::MissingFirstName.to_string(), "Please enter the first name");
        assert_eq!(ValidationError::MissingNumber.to_string(), "Please enter the Number");
        assert_eq!(ValidationError::NonNumeric.to_string(), "Please enter a valid number");
    }
}
