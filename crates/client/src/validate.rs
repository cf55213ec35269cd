//! Synchronous client-side form validation.
//!
//! These checks run per field before submission and never touch the
//! network; a non-empty [`ValidationErrors`] blocks the request entirely.

use std::collections::BTreeMap;

use tavola_core::Email;

/// Field-keyed validation messages. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    /// No errors recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Message for one field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn require(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.insert(field, message);
        }
    }

    fn insert(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }
}

/// Registration form input, pre-validation.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegistrationForm {
    /// Minimum accepted password length.
    pub const MIN_PASSWORD_LENGTH: usize = 6;

    /// Validate all fields.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        errors.require("name", &self.name, "Name is required");

        if self.email.trim().is_empty() {
            errors.insert("email", "Email is required");
        } else if Email::parse(self.email.trim()).is_err() {
            errors.insert("email", "Email is invalid");
        }

        if self.password.is_empty() {
            errors.insert("password", "Password is required");
        } else if self.password.len() < Self::MIN_PASSWORD_LENGTH {
            errors.insert("password", "Password must be at least 6 characters");
        }

        errors
    }
}

/// Checkout form input, pre-validation.
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub payment: PaymentSelection,
}

/// How the user intends to pay.
#[derive(Debug, Clone)]
pub enum PaymentSelection {
    /// Card details entered in the form.
    Card(CardDetails),
    /// Cash on delivery; nothing further to validate.
    Cash,
}

/// Raw card fields as typed.
#[derive(Debug, Clone, Default)]
pub struct CardDetails {
    pub number: String,
    /// `MM/YY`.
    pub expiry: String,
    pub cvv: String,
    pub holder_name: String,
}

impl CheckoutForm {
    /// Validate all fields, including card details when paying by card.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        errors.require("street", &self.street, "Street address is required");
        errors.require("city", &self.city, "City is required");
        errors.require("state", &self.state, "State is required");
        errors.require("zipCode", &self.zip_code, "ZIP code is required");
        errors.require("contactName", &self.contact_name, "Name is required");

        if self.contact_email.trim().is_empty() {
            errors.insert("contactEmail", "Email is required");
        } else if Email::parse(self.contact_email.trim()).is_err() {
            errors.insert("contactEmail", "Email is invalid");
        }

        errors.require("contactPhone", &self.contact_phone, "Phone number is required");

        if let PaymentSelection::Card(card) = &self.payment {
            card.validate_into(&mut errors);
        }

        errors
    }
}

impl CardDetails {
    fn validate_into(&self, errors: &mut ValidationErrors) {
        let digits: String = self.number.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.is_empty() {
            errors.insert("cardNumber", "Card number is required");
        } else if !(13..=19).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit())
        {
            errors.insert("cardNumber", "Card number is invalid");
        }

        if self.expiry.trim().is_empty() {
            errors.insert("cardExpiry", "Expiry date is required");
        } else if !is_valid_expiry(self.expiry.trim()) {
            errors.insert("cardExpiry", "Expiry date must be MM/YY");
        }

        if self.cvv.trim().is_empty() {
            errors.insert("cardCvv", "CVV is required");
        } else if !(3..=4).contains(&self.cvv.trim().len())
            || !self.cvv.trim().chars().all(|c| c.is_ascii_digit())
        {
            errors.insert("cardCvv", "CVV is invalid");
        }

        if self.holder_name.trim().is_empty() {
            errors.insert("cardName", "Name on card is required");
        }
    }
}

/// `MM/YY` with a month in 01-12.
fn is_valid_expiry(s: &str) -> bool {
    let Some((month, year)) = s.split_once('/') else {
        return false;
    };
    if month.len() != 2 || year.len() != 2 {
        return false;
    }
    let Ok(month) = month.parse::<u8>() else {
        return false;
    };
    (1..=12).contains(&month) && year.chars().all(|c| c.is_ascii_digit())
}
