use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned contact identifier
pub type ContactId = i64;

/// A persisted phonebook entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub number: String,
    pub address: Option<String>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} ({})", self.id, self.full_name(), self.number)
    }
}

/// Insert payload: everything but the identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub number: String,
    pub address: Option<String>,
}

impl NewContact {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        number: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            number: number.into(),
            address: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_address_opt(mut self, address: Option<String>) -> Self {
        self.address = address;
        self
    }

    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            number: self.number,
            address: self.address,
        }
    }
}
