//! Table view of contacts, as shown by the phonebook window

use serde::{Deserialize, Serialize};

use crate::application::errors::StoreError;
use crate::domain::entities::{Contact, ContactId};

/// One table row, keyed the way the window labels its columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRow {
    #[serde(rename = "First Name")]
    pub first_name: String,
    #[serde(rename = "Last Name")]
    pub last_name: String,
    #[serde(rename = "Number")]
    pub number: String,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "Id")]
    pub id: String,
}

impl From<Contact> for ContactRow {
    fn from(contact: Contact) -> Self {
        Self {
            first_name: contact.first_name,
            last_name: contact.last_name,
            number: contact.number,
            address: contact.address,
            id: contact.id.to_string(),
        }
    }
}

impl ContactRow {
    /// Prompt shown before deleting this row
    pub fn delete_confirmation(&self) -> String {
        [
            "Are you sure that you want to delete the selected contact?".to_string(),
            String::new(),
            format!("first name: {}", self.first_name),
            format!("last name: {}", self.last_name),
            format!("number: {}", self.number),
            format!("address: {}", self.address.as_deref().unwrap_or("")),
        ]
        .join("\n")
    }
}

const HEADERS: [&str; 5] = ["Id", "First Name", "Last Name", "Number", "Address"];
const MIN_WIDTHS: [usize; 5] = [4, 10, 10, 10, 20];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    rows: Vec<ContactRow>,
}

impl TableView {
    /// Drain a contact sequence into a view
    pub fn collect<I>(contacts: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = Result<Contact, StoreError>>,
    {
        let rows = contacts
            .into_iter()
            .map(|c| c.map(ContactRow::from))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row currently showing contact `id`
    pub fn select(&self, id: ContactId) -> Option<&ContactRow> {
        let id = id.to_string();
        self.rows.iter().find(|r| r.id == id)
    }

    /// Drop a row after it was deleted from the store
    pub fn remove(&mut self, id: ContactId) -> Option<ContactRow> {
        let id = id.to_string();
        let pos = self.rows.iter().position(|r| r.id == id)?;
        Some(self.rows.remove(pos))
    }

    pub fn push(&mut self, contact: Contact) {
        self.rows.push(contact.into());
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.rows)
    }

    pub fn render(&self) -> String {
        let cells: Vec<[&str; 5]> = self
            .rows
            .iter()
            .map(|r| {
                [
                    r.id.as_str(),
                    r.first_name.as_str(),
                    r.last_name.as_str(),
                    r.number.as_str(),
                    r.address.as_deref().unwrap_or(""),
                ]
            })
            .collect();

        let mut widths = MIN_WIDTHS;
        for (i, header) in HEADERS.iter().enumerate() {
            widths[i] = widths[i].max(header.chars().count());
        }
        for row in &cells {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut out = format_line(&HEADERS, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join("-+-"));
        out.push('\n');
        for row in &cells {
            out.push_str(&format_line(row, &widths));
        }
        out
    }
}

fn format_line(cells: &[&str; 5], widths: &[usize; 5]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    let mut line = padded.join(" | ").trim_end().to_string();
    line.push('\n');
    line
}
