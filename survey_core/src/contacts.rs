//! Creator (surveyor) and customer contact records.
//!
//! Free-form text. Required fields and the email shape are checked by
//! [`crate::validation`]; nothing here is used for pricing.

use serde::{Deserialize, Serialize};

/// The person producing the survey
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreatorInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub license: String,
    pub title: String,
}

impl CreatorInfo {
    pub(crate) fn apply(&mut self, edit: CreatorEdit) {
        match edit {
            CreatorEdit::Name(v) => self.name = v,
            CreatorEdit::Email(v) => self.email = v,
            CreatorEdit::Phone(v) => self.phone = v,
            CreatorEdit::Company(v) => self.company = v,
            CreatorEdit::License(v) => self.license = v,
            CreatorEdit::Title(v) => self.title = v,
        }
    }
}

/// A single-field change to [`CreatorInfo`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreatorEdit {
    Name(String),
    Email(String),
    Phone(String),
    Company(String),
    License(String),
    Title(String),
}

impl CreatorEdit {
    /// The validation field this edit touches
    pub fn field(&self) -> &'static str {
        match self {
            CreatorEdit::Name(_) => "name",
            CreatorEdit::Email(_) => "email",
            CreatorEdit::Phone(_) => "phone",
            CreatorEdit::Company(_) => "company",
            CreatorEdit::License(_) => "license",
            CreatorEdit::Title(_) => "title",
        }
    }
}

/// The customer the survey is for. Optional in the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub company: String,
    pub notes: String,
}

impl CustomerInfo {
    pub(crate) fn apply(&mut self, edit: CustomerEdit) {
        match edit {
            CustomerEdit::Name(v) => self.name = v,
            CustomerEdit::Email(v) => self.email = v,
            CustomerEdit::Phone(v) => self.phone = v,
            CustomerEdit::Address(v) => self.address = v,
            CustomerEdit::Company(v) => self.company = v,
            CustomerEdit::Notes(v) => self.notes = v,
        }
    }
}

/// A single-field change to [`CustomerInfo`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerEdit {
    Name(String),
    Email(String),
    Phone(String),
    Address(String),
    Company(String),
    Notes(String),
}

impl CustomerEdit {
    /// The validation field this edit touches
    pub fn field(&self) -> &'static str {
        match self {
            CustomerEdit::Name(_) => "name",
            CustomerEdit::Email(_) => "email",
            CustomerEdit::Phone(_) => "phone",
            CustomerEdit::Address(_) => "address",
            CustomerEdit::Company(_) => "company",
            CustomerEdit::Notes(_) => "notes",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creator_edits() {
        let mut creator = CreatorInfo::default();
        creator.apply(CreatorEdit::Name("Ada Surveyor".into()));
        creator.apply(CreatorEdit::License("LS-4471".into()));
        assert_eq!(creator.name, "Ada Surveyor");
        assert_eq!(creator.license, "LS-4471");
        assert!(creator.email.is_empty());
    }

    #[test]
    fn test_customer_edits() {
        let mut customer = CustomerInfo::default();
        customer.apply(CustomerEdit::Notes("Side gate code 1234".into()));
        assert_eq!(customer.notes, "Side gate code 1234");
        assert_eq!(CustomerEdit::Address(String::new()).field(), "address");
    }
}
