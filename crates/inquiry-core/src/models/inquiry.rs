/// Inquiry record submitted by the contact form
use serde::{Deserialize, Serialize};

/// A single contact-form submission.
///
/// Every field is optional on the wire; an absent field decodes to an empty
/// string so rendering never has to special-case it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InquiryRecord {
    pub name: String,
    pub company_name: String,
    pub email: String,
    pub phone_number: String,
    pub subject: String,
    pub content: String,
}

impl InquiryRecord {
    /// Decodes a request body into a record
    pub fn from_json(body: &[u8]) -> Result<Self, crate::error::InquiryError> {
        Ok(serde_json::from_slice(body)?)
    }
}
