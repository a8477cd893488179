//! Shipping destination shown at checkout.

use serde::{Deserialize, Serialize};

use super::email::Email;

/// Receiver details printed on the checkout page and copied as a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingProfile {
    pub name: String,
    pub address: String,
    pub zip_code: String,
    pub email: Email,
    pub phone: String,
}

impl ShippingProfile {
    /// Multi-line summary in fixed field order: name, address, zip, email, phone.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Receiver Name: {}\nDetailed address: {}\nZip Code: {}\nEmail: {}\nPhone: {}",
            self.name, self.address, self.zip_code, self.email, self.phone
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_field_order() {
        let profile = ShippingProfile {
            name: "Ada Lovelace".to_string(),
            address: "12 St. James's Square, London".to_string(),
            zip_code: "SW1Y4JH".to_string(),
            email: Email::parse("ada@example.com").unwrap(),
            phone: "+44 0000 000000".to_string(),
        };

        let summary = profile.summary();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Receiver Name: Ada Lovelace",
                "Detailed address: 12 St. James's Square, London",
                "Zip Code: SW1Y4JH",
                "Email: ada@example.com",
                "Phone: +44 0000 000000",
            ]
        );
    }
}
