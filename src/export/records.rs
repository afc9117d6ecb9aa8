use chrono::{DateTime, Utc};

use super::CsvRecord;
use crate::models::feedback::Feedback;
use crate::models::transaction::Transaction;
use crate::models::user::User;

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

impl CsvRecord for User {
    const FILE_PREFIX: &'static str = "user-data";
    const HEADER: &'static [&'static str] = &[
        "Name",
        "Email",
        "Type",
        "Status",
        "Phone",
        "Address",
        "Last Active",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.role.as_str().to_string(),
            self.status.as_str().to_string(),
            self.phone.clone().unwrap_or_default(),
            self.address.clone().unwrap_or_default(),
            self.last_login.as_ref().map(timestamp).unwrap_or_default(),
        ]
    }
}

impl CsvRecord for Transaction {
    const FILE_PREFIX: &'static str = "transactions";
    const HEADER: &'static [&'static str] = &[
        "Transaction ID",
        "Date",
        "Donor",
        "Shopkeeper",
        "Institute",
        "Amount",
        "Status",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            timestamp(&self.created_at),
            self.donor_name.clone(),
            self.shopkeeper_name.clone(),
            self.institute_name.clone(),
            self.amount.to_string(),
            self.status.as_str().to_string(),
        ]
    }
}

impl CsvRecord for Feedback {
    const FILE_PREFIX: &'static str = "feedback";
    const HEADER: &'static [&'static str] = &[
        "Feedback ID",
        "Date",
        "Institute",
        "Shopkeeper",
        "Type",
        "Rating",
        "Status",
        "Comment",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            timestamp(&self.created_at),
            self.institute_name.clone(),
            self.shopkeeper_name.clone(),
            self.kind.as_str().to_string(),
            self.rating.to_string(),
            self.status.as_str().to_string(),
            self.comment.clone(),
        ]
    }
}
