// SPDX-License-Identifier: MIT

//! Bike record model for storage and API.
//!
//! A record accumulates fields in three stages (purchase, repair, sale).
//! Scalar fields use the empty string for "not yet provided" and are omitted
//! from the stored document when empty; enums are typed `Option`s. Photo URLs
//! live in a single nested map keyed by logical photo name.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// CPLC verification outcome, recorded for both seller and buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CplcStatus {
    Clear,
    Reported,
    #[serde(rename = "Not Checked")]
    NotChecked,
}

impl FromStr for CplcStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Clear" => Ok(Self::Clear),
            "Reported" => Ok(Self::Reported),
            "Not Checked" => Ok(Self::NotChecked),
            _ => Err(()),
        }
    }
}

/// How the sale was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Installment,
}

impl FromStr for PaymentMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cash" => Ok(Self::Cash),
            "Installment" => Ok(Self::Installment),
            _ => Err(()),
        }
    }
}

/// Where the registration file/book is after the sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileHandoverStatus {
    #[serde(rename = "With Showroom")]
    WithShowroom,
    #[serde(rename = "Handed to Customer")]
    HandedToCustomer,
    Pending,
}

impl FromStr for FileHandoverStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "With Showroom" => Ok(Self::WithShowroom),
            "Handed to Customer" => Ok(Self::HandedToCustomer),
            "Pending" => Ok(Self::Pending),
            _ => Err(()),
        }
    }
}

/// Stored bike record in Firestore.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BikeRecord {
    /// Generated record id (also used as document ID)
    pub bike_id: String,
    /// When the record was created (RFC3339)
    pub created_at: String,

    // ─── Purchase Stage ──────────────────────────────────────────
    /// Sequential bill number ("B-<n>"), auto-generated at intake
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bill_number: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub purchase_date: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub purchase_price: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub seller_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub seller_cnic: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub father_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner_name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub registration_number: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub chassis_number: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub engine_number: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub horsepower: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model_year: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub maker: String,
    /// Original number plates present at purchase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_plates: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_cplc_status: Option<CplcStatus>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub seller_cplc_date: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub seller_cplc_time: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub seller_operator_number: String,

    // ─── Repair Stage ────────────────────────────────────────────
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repair_description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repair_cost: String,

    // ─── Sale Stage ──────────────────────────────────────────────
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub buyer_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub buyer_cnic: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub buyer_phone: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub buyer_address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub account_number: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sale_date: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sale_price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_handover_status: Option<FileHandoverStatus>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file_handover_date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_cplc_status: Option<CplcStatus>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub buyer_cplc_date: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub buyer_cplc_time: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub buyer_operator_number: String,

    // ─── Documents / Photos ──────────────────────────────────────
    /// Logical photo key -> public media URL
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub photos: BTreeMap<String, String>,
}

/// Legal logical photo keys, grouped by stage.
pub mod photo_keys {
    pub const PURCHASE: &[&str] = &[
        "seller_cnic_front",
        "seller_cnic_back",
        "shop_slip",
        "seller_with_bike",
        "page1",
        "page2",
        "page3",
        "page4",
        "book_front",
        "book_back",
        "smart_front",
        "smart_back",
        "owner_cnic_front",
        "owner_cnic_back",
        "front_photo",
        "back_photo",
        "left_photo",
        "right_photo",
        "meter_photo",
        "engine_photo",
        "chassis_photo",
    ];

    pub const REPAIR: &[&str] = &["repair_bill"];

    pub const SALE: &[&str] = &[
        "sale_receipt",
        "buyer_cnic_front",
        "buyer_cnic_back",
        "buyer_with_bike",
        "sale_agreement",
        "sale_photos",
        "file_handover_slip",
    ];

    /// Whether `key` is a known logical photo key.
    pub fn is_known(key: &str) -> bool {
        PURCHASE.contains(&key) || REPAIR.contains(&key) || SALE.contains(&key)
    }
}

impl BikeRecord {
    /// Build a record from submitted form fields.
    ///
    /// Empty values are treated as "not provided". Unknown field names are
    /// rejected rather than silently dropped, as are bad enum values, so a
    /// typo in a form never loses data quietly.
    pub fn from_fields(fields: &BTreeMap<String, String>) -> Result<Self, AppError> {
        let mut record = Self::default();

        for (name, value) in fields {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match name.as_str() {
                "bill_number" => record.bill_number = value.to_string(),
                "purchase_date" => record.purchase_date = value.to_string(),
                "purchase_price" => record.purchase_price = value.to_string(),
                "seller_name" => record.seller_name = value.to_string(),
                "seller_cnic" => record.seller_cnic = value.to_string(),
                "father_name" => record.father_name = value.to_string(),
                "address" => record.address = value.to_string(),
                "phone" => record.phone = value.to_string(),
                "owner_name" => record.owner_name = value.to_string(),
                "registration_number" => record.registration_number = value.to_string(),
                "chassis_number" => record.chassis_number = value.to_string(),
                "engine_number" => record.engine_number = value.to_string(),
                "horsepower" => record.horsepower = value.to_string(),
                "model_year" => record.model_year = value.to_string(),
                "color" => record.color = value.to_string(),
                "maker" => record.maker = value.to_string(),
                "original_plates" => {
                    record.original_plates = Some(parse_flag(name, value)?);
                }
                "seller_cplc_status" => {
                    record.seller_cplc_status = Some(parse_enum(name, value)?);
                }
                "seller_cplc_date" => record.seller_cplc_date = value.to_string(),
                "seller_cplc_time" => record.seller_cplc_time = value.to_string(),
                "seller_operator_number" => record.seller_operator_number = value.to_string(),
                "repair_description" => record.repair_description = value.to_string(),
                "repair_cost" => record.repair_cost = value.to_string(),
                "buyer_name" => record.buyer_name = value.to_string(),
                "buyer_cnic" => record.buyer_cnic = value.to_string(),
                "buyer_phone" => record.buyer_phone = value.to_string(),
                "buyer_address" => record.buyer_address = value.to_string(),
                "account_number" => record.account_number = value.to_string(),
                "sale_date" => record.sale_date = value.to_string(),
                "sale_price" => record.sale_price = value.to_string(),
                "payment_method" => {
                    record.payment_method = Some(parse_enum(name, value)?);
                }
                "file_handover_status" => {
                    record.file_handover_status = Some(parse_enum(name, value)?);
                }
                "file_handover_date" => record.file_handover_date = value.to_string(),
                "buyer_cplc_status" => {
                    record.buyer_cplc_status = Some(parse_enum(name, value)?);
                }
                "buyer_cplc_date" => record.buyer_cplc_date = value.to_string(),
                "buyer_cplc_time" => record.buyer_cplc_time = value.to_string(),
                "buyer_operator_number" => record.buyer_operator_number = value.to_string(),
                other => {
                    return Err(AppError::BadRequest(format!("Unknown field: {}", other)));
                }
            }
        }

        Ok(record)
    }
}

fn parse_enum<T: FromStr>(field: &str, value: &str) -> Result<T, AppError> {
    value
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid value for {}: {}", field, value)))
}

fn parse_flag(field: &str, value: &str) -> Result<bool, AppError> {
    match value {
        "true" | "Yes" => Ok(true),
        "false" | "No" => Ok(false),
        other => Err(AppError::BadRequest(format!(
            "Invalid value for {}: {}",
            field, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_fields_basic() {
        let record = BikeRecord::from_fields(&fields(&[
            ("seller_name", "Ahmed Khan"),
            ("registration_number", "KHI-1234"),
            ("payment_method", "Cash"),
            ("seller_cplc_status", "Not Checked"),
            ("original_plates", "Yes"),
        ]))
        .unwrap();

        assert_eq!(record.seller_name, "Ahmed Khan");
        assert_eq!(record.registration_number, "KHI-1234");
        assert_eq!(record.payment_method, Some(PaymentMethod::Cash));
        assert_eq!(record.seller_cplc_status, Some(CplcStatus::NotChecked));
        assert_eq!(record.original_plates, Some(true));
    }

    #[test]
    fn test_from_fields_empty_values_are_absent() {
        let record = BikeRecord::from_fields(&fields(&[
            ("seller_name", "  "),
            ("payment_method", ""),
        ]))
        .unwrap();

        assert!(record.seller_name.is_empty());
        assert!(record.payment_method.is_none());
    }

    #[test]
    fn test_from_fields_rejects_unknown_field() {
        let err = BikeRecord::from_fields(&fields(&[("horse_power", "70")])).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_from_fields_rejects_bad_enum() {
        let err =
            BikeRecord::from_fields(&fields(&[("file_handover_status", "Lost")])).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_empty_fields_not_serialized() {
        let record = BikeRecord {
            bike_id: "b1".to_string(),
            created_at: "2025-06-01T10:00:00Z".to_string(),
            seller_name: "Ahmed".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();

        assert!(obj.contains_key("seller_name"));
        assert!(!obj.contains_key("buyer_name"));
        assert!(!obj.contains_key("payment_method"));
        assert!(!obj.contains_key("photos"));
    }

    #[test]
    fn test_enum_wire_format() {
        let record = BikeRecord {
            file_handover_status: Some(FileHandoverStatus::WithShowroom),
            seller_cplc_status: Some(CplcStatus::NotChecked),
            ..Default::default()
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["file_handover_status"], "With Showroom");
        assert_eq!(value["seller_cplc_status"], "Not Checked");
    }

    #[test]
    fn test_photo_key_listing() {
        assert!(photo_keys::is_known("repair_bill"));
        assert!(photo_keys::is_known("buyer_with_bike"));
        assert!(!photo_keys::is_known("selfie"));
    }
}
