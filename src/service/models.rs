//! Data shapes exchanged with the loan service.
//!
//! Field names follow the service's camelCase JSON. The list endpoint and the
//! mutation endpoints share one status field (`loanStatus` when read,
//! `status` when written) and one [`LoanStatus`] enumeration.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::amount::SanctionedAmount;
use super::lenient;

/// Unique applicant identifier; the key for every lookup and mutation.
///
/// Always sent as a string. Numeric identifiers from the service are read
/// as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct AadharNumber(String);

impl AadharNumber {
    /// Wraps an identifier as sent by the service.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AadharNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AadharNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(Self(text)),
            Value::Number(number) => Ok(Self(number.to_string())),
            other => Err(D::Error::custom(format!(
                "expected an Aadhar number as text or digits, found {other}"
            ))),
        }
    }
}

impl From<String> for AadharNumber {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AadharNumber {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Review state of a loan application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoanStatus {
    /// Approved with a sanctioned amount.
    Approved,
    /// Rejected outright.
    Rejected,
    /// Returned to the applicant with a review message.
    Reverted,
    /// Awaiting review. Any status the client does not recognise lands here.
    #[default]
    Pending,
}

impl LoanStatus {
    /// Wire label of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Reverted => "Reverted",
            Self::Pending => "Pending",
        }
    }

    /// Maps a wire label to a status, treating unknown labels as pending.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Approved" => Self::Approved,
            "Rejected" => Self::Rejected,
            "Reverted" => Self::Reverted,
            _ => Self::Pending,
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LoanStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LoanStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.as_deref().map_or(Self::Pending, Self::from_label))
    }
}

/// Submission time of an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmittedAt {
    /// A readable instant.
    Instant(DateTime<Utc>),
    /// Text no known layout matched, shown as sent.
    Raw(String),
}

impl Serialize for SubmittedAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Instant(instant) => serializer.serialize_str(&instant.to_rfc3339()),
            Self::Raw(text) => serializer.serialize_str(text),
        }
    }
}

/// One row of the applications list.
///
/// Only the identifier is decoded strictly. The remaining fields are for
/// display and tolerate strings, numbers and `null` interchangeably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    /// Applicant identifier.
    pub aadhar_number: AadharNumber,
    /// Applicant's full name.
    #[serde(default, deserialize_with = "lenient::text")]
    pub full_name: String,
    /// Bank the loan is requested from.
    #[serde(default, deserialize_with = "lenient::text")]
    pub bank_name: String,
    /// Requested loan amount.
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub loan_amount: Option<f64>,
    /// Requested repayment period in months.
    #[serde(default, deserialize_with = "lenient::optional_months")]
    pub repayment_months: Option<u32>,
    /// When the application was submitted.
    #[serde(default, deserialize_with = "lenient::optional_submitted_at")]
    pub timestamp: Option<SubmittedAt>,
    /// Backend-computed warning, displayed verbatim.
    #[serde(default)]
    pub warning: Value,
    /// Backend-computed safe margin, displayed verbatim.
    #[serde(default)]
    pub safe_margin: Value,
    /// Current review state.
    #[serde(default)]
    pub loan_status: LoanStatus,
    /// Reviewer message attached when the application was reverted.
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub review_message: Option<String>,
    /// Final amount attached when the application was approved.
    #[serde(
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub sanctioned_amount: Option<f64>,
}

impl LoanApplication {
    /// Creates a pending application with only the identifier populated.
    #[must_use]
    pub fn pending(aadhar_number: impl Into<AadharNumber>) -> Self {
        Self {
            aadhar_number: aadhar_number.into(),
            full_name: String::new(),
            bank_name: String::new(),
            loan_amount: None,
            repayment_months: None,
            timestamp: None,
            warning: Value::Null,
            safe_margin: Value::Null,
            loan_status: LoanStatus::Pending,
            review_message: None,
            sanctioned_amount: None,
        }
    }
}

/// Full record returned by the view endpoint.
///
/// Kept as an ordered JSON object so every field the service sends can be
/// shown, in the order it was sent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationDetail(Map<String, Value>);

impl ApplicationDetail {
    /// Wraps a JSON object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Iterates fields in service order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of fields in the record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the service sent an empty object.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Body of `POST /admin/update-loan-status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    /// Application to update.
    pub aadhar_number: AadharNumber,
    /// Target status.
    pub status: LoanStatus,
    /// Reviewer message; absent messages are sent as an empty string.
    #[serde(serialize_with = "serialize_optional_message")]
    pub review_message: Option<String>,
}

impl StatusUpdateRequest {
    /// Rejection carries no message.
    #[must_use]
    pub const fn reject(aadhar_number: AadharNumber) -> Self {
        Self {
            aadhar_number,
            status: LoanStatus::Rejected,
            review_message: None,
        }
    }

    /// Reversion carries the message exactly as typed, empty included.
    #[must_use]
    pub fn revert(aadhar_number: AadharNumber, message: impl Into<String>) -> Self {
        Self {
            aadhar_number,
            status: LoanStatus::Reverted,
            review_message: Some(message.into()),
        }
    }
}

fn serialize_optional_message<S: Serializer>(
    message: &Option<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(message.as_deref().unwrap_or_default())
}

/// Body of `POST /admin/approve-loan`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequest {
    /// Application to approve.
    pub aadhar_number: AadharNumber,
    status: LoanStatus,
    /// Amount the admin sanctioned.
    pub sanctioned_amount: SanctionedAmount,
}

impl ApprovalRequest {
    /// Builds an approval; the status is always `Approved`.
    #[must_use]
    pub const fn new(aadhar_number: AadharNumber, sanctioned_amount: SanctionedAmount) -> Self {
        Self {
            aadhar_number,
            status: LoanStatus::Approved,
            sanctioned_amount,
        }
    }

    /// Status sent with the approval.
    #[must_use]
    pub const fn status(&self) -> LoanStatus {
        self.status
    }
}

/// `{ "data": ... }` envelope wrapping every successful read.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub(crate) data: T,
}
