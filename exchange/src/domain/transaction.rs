//! Ledger transactions and monetary amounts.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::project::ProjectId;

/// Errors raised when constructing an [`Amount`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The value was below zero.
    Negative,
    /// The value was zero where a positive amount is required.
    NotPositive,
    /// The input was not a decimal number.
    Unparsable {
        /// The rejected input.
        input: String,
    },
}

impl fmt::Display for AmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative => write!(f, "amount must not be negative"),
            Self::NotPositive => write!(f, "amount must be greater than zero"),
            Self::Unparsable { input } => write!(f, "'{input}' is not a valid amount"),
        }
    }
}

impl std::error::Error for AmountError {}

impl From<AmountError> for DomainError {
    fn from(value: AmountError) -> Self {
        Self::invalid_field("amount", value.to_string())
    }
}

/// Non-negative monetary amount in the exchange's implicit currency.
///
/// Backed by an exact decimal so ledger sums never drift. Addition saturates
/// at [`Decimal::MAX`].
///
/// # Examples
/// ```
/// use exchange::domain::Amount;
///
/// let total: Amount = ["15000", "20000.50"]
///     .into_iter()
///     .map(|raw| raw.parse::<Amount>().expect("valid amount"))
///     .sum();
/// assert_eq!(total.to_string(), "35000.50");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Validate and construct an [`Amount`].
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative);
        }
        Ok(Self(value))
    }

    /// Construct an amount that must be strictly greater than zero.
    pub fn positive(value: Decimal) -> Result<Self, AmountError> {
        let amount = Self::new(value)?;
        if amount.is_zero() {
            return Err(AmountError::NotPositive);
        }
        Ok(amount)
    }

    /// Underlying decimal value.
    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }

    /// Whether the amount is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Amount> for Decimal {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim()).map_err(|_| AmountError::Unparsable {
            input: s.to_owned(),
        })?;
        Self::new(value)
    }
}

/// Stable transaction identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Build the identifier for the `position`-th ledger entry (1-based).
    #[must_use]
    pub fn sequential(position: usize) -> Self {
        Self(position.to_string())
    }

    /// Wrap an identifier read from seed data.
    #[must_use]
    pub fn from_seed(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for TransactionId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Kind of a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Investor funding a project.
    Investment,
    /// Sale of a patent or product.
    Sale,
    /// Payment for development work.
    Development,
}

impl TransactionType {
    /// Every transaction type, in display order.
    pub const ALL: [Self; 3] = [Self::Investment, Self::Sale, Self::Development];

    /// Wire name of the type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Investment => "investment",
            Self::Sale => "sale",
            Self::Development => "development",
        }
    }

    /// Human readable type name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Investment => "Investment",
            Self::Sale => "Sale",
            Self::Development => "Development",
        }
    }
}

/// Settlement status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Settled.
    Completed,
    /// Awaiting settlement.
    Pending,
    /// Rejected upstream.
    Failed,
}

impl TransactionStatus {
    /// Wire name of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Failed => "failed",
        }
    }

    /// Human readable status name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
        }
    }
}

/// An entry in the append-only ledger.
///
/// Parties are free-text display names compared by exact, case-sensitive
/// string equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Stable identifier.
    pub id: TransactionId,
    /// Referenced project.
    pub project_id: ProjectId,
    /// Project title at the time of the transaction.
    pub project_title: String,
    /// Transferred amount.
    pub amount: Amount,
    /// Transaction kind.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Settlement status.
    pub status: TransactionStatus,
    /// When the transaction happened.
    pub date: DateTime<Utc>,
    /// Paying party.
    pub from: String,
    /// Receiving party.
    pub to: String,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("0", true)]
    #[case("15000", true)]
    #[case("0.01", true)]
    #[case("-1", false)]
    fn new_enforces_non_negativity(#[case] raw: &str, #[case] ok: bool) {
        let value = Decimal::from_str(raw).expect("decimal literal");
        assert_eq!(Amount::new(value).is_ok(), ok);
    }

    #[test]
    fn positive_rejects_zero() {
        assert_eq!(Amount::positive(Decimal::ZERO), Err(AmountError::NotPositive));
    }

    #[rstest]
    #[case("abc")]
    #[case("")]
    #[case("12,5")]
    fn parse_rejects_garbage(#[case] raw: &str) {
        assert!(matches!(
            raw.parse::<Amount>(),
            Err(AmountError::Unparsable { .. })
        ));
    }

    #[test]
    fn sum_is_exact() {
        let parts = ["0.1", "0.2"].map(|raw| raw.parse::<Amount>().expect("amount"));
        let total: Amount = parts.iter().sum();
        assert_eq!(total, "0.3".parse::<Amount>().expect("amount"));
    }

    #[test]
    fn addition_saturates() {
        let max = Amount::new(Decimal::MAX).expect("max amount");
        assert_eq!(max + max, max);
    }

    #[test]
    fn negative_amounts_fail_deserialisation() {
        let result = serde_json::from_value::<Amount>(json!("-5"));
        assert!(result.is_err());
    }

    #[test]
    fn transaction_uses_type_key() {
        let transaction = Transaction {
            id: TransactionId::sequential(1),
            project_id: ProjectId::new("1").expect("project id"),
            project_title: "Drone".to_owned(),
            amount: "25000".parse().expect("amount"),
            kind: TransactionType::Sale,
            status: TransactionStatus::Completed,
            date: DateTime::<Utc>::from_timestamp(1_742_916_000, 0).expect("timestamp"),
            from: "Entreprise XYZ".to_owned(),
            to: "Alice Dupont".to_owned(),
        };
        let value = serde_json::to_value(&transaction).expect("serialise transaction");
        assert_eq!(value["type"], json!("sale"));
        assert_eq!(value["projectId"], json!("1"));
    }
}
