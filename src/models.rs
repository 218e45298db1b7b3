// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, invalid};

/// Identifier of an entry in the fixed category taxonomy.
///
/// Declaration order matters: the categorizer walks its rule table in this
/// order and breakdown ties are broken by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryId {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Bills,
    Healthcare,
    Education,
    Travel,
    Rent,
    Insurance,
    Investment,
    Loan,
    Subscription,
    Salary,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

pub const CATEGORIES: [Category; 15] = [
    Category { id: CategoryId::Food, name: "Food & Dining", icon: "🍔", color: "#F59E0B" },
    Category { id: CategoryId::Transport, name: "Transport", icon: "🚗", color: "#3B82F6" },
    Category { id: CategoryId::Shopping, name: "Shopping", icon: "🛍️", color: "#EC4899" },
    Category { id: CategoryId::Entertainment, name: "Entertainment", icon: "🎬", color: "#8B5CF6" },
    Category { id: CategoryId::Bills, name: "Bills & Utilities", icon: "💡", color: "#EF4444" },
    Category { id: CategoryId::Healthcare, name: "Healthcare", icon: "🏥", color: "#10B981" },
    Category { id: CategoryId::Education, name: "Education", icon: "📚", color: "#06B6D4" },
    Category { id: CategoryId::Travel, name: "Travel", icon: "✈️", color: "#F97316" },
    Category { id: CategoryId::Rent, name: "Rent", icon: "🏠", color: "#6366F1" },
    Category { id: CategoryId::Insurance, name: "Insurance", icon: "🛡️", color: "#14B8A6" },
    Category { id: CategoryId::Investment, name: "Investment/SIP", icon: "📈", color: "#10B981" },
    Category { id: CategoryId::Loan, name: "Loan/EMI", icon: "💳", color: "#EF4444" },
    Category { id: CategoryId::Subscription, name: "Subscription", icon: "📱", color: "#8B5CF6" },
    Category { id: CategoryId::Salary, name: "Salary", icon: "💰", color: "#10B981" },
    Category { id: CategoryId::Other, name: "Other", icon: "📦", color: "#64748B" },
];

impl CategoryId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryId::Food => "food",
            CategoryId::Transport => "transport",
            CategoryId::Shopping => "shopping",
            CategoryId::Entertainment => "entertainment",
            CategoryId::Bills => "bills",
            CategoryId::Healthcare => "healthcare",
            CategoryId::Education => "education",
            CategoryId::Travel => "travel",
            CategoryId::Rent => "rent",
            CategoryId::Insurance => "insurance",
            CategoryId::Investment => "investment",
            CategoryId::Loan => "loan",
            CategoryId::Subscription => "subscription",
            CategoryId::Salary => "salary",
            CategoryId::Other => "other",
        }
    }

    /// Taxonomy entry for this id. The table is indexed in declaration order.
    pub fn info(&self) -> &'static Category {
        &CATEGORIES[*self as usize]
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        CATEGORIES
            .iter()
            .map(|c| c.id)
            .find(|id| id.as_str() == needle)
            .ok_or_else(|| invalid(format!("Unknown category '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(invalid(format!(
                "Unknown transaction type '{}', expected income|expense",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub title: String,
    pub amount: Decimal, // always positive, direction comes from `type`
    pub r#type: TransactionType,
    pub category: CategoryId,
    pub category_icon: String,
    pub category_color: String,
    pub date: DateTime<Utc>,
    pub note: Option<String>,
    pub ai_categorized: bool,
    pub ai_confidence: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new transaction. `ai_confidence` is set only
/// when the category came from the categorizer.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub title: String,
    pub amount: Decimal,
    pub r#type: TransactionType,
    pub category: CategoryId,
    pub date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub ai_confidence: Option<f64>,
}

impl NewTransaction {
    pub fn new(
        title: impl Into<String>,
        amount: Decimal,
        r#type: TransactionType,
        category: CategoryId,
    ) -> Self {
        Self {
            title: title.into(),
            amount,
            r#type,
            category,
            date: None,
            note: None,
            ai_confidence: None,
        }
    }

    pub fn on(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn categorized(mut self, confidence: f64) -> Self {
        self.ai_confidence = Some(confidence);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub title: Option<String>,
    pub amount: Option<Decimal>,
    pub r#type: Option<TransactionType>,
    pub category: Option<CategoryId>,
    pub date: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.amount.is_none()
            && self.r#type.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.note.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

pub const DEFAULT_CURRENCY: &str = "INR";

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>, currency: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.into(),
            name: name.into(),
            currency: currency
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserSettings {
    pub name: Option<String>,
    pub email: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Info,
    Success,
    Tip,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Warning => "warning",
            InsightKind::Info => "info",
            InsightKind::Success => "success",
            InsightKind::Tip => "tip",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiInsight {
    pub id: String,
    pub r#type: InsightKind,
    pub title: String,
    pub message: String,
    pub category_id: Option<CategoryId>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInsight {
    pub r#type: InsightKind,
    pub title: String,
    pub message: String,
    pub category_id: Option<CategoryId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorKind {
    Sip,
    Lumpsum,
    Emi,
    Credit,
    Inflation,
    Fire,
}

impl CalculatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculatorKind::Sip => "sip",
            CalculatorKind::Lumpsum => "lumpsum",
            CalculatorKind::Emi => "emi",
            CalculatorKind::Credit => "credit",
            CalculatorKind::Inflation => "inflation",
            CalculatorKind::Fire => "fire",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorResult {
    pub id: String,
    pub r#type: CalculatorKind,
    pub inputs: BTreeMap<String, f64>,
    pub results: BTreeMap<String, f64>,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Reporting window for period totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    Today,
    Week,
    #[default]
    Month,
    Year,
    All,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::All => "all",
        }
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(Period::Today),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            "all" => Ok(Period::All),
            _ => Err(invalid(format!(
                "Unknown period '{}', expected today|week|month|year|all",
                s
            ))),
        }
    }
}
