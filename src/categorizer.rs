// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::models::CategoryId;

pub const RULE_CONFIDENCE: f64 = 0.75;
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Keyword rules, evaluated top to bottom. The first category with any
/// substring hit wins, so the order here is part of the contract.
pub const RULES: [(CategoryId, &[&str]); 14] = [
    (
        CategoryId::Food,
        &[
            "food", "restaurant", "cafe", "swiggy", "zomato", "lunch", "dinner", "breakfast",
            "pizza", "burger",
        ],
    ),
    (
        CategoryId::Transport,
        &["uber", "ola", "petrol", "fuel", "metro", "bus", "train", "taxi", "parking"],
    ),
    (
        CategoryId::Shopping,
        &["amazon", "flipkart", "shop", "clothes", "clothing", "fashion", "myntra", "ajio"],
    ),
    (
        CategoryId::Entertainment,
        &["movie", "netflix", "prime", "spotify", "youtube", "game", "concert", "theatre"],
    ),
    (
        CategoryId::Bills,
        &[
            "electricity", "water", "gas", "bill", "utility", "recharge", "broadband", "internet",
        ],
    ),
    (
        CategoryId::Healthcare,
        &["hospital", "doctor", "medicine", "pharmacy", "health", "clinic", "medical"],
    ),
    (
        CategoryId::Education,
        &["course", "book", "school", "college", "university", "tuition", "learning"],
    ),
    (
        CategoryId::Travel,
        &["flight", "hotel", "booking", "makemytrip", "goibibo", "vacation", "trip"],
    ),
    (CategoryId::Rent, &["rent", "house rent", "apartment", "lease"]),
    (CategoryId::Insurance, &["insurance", "premium", "policy"]),
    (
        CategoryId::Investment,
        &["mutual fund", "sip", "stock", "investment", "zerodha", "groww"],
    ),
    (CategoryId::Loan, &["emi", "loan", "credit", "debt", "repayment"]),
    (
        CategoryId::Subscription,
        &["subscription", "membership", "plan", "premium"],
    ),
    (
        CategoryId::Salary,
        &["salary", "income", "payment received", "credited"],
    ),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Categorization {
    pub category: CategoryId,
    pub category_icon: String,
    pub category_color: String,
    pub confidence: f64,
    pub reasoning: String,
}

impl Categorization {
    fn for_category(category: CategoryId, confidence: f64, reasoning: &str) -> Self {
        let info = category.info();
        Self {
            category,
            category_icon: info.icon.to_string(),
            category_color: info.color.to_string(),
            confidence,
            reasoning: reasoning.to_string(),
        }
    }
}

/// Rule-based categorization of a transaction description. Amount is part of
/// the input contract but does not influence the rules.
pub fn categorize(title: &str, _amount: Decimal, note: Option<&str>) -> Categorization {
    let text = format!("{} {}", title, note.unwrap_or("")).to_lowercase();
    for (category, keywords) in RULES.iter() {
        if keywords.iter().any(|k| text.contains(k)) {
            return Categorization::for_category(
                *category,
                RULE_CONFIDENCE,
                "Rule-based categorization",
            );
        }
    }
    Categorization::for_category(CategoryId::Other, DEFAULT_CONFIDENCE, "Default category")
}

/// `categorize` with a memo of previous answers.
#[derive(Debug, Default)]
pub struct Categorizer {
    cache: HashMap<String, Categorization>,
}

impl Categorizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn cache_key(title: &str, amount: Decimal, note: Option<&str>) -> String {
        format!("{}_{}_{}", title, amount, note.unwrap_or("")).to_lowercase()
    }

    pub fn categorize(&mut self, title: &str, amount: Decimal, note: Option<&str>) -> Categorization {
        let key = Self::cache_key(title, amount, note);
        if let Some(hit) = self.cache.get(&key) {
            debug!(key = %key, "categorization cache hit");
            return hit.clone();
        }
        let result = categorize(title, amount, note);
        debug!(key = %key, category = %result.category, confidence = result.confidence, "categorized");
        self.cache.insert(key, result.clone());
        result
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
