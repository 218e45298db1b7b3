// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Rule-based spending insights.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

use crate::models::{CategoryId, InsightKind, NewInsight, Period, Transaction, TransactionType};
use crate::store::Ledger;
use crate::utils::currency_symbol;

pub const EMPTY_LEDGER_MESSAGE: &str = "Start adding transactions to get personalized insights!";

/// Savings rate (percent) above which the month earns a success insight.
pub const HEALTHY_SAVINGS_RATE: f64 = 20.0;

struct SpendingStats {
    expense_count: usize,
    total_expense: Decimal,
    by_category: Vec<(CategoryId, Decimal)>, // largest first
}

impl SpendingStats {
    fn from(transactions: &[Transaction]) -> Self {
        let mut groups: BTreeMap<CategoryId, Decimal> = BTreeMap::new();
        let mut expense_count = 0;
        let mut total_expense = Decimal::ZERO;
        for t in transactions.iter().filter(|t| t.r#type == TransactionType::Expense) {
            expense_count += 1;
            total_expense += t.amount;
            *groups.entry(t.category).or_insert(Decimal::ZERO) += t.amount;
        }
        let mut by_category: Vec<_> = groups.into_iter().collect();
        by_category.sort_by(|a, b| b.1.cmp(&a.1));
        Self {
            expense_count,
            total_expense,
            by_category,
        }
    }

    fn average_expense(&self) -> Option<Decimal> {
        if self.total_expense > Decimal::ZERO {
            Some(self.total_expense / Decimal::from(self.expense_count))
        } else {
            None
        }
    }

    fn top_share(&self) -> Option<(CategoryId, Decimal)> {
        let (category, amount) = self.by_category.first()?;
        if self.total_expense.is_zero() {
            return None;
        }
        Some((*category, *amount / self.total_expense * Decimal::ONE_HUNDRED))
    }
}

fn whole(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn average_message(avg: Decimal, currency: &str) -> String {
    format!(
        "Your average transaction is {}{}",
        currency_symbol(currency),
        whole(avg)
    )
}

fn share_message(category: CategoryId, pct: Decimal) -> String {
    format!("{}% of spending is on {}", whole(pct), category.info().name)
}

/// Short insight lines for a transaction list. Deterministic for a given list.
pub fn generate_insights(transactions: &[Transaction], currency: &str) -> Vec<String> {
    if transactions.is_empty() {
        return vec![EMPTY_LEDGER_MESSAGE.to_string()];
    }
    let stats = SpendingStats::from(transactions);
    let mut out = Vec::new();
    if let Some(avg) = stats.average_expense() {
        out.push(average_message(avg, currency));
    }
    if let Some((category, pct)) = stats.top_share() {
        out.push(share_message(category, pct));
    }
    out
}

/// Plain-text digest: total expenses, top five categories, transaction count.
pub fn transaction_summary(transactions: &[Transaction], currency: &str) -> String {
    let stats = SpendingStats::from(transactions);
    let sym = currency_symbol(currency);
    let top = stats
        .by_category
        .iter()
        .take(5)
        .map(|(c, amt)| format!("{}: {}{}", c, sym, amt))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Total Expenses: {}{}\nTop Categories: {}\nTotal Transactions: {}",
        sym,
        stats.total_expense,
        top,
        transactions.len()
    )
}

/// Insight records for the ledger as of `now`, ready for `Ledger::add_insight`.
pub fn build_insights(ledger: &Ledger, now: DateTime<Utc>) -> Vec<NewInsight> {
    let transactions = ledger.transactions();
    if transactions.is_empty() {
        return vec![NewInsight {
            r#type: InsightKind::Tip,
            title: "Get started".into(),
            message: EMPTY_LEDGER_MESSAGE.into(),
            category_id: None,
        }];
    }

    let stats = SpendingStats::from(transactions);
    let mut out = Vec::new();
    if let Some(avg) = stats.average_expense() {
        out.push(NewInsight {
            r#type: InsightKind::Info,
            title: "Average expense".into(),
            message: average_message(avg, ledger.currency()),
            category_id: None,
        });
    }
    if let Some((category, pct)) = stats.top_share() {
        out.push(NewInsight {
            r#type: InsightKind::Info,
            title: "Top spending category".into(),
            message: share_message(category, pct),
            category_id: Some(category),
        });
    }

    let rate = ledger.savings_rate_at(Period::Month, now);
    if rate > HEALTHY_SAVINGS_RATE {
        out.push(NewInsight {
            r#type: InsightKind::Success,
            title: "Healthy savings rate".into(),
            message: format!("Great! You're saving {:.1}% of your income", rate),
            category_id: None,
        });
    } else if rate < 0.0 {
        out.push(NewInsight {
            r#type: InsightKind::Warning,
            title: "Spending exceeds income".into(),
            message: "Consider reducing expenses to improve your savings rate".into(),
            category_id: None,
        });
    }
    out
}
