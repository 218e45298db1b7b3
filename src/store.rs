// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger: the single state container for transactions, insights,
//! saved calculator results and the user profile.
//!
//! All mutation goes through `Ledger` methods. Every mutating method marks the
//! ledger dirty so the caller knows to persist it (see `db::save_ledger`).

use chrono::{DateTime, Datelike, Duration, Local, Months, NaiveTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, invalid};
use crate::models::{
    AiInsight, CalculatorKind, CalculatorResult, CategoryId, DEFAULT_CURRENCY, NewInsight,
    NewTransaction, Period, Transaction, TransactionPatch, TransactionType, User, UserSettings,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ledger {
    user: Option<User>,
    transactions: Vec<Transaction>,
    insights: Vec<AiInsight>,
    calculator_results: Vec<CalculatorResult>,
    #[serde(skip)]
    dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category_id: CategoryId,
    pub category_name: &'static str,
    pub category_icon: String,
    pub category_color: String,
    pub amount: Decimal,
    pub transaction_count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    pub month: String, // YYYY-MM
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

/// Serialized form of `Ledger::export_data`.
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    pub user: Option<User>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub insights: Vec<AiInsight>,
    #[serde(default)]
    pub calculator_results: Vec<CalculatorResult>,
    pub exported_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn parse(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    user: Option<&'a User>,
    transactions: &'a [Transaction],
    insights: &'a [AiInsight],
    calculator_results: &'a [CalculatorResult],
    exported_at: DateTime<Utc>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(invalid("Transaction title must not be empty"));
    }
    Ok(())
}

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(invalid(format!(
            "Transaction amount must be positive, got {}",
            amount
        )));
    }
    Ok(())
}

fn local_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    now.with_timezone(&Local)
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_local_timezone(Local)
        .earliest()
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or(now)
}

/// Inclusive `[start, end]` window for a period ending at `now`. `None` means
/// unbounded. Month and year are rolling windows, not calendar boundaries.
///
/// Month and year subtract calendar months in UTC and clamp to the last valid
/// day, so Mar 31 minus one month is Feb 28 (or 29). This intentionally does
/// not roll the overflow into the next month (Mar 31 to Mar 3); keep the clamp.
pub(crate) fn period_window(
    period: Period,
    now: DateTime<Utc>,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = match period {
        Period::All => return None,
        Period::Today => local_midnight(now),
        Period::Week => now - Duration::days(7),
        Period::Month => now
            .checked_sub_months(Months::new(1))
            .unwrap_or(DateTime::<Utc>::MIN_UTC),
        Period::Year => now
            .checked_sub_months(Months::new(12))
            .unwrap_or(DateTime::<Utc>::MIN_UTC),
    };
    Some((start, now))
}

fn in_window(date: DateTime<Utc>, window: Option<(DateTime<Utc>, DateTime<Utc>)>) -> bool {
    match window {
        Some((start, end)) => date >= start && date <= end,
        None => true,
    }
}

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            user: snapshot.user,
            transactions: snapshot.transactions,
            insights: snapshot.insights,
            calculator_results: snapshot.calculator_results,
            dirty: true,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    // --- user ---

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
        self.dirty = true;
    }

    /// Merge settings into the current profile. Returns false when no profile exists.
    pub fn update_user_settings(&mut self, settings: UserSettings) -> bool {
        let Some(user) = self.user.as_mut() else {
            return false;
        };
        if let Some(name) = settings.name {
            user.name = name;
        }
        if let Some(email) = settings.email {
            user.email = email;
        }
        if let Some(ccy) = settings
            .currency
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
        {
            user.currency = ccy;
        }
        self.dirty = true;
        true
    }

    pub fn currency(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.currency.as_str())
            .unwrap_or(DEFAULT_CURRENCY)
    }

    // --- transactions ---

    /// Newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn add_transaction(&mut self, data: NewTransaction) -> Result<&Transaction> {
        validate_title(&data.title)?;
        validate_amount(data.amount)?;
        if let Some(c) = data.ai_confidence {
            if !(0.0..=1.0).contains(&c) {
                return Err(invalid(format!("Confidence {} outside [0, 1]", c)));
            }
        }

        let now = Utc::now();
        let info = data.category.info();
        let tx = Transaction {
            id: new_id(),
            title: data.title.trim().to_string(),
            amount: data.amount,
            r#type: data.r#type,
            category: data.category,
            category_icon: info.icon.to_string(),
            category_color: info.color.to_string(),
            date: data.date.unwrap_or(now),
            note: data.note.filter(|n| !n.trim().is_empty()),
            ai_categorized: data.ai_confidence.is_some(),
            ai_confidence: data.ai_confidence,
            created_at: now,
            updated_at: now,
        };
        debug!(id = %tx.id, category = %tx.category, amount = %tx.amount, "transaction added");
        self.transactions.insert(0, tx);
        self.dirty = true;
        Ok(&self.transactions[0])
    }

    /// Returns `Ok(false)` without touching anything when `id` is unknown.
    pub fn update_transaction(&mut self, id: &str, patch: TransactionPatch) -> Result<bool> {
        if let Some(title) = &patch.title {
            validate_title(title)?;
        }
        if let Some(amount) = patch.amount {
            validate_amount(amount)?;
        }
        let Some(tx) = self.transactions.iter_mut().find(|t| t.id == id) else {
            debug!(id, "update skipped, no such transaction");
            return Ok(false);
        };

        if let Some(title) = patch.title {
            tx.title = title.trim().to_string();
        }
        if let Some(amount) = patch.amount {
            tx.amount = amount;
        }
        if let Some(kind) = patch.r#type {
            tx.r#type = kind;
        }
        if let Some(category) = patch.category {
            // manual re-assignment overrides whatever the categorizer decided
            let info = category.info();
            tx.category = category;
            tx.category_icon = info.icon.to_string();
            tx.category_color = info.color.to_string();
            tx.ai_categorized = false;
            tx.ai_confidence = None;
        }
        if let Some(date) = patch.date {
            tx.date = date;
        }
        if let Some(note) = patch.note {
            tx.note = Some(note).filter(|n| !n.trim().is_empty());
        }
        tx.updated_at = Utc::now();
        debug!(id, "transaction updated");
        self.dirty = true;
        Ok(true)
    }

    /// Idempotent. Returns whether a record was removed.
    pub fn delete_transaction(&mut self, id: &str) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        let removed = self.transactions.len() != before;
        if removed {
            debug!(id, "transaction deleted");
            self.dirty = true;
        }
        removed
    }

    pub fn transactions_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.date >= start && t.date <= end)
            .collect()
    }

    pub fn transactions_by_category(&self, category: CategoryId) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.category == category)
            .collect()
    }

    fn total_for(&self, kind: TransactionType, period: Period, now: DateTime<Utc>) -> Decimal {
        let window = period_window(period, now);
        self.transactions
            .iter()
            .filter(|t| t.r#type == kind && in_window(t.date, window))
            .map(|t| t.amount)
            .sum()
    }

    pub fn total_income(&self, period: Period) -> Decimal {
        self.total_income_at(period, Utc::now())
    }

    pub fn total_income_at(&self, period: Period, now: DateTime<Utc>) -> Decimal {
        self.total_for(TransactionType::Income, period, now)
    }

    pub fn total_expense(&self, period: Period) -> Decimal {
        self.total_expense_at(period, Utc::now())
    }

    pub fn total_expense_at(&self, period: Period, now: DateTime<Utc>) -> Decimal {
        self.total_for(TransactionType::Expense, period, now)
    }

    /// Always over the full history.
    pub fn balance(&self) -> Decimal {
        self.total_income(Period::All) - self.total_expense(Period::All)
    }

    pub fn category_breakdown(
        &self,
        kind: TransactionType,
        period: Period,
    ) -> Vec<CategoryBreakdown> {
        self.category_breakdown_at(kind, period, Utc::now())
    }

    /// Per-category totals for `kind` inside `period`, largest first.
    pub fn category_breakdown_at(
        &self,
        kind: TransactionType,
        period: Period,
        now: DateTime<Utc>,
    ) -> Vec<CategoryBreakdown> {
        let window = period_window(period, now);
        let mut groups: BTreeMap<CategoryId, CategoryBreakdown> = BTreeMap::new();
        for t in self
            .transactions
            .iter()
            .filter(|t| t.r#type == kind && in_window(t.date, window))
        {
            let entry = groups.entry(t.category).or_insert_with(|| CategoryBreakdown {
                category_id: t.category,
                category_name: t.category.info().name,
                category_icon: t.category_icon.clone(),
                category_color: t.category_color.clone(),
                amount: Decimal::ZERO,
                transaction_count: 0,
                percentage: 0.0,
            });
            entry.amount += t.amount;
            entry.transaction_count += 1;
        }

        let total: Decimal = groups.values().map(|g| g.amount).sum();
        let mut items: Vec<CategoryBreakdown> = groups.into_values().collect();
        if !total.is_zero() {
            for item in items.iter_mut() {
                item.percentage = (item.amount / total * Decimal::ONE_HUNDRED)
                    .to_f64()
                    .unwrap_or(0.0);
            }
        }
        // stable sort keeps taxonomy order for equal amounts
        items.sort_by(|a, b| b.amount.cmp(&a.amount));
        items
    }

    pub fn savings_rate(&self, period: Period) -> f64 {
        self.savings_rate_at(period, Utc::now())
    }

    /// Share of income kept in `period`, as a percentage. Zero when there is no income.
    pub fn savings_rate_at(&self, period: Period, now: DateTime<Utc>) -> f64 {
        let income = self.total_income_at(period, now);
        if income.is_zero() {
            return 0.0;
        }
        let expense = self.total_expense_at(period, now);
        ((income - expense) / income * Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or(0.0)
    }

    /// Income and expense per calendar month for the last `months` months, oldest first.
    pub fn monthly_trend(&self, months: u32, now: DateTime<Utc>) -> Vec<MonthlyTotals> {
        let Some(anchor) = now.with_timezone(&Local).date_naive().with_day(1) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for back in (0..months).rev() {
            let Some(month) = anchor.checked_sub_months(Months::new(back)) else {
                continue;
            };
            let mut income = Decimal::ZERO;
            let mut expense = Decimal::ZERO;
            for t in &self.transactions {
                let d = t.date.with_timezone(&Local).date_naive();
                if d.year() != month.year() || d.month() != month.month() {
                    continue;
                }
                match t.r#type {
                    TransactionType::Income => income += t.amount,
                    TransactionType::Expense => expense += t.amount,
                }
            }
            out.push(MonthlyTotals {
                month: month.format("%Y-%m").to_string(),
                label: MONTH_LABELS[month.month0() as usize].to_string(),
                income,
                expense,
                balance: income - expense,
            });
        }
        out
    }

    // --- insights ---

    /// Newest first.
    pub fn insights(&self) -> &[AiInsight] {
        &self.insights
    }

    pub fn unread_insights(&self) -> Vec<&AiInsight> {
        self.insights.iter().filter(|i| !i.read).collect()
    }

    pub fn add_insight(&mut self, insight: NewInsight) -> &AiInsight {
        let record = AiInsight {
            id: new_id(),
            r#type: insight.r#type,
            title: insight.title,
            message: insight.message,
            category_id: insight.category_id,
            read: false,
            created_at: Utc::now(),
        };
        debug!(id = %record.id, kind = record.r#type.as_str(), "insight added");
        self.insights.insert(0, record);
        self.dirty = true;
        &self.insights[0]
    }

    pub fn mark_insight_read(&mut self, id: &str) -> bool {
        match self.insights.iter_mut().find(|i| i.id == id) {
            Some(insight) => {
                insight.read = true;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    pub fn clear_insights(&mut self) {
        self.insights.clear();
        self.dirty = true;
    }

    // --- calculator results ---

    /// Newest first.
    pub fn calculator_results(&self) -> &[CalculatorResult] {
        &self.calculator_results
    }

    pub fn save_calculator_result(
        &mut self,
        kind: CalculatorKind,
        inputs: BTreeMap<String, f64>,
        results: BTreeMap<String, f64>,
        name: Option<String>,
    ) -> &CalculatorResult {
        let record = CalculatorResult {
            id: new_id(),
            r#type: kind,
            inputs,
            results,
            name,
            created_at: Utc::now(),
        };
        debug!(id = %record.id, kind = kind.as_str(), "calculator result saved");
        self.calculator_results.insert(0, record);
        self.dirty = true;
        &self.calculator_results[0]
    }

    pub fn delete_calculator_result(&mut self, id: &str) -> bool {
        let before = self.calculator_results.len();
        self.calculator_results.retain(|r| r.id != id);
        let removed = self.calculator_results.len() != before;
        if removed {
            self.dirty = true;
        }
        removed
    }

    // --- utilities ---

    /// Drops transactions, insights and calculator results in one step. The
    /// user profile survives a reset.
    pub fn reset_all_data(&mut self) {
        self.transactions.clear();
        self.insights.clear();
        self.calculator_results.clear();
        self.dirty = true;
        debug!("ledger reset");
    }

    /// Pretty JSON snapshot of the full state, stamped with `exported_at`.
    pub fn export_data(&self, exported_at: DateTime<Utc>) -> Result<String> {
        let snapshot = SnapshotRef {
            user: self.user.as_ref(),
            transactions: &self.transactions,
            insights: &self.insights,
            calculator_results: &self.calculator_results,
            exported_at,
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn month_window_is_rolling() {
        let now = at(2025, 3, 15);
        let (start, end) = period_window(Period::Month, now).unwrap();
        assert_eq!(start, at(2025, 2, 15));
        assert_eq!(end, now);
    }

    #[test]
    fn month_window_clamps_to_shorter_month() {
        let now = at(2025, 3, 31);
        let (start, _) = period_window(Period::Month, now).unwrap();
        assert_eq!(start, at(2025, 2, 28));
    }

    #[test]
    fn year_window_subtracts_twelve_months() {
        let now = at(2024, 2, 29);
        let (start, _) = period_window(Period::Year, now).unwrap();
        assert_eq!(start, at(2023, 2, 28));
    }

    #[test]
    fn week_window_is_seven_days() {
        let now = at(2025, 3, 15);
        let (start, _) = period_window(Period::Week, now).unwrap();
        assert_eq!(now - start, Duration::days(7));
    }

    #[test]
    fn all_is_unbounded() {
        assert!(period_window(Period::All, Utc::now()).is_none());
        assert!(in_window(at(2099, 1, 1), None));
    }

    #[test]
    fn today_starts_at_local_midnight() {
        let now = Utc::now();
        let (start, _) = period_window(Period::Today, now).unwrap();
        assert!(start <= now);
        assert!(now - start < Duration::hours(25));
        let local = start.with_timezone(&Local);
        assert_eq!(local.time(), NaiveTime::MIN);
    }
}
