// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Closed-form financial calculators.
//!
//! Every function here is pure: explicit parameters in, a result record out.
//! Rates are annual percentages (12 means 12% p.a.). Inputs are validated and
//! rejected with `Error::InvalidInput`; zero rates take their own branch so no
//! NaN or infinity reaches a caller.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

use crate::error::{Result, invalid};

/// Corpus multiple of annual expenses (the 4% withdrawal rule).
pub const FIRE_CORPUS_MULTIPLE: f64 = 25.0;

fn require_positive(name: &str, v: f64) -> Result<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(invalid(format!("{} must be a positive number, got {}", name, v)));
    }
    Ok(())
}

fn require_non_negative(name: &str, v: f64) -> Result<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(invalid(format!("{} must not be negative, got {}", name, v)));
    }
    Ok(())
}

/// Longest horizon any calculator accepts. Keeps month counts and `powi`
/// exponents well inside `i32`.
pub const MAX_YEARS: u32 = 100;

fn require_years(years: u32) -> Result<()> {
    if years == 0 || years > MAX_YEARS {
        return Err(invalid(format!(
            "years must be between 1 and {}, got {}",
            MAX_YEARS, years
        )));
    }
    Ok(())
}

/// Builds a named parameter map, the shape persisted in `CalculatorResult`.
pub fn named(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyProjection {
    pub year: u32,
    pub invested: f64,
    pub value: f64,
    pub returns: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentProjection {
    pub total_investment: f64,
    pub estimated_returns: f64,
    pub total_value: f64,
    pub yearly_breakdown: Vec<YearlyProjection>,
}

impl InvestmentProjection {
    pub fn results(&self) -> BTreeMap<String, f64> {
        named(&[
            ("total_investment", self.total_investment),
            ("estimated_returns", self.estimated_returns),
            ("total_value", self.total_value),
        ])
    }
}

// Future value of an annuity due: contributions at the start of each month.
fn sip_value(monthly: f64, monthly_rate: f64, months: u32) -> f64 {
    if monthly_rate == 0.0 {
        return monthly * months as f64;
    }
    let growth = (1.0 + monthly_rate).powi(months as i32);
    monthly * ((growth - 1.0) / monthly_rate) * (1.0 + monthly_rate)
}

pub fn sip(monthly_investment: f64, annual_rate: f64, years: u32) -> Result<InvestmentProjection> {
    require_positive("monthly_investment", monthly_investment)?;
    require_non_negative("annual_rate", annual_rate)?;
    require_years(years)?;

    let monthly_rate = annual_rate / 12.0 / 100.0;
    let months = years * 12;

    let yearly_breakdown = (1..=years)
        .map(|year| {
            let elapsed = year * 12;
            let invested = monthly_investment * elapsed as f64;
            let value = sip_value(monthly_investment, monthly_rate, elapsed);
            YearlyProjection {
                year,
                invested,
                value,
                returns: value - invested,
            }
        })
        .collect();

    let total_investment = monthly_investment * months as f64;
    let total_value = sip_value(monthly_investment, monthly_rate, months);
    Ok(InvestmentProjection {
        total_investment,
        estimated_returns: total_value - total_investment,
        total_value,
        yearly_breakdown,
    })
}

pub fn lumpsum(principal: f64, annual_rate: f64, years: u32) -> Result<InvestmentProjection> {
    require_positive("principal", principal)?;
    require_non_negative("annual_rate", annual_rate)?;
    require_years(years)?;

    let growth = 1.0 + annual_rate / 100.0;
    let yearly_breakdown = (1..=years)
        .map(|year| {
            let value = principal * growth.powi(year as i32);
            YearlyProjection {
                year,
                invested: principal,
                value,
                returns: value - principal,
            }
        })
        .collect();

    let total_value = principal * growth.powi(years as i32);
    Ok(InvestmentProjection {
        total_investment: principal,
        estimated_returns: total_value - principal,
        total_value,
        yearly_breakdown,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmortizationEntry {
    pub month: u32,
    pub emi: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanSchedule {
    pub emi: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    /// Sampled at month 1, every 12th month, and the final month.
    pub breakdown: Vec<AmortizationEntry>,
}

impl LoanSchedule {
    pub fn results(&self) -> BTreeMap<String, f64> {
        named(&[
            ("emi", self.emi),
            ("total_payment", self.total_payment),
            ("total_interest", self.total_interest),
        ])
    }
}

/// Reducing-balance loan installment.
pub fn emi(principal: f64, annual_rate: f64, years: u32) -> Result<LoanSchedule> {
    require_positive("principal", principal)?;
    require_non_negative("annual_rate", annual_rate)?;
    require_years(years)?;

    let r = annual_rate / 12.0 / 100.0;
    let n = years * 12;
    let emi = if r == 0.0 {
        principal / n as f64
    } else {
        let growth = (1.0 + r).powi(n as i32);
        principal * r * growth / (growth - 1.0)
    };
    let total_payment = emi * n as f64;
    let total_interest = total_payment - principal;

    let mut balance = principal;
    let mut breakdown = Vec::new();
    for month in 1..=n {
        let interest = balance * r;
        let principal_paid = emi - interest;
        balance -= principal_paid;
        if month == 1 || month % 12 == 0 || month == n {
            breakdown.push(AmortizationEntry {
                month,
                emi,
                principal: principal_paid,
                interest,
                balance: balance.max(0.0),
            });
        }
    }

    Ok(LoanSchedule {
        emi,
        total_payment,
        total_interest,
        breakdown,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CreditPayoff {
    Payable {
        months_exact: f64,
        months: u32,
        total_interest: f64,
        total_paid: f64,
    },
    /// The payment does not cover the monthly interest, so the balance never shrinks.
    Unpayable { monthly_interest: f64 },
}

impl CreditPayoff {
    pub fn is_payable(&self) -> bool {
        matches!(self, CreditPayoff::Payable { .. })
    }

    pub fn results(&self) -> BTreeMap<String, f64> {
        match self {
            CreditPayoff::Payable {
                months_exact,
                months,
                total_interest,
                total_paid,
            } => named(&[
                ("payable", 1.0),
                ("months_exact", *months_exact),
                ("months", *months as f64),
                ("total_interest", *total_interest),
                ("total_paid", *total_paid),
            ]),
            CreditPayoff::Unpayable { monthly_interest } => named(&[
                ("payable", 0.0),
                ("monthly_interest", *monthly_interest),
            ]),
        }
    }
}

/// Months to clear a card balance with a fixed monthly payment.
pub fn credit_payoff(balance: f64, apr: f64, monthly_payment: f64) -> Result<CreditPayoff> {
    require_positive("balance", balance)?;
    require_non_negative("apr", apr)?;
    require_positive("monthly_payment", monthly_payment)?;

    let r = apr / 12.0 / 100.0;
    let monthly_interest = balance * r;
    if monthly_payment <= monthly_interest {
        warn!(balance, apr, monthly_payment, "payment does not cover monthly interest");
        return Ok(CreditPayoff::Unpayable { monthly_interest });
    }

    let months_exact = if r == 0.0 {
        balance / monthly_payment
    } else {
        (monthly_payment / (monthly_payment - monthly_interest)).ln() / (1.0 + r).ln()
    };
    if !months_exact.is_finite() {
        warn!(balance, apr, monthly_payment, "payoff horizon is not finite");
        return Ok(CreditPayoff::Unpayable { monthly_interest });
    }

    let months = months_exact.ceil() as u32;
    Ok(CreditPayoff::Payable {
        months_exact,
        months,
        total_interest: monthly_payment * months_exact - balance,
        total_paid: monthly_payment * months as f64,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InflationImpact {
    /// What `current_amount` will be worth in today's money after `years`.
    pub future_value: f64,
    pub purchasing_power_loss: f64,
}

impl InflationImpact {
    pub fn results(&self) -> BTreeMap<String, f64> {
        named(&[
            ("future_value", self.future_value),
            ("purchasing_power_loss", self.purchasing_power_loss),
        ])
    }
}

pub fn inflation(current_amount: f64, inflation_rate: f64, years: u32) -> Result<InflationImpact> {
    require_positive("current_amount", current_amount)?;
    require_non_negative("inflation_rate", inflation_rate)?;
    require_years(years)?;

    let future_value = current_amount / (1.0 + inflation_rate / 100.0).powi(years as i32);
    Ok(InflationImpact {
        future_value,
        purchasing_power_loss: current_amount - future_value,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FireInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub monthly_expenses: f64,
    pub current_savings: f64,
    pub monthly_savings: f64,
    pub expected_return: f64,
}

impl FireInputs {
    pub fn named(&self) -> BTreeMap<String, f64> {
        named(&[
            ("current_age", self.current_age as f64),
            ("retirement_age", self.retirement_age as f64),
            ("monthly_expenses", self.monthly_expenses),
            ("current_savings", self.current_savings),
            ("monthly_savings", self.monthly_savings),
            ("expected_return", self.expected_return),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FireProjection {
    pub years_to_retirement: u32,
    pub required_corpus: f64,
    pub projected_savings: f64,
    pub shortfall: f64,
    pub on_track: bool,
}

impl FireProjection {
    pub fn results(&self) -> BTreeMap<String, f64> {
        named(&[
            ("years_to_retirement", self.years_to_retirement as f64),
            ("required_corpus", self.required_corpus),
            ("projected_savings", self.projected_savings),
            ("shortfall", self.shortfall),
        ])
    }
}

/// Corpus needed to retire at `retirement_age` versus what current savings and
/// contributions grow to. Contributions are annualised and compounded yearly.
pub fn fire(inputs: &FireInputs) -> Result<FireProjection> {
    if inputs.retirement_age <= inputs.current_age {
        return Err(invalid(format!(
            "retirement_age ({}) must be greater than current_age ({})",
            inputs.retirement_age, inputs.current_age
        )));
    }
    require_positive("monthly_expenses", inputs.monthly_expenses)?;
    require_non_negative("current_savings", inputs.current_savings)?;
    require_non_negative("monthly_savings", inputs.monthly_savings)?;
    require_non_negative("expected_return", inputs.expected_return)?;

    let years = inputs.retirement_age - inputs.current_age;
    require_years(years)?;
    let required_corpus = inputs.monthly_expenses * 12.0 * FIRE_CORPUS_MULTIPLE;

    let r = inputs.expected_return / 100.0;
    let annual_contribution = inputs.monthly_savings * 12.0;
    let projected_savings = if r == 0.0 {
        inputs.current_savings + annual_contribution * years as f64
    } else {
        let growth = (1.0 + r).powi(years as i32);
        inputs.current_savings * growth + annual_contribution * (growth - 1.0) / r
    };

    let shortfall = (required_corpus - projected_savings).max(0.0);
    Ok(FireProjection {
        years_to_retirement: years,
        required_corpus,
        projected_savings,
        shortfall,
        on_track: shortfall == 0.0,
    })
}
