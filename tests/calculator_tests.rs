// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finsight::calculators::{
    self, CreditPayoff, FIRE_CORPUS_MULTIPLE, FireInputs,
};
use finsight::error::Error;

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn sip_grows_beyond_contributions() {
    let p = calculators::sip(5000.0, 12.0, 10).unwrap();
    assert_eq!(p.total_investment, 600_000.0);
    assert!(p.total_value > p.total_investment);
    assert!(p.total_value > 1_160_000.0 && p.total_value < 1_163_000.0);
    assert!(close(
        p.estimated_returns,
        p.total_value - p.total_investment,
        1e-6
    ));

    assert_eq!(p.yearly_breakdown.len(), 10);
    let last = p.yearly_breakdown.last().unwrap();
    assert_eq!(last.year, 10);
    assert!(close(last.value, p.total_value, 1e-6));
    assert!(
        p.yearly_breakdown
            .windows(2)
            .all(|w| w[1].value > w[0].value)
    );
}

#[test]
fn sip_at_zero_rate_returns_contributions() {
    let p = calculators::sip(2500.0, 0.0, 3).unwrap();
    assert!(p.total_value.is_finite());
    assert_eq!(p.total_value, p.total_investment);
    assert_eq!(p.total_investment, 90_000.0);
    assert_eq!(p.estimated_returns, 0.0);
}

#[test]
fn lumpsum_compounds_annually() {
    let p = calculators::lumpsum(100_000.0, 10.0, 2).unwrap();
    assert_eq!(p.total_investment, 100_000.0);
    assert!(close(p.total_value, 121_000.0, 1e-6));
    assert!(close(p.estimated_returns, 21_000.0, 1e-6));

    let flat = calculators::lumpsum(100_000.0, 0.0, 5).unwrap();
    assert_eq!(flat.total_value, 100_000.0);
}

#[test]
fn emi_matches_reference_loan() {
    let s = calculators::emi(1_000_000.0, 8.5, 20).unwrap();
    assert!(close(s.emi, 8678.23, 0.5));
    assert_eq!(s.total_payment, s.emi * 240.0);
    assert!(close(s.total_interest, s.total_payment - 1_000_000.0, 1e-6));

    // month 1, every twelfth month through 240
    assert_eq!(s.breakdown.len(), 21);
    assert_eq!(s.breakdown[0].month, 1);
    assert_eq!(s.breakdown.last().unwrap().month, 240);
    assert!(s.breakdown.last().unwrap().balance < 0.01);
    assert!(s.breakdown.iter().all(|e| e.balance >= 0.0));
    assert!(s.breakdown[0].interest > s.breakdown[0].principal);
}

#[test]
fn emi_at_zero_rate_divides_evenly() {
    let s = calculators::emi(120_000.0, 0.0, 1).unwrap();
    assert!(s.emi.is_finite());
    assert!(close(s.emi, 10_000.0, 1e-9));
    assert!(close(s.total_interest, 0.0, 1e-6));
    assert!(s.breakdown.last().unwrap().balance < 1e-6);
}

#[test]
fn credit_payoff_reports_months_and_totals() {
    let outcome = calculators::credit_payoff(50_000.0, 36.0, 5000.0).unwrap();
    assert!(outcome.is_payable());
    match outcome {
        CreditPayoff::Payable {
            months_exact,
            months,
            total_interest,
            total_paid,
        } => {
            assert_eq!(months, 13);
            assert!(months_exact > 12.0 && months_exact < 13.0);
            assert_eq!(total_paid, 65_000.0);
            assert!(total_interest > 0.0 && total_interest < total_paid - 50_000.0);
        }
        CreditPayoff::Unpayable { .. } => panic!("expected payable"),
    }
}

#[test]
fn credit_payoff_flags_payment_below_interest() {
    let outcome = calculators::credit_payoff(50_000.0, 36.0, 1000.0).unwrap();
    match &outcome {
        CreditPayoff::Unpayable { monthly_interest } => {
            assert!(close(*monthly_interest, 1500.0, 1e-6));
        }
        CreditPayoff::Payable { .. } => panic!("expected unpayable"),
    }
    assert_eq!(outcome.results().get("payable"), Some(&0.0));

    // paying exactly the interest never reduces the balance
    let outcome = calculators::credit_payoff(1000.0, 12.0, 10.0).unwrap();
    assert!(!outcome.is_payable());
}

#[test]
fn credit_payoff_without_interest() {
    let outcome = calculators::credit_payoff(1200.0, 0.0, 100.0).unwrap();
    match outcome {
        CreditPayoff::Payable {
            months,
            total_interest,
            ..
        } => {
            assert_eq!(months, 12);
            assert!(close(total_interest, 0.0, 1e-9));
        }
        CreditPayoff::Unpayable { .. } => panic!("expected payable"),
    }
}

#[test]
fn inflation_discounts_future_value() {
    let impact = calculators::inflation(100_000.0, 6.0, 10).unwrap();
    assert!(close(impact.future_value, 55_839.48, 0.01));
    assert!(close(
        impact.purchasing_power_loss,
        100_000.0 - impact.future_value,
        1e-9
    ));

    let none = calculators::inflation(100_000.0, 0.0, 10).unwrap();
    assert_eq!(none.future_value, 100_000.0);
    assert_eq!(none.purchasing_power_loss, 0.0);
}

fn fire_inputs() -> FireInputs {
    FireInputs {
        current_age: 30,
        retirement_age: 45,
        monthly_expenses: 50_000.0,
        current_savings: 500_000.0,
        monthly_savings: 30_000.0,
        expected_return: 12.0,
    }
}

#[test]
fn fire_on_track_when_projection_covers_corpus() {
    let p = calculators::fire(&fire_inputs()).unwrap();
    assert_eq!(p.years_to_retirement, 15);
    assert_eq!(p.required_corpus, 50_000.0 * 12.0 * FIRE_CORPUS_MULTIPLE);
    assert!(p.projected_savings > p.required_corpus);
    assert_eq!(p.shortfall, 0.0);
    assert!(p.on_track);
}

#[test]
fn fire_reports_shortfall() {
    let inputs = FireInputs {
        current_savings: 0.0,
        monthly_savings: 0.0,
        ..fire_inputs()
    };
    let p = calculators::fire(&inputs).unwrap();
    assert_eq!(p.projected_savings, 0.0);
    assert_eq!(p.shortfall, p.required_corpus);
    assert!(!p.on_track);

    let flat = FireInputs {
        expected_return: 0.0,
        ..fire_inputs()
    };
    let p = calculators::fire(&flat).unwrap();
    assert_eq!(p.projected_savings, 500_000.0 + 30_000.0 * 12.0 * 15.0);
}

#[test]
fn invalid_inputs_are_rejected() {
    let cases: Vec<Result<(), Error>> = vec![
        calculators::sip(0.0, 12.0, 10).map(|_| ()),
        calculators::sip(5000.0, -1.0, 10).map(|_| ()),
        calculators::sip(5000.0, 12.0, 0).map(|_| ()),
        calculators::lumpsum(-10.0, 8.0, 5).map(|_| ()),
        calculators::emi(f64::NAN, 8.0, 5).map(|_| ()),
        calculators::credit_payoff(1000.0, 18.0, 0.0).map(|_| ()),
        calculators::inflation(1000.0, 6.0, 0).map(|_| ()),
        calculators::fire(&FireInputs {
            retirement_age: 30,
            ..fire_inputs()
        })
        .map(|_| ()),
    ];
    for result in cases {
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}

#[test]
fn results_maps_carry_headline_numbers() {
    let p = calculators::sip(1000.0, 10.0, 1).unwrap();
    let results = p.results();
    assert_eq!(results.get("total_investment"), Some(&12_000.0));
    assert!(results.contains_key("total_value"));
    assert!(results.contains_key("estimated_returns"));
}

#[test]
fn horizons_beyond_the_limit_are_rejected() {
    let too_long = calculators::MAX_YEARS + 1;
    let cases: Vec<Result<(), Error>> = vec![
        calculators::sip(100.0, 0.0, 400_000_000).map(|_| ()),
        calculators::sip(100.0, 12.0, too_long).map(|_| ()),
        calculators::lumpsum(100.0, 8.0, u32::MAX).map(|_| ()),
        calculators::emi(1000.0, 5.0, 400_000_000).map(|_| ()),
        calculators::inflation(1000.0, 6.0, too_long).map(|_| ()),
        calculators::fire(&FireInputs {
            current_age: 0,
            retirement_age: 3_000_000_000,
            current_savings: 1000.0,
            monthly_savings: 10.0,
            expected_return: 5.0,
            ..fire_inputs()
        })
        .map(|_| ()),
    ];
    for result in cases {
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    let longest = calculators::sip(100.0, 12.0, calculators::MAX_YEARS).unwrap();
    assert_eq!(longest.yearly_breakdown.len(), calculators::MAX_YEARS as usize);
    assert!(longest.total_value.is_finite());
    let p = calculators::fire(&FireInputs {
        current_age: 0,
        retirement_age: calculators::MAX_YEARS,
        ..fire_inputs()
    })
    .unwrap();
    assert!(p.projected_savings > 0.0);
}
