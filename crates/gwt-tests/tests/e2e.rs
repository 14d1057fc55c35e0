//! End-to-end integration tests for the GWT economic model.
//!
//! Each test drives several crates together: chain points through experience
//! and level to daily income, and capacity readings through reward-rate
//! evolution into snapshot histories that settle real withdrawals.

use std::sync::Arc;
use std::thread;

use gwt_core::constants::{GIB, MIB};
use gwt_core::error::{ScoreError, SettlementError};
use gwt_core::types::{Ledger, Usage};
use gwt_reward::carve::{FlatCarve, SizeScaledCarve};
use gwt_reward::ledger::SharedLedger;
use gwt_reward::mining::{mine_gwt, ratio_sweep, reward_ratio};
use gwt_reward::rate::{RateBranch, calc_reward_rate};
use gwt_reward::settlement::SettlementEngine;
use gwt_score::{ExperienceCalculator, FixedPoints, INCOME_TABLE, LEVEL_TABLE, daily_income_for_exp};
use gwt_tests::helpers::*;

// ======================================================================
// Scoring pipeline
// Chain points -> experience -> level -> daily income.
// ======================================================================

#[test]
fn eth_shows_map_to_daily_income() {
    let mut eth = FixedPoints::new("eth");
    for shows in 0..=6u64 {
        eth.set(mix(shows as u8), shows);
    }
    let calc = ExperienceCalculator::single(eth);

    let expected = [500, 1000, 1500, 2000, 2000, 3000, 3000];
    for (shows, want) in expected.iter().enumerate() {
        let exp = calc.experience(&mix(shows as u8)).unwrap();
        assert_eq!(exp, 1 + 8 * shows as u64);
        assert_eq!(daily_income_for_exp(exp).unwrap(), *want, "shows={shows}");
    }
}

#[test]
fn weighted_chains_combine_before_levelling() {
    let item = mix(7);
    let calc = ExperienceCalculator::new()
        .with_source(FixedPoints::new("eth").with(item, 1), 1.0)
        .unwrap()
        .with_source(FixedPoints::new("bsc").with(item, 2), 0.5)
        .unwrap();
    assert_eq!(calc.source_count(), 2);

    // 1 + floor(8 * (1 + 2 * 0.5)) = 17
    let exp = calc.experience(&item).unwrap();
    assert_eq!(exp, 17);
    let level = LEVEL_TABLE.level_for_exp(exp).unwrap();
    assert_eq!(level, 3);
    assert_eq!(INCOME_TABLE.income_for_level(level), 1500);
}

#[test]
fn unknown_item_earns_level_one_income() {
    let calc = ExperienceCalculator::single(FixedPoints::new("eth").with(mix(1), 10));
    let exp = calc.experience(&mix(2)).unwrap();
    assert_eq!(exp, 1);
    assert_eq!(daily_income_for_exp(exp).unwrap(), 500);
}

#[test]
fn zero_experience_is_rejected_end_to_end() {
    assert_eq!(
        daily_income_for_exp(0).unwrap_err(),
        ScoreError::ExperienceBelowTable(0)
    );
}

// ======================================================================
// Mining ratio
// Capacity sweeps feed the saturating mining curve.
// ======================================================================

#[test]
fn ratio_sweep_agrees_with_mine_curve() {
    let samples = ratio_sweep(MIB, MIB, 16 * MIB).unwrap();
    assert!(!samples.is_empty());
    for s in &samples {
        let direct = reward_ratio(s.last_size, s.this_size).unwrap();
        assert_eq!(s.ratio, direct);
        let x = s.this_size as f64 / s.last_size as f64 - 1.0;
        let expected = if s.this_size as f64 > s.last_size as f64 * 1.02 {
            mine_gwt(x).unwrap()
        } else {
            mine_gwt(0.02).unwrap()
        };
        assert!((s.ratio - expected).abs() < 1e-12, "{s:?}");
    }
    // Doubling is the strongest relative growth in the sweep.
    assert!(samples[0].ratio >= samples[samples.len() - 1].ratio);
}

// ======================================================================
// Reward-rate evolution
// Every branch of the rate update, in one capacity series.
// ======================================================================

#[test]
fn rate_series_walks_every_branch() {
    let carve = FlatCarve { floor: 0.01 };
    let sizes = [2_000_000u64, 2_000_000, 2_001_000, 2_000_500, 1_000_000, 2_000_000];
    let expected = [
        RateBranch::Steady,
        RateBranch::GrowthCompound,
        RateBranch::Decay,
        RateBranch::FloorReset,
        RateBranch::GrowthOvertake,
    ];

    let mut rate = 2.0;
    let mut rates = vec![rate];
    for (pair, branch) in sizes.windows(2).zip(expected) {
        let update = calc_reward_rate(pair[0], pair[1], rate, &carve).unwrap();
        assert_eq!(update.branch, branch, "{} -> {}", pair[0], pair[1]);
        assert!(update.rate >= 0.0);
        rate = update.rate;
        rates.push(rate);
    }

    let g = 1000.0 * 336.0 * 4.0 / 2_001_000.0;
    let d = 500.0 * 336.0 * 4.0 / 2_000_500.0;
    assert_eq!(rates[1], 2.0);
    assert!(approx_eq(rates[2], 2.0 * (1.0 + g), 2.0));
    assert!(approx_eq(rates[3], rates[2] * (1.0 - d), 2.0));
    assert_eq!(rates[4], 0.01);
    assert!(approx_eq(rates[5], 672.0, 672.0));
}

// ======================================================================
// Settlement over an evolving network
// ======================================================================

#[test]
fn successive_withdrawals_conserve_minted_reward() {
    let carve = FlatCarve { floor: 0.01 };
    let capacities = [GIB, 2 * GIB, 2 * GIB, 3 * GIB / 2, 3 * GIB / 2];
    let history = evolve_history(&capacities, 3600, 0.1, 1.0, 1.0, &carve).unwrap();
    assert_eq!(history.len(), capacities.len());

    let engine = SettlementEngine::new(history, carve);
    let order = order(1e-9, 1.0, MIB);
    let mut usage = Usage {
        size: MIB,
        last_withdraw: 0,
    };
    let mut ledger = Ledger::new();

    let mut minted = 0.0;
    let mut income = 0.0;
    let mut supply_rewards = 0.0;
    for now in [3600, 7200, 10_800, 14_400, 20_000] {
        let s = engine.withdraw(&order, &mut usage, now, &mut ledger).unwrap();
        assert_eq!(usage.last_withdraw, now);
        assert!(s.reward >= 0.0);
        // Equal daemon and supply weights split the reward evenly.
        assert!(approx_eq(s.daemon_reward, s.supply_reward, s.reward));
        minted += s.reward;
        income += s.income;
        supply_rewards += s.supply_reward;
    }

    assert!(approx_eq(ledger.total(), minted, minted));
    assert!(approx_eq(income, 1e-9 * MIB as f64 * 20_000.0, income));
    assert!(approx_eq(ledger.supply - supply_rewards, income, income));
    assert!(approx_eq(ledger.system, -income + (minted - ledger.daemon - supply_rewards), minted));
}

#[test]
fn size_scaled_carve_dilutes_reward_as_network_grows() {
    let carve = SizeScaledCarve {
        pivot: GIB,
        floor: 0.0,
    };
    let small = evolve_history(&[GIB, GIB], 3600, 0.5, 1.0, 1.0, &carve).unwrap();
    let large = evolve_history(&[4 * GIB, 4 * GIB], 3600, 0.5, 1.0, 1.0, &carve).unwrap();

    let order = order(1e-9, 1.0, MIB);
    let usage = Usage {
        size: MIB,
        last_withdraw: 0,
    };
    let s_small = SettlementEngine::new(small, carve).settle(&order, &usage, 3600).unwrap();
    let s_large = SettlementEngine::new(large, carve).settle(&order, &usage, 3600).unwrap();

    assert_eq!(s_small.income, s_large.income);
    assert!(s_large.reward < s_small.reward);
    // pivot / (pivot + total): 1/2 versus 1/5.
    assert!(approx_eq(s_small.reward / s_large.reward, 2.5, 2.5));
}

#[test]
fn failed_withdrawal_leaves_state_untouched() {
    let carve = FlatCarve { floor: 0.0 };
    let history = evolve_history(&[GIB, GIB], 3600, 0.1, 1.0, 1.0, &carve).unwrap();
    let engine = SettlementEngine::new(history, carve);
    let order = order(1e-9, 1.0, MIB);
    let mut usage = Usage {
        size: MIB,
        last_withdraw: 7200,
    };
    let mut ledger = Ledger {
        system: 10.0,
        daemon: 0.0,
        supply: 0.0,
    };

    let err = engine.withdraw(&order, &mut usage, 3600, &mut ledger).unwrap_err();
    assert!(matches!(err, SettlementError::Domain(_)));
    assert_eq!(usage.last_withdraw, 7200);
    assert_eq!(ledger.system, 10.0);
}

#[test]
fn withdrawal_before_first_snapshot_fails() {
    let carve = FlatCarve { floor: 0.0 };
    let mut history = gwt_reward::history::SnapshotHistory::new();
    history
        .record(
            100,
            gwt_core::types::SystemState {
                total_size: GIB,
                reward_rate: 0.1,
                daemon_rate: 1.0,
                supply_rate: 1.0,
            },
        )
        .unwrap();
    let engine = SettlementEngine::new(history, carve);
    let usage = Usage {
        size: MIB,
        last_withdraw: 50,
    };
    let err = engine.settle(&order(1e-9, 1.0, MIB), &usage, 200).unwrap_err();
    assert_eq!(err, SettlementError::MissingSnapshot(50));
}

// ======================================================================
// Concurrent settlement into a shared ledger
// ======================================================================

#[test]
fn concurrent_settlements_share_one_ledger() {
    let carve = FlatCarve { floor: 0.01 };
    let history = evolve_history(&[GIB, 2 * GIB, 3 * GIB], 3600, 0.1, 2.0, 1.0, &carve).unwrap();
    let engine = Arc::new(SettlementEngine::new(history, carve));
    let shared = SharedLedger::new(Ledger::new());

    let handles: Vec<_> = (1..=4u64)
        .map(|i| {
            let engine = Arc::clone(&engine);
            let shared = shared.clone();
            thread::spawn(move || {
                let order = order(1e-9 * i as f64, 1.0, i * MIB);
                let usage = Usage {
                    size: i * MIB,
                    last_withdraw: 0,
                };
                let s = engine.settle(&order, &usage, 7200).unwrap();
                shared.apply(&s.delta);
                s.reward
            })
        })
        .collect();

    let minted: f64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    let snap = shared.snapshot();
    assert!(minted > 0.0);
    assert!(approx_eq(snap.total(), minted, minted));
    // Daemon weight 2 against supply weight 1.
    assert!(approx_eq(snap.daemon, minted * 2.0 / 3.0, minted));
}
