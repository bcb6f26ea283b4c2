//! Statistical checks of the host reveal and the trial simulator.

use monty_engine::{DoorCount, Round, Seed, SimulationError, Strategy, TrialMode, TrialSimulator};
use monty_stats::{
    chi_square::{GoodnessOfFit, Significance},
    proportion::ProportionEstimate,
};
use rand::Rng as _;

#[test]
fn classic_wrong_pick_reveals_the_last_goat() {
    let mut round = Round::with_prize(DoorCount::CLASSIC, 2, Seed::ZERO).unwrap();
    round.pick(1).unwrap();
    assert_eq!(round.revealed_doors().collect::<Vec<_>>(), [3]);

    let outcome = round.decide(Strategy::Switch).unwrap();
    assert_eq!(outcome.final_pick, 2);
    assert!(outcome.win);
}

#[test]
fn classic_right_pick_switches_to_a_goat() {
    for n in 0..32 {
        let mut round = Round::with_prize(DoorCount::CLASSIC, 2, Seed::from_bytes([n; 16])).unwrap();
        round.pick(2).unwrap();
        let revealed = round.revealed_doors().collect::<Vec<_>>();
        assert_eq!(revealed.len(), 1);
        assert!(revealed[0] == 1 || revealed[0] == 3);

        let outcome = round.decide(Strategy::Switch).unwrap();
        assert_eq!(outcome.final_pick, 4 - revealed[0]);
        assert!(!outcome.win);
    }
}

#[test]
fn right_pick_leaves_a_uniform_alternative() {
    const RUNS: usize = 10_000;
    let door_count = DoorCount::new(5).unwrap();
    let pick = 3;

    let mut seeds = Seed::from_bytes([42; 16]).rng();
    let mut counts = [0u64; 5];
    for _ in 0..RUNS {
        let mut round = Round::with_prize(door_count, pick, seeds.random()).unwrap();
        round.pick(pick).unwrap();
        let closed = round.closed_alternative().unwrap();
        counts[closed - 1] += 1;
    }
    assert_eq!(counts[pick - 1], 0);

    let observed = counts
        .iter()
        .enumerate()
        .filter(|(i, _)| i + 1 != pick)
        .map(|(_, &count)| count)
        .collect::<Vec<_>>();
    #[expect(clippy::cast_precision_loss)]
    let expected = vec![RUNS as f64 / 4.0; 4];
    let fit = GoodnessOfFit::test(&observed, &expected, Significance::P001).unwrap();
    assert!(
        fit.is_consistent(),
        "chi2 = {} exceeds {} for {observed:?}",
        fit.statistic,
        fit.critical_value
    );
}

#[test]
fn classic_rates_match_theory() {
    for mode in [TrialMode::Shortcut, TrialMode::FullRound] {
        let batch = TrialSimulator::with_seed(Seed::from_bytes([7; 16]))
            .mode(mode)
            .run(3, 10_000)
            .unwrap();
        assert!((batch.stay_win_rate - 1.0 / 3.0).abs() < 0.02, "{mode}");
        assert!((batch.switch_win_rate - 2.0 / 3.0).abs() < 0.02, "{mode}");

        for strategy in Strategy::ALL {
            let estimate = ProportionEstimate::new(batch.wins(strategy), batch.trial_count).unwrap();
            let theory = batch.theoretical_win_rate(strategy);
            assert!(
                (estimate.rate - theory).abs() < 4.0 * estimate.std_error,
                "{mode} {strategy:?}: {} vs {theory}",
                estimate.rate
            );
        }
    }
}

#[test]
fn full_round_agrees_with_shortcut_for_many_doors() {
    let seed = Seed::from_bytes([9; 16]);
    let shortcut = TrialSimulator::with_seed(seed).run(10, 20_000).unwrap();
    let full_round = TrialSimulator::with_seed(seed)
        .mode(TrialMode::FullRound)
        .run(10, 20_000)
        .unwrap();

    for strategy in Strategy::ALL {
        let a = shortcut.win_rate(strategy);
        let b = full_round.win_rate(strategy);
        assert!((a - b).abs() < 0.02, "{strategy:?}: {a} vs {b}");
    }
}

#[test]
fn zero_trials_are_rejected() {
    let mut simulator = TrialSimulator::with_seed(Seed::ZERO);
    assert_eq!(
        simulator.run(3, 0),
        Err(SimulationError::InvalidTrialCount)
    );
    assert_eq!(
        monty_engine::run_trials(100, 0),
        Err(SimulationError::InvalidTrialCount)
    );
}

#[test]
fn seeded_runs_are_reproducible() {
    let seed: Seed = "00112233445566778899aabbccddeeff".parse().unwrap();
    for mode in [TrialMode::Shortcut, TrialMode::FullRound] {
        let a = TrialSimulator::with_seed(seed).mode(mode).run(4, 2_000).unwrap();
        let b = TrialSimulator::with_seed(seed).mode(mode).run(4, 2_000).unwrap();
        assert_eq!(a, b);
    }
}
