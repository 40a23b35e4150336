//! Property-based tests for the penalized and comparable objectives.

use linqaoa_core::{
    OutcomeDistribution, PenaltyWeight, ProblemInstance, Selection, comparable_value, expectation,
    penalized_value, solve_exact,
};
use proptest::prelude::*;

/// Small instances with integral costs and weights.
fn arb_instance() -> impl Strategy<Value = ProblemInstance> {
    (1_usize..=6).prop_flat_map(|n| {
        (
            prop::collection::vec(1_u32..=9, n),
            prop::collection::vec(0_u32..=9, n),
            1_u32..=20,
        )
            .prop_map(|(costs, weights, capacity)| {
                ProblemInstance::new(
                    costs.into_iter().map(f64::from).collect(),
                    weights.into_iter().map(f64::from).collect(),
                    f64::from(capacity),
                )
                .unwrap()
            })
    })
}

fn arb_instance_and_selection() -> impl Strategy<Value = (ProblemInstance, Selection)> {
    arb_instance().prop_flat_map(|problem| {
        let n = problem.item_count();
        (Just(problem), (0_u64..(1 << n)).prop_map(move |i| Selection::from_index(i, n)))
    })
}

proptest! {
    #[test]
    fn no_penalty_at_or_under_capacity(
        (problem, selection) in arb_instance_and_selection(),
        a in 0_u64..50,
    ) {
        prop_assume!(problem.is_feasible(&selection));
        let a = PenaltyWeight::integer(a);
        prop_assert_eq!(penalized_value(&selection, &problem, a), problem.value_of(&selection));
    }

    #[test]
    fn linear_penalty_over_capacity(
        (problem, selection) in arb_instance_and_selection(),
        a in 1_u64..50,
    ) {
        prop_assume!(!problem.is_feasible(&selection));
        let a = PenaltyWeight::integer(a);
        let time = problem.value_of(&selection);
        let excess = problem.weight_of(&selection) - problem.capacity();
        let score = penalized_value(&selection, &problem, a);
        prop_assert!((score - (time - a.value() * excess)).abs() < 1e-9);
        prop_assert!(score < time);
    }

    #[test]
    fn comparable_value_bounded_by_optimum((problem, selection) in arb_instance_and_selection()) {
        let best = solve_exact(&problem).unwrap().best_value;
        let score = comparable_value(&selection, &problem);
        prop_assert!(score >= 0.0);
        prop_assert!(score <= best + 1e-9);
    }

    #[test]
    fn point_mass_expectation_is_pointwise_score((problem, selection) in arb_instance_and_selection()) {
        let dist = OutcomeDistribution::from_probabilities([(selection.to_bitstring(), 1.0)]).unwrap();
        let objective = |bitstring: &str| {
            Selection::from_bitstring(bitstring, problem.item_count())
                .map_or(f64::NAN, |s| comparable_value(&s, &problem))
        };
        let e = expectation(&dist, &objective).unwrap();
        prop_assert_eq!(e, comparable_value(&selection, &problem));
    }

    #[test]
    fn penalty_weight_round_trips_through_f64(num in 0_u64..1000, den in 1_u64..1000) {
        let a = PenaltyWeight::ratio(num, den).unwrap();
        let b = PenaltyWeight::from_f64(a.value()).unwrap();
        prop_assert_eq!(a.numerator(), b.numerator());
        prop_assert_eq!(a.denominator(), b.denominator());
    }
}
