use approx::assert_abs_diff_eq;
use flipbook::prelude::*;
use flipbook::ConfigError;

const DELTA: f64 = 0.01;

fn range(min_x: f64, max_x: f64, start_y: f64, end_y: f64) -> CalculatorRange {
    CalculatorRange::new()
        .x_range(min_x, max_x)
        .y_range(start_y, end_y)
}

mod single {
    use super::*;

    #[test]
    fn when_min_x_exceeds_max_x_then_fails() {
        assert!(Calculator::new(range(1.0, 0.0, 0.0, 1.0)).is_err());
    }

    #[test]
    fn when_start_y_exceeds_end_y_then_succeeds() {
        assert!(Calculator::new(range(0.0, 1.0, 1.0, 0.0)).is_ok());
    }

    #[test]
    fn maps_unit_range() {
        let calculator = Calculator::new(range(0.0, 1.0, 0.0, 1.0)).unwrap();

        assert_eq!(calculator.calculate(-0.1), 0.0);
        assert_eq!(calculator.calculate(1.1), 1.0);
        assert_samples(
            |x| calculator.calculate(x),
            &[(0.0, 0.0), (0.25, 0.25), (0.5, 0.5), (0.75, 0.75), (1.0, 1.0)],
        );
    }

    #[test]
    fn maps_increasing_output_ranges() {
        let calculator = Calculator::new(range(0.0, 1.0, 0.0, 100.0)).unwrap();
        assert_samples(
            |x| calculator.calculate(x),
            &[(-0.1, 0.0), (0.25, 25.0), (0.5, 50.0), (0.75, 75.0), (1.1, 100.0)],
        );

        let calculator = Calculator::new(range(0.0, 1.0, -100.0, 100.0)).unwrap();
        assert_samples(
            |x| calculator.calculate(x),
            &[(-0.1, -100.0), (0.25, -50.0), (0.5, 0.0), (0.75, 50.0), (1.1, 100.0)],
        );
    }

    #[test]
    fn maps_decreasing_output_ranges() {
        let calculator = Calculator::new(range(0.0, 1.0, 1.0, 0.0)).unwrap();
        assert_eq!(calculator.calculate(-0.1), 1.0);
        assert_eq!(calculator.calculate(1.1), 0.0);
        assert_samples(
            |x| calculator.calculate(x),
            &[(0.25, 0.75), (0.5, 0.5), (0.75, 0.25)],
        );

        let calculator = Calculator::new(range(0.0, 1.0, 100.0, -100.0)).unwrap();
        assert_samples(
            |x| calculator.calculate(x),
            &[(-0.1, 100.0), (0.25, 50.0), (0.5, 0.0), (0.75, -50.0), (1.1, -100.0)],
        );

        let calculator = Calculator::new(range(0.0, 1.0, 0.0, -100.0)).unwrap();
        assert_samples(
            |x| calculator.calculate(x),
            &[(-0.1, 0.0), (0.25, -25.0), (0.5, -50.0), (0.75, -75.0), (1.1, -100.0)],
        );
    }

    #[test]
    fn maps_wide_input_ranges() {
        let calculator = Calculator::new(range(0.0, 100.0, 0.0, 1.0)).unwrap();
        assert_samples(
            |x| calculator.calculate(x),
            &[(-10.0, 0.0), (25.0, 0.25), (50.0, 0.5), (75.0, 0.75), (110.0, 1.0)],
        );

        let calculator = Calculator::new(range(-100.0, 100.0, 0.0, 1.0)).unwrap();
        assert_samples(
            |x| calculator.calculate(x),
            &[(-110.0, 0.0), (-50.0, 0.25), (0.0, 0.5), (50.0, 0.75), (110.0, 1.0)],
        );
    }

    #[test]
    fn applies_easing_to_input_position() {
        let calculator =
            Calculator::new(range(0.0, 100.0, 0.0, 100.0).easing(Easing::InQuad)).unwrap();

        assert_eq!(calculator.calculate(100.0), 100.0);
        assert_samples(
            |x| calculator.calculate(x),
            &[(-10.0, 0.0), (25.0, 6.25), (50.0, 25.0), (75.0, 56.25), (110.0, 100.0)],
        );
    }

    #[test]
    fn when_input_range_is_single_point_then_output_saturates() {
        let calculator =
            Calculator::new(range(0.0, 0.0, 0.0, 100.0).easing(Easing::InQuad)).unwrap();

        assert_eq!(calculator.calculate(-10.0), 100.0);
        assert_eq!(calculator.calculate(0.0), 100.0);
        assert_eq!(calculator.calculate(110.0), 100.0);
    }
}

mod composite {
    use super::*;

    #[test]
    fn when_any_min_x_exceeds_max_x_then_fails() {
        assert!(CompositeCalculator::new([
            range(0.0, 1.0, 0.0, 1.0),
            range(1.0, 0.0, 0.0, 1.0),
        ])
        .is_err());
        assert!(matches!(
            CompositeCalculator::new([range(1.0, 0.0, 0.0, 1.0), range(0.0, 1.0, 0.0, 1.0)]),
            Err(ConfigError::InvertedRange {
                index: Some(0),
                count: 2,
                ..
            })
        ));
    }

    #[test]
    fn when_ranges_share_start_then_later_range_wins() {
        let calculator =
            CompositeCalculator::new([range(0.0, 1.0, 0.0, 100.0), range(0.0, 1.0, 0.0, 1.0)])
                .unwrap();

        assert_eq!(calculator.calculate(-0.1), 0.0);
        assert_eq!(calculator.calculate(1.1), 1.0);
        assert_samples(
            |x| calculator.calculate(x),
            &[(0.25, 0.25), (0.5, 0.5), (0.75, 0.75)],
        );

        let calculator =
            CompositeCalculator::new([range(0.0, 1.0, 0.0, 1.0), range(0.0, 1.0, 100.0, -100.0)])
                .unwrap();

        assert_samples(
            |x| calculator.calculate(x),
            &[(-0.1, 100.0), (0.25, 50.0), (0.5, 0.0), (0.75, -50.0), (1.1, -100.0)],
        );
    }

    #[test]
    fn domain_covers_widest_range() {
        let calculator =
            CompositeCalculator::new([range(0.0, 1.0, 0.0, 1.0), range(-100.0, 100.0, 0.0, 1.0)])
                .unwrap();

        assert_samples(
            |x| calculator.calculate(x),
            &[(-110.0, 0.0), (-50.0, 0.25), (0.0, 0.5), (50.0, 0.75), (110.0, 1.0)],
        );
    }

    #[test]
    fn applies_easing_of_selected_range() {
        let calculator = CompositeCalculator::new([
            range(0.0, 1.0, 0.0, 1.0),
            range(0.0, 100.0, 0.0, 100.0).easing(Easing::InQuad),
        ])
        .unwrap();

        assert_samples(
            |x| calculator.calculate(x),
            &[(-10.0, 0.0), (25.0, 6.25), (50.0, 25.0), (75.0, 56.25), (110.0, 100.0)],
        );
    }

    #[test]
    fn when_last_range_is_single_point_then_it_applies_from_its_start() {
        let calculator =
            CompositeCalculator::new([range(0.0, 1.0, 0.0, 1.0), range(1.0, 1.0, -100.0, 100.0)])
                .unwrap();

        assert_eq!(calculator.calculate(-0.1), 0.0);
        assert_samples(
            |x| calculator.calculate(x),
            &[(0.25, 0.25), (0.5, 0.5), (0.75, 0.75)],
        );
        assert_eq!(calculator.calculate(1.0), 100.0);
        assert_eq!(calculator.calculate(1.1), 100.0);
    }

    #[test]
    fn when_ranges_are_disjoint_then_gap_holds_previous_end() {
        let calculator =
            CompositeCalculator::new([range(0.0, 0.4, -100.0, -50.0), range(0.6, 1.0, 50.0, 100.0)])
                .unwrap();

        assert_eq!(calculator.calculate(-0.1), -100.0);
        assert_eq!(calculator.calculate(1.1), 100.0);
        assert_samples(
            |x| calculator.calculate(x),
            &[
                (0.0, -100.0),
                (0.2, -75.0),
                (0.4, -50.0),
                (0.5, -50.0),
                (0.6, 50.0),
                (0.8, 75.0),
                (1.0, 100.0),
            ],
        );
    }

    #[test]
    fn shapes_animation_progress() {
        let calculator =
            CompositeCalculator::new([range(0.0, 0.5, 0.0, 1.0), range(0.5, 1.0, 1.0, 0.0)])
                .unwrap();
        let easing = Easing::custom(calculator);

        assert_abs_diff_eq!(easing.calc(0.25), 0.5, epsilon = DELTA);
        assert_abs_diff_eq!(easing.calc(0.5), 1.0, epsilon = DELTA);
        assert_abs_diff_eq!(easing.calc(0.75), 0.5, epsilon = DELTA);
    }
}

fn assert_samples(calculate: impl Fn(f64) -> f64, samples: &[(f64, f64)]) {
    for &(x, expected) in samples {
        let actual = calculate(x);
        assert!(
            (actual - expected).abs() <= DELTA,
            "calculate({x}) = {actual}, expected {expected}"
        );
    }
}
