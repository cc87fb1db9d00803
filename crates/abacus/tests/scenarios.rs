//! End-to-end scenarios through the standard registry.

use abacus::methods::{addition::KahanSummation, division::NewtonRaphson};
use abacus::{
    Answer, ArithmeticMethod, EngineConfig, Error, MethodRegistry, Operation, StepKind, StepValue,
    ITERATIVE_EPSILON,
};

fn registry() -> MethodRegistry {
    MethodRegistry::standard(&EngineConfig::default()).expect("default config is valid")
}

#[test]
fn standard_addition_shows_both_carries() {
    let result = registry()
        .solve(Operation::Addition, "standard", 247.0, 185.0)
        .expect("valid operands");

    assert_eq!(result.final_answer, Answer::Number(432.0));
    assert_eq!(result.verification.correct, Some(true));
    assert_eq!(result.verification.expected, Some(Answer::Number(432.0)));

    let columns: Vec<_> = result.steps_of(StepKind::Calculation).collect();
    assert_eq!(columns[0].calculation, "7 + 5 = 12");
    assert_eq!(columns[0].result.field("carry"), Some(1.0));
    assert_eq!(columns[1].calculation, "4 + 8 + 1 = 13");
    assert_eq!(columns[1].result.field("carry"), Some(1.0));

    let last = result.steps.last().expect("non-empty trace");
    assert_eq!(last.kind, StepKind::Result);
    assert_eq!(last.result, StepValue::Number(432.0));
}

#[test]
fn kahan_point_one_plus_point_two() {
    let result = registry()
        .solve(Operation::Addition, "kahan", 0.1, 0.2)
        .expect("valid operands");
    let answer = result.answer().expect("numeric answer");
    assert!((answer - 0.3).abs() < 1e-9);
    assert!(result.is_correct());
}

#[test]
fn kahan_thousand_tenths() {
    let result = KahanSummation::default().calculate_multiple(&[0.1; 1000]);
    let answer = result.answer().expect("numeric answer");
    assert!((answer - 100.0).abs() < 1e-9, "got {answer}");
}

#[test]
fn newton_square_roots() {
    let newton = NewtonRaphson::default();
    for s in [2.0f64, 3.0, 10.0, 100.0] {
        let run = newton.iterate(s, 0.0);
        assert!((run.root - s.sqrt()).abs() < ITERATIVE_EPSILON, "√{s} ≈ {}", run.root);
        assert!(run.iterations() < newton.iteration().max_iterations);

        let result = newton.calculate(s, 0.0);
        assert!(result.is_correct());
        assert_eq!(
            result.steps.iter().filter(|s| s.title.starts_with("Iteration")).count(),
            run.iterations()
        );
    }
}

#[test]
fn division_quotient_and_remainder() {
    let reg = registry();
    for id in ["long-division", "vedic", "synthetic", "non-restoring"] {
        let result = reg
            .solve(Operation::Division, id, 1234.0, 98.0)
            .expect("valid operands");
        assert_eq!(result.answer(), Some(12.0), "{id}");
        assert_eq!(result.remainder, Some(58.0), "{id}");
    }
}

#[test]
fn unknown_method_versus_invalid_input() {
    let reg = registry();
    assert!(matches!(
        reg.solve(Operation::Multiplication, "napier-bones", 3.0, 4.0),
        Err(Error::NotFound { .. })
    ));
    assert!(matches!(
        reg.solve(Operation::Multiplication, "lattice", 3.5, 4.0),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn every_example_verifies() {
    let reg = registry();
    for (operation, method) in reg.iter() {
        let example = method.example();
        assert!(
            method.validate(example.num1, example.num2).valid,
            "{operation} {} example is invalid",
            method.id()
        );
        let result = method.calculate(example.num1, example.num2);
        assert!(result.is_correct(), "{operation} {} example is wrong", method.id());
        assert!(!result.steps.is_empty());
    }
}

#[test]
fn out_of_domain_input_never_panics() {
    let reg = registry();
    let awkward = [
        (f64::NAN, 1.0),
        (f64::INFINITY, 2.0),
        (-3.0, 2.0),
        (2.5, 0.0),
        (1e300, 1e-300),
    ];
    for (operation, method) in reg.iter() {
        for (a, b) in awkward {
            if method.validate(a, b).valid {
                continue;
            }
            let result = method.calculate(a, b);
            assert_eq!(
                result.verification.correct,
                Some(false),
                "{operation} {} accepted ({a}, {b})",
                method.id()
            );
        }
    }
}

#[cfg(feature = "serde")]
#[test]
fn result_serializes_in_camel_case() {
    let result = registry()
        .solve(Operation::Division, "long-division", 100.0, 7.0)
        .expect("valid operands");
    let json = serde_json::to_value(&result).expect("serializable");
    assert_eq!(json["finalAnswer"], 14.0);
    assert_eq!(json["remainder"], 2.0);
    assert_eq!(json["methodName"], "Long Division");
    assert_eq!(json["verification"]["correct"], true);
    assert_eq!(json["steps"][0]["stepNumber"], 1);
    assert_eq!(json["steps"][0]["type"], "INFO");

    let meta = registry().list_methods(Operation::Multiplication)[0];
    let json = serde_json::to_value(meta).expect("serializable");
    assert_eq!(json["speedRating"], "moderate");
    assert_eq!(json["displayOrder"], 1);
}
