use loopmargin::config::{MarginConfig, MarginMode};
use loopmargin::system::{FrequencyEvaluator, FrequencyResponse, SystemData, TransferFunction};
use loopmargin::{MarginArgument, MarginError, margin};
use num_complex::Complex64;

#[test]
fn test_margin_arity_errors() {
    assert_eq!(
        margin(&[]).unwrap_err(),
        MarginError::InvalidArity { received: 0 }
    );

    let arrays: Vec<MarginArgument> = (0..4).map(|_| vec![1.0, 2.0].into()).collect();
    assert_eq!(
        margin(&arrays).unwrap_err(),
        MarginError::InvalidArity { received: 4 }
    );

    let err = margin(&arrays[..2]).unwrap_err();
    assert_eq!(err.to_string(), "margin needs 1 or 3 arguments; received 2");
}

#[test]
fn test_margin_conversion_errors() {
    let err = margin(&[vec![1.0, 2.0, 3.0].into()]).unwrap_err();
    assert!(matches!(err, MarginError::Conversion(_)));

    let tf = TransferFunction::siso(vec![1.0], vec![1.0, 1.0]).unwrap();
    let err = margin(&[
        vec![1.0].into(),
        MarginArgument::from(tf),
        vec![1.0].into(),
    ])
    .unwrap_err();
    assert!(matches!(err, MarginError::Conversion(_)));
}

#[test]
fn test_bode_triple_validation() {
    let err = margin(&[
        vec![1.0, f64::NAN].into(),
        vec![0.0, -90.0].into(),
        vec![1.0, 2.0].into(),
    ])
    .unwrap_err();
    assert_eq!(
        err,
        MarginError::NonNumeric {
            what: "magnitude",
            index: 1
        }
    );

    let err = margin(&[
        vec![1.0, 0.5].into(),
        vec![0.0, -90.0].into(),
        vec![2.0, 1.0].into(),
    ])
    .unwrap_err();
    assert!(matches!(err, MarginError::InvalidFrequencyGrid(_)));
}

#[test]
fn test_mimo_margin_rejected() {
    let tf = TransferFunction::mimo(
        vec![vec![vec![1.0], vec![2.0]]],
        vec![vec![vec![1.0, 1.0], vec![1.0, 2.0]]],
    )
    .unwrap();
    assert_eq!(
        margin(&[tf.into()]).unwrap_err(),
        MarginError::NotSiso {
            outputs: 1,
            inputs: 2
        }
    );
}

#[test]
fn test_transfer_function_validation() {
    assert!(matches!(
        TransferFunction::siso(vec![1.0], vec![0.0, 0.0]),
        Err(MarginError::EmptyPolynomial(_))
    ));
    assert!(matches!(
        TransferFunction::siso(vec![f64::INFINITY], vec![1.0]),
        Err(MarginError::NonNumeric { .. })
    ));
}

#[test]
fn test_interpolation_outside_grid_is_an_error() {
    let frd = FrequencyResponse::new(
        vec![1.0, 2.0, 3.0],
        vec![Complex64::new(1.0, 0.0); 3],
    )
    .unwrap();
    let system = SystemData::from(frd);
    assert!(system.evaluate(2.5).is_ok());
    assert!(matches!(
        system.evaluate(3.5),
        Err(MarginError::FrequencyOutOfRange { .. })
    ));
}

#[test]
fn test_config_from_toml() {
    let config = MarginConfig::from_toml_str(
        r#"
        epsilon = 1e-6
        mode = "all"

        [solver]
        max_iterations = 250
        "#,
    )
    .unwrap();
    assert_eq!(config.epsilon, 1e-6);
    assert_eq!(config.mode, MarginMode::All);
    assert_eq!(config.solver.max_iterations, 250);
    assert_eq!(config.solver.xtol, MarginConfig::default().solver.xtol);
}

#[test]
fn test_config_from_file() {
    let path = std::env::temp_dir().join(format!("loopmargin-{}.toml", std::process::id()));
    std::fs::write(&path, "mode = \"reduced\"\n[roots]\nimaginary_tolerance = 1e-9\n").unwrap();

    let config = MarginConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.mode, MarginMode::Reduced);
    assert_eq!(config.roots.imaginary_tolerance, 1e-9);

    assert!(matches!(
        MarginConfig::from_file(&path),
        Err(MarginError::Config(_))
    ));
}

#[test]
fn test_config_rejects_invalid_values() {
    assert!(matches!(
        MarginConfig::from_toml_str("epsilon = -1.0"),
        Err(MarginError::Config(_))
    ));
    assert!(matches!(
        MarginConfig::from_toml_str("[solver]\nmax_iterations = 0"),
        Err(MarginError::Config(_))
    ));
    assert!(matches!(
        MarginConfig::from_toml_str("tolerance = 3"),
        Err(MarginError::Config(_))
    ));
}
