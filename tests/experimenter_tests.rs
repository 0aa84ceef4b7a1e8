use optbench::experimenter::{
    BbobExperimenterFactory, BbobFunction, Experimenter, ExperimenterFactory,
    FunctionExperimenter, Hartmann3D, Hartmann6D,
};
use optbench::{Error, ParamValue, Trial};

const TOL: f64 = 1e-10;

fn point(prefix_one_based: bool, x: &[f64]) -> Trial {
    let offset = usize::from(prefix_one_based);
    x.iter().enumerate().fold(Trial::new(), |trial, (i, &v)| {
        trial.with_param(format!("x{}", i + offset), ParamValue::Float(v))
    })
}

#[test]
fn bbob_functions_vanish_at_optimum() {
    for function in BbobFunction::ALL {
        let optimum = if function == BbobFunction::Rosenbrock {
            1.0
        } else {
            0.0
        };
        for dim in [2, 5, 10] {
            let value = function.evaluate(&vec![optimum; dim]);
            assert!(value.abs() < 1e-8, "{function} in {dim}d: {value}");
        }
    }
}

#[test]
fn bbob_factory_evaluates_through_experimenter() {
    let factory = BbobExperimenterFactory::new("Sphere", 3).unwrap();
    let experimenter = factory.create().unwrap();
    let mut trials = vec![point(false, &[1.0, 2.0, -2.0]), point(false, &[0.0, 0.0, 0.0])];
    experimenter.evaluate(&mut trials).unwrap();
    assert!((trials[0].objective("value").unwrap() - 9.0).abs() < TOL);
    assert!(trials[1].objective("value").unwrap().abs() < TOL);
}

#[test]
fn bbob_factory_metadata_is_structural() {
    let a = BbobExperimenterFactory::new("Rastrigin", 4).unwrap().metadata();
    let b = BbobExperimenterFactory::from_function(BbobFunction::Rastrigin, 4)
        .unwrap()
        .metadata();
    let c = BbobExperimenterFactory::new("Rastrigin", 5).unwrap().metadata();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.to_string(), "dim=4, name=Rastrigin");
    let keys: Vec<&str> = a.fields().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["dim", "name"]);
    assert_eq!(a.fields()["name"], "Rastrigin");
}

#[test]
fn bbob_factory_rejects_bad_input() {
    assert!(matches!(
        BbobExperimenterFactory::new("Himmelblau", 2),
        Err(Error::UnknownFunction(ref name)) if name == "Himmelblau"
    ));
    assert!(matches!(
        BbobExperimenterFactory::new("Sphere", 0),
        Err(Error::InvalidDimension(0))
    ));
}

#[test]
fn hartmann_minima() {
    let h3 = Hartmann3D::new();
    let mut trials = vec![point(true, &[0.114_614, 0.555_649, 0.852_547])];
    h3.evaluate(&mut trials).unwrap();
    assert!((trials[0].objective("value").unwrap() + 3.862_78).abs() < 1e-4);

    let h6 = Hartmann6D::new();
    let mut trials = vec![point(
        true,
        &[0.201_69, 0.150_011, 0.476_874, 0.275_332, 0.311_652, 0.6573],
    )];
    h6.evaluate(&mut trials).unwrap();
    assert!((trials[0].objective("value").unwrap() + 3.322_37).abs() < 1e-4);

    assert_eq!(h6.metadata().get("dim"), Some("6"));
}

#[test]
fn missing_parameter_is_reported() {
    let experimenter =
        FunctionExperimenter::new("Sum", 2, 0.0, 1.0, |x: &[f64]| x.iter().sum()).unwrap();
    let mut trials = vec![point(false, &[0.5])];
    let err = experimenter.evaluate(&mut trials).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "x1"));
    assert!(!trials[0].is_completed());
}

#[test]
fn evaluation_is_deterministic() {
    let factory = BbobExperimenterFactory::new("Ackley", 3).unwrap();
    let x = [0.3, -1.2, 4.4];
    let mut first = vec![point(false, &x)];
    let mut second = vec![point(false, &x)];
    factory.create().unwrap().evaluate(&mut first).unwrap();
    factory.create().unwrap().evaluate(&mut second).unwrap();
    assert_eq!(first, second);
}
