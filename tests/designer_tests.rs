use std::collections::HashSet;

use optbench::designer::{
    Designer, DesignerRegistry, GridSearchDesigner, RandomDesigner, designer_factory,
};
use optbench::{Direction, Error, ParamValue, ProblemStatement, SearchSpace};

fn mixed_problem() -> ProblemStatement {
    let space = SearchSpace::new()
        .float("lr", 1e-4, 1e-1)
        .unwrap()
        .int("layers", 1, 3)
        .unwrap()
        .categorical("activation", 2)
        .unwrap();
    ProblemStatement::new(space, "loss", Direction::Minimize)
}

#[test]
fn random_designer_respects_bounds() {
    let mut designer = RandomDesigner::new(&mixed_problem(), 42);
    for trial in designer.suggest(200).unwrap() {
        let params = trial.parameters();
        match params["lr"] {
            ParamValue::Float(v) => assert!((1e-4..=1e-1).contains(&v)),
            ref other => panic!("unexpected lr {other:?}"),
        }
        match params["layers"] {
            ParamValue::Int(v) => assert!((1..=3).contains(&v)),
            ref other => panic!("unexpected layers {other:?}"),
        }
        match params["activation"] {
            ParamValue::Categorical(v) => assert!(v < 2),
            ref other => panic!("unexpected activation {other:?}"),
        }
        assert!(!trial.is_completed());
    }
}

#[test]
fn grid_designer_covers_grid_before_repeating() {
    let space = SearchSpace::new()
        .int("a", 0, 2)
        .unwrap()
        .categorical("b", 2)
        .unwrap();
    let problem = ProblemStatement::new(space, "value", Direction::Minimize);
    let mut designer = GridSearchDesigner::new(&problem, 4).unwrap();
    assert_eq!(designer.grid_size(), 6);

    let first: Vec<_> = designer.suggest(6).unwrap();
    let distinct: HashSet<String> = first
        .iter()
        .map(|t| format!("{:?}", t.parameters()))
        .collect();
    assert_eq!(distinct.len(), 6);

    let second = designer.suggest(6).unwrap();
    assert_eq!(first, second);
}

#[test]
fn grid_designer_seed_shifts_start() {
    let problem = mixed_problem();
    let mut a = GridSearchDesigner::new(&problem, 0).unwrap();
    let mut b = GridSearchDesigner::new(&problem, 1).unwrap();
    let a_trials = a.suggest(2).unwrap();
    let b_trials = b.suggest(1).unwrap();
    assert_eq!(a_trials[1], b_trials[0]);
}

#[test]
fn zero_count_rejected() {
    let problem = mixed_problem();
    let mut random = RandomDesigner::new(&problem, 0);
    let mut grid = GridSearchDesigner::new(&problem, 0).unwrap();
    assert!(matches!(
        random.suggest(0),
        Err(Error::InvalidSuggestionCount(0))
    ));
    assert!(matches!(grid.suggest(0), Err(Error::InvalidSuggestionCount(0))));
}

#[test]
fn registry_defaults_and_custom_entries() {
    let registry = DesignerRegistry::with_defaults().register(
        "fixed-seed-random",
        designer_factory(|problem, _seed| Ok(RandomDesigner::new(problem, 1))),
    );
    let names: Vec<&str> = registry.names().collect();
    assert_eq!(names, vec!["fixed-seed-random", "grid", "random"]);
    assert!(registry.iter().map(|(name, _)| name).eq(registry.names()));

    let problem = mixed_problem();
    let factory = registry.get("fixed-seed-random").unwrap();
    let mut a = factory(&problem, 10).unwrap();
    let mut b = factory(&problem, 20).unwrap();
    assert_eq!(a.suggest(3).unwrap(), b.suggest(3).unwrap());

    for (name, factory) in registry.iter() {
        let mut designer = factory(&problem, 0).unwrap();
        assert_eq!(designer.suggest(2).unwrap().len(), 2, "{name}");
    }

    assert!(matches!(
        registry.get("cma-es"),
        Err(Error::UnknownDesigner(ref name)) if name == "cma-es"
    ));
}
