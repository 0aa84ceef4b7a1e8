use std::sync::Arc;

use optbench::designer::{Designer, DesignerRegistry, designer_factory};
use optbench::experimenter::{BbobExperimenterFactory, ExperimenterFactory};
use optbench::{
    BenchmarkRecord, BenchmarkRecordAnalyzer, BenchmarkRunner, BenchmarkStateAnalyzer,
    Direction, ExperimenterDesignerBenchmarkStateFactory, GenerateAndEvaluate, ParamValue,
    PlotElement, ProblemStatement, RECORD_OBJECTIVE_KEY, Result, Trial,
};

/// Always proposes the origin, the optimum of every centered BBOB function.
struct Oracle {
    names: Vec<String>,
}

impl Oracle {
    fn new(problem: &ProblemStatement) -> Self {
        let names = problem
            .search_space()
            .parameters()
            .iter()
            .map(|p| p.name.clone())
            .collect();
        Self { names }
    }
}

impl Designer for Oracle {
    fn suggest(&mut self, count: usize) -> Result<Vec<Trial>> {
        let trial = self
            .names
            .iter()
            .fold(Trial::new(), |t, name| t.with_param(name, ParamValue::Float(0.0)));
        Ok(vec![trial; count])
    }
}

fn record(
    algorithm: &str,
    factory: BbobExperimenterFactory,
    registry: &DesignerRegistry,
) -> BenchmarkRecord {
    let runner = BenchmarkRunner::new(vec![Arc::new(GenerateAndEvaluate::new(1))], 12);
    let state_factory = ExperimenterDesignerBenchmarkStateFactory::new(
        Arc::new(factory),
        registry.get(algorithm).unwrap(),
    );
    let states = runner.run_states(&state_factory, 0..4).unwrap();
    BenchmarkStateAnalyzer::to_record(algorithm, &factory, &states).unwrap()
}

fn registry() -> DesignerRegistry {
    DesignerRegistry::with_defaults().register(
        "oracle",
        designer_factory(|problem, _seed| Ok(Oracle::new(problem))),
    )
}

#[test]
fn oracle_beats_random_everywhere() {
    let registry = registry();
    let mut records = Vec::new();
    for name in ["Sphere", "Ellipsoidal"] {
        let factory = BbobExperimenterFactory::new(name, 3).unwrap();
        for algorithm in ["random", "oracle"] {
            records.push(record(algorithm, factory, &registry));
        }
    }

    BenchmarkRecordAnalyzer::add_comparison_metrics(&mut records, "random", RECORD_OBJECTIVE_KEY)
        .unwrap();
    let table =
        BenchmarkRecordAnalyzer::score_table(&records, RECORD_OBJECTIVE_KEY, "random").unwrap();

    let summary: Vec<(String, &str, f64)> = table
        .iter()
        .map(|row| (row.problem.to_string(), row.algorithm.as_str(), row.score))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("dim=3, name=Ellipsoidal".to_string(), "oracle", 1.0),
            ("dim=3, name=Ellipsoidal".to_string(), "random", 0.5),
            ("dim=3, name=Sphere".to_string(), "oracle", 1.0),
            ("dim=3, name=Sphere".to_string(), "random", 0.5),
        ]
    );
}

#[test]
fn score_curve_is_a_maximized_win_rate() {
    let registry = registry();
    let factory = BbobExperimenterFactory::new("Sphere", 2).unwrap();
    let mut records = vec![
        record("random", factory, &registry),
        record("grid", factory, &registry),
    ];
    BenchmarkRecordAnalyzer::add_comparison_metrics(&mut records, "random", "objective").unwrap();

    let curve = records[1]
        .element("objective:score_curve:random")
        .and_then(PlotElement::curve)
        .unwrap();
    assert_eq!(curve.trend(), Direction::Maximize);
    assert_eq!(curve.xs(), (1..=12).collect::<Vec<_>>().as_slice());
    assert!(curve.ys()[0].iter().all(|v| (0.0..=1.0).contains(v)));
    assert_eq!(
        records[1]
            .element("objective:score:random")
            .and_then(PlotElement::score),
        curve.ys()[0].last().copied()
    );
}

#[test]
fn objective_curves_survive_comparison() {
    let registry = registry();
    let factory = BbobExperimenterFactory::new("Sphere", 2).unwrap();
    let mut records = vec![record("random", factory, &registry)];
    let objective = records[0].element("objective").cloned();

    BenchmarkRecordAnalyzer::add_comparison_metrics(&mut records, "random", "objective").unwrap();

    assert_eq!(records[0].element("objective").cloned(), objective);
    assert_eq!(records[0].plot_elements.len(), 3);
    assert_eq!(records[0].experimenter_metadata, factory.metadata());
}
