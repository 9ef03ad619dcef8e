use rand::prelude::*;

use transport::balance::{Abort, Rebalance};
use transport::solvers::MinilpSolver;
use transport::utils::approx_eq;
use transport::{Dummy, Error, Problem, Session};

/// A balanced problem built from a random flow, together with the cost of that flow
fn random_problem(rng: &mut StdRng) -> (Problem, f64) {
    let m = rng.gen_range(1..=6);
    let n = rng.gen_range(1..=6);
    let flows: Vec<Vec<f64>> = (0..m)
        .map(|_| (0..n).map(|_| rng.gen_range(0..50) as f64).collect())
        .collect();
    let costs: Vec<Vec<f64>> = (0..m)
        .map(|_| (0..n).map(|_| rng.gen_range(1..100) as f64).collect())
        .collect();

    let supply = flows.iter().map(|row| row.iter().sum()).collect();
    let demand = (0..n).map(|j| flows.iter().map(|row| row[j]).sum()).collect();
    let cost = flows
        .iter()
        .flatten()
        .zip(costs.iter().flatten())
        .map(|(x, c)| x * c)
        .sum();

    (Problem::new(supply, demand, costs).unwrap(), cost)
}

#[test]
fn random_balanced_problems_are_solved_consistently() {
    let mut rng = StdRng::seed_from_u64(20);
    for _ in 0..50 {
        let (problem, known_cost) = random_problem(&mut rng);
        let session = Session::with_problem(problem.clone())
            .solve(&MinilpSolver::new(), &mut Abort)
            .unwrap();
        let report = session.report().unwrap();
        let stats = report.statistics();

        assert_eq!(stats.dummy, None);
        assert_eq!(stats.constraints, problem.sources() + problem.destinations());
        assert_eq!(stats.variables, problem.sources() * problem.destinations());

        // the grand total is the objective, and the sum of the source costs
        let row_costs: f64 = report.rows().iter().map(|row| row.total_cost).sum();
        assert!(approx_eq(row_costs, report.total_cost()));
        // the flow that generated the instance is feasible, so it bounds the optimum
        assert!(report.total_cost() <= known_cost + 1e-6);

        for (row, supply) in report.rows().iter().zip(problem.supply()) {
            assert!(approx_eq(row.total_flow, *supply));
            assert!(row.flows.iter().all(|flow| *flow >= 0.0));
        }
        for (total, demand) in report.column_totals().iter().zip(problem.demand()) {
            assert!(approx_eq(*total, *demand));
        }
    }
}

#[test]
fn surplus_goes_to_dummy_destination() {
    let problem = Problem::new(
        vec![200.0, 100.0],
        vec![150.0, 100.0],
        vec![vec![4.0, 6.0], vec![5.0, 3.0]],
    )
    .unwrap();
    let session = Session::with_problem(problem)
        .solve(&MinilpSolver::new(), &mut Rebalance)
        .unwrap();
    let report = session.report().unwrap();

    assert_eq!(report.statistics().dummy, Some(Dummy::Destination(50.0)));
    assert_eq!(report.destinations().last().unwrap(), "E*");
    assert!((report.column_totals()[2] - 50.0).abs() < 1e-6);
    // U1 covers E1 at 4, U2 covers E2 at 3, the remaining 50 stay at U1
    assert!((report.total_cost() - 900.0).abs() < 1e-6);
    assert!((report.rows()[0].flows[2] - 50.0).abs() < 1e-6);
}

#[test]
fn shortage_comes_from_dummy_source() {
    let problem = Problem::new(vec![40.0], vec![30.0, 30.0], vec![vec![2.0, 5.0]]).unwrap();
    let session = Session::with_problem(problem)
        .solve(&MinilpSolver::new(), &mut Rebalance)
        .unwrap();
    let report = session.report().unwrap();

    assert_eq!(report.statistics().dummy, Some(Dummy::Source(20.0)));
    assert_eq!(report.rows()[1].label, "U*");
    // the dummy serves the expensive destination
    assert!((report.total_cost() - 110.0).abs() < 1e-6);
    assert_eq!(report.rows()[1].total_cost, 0.0);
}

#[test]
fn round_off_imbalance_adds_no_dummy() {
    let problem = Problem::new(vec![0.1, 0.2], vec![0.3], vec![vec![1.0], vec![2.0]]).unwrap();
    let session = Session::with_problem(problem)
        .solve(&MinilpSolver::new(), &mut Abort)
        .unwrap();
    let report = session.report().unwrap();
    let stats = report.statistics();

    assert_eq!(stats.dummy, None);
    assert_eq!(stats.variables, 2);
    assert_eq!(stats.constraints, 3);
    assert_eq!(report.destinations(), &["E1".to_string()]);
    assert!(!report.to_string().contains("E*"));
}

#[test]
fn single_source_single_destination() {
    let problem = Problem::new(vec![7.0], vec![7.0], vec![vec![3.0]]).unwrap();
    let session = Session::with_problem(problem)
        .solve(&MinilpSolver::new(), &mut Abort)
        .unwrap();
    let report = session.report().unwrap();
    assert_eq!(report.statistics().constraints, 2);
    assert!((report.rows()[0].flows[0] - 7.0).abs() < 1e-9);
    assert!((report.total_cost() - 21.0).abs() < 1e-9);
}

#[test]
fn zero_costs_give_zero_total() {
    let problem = Problem::new(vec![10.0, 20.0], vec![15.0, 15.0], vec![vec![0.0; 2]; 2]).unwrap();
    let session = Session::with_problem(problem)
        .solve(&MinilpSolver::new(), &mut Abort)
        .unwrap();
    assert_eq!(session.report().unwrap().total_cost(), 0.0);
}

#[test]
fn aborting_keeps_the_session() {
    let problem = Problem::new(vec![300.0], vec![250.0], vec![vec![1.0]]).unwrap();
    let session = Session::with_problem(problem);
    let before = session.clone();

    match session.solve(&MinilpSolver::new(), &mut Abort) {
        Err(Error::Aborted(imbalance)) => {
            assert_eq!(imbalance.total_supply, 300.0);
            assert_eq!(imbalance.total_demand, 250.0);
        }
        other => panic!("expected an aborted solve, got {:?}", other),
    }
    assert_eq!(session, before);
}

#[test]
fn solved_session_exports_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("solution.csv");
    let session = Session::new()
        .solve(&MinilpSolver::new(), &mut Abort)
        .unwrap();
    session.export(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Transportation problem solution");
    assert!(lines[1].starts_with("Generated at: "));
    assert_eq!(lines[3], "Source;E1;E2;E3;Supply;Source cost");
    assert_eq!(lines[7], "Demand;100.00;100.00;100.00;;");
    assert_eq!(lines[8], "Total cost;;;;;6600.00");
    assert_eq!(lines[10], "Additional information:");
}
