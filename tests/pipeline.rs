//! End-to-end tests: question → spec → result → insight

mod common;

use common::{load_config, load_snapshot, population, predictor, POPULATION_ID};
use nlquery::{
    Aggregation, EngineConfig, FilterOp, InteractiveProgram, InteractiveRequest, QueryFilter,
    QueryMetric, Value,
};
use serde_json::json;

#[test]
fn test_rule_based_average_by_year_and_ward() {
    let program = InteractiveProgram::default();
    let request = InteractiveRequest::new(POPULATION_ID, "2023年の区別人口の平均は?");

    let response = program.run(&request, &population()).expect("Run should succeed");

    assert_eq!(response.program_version, "rule-based-v1");
    assert_eq!(response.query_spec.group_by, vec!["year", "ward"]);
    assert_eq!(
        response.query_spec.metrics,
        vec![QueryMetric::of(Aggregation::Avg, "year")]
    );
    assert_eq!(
        response.query_spec.filters,
        vec![QueryFilter::new("year", FilterOp::Eq, 2023)]
    );

    assert_eq!(response.columns, vec!["year", "ward", "year_avg"]);
    // equal sort keys keep the group order
    let wards: Vec<&str> = response
        .data
        .iter()
        .filter_map(|row| row["ward"].as_text())
        .collect();
    assert_eq!(wards, vec!["中央区", "北区", "南区"]);
    assert_eq!(response.data[2]["year_avg"], Value::Float(2023.0));

    assert_eq!(
        response.insight,
        "質問『2023年の区別人口の平均は?』に対し、avg(year) を計算しました。返却件数: 3件。"
    );
}

#[test]
fn test_compiled_prediction_is_preferred() {
    let program = InteractiveProgram::from_config(&EngineConfig::default(), Some(predictor("compiled-test")));
    let request = InteractiveRequest::new(POPULATION_ID, "total population by ward");

    let response = program.run(&request, &population()).unwrap();

    assert_eq!(response.program_version, "compiled-test");
    assert_eq!(
        serde_json::to_value(&response.data).unwrap(),
        json!([
            {"ward": "中央区", "population_sum": 2100},
            {"ward": "北区", "population_sum": 1650},
            {"ward": "南区", "population_sum": 600}
        ])
    );
}

#[test]
fn test_unmatched_question_falls_back_to_rules() {
    let program = InteractiveProgram::from_config(&EngineConfig::default(), Some(predictor("compiled-test")));
    // No example shares a token with the question or was recorded for dataset 3
    let snapshot = load_snapshot("population.csv", 3);
    let request = InteractiveRequest::new(3, "人口の合計");

    let response = program.run(&request, &snapshot).unwrap();

    assert_eq!(response.program_version, "rule-based-v1");
    assert_eq!(
        serde_json::to_value(&response.data).unwrap(),
        json!([{"sum_year": 10113}])
    );
}

#[test]
fn test_configured_program() {
    let program = InteractiveProgram::from_config(&load_config("config.yaml"), None);
    let request = InteractiveRequest::new(POPULATION_ID, "average population by ward");

    let response = program.run(&request, &population()).unwrap();

    assert_eq!(response.program_version, "heuristics-v1");
    assert_eq!(response.query_spec.limit, Some(50));
    assert_eq!(response.columns, vec!["ward", "year_avg"]);
    assert_eq!(response.data[0]["ward"], Value::from("中央区"));
    assert_eq!(response.data[1]["year_avg"], Value::Float(2022.5));
    assert_eq!(response.data[2]["ward"], Value::from("南区"));
    assert_eq!(
        response.insight,
        "For the question \"average population by ward\", computed avg(year). Rows returned: 3."
    );
}

#[test]
fn test_analysis_record_carries_pass_through_tags() {
    let request = InteractiveRequest::new(POPULATION_ID, "件数").with_provider("local", "none");
    let response = InteractiveProgram::default().run(&request, &population()).unwrap();

    let record = serde_json::to_value(response.analysis_record()).unwrap();
    assert_eq!(record["dataset_id"], json!(1));
    assert_eq!(record["question"], json!("件数"));
    assert_eq!(record["provider"], json!("local"));
    assert_eq!(record["model"], json!("none"));
    assert_eq!(record["program_version"], json!("rule-based-v1"));
    assert_eq!(record["result_summary"]["returned_rows"], json!(1));
    assert_eq!(record["query_spec"]["metrics"], json!([{"agg": "count", "column": null}]));
}
