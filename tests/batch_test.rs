// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Batch generation and serialized output.

mod common;

use common::{assert_invariants, config};
use soroban_gen::config::RuleFamily;
use soroban_gen::sequence::StepOutput;
use soroban_gen::{generate_batch, generate_batch_with_statistics, ExampleOutput};

#[test]
fn test_seeded_batches_repeat() {
    let config = config(RuleFamily::Mix, &[6, 7, 8, 9], 6, 314);
    let first = generate_batch(&config, 24);
    let second = generate_batch(&config, 24);
    assert_eq!(first, second);
    for example in &first {
        assert_invariants(example, &config);
    }
}

#[test]
fn test_batch_examples_differ() {
    let config = config(RuleFamily::Friends, &[1, 2, 3, 4, 5, 6, 7, 8, 9], 8, 1);
    let batch = generate_batch(&config, 10);
    let distinct: std::collections::HashSet<Vec<i64>> =
        batch.iter().map(|example| example.values()).collect();
    assert!(distinct.len() > 1);
}

#[test]
fn test_statistics_cover_the_batch() {
    let config = config(RuleFamily::Brothers, &[1, 2, 3, 4], 10, 8);
    let (examples, statistics) = generate_batch_with_statistics(&config, 12);
    assert_eq!(examples.len(), 12);
    assert!(!statistics.to_string().is_empty());
}

#[test]
fn test_json_output_round_trips() {
    let config = config(RuleFamily::Friends, &[9], 5, 77);
    let batch = generate_batch(&config, 4);
    let outputs: Vec<ExampleOutput> = batch.iter().map(|example| example.to_output()).collect();

    let json = serde_json::to_string(&outputs).unwrap();
    let parsed: Vec<ExampleOutput> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, outputs);

    for (output, example) in parsed.iter().zip(&batch) {
        assert_eq!(output.start, 0);
        assert_eq!(output.values(), example.values());
        assert_eq!(output.answer, example.answer.value());
        assert_eq!(output.best_effort, example.is_best_effort());
        assert!(matches!(output.steps[0], StepOutput::Plain(v) if v > 0));
    }
}

#[test]
fn test_json_composite_shape() {
    let config = config(RuleFamily::Friends, &[9], 5, 5);
    let batch = generate_batch(&config, 6);
    let value: serde_json::Value = serde_json::to_value(batch[0].to_output()).unwrap();
    let steps = value["steps"].as_array().unwrap();
    let composite = steps
        .iter()
        .find(|step| step.is_object())
        .unwrap_or_else(|| panic!("no composite step in {value}"));
    assert_eq!(composite["family"], "friend");
    assert_eq!(composite["trained_digit"], 9);
    assert_eq!(composite["formula"].as_array().unwrap().len(), 2);
}
