//! Provides an example of how to use bayes-enum to perform inference on a Bayesian Network.
//!
//! Run with `cargo run --example inference`.

use bayes_enum as b;
use b::ConditionalInferenceEngine;

use std::path::Path;

fn main() -> b::Result<()> {
    /////////////////////////////////////////////////////
    // Step 1: Build Model
    let model = build_student()?;

    /////////////////////////////////////////////////////
    // Step 2: Compile some evidence
    let mut evidence = b::Assignment::new();
    evidence.set("D", "0");
    evidence.set("L", "1");
    evidence.set("S", "0");

    /////////////////////////////////////////////////////
    // Step 3: Build an inference engine

    // prices the full joint distribution
    let options = b::EngineOptions::default().scope(b::FactorScope::AllVariables);

    // uncomment to price only the query's ancestors
    // let options = b::EngineOptions::default();

    let engine = b::EnumerationEngine::with_options(&model, options);

    /////////////////////////////////////////////////////
    // Step 4: Run a Conditional Query
    let p = engine.posterior("I", &evidence)?;
    for &(ref state, probability) in p.distribution().entries() {
        println!("P(I = {} | D = 0, S = 0, L = 1) = {:.4}", state, probability);
    }

    /////////////////////////////////////////////////////
    // Step 5: Same again, with the network and evidence read from disk
    let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
    let sprinkler = b::load_network(&demos.join("sprinkler.json"), b::LookupMode::ByVariable)?;
    let (evidence, warnings) = b::load_evidence(&demos.join("evidence.txt"))?;
    for warning in warnings.iter() {
        println!("skipped {}", warning);
    }

    let p = b::EnumerationEngine::new(&sprinkler).posterior("WetGrass", &evidence)?;
    println!("\n{}", p);

    Ok(())
}

fn build_student() -> b::Result<b::BayesianNetwork> {
    let d = b::Variable::new("D", &["0", "1"]);
    let i = b::Variable::new("I", &["0", "1"]);
    let g = b::Variable::new("G", &["0", "1", "2"]);
    let s = b::Variable::new("S", &["0", "1"]);
    let l = b::Variable::new("L", &["0", "1"]);

    let leaves = b::CptNode::distribution;

    ///////////////////////////////////////////////////
    // Step 1a: Build CPTs for variables with parents
    let cpt_g = b::Cpt::with_scope(&["I", "D", "G"], b::CptNode::branch(vec![
        ("0", b::CptNode::branch(vec![
            ("0", leaves(&[("0", 0.3), ("1", 0.4), ("2", 0.3)])),
            ("1", leaves(&[("0", 0.05), ("1", 0.25), ("2", 0.7)])),
        ])),
        ("1", b::CptNode::branch(vec![
            ("0", leaves(&[("0", 0.9), ("1", 0.08), ("2", 0.02)])),
            ("1", leaves(&[("0", 0.5), ("1", 0.3), ("2", 0.2)])),
        ])),
    ]));

    let cpt_s = b::Cpt::new(b::CptNode::branch(vec![
        ("0", leaves(&[("0", 0.95), ("1", 0.05)])),
        ("1", leaves(&[("0", 0.2), ("1", 0.8)])),
    ]));

    let cpt_l = b::Cpt::new(b::CptNode::branch(vec![
        ("0", leaves(&[("0", 0.1), ("1", 0.9)])),
        ("1", leaves(&[("0", 0.4), ("1", 0.6)])),
        ("2", leaves(&[("0", 0.99), ("1", 0.01)])),
    ]));

    ///////////////////////////////////////////////////
    // Step 1b: Build the Model
    b::NetworkBuilder::new()
        .with_variable(&d, &[], b::Cpt::new(leaves(&[("0", 0.6), ("1", 0.4)])))
        .with_variable(&i, &[], b::Cpt::new(leaves(&[("0", 0.7), ("1", 0.3)])))
        .with_variable(&g, &["D", "I"], cpt_g)
        .with_variable(&s, &["I"], cpt_s)
        .with_variable(&l, &["G"], cpt_l)
        .build()
}
