//! # Direct Inference — Demonstração
//!
//! Monta uma pequena base de parentesco, pede ao agente que prove
//! `bisavô_de(?a, ?b)` e imprime a solução em JSON.
//!
//! ```bash
//! cargo run
//! RUST_LOG=debug cargo run                      # disparos regra a regra
//! INFERENCE_MAX_STALLED_RESTARTS=0 cargo run   # sem limite de recomeços parados
//! ```
//!
//! As regras ficam em dois níveis: `avô` tem prioridade sobre `bisavô`, que
//! só consegue disparar depois que `avô` gerou os fatos de que depende.

use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use direct_inference::agent::{InferenceAgent, InferenceRequest};
use direct_inference::config::InferenceConfig;
use direct_inference::core::{EntityId, FactStore, KnowledgeBase, RelationKind};
use direct_inference::inference::Solution;
use direct_inference::logic::{Formula, Pattern, Term};

/// Relatório impresso ao final da execução.
#[derive(Serialize)]
struct Report {
    solution: Solution,
    proof: Vec<String>,
    derived: Vec<String>,
}

fn main() -> Result<()> {
    // Aceita RUST_LOG; padrão "info".
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = InferenceConfig::from_env();
    tracing::info!(
        max_stalled_restarts = ?config.max_stalled_restarts,
        "Direct Inference — iniciando demonstração"
    );

    let (kb, request) = family_kb()?;
    let mut agent = InferenceAgent::new(kb, config);
    let handle = agent.handle(&request);

    let solution = agent
        .solution(handle)
        .context("solução não encontrada na base")?;
    let derived = derived_facts(&agent.kb().read());
    let report = Report {
        solution,
        proof: agent.explain(handle),
        derived,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Fatos de parentesco derivados, em ordem de criação.
fn derived_facts(kb: &KnowledgeBase) -> Vec<String> {
    ["avô_de", "bisavô_de"]
        .iter()
        .flat_map(|name| kb.find_relations(&RelationKind::custom(*name), None, None))
        .map(|r| kb.describe_relation(r))
        .collect()
}

/// Quatro gerações: Ana → Bruno → Carla → Davi.
fn family_kb() -> Result<(Arc<RwLock<KnowledgeBase>>, InferenceRequest)> {
    let mut kb = KnowledgeBase::new();
    let people: Vec<EntityId> = ["Ana", "Bruno", "Carla", "Davi"]
        .iter()
        .map(|name| kb.add_concept(name))
        .collect();
    for pair in people.windows(2) {
        kb.add_fact("pai_de", pair[0], pair[1])?;
    }
    let input = kb.add_structure("família", &people)?;
    let output = kb.add_structure("derivados", &[])?;

    let (x, y, z) = (Term::var("x"), Term::var("y"), Term::var("z"));
    let avo = kb.add_rule(
        "avô",
        Formula::implies(
            Formula::Atom(
                Pattern::fact("pai_de", x.clone(), y.clone()).and_fact("pai_de", y.clone(), z.clone()),
            ),
            Pattern::fact("avô_de", x.clone(), z.clone()),
        ),
    );
    let bisavo = kb.add_rule(
        "bisavô",
        Formula::implies(
            Formula::Atom(Pattern::fact("avô_de", x.clone(), y.clone()).and_fact("pai_de", y, z.clone())),
            Pattern::fact("bisavô_de", x, z),
        ),
    );
    let rule_set = kb.add_rule_set("parentesco", &[vec![avo], vec![bisavo]])?;

    let request = InferenceRequest {
        target: Pattern::fact("bisavô_de", Term::var("a"), Term::var("b")),
        rule_set: Some(rule_set),
        input: Some(input),
        output: Some(output),
    };
    Ok((Arc::new(RwLock::new(kb)), request))
}
