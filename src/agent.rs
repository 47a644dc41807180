//! # Agente de Inferência
//!
//! O [`InferenceAgent`] é quem chama o motor: recebe pedidos de inferência,
//! serializa as execuções sobre a base compartilhada e devolve o handle da
//! solução de cada uma.
//!
//! ## Concorrência
//!
//! A base vive num `Arc<RwLock<KnowledgeBase>>`. Cada execução segura o lock
//! de escrita do começo ao fim, então duas inferências nunca se intercalam;
//! leitores (relatórios, consultas) usam o lock de leitura entre execuções.
//!
//! ```text
//! InferenceRequest ──▶ InferenceAgent::handle()
//!                        ├── kb.write()  (exclusivo durante a execução)
//!                        ├── DirectInferenceManager::apply_inference()
//!                        └── SolutionHandle
//! ```

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::config::InferenceConfig;
use crate::core::{EntityId, KnowledgeBase};
use crate::inference::{DirectInferenceManager, Solution, SolutionHandle};
use crate::logic::Pattern;

/// Pedido de inferência: os quatro argumentos de `apply_inference`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InferenceRequest {
    /// Padrão que se quer provar.
    pub target: Pattern,
    /// Conjunto de regras em níveis.
    pub rule_set: Option<EntityId>,
    /// Estrutura com os fatos de entrada.
    pub input: Option<EntityId>,
    /// Estrutura que recebe as entidades geradas.
    pub output: Option<EntityId>,
}

/// Agente que serializa as inferências sobre uma base compartilhada.
pub struct InferenceAgent {
    /// Base de conhecimento compartilhada (protegida por RwLock).
    kb: Arc<RwLock<KnowledgeBase>>,
    config: InferenceConfig,
    /// Execuções concluídas desde a criação do agente.
    runs: u32,
}

impl InferenceAgent {
    pub fn new(kb: Arc<RwLock<KnowledgeBase>>, config: InferenceConfig) -> Self {
        Self { kb, config, runs: 0 }
    }

    /// Executa um pedido e devolve o handle da solução.
    pub fn handle(&mut self, request: &InferenceRequest) -> SolutionHandle {
        self.runs += 1;
        tracing::info!(run = self.runs, "Pedido de inferência recebido");

        let mut kb = self.kb.write();
        let mut manager = DirectInferenceManager::new(&mut *kb, self.config.clone());
        manager.apply_inference(
            &request.target,
            request.rule_set,
            request.input,
            request.output,
        )
    }

    /// Lê a solução `handle` sob o lock de leitura.
    pub fn solution(&self, handle: SolutionHandle) -> Option<Solution> {
        Solution::load(&*self.kb.read(), handle)
    }

    /// Descreve os passos de prova de uma solução, um por linha.
    pub fn explain(&self, handle: SolutionHandle) -> Vec<String> {
        let kb = self.kb.read();
        let Some(solution) = Solution::load(&*kb, handle) else {
            return Vec::new();
        };
        solution
            .steps
            .iter()
            .enumerate()
            .map(|(i, rule)| {
                let label = kb
                    .entities
                    .get(rule)
                    .map(|e| e.label.as_str())
                    .unwrap_or("?");
                format!("{}. {}", i + 1, label)
            })
            .collect()
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Base compartilhada, para leitura entre execuções.
    pub fn kb(&self) -> &Arc<RwLock<KnowledgeBase>> {
        &self.kb
    }
}
