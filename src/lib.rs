//! # Direct Inference — Motor de Inferência Direta
//!
//! Motor de **forward chaining** sobre um grafo de fatos: dado um
//! padrão-alvo, um conjunto de regras em níveis de prioridade e uma
//! estrutura de entrada, dispara regras até o alvo valer na base ou as
//! regras se esgotarem. Toda execução termina num artefato de solução.
//!
//! ## Arquitetura
//!
//! ```text
//! agent ──▶ inference::DirectInferenceManager
//!              ├── inference::{RulePriorityIndex, TieredScan}
//!              ├── inference::{SatisfiabilityCache, TargetChecker}
//!              ├── logic::{TemplateManager, TemplateSearcher, LogicExpression}
//!              └── core::FactStore (KnowledgeBase)
//! ```
//!
//! | Módulo | Conteúdo |
//! |--------|----------|
//! | [`core`] | Entidades, relações, [`core::FactStore`] e a base em memória |
//! | [`logic`] | Padrões, bindings, fórmulas e seus avaliadores |
//! | [`inference`] | O loop de controle e seus componentes |
//! | [`agent`] | Serialização de execuções sobre uma base compartilhada |
//! | [`config`] | [`config::InferenceConfig`] |
//! | [`error`] | Erros internos (nenhum escapa de `apply_inference`) |

/// Módulo `agent` — agente que serializa pedidos de inferência.
pub mod agent;

/// Módulo `config` — parâmetros do motor.
pub mod config;

/// Módulo `core` — tipos fundamentais: Entity, Relation, FactStore, KnowledgeBase.
pub mod core;

/// Módulo `error` — erros da base, dos níveis de regras e do avaliador.
pub mod error;

/// Módulo `inference` — loop de controle da inferência direta.
pub mod inference;

/// Módulo `logic` — padrões, fórmulas e colaboradores do motor.
pub mod logic;
