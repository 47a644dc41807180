//! # Módulo Inference — Inferência Direta (Forward Chaining)
//!
//! Este módulo contém o **loop de controle** do motor: dado um padrão-alvo,
//! um conjunto de regras em níveis de prioridade e uma estrutura de entrada,
//! dispara regras até provar o alvo ou esgotar os níveis.
//!
//! ## Componentes
//!
//! | Componente | Papel |
//! |------------|-------|
//! | [`DirectInferenceManager`] | Loop de controle, ponto de entrada `apply_inference` |
//! | [`RulePriorityIndex`] | Lê a cadeia de níveis de um conjunto de regras |
//! | [`TieredScan`] | Cursor sobre os níveis, com recomeço do nível 0 |
//! | [`SatisfiabilityCache`] | Veredito por `(regra, modelo)` gravado na base |
//! | [`TargetChecker`] | Testa se o alvo já vale para algum binding |
//! | [`SolutionTreeGenerator`] | Artefato de solução com os passos de prova |
//!
//! ## Exemplo
//!
//! ```text
//! base:   pai_de(Ana, Bruno), pai_de(Bruno, Carla)
//! regra:  pai_de(?x, ?y) ∧ pai_de(?y, ?z) ⇒ avô_de(?x, ?z)
//! alvo:   avô_de(?a, ?b)
//! →       avô_de(Ana, Carla) gerado, solução ✓ com um passo
//! ```

/// Sub-módulo do índice de prioridade das regras.
pub mod priority;

/// Sub-módulo da varredura por níveis.
pub mod scan;

/// Sub-módulo do cache de satisfatibilidade.
pub mod satisfiability;

/// Sub-módulo do verificador de alvo.
pub mod target;

/// Sub-módulo do artefato de solução.
pub mod solution;

/// Sub-módulo do loop de controle.
pub mod manager;

pub use manager::DirectInferenceManager;
pub use priority::{RulePriorityIndex, RuleQueue};
pub use satisfiability::SatisfiabilityCache;
pub use scan::TieredScan;
pub use solution::{Solution, SolutionBuilder, SolutionHandle, SolutionTreeGenerator};
pub use target::TargetChecker;
