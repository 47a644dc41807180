//! # Módulo Logic — Colaboradores do Motor de Inferência
//!
//! Tudo o que o loop de controle consome, mas não implementa:
//!
//! - [`Pattern`], [`Term`], [`Binding`] — templates com variáveis livres
//! - [`BindingEnumerator`] / [`TemplateManager`] — bindings candidatos a partir dos argumentos
//! - [`PatternMatcher`] / [`TemplateSearcher`] — busca e geração de padrões
//! - [`Formula`], [`FormulaEvaluator`] / [`LogicExpression`] — avaliação das fórmulas das regras
//!
//! O motor depende apenas das traits; as structs são as implementações padrão.

/// Sub-módulo de padrões, bindings e escopo de busca.
pub mod pattern;

/// Sub-módulo do enumerador de bindings e do buscador de templates.
pub mod template;

/// Sub-módulo das fórmulas lógicas e do avaliador.
pub mod formula;

pub use formula::{
    EvaluationContext, Formula, FormulaEvaluator, FormulaResult, FormulaStore, LogicExpression,
};
pub use pattern::{Binding, Pattern, SearchScope, Term, Triple};
pub use template::{BindingEnumerator, PatternMatcher, TemplateManager, TemplateSearcher};
