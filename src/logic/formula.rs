//! # Fórmulas Lógicas das Regras
//!
//! Cada regra aponta (via `MainKey`) para um nó de fórmula; a base guarda a
//! árvore [`Formula`] codificada por esse nó. O [`LogicExpression`] avalia a
//! árvore contra a base e, quando a raiz é uma implicação, gera os fatos da
//! conclusão.
//!
//! ## Semântica
//!
//! | Nó | Resultado |
//! |----|-----------|
//! | `Atom(p)` | bindings sob os quais `p` vale |
//! | `And(fs)` | join sucessivo dos filhos |
//! | `Or(fs)` | união dos bindings dos filhos |
//! | `Not(f)` | bindings para os quais `f` não tem solução (negação por falha) |
//! | `Implies` (raiz) | gera a conclusão para cada solução da premissa |
//!
//! Uma raiz que não é implicação vale `true` se tem ao menos uma solução,
//! sem efeitos colaterais. Uma implicação vale `true` somente se gerou ao
//! menos um fato novo — premissas já exploradas não produzem `true` de novo.
//!
//! ```text
//! pai_de(?x, ?y) ∧ pai_de(?y, ?z)  ⇒  avô_de(?x, ?z)
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, FactStore, RelationId};
use crate::error::EvaluationError;

use super::pattern::{Binding, Pattern, SearchScope};
use super::template::TemplateSearcher;

/// Árvore de uma fórmula lógica.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Formula {
    Atom(Pattern),
    Not(Box<Formula>),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Implies {
        premise: Box<Formula>,
        conclusion: Pattern,
    },
}

impl Formula {
    /// Atalho para `premissa ⇒ conclusão`.
    pub fn implies(premise: Formula, conclusion: Pattern) -> Self {
        Formula::Implies {
            premise: Box::new(premise),
            conclusion,
        }
    }

    pub fn negate(inner: Formula) -> Self {
        Formula::Not(Box::new(inner))
    }
}

/// Acesso à fórmula codificada por um nó.
pub trait FormulaStore {
    fn formula(&self, node: EntityId) -> Option<&Formula>;
}

/// Estado da inferência visível ao avaliador durante um disparo.
pub struct EvaluationContext<'a> {
    /// Lista de argumentos — só cresce.
    pub arguments: &'a mut Vec<EntityId>,
    /// Parâmetros visíveis à busca.
    pub scope: &'a mut SearchScope,
    /// Estrutura de saída, se houver.
    pub output: Option<EntityId>,
}

/// Resultado da avaliação de uma fórmula.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormulaResult {
    /// Valor de verdade da fórmula.
    pub value: bool,
    /// Relações criadas como efeito colateral.
    pub generated: Vec<RelationId>,
}

/// Avalia a fórmula enraizada num nó, podendo gerar fatos novos.
pub trait FormulaEvaluator<S: FactStore + ?Sized> {
    fn evaluate(
        &mut self,
        store: &mut S,
        root: EntityId,
        ctx: &mut EvaluationContext<'_>,
    ) -> Result<FormulaResult, EvaluationError>;
}

/// Avaliador padrão de [`Formula`]s sobre a base de fatos.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogicExpression {
    searcher: TemplateSearcher,
}

impl LogicExpression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Todos os bindings que satisfazem `formula`, estendendo `seeds`.
    fn solve<S: FactStore + ?Sized>(
        &self,
        store: &S,
        scope: &SearchScope,
        formula: &Formula,
        seeds: Vec<Binding>,
        root: EntityId,
    ) -> Result<Vec<Binding>, EvaluationError> {
        match formula {
            Formula::Atom(pattern) => Ok(seeds
                .iter()
                .flat_map(|seed| self.searcher.search(store, scope, pattern, seed, None))
                .collect()),
            Formula::And(parts) => parts
                .iter()
                .try_fold(seeds, |acc, part| self.solve(store, scope, part, acc, root)),
            Formula::Or(parts) => {
                let mut solutions: Vec<Binding> = Vec::new();
                for part in parts {
                    for binding in self.solve(store, scope, part, seeds.clone(), root)? {
                        if !solutions.contains(&binding) {
                            solutions.push(binding);
                        }
                    }
                }
                Ok(solutions)
            }
            Formula::Not(inner) => {
                let mut solutions = Vec::new();
                for seed in seeds {
                    if self
                        .solve(store, scope, inner, vec![seed.clone()], root)?
                        .is_empty()
                    {
                        solutions.push(seed);
                    }
                }
                Ok(solutions)
            }
            Formula::Implies { .. } => Err(EvaluationError::NestedImplication(root)),
        }
    }
}

impl<S: FactStore + FormulaStore + ?Sized> FormulaEvaluator<S> for LogicExpression {
    fn evaluate(
        &mut self,
        store: &mut S,
        root: EntityId,
        ctx: &mut EvaluationContext<'_>,
    ) -> Result<FormulaResult, EvaluationError> {
        // Clonada para liberar a base durante a geração
        let formula = store
            .formula(root)
            .cloned()
            .ok_or(EvaluationError::MissingFormula(root))?;

        match formula {
            Formula::Implies {
                premise,
                conclusion,
            } => {
                let matches = self.solve(&*store, ctx.scope, &premise, vec![Binding::new()], root)?;
                let mut generated = Vec::new();
                for binding in &matches {
                    generated.extend(self.searcher.generate_statement(
                        store,
                        ctx.scope,
                        &conclusion,
                        binding,
                        ctx.arguments,
                        ctx.output,
                    )?);
                }
                tracing::debug!(
                    premise_matches = matches.len(),
                    generated = generated.len(),
                    "Implicação avaliada"
                );
                Ok(FormulaResult {
                    value: !generated.is_empty(),
                    generated,
                })
            }
            other => {
                let matches = self.solve(&*store, ctx.scope, &other, vec![Binding::new()], root)?;
                Ok(FormulaResult {
                    value: !matches.is_empty(),
                    generated: Vec::new(),
                })
            }
        }
    }
}
