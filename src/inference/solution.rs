//! # Artefato de Solução
//!
//! Toda inferência termina com uma entidade de solução na base — tanto no
//! sucesso quanto no fracasso. A solução carrega o veredito e os passos de
//! prova (as regras que dispararam com sucesso, em ordem):
//!
//! ```text
//! solução ✓ ──passo_1──▶ regra do pai
//!           ──passo_2──▶ regra do avô
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, EntityKind, FactStore, RelationKind};

/// Handle do artefato de solução devolvido por `apply_inference`.
pub type SolutionHandle = EntityId;

/// Constrói o artefato de solução a partir do veredito final.
pub trait SolutionBuilder<S: FactStore + ?Sized> {
    fn build(&self, store: &mut S, achieved: bool, steps: &[EntityId]) -> SolutionHandle;
}

/// Gerador padrão: uma entidade `Solution` com relações `ProofStep(n)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SolutionTreeGenerator;

impl<S: FactStore + ?Sized> SolutionBuilder<S> for SolutionTreeGenerator {
    fn build(&self, store: &mut S, achieved: bool, steps: &[EntityId]) -> SolutionHandle {
        let kind = EntityKind::Solution { achieved };
        let solution = store.create_entity(kind.label(), kind);
        for (n, &rule) in steps.iter().enumerate() {
            if let Err(e) = store.create_relation(RelationKind::ProofStep(n as u32 + 1), solution, rule) {
                tracing::warn!(error = %e, step = n + 1, "Passo de prova descartado");
            }
        }
        solution
    }
}

/// Leitura de um artefato de solução gravado na base.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub id: SolutionHandle,
    pub achieved: bool,
    /// Regras disparadas com sucesso, na ordem dos disparos.
    pub steps: Vec<EntityId>,
}

impl Solution {
    /// Lê a solução `id`; `None` se o handle não for uma solução.
    pub fn load<S: FactStore + ?Sized>(store: &S, id: SolutionHandle) -> Option<Self> {
        let EntityKind::Solution { achieved } = store.entity(id)?.kind else {
            return None;
        };
        let mut steps = Vec::new();
        let mut n = 1;
        loop {
            match store.related(id, &RelationKind::ProofStep(n)).first() {
                Some(rule) => steps.push(*rule),
                None => break,
            }
            n += 1;
        }
        Some(Self { id, achieved, steps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::KnowledgeBase;
    use crate::logic::Formula;

    #[test]
    fn failed_solution_is_still_a_valid_entity() {
        let mut kb = KnowledgeBase::new();
        let id = SolutionTreeGenerator.build(&mut kb, false, &[]);
        assert!(kb.is_valid(id));
        let solution = Solution::load(&kb, id).unwrap();
        assert!(!solution.achieved);
        assert!(solution.steps.is_empty());
    }

    #[test]
    fn steps_keep_firing_order() {
        let mut kb = KnowledgeBase::new();
        let r1 = kb.add_rule("r1", Formula::Atom(Default::default()));
        let r2 = kb.add_rule("r2", Formula::Atom(Default::default()));
        let id = SolutionTreeGenerator.build(&mut kb, true, &[r2, r1, r2]);

        let solution = Solution::load(&kb, id).unwrap();
        assert!(solution.achieved);
        assert_eq!(solution.steps, vec![r2, r1, r2]);
    }

    #[test]
    fn load_rejects_non_solution_entities() {
        let mut kb = KnowledgeBase::new();
        let ana = kb.add_concept("Ana");
        assert_eq!(Solution::load(&kb, ana), None);
    }
}
