//! # Índice de Prioridade das Regras
//!
//! Um conjunto de regras organiza seus níveis numa cadeia posicional:
//!
//! ```text
//! conjunto ──rrel_1──▶ nível 1 ──∋──▶ { r1, r2 }
//!          ──rrel_2──▶ nível 2 ──∋──▶ { r3 }
//!          ──rrel_3──▶ (ausente: fim da cadeia)
//! ```
//!
//! O [`RulePriorityIndex`] lê essa cadeia uma única vez por inferência e
//! produz uma fila FIFO de regras por nível, em ordem crescente de posição.

use std::collections::{HashSet, VecDeque};

use crate::core::{EntityId, FactStore, RelationKind};
use crate::error::TierError;

/// Fila FIFO das regras de um nível.
pub type RuleQueue = VecDeque<EntityId>;

/// Regras agrupadas por nível de prioridade.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RulePriorityIndex {
    tiers: Vec<RuleQueue>,
}

impl RulePriorityIndex {
    /// Lê a cadeia posicional de `rule_set`.
    ///
    /// - Handle inválido ou sem `rrel_1` → índice vazio (não é erro)
    /// - A leitura para no primeiro `rrel_n` ausente
    /// - Dentro de um nível, as regras seguem a ordem nativa da base
    ///
    /// # Erros
    ///
    /// [`TierError`] se a cadeia for ambígua (dois níveis na mesma posição)
    /// ou repetir um nível já lido.
    pub fn build<S: FactStore + ?Sized>(store: &S, rule_set: EntityId) -> Result<Self, TierError> {
        let mut tiers = Vec::new();
        if !store.is_valid(rule_set) {
            return Ok(Self { tiers });
        }

        let mut seen = HashSet::new();
        let mut position = 1u32;
        loop {
            let found = store.related(rule_set, &RelationKind::Ordinal(position));
            let tier = match found.as_slice() {
                [] => break,
                [tier] => *tier,
                _ => {
                    return Err(TierError::AmbiguousPosition {
                        rule_set,
                        position,
                        count: found.len(),
                    })
                }
            };
            if !seen.insert(tier) {
                return Err(TierError::RepeatedTier {
                    rule_set,
                    tier,
                    position,
                });
            }
            let rules: RuleQueue = store.related(tier, &RelationKind::Membership).into();
            tracing::trace!(position, rules = rules.len(), "Nível de regras lido");
            tiers.push(rules);
            position += 1;
        }

        Ok(Self { tiers })
    }

    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Cópia da fila do nível `index` — mutá-la não altera o índice.
    pub fn queue(&self, index: usize) -> Option<RuleQueue> {
        self.tiers.get(index).cloned()
    }

    /// Total de regras em todos os níveis.
    pub fn rule_count(&self) -> usize {
        self.tiers.iter().map(VecDeque::len).sum()
    }
}

impl From<Vec<Vec<EntityId>>> for RulePriorityIndex {
    fn from(tiers: Vec<Vec<EntityId>>) -> Self {
        Self {
            tiers: tiers.into_iter().map(RuleQueue::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EntityKind, KnowledgeBase};
    use crate::logic::Formula;
    use uuid::Uuid;

    fn rule(kb: &mut KnowledgeBase, label: &str) -> EntityId {
        kb.add_rule(label, Formula::Atom(Default::default()))
    }

    #[test]
    fn tiers_follow_ordinal_chain() {
        let mut kb = KnowledgeBase::new();
        let (r1, r2, r3) = (rule(&mut kb, "r1"), rule(&mut kb, "r2"), rule(&mut kb, "r3"));
        let set = kb.add_rule_set("regras", &[vec![r1, r2], vec![r3]]).unwrap();

        let index = RulePriorityIndex::build(&kb, set).unwrap();
        assert_eq!(index.tier_count(), 2);
        assert_eq!(index.rule_count(), 3);
        assert_eq!(index.queue(0), Some(RuleQueue::from(vec![r1, r2])));
        assert_eq!(index.queue(1), Some(RuleQueue::from(vec![r3])));
        assert_eq!(index.queue(2), None);
    }

    #[test]
    fn invalid_handle_yields_empty_index() {
        let kb = KnowledgeBase::new();
        let index = RulePriorityIndex::build(&kb, Uuid::new_v4()).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn set_without_first_tier_is_empty() {
        let mut kb = KnowledgeBase::new();
        let set = kb.create_entity("sem níveis", EntityKind::RuleSet);
        let tier = kb.create_entity("órfão", EntityKind::RuleTier);
        kb.add_relation(RelationKind::Ordinal(2), set, tier).unwrap();
        assert!(RulePriorityIndex::build(&kb, set).unwrap().is_empty());
    }

    #[test]
    fn gap_in_chain_stops_traversal() {
        let mut kb = KnowledgeBase::new();
        let r1 = rule(&mut kb, "r1");
        let r3 = rule(&mut kb, "r3");
        let set = kb.add_rule_set("regras", &[vec![r1]]).unwrap();
        let late = kb.add_structure("nível 3", &[r3]).unwrap();
        kb.add_relation(RelationKind::Ordinal(3), set, late).unwrap();

        let index = RulePriorityIndex::build(&kb, set).unwrap();
        assert_eq!(index.tier_count(), 1);
    }

    #[test]
    fn ambiguous_position_is_structural_error() {
        let mut kb = KnowledgeBase::new();
        let r1 = rule(&mut kb, "r1");
        let set = kb.add_rule_set("regras", &[vec![r1]]).unwrap();
        let other = kb.add_structure("outro nível 1", &[r1]).unwrap();
        kb.add_relation(RelationKind::Ordinal(1), set, other).unwrap();

        assert_eq!(
            RulePriorityIndex::build(&kb, set),
            Err(TierError::AmbiguousPosition {
                rule_set: set,
                position: 1,
                count: 2
            })
        );
    }

    #[test]
    fn repeated_tier_is_structural_error() {
        let mut kb = KnowledgeBase::new();
        let r1 = rule(&mut kb, "r1");
        let set = kb.add_rule_set("regras", &[vec![r1]]).unwrap();
        let first = kb.related(set, &RelationKind::Ordinal(1))[0];
        kb.add_relation(RelationKind::Ordinal(2), set, first).unwrap();

        assert!(matches!(
            RulePriorityIndex::build(&kb, set),
            Err(TierError::RepeatedTier { position: 2, .. })
        ));
    }

    #[test]
    fn queue_is_a_copy() {
        let index = RulePriorityIndex::from(vec![vec![Uuid::new_v4(), Uuid::new_v4()]]);
        let mut queue = index.queue(0).unwrap();
        queue.pop_front();
        assert_eq!(index.queue(0).unwrap().len(), 2);
    }
}
