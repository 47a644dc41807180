//! # Cache de Satisfatibilidade
//!
//! Depois de cada disparo, o motor grava na própria base o veredito da regra
//! no contexto de avaliação (o "modelo"):
//!
//! ```text
//! regra ──satisfatível──▶ modelo      (disparo retornou true)
//! regra ──insatisfatível──▶ modelo    (disparo retornou false)
//! ```
//!
//! Há no máximo um registro por par `(regra, modelo)`: o anterior é apagado
//! antes de o novo ser escrito. O motor **não** consulta estes registros para
//! pular regras — eles existem para consumidores externos.

use crate::core::{EntityId, FactStore, RelationId, RelationKind};
use crate::error::StoreError;

/// Operações sobre os registros de satisfatibilidade — struct sem estado.
pub struct SatisfiabilityCache;

impl SatisfiabilityCache {
    /// Remove qualquer registro de `(rule, model)`. Idempotente.
    ///
    /// Retorna quantos registros foram apagados.
    pub fn clear<S: FactStore + ?Sized>(store: &mut S, rule: EntityId, model: EntityId) -> usize {
        let stale: Vec<RelationId> = store
            .relations_between(rule, model)
            .into_iter()
            .filter(|r| r.kind.is_satisfiability())
            .map(|r| r.id)
            .collect();
        stale.into_iter().filter(|id| store.erase_relation(*id)).count()
    }

    /// Substitui o registro de `(rule, model)` pelo veredito `satisfiable`.
    ///
    /// # Erros
    ///
    /// [`StoreError::UnknownEntity`] se a regra ou o modelo não existirem.
    pub fn record<S: FactStore + ?Sized>(
        store: &mut S,
        rule: EntityId,
        model: EntityId,
        satisfiable: bool,
    ) -> Result<RelationId, StoreError> {
        Self::clear(store, rule, model);
        store.create_relation(RelationKind::Satisfiable(satisfiable), rule, model)
    }

    /// Veredito atual de `(rule, model)`, se houver.
    pub fn verdict<S: FactStore + ?Sized>(store: &S, rule: EntityId, model: EntityId) -> Option<bool> {
        store
            .relations_between(rule, model)
            .into_iter()
            .find_map(|r| match r.kind {
                RelationKind::Satisfiable(value) => Some(value),
                _ => None,
            })
    }

    /// Número de registros existentes para `(rule, model)`.
    pub fn record_count<S: FactStore + ?Sized>(store: &S, rule: EntityId, model: EntityId) -> usize {
        store
            .relations_between(rule, model)
            .into_iter()
            .filter(|r| r.kind.is_satisfiability())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{KnowledgeBase, KNOWLEDGE_BASE_ROOT};
    use crate::logic::Formula;
    use uuid::Uuid;

    #[test]
    fn record_replaces_previous_verdict() {
        let mut kb = KnowledgeBase::new();
        let rule = kb.add_rule("r", Formula::Atom(Default::default()));

        SatisfiabilityCache::record(&mut kb, rule, KNOWLEDGE_BASE_ROOT, false).unwrap();
        SatisfiabilityCache::record(&mut kb, rule, KNOWLEDGE_BASE_ROOT, true).unwrap();

        assert_eq!(SatisfiabilityCache::record_count(&kb, rule, KNOWLEDGE_BASE_ROOT), 1);
        assert_eq!(SatisfiabilityCache::verdict(&kb, rule, KNOWLEDGE_BASE_ROOT), Some(true));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut kb = KnowledgeBase::new();
        let rule = kb.add_rule("r", Formula::Atom(Default::default()));
        SatisfiabilityCache::record(&mut kb, rule, KNOWLEDGE_BASE_ROOT, true).unwrap();

        assert_eq!(SatisfiabilityCache::clear(&mut kb, rule, KNOWLEDGE_BASE_ROOT), 1);
        assert_eq!(SatisfiabilityCache::clear(&mut kb, rule, KNOWLEDGE_BASE_ROOT), 0);
        assert_eq!(SatisfiabilityCache::verdict(&kb, rule, KNOWLEDGE_BASE_ROOT), None);
    }

    #[test]
    fn clear_keeps_other_relations() {
        let mut kb = KnowledgeBase::new();
        let rule = kb.add_rule("r", Formula::Atom(Default::default()));
        kb.add_fact("anotado_em", rule, KNOWLEDGE_BASE_ROOT).unwrap();
        SatisfiabilityCache::record(&mut kb, rule, KNOWLEDGE_BASE_ROOT, false).unwrap();

        SatisfiabilityCache::clear(&mut kb, rule, KNOWLEDGE_BASE_ROOT);
        assert!(kb.relation_exists_between("anotado_em", rule, KNOWLEDGE_BASE_ROOT));
    }

    #[test]
    fn verdicts_are_scoped_by_model() {
        let mut kb = KnowledgeBase::new();
        let rule = kb.add_rule("r", Formula::Atom(Default::default()));
        let other = kb.add_structure("outro modelo", &[]).unwrap();
        SatisfiabilityCache::record(&mut kb, rule, KNOWLEDGE_BASE_ROOT, true).unwrap();
        SatisfiabilityCache::record(&mut kb, rule, other, false).unwrap();

        assert_eq!(SatisfiabilityCache::verdict(&kb, rule, KNOWLEDGE_BASE_ROOT), Some(true));
        assert_eq!(SatisfiabilityCache::verdict(&kb, rule, other), Some(false));
    }

    #[test]
    fn record_against_unknown_model_fails() {
        let mut kb = KnowledgeBase::new();
        let rule = kb.add_rule("r", Formula::Atom(Default::default()));
        let ghost = Uuid::new_v4();
        assert_eq!(
            SatisfiabilityCache::record(&mut kb, rule, ghost, true),
            Err(StoreError::UnknownEntity(ghost))
        );
    }
}
