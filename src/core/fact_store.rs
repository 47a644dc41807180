//! # FactStore — Interface de Acesso ao Grafo de Fatos
//!
//! O motor de inferência não conhece a implementação da base de fatos:
//! depende apenas desta interface. A [`KnowledgeBase`](super::KnowledgeBase)
//! em memória é a implementação padrão, mas qualquer adaptador para outro
//! mecanismo de armazenamento (ou um mock de testes) serve.
//!
//! ## Contrato de Ordem
//!
//! As consultas devolvem relações na **ordem nativa** da implementação.
//! Para a `KnowledgeBase`, essa ordem é a de inserção — o que torna a
//! ordem das regras dentro de um nível determinística.

use crate::error::StoreError;

use super::entity::{Entity, EntityId, EntityKind};
use super::relation::{Relation, RelationId, RelationKind};

/// Capacidades de leitura e escrita que o motor consome da base de fatos.
pub trait FactStore {
    /// `true` se a base contém a entidade.
    fn is_valid(&self, id: EntityId) -> bool;

    /// Busca uma entidade pelo handle.
    fn entity(&self, id: EntityId) -> Option<&Entity>;

    /// Relações de um tipo, opcionalmente restritas por origem e/ou destino.
    fn find_relations(
        &self,
        kind: &RelationKind,
        source: Option<EntityId>,
        target: Option<EntityId>,
    ) -> Vec<&Relation>;

    /// Todas as relações de `source` para `target`, de qualquer tipo.
    fn relations_between(&self, source: EntityId, target: EntityId) -> Vec<&Relation>;

    /// Cria uma entidade e retorna seu handle.
    fn create_entity(&mut self, label: &str, kind: EntityKind) -> EntityId;

    /// Cria uma relação entre duas entidades existentes.
    ///
    /// # Erros
    ///
    /// [`StoreError::UnknownEntity`] se um dos extremos não existir.
    fn create_relation(
        &mut self,
        kind: RelationKind,
        source: EntityId,
        target: EntityId,
    ) -> Result<RelationId, StoreError>;

    /// Remove uma relação. Retorna `false` se ela não existia.
    fn erase_relation(&mut self, id: RelationId) -> bool;

    /// Entidades alcançáveis a partir de `node` por um salto do tipo `kind`.
    fn related(&self, node: EntityId, kind: &RelationKind) -> Vec<EntityId> {
        self.find_relations(kind, Some(node), None)
            .into_iter()
            .map(|r| r.target)
            .collect()
    }

    /// `true` se já existe a relação `source --kind--> target`.
    fn relation_exists(&self, kind: &RelationKind, source: EntityId, target: EntityId) -> bool {
        !self
            .find_relations(kind, Some(source), Some(target))
            .is_empty()
    }
}
