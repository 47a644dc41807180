//! # Módulo Core — Base de Fatos
//!
//! Tipos fundamentais do grafo de fatos sobre o qual o motor de inferência
//! trabalha:
//!
//! - [`Entity`] / [`EntityKind`] — nós do grafo (conceitos, regras, estruturas...)
//! - [`Relation`] / [`RelationKind`] — arestas tipadas entre entidades
//! - [`FactStore`] — interface que o motor consome
//! - [`KnowledgeBase`] — implementação em memória de [`FactStore`]
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use direct_inference::core::{FactStore, KnowledgeBase, RelationKind};
//!
//! let mut kb = KnowledgeBase::new();
//! let ana = kb.add_concept("Ana");
//! let entrada = kb.add_structure("entrada", &[ana]).unwrap();
//!
//! assert_eq!(kb.related(entrada, &RelationKind::Membership), vec![ana]);
//! ```

/// Sub-módulo com [`Entity`] e [`EntityKind`].
pub mod entity;

/// Sub-módulo com [`Relation`] e [`RelationKind`].
pub mod relation;

/// Sub-módulo com a interface [`FactStore`].
pub mod fact_store;

/// Sub-módulo com a [`KnowledgeBase`] em memória.
pub mod knowledge_base;

pub use entity::{Entity, EntityId, EntityKind};
pub use fact_store::FactStore;
pub use knowledge_base::{KnowledgeBase, KNOWLEDGE_BASE_ROOT};
pub use relation::{Relation, RelationId, RelationKind};
