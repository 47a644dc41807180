//! # Relation — Aresta Tipada Entre Entidades
//!
//! Uma [`Relation`] liga duas [`Entity`](super::Entity)s com um tipo
//! ([`RelationKind`]). Todo fato da base é uma relação: "Ana pai_de Bruno",
//! "estrutura ∋ Ana", "regra → fórmula".
//!
//! ## Tipos de Relação
//!
//! | Tipo | Origem → Destino | Uso |
//! |------|------------------|-----|
//! | `Membership` | estrutura → elemento | estruturas de entrada/saída, níveis de regras |
//! | `Ordinal(n)` | conjunto de regras → nível | posição `n` na cadeia de prioridade |
//! | `MainKey` | regra → fórmula | nó-chave da fórmula da regra |
//! | `Satisfiable(b)` | regra → modelo | registro de satisfatibilidade |
//! | `ProofStep(n)` | solução → regra | n-ésimo disparo bem-sucedido |
//! | `Custom(nome)` | qualquer → qualquer | fatos do domínio |
//!
//! ## Exemplo
//!
//! ```text
//! Relation {
//!     kind: Custom("pai_de"),
//!     source: "Ana",
//!     target: "Bruno",
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::EntityId;

/// Alias de tipo para o identificador de uma [Relation].
pub type RelationId = Uuid;

/// Tipo de uma relação binária.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    /// "∋" — pertinência a uma estrutura ou a um nível de regras.
    Membership,

    /// "rrel_n" — papel posicional; ordena os níveis de um conjunto de regras.
    Ordinal(u32),

    /// "nó-chave" — liga uma regra à raiz da sua fórmula.
    MainKey,

    /// Veredito de satisfatibilidade de uma regra num modelo.
    Satisfiable(bool),

    /// Passo de prova: liga a solução à n-ésima regra disparada com sucesso.
    ProofStep(u32),

    /// Relação de domínio nomeada (ex: "pai_de").
    Custom(String),
}

impl RelationKind {
    /// Atalho para relações de domínio.
    pub fn custom(name: impl Into<String>) -> Self {
        RelationKind::Custom(name.into())
    }

    /// `true` para os registros de satisfatibilidade, de qualquer polaridade.
    pub fn is_satisfiability(&self) -> bool {
        matches!(self, RelationKind::Satisfiable(_))
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::Membership => write!(f, "∋"),
            RelationKind::Ordinal(n) => write!(f, "rrel_{}", n),
            RelationKind::MainKey => write!(f, "nó-chave"),
            RelationKind::Satisfiable(true) => write!(f, "satisfatível"),
            RelationKind::Satisfiable(false) => write!(f, "insatisfatível"),
            RelationKind::ProofStep(n) => write!(f, "passo_{}", n),
            RelationKind::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// Fato binário na base de conhecimento.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Relation {
    /// Identificador único (UUID v4).
    pub id: RelationId,

    /// Tipo da relação.
    pub kind: RelationKind,

    /// Entidade de origem.
    pub source: EntityId,

    /// Entidade de destino.
    pub target: EntityId,
}

impl Relation {
    pub fn new(kind: RelationKind, source: EntityId, target: EntityId) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            source,
            target,
        }
    }
}
