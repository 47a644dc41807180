//! # Entity — Nó da Base de Fatos
//!
//! Uma [`Entity`] é qualquer nó do grafo de fatos: um conceito do domínio
//! ("Ana", "Bruno"), uma estrutura que agrupa fatos de entrada, uma regra,
//! o nó-raiz da fórmula de uma regra, ou o artefato de solução produzido
//! ao final de uma inferência.
//!
//! ## Identidade
//!
//! Entidades são referenciadas por [`EntityId`] (UUID v4). O handle é
//! estável e imutável: duas referências são iguais se e somente se apontam
//! para o mesmo nó. Um handle é **válido** enquanto a base o contiver.
//!
//! ## Tipos de Entidade ([`EntityKind`])
//!
//! | Tipo | Papel | Exemplo |
//! |------|-------|---------|
//! | `Concept` | Entidade do domínio, candidata a argumento | "Ana" |
//! | `Structure` | Agrupa elementos via `Membership` | estrutura de entrada |
//! | `RuleSet` | Ordena níveis via `Ordinal(n)` | "regras de parentesco" |
//! | `RuleTier` | Grupo não ordenado de regras | nível 1 |
//! | `Rule` | Aponta para o nó-chave da fórmula | "regra do avô" |
//! | `Formula` | Raiz da fórmula lógica de uma regra | `pai(x,y) ∧ pai(y,z) ⇒ avô(x,z)` |
//! | `Solution` | Resultado da inferência | solução ✓ |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Alias de tipo para o identificador de uma [Entity].
///
/// Utiliza UUID v4 para garantir unicidade sem coordenação central.
pub type EntityId = Uuid;

/// Classificação de uma entidade na base de fatos.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Entidade genérica do domínio — é o tipo que compõe a lista de argumentos.
    Concept,
    /// Estrutura que agrupa elementos (ex: a estrutura de fatos de entrada).
    Structure,
    /// Conjunto de regras organizado em níveis de prioridade.
    RuleSet,
    /// Um nível de prioridade dentro de um conjunto de regras.
    RuleTier,
    /// Regra de inferência.
    Rule,
    /// Nó-raiz de uma fórmula lógica.
    Formula,
    /// Artefato de solução, com o veredito final da inferência.
    Solution { achieved: bool },
}

impl EntityKind {
    /// Retorna o label legível em PT-BR do tipo de entidade.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Concept => "conceito",
            EntityKind::Structure => "estrutura",
            EntityKind::RuleSet => "conjunto de regras",
            EntityKind::RuleTier => "nível de regras",
            EntityKind::Rule => "regra",
            EntityKind::Formula => "fórmula",
            EntityKind::Solution { achieved: true } => "solução ✓",
            EntityKind::Solution { achieved: false } => "solução ✗",
        }
    }
}

/// Nó da base de fatos.
///
/// Toda entidade pertence à [`KnowledgeBase`](super::KnowledgeBase); o motor
/// de inferência nunca cria nem destrói entidades diretamente, apenas através
/// dos colaboradores (avaliador de fórmulas, gerador de soluções).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entity {
    /// Identificador único (UUID v4).
    pub id: EntityId,

    /// Nome legível (ex: "Ana", "regra do avô").
    pub label: String,

    /// Tipo da entidade. Veja [`EntityKind`].
    pub kind: EntityKind,

    /// Timestamp de criação.
    pub created_at: DateTime<Utc>,
}

impl Entity {
    /// Cria uma nova entidade com UUID v4 aleatório.
    pub fn new(label: impl Into<String>, kind: EntityKind) -> Self {
        Self::with_id(Uuid::new_v4(), label, kind)
    }

    /// Cria uma entidade com identificador fixo.
    ///
    /// Usado para keynodes bem conhecidos, como a raiz da base de
    /// conhecimento ([`KNOWLEDGE_BASE_ROOT`](super::KNOWLEDGE_BASE_ROOT)).
    pub fn with_id(id: EntityId, label: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            id,
            label: label.into(),
            kind,
            created_at: Utc::now(),
        }
    }

    /// `true` se a entidade é do tipo genérico "conceito".
    pub fn is_concept(&self) -> bool {
        self.kind == EntityKind::Concept
    }
}
