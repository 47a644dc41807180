//! # Erros do Motor de Inferência
//!
//! Taxonomia de erros usada pelos componentes internos. Nenhum destes erros
//! escapa de [`apply_inference()`](crate::inference::DirectInferenceManager::apply_inference):
//! o gerenciador registra o erro via `tracing` e segue com o comportamento
//! de fallback correspondente.
//!
//! | Erro | Origem | Tratamento no loop |
//! |------|--------|--------------------|
//! | [`StoreError`] | Base de fatos | Log `warn`, registro ignorado |
//! | [`TierError`] | Índice de prioridade | Log `error`, "nenhuma regra disponível" |
//! | [`EvaluationError`] | Avaliador de fórmulas | Log `warn`, regra conta como não usada |

use thiserror::Error;

use crate::core::EntityId;

/// Falhas de escrita na base de fatos.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Um dos extremos da relação não existe na base.
    #[error("entidade desconhecida: {0}")]
    UnknownEntity(EntityId),
}

/// Erro estrutural na cadeia posicional de um conjunto de regras.
///
/// Sinalizado por [`RulePriorityIndex::build()`](crate::inference::RulePriorityIndex::build)
/// e consumido pelo loop de controle como "nenhuma regra disponível".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TierError {
    /// Mais de um nível ocupa a mesma posição da cadeia.
    #[error("conjunto de regras {rule_set}: {count} níveis na posição {position}")]
    AmbiguousPosition {
        rule_set: EntityId,
        position: u32,
        count: usize,
    },

    /// O mesmo nível aparece em duas posições (a cadeia volta sobre si mesma).
    #[error("conjunto de regras {rule_set}: nível {tier} repetido na posição {position}")]
    RepeatedTier {
        rule_set: EntityId,
        tier: EntityId,
        position: u32,
    },
}

/// Falhas do avaliador de fórmulas.
///
/// Condições rotineiras ("regra não aplicável") nunca viram erro — são
/// expressas como `value = false` em [`FormulaResult`](crate::logic::FormulaResult).
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// O nó-chave da regra não tem fórmula associada na base.
    #[error("nó {0} não codifica nenhuma fórmula")]
    MissingFormula(EntityId),

    /// Implicações só são aceitas na raiz da fórmula.
    #[error("implicação aninhada em {0}")]
    NestedImplication(EntityId),

    #[error(transparent)]
    Store(#[from] StoreError),
}
