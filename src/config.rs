//! # Configuração do Motor de Inferência
//!
//! | Campo | Padrão | Variável de ambiente |
//! |-------|--------|----------------------|
//! | `default_model` | [`KNOWLEDGE_BASE_ROOT`] | — |
//! | `max_stalled_restarts` | `1_000` | `INFERENCE_MAX_STALLED_RESTARTS` (`0` desliga o limite) |
//!
//! Um recomeço "parado" é um disparo bem-sucedido que não gerou nenhuma
//! relação. Disparos que falham e disparos que fazem a base crescer não
//! contam, então o limite só interrompe execuções que giram sem progresso.

use crate::core::{EntityId, KNOWLEDGE_BASE_ROOT};

/// Limite padrão de recomeços consecutivos sem progresso.
pub const DEFAULT_MAX_STALLED_RESTARTS: usize = 1_000;

/// Parâmetros de uma execução de [`DirectInferenceManager`](crate::inference::DirectInferenceManager).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InferenceConfig {
    /// Contexto de avaliação usado quando não há estrutura de entrada.
    pub default_model: EntityId,

    /// Máximo de disparos bem-sucedidos seguidos sem gerar relações;
    /// `None` = sem limite.
    ///
    /// Regras cuja fórmula vale `true` sem gerar fatos reiniciam a varredura
    /// indefinidamente; o limite encerra a execução com o veredito atual.
    /// Qualquer disparo que gera relações zera a contagem.
    pub max_stalled_restarts: Option<usize>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            default_model: KNOWLEDGE_BASE_ROOT,
            max_stalled_restarts: Some(DEFAULT_MAX_STALLED_RESTARTS),
        }
    }
}

impl InferenceConfig {
    /// Configuração padrão sobrescrita por variáveis de ambiente.
    ///
    /// Valores inválidos são ignorados com um log `warn`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var("INFERENCE_MAX_STALLED_RESTARTS") {
            match raw.trim().parse::<usize>() {
                Ok(0) => config.max_stalled_restarts = None,
                Ok(n) => config.max_stalled_restarts = Some(n),
                Err(e) => {
                    tracing::warn!(value = %raw, error = %e, "INFERENCE_MAX_STALLED_RESTARTS inválido, usando padrão")
                }
            }
        }
        config
    }

    pub fn with_max_stalled_restarts(mut self, max_stalled_restarts: Option<usize>) -> Self {
        self.max_stalled_restarts = max_stalled_restarts;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_knowledge_base_root() {
        let config = InferenceConfig::default();
        assert_eq!(config.default_model, KNOWLEDGE_BASE_ROOT);
        assert_eq!(config.max_stalled_restarts, Some(DEFAULT_MAX_STALLED_RESTARTS));
    }

    #[test]
    fn builder_overrides_limit() {
        let config = InferenceConfig::default().with_max_stalled_restarts(None);
        assert_eq!(config.max_stalled_restarts, None);
    }
}
