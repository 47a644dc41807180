//! # Verificação do Alvo
//!
//! O alvo é alcançado quando algum binding das variáveis livres do padrão,
//! tirado da lista de argumentos, já vale na base. Os bindings são
//! consumidos preguiçosamente e a verificação para no primeiro acerto —
//! ela roda depois de cada disparo bem-sucedido.

use crate::core::{EntityId, FactStore};
use crate::logic::{BindingEnumerator, Pattern, PatternMatcher, SearchScope};

/// Testa se o padrão-alvo já vale para algum binding dos argumentos.
pub struct TargetChecker<'c, S: FactStore + ?Sized> {
    enumerator: &'c dyn BindingEnumerator,
    matcher: &'c dyn PatternMatcher<S>,
}

impl<'c, S: FactStore + ?Sized> TargetChecker<'c, S> {
    pub fn new(enumerator: &'c dyn BindingEnumerator, matcher: &'c dyn PatternMatcher<S>) -> Self {
        Self {
            enumerator,
            matcher,
        }
    }

    pub fn is_achieved(
        &self,
        store: &S,
        scope: &SearchScope,
        target: &Pattern,
        arguments: &[EntityId],
    ) -> bool {
        let achieved = self
            .enumerator
            .enumerate(target, arguments)
            .any(|binding| self.matcher.matches(store, scope, target, &binding));
        tracing::trace!(achieved, arguments = arguments.len(), "Alvo verificado");
        achieved
    }
}
