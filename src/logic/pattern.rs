//! # Padrões — Templates com Variáveis Livres
//!
//! Um [`Pattern`] é uma conjunção de triplas `(origem, tipo, destino)` em que
//! origem e destino podem ser entidades concretas ou variáveis livres:
//!
//! ```text
//! avô_de(?x, ?z)                     → [ (?x, avô_de, ?z) ]
//! pai_de(?x, ?y) ∧ pai_de(?y, ?z)    → [ (?x, pai_de, ?y), (?y, pai_de, ?z) ]
//! ```
//!
//! Um [`Binding`] atribui entidades a variáveis; um padrão totalmente ligado
//! descreve um conjunto concreto de fatos.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, RelationKind};

/// Atribuição de variáveis a entidades, ordenada pelo nome da variável.
pub type Binding = BTreeMap<String, EntityId>;

/// Extremo de uma tripla: variável livre ou entidade concreta.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Var(String),
    Entity(EntityId),
}

impl Term {
    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(name.into())
    }

    /// Resolve o termo sob um binding: `None` se for variável ainda livre.
    pub fn resolve(&self, binding: &Binding) -> Option<EntityId> {
        match self {
            Term::Var(name) => binding.get(name).copied(),
            Term::Entity(id) => Some(*id),
        }
    }
}

impl From<EntityId> for Term {
    fn from(id: EntityId) -> Self {
        Term::Entity(id)
    }
}

/// Tripla `origem --tipo--> destino` de um padrão.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub source: Term,
    pub kind: RelationKind,
    pub target: Term,
}

impl Triple {
    pub fn new(source: impl Into<Term>, kind: RelationKind, target: impl Into<Term>) -> Self {
        Self {
            source: source.into(),
            kind,
            target: target.into(),
        }
    }
}

/// Conjunção de triplas com variáveis livres.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub triples: Vec<Triple>,
}

impl Pattern {
    pub fn new(triples: Vec<Triple>) -> Self {
        Self { triples }
    }

    /// Padrão de uma única tripla de domínio, com dois termos quaisquer.
    ///
    /// ```rust
    /// use direct_inference::logic::{Pattern, Term};
    ///
    /// let avo = Pattern::fact("avô_de", Term::var("x"), Term::var("z"));
    /// assert_eq!(avo.variables(), vec!["x", "z"]);
    /// ```
    pub fn fact(name: &str, source: impl Into<Term>, target: impl Into<Term>) -> Self {
        Self::new(vec![Triple::new(source, RelationKind::custom(name), target)])
    }

    /// Adiciona outra tripla de domínio à conjunção.
    pub fn and_fact(mut self, name: &str, source: impl Into<Term>, target: impl Into<Term>) -> Self {
        self.triples
            .push(Triple::new(source, RelationKind::custom(name), target));
        self
    }

    /// Variáveis livres na ordem da primeira ocorrência, sem repetição.
    pub fn variables(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut vars = Vec::new();
        for triple in &self.triples {
            for term in [&triple.source, &triple.target] {
                if let Term::Var(name) = term {
                    if seen.insert(name.as_str()) {
                        vars.push(name.as_str());
                    }
                }
            }
        }
        vars
    }
}

/// Escopo de busca: quais entidades uma variável pode assumir.
///
/// Sem estrutura de entrada a busca é irrestrita. Com estrutura de entrada,
/// apenas os parâmetros (membros da estrutura, mais as entidades criadas
/// durante a inferência) são admitidos. Constantes do padrão não passam
/// por este filtro.
#[derive(Clone, Debug, Default)]
pub struct SearchScope {
    allowed: Option<HashSet<EntityId>>,
}

impl SearchScope {
    /// Escopo irrestrito — qualquer entidade da base é admitida.
    pub fn unscoped() -> Self {
        Self { allowed: None }
    }

    /// Escopo restrito aos parâmetros dados.
    pub fn scoped(params: impl IntoIterator<Item = EntityId>) -> Self {
        Self {
            allowed: Some(params.into_iter().collect()),
        }
    }

    /// Adiciona um parâmetro visível. No-op num escopo irrestrito.
    pub fn add_param(&mut self, param: EntityId) {
        if let Some(allowed) = self.allowed.as_mut() {
            allowed.insert(param);
        }
    }

    pub fn admits(&self, id: EntityId) -> bool {
        self.allowed.as_ref().map_or(true, |a| a.contains(&id))
    }

    pub fn is_scoped(&self) -> bool {
        self.allowed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn variables_are_deduplicated_in_order() {
        let p = Pattern::fact("pai_de", Term::var("x"), Term::var("y"))
            .and_fact("pai_de", Term::var("y"), Term::var("z"))
            .and_fact("gosta_de", Term::var("x"), Term::var("x"));
        assert_eq!(p.variables(), vec!["x", "y", "z"]);
    }

    #[test]
    fn constants_are_not_variables() {
        let ana = Uuid::new_v4();
        let p = Pattern::fact("pai_de", ana, Term::var("y"));
        assert_eq!(p.variables(), vec!["y"]);
    }

    #[test]
    fn scope_admission() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert!(SearchScope::unscoped().admits(a));

        let mut scope = SearchScope::scoped([a]);
        assert!(scope.admits(a));
        assert!(!scope.admits(b));
        scope.add_param(b);
        assert!(scope.admits(b));
    }
}
