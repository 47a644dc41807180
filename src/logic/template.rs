//! # Templates — Enumeração de Bindings, Busca e Geração
//!
//! Três colaboradores do motor vivem aqui:
//!
//! | Componente | Papel |
//! |------------|-------|
//! | [`TemplateManager`] | [`BindingEnumerator`] — produz bindings candidatos a partir dos argumentos |
//! | [`TemplateSearcher`] | [`PatternMatcher`] — verifica se um padrão vale na base |
//! | [`TemplateSearcher::generate_statement`] | busca-ou-gera: instancia um padrão que ainda não vale |
//!
//! ## Busca
//!
//! A busca é um join por backtracking sobre as triplas do padrão, na ordem
//! em que aparecem. Cada tripla consulta a base com os extremos já ligados,
//! usando o índice mais seletivo disponível.

use crate::core::{EntityId, EntityKind, FactStore, RelationId, RelationKind};
use crate::error::StoreError;

use super::pattern::{Binding, Pattern, SearchScope, Term, Triple};

/// Produz os bindings candidatos das variáveis livres de um padrão.
pub trait BindingEnumerator {
    /// Sequência preguiçosa de bindings; finita e reiniciável a cada chamada.
    fn enumerate<'a>(
        &'a self,
        pattern: &'a Pattern,
        candidates: &'a [EntityId],
    ) -> Box<dyn Iterator<Item = Binding> + 'a>;
}

/// Verifica se um padrão (parcial ou totalmente ligado) já vale na base.
pub trait PatternMatcher<S: FactStore + ?Sized> {
    fn matches(&self, store: &S, scope: &SearchScope, pattern: &Pattern, binding: &Binding) -> bool;
}

/// Enumerador padrão: produto cartesiano preguiçoso das variáveis sobre os candidatos.
///
/// Um padrão sem variáveis, ou uma lista de candidatos vazia, produz
/// exatamente um binding vazio — a busca completa o resto contra a base.
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateManager;

impl BindingEnumerator for TemplateManager {
    fn enumerate<'a>(
        &'a self,
        pattern: &'a Pattern,
        candidates: &'a [EntityId],
    ) -> Box<dyn Iterator<Item = Binding> + 'a> {
        let vars = if candidates.is_empty() {
            Vec::new()
        } else {
            pattern.variables()
        };
        Box::new(Bindings {
            cursor: Some(vec![0; vars.len()]),
            vars,
            candidates,
        })
    }
}

/// Iterador "odômetro" sobre o produto cartesiano.
struct Bindings<'a> {
    vars: Vec<&'a str>,
    candidates: &'a [EntityId],
    cursor: Option<Vec<usize>>,
}

impl Iterator for Bindings<'_> {
    type Item = Binding;

    fn next(&mut self) -> Option<Binding> {
        let cursor = self.cursor.as_mut()?;
        let binding = self
            .vars
            .iter()
            .zip(cursor.iter())
            .map(|(var, &i)| (var.to_string(), self.candidates[i]))
            .collect();

        // Avança da última posição para a primeira, com "vai um"
        let mut exhausted = true;
        for pos in (0..cursor.len()).rev() {
            cursor[pos] += 1;
            if cursor[pos] < self.candidates.len() {
                exhausted = false;
                break;
            }
            cursor[pos] = 0;
        }
        if exhausted {
            self.cursor = None;
        }
        Some(binding)
    }
}

/// Busca de padrões na base, com suporte a escopo de parâmetros.
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateSearcher;

impl TemplateSearcher {
    /// Todas as extensões de `binding` sob as quais o padrão vale.
    ///
    /// `limit` interrompe a busca ao atingir o número de resultados pedido.
    pub fn search<S: FactStore + ?Sized>(
        &self,
        store: &S,
        scope: &SearchScope,
        pattern: &Pattern,
        binding: &Binding,
        limit: Option<usize>,
    ) -> Vec<Binding> {
        let mut results = Vec::new();
        extend(store, scope, &pattern.triples, binding.clone(), limit, &mut results);
        results
    }

    /// Busca-ou-gera: instancia `pattern` sob `binding` se ele ainda não vale.
    ///
    /// - Extremos já ligados que a base não conhece: erro, e nada é criado.
    /// - Se o padrão já vale, nada é criado e o retorno é vazio.
    /// - Variáveis não ligadas recebem entidades novas do tipo `Concept`,
    ///   que entram na lista de argumentos, no escopo e na estrutura de saída.
    /// - Cada tripla ausente é criada; as relações criadas são retornadas.
    pub fn generate_statement<S: FactStore + ?Sized>(
        &self,
        store: &mut S,
        scope: &mut SearchScope,
        pattern: &Pattern,
        binding: &Binding,
        arguments: &mut Vec<EntityId>,
        output: Option<EntityId>,
    ) -> Result<Vec<RelationId>, StoreError> {
        // Tudo ou nada: valida antes de escrever
        for triple in &pattern.triples {
            for term in [&triple.source, &triple.target] {
                match term.resolve(binding) {
                    Some(id) if !store.is_valid(id) => return Err(StoreError::UnknownEntity(id)),
                    _ => {}
                }
            }
        }
        if !self.search(store, scope, pattern, binding, Some(1)).is_empty() {
            return Ok(Vec::new());
        }

        let mut full = binding.clone();
        for var in pattern.variables() {
            if full.contains_key(var) {
                continue;
            }
            let fresh = store.create_entity(var, EntityKind::Concept);
            scope.add_param(fresh);
            arguments.push(fresh);
            if let Some(out) = output.filter(|o| store.is_valid(*o)) {
                store.create_relation(RelationKind::Membership, out, fresh)?;
            }
            tracing::debug!(var = var, id = %fresh, "Entidade gerada para variável livre");
            full.insert(var.to_string(), fresh);
        }

        let mut created = Vec::new();
        for triple in &pattern.triples {
            let (Some(source), Some(target)) =
                (triple.source.resolve(&full), triple.target.resolve(&full))
            else {
                continue;
            };
            if !store.relation_exists(&triple.kind, source, target) {
                created.push(store.create_relation(triple.kind.clone(), source, target)?);
            }
        }
        Ok(created)
    }
}

impl<S: FactStore + ?Sized> PatternMatcher<S> for TemplateSearcher {
    fn matches(&self, store: &S, scope: &SearchScope, pattern: &Pattern, binding: &Binding) -> bool {
        !self.search(store, scope, pattern, binding, Some(1)).is_empty()
    }
}

fn extend<S: FactStore + ?Sized>(
    store: &S,
    scope: &SearchScope,
    triples: &[Triple],
    binding: Binding,
    limit: Option<usize>,
    results: &mut Vec<Binding>,
) {
    let Some((triple, rest)) = triples.split_first() else {
        results.push(binding);
        return;
    };
    let source = triple.source.resolve(&binding);
    let target = triple.target.resolve(&binding);
    for relation in store.find_relations(&triple.kind, source, target) {
        let mut next = binding.clone();
        if bind(&mut next, &triple.source, relation.source, scope)
            && bind(&mut next, &triple.target, relation.target, scope)
        {
            extend(store, scope, rest, next, limit, results);
            if limit.is_some_and(|l| results.len() >= l) {
                return;
            }
        }
    }
}

fn bind(binding: &mut Binding, term: &Term, value: EntityId, scope: &SearchScope) -> bool {
    match term {
        Term::Entity(id) => *id == value,
        Term::Var(name) => match binding.get(name) {
            Some(bound) => *bound == value,
            None if scope.admits(value) => {
                binding.insert(name.clone(), value);
                true
            }
            None => false,
        },
    }
}
