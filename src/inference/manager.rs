//! # DirectInferenceManager — Loop de Controle da Inferência Direta
//!
//! Deriva se um padrão-alvo pode ser provado a partir dos fatos de entrada,
//! disparando regras por ordem de prioridade até alcançar o alvo ou esgotar
//! os níveis.
//!
//! ## Algoritmo
//!
//! ```text
//! 1. Semeia argumentos (membros da estrutura de entrada)
//!    └── estrutura presente mas sem conceitos → solução ✗, nenhuma regra
//! 2. Alvo já alcançado? → solução ✓, nenhuma regra
//! 3. Conjunto de regras inválido, malformado ou vazio → solução com o veredito atual
//! 4. Varredura por níveis:
//!    para cada regra r (nível 0 primeiro, FIFO dentro do nível):
//!      limpa veredito(r, modelo)
//!      usada = dispara(r)
//!      grava veredito(r, modelo, usada)
//!      se usada:
//!        alvo alcançado?            → para
//!        recomeços sem gerar fatos? → para ao atingir o limite
//!        senão                      → recomeça do nível 0
//! 5. Solução a partir do veredito final
//! ```
//!
//! O recomeço reabre os níveis de maior prioridade: um fato recém-derivado
//! pode satisfazer uma regra que falhou antes.
//!
//! ## Modelo (contexto de avaliação)
//!
//! A estrutura de entrada, se válida; senão [`InferenceConfig::default_model`],
//! ou a raiz da base se esse modelo não existir nela. É usado apenas como
//! segunda chave dos registros de satisfatibilidade.
//!
//! ## Erros
//!
//! Nenhum erro escapa de [`apply_inference()`](DirectInferenceManager::apply_inference):
//! todo caminho devolve um [`SolutionHandle`].

use crate::config::InferenceConfig;
use crate::core::{EntityId, FactStore, RelationKind, KNOWLEDGE_BASE_ROOT};
use crate::logic::{
    BindingEnumerator, EvaluationContext, FormulaEvaluator, FormulaStore, LogicExpression, Pattern,
    PatternMatcher, SearchScope, TemplateManager, TemplateSearcher,
};

use super::priority::RulePriorityIndex;
use super::satisfiability::SatisfiabilityCache;
use super::scan::TieredScan;
use super::solution::{SolutionBuilder, SolutionHandle, SolutionTreeGenerator};
use super::target::TargetChecker;

/// Resultado de um disparo: valor da fórmula e relações geradas.
#[derive(Clone, Copy, Debug)]
struct Firing {
    used: bool,
    generated: usize,
}

impl Firing {
    const INERT: Firing = Firing {
        used: false,
        generated: 0,
    };
}

/// Estado mutável de uma execução: argumentos e parâmetros visíveis à busca.
struct RunState {
    arguments: Vec<EntityId>,
    scope: SearchScope,
}

/// Gerenciador de inferência direta (forward chaining) sobre uma base de fatos.
///
/// Possui a base com exclusividade durante a execução (`&mut S`) — execuções
/// concorrentes sobre a mesma base devem ser serializadas por quem chama.
///
/// ## Uso
///
/// ```rust
/// use direct_inference::config::InferenceConfig;
/// use direct_inference::core::KnowledgeBase;
/// use direct_inference::inference::{DirectInferenceManager, Solution};
/// use direct_inference::logic::{Formula, Pattern, Term};
///
/// let mut kb = KnowledgeBase::new();
/// let ana = kb.add_concept("Ana");
/// let bruno = kb.add_concept("Bruno");
/// kb.add_fact("pai_de", ana, bruno).unwrap();
/// let entrada = kb.add_structure("entrada", &[ana, bruno]).unwrap();
///
/// let regra = kb.add_rule(
///     "ancestral",
///     Formula::implies(
///         Formula::Atom(Pattern::fact("pai_de", Term::var("x"), Term::var("y"))),
///         Pattern::fact("ancestral_de", Term::var("x"), Term::var("y")),
///     ),
/// );
/// let regras = kb.add_rule_set("regras", &[vec![regra]]).unwrap();
/// let alvo = Pattern::fact("ancestral_de", Term::var("a"), Term::var("b"));
///
/// let handle = DirectInferenceManager::new(&mut kb, InferenceConfig::default())
///     .apply_inference(&alvo, Some(regras), Some(entrada), None);
/// assert!(Solution::load(&kb, handle).unwrap().achieved);
/// ```
pub struct DirectInferenceManager<'a, S: FactStore> {
    store: &'a mut S,
    config: InferenceConfig,
    enumerator: Box<dyn BindingEnumerator + 'a>,
    matcher: Box<dyn PatternMatcher<S> + 'a>,
    evaluator: Box<dyn FormulaEvaluator<S> + 'a>,
    solutions: Box<dyn SolutionBuilder<S> + 'a>,
}

impl<'a, S: FactStore + FormulaStore> DirectInferenceManager<'a, S> {
    /// Cria um gerenciador com os colaboradores padrão.
    pub fn new(store: &'a mut S, config: InferenceConfig) -> Self {
        Self {
            store,
            config,
            enumerator: Box::new(TemplateManager),
            matcher: Box::new(TemplateSearcher),
            evaluator: Box::new(LogicExpression::new()),
            solutions: Box::new(SolutionTreeGenerator),
        }
    }
}

impl<'a, S: FactStore> DirectInferenceManager<'a, S> {
    /// Substitui o avaliador de fórmulas.
    pub fn with_evaluator(mut self, evaluator: impl FormulaEvaluator<S> + 'a) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    /// Substitui o enumerador de bindings.
    pub fn with_enumerator(mut self, enumerator: impl BindingEnumerator + 'a) -> Self {
        self.enumerator = Box::new(enumerator);
        self
    }

    /// Substitui o verificador de padrões.
    pub fn with_matcher(mut self, matcher: impl PatternMatcher<S> + 'a) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    /// Substitui o gerador de soluções.
    pub fn with_solution_builder(mut self, solutions: impl SolutionBuilder<S> + 'a) -> Self {
        self.solutions = Box::new(solutions);
        self
    }

    /// Roda uma inferência completa e devolve o handle da solução.
    ///
    /// # Parâmetros
    ///
    /// - `target` — padrão-alvo com variáveis livres
    /// - `rule_set` — conjunto de regras em níveis de prioridade
    /// - `input` — estrutura com os fatos de entrada (opcional)
    /// - `output` — estrutura que recebe as entidades geradas (opcional)
    ///
    /// Handles ausentes ou desconhecidos pela base contam como inválidos.
    pub fn apply_inference(
        &mut self,
        target: &Pattern,
        rule_set: Option<EntityId>,
        input: Option<EntityId>,
        output: Option<EntityId>,
    ) -> SolutionHandle {
        let input = input.filter(|id| self.store.is_valid(*id));
        let output = output.filter(|id| self.store.is_valid(*id));
        let mut steps = Vec::new();

        let mut run = match input {
            Some(structure) => {
                let params = self.store.related(structure, &RelationKind::Membership);
                let arguments: Vec<EntityId> = params
                    .iter()
                    .copied()
                    .filter(|id| self.store.entity(*id).is_some_and(|e| e.is_concept()))
                    .collect();
                if arguments.is_empty() {
                    tracing::warn!(input = %structure, "Estrutura de entrada sem conceitos");
                    return self.solutions.build(&mut *self.store, false, &steps);
                }
                RunState {
                    arguments,
                    scope: SearchScope::scoped(params),
                }
            }
            None => RunState {
                arguments: Vec::new(),
                scope: SearchScope::unscoped(),
            },
        };

        let mut achieved = self.is_target_achieved(target, &run);
        if achieved {
            tracing::warn!("Alvo já alcançado antes de qualquer regra");
            return self.solutions.build(&mut *self.store, achieved, &steps);
        }

        let Some(rule_set) = rule_set.filter(|id| self.store.is_valid(*id)) else {
            tracing::warn!("Conjunto de regras inválido");
            return self.solutions.build(&mut *self.store, achieved, &steps);
        };

        let index = match RulePriorityIndex::build(&*self.store, rule_set) {
            Ok(index) => index,
            Err(e) => {
                tracing::error!(error = %e, "Conjunto de regras malformado");
                return self.solutions.build(&mut *self.store, achieved, &steps);
            }
        };
        if index.is_empty() {
            tracing::warn!(rule_set = %rule_set, "Nenhum nível de regras encontrado");
            return self.solutions.build(&mut *self.store, achieved, &steps);
        }

        let model = match input {
            Some(structure) => structure,
            None if self.store.is_valid(self.config.default_model) => self.config.default_model,
            None => {
                tracing::error!(
                    model = %self.config.default_model,
                    "Modelo padrão ausente da base, usando a raiz"
                );
                KNOWLEDGE_BASE_ROOT
            }
        };
        tracing::info!(
            tiers = index.tier_count(),
            rules = index.rule_count(),
            scoped = run.scope.is_scoped(),
            "Iniciando aplicação de regras"
        );

        let mut scan = TieredScan::new(&index);
        let mut firings = 0usize;
        let mut stalled = 0usize;
        while let Some(rule) = scan.next_rule() {
            firings += 1;
            tracing::trace!(rule = %rule, tier = scan.tier(), "Disparando regra");

            SatisfiabilityCache::clear(&mut *self.store, rule, model);
            let firing = self.fire_rule(rule, &mut run, output);
            if let Err(e) = SatisfiabilityCache::record(&mut *self.store, rule, model, firing.used) {
                tracing::warn!(rule = %rule, error = %e, "Veredito de satisfatibilidade não gravado");
            }

            if !firing.used {
                continue;
            }
            steps.push(rule);
            achieved = self.is_target_achieved(target, &run);
            if achieved {
                tracing::info!(rule = %rule, firings, "Alvo alcançado");
                break;
            }

            if firing.generated > 0 {
                stalled = 0;
            } else {
                stalled += 1;
                if self.config.max_stalled_restarts.is_some_and(|max| stalled >= max) {
                    tracing::warn!(stalled, firings, "Recomeços sem progresso demais, encerrando");
                    break;
                }
            }
            scan.restart();
        }

        tracing::info!(
            achieved,
            firings,
            restarts = scan.restarts(),
            arguments = run.arguments.len(),
            "Inferência concluída"
        );
        self.solutions.build(&mut *self.store, achieved, &steps)
    }

    /// Dispara uma regra: avalia a fórmula do seu nó-chave.
    ///
    /// Regra sem nó-chave, ou cuja avaliação falha, é inerte (não usada).
    fn fire_rule(&mut self, rule: EntityId, run: &mut RunState, output: Option<EntityId>) -> Firing {
        let Some(root) = self
            .store
            .related(rule, &RelationKind::MainKey)
            .first()
            .copied()
        else {
            tracing::debug!(rule = %rule, "Regra sem nó-chave");
            return Firing::INERT;
        };

        let mut ctx = EvaluationContext {
            arguments: &mut run.arguments,
            scope: &mut run.scope,
            output,
        };
        match self.evaluator.evaluate(&mut *self.store, root, &mut ctx) {
            Ok(result) => {
                tracing::debug!(
                    rule = %rule,
                    value = result.value,
                    generated = result.generated.len(),
                    "Regra disparada"
                );
                Firing {
                    used: result.value,
                    generated: result.generated.len(),
                }
            }
            Err(e) => {
                tracing::warn!(rule = %rule, error = %e, "Falha ao avaliar fórmula");
                Firing::INERT
            }
        }
    }

    fn is_target_achieved(&self, target: &Pattern, run: &RunState) -> bool {
        TargetChecker::new(&*self.enumerator, &*self.matcher).is_achieved(
            &*self.store,
            &run.scope,
            target,
            &run.arguments,
        )
    }
}
