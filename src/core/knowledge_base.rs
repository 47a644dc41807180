//! # KnowledgeBase — Base de Fatos em Memória
//!
//! A [`KnowledgeBase`] é a implementação padrão de [`FactStore`]: armazena
//! entidades, relações tipadas e as fórmulas codificadas pelas regras, com
//! índices reversos para consulta rápida.
//!
//! ## Armazenamento
//!
//! - **Entidades**: `HashMap<EntityId, Entity>` — busca O(1) por ID
//! - **Relações**: `HashMap<RelationId, Relation>` — busca O(1) por ID
//! - **Fórmulas**: `HashMap<EntityId, Formula>` — fórmula de cada nó-chave
//! - **Índices**: saída, entrada e por tipo — `Vec<RelationId>` em ordem de inserção
//!
//! Os índices preservam a ordem de inserção, então toda enumeração
//! (membros de um nível, relações de um tipo) é determinística.
//!
//! ## Keynode da Raiz
//!
//! Toda base nasce com a entidade [`KNOWLEDGE_BASE_ROOT`], o contexto de
//! avaliação usado quando a inferência roda sem estrutura de entrada.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use direct_inference::core::{KnowledgeBase, RelationKind};
//!
//! let mut kb = KnowledgeBase::new();
//! let ana = kb.add_concept("Ana");
//! let bruno = kb.add_concept("Bruno");
//! kb.add_fact("pai_de", ana, bruno).unwrap();
//!
//! assert!(kb.relation_exists_between("pai_de", ana, bruno));
//! ```

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::StoreError;
use crate::logic::{Formula, FormulaStore};

use super::entity::{Entity, EntityId, EntityKind};
use super::fact_store::FactStore;
use super::relation::{Relation, RelationId, RelationKind};

/// Raiz bem conhecida da base de conhecimento.
///
/// Contexto de avaliação padrão para os registros de satisfatibilidade
/// quando a inferência não recebe estrutura de entrada.
pub const KNOWLEDGE_BASE_ROOT: EntityId = Uuid::from_u128(0x6b6e_6f77_6c65_6467_655f_6261_7365_0001);

/// Base de fatos in-memory.
///
/// Não é thread-safe por si só: quem precisar compartilhá-la usa
/// `Arc<RwLock<KnowledgeBase>>` (veja [`InferenceAgent`](crate::agent::InferenceAgent)).
pub struct KnowledgeBase {
    /// Mapa de entidades: ID → Entidade.
    pub entities: HashMap<EntityId, Entity>,

    /// Mapa de relações: ID → Relação.
    pub relations: HashMap<RelationId, Relation>,

    /// Fórmula codificada por cada nó de fórmula.
    pub formulas: HashMap<EntityId, Formula>,

    /// Índice de saída: origem → relações, em ordem de inserção.
    outgoing: HashMap<EntityId, Vec<RelationId>>,

    /// Índice de entrada: destino → relações, em ordem de inserção.
    incoming: HashMap<EntityId, Vec<RelationId>>,

    /// Índice por tipo de relação, em ordem de inserção.
    by_kind: HashMap<RelationKind, Vec<RelationId>>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeBase {
    /// Cria uma base vazia contendo apenas o keynode [`KNOWLEDGE_BASE_ROOT`].
    pub fn new() -> Self {
        let mut kb = Self {
            entities: HashMap::new(),
            relations: HashMap::new(),
            formulas: HashMap::new(),
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
            by_kind: HashMap::new(),
        };
        kb.insert_entity(Entity::with_id(
            KNOWLEDGE_BASE_ROOT,
            "knowledge_base_IMS",
            EntityKind::Structure,
        ));
        kb
    }

    /// Insere uma entidade já construída e retorna seu [EntityId].
    ///
    /// Se já existir uma entidade com o mesmo ID, ela é sobrescrita.
    pub fn insert_entity(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        tracing::debug!(id = %id, label = %entity.label, kind = entity.kind.label(), "KB: entidade armazenada");
        self.entities.insert(id, entity);
        id
    }

    /// Cria um conceito do domínio.
    pub fn add_concept(&mut self, label: &str) -> EntityId {
        self.insert_entity(Entity::new(label, EntityKind::Concept))
    }

    /// Cria uma estrutura contendo `members` via relações `Membership`.
    ///
    /// # Erros
    ///
    /// [`StoreError::UnknownEntity`] se algum membro não existir.
    pub fn add_structure(&mut self, label: &str, members: &[EntityId]) -> Result<EntityId, StoreError> {
        let structure = self.insert_entity(Entity::new(label, EntityKind::Structure));
        for &member in members {
            self.add_relation(RelationKind::Membership, structure, member)?;
        }
        Ok(structure)
    }

    /// Cria um fato de domínio `source --name--> target`.
    pub fn add_fact(&mut self, name: &str, source: EntityId, target: EntityId) -> Result<RelationId, StoreError> {
        self.add_relation(RelationKind::custom(name), source, target)
    }

    /// Cria uma relação entre duas entidades existentes e atualiza os índices.
    pub fn add_relation(
        &mut self,
        kind: RelationKind,
        source: EntityId,
        target: EntityId,
    ) -> Result<RelationId, StoreError> {
        for endpoint in [source, target] {
            if !self.entities.contains_key(&endpoint) {
                return Err(StoreError::UnknownEntity(endpoint));
            }
        }
        let relation = Relation::new(kind, source, target);
        let id = relation.id;
        tracing::trace!(id = %id, kind = %relation.kind, "KB: relação armazenada");
        self.outgoing.entry(source).or_default().push(id);
        self.incoming.entry(target).or_default().push(id);
        self.by_kind.entry(relation.kind.clone()).or_default().push(id);
        self.relations.insert(id, relation);
        Ok(id)
    }

    /// Remove uma relação e suas entradas nos índices.
    pub fn remove_relation(&mut self, id: RelationId) -> bool {
        let Some(relation) = self.relations.remove(&id) else {
            return false;
        };
        if let Some(ids) = self.outgoing.get_mut(&relation.source) {
            ids.retain(|r| *r != id);
        }
        if let Some(ids) = self.incoming.get_mut(&relation.target) {
            ids.retain(|r| *r != id);
        }
        if let Some(ids) = self.by_kind.get_mut(&relation.kind) {
            ids.retain(|r| *r != id);
        }
        true
    }

    /// Cria um nó de fórmula e associa a fórmula a ele.
    pub fn add_formula(&mut self, label: &str, formula: Formula) -> EntityId {
        let node = self.insert_entity(Entity::new(label, EntityKind::Formula));
        self.formulas.insert(node, formula);
        node
    }

    /// Cria uma regra cujo nó-chave é uma nova fórmula.
    pub fn add_rule(&mut self, label: &str, formula: Formula) -> EntityId {
        let rule = self.insert_entity(Entity::new(label, EntityKind::Rule));
        let node = self.add_formula(&format!("{} (fórmula)", label), formula);
        // Ambos os extremos acabaram de ser criados
        let _ = self.add_relation(RelationKind::MainKey, rule, node);
        rule
    }

    /// Cria um conjunto de regras com um nível por elemento de `tiers`.
    ///
    /// O nível `i` (base zero) recebe a posição `Ordinal(i + 1)`; as regras
    /// de cada nível entram como `Membership`, na ordem dada.
    pub fn add_rule_set(&mut self, label: &str, tiers: &[Vec<EntityId>]) -> Result<EntityId, StoreError> {
        let rule_set = self.insert_entity(Entity::new(label, EntityKind::RuleSet));
        for (i, rules) in tiers.iter().enumerate() {
            let tier = self.insert_entity(Entity::new(
                format!("{} — nível {}", label, i + 1),
                EntityKind::RuleTier,
            ));
            self.add_relation(RelationKind::Ordinal(i as u32 + 1), rule_set, tier)?;
            for &rule in rules {
                self.add_relation(RelationKind::Membership, tier, rule)?;
            }
        }
        Ok(rule_set)
    }

    /// `true` se existe o fato de domínio `source --name--> target`.
    pub fn relation_exists_between(&self, name: &str, source: EntityId, target: EntityId) -> bool {
        self.relation_exists(&RelationKind::custom(name), source, target)
    }

    /// Gera uma descrição legível de uma relação.
    ///
    /// Formato: `Origem tipo Destino`, ex: `Ana pai_de Bruno`.
    pub fn describe_relation(&self, relation: &Relation) -> String {
        let label = |id: &EntityId| {
            self.entities
                .get(id)
                .map(|e| e.label.as_str())
                .unwrap_or("?")
        };
        format!("{} {} {}", label(&relation.source), relation.kind, label(&relation.target))
    }

    /// Retorna o número total de entidades na base.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Retorna o número total de relações na base.
    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }
}

impl FactStore for KnowledgeBase {
    fn is_valid(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    fn find_relations(
        &self,
        kind: &RelationKind,
        source: Option<EntityId>,
        target: Option<EntityId>,
    ) -> Vec<&Relation> {
        // Escolhe o índice mais seletivo disponível
        let candidates = match (source, target) {
            (Some(s), _) => self.outgoing.get(&s),
            (None, Some(t)) => self.incoming.get(&t),
            (None, None) => self.by_kind.get(kind),
        };
        candidates
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.relations.get(id))
                    .filter(|r| {
                        r.kind == *kind
                            && source.map_or(true, |s| r.source == s)
                            && target.map_or(true, |t| r.target == t)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn relations_between(&self, source: EntityId, target: EntityId) -> Vec<&Relation> {
        self.outgoing
            .get(&source)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.relations.get(id))
                    .filter(|r| r.target == target)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn create_entity(&mut self, label: &str, kind: EntityKind) -> EntityId {
        self.insert_entity(Entity::new(label, kind))
    }

    fn create_relation(
        &mut self,
        kind: RelationKind,
        source: EntityId,
        target: EntityId,
    ) -> Result<RelationId, StoreError> {
        self.add_relation(kind, source, target)
    }

    fn erase_relation(&mut self, id: RelationId) -> bool {
        self.remove_relation(id)
    }
}

impl FormulaStore for KnowledgeBase {
    fn formula(&self, node: EntityId) -> Option<&Formula> {
        self.formulas.get(&node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_base_contains_root_keynode() {
        let kb = KnowledgeBase::new();
        assert!(kb.is_valid(KNOWLEDGE_BASE_ROOT));
        assert_eq!(kb.entity_count(), 1);
        assert_eq!(kb.relation_count(), 0);
    }

    #[test]
    fn relation_to_unknown_entity_is_rejected() {
        let mut kb = KnowledgeBase::new();
        let ana = kb.add_concept("Ana");
        let ghost = Uuid::new_v4();
        assert_eq!(
            kb.add_fact("pai_de", ana, ghost),
            Err(StoreError::UnknownEntity(ghost))
        );
        assert_eq!(kb.relation_count(), 0);
    }

    #[test]
    fn related_preserves_insertion_order() {
        let mut kb = KnowledgeBase::new();
        let members: Vec<_> = ["a", "b", "c", "d"].iter().map(|l| kb.add_concept(l)).collect();
        let structure = kb.add_structure("entrada", &members).unwrap();
        assert_eq!(kb.related(structure, &RelationKind::Membership), members);
    }

    #[test]
    fn find_relations_filters_by_kind_and_endpoints() {
        let mut kb = KnowledgeBase::new();
        let ana = kb.add_concept("Ana");
        let bruno = kb.add_concept("Bruno");
        let carla = kb.add_concept("Carla");
        kb.add_fact("pai_de", ana, bruno).unwrap();
        kb.add_fact("pai_de", bruno, carla).unwrap();
        kb.add_fact("irmão_de", ana, carla).unwrap();

        let pai = RelationKind::custom("pai_de");
        assert_eq!(kb.find_relations(&pai, None, None).len(), 2);
        assert_eq!(kb.find_relations(&pai, Some(ana), None).len(), 1);
        assert_eq!(kb.find_relations(&pai, None, Some(carla)).len(), 1);
        assert!(kb.find_relations(&pai, Some(ana), Some(carla)).is_empty());
        assert_eq!(kb.relations_between(ana, carla).len(), 1);
    }

    #[test]
    fn erase_relation_updates_every_index() {
        let mut kb = KnowledgeBase::new();
        let ana = kb.add_concept("Ana");
        let bruno = kb.add_concept("Bruno");
        let id = kb.add_fact("pai_de", ana, bruno).unwrap();

        assert!(kb.erase_relation(id));
        assert!(!kb.erase_relation(id));
        assert!(!kb.relation_exists_between("pai_de", ana, bruno));
        assert!(kb.find_relations(&RelationKind::custom("pai_de"), None, None).is_empty());
        assert!(kb.relations_between(ana, bruno).is_empty());
    }

    #[test]
    fn rule_set_builder_creates_ordinal_chain() {
        let mut kb = KnowledgeBase::new();
        let r1 = kb.add_rule("r1", Formula::Atom(Default::default()));
        let r2 = kb.add_rule("r2", Formula::Atom(Default::default()));
        let set = kb.add_rule_set("regras", &[vec![r1], vec![r2]]).unwrap();

        let first = kb.related(set, &RelationKind::Ordinal(1));
        let second = kb.related(set, &RelationKind::Ordinal(2));
        assert_eq!(first.len(), 1);
        assert_eq!(kb.related(first[0], &RelationKind::Membership), vec![r1]);
        assert_eq!(kb.related(second[0], &RelationKind::Membership), vec![r2]);
        assert!(kb.related(set, &RelationKind::Ordinal(3)).is_empty());
    }

    #[test]
    fn rule_points_to_its_formula() {
        let mut kb = KnowledgeBase::new();
        let rule = kb.add_rule("regra", Formula::Atom(Default::default()));
        let keys = kb.related(rule, &RelationKind::MainKey);
        assert_eq!(keys.len(), 1);
        assert!(kb.formula(keys[0]).is_some());
    }

    #[test]
    fn describe_relation_uses_labels() {
        let mut kb = KnowledgeBase::new();
        let ana = kb.add_concept("Ana");
        let bruno = kb.add_concept("Bruno");
        let id = kb.add_fact("pai_de", ana, bruno).unwrap();
        let relation = kb.relations[&id].clone();
        assert_eq!(kb.describe_relation(&relation), "Ana pai_de Bruno");
    }
}
