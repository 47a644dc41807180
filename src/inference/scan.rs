//! # Varredura por Níveis
//!
//! Estado explícito da varredura do loop de controle: o nível atual e as
//! regras que ainda restam nele. É puro — não toca a base de fatos.
//!
//! ```text
//! next_rule() ─▶ r1 (nível 0) ─▶ r2 (nível 0) ─▶ r3 (nível 1) ─▶ None
//!                                   │
//!                          restart() após sucesso
//!                                   ▼
//!                          r1 (nível 0) ─▶ r2 ─▶ r3 ─▶ None
//! ```

use crate::core::EntityId;

use super::priority::{RuleQueue, RulePriorityIndex};

/// Cursor sobre os níveis de um [`RulePriorityIndex`].
#[derive(Debug)]
pub struct TieredScan<'i> {
    index: &'i RulePriorityIndex,
    tier: usize,
    pending: RuleQueue,
    restarts: usize,
}

impl<'i> TieredScan<'i> {
    pub fn new(index: &'i RulePriorityIndex) -> Self {
        Self {
            index,
            tier: 0,
            pending: index.queue(0).unwrap_or_default(),
            restarts: 0,
        }
    }

    /// Próxima regra a disparar; avança de nível quando a fila esvazia.
    ///
    /// `None` quando todos os níveis foram percorridos.
    pub fn next_rule(&mut self) -> Option<EntityId> {
        loop {
            if let Some(rule) = self.pending.pop_front() {
                return Some(rule);
            }
            if self.tier + 1 >= self.index.tier_count() {
                self.tier = self.index.tier_count();
                return None;
            }
            self.tier += 1;
            self.pending = self.index.queue(self.tier).unwrap_or_default();
        }
    }

    /// Volta ao primeiro nível com uma fila nova, descartando o resto do nível atual.
    pub fn restart(&mut self) {
        self.tier = 0;
        self.pending = self.index.queue(0).unwrap_or_default();
        self.restarts += 1;
    }

    /// Nível da última regra entregue.
    pub fn tier(&self) -> usize {
        self.tier
    }

    pub fn restarts(&self) -> usize {
        self.restarts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn ids(n: usize) -> Vec<EntityId> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn walks_tiers_in_order() {
        let r = ids(3);
        let index = RulePriorityIndex::from(vec![vec![r[0], r[1]], vec![r[2]]]);
        let mut scan = TieredScan::new(&index);

        assert_eq!(scan.next_rule(), Some(r[0]));
        assert_eq!(scan.tier(), 0);
        assert_eq!(scan.next_rule(), Some(r[1]));
        assert_eq!(scan.next_rule(), Some(r[2]));
        assert_eq!(scan.tier(), 1);
        assert_eq!(scan.next_rule(), None);
        assert_eq!(scan.next_rule(), None);
    }

    #[test]
    fn restart_discards_rest_of_current_tier() {
        let r = ids(4);
        let index = RulePriorityIndex::from(vec![vec![r[0]], vec![r[1], r[2]], vec![r[3]]]);
        let mut scan = TieredScan::new(&index);

        assert_eq!(scan.next_rule(), Some(r[0]));
        assert_eq!(scan.next_rule(), Some(r[1]));
        scan.restart();
        assert_eq!(scan.tier(), 0);
        assert_eq!(scan.next_rule(), Some(r[0]));
        assert_eq!(scan.next_rule(), Some(r[1]));
        assert_eq!(scan.next_rule(), Some(r[2]));
        assert_eq!(scan.next_rule(), Some(r[3]));
        assert_eq!(scan.restarts(), 1);
    }

    #[test]
    fn empty_tiers_are_skipped() {
        let r = ids(1);
        let index = RulePriorityIndex::from(vec![vec![], vec![], vec![r[0]]]);
        let mut scan = TieredScan::new(&index);
        assert_eq!(scan.next_rule(), Some(r[0]));
        assert_eq!(scan.tier(), 2);
        assert_eq!(scan.next_rule(), None);
    }

    #[test]
    fn empty_index_yields_nothing() {
        let index = RulePriorityIndex::default();
        assert_eq!(TieredScan::new(&index).next_rule(), None);
    }
}
