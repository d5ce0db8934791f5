use std::collections::{BTreeMap, BTreeSet};

use weeklist_shared::MasterItem;

use crate::normalize::{MAX_KEY_WORDS, NormalizedKey, normalize_with};

/// Minimum number of shared words for a fuzzy match.
pub const MIN_SHARED_WORDS: usize = 2;

/// How a recipe ingredient was tied to a master-list key. Ordered from the
/// strongest signal to the weakest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    Exact,
    Containment,
    SharedWords,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchPolicy {
    pub max_key_words: usize,
    pub min_shared_words: usize,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            max_key_words: MAX_KEY_WORDS,
            min_shared_words: MIN_SHARED_WORDS,
        }
    }
}

impl MatchPolicy {
    pub fn normalize(&self, raw: &str) -> NormalizedKey {
        normalize_with(raw, self.max_key_words)
    }

    /// Tier at which two keys match, if any. Empty keys never match.
    pub fn tier(&self, ingredient: &NormalizedKey, candidate: &NormalizedKey) -> Option<MatchTier> {
        if ingredient.is_empty() || candidate.is_empty() {
            return None;
        }

        if ingredient == candidate {
            return Some(MatchTier::Exact);
        }

        if contains_either(ingredient, candidate) {
            return Some(MatchTier::Containment);
        }

        if self.shares_enough_words(ingredient, candidate) {
            return Some(MatchTier::SharedWords);
        }

        None
    }

    fn shares_enough_words(&self, ingredient: &NormalizedKey, candidate: &NormalizedKey) -> bool {
        let ingredient_words = ingredient.words().collect::<BTreeSet<_>>();

        // a single shared word ("sal") is too weak to tie anything together
        if ingredient_words.len() < self.min_shared_words.max(2) {
            return false;
        }

        let shared = candidate
            .words()
            .collect::<BTreeSet<_>>()
            .intersection(&ingredient_words)
            .count();

        shared >= self.min_shared_words.max(2)
    }
}

/// One key's words appear contiguously in the other's. Keys are compared on
/// word boundaries, so "sal" never reaches into "salmon".
fn contains_either(a: &NormalizedKey, b: &NormalizedKey) -> bool {
    let a = format!(" {} ", a.as_str());
    let b = format!(" {} ", b.as_str());

    a.contains(&b) || b.contains(&a)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMatch<'a> {
    pub tier: MatchTier,
    pub items: Vec<&'a MasterItem>,
}

/// Master-list items grouped by normalized key.
#[derive(Clone, Debug)]
pub struct MasterIndex<'a> {
    keys: BTreeMap<NormalizedKey, Vec<&'a MasterItem>>,
    policy: MatchPolicy,
}

impl<'a> MasterIndex<'a> {
    pub fn new(items: &'a [MasterItem]) -> Self {
        Self::with_policy(items, MatchPolicy::default())
    }

    pub fn with_policy(items: &'a [MasterItem], policy: MatchPolicy) -> Self {
        let mut keys: BTreeMap<NormalizedKey, Vec<&'a MasterItem>> = BTreeMap::new();

        for item in items {
            let key = policy.normalize(&item.name);
            if key.is_empty() {
                tracing::debug!(item = %item.name, "master item has no comparable key");
                continue;
            }

            keys.entry(key).or_default().push(item);
        }

        Self { keys, policy }
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Finds the master items an ingredient key refers to. The first tier that
    /// yields anything wins; every candidate of that tier is returned.
    pub fn find(&self, ingredient: &NormalizedKey) -> Option<KeyMatch<'a>> {
        if ingredient.is_empty() {
            return None;
        }

        if let Some(items) = self.keys.get(ingredient) {
            return Some(KeyMatch {
                tier: MatchTier::Exact,
                items: items.clone(),
            });
        }

        [MatchTier::Containment, MatchTier::SharedWords]
            .into_iter()
            .find_map(|tier| self.collect_tier(ingredient, tier))
    }

    fn collect_tier(&self, ingredient: &NormalizedKey, tier: MatchTier) -> Option<KeyMatch<'a>> {
        let items = self
            .keys
            .iter()
            .filter(|(candidate, _)| self.policy.tier(ingredient, candidate) == Some(tier))
            .flat_map(|(_, items)| items.iter().copied())
            .collect::<Vec<_>>();

        if items.is_empty() {
            return None;
        }

        Some(KeyMatch { tier, items })
    }
}

#[cfg(test)]
mod tests {
    use weeklist_shared::Category;

    use super::*;
    use crate::normalize;

    fn items(names: &[&str]) -> Vec<MasterItem> {
        names
            .iter()
            .map(|name| MasterItem::new(*name, Category::Supermarket))
            .collect()
    }

    fn names(found: &KeyMatch<'_>) -> Vec<String> {
        found.items.iter().map(|i| i.name.to_owned()).collect()
    }

    #[test]
    fn test_identical_keys_match_exactly() {
        let master = items(&["1 kg de puré de tomate", "arroz blanco"]);
        let index = MasterIndex::new(&master);

        let found = index.find(&normalize("puré de tomate")).unwrap();
        assert_eq!(found.tier, MatchTier::Exact);
        assert_eq!(names(&found), vec!["1 kg de puré de tomate"]);
    }

    #[test]
    fn test_substring_matches_at_containment() {
        let master = items(&["sal y pimienta a gusto", "arroz blanco"]);
        let index = MasterIndex::new(&master);

        let found = index.find(&normalize("sal")).unwrap();
        assert_eq!(found.tier, MatchTier::Containment);
        assert_eq!(names(&found), vec!["sal y pimienta a gusto"]);

        let found = index.find(&normalize("arroz blanco largo fino")).unwrap();
        assert_eq!(found.tier, MatchTier::Containment);
    }

    #[test]
    fn test_containment_stops_at_word_boundaries() {
        let master = items(&["aceite de oliva", "salmón rosado", "tomate perita"]);
        let index = MasterIndex::new(&master);

        assert_eq!(index.find(&normalize("té")), None);
        assert_eq!(index.find(&normalize("sal")), None);

        let found = index.find(&normalize("salmon")).unwrap();
        assert_eq!(found.tier, MatchTier::Containment);
        assert_eq!(names(&found), vec!["salmón rosado"]);
    }

    #[test]
    fn test_shared_words_without_substring() {
        let master = items(&["queso rallado fresco"]);
        let index = MasterIndex::new(&master);

        let ingredient = normalize("queso fresco de campo");
        let found = index.find(&ingredient).unwrap();
        assert_eq!(found.tier, MatchTier::SharedWords);
    }

    #[test]
    fn test_single_shared_word_is_not_enough() {
        let master = items(&["pimienta negra", "queso rallado"]);
        let index = MasterIndex::new(&master);

        assert_eq!(index.find(&normalize("queso azul")), None);
        assert_eq!(index.find(&normalize("pimienta blanca molida")), None);
    }

    #[test]
    fn test_exact_wins_over_weaker_tiers() {
        let master = items(&["tomate", "tomate perita"]);
        let index = MasterIndex::new(&master);

        let found = index.find(&normalize("tomate")).unwrap();
        assert_eq!(found.tier, MatchTier::Exact);
        assert_eq!(names(&found), vec!["tomate"]);
    }

    #[test]
    fn test_containment_returns_every_candidate() {
        let master = items(&["tomate perita", "tomate cherry", "cebolla"]);
        let index = MasterIndex::new(&master);

        let found = index.find(&normalize("tomate")).unwrap();
        assert_eq!(found.tier, MatchTier::Containment);
        assert_eq!(names(&found), vec!["tomate cherry", "tomate perita"]);
    }

    #[test]
    fn test_same_key_groups_items() {
        let master = vec![
            MasterItem::new("arroz", Category::Supermarket),
            MasterItem::new("Arroz", Category::HealthFood),
        ];
        let index = MasterIndex::new(&master);
        assert_eq!(index.len(), 1);

        let found = index.find(&normalize("arroz")).unwrap();
        assert_eq!(found.items.len(), 2);
    }

    #[test]
    fn test_empty_key_never_matches() {
        let master = items(&["arroz", "3"]);
        let index = MasterIndex::new(&master);

        assert_eq!(index.len(), 1);
        assert_eq!(index.find(&normalize("(opcional)")), None);
        assert_eq!(MatchPolicy::default().tier(&normalize(""), &normalize("arroz")), None);
    }

    #[test]
    fn test_policy_threshold_is_tunable() {
        let policy = MatchPolicy {
            max_key_words: 3,
            min_shared_words: 3,
        };
        let a = normalize("queso rallado fresco");
        let b = normalize("queso fresco de campo");

        assert_eq!(MatchPolicy::default().tier(&b, &a), Some(MatchTier::SharedWords));
        assert_eq!(policy.tier(&b, &a), None);
    }
}
