use std::collections::BTreeMap;

/// Copie de `map` privée des clés listées.
pub fn without_keys<K, V>(map: &BTreeMap<K, V>, keys: &[K]) -> BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    map.iter()
        .filter(|(k, _)| !keys.contains(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
