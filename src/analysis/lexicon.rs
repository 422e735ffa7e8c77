//! Word valences for [`LexiconScorer`](super::sentiment::LexiconScorer).
//!
//! AFINN-style integer ratings from -5 (very negative) to +5 (very positive).
//! Entries are sorted so lookups can binary search.

pub(crate) const VALENCES: &[(&str, i32)] = &[
    ("abandon", -2),
    ("abuse", -3),
    ("accept", 1),
    ("accident", -2),
    ("admire", 3),
    ("adorable", 3),
    ("afraid", -2),
    ("agree", 1),
    ("alone", -2),
    ("amazing", 4),
    ("angry", -3),
    ("annoyed", -2),
    ("annoying", -2),
    ("anxious", -2),
    ("apologize", -1),
    ("appreciate", 2),
    ("awesome", 4),
    ("awful", -3),
    ("bad", -3),
    ("beautiful", 3),
    ("best", 3),
    ("better", 2),
    ("bitter", -2),
    ("blame", -2),
    ("bless", 2),
    ("bored", -2),
    ("boring", -3),
    ("brilliant", 4),
    ("broken", -1),
    ("calm", 2),
    ("care", 2),
    ("celebrate", 3),
    ("cheer", 2),
    ("cool", 1),
    ("crap", -3),
    ("crazy", -2),
    ("cry", -1),
    ("cute", 2),
    ("damn", -4),
    ("dead", -3),
    ("delight", 3),
    ("depressed", -2),
    ("disappointed", -2),
    ("disaster", -2),
    ("dislike", -2),
    ("dumb", -3),
    ("easy", 1),
    ("enjoy", 2),
    ("evil", -3),
    ("excellent", 3),
    ("excited", 3),
    ("fail", -2),
    ("fantastic", 4),
    ("fear", -2),
    ("fine", 2),
    ("free", 1),
    ("friend", 1),
    ("fun", 4),
    ("funny", 4),
    ("glad", 3),
    ("good", 3),
    ("gorgeous", 3),
    ("great", 3),
    ("grief", -2),
    ("happy", 3),
    ("hate", -3),
    ("heartbroken", -3),
    ("hell", -4),
    ("help", 2),
    ("hope", 2),
    ("horrible", -3),
    ("hug", 2),
    ("hurt", -2),
    ("ill", -2),
    ("impressed", 3),
    ("interesting", 2),
    ("jealous", -2),
    ("joke", 2),
    ("joy", 3),
    ("kind", 2),
    ("kiss", 2),
    ("laugh", 1),
    ("lazy", -1),
    ("like", 2),
    ("lol", 3),
    ("lonely", -2),
    ("lost", -3),
    ("love", 3),
    ("lovely", 3),
    ("lucky", 3),
    ("mad", -3),
    ("mess", -2),
    ("miss", -2),
    ("nasty", -3),
    ("nervous", -2),
    ("nice", 3),
    ("ok", 0),
    ("pain", -2),
    ("perfect", 3),
    ("pleasant", 3),
    ("please", 1),
    ("poor", -2),
    ("pretty", 1),
    ("problem", -2),
    ("proud", 2),
    ("rude", -2),
    ("sad", -2),
    ("safe", 1),
    ("scared", -2),
    ("shit", -4),
    ("sick", -2),
    ("silly", -1),
    ("smile", 2),
    ("sorry", -1),
    ("stress", -1),
    ("stupid", -2),
    ("success", 2),
    ("super", 3),
    ("support", 2),
    ("sweet", 2),
    ("terrible", -3),
    ("thank", 2),
    ("thanks", 2),
    ("tired", -2),
    ("ugly", -3),
    ("upset", -2),
    ("useless", -2),
    ("win", 4),
    ("wonderful", 4),
    ("worried", -3),
    ("worse", -3),
    ("worst", -3),
    ("wow", 4),
    ("wrong", -2),
    ("yay", 2),
];

/// Tokens that flip the valence of the word right after them.
pub(crate) const NEGATORS: &[&str] = &[
    "aren't", "can't", "cannot", "didn't", "doesn't", "don't", "isn't", "never", "no", "not",
    "wasn't", "won't",
];

/// Valence of `word`, if rated.
pub(crate) fn valence(word: &str) -> Option<i32> {
    VALENCES
        .binary_search_by(|(entry, _)| entry.cmp(&word))
        .ok()
        .map(|i| VALENCES[i].1)
}

pub(crate) fn is_negator(word: &str) -> bool {
    NEGATORS.binary_search(&word).is_ok()
}
