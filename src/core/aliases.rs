use std::collections::HashMap;
use std::sync::OnceLock;

/// Canonical first names and their common nicknames
///
/// Each row forms one alias group: the canonical name and every nickname
/// are interchangeable.
pub const FIRST_NAME_ALIASES: &[(&str, &[&str])] = &[
    ("william", &["will", "bill", "liam", "billy"]),
    ("elizabeth", &["liz", "beth", "betty", "bette"]),
    ("robert", &["rob", "bob", "bobby", "robbie"]),
    ("richard", &["rick", "dick", "rich", "ricky"]),
    ("james", &["jim", "jimmy", "jamie"]),
    ("john", &["jon", "johnny", "jack"]),
    ("michael", &["mike", "mikey", "mick"]),
    ("joseph", &["joe", "joey"]),
    ("thomas", &["tom", "tommy"]),
    ("charles", &["charlie", "chuck", "chas"]),
    ("christopher", &["chris", "topher"]),
    ("daniel", &["dan", "danny"]),
    ("matthew", &["matt", "matty"]),
    ("anthony", &["tony"]),
    ("edward", &["ed", "eddie", "ted", "ned"]),
    ("benjamin", &["ben", "benny"]),
    ("alexander", &["alex", "xander"]),
    ("nicholas", &["nick", "nicky"]),
    ("steven", &["steve", "stevie"]),
    ("margaret", &["maggie", "meg", "peggy"]),
    ("katherine", &["kate", "katie", "kathy", "kat"]),
    ("jennifer", &["jen", "jenny"]),
    ("patricia", &["pat", "patty", "trish"]),
    ("deborah", &["deb", "debbie"]),
    ("susan", &["sue", "susie"]),
    ("rebecca", &["becky", "becca"]),
    ("victoria", &["vicky", "tori"]),
    ("samantha", &["sam", "sammy"]),
];

/// Lowercased name -> alias group index, built on first use
fn alias_index() -> &'static HashMap<&'static str, usize> {
    static INDEX: OnceLock<HashMap<&'static str, usize>> = OnceLock::new();

    INDEX.get_or_init(|| {
        let mut index = HashMap::new();
        for (group, (canonical, nicknames)) in FIRST_NAME_ALIASES.iter().enumerate() {
            index.insert(*canonical, group);
            for nickname in nicknames.iter() {
                // first group wins if a nickname is listed twice
                index.entry(*nickname).or_insert(group);
            }
        }
        index
    })
}

/// Index of the alias group containing `name` (already normalized)
#[inline]
pub fn alias_group(name: &str) -> Option<usize> {
    alias_index().get(name).copied()
}

/// True when both normalized names belong to the same alias group
pub fn are_aliases(a: &str, b: &str) -> bool {
    match (alias_group(a), alias_group(b)) {
        (Some(group_a), Some(group_b)) => group_a == group_b,
        _ => false,
    }
}
