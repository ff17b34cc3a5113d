//! Prefix index used for shell completion.
//!
//! Entry names are not unique, so the trie counts how many times each word
//! was inserted. A word stays completable until it has been removed as many
//! times as it was inserted.

use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct Node {
    children: BTreeMap<char, Node>,
    count: usize,
}

/// A counted prefix tree.
///
/// # Example
///
/// ```
/// use passvault::trie::Trie;
///
/// let mut trie = Trie::new();
/// trie.insert("github");
/// trie.insert("gitlab");
/// trie.insert("github");
///
/// assert_eq!(trie.completions("git"), vec!["github", "gitlab"]);
/// assert!(trie.remove("github"));
/// assert!(trie.contains("github"));
/// ```
#[derive(Debug, Default)]
pub struct Trie {
    root: Node,
    distinct: usize,
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a trie from a list of words.
    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        let mut trie = Self::new();
        for word in words {
            trie.insert(word);
        }
        trie
    }

    /// Adds one occurrence of `word`. Empty words are ignored.
    pub fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }

        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }

        if node.count == 0 {
            self.distinct += 1;
        }
        node.count += 1;
    }

    /// Removes one occurrence of `word`.
    ///
    /// Returns `false` if the word was not present. Branches left without
    /// any word are pruned.
    pub fn remove(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }

        let chars: Vec<char> = word.chars().collect();
        let Some(emptied) = Self::remove_from(&mut self.root, &chars) else {
            return false;
        };
        if emptied {
            self.distinct -= 1;
        }
        true
    }

    /// Returns `Some(true)` when the last occurrence of the word went away.
    fn remove_from(node: &mut Node, rest: &[char]) -> Option<bool> {
        let Some((first, tail)) = rest.split_first() else {
            if node.count == 0 {
                return None;
            }
            node.count -= 1;
            return Some(node.count == 0);
        };

        let child = node.children.get_mut(first)?;
        let emptied = Self::remove_from(child, tail)?;
        if child.count == 0 && child.children.is_empty() {
            node.children.remove(first);
        }
        Some(emptied)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.find(word).is_some_and(|node| node.count > 0)
    }

    /// All distinct words starting with `prefix`, sorted.
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        let mut results = Vec::new();
        if let Some(node) = self.find(prefix) {
            Self::collect(node, &mut prefix.to_string(), &mut results);
        }
        results
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.distinct
    }

    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn find(&self, prefix: &str) -> Option<&Node> {
        let mut node = &self.root;
        for ch in prefix.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    // BTreeMap iteration yields children in order, so results come out sorted.
    fn collect(node: &Node, prefix: &mut String, results: &mut Vec<String>) {
        if node.count > 0 {
            results.push(prefix.clone());
        }
        for (ch, child) in &node.children {
            prefix.push(*ch);
            Self::collect(child, prefix, results);
            prefix.pop();
        }
    }
}
