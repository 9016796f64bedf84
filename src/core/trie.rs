// --- File: src/core/trie.rs
use crate::config::check_distance;
use crate::core::index::TermIndex;
use crate::core::types::TermMatch;
use crate::error::{GateError, GateResult};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

const ROOT: usize = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TrieNode {
    children: HashMap<char, usize>,
    is_word: bool,
}

impl TrieNode {
    fn new() -> Self {
        Self { children: HashMap::new(), is_word: false }
    }
}

/// Prefix tree over the vocabulary, searched with a bounded number of edits.
/// Nodes live in one arena and refer to children by index; nodes are only
/// ever appended, so indices stay valid for the life of the trie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyTrie {
    nodes: Vec<TrieNode>,
    max_errors: usize,
    word_count: usize,
}

/// Per-call search state. The memo is never shared between targets.
struct Search<'a> {
    target: &'a [char],
    max_errors: usize,
    memo: HashSet<(usize, usize, usize)>,
    path: String,
    found: &'a mut HashMap<String, usize>,
}

impl FuzzyTrie {
    pub fn new(max_errors: usize) -> GateResult<Self> {
        check_distance(max_errors)?;
        Ok(Self { nodes: vec![TrieNode::new()], max_errors, word_count: 0 })
    }

    /// Builds a trie from a word list; the result is only read afterwards.
    pub fn from_words<I, S>(words: I, max_errors: usize) -> GateResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new(max_errors)?;
        for word in words {
            trie.insert(word.as_ref());
        }
        log::debug!(
            "trie: {} words, {} nodes, max_errors {}",
            trie.word_count,
            trie.nodes.len(),
            max_errors
        );
        Ok(trie)
    }

    /// Inserts a word, creating missing nodes along its path.
    /// Inserting the same word again changes nothing.
    /// O(k) complexity where k is word length.
    pub fn insert(&mut self, word: &str) {
        let mut node_idx = ROOT;
        for ch in word.chars() {
            node_idx = match self.nodes[node_idx].children.get(&ch) {
                Some(&id) => id,
                None => {
                    let new_node_id = self.nodes.len();
                    self.nodes.push(TrieNode::new());
                    self.nodes[node_idx].children.insert(ch, new_node_id);
                    new_node_id
                }
            };
        }
        if !self.nodes[node_idx].is_word {
            self.nodes[node_idx].is_word = true;
            self.word_count += 1;
        }
    }

    /// Exact membership.
    pub fn contains(&self, word: &str) -> bool {
        let mut node_idx = ROOT;
        for ch in word.chars() {
            match self.nodes[node_idx].children.get(&ch) {
                Some(&next_idx) => node_idx = next_idx,
                None => return false,
            }
        }
        self.nodes[node_idx].is_word
    }

    /// Vocabulary words within `max_errors` edits of `target`.
    pub fn search(&self, target: &str) -> HashSet<String> {
        self.search_distances(target).into_keys().collect()
    }

    /// Union of `search` over several targets.
    pub fn search_many<I, S>(&self, targets: I) -> HashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut found = HashMap::new();
        for target in targets {
            self.run(target.as_ref(), &mut found);
        }
        found.into_keys().collect()
    }

    /// Like `search`, but with the smallest error count each word was reached
    /// with, sorted by (distance, term).
    pub fn matches(&self, target: &str) -> Vec<TermMatch> {
        let mut matches: Vec<TermMatch> = self
            .search_distances(target)
            .into_iter()
            .map(|(term, distance)| TermMatch { term, distance })
            .collect();
        matches.sort();
        matches
    }

    pub fn max_errors(&self) -> usize {
        self.max_errors
    }

    /// Number of distinct words inserted.
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Checks the arena is a tree rooted at node 0: indices in range, every
    /// other node has exactly one parent and is reachable from the root, and
    /// the word count agrees with the flagged nodes. Run on decoded snapshots
    /// so a bad file fails at load time instead of inside a search.
    pub fn validate(&self) -> GateResult<()> {
        if self.nodes.is_empty() {
            return Err(GateError::InvalidSnapshot("trie has no root node".to_string()));
        }

        let mut parents = vec![0usize; self.nodes.len()];
        for (idx, node) in self.nodes.iter().enumerate() {
            for &child_idx in node.children.values() {
                if child_idx >= self.nodes.len() {
                    return Err(GateError::InvalidSnapshot(format!(
                        "node {} points to missing node {}",
                        idx, child_idx
                    )));
                }
                parents[child_idx] += 1;
            }
        }
        if parents[ROOT] != 0 {
            return Err(GateError::InvalidSnapshot("root has a parent".to_string()));
        }
        if let Some(idx) = parents.iter().skip(1).position(|&count| count != 1) {
            return Err(GateError::InvalidSnapshot(format!(
                "node {} has {} parents",
                idx + 1,
                parents[idx + 1]
            )));
        }

        // One parent each still allows a detached cycle; require reachability.
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![ROOT];
        let mut reached = 0;
        while let Some(idx) = stack.pop() {
            if std::mem::replace(&mut seen[idx], true) {
                continue;
            }
            reached += 1;
            stack.extend(self.nodes[idx].children.values().copied());
        }
        if reached != self.nodes.len() {
            return Err(GateError::InvalidSnapshot(format!(
                "{} nodes unreachable from root",
                self.nodes.len() - reached
            )));
        }

        let flagged = self.nodes.iter().filter(|n| n.is_word).count();
        if flagged != self.word_count {
            return Err(GateError::InvalidSnapshot(format!(
                "word count {} but {} word nodes",
                self.word_count, flagged
            )));
        }
        Ok(())
    }

    fn search_distances(&self, target: &str) -> HashMap<String, usize> {
        let mut found = HashMap::new();
        self.run(target, &mut found);
        found
    }

    fn run(&self, target: &str, found: &mut HashMap<String, usize>) {
        let target: Vec<char> = target.chars().collect();
        let mut search = Search {
            target: &target,
            max_errors: self.max_errors,
            memo: HashSet::new(),
            path: String::new(),
            found,
        };
        self.dfs(&mut search, ROOT, 0, 0);
    }

    /// Walks the trie and the target together. Each state
    /// (node, target index, errors) is expanded at most once, which bounds
    /// the work by nodes * (|target| + 1) * (max_errors + 1).
    fn dfs(&self, search: &mut Search<'_>, node_idx: usize, index: usize, errors: usize) {
        if errors > search.max_errors {
            return;
        }
        if !search.memo.insert((node_idx, index, errors)) {
            return;
        }

        let node = &self.nodes[node_idx];

        if index == search.target.len() {
            if node.is_word {
                let best = search.found.entry(search.path.clone()).or_insert(errors);
                *best = (*best).min(errors);
            }
        } else {
            let ch = search.target[index];

            // Substitution or match
            for (&key, &child_idx) in &node.children {
                search.path.push(key);
                let cost = usize::from(key != ch);
                self.dfs(search, child_idx, index + 1, errors + cost);
                search.path.pop();
            }

            // Deletion: skip a target character
            self.dfs(search, node_idx, index + 1, errors + 1);
        }

        // Insertion: consume a trie edge, also past the end of the target
        if errors < search.max_errors {
            for (&key, &child_idx) in &node.children {
                search.path.push(key);
                self.dfs(search, child_idx, index, errors + 1);
                search.path.pop();
            }
        }
    }
}

impl TermIndex for FuzzyTrie {
    fn matches(&self, query: &str) -> Vec<TermMatch> {
        FuzzyTrie::matches(self, query)
    }

    fn contains(&self, term: &str) -> bool {
        FuzzyTrie::contains(self, term)
    }

    fn max_distance(&self) -> usize {
        self.max_errors
    }
}
