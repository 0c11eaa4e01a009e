use crate::types::token::{DepRel, Token};

/// Per-sentence dependency graph built from the token layer's head
/// pointers. Child lists are kept in token-index order, so every
/// traversal below is deterministic: ties are always broken by
/// sentence-local index, nothing else.
#[derive(Debug, Clone)]
pub struct DepGraph {
    heads: Vec<usize>,
    rels: Vec<DepRel>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl DepGraph {
    /// Build the graph from assembled tokens. A token whose head is
    /// itself is a root.
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let n = tokens.len();
        let mut heads = Vec::with_capacity(n);
        let mut rels = Vec::with_capacity(n);
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut roots = Vec::new();

        for token in tokens {
            let head = if token.head < n { token.head } else { token.i };
            heads.push(head);
            rels.push(token.dep);
            if head == token.i || token.dep == DepRel::Root {
                roots.push(token.i);
            } else {
                children[head].push(token.i);
            }
        }
        Self {
            heads,
            rels,
            children,
            roots,
        }
    }

    pub fn node_count(&self) -> usize {
        self.heads.len()
    }

    /// Governing head of a token; equals the token itself for roots.
    pub fn head(&self, i: usize) -> usize {
        self.heads[i]
    }

    /// Dependency relation of the token to its head.
    pub fn rel(&self, i: usize) -> DepRel {
        self.rels[i]
    }

    /// Direct dependents of a token, in index order.
    pub fn children(&self, i: usize) -> &[usize] {
        self.children.get(i).map_or(&[], |v| v.as_slice())
    }

    /// Direct dependents attached with a specific relation.
    pub fn children_with(&self, i: usize, rel: DepRel) -> impl Iterator<Item = usize> + '_ {
        self.children(i)
            .iter()
            .copied()
            .filter(move |&c| self.rels[c] == rel)
    }

    pub fn has_child_with(&self, i: usize, rel: DepRel) -> bool {
        self.children_with(i, rel).next().is_some()
    }

    /// All descendants of a token including itself, in index order.
    pub fn subtree(&self, i: usize) -> Vec<usize> {
        let mut seen = vec![false; self.node_count()];
        let mut stack = vec![i];
        let mut out = Vec::new();
        while let Some(node) = stack.pop() {
            if seen[node] {
                continue;
            }
            seen[node] = true;
            out.push(node);
            stack.extend(self.children(node).iter().copied());
        }
        out.sort_unstable();
        out
    }

    /// Tokens coordinated with `i` through conjunct edges, excluding `i`
    /// itself, in index order: the head of the coordination chain plus
    /// every transitive conjunct dependent under it.
    pub fn conjuncts(&self, i: usize) -> Vec<usize> {
        // A malformed parse can close a conj cycle with in-range heads,
        // so both walks carry a visited set, like `subtree`.
        let mut climbed = vec![false; self.node_count()];
        let mut chain_head = i;
        while self.rels[chain_head] == DepRel::Conj {
            climbed[chain_head] = true;
            let up = self.heads[chain_head];
            if up == chain_head || climbed[up] {
                break;
            }
            chain_head = up;
        }

        let mut seen = vec![false; self.node_count()];
        let mut out = Vec::new();
        let mut stack = vec![chain_head];
        while let Some(node) = stack.pop() {
            if seen[node] {
                continue;
            }
            seen[node] = true;
            if node != i {
                out.push(node);
            }
            stack.extend(self.children_with(node, DepRel::Conj));
        }
        out.sort_unstable();
        out
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// The first root of the sentence, when the parse has one.
    pub fn root(&self) -> Option<usize> {
        self.roots.first().copied()
    }
}
