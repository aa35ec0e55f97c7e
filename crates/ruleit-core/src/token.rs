//! Ordered token sequences
//!
//! A [`TokenSequence`] is the in-memory representation of a rule: an ordered
//! list of text tokens (condition fragments, connectives, parentheses) whose
//! join with single spaces IS the rule text sent to the server. The sequence
//! never interprets token semantics - it only guards structural position and
//! the no-empty-tokens-after-commit invariant.

/// An ordered, mutable sequence of rule tokens.
///
/// The sequence may be empty (an unset rule). Whether the joined text is a
/// valid boolean expression is decided by the remote evaluation service,
/// never here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence {
    tokens: Vec<String>,
}

impl TokenSequence {
    /// Create an empty sequence (a brand-new rule).
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Create a sequence from a stored rule's tokens, as returned by the
    /// server. Tokens are taken verbatim - no trimming, no filtering.
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// Number of tokens in the sequence.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the sequence holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The token at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// All tokens, in order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Insert a new token at gap `gap` (the position before the token
    /// currently at that index), shifting subsequent tokens right.
    ///
    /// The text is trimmed before insertion. Blank input is "nothing to
    /// insert": the sequence is left unchanged and `false` is returned.
    ///
    /// # Panics
    ///
    /// Panics if `gap > self.len()`. An N-token sequence exposes N+1 gaps.
    pub fn insert_at(&mut self, gap: usize, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.tokens.insert(gap, trimmed.to_string());
        true
    }

    /// Overwrite the raw text of the token at `index`, without trimming.
    ///
    /// Used while a token is mid-edit so the caller can stream keystrokes;
    /// a transiently empty token stays in the sequence until
    /// [`commit_edit`](Self::commit_edit).
    pub fn replace(&mut self, index: usize, text: &str) {
        if let Some(token) = self.tokens.get_mut(index) {
            *token = text.to_string();
        }
    }

    /// Finish editing the token at `index`.
    ///
    /// If the token's trimmed text is empty the token is removed and `true`
    /// is returned; otherwise the token is left exactly as typed. This is
    /// the single point where the no-empty-tokens invariant is enforced.
    pub fn commit_edit(&mut self, index: usize) -> bool {
        match self.tokens.get(index) {
            Some(token) if token.trim().is_empty() => {
                self.tokens.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Remove the token at `index` unconditionally.
    pub fn delete_at(&mut self, index: usize) {
        if index < self.tokens.len() {
            self.tokens.remove(index);
        }
    }

    /// The rule text: all tokens joined with single spaces.
    pub fn join(&self) -> String {
        self.tokens.join(" ")
    }
}

impl From<Vec<String>> for TokenSequence {
    fn from(tokens: Vec<String>) -> Self {
        Self::from_tokens(tokens)
    }
}

impl std::fmt::Display for TokenSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.join())
    }
}
