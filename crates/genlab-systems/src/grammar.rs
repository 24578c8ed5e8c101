use std::collections::BTreeMap;

/// Production rules of a deterministic context-free L-system.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grammar {
    rules: BTreeMap<char, String>,
}

impl Grammar {
    /// Parse one rule per line in the form `X=replacement`.
    ///
    /// `->` is accepted in place of `=`. Blank lines are skipped; lines
    /// whose left side is not a single symbol are ignored with a warning.
    pub fn parse(text: &str) -> Self {
        let mut rules = BTreeMap::new();
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let parsed = line
                .split_once("->")
                .or_else(|| line.split_once('='))
                .and_then(|(lhs, rhs)| {
                    let mut symbols = lhs.trim().chars();
                    match (symbols.next(), symbols.next()) {
                        (Some(symbol), None) => Some((symbol, rhs.trim().to_string())),
                        _ => None,
                    }
                });
            match parsed {
                Some((symbol, replacement)) => {
                    rules.insert(symbol, replacement);
                }
                None => tracing::warn!("ignoring malformed rule: {line}"),
            }
        }
        Self { rules }
    }

    /// Number of production rules, one per distinct predecessor symbol.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no production rule was parsed.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Replacement for `symbol`, if it has a rule.
    pub fn replacement(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }

    /// Rewrite every symbol of `word` in parallel.
    ///
    /// Returns `None` if the result would exceed `limit` symbols.
    pub fn rewrite(&self, word: &str, limit: usize) -> Option<String> {
        let mut out = String::with_capacity(word.len());
        let mut count = 0;
        for symbol in word.chars() {
            match self.replacement(symbol) {
                Some(replacement) => {
                    count += replacement.chars().count();
                    if count > limit {
                        return None;
                    }
                    out.push_str(replacement);
                }
                None => {
                    count += 1;
                    if count > limit {
                        return None;
                    }
                    out.push(symbol);
                }
            }
        }
        Some(out)
    }
}
