//! Per-card script history: an append-only sequence of versions with a
//! cursor for linear back/forward navigation. Exactly one version is
//! displayed at any time, and refinements always branch from it.

/// Label of the revision a store is seeded with.
pub const ORIGINAL_LABEL: &str = "Original";
/// Label used when a refine prompt is empty.
pub const FALLBACK_LABEL: &str = "Edición";
/// Character budget for prompt-derived labels before the ellipsis.
pub const LABEL_MAX_CHARS: usize = 28;

/// One stored version of a card's script. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    pub text: String,
    /// How this revision was produced: `"Original"` or a truncated prompt.
    pub label: String,
    /// RFC 3339 creation time, stamped by the shell.
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionStore {
    revisions: Vec<Revision>,
    cursor: usize,
}

impl RevisionStore {
    pub fn new(initial_text: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            revisions: vec![Revision {
                text: initial_text.into(),
                label: ORIGINAL_LABEL.to_string(),
                created_at: created_at.into(),
            }],
            cursor: 0,
        }
    }

    /// Appends a revision and selects it. The newest version is always the
    /// displayed one after an append.
    pub fn append(
        &mut self,
        text: impl Into<String>,
        label: impl Into<String>,
        created_at: impl Into<String>,
    ) {
        self.revisions.push(Revision {
            text: text.into(),
            label: label.into(),
            created_at: created_at.into(),
        });
        self.cursor = self.revisions.len() - 1;
    }

    /// Moves one version toward the start. Returns false at the boundary.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Moves one version toward the end. Returns false at the boundary.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.revisions.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn current(&self) -> &Revision {
        // Invariant: seeded with one revision and append-only, so the
        // cursor always points at an element.
        &self.revisions[self.cursor]
    }

    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    /// Always false; the sequence is seeded and append-only.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn at_start(&self) -> bool {
        self.cursor == 0
    }

    pub fn at_end(&self) -> bool {
        self.cursor + 1 == self.revisions.len()
    }

    /// Position indicator in `"{cursor+1}/{length}"` form.
    pub fn indicator(&self) -> String {
        format!("{}/{}", self.cursor + 1, self.revisions.len())
    }
}

/// Derives a revision label from the refine prompt: the first
/// [`LABEL_MAX_CHARS`] characters plus an ellipsis when longer, or
/// [`FALLBACK_LABEL`] when the prompt is blank.
pub fn prompt_label(prompt: &str) -> String {
    if prompt.trim().is_empty() {
        return FALLBACK_LABEL.to_string();
    }
    let mut chars = prompt.chars();
    let head: String = chars.by_ref().take(LABEL_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::prompt_label;

    #[test]
    fn short_prompt_is_kept_verbatim() {
        assert_eq!(prompt_label("más corto"), "más corto");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let prompt = "ñ".repeat(30);
        let label = prompt_label(&prompt);
        assert_eq!(label.chars().count(), 29);
        assert!(label.ends_with('…'));
    }

    #[test]
    fn exactly_at_budget_is_not_truncated() {
        let prompt = "a".repeat(28);
        assert_eq!(prompt_label(&prompt), prompt);
    }
}
