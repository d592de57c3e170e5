//! Translation suggestions inside `<target>` elements.
//!
//! The provider works out which sentence is being translated and into which
//! language, then asks a [`TranslationMemory`]. Answers are cached per
//! `(language, source)` for the life of the provider; failures are not.

use crate::extract::{attribute, child_element, enclosing, text_content};
use crate::tm::{TmMatch, TranslationMemory};
use crate::types::{CompletionItem, Position};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use xliff_xml::{NodeId, Pattern, Tree};

/// Target language, then source text.
type Cache = HashMap<String, HashMap<String, Vec<CompletionItem>>>;

/// What a completion request needs to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupKey {
    pub language: String,
    pub source: String,
}

/// Resolve the lookup for a cursor position.
///
/// `node` wins over `cursor` when the host already knows it. Returns `None`
/// unless the node is a `target` inside a `trans-unit` inside a `file` that
/// declares `target-language`, and the unit has a non-empty `source`.
pub fn lookup_key(tree: &Tree, cursor: Position, node: Option<NodeId>) -> Option<LookupKey> {
    let node = node.or_else(|| tree.element_at(cursor.to_pos()))?;
    tree.match_node(node, &Pattern::element("target"))?;

    let unit = enclosing(tree, node, "trans-unit")?;
    let file = enclosing(tree, unit, "file")?;
    let language = attribute(tree, file, "target-language")?;

    let source = child_element(tree, unit, "source")?;
    let source = text_content(tree, source).filter(|text| !text.is_empty())?;

    Some(LookupKey {
        language: language.to_string(),
        source,
    })
}

/// Completion items for translation-memory matches.
pub fn completion_items(matches: Vec<TmMatch>) -> Vec<CompletionItem> {
    matches
        .into_iter()
        .map(|m| CompletionItem {
            label: m.target.clone(),
            insert_text: m.target,
            meta: format!("TM: {}", m.quality),
            priority: m.quality,
        })
        .collect()
}

pub struct CompletionProvider {
    memory: Arc<dyn TranslationMemory>,
    cache: RwLock<Cache>,
}

impl CompletionProvider {
    pub fn new(memory: Arc<dyn TranslationMemory>) -> Self {
        Self {
            memory,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Suggestions at `cursor`, or for `node` when given.
    pub async fn complete(
        &self,
        tree: &Tree,
        cursor: Position,
        node: Option<NodeId>,
    ) -> Vec<CompletionItem> {
        match lookup_key(tree, cursor, node) {
            Some(key) => self.suggestions(&key.language, &key.source).await,
            None => Vec::new(),
        }
    }

    /// Suggestions for translating `source` into `language`.
    pub async fn suggestions(&self, language: &str, source: &str) -> Vec<CompletionItem> {
        if let Some(items) = self.cached(language, source).await {
            tracing::debug!(language, "translation memory cache hit");
            return items;
        }

        match self.memory.lookup(language, source).await {
            Ok(matches) => {
                let items = completion_items(matches);
                self.cache
                    .write()
                    .await
                    .entry(language.to_string())
                    .or_default()
                    .insert(source.to_string(), items.clone());
                items
            }
            Err(err) => {
                tracing::warn!(language, error = %err, "translation memory lookup failed");
                Vec::new()
            }
        }
    }

    pub async fn cached(&self, language: &str, source: &str) -> Option<Vec<CompletionItem>> {
        self.cache
            .read()
            .await
            .get(language)
            .and_then(|by_source| by_source.get(source))
            .cloned()
    }

}

impl std::fmt::Debug for CompletionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionProvider").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tm::LookupError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use xliff_xml::parse;

    /// Answers every lookup with two matches and counts the calls.
    #[derive(Default)]
    struct CountingMemory {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl TranslationMemory for CountingMemory {
        async fn lookup(
            &self,
            target_language: &str,
            source: &str,
        ) -> Result<Vec<TmMatch>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LookupError::Other("offline".into()));
            }
            Ok(vec![
                TmMatch {
                    target: format!("{source} ({target_language})"),
                    quality: 100.0,
                },
                TmMatch {
                    target: "close".into(),
                    quality: 87.5,
                },
            ])
        }
    }

    const DOC: &str = r#"<xliff>
  <file original="a" target-language="fr">
    <body>
      <trans-unit id="1">
        <source>Hello</source>
        <target>Bon</target>
      </trans-unit>
    </body>
  </file>
</xliff>"#;

    // Inside "Bon"
    const IN_TARGET: Position = Position {
        line: 5,
        character: 17,
    };

    fn provider() -> (Arc<CountingMemory>, CompletionProvider) {
        let memory = Arc::new(CountingMemory::default());
        let provider = CompletionProvider::new(memory.clone());
        (memory, provider)
    }

    #[test]
    fn test_lookup_key() {
        let tree = parse(DOC);
        assert_eq!(
            lookup_key(&tree, IN_TARGET, None),
            Some(LookupKey {
                language: "fr".into(),
                source: "Hello".into()
            })
        );
        // On the source line
        assert_eq!(lookup_key(&tree, Position::new(4, 17), None), None);
    }

    #[test]
    fn test_lookup_key_requires_target_language() {
        let tree = parse(&DOC.replace(r#" target-language="fr""#, ""));
        assert_eq!(lookup_key(&tree, IN_TARGET, None), None);
    }

    #[test]
    fn test_lookup_key_requires_source_text() {
        let tree = parse(&DOC.replace("<source>Hello</source>", "<source></source>"));
        assert_eq!(lookup_key(&tree, Position::new(5, 15), None), None);
    }

    #[tokio::test]
    async fn test_second_request_is_served_from_cache() {
        let tree = parse(DOC);
        let (memory, provider) = provider();

        let first = provider.complete(&tree, IN_TARGET, None).await;
        let second = provider.complete(&tree, IN_TARGET, None).await;

        assert_eq!(memory.calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].label, "Hello (fr)");
        assert_eq!(first[0].insert_text, "Hello (fr)");
        assert_eq!(first[0].meta, "TM: 100");
        assert_eq!(first[0].priority, 100.0);
        assert_eq!(first[1].meta, "TM: 87.5");
    }

    #[tokio::test]
    async fn test_cursor_outside_target_makes_no_request() {
        let tree = parse(DOC);
        let (memory, provider) = provider();

        assert!(provider.complete(&tree, Position::new(4, 17), None).await.is_empty());
        assert!(provider.complete(&tree, Position::new(0, 2), None).await.is_empty());
        assert_eq!(memory.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_explicit_node_overrides_cursor() {
        let tree = parse(DOC);
        let (memory, provider) = provider();
        let target = crate::extract::get_elements(&tree, tree.root(), "target")[0];

        let items = provider
            .complete(&tree, Position::new(0, 0), Some(target))
            .await;
        assert_eq!(items.len(), 2);
        assert_eq!(memory.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let tree = parse(DOC);
        let memory = Arc::new(CountingMemory {
            fail: true,
            ..Default::default()
        });
        let provider = CompletionProvider::new(memory.clone());

        assert!(provider.complete(&tree, IN_TARGET, None).await.is_empty());
        assert!(provider.complete(&tree, IN_TARGET, None).await.is_empty());
        assert_eq!(memory.calls.load(Ordering::SeqCst), 2);
        assert_eq!(provider.cached("fr", "Hello").await, None);
    }

    #[tokio::test]
    async fn test_cache_is_keyed_by_language_and_source() {
        let (memory, provider) = provider();

        provider.suggestions("fr", "Hello").await;
        provider.suggestions("de", "Hello").await;
        provider.suggestions("fr", "Bye").await;
        provider.suggestions("fr", "Hello").await;
        assert_eq!(memory.calls.load(Ordering::SeqCst), 3);
        assert!(provider.cached("de", "Bye").await.is_none());
    }
}
