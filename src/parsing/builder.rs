use crate::types::BlockContent;
use indexmap::IndexMap;
use log::warn;

/// Accumulates decoded blocks in directory order and assigns unique names.
///
/// A name that is already taken gets the suffix `_(k)`, with `k` the smallest
/// positive integer for which the suffixed name is still free.
#[derive(Debug, Default)]
pub struct ContainerBuilder {
    blocks: IndexMap<String, BlockContent>,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a block under `name`, or a suffixed variant of it.
    ///
    /// # Returns
    /// The name the block was stored under.
    pub fn insert(&mut self, name: &str, content: BlockContent) -> String {
        let key = self.unique_name(name);
        if key != name {
            warn!("Duplicate block {:?} stored as {:?}", name, key);
        }
        self.blocks.insert(key.clone(), content);
        key
    }

    fn unique_name(&self, name: &str) -> String {
        if !self.blocks.contains_key(name) {
            return name.to_string();
        }
        let mut k = 1usize;
        loop {
            let candidate = format!("{name}_({k})");
            if !self.blocks.contains_key(&candidate) {
                return candidate;
            }
            k += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Finish building and hand out the ordered mapping.
    pub fn finish(self) -> IndexMap<String, BlockContent> {
        self.blocks
    }
}
