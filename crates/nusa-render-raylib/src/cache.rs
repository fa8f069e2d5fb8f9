use hashbrown::HashMap;
use nusa_transition::{AssetError, ModelHandle};

struct Entry<M> {
    path: String,
    model: M,
    refs: usize,
}

/// Path-keyed, reference-counted store of loaded models. Placements of the
/// same path share one model; the last release evicts it.
pub struct ModelCache<M> {
    by_path: HashMap<String, ModelHandle>,
    entries: HashMap<ModelHandle, Entry<M>>,
    next_id: u64,
}

impl<M> Default for ModelCache<M> {
    fn default() -> Self {
        Self {
            by_path: HashMap::new(),
            entries: HashMap::new(),
            next_id: 1,
        }
    }
}

impl<M> ModelCache<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached handle for `path`, loading it with `load` on a
    /// miss. Failed loads are not cached.
    pub fn acquire<F>(&mut self, path: &str, load: F) -> Result<ModelHandle, AssetError>
    where
        F: FnOnce(&str) -> Result<M, AssetError>,
    {
        if let Some(&handle) = self.by_path.get(path) {
            if let Some(entry) = self.entries.get_mut(&handle) {
                entry.refs += 1;
                return Ok(handle);
            }
        }
        let model = load(path)?;
        let handle = ModelHandle(self.next_id);
        self.next_id += 1;
        self.by_path.insert(path.to_string(), handle);
        self.entries.insert(
            handle,
            Entry {
                path: path.to_string(),
                model,
                refs: 1,
            },
        );
        log::debug!("model cache: loaded {} as {:?}", path, handle);
        Ok(handle)
    }

    /// Drops one reference. Returns the model once nothing uses it.
    pub fn release(&mut self, handle: ModelHandle) -> Option<M> {
        let entry = self.entries.get_mut(&handle)?;
        entry.refs = entry.refs.saturating_sub(1);
        if entry.refs > 0 {
            return None;
        }
        let entry = self.entries.remove(&handle)?;
        self.by_path.remove(&entry.path);
        log::debug!("model cache: evicted {}", entry.path);
        Some(entry.model)
    }

    #[inline]
    pub fn get(&self, handle: ModelHandle) -> Option<&M> {
        self.entries.get(&handle).map(|e| &e.model)
    }

    #[inline]
    pub fn get_mut(&mut self, handle: ModelHandle) -> Option<&mut M> {
        self.entries.get_mut(&handle).map(|e| &mut e.model)
    }

    pub fn refs(&self, handle: ModelHandle) -> usize {
        self.entries.get(&handle).map_or(0, |e| e.refs)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
