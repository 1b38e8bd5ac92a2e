use std::collections::HashMap;

use log::debug;

/// A live visualisation that holds render resources until destroyed.
pub trait ChartInstance {
    fn destroy(&mut self);
}

/// Canvas id -> owned chart handle; at most one live instance per id.
pub struct ChartRegistry<H: ChartInstance> {
    slots: HashMap<String, H>,
}

impl<H: ChartInstance> Default for ChartRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ChartInstance> ChartRegistry<H> {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Destroy whatever lives under `id`, then build and store the replacement.
    /// If `create` fails the slot stays empty.
    pub fn replace_with<E, F>(&mut self, id: &str, create: F) -> Result<&mut H, E>
    where
        F: FnOnce() -> Result<H, E>,
    {
        if let Some(mut previous) = self.slots.remove(id) {
            debug!("destroying previous chart on #{id}");
            previous.destroy();
        }
        let handle = create()?;
        Ok(self.slots.entry(id.to_string()).or_insert(handle))
    }

    pub fn get(&self, id: &str) -> Option<&H> {
        self.slots.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut H> {
        self.slots.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    /// Destroy and forget one chart. Returns false if nothing lived there.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.slots.remove(id) {
            Some(mut handle) => {
                handle.destroy();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        for (_, mut handle) in self.slots.drain() {
            handle.destroy();
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut H)> {
        self.slots.iter_mut().map(|(k, v)| (k.as_str(), v))
    }
}

impl<H: ChartInstance> Drop for ChartRegistry<H> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct FakeChart {
        live: Rc<Cell<i32>>,
        tag: u32,
    }

    impl FakeChart {
        fn create(live: &Rc<Cell<i32>>, tag: u32) -> Result<Self, String> {
            live.set(live.get() + 1);
            Ok(Self {
                live: live.clone(),
                tag,
            })
        }
    }

    impl ChartInstance for FakeChart {
        fn destroy(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    #[test]
    fn replacing_leaves_exactly_one_live_instance() {
        let live = Rc::new(Cell::new(0));
        let mut reg = ChartRegistry::new();
        reg.replace_with("distributionChart", || FakeChart::create(&live, 1))
            .unwrap();
        reg.replace_with("distributionChart", || {
            // the old chart is gone before the new one is built
            assert_eq!(live.get(), 0);
            FakeChart::create(&live, 2)
        })
        .unwrap();
        assert_eq!(live.get(), 1);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("distributionChart").map(|c| c.tag), Some(2));
    }

    #[test]
    fn failed_create_leaves_slot_empty() {
        let live = Rc::new(Cell::new(0));
        let mut reg = ChartRegistry::new();
        reg.replace_with("trendChart", || FakeChart::create(&live, 1))
            .unwrap();
        let res: Result<&mut FakeChart, String> =
            reg.replace_with("trendChart", || Err("no canvas".to_string()));
        assert!(res.is_err());
        assert!(!reg.contains("trendChart"));
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn ids_are_independent_and_clear_destroys_all() {
        let live = Rc::new(Cell::new(0));
        let mut reg = ChartRegistry::new();
        for id in ["distributionChart", "trendChart", "gaugeA"] {
            reg.replace_with(id, || FakeChart::create(&live, 0)).unwrap();
        }
        assert_eq!(live.get(), 3);
        assert!(reg.remove("gaugeA"));
        assert!(!reg.remove("gaugeA"));
        assert_eq!(live.get(), 2);
        reg.clear();
        assert_eq!(live.get(), 0);
        assert!(reg.is_empty());
    }

    #[test]
    fn dropping_registry_destroys_charts() {
        let live = Rc::new(Cell::new(0));
        {
            let mut reg = ChartRegistry::new();
            reg.replace_with("confidenceChart", || FakeChart::create(&live, 0))
                .unwrap();
        }
        assert_eq!(live.get(), 0);
    }
}
