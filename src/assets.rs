use crate::sprite_sheet::SpriteAnimation;
use anyhow::{Context, Result};
use glam::UVec2;
use image::RgbaImage;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::hash::Hash;
use std::path::Path;
use std::sync::Arc;

/// Keyed store of shared assets.
#[derive(Debug)]
pub struct Provider<K, V> {
    entries: HashMap<K, Arc<V>>,
}

impl<K, V> Default for Provider<K, V> {
    fn default() -> Self {
        Self { entries: HashMap::new() }
    }
}

impl<K: Eq + Hash, V> Provider<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.entries.get(key).cloned()
    }

    pub fn set(&mut self, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        self.entries.insert(key, Arc::clone(&value));
        value
    }

    pub fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn all(&self) -> impl Iterator<Item = (&K, &Arc<V>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub type Loader<K, V> = Box<dyn Fn(&K) -> Result<V>>;

/// Provider that fills itself on first access through a loader. Failed loads
/// are not cached.
pub struct LoadOnGet<K, V> {
    cache: Provider<K, V>,
    loader: Loader<K, V>,
}

impl<K: Eq + Hash + Clone + std::fmt::Debug, V> LoadOnGet<K, V> {
    pub fn new(loader: impl Fn(&K) -> Result<V> + 'static) -> Self {
        Self { cache: Provider::new(), loader: Box::new(loader) }
    }

    pub fn get(&mut self, key: &K) -> Result<Arc<V>> {
        if let Some(value) = self.cache.get(key) {
            return Ok(value);
        }
        tracing::debug!(?key, "asset cache miss");
        let value = (self.loader)(key)?;
        Ok(self.cache.set(key.clone(), value))
    }

    /// Drops the cached value so the next `get` reloads it.
    pub fn invalidate(&mut self, key: &K) -> bool {
        self.cache.remove(key).is_some()
    }

    pub fn provider(&self) -> &Provider<K, V> {
        &self.cache
    }

    pub fn provider_mut(&mut self) -> &mut Provider<K, V> {
        &mut self.cache
    }
}

pub type SheetProvider = LoadOnGet<String, RgbaImage>;
pub type TextProvider = LoadOnGet<String, String>;

/// Loads `<root>/<key>` as an RGBA image.
pub fn sprite_loader(root: &Path) -> impl Fn(&String) -> Result<RgbaImage> {
    let root = root.to_path_buf();
    move |key: &String| {
        let path = root.join(key);
        let image = image::open(&path).with_context(|| format!("Failed to load sprite sheet {}", path.display()))?;
        Ok(image.to_rgba8())
    }
}

/// Reads `<root>/<key>` as UTF-8 text.
pub fn text_loader(root: &Path) -> impl Fn(&String) -> Result<String> {
    let root = root.to_path_buf();
    move |key: &String| {
        let path = root.join(key);
        fs::read_to_string(&path).with_context(|| format!("Failed to read text asset {}", path.display()))
    }
}

/// JSON layout of an animated sheet: the image plus per-row frame counts and
/// row durations.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetFile {
    pub image: String,
    pub frame_counts: Vec<u32>,
    pub frame_times: Vec<f32>,
    #[serde(default)]
    pub frame_size: Option<[u32; 2]>,
}

impl SheetFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("Failed to read sheet file {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("Failed to parse sheet file {}", path.display()))
    }

    /// Resolves the image through `sheets` and builds the animation.
    pub fn build(&self, sheets: &mut SheetProvider) -> Result<SpriteAnimation> {
        let image = sheets.get(&self.image)?;
        let frame_size = self.frame_size.map(UVec2::from);
        SpriteAnimation::new(image, self.frame_counts.clone(), self.frame_times.clone(), frame_size)
            .with_context(|| format!("Sheet '{}' has an invalid layout", self.image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use image::Rgba;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn provider_shares_values() {
        let mut provider = Provider::new();
        let first = provider.set("a", 1);
        assert!(Arc::ptr_eq(&first, &provider.get(&"a").expect("a")));
        assert_eq!(provider.len(), 1);
        assert!(provider.remove(&"a").is_some());
        assert!(provider.is_empty());
    }

    #[test]
    fn load_on_get_caches_successes_only() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let mut texts: LoadOnGet<String, String> = LoadOnGet::new(move |key: &String| {
            seen.set(seen.get() + 1);
            if key == "missing" {
                Err(anyhow!("no such asset"))
            } else {
                Ok(key.to_uppercase())
            }
        });
        let a = texts.get(&"hi".to_owned()).expect("hi");
        let b = texts.get(&"hi".to_owned()).expect("hi");
        assert!(Arc::ptr_eq(&a, &b));
        assert!(texts.get(&"missing".to_owned()).is_err());
        assert!(texts.get(&"missing".to_owned()).is_err());
        assert_eq!(calls.get(), 3);
        assert!(texts.invalidate(&"hi".to_owned()));
        texts.get(&"hi".to_owned()).expect("reload");
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn loads_sheet_from_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        RgbaImage::from_pixel(40, 20, Rgba([1, 2, 3, 255])).save(dir.path().join("knob.png")).expect("write png");
        fs::write(
            dir.path().join("knob.json"),
            r#"{ "image": "knob.png", "frame_counts": [2], "frame_times": [0.5] }"#,
        )
        .expect("write json");
        fs::write(dir.path().join("prompt.txt"), "fn main() {}\n").expect("write text");

        let mut sheets: SheetProvider = LoadOnGet::new(sprite_loader(dir.path()));
        let sheet = SheetFile::load(dir.path().join("knob.json")).expect("sheet file");
        let anim = sheet.build(&mut sheets).expect("animation");
        assert_eq!(anim.frame_size(), UVec2::new(20, 20));
        assert_eq!(sheets.provider().len(), 1);

        let mut texts: TextProvider = LoadOnGet::new(text_loader(dir.path()));
        assert_eq!(texts.get(&"prompt.txt".to_owned()).expect("text").as_str(), "fn main() {}\n");
        let err = texts.get(&"absent.txt".to_owned()).expect_err("missing file");
        assert!(format!("{err:#}").contains("absent.txt"));
    }
}
