//! Template persistence seam
//!
//! The engine never persists anything itself. Hosts implement
//! [`TemplateStore`] over whatever storage they have; [`MemoryStore`] is the
//! in-process version.

use std::convert::Infallible;

use ahash::AHashMap;

use crate::template::Template;

/// Storage for templates, keyed by template id
pub trait TemplateStore {
    type Error: std::error::Error;

    /// Insert or overwrite a template
    fn save(&mut self, template: &Template) -> Result<(), Self::Error>;

    /// Fetch a template by id
    fn load(&self, id: &str) -> Result<Option<Template>, Self::Error>;

    /// Remove a template, returning whether it existed
    fn delete(&mut self, id: &str) -> Result<bool, Self::Error>;

    /// All stored ids, sorted
    fn ids(&self) -> Result<Vec<String>, Self::Error>;
}

/// Templates held in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    templates: AHashMap<String, Template>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateStore for MemoryStore {
    type Error = Infallible;

    fn save(&mut self, template: &Template) -> Result<(), Self::Error> {
        self.templates
            .insert(template.id().to_string(), template.clone());
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<Template>, Self::Error> {
        Ok(self.templates.get(id).cloned())
    }

    fn delete(&mut self, id: &str) -> Result<bool, Self::Error> {
        Ok(self.templates.remove(id).is_some())
    }

    fn ids(&self) -> Result<Vec<String>, Self::Error> {
        let mut ids: Vec<String> = self.templates.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::Palette;
    use shadeplate_color::HexColor;

    fn template(id: &str) -> Template {
        let palette: Palette = [("Base", HexColor::new(0x33, 0x66, 0xCC)), ("Edge", HexColor::BLACK)]
            .into_iter()
            .collect();
        Template::from_palette(id, format!("Template {}", id), &palette).unwrap()
    }

    #[test]
    fn test_memory_store_lifecycle() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());

        store.save(&template("b")).unwrap();
        store.save(&template("a")).unwrap();
        assert_eq!(store.ids().unwrap(), ["a", "b"]);

        let loaded = store.load("a").unwrap().unwrap();
        assert_eq!(loaded, template("a"));
        assert!(store.load("zzz").unwrap().is_none());

        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());
        assert_eq!(store.len(), 1);
    }
}
