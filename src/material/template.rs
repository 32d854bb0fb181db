//! The shared template every generated material is cloned from.

use super::Material;
use std::rc::Rc;

/// Loads the template material. Called at most once per cache.
pub trait TemplateSource {
    fn load_template(&mut self) -> Material;
}

/// Provides [`Material::standard`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTemplate;

impl TemplateSource for StandardTemplate {
    fn load_template(&mut self) -> Material {
        Material::standard()
    }
}

impl<F: FnMut() -> Material> TemplateSource for F {
    fn load_template(&mut self) -> Material {
        self()
    }
}

/// Lazily loaded, memoized template material.
///
/// Not thread-safe: the handle is an `Rc`, so a cache cannot cross threads.
/// Callers that generate on several threads should give each its own
/// generator, or warm one up with [`DefaultMaterialCache::get`] before use.
#[derive(Debug)]
pub struct DefaultMaterialCache<S = StandardTemplate> {
    source: S,
    cached: Option<Rc<Material>>,
}

impl<S: TemplateSource> DefaultMaterialCache<S> {
    pub fn new(source: S) -> Self {
        Self { source, cached: None }
    }

    /// The template, loading it on first call.
    pub fn get(&mut self) -> Rc<Material> {
        if let Some(template) = &self.cached {
            return Rc::clone(template);
        }
        log::debug!("Loading default material template");
        let template = Rc::new(self.source.load_template());
        self.cached = Some(Rc::clone(&template));
        template
    }

    /// A fresh copy of the template. Editing it never touches the template.
    pub fn instantiate(&mut self) -> Material {
        Material::clone(&self.get())
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.is_some()
    }
}

impl Default for DefaultMaterialCache<StandardTemplate> {
    fn default() -> Self {
        Self::new(StandardTemplate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use std::cell::Cell;

    #[test]
    fn test_get_returns_same_handle() {
        let mut cache = DefaultMaterialCache::default();
        assert!(!cache.is_loaded());

        let a = cache.get();
        let b = cache.get();

        assert!(cache.is_loaded());
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_template_loaded_once() {
        let loads = Cell::new(0);
        let mut cache = DefaultMaterialCache::new(|| {
            loads.set(loads.get() + 1);
            Material::standard()
        });

        cache.get();
        cache.instantiate();
        cache.get();

        assert_eq!(loads.get(), 1);
    }

    #[test]
    fn test_instances_do_not_alias_template() {
        let mut cache = DefaultMaterialCache::default();

        let mut first = cache.instantiate();
        first.color = Vec4::new(1.0, 0.0, 0.0, 1.0);
        first.name = "edited".to_string();

        let second = cache.instantiate();
        assert_eq!(second.color, Vec4::ONE);
        assert!(second.name.is_empty());
        assert_eq!(*cache.get(), Material::standard());
    }
}
