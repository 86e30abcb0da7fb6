pub mod books;
pub mod healthcheck;

use readinglist_kernel::ModuleRegistry;

/// Register all service modules with the registry
pub fn register_all(registry: &mut ModuleRegistry) {
    registry.register(healthcheck::create_module());
    registry.register(books::create_module());
}
