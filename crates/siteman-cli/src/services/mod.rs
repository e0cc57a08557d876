// crates/siteman-cli/src/services/mod.rs - Service layer modules
//
// Process-backed implementations of the core collaborator traits, plus
// project scaffolding.
pub mod editor;
pub mod generator;
pub mod process;
pub mod selector;
pub mod site;
pub mod sync;

pub use editor::EditorService;
pub use generator::GeneratorService;
pub use selector::SelectorService;
pub use site::SiteService;
pub use sync::RsyncService;
