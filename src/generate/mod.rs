pub mod generator;
pub mod mocker;
pub mod providers;

pub use generator::ValueGenerator;
pub use mocker::Mocker;
pub use providers::{FormatterCatalog, ProviderRegistry};
