pub mod catalog;
pub mod classifier;
pub mod config;
pub mod database;
pub mod entity;
pub mod filter;
pub mod models;
pub mod simulation;

pub use catalog::{strategy_id, CatalogError, StrategyCatalog, StrategyDescriptor};
pub use classifier::{Classified, Classifier, ClassifierKey, MemoryDepth};
pub use config::Config;
pub use database::get_db_connection;
pub use entity::sea_orm_active_enums::{ContestKind, ContestStatus};
pub use filter::{filter_collection, passes, FilterError, FilterSet, FilterValue};
pub use models::*;
pub use simulation::{SimulationClient, SimulationError, SimulationRequest, SimulationRunner};
