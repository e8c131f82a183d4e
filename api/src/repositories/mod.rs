pub mod contest_repository;
pub mod strategy_repository;

pub use contest_repository::ContestRepository;
pub use strategy_repository::StrategyRepository;
