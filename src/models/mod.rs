/// ML модели

pub mod calories;
pub mod regression;

pub use calories::CaloriePipeline;
pub use regression::OrdinaryLeastSquares;
