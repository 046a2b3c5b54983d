/*
 * @Description  : 负责两层卷积网络（conv → maxpool → relu → linear → softmax）的前向、反向与训练
 */

pub mod config;
mod error;
pub mod layer;
pub mod model;
pub mod ops;
pub mod optimizer;
pub mod params;
pub mod trainer;

pub use config::{NetConfig, TrainConfig};
pub use error::NetError;
pub use layer::{Layer, TraitLayer};
pub use model::Network;
pub use optimizer::{sum_gradients, update_batch, Sgd};
pub use params::{Gradients, ParamName, Parameters};
pub use trainer::{
    compute_accuracy, evaluate, forward_batch, train, TrainHistory, TrainOutcome, TrainState,
};

#[cfg(test)]
mod tests;
