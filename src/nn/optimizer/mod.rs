/*
 * @Description  : 批量聚合与参数更新
 */

mod sgd;

pub use sgd::{sum_gradients, update_batch, Sgd};
