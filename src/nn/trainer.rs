/*
 * @Description  : 训练驱动：按固定批次数循环取批次 →（定期评估）→ 更新参数
 *
 * 状态机：Idle → {FetchBatch → (Evaluate) → UpdateParams} × num_batches → Done
 * - 第 k 个批次固定取训练集的 [k*batch_size, (k+1)*batch_size) 切片，不重新打乱；
 *   越界部分被静默截断（可能得到不足一个批次甚至空批次）。
 * - 每隔 eval_interval 个批次，在本批次参数更新*之前*对整个验证集做一次前向，
 *   记录平均损失与准确率。
 */

use log::{debug, info};

use super::optimizer::Sgd;
use super::{Gradients, NetError, Network, Parameters, TrainConfig};
use crate::tensor::Tensor;

/// 训练状态机的状态，括号内为当前批次序号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainState {
    Idle,
    FetchBatch(usize),
    Evaluate(usize),
    UpdateParams(usize),
    Done,
}

/// 验证集上的评估记录，三个序列等长
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainHistory {
    /// 评估发生时的批次序号
    pub steps: Vec<usize>,
    /// 验证集平均交叉熵
    pub cost: Vec<f64>,
    /// 验证集准确率
    pub accuracy: Vec<f64>,
}

impl TrainHistory {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn record(&mut self, step: usize, cost: f64, accuracy: f64) {
        self.steps.push(step);
        self.cost.push(cost);
        self.accuracy.push(accuracy);
    }
}

/// 训练结束（Done 状态）时产出的结果
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub params: Parameters,
    pub history: TrainHistory,
}

/// 对一批样本逐个前向，返回 (概率 [N, num_classes], 各样本损失)
pub fn forward_batch<F>(
    images: &Tensor,
    labels: &Tensor,
    params: &Parameters,
    forward_fn: &F,
) -> Result<(Tensor, Vec<f64>), NetError>
where
    F: Fn(&Tensor, &Tensor, &Parameters) -> Result<(Tensor, f64), NetError>,
{
    check_pairs(images, labels, 4, "图像")?;
    let n = images.shape()[0];
    if n == 0 {
        return Err(NetError::InvalidData("前向的批次不能为空".to_string()));
    }

    let mut outputs = Vec::with_capacity(n);
    let mut costs = Vec::with_capacity(n);
    for i in 0..n {
        let (probabilities, cost) = forward_fn(&images.select(i), &labels.select(i), params)?;
        outputs.push(probabilities);
        costs.push(cost);
    }
    let output_refs = outputs.iter().collect::<Vec<_>>();
    Ok((Tensor::stack(&output_refs), costs))
}

/// 准确率：预测概率的 argmax 与 one-hot 标签的 argmax 一致的样本比例
pub fn compute_accuracy(output: &Tensor, labels: &Tensor) -> Result<f64, NetError> {
    check_pairs(output, labels, 2, "输出")?;
    if output.shape() != labels.shape() {
        return Err(NetError::ShapeMismatch {
            expected: labels.shape().to_vec(),
            got: output.shape().to_vec(),
            message: "输出与标签的形状须一致".to_string(),
        });
    }
    let n = output.shape()[0];
    if n == 0 {
        return Err(NetError::InvalidData("不能在空集上计算准确率".to_string()));
    }

    let correct = (0..n)
        .filter(|&i| output.select(i).argmax() == labels.select(i).argmax())
        .count();
    Ok(correct as f64 / n as f64)
}

/// 在一组数据上计算准确率
pub fn evaluate(
    network: &Network,
    images: &Tensor,
    labels: &Tensor,
    params: &Parameters,
) -> Result<f64, NetError> {
    let (output, _) = forward_batch(images, labels, params, &|x: &Tensor, y: &Tensor, p: &Parameters| {
        network.forward(x, y, p)
    })?;
    compute_accuracy(&output, labels)
}

/// 训练入口。`init_fn`以`config.seed`为种子给出初始参数，`forward_fn`/`backward_fn`为单样本前向/反向
#[allow(clippy::too_many_arguments)]
pub fn train<I, F, B>(
    train_images: &Tensor,
    train_labels: &Tensor,
    dev_images: &Tensor,
    dev_labels: &Tensor,
    init_fn: I,
    forward_fn: F,
    backward_fn: B,
    config: &TrainConfig,
) -> Result<TrainOutcome, NetError>
where
    I: FnOnce(u64) -> Result<Parameters, NetError>,
    F: Fn(&Tensor, &Tensor, &Parameters) -> Result<(Tensor, f64), NetError>,
    B: Fn(&Tensor, &Tensor, &Parameters) -> Result<Gradients, NetError> + Sync,
{
    config.validate()?;
    check_pairs(train_images, train_labels, 4, "训练图像")?;
    check_pairs(dev_images, dev_labels, 4, "验证图像")?;
    if config.num_batches > 0 && dev_images.shape()[0] == 0 {
        return Err(NetError::InvalidData("验证集不能为空".to_string()));
    }

    let optimizer = Sgd::new(config.learning_rate)?.parallel(config.parallel);
    let mut params = init_fn(config.seed)?;
    let mut history = TrainHistory::default();
    let mut batch: Option<(Tensor, Tensor)> = None;
    let mut state = TrainState::Idle;

    loop {
        state = match state {
            TrainState::Idle => {
                if config.num_batches == 0 {
                    TrainState::Done
                } else {
                    TrainState::FetchBatch(0)
                }
            }
            TrainState::FetchBatch(step) => {
                debug!("正在处理批次 {} / {}", step, config.num_batches);
                let start = step.saturating_mul(config.batch_size);
                let end = start.saturating_add(config.batch_size);
                batch = Some((
                    train_images.narrow(start, end),
                    train_labels.narrow(start, end),
                ));
                if step % config.eval_interval == 0 {
                    TrainState::Evaluate(step)
                } else {
                    TrainState::UpdateParams(step)
                }
            }
            TrainState::Evaluate(step) => {
                let (output, costs) = forward_batch(dev_images, dev_labels, &params, &forward_fn)?;
                let mean_cost = costs.iter().sum::<f64>() / costs.len() as f64;
                let accuracy = compute_accuracy(&output, dev_labels)?;
                info!("批次 {step}：验证集损失 {mean_cost:.6}，准确率 {accuracy:.4}");
                history.record(step, mean_cost, accuracy);
                TrainState::UpdateParams(step)
            }
            TrainState::UpdateParams(step) => {
                if let Some((images, labels)) = batch.take() {
                    optimizer.update_batch(&images, &labels, &mut params, &backward_fn)?;
                }
                if step + 1 < config.num_batches {
                    TrainState::FetchBatch(step + 1)
                } else {
                    TrainState::Done
                }
            }
            TrainState::Done => break,
        };
    }

    Ok(TrainOutcome { params, history })
}

/// 校验一组 (输入, 标签)：输入阶数正确、标签为2阶、两者样本数一致
fn check_pairs(
    inputs: &Tensor,
    labels: &Tensor,
    input_dimension: usize,
    what: &str,
) -> Result<(), NetError> {
    if inputs.dimension() != input_dimension {
        return Err(NetError::DimensionMismatch {
            expected: input_dimension,
            got: inputs.dimension(),
            message: format!("{what}须为 {input_dimension} 阶且首个维度为样本数"),
        });
    }
    if labels.dimension() != 2 {
        return Err(NetError::DimensionMismatch {
            expected: 2,
            got: labels.dimension(),
            message: "标签须为 [样本数, 类别数]".to_string(),
        });
    }
    if inputs.shape()[0] != labels.shape()[0] {
        return Err(NetError::ShapeMismatch {
            expected: vec![inputs.shape()[0]],
            got: vec![labels.shape()[0]],
            message: format!("{what}数与标签数不一致"),
        });
    }
    Ok(())
}
