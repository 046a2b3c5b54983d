/*
 * @Description  : 2D 卷积（步长1，无填充）的前向与反向
 *
 * 形状约定：
 * - 卷积核: [C_out, C_in, kW, kH]
 * - 偏置:   [C_out]
 * - 输入:   [C_in, W, H]
 * - 输出:   [C_out, W - kW + 1, H - kH + 1]
 *
 * 反向时相邻输出位置的感受野相互重叠，核梯度与输入梯度都必须累加而非覆盖。
 */

use crate::nn::error::{ensure_dimension, ensure_shape};
use crate::nn::NetError;
use crate::tensor::Tensor;

/// 一次卷积涉及的全部尺寸，由`check_shapes`一次性校验得出
#[derive(Debug, Clone, Copy)]
struct ConvDims {
    out_c: usize,
    in_c: usize,
    k_w: usize,
    k_h: usize,
    in_w: usize,
    in_h: usize,
    out_w: usize,
    out_h: usize,
}

impl ConvDims {
    const fn output_shape(&self) -> [usize; 3] {
        [self.out_c, self.out_w, self.out_h]
    }

    const fn input_index(&self, c: usize, x: usize, y: usize) -> usize {
        (c * self.in_w + x) * self.in_h + y
    }

    const fn kernel_index(&self, oc: usize, ic: usize, i: usize, j: usize) -> usize {
        ((oc * self.in_c + ic) * self.k_w + i) * self.k_h + j
    }

    const fn output_index(&self, oc: usize, x: usize, y: usize) -> usize {
        (oc * self.out_w + x) * self.out_h + y
    }
}

fn check_shapes(weight: &Tensor, bias: &Tensor, data: &Tensor) -> Result<ConvDims, NetError> {
    ensure_dimension(weight.dimension(), 4, "卷积核 [C_out, C_in, kW, kH]")?;
    ensure_dimension(data.dimension(), 3, "卷积输入 [C_in, W, H]")?;

    let (out_c, kernel_in_c, k_w, k_h) = (
        weight.shape()[0],
        weight.shape()[1],
        weight.shape()[2],
        weight.shape()[3],
    );
    let (in_c, in_w, in_h) = (data.shape()[0], data.shape()[1], data.shape()[2]);

    ensure_shape(bias.shape(), &[out_c], "卷积偏置")?;
    if in_c != kernel_in_c {
        return Err(NetError::ShapeMismatch {
            expected: vec![kernel_in_c],
            got: vec![in_c],
            message: format!("输入通道数 {in_c} 与卷积核输入通道数 {kernel_in_c} 不匹配"),
        });
    }
    if k_w == 0 || k_h == 0 || k_w > in_w || k_h > in_h {
        return Err(NetError::ShapeMismatch {
            expected: vec![in_w, in_h],
            got: vec![k_w, k_h],
            message: format!("卷积核 {k_w}x{k_h} 超出输入尺寸 {in_w}x{in_h}（或为空）"),
        });
    }

    Ok(ConvDims {
        out_c,
        in_c,
        k_w,
        k_h,
        in_w,
        in_h,
        out_w: in_w - k_w + 1,
        out_h: in_h - k_h + 1,
    })
}

/// 卷积前向：每个输出元素为对应感受野与卷积核逐元素相乘之和，再加上该输出通道的偏置
pub fn forward(weight: &Tensor, bias: &Tensor, data: &Tensor) -> Result<Tensor, NetError> {
    let dims = check_shapes(weight, bias, data)?;
    let input = data.to_vec();
    let kernel = weight.to_vec();
    let bias = bias.to_vec();

    let mut output = vec![0.0f64; dims.out_c * dims.out_w * dims.out_h];
    for oc in 0..dims.out_c {
        for x in 0..dims.out_w {
            for y in 0..dims.out_h {
                let mut sum = 0.0f64;
                for ic in 0..dims.in_c {
                    for i in 0..dims.k_w {
                        for j in 0..dims.k_h {
                            sum += input[dims.input_index(ic, x + i, y + j)]
                                * kernel[dims.kernel_index(oc, ic, i, j)];
                        }
                    }
                }
                output[dims.output_index(oc, x, y)] = sum + bias[oc];
            }
        }
    }

    Ok(Tensor::from_vec(output, &dims.output_shape()))
}

/// 卷积反向，返回 (对卷积核的梯度, 对偏置的梯度, 对输入的梯度)，形状依次与前向的三个参数一致
///
/// 对每个输出位置 (oc, x, y)，记上游梯度为 g：
/// - dL/dK[oc] += g * 感受野
/// - dL/db[oc] += g
/// - dL/dX[感受野] += g * K[oc]
pub fn backward(
    weight: &Tensor,
    bias: &Tensor,
    data: &Tensor,
    output_grad: &Tensor,
) -> Result<(Tensor, Tensor, Tensor), NetError> {
    let dims = check_shapes(weight, bias, data)?;
    ensure_shape(output_grad.shape(), &dims.output_shape(), "卷积上游梯度")?;

    let input = data.to_vec();
    let kernel = weight.to_vec();
    let upstream = output_grad.to_vec();

    let mut weight_grad = vec![0.0f64; kernel.len()];
    let mut bias_grad = vec![0.0f64; dims.out_c];
    let mut data_grad = vec![0.0f64; input.len()];

    for oc in 0..dims.out_c {
        for x in 0..dims.out_w {
            for y in 0..dims.out_h {
                let g = upstream[dims.output_index(oc, x, y)];
                bias_grad[oc] += g;
                for ic in 0..dims.in_c {
                    for i in 0..dims.k_w {
                        for j in 0..dims.k_h {
                            let input_idx = dims.input_index(ic, x + i, y + j);
                            let kernel_idx = dims.kernel_index(oc, ic, i, j);
                            weight_grad[kernel_idx] += g * input[input_idx];
                            data_grad[input_idx] += g * kernel[kernel_idx];
                        }
                    }
                }
            }
        }
    }

    Ok((
        Tensor::from_vec(weight_grad, weight.shape()),
        Tensor::from_vec(bias_grad, &[dims.out_c]),
        Tensor::from_vec(data_grad, data.shape()),
    ))
}
