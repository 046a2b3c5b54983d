/*
 * @Description  : 2D 最大池化（不重叠，步长 = 池化窗口）的前向与反向
 *
 * 形状约定：
 * - 输入: [C, W, H]
 * - 输出: [C, W / pW, H / pH]（向下取整，末尾凑不满一个窗口的行列直接丢弃）
 *
 * 反向时，窗口内所有等于最大值的位置（并列时不止一个）都得到该窗口完整的上游梯度，
 * 其余位置（包括被丢弃的末尾行列）梯度为0。
 */

use crate::nn::error::{ensure_dimension, ensure_shape};
use crate::nn::NetError;
use crate::tensor::Tensor;

#[derive(Debug, Clone, Copy)]
struct PoolDims {
    channels: usize,
    in_w: usize,
    in_h: usize,
    pool_w: usize,
    pool_h: usize,
    out_w: usize,
    out_h: usize,
}

impl PoolDims {
    const fn output_shape(&self) -> [usize; 3] {
        [self.channels, self.out_w, self.out_h]
    }

    const fn input_index(&self, c: usize, x: usize, y: usize) -> usize {
        (c * self.in_w + x) * self.in_h + y
    }

    const fn output_index(&self, c: usize, tx: usize, ty: usize) -> usize {
        (c * self.out_w + tx) * self.out_h + ty
    }

    /// 窗口 (tx, ty) 覆盖的输入坐标
    fn tile(&self, tx: usize, ty: usize) -> impl Iterator<Item = (usize, usize)> {
        let (pool_w, pool_h) = (self.pool_w, self.pool_h);
        (tx * pool_w..(tx + 1) * pool_w)
            .flat_map(move |x| (ty * pool_h..(ty + 1) * pool_h).map(move |y| (x, y)))
    }
}

fn check_shapes(data: &Tensor, pool_width: usize, pool_height: usize) -> Result<PoolDims, NetError> {
    ensure_dimension(data.dimension(), 3, "池化输入 [C, W, H]")?;
    let (channels, in_w, in_h) = (data.shape()[0], data.shape()[1], data.shape()[2]);

    if pool_width == 0 || pool_height == 0 || pool_width > in_w || pool_height > in_h {
        return Err(NetError::ShapeMismatch {
            expected: vec![in_w, in_h],
            got: vec![pool_width, pool_height],
            message: format!(
                "池化窗口 {pool_width}x{pool_height} 超出输入尺寸 {in_w}x{in_h}（或为空）"
            ),
        });
    }

    Ok(PoolDims {
        channels,
        in_w,
        in_h,
        pool_w: pool_width,
        pool_h: pool_height,
        out_w: in_w / pool_width,
        out_h: in_h / pool_height,
    })
}

/// 窗口最大值。窗口内含 NaN 时结果为 NaN（`f64::max`会忽略 NaN，这里不用）
fn tile_max(input: &[f64], dims: &PoolDims, c: usize, tx: usize, ty: usize) -> f64 {
    dims.tile(tx, ty)
        .map(|(x, y)| input[dims.input_index(c, x, y)])
        .fold(f64::NEG_INFINITY, |max, v| if v.is_nan() || v > max { v } else { max })
}

/// 最大池化前向：输出每个通道每个窗口的最大值
pub fn forward(data: &Tensor, pool_width: usize, pool_height: usize) -> Result<Tensor, NetError> {
    let dims = check_shapes(data, pool_width, pool_height)?;
    let input = data.to_vec();

    let mut output = vec![0.0f64; dims.channels * dims.out_w * dims.out_h];
    for c in 0..dims.channels {
        for tx in 0..dims.out_w {
            for ty in 0..dims.out_h {
                output[dims.output_index(c, tx, ty)] = tile_max(&input, &dims, c, tx, ty);
            }
        }
    }

    Ok(Tensor::from_vec(output, &dims.output_shape()))
}

/// 最大池化反向，返回对输入的梯度（形状与`data`一致）
pub fn backward(
    data: &Tensor,
    pool_width: usize,
    pool_height: usize,
    output_grad: &Tensor,
) -> Result<Tensor, NetError> {
    let dims = check_shapes(data, pool_width, pool_height)?;
    ensure_shape(output_grad.shape(), &dims.output_shape(), "池化上游梯度")?;

    let input = data.to_vec();
    let upstream = output_grad.to_vec();
    let mut data_grad = vec![0.0f64; input.len()];

    for c in 0..dims.channels {
        for tx in 0..dims.out_w {
            for ty in 0..dims.out_h {
                let max_val = tile_max(&input, &dims, c, tx, ty);
                let g = upstream[dims.output_index(c, tx, ty)];
                for (x, y) in dims.tile(tx, ty) {
                    let idx = dims.input_index(c, x, y);
                    if input[idx] == max_val {
                        data_grad[idx] = g;
                    }
                }
            }
        }
    }

    Ok(Tensor::from_vec(data_grad, data.shape()))
}
