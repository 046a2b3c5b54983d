/*
 * @Description  : 单样本流水线测试：前向的数值性质，以及整条反向与有限差分的比对
 */

use super::{assert_grad_close, numerical_grad, random_tensor, with_param};
use crate::assert_err;
use crate::nn::{NetConfig, NetError, Network, ParamName, Parameters};
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

/// 6x6 图像、2x2 卷积核，卷积输出 5x5 经 2x2 池化后末尾一行一列被丢弃
fn small_config() -> NetConfig {
    NetConfig {
        input_channels: 1,
        image_width: 6,
        image_height: 6,
        conv_filters: 2,
        kernel_width: 2,
        kernel_height: 2,
        pool_width: 2,
        pool_height: 2,
        num_classes: 3,
    }
}

/// 所有参数（包括偏置）都取随机值，使每条梯度路径都被检验到
fn random_params(config: &NetConfig, seed: u64) -> Parameters {
    Parameters::new(
        random_tensor(&config.conv_weight_shape(), seed),
        random_tensor(&[config.conv_filters], seed + 1),
        random_tensor(&[config.hidden_size(), config.num_classes], seed + 2),
        random_tensor(&[config.num_classes], seed + 3),
    )
    .unwrap()
}

fn one_hot(class: usize, num_classes: usize) -> Tensor {
    let mut label = Tensor::zeros(&[num_classes]);
    label[[class]] = 1.;
    label
}

#[test]
fn test_network_rejects_invalid_config() {
    let config = NetConfig {
        pool_width: 6,
        ..small_config()
    };
    assert_err!(Network::new(config), NetError::ShapeMismatch { .. });
}

#[test]
fn test_forward_outputs_probabilities_and_cost() -> Result<(), NetError> {
    let network = Network::new(small_config())?;
    let params = random_params(network.config(), 80);
    let image = random_tensor(&[1, 6, 6], 84);
    let label = one_hot(2, 3);

    let (probabilities, cost) = network.forward(&image, &label, &params)?;
    assert_eq!(probabilities.shape(), &[3]);
    assert_abs_diff_eq!(probabilities.sum(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(cost, -probabilities[[2]].ln(), epsilon = 1e-12);
    assert_eq!(network.predict(&image, &params)?, probabilities);
    Ok(())
}

#[test]
fn test_init_params_matches_config() -> Result<(), NetError> {
    let network = Network::new(small_config())?;
    let params = network.init_params(5)?;
    assert_eq!(params.w2().shape(), &[8, 3]);
    params.check_against(network.config())
}

#[test]
fn test_backward_matches_finite_differences() -> Result<(), NetError> {
    let network = Network::new(small_config())?;
    let params = random_params(network.config(), 90);
    let image = random_tensor(&[1, 6, 6], 94);
    let label = one_hot(1, 3);

    let grads = network.backward(&image, &label, &params)?;
    for name in ParamName::ALL {
        let numeric = numerical_grad(
            |value| {
                let perturbed = with_param(&params, name, value);
                network.forward(&image, &label, &perturbed).unwrap().1
            },
            params.get(name),
        );
        assert_grad_close(grads.get(name), &numeric);
    }
    Ok(())
}

#[test]
fn test_backward_multi_channel_input() -> Result<(), NetError> {
    let config = NetConfig {
        input_channels: 2,
        image_width: 7,
        image_height: 5,
        conv_filters: 3,
        kernel_width: 3,
        kernel_height: 2,
        pool_width: 2,
        pool_height: 2,
        num_classes: 4,
    };
    let network = Network::new(config)?;
    let params = random_params(network.config(), 100);
    let image = random_tensor(&[2, 7, 5], 104);
    let label = one_hot(3, 4);

    let grads = network.backward(&image, &label, &params)?;
    for name in ParamName::ALL {
        let numeric = numerical_grad(
            |value| {
                let perturbed = with_param(&params, name, value);
                network.forward(&image, &label, &perturbed).unwrap().1
            },
            params.get(name),
        );
        assert_grad_close(grads.get(name), &numeric);
    }
    Ok(())
}

/// 反向不修改参数，也不依赖上一次调用留下的任何状态
#[test]
fn test_backward_is_pure() -> Result<(), NetError> {
    let network = Network::new(small_config())?;
    let params = random_params(network.config(), 110);
    let before = params.clone();
    let image_a = random_tensor(&[1, 6, 6], 114);
    let image_b = random_tensor(&[1, 6, 6], 115);
    let label = one_hot(0, 3);

    let first = network.backward(&image_a, &label, &params)?;
    network.backward(&image_b, &label, &params)?;
    let again = network.backward(&image_a, &label, &params)?;

    assert_eq!(first, again);
    assert_eq!(params, before);
    Ok(())
}

#[test]
fn test_forward_shape_errors() -> Result<(), NetError> {
    let network = Network::new(small_config())?;
    let params = random_params(network.config(), 120);

    // 图像尺寸不对，展平后的长度与 W2 行数不符
    assert_err!(
        network.forward(&random_tensor(&[1, 8, 8], 1), &one_hot(0, 3), &params),
        NetError::ShapeMismatch { .. }
    );
    // 标签长度不对
    assert_err!(
        network.backward(&random_tensor(&[1, 6, 6], 2), &one_hot(0, 4), &params),
        NetError::ShapeMismatch { .. }
    );
    Ok(())
}
