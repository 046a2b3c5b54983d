/*
 * @Description  : 读取逗号分隔的文本数据：每行一个样本，空行忽略
 */

use std::fs;
use std::path::Path;

use log::debug;

use super::DataError;
use crate::tensor::Tensor;

fn read_text(path: &Path) -> Result<String, DataError> {
    if !path.exists() {
        return Err(DataError::FileNotFound(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

/// 把一行解析为若干个数字
fn parse_row(line: &str, line_no: usize) -> Result<Vec<f64>, DataError> {
    line.split(',')
        .map(|field| {
            field.trim().parse::<f64>().map_err(|e| {
                DataError::FormatError(format!("第 {line_no} 行的 `{}` 无法解析: {e}", field.trim()))
            })
        })
        .collect()
}

fn non_empty_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

/// 读取图像：每行`channels * width * height`个像素，返回 [N, channels, width, height]
pub fn read_images_csv(
    path: impl AsRef<Path>,
    channels: usize,
    width: usize,
    height: usize,
) -> Result<Tensor, DataError> {
    let text = read_text(path.as_ref())?;
    let pixels = channels * width * height;

    let mut data = Vec::new();
    let mut n = 0;
    for (line_no, line) in non_empty_lines(&text) {
        let row = parse_row(line, line_no)?;
        if row.len() != pixels {
            return Err(DataError::ShapeMismatch {
                expected: vec![channels, width, height],
                got: vec![row.len()],
            });
        }
        data.extend(row);
        n += 1;
    }

    debug!(
        "从 {} 读取了 {} 张 {}x{}x{} 的图像",
        path.as_ref().display(),
        n,
        channels,
        width,
        height
    );
    Ok(Tensor::new(&data, &[n, channels, width, height]))
}

/// 读取类别标签：每行一个整数（也接受单行逗号分隔），返回 [N]
pub fn read_labels_csv(path: impl AsRef<Path>) -> Result<Tensor, DataError> {
    let text = read_text(path.as_ref())?;

    let mut labels = Vec::new();
    for (line_no, line) in non_empty_lines(&text) {
        labels.extend(parse_row(line, line_no)?);
    }

    let n = labels.len();
    debug!("从 {} 读取了 {} 个标签", path.as_ref().display(), n);
    Ok(Tensor::new(&labels, &[n]))
}
