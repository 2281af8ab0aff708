use ndarray::{Array1, Array2};

/// 在闭区间[start, end]上生成`n`个等距点，两端点精确取到
///
/// `n == 1`时只返回`start`；`n == 0`时返回空数组。
pub fn linspace(start: f32, end: f32, n: usize) -> Array1<f32> {
    match n {
        0 => Array1::zeros(0),
        1 => Array1::from_elem(1, start),
        _ => {
            let step = (end - start) / (n - 1) as f32;
            Array1::from_shape_fn(n, |i| {
                if i == n - 1 {
                    end
                } else {
                    start + step * i as f32
                }
            })
        }
    }
}

/// 生成S×S图像的坐标网格，形状为[S², 2]
///
/// 第`r * S + c`行为`(ys[r], xs[c])`，其中`xs = ys = linspace(-1, 1, S)`：
/// 第0列随图像行变化，第1列随图像列变化，与图像按行优先展平的像素顺序一一对应。
/// 若两列颠倒，模型实际拟合的将是转置后的图像。
pub fn coordinate_grid(size: usize) -> Array2<f32> {
    let axis = linspace(-1.0, 1.0, size);
    Array2::from_shape_fn((size * size, 2), |(index, column)| {
        let (row, col) = (index / size, index % size);
        if column == 0 { axis[row] } else { axis[col] }
    })
}
