use ecc200::{DataMatrix, EncodeOptions};
use image::{GrayImage, Luma};

/// Generate image which only contains a Data Matrix
fn main() {
    // Width and height in pixels of one module.
    const N: usize = 5;

    let code = DataMatrix::encode(b"Hello, World!", &EncodeOptions::default()).unwrap();
    println!("{}", code.info());
    let bitmap = code.bitmap();

    // one module of quiet zone on each side
    let width = ((bitmap.width() + 2) * N) as u32;
    let height = ((bitmap.height() + 2) * N) as u32;
    let mut image = GrayImage::from_pixel(width, height, Luma([255]));
    for (x, y) in bitmap.pixels() {
        for i in 0..N {
            for j in 0..N {
                let x_i = (x + 1) * N + j;
                let y_j = (y + 1) * N + i;
                image.put_pixel(x_i as u32, y_j as u32, Luma([0]));
            }
        }
    }

    image.save("data_matrix.png").unwrap();
}
