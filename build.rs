use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Convert a PNG into the packed four-grey format at build time.
///
/// Output is 2 bits per pixel, most significant pair first, rows padded to
/// whole bytes. 0b11 is white, 0b00 is black, matching the display buffer.
fn convert_image_to_grey(
    input_path: &str,
    output_path: &str,
    target_width: u32,
    target_height: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={}", input_path);

    // Check if input file exists
    if !Path::new(input_path).exists() {
        println!(
            "cargo:warning=Image file '{}' not found, skipping conversion",
            input_path
        );
        // Create empty file so build doesn't fail
        let mut file = File::create(output_path)?;
        file.write_all(&[])?;
        return Ok(());
    }

    println!("cargo:warning=Converting image: {}", input_path);

    let img = image::open(input_path)?;
    println!(
        "cargo:warning=Original image size: {}x{}",
        img.width(),
        img.height()
    );

    // Calculate aspect-ratio-preserving dimensions
    let orig_ratio = img.width() as f32 / img.height() as f32;
    let target_ratio = target_width as f32 / target_height as f32;

    let (new_width, new_height) = if orig_ratio > target_ratio {
        // Image is wider than target - fit to width
        (target_width, (target_width as f32 / orig_ratio) as u32)
    } else {
        // Image is taller than target - fit to height
        ((target_height as f32 * orig_ratio) as u32, target_height)
    };

    let resized = img.resize(new_width, new_height, image::imageops::FilterType::Lanczos3);
    let grey = resized.to_luma8();

    // 2 bits per pixel, rows padded to byte boundaries
    let bytes_per_row = (target_width * 2).div_ceil(8);
    let mut buffer = vec![0u8; (bytes_per_row * target_height) as usize];

    // Center the resized image on a white canvas
    let offset_x = (target_width - new_width) / 2;
    let offset_y = (target_height - new_height) / 2;

    for y in 0..target_height {
        for x in 0..target_width {
            let img_x = x.checked_sub(offset_x);
            let img_y = y.checked_sub(offset_y);

            let brightness = if let (Some(ix), Some(iy)) = (img_x, img_y) {
                if ix < new_width && iy < new_height {
                    grey.get_pixel(ix, iy)[0]
                } else {
                    // Outside image bounds - white
                    255
                }
            } else {
                255
            };

            // Quantize to four levels, 0b11 = white
            let level = brightness >> 6;
            let byte_index = (y * bytes_per_row + x / 4) as usize;
            let shift = 6 - 2 * (x % 4);
            buffer[byte_index] |= level << shift;
        }
    }

    println!(
        "cargo:warning=Image conversion complete. Buffer size: {} bytes",
        buffer.len()
    );

    let mut file = File::create(output_path)?;
    file.write_all(&buffer)?;

    println!("cargo:warning=Grey image saved to: {}", output_path);
    Ok(())
}

fn main() {
    embuild::espidf::sysenv::output();

    let out_dir = env::var("OUT_DIR").unwrap();

    // Convert the GitHub logo at build time; 40x40 fits above the username
    // pill on the 296x128 panel
    let logo_output = format!("{}/logo.bin", out_dir);

    if let Err(e) = convert_image_to_grey("github-logo.png", &logo_output, 40, 40) {
        println!("cargo:warning=Failed to convert github-logo.png: {}", e);
    }

    println!("cargo:rerun-if-changed=github-logo.png");
}
