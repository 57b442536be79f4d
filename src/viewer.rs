//! Interactive pixel-window viewer for the demo renders.

use minifb::{Key, Window, WindowOptions};

use crate::demo::{render_demo, Demo, DemoConfig};
use crate::render::image_to_window_buffer;

/// Run the interactive viewer.
/// Press 1-6 to switch demos, R to regenerate with a fresh seed, Escape to exit.
pub fn run_viewer(mut config: DemoConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Scale the render up to a comfortable window size.
    let target_size = 900;

    let img = render_demo(&config)?;
    let img_size = img.width().max(img.height()) as usize;
    let scale = (target_size / img_size.max(1)).max(1);

    let window_width = img.width() as usize * scale;
    let window_height = img.height() as usize * scale;

    let mut window = Window::new(
        "Visualization Suite - 1-6: Demos, R: Regenerate, Esc: Exit",
        window_width,
        window_height,
        WindowOptions {
            resize: false,
            scale: minifb::Scale::X1,
            ..WindowOptions::default()
        },
    )?;

    // Limit to ~60fps
    window.set_target_fps(60);

    println!("Viewer started. Controls:");
    for (i, demo) in Demo::all().iter().enumerate() {
        println!("  {}: {}", i + 1, demo.label());
    }
    println!("  R: Regenerate");
    println!("  Esc: Exit");

    let mut buffer = image_to_window_buffer(&img, window_width, window_height, scale);

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let mut needs_redraw = false;

        if window.is_key_pressed(Key::R, minifb::KeyRepeat::No) {
            config.seed = rand::random();
            println!("Regenerating with seed: {}", config.seed);
            needs_redraw = true;
        }

        let demo_keys = [Key::Key1, Key::Key2, Key::Key3, Key::Key4, Key::Key5, Key::Key6];
        for (key, demo) in demo_keys.iter().zip(Demo::all()) {
            if window.is_key_pressed(*key, minifb::KeyRepeat::No) && config.demo != demo {
                config.demo = demo;
                println!("Switched to: {}", demo.label());
                needs_redraw = true;
            }
        }

        if needs_redraw {
            let img = render_demo(&config)?;
            // Demos render at different sizes; refit the scale per image.
            let fit = (window_width / img.width().max(1) as usize)
                .min(window_height / img.height().max(1) as usize)
                .max(1);
            buffer = image_to_window_buffer(&img, window_width, window_height, fit);
        }

        window.update_with_buffer(&buffer, window_width, window_height)?;
    }

    Ok(())
}
