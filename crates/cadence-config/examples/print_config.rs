/// Example program to print the loaded configuration
///
/// Run with: cargo run -p cadence-config --example print_config

fn main() {
    // Load configuration from cadence.toml plus CADENCE_* overrides
    let config = cadence_config::CadenceConfig::load();

    println!("=== Cadence Configuration ===\n");

    println!("Playback:");
    println!("  Element: {}", config.playback.element_id);
    println!("  Transition: {:?}", config.playback.transition);
    println!("  Definition: {:?}", config.playback.definition);
    println!("  Direction: {}", config.playback.direction);
    println!("  Duration: {}ms", config.playback.duration_ms);
    println!("  Easing: {}", config.playback.easing);
    println!("  Intensity: {:?}", config.playback.intensity);
    println!("  Frame Interval: {}ms", config.playback.frame_interval_ms);
    println!("  Max Frames: {}", config.playback.max_frames);
    println!();

    println!("Effects:");
    println!("  Input: {:?}", config.effects.input);
    println!("  Output Dir: {:?}", config.effects.output_dir);
    println!("  Sample Every: {}", config.effects.sample_every);
    println!();

    println!("Style Units:");
    println!("  Translate: {}", config.style.translate);
    println!("  Rotate: {}", config.style.rotate);
    println!("  Skew: {}", config.style.skew);
    println!("  Blur: {}", config.style.blur);
    println!("  Hue Rotate: {}", config.style.hue_rotate);
    println!("  Percentage: {}", config.style.percentage);
    println!();

    println!("Logging:");
    println!("  Filter: {}", config.logging.filter);
    println!();

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
