//! Formats command: canvas presets and output encodings

use duaa::{FormatPreset, OutputFormat};

pub fn run() {
    println!("Duaa v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Canvas presets:");
    for preset in FormatPreset::ALL {
        match preset.dimensions() {
            Some((width, height)) => println!("  {:<20} {}x{}", preset.name(), width, height),
            None => println!("  {:<20} width x height from the config", preset.name()),
        }
    }
    println!();

    println!("Output formats:");
    for format in [OutputFormat::Png, OutputFormat::Jpeg] {
        println!("  {:<20} .{} ({})", format!("{:?}", format).to_lowercase(), format.extension(), format.mime_type());
    }
}
