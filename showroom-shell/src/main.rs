//! showroom-shell CLI binary
//!
//! Usage: showroom-shell [MODEL]
//! where MODEL is a local .glb/.gltf path or an http(s) URL.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "showroom-shell")]
#[command(about = "Turntable viewer for a single 3D model (GLB/glTF, local path or URL)")]
struct Cli {
    /// Model to display: a local file path or an http(s) URL
    #[arg(default_value = showroom_shell::DEFAULT_MODEL_URL)]
    model: String,

    /// Initial window width
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Initial window height
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Camera near plane
    #[arg(long, default_value_t = 0.1)]
    near: f32,

    /// Camera far plane (raised automatically for large models)
    #[arg(long, default_value_t = 2000.0)]
    far: f32,

    /// Start with the turntable rotation disabled
    #[arg(long)]
    no_auto_rotate: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let options = showroom_shell::ViewerOptions {
        source: cli.model,
        width: cli.width,
        height: cli.height,
        near: cli.near,
        far: cli.far,
        auto_rotate: !cli.no_auto_rotate,
    };

    if let Err(e) = showroom_shell::run(options) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
