mod app;
mod assets;
mod audio;

use std::path::{Path, PathBuf};

use clap::Parser;
use nusa_scene::{SceneConfig, SceneError};
use raylib::prelude::*;

use app::{App, AppPaths};
use audio::RaylibSoundtrack;

#[derive(Parser, Debug)]
#[command(name = "nusantara", version, about = "3D explorer of Indonesia's provinces")]
struct Args {
    /// Province GeoJSON FeatureCollection
    #[arg(long)]
    geojson: Option<PathBuf>,

    /// Per-province content tables (TOML)
    #[arg(long)]
    content: Option<PathBuf>,

    /// Assets root; also read from NUSA_ASSETS
    #[arg(long)]
    assets: Option<String>,

    #[arg(long, default_value_t = 1280)]
    width: i32,

    #[arg(long, default_value_t = 720)]
    height: i32,

    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seed for world decoration and background picks
    #[arg(long, default_value_t = 0x6e75_7361)]
    seed: u64,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Do not hot-reload the content tables
    #[arg(long, default_value_t = false)]
    no_watch: bool,

    /// Start with music muted
    #[arg(long, default_value_t = false)]
    muted: bool,
}

fn init_logging(log_file: Option<&Path>) {
    use simplelog::{
        ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger,
    };
    if let Some(path) = log_file {
        match std::fs::File::create(path) {
            Ok(file) => {
                let res = CombinedLogger::init(vec![
                    TermLogger::new(
                        LevelFilter::Info,
                        Config::default(),
                        TerminalMode::Mixed,
                        ColorChoice::Auto,
                    ),
                    WriteLogger::new(LevelFilter::Debug, Config::default(), file),
                ]);
                if res.is_ok() {
                    return;
                }
            }
            Err(e) => eprintln!("cannot open log file {:?}: {}", path, e),
        }
    }
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.log_file.as_deref());

    let root = assets::resolve_assets_root(args.assets.clone());
    log::info!("assets root: {:?}", root);
    let paths = AppPaths {
        geojson: args.geojson.clone().unwrap_or_else(|| assets::geojson_path(&root)),
        content: args.content.clone().unwrap_or_else(|| assets::content_path(&root)),
        media: assets::media_dir(&root),
        watch_content: !args.no_watch,
    };
    let config = SceneConfig {
        seed: args.seed,
        muted: args.muted,
        ..SceneConfig::default()
    };

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title("Nusantara")
        .msaa_4x()
        .resizable()
        .build();
    rl.set_target_fps(args.fps);
    rl.set_exit_key(None);
    rl.set_trace_log(TraceLogLevel::LOG_WARNING);

    let audio = match RaylibAudio::init_audio_device() {
        Ok(audio) => Some(audio),
        Err(e) => {
            log::warn!("audio disabled: {:?}", e);
            None
        }
    };
    let mut soundtrack = RaylibSoundtrack::new(audio.as_ref(), paths.media.clone());

    let mut app: Result<App, SceneError> = App::new(&mut rl, &thread, paths.clone(), config);
    if let Err(e) = &app {
        log::error!("failed to load the province map: {}", e);
    }

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        let retry = match app.as_mut() {
            Ok(app) => {
                app.step(&mut rl, &thread, &mut soundtrack, dt);
                app.render(&mut rl, &thread);
                false
            }
            Err(e) => {
                let message = e.to_string();
                app::render::draw_load_error(&mut rl, &thread, &message);
                rl.is_key_pressed(KeyboardKey::KEY_R)
            }
        };
        if retry {
            log::info!("retrying map load");
            app = App::new(&mut rl, &thread, paths.clone(), config);
            if let Err(e) = &app {
                log::error!("failed to load the province map: {}", e);
            }
        }
    }
}
