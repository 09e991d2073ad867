//! Headless playback: drives one element through the manager with a stepped clock.

use anyhow::{Context, Result, anyhow, bail};
use cadence_config::{CadenceConfig, ConfigError, DEFAULT_CONFIG_FILE, StyleConfig};
use cadence_motion::{
    AnimationDefinition, AnimationManager, Clock, Easing, ManualClock, PlaybackCallbacks,
    RenderStyle, StyleUnits, TransitionConfig, TransitionDirection, TransitionKind,
    create_transform_string,
};
use image::RgbaImage;
use log::{debug, info, warn};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

/// Outcome of a headless run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Frames delivered.
    pub frames: u32,
    /// Whether the animation reached its natural end.
    pub completed: bool,
    /// Raster frames written to disk.
    pub written: Vec<PathBuf>,
    pub final_style: Option<RenderStyle>,
}

/// Value of a `--name=value` flag.
pub fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .find_map(|arg| arg.strip_prefix(name)?.strip_prefix('='))
}

/// Load the config file named by `--config=`, or `cadence.toml` if present.
///
/// An explicit file must load. A broken default file is handed back with
/// defaults so the caller can report it once logging is up.
pub fn load_config(args: &[String]) -> Result<(CadenceConfig, Option<ConfigError>)> {
    if let Some(path) = flag_value(args, "--config") {
        let config = CadenceConfig::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path))?;
        return Ok((config, None));
    }
    Ok(match CadenceConfig::load_if_exists(DEFAULT_CONFIG_FILE) {
        Ok(config) => (config, None),
        Err(err) => (CadenceConfig::default(), Some(err)),
    })
}

/// Logger filter: `CADENCE_LOG`, else the configured filter.
pub fn log_filter(config: &CadenceConfig, lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup("CADENCE_LOG").unwrap_or_else(|| config.logging.filter.clone())
}

/// Apply `--transition=`, `--definition=` and `--input=` on top of the config.
pub fn apply_cli_overrides(config: &mut CadenceConfig, args: &[String]) {
    if let Some(transition) = flag_value(args, "--transition") {
        config.playback.transition = Some(transition.to_string());
        // An explicit transition wins over a configured definition
        config.playback.definition = None;
    }
    if let Some(path) = flag_value(args, "--definition") {
        config.playback.definition = Some(PathBuf::from(path));
    }
    if let Some(path) = flag_value(args, "--input") {
        config.effects.input = Some(PathBuf::from(path));
    }
}

pub fn style_units(style: &StyleConfig) -> StyleUnits {
    StyleUnits {
        translate: style.translate.clone(),
        rotate: style.rotate.clone(),
        skew: style.skew.clone(),
        blur: style.blur.clone(),
        hue_rotate: style.hue_rotate.clone(),
        percentage: style.percentage.clone(),
    }
}

/// What the runner will play.
#[derive(Debug)]
pub struct Plan {
    pub definition: AnimationDefinition,
    /// Set when playing a catalog transition.
    pub transition: Option<(TransitionConfig, TransitionDirection)>,
}

/// Resolve the configured definition file or catalog transition.
pub fn plan(config: &CadenceConfig) -> Result<Plan> {
    let playback = &config.playback;

    if let Some(path) = &playback.definition {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read definition {}", path.display()))?;
        let definition = AnimationDefinition::from_json(&json)
            .with_context(|| format!("invalid definition {}", path.display()))?;
        return Ok(Plan {
            definition,
            transition: None,
        });
    }

    let Some(name) = &playback.transition else {
        bail!("nothing to play: set playback.transition or playback.definition");
    };
    let kind: TransitionKind = name.parse()?;
    let easing: Easing = playback.easing.parse()?;
    let direction: TransitionDirection = playback.direction.parse()?;

    let mut transition = TransitionConfig::new(kind, playback.duration_ms)
        .with_easing(easing)
        .with_direction(direction);
    transition.intensity = playback.intensity;

    info!(
        "{}: {}",
        kind,
        cadence_motion::generate_css_animation(&transition, direction)
    );
    let definition = kind.recipe().to_definition(&transition, direction)?;

    Ok(Plan {
        definition,
        transition: Some((transition, direction)),
    })
}

fn load_source(config: &CadenceConfig, plan: &Plan) -> Result<Option<RgbaImage>> {
    let (Some((transition, _)), Some(path)) = (&plan.transition, &config.effects.input) else {
        return Ok(None);
    };
    if !transition.kind.is_raster() {
        debug!("{} has no raster effect, ignoring input image", transition.kind);
        return Ok(None);
    }

    let image = image::open(path)
        .with_context(|| format!("failed to open input image {}", path.display()))?
        .to_rgba8();
    std::fs::create_dir_all(&config.effects.output_dir).with_context(|| {
        format!(
            "failed to create output dir {}",
            config.effects.output_dir.display()
        )
    })?;
    Ok(Some(image))
}

/// Play the configured animation to completion or `max_frames`.
pub fn run(config: &CadenceConfig) -> Result<RunReport> {
    let plan = plan(config)?;
    let source = load_source(config, &plan)?;
    let units = style_units(&config.style);
    let element_id = config.playback.element_id.as_str();
    let definition_id = plan.definition.id.clone();

    let clock = ManualClock::new();
    let mut manager = AnimationManager::new(Rc::new(clock.clone()));

    let progress = Rc::new(Cell::new(0.0));
    let last_style = Rc::new(RefCell::new(None));
    let completed = Rc::new(Cell::new(false));

    let callbacks = {
        let progress = progress.clone();
        let last_style = last_style.clone();
        let completed = completed.clone();
        PlaybackCallbacks::new()
            .on_frame(move |time, p| {
                progress.set(p);
                debug!("t={:.1}ms progress={:.3}", time, p);
            })
            .on_update(move |properties| {
                let style = create_transform_string(properties, &units);
                info!("{}", style.to_css_declarations());
                *last_style.borrow_mut() = Some(style);
            })
            .on_complete(move || completed.set(true))
    };

    manager.play_animation(element_id, plan.definition, callbacks)?;

    let sample_every = config.effects.sample_every.max(1);
    let mut report = RunReport::default();

    while !manager.is_idle() && report.frames < config.playback.max_frames {
        if manager.tick() == 0 {
            break;
        }

        if let (Some(image), Some((transition, direction))) = (&source, &plan.transition) {
            if report.frames % sample_every == 0 {
                let frame = cadence_raster::transition_frame(
                    image,
                    transition,
                    *direction,
                    progress.get(),
                    clock.now_ms(),
                )
                .ok_or_else(|| anyhow!("{} has no raster effect", transition.kind))?;

                let path = config
                    .effects
                    .output_dir
                    .join(format!("{}-{:04}.png", definition_id, report.frames));
                frame
                    .save(&path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                debug!("wrote {}", path.display());
                report.written.push(path);
            }
        }

        report.frames += 1;
        clock.advance(config.playback.frame_interval_ms);
    }

    if !manager.is_idle() {
        warn!(
            "stopping '{}' after {} frames without completing",
            definition_id, report.frames
        );
        manager.stop_all();
    }

    report.completed = completed.get();
    report.final_style = last_style.take();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::path::Path;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cadence-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_flag_value() {
        let argv = args(&["--transition=wave", "--config=cadence.toml", "--input"]);
        assert_eq!(flag_value(&argv, "--transition"), Some("wave"));
        assert_eq!(flag_value(&argv, "--config"), Some("cadence.toml"));
        assert_eq!(flag_value(&argv, "--input"), None);
        assert_eq!(flag_value(&argv, "--trans"), None);
    }

    #[test]
    fn test_load_config_requires_explicit_file() {
        let dir = temp_dir("config");
        let broken = dir.join("broken.toml");
        std::fs::write(&broken, "[playback\n").unwrap();

        let flag = format!("--config={}", broken.display());
        assert!(load_config(&args(&[flag.as_str()])).is_err());
        assert!(load_config(&args(&["--config=definitely/not/here.toml"])).is_err());

        let good = dir.join("good.toml");
        std::fs::write(&good, "[logging]\nfilter = \"warn\"\n").unwrap();
        let flag = format!("--config={}", good.display());
        let (config, error) = load_config(&args(&[flag.as_str()])).unwrap();
        assert!(error.is_none());
        assert_eq!(config.logging.filter, "warn");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_log_filter_prefers_env() {
        let mut config = CadenceConfig::default();
        config.logging.filter = "warn".to_string();

        assert_eq!(log_filter(&config, |_| None), "warn");
        assert_eq!(
            log_filter(&config, |name| (name == "CADENCE_LOG").then(|| "trace".to_string())),
            "trace"
        );
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = CadenceConfig::default();
        config.playback.definition = Some(PathBuf::from("old.json"));
        apply_cli_overrides(&mut config, &args(&["--transition=zoom-in", "--input=card.png"]));

        assert_eq!(config.playback.transition.as_deref(), Some("zoom-in"));
        assert!(config.playback.definition.is_none());
        assert_eq!(config.effects.input.as_deref(), Some(Path::new("card.png")));
    }

    #[test]
    fn test_plan_rejects_unknown_names() {
        let mut config = CadenceConfig::default();
        config.playback.transition = Some("dissolve".to_string());
        assert!(plan(&config).is_err());

        let mut config = CadenceConfig::default();
        config.playback.easing = "springy".to_string();
        assert!(plan(&config).is_err());

        let mut config = CadenceConfig::default();
        config.playback.transition = Some("morph".to_string());
        config.playback.direction = "out".to_string();
        assert!(plan(&config).is_err());

        let mut config = CadenceConfig::default();
        config.playback.transition = None;
        assert!(plan(&config).is_err());
    }

    #[test]
    fn test_run_fade_to_completion() {
        let config = CadenceConfig::default();
        let report = run(&config).unwrap();

        assert!(report.completed);
        assert!(report.frames > 1);
        assert!(report.written.is_empty());
        let style = report.final_style.unwrap();
        assert_eq!(style.opacity, "1");
    }

    #[test]
    fn test_run_definition_respects_max_frames() {
        let dir = temp_dir("looping");
        let path = dir.join("spin.json");
        std::fs::write(
            &path,
            r#"{"id":"spin","name":"Spin","duration":100,"loop":true,"keyframes":[
                {"id":"a","time":0,"properties":{"rotate":0}},
                {"id":"b","time":100,"properties":{"rotate":360}}
            ]}"#,
        )
        .unwrap();

        let mut config = CadenceConfig::default();
        config.playback.definition = Some(path);
        config.playback.max_frames = 10;

        let report = run(&config).unwrap();
        assert_eq!(report.frames, 10);
        assert!(!report.completed);
        assert!(report.final_style.unwrap().transform.starts_with("rotate("));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_run_writes_sampled_raster_frames() {
        let dir = temp_dir("raster");
        let input = dir.join("input.png");
        RgbaImage::from_fn(8, 8, |x, y| Rgba([(x * 30) as u8, (y * 30) as u8, 128, 255]))
            .save(&input)
            .unwrap();

        let mut config = CadenceConfig::default();
        config.playback.transition = Some("pixelate".to_string());
        config.playback.duration_ms = 100.0;
        config.playback.frame_interval_ms = 25.0;
        config.effects.input = Some(input);
        config.effects.output_dir = dir.join("frames");
        config.effects.sample_every = 2;

        let report = run(&config).unwrap();
        assert!(report.completed);
        assert_eq!(report.frames, 5);
        assert_eq!(report.written.len(), 3);
        assert!(report.written.iter().all(|path| path.exists()));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
